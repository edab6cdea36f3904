//! Command line definition

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

fn industry_arg() -> Arg {
    Arg::new("industry")
        .long("industry")
        .short('i')
        .required(true)
        .help("Industry id or display name, e.g. capital_goods or \"Capital Goods\"")
}

fn max_potential_arg() -> Arg {
    Arg::new("max-potential")
        .long("max-potential")
        .value_parser(value_parser!(f64))
        .help("Custom maximum decarbonization potential for the ambitious scenario, percent")
}

fn reduction_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .value_parser(value_parser!(f64))
        .help(help)
}

/// Build the `dynres` command
#[must_use]
pub fn command() -> Command {
    Command::new("dynres")
        .version(dynres_model::VERSION)
        .about("Dynamic residual emissions explorer")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (TOML)"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Reference data file (toml, json or yaml)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .value_parser(["pretty", "json"])
                .help("Log output format"),
        )
        .arg(
            Arg::new("log-filter")
                .long("log-filter")
                .global(true)
                .help("Log filter directive when RUST_LOG is unset"),
        )
        .subcommand(Command::new("industries").about("List supported industries"))
        .subcommand(
            Command::new("profile")
                .about("Show an industry deep dive")
                .arg(industry_arg()),
        )
        .subcommand(
            Command::new("estimate")
                .about("Residual emissions for one industry, scenario and year")
                .arg(industry_arg())
                .arg(
                    Arg::new("scenario")
                        .long("scenario")
                        .short('s')
                        .required(true)
                        .help("conservative, ambitious or breakthrough"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .short('y')
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                        .help("Year between 2025 and 2050"),
                )
                .arg(max_potential_arg()),
        )
        .subcommand(
            Command::new("timeline")
                .about("Yearly trajectories against the static threshold")
                .arg(industry_arg())
                .arg(max_potential_arg()),
        )
        .subcommand(
            Command::new("impact")
                .about("Financial impact and carbon removal requirements")
                .arg(industry_arg())
                .arg(
                    Arg::new("baseline")
                        .long("baseline")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Baseline emissions, tCO2e per year"),
                )
                .arg(
                    Arg::new("cost")
                        .long("cost")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Carbon removal price per tonne"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .short('y')
                        .default_value("2050")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i64))
                        .help("Year between 2025 and 2050"),
                )
                .arg(max_potential_arg()),
        )
        .subcommand(
            Command::new("builder")
                .about("Rebuild all three scenarios from maximum reductions")
                .arg(industry_arg())
                .arg(reduction_arg(
                    "conservative",
                    "Conservative maximum reduction, 60 to 98",
                ))
                .arg(reduction_arg(
                    "ambitious",
                    "Ambitious maximum reduction, conservative to 98",
                ))
                .arg(reduction_arg(
                    "breakthrough",
                    "Breakthrough maximum reduction, ambitious to 98",
                )),
        )
        .subcommand(Command::new("urgency").about("Scope 3 dominance against guidance gap"))
        .subcommand(Command::new("validate").about("Load and validate reference data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn globals_reach_subcommands() {
        let matches = command()
            .try_get_matches_from(["dynres", "estimate", "-i", "retail", "-s", "ambitious", "-y", "2040", "--json"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "estimate");
        assert!(sub.get_flag("json"));
        assert_eq!(sub.get_one::<i64>("year"), Some(&2040));
    }

    #[test]
    fn impact_year_defaults_to_horizon_end() {
        let matches = command()
            .try_get_matches_from(["dynres", "impact", "--industry", "retail"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(sub.get_one::<i64>("year"), Some(&2050));
        assert!(sub.get_one::<f64>("baseline").is_none());
    }

    #[test]
    fn builder_requires_all_reductions() {
        assert!(command()
            .try_get_matches_from(["dynres", "builder", "-i", "retail", "--conservative", "70"])
            .is_err());
    }
}
