//! Subcommand execution
//!
//! Every command gets its own session, so overrides never outlive one
//! invocation.

use clap::ArgMatches;
use dynres_model::{
    urgency_matrix, DecayProfile, Industry, ReferenceData, ScenarioClass, ScenarioReductions,
    Session, TrajectoryModel, Year,
};

use crate::config::DashboardConfig;
use crate::error::CliError;
use crate::report::{
    render, EstimateReport, ImpactReport, IndustriesReport, ProfileReport, TimelineReport,
    UrgencyReport, ValidationReport,
};

/// Load the configured reference table, or the shipped one
///
/// # Errors
/// Returns `CliError::Model` with an `InvalidConfiguration` cause
pub fn load_reference(config: &DashboardConfig) -> Result<(String, ReferenceData), CliError> {
    match &config.reference_data {
        Some(path) => {
            let data = ReferenceData::load(path)?;
            Ok((path.display().to_string(), data))
        }
        None => Ok(("builtin".to_string(), ReferenceData::builtin()?)),
    }
}

/// Run a subcommand and return its rendered output
///
/// # Errors
/// Returns `CliError` for invalid input, unusable reference data or a
/// serialization failure
pub fn execute(
    name: &str,
    args: &ArgMatches,
    config: &DashboardConfig,
) -> Result<String, CliError> {
    let (source, data) = load_reference(config)?;
    let model = TrajectoryModel::new(&data);
    let json = args.get_flag("json");
    tracing::debug!("Running {} against {} reference data", name, source);

    let output = match name {
        "industries" => render(&IndustriesReport::new(&data), json)?,
        "profile" => {
            let industry = industry(args)?;
            render(&ProfileReport::new(data.record(industry)), json)?
        }
        "estimate" => {
            let industry = industry(args)?;
            let scenario: ScenarioClass = string(args, "scenario").parse()?;
            let year = Year::new(args.get_one::<i64>("year").copied().unwrap_or_default())?;
            let session = session(&model, args, industry)?;
            let residual = model.estimate_in(&session, industry, scenario, i64::from(year.get()))?;
            let report = EstimateReport::new(
                industry,
                scenario,
                year.get(),
                residual,
                session.override_for(industry),
            );
            render(&report, json)?
        }
        "timeline" => {
            let industry = industry(args)?;
            let session = session(&model, args, industry)?;
            let report = TimelineReport {
                snapshot: model.snapshot(&session, industry),
            };
            render(&report, json)?
        }
        "impact" => {
            let industry = industry(args)?;
            let session = session(&model, args, industry)?;
            let year = args.get_one::<i64>("year").copied().unwrap_or(2050);
            let baseline = args
                .get_one::<f64>("baseline")
                .copied()
                .unwrap_or(config.baseline_tonnes);
            let cost = args
                .get_one::<f64>("cost")
                .copied()
                .unwrap_or(config.removal_cost);
            let report = ImpactReport {
                plan: model.removal_plan(&session, industry, year, baseline, cost)?,
                summary: model.impact_summary(&session, industry, year, baseline)?,
                applied_override: session.override_for(industry),
            };
            render(&report, json)?
        }
        "builder" => {
            let industry = industry(args)?;
            let reduction = |key| args.get_one::<f64>(key).copied().unwrap_or(f64::NAN);
            let reductions = ScenarioReductions::new(
                reduction("conservative"),
                reduction("ambitious"),
                reduction("breakthrough"),
            )
            .map_err(|e| {
                tracing::warn!("Rejected scenario reductions: {}", e);
                e
            })?;
            let report = TimelineReport {
                snapshot: model.build_scenarios(industry, &reductions, &DecayProfile::default()),
            };
            render(&report, json)?
        }
        "urgency" => render(
            &UrgencyReport {
                points: urgency_matrix(&data),
            },
            json,
        )?,
        "validate" => render(&ValidationReport::new(source, &data), json)?,
        other => {
            tracing::warn!("Unknown subcommand {}", other);
            String::new()
        }
    };
    Ok(output)
}

fn string<'a>(args: &'a ArgMatches, id: &str) -> &'a str {
    args.get_one::<String>(id).map_or("", String::as_str)
}

fn industry(args: &ArgMatches) -> Result<Industry, CliError> {
    Ok(string(args, "industry").parse()?)
}

fn session(
    model: &TrajectoryModel<'_>,
    args: &ArgMatches,
    industry: Industry,
) -> Result<Session, CliError> {
    let mut session = Session::new();
    if let Some(&value) = args.get_one::<f64>("max-potential") {
        model.apply_override(&mut session, industry, value)?;
    }
    Ok(session)
}
