//! Core domain types
//!
//! Closed enumerations for the supported industries and scenario classes,
//! plus validated newtypes for years and percentages.

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported Scope 3-heavy industries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    /// Food, Beverage & Tobacco
    FoodBeverageTobacco,
    /// Capital Goods
    CapitalGoods,
    /// Consumer Goods
    ConsumerGoods,
    /// Financial Services
    FinancialServices,
    /// Retail
    Retail,
}

impl Industry {
    /// All supported industries in display order
    pub const ALL: [Industry; 5] = [
        Industry::FoodBeverageTobacco,
        Industry::CapitalGoods,
        Industry::ConsumerGoods,
        Industry::FinancialServices,
        Industry::Retail,
    ];

    /// Stable identifier
    #[inline]
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::FoodBeverageTobacco => "food_beverage_tobacco",
            Self::CapitalGoods => "capital_goods",
            Self::ConsumerGoods => "consumer_goods",
            Self::FinancialServices => "financial_services",
            Self::Retail => "retail",
        }
    }

    /// Human-readable name
    #[inline]
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::FoodBeverageTobacco => "Food, Beverage & Tobacco",
            Self::CapitalGoods => "Capital Goods",
            Self::ConsumerGoods => "Consumer Goods",
            Self::FinancialServices => "Financial Services",
            Self::Retail => "Retail",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Industry {
    type Err = InputError;

    /// Accepts the identifier or the display name, case-insensitive,
    /// with spaces and hyphens treated as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|i| i.id() == key || normalize(i.display_name()) == key)
            .ok_or_else(|| InputError::UnknownIndustry(s.to_string()))
    }
}

/// Decarbonization scenario classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioClass {
    /// Proven interventions under current technology constraints
    Conservative,
    /// Successful scaling of emerging technologies
    Ambitious,
    /// Major technological breakthroughs
    Breakthrough,
}

impl ScenarioClass {
    /// All scenario classes, most to least constrained
    pub const ALL: [ScenarioClass; 3] = [
        ScenarioClass::Conservative,
        ScenarioClass::Ambitious,
        ScenarioClass::Breakthrough,
    ];

    /// Stable identifier
    #[inline]
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Ambitious => "ambitious",
            Self::Breakthrough => "breakthrough",
        }
    }
}

impl fmt::Display for ScenarioClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ScenarioClass {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|c| c.id() == key)
            .ok_or_else(|| InputError::UnknownScenario(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .replace(", ", "_")
        .replace(" & ", "_")
        .replace([' ', '-'], "_")
}

/// Calendar year within the modelled horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct Year(u16);

impl Year {
    /// First modelled year
    pub const MIN: u16 = 2025;
    /// Last modelled year
    pub const MAX: u16 = 2050;

    /// Validate a year against the horizon
    ///
    /// # Errors
    /// Returns `InputError::YearOutOfRange` outside `MIN..=MAX`
    pub fn new(year: i64) -> Result<Self, InputError> {
        match u16::try_from(year) {
            Ok(y) if (Self::MIN..=Self::MAX).contains(&y) => Ok(Self(y)),
            _ => Err(InputError::YearOutOfRange {
                year,
                min: Self::MIN,
                max: Self::MAX,
            }),
        }
    }

    /// Raw year value
    #[inline]
    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }

    /// Every year of the horizon in order
    pub fn horizon() -> impl Iterator<Item = Year> {
        (Self::MIN..=Self::MAX).map(Year)
    }
}

impl TryFrom<i64> for Year {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// Zero percent
    pub const ZERO: Percentage = Percentage(0.0);
    /// One hundred percent
    pub const FULL: Percentage = Percentage(100.0);

    /// Validate a caller-supplied percentage
    ///
    /// # Errors
    /// Returns `InputError::NonFinite` or `InputError::PercentageOutOfRange`
    pub fn new(field: &'static str, value: f64) -> Result<Self, InputError> {
        if !value.is_finite() {
            return Err(InputError::NonFinite { field, value });
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(InputError::PercentageOutOfRange { field, value });
        }
        Ok(Self(value))
    }

    /// Clamp any finite value into [0, 100]; NaN maps to zero
    #[inline]
    #[must_use]
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 100.0))
        }
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Complement, e.g. residual share from a maximum reduction
    #[inline]
    #[must_use]
    pub fn complement(self) -> Self {
        Self(100.0 - self.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn industry_parses_id_and_display_name() {
        assert_eq!(
            "financial_services".parse::<Industry>().unwrap(),
            Industry::FinancialServices
        );
        assert_eq!(
            "Food, Beverage & Tobacco".parse::<Industry>().unwrap(),
            Industry::FoodBeverageTobacco
        );
        assert_eq!(
            "capital-goods".parse::<Industry>().unwrap(),
            Industry::CapitalGoods
        );
    }

    #[test]
    fn unknown_industry_is_rejected() {
        let err = "steel".parse::<Industry>().unwrap_err();
        assert_eq!(err, InputError::UnknownIndustry("steel".into()));
    }

    #[test]
    fn scenario_parses_case_insensitively() {
        assert_eq!(
            " Breakthrough ".parse::<ScenarioClass>().unwrap(),
            ScenarioClass::Breakthrough
        );
        assert!("optimistic".parse::<ScenarioClass>().is_err());
    }

    #[test]
    fn year_bounds() {
        assert!(Year::new(2025).is_ok());
        assert!(Year::new(2050).is_ok());
        assert!(matches!(
            Year::new(2051),
            Err(InputError::YearOutOfRange { year: 2051, .. })
        ));
        assert!(Year::new(-1).is_err());
        assert_eq!(Year::horizon().count(), 26);
    }

    #[test]
    fn percentage_validation_and_clamping() {
        assert!(Percentage::new("p", 100.0).is_ok());
        assert!(matches!(
            Percentage::new("p", 100.5),
            Err(InputError::PercentageOutOfRange { .. })
        ));
        assert!(matches!(
            Percentage::new("p", f64::NAN),
            Err(InputError::NonFinite { .. })
        ));
        assert_eq!(Percentage::clamped(-3.0), Percentage::ZERO);
        assert_eq!(Percentage::clamped(140.0), Percentage::FULL);
        assert_eq!(Percentage::clamped(85.0).complement().get(), 15.0);
    }

    #[test]
    fn industry_serde_uses_ids() {
        let json = serde_json::to_string(&Industry::ConsumerGoods).unwrap();
        assert_eq!(json, "\"consumer_goods\"");
    }
}
