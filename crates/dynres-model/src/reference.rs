//! Reference data
//!
//! The five industry records and their anchor curves. Loaded once at
//! startup, validated, then shared read-only by every computation.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::curve::ScenarioCurve;
use crate::error::ConfigError;
use crate::types::{Industry, ScenarioClass};

/// Reference table compiled into the binary
const BUILTIN_REFERENCE: &str = include_str!("../data/reference.toml");

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// TOML document with `[[industries]]` tables
    Toml,
    /// JSON object with an `industries` array
    Json,
    /// YAML mapping with an `industries` sequence
    Yaml,
}

impl DataFormat {
    /// Detect format from file extension
    ///
    /// # Errors
    /// Returns `ConfigError::UnsupportedFormat` for other extensions
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Format name for diagnostics
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Complexity factors of an industry's value chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    /// Supply chain tiers (0 when the model does not apply)
    #[serde(default)]
    pub supply_chain_tiers: u8,
    /// Degree of control over value chain emissions
    #[serde(default)]
    pub control_level: String,
    /// Headline challenge
    #[serde(default)]
    pub main_challenge: String,
}

/// Decarbonization intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// Intervention name
    pub name: String,
    /// Reduction potential range, e.g. "30-50%"
    pub potential: String,
    /// Implementation timeline range, e.g. "5-10 years"
    pub timeline: String,
    /// High / Medium / Low / Variable
    pub scalability: String,
}

impl Intervention {
    /// Midpoint of the potential range in percent
    #[must_use]
    pub fn potential_midpoint(&self) -> Option<f64> {
        range_midpoint(&self.potential)
    }

    /// Midpoint of the timeline range in years
    #[must_use]
    pub fn timeline_midpoint(&self) -> Option<f64> {
        range_midpoint(&self.timeline)
    }
}

/// Midpoint of a range such as "30-50%", "5-10 years" or "40%"
fn range_midpoint(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?.trim_end_matches('%');
    let mut bounds = token.splitn(2, '-');
    let lo: f64 = bounds.next()?.parse().ok()?;
    let hi: f64 = match bounds.next() {
        Some(hi) => hi.parse().ok()?,
        None => lo,
    };
    Some((lo + hi) / 2.0)
}

/// One curve per scenario class
///
/// Fields are optional on the wire so that a missing class surfaces as
/// a validation error rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCurves {
    /// Conservative curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conservative: Option<ScenarioCurve>,
    /// Ambitious curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambitious: Option<ScenarioCurve>,
    /// Breakthrough curve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakthrough: Option<ScenarioCurve>,
}

impl ScenarioCurves {
    /// Curve for a class, if present
    #[must_use]
    pub fn get(&self, scenario: ScenarioClass) -> Option<&ScenarioCurve> {
        match scenario {
            ScenarioClass::Conservative => self.conservative.as_ref(),
            ScenarioClass::Ambitious => self.ambitious.as_ref(),
            ScenarioClass::Breakthrough => self.breakthrough.as_ref(),
        }
    }

    /// Replace the curve for a class
    pub fn set(&mut self, scenario: ScenarioClass, curve: ScenarioCurve) {
        *self.slot(scenario) = Some(curve);
    }

    /// Take the curve for a class out
    pub fn remove(&mut self, scenario: ScenarioClass) -> Option<ScenarioCurve> {
        self.slot(scenario).take()
    }

    fn slot(&mut self, scenario: ScenarioClass) -> &mut Option<ScenarioCurve> {
        match scenario {
            ScenarioClass::Conservative => &mut self.conservative,
            ScenarioClass::Ambitious => &mut self.ambitious,
            ScenarioClass::Breakthrough => &mut self.breakthrough,
        }
    }
}

static EMPTY_CURVE: ScenarioCurve = ScenarioCurve::EMPTY;

/// One industry's reference record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryRecord {
    /// Industry identifier
    pub industry: Industry,
    /// Display name
    pub name: String,
    /// Average Scope 3 share of total emissions
    pub scope3_share: f64,
    /// Number of CDP disclosures behind the share
    #[serde(default)]
    pub cdp_sample_size: u32,
    /// Why a uniform threshold misfits this industry
    #[serde(default)]
    pub why_static_fails: String,
    /// Scope 3 category breakdown
    #[serde(default)]
    pub scope3_categories: Vec<String>,
    /// Factors keeping residuals up
    #[serde(default)]
    pub residual_drivers: Vec<String>,
    /// Value chain complexity
    #[serde(default)]
    pub complexity: Complexity,
    /// Key interventions
    #[serde(default)]
    pub interventions: Vec<Intervention>,
    /// Anchor curve per scenario class
    pub curves: ScenarioCurves,
}

impl IndustryRecord {
    /// Curve for a scenario class
    ///
    /// Validated records hold all three; an unvalidated record missing
    /// the class yields an empty curve.
    #[inline]
    #[must_use]
    pub fn curve(&self, scenario: ScenarioClass) -> &ScenarioCurve {
        self.curves.get(scenario).unwrap_or(&EMPTY_CURVE)
    }

    /// Maximum decarbonization potential implied by a curve's terminal anchor
    #[must_use]
    pub fn max_reduction(&self, scenario: ScenarioClass) -> f64 {
        self.curve(scenario)
            .last()
            .map_or(0.0, |a| 100.0 - a.value)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let industry = self.industry;
        if !self.scope3_share.is_finite() || !(0.0..=100.0).contains(&self.scope3_share) {
            return Err(ConfigError::Scope3OutOfRange {
                industry,
                value: self.scope3_share,
            });
        }

        for scenario in ScenarioClass::ALL {
            let curve = self
                .curves
                .get(scenario)
                .ok_or(ConfigError::MissingScenario { industry, scenario })?;
            curve.validate(industry, scenario)?;
        }

        for intervention in &self.interventions {
            if intervention.potential_midpoint().is_none() {
                return Err(ConfigError::MalformedIntervention {
                    industry,
                    field: "potential",
                    value: intervention.potential.clone(),
                });
            }
            if intervention.timeline_midpoint().is_none() {
                return Err(ConfigError::MalformedIntervention {
                    industry,
                    field: "timeline",
                    value: intervention.timeline.clone(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReferenceDocument {
    industries: Vec<IndustryRecord>,
}

/// Validated, immutable reference tables
///
/// Holds exactly one record per supported industry, each with all three
/// scenario curves.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    /// Records in `Industry::ALL` order
    records: Vec<IndustryRecord>,
}

impl ReferenceData {
    /// Validate a set of records
    ///
    /// # Errors
    /// Returns the first `ConfigError` found
    pub fn from_records(records: Vec<IndustryRecord>) -> Result<Self, ConfigError> {
        let mut by_industry: BTreeMap<Industry, IndustryRecord> = BTreeMap::new();
        for record in records {
            record.validate()?;
            let industry = record.industry;
            if by_industry.insert(industry, record).is_some() {
                return Err(ConfigError::DuplicateIndustry(industry));
            }
        }

        let mut ordered = Vec::with_capacity(Industry::ALL.len());
        for industry in Industry::ALL {
            let record = by_industry
                .remove(&industry)
                .ok_or(ConfigError::MissingIndustry(industry))?;
            ordered.push(record);
        }

        tracing::debug!("Validated reference data for {} industries", ordered.len());
        Ok(Self { records: ordered })
    }

    /// Parse and validate a document
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` or a validation error
    pub fn parse(text: &str, format: DataFormat) -> Result<Self, ConfigError> {
        let parse_err = |reason: String| ConfigError::Parse {
            format: format.name(),
            reason,
        };
        let doc: ReferenceDocument = match format {
            DataFormat::Toml => toml::from_str(text).map_err(|e| parse_err(e.to_string()))?,
            DataFormat::Json => {
                serde_json::from_str(text).map_err(|e| parse_err(e.to_string()))?
            }
            DataFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| parse_err(e.to_string()))?
            }
        };
        Self::from_records(doc.industries)
    }

    /// Read, parse and validate a file; format follows the extension
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O, format or validation failure
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = DataFormat::from_path(path)?;
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Loading {} reference data from {}", format.name(), path.display());
        Self::parse(&text, format)
    }

    /// Reference table shipped with the crate
    ///
    /// # Errors
    /// Returns `ConfigError` if the embedded table is malformed
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(BUILTIN_REFERENCE, DataFormat::Toml)
    }

    /// Record for an industry
    #[inline]
    #[must_use]
    pub fn record(&self, industry: Industry) -> &IndustryRecord {
        &self.records[industry as usize]
    }

    /// Curve for an (industry, scenario) pair
    #[inline]
    #[must_use]
    pub fn curve(&self, industry: Industry, scenario: ScenarioClass) -> &ScenarioCurve {
        self.record(industry).curve(scenario)
    }

    /// All records in display order
    #[inline]
    pub fn records(&self) -> impl Iterator<Item = &IndustryRecord> {
        self.records.iter()
    }

    /// Serialize back to a document
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if serialization fails
    pub fn to_document(&self, format: DataFormat) -> Result<String, ConfigError> {
        render_records(&self.records, format)
    }
}

/// Serialize records, validated or not, as a reference document
///
/// # Errors
/// Returns `ConfigError::Parse` if serialization fails
pub fn render_records(records: &[IndustryRecord], format: DataFormat) -> Result<String, ConfigError> {
    let doc = ReferenceDocument {
        industries: records.to_vec(),
    };
    let ser_err = |reason: String| ConfigError::Parse {
        format: format.name(),
        reason,
    };
    match format {
        DataFormat::Toml => toml::to_string_pretty(&doc).map_err(|e| ser_err(e.to_string())),
        DataFormat::Json => serde_json::to_string_pretty(&doc).map_err(|e| ser_err(e.to_string())),
        DataFormat::Yaml => serde_yaml::to_string(&doc).map_err(|e| ser_err(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.records().count(), 5);
        for (record, industry) in data.records().zip(Industry::ALL) {
            assert_eq!(record.industry, industry);
            assert_eq!(record.name, industry.display_name());
        }
    }

    #[test]
    fn builtin_terminal_anchors_match_max_reductions() {
        let data = ReferenceData::builtin().unwrap();
        let food = data.record(Industry::FoodBeverageTobacco);
        assert_eq!(food.max_reduction(ScenarioClass::Conservative), 75.0);
        assert_eq!(food.max_reduction(ScenarioClass::Ambitious), 85.0);
        assert_eq!(food.max_reduction(ScenarioClass::Breakthrough), 88.0);

        let fin = data.record(Industry::FinancialServices);
        assert_eq!(fin.scope3_share, 99.98);
        assert_eq!(fin.max_reduction(ScenarioClass::Conservative), 70.0);
    }

    #[test]
    fn range_midpoints() {
        assert_eq!(range_midpoint("30-50%"), Some(40.0));
        assert_eq!(range_midpoint("5-10 years"), Some(7.5));
        assert_eq!(range_midpoint("40%"), Some(40.0));
        assert_eq!(range_midpoint("unknown"), None);
        assert_eq!(range_midpoint(""), None);
    }

    #[test]
    fn format_detection() {
        assert_eq!(
            DataFormat::from_path(Path::new("a/ref.TOML")).unwrap(),
            DataFormat::Toml
        );
        assert_eq!(
            DataFormat::from_path(Path::new("ref.yml")).unwrap(),
            DataFormat::Yaml
        );
        assert!(matches!(
            DataFormat::from_path(Path::new("ref.csv")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn toml_parse_errors_are_configuration_errors() {
        let err = ReferenceData::parse("industries = 3", DataFormat::Toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "TOML", .. }));
    }

    #[test]
    fn missing_industry_is_rejected() {
        let data = ReferenceData::builtin().unwrap();
        let records: Vec<_> = data
            .records()
            .filter(|r| r.industry != Industry::Retail)
            .cloned()
            .collect();
        assert_eq!(
            ReferenceData::from_records(records).unwrap_err(),
            ConfigError::MissingIndustry(Industry::Retail)
        );
    }

    #[test]
    fn duplicate_industry_is_rejected() {
        let data = ReferenceData::builtin().unwrap();
        let mut records: Vec<_> = data.records().cloned().collect();
        records.push(data.record(Industry::CapitalGoods).clone());
        assert_eq!(
            ReferenceData::from_records(records).unwrap_err(),
            ConfigError::DuplicateIndustry(Industry::CapitalGoods)
        );
    }

    #[test]
    fn missing_scenario_is_rejected() {
        let data = ReferenceData::builtin().unwrap();
        let mut records: Vec<_> = data.records().cloned().collect();
        records[1].curves.remove(ScenarioClass::Breakthrough);
        assert_eq!(
            ReferenceData::from_records(records).unwrap_err(),
            ConfigError::MissingScenario {
                industry: Industry::CapitalGoods,
                scenario: ScenarioClass::Breakthrough,
            }
        );
    }

    #[test]
    fn malformed_intervention_is_rejected() {
        let data = ReferenceData::builtin().unwrap();
        let mut records: Vec<_> = data.records().cloned().collect();
        records[0].interventions[0].timeline = "soon".into();
        assert!(matches!(
            ReferenceData::from_records(records),
            Err(ConfigError::MalformedIntervention {
                field: "timeline",
                ..
            })
        ));
    }

    #[test]
    fn scope3_share_out_of_range_is_rejected() {
        let data = ReferenceData::builtin().unwrap();
        let mut records: Vec<_> = data.records().cloned().collect();
        records[3].scope3_share = 120.0;
        assert!(matches!(
            ReferenceData::from_records(records),
            Err(ConfigError::Scope3OutOfRange { .. })
        ));
    }

    #[test]
    fn json_and_yaml_round_trip_through_validation() {
        let data = ReferenceData::builtin().unwrap();
        for format in [DataFormat::Json, DataFormat::Yaml, DataFormat::Toml] {
            let text = data.to_document(format).unwrap();
            let reparsed = ReferenceData::parse(&text, format).unwrap();
            assert_eq!(reparsed, data);
        }
    }
}
