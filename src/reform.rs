//! Reform definition passed to the microsimulation engine

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter path of the refundable CTC phase-in threshold
pub const CTC_PHASE_IN_THRESHOLD: &str = "gov.irs.credits.ctc.refundable.phase_in.threshold";

/// Engine parameter dictionary: parameter path to period to value
pub type EngineParameters = BTreeMap<String, BTreeMap<String, f64>>;

/// A single parameter value override over a dated period (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverride {
    pub parameter: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub value: f64,
}

impl ParameterOverride {
    /// Period in the engine's `YYYY-MM-DD.YYYY-MM-DD` form
    pub fn period_key(&self) -> String {
        format!(
            "{}.{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    /// Whether the override is in force for any part of a calendar year
    pub fn covers_year(&self, year: i32) -> bool {
        self.start.year() <= year && year <= self.end.year()
    }
}

/// Named set of parameter overrides applied on top of current law
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reform {
    pub name: String,
    pub overrides: Vec<ParameterOverride>,
}

impl Reform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            overrides: Vec::new(),
        }
    }

    pub fn with_override(
        mut self,
        parameter: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        value: f64,
    ) -> Self {
        self.overrides.push(ParameterOverride {
            parameter: parameter.into(),
            start,
            end,
            value,
        });
        self
    }

    /// Whether any override applies in the given year
    pub fn is_active(&self, year: i32) -> bool {
        self.overrides.iter().any(|o| o.covers_year(year))
    }

    /// Overrides keyed the way the engine records them
    pub fn engine_parameters(&self) -> EngineParameters {
        let mut params = EngineParameters::new();
        for o in &self.overrides {
            params
                .entry(o.parameter.clone())
                .or_default()
                .insert(o.period_key(), o.value);
        }
        params
    }

    /// Overrides as the engine's `{parameter: {period: value}}` dictionary
    pub fn to_engine_json(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for o in &self.overrides {
            let entry = root
                .entry(o.parameter.clone())
                .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
            if let serde_json::Value::Object(periods) = entry {
                periods.insert(o.period_key(), serde_json::json!(o.value));
            }
        }
        serde_json::Value::Object(root)
    }
}

/// Stronger Start for Working Families Act: zero phase-in threshold from 2026
pub fn stronger_start_reform() -> Reform {
    let (start, end) = match (
        NaiveDate::from_ymd_opt(2026, 1, 1),
        NaiveDate::from_ymd_opt(2100, 12, 31),
    ) {
        (Some(s), Some(e)) => (s, e),
        _ => unreachable!("reform period dates are valid calendar dates"),
    };

    Reform::new("stronger_start").with_override(CTC_PHASE_IN_THRESHOLD, start, end, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stronger_start_reform() {
        let reform = stronger_start_reform();
        assert_eq!(reform.name, "stronger_start");
        assert_eq!(reform.overrides.len(), 1);
        assert_eq!(reform.overrides[0].parameter, CTC_PHASE_IN_THRESHOLD);
        assert_eq!(reform.overrides[0].period_key(), "2026-01-01.2100-12-31");
        assert_eq!(reform.overrides[0].value, 0.0);
    }

    #[test]
    fn test_active_years() {
        let reform = stronger_start_reform();
        assert!(!reform.is_active(2025));
        assert!(reform.is_active(2026));
        assert!(reform.is_active(2035));
        assert!(!reform.is_active(2101));
    }

    #[test]
    fn test_engine_json() {
        let json = stronger_start_reform().to_engine_json();
        assert_eq!(
            json[CTC_PHASE_IN_THRESHOLD]["2026-01-01.2100-12-31"],
            serde_json::json!(0.0)
        );
    }

    #[test]
    fn test_engine_parameters_match_recorded_json() {
        let recorded: EngineParameters = serde_json::from_str(
            r#"{"gov.irs.credits.ctc.refundable.phase_in.threshold": {"2026-01-01.2100-12-31": 0}}"#,
        )
        .unwrap();
        assert_eq!(stronger_start_reform().engine_parameters(), recorded);

        let other = Reform::new("other").with_override(
            CTC_PHASE_IN_THRESHOLD,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2100, 12, 31).unwrap(),
            1_000.0,
        );
        assert_ne!(other.engine_parameters(), recorded);
    }
}
