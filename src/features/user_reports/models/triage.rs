use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::Type;
use utoipa::ToSchema;

/// Likelihood label attached to a self-report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "triage_result", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TriageResult {
    Lesslikely,
    Likely,
    Morelikely,
}

impl std::fmt::Display for TriageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriageResult::Lesslikely => write!(f, "lesslikely"),
            TriageResult::Likely => write!(f, "likely"),
            TriageResult::Morelikely => write!(f, "morelikely"),
        }
    }
}

impl std::str::FromStr for TriageResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lesslikely" => Ok(TriageResult::Lesslikely),
            "likely" => Ok(TriageResult::Likely),
            "morelikely" => Ok(TriageResult::Morelikely),
            other => Err(format!(
                "Unknown triage result '{}', expected lesslikely, likely or morelikely",
                other
            )),
        }
    }
}

impl TriageResult {
    /// Fever threshold (°F) above which exposure makes infection more likely
    pub const HIGH_FEVER_F: f64 = 102.0;

    /// Temperature (°F) from which exposure makes infection likely
    pub const FEVER_F: f64 = 98.0;

    /// Classify a report from its temperature and exposure flags.
    ///
    /// Without travel or contact the label is always `lesslikely`. NaN never
    /// reaches a threshold.
    pub fn assess(temperature: f64, flags: TravelFlags) -> Self {
        if !flags.exposed() {
            return TriageResult::Lesslikely;
        }

        if temperature >= Self::HIGH_FEVER_F {
            TriageResult::Morelikely
        } else if temperature >= Self::FEVER_F {
            TriageResult::Likely
        } else {
            TriageResult::Lesslikely
        }
    }

    /// Advice returned to the reporter
    pub fn message(&self) -> &'static str {
        match self {
            TriageResult::Lesslikely => {
                "Based on the symptoms and travel details you reported, a COVID-19 \
                 infection appears unlikely. Infection cannot be ruled out without a test, \
                 so avoid crowds and limit outside contact. If in doubt, call the hotline \
                 or visit a designated COVID-19 health facility."
            }
            TriageResult::Likely | TriageResult::Morelikely => {
                "Based on the symptoms and travel details you reported, you may have a \
                 COVID-19 infection. Please call the hotline or visit the nearest \
                 designated COVID-19 health facility for testing. Until then, stay in \
                 self-quarantine and avoid contact with other people."
            }
        }
    }
}

/// Exposure flags read from the free-form `travel_history` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TravelFlags {
    pub has_travel_history: bool,
    pub has_covid_contact: bool,
}

impl TravelFlags {
    /// Parse `travel_history` as a JSON object.
    ///
    /// Anything else (invalid JSON, arrays, scalars) yields no flags. The
    /// misspelt `has_convid_contact` key sent by older clients is honoured.
    pub fn parse(travel_history: &str) -> Self {
        let object = match serde_json::from_str::<Value>(travel_history) {
            Ok(Value::Object(map)) => map,
            _ => return Self::default(),
        };

        let flag = |key: &str| object.get(key).map(truthy).unwrap_or(false);

        Self {
            has_travel_history: flag("has_travel_history"),
            has_covid_contact: flag("has_covid_contact") || flag("has_convid_contact"),
        }
    }

    pub fn exposed(&self) -> bool {
        self.has_travel_history || self.has_covid_contact
    }
}

/// Loose truthiness, clients send `true`, `1` or `"yes"` interchangeably
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAVELLED: TravelFlags = TravelFlags {
        has_travel_history: true,
        has_covid_contact: false,
    };

    #[test]
    fn test_parse_flags() {
        let flags = TravelFlags::parse(r#"{"has_travel_history": true}"#);
        assert!(flags.has_travel_history);
        assert!(!flags.has_covid_contact);

        let flags = TravelFlags::parse(r#"{"has_convid_contact": true}"#);
        assert!(flags.has_covid_contact);

        let flags = TravelFlags::parse(r#"{"has_covid_contact": false, "has_convid_contact": 1}"#);
        assert!(flags.has_covid_contact);
    }

    #[test]
    fn test_non_object_travel_history_has_no_flags() {
        for raw in ["", "not json", "[true]", "true", "42", r#""has_travel_history""#] {
            assert_eq!(TravelFlags::parse(raw), TravelFlags::default(), "{raw}");
        }
    }

    #[test]
    fn test_assess_thresholds() {
        assert_eq!(TriageResult::assess(102.0, TRAVELLED), TriageResult::Morelikely);
        assert_eq!(TriageResult::assess(101.9, TRAVELLED), TriageResult::Likely);
        assert_eq!(TriageResult::assess(98.0, TRAVELLED), TriageResult::Likely);
        assert_eq!(TriageResult::assess(97.9, TRAVELLED), TriageResult::Lesslikely);
        assert_eq!(
            TriageResult::assess(104.0, TravelFlags::default()),
            TriageResult::Lesslikely
        );
        assert_eq!(TriageResult::assess(f64::NAN, TRAVELLED), TriageResult::Lesslikely);
    }

    #[test]
    fn test_assess_is_monotonic_in_temperature() {
        let contact = TravelFlags {
            has_travel_history: false,
            has_covid_contact: true,
        };

        for flags in [TravelFlags::default(), TRAVELLED, contact] {
            let mut previous = TriageResult::Lesslikely;
            let mut temperature = 90.0;
            while temperature <= 110.0 {
                let current = TriageResult::assess(temperature, flags);
                assert!(current >= previous, "dropped at {temperature} for {flags:?}");
                previous = current;
                temperature += 0.25;
            }
        }
    }

    #[test]
    fn test_result_labels_round_trip_through_str() {
        for label in ["lesslikely", "likely", "morelikely"] {
            let parsed: TriageResult = label.parse().unwrap();
            assert_eq!(parsed.to_string(), label);
        }
        assert!("maybe".parse::<TriageResult>().is_err());
    }
}
