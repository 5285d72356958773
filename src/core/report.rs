/// Structured output envelope for the command-line tools.

use chrono::{Local, SecondsFormat};
use serde::Serialize;

/// A JSON report: a timestamp, an echo of the input parameters, and the
/// generated strings.
#[derive(Debug, Serialize)]
pub struct Report {
    pub timestamp: String,
    pub kind: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub items: Vec<String>,
}

impl Report {
    pub fn new(kind: &str, seed: Option<u64>, items: Vec<String>) -> Report {
        Report {
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            kind: kind.to_string(),
            count: items.len(),
            seed,
            items,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_items() {
        let report = Report::new("murmur", Some(42), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(report.count, 2);
        assert_eq!(report.kind, "murmur");
    }

    #[test]
    fn report_serializes_fields() {
        let report = Report::new("murmur", Some(7), vec!["one line".to_string()]);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"kind\": \"murmur\""));
        assert!(json.contains("\"seed\": 7"));
        assert!(json.contains("one line"));
    }

    #[test]
    fn report_omits_missing_seed() {
        let report = Report::new("murmur", None, Vec::new());
        let json = report.to_json().unwrap();
        assert!(!json.contains("\"seed\""));
        assert_eq!(report.count, 0);
    }
}
