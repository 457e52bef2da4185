use serde::{Deserialize, Serialize};

use crate::model::serde_helper::{f64_lenient, string_lenient};

pub const DASHBOARD_ENDPOINT: &str = "/api/reports/dashboard";

/// One bar of the dashboard summary chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetric {
    #[serde(deserialize_with = "string_lenient")]
    pub label: String,
    #[serde(deserialize_with = "f64_lenient")]
    pub value: f64,
}

/// Bar widths in percent of the largest value; all zero when nothing is positive.
pub fn bar_percentages(metrics: &[DashboardMetric]) -> Vec<f64> {
    let max = metrics.iter().map(|m| m.value).fold(0.0_f64, f64::max);
    metrics
        .iter()
        .map(|m| {
            if max > 0.0 {
                (m.value.max(0.0) / max * 100.0).round()
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_largest_metric() {
        let metrics: Vec<DashboardMetric> = serde_json::from_str(
            r#"[{"label":"Received","value":"50"},{"label":"Printed","value":200},{"label":"Returned","value":0}]"#,
        )
        .unwrap();
        assert_eq!(bar_percentages(&metrics), vec![25.0, 100.0, 0.0]);
        assert!(bar_percentages(&[]).is_empty());
    }
}
