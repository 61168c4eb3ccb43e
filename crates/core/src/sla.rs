//! SLA compliance evaluation for inbound service metrics.

use serde::{Deserialize, Serialize};

use crate::types::round1;

/// Points below target that still count as at-risk rather than missed.
pub const AT_RISK_MARGIN: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlaStatus {
    Met,
    AtRisk,
    Missed,
}

/// One tracked service level, e.g. on-time delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaMetric {
    pub metric: String,
    /// Target percentage.
    pub target: f64,
    /// Achieved percentage.
    pub actual: f64,
}

impl SlaMetric {
    pub fn new(metric: impl Into<String>, target: f64, actual: f64) -> Self {
        Self {
            metric: metric.into(),
            target,
            actual,
        }
    }

    pub fn status(&self) -> SlaStatus {
        if self.actual >= self.target {
            SlaStatus::Met
        } else if self.target - self.actual <= AT_RISK_MARGIN {
            SlaStatus::AtRisk
        } else {
            SlaStatus::Missed
        }
    }
}

/// Overall compliance: mean attainment of each metric against its target,
/// capped at 100% per metric, one decimal. `0.0` for no metrics.
pub fn compliance(metrics: &[SlaMetric]) -> f64 {
    let attainments: Vec<f64> = metrics
        .iter()
        .filter(|m| m.target > 0.0)
        .map(|m| (m.actual / m.target).min(1.0) * 100.0)
        .collect();
    if attainments.is_empty() {
        return 0.0;
    }
    round1(attainments.iter().sum::<f64>() / attainments.len() as f64)
}
