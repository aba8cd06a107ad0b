//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "KPI snapshot and health classification."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::metrics::DailyMetrics;

/// Charge reported when a series carries no days.
pub const FALLBACK_SOC: u32 = 60;
const LOW_MEAN_SOC: f64 = 35.0;
const LOW_HARVEST: f64 = 1.0;
const CRITICAL_SOC: u32 = 15;

/// Coarse suit status, ordered by severity.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Warning,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub soc: u32,
    #[serde(rename = "harvestKWh")]
    pub harvest_kwh: f64,
    pub devices_charged: u32,
    pub uptime_pct: u32,
    pub health: HealthStatus,
}

/// Reduce a metrics series to its headline figures.
pub fn aggregate(metrics: &DailyMetrics) -> KpiSummary {
    let soc = metrics.soc_series.last().copied().unwrap_or(FALLBACK_SOC);
    let harvest_kwh: f64 = metrics.harvest.iter().sum();
    let devices_charged: u32 = metrics.device_breakdown.values().sum();
    let uptime_pct = mean(metrics.weekly.uptime_pct.iter().map(|v| f64::from(*v)))
        .map(|m| (m + 0.5).floor() as u32)
        .unwrap_or(0);

    KpiSummary {
        soc,
        harvest_kwh,
        devices_charged,
        uptime_pct,
        health: classify(metrics),
    }
}

/// Later rules override earlier ones, so a critically low day always wins.
pub fn classify(metrics: &DailyMetrics) -> HealthStatus {
    let mut health = HealthStatus::Ok;
    let mean_soc = mean(metrics.soc_series.iter().map(|v| f64::from(*v)));
    if mean_soc.is_some_and(|m| m < LOW_MEAN_SOC)
        || metrics.harvest.iter().any(|h| *h < LOW_HARVEST)
    {
        health = HealthStatus::Warning;
    }
    if metrics.soc_series.iter().any(|s| *s < CRITICAL_SOC) {
        health = HealthStatus::Maintenance;
    }
    health
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn metrics(soc: &[u32], harvest: &[f64], uptime: &[u32]) -> DailyMetrics {
        let mut devices = IndexMap::new();
        devices.insert("Tablet".to_owned(), 12);
        devices.insert("Env Sensor".to_owned(), 20);
        let mut m = DailyMetrics {
            soc_series: soc.to_vec(),
            harvest: harvest.to_vec(),
            device_breakdown: devices,
            ..DailyMetrics::default()
        };
        m.weekly.uptime_pct = uptime.to_vec();
        m
    }

    #[test]
    fn aggregates_headline_figures() {
        let kpi = aggregate(&metrics(&[70, 72, 68], &[2.0, 2.5, 1.75], &[91, 88]));
        assert_eq!(kpi.soc, 68);
        assert!((kpi.harvest_kwh - 6.25).abs() < 1e-9);
        assert_eq!(kpi.devices_charged, 32);
        // 89.5 rounds up
        assert_eq!(kpi.uptime_pct, 90);
        assert_eq!(kpi.health, HealthStatus::Ok);
    }

    #[test]
    fn empty_series_uses_fallbacks() {
        let kpi = aggregate(&DailyMetrics::default());
        assert_eq!(kpi.soc, FALLBACK_SOC);
        assert_eq!(kpi.harvest_kwh, 0.0);
        assert_eq!(kpi.uptime_pct, 0);
        assert_eq!(kpi.health, HealthStatus::Ok);
    }

    #[test]
    fn low_mean_charge_warns() {
        let m = metrics(&[30, 34, 36], &[2.0, 2.0, 2.0], &[90]);
        assert_eq!(classify(&m), HealthStatus::Warning);
    }

    #[test]
    fn weak_harvest_day_warns() {
        let m = metrics(&[80, 80], &[2.0, 0.95], &[90]);
        assert_eq!(classify(&m), HealthStatus::Warning);
    }

    #[test]
    fn critical_day_overrides_warning() {
        let m = metrics(&[14, 20, 22], &[0.9, 0.9, 0.9], &[90]);
        assert_eq!(classify(&m), HealthStatus::Maintenance);
        let m = metrics(&[90, 14, 95], &[3.0, 3.0, 3.0], &[90]);
        assert_eq!(classify(&m), HealthStatus::Maintenance);
    }

    #[test]
    fn health_renders_uppercase() {
        assert_eq!(HealthStatus::Maintenance.to_string(), "MAINTENANCE");
        assert_eq!("WARNING".parse::<HealthStatus>().unwrap(), HealthStatus::Warning);
        assert!(HealthStatus::Maintenance > HealthStatus::Warning);
        let json = serde_json::to_string(&HealthStatus::Ok).unwrap();
        assert_eq!(json, "\"OK\"");
    }
}
