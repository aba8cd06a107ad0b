//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Daily energy, charge and uptime series synthesis."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use exogrid_logging::{exo_debug, LogContext};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SimError};
use crate::range::{iso_date, DateRange};
use crate::rng::{clamp, round2, SeedSequence};

pub const HARVEST_BAND: (f64, f64) = (0.9, 3.4);
pub const CONSUMPTION_BAND: (f64, f64) = (0.8, 3.2);
pub const SOC_BAND: (i64, i64) = (12, 100);
pub const UPTIME_BAND: (i64, i64) = (70, 99);

const INITIAL_SOC: (i64, i64) = (55, 85);
const SOC_STEP_JITTER: (i64, i64) = (-2, 2);
const SOC_PER_NET_UNIT: f64 = 7.0;
const DAYS_PER_WEEK: usize = 7;

/// Device categories charged from the suit and the range of daily counts for each.
pub const DEVICE_CATEGORIES: [(&str, i64, i64); 5] = [
    ("AR Glasses", 6, 20),
    ("Hand Scanner", 25, 70),
    ("Tablet", 10, 30),
    ("Torque Tool", 4, 14),
    ("Env Sensor", 12, 32),
];

/// Per-source split of each day's harvest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceBreakdown {
    pub kinetic: Vec<f64>,
    pub thermal: Vec<f64>,
    pub piezo: Vec<f64>,
    pub regen: Vec<f64>,
}

/// Uptime percentage per 7-day bucket of the window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyUptime {
    pub labels: Vec<String>,
    pub uptime_pct: Vec<u32>,
}

/// Parallel daily series for one suit over one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    pub labels: Vec<String>,
    pub soc_series: Vec<u32>,
    pub harvest: Vec<f64>,
    pub consumption: Vec<f64>,
    pub sources: SourceBreakdown,
    pub device_breakdown: IndexMap<String, u32>,
    pub weekly: WeeklyUptime,
}

impl DailyMetrics {
    /// Number of days covered, taken from the label series.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Check that every daily series has one entry per label.
    pub fn ensure_aligned(&self) -> Result<()> {
        let expected = self.labels.len();
        let series = [
            ("socSeries", self.soc_series.len()),
            ("harvest", self.harvest.len()),
            ("consumption", self.consumption.len()),
            ("sources.kinetic", self.sources.kinetic.len()),
            ("sources.thermal", self.sources.thermal.len()),
            ("sources.piezo", self.sources.piezo.len()),
            ("sources.regen", self.sources.regen.len()),
        ];
        match series.into_iter().find(|(_, actual)| *actual != expected) {
            Some((field, actual)) => Err(SimError::SeriesLengthMismatch {
                field,
                expected,
                actual,
            }),
            None => Ok(()),
        }
    }
}

/// Activity offset for a suit, keyed on the last digit of its id.
fn suit_baseline(suit_id: &str) -> f64 {
    let digit = suit_id
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .filter(|d| *d != 0)
        .unwrap_or(1);
    0.25 + f64::from(digit) * 0.08
}

/// `Math.round` semantics: halves round towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Synthesise the daily series for `suit_id` over `range`.
///
/// Draws are consumed in a fixed order (initial charge, then per day: activity
/// jitter, harvest, consumption, three source jitters, charge jitter; then the
/// device counts and one uptime per week), so the output is a pure function of
/// the generator position and the arguments.
pub fn synthesize(rng: &mut SeedSequence, suit_id: &str, range: &DateRange) -> DailyMetrics {
    let days = range.len();
    let base = suit_baseline(suit_id);
    let mut soc = rng.uniform_int(INITIAL_SOC.0, INITIAL_SOC.1);

    let mut metrics = DailyMetrics {
        labels: Vec::with_capacity(days),
        soc_series: Vec::with_capacity(days),
        harvest: Vec::with_capacity(days),
        consumption: Vec::with_capacity(days),
        ..DailyMetrics::default()
    };

    for (i, day) in range.days().enumerate() {
        metrics.labels.push(iso_date(day));

        let activity = 0.9 + 0.35 * (i as f64 / 3.0).sin() + base + (rng.draw() - 0.5) * 0.15;
        let harvest = clamp(
            1.9 * activity + rng.uniform(0.0, 0.5),
            HARVEST_BAND.0,
            HARVEST_BAND.1,
        );
        let consumption = clamp(
            1.5 * activity + rng.uniform(0.0, 0.7),
            CONSUMPTION_BAND.0,
            CONSUMPTION_BAND.1,
        );
        metrics.harvest.push(round2(harvest));
        metrics.consumption.push(round2(consumption));

        let kinetic = harvest * (0.46 + (rng.draw() - 0.5) * 0.05);
        let thermal = harvest * (0.24 + (rng.draw() - 0.5) * 0.04);
        let piezo = harvest * (0.18 + (rng.draw() - 0.5) * 0.03);
        // regenerative takes whatever the other three leave
        let regen = (harvest - (kinetic + thermal + piezo)).max(0.0);
        metrics.sources.kinetic.push(round2(kinetic));
        metrics.sources.thermal.push(round2(thermal));
        metrics.sources.piezo.push(round2(piezo));
        metrics.sources.regen.push(round2(regen));

        let step = round_half_up((harvest - consumption) * SOC_PER_NET_UNIT)
            + rng.uniform_int(SOC_STEP_JITTER.0, SOC_STEP_JITTER.1);
        soc = (soc + step).clamp(SOC_BAND.0, SOC_BAND.1);
        metrics.soc_series.push(soc as u32);
    }

    metrics.device_breakdown = DEVICE_CATEGORIES
        .iter()
        .map(|(name, lo, hi)| ((*name).to_owned(), rng.uniform_int(*lo, *hi) as u32))
        .collect();

    let weeks = days.div_ceil(DAYS_PER_WEEK);
    for week in 0..weeks {
        let uptime = (90 + rng.uniform_int(-6, 5)).clamp(UPTIME_BAND.0, UPTIME_BAND.1);
        metrics.weekly.labels.push(format!("W{}", week + 1));
        metrics.weekly.uptime_pct.push(uptime as u32);
    }

    let from = iso_date(range.from());
    let to = iso_date(range.to());
    exo_debug!(
        context = LogContext::new()
            .with_suit(suit_id)
            .with_window(&from, &to)
            .with_draws(rng.draws()),
        "daily metrics synthesised for {} days, {} weeks",
        days,
        weeks
    );
    metrics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn october(days: u32) -> DateRange {
        DateRange::parse("2025-10-01", &format!("2025-10-{days:02}")).unwrap()
    }

    #[test]
    fn baseline_uses_last_digit() {
        assert!((suit_baseline("XS-003") - 0.49).abs() < 1e-12);
        assert!((suit_baseline("XS-009") - 0.97).abs() < 1e-12);
        // zero, letters and empty ids all behave like digit 1
        assert!((suit_baseline("XS-010") - 0.33).abs() < 1e-12);
        assert!((suit_baseline("XS-A") - 0.33).abs() < 1e-12);
        assert!((suit_baseline("") - 0.33).abs() < 1e-12);
    }

    #[test]
    fn round_half_up_matches_dashboard_rounding() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.49), 0);
    }

    #[test]
    fn three_day_window_has_matching_lengths() {
        let mut rng = SeedSequence::default();
        let m = synthesize(&mut rng, "XS-002", &october(3));
        assert_eq!(m.len(), 3);
        assert_eq!(m.labels.first().map(String::as_str), Some("2025-10-01"));
        assert_eq!(m.labels.last().map(String::as_str), Some("2025-10-03"));
        m.ensure_aligned().unwrap();
        assert_eq!(m.weekly.labels, ["W1"]);
    }

    #[test]
    fn draw_count_is_fixed_per_day_and_week() {
        let mut rng = SeedSequence::default();
        synthesize(&mut rng, "XS-001", &october(15));
        // 1 initial + 7 per day + 5 devices + 1 per week
        assert_eq!(rng.draws(), 1 + 7 * 15 + 5 + 3);
    }

    #[test]
    fn values_stay_in_band() {
        let mut rng = SeedSequence::new(99);
        let m = synthesize(&mut rng, "XS-004", &october(31));
        for i in 0..m.len() {
            assert!((HARVEST_BAND.0..=HARVEST_BAND.1).contains(&m.harvest[i]));
            assert!((CONSUMPTION_BAND.0..=CONSUMPTION_BAND.1).contains(&m.consumption[i]));
            assert!((12..=100).contains(&m.soc_series[i]));
            assert!(m.sources.regen[i] >= 0.0);
            let total = m.sources.kinetic[i]
                + m.sources.thermal[i]
                + m.sources.piezo[i]
                + m.sources.regen[i];
            assert!((total - m.harvest[i]).abs() <= 0.03, "day {i}: {total}");
        }
        assert_eq!(m.weekly.uptime_pct.len(), 5);
        assert!(m.weekly.uptime_pct.iter().all(|u| (70..=99).contains(u)));
    }

    #[test]
    fn device_breakdown_keeps_category_order_and_ranges() {
        let mut rng = SeedSequence::default();
        let m = synthesize(&mut rng, "XS-001", &october(7));
        let names: Vec<&str> = m.device_breakdown.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            ["AR Glasses", "Hand Scanner", "Tablet", "Torque Tool", "Env Sensor"]
        );
        for (name, lo, hi) in DEVICE_CATEGORIES {
            let count = i64::from(m.device_breakdown[name]);
            assert!((lo..=hi).contains(&count), "{name}: {count}");
        }
    }

    #[test]
    fn misaligned_series_are_reported() {
        let mut rng = SeedSequence::default();
        let mut m = synthesize(&mut rng, "XS-001", &october(2));
        m.sources.piezo.pop();
        match m.ensure_aligned() {
            Err(SimError::SeriesLengthMismatch {
                field,
                expected,
                actual,
            }) => {
                assert_eq!(field, "sources.piezo");
                assert_eq!((expected, actual), (2, 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn serialises_with_dashboard_field_names() {
        let mut rng = SeedSequence::default();
        let m = synthesize(&mut rng, "XS-001", &october(1));
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("socSeries").is_some());
        assert!(json.get("deviceBreakdown").is_some());
        assert!(json["weekly"].get("uptimePct").is_some());
        assert!(json["sources"].get("regen").is_some());
    }
}
