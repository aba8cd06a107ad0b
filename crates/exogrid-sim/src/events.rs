//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Incident log synthesis."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use chrono::NaiveDateTime;
use exogrid_logging::{exo_debug, LogContext};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

use crate::range::{iso_date, DateRange};
use crate::rng::SeedSequence;

const EVENTS_PER_DAY: (i64, i64) = (0, 2);
const SHIFT_HOURS: (i64, i64) = (7, 18);

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
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// Incident codes in the order the synthesiser indexes them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCode {
    TempHigh,
    Impact,
    DockingFail,
    SensorFault,
    LowSoc,
    MaintDue,
}

impl EventCode {
    pub fn severity(self) -> Severity {
        match self {
            EventCode::TempHigh | EventCode::DockingFail | EventCode::LowSoc => Severity::Warning,
            EventCode::Impact | EventCode::SensorFault => Severity::Critical,
            EventCode::MaintDue => Severity::Info,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            EventCode::TempHigh => "Thermal sensor peak above nominal.",
            EventCode::Impact => "High-G shock detected on right hip joint.",
            EventCode::DockingFail => "Dock handshake timed out.",
            EventCode::SensorFault => "IMU calibration drift detected.",
            EventCode::LowSoc => "Battery SoC below 15%.",
            EventCode::MaintDue => "Preventive maintenance due in 7 days.",
        }
    }
}

/// One synthesised incident, timestamped to the minute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(with = "minute_timestamp")]
    pub time: NaiveDateTime,
    pub severity: Severity,
    pub code: EventCode,
    pub message: String,
}

impl EventRecord {
    pub fn new(time: NaiveDateTime, code: EventCode) -> Self {
        Self {
            time,
            severity: code.severity(),
            code,
            message: code.message().to_owned(),
        }
    }

    /// Timestamp as shown in the dashboard, `YYYY-MM-DD HH:MM`.
    pub fn rendered_time(&self) -> String {
        self.time.format(minute_timestamp::FORMAT).to_string()
    }
}

/// Synthesise the incident log for `range`, newest first.
pub fn synthesize_events(rng: &mut SeedSequence, range: &DateRange) -> Vec<EventRecord> {
    let codes = EventCode::VARIANTS;
    let mut events = Vec::new();
    for day in range.days() {
        let count = rng.uniform_int(EVENTS_PER_DAY.0, EVENTS_PER_DAY.1);
        for _ in 0..count {
            let code = codes[rng.uniform_int(0, codes.len() as i64 - 1) as usize];
            let hour = rng.uniform_int(SHIFT_HOURS.0, SHIFT_HOURS.1) as u32;
            let minute = rng.uniform_int(0, 59) as u32;
            let Some(time) = day.and_hms_opt(hour, minute, 0) else {
                continue;
            };
            events.push(EventRecord::new(time, code));
        }
    }
    // stable, so same-minute events keep generation order
    events.sort_by(|a, b| b.time.cmp(&a.time));

    let from = iso_date(range.from());
    let to = iso_date(range.to());
    exo_debug!(
        context = LogContext::new()
            .with_window(&from, &to)
            .with_draws(rng.draws()),
        "synthesised {} events",
        events.len()
    );
    events
}

mod minute_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(
        time: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
