//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "01-bootstrap"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Synthesis module exports and shared types."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
//! Deterministic telemetry synthesis for the ExoGrid monitoring dashboard.
//!
//! Every synthesiser takes the generator explicitly, so a caller that starts from
//! the same seed and requests the same views in the same order always gets the
//! same numbers back.

pub mod errors;
pub mod events;
pub mod export;
pub mod kpi;
pub mod metrics;
pub mod range;
pub mod rng;
pub mod roster;
pub mod service;

pub use errors::{Result, SimError};
pub use events::{synthesize_events, EventCode, EventRecord, Severity};
pub use export::{export_csv, CsvExporter, CSV_HEADER};
pub use kpi::{aggregate, HealthStatus, KpiSummary};
pub use metrics::{synthesize, DailyMetrics, SourceBreakdown, WeeklyUptime};
pub use range::{DateRange, RangeQuery};
pub use rng::SeedSequence;
pub use roster::{SuitProfile, SuitRoster};
pub use service::MonitoringService;
