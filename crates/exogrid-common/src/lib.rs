//! ---
//! exo_section: "01-core-functionality"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Shared primitives and utilities for the telemetry runtime."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
//! Shared primitives for the ExoGrid monitoring workspace.
//! This crate exposes configuration loading and tracing initialisation
//! consumed by the synthesis core and the scenario generator.

pub mod config;
pub mod logging;

pub use config::{AppConfig, LoadedAppConfig, LoggingConfig, SimulationConfig, SuitConfig};
pub use logging::{init_tracing, LogFormat};
