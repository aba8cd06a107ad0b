//! ---
//! exo_section: "03-logging"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Structured logging adapters for the synthesis pipeline."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Context-enriched `tracing` helpers shared by the ExoGrid crates.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for development and tests.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_test_writer())
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Suit identifier the request concerns.
    pub suit: Option<&'a str>,
    /// First day of the requested window, ISO formatted.
    pub from: Option<&'a str>,
    /// Last day of the requested window, ISO formatted.
    pub to: Option<&'a str>,
    /// Generator draws consumed so far.
    pub draws: Option<u64>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a suit identifier.
    pub fn with_suit(mut self, suit: &'a str) -> Self {
        self.suit = Some(suit);
        self
    }

    /// Attach the requested window bounds.
    pub fn with_window(mut self, from: &'a str, to: &'a str) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Attach the generator position.
    pub fn with_draws(mut self, draws: u64) -> Self {
        self.draws = Some(draws);
        self
    }
}

/// Outcome attached to request-level log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The view was produced.
    Served,
    /// The request was rejected, e.g. because of a malformed date.
    Rejected,
}

impl RequestOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Served => "served",
            RequestOutcome::Rejected => "rejected",
        }
    }
}

/// Emit a standardized request event for one of the monitoring views.
pub fn log_request(context: Option<&LogContext>, view: &str, outcome: RequestOutcome) {
    let ctx = context.cloned().unwrap_or_default();
    match outcome {
        RequestOutcome::Rejected => tracing::event!(
            Level::WARN,
            view = %view,
            outcome = outcome.as_str(),
            suit = ctx.suit.unwrap_or(""),
            from = ctx.from.unwrap_or(""),
            to = ctx.to.unwrap_or(""),
            draws = ctx.draws.unwrap_or_default(),
            "monitoring request"
        ),
        RequestOutcome::Served => tracing::event!(
            Level::INFO,
            view = %view,
            outcome = outcome.as_str(),
            suit = ctx.suit.unwrap_or(""),
            from = ctx.from.unwrap_or(""),
            to = ctx.to.unwrap_or(""),
            draws = ctx.draws.unwrap_or_default(),
            "monitoring request"
        ),
    }
}
