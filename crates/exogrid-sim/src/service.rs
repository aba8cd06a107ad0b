//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Monitoring facade consumed by the dashboard."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use chrono::{NaiveDate, Utc};
use exogrid_common::config::AppConfig;
use exogrid_logging::{log_request, LogContext, RequestOutcome};

use crate::errors::Result;
use crate::events::{synthesize_events, EventRecord};
use crate::export::export_csv;
use crate::kpi::{aggregate, KpiSummary};
use crate::metrics::{synthesize, DailyMetrics};
use crate::range::{iso_date, DateRange, RangeQuery};
use crate::rng::SeedSequence;
use crate::roster::{SuitProfile, SuitRoster};

/// Mock telemetry backend: one roster, one generator, one clock.
///
/// Every view draws from the same [`SeedSequence`], so the order in which views are
/// requested changes what each of them returns. Callers that need isolated streams
/// should hold one service per stream.
#[derive(Debug, Clone)]
pub struct MonitoringService {
    roster: SuitRoster,
    rng: SeedSequence,
    window_days: u32,
    today: Option<NaiveDate>,
}

impl Default for MonitoringService {
    fn default() -> Self {
        Self::new(SuitRoster::default(), SeedSequence::default())
    }
}

impl MonitoringService {
    pub fn new(roster: SuitRoster, rng: SeedSequence) -> Self {
        Self {
            roster,
            rng,
            window_days: 7,
            today: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            SuitRoster::from_config(&config.suits),
            SeedSequence::new(config.simulation.seed),
        )
        .with_window_days(config.simulation.default_window_days)
    }

    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days.max(1);
        self
    }

    /// Pin the date used to resolve open-ended ranges.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn generator(&self) -> &SeedSequence {
        &self.rng
    }

    pub fn list_suits(&self) -> &[SuitProfile] {
        self.roster.suits()
    }

    pub fn find_suit(&self, id: &str) -> &SuitProfile {
        self.roster.find(id)
    }

    pub fn metrics(&mut self, suit_id: &str, query: &RangeQuery) -> Result<DailyMetrics> {
        let range = self.resolve("metrics", suit_id, query)?;
        let suit_id = self.effective_suit_id(suit_id);
        let metrics = synthesize(&mut self.rng, &suit_id, &range);
        self.served("metrics", &suit_id, &range);
        Ok(metrics)
    }

    pub fn kpis(&mut self, suit_id: &str, query: &RangeQuery) -> Result<KpiSummary> {
        let metrics = self.metrics(suit_id, query)?;
        Ok(aggregate(&metrics))
    }

    /// Incident log for the window. The suit id only labels the request.
    pub fn events(&mut self, suit_id: &str, query: &RangeQuery) -> Result<Vec<EventRecord>> {
        let range = self.resolve("events", suit_id, query)?;
        let events = synthesize_events(&mut self.rng, &range);
        self.served("events", suit_id, &range);
        Ok(events)
    }

    pub fn export_metrics_csv(&mut self, suit_id: &str, query: &RangeQuery) -> Result<String> {
        let metrics = self.metrics(suit_id, query)?;
        let suit = self.roster.find(suit_id);
        export_csv(suit, &metrics)
    }

    /// Empty ids stand for the first suit of the roster; unknown ids pass through.
    fn effective_suit_id(&self, suit_id: &str) -> String {
        if suit_id.is_empty() {
            self.roster.fallback().id.clone()
        } else {
            suit_id.to_owned()
        }
    }

    fn resolve(&self, view: &str, suit_id: &str, query: &RangeQuery) -> Result<DateRange> {
        DateRange::resolve(query, self.today(), self.window_days).inspect_err(|err| {
            log_request(
                Some(&LogContext::new().with_suit(suit_id).with_draws(self.rng.draws())),
                view,
                RequestOutcome::Rejected,
            );
            tracing::debug!(view, error = %err, "rejected monitoring request");
        })
    }

    fn served(&self, view: &str, suit_id: &str, range: &DateRange) {
        let from = iso_date(range.from());
        let to = iso_date(range.to());
        let ctx = LogContext::new()
            .with_suit(suit_id)
            .with_window(&from, &to)
            .with_draws(self.rng.draws());
        log_request(Some(&ctx), view, RequestOutcome::Served);
    }
}
