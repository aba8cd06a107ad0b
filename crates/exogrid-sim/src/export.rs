//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "CSV report export for daily metrics."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use std::io::Write;

use csv::{Terminator, WriterBuilder};
use tracing::debug;

use crate::errors::Result;
use crate::metrics::DailyMetrics;
use crate::roster::SuitProfile;

pub const CSV_HEADER: [&str; 8] = [
    "date",
    "soc_%",
    "harvest_kWh",
    "consumption_kWh",
    "kinetic_kWh",
    "thermal_kWh",
    "piezo_kWh",
    "regen_kWh",
];

#[derive(Debug)]
pub struct CsvExporter<'a> {
    suit: &'a SuitProfile,
    metrics: &'a DailyMetrics,
}

impl<'a> CsvExporter<'a> {
    pub fn new(suit: &'a SuitProfile, metrics: &'a DailyMetrics) -> Self {
        Self { suit, metrics }
    }

    /// Write the report: three `#` metadata lines, the header, one row per day.
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        self.metrics.ensure_aligned()?;

        writeln!(out, "# suit,{}", self.suit.asset_tag)?;
        writeln!(out, "# operator,{}", self.suit.operator)?;
        writeln!(out, "# site,{}", self.suit.site)?;

        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(out);
        writer.write_record(CSV_HEADER)?;

        let m = self.metrics;
        for (i, label) in m.labels.iter().enumerate() {
            writer.write_record([
                label.clone(),
                m.soc_series[i].to_string(),
                m.harvest[i].to_string(),
                m.consumption[i].to_string(),
                m.sources.kinetic[i].to_string(),
                m.sources.thermal[i].to_string(),
                m.sources.piezo[i].to_string(),
                m.sources.regen[i].to_string(),
            ])?;
        }
        writer.flush()?;
        debug!(suit = %self.suit.id, rows = m.len(), "metrics csv written");
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Render `metrics` for `suit` as a CSV document.
pub fn export_csv(suit: &SuitProfile, metrics: &DailyMetrics) -> Result<String> {
    CsvExporter::new(suit, metrics).to_csv_string()
}
