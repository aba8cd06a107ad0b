//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "01-bootstrap"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Scenario generator dumping synthesised dashboard views."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use exogrid_common::{init_tracing, AppConfig};
use exogrid_sim::range::parse_date;
use exogrid_sim::{MonitoringService, RangeQuery};
use serde::Serialize;
use tracing::info;

const CONFIG_CANDIDATES: [&str; 2] = ["exogrid.toml", "configs/exogrid.toml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Suits,
    Metrics,
    Kpis,
    Events,
    /// The dashboard's metrics export document
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Dump synthesised ExoGrid monitoring data",
    long_about = None
)]
struct Cli {
    /// View to generate
    #[arg(long, value_enum, default_value_t = View::Metrics)]
    view: View,

    /// Suit identifier; unknown ids keep their own baseline but borrow the first suit's metadata
    #[arg(long, default_value = "XS-001")]
    suit: String,

    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Last day of the window (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<String>,

    /// Date treated as "today" when resolving open-ended windows
    #[arg(long)]
    today: Option<String>,

    /// Output file path. Use '-' for stdout.
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// Explicit output format when extension is ambiguous
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Generator start value, overriding the configuration
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Configuration file (defaults to exogrid.toml or configs/exogrid.toml when present)
    #[arg(long, env = "EXOGRID_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing("exogrid-simgen", &config.logging)?;

    let format = determine_format(cli.view, &cli.output, cli.format);
    let mut service = build_service(&cli, &config)?;
    let document = render(&cli, format, &mut service)?;
    write_output(&cli.output, &document)?;

    info!(
        view = ?cli.view,
        suit = %cli.suit,
        draws = service.generator().draws(),
        bytes = document.len(),
        "document generated"
    );
    if cli.output.as_os_str() != "-" {
        eprintln!("generated {:?} view -> {}", cli.view, cli.output.display());
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    match &cli.config {
        Some(path) => AppConfig::load(&[path]),
        None => Ok(AppConfig::load_or_default(&CONFIG_CANDIDATES)?.config),
    }
}

fn build_service(cli: &Cli, config: &AppConfig) -> Result<MonitoringService> {
    let mut config = config.clone();
    if let Some(seed) = cli.seed {
        config.simulation.seed = seed;
    }
    let mut service = MonitoringService::from_config(&config);
    if let Some(raw) = &cli.today {
        let today = parse_date(raw).context("--today must be YYYY-MM-DD")?;
        service = service.with_today(today);
    }
    Ok(service)
}

fn determine_format(
    view: View,
    path: &Path,
    override_format: Option<OutputFormat>,
) -> OutputFormat {
    if view == View::Csv {
        return OutputFormat::Csv;
    }
    if let Some(format) = override_format {
        return format;
    }
    if path.as_os_str() == "-" {
        return OutputFormat::Json;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => OutputFormat::Csv,
        _ => OutputFormat::Json,
    }
}

fn render(cli: &Cli, format: OutputFormat, service: &mut MonitoringService) -> Result<Vec<u8>> {
    let query = RangeQuery {
        from: cli.from.clone(),
        to: cli.to.clone(),
    };
    let suit = cli.suit.as_str();
    match (cli.view, format) {
        (View::Csv, _) | (View::Metrics, OutputFormat::Csv) => {
            Ok(service.export_metrics_csv(suit, &query)?.into_bytes())
        }
        (View::Metrics, OutputFormat::Json) => to_json(&service.metrics(suit, &query)?),
        (View::Kpis, OutputFormat::Json) => to_json(&service.kpis(suit, &query)?),
        (View::Kpis, OutputFormat::Csv) => to_csv_rows([service.kpis(suit, &query)?]),
        (View::Events, OutputFormat::Json) => to_json(&service.events(suit, &query)?),
        (View::Events, OutputFormat::Csv) => to_csv_rows(service.events(suit, &query)?),
        (View::Suits, OutputFormat::Json) => to_json(&service.list_suits()),
        (View::Suits, OutputFormat::Csv) => to_csv_rows(service.list_suits()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = serde_json::to_vec_pretty(value)?;
    buffer.push(b'\n');
    Ok(buffer)
}

fn to_csv_rows<I>(rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator,
    I::Item: Serialize,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv rows: {}", err.error()))
}

fn write_output(path: &Path, document: &[u8]) -> Result<()> {
    if path.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(document)?;
        stdout.flush()?;
    } else {
        let mut file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        file.write_all(document)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exogrid_sim::{EventRecord, KpiSummary};
    use tempfile::NamedTempFile;

    fn base_cli() -> Cli {
        Cli {
            view: View::Metrics,
            suit: "XS-001".into(),
            from: Some("2025-10-01".into()),
            to: Some("2025-10-07".into()),
            today: None,
            output: PathBuf::from("-"),
            format: None,
            seed: None,
            config: None,
        }
    }

    fn run(cli: &Cli) -> String {
        let config = AppConfig::default();
        let format = determine_format(cli.view, &cli.output, cli.format);
        let mut service = build_service(cli, &config).unwrap();
        String::from_utf8(render(cli, format, &mut service).unwrap()).unwrap()
    }

    #[test]
    fn determine_format_defaults_json_for_stdout() {
        assert_eq!(
            determine_format(View::Metrics, Path::new("-"), None),
            OutputFormat::Json
        );
    }

    #[test]
    fn determine_format_follows_extension_and_override() {
        assert_eq!(
            determine_format(View::Events, Path::new("events.csv"), None),
            OutputFormat::Csv
        );
        assert_eq!(
            determine_format(View::Events, Path::new("events.csv"), Some(OutputFormat::Json)),
            OutputFormat::Json
        );
        assert_eq!(
            determine_format(View::Csv, Path::new("-"), Some(OutputFormat::Json)),
            OutputFormat::Csv
        );
    }

    #[test]
    fn csv_view_emits_metrics_report() {
        let mut cli = base_cli();
        cli.view = View::Csv;
        let out = run(&cli);
        assert!(out.starts_with("# suit,EXO-XS-001\n"));
        assert_eq!(out.lines().count(), 3 + 1 + 7);
    }

    #[test]
    fn kpis_view_emits_json() {
        let mut cli = base_cli();
        cli.view = View::Kpis;
        let kpi: KpiSummary = serde_json::from_str(&run(&cli)).unwrap();
        assert!((12..=100).contains(&kpi.soc));
    }

    #[test]
    fn events_view_as_csv_has_header() {
        let mut cli = base_cli();
        cli.view = View::Events;
        cli.format = Some(OutputFormat::Csv);
        let out = run(&cli);
        assert!(out.starts_with("time,severity,code,message\n"));
    }

    #[test]
    fn seed_override_changes_output() {
        let mut cli = base_cli();
        cli.view = View::Events;
        let default_seed: Vec<EventRecord> = serde_json::from_str(&run(&cli)).unwrap();
        cli.seed = Some(7);
        let other_seed: Vec<EventRecord> = serde_json::from_str(&run(&cli)).unwrap();
        assert_ne!(default_seed, other_seed);
    }

    #[test]
    fn rejects_malformed_today() {
        let mut cli = base_cli();
        cli.today = Some("yesterday".into());
        assert!(build_service(&cli, &AppConfig::default()).is_err());
    }

    #[test]
    fn writes_document_to_file() {
        let file = NamedTempFile::new().unwrap();
        let path = file.into_temp_path();
        write_output(&path, b"date\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "date\n");
        path.close().unwrap();
    }
}
