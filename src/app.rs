use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::ranking::chart_series;
use crate::application::{
    filter_by_name, interpret, normalize_countries, top_by_field, StatisticsEngine,
};
use crate::domain::app_config::AppConfig;
use crate::domain::country::{NumericField, StructuredCountryRecord};
use crate::domain::error::{AppError, Result};
use crate::domain::statistics::StatisticsSummary;
use crate::infrastructure::chart::ChartRenderer;
use crate::infrastructure::config::ConfigService;
use crate::infrastructure::rest_countries::{CountrySource, RestCountriesClient};
use crate::infrastructure::storage::{ensure_parent_dir, load_json, save_json};
use crate::infrastructure::table::{preview, TableExporter};
use crate::interfaces::cli::{Cli, Commands, SourceArgs};

pub async fn run(cli: Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = ConfigService::new(cli.config).load()?;

    match cli.command {
        Some(Commands::Fetch {
            filter,
            json,
            table,
        }) => {
            let source = RestCountriesClient::from_config(&config)?;
            let json_path = json.unwrap_or_else(|| config.json_path());
            let table_path = table.unwrap_or_else(|| config.table_path());
            fetch_command(&config, &source, filter.as_deref(), &json_path, &table_path).await
        }
        Some(Commands::Analyze {
            source,
            field,
            report,
        }) => {
            let records = obtain_records(&config, &source).await?;
            let field = field.unwrap_or_else(|| config.default_field.key().to_string());
            analyze_command(&config, &records, &field, report.as_deref())
        }
        Some(Commands::Chart {
            source,
            field,
            top,
            kind,
            title,
        }) => {
            let records = obtain_records(&config, &source).await?;
            let field = match field {
                Some(name) => name.parse::<NumericField>()?,
                None => config.default_field,
            };
            let path = chart_command(&config, &records, field, top, &kind, title.as_deref())?;
            println!("Chart saved as {}", path.display());
            Ok(())
        }
        None => {
            println!("Use 'country-stats --help' for commands");
            Ok(())
        }
    }
}

/// Fetch and normalize, reporting every skipped record
pub async fn fetch_records(source: &dyn CountrySource) -> Result<Vec<StructuredCountryRecord>> {
    let raw = source.fetch_all_countries().await?;
    let batch = normalize_countries(&raw);

    for err in &batch.errors {
        eprintln!("{}", err);
    }
    if batch.skipped() > 0 {
        tracing::warn!(skipped = batch.skipped(), "Some countries could not be processed");
        eprintln!("Skipped {} of {} countries", batch.skipped(), raw.len());
    }

    Ok(batch.records)
}

/// Apply an optional name filter. A bad pattern is reported and selects nothing.
pub fn apply_filter(
    records: Vec<StructuredCountryRecord>,
    pattern: Option<&str>,
) -> Vec<StructuredCountryRecord> {
    let Some(pattern) = pattern else {
        return records;
    };

    match filter_by_name(&records, pattern) {
        Ok(matched) => {
            tracing::info!(pattern, matched = matched.len(), "Filtered countries");
            matched
        }
        Err(err) => {
            tracing::error!(error = %err, "Filter failed");
            eprintln!("{}", err);
            Vec::new()
        }
    }
}

async fn obtain_records(
    config: &AppConfig,
    source: &SourceArgs,
) -> Result<Vec<StructuredCountryRecord>> {
    let records = match &source.input {
        Some(path) => load_json(path)?,
        None => fetch_records(&RestCountriesClient::from_config(config)?).await?,
    };
    Ok(apply_filter(records, source.filter.as_deref()))
}

async fn fetch_command(
    config: &AppConfig,
    source: &dyn CountrySource,
    filter: Option<&str>,
    json_path: &Path,
    table_path: &Path,
) -> Result<()> {
    let records = apply_filter(fetch_records(source).await?, filter);
    println!("Countries: {}", records.len());
    println!("{}", preview(&records, config.preview_rows));

    let saved = save_json(&records, json_path)
        .map(|_| println!("Data saved to {}", json_path.display()));
    let exported = TableExporter::new()
        .export(&records, table_path)
        .map(|_| println!("Data exported to {}", table_path.display()));

    match (saved, exported) {
        (Err(save_err), Err(export_err)) => {
            eprintln!("{}", export_err);
            Err(save_err)
        }
        (Err(err), Ok(())) | (Ok(()), Err(err)) => {
            eprintln!("{}", err);
            Ok(())
        }
        (Ok(()), Ok(())) => Ok(()),
    }
}

fn analyze_command(
    config: &AppConfig,
    records: &[StructuredCountryRecord],
    field: &str,
    report: Option<&Path>,
) -> Result<()> {
    let engine = StatisticsEngine::new(config.mode_tie_break);
    let summary = match engine.analyze(records, field) {
        Ok(summary) => Some(summary),
        Err(err) => {
            tracing::warn!(error = %err, field, "Statistics unavailable");
            eprintln!("{}", err);
            None
        }
    };

    if let Some(summary) = &summary {
        println!("{}", summary.to_lines().join("\n"));
        println!();
    }

    let narrative = interpret(summary.as_ref(), Some(records), field);
    println!("{}", narrative);

    if let Some(path) = report {
        let text = render_report(summary.as_ref(), &narrative, Local::now());
        ensure_parent_dir(path)?;
        std::fs::write(path, text).map_err(|e| {
            AppError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn chart_command(
    config: &AppConfig,
    records: &[StructuredCountryRecord],
    field: NumericField,
    top: usize,
    kind: &str,
    title: Option<&str>,
) -> Result<PathBuf> {
    let ranked = top_by_field(records, field, top);
    let (x_values, y_values) = chart_series(&ranked, field);
    let title = title
        .map(str::to_string)
        .unwrap_or_else(|| format!("Top {} Countries by {}", top, field.label()));

    ChartRenderer::new(&config.output_dir, config.chart_width, config.chart_height).render_chart(
        &x_values,
        &y_values,
        kind,
        &title,
        "Country",
        field.label(),
    )
}

/// Report file contents: generation stamp, summary figures, narrative
pub fn render_report(
    summary: Option<&StatisticsSummary>,
    narrative: &str,
    generated_at: DateTime<Local>,
) -> String {
    let mut sections = vec![format!(
        "# Country statistics report\nGenerated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )];
    if let Some(summary) = summary {
        sections.push(summary.to_lines().join("\n"));
    }
    sections.push(narrative.to_string());
    sections.join("\n\n") + "\n"
}
