use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "country-stats")]
#[command(about = "Fetch country data, compute descriptive statistics and export reports")]
pub struct Cli {
    /// TOML config file (default: ./country-stats.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where records come from and which of them to keep
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read records saved by `fetch` instead of calling the remote source
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Keep only countries whose name matches this regex (case-insensitive, lookaround allowed)
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all countries, save them as JSON and export a table
    Fetch {
        /// Keep only countries whose name matches this regex (case-insensitive, lookaround allowed)
        #[arg(long)]
        filter: Option<String>,
        /// JSON output path (default from config)
        #[arg(long)]
        json: Option<PathBuf>,
        /// Table output path; `.xlsx` writes a spreadsheet, anything else CSV
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Compute descriptive statistics and print their interpretation
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
        /// Numeric field: population, area_km2 or density
        #[arg(long)]
        field: Option<String>,
        /// Also write the interpretation to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Chart the top countries by a numeric field
    Chart {
        #[command(flatten)]
        source: SourceArgs,
        /// Numeric field: population, area_km2 or density
        #[arg(long)]
        field: Option<String>,
        /// Number of countries to plot
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Chart kind: bar or line
        #[arg(long, default_value = "bar")]
        kind: String,
        /// Chart title; also names the output file
        #[arg(long)]
        title: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "country-stats",
            "analyze",
            "--input",
            "countries.json",
            "--filter",
            "^A",
            "--field",
            "density",
        ]);

        match cli.command {
            Some(Commands::Analyze { source, field, report }) => {
                assert_eq!(source.input, Some(PathBuf::from("countries.json")));
                assert_eq!(source.filter.as_deref(), Some("^A"));
                assert_eq!(field.as_deref(), Some("density"));
                assert!(report.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_chart_defaults() {
        let cli = Cli::parse_from(["country-stats", "--config", "x.toml", "chart"]);

        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        match cli.command {
            Some(Commands::Chart { top, kind, title, .. }) => {
                assert_eq!(top, 10);
                assert_eq!(kind, "bar");
                assert!(title.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
