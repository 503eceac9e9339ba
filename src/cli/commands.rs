use crate::analyzers::TrafficAnalyzer;
use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::error::Result;
use crate::models::{NumericColumn, TrafficRecord};
use crate::processors::{correlate_traffic, Aggregator, QualityChecker, Subset, TimePartitioner};
use crate::readers::TrafficReader;
use crate::render::{to_json, TextRenderer};
use crate::utils::progress::ProgressReporter;
use crate::utils::{init_logging, AnalysisSettings};
use std::path::Path;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = AnalysisSettings::load(cli.config.as_deref())?;
    debug!(?settings, "Loaded settings");

    let renderer = TextRenderer::new(settings.clone());
    let partitioner = TimePartitioner::new();

    match cli.command {
        Commands::Report {
            input,
            format,
            mmap,
        } => {
            let records = load_records(&input, mmap, cli.quiet)?;

            let analyzer = TrafficAnalyzer::with_settings(settings);
            let report = analyzer.analyze(&records)?;

            match format {
                OutputFormat::Text => print!("{}", renderer.render_report(&report)),
                OutputFormat::Json => println!("{}", to_json(&report)?),
            }
        }

        Commands::Group {
            input,
            by,
            subset,
            columns,
            quartiles,
            format,
        } => {
            let records = load_records(&input, false, cli.quiet)?;
            let selected = partitioner.select(&records, subset);
            info!(subset = ?subset, records = selected.len(), key = %by, "Grouping subset");

            let columns = if columns.is_empty() {
                NumericColumn::ALL.to_vec()
            } else {
                columns
            };

            let mut aggregator = Aggregator::new(&columns);
            if quartiles {
                aggregator = aggregator.with_summary_of(NumericColumn::TrafficVolume);
            }
            let grouped = aggregator.group_by(selected, by);

            match format {
                OutputFormat::Text => print!(
                    "{}",
                    renderer.render_grouped(
                        &format!("{} by {}", subset_title(subset), by),
                        &grouped,
                        aggregator.columns(),
                    )
                ),
                OutputFormat::Json => println!("{}", to_json(&grouped)?),
            }
        }

        Commands::Correlate {
            input,
            subset,
            format,
        } => {
            let records = load_records(&input, false, cli.quiet)?;
            let selected = partitioner.select(&records, subset);
            let table = correlate_traffic(selected);

            match format {
                OutputFormat::Text => print!(
                    "{}",
                    renderer.render_correlations(
                        &format!("{} Correlations with Traffic Volume", subset_title(subset)),
                        &table,
                    )
                ),
                OutputFormat::Json => println!("{}", to_json(&table)?),
            }
        }

        Commands::Describe {
            input,
            subset,
            column,
            format,
        } => {
            let records = load_records(&input, false, cli.quiet)?;
            let selected = partitioner.select(&records, subset);

            let analyzer = TrafficAnalyzer::with_settings(settings);
            let profile = analyzer.column_profile(selected, column);

            match format {
                OutputFormat::Text => print!(
                    "{}",
                    renderer.render_profile(
                        &format!("{}: {}", column.name(), subset_title(subset)),
                        &profile,
                    )
                ),
                OutputFormat::Json => println!("{}", to_json(&profile)?),
            }
        }

        Commands::Audit { input, format } => {
            let records = load_records(&input, false, cli.quiet)?;

            let checker = QualityChecker::new()
                .with_sentinel_temp(settings.sentinel_temp_kelvin)
                .with_max_listed(settings.max_listed_issues);
            let report = checker.check(&records);

            match format {
                OutputFormat::Text => print!("{}", checker.generate_summary(&report)),
                OutputFormat::Json => println!("{}", to_json(&report)?),
            }
        }
    }

    Ok(())
}

fn load_records(input: &Path, use_mmap: bool, quiet: bool) -> Result<Vec<TrafficRecord>> {
    let progress = ProgressReporter::new_spinner(
        &format!("Loading {}...", input.display()),
        quiet,
    );

    let records = TrafficReader::with_mmap(use_mmap).read_path(input);
    match &records {
        Ok(loaded) => progress.finish_with_message(&format!("Loaded {} records", loaded.len())),
        Err(_) => progress.finish_and_clear(),
    }
    records
}

fn subset_title(subset: Subset) -> &'static str {
    match subset {
        Subset::All => "All Hours",
        Subset::Day => "Day",
        Subset::Night => "Night",
        Subset::Business => "Business Days",
        Subset::Weekend => "Weekend",
    }
}

