use crate::models::{GroupKey, NumericColumn};
use crate::processors::Subset;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "traffic-analyzer")]
#[command(about = "Find indicators of heavy traffic in hourly traffic and weather observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file [default: traffic-analyzer.toml if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis: distributions, time and weather groupings, indicators
    Report {
        #[arg(short, long, help = "Input CSV file or zip archive containing one")]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(long, help = "Memory-map the input file")]
        mmap: bool,
    },

    /// Average numeric columns per group of a subset
    Group {
        #[arg(short, long, help = "Input CSV file or zip archive containing one")]
        input: PathBuf,

        #[arg(short, long, value_enum)]
        by: GroupKey,

        #[arg(short, long, value_enum, default_value_t = Subset::Day)]
        subset: Subset,

        #[arg(
            long,
            value_enum,
            value_delimiter = ',',
            help = "Columns to average [default: all numeric columns]"
        )]
        columns: Vec<NumericColumn>,

        #[arg(long, help = "Include traffic volume quartiles per group")]
        quartiles: bool,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Correlate traffic volume with every numeric column
    Correlate {
        #[arg(short, long, help = "Input CSV file or zip archive containing one")]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Subset::Day)]
        subset: Subset,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Summary statistics and histogram of one column
    Describe {
        #[arg(short, long, help = "Input CSV file or zip archive containing one")]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Subset::All)]
        subset: Subset,

        #[arg(long, value_enum, default_value_t = NumericColumn::TrafficVolume)]
        column: NumericColumn,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Audit timestamps and value ranges without changing anything
    Audit {
        #[arg(short, long, help = "Input CSV file or zip archive containing one")]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}
