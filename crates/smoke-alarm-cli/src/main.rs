mod commands;
mod output;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "smoke-alarm",
    version,
    about = "EPA air quality index and cigarette-equivalent exposure"
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where breakpoint tables come from.
#[derive(clap::Args)]
pub struct TableArgs {
    /// Builtin breakpoint table preset
    #[arg(short, long, default_value = "epa-2024", value_name = "NAME")]
    preset: String,

    /// Custom JSON breakpoint table file (overrides --preset)
    #[arg(short, long = "table", value_name = "FILE")]
    table: Option<PathBuf>,

    /// Extrapolate above the top breakpoint instead of clamping
    #[arg(long)]
    extrapolate: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the AQI for a saved document or a city in a data directory
    Compute {
        /// OpenWeatherMap response, readings document or readings array
        #[arg(required_unless_present = "city")]
        input_file: Option<PathBuf>,

        /// Look the city up in --data-dir instead of reading INPUT_FILE
        #[arg(long, requires = "data_dir", conflicts_with = "input_file")]
        city: Option<String>,

        /// Directory of saved documents named `<city>.json`
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,

        /// City to use when --city cannot be resolved
        #[arg(long, default_value = "Delhi", value_name = "NAME")]
        default_city: String,

        #[command(flatten)]
        tables: TableArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show the per-pollutant reasoning
        #[arg(long)]
        verbose: bool,

        /// Attach the step-by-step decision trace (json output)
        #[arg(long)]
        trace: bool,
    },
    /// Summarize an OpenWeatherMap forecast or history document per day
    Forecast {
        /// OpenWeatherMap air pollution forecast/history response
        input_file: PathBuf,

        #[command(flatten)]
        tables: TableArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show every day instead of the last seven
        #[arg(long)]
        all: bool,
    },
    /// Print a shareable summary
    Share {
        /// OpenWeatherMap response, readings document or readings array
        input_file: PathBuf,

        /// City name to show (default: the document's location)
        #[arg(long)]
        city: Option<String>,

        /// Date to show, YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        tables: TableArgs,
    },
    /// Inspect and validate breakpoint tables
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
}

#[derive(Subcommand)]
enum TablesAction {
    /// List builtin presets
    List,
    /// Print a preset's breakpoints
    Explain {
        /// Preset name (e.g., "epa-2024")
        preset: String,
    },
    /// Print the JSON schema with field descriptions and example
    Schema,
    /// Validate a custom breakpoint table file
    Validate {
        /// Path to JSON table file
        file: PathBuf,
    },
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = match cli.command {
        Commands::Compute {
            input_file,
            city,
            data_dir,
            default_city,
            tables,
            output,
            verbose,
            trace,
        } => {
            let input = match (input_file, city, data_dir) {
                (Some(path), _, _) => commands::compute::Input::File(path),
                (None, Some(city), Some(dir)) => commands::compute::Input::City {
                    city,
                    dir,
                    default_city,
                },
                _ => commands::compute::Input::Missing,
            };
            commands::compute::run(input, &tables, &output, verbose, trace)
        }
        Commands::Forecast {
            input_file,
            tables,
            output,
            all,
        } => commands::forecast::run(input_file, &tables, &output, all),
        Commands::Share {
            input_file,
            city,
            date,
            tables,
        } => commands::share::run(input_file, city, date, &tables),
        Commands::Tables { action } => match action {
            TablesAction::List => commands::tables::list(),
            TablesAction::Explain { preset } => commands::tables::explain(&preset),
            TablesAction::Schema => commands::tables::schema(),
            TablesAction::Validate { file } => commands::tables::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
