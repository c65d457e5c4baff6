use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use chrono::{DateTime, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use boxoffice_booking::{BookingConfig, BookingService, InMemoryBookingService};
use boxoffice_core::{BookingError, calendar};
use boxoffice_inventory::ShowSelector;
use boxoffice_observability::LogFormat;

mod demo;
mod output;
mod schedule;

use output::Printer;
use schedule::{Schedule, parse_hh_mm};

// --- CLI definition ---

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum LogFormatArg {
    Json,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

#[derive(Parser)]
#[command(name = "boxoffice")]
#[command(about = "Show catalog and seat reservations across venues")]
#[command(version)]
struct Cli {
    /// TOML schedule to seed venues and shows from
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    /// Seats per show for venues declared without a capacity
    /// (overrides BOXOFFICE_DEFAULT_CAPACITY)
    #[arg(long, global = true)]
    default_capacity: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Log line format
    #[arg(long, value_enum, default_value = "compact", global = true)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List titles showing on a day across all venues
    Titles {
        /// Day to query, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List venues showing a title on a day
    Venues {
        title: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List every show at a venue on a day
    Shows {
        venue: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List a title's shows on a day, grouped by venue
    Movie {
        title: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show free seats for a title at a venue on a day
    Seats {
        venue: String,
        title: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Reserve seats (all or nothing)
    Reserve {
        venue: String,
        title: String,
        /// Show start time HH:MM (selects by time when --show-no is 0)
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// 1-based rank of the show on that day by start time; 0 selects by --time
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        show_no: i64,
        /// Seat identifiers, e.g. A2 A3
        #[arg(required = true)]
        seats: Vec<String>,
    },
    /// Run a seeded walkthrough: book, re-book, and race two threads for one seat
    Demo,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    boxoffice_observability::init_with(&cli.log_level.to_string(), cli.log_format.clone().into());

    let printer = Printer::new(cli.json);
    match run(cli, &printer) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            printer.error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, printer: &Printer) -> Result<()> {
    let mut config = BookingConfig::from_env();
    if let Some(capacity) = cli.default_capacity {
        config = config.with_default_capacity(capacity)?;
    }
    let service = InMemoryBookingService::with_config(config);

    if let Some(path) = &cli.schedule {
        Schedule::load(path)?.apply(&service, Local::now().date_naive())?;
    }

    match cli.command {
        Commands::Titles { date } => {
            let titles = service.list_titles(&day(date)?);
            printer.list(&titles)
        }
        Commands::Venues { title, date } => {
            let venues = service.venues_showing_title(&title, &day(date)?);
            printer.list(&venues)
        }
        Commands::Shows { venue, date } => {
            let shows = service.shows_at_venue(&venue, &day(date)?);
            printer.shows(&shows)
        }
        Commands::Movie { title, date } => {
            let by_venue = service.shows_for_title_by_venue(&title, &day(date)?);
            printer.shows_by_venue(&by_venue)
        }
        Commands::Seats { venue, title, date } => {
            let snapshots = service.availability(&venue, &title, &day(date)?);
            printer.availability(&venue, &title, &snapshots)
        }
        Commands::Reserve {
            venue,
            title,
            time,
            date,
            show_no,
            seats,
        } => {
            let selector = ShowSelector::from_ordinal(&title, show_no)?;
            let target = match (selector, time) {
                (_, Some(time)) => {
                    let (hour, minute) = parse_hh_mm(&time)?;
                    calendar::date_at(date.unwrap_or_else(today), hour, minute)?
                }
                (ShowSelector::Ordinal(_), None) => day(date)?,
                (ShowSelector::AtTime, None) => bail!("--time is required unless --show-no is set"),
            };
            let reservation = service.reserve(&venue, &title, &target, &seats, selector)?;
            printer.reservation(&reservation)
        }
        Commands::Demo => demo::run(*service.config(), printer),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Query instant for a day argument; time-of-day is irrelevant to day queries.
fn day(date: Option<NaiveDate>) -> Result<DateTime<Local>, BookingError> {
    match date {
        Some(date) => calendar::date_at(date, 0, 0),
        None => Ok(Local::now()),
    }
}
