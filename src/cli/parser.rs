use clap::{Parser, Subcommand};

/// Command-line interface definition for clocksync
/// CLI application to record attendance clock events and sync them to a
/// remote attendance service, with an offline retry queue
#[derive(Parser)]
#[command(
    name = "clocksync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record attendance clock-in/out events and sync them to a remote service, offline-first",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the attendance service base URL
    #[arg(global = true, long = "server")]
    pub server: Option<String>,

    /// Run in test mode (no config file update, mock attendance service)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check the configuration for problems")]
        check: bool,
    },

    /// Record a clock-in for an employee
    In {
        /// Employee identifier (falls back to employee_id from the config)
        #[arg(long = "employee", short = 'e')]
        employee: Option<String>,

        /// Capture coordinates for this event
        #[arg(long = "location")]
        location: bool,

        /// Skip coordinate capture even if enabled in the config
        #[arg(long = "no-location", conflicts_with = "location")]
        no_location: bool,
    },

    /// Record a clock-out for an employee
    Out {
        /// Employee identifier (falls back to employee_id from the config)
        #[arg(long = "employee", short = 'e')]
        employee: Option<String>,

        /// Capture coordinates for this event
        #[arg(long = "location")]
        location: bool,

        /// Skip coordinate capture even if enabled in the config
        #[arg(long = "no-location", conflicts_with = "location")]
        no_location: bool,
    },

    /// Resubmit every queued event now
    Sync,

    /// Show pending (and dead-lettered) events
    Queue,

    /// List locally recorded events for a date (default: today)
    List {
        /// Date to show (YYYY-MM-DD)
        date: Option<String>,

        /// Filter by employee (enables the cached day view)
        #[arg(long = "employee", short = 'e')]
        employee: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
