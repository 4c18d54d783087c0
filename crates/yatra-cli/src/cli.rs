//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{bookings, login, logout, password, profile, register, whoami};

/// Default service address for local development.
pub const DEFAULT_API: &str = "http://localhost:8800";

/// YatraNepal booking client.
#[derive(Parser, Debug)]
#[command(name = "yatra")]
#[command(author, version = env!("YATRA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Booking service base URL
    #[arg(long, env = "YATRA_API", default_value = DEFAULT_API, global = true)]
    pub api: String,

    /// Directory holding the persisted session
    #[arg(long, env = "YATRA_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login(login::LoginArgs),

    /// Create a new account
    Register(register::RegisterArgs),

    /// Forget the stored session
    Logout(logout::LogoutArgs),

    /// Display the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Reservation operations
    Bookings(bookings::BookingsCommand),

    /// Profile operations
    Profile(profile::ProfileCommand),

    /// Password operations
    Password(password::PasswordCommand),
}
