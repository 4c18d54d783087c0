//! yatra - command-line client for the YatraNepal booking service.
//!
//! A thin wrapper over `yatra-core`: the session lives in a file store under
//! the user's data directory and every protected command goes through the
//! route guard before touching the network.

mod cli;
mod commands;
mod output;
mod progress;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{bookings, login, logout, password, profile, register, whoami};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let global = cli.global;
    match cli.command {
        Commands::Login(args) => login::run(&global, args).await,
        Commands::Register(args) => register::run(&global, args).await,
        Commands::Logout(args) => logout::run(&global, args),
        Commands::Whoami(args) => whoami::run(&global, args),
        Commands::Bookings(cmd) => bookings::handle(&global, cmd).await,
        Commands::Profile(cmd) => profile::handle(&global, cmd).await,
        Commands::Password(cmd) => password::handle(&global, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output on stdout stays parseable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
