//! Profile update command implementation.

use anyhow::{Result, bail};
use clap::Args;
use serde_json::{Map, Value};

use yatra_core::flows;

use crate::cli::GlobalArgs;
use crate::{output, progress, session};

const PROFILE_ROUTE: &str = "/profile";

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// New display name
    #[arg(long)]
    pub username: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// Any other profile field, as KEY=VALUE (repeatable; values are strings)
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

fn parse_field(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err("field name cannot be empty".to_string());
    }

    Ok((key.to_string(), value.to_string()))
}

impl UpdateArgs {
    fn changes(&self) -> Map<String, Value> {
        let mut changes = Map::new();
        for (key, value) in &self.fields {
            changes.insert(key.clone(), Value::String(value.clone()));
        }
        // Named flags win over --field for the same key.
        if let Some(username) = &self.username {
            changes.insert("username".to_string(), Value::String(username.clone()));
        }
        if let Some(email) = &self.email {
            changes.insert("email".to_string(), Value::String(email.clone()));
        }
        changes
    }
}

pub async fn run(global: &GlobalArgs, args: UpdateArgs) -> Result<()> {
    let changes = args.changes();
    if changes.is_empty() {
        bail!("Nothing to update. Pass --username, --email or --field KEY=VALUE.");
    }

    let mut ctx = session::open(global)?;
    session::require(&ctx, PROFILE_ROUTE)?;
    let api = session::api(global)?;

    let user = session::remote(
        progress::run(flows::update_profile(&mut ctx, &api, &changes)).await,
        "Failed to update profile",
    )?;

    output::success("Profile updated");
    println!();
    for key in changes.keys() {
        let value = match user.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        };
        output::field(key, &value);
    }

    Ok(())
}
