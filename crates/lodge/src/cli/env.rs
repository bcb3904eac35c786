//! Environment checks shared by the commands.

use anyhow::{Result, bail};
use lodge::{EXPECTED_ENV_VARS, env_presence};

/// Variables maintenance commands cannot run without.
pub const REQUIRED_ENV_VARS: &[&str] = &["DATABASE_URL", "LODGE_SERVICE_KEY"];

/// Fail unless every required variable is set.
pub fn require_maintenance_env() -> Result<()> {
    let presence = env_presence();
    let missing: Vec<&str> = REQUIRED_ENV_VARS
        .iter()
        .copied()
        .filter(|name| !presence.get(name).copied().unwrap_or(false))
        .collect();

    if !missing.is_empty() {
        bail!("Missing required environment variables: {}", missing.join(", "));
    }
    Ok(())
}

/// Print the presence report; fails when a required variable is missing.
pub fn check_env() -> Result<()> {
    let presence = env_presence();
    for name in EXPECTED_ENV_VARS {
        let state = if presence.get(name).copied().unwrap_or(false) {
            "set"
        } else if REQUIRED_ENV_VARS.contains(name) {
            "MISSING"
        } else {
            "unset"
        };
        println!("{:<20} {}", name, state);
    }
    require_maintenance_env()
}
