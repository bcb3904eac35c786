//! Presence report for expected environment variables.

use std::collections::BTreeMap;

/// Variables the service reads from its environment.
pub const EXPECTED_ENV_VARS: &[&str] = &["DATABASE_URL", "LODGE_SERVICE_KEY", "RUST_LOG"];

/// Whether each expected variable is set to a non-empty value.
///
/// Values are never included.
pub fn env_presence() -> BTreeMap<&'static str, bool> {
    EXPECTED_ENV_VARS
        .iter()
        .map(|name| {
            let present = std::env::var(name).is_ok_and(|value| !value.trim().is_empty());
            (*name, present)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_expected_variable() {
        let report = env_presence();
        assert_eq!(report.len(), EXPECTED_ENV_VARS.len());
        assert!(EXPECTED_ENV_VARS.iter().all(|name| report.contains_key(name)));
    }
}
