//! Driver configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Catalog directory used when `AUTOROUTE_CATALOG_DIR` is unset.
pub const DEFAULT_CATALOG_DIR: &str = "data/demo";

/// Configuration for one driver invocation.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `jobs.ron`, `world.ron` and the optional catalog files.
    pub catalog_dir: PathBuf,
    pub session_id: Option<String>,
    /// Overrides `max_steps` from `options.toml`.
    pub max_steps: Option<u32>,
    /// Overrides the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from(DEFAULT_CATALOG_DIR),
            session_id: None,
            max_steps: None,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AUTOROUTE_CATALOG_DIR` - Catalog directory (default: `data/demo`)
    /// - `AUTOROUTE_SESSION_ID` - Session identifier for logs (default: auto-generated)
    /// - `AUTOROUTE_MAX_STEPS` - Step budget overriding `options.toml`
    /// - `AUTOROUTE_LOG_DIR` - Log directory (default: platform-specific)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("AUTOROUTE_CATALOG_DIR") {
            config.catalog_dir = PathBuf::from(dir);
        }
        config.session_id = lookup("AUTOROUTE_SESSION_ID").filter(|id| !id.is_empty());
        config.max_steps = lookup("AUTOROUTE_MAX_STEPS").and_then(|value| value.parse().ok());
        config.log_dir = lookup("AUTOROUTE_LOG_DIR").map(PathBuf::from);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = CliConfig::from_lookup(lookup(&[]));

        assert_eq!(config.catalog_dir, PathBuf::from(DEFAULT_CATALOG_DIR));
        assert_eq!(config.session_id, None);
        assert_eq!(config.max_steps, None);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn reads_every_variable() {
        let config = CliConfig::from_lookup(lookup(&[
            ("AUTOROUTE_CATALOG_DIR", "/srv/catalog"),
            ("AUTOROUTE_SESSION_ID", "nightly"),
            ("AUTOROUTE_MAX_STEPS", "40"),
            ("AUTOROUTE_LOG_DIR", "/var/log/autoroute"),
        ]));

        assert_eq!(config.catalog_dir, PathBuf::from("/srv/catalog"));
        assert_eq!(config.session_id.as_deref(), Some("nightly"));
        assert_eq!(config.max_steps, Some(40));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/autoroute")));
    }

    #[test]
    fn ignores_unparsable_step_budget() {
        let config = CliConfig::from_lookup(lookup(&[("AUTOROUTE_MAX_STEPS", "many")]));
        assert_eq!(config.max_steps, None);
    }
}
