use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "household.toml";

/// Runtime settings: built-in defaults, then the optional config file, then
/// `HOUSEHOLD_*` environment variables (e.g. `HOUSEHOLD_CURRENCY=USD`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Currency code shown next to amounts
    pub currency: String,
    /// JSON snapshot to load instead of the bundled sample household
    pub snapshot: Option<String>,
}

impl Settings {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("currency", "PHP")?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("HOUSEHOLD"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.currency, "PHP");
        assert_eq!(settings.snapshot, None);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("household.toml");
        std::fs::write(&path, "currency = \"USD\"\nsnapshot = \"data/home.json\"\n").unwrap();

        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.snapshot.as_deref(), Some("data/home.json"));
    }
}
