use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Runtime settings. Model, temperature, token cap and prompt are fixed in
/// [`crate::runner`] and deliberately absent here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// `json` selects JSON lines; any other value falls back to pretty output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl From<String> for LogFormat {
    fn from(format: String) -> Self {
        match format.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load from `config/default.*` (optional), then `LOG_*` environment
    /// variables: `LOG_LEVEL=debug` maps to `log.level`, `LOG_FORMAT=json`
    /// to `log.format`.
    ///
    /// The API key is not part of this config; the LLM client reads it.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix("LOG")
            .keep_prefix(true)
            .separator("_")
            .try_parsing(true)
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(environment);

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Temp directory removed on drop, even when an assertion fails
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("chatmodels-{}-{}", name, std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, file: &str, contents: &str) -> PathBuf {
            let path = self.0.join(file);
            std::fs::write(&path, contents).unwrap();
            path
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.0).ok();
        }
    }

    fn load_env(vars: &[(&str, &str)]) -> Config {
        let source = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::load_with(Config::environment().source(Some(source))).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_file() {
        let dir = ScratchDir::new("config");
        let path = dir.write(
            "settings.toml",
            r#"
                [log]
                level = "debug"
                format = "json"
            "#,
        );

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = ScratchDir::new("empty");
        let path = dir.write("empty.toml", "");

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.log, LoggingConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = load_env(&[("LOG_LEVEL", "debug"), ("LOG_FORMAT", "JSON")]);

        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_env_format_falls_back_to_pretty() {
        let config = load_env(&[("LOG_FORMAT", "text")]);
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn test_unknown_file_format_falls_back_to_pretty() {
        let dir = ScratchDir::new("plain");
        let path = dir.write("settings.toml", "[log]\nformat = \"compact\"\n");

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.log.format, LogFormat::Pretty);
    }
}
