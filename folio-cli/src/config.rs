use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FolioConfig {
    /// Build configuration
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Content model file (the portfolio itself)
    pub content: String,
    /// Output directory for the generated site
    pub output: String,
    /// Theme directory holding the page skeleton
    pub theme: String,
    /// File holding the persisted theme preference
    pub state: String,
    /// Configuration file path
    pub config: String,
    /// Host for the preview server
    pub host: String,
    /// Port for the preview server
    pub port: u16,
    /// Open browser automatically
    pub open: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "./portfolio.toml".to_string(),
            output: "./out".to_string(),
            theme: "./theme".to_string(),
            state: "./.folio-theme".to_string(),
            config: "./folio.toml".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            open: false,
        }
    }
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
        }
    }
}

impl FolioConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (FOLIO_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = args
            .get_one::<String>("config")
            .unwrap_or(&"./folio.toml".to_string())
            .clone();

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        if Path::new(&config_file).exists() {
            builder = builder.add_source(File::with_name(&config_file.replace(".toml", "")));
        }

        // 3. Add environment variables with FOLIO_ prefix
        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // 4. Override with CLI arguments (highest priority)
        let mut cli_overrides = std::collections::HashMap::new();

        if let Some(content) = args.get_one::<String>("content") {
            cli_overrides.insert("build.content".to_string(), content.clone());
        }
        if let Some(output) = args.try_get_one::<String>("output").unwrap_or(None) {
            cli_overrides.insert("build.output".to_string(), output.clone());
        }
        if let Some(theme) = args.try_get_one::<String>("theme").unwrap_or(None) {
            cli_overrides.insert("build.theme".to_string(), theme.clone());
        }
        if let Some(state) = args.try_get_one::<String>("state").unwrap_or(None) {
            cli_overrides.insert("build.state".to_string(), state.clone());
        }
        if let Some(config) = args.get_one::<String>("config") {
            cli_overrides.insert("build.config".to_string(), config.clone());
        }
        // Only override with CLI args that are actually defined for this command
        if let Some(host) = args.try_get_one::<String>("host").unwrap_or(None) {
            cli_overrides.insert("build.host".to_string(), host.clone());
        }
        if let Some(port) = args.try_get_one::<String>("port").unwrap_or(None) {
            if let Ok(port_num) = port.parse::<u16>() {
                cli_overrides.insert("build.port".to_string(), port_num.to_string());
            }
        }
        if args
            .try_get_one::<bool>("open")
            .unwrap_or(None)
            .unwrap_or(&false)
            == &true
        {
            cli_overrides.insert("build.open".to_string(), "true".to_string());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        // Build and deserialize
        let config = builder.build()?;
        let folio_config: FolioConfig = config.try_deserialize()?;

        Ok(folio_config)
    }

    /// Get the build configuration
    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.build.content, "./portfolio.toml");
        assert_eq!(config.build.output, "./out");
        assert_eq!(config.build.theme, "./theme");
        assert_eq!(config.build.state, "./.folio-theme");
        assert_eq!(config.build.port, 3000);
    }

    #[test]
    fn test_cli_args_override() {
        let app = Command::new("test")
            .arg(Arg::new("content").long("content").value_name("FILE"))
            .arg(Arg::new("output").long("output").value_name("DIR"))
            .arg(Arg::new("config").long("config").value_name("FILE"));

        let matches = app
            .try_get_matches_from(vec![
                "test",
                "--content",
                "/custom/portfolio.toml",
                "--output",
                "/custom/output",
            ])
            .unwrap();

        let config = FolioConfig::load(&matches).unwrap();
        assert_eq!(config.build.content, "/custom/portfolio.toml");
        assert_eq!(config.build.output, "/custom/output");
        // Should still have defaults for non-overridden values
        assert_eq!(config.build.theme, "./theme");
    }
}
