use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use sitemail_contact::{EmailConfig, MAX_RESUME_BYTES};
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Request body limit for the contact endpoint.
    ///
    /// Kept above the résumé limit so oversized files are answered with the
    /// size error instead of a bare 413.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy SMTP_USERNAME / SMTP_PASSWORD
    /// 2. Environment variables (SITEMAIL__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path, CONFIG_PATH or config/default.toml
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored if not found
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SITEMAIL")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(username) = env::var("SMTP_USERNAME") {
            builder = builder.set_override("email.smtp_username", username)?;
        }
        if let Ok(password) = env::var("SMTP_PASSWORD") {
            builder = builder.set_override("email.smtp_password", password)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !self.email.contact_address.contains('@') {
            return Err(format!(
                "Contact address is not an email address: {}",
                self.email.contact_address
            ));
        }
        if !self.email.from_address.contains('@') {
            return Err(format!(
                "From address is not an email address: {}",
                self.email.from_address
            ));
        }
        if self.upload.max_body_bytes <= MAX_RESUME_BYTES {
            return Err(format!(
                "Upload max_body_bytes must be larger than the résumé limit ({MAX_RESUME_BYTES} bytes)"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            email: EmailConfig::default(),
            upload: UploadConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_contact_address() {
        let mut config = valid_config();
        config.email.contact_address = "inbox".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_body_limit_below_resume_limit() {
        let mut config = valid_config();
        config.upload.max_body_bytes = MAX_RESUME_BYTES;

        assert!(config.validate().is_err());
    }
}
