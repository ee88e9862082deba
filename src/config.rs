use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Origins allowed to call /calculate from a browser
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_true")]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_origins(),
            allow_credentials: true,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Load configuration from the given file (optional; defaults apply when
/// absent) plus EV_SAVINGS__-prefixed environment overrides.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).required(false))
        .add_source(config::Environment::with_prefix("EV_SAVINGS").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.parse::<std::net::IpAddr>().is_err() {
        anyhow::bail!("Server host '{}' is not a valid IP address", cfg.server.host);
    }

    if cfg.cors.allowed_origins.is_empty() {
        anyhow::bail!("At least one CORS origin must be configured");
    }

    for origin in &cfg.cors.allowed_origins {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            anyhow::bail!("CORS origin '{}' must start with http:// or https://", origin);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.cors.allowed_origins.len(), 2);
        assert!(cfg.cors.allow_credentials);
    }

    #[test]
    fn test_validate_config_rejects_bad_host() {
        let mut cfg = Config::default();
        cfg.server.host = "not-an-ip".to_string();

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("not a valid IP address"));
    }

    #[test]
    fn test_validate_config_requires_origins() {
        let mut cfg = Config::default();
        cfg.cors.allowed_origins.clear();

        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_schemeless_origin() {
        let mut cfg = Config::default();
        cfg.cors.allowed_origins = vec!["localhost:5173".to_string()];

        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let cfg = load_config(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
    }
}
