use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
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

/// Account created on first start when no admin exists
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_admin")]
    pub default_admin_username: String,
    #[serde(default = "default_admin")]
    pub default_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            default_admin_username: default_admin(),
            default_admin_password: default_admin(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// `["*"]` allows any origin
    #[serde(default = "default_origins")]
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_origins(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any(&self) -> bool {
        self.origins.is_empty() || self.origins.iter().any(|o| o == "*")
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_admin() -> String {
    "admin".to_string()
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/water_reception.db"

[server]
host = "0.0.0.0"
port = 3000

[auth]
default_admin_username = "admin"
default_admin_password = "admin"

[cors]
origins = ["*"]
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// `APP_DATABASE_PATH` and `APP_PORT` override the file afterwards.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(
        &mut config,
        std::env::var("APP_DATABASE_PATH").ok(),
        std::env::var("APP_PORT").ok(),
    )?;
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return Ok(toml::from_str(&contents)?);
            }
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

fn apply_env_overrides(
    config: &mut Config,
    db_path: Option<String>,
    port: Option<String>,
) -> anyhow::Result<()> {
    if let Some(path) = db_path.filter(|p| !p.trim().is_empty()) {
        tracing::info!("Database path overridden by APP_DATABASE_PATH");
        config.database.path = path;
    }
    if let Some(port) = port.filter(|p| !p.trim().is_empty()) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("APP_PORT '{}' is not a valid port: {}", port, e))?;
    }
    Ok(())
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path = Path::new(&config.database.path);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(&config.database.path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "target/db/water_reception.db");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.default_admin_username, "admin");
        assert!(config.cors.allows_any());
    }

    #[test]
    fn test_sections_are_optional_except_database() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(toml::from_str::<Config>("[server]\nport = 1\n").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        apply_env_overrides(&mut config, Some("/tmp/w.db".into()), Some("8080".into())).unwrap();
        assert_eq!(config.database.path, "/tmp/w.db");
        assert_eq!(config.server.port, 8080);

        assert!(apply_env_overrides(&mut config, None, Some("http".into())).is_err());
    }

    #[test]
    fn test_restricted_origins() {
        let config: Config = toml::from_str(
            "[database]\npath = \"x.db\"\n[cors]\norigins = [\"http://localhost:8080\"]\n",
        )
        .unwrap();
        assert!(!config.cors.allows_any());
    }
}
