use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional `.quicknotes.yml` overriding the built-in constants.
/// Every field has a default, so a missing file is the common case.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DockerConfig {
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default = "default_container_name")]
    pub container_name: String,
    #[serde(default = "default_host_port")]
    pub host_port: u16,
    #[serde(default = "default_container_port")]
    pub container_port: u16,
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,
}

impl DockerConfig {
    /// host:container pair handed to `docker run -p`
    pub fn port_mapping(&self) -> String {
        format!("{}:{}", self.host_port, self.container_port)
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            container_name: default_container_name(),
            host_port: default_host_port(),
            container_port: default_container_port(),
            settle_secs: default_settle_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Script that launches the dev server in the foreground
    #[serde(default = "default_run_script")]
    pub run_script: String,
    /// Database port handed to the server; matches the container's host port
    #[serde(default = "default_host_port")]
    pub db_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            run_script: default_run_script(),
            db_port: default_host_port(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReleaseConfig {
    /// Directory holding the sass sources
    #[serde(default = "default_sass_dir")]
    pub sass_dir: String,
    /// Directory compiled css is written to; must already exist
    #[serde(default = "default_css_out_dir")]
    pub css_out_dir: String,
    #[serde(default = "default_webpack_script")]
    pub webpack_script: String,
    #[serde(default = "default_build_script")]
    pub build_script: String,
    /// Binary the build script produces
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Name the binary is stored under inside the artifact
    #[serde(default = "default_binary_in_archive")]
    pub binary_in_archive: String,
    /// Standalone files bundled by basename
    #[serde(default = "default_extra_files")]
    pub extra_files: Vec<String>,
    /// Static asset tree bundled whole
    #[serde(default = "default_asset_dir")]
    pub asset_dir: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            sass_dir: default_sass_dir(),
            css_out_dir: default_css_out_dir(),
            webpack_script: default_webpack_script(),
            build_script: default_build_script(),
            binary: default_binary(),
            binary_in_archive: default_binary_in_archive(),
            extra_files: default_extra_files(),
            asset_dir: default_asset_dir(),
        }
    }
}

fn default_image() -> String {
    "quicknotes/mysql-55".to_string()
}

fn default_container_name() -> String {
    "mysql-55-for-quicknotes".to_string()
}

fn default_host_port() -> u16 {
    7200
}

fn default_container_port() -> u16 {
    3306
}

fn default_settle_secs() -> u64 {
    8
}

fn default_run_script() -> String {
    "./scripts/run.sh".to_string()
}

fn default_sass_dir() -> String {
    "css".to_string()
}

fn default_css_out_dir() -> String {
    "s/css".to_string()
}

fn default_webpack_script() -> String {
    "./scripts/webpack-prod.sh".to_string()
}

fn default_build_script() -> String {
    "./scripts/build_linux.sh".to_string()
}

fn default_binary() -> String {
    "quicknotes_linux".to_string()
}

fn default_binary_in_archive() -> String {
    "quicknotes".to_string()
}

fn default_extra_files() -> Vec<String> {
    vec!["createdb.sql".to_string(), "scripts/server_run.sh".to_string()]
}

fn default_asset_dir() -> String {
    "s".to_string()
}

impl Config {
    /// Load config from .quicknotes.yml in the given directory
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(".quicknotes.yml");

        if !config_path.exists() {
            // No config file, return defaults
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = serde_yml::from_str(&content).map_err(|e| {
            crate::errors::QnError::ConfigError(format!("Failed to parse config: {}", e))
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.docker.image, "quicknotes/mysql-55");
        assert_eq!(config.docker.container_name, "mysql-55-for-quicknotes");
        assert_eq!(config.docker.port_mapping(), "7200:3306");
        assert_eq!(config.docker.settle_secs, 8);
        assert_eq!(config.server.run_script, "./scripts/run.sh");
        assert_eq!(config.server.db_port, 7200);
        assert_eq!(config.release.binary, "quicknotes_linux");
        assert_eq!(config.release.binary_in_archive, "quicknotes");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.docker.container_name, "mysql-55-for-quicknotes");
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".quicknotes.yml");

        let yaml = r#"
docker:
  container_name: mysql-for-tests
  settle_secs: 2

server:
  db_port: 7300
"#;

        let mut file = fs::File::create(&config_path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = Config::load(temp_dir.path()).unwrap();
        assert_eq!(config.docker.container_name, "mysql-for-tests");
        assert_eq!(config.docker.settle_secs, 2);
        // untouched fields keep the built-in constants
        assert_eq!(config.docker.image, "quicknotes/mysql-55");
        assert_eq!(config.docker.port_mapping(), "7200:3306");
        assert_eq!(config.server.db_port, 7300);
        assert_eq!(config.server.run_script, "./scripts/run.sh");
    }

    #[test]
    fn test_load_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".quicknotes.yml");
        fs::write(&config_path, "docker: [not, a, mapping]").unwrap();

        assert!(Config::load(temp_dir.path()).is_err());
    }
}
