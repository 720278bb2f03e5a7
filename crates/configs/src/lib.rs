use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Seconds in-flight requests get to finish after a termination signal
    /// before the store is flushed anyway.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_shutdown_grace_secs() -> u64 { 10 }

/// Which sequence a freshly derived child id is checked against.
///
/// `Parents` keeps the historical behavior: the candidate id is only compared
/// with existing parent keys, so two children of one parent both receive
/// `<parentkey>1`. `Children` compares against existing child ids instead.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChildIdScope {
    #[default]
    Parents,
    Children,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_parents_file")]
    pub parents_file: String,
    #[serde(default = "default_children_file")]
    pub children_file: String,
    #[serde(default = "default_admin_file")]
    pub admin_file: String,
    #[serde(default)]
    pub child_id_scope: ChildIdScope,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            parents_file: default_parents_file(),
            children_file: default_children_file(),
            admin_file: default_admin_file(),
            child_id_scope: ChildIdScope::default(),
        }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from(".") }
fn default_parents_file() -> String { "parents.json".into() }
fn default_children_file() -> String { "children.json".into() }
fn default_admin_file() -> String { "admin.json".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Settings from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`,
    /// `SHUTDOWN_GRACE_SECS` and `DATA_DIR`, used when no config file is readable.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .or(cfg.server.worker_threads);
        if let Some(secs) = std::env::var("SHUTDOWN_GRACE_SECS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.server.shutdown_grace_secs = secs;
        }
        if let Ok(dir) = std::env::var("DATA_DIR") {
            cfg.storage.data_dir = PathBuf::from(dir);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        for (key, name) in [
            ("storage.parents_file", &self.parents_file),
            ("storage.children_file", &self.children_file),
            ("storage.admin_file", &self.admin_file),
        ] {
            if name.trim().is_empty() {
                return Err(anyhow!("{key} must not be empty"));
            }
        }
        Ok(())
    }

    pub fn parents_path(&self) -> PathBuf { self.data_dir.join(&self.parents_file) }
    pub fn children_path(&self) -> PathBuf { self.data_dir.join(&self.children_file) }
    pub fn admin_path(&self) -> PathBuf { self.data_dir.join(&self.admin_file) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.shutdown_grace(), Duration::from_secs(10));
        assert_eq!(cfg.storage.parents_path(), PathBuf::from("./parents.json"));
        assert_eq!(cfg.storage.admin_file, "admin.json");
        assert_eq!(cfg.storage.child_id_scope, ChildIdScope::Parents);
    }

    #[test]
    fn storage_section_overrides() {
        let mut cfg = parse(
            r#"
            [server]
            port = 9000
            worker_threads = 0
            shutdown_grace_secs = 2

            [storage]
            data_dir = "data"
            children_file = "kids.json"
            child_id_scope = "children"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:9000");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.shutdown_grace(), Duration::from_secs(2));
        assert_eq!(cfg.storage.children_path(), PathBuf::from("data/kids.json"));
        assert_eq!(cfg.storage.child_id_scope, ChildIdScope::Children);
    }

    #[test]
    fn rejects_zero_port_and_blank_file_names() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = parse("[storage]\nadmin_file = \" \"\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
