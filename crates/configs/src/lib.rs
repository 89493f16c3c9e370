use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

const MAX_SUBMISSION_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            static_dir: default_static_dir(),
            log_format: default_log_format(),
        }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8081 }
fn default_static_dir() -> String { "frontend".into() }
fn default_log_format() -> String { "compact".into() }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON array of services replacing the built-in table.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self { Self { delay_ms: default_delay_ms() } }
}

fn default_delay_ms() -> u64 { 2000 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AdminConfig {
    /// JSON array of requests replacing the bundled mock board.
    #[serde(default)]
    pub requests_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    /// Application sessions untouched for this long are dropped.
    #[serde(default = "default_idle_ttl_secs")]
    pub idle_ttl_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self { Self { idle_ttl_secs: default_idle_ttl_secs() } }
}

fn default_idle_ttl_secs() -> u64 { 30 * 60 }

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
    /// Config file if present, otherwise defaults filled from env vars; validated either way.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(_) => Self::from_env(),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(d) = std::env::var("SUBMISSION_DELAY_MS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.submission.delay_ms = d;
        }
        if let Some(t) = std::env::var("SESSION_IDLE_TTL_SECS").ok().and_then(|v| v.parse::<u64>().ok()) {
            cfg.sessions.idle_ttl_secs = t;
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.submission.validate()?;
        if self.sessions.idle_ttl_secs == 0 {
            return Err(anyhow!("sessions.idle_ttl_secs must be > 0"));
        }
        self.catalog.path = non_blank(self.catalog.path.take());
        self.admin.requests_path = non_blank(self.admin.requests_path.take());
        Ok(())
    }
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
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
        if self.static_dir.trim().is_empty() {
            self.static_dir = default_static_dir();
        }
        Ok(())
    }
}

impl SubmissionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.delay_ms > MAX_SUBMISSION_DELAY_MS {
            return Err(anyhow!("submission.delay_ms must be <= {MAX_SUBMISSION_DELAY_MS}"));
        }
        Ok(())
    }
}
