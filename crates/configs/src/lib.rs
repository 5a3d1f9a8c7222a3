use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

/// Default cap for JSON request bodies (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_max_body_bytes() -> usize { DEFAULT_MAX_BODY_BYTES }

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

/// Build a config purely from `SERVER_HOST`, `SERVER_PORT` and `TOKIO_WORKER_THREADS`.
pub fn from_env() -> AppConfig {
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
    cfg
}

impl AppConfig {
    /// Load from `path` (or `CONFIG_PATH` / `config.toml`), falling back to env vars when no file is readable.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let loaded = match path {
            Some(p) => load_from_file(p)?,
            None => load_default().unwrap_or_else(|_| from_env()),
        };
        Ok(loaded)
    }

    pub fn load_and_validate(path: Option<&str>) -> Result<Self> {
        let mut cfg = Self::load(path)?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.max_body_bytes == 0 {
            self.max_body_bytes = DEFAULT_MAX_BODY_BYTES;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.max_body_bytes, 1 << 20);
        assert_eq!(cfg.logging.format, LogFormat::Compact);
    }

    #[test]
    fn parses_server_and_logging_sections() {
        let cfg = parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9090
            worker_threads = 2

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9090");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.logging.format, LogFormat::Json);
    }

    #[test]
    fn normalize_fills_blank_host_and_zero_limits() {
        let mut cfg = parse(
            r#"
            [server]
            host = "  "
            port = 8081
            worker_threads = 0
            max_body_bytes = 0
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.server.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn normalize_rejects_port_zero() {
        let mut cfg = parse("[server]\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn unknown_log_format_is_an_error() {
        assert!(parse("[logging]\nformat = \"xml\"\n").is_err());
    }
}
