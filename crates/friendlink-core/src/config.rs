//! Configuration — YAML config + env var overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Relative path of the add-friend endpoint on the serving origin.
pub const ADD_FRIEND_PATH: &str = "/add_friend";

/// Where the backend listens during local development.
pub const DEFAULT_BACKEND_ORIGIN: &str = "http://127.0.0.1:5000";

/// A development-only mapping from a local path to an absolute backend URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewrite {
    pub source: String,
    pub destination: String,
}

impl Rewrite {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Point the destination at a different origin, keeping its path and query.
    pub fn with_origin(&self, origin: &str) -> Result<Self> {
        let dest = Url::parse(&self.destination)
            .with_context(|| format!("Invalid rewrite destination: {}", self.destination))?;
        let mut moved = Url::parse(origin)
            .with_context(|| format!("Invalid backend origin: {}", origin))?
            .join(dest.path())?;
        moved.set_query(dest.query());
        Ok(Self::new(self.source.clone(), moved.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin the terminal client treats as "same origin" (the dev server)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Endpoint path joined onto base_url
    #[serde(default = "default_add_friend_path")]
    pub add_friend_path: String,

    /// Cookie header value sent with every request (the browser sends its own)
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,

    /// Dev server listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Dev server rewrite rules
    #[serde(default = "default_rewrites")]
    pub rewrites: Vec<Rewrite>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".into()
}
fn default_add_friend_path() -> String {
    ADD_FRIEND_PATH.into()
}
fn default_port() -> u16 {
    3000
}
fn default_rewrites() -> Vec<Rewrite> {
    vec![Rewrite::new(
        ADD_FRIEND_PATH,
        format!("{}{}", DEFAULT_BACKEND_ORIGIN, ADD_FRIEND_PATH),
    )]
}

impl Config {
    /// Load config from a YAML file with env var overrides.
    /// `config_path` is the path to config.yaml.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;
        config.with_env_overrides()
    }

    /// Like [`Config::load`], but a missing file means defaults.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.is_file() {
            Self::load(config_path)
        } else {
            Self::default().with_env_overrides()
        }
    }

    /// Load config from the default location (project_root/config.yaml)
    pub fn load_from_dir(project_root: &Path) -> Result<Self> {
        Self::load_or_default(&project_root.join("config.yaml"))
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("FRIENDLINK_BASE_URL") {
            self.base_url = url;
        }

        if let Ok(cookie) = std::env::var("FRIENDLINK_SESSION_COOKIE") {
            self.session_cookie = Some(cookie);
        }

        if let Ok(origin) = std::env::var("FRIENDLINK_BACKEND_ORIGIN") {
            self.rewrites = self
                .rewrites
                .iter()
                .map(|r| r.with_origin(&origin))
                .collect::<Result<_>>()?;
        }

        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.port = port;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check URLs and rewrite paths.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)
            .with_context(|| format!("base_url is not an absolute URL: {}", self.base_url))?;

        if !self.add_friend_path.starts_with('/') {
            anyhow::bail!("add_friend_path must start with '/': {}", self.add_friend_path);
        }

        for rewrite in &self.rewrites {
            if !rewrite.source.starts_with('/') {
                anyhow::bail!("Rewrite source must start with '/': {}", rewrite.source);
            }
            Url::parse(&rewrite.destination).with_context(|| {
                format!("Rewrite destination is not a URL: {}", rewrite.destination)
            })?;
        }

        Ok(())
    }

    /// Absolute URL of the add-friend endpoint.
    pub fn endpoint(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("base_url is not an absolute URL: {}", self.base_url))?;
        Ok(base.join(&self.add_friend_path)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            add_friend_path: default_add_friend_path(),
            session_cookie: None,
            request_timeout_seconds: None,
            port: default_port(),
            rewrites: default_rewrites(),
        }
    }
}
