pub mod toml_config;

use crate::adapters::google_search::DEFAULT_ENDPOINT;
use crate::core::SearchSettings;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_SITE_DOMAIN: &str = "bigbasket.com";
pub const DEFAULT_FALLBACK_TITLE: &str = "Unknown Product";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_ENGINE_ID: &str = "CSE_ID";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "barcode-lookup")]
#[command(about = "HTTP service resolving product barcodes through an image search API")]
pub struct ServerArgs {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind, overrides HOST
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides PORT
    #[arg(short, long)]
    pub port: Option<u16>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Search settings, built once at startup and shared read-only.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub api_key: String,
    pub engine_id: String,
    pub endpoint: String,
    pub site_domain: String,
    pub fallback_title: String,
    pub request_timeout_seconds: Option<u64>,
}

// The API key stays out of logs.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"<redacted>")
            .field("engine_id", &self.engine_id)
            .field("endpoint", &self.endpoint)
            .field("site_domain", &self.site_domain)
            .field("fallback_title", &self.fallback_title)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    /// Builds the configuration from the process environment, the optional
    /// TOML file named by `--config`, and the CLI flags.
    pub fn load(args: &ServerArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        Self::from_sources(args, &file, |key| std::env::var(key).ok())
    }

    /// Precedence: CLI flag, then environment, then file, then default.
    pub fn from_sources<F>(args: &ServerArgs, file: &TomlConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_server = file.server();
        let file_search = file.search();
        let env = |key: &str| env(key).filter(|value| !value.is_empty());

        let port = match (args.port, env("PORT")) {
            (Some(port), _) => port,
            (None, Some(raw)) => raw.parse().map_err(|_| LookupError::InvalidConfigValueError {
                field: "PORT".to_string(),
                value: raw.clone(),
                reason: "Expected a port number".to_string(),
            })?,
            (None, None) => file_server.port.unwrap_or(DEFAULT_PORT),
        };

        let host = args
            .host
            .clone()
            .or_else(|| env("HOST"))
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let api_key = env(ENV_API_KEY).or(file_search.api_key);
        let engine_id = env(ENV_ENGINE_ID).or(file_search.engine_id);

        let request_timeout_seconds = match env("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => Some(raw.parse().map_err(|_| LookupError::InvalidConfigValueError {
                field: "REQUEST_TIMEOUT_SECONDS".to_string(),
                value: raw.clone(),
                reason: "Expected a number of seconds".to_string(),
            })?),
            None => file_search.request_timeout_seconds,
        };

        let search = SearchConfig {
            api_key: validation::validate_required_field(ENV_API_KEY, &api_key)?.clone(),
            engine_id: validation::validate_required_field(ENV_ENGINE_ID, &engine_id)?.clone(),
            endpoint: env("SEARCH_ENDPOINT")
                .or(file_search.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            site_domain: env("SEARCH_SITE_DOMAIN")
                .or(file_search.site_domain)
                .unwrap_or_else(|| DEFAULT_SITE_DOMAIN.to_string()),
            fallback_title: env("FALLBACK_TITLE")
                .or(file_search.fallback_title)
                .unwrap_or_else(|| DEFAULT_FALLBACK_TITLE.to_string()),
            request_timeout_seconds,
        };

        Ok(Self {
            server: ServerConfig { host, port },
            search,
        })
    }
}

fn reject_unresolved_placeholder(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(LookupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Unresolved ${VAR} placeholder; is the variable exported?".to_string(),
        });
    }
    Ok(())
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string(ENV_API_KEY, &self.api_key)?;
        reject_unresolved_placeholder(ENV_API_KEY, &self.api_key)?;
        validation::validate_non_empty_string(ENV_ENGINE_ID, &self.engine_id)?;
        reject_unresolved_placeholder(ENV_ENGINE_ID, &self.engine_id)?;

        validation::validate_url("search.endpoint", &self.endpoint)?;
        validation::validate_site_domain("search.site_domain", &self.site_domain)?;
        validation::validate_non_empty_string("search.fallback_title", &self.fallback_title)?;

        if let Some(seconds) = self.request_timeout_seconds {
            validation::validate_range("search.request_timeout_seconds", seconds, 1, 300)?;
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        if self.server.port == 0 {
            return Err(LookupError::InvalidConfigValueError {
                field: "server.port".to_string(),
                value: "0".to_string(),
                reason: "Port must be at least 1".to_string(),
            });
        }
        if self.server.host.chars().any(char::is_whitespace) {
            return Err(LookupError::InvalidConfigValueError {
                field: "server.host".to_string(),
                value: self.server.host.clone(),
                reason: "Host cannot contain whitespace".to_string(),
            });
        }

        self.search.validate()?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}

impl SearchSettings for SearchConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn engine_id(&self) -> &str {
        &self.engine_id
    }

    fn site_domain(&self) -> &str {
        &self.site_domain
    }

    fn fallback_title(&self) -> &str {
        &self.fallback_title
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}
