use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Which key-value store implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    DynamoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(StoreBackend::DynamoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND must be one of: dynamodb, memory, got '{}'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::DynamoDb => f.write_str("dynamodb"),
            StoreBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Names of the provisioned resources the dispatcher works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resources {
    pub table_name: String,
    /// Object store bucket. Provisioned alongside the table but not touched by any operation yet.
    pub bucket_name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
    pub bucket_name: String,
    pub store_backend: StoreBackend,
    pub aws_endpoint_url: Option<String>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment overrides from {}", path.display());
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup("TABLE_NAME")
            .filter(|v| !v.is_empty())
            .context("TABLE_NAME environment variable is required")?;

        let bucket_name = lookup("BUCKET_NAME")
            .filter(|v| !v.is_empty())
            .context("BUCKET_NAME environment variable is required")?;

        let store_backend = lookup("STORE_BACKEND")
            .unwrap_or_else(|| "dynamodb".to_string())
            .parse::<StoreBackend>()?;

        let aws_endpoint_url = lookup("AWS_ENDPOINT_URL").filter(|v| !v.is_empty());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            table_name,
            bucket_name,
            store_backend,
            aws_endpoint_url,
            service_port,
            service_host,
        })
    }

    pub fn resources(&self) -> Resources {
        Resources {
            table_name: self.table_name.clone(),
            bucket_name: self.bucket_name.clone(),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Store backend: {}", self.store_backend);
        tracing::info!("  Table: {}", self.table_name);
        tracing::info!("  Bucket: {}", self.bucket_name);
        tracing::info!(
            "  AWS endpoint: {}",
            self.aws_endpoint_url.as_deref().unwrap_or("default (using AWS)")
        );
        tracing::info!("  Service listening on: {}", self.listen_addr());
    }
}
