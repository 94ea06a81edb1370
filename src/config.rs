use serde::Deserialize;

/// Upload limit of the current deployment (2 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("DB_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| validate_database_url(&url).map(|_| url))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|s| parse_upload_limit(&s))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Database: {}", database_host(&config.database_url));
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Max upload size: {} bytes", config.max_upload_bytes);

        Ok(config)
    }
}

fn validate_database_url(url: &str) -> anyhow::Result<()> {
    if url.trim().is_empty() {
        anyhow::bail!("DATABASE_URL cannot be empty");
    }
    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
    }
    Ok(())
}

/// Scheme and host part of a connection URL, with credentials dropped.
fn database_host(url: &str) -> String {
    let (scheme, rest) = url.split_once("://").unwrap_or(("", url));
    let host = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
    format!("{}://{}", scheme, host)
}

fn parse_upload_limit(raw: &str) -> anyhow::Result<usize> {
    let limit: usize = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_BYTES must be a positive number of bytes"))?;
    if limit == 0 {
        anyhow::bail!("MAX_UPLOAD_BYTES must be greater than zero");
    }
    Ok(limit)
}
