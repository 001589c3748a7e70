use serde::Deserialize;

pub const DEFAULT_BOOKING_BASE_URL: &str = "https://restful-booker.herokuapp.com";
pub const DEFAULT_JOKE_URL: &str = "https://api.chucknorris.io/jokes/random";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Postgres connection string. When absent the service keeps students in memory.
    pub database_url: Option<String>,
    pub booking_base_url: String,
    pub joke_url: String,
    pub http_timeout_secs: u64,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("DB_URL"))
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })
                .transpose()?,
            booking_base_url: http_url_var("BOOKING_BASE_URL", DEFAULT_BOOKING_BASE_URL)?
                .trim_end_matches('/')
                .to_string(),
            joke_url: http_url_var("JOKE_URL", DEFAULT_JOKE_URL)?,
            http_timeout_secs: positive_var("HTTP_TIMEOUT_SECS", 30)?,
            rate_limit_per_second: positive_var("RATE_LIMIT_PER_SECOND", 10)?,
            rate_limit_burst: positive_var("RATE_LIMIT_BURST", 20)?
                .try_into()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST is too large"))?,
        };

        tracing::info!("Configuration loaded successfully");
        match &config.database_url {
            Some(url) => tracing::debug!("Database URL: {}", redact_database_url(url)),
            None => tracing::debug!("No DATABASE_URL set, using in-memory storage"),
        }
        tracing::debug!("Booking base URL: {}", config.booking_base_url);
        tracing::debug!("Joke URL: {}", config.joke_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn http_url_var(name: &str, default: &str) -> anyhow::Result<String> {
    let value = std::env::var(name).unwrap_or_else(|_| default.to_string());
    validate_http_url(name, &value)?;
    Ok(value)
}

fn positive_var(name: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => anyhow::bail!("{} must be a positive number", name),
            Ok(n) => Ok(n),
        },
        Err(_) => Ok(default),
    }
}

/// Renders a database URL for logs as `scheme://host[:port]/path`, dropping credentials.
pub fn redact_database_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            match parsed.port() {
                Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, parsed.path()),
                None => format!("{}://{}{}", parsed.scheme(), host, parsed.path()),
            }
        }
        Err(_) => "[unparseable database URL]".to_string(),
    }
}

/// Rejects empty values and anything that is not an absolute http(s) URL.
pub fn validate_http_url(name: &str, value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }
    url::Url::parse(value).map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", name, e))?;
    Ok(())
}
