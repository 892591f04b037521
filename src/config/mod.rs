use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Parse environment variables into Config struct
        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    // Load the configuration
    let config = Config::load()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_with_default_pool_size() {
        let vars = vec![(
            "DATABASE_URL".to_string(),
            "postgres://localhost/registry".to_string(),
        )];

        let config = envy::from_iter::<_, Config>(vars).unwrap();
        assert_eq!(config.database_url(), "postgres://localhost/registry");
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn honours_explicit_pool_size() {
        let vars = vec![
            (
                "DATABASE_URL".to_string(),
                "postgres://localhost/registry".to_string(),
            ),
            ("MAX_CONNECTIONS".to_string(), "12".to_string()),
        ];

        let config = envy::from_iter::<_, Config>(vars).unwrap();
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn missing_url_is_an_error() {
        let vars: Vec<(String, String)> = Vec::new();
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}
