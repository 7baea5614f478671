use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use notes_client::NotesClient;
use notes_store::StoreConfig;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Option<Duration>,
    pub max_subscribers: usize,
}

impl Config {
    /// Load configuration from environment variables, letting flags override them.
    pub fn from_env(api_url: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let api_url = match api_url {
            Some(url) => url,
            None => env::var("NOTES_API_URL")
                .context("NOTES_API_URL must be set (or pass --api-url)")?,
        };

        let timeout_secs = match timeout_secs {
            Some(secs) => Some(secs),
            None => env::var("NOTES_API_TIMEOUT_SECS")
                .ok()
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("NOTES_API_TIMEOUT_SECS must be a number of seconds")?,
        };

        let max_subscribers = env::var("NOTES_MAX_SUBSCRIBERS")
            .ok()
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("NOTES_MAX_SUBSCRIBERS must be a valid number")?
            .unwrap_or(StoreConfig::default().max_subscribers);

        Ok(Self {
            api_url,
            timeout: timeout_secs.map(Duration::from_secs),
            max_subscribers,
        })
    }

    pub fn client(&self) -> Result<NotesClient> {
        let client = NotesClient::new(&self.api_url);
        match self.timeout {
            Some(timeout) => client
                .with_timeout(timeout)
                .context("Failed to configure notes API client"),
            None => Ok(client),
        }
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            max_subscribers: self.max_subscribers,
        }
    }
}
