use crate::config::redis::RedisConfig;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub card_encryption_secret: String,
    pub redis: RedisConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("Missing env: DATABASE_URL")?;
        let card_encryption_secret = std::env::var("CARD_ENCRYPTION_SECRET")
            .context("Missing env: CARD_ENCRYPTION_SECRET")?;

        let redis_host = std::env::var("REDIS_HOST").context("Missing env: REDIS_HOST")?;
        let redis_port = std::env::var("REDIS_PORT")
            .context("Missing env: REDIS_PORT")?
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;
        let redis_db = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;
        let redis_password = std::env::var("REDIS_PASSWORD").ok();

        Ok(Self {
            database_url,
            card_encryption_secret,
            redis: RedisConfig::new(redis_host, redis_port, redis_db, redis_password),
        })
    }
}
