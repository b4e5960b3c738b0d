use std::env;

use anyhow::Context;

use crate::app::hash_admin_token;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Host this instance is served from
    pub host: String,
    /// Domain used in account handles; falls back to `host`
    pub account_domain: String,
    /// SHA-256 hex digest of the admin bearer token
    pub admin_token_hash: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").context("HOST must be set")?;
        let account_domain = env::var("ACCOUNT_DOMAIN")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| host.clone());
        let admin_token = env::var("ADMIN_TOKEN").context("ADMIN_TOKEN must be set")?;
        let port = match env::var("PORT") {
            Ok(p) => p
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", p))?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            host,
            account_domain,
            admin_token_hash: hash_admin_token(&admin_token),
            port,
        })
    }
}
