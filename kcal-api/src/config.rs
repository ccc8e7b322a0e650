use std::env;

use dotenv::dotenv;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

pub struct Config {
    pub bind_address: String,
    /// Origin allowed by CORS. Any origin is allowed when unset.
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self {
            bind_address: env::var("KCAL_BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned()),
            allowed_origin: env::var("KCAL_ALLOWED_ORIGIN").ok(),
        }
    }
}
