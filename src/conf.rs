use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_listen_port")]
    pub listen_port: String,
    pub database_url: String,
    #[serde(default = "default_pool_max_connections")]
    pub database_pool_max_connections: u32,
    #[serde(default = "default_auth_tokens_path")]
    pub auth_tokens_path: String,
}

fn default_listen_port() -> String {
    "8000".into()
}

fn default_pool_max_connections() -> u32 {
    5
}

fn default_auth_tokens_path() -> String {
    "tokens.yaml".into()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::default())
            .build()?;
        conf.try_deserialize()
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
