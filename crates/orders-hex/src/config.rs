use serde::{Deserialize, Serialize};
use std::env;
use utoipa::ToSchema;

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome to the Order System";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: Option<String>,
    pub profile: ProfileInfo,
}

/// Values reported by `GET /api/config/profile`, fixed at process start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub active_profile: String,
    pub welcome_message: String,
}

impl Default for ProfileInfo {
    fn default() -> Self {
        Self {
            active_profile: DEFAULT_PROFILE.into(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.into(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let server_port = env::var("SERVER_PORT").unwrap_or_else(|_| "3000".into());
        let database_url = env::var("DATABASE_URL").ok();
        let active_profile = env::var("APP_PROFILE").unwrap_or_else(|_| DEFAULT_PROFILE.into());
        let welcome_message =
            env::var("APP_WELCOME_MESSAGE").unwrap_or_else(|_| DEFAULT_WELCOME_MESSAGE.into());
        Ok(Self {
            server_port,
            database_url,
            profile: ProfileInfo {
                active_profile,
                welcome_message,
            },
        })
    }
}
