//! Client Configuration
//!
//! Backend base URL, bearer token, display timezone and console log level.
//! Values are baked in at build time through `option_env!`; on native targets
//! the process environment is consulted as well.

use chrono_tz::Tz;
use log::{info, warn, LevelFilter};

use crate::week;

pub const API_BASE_URL_VAR: &str = "MEAL_PLANNER_API_BASE_URL";
pub const API_KEY_VAR: &str = "MEAL_PLANNER_API_KEY";
pub const TIMEZONE_VAR: &str = "MEAL_PLANNER_TIMEZONE";
pub const LOG_VAR: &str = "MEAL_PLANNER_LOG";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_API_KEY: &str = "api-key";
const DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub timezone: Tz,
    pub log_level: LevelFilter,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            timezone: Tz::UTC,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl ClientConfig {
    pub fn from_build_env() -> Self {
        Self::from_lookup(build_env)
    }

    /// Log level only, so the logger can be installed before the rest of the
    /// configuration is read (and reported)
    pub fn build_log_level() -> LevelFilter {
        parse_log_level(build_env(LOG_VAR).as_deref())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = load(&lookup, API_BASE_URL_VAR, DEFAULT_BASE_URL);
        let api_key = lookup(API_KEY_VAR).filter(|key| !key.is_empty()).unwrap_or_else(|| {
            warn!("{API_KEY_VAR} not set, using the development key");
            DEFAULT_API_KEY.to_string()
        });
        let timezone = week::resolve_timezone(&load(&lookup, TIMEZONE_VAR, DEFAULT_TIMEZONE));
        let log_level = parse_log_level(lookup(LOG_VAR).as_deref());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timezone,
            log_level,
        }
    }
}

fn build_env(key: &str) -> Option<String> {
    let baked = match key {
        API_BASE_URL_VAR => option_env!("MEAL_PLANNER_API_BASE_URL"),
        API_KEY_VAR => option_env!("MEAL_PLANNER_API_KEY"),
        TIMEZONE_VAR => option_env!("MEAL_PLANNER_TIMEZONE"),
        LOG_VAR => option_env!("MEAL_PLANNER_LOG"),
        _ => None,
    };
    baked.map(str::to_string).or_else(|| std::env::var(key).ok())
}

fn load(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}

fn parse_log_level(value: Option<&str>) -> LevelFilter {
    match value {
        None => DEFAULT_LOG_LEVEL,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {LOG_VAR} value '{raw}', using {DEFAULT_LOG_LEVEL}");
            DEFAULT_LOG_LEVEL
        }),
    }
}
