use std::time::Duration;

use url::Url;
use worker::Env;

use crate::error::ProxyError;

pub const FEED_URL_KEY: &str = "OFFER_FEED_URL";
pub const USER_ID_KEY: &str = "OFFER_USER_ID";
pub const API_KEY_KEY: &str = "OFFER_API_KEY";
pub const TRACKING_TAG_KEY: &str = "OFFER_TRACKING_TAG";
pub const TIMEOUT_KEY: &str = "OFFER_TIMEOUT_MS";

const DEFAULT_TRACKING_TAG: &str = "offer-proxy";
const DEFAULT_TIMEOUT_MS: u64 = 8000;

/// Offer feed settings, built once per request from the Worker env.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub base_url: Url,
    pub user_id: String,
    pub api_key: String,
    pub tracking_tag: String,
    pub timeout: Duration,
}

impl FeedConfig {
    /// Reads every key as a secret first, then as a plain var.
    pub fn from_env(env: &Env) -> Result<Self, ProxyError> {
        Self::from_lookup(|key| {
            env.secret(key)
                .map(|s| s.to_string())
                .or_else(|_| env.var(key).map(|v| v.to_string()))
                .ok()
        })
    }

    /// Builds the config from any key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProxyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ProxyError::MissingConfig(key));

        let raw_url = require(FEED_URL_KEY)?;
        let base_url = Url::parse(&raw_url).map_err(|e| ProxyError::InvalidConfig {
            key: FEED_URL_KEY,
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ProxyError::InvalidConfig {
                key: FEED_URL_KEY,
                reason: format!("unsupported scheme {}", base_url.scheme()),
            });
        }

        let timeout_ms = match get(TIMEOUT_KEY) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|&ms| ms > 0)
                .ok_or_else(|| ProxyError::InvalidConfig {
                    key: TIMEOUT_KEY,
                    reason: format!("expected a positive number of milliseconds, got {raw:?}"),
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            user_id: require(USER_ID_KEY)?,
            api_key: require(API_KEY_KEY)?,
            tracking_tag: get(TRACKING_TAG_KEY)
                .unwrap_or_else(|| DEFAULT_TRACKING_TAG.to_string()),
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}
