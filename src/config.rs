use crate::error::{PaymentError, Result};
use std::env;
use std::time::Duration;

const DEFAULT_GATEWAY_URL: &str = "https://api.mypayd.app";

/// Connection settings for the HTTP gateway adapter.
///
/// Credentials are never hardcoded; they are read from the environment
/// (loaded from `.env` by the binary via `dotenvy`).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: env::var("SHELFPAY_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            username: require("SHELFPAY_GATEWAY_USERNAME")?,
            password: require("SHELFPAY_GATEWAY_PASSWORD")?,
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).map_err(|_| PaymentError::Config(format!("{name} must be set")))
}

/// Per-attempt request defaults and orchestration limits.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Merchant account username sent with each initiation request.
    pub account_username: String,
    pub network_code: String,
    pub currency: String,
    pub callback_url: String,
    pub narration: String,
    /// Upper bound on the payer-approval wait before the attempt fails.
    pub confirmation_timeout: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            account_username: "shelfshare".to_string(),
            network_code: "63902".to_string(),
            currency: "KES".to_string(),
            callback_url: "https://example.com/callback".to_string(),
            narration: "Payment for goods".to_string(),
            confirmation_timeout: Duration::from_secs(60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PaymentConfig::default();
        assert_eq!(config.currency, "KES");
        assert_eq!(config.network_code, "63902");
        assert_eq!(config.confirmation_timeout, Duration::from_secs(60));
    }
}
