//! Application configuration

use std::env;

use gatherly_tenancy::TenancyConfig;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub public_url: String,

    // Tenancy
    /// Root domains for subdomain-based tenant routing,
    /// e.g. "gatherly.app" for *.gatherly.app
    pub platform_domains: Vec<String>,
    /// Reserved token used when no tenant can be resolved
    pub default_tenant: String,

    // Lead capture
    /// Webhook receiver for captured leads; the route is only mounted when set
    pub lead_webhook_url: Option<String>,
    pub lead_forward_timeout_ms: u64,
    pub lead_forward_attempts: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            // Tenancy
            platform_domains: {
                let raw = env::var("PLATFORM_DOMAINS")
                    .unwrap_or_else(|_| "gatherly.app".to_string());
                let domains: Vec<String> = raw
                    .split(',')
                    .map(|d| d.trim().to_lowercase())
                    .filter(|d| !d.is_empty())
                    .collect();
                if domains.is_empty() {
                    return Err(ConfigError::Invalid(
                        "PLATFORM_DOMAINS must contain at least one domain",
                    ));
                }
                domains
            },
            default_tenant: {
                let tenant = env::var("DEFAULT_TENANT").unwrap_or_else(|_| "default".to_string());
                if tenant.trim().is_empty() {
                    return Err(ConfigError::Invalid("DEFAULT_TENANT must not be empty"));
                }
                tenant
            },

            // Lead capture
            lead_webhook_url: {
                match env::var("LEAD_WEBHOOK_URL").ok().filter(|u| !u.is_empty()) {
                    Some(url) => {
                        if !url.starts_with("http://") && !url.starts_with("https://") {
                            return Err(ConfigError::Invalid(
                                "LEAD_WEBHOOK_URL must be an http(s) URL",
                            ));
                        }
                        Some(url)
                    }
                    None => None,
                }
            },
            lead_forward_timeout_ms: env::var("LEAD_FORWARD_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),
            lead_forward_attempts: env::var("LEAD_FORWARD_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
        })
    }

    /// Tenancy configuration for the resolver, derived from this config.
    pub fn tenancy(&self) -> TenancyConfig {
        TenancyConfig::with_domains(self.platform_domains.clone(), self.default_tenant.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    Invalid(&'static str),
}
