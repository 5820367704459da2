//! Tenant resolution configuration

use serde::Deserialize;

/// Cookie used to persist the resolved tenant on the client.
pub const TENANT_COOKIE: &str = "tenantId";

/// Immutable configuration consumed by [`crate::TenantResolver`].
///
/// Constructed once at startup and passed into the resolver; tests substitute
/// their own instances instead of patching global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TenancyConfig {
    /// Reserved token used when no tenant can be resolved.
    pub default_tenant: String,

    /// Root domains under which subdomain routing is enforced in production,
    /// in match order (e.g. "gatherly.app" for *.gatherly.app routing).
    pub platform_domains: Vec<String>,

    /// Path-leading segments that can never be interpreted as a tenant.
    pub reserved_segments: Vec<String>,

    /// Paths exempt from forced tenant redirects.
    pub auth_paths: Vec<String>,

    /// Path prefixes served without any tenant logic (static assets,
    /// API routes, well-known URIs).
    pub bypass_prefixes: Vec<String>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            default_tenant: "default".to_string(),
            platform_domains: vec!["gatherly.app".to_string()],
            reserved_segments: vec![
                "api".to_string(),
                "_internal".to_string(),
                "login".to_string(),
                "signup".to_string(),
                "dashboard".to_string(),
            ],
            auth_paths: vec!["/login".to_string(), "/signup".to_string()],
            bypass_prefixes: vec![
                "/_internal".to_string(),
                "/api".to_string(),
                "/.well-known".to_string(),
                "/favicon.ico".to_string(),
                "/assets".to_string(),
                "/public".to_string(),
            ],
        }
    }
}

impl TenancyConfig {
    /// Production defaults with the platform domains and default tenant
    /// swapped in from deployment configuration.
    pub fn with_domains(platform_domains: Vec<String>, default_tenant: String) -> Self {
        Self {
            default_tenant,
            platform_domains,
            ..Self::default()
        }
    }

    /// Whether a path is served without any tenant logic.
    pub fn is_bypassed(&self, path: &str) -> bool {
        self.bypass_prefixes.iter().any(|p| path.starts_with(p))
    }

    /// Whether a path is exempt from forced tenant redirects.
    pub fn is_auth_path(&self, path: &str) -> bool {
        self.auth_paths.iter().any(|p| p == path)
    }

    /// Whether a path segment is reserved and can never name a tenant.
    pub fn is_reserved_segment(&self, segment: &str) -> bool {
        self.reserved_segments.iter().any(|s| s == segment)
    }
}
