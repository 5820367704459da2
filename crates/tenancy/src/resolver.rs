//! Tenant Resolver
//!
//! Resolves an incoming request to a tenant and decides how the request
//! should be served:
//! - Pass through unchanged
//! - Rewrite the served path (local development, path-based tenants)
//! - Redirect to the tenant's canonical URL (production subdomains)
//!
//! Exactly one outcome is produced per request and the resolved tenant is
//! never empty; unparseable hostnames resolve as non-platform, non-local and
//! the request passes through on the default tenant.

use crate::config::TenancyConfig;
use crate::host;

/// Request-scoped inputs to resolution. Read-only.
#[derive(Debug, Clone, Copy)]
pub struct RequestParts<'a> {
    /// Host header value, possibly with a port ("acme.gatherly.app:443").
    pub host: &'a str,
    /// URL path, without query string ("/dashboard").
    pub path: &'a str,
    /// Value of the tenant cookie from a previous response, if any.
    pub cookie_tenant: Option<&'a str>,
}

/// How the tenant was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantSource {
    /// Leftmost hostname label on a platform domain.
    Subdomain,
    /// First path segment in a local environment.
    PathSegment,
    /// Persisted tenant cookie.
    Cookie,
    /// Reserved default token; nothing else matched.
    DefaultToken,
}

/// Routing decision for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Serve the request as-is.
    PassThrough,
    /// Serve a different internal path; the visible URL is unchanged.
    Rewrite { path: String },
    /// Send the client to another URL (absolute or path-relative).
    Redirect { location: String },
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved tenant token. Never empty.
    pub tenant: String,
    /// Where the tenant came from.
    pub source: TenantSource,
    /// Tenant value to persist on the response, when it differs from the
    /// incoming cookie.
    pub set_cookie: Option<String>,
    /// How the request should be served.
    pub directive: Directive,
}

/// Per-request tenant resolution over an immutable configuration.
///
/// Resolution is purely syntactic: any non-reserved subdomain label or path
/// segment is accepted as a tenant without consulting a registry.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    config: TenancyConfig,
}

impl TenantResolver {
    pub fn new(config: TenancyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TenancyConfig {
        &self.config
    }

    /// Resolve one request. Pure and infallible: worst case the request
    /// passes through on the default tenant.
    pub fn resolve(&self, parts: RequestParts<'_>) -> Resolution {
        // Static assets and reserved prefixes skip tenant logic entirely.
        if self.config.is_bypassed(parts.path) {
            return Resolution {
                tenant: self.config.default_tenant.clone(),
                source: TenantSource::DefaultToken,
                set_cookie: None,
                directive: Directive::PassThrough,
            };
        }

        let is_local = host::is_local_host(parts.host);
        let platform = host::platform_root(parts.host, &self.config.platform_domains);
        let subdomain = host::subdomain_label(parts.host);
        let path_candidate = first_segment(parts.path)
            .filter(|segment| !self.config.is_reserved_segment(segment));
        let cookie_tenant = parts.cookie_tenant.filter(|value| !value.is_empty());

        // Precedence: platform subdomain, then local path segment, then the
        // persisted cookie, then the default token.
        let subdomain_tenant = if !is_local && platform.is_some() {
            subdomain.clone()
        } else {
            None
        };
        let path_tenant = if is_local {
            path_candidate.map(str::to_string)
        } else {
            None
        };
        let (tenant, source) = subdomain_tenant
            .map(|label| (label, TenantSource::Subdomain))
            .or_else(|| path_tenant.map(|segment| (segment, TenantSource::PathSegment)))
            .or_else(|| {
                cookie_tenant.map(|value| (value.to_string(), TenantSource::Cookie))
            })
            .unwrap_or_else(|| {
                (
                    self.config.default_tenant.clone(),
                    TenantSource::DefaultToken,
                )
            });

        let set_cookie = if cookie_tenant != Some(tenant.as_str()) {
            Some(tenant.clone())
        } else {
            None
        };

        let directive = if is_local && path_candidate.is_some() {
            // Strip the leading tenant segment; the visible URL is unchanged.
            Directive::Rewrite {
                path: strip_first_segment(parts.path),
            }
        } else if let (false, Some(root)) = (is_local, platform) {
            if !self.config.is_auth_path(parts.path)
                && subdomain.is_none()
                && tenant != self.config.default_tenant
            {
                // Apex request with a known tenant: send it to the subdomain.
                Directive::Redirect {
                    location: format!("https://{tenant}.{root}{path}", path = parts.path),
                }
            } else {
                Directive::PassThrough
            }
        } else if is_local
            && tenant != self.config.default_tenant
            && path_candidate.is_none()
            && !self.config.is_auth_path(parts.path)
        {
            Directive::Redirect {
                location: format!("/{tenant}{path}", path = parts.path),
            }
        } else {
            Directive::PassThrough
        };

        tracing::debug!(
            host = parts.host,
            path = parts.path,
            tenant = %tenant,
            source = ?source,
            directive = ?directive,
            "resolved tenant"
        );

        Resolution {
            tenant,
            source,
            set_cookie,
            directive,
        }
    }
}

/// First path segment, if any. "/acme/dashboard" -> Some("acme"); "/" -> None.
fn first_segment(path: &str) -> Option<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.split('/').next() {
        Some(segment) if !segment.is_empty() => Some(segment),
        _ => None,
    }
}

/// Drop the leading segment: "/acme/dashboard" -> "/dashboard"; "/acme" -> "/".
fn strip_first_segment(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => format!("/{rest}"),
        _ => "/".to_string(),
    }
}
