//! Tenant resolution for Gatherly
//!
//! This crate decides which tenant (community) an incoming request belongs
//! to, based on hostname, path and a previously persisted cookie:
//! - Subdomains in production: acme.gatherly.app -> tenant "acme"
//! - Path prefixes in local development: localhost:3000/acme -> tenant "acme"
//! - Cookie fallback when neither carries a tenant
//!
//! Resolution is a pure function of the request plus an immutable
//! [`TenancyConfig`]; it never touches a tenant registry and it never fails.
//! The HTTP layer applies the returned [`Directive`] (pass through, rewrite
//! or redirect) and persists the cookie write.

pub mod config;
pub mod host;
pub mod resolver;

pub use config::{TenancyConfig, TENANT_COOKIE};
pub use resolver::{Directive, RequestParts, Resolution, TenantResolver, TenantSource};
