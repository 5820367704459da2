//! Tenant Resolution Middleware
//!
//! Runs on every request: resolves the tenant from hostname, path and the
//! tenant cookie, then applies the resolver's directive:
//! - Pass-through: forward unchanged
//! - Rewrite: serve a different internal path (visible URL unchanged)
//! - Redirect: 307 to the tenant's canonical URL
//!
//! The resolved tenant is exposed to handlers as a [`TenantContext`] request
//! extension, and persisted on the response via the `tenantId` cookie when it
//! changed.

use axum::{
    body::Body,
    extract::State,
    http::{header, uri::PathAndQuery, HeaderMap, HeaderValue, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use gatherly_tenancy::{Directive, RequestParts, TenantSource, TENANT_COOKIE};

use crate::{
    cookies::{self, CookieOptions},
    state::AppState,
};

/// Resolved tenant for the current request, available to handlers as a
/// request extension.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant: String,
    pub source: TenantSource,
}

/// Middleware resolving the tenant and applying the routing decision.
pub async fn tenant_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    let path = request.uri().path().to_string();
    let cookie_tenant = cookies::read_cookie(request.headers(), TENANT_COOKIE);

    let resolution = state.resolver.resolve(RequestParts {
        host: &host,
        path: &path,
        cookie_tenant: cookie_tenant.as_deref(),
    });

    match resolution.directive {
        Directive::Redirect { location } => {
            // The resolver decides on the path alone; carry the query along.
            let location = match request.uri().query() {
                Some(query) if !location.contains('?') => format!("{location}?{query}"),
                _ => location,
            };
            tracing::debug!(host = %host, path = %path, location = %location, "tenant redirect");
            return Redirect::temporary(&location).into_response();
        }
        Directive::Rewrite { path: internal_path } => {
            match rewritten_uri(request.uri(), &internal_path) {
                Some(uri) => *request.uri_mut() = uri,
                // Fail open: serve the original path rather than erroring.
                None => tracing::warn!(
                    path = %internal_path,
                    "rewrite produced an invalid URI, serving original path"
                ),
            }
        }
        Directive::PassThrough => {}
    }

    request.extensions_mut().insert(TenantContext {
        tenant: resolution.tenant,
        source: resolution.source,
    });

    let mut response = next.run(request).await;
    if let Some(tenant) = resolution.set_cookie {
        append_tenant_cookie(response.headers_mut(), &tenant);
    }
    response
}

/// Swap the path of a request URI, preserving the query string.
fn rewritten_uri(uri: &Uri, new_path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{new_path}?{query}"),
        None => new_path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}

fn append_tenant_cookie(headers: &mut HeaderMap, tenant: &str) {
    let cookie = cookies::build_set_cookie(TENANT_COOKIE, tenant, &CookieOptions::default());
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            headers.append(header::SET_COOKIE, value);
        }
        Err(_) => {
            tracing::warn!(tenant = %tenant, "tenant not representable as a cookie value, skipping write");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Extension, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    use crate::config::Config;

    fn test_config() -> Config {
        Config {
            bind_address: "127.0.0.1:0".to_string(),
            public_url: "http://localhost:3000".to_string(),
            platform_domains: vec!["gatherly.app".to_string()],
            default_tenant: "default".to_string(),
            lead_webhook_url: None,
            lead_forward_timeout_ms: 1000,
            lead_forward_attempts: 1,
        }
    }

    async fn show_tenant(Extension(ctx): Extension<TenantContext>) -> String {
        format!("home:{}", ctx.tenant)
    }

    async fn show_dashboard(
        Extension(ctx): Extension<TenantContext>,
        uri: Uri,
    ) -> String {
        format!("dashboard:{}:{}", ctx.tenant, uri.query().unwrap_or(""))
    }

    async fn show_login() -> &'static str {
        "login"
    }

    async fn stylesheet() -> &'static str {
        "css"
    }

    fn app() -> Router {
        let state = AppState::new(test_config());
        Router::new()
            .route("/", get(show_tenant))
            .route("/dashboard", get(show_dashboard))
            .route("/login", get(show_login))
            .route("/assets/app.css", get(stylesheet))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                tenant_middleware,
            ))
            .with_state(state)
    }

    fn request(uri: &str, host: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri).header("Host", host);
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn subdomain_request_resolves_tenant_and_sets_cookie() {
        let response = app()
            .oneshot(request("/", "acme.gatherly.app", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Set-Cookie").unwrap(),
            "tenantId=acme; Path=/; SameSite=Lax"
        );
        assert_eq!(body_string(response).await, "home:acme");
    }

    #[tokio::test]
    async fn apex_request_with_cookie_redirects_to_subdomain() {
        let response = app()
            .oneshot(request("/dashboard", "gatherly.app", Some("tenantId=acme")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "https://acme.gatherly.app/dashboard"
        );
        assert!(response.headers().get("Set-Cookie").is_none());
    }

    #[tokio::test]
    async fn local_path_tenant_is_rewritten_not_redirected() {
        let response = app()
            .oneshot(request("/acme/dashboard", "localhost:3000", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Set-Cookie").unwrap(),
            "tenantId=acme; Path=/; SameSite=Lax"
        );
        assert_eq!(body_string(response).await, "dashboard:acme:");
    }

    #[tokio::test]
    async fn rewrite_preserves_query_string() {
        let response = app()
            .oneshot(request(
                "/acme/dashboard?tab=members",
                "localhost:3000",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "dashboard:acme:tab=members");
    }

    #[tokio::test]
    async fn local_auth_path_is_not_force_redirected() {
        let response = app()
            .oneshot(request("/login", "localhost:3000", Some("tenantId=acme")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("Set-Cookie").is_none());
        assert_eq!(body_string(response).await, "login");
    }

    #[tokio::test]
    async fn redirect_preserves_query_string() {
        let response = app()
            .oneshot(request(
                "/dashboard?tab=members",
                "gatherly.app",
                Some("tenantId=acme"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "https://acme.gatherly.app/dashboard?tab=members"
        );
    }

    #[tokio::test]
    async fn local_cookie_tenant_is_redirected_to_path_prefix() {
        let response = app()
            .oneshot(request(
                "/dashboard",
                "localhost:3000",
                Some("tenantId=acme"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "/acme/dashboard"
        );
    }

    #[tokio::test]
    async fn static_assets_bypass_tenant_logic() {
        let response = app()
            .oneshot(request(
                "/assets/app.css",
                "gatherly.app",
                Some("tenantId=acme"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("Set-Cookie").is_none());
        assert_eq!(body_string(response).await, "css");
    }

    #[tokio::test]
    async fn no_redundant_cookie_write_once_persisted() {
        let response = app()
            .oneshot(request("/", "acme.gatherly.app", Some("tenantId=acme")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("Set-Cookie").is_none());
        assert_eq!(body_string(response).await, "home:acme");
    }

    #[tokio::test]
    async fn missing_host_header_falls_back_to_default_tenant() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "home:default");
    }
}
