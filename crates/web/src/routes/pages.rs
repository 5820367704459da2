//! Tenant-facing pages
//!
//! Minimal server-rendered pages for each resolved tenant. In local
//! development these are reached through path rewrites (/acme/dashboard
//! serves /dashboard); in production through tenant subdomains.

use axum::{response::Html, Extension};

use crate::middleware::TenantContext;

fn render(title: &str, heading: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
    <h1>{heading}</h1>
    <p>{body}</p>
</body>
</html>"#
    ))
}

/// Community home page
pub async fn home(Extension(ctx): Extension<TenantContext>) -> Html<String> {
    render(
        &format!("{} · Gatherly", ctx.tenant),
        &ctx.tenant,
        "Welcome to this community.",
    )
}

/// Community dashboard
pub async fn dashboard(Extension(ctx): Extension<TenantContext>) -> Html<String> {
    render(
        &format!("Dashboard · {}", ctx.tenant),
        "Dashboard",
        &format!("Managing the {} community.", ctx.tenant),
    )
}

/// Login page. Auth pages are tenant-neutral and exempt from tenant
/// redirects.
pub async fn login() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Log in · Gatherly</title></head>
<body><h1>Log in</h1></body>
</html>"#,
    )
}

/// Signup page
pub async fn signup() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Sign up · Gatherly</title></head>
<body><h1>Sign up</h1></body>
</html>"#,
    )
}
