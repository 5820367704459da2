//! Hostname classification helpers
//!
//! Small pure functions over untrusted Host header values. Every parse
//! degrades to "no match"; none of these can fail.

/// Normalize a host header value: strip the port, lowercase.
pub fn normalize_host(host: &str) -> String {
    let host = host.split(':').next().unwrap_or(host);
    host.to_lowercase()
}

/// Whether the host names a local development environment
/// (localhost or a dotted-quad IP literal).
pub fn is_local_host(host: &str) -> bool {
    let host = normalize_host(host);
    host.starts_with("localhost") || is_dotted_quad(&host)
}

/// Dotted-quad pattern check (four 1-3 digit groups). Pattern only; octet
/// ranges are not validated.
fn is_dotted_quad(host: &str) -> bool {
    let parts: Vec<&str> = host.split('.').collect();
    parts.len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.len() <= 3 && p.chars().all(|c| c.is_ascii_digit()))
}

/// The registrable parent domain: all labels except the leftmost.
///
/// Returns `None` when the host has fewer than two labels. This computation
/// is deliberately naive: it drops exactly one label, so multi-label public
/// suffixes ("example.co.uk" -> "co.uk") are mis-resolved. Known limitation,
/// kept for parity with how platform domains are configured.
pub fn registrable_parent(host: &str) -> Option<String> {
    let host = normalize_host(host);
    let (_, parent) = host.split_once('.')?;
    if parent.is_empty() {
        None
    } else {
        Some(parent.to_string())
    }
}

/// The leftmost label, only when the host has a genuine subdomain
/// (3+ labels). "acme.gatherly.app" -> Some("acme"); "gatherly.app" -> None.
pub fn subdomain_label(host: &str) -> Option<String> {
    let host = normalize_host(host);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 3 || labels.iter().any(|l| l.is_empty()) {
        return None;
    }
    Some(labels[0].to_string())
}

/// The platform root domain this host falls under, if any.
///
/// Matches when the host is the domain itself or any subdomain of it.
/// Checked in configuration order; first match wins.
pub fn platform_root<'a>(host: &str, platform_domains: &'a [String]) -> Option<&'a str> {
    let host = normalize_host(host);
    platform_domains
        .iter()
        .find(|domain| host == **domain || host.ends_with(&format!(".{domain}")))
        .map(String::as_str)
}
