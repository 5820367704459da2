//! Lead capture
//!
//! Public contact/interest form endpoint. Submissions pass a honeypot check
//! and are forwarded to an external webhook receiver; nothing is persisted
//! here.

use std::time::Duration;

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use gatherly_tenancy::TENANT_COOKIE;

use crate::{
    cookies,
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Honeypot field. Hidden in the form; humans leave it empty.
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub status: &'static str,
    pub id: Uuid,
}

/// Payload forwarded to the webhook receiver.
#[derive(Debug, Serialize)]
struct LeadForward<'a> {
    id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    submitted_at: OffsetDateTime,
    tenant: &'a str,
    name: &'a str,
    email: &'a str,
    company: Option<&'a str>,
    message: Option<&'a str>,
}

/// Submit a lead from a tenant site contact form
pub async fn submit_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LeadRequest>,
) -> ApiResult<(StatusCode, Json<LeadResponse>)> {
    let id = Uuid::new_v4();

    // Honeypot tripped: acknowledge like a success so bots can't tell,
    // but never forward.
    if !req.website.trim().is_empty() {
        tracing::info!(lead_id = %id, "honeypot tripped, dropping lead");
        return Ok((
            StatusCode::ACCEPTED,
            Json(LeadResponse {
                status: "accepted",
                id,
            }),
        ));
    }

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    let email = req.email.trim();
    if !is_plausible_email(email) {
        return Err(ApiError::Validation("a valid email is required".to_string()));
    }

    // The route is only mounted when the receiver is configured.
    let Some(webhook_url) = state.config.lead_webhook_url.as_deref() else {
        tracing::error!("lead route invoked without a configured webhook receiver");
        return Err(ApiError::Internal);
    };

    // Lead routes live under the /api bypass prefix, so tenant attribution
    // comes straight from the persisted cookie.
    let tenant = cookies::read_cookie(&headers, TENANT_COOKIE)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| state.config.default_tenant.clone());

    let payload = LeadForward {
        id,
        submitted_at: OffsetDateTime::now_utc(),
        tenant: &tenant,
        name,
        email,
        company: req.company.as_deref(),
        message: req.message.as_deref(),
    };

    forward_lead(&state, webhook_url, &payload).await?;
    tracing::info!(lead_id = %id, tenant = %tenant, "lead forwarded");

    Ok((
        StatusCode::ACCEPTED,
        Json(LeadResponse {
            status: "accepted",
            id,
        }),
    ))
}

/// Forward a lead to the webhook receiver with bounded retries.
async fn forward_lead(
    state: &AppState,
    webhook_url: &str,
    payload: &LeadForward<'_>,
) -> Result<(), ApiError> {
    use tokio_retry::strategy::{jitter, ExponentialBackoff};
    use tokio_retry::Retry;

    let retry_strategy = ExponentialBackoff::from_millis(200)
        .max_delay(Duration::from_secs(2))
        .take(state.config.lead_forward_attempts.saturating_sub(1))
        .map(jitter);
    let timeout = Duration::from_millis(state.config.lead_forward_timeout_ms);

    Retry::spawn(retry_strategy, || async {
        let response = state
            .http
            .post(webhook_url)
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "lead forward attempt failed");
                ApiError::UpstreamUnavailable
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            tracing::warn!(status = %response.status(), "lead webhook returned an error");
            Err(ApiError::UpstreamUnavailable)
        }
    })
    .await
}

/// Cheap plausibility check; the webhook receiver does the real validation.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}
