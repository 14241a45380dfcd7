//! Bearer-token acquisition
//!
//! Every call is a fresh login round-trip; tokens are never cached, so
//! call sites that need admin authority twice pay two logins.

use serde_json::{json, Value};

use crate::client::{ApiClient, ApiRequest};
use crate::error::{ApiError, ApiResult};
use storecheck_common::SuiteConfig;

/// Log in with the configured admin credentials and return the `token`
/// field of the response body.
///
/// Trusts the server's 200: when the body carries no `token`, the
/// returned credential is the literal `null` rendering, which becomes a
/// malformed `Bearer null` header downstream and surfaces there as 401.
/// This helper is not a credential validator.
pub async fn admin_token(client: &ApiClient, config: &SuiteConfig) -> ApiResult<String> {
    let payload = json!({
        "username": config.admin.admin_username,
        "password": config.admin.admin_password,
    });
    let response = client
        .send(
            ApiRequest::post(&config.end_points.login_endpoint)
                .header("Content-Type", "application/json")
                .json(payload),
        )
        .await?;

    let data = response.json()?;
    Ok(render_token(data.get("token")))
}

/// Log in as a specific (usually fixture-created) account. Unlike the
/// admin path, a missing token here is an error: the caller named an
/// account and expects a usable credential back.
pub async fn user_token(
    client: &ApiClient,
    config: &SuiteConfig,
    username: &str,
    password: &str,
) -> ApiResult<String> {
    let payload = json!({"username": username, "password": password});
    let response = client
        .send(
            ApiRequest::post(&config.end_points.login_endpoint)
                .header("Content-Type", "application/json")
                .json(payload),
        )
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Auth(format!(
            "login for {} returned status {}",
            username,
            response.status()
        )));
    }

    response
        .json()?
        .get("token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ApiError::MissingToken)
}

fn render_token(token: Option<&Value>) -> String {
    match token {
        Some(Value::String(token)) => token.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_token_is_passed_through() {
        assert_eq!(render_token(Some(&json!("abc123"))), "abc123");
    }

    #[test]
    fn absent_token_renders_as_null_literal() {
        assert_eq!(render_token(None), "null");
        assert_eq!(render_token(Some(&Value::Null)), "null");
    }
}
