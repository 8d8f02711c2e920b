//! The authentication gate: login and registration
//!
//! These calls are the precondition for everything in [`client`](crate::client):
//! they trade an email/password pair for the bearer credential that every
//! note endpoint requires, and persist it to a [`Session`] file.
//!
//! Unlike the note flows, auth failures are surfaced to the caller verbatim:
//! the server's `detail` message when there is one, a generic network-error
//! message otherwise.

use std::error::Error;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::session::Session;

/// The `{ data: { access_token, email }, detail }` envelope of the user endpoints
#[derive(Debug, Default, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    data: Option<AuthData>,
    /// The server's error message, on non-success statuses
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthData {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// What a successful registration led to
#[derive(Debug)]
pub enum RegisterOutcome {
    /// The server logged the new account in right away
    LoggedIn(Session),
    /// The account exists but no token was issued; the user should now log in
    AccountCreated,
}

/// Authenticate against `POST /users/login`.
///
/// On success the session is persisted to `session_file` before being returned.
pub async fn login(
    base_url: &str,
    session_file: &Path,
    email: &str,
    password: &str,
) -> Result<Session, Box<dyn Error>> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".into());
    }

    let url = Url::parse(base_url)?.join("users/login")?;
    let body = serde_json::json!({ "email": email, "password": password });
    let reply = post_credentials(url, &body).await?;

    let data = reply.data.unwrap_or_default();
    let token = match data.access_token {
        Some(t) => t,
        None => return Err("The server did not return an access token".into()),
    };
    let session = Session::new(
        session_file,
        token,
        data.email.unwrap_or_else(|| email.to_string()),
    );
    session.save_to_file();
    Ok(session)
}

/// Create an account against `POST /users/register`.
///
/// Some server versions log the fresh account in directly (the reply carries
/// a token, which gets persisted like a login); others only create the
/// account, in which case [`RegisterOutcome::AccountCreated`] tells the
/// caller to fall back to the login flow.
pub async fn register(
    base_url: &str,
    session_file: &Path,
    email: &str,
    password: &str,
    name: &str,
) -> Result<RegisterOutcome, Box<dyn Error>> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".into());
    }
    if name.trim().is_empty() {
        return Err("A user name is required".into());
    }

    let url = Url::parse(base_url)?.join("users/register")?;
    let body = serde_json::json!({ "email": email, "password": password, "name": name });
    let reply = post_credentials(url, &body).await?;

    let data = reply.data.unwrap_or_default();
    match data.access_token {
        None => Ok(RegisterOutcome::AccountCreated),
        Some(token) => {
            let session = Session::new(
                session_file,
                token,
                data.email.unwrap_or_else(|| email.to_string()),
            );
            session.save_to_file();
            Ok(RegisterOutcome::LoggedIn(session))
        }
    }
}

async fn post_credentials(url: Url, body: &serde_json::Value) -> Result<AuthResponse, Box<dyn Error>> {
    let response = reqwest::Client::new()
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|err| {
            log::debug!("Auth request failed: {}", err);
            Box::<dyn Error>::from("Network error")
        })?;

    let status = response.status();
    // Error replies carry their message in the same JSON envelope
    let parsed = response.json::<AuthResponse>().await.unwrap_or_default();

    if status.is_success() == false {
        let message = parsed
            .detail
            .unwrap_or_else(|| format!("Unexpected HTTP status code {:?}", status));
        return Err(message.into());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_credentials_are_rejected_before_any_network_call() {
        let dir = tempfile::tempdir().unwrap();
        let session_file = dir.path().join("session.json");

        assert!(login("https://app-planer.online", &session_file, "", "pw").await.is_err());
        assert!(login("https://app-planer.online", &session_file, "you@example.com", "").await.is_err());
        assert!(
            register("https://app-planer.online", &session_file, "you@example.com", "pw", " ")
                .await
                .is_err()
        );
        // Nothing was persisted
        assert!(session_file.exists() == false);
    }

    #[test]
    fn auth_envelope_parses_with_and_without_data() {
        let ok: AuthResponse = serde_json::from_str(
            r#"{ "data": { "access_token": "tok", "email": "you@example.com" } }"#,
        ).unwrap();
        assert_eq!(ok.data.unwrap().access_token.as_deref(), Some("tok"));

        let err: AuthResponse = serde_json::from_str(r#"{ "detail": "Wrong password" }"#).unwrap();
        assert_eq!(err.detail.as_deref(), Some("Wrong password"));
        assert!(err.data.is_none());
    }
}
