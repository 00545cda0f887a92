use crate::config::SupabaseConfig;
use crate::error::{ProbeError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Database {
    pub client: Arc<Client>,
    pub base_url: String,
    pub api_key: String,
    pub session: Option<Session>,
}

/// Access token of a signed-in user, needed to identify the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
}

impl Database {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: config.url.clone(),
            api_key: config.anon_key.clone(),
            session: config.access_token.clone().map(|access_token| Session { access_token }),
        }
    }

    /// Hit the REST root with the anon key. Any HTTP status is a response;
    /// only transport failures are errors.
    pub async fn test_connection(&self) -> Result<RestResponse> {
        let url = format!("{}/rest/v1/", self.base_url);
        log::info!("Testing connection to: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status().as_u16();
        log::info!("Connection test response status: {}", status);
        let body = response.text().await?;

        Ok(RestResponse { status, body })
    }

    /// Fetch the user behind the stored session. `Ok(None)` when no session is held.
    pub async fn get_current_user(&self) -> Result<Option<AuthUser>> {
        let Some(session) = &self.session else {
            log::info!("No session held - no user is signed in");
            return Ok(None);
        };

        let url = format!("{}/auth/v1/user", self.base_url);
        log::info!("Fetching current user from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", session.access_token))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("User fetch failed with status {}: {}", status, error_text);
            return Err(ProbeError::Api {
                status,
                message: auth_error_message(&error_text),
            });
        }

        let user: AuthUser = response.json().await?;
        Ok(Some(user))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub aud: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_sign_in_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl fmt::Display for AuthUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={}", self.id)?;
        if let Some(email) = &self.email {
            write!(f, " email={}", email)?;
        }
        if let Some(role) = &self.role {
            write!(f, " role={}", role)?;
        }
        if let Some(last) = &self.last_sign_in_at {
            write!(f, " last_sign_in_at={}", last.to_rfc3339())?;
        }
        Ok(())
    }
}

// GoTrue reports errors as `msg`, `message` or `error_description`.
fn auth_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.to_string())
}
