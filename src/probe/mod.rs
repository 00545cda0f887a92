mod traits;

pub use traits::Backend;

use crate::config::SupabaseConfig;
use crate::database::{AuthUser, Database, RestResponse};
use crate::error::{ProbeError, Result};
use crate::redact::redact_key;
use std::io::Write;

pub const REST_SUCCESS: &str = "Success! Supabase REST API is reachable.";
pub const REST_WARNING: &str = "Warning: Supabase REST API connection may have a problem.";
pub const COMPLETED: &str = "Connection test complete! Supabase connection succeeded.";

#[derive(Debug, Clone)]
pub enum RestOutcome {
    Healthy(RestResponse),
    Degraded(RestResponse),
}

impl RestOutcome {
    fn from_response(response: RestResponse) -> Self {
        if response.is_ok() {
            RestOutcome::Healthy(response)
        } else {
            RestOutcome::Degraded(response)
        }
    }

    pub fn response(&self) -> &RestResponse {
        match self {
            RestOutcome::Healthy(r) | RestOutcome::Degraded(r) => r,
        }
    }
}

#[derive(Debug, Clone)]
pub enum UserOutcome {
    Fetched(AuthUser),
    NoSession,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub rest: RestOutcome,
    pub user: UserOutcome,
}

/// Print the credentials header and run both checks, writing the transcript to `out`.
///
/// A user-fetch failure is recorded in the report. A REST transport failure
/// ends the run with `Err` before the user section is written.
pub async fn run<B, W>(config: &SupabaseConfig, backend: &B, out: &mut W) -> Result<ProbeReport>
where
    B: Backend + ?Sized,
    W: Write,
{
    writeln!(out, "Supabase URL: {}", config.url)?;
    writeln!(out, "Supabase Key: {}", redact_key(&config.anon_key))?;

    writeln!(out, "\nTesting Supabase connection...")?;
    writeln!(out, "\nAttempting Supabase REST health check...")?;

    let rest = RestOutcome::from_response(backend.rest_health().await?);
    let response = rest.response();
    writeln!(out, "\nResponse status: {}", response.status)?;
    writeln!(out, "\nResponse body: {}", response.body)?;
    match rest {
        RestOutcome::Healthy(_) => writeln!(out, "\n{}", REST_SUCCESS)?,
        RestOutcome::Degraded(_) => writeln!(out, "\n{}", REST_WARNING)?,
    }

    writeln!(out, "\nAttempting to fetch the current user...")?;
    let user = match backend.current_user().await {
        Ok(Some(user)) => {
            writeln!(out, "Success! Current user: {}", user)?;
            UserOutcome::Fetched(user)
        }
        Ok(None) => {
            writeln!(out, "No active session: no user is signed in")?;
            UserOutcome::NoSession
        }
        Err(e) => {
            log::warn!("User fetch failed: {}", e);
            writeln!(out, "Failed to fetch user: {}", e)?;
            UserOutcome::Failed(e.to_string())
        }
    };

    writeln!(out, "\n{}", COMPLETED)?;
    Ok(ProbeReport { rest, user })
}

/// Resolve the configuration through `lookup` and run against the live
/// project. Any failure that escapes `run`, including a missing setting, is
/// written as the single outer failure line before being returned.
pub async fn check<F, W>(lookup: F, out: &mut W) -> Result<ProbeReport>
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    let result = match SupabaseConfig::from_lookup(lookup) {
        Ok(config) => run(&config, &Database::new(&config), out).await,
        Err(e) => Err(e),
    };

    if let Err(e) = &result {
        log::error!("Supabase connectivity check failed: {}", e);
        report_failure(out, e)?;
    }
    result
}

/// The outer failure line.
pub fn report_failure<W: Write>(out: &mut W, error: &ProbeError) -> std::io::Result<()> {
    writeln!(out, "\nConnection failed: {}", error)
}
