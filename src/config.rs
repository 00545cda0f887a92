use crate::error::{ProbeError, Result};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Env files tried in order. Values already in the process environment win.
pub const ENV_FILES: &[&str] = &[".env.local", ".env"];

const URL_VARS: &[&str] = &[
    "NEXT_PUBLIC_SUPABASE_URL",
    "SUPABASE_URL",
    "VITE_SUPABASE_URL",
];

const ANON_KEY_VARS: &[&str] = &[
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
    "SUPABASE_ANON_KEY",
    "VITE_SUPABASE_ANON_KEY",
];

const ACCESS_TOKEN_VAR: &str = "SUPABASE_ACCESS_TOKEN";

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub access_token: Option<String>,
}

/// Directory the env files are read from. Falls back to relative paths when
/// the working directory cannot be resolved.
pub fn env_dir() -> PathBuf {
    env_dir_from(env::current_dir())
}

fn env_dir_from(cwd: io::Result<PathBuf>) -> PathBuf {
    cwd.unwrap_or_else(|e| {
        log::warn!("Cannot resolve working directory ({}), using relative paths", e);
        PathBuf::from(".")
    })
}

/// Load every env file that exists under `dir`. Returns the files that were read.
pub fn load_env_files(dir: &Path) -> Vec<String> {
    let mut loaded = Vec::new();
    for name in ENV_FILES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        match dotenv::from_path(&path) {
            Ok(()) => {
                log::debug!("Loaded environment from {}", path.display());
                loaded.push(name.to_string());
            }
            Err(e) => log::warn!("Failed to read {}: {}", path.display(), e),
        }
    }
    loaded
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve the configuration through `lookup`, taking the first non-blank
    /// value for each setting.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = first_present(&lookup, URL_VARS).ok_or_else(|| {
            ProbeError::Configuration(format!(
                "Supabase URL not found (tried {})",
                URL_VARS.join(", ")
            ))
        })?;

        let anon_key = first_present(&lookup, ANON_KEY_VARS).ok_or_else(|| {
            ProbeError::Configuration(format!(
                "Supabase anon key not found (tried {})",
                ANON_KEY_VARS.join(", ")
            ))
        })?;

        let access_token = first_present(&lookup, &[ACCESS_TOKEN_VAR]);

        Self::new(url, anon_key).map(|config| config.with_access_token(access_token))
    }

    pub fn new(url: String, anon_key: String) -> Result<Self> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ProbeError::Configuration(format!(
                "Supabase URL must start with http:// or https://, got '{}'",
                url
            )));
        }

        let anon_key = anon_key.trim().to_string();
        if anon_key.is_empty() {
            return Err(ProbeError::Configuration(
                "Supabase anon key is empty".to_string(),
            ));
        }

        Ok(Self {
            url,
            anon_key,
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }
}

fn first_present<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    names.iter().find_map(|&name| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}
