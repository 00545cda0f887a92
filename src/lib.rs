pub mod config;
pub mod database;
pub mod error;
pub mod probe;
pub mod redact;

pub use config::SupabaseConfig;
pub use database::Database;
pub use error::ProbeError;
