pub mod config;
pub mod session;

pub use config::{Config, ConfigError, ResolverConfig};
pub use session::{check_payload, run_session, SessionSummary};
