pub mod history;
pub mod types;

pub use history::{BoundedHistory, HistoryStore, DEFAULT_HISTORY_CAPACITY};
pub use types::*;
