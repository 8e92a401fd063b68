pub mod ingest;
pub mod render;
pub mod types;

pub use ingest::parse_history_payload;
pub use render::{operation_label, operation_text};
pub use types::LogEntry;
