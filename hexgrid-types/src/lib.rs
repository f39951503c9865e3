pub mod types;

// Re-exports
pub use indexmap;
pub use log;
pub use ordered_float;
pub use serde;
pub use serde_json;
pub use thiserror;
