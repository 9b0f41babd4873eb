pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::ArogyaConfig;
pub use error::{ArogyaError, Result};
pub use events::SessionEvent;
pub use types::*;
