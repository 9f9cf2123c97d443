pub mod config;
pub mod error;
pub mod types;

pub use config::{load_profile, BrainConfig};
pub use error::{BrainError, Result};
pub use types::{Action, Strategy};
