pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, KipiError};
pub use id::SessionId;
pub use types::{GenerationConfig, OutputMode};
