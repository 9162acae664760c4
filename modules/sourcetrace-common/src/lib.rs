pub mod config;
pub mod error;
pub mod types;
pub mod warnings;

pub use config::Config;
pub use error::SourceTraceError;
pub use types::*;
pub use warnings::Warning;
