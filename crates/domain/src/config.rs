pub mod blocking;
pub mod directory;
pub mod errors;
pub mod filtering;
pub mod logging;
pub mod root;
pub mod screening;

pub use blocking::BlockingConfig;
pub use directory::{ContactConfig, DirectoryConfig};
pub use errors::ConfigError;
pub use filtering::FilteringConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use screening::{ScreeningComponentConfig, ScreeningConfig, ScreeningResponseConfig};
