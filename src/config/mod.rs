pub mod scenario;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use scenario::ScenarioConfig;
