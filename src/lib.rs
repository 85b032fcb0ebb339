pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::ShellRunner;
pub use config::WorkspaceConfig;
pub use self::core::runner::WorkspaceRunner;
pub use utils::error::{Result, WorkspaceError};
