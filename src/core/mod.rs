pub mod runner;
pub mod skip;
pub mod version;

pub use crate::domain::model::{PackageList, PackageOutcome, RunReport, SkipReason};
pub use crate::domain::ports::{CommandRunner, CommandStatus, HostPlatform};
pub use crate::utils::error::Result;
