pub mod config;
pub mod engine;
pub mod error;
pub mod execute;
pub mod ignore;
pub mod io;
pub mod paths;
pub mod plan;
pub mod probe;
pub mod remote;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use engine::{Engine, Outcome, SyncResult};
pub use error::{ErrorKind, Result, SyncError};
pub use probe::{Identity, LocalState, RepositoryState, UserIdentity};
pub use remote::{RemoteOptions, Visibility};
pub use runner::{CommandRunner, SystemRunner};
