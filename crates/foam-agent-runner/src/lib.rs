//! Process execution for Foam-Agent jobs
//!
//! Runs an argv vector with a working directory, a replacement environment and
//! an optional timeout, capturing stdout and stderr.
//!
//! # Security Model
//!
//! Execution goes through [`CommandSpec`], which stores arguments as discrete
//! `OsString` elements. The only shell string that ever reaches a process is
//! the one a caller deliberately passes as an argument (for example to
//! `bash -lc`), and that string must be assembled from quoted tokens.

pub mod command_spec;
pub mod error;
pub mod log;
pub mod native;
pub mod process;

pub use command_spec::CommandSpec;
pub use error::RunnerError;
pub use log::{MAX_LOG_CHARS, trim_log};
pub use native::NativeRunner;
pub use process::{ProcessOutput, ProcessRunner};
