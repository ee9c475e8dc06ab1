//! External tool execution and platform queries.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{Invocation, ProcessOutput, ProcessRunner, SystemRunner};
pub use mock::MockRunner;
pub use platform::{elevate, is_ci, is_elevated};
