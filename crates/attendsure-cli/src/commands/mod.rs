//! Command implementations.

pub mod extract;
pub mod launch;
pub mod show;
pub mod watch;

pub use self::extract::execute_extract;
pub use self::launch::execute_launch;
pub use self::show::execute_show;
pub use self::watch::{execute_watch, watch_calls};
