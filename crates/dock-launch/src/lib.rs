//! dock-launch: turning registered applications into running processes.
//!
//! Provides:
//! - `Platform` detection and the pure launch-command builder
//! - Two-phase execution: `dispatch` spawns through the host shell and
//!   returns a `LaunchHandle`; `LaunchHandle::wait` observes completion

mod error;
mod executor;
mod platform;

pub use error::LaunchError;
pub use executor::{LaunchHandle, dispatch};
pub use platform::{Platform, build_launch_command, detect_platform};
