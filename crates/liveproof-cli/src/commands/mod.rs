//! Command implementations.

pub mod compare;
pub mod health;
pub mod profile;
pub mod session;
pub mod sources;
pub mod verify;

pub use self::compare::execute_compare;
pub use self::health::execute_health;
pub use self::profile::execute_profile;
pub use self::session::execute_session;
pub use self::sources::execute_sources;
pub use self::verify::{execute_verify, run_action, save_artifact};
