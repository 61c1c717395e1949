//! Command implementations.

pub mod export;
pub mod extract;
pub mod review;
pub mod show;

pub use self::export::execute_export;
pub use self::extract::execute_extract;
pub use self::review::{execute_review, run_review};
pub use self::show::execute_show;
