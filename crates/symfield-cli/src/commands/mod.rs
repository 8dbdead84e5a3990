//! Command implementations for the symfield CLI

pub mod check;
pub mod strip;

pub use check::run_check;
pub use strip::run_strip;
