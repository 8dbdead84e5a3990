//! Shared test fixtures for the symfield workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`library`]: [`TestLibrary`], a temporary folder of symbol libraries
//! - [`fixtures`]: KiCad symbol library text in the layout KiCad writes

pub mod fixtures;
pub mod library;

pub use library::TestLibrary;
