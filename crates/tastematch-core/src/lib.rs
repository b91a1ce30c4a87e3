//! # tastematch-core
//!
//! Core types, traits, and error handling for the TasteMatch comparison service.

pub mod error;
pub mod types;

pub use error::{Error, HttpError, Result};
pub use types::*;
