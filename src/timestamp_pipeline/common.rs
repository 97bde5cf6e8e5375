//! Common utilities module
//!
//! This module contains the error types shared across the decoding pipeline.

pub mod error;

pub use error::{DecodeError, Result};
