//! Error types for the Galaxy3D spatial subsystem
//!
//! This module defines the error types returned by tree construction,
//! insertion, geometry access and picking.

use std::fmt;

/// Result type for Galaxy3D spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D spatial errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A builder received no items to index
    EmptyInput(String),

    /// A boundary is NaN or has min > max on some axis
    InvalidBoundary(String),

    /// Geometry data is malformed (buffer length, out-of-range vertex index)
    InvalidGeometry(String),

    /// Any other invalid argument (unknown scene object, bad marquee, ...)
    InvalidInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput(msg) => write!(f, "Empty input: {}", msg),
            Error::InvalidBoundary(msg) => write!(f, "Invalid boundary: {}", msg),
            Error::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
