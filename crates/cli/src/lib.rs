//! CLI utilities for GreenBuild tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Distance and count formatting

#![warn(missing_docs)]

pub mod output;
