//! # Config Crate
//!
//! Centralized configuration constants for the lithophane pipeline.
//! Physical defaults (millimetres) and tolerances are defined here so the
//! mesher, the stack assembler and the command-line tool agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_BASE_HEIGHT_MM, DEFAULT_HEIGHT_STEP_MM, EPSILON};
//!
//! // The base slab is a whole number of quantization steps
//! let steps = DEFAULT_BASE_HEIGHT_MM / DEFAULT_HEIGHT_STEP_MM;
//! assert!((steps - steps.round()).abs() < EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Physical Units**: Every length is in millimetres
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
