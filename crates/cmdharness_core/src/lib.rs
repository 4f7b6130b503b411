#![forbid(unsafe_code)]
//! Provide the pure, shared vocabulary of the cmdharness test framework.
//!
//! This crate is intentionally small and dependency-free. It holds the deterministic pieces that the harness
//! needs to decide whether an invocation passed:
//! - platform-conditional rewriting of expected text,
//! - exact comparison of expected and captured output,
//! - the fixed contents of placeholder artifacts,
//! - the pass / fail / no-result outcome vocabulary and its exit codes.
//!
//! ## Notes
//!
//! - **No IO** and no global state. Subprocesses and filesystem writes live in the `cmdharness` crate.

pub mod artifacts;
pub mod expect;
pub mod outcome;
pub mod platform;

pub use artifacts::{ArtifactKind, ParseArtifactKindError};
pub use expect::{ExpectedOutput, OutputMismatch};
pub use outcome::Outcome;
pub use platform::{Platform, adjust_for_platform};
