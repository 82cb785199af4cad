// ============================================
// File: crates/mcauth-common/src/lib.rs
// ============================================
//! # mcauth Common - Shared Utilities Library
//!
//! ## Creation Reason
//! Provides the small set of types shared by every mcauth crate, so the
//! crypto core and any protocol layer built on top agree on how errors and
//! instants are represented.
//!
//! ## Main Functionality
//! - [`error`]: Common error types and result aliases
//! - [`time`]: Millisecond-precision timestamps used for key expiry
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │        protocol layer (login listener, external)    │
//! │                    │                                │
//! │                    ▼                                │
//! │               mcauth-core                           │
//! │                    │                                │
//! │                    ▼                                │
//! │              mcauth-common  ◄── You are here        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This crate is the foundation - changes affect everything
//! - Keep dependencies minimal
//! - Timestamps are epoch MILLISECONDS, the unit the signing authority uses
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod time;

// Re-export commonly used items at crate root
pub use error::{CommonError, Result};
pub use time::Timestamp;
