//! Keymix Core - Foundational types shared by the keymix crates
//!
//! This crate provides:
//! - `KeymixError` and the `Result` alias
//! - `Vec3`, the spatial type used by the bone and shape-key utilities

mod error;
mod types;

pub use error::{KeymixError, Result};
pub use types::Vec3;
