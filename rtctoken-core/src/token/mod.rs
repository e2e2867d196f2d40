//! Token builder pipeline
//!
//! This module implements the token construction path:
//! - Insertion-ordered privilege sets
//! - Canonical little-endian claim encoding
//! - Two-stage HMAC-SHA256 signing keyed by the app certificate
//! - Length-prefixed packing into a base64 wire token

pub mod builder;
pub mod canonical;
pub mod packer;
pub mod privileges;
pub mod secret;
pub mod signer;

pub use builder::*;
pub use canonical::*;
pub use packer::*;
pub use privileges::*;
pub use secret::*;
pub use signer::*;
