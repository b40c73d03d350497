//! Codec layer for chunk decompression and key derivation.
//!
//! # Submodules
//!
//! - [`compression`][]: Raw deflate inflation of chunk payloads
//! - [`key`][]: Bucket hashing and packed prefix keys

pub mod compression;
pub mod key;
