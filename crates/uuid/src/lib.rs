//! RFC 4122 UUID generation, validation and binary conversion.
//!
//! Identifiers are handled as plain strings in their *canonical* form: **36 lowercase
//! hexadecimal characters grouped 8-4-4-4-12 and separated by hyphens**.
//!
//! This crate provides:
//! - A codec ([`codec`]) converting between the canonical string and the 16-byte binary form,
//!   plus the lenient ([`is_valid`]) and strict ([`is_canonical`]) format checks.
//! - Generators ([`generator`]) for name-based (v3 MD5, v5 SHA-1) and random (v4) UUIDs.
//! - The well-known RFC 4122 Appendix C namespaces ([`namespace`]).
//! - A small value type ([`CanonicalUuid`]) for callers who want a typed identifier rather than
//!   a string.
//!
//! ## Canonical UUID form
//! - Length: 36
//! - Characters: `0-9`, `a-f` and `-` at offsets 8, 13, 18 and 23
//! - Example: `6ba7b810-9dad-11d1-80b4-00c04fd430c8`
//!
//! Every generator formats its output through [`from_binary`], so every string this crate
//! returns is canonical.
//!
//! ## Version and variant bits
//! All generators stamp the RFC 4122 version nibble (byte 6) and variant bits (byte 8) onto the
//! 16 bytes before formatting. Name-based output therefore matches other RFC 4122
//! implementations byte for byte:
//!
//! ```
//! let id = rfcuuid::v5(rfcuuid::NAMESPACE_DNS, "python.org").unwrap();
//! assert_eq!(id, "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! ```

pub mod codec;
pub mod generator;
pub mod namespace;
mod canonical;

// Re-export public types
pub use canonical::CanonicalUuid;
pub use codec::{from_binary, is_canonical, is_valid, to_binary};
pub use generator::{random_bytes, v3, v3_bytes, v4, v5, v5_bytes, UuidVersion};
pub use namespace::{NAMESPACE_DNS, NAMESPACE_NIL, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500};

/// Length in bytes of a binary UUID.
pub const UUID_BYTES: usize = 16;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// A namespace (or other argument) was rejected before any work was done
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Binary input was not 16 bytes, or a string did not hold exactly 32 hex digits
    #[error("Format error: {0}")]
    Format(String),
    /// The operating system's secure random source failed
    #[error("Secure random source failed: {0}")]
    RandomSource(#[source] rand::Error),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
