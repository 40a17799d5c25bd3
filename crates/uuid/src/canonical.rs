//! Typed wrapper over a canonical UUID.

use crate::codec::{from_binary, is_valid, to_binary};
use crate::generator::{v3, v4, v5, UuidVersion};
use crate::{UuidError, UuidResult, UUID_BYTES};
use std::{fmt, str::FromStr};

/// A UUID held as its 16 raw bytes.
///
/// Once constructed, the value always displays in canonical form (36 lowercase hex characters
/// with hyphens), whatever shape the input had. Two values compare equal exactly when their
/// bytes do, which gives the case-insensitive string equality UUIDs need.
///
/// # Construction
/// - [`CanonicalUuid::parse`] / [`FromStr`] accept anything [`is_valid`] accepts.
/// - [`CanonicalUuid::from_bytes`] wraps 16 raw bytes.
/// - [`CanonicalUuid::new_v3`], [`CanonicalUuid::new_v4`] and [`CanonicalUuid::new_v5`] run the
///   generators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUuid([u8; UUID_BYTES]);

impl CanonicalUuid {
    /// The nil UUID.
    pub const NIL: CanonicalUuid = CanonicalUuid([0u8; UUID_BYTES]);

    /// Wraps 16 raw bytes.
    pub const fn from_bytes(bytes: [u8; UUID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Wraps a byte slice, which must be exactly 16 bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Format`] for any other length.
    pub fn from_slice(bytes: &[u8]) -> UuidResult<Self> {
        let bytes: [u8; UUID_BYTES] = bytes.try_into().map_err(|_| {
            UuidError::Format(format!("binary UUID must be 16 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Validates and parses a UUID string.
    ///
    /// Braces, missing hyphens and uppercase digits are accepted and normalised away.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Format`] if `input` fails [`is_valid`].
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !is_valid(input) {
            return Err(UuidError::Format(format!(
                "'{}' is not a UUID (expected 32 hex digits grouped 8-4-4-4-12)",
                input
            )));
        }
        to_binary(input).map(Self)
    }

    /// Generates a random (version 4) UUID.
    pub fn new_v4() -> UuidResult<Self> {
        Self::parse(&v4()?)
    }

    /// Generates a name-based (version 3, MD5) UUID.
    pub fn new_v3(namespace: &CanonicalUuid, name: &str) -> UuidResult<Self> {
        Self::parse(&v3(&namespace.to_string(), name)?)
    }

    /// Generates a name-based (version 5, SHA-1) UUID.
    pub fn new_v5(namespace: &CanonicalUuid, name: &str) -> UuidResult<Self> {
        Self::parse(&v5(&namespace.to_string(), name)?)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; UUID_BYTES] {
        &self.0
    }

    /// Returns the version number held in the top nibble of byte 6.
    pub fn version_number(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns the generator version, if this UUID carries a v3, v4 or v5 version nibble.
    pub fn version(&self) -> Option<UuidVersion> {
        match self.version_number() {
            3 => Some(UuidVersion::V3),
            4 => Some(UuidVersion::V4),
            5 => Some(UuidVersion::V5),
            _ => None,
        }
    }

    /// Returns true if the variant bits in byte 8 are `10` (RFC 4122).
    pub fn is_rfc4122_variant(&self) -> bool {
        self.0[8] & 0xc0 == 0x80
    }

    /// Returns true if every bit is zero.
    pub fn is_nil(&self) -> bool {
        self.0 == [0u8; UUID_BYTES]
    }
}

impl fmt::Display for CanonicalUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = from_binary(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl FromStr for CanonicalUuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalUuid::parse(s)
    }
}

impl From<[u8; UUID_BYTES]> for CanonicalUuid {
    fn from(bytes: [u8; UUID_BYTES]) -> Self {
        Self(bytes)
    }
}

impl From<CanonicalUuid> for [u8; UUID_BYTES] {
    fn from(value: CanonicalUuid) -> Self {
        value.0
    }
}

impl From<::uuid::Uuid> for CanonicalUuid {
    fn from(value: ::uuid::Uuid) -> Self {
        Self(value.into_bytes())
    }
}

impl From<CanonicalUuid> for ::uuid::Uuid {
    fn from(value: CanonicalUuid) -> Self {
        ::uuid::Uuid::from_bytes(value.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CanonicalUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CanonicalUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CanonicalUuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
