//! UUID generators.
//!
//! - [`v3`] and [`v5`] are name-based: the same namespace and name always give the same UUID.
//! - [`v4`] is random, drawing from the operating system's secure random source.
//!
//! Each generator builds 16 bytes, stamps the version nibble and RFC 4122 variant bits, and
//! formats through [`from_binary`].

use crate::codec::{from_binary, is_valid, to_binary};
use crate::{UuidError, UuidResult, UUID_BYTES};
use md5::Md5;
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::{Digest, Sha1};
use std::{fmt, str::FromStr};

/// A UUID generation algorithm.
///
/// Used wherever the algorithm is chosen by configuration rather than in code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UuidVersion {
    /// Name-based, MD5
    #[cfg_attr(feature = "serde", serde(alias = "3", alias = "V3"))]
    V3,
    /// Random
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "4", alias = "V4"))]
    V4,
    /// Name-based, SHA-1
    #[cfg_attr(feature = "serde", serde(alias = "5", alias = "V5"))]
    V5,
}

impl UuidVersion {
    /// The value written into the version nibble of byte 6.
    pub fn number(self) -> u8 {
        match self {
            UuidVersion::V3 => 3,
            UuidVersion::V4 => 4,
            UuidVersion::V5 => 5,
        }
    }

    /// Returns true if this version derives its value from a namespace and a name.
    pub fn is_name_based(self) -> bool {
        matches!(self, UuidVersion::V3 | UuidVersion::V5)
    }

    /// Generates a UUID with this algorithm.
    ///
    /// `namespace` and `name` are ignored for [`UuidVersion::V4`].
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] if a name-based version is missing its namespace
    /// or name, plus any error of the underlying generator.
    pub fn generate(self, namespace: Option<&str>, name: Option<&str>) -> UuidResult<String> {
        match self {
            UuidVersion::V4 => v4(),
            UuidVersion::V3 | UuidVersion::V5 => {
                let (namespace, name) = namespace.zip(name).ok_or_else(|| {
                    UuidError::InvalidArgument(format!(
                        "{} requires both a namespace and a name",
                        self
                    ))
                })?;
                if self == UuidVersion::V3 {
                    v3(namespace, name)
                } else {
                    v5(namespace, name)
                }
            }
        }
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

impl FromStr for UuidVersion {
    type Err = UuidError;

    /// Parses `v3`, `v4`, `v5` (any case) or the bare digits `3`, `4`, `5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v3" | "3" => Ok(UuidVersion::V3),
            "v4" | "4" => Ok(UuidVersion::V4),
            "v5" | "5" => Ok(UuidVersion::V5),
            _ => Err(UuidError::InvalidArgument(format!(
                "unsupported UUID version '{}', expected v3, v4 or v5",
                s
            ))),
        }
    }
}

/// Writes the version nibble into byte 6 and the RFC 4122 variant (`10`) into byte 8.
fn stamp(bytes: &mut [u8; UUID_BYTES], version: UuidVersion) {
    bytes[6] = (bytes[6] & 0x0f) | (version.number() << 4);
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
}

/// Returns `len` bytes from the operating system's secure random source.
///
/// # Errors
///
/// - [`UuidError::InvalidArgument`] if `len` is zero.
/// - [`UuidError::RandomSource`] if the OS source fails. There is no fallback.
pub fn random_bytes(len: usize) -> UuidResult<Vec<u8>> {
    if len < 1 {
        return Err(UuidError::InvalidArgument(
            "random byte length must be at least 1".into(),
        ));
    }

    let mut bytes = vec![0u8; len];
    fill_random(&mut bytes)?;
    Ok(bytes)
}

fn fill_random(bytes: &mut [u8]) -> UuidResult<()> {
    OsRng.try_fill_bytes(bytes).map_err(UuidError::RandomSource)
}

/// Generates a random (version 4) UUID.
///
/// Format: `xxxxxxxx-xxxx-4xxx-Yxxx-xxxxxxxxxxxx` where `Y` is one of `8`, `9`, `a` or `b`.
///
/// # Errors
///
/// Returns [`UuidError::RandomSource`] if the OS secure random source fails.
pub fn v4() -> UuidResult<String> {
    let mut bytes = [0u8; UUID_BYTES];
    fill_random(&mut bytes)?;
    stamp(&mut bytes, UuidVersion::V4);
    from_binary(&bytes)
}

/// Generates a name-based (version 3, MD5) UUID from text.
///
/// # Errors
///
/// Returns [`UuidError::InvalidArgument`] if `namespace` fails [`is_valid`].
pub fn v3(namespace: &str, name: &str) -> UuidResult<String> {
    v3_bytes(namespace, name.as_bytes())
}

/// Generates a name-based (version 3, MD5) UUID from raw name bytes.
///
/// # Errors
///
/// Returns [`UuidError::InvalidArgument`] if `namespace` fails [`is_valid`].
pub fn v3_bytes(namespace: &str, name: &[u8]) -> UuidResult<String> {
    name_based::<Md5>(namespace, name, UuidVersion::V3)
}

/// Generates a name-based (version 5, SHA-1) UUID from text.
///
/// # Errors
///
/// Returns [`UuidError::InvalidArgument`] if `namespace` fails [`is_valid`].
pub fn v5(namespace: &str, name: &str) -> UuidResult<String> {
    v5_bytes(namespace, name.as_bytes())
}

/// Generates a name-based (version 5, SHA-1) UUID from raw name bytes.
///
/// # Errors
///
/// Returns [`UuidError::InvalidArgument`] if `namespace` fails [`is_valid`].
pub fn v5_bytes(namespace: &str, name: &[u8]) -> UuidResult<String> {
    name_based::<Sha1>(namespace, name, UuidVersion::V5)
}

/// Hashes `namespace_bytes ++ name` with `D` and keeps the first 16 bytes of the digest.
fn name_based<D: Digest>(
    namespace: &str,
    name: &[u8],
    version: UuidVersion,
) -> UuidResult<String> {
    if !is_valid(namespace) {
        return Err(UuidError::InvalidArgument(format!("{} is invalid", namespace)));
    }

    // Lenient validation passed, so stripping separators leaves exactly 32 hex digits.
    let namespace_bytes = to_binary(namespace)?;

    let mut hasher = D::new();
    hasher.update(namespace_bytes);
    hasher.update(name);
    let digest = hasher.finalize();

    let mut bytes = [0u8; UUID_BYTES];
    bytes.copy_from_slice(&digest[..UUID_BYTES]);
    stamp(&mut bytes, version);

    tracing::trace!(%version, namespace, "derived name-based uuid");
    from_binary(&bytes)
}
