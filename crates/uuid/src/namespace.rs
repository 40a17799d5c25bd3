//! Well-known namespaces for name-based UUIDs (RFC 4122 Appendix C).

/// Name string is a fully-qualified domain name.
pub const NAMESPACE_DNS: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

/// Name string is a URL.
pub const NAMESPACE_URL: &str = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";

/// Name string is an ISO OID.
pub const NAMESPACE_OID: &str = "6ba7b812-9dad-11d1-80b4-00c04fd430c8";

/// Name string is an X.500 DN (in DER or a text output format).
pub const NAMESPACE_X500: &str = "6ba7b814-9dad-11d1-80b4-00c04fd430c8";

/// The nil UUID, all 128 bits zero.
pub const NAMESPACE_NIL: &str = "00000000-0000-0000-0000-000000000000";

/// Resolves a namespace alias (`dns`, `url`, `oid`, `x500`, `nil`) to its UUID string.
///
/// Matching is case-insensitive. Any other input is returned unchanged so that literal
/// namespace UUIDs pass straight through.
pub fn resolve_alias(namespace: &str) -> &str {
    match namespace.to_ascii_lowercase().as_str() {
        "dns" => NAMESPACE_DNS,
        "url" => NAMESPACE_URL,
        "oid" => NAMESPACE_OID,
        "x500" => NAMESPACE_X500,
        "nil" => NAMESPACE_NIL,
        _ => namespace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::is_canonical;

    #[test]
    fn test_constants_are_canonical() {
        for ns in [
            NAMESPACE_DNS,
            NAMESPACE_URL,
            NAMESPACE_OID,
            NAMESPACE_X500,
            NAMESPACE_NIL,
        ] {
            assert!(is_canonical(ns), "{ns} should be canonical");
        }
    }

    #[test]
    fn test_constants_match_uuid_crate() {
        assert_eq!(NAMESPACE_DNS, uuid::Uuid::NAMESPACE_DNS.to_string());
        assert_eq!(NAMESPACE_URL, uuid::Uuid::NAMESPACE_URL.to_string());
        assert_eq!(NAMESPACE_OID, uuid::Uuid::NAMESPACE_OID.to_string());
        assert_eq!(NAMESPACE_X500, uuid::Uuid::NAMESPACE_X500.to_string());
        assert_eq!(NAMESPACE_NIL, uuid::Uuid::nil().to_string());
    }

    #[test]
    fn test_resolve_alias() {
        assert_eq!(resolve_alias("dns"), NAMESPACE_DNS);
        assert_eq!(resolve_alias("URL"), NAMESPACE_URL);
        assert_eq!(resolve_alias("oid"), NAMESPACE_OID);
        assert_eq!(resolve_alias("X500"), NAMESPACE_X500);
        assert_eq!(resolve_alias("nil"), NAMESPACE_NIL);
    }

    #[test]
    fn test_resolve_alias_passes_literals_through() {
        let literal = "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}";
        assert_eq!(resolve_alias(literal), literal);
        assert_eq!(resolve_alias("example"), "example");
    }
}
