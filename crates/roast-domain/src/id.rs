//! Object identifiers derived from canonical text

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Locally stable identifier for a materialized object
///
/// The identifier is the lowercase hex SHA-256 of the object's canonical text
/// (its name, optionally followed by extra disambiguating text). It has no
/// random or time component, so re-running a transformation over the same
/// input yields the same identifiers.
///
/// A persistence backend assigns its own identifiers on ingest; this one only
/// keeps cross-links straight before that happens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Length of the hex-encoded digest
    pub const HEX_LEN: usize = 64;

    /// Compute the identifier for `name`, with `extra_text` appended when given
    ///
    /// # Examples
    ///
    /// ```
    /// use roast_domain::ObjectId;
    ///
    /// let a = ObjectId::digest("Acme Corp", None);
    /// let b = ObjectId::digest("Acme Corp", None);
    /// assert_eq!(a, b);
    /// assert_ne!(a, ObjectId::digest("Acme Corp", Some("2023")));
    /// ```
    pub fn digest(name: &str, extra_text: Option<&str>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.as_bytes());
        if let Some(extra) = extra_text {
            hasher.update(extra.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// Parse an identifier from its hex form
    pub fn from_string(s: &str) -> Result<Self, String> {
        if s.len() != Self::HEX_LEN {
            return Err(format!(
                "Invalid object id length: {} (expected {})",
                s.len(),
                Self::HEX_LEN
            ));
        }
        if !s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)) {
            return Err(format!("Invalid object id: {} is not lowercase hex", s));
        }
        Ok(Self(s.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        let id = ObjectId::digest("abc", None);
        assert_eq!(
            id.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_extra_text_is_concatenated() {
        assert_eq!(
            ObjectId::digest("ab", Some("c")),
            ObjectId::digest("abc", None)
        );
    }

    #[test]
    fn test_from_string_round_trip() {
        let id = ObjectId::digest("Acme Corp", None);
        let parsed = ObjectId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_from_string_rejects_garbage() {
        assert!(ObjectId::from_string("").is_err());
        assert!(ObjectId::from_string("not-a-digest").is_err());
        assert!(ObjectId::from_string(&"G".repeat(64)).is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ObjectId::digest("abc", None);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: identical text always yields the identical identifier
        #[test]
        fn test_digest_is_deterministic(name in ".*", extra in proptest::option::of(".*")) {
            let a = ObjectId::digest(&name, extra.as_deref());
            let b = ObjectId::digest(&name, extra.as_deref());
            prop_assert_eq!(a, b);
        }

        /// Property: every digest parses back through from_string
        #[test]
        fn test_digest_is_well_formed(name in ".*") {
            let id = ObjectId::digest(&name, None);
            prop_assert_eq!(id.as_str().len(), ObjectId::HEX_LEN);
            match ObjectId::from_string(id.as_str()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }
    }
}
