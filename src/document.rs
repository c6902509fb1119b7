//! JSON share documents.
//!
//! ```json
//! {
//!     "keys": { "n": 4, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" },
//!     "3": { "base": "10", "value": "12" }
//! }
//! ```
//!
//! Every key besides `keys` is a share index. `base` may be given as a
//! string or a number.

use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::warn;

use crate::{error::ReconstructError, reconstructor::SecretReconstructor};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed share document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("share index {0:?} is not an integer")]
    InvalidIndex(String),

    #[error("share index {0:?} is listed more than once")]
    DuplicateIndex(String),

    #[error("threshold k must be at least 1")]
    InvalidThreshold,

    #[error("insufficient shares: need {required}, got {provided}")]
    InsufficientShares { required: usize, provided: usize },

    #[error("share {index}: {source}")]
    Share {
        index: BigInt,
        #[source]
        source: ReconstructError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Keys {
    /// Number of shares issued.
    pub n: usize,
    /// Threshold.
    pub k: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EncodedShare {
    #[serde(deserialize_with = "deserialize_base")]
    pub base: u32,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct ShareDocument {
    pub keys: Keys,
    pub entries: BTreeMap<String, EncodedShare>,
}

// Every entry in document order, repeated indices included.
struct RawDocument {
    keys: Keys,
    entries: Vec<(String, EncodedShare)>,
}

struct RawDocumentVisitor;

impl<'de> Visitor<'de> for RawDocumentVisitor {
    type Value = RawDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a share document object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut keys = None;
        let mut entries = Vec::new();

        while let Some(name) = map.next_key::<String>()? {
            if name == "keys" {
                if keys.is_some() {
                    return Err(de::Error::duplicate_field("keys"));
                }
                keys = Some(map.next_value::<Keys>()?);
            } else {
                entries.push((name, map.next_value::<EncodedShare>()?));
            }
        }

        let keys = keys.ok_or_else(|| de::Error::missing_field("keys"))?;

        Ok(RawDocument { keys, entries })
    }
}

impl<'de> Deserialize<'de> for RawDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawDocumentVisitor)
    }
}

fn deserialize_base<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Base {
        Number(u32),
        Text(String),
    }

    match Base::deserialize(deserializer)? {
        Base::Number(base) => Ok(base),
        Base::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl ShareDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let raw: RawDocument = serde_json::from_str(json)?;

        if raw.keys.k == 0 {
            return Err(DocumentError::InvalidThreshold);
        }

        let mut entries = BTreeMap::new();

        for (index, share) in raw.entries {
            if entries.contains_key(&index) {
                return Err(DocumentError::DuplicateIndex(index));
            }
            entries.insert(index, share);
        }

        let document = ShareDocument {
            keys: raw.keys,
            entries,
        };

        if document.keys.n != document.entries.len() {
            warn!(
                n = document.keys.n,
                listed = document.entries.len(),
                "share count does not match keys.n"
            );
        }

        Ok(document)
    }

    pub fn threshold(&self) -> usize {
        self.keys.k
    }

    /// Shares as `(x, digits, base)`, ordered by numeric index.
    pub fn shares(&self) -> Result<Vec<(BigInt, &str, u32)>, DocumentError> {
        let mut shares = self
            .entries
            .iter()
            .map(|(index, share)| {
                let x = BigInt::parse_bytes(index.trim().as_bytes(), 10)
                    .ok_or_else(|| DocumentError::InvalidIndex(index.clone()))?;

                Ok((x, share.value.as_str(), share.base))
            })
            .collect::<Result<Vec<_>, DocumentError>>()?;

        shares.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(shares)
    }

    /// Inserts the document's shares into `reconstructor`, all of them or only
    /// the first `k` by index. Returns how many were inserted.
    pub fn load_into(
        &self,
        reconstructor: &mut SecretReconstructor,
        threshold_only: bool,
    ) -> Result<usize, DocumentError> {
        let mut shares = self.shares()?;

        if shares.len() < self.keys.k {
            return Err(DocumentError::InsufficientShares {
                required: self.keys.k,
                provided: shares.len(),
            });
        }

        if threshold_only {
            shares.truncate(self.keys.k);
        }

        let count = shares.len();

        for (x, digits, base) in shares {
            reconstructor
                .insert_share(x.clone(), digits, base)
                .map_err(|source| DocumentError::Share { index: x, source })?;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::{DocumentError, ShareDocument};
    use crate::{error::ReconstructError, reconstructor::SecretReconstructor};

    const REFERENCE: &str = r#"{
        "keys": { "n": 4, "k": 3 },
        "1": { "base": "10", "value": "4" },
        "2": { "base": "2", "value": "111" },
        "3": { "base": "10", "value": "12" },
        "6": { "base": 4, "value": "213" }
    }"#;

    #[test]
    fn test_parse_document() {
        let document = ShareDocument::from_json(REFERENCE).unwrap();

        assert_eq!(document.threshold(), 3);
        assert_eq!(document.entries.len(), 4);
        assert_eq!(document.entries["6"].base, 4);
        assert_eq!(document.entries["2"].value, "111");
    }

    #[test]
    fn test_shares_sorted_numerically() {
        let json = r#"{
            "keys": { "n": 3, "k": 2 },
            "10": { "base": "10", "value": "1" },
            "-2": { "base": "10", "value": "2" },
            "9": { "base": "10", "value": "3" }
        }"#;
        let document = ShareDocument::from_json(json).unwrap();
        let xs: Vec<BigInt> = document.shares().unwrap().into_iter().map(|s| s.0).collect();

        assert_eq!(xs, vec![BigInt::from(-2), BigInt::from(9), BigInt::from(10)]);
    }

    #[test]
    fn test_load_into() {
        let document = ShareDocument::from_json(REFERENCE).unwrap();

        // p(x) = 3 + x^2, p(6) = 39 = 213 in base 4
        let mut all = SecretReconstructor::new();
        assert_eq!(document.load_into(&mut all, false).unwrap(), 4);
        assert_eq!(all.reconstruct_secret(), Ok(BigInt::from(3)));

        let mut minimal = SecretReconstructor::new();
        assert_eq!(document.load_into(&mut minimal, true).unwrap(), 3);
        assert_eq!(minimal.shares()[2].x(), &BigInt::from(3));
        assert_eq!(minimal.reconstruct_secret(), Ok(BigInt::from(3)));
    }

    #[test]
    fn test_insufficient_shares() {
        let json = r#"{
            "keys": { "n": 3, "k": 3 },
            "1": { "base": "10", "value": "4" },
            "2": { "base": "2", "value": "111" }
        }"#;
        let document = ShareDocument::from_json(json).unwrap();

        assert!(matches!(
            document.load_into(&mut SecretReconstructor::new(), false),
            Err(DocumentError::InsufficientShares {
                required: 3,
                provided: 2
            })
        ));
    }

    #[test]
    fn test_bad_documents() {
        let zero_threshold =
            r#"{ "keys": { "n": 1, "k": 0 }, "1": { "base": "10", "value": "4" } }"#;
        assert!(matches!(
            ShareDocument::from_json(zero_threshold),
            Err(DocumentError::InvalidThreshold)
        ));

        let bad_base = r#"{ "keys": { "n": 1, "k": 1 }, "1": { "base": "ten", "value": "4" } }"#;
        assert!(matches!(
            ShareDocument::from_json(bad_base),
            Err(DocumentError::Json(_))
        ));

        let missing_keys = r#"{ "1": { "base": "10", "value": "4" } }"#;
        assert!(matches!(
            ShareDocument::from_json(missing_keys),
            Err(DocumentError::Json(_))
        ));

        let bad_index = r#"{ "keys": { "n": 1, "k": 1 }, "one": { "base": "10", "value": "4" } }"#;
        let document = ShareDocument::from_json(bad_index).unwrap();
        assert!(matches!(
            document.load_into(&mut SecretReconstructor::new(), false),
            Err(DocumentError::InvalidIndex(index)) if index == "one"
        ));
    }

    #[test]
    fn test_repeated_index_rejected() {
        let json = r#"{
            "keys": { "n": 3, "k": 2 },
            "1": { "base": "10", "value": "5" },
            "2": { "base": "10", "value": "7" },
            "2": { "base": "10", "value": "99" }
        }"#;

        assert!(matches!(
            ShareDocument::from_json(json),
            Err(DocumentError::DuplicateIndex(index)) if index == "2"
        ));

        let repeated_keys = r#"{
            "keys": { "n": 1, "k": 1 },
            "keys": { "n": 1, "k": 1 },
            "1": { "base": "10", "value": "5" }
        }"#;
        assert!(matches!(
            ShareDocument::from_json(repeated_keys),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn test_share_error_carries_index() {
        let json = r#"{
            "keys": { "n": 2, "k": 2 },
            "1": { "base": "10", "value": "4" },
            "2": { "base": "10", "value": "f" }
        }"#;
        let document = ShareDocument::from_json(json).unwrap();
        let error = document
            .load_into(&mut SecretReconstructor::new(), false)
            .unwrap_err();

        match error {
            DocumentError::Share { index, source } => {
                assert_eq!(index, BigInt::from(2));
                assert!(matches!(source, ReconstructError::DigitOutOfRange { .. }));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
