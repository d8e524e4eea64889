//! Correlation identifiers linking a dispatched operation to its stored
//! outcome.
//!
//! Identifiers are RFC 4122 version-4 UUIDs drawn from the operating system's
//! secure random source. When that source fails the generator degrades to a
//! clock-and-sequence derived identifier instead of aborting the request.

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::{Builder, Uuid, Variant, Version};

/// Tracing target for identifier generation.
pub(crate) const CORRELATION_TARGET: &str = "tc_dao::correlation";

/// Opaque token identifying one dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Wraps an existing identifier, for example one supplied by a poll
    /// request.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CorrelationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for CorrelationId {
    fn from(value: Uuid) -> Self {
        Self(value.hyphenated().to_string())
    }
}

/// Source of fresh correlation identifiers.
///
/// The dispatcher asks for exactly one identifier per dispatched operation.
/// Implementations must be safe to share between threads.
pub trait IdSource: Send + Sync {
    /// Produces a new identifier.
    fn next_id(&self) -> CorrelationId;
}

/// Identifier source backed by the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdSource;

impl RandomIdSource {
    /// Creates the default random source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IdSource for RandomIdSource {
    fn next_id(&self) -> CorrelationId {
        let mut bytes = [0_u8; 16];
        let mut rng = OsRng;
        match rng.try_fill_bytes(&mut bytes) {
            Ok(()) => CorrelationId::from(Builder::from_random_bytes(bytes).into_uuid()),
            Err(error) => {
                warn!(
                    target: CORRELATION_TARGET,
                    %error,
                    "secure random source unavailable, using clock-derived identifier"
                );
                fallback_id()
            }
        }
    }
}

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Builds a version-4 shaped identifier from the wall clock and a process-wide
/// sequence number.
///
/// Uniqueness holds within one process only; the sequence disambiguates calls
/// landing on the same clock reading.
pub(crate) fn fallback_id() -> CorrelationId {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let sequence = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let seed = (elapsed.as_nanos() << 64) | u128::from(sequence);
    let uuid = Builder::from_u128(seed)
        .with_variant(Variant::RFC4122)
        .with_version(Version::Random)
        .into_uuid();
    CorrelationId::from(uuid)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn assert_v4_shape(id: &CorrelationId) {
        let text = id.as_str();
        let groups: Vec<&str> = text.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|group| group.len()).collect();
        assert_eq!(lengths, vec![8, 4, 4, 4, 12], "unexpected grouping: {text}");
        assert!(
            text.chars()
                .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c)),
            "non-hex characters in {text}"
        );

        let version = groups[2].chars().next().expect("version nibble");
        assert_eq!(version, '4', "version nibble must be 4 in {text}");

        let variant = groups[3].chars().next().expect("variant nibble");
        assert!(
            matches!(variant, '8' | '9' | 'a' | 'b'),
            "variant bits must be 10 in {text}"
        );
    }

    #[test]
    fn random_ids_are_version_four() {
        let source = RandomIdSource::new();
        for _ in 0..64 {
            assert_v4_shape(&source.next_id());
        }
    }

    #[test]
    fn fallback_ids_are_version_four_and_distinct() {
        let first = fallback_id();
        let second = fallback_id();
        assert_v4_shape(&first);
        assert_v4_shape(&second);
        assert_ne!(first, second);
    }

    #[test]
    fn random_ids_do_not_collide() {
        let source = RandomIdSource::new();
        let ids: HashSet<CorrelationId> = (0..10_000).map(|_| source.next_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn parses_back_as_uuid() {
        let id = RandomIdSource::new().next_id();
        let parsed = Uuid::parse_str(id.as_str()).expect("valid uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = CorrelationId::new("abc");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"abc\"");
    }
}
