use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::xxh3_64;

/// Value stored against a key. `None` is a legal, stored "null" payload,
/// distinct from the key being absent.
pub type Payload = Option<String>;

/// Multiplier of the order-sensitive field combinator.
const HASH_MULTIPLIER: u64 = 31;

/// Key addressing a table entry: an identity plus an optional magnitude.
///
/// Ordering: (identity DESC, magnitude DESC).
///
/// ```text
/// identity   None < any Some(..)        Some(b) before Some(a) when b > a
/// magnitude  any Some(..) < None        Some(y) before Some(x) when y > x
/// ```
///
/// A missing identity sorts first, a missing magnitude sorts last within its
/// identity. The two null placements point in opposite directions; both are
/// part of the contract.
///
/// Equality, hashing and ordering agree with each other:
///   - `a == b` iff `a.cmp(&b) == Ordering::Equal`
///   - `a == b` implies `a.hash_code() == b.hash_code()`
///
/// Magnitudes compare with [`f64::total_cmp`] and are equal only when their
/// bit patterns are, so NaN is a valid magnitude and `-0.0 != 0.0`.
///
/// Keys are immutable once built; there are no setters.
#[derive(Debug, Clone)]
pub struct OrderedKey {
    identity: Option<String>,
    magnitude: Option<f64>,
}

impl OrderedKey {
    /// Create a key with both fields present.
    pub fn new(identity: impl Into<String>, magnitude: f64) -> Self {
        OrderedKey {
            identity: Some(identity.into()),
            magnitude: Some(magnitude),
        }
    }

    /// Create a key with no magnitude.
    pub fn identity_only(identity: impl Into<String>) -> Self {
        OrderedKey {
            identity: Some(identity.into()),
            magnitude: None,
        }
    }

    /// Create a key with no identity.
    pub fn anonymous(magnitude: Option<f64>) -> Self {
        OrderedKey {
            identity: None,
            magnitude,
        }
    }

    /// Create a key from raw optional fields.
    pub fn from_parts(identity: Option<String>, magnitude: Option<f64>) -> Self {
        OrderedKey {
            identity,
            magnitude,
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.magnitude
    }

    /// Order-sensitive combination of the field hashes:
    /// `h = hash(identity); h = 31 * h + hash(magnitude)`, absent fields
    /// contributing 0. Arithmetic wraps.
    pub fn hash_code(&self) -> u64 {
        let h = self.identity.as_deref().map_or(0, identity_hash);
        h.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(self.magnitude.map_or(0, magnitude_hash))
    }
}

fn identity_hash(identity: &str) -> u64 {
    xxh3_64(identity.as_bytes())
}

/// Folds the high half of the IEEE bits into the low half.
fn magnitude_hash(magnitude: f64) -> u64 {
    let bits = magnitude.to_bits();
    bits ^ (bits >> 32)
}

fn compare_identity(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => b.cmp(a),
    }
}

fn compare_magnitude(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => b.total_cmp(&a),
    }
}

impl Ord for OrderedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_identity(self.identity(), other.identity())
            .then_with(|| compare_magnitude(self.magnitude, other.magnitude))
    }
}

impl PartialOrd for OrderedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OrderedKey {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.magnitude.map(f64::to_bits) == other.magnitude.map(f64::to_bits)
    }
}

impl Eq for OrderedKey {}

impl Hash for OrderedKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for OrderedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrderedKey{{identity=")?;
        match &self.identity {
            Some(identity) => write!(f, "'{identity}'")?,
            None => write!(f, "null")?,
        }
        if let Some(magnitude) = self.magnitude {
            write!(f, ", magnitude={magnitude}")?;
        }
        write!(f, ", hash={}}}", self.hash_code())
    }
}

/// A single table slot: key plus its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: OrderedKey,
    pub payload: Payload,
}

impl Entry {
    pub fn new(key: OrderedKey, payload: Payload) -> Self {
        Entry { key, payload }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Some(payload) => write!(f, "{} -> {payload}", self.key),
            None => write!(f, "{} -> null", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_descending_then_magnitude_descending() {
        let a = OrderedKey::new("Кудря", 26.4);
        let b = OrderedKey::new("Кудря", 22.3);
        let c = OrderedKey::new("Бяша", 28.7);
        let mut keys = vec![c.clone(), b.clone(), a.clone()];
        keys.sort();
        assert_eq!(keys, vec![a, b, c]);
    }

    #[test]
    fn missing_identity_sorts_first() {
        let anon = OrderedKey::anonymous(Some(1.0));
        let named = OrderedKey::new("a", 1.0);
        assert_eq!(anon.cmp(&named), Ordering::Less);
        assert_eq!(named.cmp(&anon), Ordering::Greater);
    }

    #[test]
    fn missing_magnitude_sorts_last() {
        let bare = OrderedKey::identity_only("a");
        let sized = OrderedKey::new("a", 1.0);
        assert_eq!(bare.cmp(&sized), Ordering::Greater);
        assert_eq!(sized.cmp(&bare), Ordering::Less);
    }

    #[test]
    fn nan_and_signed_zero_stay_consistent() {
        let nan = OrderedKey::new("x", f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(nan.cmp(&nan.clone()), Ordering::Equal);

        let pos = OrderedKey::new("x", 0.0);
        let neg = OrderedKey::new("x", -0.0);
        assert_ne!(pos, neg);
        assert_ne!(pos.cmp(&neg), Ordering::Equal);
    }

    #[test]
    fn hash_code_of_empty_key_is_zero() {
        assert_eq!(OrderedKey::anonymous(None).hash_code(), 0);
    }

    #[test]
    fn display_omits_absent_magnitude() {
        let key = OrderedKey::identity_only("Бяша");
        let text = key.to_string();
        assert!(text.starts_with("OrderedKey{identity='Бяша', hash="));
        assert!(!text.contains("magnitude"));
    }
}
