// OrderedKey contract tests.
// Order, equality and hash must agree with each other.

use std::cmp::Ordering;
use std::collections::HashSet;

use keyed_store::OrderedKey;

// =============================================================================
// Test 1: Identity descending decides first
// =============================================================================
#[test]
fn identity_descending_decides_first() {
    let curly = OrderedKey::new("Кудря", 1.0);
    let lamb = OrderedKey::new("Бяша", 99.0);

    // "Кудря" > "Бяша", so it sorts first despite the smaller magnitude
    assert_eq!(curly.cmp(&lamb), Ordering::Less);
    assert_eq!(lamb.cmp(&curly), Ordering::Greater);
}

// =============================================================================
// Test 2: Magnitude descending breaks identity ties
// =============================================================================
#[test]
fn magnitude_descending_breaks_ties() {
    let big = OrderedKey::new("Кудря", 26.4);
    let small = OrderedKey::new("Кудря", 22.3);
    assert_eq!(big.cmp(&small), Ordering::Less);
}

// =============================================================================
// Test 3: Null placement is asymmetric between the two fields
// =============================================================================
#[test]
fn null_identity_first_null_magnitude_last() {
    let mut keys = vec![
        OrderedKey::identity_only("a"),
        OrderedKey::new("a", 5.0),
        OrderedKey::anonymous(Some(1.0)),
        OrderedKey::anonymous(None),
    ];
    keys.sort();

    assert_eq!(
        keys,
        vec![
            OrderedKey::anonymous(Some(1.0)),
            OrderedKey::anonymous(None),
            OrderedKey::new("a", 5.0),
            OrderedKey::identity_only("a"),
        ]
    );
}

// =============================================================================
// Test 4: Equal keys hash equal and compare Equal
// =============================================================================
#[test]
fn equal_keys_hash_and_compare_equal() {
    let a = OrderedKey::new("Пухна", 18.9);
    let b = OrderedKey::from_parts(Some("Пухна".to_owned()), Some(18.9));

    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), Ordering::Equal);
    assert_eq!(a.hash_code(), b.hash_code());
}

// =============================================================================
// Test 5: Hash combinator is order-sensitive in its fields
// =============================================================================
#[test]
fn field_absence_changes_hash() {
    let full = OrderedKey::new("Пухна", 18.9);
    let bare = OrderedKey::identity_only("Пухна");
    assert_ne!(full, bare);
    assert_ne!(full.hash_code(), bare.hash_code());
}

// =============================================================================
// Test 6: Usable as a std HashSet key
// =============================================================================
#[test]
fn works_as_std_hash_key() {
    let mut set = HashSet::new();
    set.insert(OrderedKey::new("Вовна", 25.5));
    set.insert(OrderedKey::new("Вовна", 25.5));
    set.insert(OrderedKey::new("Вовна", 25.6));
    assert_eq!(set.len(), 2);
}

// =============================================================================
// Test 7: Accessors expose the raw fields
// =============================================================================
#[test]
fn accessors_return_fields() {
    let key = OrderedKey::new("Рунко", 23.6);
    assert_eq!(key.identity(), Some("Рунко"));
    assert_eq!(key.magnitude(), Some(23.6));

    let anon = OrderedKey::anonymous(None);
    assert_eq!(anon.identity(), None);
    assert_eq!(anon.magnitude(), None);
}
