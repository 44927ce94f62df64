use crate::types::{OrderedKey, Payload};

/// The ten literal records both demonstration tables are seeded with.
///
/// Two identities repeat with different magnitudes and two payloads repeat
/// across distinct keys, so both tie-breaking and multi-match removal are
/// exercised.
pub fn demo_records() -> Vec<(OrderedKey, Payload)> {
    [
        ("Вовна", 25.5, "Дарина"),
        ("Кудря", 22.3, "Петро"),
        ("Бяша", 28.7, "Андрій"),
        ("Овечка", 20.1, "Галина"),
        ("Кудря", 26.4, "Михайло"),
        ("Пухна", 18.9, "Андрій"),
        ("Рунко", 23.6, "Олена"),
        ("Барашек", 19.8, "Галина"),
        ("Пухна", 27.2, "Іван"),
        ("Сніжинка", 15.4, "Марія"),
    ]
    .into_iter()
    .map(|(identity, magnitude, payload)| {
        (OrderedKey::new(identity, magnitude), Some(payload.to_owned()))
    })
    .collect()
}
