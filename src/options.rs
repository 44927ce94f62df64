use std::env;
use std::path::PathBuf;

use crate::types::OrderedKey;

/// Environment variable naming a sequence file to sort.
pub const DATA_FILE_ENV: &str = "KEYED_STORE_DATA_FILE";

/// Configuration for one demonstration run.
///
/// `Default` reproduces the fixed script: the key and payload that are
/// searched for and later deleted, and the record that gets added.
#[derive(Debug, Clone)]
pub struct Options {
    /// Key looked up, then removed.
    pub search_key: OrderedKey,
    /// Key inserted after the lookups.
    pub key_to_add: OrderedKey,
    /// Payload looked up, then removed from every entry holding it.
    pub search_payload: String,
    /// Payload stored under `key_to_add`.
    pub payload_to_add: String,
    /// Sequence file to sort into `<path>.sorted`, if any.
    pub data_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            search_key: OrderedKey::new("Кудря", 22.3),
            key_to_add: OrderedKey::new("М'ята", 24.8),
            search_payload: "Андрій".to_owned(),
            payload_to_add: "Ірина".to_owned(),
            data_file: None,
        }
    }
}

impl Options {
    /// Defaults, with `data_file` taken from [`DATA_FILE_ENV`] when set and
    /// non-empty.
    pub fn from_env() -> Self {
        let data_file = env::var_os(DATA_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Options {
            data_file,
            ..Options::default()
        }
    }
}
