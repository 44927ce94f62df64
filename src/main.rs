use std::io;
use std::path::{Path, PathBuf};

use log::{error, info};

use keyed_store::logger::initialize_logger;
use keyed_store::seed::demo_records;
use keyed_store::sequence::{read_long_sequence, write_long_sequence};
use keyed_store::{KeyedCollectionDriver, OrderedHashTable, Options, UnorderedTable};

fn main() {
    initialize_logger();
    let options = Options::from_env();

    if let Some(path) = options.data_file.clone() {
        sort_sequence_file(&path);
    }

    let unordered: UnorderedTable = demo_records().into_iter().collect();
    let hashed: OrderedHashTable = demo_records().into_iter().collect();

    let stdout = io::stdout();
    let mut driver = KeyedCollectionDriver::new(options, stdout.lock());
    if let Err(e) = driver.run_all(unordered, hashed) {
        error!("report output failed: {e}");
        std::process::exit(1);
    }
}

/// Load, sort ascending and persist next to the source as `<path>.sorted`.
/// Failures are logged; the table demonstration runs regardless.
fn sort_sequence_file(path: &Path) {
    let mut values = match read_long_sequence(path) {
        Ok(values) => values,
        Err(e) => {
            error!("reading {}: {e}", path.display());
            return;
        }
    };
    values.sort_unstable();

    let mut target = path.as_os_str().to_owned();
    target.push(".sorted");
    let target = PathBuf::from(target);
    match write_long_sequence(&values, &target) {
        Ok(()) => info!("wrote {} sorted values to {}", values.len(), target.display()),
        Err(e) => error!("writing {}: {e}", target.display()),
    }
}
