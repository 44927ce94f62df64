use std::io::Write;
use std::time::Instant;

use log::info;

use crate::error::Result;
use crate::options::Options;
use crate::table::layout::BucketLayout;
use crate::table::{KeyedTable, OrderedHashTable, UnorderedTable};
use crate::timing::report_elapsed;
use crate::types::{OrderedKey, Payload};

/// What one scripted run observed. Mirrors the text report so callers can
/// check results without parsing output.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub layout: &'static str,
    pub initial_len: usize,
    pub key_lookup_before_sort: Option<Payload>,
    /// Key of the entry the payload search landed on, if any.
    pub payload_lookup_before_sort: Option<OrderedKey>,
    /// Keys in the order the sort re-inserted them.
    pub sorted_keys: Vec<OrderedKey>,
    pub key_lookup_after_sort: Option<Payload>,
    pub payload_lookup_after_sort: Option<OrderedKey>,
    pub removed_by_key: Option<Payload>,
    pub removed_by_payload: usize,
    pub final_len: usize,
}

/// Runs the fixed operation script against a table and reports each step.
///
/// Script, per table:
///
/// ```text
/// lookup by key ─► lookup by payload ─► print ─► sort by key ─► print
///   ─► lookup by key ─► lookup by payload ─► insert ─► remove by key
///   ─► remove by payload ─► final size
/// ```
///
/// Every step is timed through [`report_elapsed`]. Runs share no table
/// state; each consumes the table it is handed.
pub struct KeyedCollectionDriver<W: Write> {
    options: Options,
    out: W,
}

impl<W: Write> KeyedCollectionDriver<W> {
    pub fn new(options: Options, out: W) -> Self {
        KeyedCollectionDriver { options, out }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Give back the report sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run the script over both table kinds, unordered first.
    pub fn run_all(
        &mut self,
        unordered: UnorderedTable,
        hashed: OrderedHashTable,
    ) -> Result<(RunSummary, RunSummary)> {
        let first = self.run(unordered)?;
        writeln!(self.out)?;
        let second = self.run(hashed)?;
        Ok((first, second))
    }

    /// Run the script over one table.
    pub fn run<L: BucketLayout>(&mut self, table: KeyedTable<L>) -> Result<RunSummary> {
        let initial_len = table.len();
        info!("{}: starting run with {initial_len} entries", L::NAME);
        writeln!(self.out, "========= {} =========", L::NAME)?;
        writeln!(self.out, "Initial size: {initial_len}")?;

        let key_lookup_before_sort = self.find_by_key(&table)?;
        let payload_lookup_before_sort = self.find_by_payload(&table)?;

        self.print(&table)?;
        let (table, sorted_keys) = self.sort(table)?;
        self.print(&table)?;

        info!("{}: re-running lookups on rebuilt table", L::NAME);
        let key_lookup_after_sort = self.find_by_key(&table)?;
        let payload_lookup_after_sort = self.find_by_payload(&table)?;

        let mut table = table;
        self.add(&mut table)?;
        let removed_by_key = self.remove_by_key(&mut table)?;
        let removed_by_payload = self.remove_by_payload(&mut table)?;

        let final_len = table.len();
        writeln!(self.out, "Final size: {final_len}")?;
        info!("{}: finished run, {initial_len} -> {final_len} entries", L::NAME);

        Ok(RunSummary {
            layout: L::NAME,
            initial_len,
            key_lookup_before_sort,
            payload_lookup_before_sort,
            sorted_keys,
            key_lookup_after_sort,
            payload_lookup_after_sort,
            removed_by_key,
            removed_by_payload,
            final_len,
        })
    }

    fn find_by_key<L: BucketLayout>(&mut self, table: &KeyedTable<L>) -> Result<Option<Payload>> {
        let key = &self.options.search_key;
        let start = Instant::now();
        let found = table.lookup_by_key(key).cloned();
        report_elapsed(&mut self.out, start, &format!("lookup by key in {}", L::NAME))?;

        match &found {
            Some(payload) => writeln!(
                self.out,
                "Entry with key '{key}' found. Payload: {}",
                payload.as_deref().unwrap_or("null")
            )?,
            None => writeln!(self.out, "Entry with key '{key}' is absent from {}.", L::NAME)?,
        }
        Ok(found)
    }

    fn find_by_payload<L: BucketLayout>(
        &mut self,
        table: &KeyedTable<L>,
    ) -> Result<Option<OrderedKey>> {
        let payload = self.options.search_payload.as_str();
        let start = Instant::now();
        let found = table.lookup_by_payload(Some(payload)).map(|entry| entry.key.clone());
        let label = format!("binary search by payload in {}", L::NAME);
        report_elapsed(&mut self.out, start, &label)?;

        match &found {
            Some(key) => writeln!(self.out, "Payload '{payload}' found. Key: {key}")?,
            None => writeln!(self.out, "Payload '{payload}' is absent from {}.", L::NAME)?,
        }
        Ok(found)
    }

    fn print<L: BucketLayout>(&mut self, table: &KeyedTable<L>) -> Result<()> {
        writeln!(self.out, "\n=== Entries in {} ===", L::NAME)?;
        let start = Instant::now();
        if table.is_empty() {
            writeln!(self.out, "  empty table")?;
        }
        for entry in table {
            writeln!(self.out, "  {entry}")?;
        }
        report_elapsed(&mut self.out, start, &format!("printing entries of {}", L::NAME))?;
        Ok(())
    }

    fn sort<L: BucketLayout>(
        &mut self,
        table: KeyedTable<L>,
    ) -> Result<(KeyedTable<L>, Vec<OrderedKey>)> {
        let start = Instant::now();
        let rebuilt = table.sort_by_key_with_order();
        report_elapsed(&mut self.out, start, &format!("sorting {} by key", L::NAME))?;
        Ok(rebuilt)
    }

    fn add<L: BucketLayout>(&mut self, table: &mut KeyedTable<L>) -> Result<()> {
        let key = self.options.key_to_add.clone();
        let payload = self.options.payload_to_add.clone();
        let start = Instant::now();
        table.insert(key.clone(), Some(payload.clone()));
        report_elapsed(&mut self.out, start, &format!("inserting into {}", L::NAME))?;

        writeln!(self.out, "Inserted entry: key='{key}', payload='{payload}'")?;
        Ok(())
    }

    fn remove_by_key<L: BucketLayout>(
        &mut self,
        table: &mut KeyedTable<L>,
    ) -> Result<Option<Payload>> {
        let key = &self.options.search_key;
        let start = Instant::now();
        let removed = table.remove_by_key(key);
        report_elapsed(&mut self.out, start, &format!("removing by key from {}", L::NAME))?;

        match &removed {
            Some(payload) => writeln!(
                self.out,
                "Removed entry with key '{key}'. Payload was: {}",
                payload.as_deref().unwrap_or("null")
            )?,
            None => writeln!(self.out, "Key '{key}' not found for removal.")?,
        }
        Ok(removed)
    }

    fn remove_by_payload<L: BucketLayout>(&mut self, table: &mut KeyedTable<L>) -> Result<usize> {
        let payload = self.options.search_payload.as_str();
        let start = Instant::now();
        let removed = table.remove_by_payload(Some(payload));
        let label = format!("removing by payload from {}", L::NAME);
        report_elapsed(&mut self.out, start, &label)?;

        writeln!(self.out, "Removed {removed} entries with payload '{payload}'")?;
        Ok(removed)
    }
}
