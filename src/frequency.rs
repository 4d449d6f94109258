use std::collections::BTreeMap;
use std::io::{ErrorKind, Read};

use crate::error::Result;

const READ_CHUNK: usize = 8 * 1024;

/// Occurrence counts for every byte seen in an input.
///
/// Only observed bytes have entries, so a zero count never appears and
/// the counts always add up to the number of bytes read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = FrequencyTable::default();
        table.count_all(bytes);
        table
    }

    /// Count every byte of `reader` until it is exhausted.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut table = FrequencyTable::default();
        for_each_chunk(reader, |chunk| {
            table.count_all(chunk);
            Ok(())
        })?;
        Ok(table)
    }

    fn count_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            *self.counts.entry(byte).or_insert(0) += 1;
        }
        self.total += bytes.len() as u64;
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts.get(&byte).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&byte, &count)| (byte, count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    /// Builds a table from explicit counts. Zero counts are dropped and
    /// repeated symbols accumulate.
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable::default();
        for (byte, count) in iter.into_iter().filter(|&(_, count)| count > 0) {
            *table.counts.entry(byte).or_insert(0) += count;
            table.total += count;
        }
        table
    }
}

/// Feeds `reader` to `f` in chunks until end of input, retrying
/// interrupted reads.
pub(crate) fn for_each_chunk<R, F>(reader: &mut R, mut f: F) -> Result<()>
where
    R: Read,
    F: FnMut(&[u8]) -> Result<()>,
{
    let mut buf = [0u8; READ_CHUNK];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => f(&buf[..n])?,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
