use super::record::BlocklistRecord;
use super::suffix_trie::SuffixTrie;
use crate::host::normalize_host;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only match index over an ordered list of blocklist records.
pub struct BlocklistIndex {
    records: Vec<BlocklistRecord>,
    trie: SuffixTrie,
}

impl BlocklistIndex {
    /// Builds the index, canonicalizing every host. Records whose host cannot
    /// be canonicalized are dropped, and so are repeats of an
    /// (employer id, host) pair already seen.
    pub fn new(records: Vec<BlocklistRecord>) -> Self {
        let total = records.len();
        let mut kept: Vec<BlocklistRecord> = Vec::with_capacity(total);
        let mut seen: FxHashSet<(Arc<str>, Arc<str>)> = FxHashSet::default();
        let mut trie = SuffixTrie::new();

        for mut record in records {
            let host = match normalize_host(&record.host) {
                Ok(host) => host,
                Err(e) => {
                    warn!(
                        employer_id = %record.employer_id,
                        host = %record.host,
                        error = %e,
                        "Dropping blocklist record with invalid host"
                    );
                    continue;
                }
            };
            if *record.host != *host {
                record.host = Arc::from(host.as_str());
            }

            if !seen.insert(record.identity()) {
                debug!(
                    employer_id = %record.employer_id,
                    host = %record.host,
                    "Skipping duplicate blocklist record"
                );
                continue;
            }

            trie.insert(&record.host, kept.len());
            kept.push(record);
        }

        if kept.len() != total {
            debug!(total, kept = kept.len(), "Blocklist index built with omissions");
        }

        Self {
            records: kept,
            trie,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// First exact match for the destination's canonical host, otherwise the
    /// first record (in list order) whose host is a parent domain of it.
    /// Unparsable input never matches.
    pub fn find_match(&self, raw_host_or_url: &str) -> Option<&BlocklistRecord> {
        let host = normalize_host(raw_host_or_url).ok()?;
        self.find_canonical(&host)
    }

    /// Same as [`find_match`](Self::find_match) for an already-canonical host.
    #[inline]
    pub fn find_canonical(&self, host: &str) -> Option<&BlocklistRecord> {
        self.trie
            .lookup(host)
            .map(|position| &self.records[position])
    }

    pub fn is_blocked(&self, raw_host_or_url: &str) -> bool {
        self.find_match(raw_host_or_url).is_some()
    }

    pub fn records(&self) -> &[BlocklistRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct hosts (several employers may share one host).
    pub fn host_count(&self) -> usize {
        self.trie.len()
    }
}

impl Default for BlocklistIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for BlocklistIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlocklistIndex")
            .field("records", &self.records.len())
            .field("hosts", &self.trie.len())
            .finish()
    }
}
