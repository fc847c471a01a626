use compact_str::CompactString;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    record: Option<usize>,
}

/// Hosts stored label-reversed (`com` → `example` → `shop`), so walking a
/// queried host from its TLD visits every parent domain on a label boundary.
#[derive(Default)]
pub struct SuffixTrie {
    root: TrieNode,
    len: usize,
}

impl SuffixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `host` for the record at `position`. The first position
    /// inserted for a host is kept.
    pub fn insert(&mut self, host: &str, position: usize) {
        let mut node = &mut self.root;
        for label in host.split('.').rev() {
            node = node.children.entry(CompactString::new(label)).or_default();
        }
        if node.record.is_none() {
            node.record = Some(position);
            self.len += 1;
        }
    }

    /// Record position for `host`. Exact match wins; otherwise the
    /// lowest-positioned parent domain.
    #[inline]
    pub fn lookup(&self, host: &str) -> Option<usize> {
        let labels: SmallVec<[&str; 8]> = host.split('.').rev().collect();
        let n = labels.len();
        let mut node = &self.root;
        let mut parent: Option<usize> = None;

        for (i, label) in labels.iter().enumerate() {
            match node.children.get(*label) {
                Some(child) => {
                    if let Some(position) = child.record {
                        if i + 1 == n {
                            return Some(position);
                        }
                        parent = Some(parent.map_or(position, |p| p.min(position)));
                    }
                    node = child;
                }
                None => break,
            }
        }

        parent
    }

    /// Number of distinct hosts stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
