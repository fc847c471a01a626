mod index;
mod record;
mod suffix_trie;

pub use index::BlocklistIndex;
pub use record::BlocklistRecord;
pub use suffix_trie::SuffixTrie;
