//! An Adaptive Radix Tree (ART): an ordered, byte-indexed, in-memory index
//! mapping variable-length byte keys to values.
//!
//! Inner nodes adapt their layout to their fan-out (Node4, Node16, Node48,
//! Node256), paths are compressed into per-node prefixes, and leaves own
//! their complete keys, giving trie-shaped ordered storage with O(key
//! length) operations and far better space behavior than a plain trie.
//!
//! The main entry point is [`AdaptiveRadixTree`]; [`ArrayKey`] adapts
//! integers and strings into order-preserving byte keys.

pub mod keys;
pub mod mapping;
mod node;
mod prefix;
pub mod stats;
pub mod tree;
pub mod utils;

pub use keys::ArrayKey;
pub use prefix::MAX_PREFIX_LEN;
pub use tree::AdaptiveRadixTree;
