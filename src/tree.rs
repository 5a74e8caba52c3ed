//! Adaptive Radix Tree implementation.
//!
//! This module contains the main [`AdaptiveRadixTree`] type: the iterative
//! descent for lookups, and the insertion algorithm that splits, grows and
//! replaces nodes in place.

use crate::node::{Content, LeafData, Node};
use crate::prefix::{Prefix, MAX_PREFIX_LEN};
use crate::stats::{finalize_tree_stats, update_tree_stats, TreeStats};

/// An Adaptive Radix Tree (ART): an ordered, byte-indexed map from
/// variable-length byte keys to values.
///
/// Inner nodes adapt their representation to their fan-out (4, 16, 48 or 256
/// children) and carry up to eight path-compressed prefix bytes; leaves own
/// their complete key, so a final byte-for-byte comparison at the leaf
/// decides every match. Lookups and inserts cost O(key length) regardless of
/// how many entries the tree holds.
///
/// Keys are plain byte sequences compared byte-for-byte with explicit
/// lengths; there is no terminator convention, so binary keys containing
/// zero bytes, empty keys, and keys that are strict prefixes of one another
/// are all fine. For integer keys in order-preserving form see
/// [`ArrayKey`](crate::keys::ArrayKey).
///
/// The tree is single-threaded: callers must serialize all mutation.
///
/// # Examples
///
/// ```rust
/// use artree::AdaptiveRadixTree;
///
/// let mut tree = AdaptiveRadixTree::new();
/// tree.insert("apple", 100);
/// tree.insert("apricot", 101);
///
/// assert_eq!(tree.get("apple"), Some(&100));
/// assert_eq!(tree.get("pear"), None);
///
/// // Re-inserting a key overwrites and returns the old value.
/// assert_eq!(tree.insert("apple", 1), Some(100));
/// ```
pub struct AdaptiveRadixTree<V> {
    root: Option<Node<V>>,
    num_entries: usize,
}

impl<V> Default for AdaptiveRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> AdaptiveRadixTree<V> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            num_entries: 0,
        }
    }

    /// True if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of entries stored in the tree.
    pub fn len(&self) -> usize {
        self.num_entries
    }

    /// Get a value by key. Absence is a normal outcome, not an error.
    #[inline]
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        let key = key.as_ref();
        let mut cur_node = self.root.as_ref()?;
        let mut depth = 0;
        loop {
            if let Content::Leaf(leaf) = &cur_node.content {
                // The leaf's full stored key is the authority on a match.
                return leaf.matches_key(key).then_some(&leaf.value);
            }

            let prefix_common_match = cur_node.prefix.prefix_length_slice(&key[depth..]);
            if prefix_common_match < cur_node.prefix.len() {
                return None;
            }
            depth += prefix_common_match;

            if depth == key.len() {
                let terminal = cur_node.terminal.as_ref()?;
                return terminal.matches_key(key).then_some(&terminal.value);
            }

            cur_node = cur_node.seek_child(key[depth])?;
            depth += 1;
        }
    }

    /// Get a mutable reference to a value by key.
    #[inline]
    pub fn get_mut<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&mut V> {
        let key = key.as_ref();
        let mut cur_node = self.root.as_mut()?;
        let mut depth = 0;
        loop {
            if cur_node.is_leaf() {
                let Content::Leaf(leaf) = &mut cur_node.content else {
                    unreachable!()
                };
                return leaf.matches_key(key).then_some(&mut leaf.value);
            }

            let prefix_common_match = cur_node.prefix.prefix_length_slice(&key[depth..]);
            if prefix_common_match < cur_node.prefix.len() {
                return None;
            }
            depth += prefix_common_match;

            if depth == key.len() {
                let terminal = cur_node.terminal.as_mut()?;
                return terminal.matches_key(key).then_some(&mut terminal.value);
            }

            cur_node = cur_node.seek_child_mut(key[depth])?;
            depth += 1;
        }
    }

    /// Insert a key-value pair.
    ///
    /// Follows standard Rust container conventions: inserting over an
    /// existing key overwrites its value in place and returns the old value.
    ///
    /// # Returns
    ///
    /// - `Some(old_value)` if a previous value was replaced
    /// - `None` if this was a new key
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Option<V> {
        let key = key.as_ref();
        let replaced = match self.root.as_mut() {
            None => {
                self.root = Some(Node::new_leaf(key, value));
                None
            }
            Some(root) => Self::insert_iterate(root, key, value),
        };
        if replaced.is_none() {
            self.num_entries += 1;
        }
        replaced
    }

    /// Gather structural statistics by walking the whole tree.
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        if let Some(root) = &self.root {
            update_tree_stats(&mut stats, root, 1);
        }
        finalize_tree_stats(&mut stats);
        stats
    }

    /// Iterative descent for insert. `cur_node` plays the role of the
    /// mutable slot the parent holds: splits and promotions replace the node
    /// behind it in place, and child ownership is handed to the replacement
    /// before the old node goes away.
    fn insert_iterate(mut cur_node: &mut Node<V>, key: &[u8], value: V) -> Option<V> {
        let mut depth = 0;
        loop {
            // An existing leaf: overwrite on an exact match, otherwise break
            // the leaf up into a branch holding both entries.
            if cur_node.is_leaf() {
                let Content::Leaf(leaf) = &mut cur_node.content else {
                    unreachable!()
                };
                if leaf.matches_key(key) {
                    return Some(std::mem::replace(&mut leaf.value, value));
                }
                Self::split_leaf(cur_node, key, depth, value);
                return None;
            }

            let prefix_common_match = cur_node.prefix.prefix_length_slice(&key[depth..]);

            // The key diverges from (or ends inside) this node's compressed
            // prefix: split the prefix at the divergence point.
            if prefix_common_match < cur_node.prefix.len() {
                Self::split_prefix(cur_node, key, depth, prefix_common_match, value);
                return None;
            }

            depth += prefix_common_match;

            // The key ends exactly at this node's span: it lives in the
            // terminal slot, not under any discriminating byte.
            if depth == key.len() {
                if let Some(terminal) = cur_node.terminal.as_mut() {
                    debug_assert!(terminal.matches_key(key));
                    return Some(std::mem::replace(&mut terminal.value, value));
                }
                cur_node.terminal = Some(Box::new(LeafData::new(key, value)));
                return None;
            }

            let k = key[depth];
            if cur_node.seek_child(k).is_none() {
                // No child for this byte; add_child promotes the node first
                // if it is at capacity.
                cur_node.add_child(k, Node::new_leaf(key, value));
                return None;
            }
            cur_node = cur_node.seek_child_mut(k).unwrap();
            depth += 1;
        }
    }

    /// Replace a leaf with a branch holding both the existing entry and the
    /// new one. The byte run the two keys share below `depth` becomes
    /// compressed prefix; a run longer than [`MAX_PREFIX_LEN`] is spread
    /// over a chain of single-child nodes so every stored prefix stays
    /// exact. Whichever key has no discriminating byte left lands in the
    /// terminal slot.
    fn split_leaf(node: &mut Node<V>, key: &[u8], depth: usize, value: V) {
        let old = std::mem::replace(node, Node::new_inner(Prefix::default()));
        let Content::Leaf(existing) = old.content else {
            unreachable!()
        };
        debug_assert!(!existing.matches_key(key));

        let mut common = longest_common_run(&existing.key[depth..], &key[depth..]);
        let mut cur_node = node;
        let mut at = depth;
        while common > MAX_PREFIX_LEN {
            cur_node.prefix = Prefix::from_slice(&key[at..at + MAX_PREFIX_LEN]);
            let edge = key[at + MAX_PREFIX_LEN];
            cur_node.add_child(edge, Node::new_inner(Prefix::default()));
            cur_node = cur_node.seek_child_mut(edge).unwrap();
            at += MAX_PREFIX_LEN + 1;
            common -= MAX_PREFIX_LEN + 1;
        }
        cur_node.prefix = Prefix::from_slice(&key[at..at + common]);
        at += common;

        let new_leaf = Box::new(LeafData::new(key, value));
        for leaf in [existing, new_leaf] {
            if leaf.key.len() == at {
                debug_assert!(cur_node.terminal.is_none());
                cur_node.terminal = Some(leaf);
            } else {
                let edge = leaf.key[at];
                cur_node.add_child(
                    edge,
                    Node {
                        prefix: Prefix::default(),
                        terminal: None,
                        content: Content::Leaf(leaf),
                    },
                );
            }
        }
    }

    /// Split an inner node whose compressed prefix disagrees with the key
    /// after `prefix_common_match` bytes. The shared slice moves to a new
    /// parent; the old node keeps the remainder of its prefix minus its new
    /// discriminating byte, and the new entry joins it as a sibling (or as
    /// the parent's terminal when the key is exhausted).
    fn split_prefix(
        node: &mut Node<V>,
        key: &[u8],
        depth: usize,
        prefix_common_match: usize,
        value: V,
    ) {
        let parent_prefix = node.prefix.partial_before(prefix_common_match);
        let old_node_edge = node.prefix.at(prefix_common_match);
        node.prefix = node.prefix.partial_after(prefix_common_match + 1);

        let old_node = std::mem::replace(node, Node::new_inner(parent_prefix));
        node.add_child(old_node_edge, old_node);

        if depth + prefix_common_match == key.len() {
            node.terminal = Some(Box::new(LeafData::new(key, value)));
        } else {
            node.add_child(key[depth + prefix_common_match], Node::new_leaf(key, value));
        }
    }
}

/// Count of leading bytes on which the two slices agree.
fn longest_common_run(a: &[u8], b: &[u8]) -> usize {
    let len = a.len().min(b.len());
    let mut idx = 0;
    while idx < len {
        if a[idx] != b[idx] {
            break;
        }
        idx += 1;
    }
    idx
}
