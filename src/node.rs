use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::prefix::Prefix;

/// A stored entry: the complete original key (lazy expansion) and its value.
/// The full key makes the byte-for-byte comparison at the leaf the final
/// authority on a match, whatever the compressed prefixes above it said.
pub(crate) struct LeafData<V> {
    pub(crate) key: Box<[u8]>,
    pub(crate) value: V,
}

impl<V> LeafData<V> {
    pub(crate) fn new(key: &[u8], value: V) -> Self {
        Self {
            key: Box::from(key),
            value,
        }
    }

    #[inline(always)]
    pub(crate) fn matches_key(&self, key: &[u8]) -> bool {
        *self.key == *key
    }
}

pub(crate) struct Node<V> {
    pub(crate) prefix: Prefix,
    /// Leaf for the key that ends exactly at this node's span. Only ever set
    /// on inner nodes; this is how a key that is a strict byte-prefix of
    /// another key is stored.
    pub(crate) terminal: Option<Box<LeafData<V>>>,
    pub(crate) content: Content<V>,
}

pub(crate) enum Content<V> {
    Leaf(Box<LeafData<V>>),
    Node4(KeyedMapping<Node<V>, 4>),
    Node16(KeyedMapping<Node<V>, 16>),
    Node48(IndexedMapping<Node<V>, 48>),
    Node256(DirectMapping<Node<V>>),
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_leaf(key: &[u8], value: V) -> Self {
        Self {
            prefix: Prefix::default(),
            terminal: None,
            content: Content::Leaf(Box::new(LeafData::new(key, value))),
        }
    }

    #[inline]
    pub(crate) fn new_inner(prefix: Prefix) -> Self {
        Self {
            prefix,
            terminal: None,
            content: Content::Node4(KeyedMapping::new()),
        }
    }

    pub(crate) fn value(&self) -> Option<&V> {
        let Content::Leaf(leaf) = &self.content else {
            return None;
        };
        Some(&leaf.value)
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        let Content::Leaf(leaf) = &mut self.content else {
            return None;
        };
        Some(&mut leaf.value)
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(&self.content, Content::Leaf(_))
    }

    pub(crate) fn is_inner(&self) -> bool {
        !self.is_leaf()
    }

    pub(crate) fn num_children(&self) -> usize {
        match &self.content {
            Content::Node4(n) => n.num_children(),
            Content::Node16(n) => n.num_children(),
            Content::Node48(n) => n.num_children(),
            Content::Node256(n) => n.num_children(),
            Content::Leaf(_) => 0,
        }
    }

    pub(crate) fn seek_child(&self, key: u8) -> Option<&Node<V>> {
        if self.num_children() == 0 {
            return None;
        }

        match &self.content {
            Content::Node4(km) => km.seek_child(key),
            Content::Node16(km) => km.seek_child(key),
            Content::Node48(im) => im.seek_child(key),
            Content::Node256(dm) => dm.seek_child(key),
            Content::Leaf(_) => None,
        }
    }

    pub(crate) fn seek_child_mut(&mut self, key: u8) -> Option<&mut Node<V>> {
        match &mut self.content {
            Content::Node4(km) => km.seek_child_mut(key),
            Content::Node16(km) => km.seek_child_mut(key),
            Content::Node48(im) => im.seek_child_mut(key),
            Content::Node256(dm) => dm.seek_child_mut(key),
            Content::Leaf(_) => None,
        }
    }

    /// Add a child keyed by its discriminating byte, promoting this node to
    /// the next wider variant first if it is at capacity.
    pub(crate) fn add_child(&mut self, key: u8, node: Node<V>) {
        if self.is_full() {
            self.grow();
        }

        match &mut self.content {
            Content::Node4(km) => km.add_child(key, node),
            Content::Node16(km) => km.add_child(key, node),
            Content::Node48(im) => im.add_child(key, node),
            Content::Node256(dm) => dm.add_child(key, node),
            Content::Leaf(_) => unreachable!("leaves have no children"),
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        match &self.content {
            Content::Node4(km) => self.num_children() >= km.width(),
            Content::Node16(km) => self.num_children() >= km.width(),
            Content::Node48(im) => self.num_children() >= im.width(),
            // Node256 holds every possible discriminating byte; a 257th
            // distinct byte cannot exist.
            Content::Node256(_) => false,
            Content::Leaf(_) => unreachable!("leaves have no children"),
        }
    }

    /// Replace this node's child storage with the next wider variant,
    /// moving every existing child into it. Prefix and terminal stay put.
    fn grow(&mut self) {
        match &mut self.content {
            Content::Node4(km) => {
                self.content = Content::Node16(KeyedMapping::from_resized_grow(km));
            }
            Content::Node16(km) => {
                self.content = Content::Node48(IndexedMapping::from_keyed(km));
            }
            Content::Node48(im) => {
                self.content = Content::Node256(DirectMapping::from_indexed(im));
            }
            Content::Node256(_) => unreachable!("should never grow a node256"),
            Content::Leaf(_) => unreachable!("leaves have no children"),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        match &self.content {
            Content::Node4(_) => 4,
            Content::Node16(_) => 16,
            Content::Node48(_) => 48,
            Content::Node256(_) => 256,
            Content::Leaf(_) => 0,
        }
    }

    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (u8, &Self)> + '_> {
        match &self.content {
            Content::Node4(n) => Box::new(n.iter()),
            Content::Node16(n) => Box::new(n.iter()),
            Content::Node48(n) => Box::new(n.iter()),
            Content::Node256(n) => Box::new(n.iter()),
            Content::Leaf(_) => Box::new(std::iter::empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Node;
    use crate::prefix::Prefix;

    #[test]
    fn test_n4() {
        let mut n4 = Node::new_inner(Prefix::from_slice(b"abc"));
        n4.add_child(5, Node::new_leaf(b"abc5", 1));
        n4.add_child(4, Node::new_leaf(b"abc4", 2));
        n4.add_child(3, Node::new_leaf(b"abc3", 3));
        n4.add_child(2, Node::new_leaf(b"abc2", 4));

        assert_eq!(n4.capacity(), 4);
        assert_eq!(*n4.seek_child(5).unwrap().value().unwrap(), 1);
        assert_eq!(*n4.seek_child(4).unwrap().value().unwrap(), 2);
        assert_eq!(*n4.seek_child(3).unwrap().value().unwrap(), 3);
        assert_eq!(*n4.seek_child(2).unwrap().value().unwrap(), 4);
        assert!(n4.seek_child(1).is_none());
    }

    #[test]
    fn test_grow_4_to_16() {
        let mut node = Node::new_inner(Prefix::default());
        for i in 0..5u8 {
            node.add_child(i, Node::new_leaf(&[i], i));
        }
        assert_eq!(node.capacity(), 16);
        assert_eq!(node.num_children(), 5);
        for i in 0..5u8 {
            assert_eq!(*node.seek_child(i).unwrap().value().unwrap(), i);
        }
    }

    #[test]
    fn test_grow_16_to_48() {
        let mut node = Node::new_inner(Prefix::default());
        // Reverse order; keyed mappings keep insertion order, not sort order.
        for i in (0..17u8).rev() {
            node.add_child(i, Node::new_leaf(&[i], i));
        }
        assert_eq!(node.capacity(), 48);
        assert_eq!(node.num_children(), 17);
        for i in 0..17u8 {
            assert_eq!(*node.seek_child(i).unwrap().value().unwrap(), i);
        }
    }

    #[test]
    fn test_grow_48_to_256() {
        let mut node = Node::new_inner(Prefix::default());
        for i in 0..=255u8 {
            node.add_child(i, Node::new_leaf(&[i], i));
        }
        assert_eq!(node.capacity(), 256);
        assert_eq!(node.num_children(), 256);
        for i in 0..=255u8 {
            assert_eq!(*node.seek_child(i).unwrap().value().unwrap(), i);
        }
    }

    #[test]
    fn test_iter_visits_all_children() {
        let mut node = Node::new_inner(Prefix::default());
        for i in [9u8, 3, 200, 41, 7] {
            node.add_child(i, Node::new_leaf(&[i], i));
        }
        let mut seen: Vec<u8> = node.iter().map(|(k, _)| k).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![3, 7, 9, 41, 200]);
    }
}
