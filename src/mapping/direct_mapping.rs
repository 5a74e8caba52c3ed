use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::NodeMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::Bitset64;

/// Maps a key directly to a child slot; the key byte is the slot index.
/// Used for Node256.
pub struct DirectMapping<N> {
    pub(crate) children: Box<BitArray<N, 256, Bitset64<4>>>,
    num_children: usize,
}

impl<N> Default for DirectMapping<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectMapping<N> {
    pub fn new() -> Self {
        Self {
            children: Box::new(BitArray::new()),
            num_children: 0,
        }
    }

    /// Promotion from an indexed mapping, stealing its children.
    pub fn from_indexed<const WIDTH: usize>(im: &mut IndexedMapping<N, WIDTH>) -> Self {
        let mut new_mapping = DirectMapping::<N>::new();
        im.move_into(&mut new_mapping);
        new_mapping
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.children.iter().map(|(key, node)| (key as u8, node))
    }
}

impl<N> NodeMapping<N> for DirectMapping<N> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        debug_assert!(self.children.get(key as usize).is_none());
        self.children.set(key as usize, node);
        self.num_children += 1;
    }

    #[inline]
    fn seek_child(&self, key: u8) -> Option<&N> {
        self.children.get(key as usize)
    }

    #[inline]
    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        self.children.get_mut(key as usize)
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.num_children
    }

    #[inline]
    fn width(&self) -> usize {
        256
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::indexed_mapping::IndexedMapping;
    use crate::mapping::NodeMapping;

    #[test]
    fn direct_mapping_test() {
        let mut dm = super::DirectMapping::new();
        for i in 0..=255u8 {
            dm.add_child(i, i);
            assert_eq!(*dm.seek_child(i).unwrap(), i);
        }
        assert_eq!(dm.num_children(), 256);
    }

    #[test]
    fn test_from_indexed() {
        let mut im = IndexedMapping::<u8, 48>::new();
        for i in 0..48 {
            im.add_child(i * 5, i);
        }
        let dm = super::DirectMapping::from_indexed(&mut im);
        assert_eq!(dm.num_children(), 48);
        for i in 0..48u8 {
            assert_eq!(dm.seek_child(i * 5), Some(&i));
        }
        assert_eq!(im.num_children(), 0);
    }
}
