use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;
use crate::utils::bitarray::BitArray;
use crate::utils::bitset::{Bitset64, BitsetTrait};

/// Maps a key to a child through a 256-entry byte index into a small child
/// array. Slot occupancy lives in the `BitArray` bitsets rather than an
/// in-band sentinel value, so an index entry is only ever read when its
/// occupancy bit is set. Used for Node48.
pub struct IndexedMapping<N, const WIDTH: usize> {
    child_ptr_indexes: Box<BitArray<u8, 256, Bitset64<4>>>,
    children: Box<BitArray<N, WIDTH, Bitset64<1>>>,
    pub(crate) num_children: u8,
}

impl<N, const WIDTH: usize> Default for IndexedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> IndexedMapping<N, WIDTH> {
    pub fn new() -> Self {
        assert!(WIDTH <= 64, "indexed mappings are at most 64 wide");
        Self {
            child_ptr_indexes: Box::new(BitArray::new()),
            children: Box::new(BitArray::new()),
            num_children: 0,
        }
    }

    /// Promotion from a keyed mapping, stealing its children.
    pub fn from_keyed<const KM_WIDTH: usize>(km: &mut KeyedMapping<N, KM_WIDTH>) -> Self {
        let mut im: IndexedMapping<N, WIDTH> = IndexedMapping::new();
        for i in 0..KM_WIDTH {
            if !km.occupied_bitset.check(i) {
                continue;
            }
            let stolen = std::mem::replace(&mut km.children[i], std::mem::MaybeUninit::uninit());
            im.add_child(km.keys[i], unsafe { stolen.assume_init() });
        }
        km.occupied_bitset.clear();
        km.num_children = 0;
        im
    }

    /// Move every child out of this mapping into `nm`, leaving this mapping
    /// empty. Used by promotion to Node256.
    pub(crate) fn move_into<NM: NodeMapping<N>>(&mut self, nm: &mut NM) {
        for key in self.child_ptr_indexes.iter_keys() {
            let pos = *self.child_ptr_indexes.get(key).unwrap();
            let node = self.children.erase(pos as usize).unwrap();
            nm.add_child(key as u8, node);
        }
        self.child_ptr_indexes.clear();
        self.num_children = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.child_ptr_indexes
            .iter()
            .map(move |(key, pos)| (key as u8, self.children.get(*pos as usize).unwrap()))
    }
}

impl<N, const WIDTH: usize> NodeMapping<N> for IndexedMapping<N, WIDTH> {
    fn add_child(&mut self, key: u8, node: N) {
        let pos = self
            .children
            .first_free_pos()
            .expect("add_child: no space left");
        self.child_ptr_indexes.set(key as usize, pos as u8);
        self.children.set(pos, node);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let pos = self.child_ptr_indexes.get(key as usize)?;
        self.children.get(*pos as usize)
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let pos = self.child_ptr_indexes.get(key as usize)?;
        self.children.get_mut(*pos as usize)
    }

    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline]
    fn width(&self) -> usize {
        WIDTH
    }
}
