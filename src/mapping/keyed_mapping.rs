use std::mem::MaybeUninit;

use crate::mapping::NodeMapping;
use crate::utils::bitset::{Bitset16, BitsetTrait};
use crate::utils::u8_keys::u8_keys_find_key_position;

/// Maps a key to a node using an unsorted array of keys and a corresponding
/// array of children. Presence of a key at a position means there is a node
/// at the same position in `children`; a bitset tracks which slots are
/// occupied. Lookups are a linear scan (SIMD accelerated at width 16),
/// appends go to the first empty slot. Used for Node4 and Node16.
pub struct KeyedMapping<N, const WIDTH: usize> {
    pub(crate) keys: [u8; WIDTH],
    pub(crate) children: Box<[MaybeUninit<N>; WIDTH]>,
    pub(crate) num_children: u8,
    pub(crate) occupied_bitset: Bitset16<1>,
}

impl<N, const WIDTH: usize> Default for KeyedMapping<N, WIDTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, const WIDTH: usize> KeyedMapping<N, WIDTH> {
    #[inline]
    pub fn new() -> Self {
        assert!(WIDTH <= 16, "keyed mappings are at most 16 wide");
        Self {
            keys: [255; WIDTH],
            children: Box::new(unsafe { MaybeUninit::uninit().assume_init() }),
            num_children: 0,
            occupied_bitset: Default::default(),
        }
    }

    /// Promotion from a narrower keyed mapping: slots carry over verbatim,
    /// occupied or not.
    pub fn from_resized_grow<const OLD_WIDTH: usize>(km: &mut KeyedMapping<N, OLD_WIDTH>) -> Self {
        assert!(WIDTH > OLD_WIDTH);
        let mut new = KeyedMapping::new();

        new.occupied_bitset = std::mem::take(&mut km.occupied_bitset);
        for i in 0..OLD_WIDTH {
            new.keys[i] = km.keys[i];
            new.children[i] = std::mem::replace(&mut km.children[i], MaybeUninit::uninit());
        }
        new.num_children = km.num_children;
        km.num_children = 0;
        new
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, &N)> {
        self.keys
            .iter()
            .enumerate()
            .filter(|p| self.occupied_bitset.check(p.0))
            .map(|(p, k)| (*k, unsafe { self.children[p].assume_init_ref() }))
    }
}

impl<N, const WIDTH: usize> NodeMapping<N> for KeyedMapping<N, WIDTH> {
    #[inline]
    fn add_child(&mut self, key: u8, node: N) {
        let idx = self
            .occupied_bitset
            .first_empty()
            .expect("add_child: no space left");
        assert!(idx < WIDTH);
        self.keys[idx] = key;
        self.children[idx].write(node);
        self.occupied_bitset.set(idx);
        self.num_children += 1;
    }

    fn seek_child(&self, key: u8) -> Option<&N> {
        let idx = u8_keys_find_key_position::<WIDTH, _>(key, &self.keys, &self.occupied_bitset)?;
        if !self.occupied_bitset.check(idx) {
            return None;
        }
        Some(unsafe { self.children[idx].assume_init_ref() })
    }

    fn seek_child_mut(&mut self, key: u8) -> Option<&mut N> {
        let idx = u8_keys_find_key_position::<WIDTH, _>(key, &self.keys, &self.occupied_bitset)?;
        if !self.occupied_bitset.check(idx) {
            return None;
        }
        Some(unsafe { self.children[idx].assume_init_mut() })
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.num_children as usize
    }

    #[inline(always)]
    fn width(&self) -> usize {
        WIDTH
    }
}

impl<N, const WIDTH: usize> Drop for KeyedMapping<N, WIDTH> {
    fn drop(&mut self) {
        for i in self.occupied_bitset.iter() {
            unsafe { self.children[i].assume_init_drop() }
        }
        self.num_children = 0;
        self.occupied_bitset.clear();
    }
}
