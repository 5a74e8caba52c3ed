use std::mem::MaybeUninit;

use crate::utils::bitset::BitsetTrait;

/// A fixed-capacity array of optional slots, with occupancy tracked in a
/// bitset. Slot storage is uninitialized until its occupancy bit is set, so
/// no sentinel value can ever be confused with live data.
pub struct BitArray<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> {
    bitset: BitsetType,
    storage: [MaybeUninit<X>; RANGE_WIDTH],
}

impl<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> BitArray<X, RANGE_WIDTH, BitsetType> {
    pub fn new() -> Self {
        let s = Self {
            bitset: BitsetType::default(),
            storage: unsafe { MaybeUninit::uninit().assume_init() },
        };
        assert!(s.bitset.capacity() >= RANGE_WIDTH);
        s
    }

    #[inline]
    pub fn first_free_pos(&self) -> Option<usize> {
        self.bitset.first_empty().filter(|pos| *pos < RANGE_WIDTH)
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_ref() })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut X> {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            Some(unsafe { self.storage[pos].assume_init_mut() })
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, pos: usize, x: X) {
        assert!(pos < RANGE_WIDTH);
        if self.bitset.check(pos) {
            unsafe { self.storage[pos].assume_init_drop() };
        }
        self.storage[pos].write(x);
        self.bitset.set(pos);
    }

    #[inline]
    pub fn erase(&mut self, pos: usize) -> Option<X> {
        assert!(pos < RANGE_WIDTH);
        if !self.bitset.check(pos) {
            return None;
        }
        let old = std::mem::replace(&mut self.storage[pos], MaybeUninit::uninit());
        self.bitset.unset(pos);
        Some(unsafe { old.assume_init() })
    }

    pub fn clear(&mut self) {
        for i in 0..RANGE_WIDTH {
            if self.bitset.check(i) {
                unsafe { self.storage[i].assume_init_drop() }
            }
        }
        self.bitset.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.bitset.is_empty()
    }

    pub fn size(&self) -> usize {
        self.bitset.size()
    }

    pub fn iter_keys(&self) -> impl Iterator<Item = usize> + '_ {
        (0..RANGE_WIDTH).filter(|pos| self.bitset.check(*pos))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &X)> {
        self.storage.iter().enumerate().filter_map(|(pos, x)| {
            if self.bitset.check(pos) {
                Some((pos, unsafe { x.assume_init_ref() }))
            } else {
                None
            }
        })
    }
}

impl<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> Default
    for BitArray<X, RANGE_WIDTH, BitsetType>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<X, const RANGE_WIDTH: usize, BitsetType: BitsetTrait> Drop
    for BitArray<X, RANGE_WIDTH, BitsetType>
{
    fn drop(&mut self) {
        for i in 0..RANGE_WIDTH {
            if self.bitset.check(i) {
                unsafe { self.storage[i].assume_init_drop() }
            }
        }
        self.bitset.clear();
    }
}
