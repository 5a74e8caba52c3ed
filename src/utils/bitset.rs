use num_traits::PrimInt;

pub trait BitsetTrait: Default {
    fn first_empty(&self) -> Option<usize>;
    fn set(&mut self, pos: usize);
    fn unset(&mut self, pos: usize);
    fn check(&self, pos: usize) -> bool;
    fn clear(&mut self);
    fn is_empty(&self) -> bool;
    fn size(&self) -> usize;
    fn capacity(&self) -> usize;
    fn as_bitmask(&self) -> u128;
}

// TODO: The bulk of these parameters can be deleted and automatically derived when
// generic_const_exprs lands in stable.
pub struct Bitset<
    StorageType,
    const BIT_WIDTH: usize,
    const SHIFT: usize,
    const STORAGE_WIDTH: usize,
> where
    StorageType: PrimInt,
{
    bitset: [StorageType; STORAGE_WIDTH],
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize>
    Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    pub fn new() -> Self {
        Self {
            bitset: [StorageType::min_value(); STORAGE_WIDTH],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bitset.iter().enumerate().flat_map(|(i, b)| {
            (0..BIT_WIDTH).filter_map(move |j| {
                let b: u64 = b.to_u64().unwrap();
                if b & (1 << j) != 0 {
                    Some((i << SHIFT) + j)
                } else {
                    None
                }
            })
        })
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize>
    BitsetTrait for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    fn first_empty(&self) -> Option<usize> {
        for (i, b) in self.bitset.iter().enumerate() {
            if b.is_zero() {
                return Some(i << SHIFT);
            }
            if *b != StorageType::max_value() {
                return Some((i << SHIFT) + b.trailing_ones() as usize);
            }
        }
        None
    }

    #[inline]
    fn set(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let v = self.bitset[pos >> SHIFT];
        let shift: StorageType = StorageType::one() << (pos % BIT_WIDTH);
        self.bitset[pos >> SHIFT] = v.bitor(shift);
    }

    #[inline]
    fn unset(&mut self, pos: usize) {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let v = self.bitset[pos >> SHIFT];
        let shift = StorageType::one() << (pos % BIT_WIDTH);
        self.bitset[pos >> SHIFT] = v & shift.not();
    }

    #[inline]
    fn check(&self, pos: usize) -> bool {
        assert!(pos < STORAGE_WIDTH * BIT_WIDTH);
        let shift: StorageType = StorageType::one() << (pos % BIT_WIDTH);
        !(self.bitset[pos >> SHIFT] & shift).is_zero()
    }

    #[inline]
    fn clear(&mut self) {
        self.bitset.fill(StorageType::zero());
    }

    fn is_empty(&self) -> bool {
        self.bitset.iter().all(|x| x.is_zero())
    }

    fn size(&self) -> usize {
        self.bitset.iter().map(|x| x.count_ones() as usize).sum()
    }

    fn capacity(&self) -> usize {
        self.bitset.len() * BIT_WIDTH
    }

    fn as_bitmask(&self) -> u128 {
        assert!(STORAGE_WIDTH * BIT_WIDTH <= 128);
        let mut mask = 0u128;
        for (i, b) in self.bitset.iter().enumerate() {
            mask |= b.to_u128().unwrap() << (i * BIT_WIDTH);
        }
        mask
    }
}

impl<StorageType, const BIT_WIDTH: usize, const SHIFT: usize, const STORAGE_WIDTH: usize> Default
    for Bitset<StorageType, BIT_WIDTH, SHIFT, STORAGE_WIDTH>
where
    StorageType: PrimInt,
{
    fn default() -> Self {
        Self::new()
    }
}

pub type Bitset64<const STORAGE_WIDTH_U64: usize> = Bitset<u64, 64, 6, STORAGE_WIDTH_U64>;
pub type Bitset16<const STORAGE_WIDTH_U16: usize> = Bitset<u16, 16, 4, STORAGE_WIDTH_U16>;
pub type Bitset8<const STORAGE_WIDTH_U8: usize> = Bitset<u8, 8, 3, STORAGE_WIDTH_U8>;

#[cfg(test)]
mod tests {
    use crate::utils::bitset::BitsetTrait;

    #[test]
    fn test_first_free_8s() {
        let mut bs = super::Bitset8::<4>::new();
        bs.set(1);
        bs.set(3);
        assert_eq!(bs.first_empty(), Some(0));
        bs.set(0);
        assert_eq!(bs.first_empty(), Some(2));

        // Now fill it up and verify none.
        for i in 0..bs.capacity() {
            bs.set(i);
        }
        assert_eq!(bs.first_empty(), None);
    }

    #[test]
    fn test_set_unset_check() {
        let mut bs = super::Bitset16::<1>::new();
        assert!(bs.is_empty());
        bs.set(7);
        assert!(bs.check(7));
        assert_eq!(bs.size(), 1);
        bs.unset(7);
        assert!(!bs.check(7));
        assert!(bs.is_empty());
    }

    #[test]
    fn test_iter_16s() {
        let mut bs = super::Bitset16::<4>::new();
        bs.set(0);
        bs.set(1);
        bs.set(2);
        bs.set(4);
        bs.set(8);
        bs.set(16);
        let v: Vec<usize> = bs.iter().collect();
        assert_eq!(v, vec![0, 1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_bitmask_16() {
        let mut bs = super::Bitset16::<1>::new();
        bs.set(0);
        bs.set(3);
        bs.set(15);
        assert_eq!(bs.as_bitmask(), 0b1000_0000_0000_1001);
    }

    #[test]
    fn test_first_free_64s() {
        let mut bs = super::Bitset64::<4>::new();
        bs.set(1);
        bs.set(3);
        assert_eq!(bs.first_empty(), Some(0));
        bs.set(0);
        assert_eq!(bs.first_empty(), Some(2));
    }
}
