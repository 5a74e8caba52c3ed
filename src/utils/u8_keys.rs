use crate::utils::bitset::BitsetTrait;

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
#[inline]
fn x86_64_sse_find_key_16(key: u8, keys: &[u8; 16], bitmask: u16) -> Option<usize> {
    use std::arch::x86_64::{
        __m128i, _mm_cmpeq_epi8, _mm_loadu_si128, _mm_movemask_epi8, _mm_set1_epi8,
    };

    let bitfield = unsafe {
        let key_vec = _mm_set1_epi8(key as i8);
        let results = _mm_cmpeq_epi8(key_vec, _mm_loadu_si128(keys.as_ptr() as *const __m128i));
        _mm_movemask_epi8(results) & bitmask as i32
    };
    if bitfield != 0 {
        let idx = bitfield.trailing_zeros() as usize;
        return Some(idx);
    }
    None
}

/// Find the position of `key` in an unsorted key array of the given width.
/// Empty key slots hold 0xff, so a search for the key byte 0xff must consult
/// the occupancy bitmask to avoid matching a vacant slot.
#[allow(unreachable_code)]
pub fn u8_keys_find_key_position<const WIDTH: usize, Bitset: BitsetTrait>(
    key: u8,
    keys: &[u8],
    children_bitmask: &Bitset,
) -> Option<usize> {
    // SIMD optimized form for 16-wide nodes.
    if WIDTH == 16 {
        #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
        {
            let mask = if key == 255 {
                children_bitmask.as_bitmask() as u16
            } else {
                0xffff
            };
            return x86_64_sse_find_key_16(key, keys.try_into().unwrap(), mask);
        }
    }

    // Fallback to linear search for anything else (which is just WIDTH == 4, or if we have no
    // SIMD support).
    for (i, k) in keys.iter().enumerate() {
        if key == 255 && !children_bitmask.check(i) {
            continue;
        }
        if *k == key {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use crate::utils::bitset::{Bitset16, BitsetTrait};
    use crate::utils::u8_keys::u8_keys_find_key_position;

    #[test]
    fn find_in_16() {
        let mut keys = [255u8; 16];
        let mut occupied = Bitset16::<1>::new();
        for (i, k) in [12u8, 1, 3, 9, 200].iter().enumerate() {
            keys[i] = *k;
            occupied.set(i);
        }
        assert_eq!(
            u8_keys_find_key_position::<16, _>(9, &keys, &occupied),
            Some(3)
        );
        assert_eq!(u8_keys_find_key_position::<16, _>(4, &keys, &occupied), None);
    }

    #[test]
    fn find_0xff_ignores_vacant_slots() {
        let mut keys = [255u8; 16];
        let mut occupied = Bitset16::<1>::new();
        keys[0] = 7;
        occupied.set(0);
        // Slot 1 holds the 255 fill value but is vacant.
        assert_eq!(
            u8_keys_find_key_position::<16, _>(255, &keys, &occupied),
            None
        );
        keys[1] = 255;
        occupied.set(1);
        assert_eq!(
            u8_keys_find_key_position::<16, _>(255, &keys, &occupied),
            Some(1)
        );
    }
}
