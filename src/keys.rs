//! Key adapters for the byte-sequence tree API.
//!
//! The tree itself takes any `AsRef<[u8]>`; these types build byte keys from
//! values that are not naturally byte sequences. Integer conversions use
//! big-endian, sign-bit-flipped encodings so that numeric order and
//! lexicographic byte order agree. No terminator byte is ever appended:
//! keys carry explicit lengths everywhere.

/// A fixed-capacity key that stores up to `N` bytes on the stack.
///
/// Cheap to build and copy, useful for numeric keys or short strings with a
/// known maximum length.
///
/// # Examples
///
/// ```rust
/// use artree::{AdaptiveRadixTree, ArrayKey};
///
/// let mut tree = AdaptiveRadixTree::new();
/// tree.insert(ArrayKey::<8>::from(42u64), "answer");
/// assert_eq!(tree.get(ArrayKey::<8>::from(42u64)), Some(&"answer"));
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct ArrayKey<const N: usize> {
    data: [u8; N],
    len: usize,
}

impl<const N: usize> ArrayKey<N> {
    pub fn new_from_slice(data: &[u8]) -> Self {
        assert!(data.len() <= N, "data length is greater than array length");
        let mut arr = [0; N];
        arr[..data.len()].copy_from_slice(data);
        Self {
            data: arr,
            len: data.len(),
        }
    }

    pub fn new_from_str(s: &str) -> Self {
        Self::new_from_slice(s.as_bytes())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl<const N: usize> AsRef<[u8]> for ArrayKey<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

impl<const N: usize> PartialOrd for ArrayKey<N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for ArrayKey<N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<const N: usize> From<&str> for ArrayKey<N> {
    fn from(data: &str) -> Self {
        Self::new_from_str(data)
    }
}

impl<const N: usize> From<&String> for ArrayKey<N> {
    fn from(data: &String) -> Self {
        Self::new_from_str(data)
    }
}

macro_rules! impl_from_unsigned {
    ( $($t:ty),* ) => {
    $(
    impl<const N: usize> From< $t > for ArrayKey<N>
    {
        fn from(data: $t) -> Self {
            Self::new_from_slice(data.to_be_bytes().as_ref())
        }
    }
    impl<const N: usize> From< &$t > for ArrayKey<N>
    {
        fn from(data: &$t) -> Self {
            (*data).into()
        }
    }
    ) *
    }
}
impl_from_unsigned!(u8, u16, u32, u64, usize, u128);

macro_rules! impl_from_signed {
    ( $t:ty, $tu:ty ) => {
        impl<const N: usize> From<$t> for ArrayKey<N> {
            fn from(val: $t) -> Self {
                // Flip the sign bit so negative values sort below positive
                // ones in unsigned byte order.
                let v = val as $tu;
                let sign_bit = 1 << (std::mem::size_of::<$tu>() * 8 - 1);
                ArrayKey::new_from_slice((v ^ sign_bit).to_be_bytes().as_ref())
            }
        }

        impl<const N: usize> From<&$t> for ArrayKey<N> {
            fn from(val: &$t) -> Self {
                (*val).into()
            }
        }
    };
}

impl_from_signed!(i8, u8);
impl_from_signed!(i16, u16);
impl_from_signed!(i32, u32);
impl_from_signed!(i64, u64);
impl_from_signed!(i128, u128);
impl_from_signed!(isize, usize);
