use std::cmp::min;

/// Maximum number of path-compressed bytes an inner node can carry. Byte
/// runs longer than this are spread across a chain of single-child nodes,
/// so a stored prefix is always the exact byte run for its position.
pub const MAX_PREFIX_LEN: usize = 8;

/// The compressed byte run shared by every key reachable below an inner
/// node: up to [`MAX_PREFIX_LEN`] bytes held inline.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Prefix {
    data: [u8; MAX_PREFIX_LEN],
    len: u8,
}

impl Prefix {
    pub(crate) fn from_slice(src: &[u8]) -> Self {
        assert!(src.len() <= MAX_PREFIX_LEN);
        let mut data = [0u8; MAX_PREFIX_LEN];
        data[..src.len()].copy_from_slice(src);
        Self {
            data,
            len: src.len() as u8,
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len as usize
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub(crate) fn at(&self, pos: usize) -> u8 {
        assert!(pos < self.len());
        self.data[pos]
    }

    pub(crate) fn to_slice(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// The first `length` bytes of this prefix.
    pub(crate) fn partial_before(&self, length: usize) -> Self {
        assert!(length <= self.len());
        Self::from_slice(&self.data[..length])
    }

    /// This prefix with its first `start` bytes removed.
    pub(crate) fn partial_after(&self, start: usize) -> Self {
        assert!(start <= self.len());
        Self::from_slice(&self.data[start..self.len()])
    }

    /// Count of leading bytes on which this prefix and `key` agree, bounded
    /// by both lengths. A result shorter than `self.len()` means the key
    /// diverges from (or ends inside) the compressed run.
    pub(crate) fn prefix_length_slice(&self, key: &[u8]) -> usize {
        let len = min(self.len(), key.len());
        let mut idx = 0;
        while idx < len {
            if self.data[idx] != key[idx] {
                break;
            }
            idx += 1;
        }
        idx
    }
}

impl std::fmt::Debug for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Prefix").field(&self.to_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::prefix::Prefix;

    #[test]
    fn common_prefix_bounds() {
        let p = Prefix::from_slice(b"abcde");
        assert_eq!(p.prefix_length_slice(b"abcde"), 5);
        assert_eq!(p.prefix_length_slice(b"abcdefgh"), 5);
        assert_eq!(p.prefix_length_slice(b"abx"), 2);
        assert_eq!(p.prefix_length_slice(b"ab"), 2);
        assert_eq!(p.prefix_length_slice(b""), 0);
        assert_eq!(p.prefix_length_slice(b"xyz"), 0);
    }

    #[test]
    fn before_after() {
        let p = Prefix::from_slice(b"abcde");
        assert_eq!(p.partial_before(2).to_slice(), b"ab");
        assert_eq!(p.partial_after(3).to_slice(), b"de");
        assert_eq!(p.partial_after(5).to_slice(), b"");
        assert_eq!(p.at(4), b'e');
    }
}
