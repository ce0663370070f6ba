//! Bitset backing the game state

/// Packed bitset over `len` cells
/// Uses `ceil(len / 64)` words; bits past `len` stay zero
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: Vec<u64>,
    len: usize,
}

impl Bitboard {
    /// Create empty bitboard
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Number of addressable cells
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Set a bit at cell
    #[inline]
    pub fn set(&mut self, cell: usize) {
        debug_assert!(cell < self.len);
        self.bits[cell / 64] |= 1u64 << (cell % 64);
    }

    /// Clear a bit at cell
    #[inline]
    pub fn clear(&mut self, cell: usize) {
        debug_assert!(cell < self.len);
        self.bits[cell / 64] &= !(1u64 << (cell % 64));
    }

    /// Check if bit is set at cell
    #[inline]
    pub fn get(&self, cell: usize) -> bool {
        debug_assert!(cell < self.len);
        (self.bits[cell / 64] >> (cell % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Iterate over set cells in ascending order
    pub fn iter_ones(&self) -> BitboardIter<'_> {
        BitboardIter {
            bits: &self.bits,
            word_idx: 0,
            current_word: self.bits.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter<'a> {
    bits: &'a [u64],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= self.bits.len() {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let bit_pos = self.current_word.trailing_zeros() as usize;
        self.current_word &= self.current_word - 1;
        Some(self.word_idx * 64 + bit_pos)
    }
}
