// Bit stream
//------------------------------------------------------------------------------

/// Append-only bit buffer packed MSB first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity.div_ceil(8)), len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pushes the lowest `size` bits of `bits`, most significant first.
    pub fn push_bits(&mut self, bits: u16, size: usize) {
        debug_assert!(size <= 16, "Bit count exceeds 16: {size}");
        debug_assert!(
            size == 16 || bits >> size == 0,
            "Bits don't fit in bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & 1 == 1);
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b1000_0000 >> offset;
        }
        self.len += 1;
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_bits(b as u16, 8);
        }
    }

    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len, "Index out of bounds: Index {index}, Len {}", self.len);
        (self.data[index >> 3] >> (7 - (index & 7))) & 1 == 1
    }

    pub fn iter(&self) -> BitIter<'_> {
        BitIter { stream: self, pos: 0 }
    }
}

pub struct BitIter<'a> {
    stream: &'a BitStream,
    pos: usize,
}

impl Iterator for BitIter<'_> {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.stream.len {
            return None;
        }
        let bit = self.stream.get(self.pos);
        self.pos += 1;
        Some(bit)
    }
}

impl<'a> IntoIterator for &'a BitStream {
    type Item = bool;
    type IntoIter = BitIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod bit_stream_tests {
    use super::BitStream;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new(152);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 16);
        bs.push_bits(0b1111111, 7);
        assert_eq!(bs.len(), 23);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new(2);
        bs.push(false);
        assert_eq!(bs.data(), [0b00000000]);
        bs.push(true);
        assert_eq!(bs.data(), [0b01000000]);
    }

    #[test]
    fn test_push_bits_across_bytes() {
        let mut bs = BitStream::new(32);
        bs.push_bits(0b0010, 4);
        bs.push_bits(0b000001011, 9);
        bs.push_bits(0b01100001011, 11);
        assert_eq!(bs.data(), [0b0010_0000, 0b0101_1011, 0b0000_1011]);
        assert_eq!(bs.len(), 24);
    }

    #[test]
    fn test_push_bits_16() {
        let mut bs = BitStream::new(16);
        bs.push_bits(0xabcd, 16);
        assert_eq!(bs.data(), [0xab, 0xcd]);
    }

    #[test]
    fn test_iter() {
        let mut bs = BitStream::new(16);
        bs.extend(&[0b1010_0000]);
        bs.push_bits(0b11, 2);
        let bits = bs.iter().collect::<Vec<_>>();
        assert_eq!(bits, [true, false, true, false, false, false, false, false, true, true]);
        assert_eq!((&bs).into_iter().count(), 10);
    }

    #[test]
    #[should_panic]
    fn test_push_bits_capacity_overflow() {
        let mut bs = BitStream::new(8);
        bs.push_bits(0xff, 8);
        bs.push_bits(1, 1)
    }
}
