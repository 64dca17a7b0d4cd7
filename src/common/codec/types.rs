// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

impl Mode {
    /// Picks the densest single mode able to represent every character of the data.
    pub fn detect(data: &[u8]) -> Self {
        if data.iter().all(|&b| Self::Numeric.contains(b)) {
            Self::Numeric
        } else if data.iter().all(|&b| Self::Alphanumeric.contains(b)) {
            Self::Alphanumeric
        } else if Self::is_kanji(data) {
            Self::Kanji
        } else {
            Self::Byte
        }
    }

    pub fn indicator(self) -> u8 {
        match self {
            Self::Numeric => 0b0001,
            Self::Alphanumeric => 0b0010,
            Self::Byte => 0b0100,
            Self::Kanji => 0b1000,
        }
    }

    pub fn contains(self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                byte.is_ascii_digit() || byte.is_ascii_uppercase() || b" $%*+-./:".contains(&byte)
            }
            Self::Byte => true,
            Self::Kanji => false,
        }
    }

    /// Whether every character of the data is representable in this mode.
    pub fn can_encode(self, data: &[u8]) -> bool {
        match self {
            Self::Kanji => data.is_empty() || Self::is_kanji(data),
            _ => data.iter().all(|&b| self.contains(b)),
        }
    }

    fn is_kanji(data: &[u8]) -> bool {
        !data.is_empty() && data.len() % 2 == 0 && data.chunks_exact(2).all(Self::is_kanji_pair)
    }

    fn is_kanji_pair(pair: &[u8]) -> bool {
        matches!((pair[0], pair[1]), (0x81..=0x9f | 0xe0..=0xea, 0x40..=0xfc) | (0xeb, 0x40..=0xbf))
    }

    /// Number of characters the data holds in this mode.
    pub fn char_count(self, data: &[u8]) -> usize {
        match self {
            Self::Kanji => data.len() / 2,
            _ => data.len(),
        }
    }

    /// Number of data bytes spanned by the given number of characters.
    pub fn byte_len(self, char_count: usize) -> usize {
        match self {
            Self::Kanji => char_count * 2,
            _ => char_count,
        }
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    // Shift-JIS pair to its 13 bit code. Pairs outside the Kanji ranges yield 0.
    #[inline]
    fn kanji_code(pair: &[u8]) -> u16 {
        if !Self::is_kanji_pair(pair) {
            return 0;
        }
        let (hi, lo) = (pair[0] as u16, pair[1] as u16);
        let base = if hi <= 0x9f { 0x81 } else { 0xc1 };
        (hi - base) * 0xc0 + (lo - 0x40)
    }

    /// Packs a chunk of characters into its code word value.
    pub fn encode_chunk(self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
            Self::Kanji => {
                debug_assert!(len == 2, "Kanji characters are two bytes long: {len}");
                Self::kanji_code(data)
            }
        }
    }

    /// Bit length of a chunk of `len` characters' bytes.
    pub fn chunk_bits(self, len: usize) -> usize {
        match self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => 8,
            Self::Kanji => 13,
        }
    }

    pub fn chunk_size(self) -> usize {
        match self {
            Self::Numeric => 3,
            Self::Alphanumeric | Self::Kanji => 2,
            Self::Byte => 1,
        }
    }

    /// Bit length of the data once encoded in this mode, excluding header.
    pub fn encoded_len(self, len: usize) -> usize {
        match self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
            Self::Kanji => (len / 2) * 13,
        }
    }
}
