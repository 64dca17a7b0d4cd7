pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use crate::common::bitstream::BitStream;
    use crate::common::codec::Mode;
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};

    /// Data codewords produced by the encoder, along with the parameters that shaped them.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EncodedData {
        pub bitstream: BitStream,
        pub ver: Version,
        pub mode: Mode,
        // Characters actually encoded
        pub char_cnt: usize,
        // Characters dropped to fit version 40
        pub truncated: usize,
    }

    impl EncodedData {
        pub fn codewords(&self) -> &[u8] {
            self.bitstream.data()
        }
    }

    /// Encodes the data in the smallest version fitting it. When nothing fits, version 40
    /// is used and the data is cut to its capacity, unless `strict` is set.
    pub fn encode(data: &[u8], ecl: ECLevel, mode: Mode, strict: bool) -> QRResult<EncodedData> {
        if !mode.can_encode(data) {
            return Err(QRError::InvalidChar);
        }
        let ver = match find_min_version(mode.char_count(data), ecl, mode) {
            Some(v) => v,
            None if strict => return Err(QRError::DataTooLong),
            None => Version::MAX,
        };
        Ok(fit(data, ver, ecl, mode))
    }

    /// Encodes data already known to be representable in the mode, truncating
    /// whatever version 40 can't hold.
    pub fn encode_lossy(data: &[u8], ecl: ECLevel, mode: Mode) -> EncodedData {
        debug_assert!(mode.can_encode(data), "Data not representable in {mode:?}");
        let ver = find_min_version(mode.char_count(data), ecl, mode).unwrap_or(Version::MAX);
        fit(data, ver, ecl, mode)
    }

    pub fn encode_with_version(
        data: &[u8],
        ver: Version,
        ecl: ECLevel,
        mode: Mode,
    ) -> QRResult<EncodedData> {
        if !mode.can_encode(data) {
            return Err(QRError::InvalidChar);
        }
        if mode.char_count(data) > ver.capacity(ecl, mode) {
            return Err(QRError::DataTooLong);
        }
        Ok(pack(data, ver, ecl, mode))
    }

    fn fit(data: &[u8], ver: Version, ecl: ECLevel, mode: Mode) -> EncodedData {
        let char_cnt = mode.char_count(data);
        let mut encoded = pack(truncate(data, ver, ecl, mode), ver, ecl, mode);
        encoded.truncated = char_cnt - encoded.char_cnt;
        encoded
    }

    // Data must already be representable in the mode and fit the version
    fn pack(data: &[u8], ver: Version, ecl: ECLevel, mode: Mode) -> EncodedData {
        let bcap = ver.data_bit_capacity(ecl);
        let mut bs = BitStream::new(bcap);
        push_segment(data, mode, ver, &mut bs);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);

        debug_assert!(bs.len() == bcap, "Bitstream not filled: Len {}, Capacity {bcap}", bs.len());

        let char_cnt = mode.char_count(data);
        EncodedData { bitstream: bs, ver, mode, char_cnt, truncated: 0 }
    }

    pub fn find_min_version(char_cnt: usize, ecl: ECLevel, mode: Mode) -> Option<Version> {
        Version::all().find(|v| v.capacity(ecl, mode) >= char_cnt)
    }

    // Cuts data to the character capacity of the version. Kanji pairs are never split.
    pub fn truncate(data: &[u8], ver: Version, ecl: ECLevel, mode: Mode) -> &[u8] {
        let max_len = mode.byte_len(ver.capacity(ecl, mode));
        &data[..data.len().min(max_len)]
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{Mode, PADDING_CODEWORDS};
    use crate::common::metadata::Version;

    pub fn push_segment(data: &[u8], mode: Mode, ver: Version, out: &mut BitStream) {
        push_header(mode, mode.char_count(data), ver, out);
        let start = out.len();
        push_data(data, mode, out);
        debug_assert!(
            out.len() - start == mode.encoded_len(data.len()),
            "Encoded length mismatch: Pushed {}, Expected {}",
            out.len() - start,
            mode.encoded_len(data.len())
        );
    }

    fn push_header(mode: Mode, char_cnt: usize, ver: Version, out: &mut BitStream) {
        out.push_bits(mode.indicator() as u16, ver.mode_bits());
        let len_bits = ver.char_cnt_bits(mode);
        debug_assert!(
            char_cnt < (1 << len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
        );
        out.push_bits(char_cnt as u16, len_bits);
    }

    fn push_data(data: &[u8], mode: Mode, out: &mut BitStream) {
        for chunk in data.chunks(mode.chunk_size()) {
            out.push_bits(mode.encode_chunk(chunk), mode.chunk_bits(chunk.len()));
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().cycle().take(remain_byte_capacity).for_each(|&pc| {
            out.push_bits(pc as u16, 8);
        });
    }

}
