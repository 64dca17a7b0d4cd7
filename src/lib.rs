//! # qrmint
//!
//! A Rust library for generating QR Code symbols (ISO/IEC 18004, versions 1 to 40).
//! It turns a byte string and an error correction level into a square matrix of
//! light and dark modules, ready for any renderer.
//!
//! ## Features
//!
//! - **Mode Detection**: Numeric, alphanumeric, byte or Shift-JIS Kanji, whichever is densest
//! - **Version Selection**: Smallest version holding the data, truncating past version 40
//! - **Reed-Solomon Error Correction**: Block split & interleaving for levels L, M, Q and H
//! - **Mask Selection**: All 8 masks scored with the 4 penalty rules, optionally in parallel
//! - **Rendering**: Grayscale image or terminal string output
//!
//! ## Quick Start
//!
//! ### Simple Encoding
//!
//! ```rust
//! use qrmint::{encode, ECLevel};
//!
//! let symbol = encode(b"HELLO WORLD", ECLevel::Q);
//! assert_eq!(symbol.width(), 21);
//!
//! // 1 is dark, 0 is light
//! let top_left = symbol.modules()[0][0];
//! assert_eq!(top_left, 1);
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrmint::{QRBuilder, ECLevel, MaskPattern, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let symbol = QRBuilder::new(b"Hello, World!")
//!     .version(Version::new(2)?)       // if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::M)            // if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)      // if not provided, finds best mask based on penalty score
//!     .strict(true)                    // reject data that doesn't fit instead of truncating
//!     .build()?;
//!
//! let img = symbol.to_image(4); // 4 pixels per module
//! assert_eq!(img.width(), (25 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Kanji Text
//!
//! ```rust
//! use qrmint::{encode_str, ECLevel, Mode};
//!
//! let symbol = encode_str("点茗", ECLevel::H);
//! assert_eq!(symbol.mode(), Mode::Kanji);
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(
    clippy::items_after_test_module,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

use encoding_rs::SHIFT_JIS;

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, Symbol};
pub use common::codec::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};

use common::codec::encode_lossy;

/// Encodes the bytes in their densest single mode, at the smallest version that
/// holds them. Data past the capacity of version 40 is dropped.
pub fn encode(data: &[u8], level: ECLevel) -> Symbol {
    let encoded = encode_lossy(data, level, Mode::detect(data));
    builder::construct(encoded, level, None, false)
}

/// Shift-JIS bytes of the text when every character of it fits Kanji mode.
pub fn kanji_bytes(text: &str) -> Option<Vec<u8>> {
    let (sjis, _, unmappable) = SHIFT_JIS.encode(text);
    (!unmappable && Mode::detect(&sjis) == Mode::Kanji).then(|| sjis.into_owned())
}

/// Encodes text. Text made only of Shift-JIS double byte characters goes in Kanji
/// mode, any other text goes in as UTF-8.
pub fn encode_str(text: &str, level: ECLevel) -> Symbol {
    if let Some(sjis) = kanji_bytes(text) {
        return encode(&sjis, level);
    }

    if text.is_ascii() {
        return encode(text.as_bytes(), level);
    }

    // Multi byte UTF-8 is cut at a char boundary and kept in byte mode
    let mut end = text.len().min(Version::MAX.capacity(level, Mode::Byte));
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let encoded = encode_lossy(&text.as_bytes()[..end], level, Mode::Byte);
    builder::construct(encoded, level, None, false)
}

#[cfg(test)]
mod lib_tests {
    use super::{encode, encode_str, kanji_bytes, ECLevel, Mode, QRBuilder, Version};

    #[test]
    fn test_encode_matches_builder() {
        let symbol = encode(b"HELLO WORLD", ECLevel::Q);
        let built = QRBuilder::new(b"HELLO WORLD").ec_level(ECLevel::Q).build().unwrap();
        assert_eq!(symbol, built);
    }

    #[test]
    fn test_encode_str_kanji() {
        // 点 and 茗 are 0x935F and 0xE4AA in Shift-JIS
        let symbol = encode_str("点茗", ECLevel::M);
        assert_eq!(symbol.mode(), Mode::Kanji);
        assert_eq!(symbol, encode(b"\x93\x5f\xe4\xaa", ECLevel::M));
    }

    #[test]
    fn test_kanji_bytes() {
        assert_eq!(kanji_bytes("点茗"), Some(vec![0x93, 0x5f, 0xe4, 0xaa]));
        assert_eq!(kanji_bytes("点a"), None);
        assert_eq!(kanji_bytes("HELLO"), None);
        assert_eq!(kanji_bytes("한"), None);
        assert_eq!(kanji_bytes(""), None);
    }

    #[test]
    fn test_kanji_bytes_through_builder() {
        let data = kanji_bytes("茗荷").unwrap();
        let symbol = QRBuilder::new(&data).ec_level(ECLevel::H).build().unwrap();
        assert_eq!(symbol.mode(), Mode::Kanji);
        assert_eq!(symbol, encode_str("茗荷", ECLevel::H));
    }

    #[test]
    fn test_encode_str_ascii() {
        assert_eq!(encode_str("01234567", ECLevel::M).mode(), Mode::Numeric);
        assert_eq!(encode_str("HELLO WORLD", ECLevel::M).mode(), Mode::Alphanumeric);
        assert_eq!(encode_str("hello", ECLevel::M).mode(), Mode::Byte);
        assert_eq!(encode_str("", ECLevel::L), encode(b"", ECLevel::L));
    }

    #[test]
    fn test_encode_str_utf8() {
        let symbol = encode_str("Hello, world!🌎", ECLevel::L);
        assert_eq!(symbol.mode(), Mode::Byte);
        assert_eq!(symbol, encode("Hello, world!🌎".as_bytes(), ECLevel::L));
    }

    #[test]
    fn test_encode_str_cuts_at_char_boundary() {
        // 1273 byte capacity at H: 424 three byte chars fit, with 1 byte to spare
        let text = "한".repeat(500);
        let symbol = encode_str(&text, ECLevel::H);
        assert_eq!(symbol.version(), Version::MAX);
        assert_eq!(symbol.mode(), Mode::Byte);
        assert_eq!(symbol.truncated(), 0);
    }
}
