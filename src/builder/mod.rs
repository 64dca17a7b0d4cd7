mod qr;
mod symbol;

pub(crate) use qr::{Module, QR};
pub use symbol::Symbol;

use crate::common::{
    bitstream::BitStream,
    codec::{encode, encode_with_version, EncodedData, Mode},
    ec::{blockify, interleave},
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mode: Option<Mode>,
    mask: Option<MaskPattern>,
    strict: bool,
    verbose: bool,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            version: None,
            ec_level: ECLevel::M,
            mode: None,
            mask: None,
            strict: false,
            verbose: false,
        }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    /// Rejects data that doesn't fit version 40 instead of truncating it.
    pub fn strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    pub fn verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    pub fn metadata(&self) -> String {
        let ver = match self.version {
            Some(v) => format!("{}", *v),
            None => "None".to_string(),
        };
        let mode = match self.mode {
            Some(m) => format!("{m:?}"),
            None => "Auto".to_string(),
        };
        format!("{{ Version: {ver}, Ec level: {:?}, Mode: {mode} }}", self.ec_level)
    }
}


// Builder pipeline
//------------------------------------------------------------------------------

impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<Symbol> {
        progress(self.verbose, &format!("\nGenerating QR {}...", self.metadata()));

        let mode = self.mode.unwrap_or_else(|| Mode::detect(self.data));

        progress(self.verbose, "Encoding data...");
        let encoded = match self.version {
            Some(v) => encode_with_version(self.data, v, self.ec_level, mode)?,
            None => {
                progress(self.verbose, "Finding best version...");
                encode(self.data, self.ec_level, mode, self.strict)?
            }
        };

        Ok(construct(encoded, self.ec_level, self.mask, self.verbose))
    }

    // Correctable codeword errors. Versions 1 to 3 set aside a few ec codewords
    // for misdecode protection.
    pub fn ec_capacity(ver: Version, ecl: ECLevel) -> usize {
        let p = match (*ver, ecl) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };

        let params = ver.ec_params(ecl);
        let ec_bytes = params.block_count() * params.ecc_per_block;

        (ec_bytes - p) / 2
    }
}

/// Turns encoded data codewords into a finished symbol: error correction, module
/// placement, masking, then format & version info.
pub(crate) fn construct(
    encoded: EncodedData,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
    verbose: bool,
) -> Symbol {
    let ver = encoded.ver;

    progress(verbose, "Constructing payload with ecc & interleaving...");
    let blocks = blockify(encoded.codewords(), ver, ecl);
    let mut payload = BitStream::new((ver.total_codewords() << 3) + ver.remainder_bits());
    payload.extend(&interleave(&blocks));
    payload.push_bits(0, ver.remainder_bits());

    progress(verbose, "Constructing QR...");
    let mut qr = QR::new(ver, ecl);

    progress(verbose, "Drawing functional patterns...");
    qr.draw_all_function_patterns();
    qr.reserve_info_areas();

    progress(verbose, "Drawing encoding region...");
    qr.draw_encoding_region(&payload);

    let mask = match mask {
        Some(m) => {
            progress(verbose, &format!("Applying mask {}...", *m));
            qr.apply_mask(m);
            m
        }
        None => {
            progress(verbose, "Finding & applying best mask...");
            apply_best_mask(&mut qr)
        }
    };

    progress(verbose, "Drawing format & version info...");
    qr.draw_format_info(mask);
    qr.draw_version_info();

    let symbol = Symbol::from_qr(&qr, encoded.mode, mask, encoded.truncated);

    if verbose {
        report(&symbol, &encoded);
    }

    symbol
}

fn progress(verbose: bool, msg: &str) {
    if verbose {
        println!("{msg}");
    }
}

fn report(symbol: &Symbol, encoded: &EncodedData) {
    let ver = symbol.version();
    let ecl = symbol.ec_level();
    let data_capacity = ver.data_codewords(ecl);
    let ec_capacity = QRBuilder::ec_capacity(ver, ecl);
    let encoded_len = encoded.bitstream.len() >> 3;

    let total_modules = symbol.width() * symbol.width();
    let dark_modules = symbol.count_dark_modules();
    let light_modules = total_modules - dark_modules;

    println!("\x1b[1;32mQR generated successfully!\n \x1b[0m");
    println!("Report:");
    println!("{}", symbol.metadata());
    println!("Data capacity: {data_capacity}, Error Capacity: {ec_capacity}");
    println!(
        "Characters: {}, Truncated: {}, Encoded size: {encoded_len}",
        encoded.char_cnt, encoded.truncated
    );
    println!(
        "Dark Cells: {dark_modules}, Light Cells: {light_modules}, Balance: {}\n",
        dark_modules * 100 / total_modules
    );
}
