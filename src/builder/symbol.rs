use image::{GrayImage, Luma};

use super::{Module, QR};
use crate::common::{
    codec::Mode,
    mask::MaskPattern,
    metadata::{Color, ECLevel, Version},
};

/// Finished QR symbol: a square matrix of modules, 1 for dark and 0 for light,
/// without quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    modules: Vec<Vec<u8>>,
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    mask: MaskPattern,
    truncated: usize,
}

const QUIET_ZONE: usize = 4;

impl Symbol {
    pub(crate) fn from_qr(qr: &QR, mode: Mode, mask: MaskPattern, truncated: usize) -> Self {
        let w = qr.width();
        debug_assert!(
            qr.grid().iter().all(|m| !matches!(m, Module::Empty | Module::Reserved)),
            "Unset module found in finished QR"
        );

        let modules = qr
            .grid()
            .chunks_exact(w)
            .map(|row| row.iter().map(|m| (**m).select(1, 0)).collect())
            .collect();

        Self { modules, ver: qr.version(), ecl: qr.ec_level(), mode, mask, truncated }
    }

    pub fn modules(&self) -> &[Vec<u8>] {
        &self.modules
    }

    /// True when the module at row `r`, column `c` is dark.
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.modules[r][c] == 1
    }

    pub fn color(&self, r: usize, c: usize) -> Color {
        Color::from(self.get(r, c))
    }

    pub fn width(&self) -> usize {
        self.modules.len()
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Number of input characters dropped to fit version 40.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.iter().flatten().filter(|&&m| m == 1).count()
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {:?}, Mode: {:?}, Mask: {} }}",
            *self.ver, self.ecl, self.mode, *self.mask
        )
    }
}

// Render
//------------------------------------------------------------------------------

impl Symbol {
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let qz_sz = QUIET_ZONE as u32 * module_sz;
        let qr_sz = self.width() as u32 * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.put_pixel(j, i, Luma([255]));
                    continue;
                }
                let r = ((i - qz_sz) / module_sz) as usize;
                let c = ((j - qz_sz) / module_sz) as usize;

                let pixel = self.color(r, c).select(Luma([0]), Luma([255]));
                canvas.put_pixel(j, i, pixel);
            }
        }

        canvas
    }

    // Dark modules print as blanks so the code reads on dark terminals
    pub fn to_str(&self, module_sz: usize) -> String {
        let qz_sz = QUIET_ZONE * module_sz;
        let qr_sz = self.width() * module_sz;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1) * 3);
        for i in 0..total_sz {
            for j in 0..total_sz {
                if i < qz_sz || i >= qz_sz + qr_sz || j < qz_sz || j >= qz_sz + qr_sz {
                    canvas.push('█');
                    continue;
                }
                let r = (i - qz_sz) / module_sz;
                let c = (j - qz_sz) / module_sz;
                canvas.push(self.color(r, c).select(' ', '█'));
            }
            canvas.push('\n');
        }

        canvas
    }
}
