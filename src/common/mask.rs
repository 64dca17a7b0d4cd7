use std::ops::Deref;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskingPattern)
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    // Products can exceed i16 on version 40
    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (((r + c) as i32 & 1) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern {}", self.0),
        }
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Scores all 8 masks and applies the lowest scoring one. Ties go to the lower index.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = best_of(&compute_all_penalties(qr));
    qr.apply_mask(best_mask);
    best_mask
}

fn penalty_with(qr: &QR, mask: MaskPattern) -> u32 {
    let mut qr = qr.clone();
    qr.apply_mask(mask);
    compute_total_penalty(&qr)
}

#[cfg(not(feature = "parallel"))]
pub fn compute_all_penalties(qr: &QR) -> Vec<u32> {
    MaskPattern::all().map(|m| penalty_with(qr, m)).collect()
}

#[cfg(feature = "parallel")]
pub fn compute_all_penalties(qr: &QR) -> Vec<u32> {
    (0..8u8).into_par_iter().map(|m| penalty_with(qr, MaskPattern(m))).collect()
}

// First minimum wins
fn best_of(penalties: &[u32]) -> MaskPattern {
    debug_assert!(penalties.len() == 8, "Expected 8 penalties: {}", penalties.len());
    let best = (0..penalties.len()).min_by_key(|&i| (penalties[i], i)).unwrap_or(0);
    MaskPattern(best as u8)
}

// Penalty rules
//------------------------------------------------------------------------------

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

fn line(qr: &QR, i: i16, is_hor: bool) -> impl Iterator<Item = Color> + '_ {
    let w = qr.width() as i16;
    (0..w).map(move |j| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) })
}

// N1: every maximal run of 5 or more same coloured modules scores len - 2
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let mut pen = 0;
    for is_hor in [true, false] {
        for i in 0..w {
            let mut last = None;
            let mut run = 0;
            for clr in line(qr, i, is_hor) {
                if last == Some(clr) {
                    run += 1;
                    continue;
                }
                if run >= 5 {
                    pen += run - 2;
                }
                last = Some(clr);
                run = 1;
            }
            if run >= 5 {
                pen += run - 2;
            }
        }
    }
    pen
}

// N2: every 2x2 block of one colour scores 3, overlaps included
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// N3: every 11 module window reading 1:1:3:1:1 with 4 light on either side scores 40
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    const PATTERN_LEFT: u16 = 0b000_0101_1101;
    const PATTERN_RIGHT: u16 = 0b101_1101_0000;
    const WINDOW: u16 = 0x7ff;

    let w = qr.width() as i16;
    let mut pen = 0;
    for i in 0..w {
        let mut bits = 0u16;
        for (j, clr) in line(qr, i, is_hor).enumerate() {
            bits = ((bits << 1) | clr.select(1, 0)) & WINDOW;
            if j >= 10 && (bits == PATTERN_LEFT || bits == PATTERN_RIGHT) {
                pen += 40;
            }
        }
    }
    pen
}

// N4: deviation of dark share from 50%, in steps of 5%
fn compute_balance_penalty(qr: &QR) -> u32 {
    let w = qr.width();
    balance_penalty(qr.count_dark_modules(), w * w)
}

fn balance_penalty(dark_cnt: usize, total: usize) -> u32 {
    let num = dark_cnt * 100;
    let den = total * 5;
    let lo = num / den * 5;
    let hi = num.div_ceil(den) * 5;
    let dev = lo.abs_diff(50).min(hi.abs_diff(50));
    (dev / 5 * 10) as u32
}

#[cfg(test)]
mod mask_tests {
    use test_case::test_case;

    use super::{
        apply_best_mask, balance_penalty, best_of, compute_adjacent_penalty,
        compute_all_penalties, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, compute_total_penalty, MaskPattern,
    };
    use crate::builder::{Module, QR};
    use crate::common::error::QRError;
    use crate::common::metadata::{Color, ECLevel, Version};

    fn blank() -> QR {
        QR::new(Version::MIN, ECLevel::L)
    }

    #[test]
    fn test_new() {
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    #[test_case(0, &[(0, 0), (1, 1), (2, 4)], &[(0, 1), (3, 2)])]
    #[test_case(1, &[(0, 5), (2, 1)], &[(1, 0), (3, 3)])]
    #[test_case(2, &[(5, 0), (1, 3)], &[(0, 1), (0, 4)])]
    #[test_case(3, &[(1, 2), (3, 3)], &[(1, 1), (0, 4)])]
    #[test_case(4, &[(0, 0), (2, 3), (1, 2)], &[(0, 3), (2, 0)])]
    #[test_case(5, &[(0, 7), (6, 1)], &[(1, 1), (1, 5)])]
    #[test_case(6, &[(1, 1), (2, 3)], &[(1, 3), (1, 5)])]
    #[test_case(7, &[(0, 0), (0, 2)], &[(0, 1), (1, 1)])]
    fn test_mask_functions(pattern: u8, on: &[(i16, i16)], off: &[(i16, i16)]) {
        let f = MaskPattern::new(pattern).unwrap().mask_function();
        for &(r, c) in on {
            assert!(f(r, c), "Pattern {pattern} at ({r}, {c})");
        }
        for &(r, c) in off {
            assert!(!f(r, c), "Pattern {pattern} at ({r}, {c})");
        }
    }

    #[test]
    fn test_mask_functions_large_coords() {
        let f = MaskPattern::new(5).unwrap().mask_function();
        assert!(f(176, 174));
        let f = MaskPattern::new(7).unwrap().mask_function();
        assert!(!f(175, 176));
    }

    #[test]
    fn test_penalties_blank() {
        let qr = blank();
        assert_eq!(compute_adjacent_penalty(&qr), 42 * 19);
        assert_eq!(compute_block_penalty(&qr), 20 * 20 * 3);
        assert_eq!(compute_finder_pattern_penalty(&qr, true), 0);
        assert_eq!(compute_finder_pattern_penalty(&qr, false), 0);
        assert_eq!(compute_balance_penalty(&qr), 100);
        assert_eq!(compute_total_penalty(&qr), 798 + 1200 + 100);
    }

    #[test]
    fn test_adjacent_penalty_runs() {
        let mut qr = blank();
        // Split row 0 into light runs of 4 and 16 around one dark module
        qr.set(0, 4, Module::Data(Color::Dark));
        // Row 0 scores 16 - 2, others 19 each, column 4 splits into 1 + 20
        let rows = 14 + 20 * 19;
        let cols = 20 * 19 + 18;
        assert_eq!(compute_adjacent_penalty(&qr), rows + cols);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let mut qr = blank();
        for c in [0, 2, 3, 4, 6] {
            qr.set(0, c, Module::Data(Color::Dark));
        }
        assert_eq!(compute_finder_pattern_penalty(&qr, true), 40);
        assert_eq!(compute_finder_pattern_penalty(&qr, false), 0);

        let mut qr = blank();
        for r in [14, 16, 17, 18, 20] {
            qr.set(r, 3, Module::Data(Color::Dark));
        }
        assert_eq!(compute_finder_pattern_penalty(&qr, true), 0);
        assert_eq!(compute_finder_pattern_penalty(&qr, false), 40);
    }

    #[test_case(0, 100, 100)]
    #[test_case(50, 100, 0)]
    #[test_case(45, 100, 10)]
    #[test_case(43, 100, 10)]
    #[test_case(57, 100, 10)]
    #[test_case(61, 100, 20)]
    #[test_case(100, 100, 100)]
    #[test_case(220, 441, 0)]
    #[test_case(180, 441, 10)]
    fn test_balance_penalty(dark: usize, total: usize, exp: u32) {
        assert_eq!(balance_penalty(dark, total), exp);
    }

    #[test]
    fn test_best_of_ties() {
        assert_eq!(*best_of(&[3; 8]), 0);
        assert_eq!(*best_of(&[9, 4, 7, 4, 8, 8, 8, 8]), 1);
        assert_eq!(*best_of(&[9, 9, 9, 9, 9, 9, 9, 2]), 7);
    }

    #[test]
    fn test_best_mask_ties_on_matrix() {
        let mut qr = blank();
        for r in 0..21 {
            for c in 0..21 {
                qr.set(r, c, Module::Func(Color::Light));
            }
        }
        // Masks 1, 3, 4 & 6 darken the only data cell and yield the same matrix
        qr.set(10, 11, Module::Data(Color::Light));
        let penalties = compute_all_penalties(&qr);
        for m in [3, 4, 6] {
            assert_eq!(penalties[m], penalties[1]);
        }
        for m in [2, 5, 7] {
            assert_eq!(penalties[m], penalties[0]);
        }
        assert!(penalties[1] < penalties[0]);

        let best = apply_best_mask(&mut qr);
        assert_eq!(*best, 1);
        assert_eq!(qr.get(10, 11), Module::Data(Color::Dark));
    }

    #[test]
    fn test_apply_best_mask_deterministic() {
        let mut qr = blank();
        qr.draw_all_function_patterns();
        qr.reserve_info_areas();
        qr.draw_encoding_region(&crate::common::bitstream::BitStream::new(0));
        let penalties = compute_all_penalties(&qr);
        let mut a = qr.clone();
        let mut b = qr.clone();
        let ma = apply_best_mask(&mut a);
        let mb = apply_best_mask(&mut b);
        assert_eq!(ma, mb);
        assert_eq!(a.grid(), b.grid());
        let min = *penalties.iter().min().unwrap();
        assert_eq!(penalties[*ma as usize], min);
        assert!(penalties[..*ma as usize].iter().all(|&p| p > min));
    }
}
