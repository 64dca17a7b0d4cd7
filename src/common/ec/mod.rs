mod block;
mod encoder;
pub(crate) mod galois;

pub(crate) use block::*;
pub(crate) use encoder::*;

use crate::common::metadata::{ECLevel, Version};

// Error correction
//------------------------------------------------------------------------------

// Splits data codewords into group 1 then group 2 blocks and computes ecc for each
pub fn blockify(data: &[u8], ver: Version, ecl: ECLevel) -> Vec<Block> {
    let p = ver.ec_params(ecl);
    let group1_size = p.group1_blocks * p.group1_len;

    debug_assert!(
        p.data_codewords == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        p.data_codewords
    );

    let mut blocks = Vec::with_capacity(p.block_count());
    blocks.extend(data[..group1_size].chunks(p.group1_len).map(|b| Block::new(b, p.ecc_per_block)));
    if p.group2_blocks > 0 {
        blocks.extend(
            data[group1_size..].chunks(p.group2_len).map(|b| Block::new(b, p.ecc_per_block)),
        );
    }
    debug_assert!(blocks.iter().all(Block::is_valid), "Block with non zero syndrome");
    blocks
}

// Column-wise interleave of data codewords, then ecc codewords. Shorter blocks
// are skipped once exhausted.
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let total = blocks.iter().map(Block::len).sum();
    let mut res = Vec::with_capacity(total);

    let max_data_len = blocks.iter().map(Block::data_len).max().unwrap_or(0);
    for i in 0..max_data_len {
        res.extend(blocks.iter().filter_map(|b| b.data().get(i)));
    }

    let max_ec_len = blocks.iter().map(Block::ec_len).max().unwrap_or(0);
    for i in 0..max_ec_len {
        res.extend(blocks.iter().filter_map(|b| b.ecc().get(i)));
    }

    res
}
