use super::{
    ecc_per_block,
    galois::{eval_poly, G},
};

// Block
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Block {
    data: Vec<u8>,
    ecc: Vec<u8>,
}

impl Block {
    pub fn new(data: &[u8], ecc_len: usize) -> Self {
        let ecc = ecc_per_block(data, ecc_len);
        Self { data: data.to_vec(), ecc }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn ecc(&self) -> &[u8] {
        &self.ecc
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn ec_len(&self) -> usize {
        self.ecc.len()
    }

    pub fn len(&self) -> usize {
        self.data.len() + self.ecc.len()
    }

    #[cfg(test)]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    // Codeword polynomial evaluated at alpha^0..alpha^(ec_len - 1)
    pub fn syndromes(&self) -> Vec<G> {
        let full = self.data.iter().chain(self.ecc.iter()).map(|&b| G(b)).collect::<Vec<_>>();
        (0..self.ec_len()).map(|i| eval_poly(full.iter().rev(), G::gen_pow(i))).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.syndromes().iter().all(|&s| s == G(0))
    }
}
