use super::galois::{EXP_TABLE, LOG_TABLE};

// Reed-Solomon encoder
//------------------------------------------------------------------------------

// Performs polynomial long division of the data polynomial by the generator
// polynomial of degree `ecc_len`. The remainder coefficients are the ecc.
pub fn ecc_per_block(block: &[u8], ecc_len: usize) -> Vec<u8> {
    let len = block.len();
    let gen_poly = generator_poly(ecc_len);

    let mut res = block.to_vec();
    res.resize(len + ecc_len, 0);

    for i in 0..len {
        let lead_coeff = res[i] as usize;
        if lead_coeff == 0 {
            continue;
        }

        let log_lead_coeff = LOG_TABLE[lead_coeff] as usize;
        for (u, &v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            let mut log_sum = v as usize + log_lead_coeff;
            debug_assert!(log_sum < 510, "Log sum has crossed 510: {log_sum}");
            if log_sum >= 255 {
                log_sum -= 255;
            }
            *u ^= EXP_TABLE[log_sum];
        }
    }

    res.split_off(len)
}

fn generator_poly(degree: usize) -> &'static [u8] {
    match GENERATOR_POLYNOMIALS.binary_search_by_key(&degree, |&(d, _)| d) {
        Ok(i) => GENERATOR_POLYNOMIALS[i].1,
        Err(_) => unreachable!("No generator polynomial of degree {degree}"),
    }
}


// Global constants
//------------------------------------------------------------------------------

// Generator polynomials in exponent form, leading term omitted, keyed by degree
#[rustfmt::skip]
pub(super) static GENERATOR_POLYNOMIALS: [(usize, &[u8]); 13] = [
    (7, &[87, 229, 146, 149, 238, 102, 21]),
    (10, &[251, 67, 46, 61, 118, 70, 64, 94, 32, 45]),
    (13, &[74, 152, 176, 100, 86, 100, 106, 104, 130, 218, 206, 140, 78]),
    (15, &[8, 183, 61, 91, 202, 37, 51, 58, 58, 237, 140, 124, 5, 99, 105]),
    (16, &[120, 104, 107, 109, 102, 161, 76, 3, 91, 191, 147, 169, 182, 194, 225, 120]),
    (17, &[43, 139, 206, 78, 43, 239, 123, 206, 214, 147, 24, 99, 150, 39, 243, 163, 136]),
    (18, &[215, 234, 158, 94, 184, 97, 118, 170, 79, 187, 152, 148, 252, 179, 5, 98, 96, 153]),
    (20, &[
        17, 60, 79, 50, 61, 163, 26, 187, 202, 180, 221, 225, 83, 239, 156, 164, 212, 212, 188, 190,
    ]),
    (22, &[
        210, 171, 247, 242, 93, 230, 14, 109, 221, 53, 200, 74, 8, 172, 98, 80, 219, 134, 160, 105,
        165, 231,
    ]),
    (24, &[
        229, 121, 135, 48, 211, 117, 251, 126, 159, 180, 169, 152, 192, 226, 228, 218, 111, 0, 117,
        232, 87, 96, 227, 21,
    ]),
    (26, &[
        173, 125, 158, 2, 103, 182, 118, 17, 145, 201, 111, 28, 165, 53, 161, 21, 245, 142, 13, 102,
        48, 227, 153, 145, 218, 70,
    ]),
    (28, &[
        168, 223, 200, 104, 224, 234, 108, 180, 110, 190, 195, 147, 205, 27, 232, 201, 21, 43, 245,
        87, 42, 195, 212, 119, 242, 37, 9, 123,
    ]),
    (30, &[
        41, 173, 145, 152, 216, 31, 179, 182, 50, 48, 110, 86, 239, 96, 222, 125, 42, 173, 226, 193,
        224, 130, 156, 37, 251, 216, 238, 40, 192, 180,
    ]),
];
