//! Seeded component generators

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// `count` tuples of `arity` components, each drawn from its `ranges` entry
pub fn random_components(seed: u64, count: usize, ranges: &[(f32, f32)]) -> Vec<Vec<f32>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            ranges
                .iter()
                .map(|&(lo, hi)| if lo < hi { rng.gen_range(lo..=hi) } else { lo })
                .collect()
        })
        .collect()
}

/// Random RGB8 pixels
pub fn random_rgb8(seed: u64, pixels: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = vec![0u8; pixels * 3];
    rng.fill_bytes(&mut data);
    data
}

/// Every corner and edge midpoint of the RGB cube, as RGB8
pub fn rgb8_cube_lattice() -> Vec<u8> {
    let steps = [0u8, 128, 255];
    let mut data = Vec::with_capacity(27 * 3);
    for r in steps {
        for g in steps {
            for b in steps {
                data.extend_from_slice(&[r, g, b]);
            }
        }
    }
    data
}
