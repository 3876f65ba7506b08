//! Row packing for converted colors

use multiversion::multiversion;

/// Quantize unit-range channels to bytes
///
/// Each value is clamped to [0, 1] and rounded; NaN becomes 0. `dst` must be
/// at least as long as `src`.
#[multiversion(targets("x86_64+avx2", "x86_64+sse4.1", "aarch64+neon",))]
pub fn unit_f32_to_u8_batch(src: &[f32], dst: &mut [u8]) {
    assert!(dst.len() >= src.len());

    for (value, out) in src.iter().zip(dst.iter_mut()) {
        // `as u8` saturates and maps NaN to 0
        *out = (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize() {
        let src = [0.0f32, 1.0, 0.5, -0.25, 1.5, f32::NAN];
        let mut dst = [7u8; 6];

        unit_f32_to_u8_batch(&src, &mut dst);

        assert_eq!(dst, [0, 255, 128, 0, 255, 0]);
    }

    #[test]
    fn test_leaves_tail_untouched() {
        let mut dst = [9u8; 4];
        unit_f32_to_u8_batch(&[1.0, 0.0], &mut dst);
        assert_eq!(dst, [255, 0, 9, 9]);
    }
}
