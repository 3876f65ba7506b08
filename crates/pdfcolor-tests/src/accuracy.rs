//! Accuracy measurement using perceptual color difference metrics
//!
//! Differences between our output and a reference are reported in
//! CIEDE2000 (deltaE2000) computed on 8-bit sRGB.

/// Statistics from a deltaE comparison
#[derive(Debug, Clone)]
pub struct DeltaEStats {
    /// Mean deltaE across all samples
    pub mean: f64,
    /// Maximum deltaE
    pub max: f64,
    /// Number of samples
    pub count: usize,
}

impl DeltaEStats {
    /// Check if all differences are imperceptible (deltaE < 1.0)
    pub fn is_excellent(&self) -> bool {
        self.max < 1.0
    }
}

/// Calculate deltaE2000 between two Lab colors
pub fn delta_e_2000(lab1: [f64; 3], lab2: [f64; 3]) -> f64 {
    let [l1, a1, b1] = lab1;
    let [l2, a2, b2] = lab2;

    let c1 = (a1 * a1 + b1 * b1).sqrt();
    let c2 = (a2 * a2 + b2 * b2).sqrt();
    let c_avg = (c1 + c2) / 2.0;

    // 25^7
    let c_avg_pow7 = c_avg.powi(7);
    let g = 0.5 * (1.0 - (c_avg_pow7 / (c_avg_pow7 + 6103515625.0_f64)).sqrt());

    let a1_prime = a1 * (1.0 + g);
    let a2_prime = a2 * (1.0 + g);
    let c1_prime = (a1_prime * a1_prime + b1 * b1).sqrt();
    let c2_prime = (a2_prime * a2_prime + b2 * b2).sqrt();
    let c_avg_prime = (c1_prime + c2_prime) / 2.0;

    let hue = |b: f64, a: f64| {
        if a == 0.0 && b == 0.0 {
            0.0
        } else {
            b.atan2(a).to_degrees().rem_euclid(360.0)
        }
    };
    let h1_prime = hue(b1, a1_prime);
    let h2_prime = hue(b2, a2_prime);

    let delta_h_prime = if c1_prime * c2_prime == 0.0 {
        0.0
    } else {
        let diff = h2_prime - h1_prime;
        if diff.abs() <= 180.0 {
            diff
        } else if diff > 180.0 {
            diff - 360.0
        } else {
            diff + 360.0
        }
    };
    let delta_h_prime_big =
        2.0 * (c1_prime * c2_prime).sqrt() * (delta_h_prime.to_radians() / 2.0).sin();

    let h_avg_prime = if c1_prime * c2_prime == 0.0 {
        h1_prime + h2_prime
    } else if (h1_prime - h2_prime).abs() <= 180.0 {
        (h1_prime + h2_prime) / 2.0
    } else if h1_prime + h2_prime < 360.0 {
        (h1_prime + h2_prime + 360.0) / 2.0
    } else {
        (h1_prime + h2_prime - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_avg_prime - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_avg_prime).to_radians().cos()
        + 0.32 * (3.0 * h_avg_prime + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_avg_prime - 63.0).to_radians().cos();

    let delta_l_prime = l2 - l1;
    let delta_c_prime = c2_prime - c1_prime;
    let l_avg_prime = (l1 + l2) / 2.0;

    let l_avg_minus_50_sq = (l_avg_prime - 50.0).powi(2);
    let s_l = 1.0 + (0.015 * l_avg_minus_50_sq) / (20.0 + l_avg_minus_50_sq).sqrt();
    let s_c = 1.0 + 0.045 * c_avg_prime;
    let s_h = 1.0 + 0.015 * c_avg_prime * t;

    let delta_theta = 30.0 * (-((h_avg_prime - 275.0) / 25.0).powi(2)).exp();
    let c_avg_prime_pow7 = c_avg_prime.powi(7);
    let r_c = 2.0 * (c_avg_prime_pow7 / (c_avg_prime_pow7 + 6103515625.0_f64)).sqrt();
    let r_t = -r_c * (2.0 * delta_theta.to_radians()).sin();

    let term1 = delta_l_prime / s_l;
    let term2 = delta_c_prime / s_c;
    let term3 = delta_h_prime_big / s_h;
    let term4 = r_t * term2 * term3;

    (term1 * term1 + term2 * term2 + term3 * term3 + term4).sqrt()
}

/// Convert an 8-bit sRGB pixel to Lab (D65)
pub fn srgb8_to_lab(rgb: [u8; 3]) -> [f64; 3] {
    let linear = |v: u8| {
        let v = v as f64 / 255.0;
        if v <= 0.04045 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    let (r, g, b) = (linear(rgb[0]), linear(rgb[1]), linear(rgb[2]));
    let xyz = [
        r * 0.4124564 + g * 0.3575761 + b * 0.1804375,
        r * 0.2126729 + g * 0.7151522 + b * 0.0721750,
        r * 0.0193339 + g * 0.1191920 + b * 0.9503041,
    ];

    let f = |t: f64| {
        let delta: f64 = 6.0 / 29.0;
        if t > delta.powi(3) {
            t.cbrt()
        } else {
            t / (3.0 * delta * delta) + 4.0 / 29.0
        }
    };
    let fx = f(xyz[0] / 0.95047);
    let fy = f(xyz[1]);
    let fz = f(xyz[2] / 1.08883);

    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Compare two packed RGB8 buffers pixel by pixel
pub fn compare_rgb_buffers(expected: &[u8], actual: &[u8]) -> DeltaEStats {
    assert_eq!(expected.len(), actual.len());

    let deltas: Vec<f64> = expected
        .chunks_exact(3)
        .zip(actual.chunks_exact(3))
        .map(|(e, a)| {
            delta_e_2000(
                srgb8_to_lab([e[0], e[1], e[2]]),
                srgb8_to_lab([a[0], a[1], a[2]]),
            )
        })
        .collect();

    let count = deltas.len();
    let mean = if count == 0 {
        0.0
    } else {
        deltas.iter().sum::<f64>() / count as f64
    };
    let max = deltas.iter().copied().fold(0.0, f64::max);

    DeltaEStats { mean, max, count }
}
