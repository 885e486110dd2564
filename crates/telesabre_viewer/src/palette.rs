// Copyright contributors to the TeleSABRE Replay Viewer project

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::style::Color;

const GOLDEN_RATIO: f64 = 0.618033988749895;

/// One colour per logical qubit. Hues are spread by the golden ratio so
/// neighbouring indices contrast; saturation and lightness vary a little.
/// The same seed always yields the same palette.
pub fn generate(n: usize, seed: u64) -> Vec<Color> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut hue: f64 = rng.random();
    (0..n)
        .map(|_| {
            hue = (hue + GOLDEN_RATIO) % 1.0;
            let saturation = 0.5 + rng.random::<f64>() * 0.2;
            let lightness = 0.6 + rng.random::<f64>() * 0.2;
            Color::Hsl {
                h: (hue * 360.0).floor() as u16,
                s: (saturation * 100.0).floor() as u8,
                l: (lightness * 100.0).floor() as u8,
            }
        })
        .collect()
}
