// Copyright contributors to the TeleSABRE Replay Viewer project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    f64::consts::PI,
    ops::{Add, Sub},
};

use serde::Serialize;

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }
}

/// Displacement between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

/// Parameters of the wave drawn along teleport links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub wavelength: f64,
    pub amplitude: f64,
    /// Lower bound on samples, whatever the distance.
    pub min_samples: usize,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            wavelength: 10.0,
            amplitude: 3.0,
            min_samples: 50,
        }
    }
}

/// Upper bound on the samples along a single link.
pub const MAX_WAVE_SAMPLES: usize = 100_000;

impl Wave {
    pub fn is_valid(&self) -> bool {
        self.wavelength.is_finite()
            && self.wavelength > 0.0
            && self.amplitude.is_finite()
            && (1..=MAX_WAVE_SAMPLES).contains(&self.min_samples)
    }

    /// Samples for a link of length `distance`: one per tenth of a
    /// wavelength, at least `min_samples`. `None` past [`MAX_WAVE_SAMPLES`].
    pub fn samples(&self, distance: f64) -> Option<usize> {
        let by_distance = (distance / (self.wavelength / 10.0)).ceil();
        if !by_distance.is_finite() || by_distance > MAX_WAVE_SAMPLES as f64 {
            return None;
        }
        let samples = self.min_samples.max(by_distance as usize);
        (samples <= MAX_WAVE_SAMPLES).then_some(samples)
    }
}

/// Polyline through `from`, then `samples` points offset perpendicular to the
/// straight segment by a sine of the distance travelled.
///
/// Coincident endpoints have no direction; the wave then degenerates to a
/// run of samples sitting on `from`, which still draws as a valid path.
/// Returns `None` for invalid parameters or a link needing too many samples.
pub fn wave_path(from: Point, to: Point, wave: Wave) -> Option<Vec<Point>> {
    if !wave.is_valid() {
        return None;
    }
    let delta = to - from;
    let distance = delta.length();
    let samples = wave.samples(distance)?;

    let (ux, uy) = if distance > 0.0 {
        (delta.dx / distance, delta.dy / distance)
    } else {
        (1.0, 0.0)
    };
    let (vx, vy) = (-uy, ux);

    let mut points = Vec::with_capacity(samples + 1);
    points.push(from);
    for i in 1..=samples {
        let t = i as f64 / samples as f64;
        let offset = wave.amplitude * (2.0 * PI * t * distance / wave.wavelength).sin();
        points.push(Point::new(
            from.x + t * delta.dx + vx * offset,
            from.y + t * delta.dy + vy * offset,
        ));
    }
    Some(points)
}

/// SVG path data (`M x y L x y ...`) for a polyline.
pub fn path_data(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {} {}", if i == 0 { 'M' } else { 'L' }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
