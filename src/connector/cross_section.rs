//! 2-D face cross-sections and their canonical keys

use crate::io::configuration::COORDINATE_PRECISION;
use crate::io::error::{Result, invalid_cross_section};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Points of a face boundary projected onto the face plane
///
/// Point order carries no meaning: the canonical key sorts the points, so any
/// permutation of the same set maps to the same connector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrossSection {
    points: Vec<[f64; 2]>,
}

impl CrossSection {
    /// Create a cross-section from projected points
    pub const fn new(points: Vec<[f64; 2]>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle spanning `[x0, x1] × [y0, y1]` by its four corners
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(vec![[x0, y0], [x0, y1], [x1, y0], [x1, y1]])
    }

    /// Projected points
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the cross-section has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reject input the catalog cannot canonicalize
    ///
    /// # Errors
    ///
    /// Returns an error if the cross-section is empty or holds a NaN or
    /// infinite coordinate
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(invalid_cross_section(&"cross-section has no points"));
        }
        if let Some(point) = self
            .points
            .iter()
            .find(|[x, y]| !x.is_finite() || !y.is_finite())
        {
            return Err(invalid_cross_section(&format!(
                "non-finite coordinate {point:?}"
            )));
        }
        Ok(())
    }

    /// Mirror image about the projection axis (`x → -x`)
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self::new(self.points.iter().map(|&[x, y]| [-x, y]).collect())
    }

    /// Quarter turn in the face plane (`(x, y) → (-y, x)`)
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self::new(self.points.iter().map(|&[x, y]| [-y, x]).collect())
    }

    /// Canonical string key: rounded to hundredths, sorted by `(x, y)`
    ///
    /// Rounding happens on integer hundredths so that `-0.0` and `0.0` share
    /// a key.
    pub fn canonical_key(&self) -> String {
        let mut quantized: Vec<(i64, i64)> = self
            .points
            .iter()
            .map(|&[x, y]| (quantize(x), quantize(y)))
            .collect();
        quantized.sort_unstable();

        let mut key = String::with_capacity(quantized.len() * 14);
        for (x, y) in quantized {
            key.push('(');
            push_fixed(&mut key, x);
            key.push(',');
            push_fixed(&mut key, y);
            key.push(')');
        }
        key
    }
}

impl From<Vec<[f64; 2]>> for CrossSection {
    fn from(points: Vec<[f64; 2]>) -> Self {
        Self::new(points)
    }
}

fn quantize(value: f64) -> i64 {
    (value * COORDINATE_PRECISION).round() as i64
}

fn push_fixed(key: &mut String, hundredths: i64) {
    let sign = if hundredths < 0 { "-" } else { "" };
    let magnitude = hundredths.unsigned_abs();
    // Writing to a String cannot fail
    let _ = write!(key, "{sign}{}.{:02}", magnitude / 100, magnitude % 100);
}
