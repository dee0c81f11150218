use crate::shared::constants::{DEFAULT_BAND_HIGH, DEFAULT_BAND_LOW};
use crate::shared::point::Point;

/// The rectangular region of normalized frame coordinates within which the
/// reference point counts as attentive.
///
/// Membership is half-open on both axes: lower bounds are inclusive, upper
/// bounds exclusive, so `x == x_low` is inside and `x == x_high` is not.
/// Bands are configuration; different camera framings need recalibration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusBand {
    x_low: f64,
    x_high: f64,
    y_low: f64,
    y_high: f64,
}

impl FocusBand {
    pub fn new(x_low: f64, x_high: f64, y_low: f64, y_high: f64) -> Result<Self, String> {
        for (name, v) in [
            ("x_low", x_low),
            ("x_high", x_high),
            ("y_low", y_low),
            ("y_high", y_high),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{name} must be in [0, 1], got {v}"));
            }
        }
        if x_low >= x_high {
            return Err(format!("x_low ({x_low}) must be below x_high ({x_high})"));
        }
        if y_low >= y_high {
            return Err(format!("y_low ({y_low}) must be below y_high ({y_high})"));
        }
        Ok(Self {
            x_low,
            x_high,
            y_low,
            y_high,
        })
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.x_low..self.x_high).contains(&point.x)
            && (self.y_low..self.y_high).contains(&point.y)
    }
}

impl Default for FocusBand {
    /// Center-of-frame box, matching a typical webcam framing.
    fn default() -> Self {
        Self {
            x_low: DEFAULT_BAND_LOW,
            x_high: DEFAULT_BAND_HIGH,
            y_low: DEFAULT_BAND_LOW,
            y_high: DEFAULT_BAND_HIGH,
        }
    }
}
