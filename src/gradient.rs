//! Color-over-age gradients.
//!
//! A [`Gradient`] is a piecewise-linear color+alpha ramp sampled by a
//! particle's normalized age (0.0 at spawn, 1.0 at `max_lifetime`). It is
//! built from 2 to 16 [`ColorStop`]s. The *last* stop is a sentinel
//! boundary: it contributes the end color of the final segment but is never
//! itself a draw color, and its ratio is conventionally zero.
//!
//! Stop ratios are relative segment weights, not absolute positions. A
//! gradient with stops weighted `1, 1, 0` has two segments of equal width
//! covering the whole `[0, 1]` age axis.
//!
//! # Example
//!
//! ```ignore
//! // White-hot spark cooling to transparent red.
//! let gradient = Gradient::new(vec![
//!     ColorStop::new(1.0, Rgba::new(255, 255, 255, 255)),
//!     ColorStop::new(1.0, Rgba::new(255, 180, 0, 125)),
//!     ColorStop::new(0.0, Rgba::new(255, 0, 0, 0)),
//! ])?;
//!
//! assert_eq!(gradient.sample(0.0), Rgba::new(255, 255, 255, 255));
//! ```

use crate::error::ConfigError;

/// Maximum number of stops a gradient may hold.
pub const MAX_COLOR_STOPS: usize = 16;

/// An 8-bit RGBA draw color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque white, the neutral sprite tint.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation per channel, `t` in `[0, 1]`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let mix = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// One stop of a [`Gradient`]: a segment weight and the color at the
/// segment's left boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    /// Relative width of the segment starting at this stop. Zero-width
    /// stops are only meaningful as the final sentinel.
    pub ratio: f32,
    /// Color at this stop.
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(ratio: f32, color: Rgba) -> Self {
        Self { ratio, color }
    }
}

/// A validated piecewise-linear color ramp over normalized particle age.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    /// Build a gradient from stops, validating the rendering invariants:
    /// 2 to 16 stops, no negative ratios, and a positive total segment
    /// weight (the sentinel's ratio is excluded from the total).
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ConfigError> {
        if stops.len() < 2 {
            return Err(ConfigError::TooFewColorStops(stops.len()));
        }
        if stops.len() > MAX_COLOR_STOPS {
            return Err(ConfigError::TooManyColorStops(stops.len()));
        }
        for stop in &stops {
            if !(stop.ratio >= 0.0) {
                return Err(ConfigError::NegativeStopRatio(stop.ratio));
            }
        }
        let total: f32 = stops[..stops.len() - 1].iter().map(|s| s.ratio).sum();
        if total <= 0.0 {
            return Err(ConfigError::ZeroGradientWeight);
        }
        Ok(Self { stops })
    }

    /// A single-segment gradient from `from` to `to`.
    pub fn fade(from: Rgba, to: Rgba) -> Self {
        Self {
            stops: vec![ColorStop::new(1.0, from), ColorStop::new(0.0, to)],
        }
    }

    /// The stops, sentinel included.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Sample the ramp at a normalized age.
    ///
    /// `age_norm` outside `[0, 1]` (or NaN) is clamped rather than
    /// rejected. A gradient whose segment weights sum to zero cannot pass
    /// validation, but if one is sampled anyway the first stop's color is
    /// returned instead of dividing by zero.
    pub fn sample(&self, age_norm: f32) -> Rgba {
        let n = self.stops.len();
        let age = if age_norm.is_nan() { 0.0 } else { age_norm.clamp(0.0, 1.0) };

        let total: f32 = self.stops[..n - 1].iter().map(|s| s.ratio).sum();
        if total <= 0.0 {
            return self.stops[0].color;
        }

        let mut min_age = 0.0;
        for j in 0..n - 1 {
            let width = self.stops[j].ratio / total;
            let max_age = min_age + width;
            let last_segment = j == n - 2;
            if age > max_age && !last_segment {
                min_age = max_age;
                continue;
            }
            if width <= 0.0 {
                return self.stops[j].color;
            }
            let t = ((age - min_age) / width).clamp(0.0, 1.0);
            return self.stops[j].color.lerp(self.stops[j + 1].color, t);
        }
        // Unreachable: the last segment always accepts.
        self.stops[n - 1].color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spark() -> Gradient {
        Gradient::new(vec![
            ColorStop::new(1.0, Rgba::new(255, 255, 255, 255)),
            ColorStop::new(1.0, Rgba::new(255, 180, 0, 125)),
            ColorStop::new(0.0, Rgba::new(255, 0, 0, 0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_sample_at_zero_is_first_stop() {
        assert_eq!(spark().sample(0.0), Rgba::new(255, 255, 255, 255));
    }

    #[test]
    fn test_sample_tends_to_second_to_last_stop_at_boundary() {
        // Just before the final segment begins the color converges on the
        // stop that opens it, stops[n-2].
        let g = spark();
        let near = g.sample(0.4999);
        let at = g.sample(0.5);
        assert_eq!(at, Rgba::new(255, 180, 0, 125));
        assert!((near.g as i32 - at.g as i32).abs() <= 1);
        assert!((near.a as i32 - at.a as i32).abs() <= 1);
    }

    #[test]
    fn test_sample_at_one_is_sentinel_color() {
        assert_eq!(spark().sample(1.0), Rgba::new(255, 0, 0, 0));
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        let g = spark();
        assert_eq!(g.sample(-3.0), g.sample(0.0));
        assert_eq!(g.sample(7.5), g.sample(1.0));
        assert_eq!(g.sample(f32::NAN), g.sample(0.0));
    }

    #[test]
    fn test_midpoint_interpolates_channels() {
        let g = Gradient::fade(Rgba::new(0, 0, 0, 0), Rgba::new(200, 100, 50, 255));
        let mid = g.sample(0.5);
        assert_eq!(mid, Rgba::new(100, 50, 25, 128));
    }

    #[test]
    fn test_zero_width_interior_segment_is_skipped() {
        let g = Gradient::new(vec![
            ColorStop::new(1.0, Rgba::new(255, 0, 0, 255)),
            ColorStop::new(0.0, Rgba::new(0, 255, 0, 255)),
            ColorStop::new(1.0, Rgba::new(0, 255, 0, 255)),
            ColorStop::new(0.0, Rgba::new(0, 0, 255, 255)),
        ])
        .unwrap();
        // The zero-width segment covers no age range; 0.75 falls in the
        // last segment.
        let c = g.sample(0.75);
        assert_eq!(c, Rgba::new(0, 128, 128, 255));
    }

    #[test]
    fn test_rejects_too_few_stops() {
        let err = Gradient::new(vec![ColorStop::new(1.0, Rgba::WHITE)]).unwrap_err();
        assert_eq!(err, ConfigError::TooFewColorStops(1));
    }

    #[test]
    fn test_rejects_too_many_stops() {
        let stops = vec![ColorStop::new(1.0, Rgba::WHITE); MAX_COLOR_STOPS + 1];
        let err = Gradient::new(stops).unwrap_err();
        assert_eq!(err, ConfigError::TooManyColorStops(MAX_COLOR_STOPS + 1));
    }

    #[test]
    fn test_rejects_negative_ratio() {
        let err = Gradient::new(vec![
            ColorStop::new(-1.0, Rgba::WHITE),
            ColorStop::new(0.0, Rgba::WHITE),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::NegativeStopRatio(-1.0));
    }

    #[test]
    fn test_rejects_zero_total_weight() {
        let err = Gradient::new(vec![
            ColorStop::new(0.0, Rgba::WHITE),
            ColorStop::new(1.0, Rgba::WHITE),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroGradientWeight);
    }

    #[test]
    fn test_zero_total_falls_back_to_first_stop() {
        // Bypass validation to exercise the runtime fallback.
        let g = Gradient {
            stops: vec![
                ColorStop::new(0.0, Rgba::new(9, 9, 9, 9)),
                ColorStop::new(1.0, Rgba::WHITE),
            ],
        };
        assert_eq!(g.sample(0.5), Rgba::new(9, 9, 9, 9));
    }
}
