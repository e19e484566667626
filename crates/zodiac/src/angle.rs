//! Conversions between ecliptic longitude and screen angles.
//!
//! Screen angles follow the cairo convention: radians, measured from the
//! positive x axis with y pointing down. Every drawing and picking path goes
//! through [`to_screen_angle_radians`] and its inverse so the two never drift.

use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const FULL_CIRCLE: f64 = 360.0;
/// Screen angle, in degrees, at which the first house begins in an anticlockwise chart.
pub const HOUSE_ANCHOR_DEG: f64 = 285.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[strum(to_string = "clockwise", serialize = "cw")]
    Clockwise,
    #[default]
    #[strum(
        to_string = "anticlockwise",
        serialize = "ccw",
        serialize = "counterclockwise"
    )]
    Anticlockwise,
}

impl Direction {
    fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::Anticlockwise => -1.0,
        }
    }
}

/// Rotation and direction shared by a render pass and every hit test run against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularFrame {
    pub rotation_offset_deg: f64,
    pub direction: Direction,
}

impl AngularFrame {
    pub fn new(rotation_offset_deg: f64, direction: Direction) -> Self {
        Self {
            rotation_offset_deg: normalize_degree(rotation_offset_deg),
            direction,
        }
    }

    /// Rotating frame of the zodiacal rings. The ascendant lands at the top of the circle.
    pub fn from_ascendant(ascendant_deg: f64, direction: Direction) -> Self {
        // 360 - asc for anticlockwise charts
        Self::new(direction.sign() * normalize_degree(ascendant_deg), direction)
    }

    /// Fixed frame whose zero lies at `anchor_deg` on screen.
    pub fn anchored(anchor_deg: f64, direction: Direction) -> Self {
        Self::new(-90.0 - anchor_deg, direction)
    }

    /// Frame of the house ring. It ignores the ascendant, so houses stay put
    /// while the sky rotates underneath them.
    pub fn houses(direction: Direction) -> Self {
        let anchor = match direction {
            Direction::Anticlockwise => HOUSE_ANCHOR_DEG,
            // mirrored about the vertical axis
            Direction::Clockwise => 180.0 - HOUSE_ANCHOR_DEG,
        };
        Self::anchored(anchor, direction)
    }

    pub fn to_screen(&self, longitude_deg: f64) -> f64 {
        to_screen_angle_radians(longitude_deg, self)
    }

    pub fn to_longitude(&self, screen_angle_radians: f64) -> f64 {
        to_longitude_deg(screen_angle_radians, self)
    }
}

/// Folds any angle into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_degree(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let d = deg.rem_euclid(FULL_CIRCLE);
    // rem_euclid rounds tiny negatives up to exactly 360
    if d >= FULL_CIRCLE { 0.0 } else { d }
}

/// `(±L - 90 - R)` in radians, `-L` for anticlockwise frames. Not normalised,
/// so consecutive segment boundaries stay monotonic for arc drawing.
pub fn to_screen_angle_radians(longitude_deg: f64, frame: &AngularFrame) -> f64 {
    (frame.direction.sign() * longitude_deg - 90.0 - frame.rotation_offset_deg).to_radians()
}

pub fn to_longitude_deg(screen_angle_radians: f64, frame: &AngularFrame) -> f64 {
    let screen_deg = screen_angle_radians.to_degrees();
    normalize_degree(frame.direction.sign() * (screen_deg + 90.0 + frame.rotation_offset_deg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use strum::IntoEnumIterator;

    const EPS: f64 = 1e-9;

    fn circular_gap(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(FULL_CIRCLE);
        d.min(FULL_CIRCLE - d)
    }

    #[test]
    fn test_round_trip_over_rotations() {
        for direction in Direction::iter() {
            for r in (0..360).step_by(7) {
                let frame = AngularFrame::new(r as f64 + 0.25, direction);
                for l in (0..3600).step_by(37) {
                    let longitude = l as f64 / 10.0;
                    let back = frame.to_longitude(frame.to_screen(longitude));
                    assert!(
                        circular_gap(back, longitude) < EPS,
                        "{direction} r={r} l={longitude} -> {back}"
                    );
                    assert!((0.0..FULL_CIRCLE).contains(&back));
                }
            }
        }
    }

    #[test]
    fn test_anticlockwise_matches_reference_formula() {
        let frame = AngularFrame::from_ascendant(96.0, Direction::Anticlockwise);
        assert!((frame.rotation_offset_deg - 264.0).abs() < EPS);
        let expected = (-59.0 - 90.0 - 264.0) * PI / 180.0;
        assert!((frame.to_screen(59.0) - expected).abs() < EPS);
    }

    #[test]
    fn test_ascendant_sits_at_top() {
        for asc in [0.0, 96.0, 200.5, 359.9] {
            for direction in Direction::iter() {
                let frame = AngularFrame::from_ascendant(asc, direction);
                let a = frame.to_screen(asc);
                assert!(a.cos().abs() < EPS);
                assert!((a.sin() + 1.0).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_house_frame_is_anchored() {
        let houses = AngularFrame::houses(Direction::Anticlockwise);
        assert!((houses.rotation_offset_deg - 345.0).abs() < EPS);
        let start = normalize_degree(houses.to_screen(0.0).to_degrees());
        assert!((start - HOUSE_ANCHOR_DEG).abs() < EPS);

        let mirrored = AngularFrame::houses(Direction::Clockwise);
        let start = normalize_degree(mirrored.to_screen(0.0).to_degrees());
        assert!((start - 255.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_degree_edges() {
        assert_eq!(normalize_degree(f64::NAN), 0.0);
        assert_eq!(normalize_degree(f64::INFINITY), 0.0);
        assert_eq!(normalize_degree(-1e-20), 0.0);
        assert_eq!(normalize_degree(720.0), 0.0);
        assert!((normalize_degree(-30.0) - 330.0).abs() < EPS);
        assert!((normalize_degree(361.5) - 1.5).abs() < EPS);
    }

    #[test]
    fn test_direction_deserialization() {
        let cases = vec![
            ("\"anticlockwise\"", Direction::Anticlockwise),
            ("\"AntiClockwise\"", Direction::Anticlockwise),
            ("\"ccw\"", Direction::Anticlockwise),
            ("\"clockwise\"", Direction::Clockwise),
            ("\"CW\"", Direction::Clockwise),
        ];

        for (json, expected) in cases {
            let deserialized: Direction = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(Direction::Anticlockwise.to_string(), "anticlockwise");
    }
}
