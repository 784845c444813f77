/// Construction planes and drawable surfaces
use nalgebra::Point3;
use std::fmt;

use crate::color::Color;

/// One of the three orthogonal coordinate planes.
///
/// Used both as the plane a primitive is authored on and as the drafting
/// plane a model is viewed and picked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Plane {
    #[default]
    Xy,
    Yz,
    Zx,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Xy, Plane::Yz, Plane::Zx];

    /// Tag used in persisted records.
    pub fn tag(&self) -> &'static str {
        match self {
            Plane::Xy => "xy",
            Plane::Yz => "yz",
            Plane::Zx => "zx",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Plane> {
        Plane::ALL
            .into_iter()
            .find(|p| p.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Plane::Xy => "XY",
            Plane::Yz => "YZ",
            Plane::Zx => "ZX",
        })
    }
}

/// A flat drawable face or segment with one color
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub points: Vec<Point3<f64>>,
    pub color: Color,
}

impl Surface {
    pub fn new(points: Vec<Point3<f64>>, color: Color) -> Self {
        Self { points, color }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Segments draw open; anything with three or more points is a face.
    pub fn is_face(&self) -> bool {
        self.points.len() >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_tags() {
        for plane in Plane::ALL {
            assert_eq!(Plane::from_tag(plane.tag()), Some(plane));
        }
        assert_eq!(Plane::from_tag("XY"), Some(Plane::Xy));
        assert_eq!(Plane::from_tag("xz"), None);
    }

    #[test]
    fn test_surface_kind() {
        let segment = Surface::new(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            Color::BLACK,
        );
        assert!(!segment.is_face());
        assert_eq!(segment.len(), 2);
    }
}
