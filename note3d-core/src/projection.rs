/// Camera and projection utilities
use nalgebra::{Matrix4, Point2, Point3};

use crate::color::Color;
use crate::geometry::{Plane, Surface};
use crate::transform::{RotationState, Transform};

/// Drop the axis not in `plane` and map the remaining two to screen x/y.
pub fn project(point: &Point3<f64>, plane: Plane) -> Point2<f64> {
    match plane {
        Plane::Xy => Point2::new(point.x, point.y),
        Plane::Yz => Point2::new(point.y, point.z),
        Plane::Zx => Point2::new(point.z, point.x),
    }
}

/// Place a 2D authoring point on `plane` in 3D. Inverse of [`project`].
pub fn lift(point: &Point2<f64>, plane: Plane) -> Point3<f64> {
    match plane {
        Plane::Xy => Point3::new(point.x, point.y, 0.0),
        Plane::Yz => Point3::new(0.0, point.x, point.y),
        Plane::Zx => Point3::new(point.y, 0.0, point.x),
    }
}

/// How the host currently looks at the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Orthographic drafting view of one coordinate plane.
    Plane(Plane),
    /// Rotatable 3D view: points go through the view matrix and keep x/y.
    View(Matrix4<f64>),
}

impl Projection {
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        match self {
            Projection::Plane(plane) => project(point, *plane),
            Projection::View(view) => {
                let p = Transform::apply(point, view);
                Point2::new(p.x, p.y)
            }
        }
    }

    pub fn plane(&self) -> Option<Plane> {
        match self {
            Projection::Plane(plane) => Some(*plane),
            Projection::View(_) => None,
        }
    }
}

impl From<Plane> for Projection {
    fn from(plane: Plane) -> Self {
        Projection::Plane(plane)
    }
}

/// Camera state for the rotatable 3D view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub rotation: RotationState,
    pub scale: f64,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            rotation: RotationState::new(-0.6, 0.0, 0.5),
            scale: 1.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Transform::rotation(&self.rotation) * Transform::scale(self.scale, self.scale, self.scale)
    }

    pub fn projection(&self) -> Projection {
        Projection::View(self.view_matrix())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// A surface flattened to 2D, ready for a drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub points: Vec<Point2<f64>>,
    pub closed: bool,
    pub line_color: Color,
    pub fill_color: Option<Color>,
}

impl Drawing {
    /// Faces keep their surface color as fill; segments only get a line.
    pub fn from_surface(surface: &Surface, projection: &Projection, line_color: Color) -> Self {
        let points = surface.points.iter().map(|p| projection.project(p)).collect();
        let closed = surface.is_face();
        Self {
            points,
            closed,
            line_color,
            fill_color: closed.then_some(surface.color),
        }
    }

    /// Replay into a sink using the cheapest draw call that fits.
    pub fn draw_into<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        match (self.points.as_slice(), self.closed) {
            ([], _) => {}
            ([a, b], false) => sink.line(a, b, self.line_color),
            (points, false) => sink.polyline(points, self.line_color),
            (points, true) => sink.polygon(points, self.line_color, self.fill_color),
        }
    }
}

/// Drawing primitives the kernel issues. Implemented by the host UI.
pub trait DrawSink {
    fn line(&mut self, from: &Point2<f64>, to: &Point2<f64>, color: Color);

    fn polyline(&mut self, points: &[Point2<f64>], color: Color) {
        for pair in points.windows(2) {
            self.line(&pair[0], &pair[1], color);
        }
    }

    fn polygon(&mut self, points: &[Point2<f64>], line: Color, _fill: Option<Color>) {
        self.polyline(points, line);
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if points.len() > 2 {
                self.line(last, first, line);
            }
        }
    }
}
