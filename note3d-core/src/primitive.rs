/// Parametric shapes authored on a construction plane and lifted into 3D
///
/// A [`Primitive`] owns one [`Shape`] plus its presentation attributes and
/// the vertex list generated from them. The vertex list is private and is
/// regenerated by every setter that can change it.
use nalgebra::{Matrix4, Point2, Point3};
use std::f64::consts::TAU;
use std::fmt;

use crate::color::Color;
use crate::geometry::{Plane, Surface};
use crate::pick::PickBox;
use crate::projection::{lift, Projection};
use crate::topology::{decompose_to_surfaces, Topology};
use crate::transform::Transform;

/// Segments used to approximate an arc unless configured otherwise.
pub const DEFAULT_ARC_DIVISIONS: usize = 40;

/// Upper bound on arc segments; larger counts are clamped when generating.
pub const MAX_ARC_DIVISIONS: usize = 10_000;

const COLLINEAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Line,
    Arc,
    Polygon,
    WireCube,
    Cube,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Line,
        PrimitiveKind::Arc,
        PrimitiveKind::Polygon,
        PrimitiveKind::WireCube,
        PrimitiveKind::Cube,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            PrimitiveKind::Line => "Line",
            PrimitiveKind::Arc => "Arc",
            PrimitiveKind::Polygon => "Polygon",
            PrimitiveKind::WireCube => "WireCube",
            PrimitiveKind::Cube => "Cube",
        }
    }

    pub fn from_tag(tag: &str) -> Option<PrimitiveKind> {
        PrimitiveKind::ALL.into_iter().find(|k| k.tag() == tag.trim())
    }

    /// Tag of the record carrying this kind's shape parameters.
    pub fn data_tag(&self) -> &'static str {
        match self {
            PrimitiveKind::Line => "LineData",
            PrimitiveKind::Arc => "ArcData",
            PrimitiveKind::Polygon => "PolygonData",
            PrimitiveKind::WireCube => "WireCubeData",
            PrimitiveKind::Cube => "CubeData",
        }
    }

    pub fn default_topology(&self) -> Topology {
        match self {
            PrimitiveKind::Line | PrimitiveKind::WireCube => Topology::Lines,
            PrimitiveKind::Arc => Topology::LineStrip,
            PrimitiveKind::Polygon => Topology::LineLoop,
            PrimitiveKind::Cube => Topology::Quads,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

/// Circular arc from `start_angle` to `end_angle` (radians, counter-clockwise).
#[derive(Debug, Clone, PartialEq)]
pub struct ArcShape {
    pub center: Point2<f64>,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub divisions: usize,
}

impl ArcShape {
    pub fn circle(center: Point2<f64>, radius: f64) -> Self {
        Self {
            center,
            radius: radius.abs(),
            start_angle: 0.0,
            end_angle: TAU,
            divisions: DEFAULT_ARC_DIVISIONS,
        }
    }

    /// Arc from `start` through `mid` to `end`.
    ///
    /// Collinear or coincident points give a zero-radius arc at `start`.
    pub fn through_points(start: Point2<f64>, mid: Point2<f64>, end: Point2<f64>) -> Self {
        let Some(center) = circumcenter(&start, &mid, &end) else {
            return Self {
                center: start,
                radius: 0.0,
                start_angle: 0.0,
                end_angle: 0.0,
                divisions: DEFAULT_ARC_DIVISIONS,
            };
        };
        let angle_of = |p: &Point2<f64>| (p.y - center.y).atan2(p.x - center.x);
        let (sa, ma, ea) = (angle_of(&start), angle_of(&mid), angle_of(&end));
        let ccw = |from: f64, to: f64| (to - from).rem_euclid(TAU);

        let (start_angle, sweep) = if ccw(sa, ma) <= ccw(sa, ea) {
            (sa, ccw(sa, ea))
        } else {
            (ea, ccw(ea, sa))
        };
        Self {
            center,
            radius: nalgebra::distance(&center, &start),
            start_angle,
            end_angle: start_angle + sweep,
            divisions: DEFAULT_ARC_DIVISIONS,
        }
    }

    pub fn with_divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions;
        self
    }

    /// `divisions + 1` points along the arc, with `divisions` clamped to
    /// `1..=MAX_ARC_DIVISIONS`.
    pub fn points(&self) -> Vec<Point2<f64>> {
        let n = self.divisions.clamp(1, MAX_ARC_DIVISIONS);
        let step = (self.end_angle - self.start_angle) / n as f64;
        (0..=n)
            .map(|i| {
                let a = self.start_angle + step * i as f64;
                Point2::new(
                    self.center.x + self.radius * a.cos(),
                    self.center.y + self.radius * a.sin(),
                )
            })
            .collect()
    }
}

fn circumcenter(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Option<Point2<f64>> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < COLLINEAR_EPSILON {
        return None;
    }
    let (a2, b2, c2) = (a.coords.norm_squared(), b.coords.norm_squared(), c.coords.norm_squared());
    Some(Point2::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    pub points: Vec<Point2<f64>>,
}

impl PolygonShape {
    /// Axis-aligned rectangle from two opposite corners.
    pub fn rect(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            points: vec![a, Point2::new(a.x, b.y), b, Point2::new(b.x, a.y)],
        }
    }
}

/// Box spanned by two diagonal corners on the construction plane,
/// extruded symmetrically by `height` along the plane normal.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
    pub height: f64,
}

impl BoxShape {
    /// 12 edges as 24 points, bottom ring, verticals, top ring.
    fn edges(&self, plane: Plane) -> Vec<Point3<f64>> {
        let (s, e, h) = (self.start, self.end, self.height / 2.0);
        let raw = [
            (s.x, s.y, -h), (s.x, e.y, -h), (s.x, e.y, -h), (e.x, e.y, -h),
            (e.x, e.y, -h), (e.x, s.y, -h), (e.x, s.y, -h), (s.x, s.y, -h),
            (s.x, s.y, -h), (s.x, s.y, h), (s.x, e.y, -h), (s.x, e.y, h),
            (e.x, e.y, -h), (e.x, e.y, h), (e.x, s.y, -h), (e.x, s.y, h),
            (s.x, s.y, h), (s.x, e.y, h), (s.x, e.y, h), (e.x, e.y, h),
            (e.x, e.y, h), (e.x, s.y, h), (e.x, s.y, h), (s.x, s.y, h),
        ];
        raw.iter().map(|&(u, v, w)| place(u, v, w, plane)).collect()
    }

    /// 6 faces as 24 points, four per quad.
    fn faces(&self, plane: Plane) -> Vec<Point3<f64>> {
        let (s, e, h) = (self.start, self.end, self.height / 2.0);
        let raw = [
            // top and bottom
            (s.x, s.y, h), (s.x, e.y, h), (e.x, e.y, h), (e.x, s.y, h),
            (s.x, s.y, -h), (e.x, s.y, -h), (e.x, e.y, -h), (s.x, e.y, -h),
            // sides along u
            (s.x, e.y, -h), (e.x, e.y, -h), (e.x, e.y, h), (s.x, e.y, h),
            (s.x, s.y, -h), (s.x, s.y, h), (e.x, s.y, h), (e.x, s.y, -h),
            // sides along v
            (e.x, s.y, -h), (e.x, s.y, h), (e.x, e.y, h), (e.x, e.y, -h),
            (s.x, s.y, -h), (s.x, e.y, -h), (s.x, e.y, h), (s.x, s.y, h),
        ];
        raw.iter().map(|&(u, v, w)| place(u, v, w, plane)).collect()
    }
}

/// Map authoring coordinates (plane u/v, normal w) into 3D.
fn place(u: f64, v: f64, w: f64, plane: Plane) -> Point3<f64> {
    match plane {
        Plane::Xy => Point3::new(u, v, w),
        Plane::Yz => Point3::new(w, u, v),
        Plane::Zx => Point3::new(v, w, u),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LineShape),
    Arc(ArcShape),
    Polygon(PolygonShape),
    WireCube(BoxShape),
    Cube(BoxShape),
}

impl Shape {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Shape::Line(_) => PrimitiveKind::Line,
            Shape::Arc(_) => PrimitiveKind::Arc,
            Shape::Polygon(_) => PrimitiveKind::Polygon,
            Shape::WireCube(_) => PrimitiveKind::WireCube,
            Shape::Cube(_) => PrimitiveKind::Cube,
        }
    }

    /// Pure function of the parameters and the construction plane.
    pub fn generate_vertices(&self, plane: Plane) -> Vec<Point3<f64>> {
        match self {
            Shape::Line(line) => vec![lift(&line.start, plane), lift(&line.end, plane)],
            Shape::Arc(arc) => arc.points().iter().map(|p| lift(p, plane)).collect(),
            Shape::Polygon(polygon) => polygon.points.iter().map(|p| lift(p, plane)).collect(),
            Shape::WireCube(b) => b.edges(plane),
            Shape::Cube(b) => b.faces(plane),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    shape: Shape,
    plane: Plane,
    topology: Topology,
    line_color: Color,
    line_thickness: f64,
    face_colors: Vec<Color>,
    vertices: Vec<Point3<f64>>,
}

impl Primitive {
    pub fn new(shape: Shape, plane: Plane) -> Self {
        let topology = shape.kind().default_topology();
        let vertices = shape.generate_vertices(plane);
        Self {
            shape,
            plane,
            topology,
            line_color: Color::BLACK,
            line_thickness: 1.0,
            face_colors: vec![Color::BLACK],
            vertices,
        }
    }

    pub fn line(start: Point2<f64>, end: Point2<f64>, plane: Plane) -> Self {
        Self::new(Shape::Line(LineShape { start, end }), plane)
    }

    pub fn arc(arc: ArcShape, plane: Plane) -> Self {
        Self::new(Shape::Arc(arc), plane)
    }

    pub fn polygon(points: Vec<Point2<f64>>, plane: Plane) -> Self {
        Self::new(Shape::Polygon(PolygonShape { points }), plane)
    }

    pub fn wire_cube(start: Point2<f64>, end: Point2<f64>, height: f64, plane: Plane) -> Self {
        Self::new(Shape::WireCube(BoxShape { start, end, height }), plane)
    }

    pub fn cube(start: Point2<f64>, end: Point2<f64>, height: f64, plane: Plane) -> Self {
        Self::new(Shape::Cube(BoxShape { start, end, height }), plane)
    }

    /// Line color and first face color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_face_colors(mut self, colors: Vec<Color>) -> Self {
        self.face_colors = colors;
        self
    }

    pub fn with_line_thickness(mut self, thickness: f64) -> Self {
        self.line_thickness = thickness;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn line_color(&self) -> Color {
        self.line_color
    }

    pub fn line_thickness(&self) -> f64 {
        self.line_thickness
    }

    pub fn face_colors(&self) -> &[Color] {
        &self.face_colors
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Mutate the shape parameters in place and regenerate the vertices.
    pub fn edit_shape(&mut self, f: impl FnOnce(&mut Shape)) {
        f(&mut self.shape);
        self.regenerate();
    }

    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
        self.regenerate();
    }

    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    pub fn set_color(&mut self, color: Color) {
        self.line_color = color;
        match self.face_colors.first_mut() {
            Some(first) => *first = color,
            None => self.face_colors.push(color),
        }
    }

    pub fn set_line_color(&mut self, color: Color) {
        self.line_color = color;
    }

    pub fn set_face_colors(&mut self, colors: Vec<Color>) {
        self.face_colors = colors;
    }

    pub fn set_line_thickness(&mut self, thickness: f64) {
        self.line_thickness = thickness;
    }

    fn regenerate(&mut self) {
        self.vertices = self.shape.generate_vertices(self.plane);
    }

    pub fn surfaces(&self) -> Vec<Surface> {
        decompose_to_surfaces(&self.vertices, self.topology, &self.face_colors)
    }

    /// Whether the primitive, placed by `accumulated` and projected, is
    /// inside or crosses `pick`.
    pub fn pick_test(&self, pick: &PickBox, accumulated: &Matrix4<f64>, projection: &Projection) -> bool {
        let points: Vec<Point2<f64>> = self
            .vertices
            .iter()
            .map(|p| projection.project(&Transform::apply(p, accumulated)))
            .collect();
        match self.shape {
            Shape::Line(_) | Shape::Arc(_) => pick.hits_polyline(&points, false),
            Shape::Polygon(_) => pick.hits_polyline(&points, true),
            Shape::WireCube(_) => points.chunks_exact(2).any(|w| pick.hits_polyline(w, false)),
            Shape::Cube(_) => points.chunks_exact(4).any(|w| pick.hits_polyline(w, true)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_line_vertices_follow_plane() {
        let line = Primitive::line(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0), Plane::Yz);
        assert_eq!(line.vertices(), &[Point3::new(0.0, 1.0, 2.0), Point3::new(0.0, 3.0, 4.0)]);
        assert_eq!(line.topology(), Topology::Lines);
    }

    #[test]
    fn test_arc_subdivision() {
        let arc = Primitive::arc(ArcShape::circle(Point2::origin(), 2.0), Plane::Xy);
        let v = arc.vertices();
        assert_eq!(v.len(), DEFAULT_ARC_DIVISIONS + 1);
        assert_relative_eq!(v[0], Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(v[DEFAULT_ARC_DIVISIONS], v[0], epsilon = 1e-12);
        assert!(v.iter().all(|p| (p.coords.norm() - 2.0).abs() < 1e-12));
        assert_eq!(arc.surfaces().len(), DEFAULT_ARC_DIVISIONS);
    }

    #[test]
    fn test_arc_divisions_are_clamped() {
        let huge = ArcShape::circle(Point2::origin(), 1.0).with_divisions(usize::MAX);
        assert_eq!(huge.points().len(), MAX_ARC_DIVISIONS + 1);
        let zero = ArcShape::circle(Point2::origin(), 1.0).with_divisions(0);
        assert_eq!(zero.points().len(), 2);
    }

    #[test]
    fn test_three_point_arc_passes_through_mid() {
        let arc = ArcShape::through_points(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        );
        assert_relative_eq!(arc.center, Point2::origin(), epsilon = 1e-12);
        assert_relative_eq!(arc.radius, 1.0, epsilon = 1e-12);
        assert_relative_eq!(arc.end_angle - arc.start_angle, PI, epsilon = 1e-12);
        let mid = arc.points()[arc.divisions / 2];
        assert_relative_eq!(mid, Point2::new(0.0, 1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_three_point_arc_clockwise_input() {
        // through the lower half: the stored arc runs counter-clockwise from end to start
        let arc = ArcShape::through_points(
            Point2::new(1.0, 0.0),
            Point2::new(0.0, -1.0),
            Point2::new(-1.0, 0.0),
        );
        assert_relative_eq!(arc.end_angle - arc.start_angle, PI, epsilon = 1e-12);
        let mid = arc.points()[arc.divisions / 2];
        assert_relative_eq!(mid, Point2::new(0.0, -1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_collinear_arc_is_degenerate() {
        let arc = ArcShape::through_points(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        );
        assert_eq!(arc.radius, 0.0);
        assert!(arc.points().iter().all(|p| *p == Point2::new(0.0, 0.0)));
    }

    #[test]
    fn test_cube_decomposes_into_six_quads() {
        let cube = Primitive::cube(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0), 2.0, Plane::Xy);
        assert_eq!(cube.vertices().len(), 24);
        let surfaces = cube.surfaces();
        assert_eq!(surfaces.len(), 6);
        assert!(surfaces.iter().all(|s| s.len() == 4));
    }

    #[test]
    fn test_wire_cube_has_twelve_edges() {
        let wire = Primitive::wire_cube(Point2::new(0.0, 0.0), Point2::new(1.0, 3.0), 4.0, Plane::Xy);
        let surfaces = wire.surfaces();
        assert_eq!(surfaces.len(), 12);
        let zs: Vec<f64> = wire.vertices().iter().map(|p| p.z).collect();
        assert!(zs.iter().all(|z| *z == 2.0 || *z == -2.0));
    }

    #[test]
    fn test_box_axis_permutation() {
        let xy = Primitive::cube(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0), 2.0, Plane::Xy);
        let yz = Primitive::cube(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0), 2.0, Plane::Yz);
        let zx = Primitive::cube(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0), 2.0, Plane::Zx);
        for ((a, b), c) in xy.vertices().iter().zip(yz.vertices()).zip(zx.vertices()) {
            assert_eq!(*b, Point3::new(a.z, a.x, a.y));
            assert_eq!(*c, Point3::new(a.y, a.z, a.x));
        }
    }

    #[test]
    fn test_edit_shape_regenerates() {
        let mut line = Primitive::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Plane::Xy);
        line.edit_shape(|shape| {
            if let Shape::Line(l) = shape {
                l.end = Point2::new(5.0, 5.0);
            }
        });
        assert_eq!(line.vertices()[1], Point3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_line_pick_is_plane_consistent() {
        let line = Primitive::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), Plane::Xy);
        let identity = Matrix4::identity();
        let pick = PickBox::new(Point2::new(4.0, -1.0), Point2::new(6.0, 1.0));
        assert!(line.pick_test(&pick, &identity, &Plane::Xy.into()));
        assert!(!line.pick_test(&pick, &identity, &Plane::Yz.into()));
    }

    #[test]
    fn test_pick_uses_accumulated_matrix() {
        let line = Primitive::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Plane::Xy);
        let pick = PickBox::around(Point2::new(20.5, 0.0), 0.1);
        assert!(!line.pick_test(&pick, &Matrix4::identity(), &Plane::Xy.into()));
        let moved = Transform::translation(20.0, 0.0, 0.0);
        assert!(line.pick_test(&pick, &moved, &Plane::Xy.into()));
    }

    #[test]
    fn test_polygon_pick_closes_loop() {
        let tri = Primitive::polygon(
            vec![Point2::new(-5.0, 10.0), Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0)],
            Plane::Xy,
        );
        let pick = PickBox::around(Point2::new(0.0, 5.0), 0.5);
        assert!(tri.pick_test(&pick, &Matrix4::identity(), &Plane::Xy.into()));
    }

    #[test]
    fn test_set_color_keeps_extra_face_colors() {
        let mut p = Primitive::line(Point2::origin(), Point2::new(1.0, 0.0), Plane::Xy)
            .with_face_colors(vec![Color::RED, Color::BLUE]);
        p.set_color(Color::GREEN);
        assert_eq!(p.line_color(), Color::GREEN);
        assert_eq!(p.face_colors(), &[Color::GREEN, Color::BLUE]);
    }
}
