/// Affine transform builders in row-vector convention
///
/// Points are transformed as `[x y z 1] × M`, so translation lives in row 3
/// and `A × B` applies `A` first. Nalgebra builds column-vector matrices;
/// every builder here returns the transpose of its nalgebra counterpart.
use nalgebra::{Matrix4, Point2, Point3, RowVector4, Vector2, Vector3};

use crate::geometry::Plane;
use std::f64::consts::{PI, TAU};

/// Orbit angles of the rotatable 3D view, in radians about X, Y and Z.
///
/// Angles stay wrapped to `(-PI, PI]` so a view left spinning keeps its
/// precision.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: wrap_angle(x),
            y: wrap_angle(y),
            z: wrap_angle(z),
        }
    }

    pub fn orbit(&mut self, dx: f64, dy: f64, dz: f64) {
        *self = Self::new(self.x + dx, self.y + dy, self.z + dz);
    }
}

fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f64> {
        Matrix4::identity()
    }

    /// Create a translation matrix
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z)).transpose()
    }

    pub fn rotation_x(angle: f64) -> Matrix4<f64> {
        Matrix4::from_axis_angle(&Vector3::x_axis(), angle).transpose()
    }

    pub fn rotation_y(angle: f64) -> Matrix4<f64> {
        Matrix4::from_axis_angle(&Vector3::y_axis(), angle).transpose()
    }

    pub fn rotation_z(angle: f64) -> Matrix4<f64> {
        Matrix4::from_axis_angle(&Vector3::z_axis(), angle).transpose()
    }

    /// Create a scale matrix
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a rotation matrix from a rotation state.
    ///
    /// Applies X, then Y, then Z.
    pub fn rotation(rotation: &RotationState) -> Matrix4<f64> {
        Self::rotation_x(rotation.x) * Self::rotation_y(rotation.y) * Self::rotation_z(rotation.z)
    }

    /// Matrix used when walking from a parent into a child: the child's
    /// local matrix is applied before everything above it.
    pub fn accumulate(local: &Matrix4<f64>, accumulated: &Matrix4<f64>) -> Matrix4<f64> {
        local * accumulated
    }

    pub fn apply(point: &Point3<f64>, matrix: &Matrix4<f64>) -> Point3<f64> {
        let row = RowVector4::new(point.x, point.y, point.z, 1.0) * matrix;
        Point3::new(row[0], row[1], row[2])
    }

    pub fn apply_all(points: &[Point3<f64>], matrix: &Matrix4<f64>) -> Vec<Point3<f64>> {
        points.iter().map(|p| Self::apply(p, matrix)).collect()
    }

    /// Translation for a mouse drag of `delta` in the drafting `plane`.
    ///
    /// The delta lands on the plane's two axes; the third axis is untouched.
    pub fn drag_translation(delta: &Vector2<f64>, plane: Plane) -> Matrix4<f64> {
        match plane {
            Plane::Xy => Self::translation(delta.x, delta.y, 0.0),
            Plane::Yz => Self::translation(0.0, delta.x, delta.y),
            Plane::Zx => Self::translation(delta.y, 0.0, delta.x),
        }
    }

    /// Rotation for a drag from `from` to `to`, both measured from the
    /// plane origin. Counter-clockwise on screen is a positive rotation about
    /// the plane's normal axis.
    pub fn drag_rotation(from: &Point2<f64>, to: &Point2<f64>, plane: Plane) -> Matrix4<f64> {
        let angle = signed_angle(&from.coords, &to.coords);
        Self::plane_rotation(angle, plane)
    }

    /// Rotation about the axis orthogonal to `plane`.
    pub fn plane_rotation(angle: f64, plane: Plane) -> Matrix4<f64> {
        match plane {
            Plane::Xy => Self::rotation_z(angle),
            Plane::Yz => Self::rotation_x(angle),
            Plane::Zx => Self::rotation_y(angle),
        }
    }

    pub fn translation_part(matrix: &Matrix4<f64>) -> Vector3<f64> {
        Vector3::new(matrix[(3, 0)], matrix[(3, 1)], matrix[(3, 2)])
    }

    pub fn scale_part(matrix: &Matrix4<f64>) -> Vector3<f64> {
        Vector3::new(matrix[(0, 0)], matrix[(1, 1)], matrix[(2, 2)])
    }

    /// Approximate X/Y/Z rotation angles (radians) read back from a matrix.
    ///
    /// Exact only for a single-axis rotation without scale.
    pub fn rotation_part(matrix: &Matrix4<f64>) -> Vector3<f64> {
        Vector3::new(
            matrix[(1, 2)].clamp(-1.0, 1.0).asin(),
            (-matrix[(0, 2)]).clamp(-1.0, 1.0).asin(),
            matrix[(0, 1)].clamp(-1.0, 1.0).asin(),
        )
    }
}

/// Signed angle from `a` to `b` in `(-PI, PI]`; zero if either is degenerate.
pub fn signed_angle(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.dot(b);
    if cross == 0.0 && dot == 0.0 {
        return 0.0;
    }
    cross.atan2(dot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_orbit_wraps_angles() {
        let mut state = RotationState::default();
        state.orbit(0.1, -0.2, 0.3);
        assert_relative_eq!(state.y, -0.2, epsilon = 1e-12);

        for _ in 0..40 {
            state.orbit(0.0, 0.0, 0.1);
        }
        assert_relative_eq!(state.z, 4.3 - TAU, epsilon = 1e-9);
        assert!(state.z > -PI && state.z <= PI);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation(&RotationState::default());
        assert_relative_eq!(matrix, Matrix4::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_translation_is_in_last_row() {
        let m = Transform::translation(1.0, 2.0, 3.0);
        assert_eq!(Transform::translation_part(&m), Vector3::new(1.0, 2.0, 3.0));
        let p = Transform::apply(&Point3::new(1.0, 1.0, 1.0), &m);
        assert_relative_eq!(p, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotation_z_is_counter_clockwise() {
        let p = Transform::apply(&Point3::new(1.0, 0.0, 0.0), &Transform::rotation_z(FRAC_PI_2));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_left_factor_applies_first() {
        // scale, then move: (1,0,0) -> (2,0,0) -> (2,5,0)
        let m = Transform::scale(2.0, 2.0, 2.0) * Transform::translation(0.0, 5.0, 0.0);
        let p = Transform::apply(&Point3::new(1.0, 0.0, 0.0), &m);
        assert_relative_eq!(p, Point3::new(2.0, 5.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_drag_translation_axes() {
        let d = Vector2::new(1.0, 2.0);
        let origin = Point3::origin();
        assert_relative_eq!(
            Transform::apply(&origin, &Transform::drag_translation(&d, Plane::Xy)),
            Point3::new(1.0, 2.0, 0.0)
        );
        assert_relative_eq!(
            Transform::apply(&origin, &Transform::drag_translation(&d, Plane::Yz)),
            Point3::new(0.0, 1.0, 2.0)
        );
        assert_relative_eq!(
            Transform::apply(&origin, &Transform::drag_translation(&d, Plane::Zx)),
            Point3::new(2.0, 0.0, 1.0)
        );
    }

    #[test]
    fn test_opposite_drags_cancel() {
        let original = Transform::rotation_y(0.7) * Transform::translation(3.0, -1.0, 2.0);
        for plane in Plane::ALL {
            let d = Vector2::new(4.5, -2.25);
            let m = original
                * Transform::drag_translation(&d, plane)
                * Transform::drag_translation(&-d, plane);
            assert_relative_eq!(m, original, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_drag_rotation_follows_plane_normal() {
        let from = Point2::new(1.0, 0.0);
        let to = Point2::new(0.0, 3.0);
        // a quarter turn counter-clockwise in YZ turns +Y into +Z
        let m = Transform::drag_rotation(&from, &to, Plane::Yz);
        let p = Transform::apply(&Point3::new(0.0, 1.0, 0.0), &m);
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        // and in ZX turns +Z into +X
        let m = Transform::drag_rotation(&from, &to, Plane::Zx);
        let p = Transform::apply(&Point3::new(0.0, 0.0, 1.0), &m);
        assert_relative_eq!(p, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_signed_angle() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert_relative_eq!(signed_angle(&x, &y), FRAC_PI_2);
        assert_relative_eq!(signed_angle(&y, &x), -FRAC_PI_2);
        assert_eq!(signed_angle(&x, &Vector2::zeros()), 0.0);
    }

    #[test]
    fn test_rotation_part_reads_single_axis() {
        let m = Transform::rotation_z(0.3);
        assert_relative_eq!(Transform::rotation_part(&m).z, 0.3, epsilon = 1e-12);
    }
}
