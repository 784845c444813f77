/// Box hit-testing for projected geometry
use nalgebra::Point2;

/// Axis-aligned tolerance rectangle in world units around the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickBox {
    min: Point2<f64>,
    max: Point2<f64>,
}

impl PickBox {
    /// Box spanned by two opposite corners, in any order.
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn around(center: Point2<f64>, half_size: f64) -> Self {
        let h = half_size.abs();
        Self {
            min: Point2::new(center.x - h, center.y - h),
            max: Point2::new(center.x + h, center.y + h),
        }
    }

    pub fn min(&self) -> Point2<f64> {
        self.min
    }

    pub fn max(&self) -> Point2<f64> {
        self.max
    }

    pub fn contains(&self, p: &Point2<f64>) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    pub fn contains_all(&self, points: &[Point2<f64>]) -> bool {
        !points.is_empty() && points.iter().all(|p| self.contains(p))
    }

    /// Whether any part of segment `a`–`b` lies in the box (Liang–Barsky).
    pub fn intersects_segment(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        let d = b - a;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        let edges = [
            (-d.x, a.x - self.min.x),
            (d.x, self.max.x - a.x),
            (-d.y, a.y - self.min.y),
            (d.y, self.max.y - a.y),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > t1 {
                    return false;
                }
                t0 = t0.max(t);
            } else {
                if t < t0 {
                    return false;
                }
                t1 = t1.min(t);
            }
        }
        t0 <= t1
    }

    /// A polyline is picked when it lies fully inside the box or any of its
    /// segments crosses the box. `closed` adds the segment back to the start.
    pub fn hits_polyline(&self, points: &[Point2<f64>], closed: bool) -> bool {
        match points {
            [] => false,
            [only] => self.contains(only),
            _ => {
                if self.contains_all(points) {
                    return true;
                }
                let closing = closed
                    .then(|| (points[points.len() - 1], points[0]))
                    .into_iter();
                points
                    .windows(2)
                    .map(|w| (w[0], w[1]))
                    .chain(closing)
                    .any(|(a, b)| self.intersects_segment(&a, &b))
            }
        }
    }
}
