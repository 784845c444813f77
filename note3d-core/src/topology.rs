/// Rules for grouping a flat vertex list into surfaces
use nalgebra::Point3;
use std::fmt;

use crate::color::Color;
use crate::geometry::Surface;

/// How a primitive's vertex list decomposes into [`Surface`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Independent 2-point segments.
    Lines,
    /// Connected polyline, one segment per consecutive pair.
    LineStrip,
    /// Like `LineStrip` plus a segment back to the first vertex.
    LineLoop,
    Triangles,
    Quads,
    /// Single closed face from every vertex.
    Polygon,
    TriangleStrip,
    /// Quads sharing an edge; the last two vertices of each window are
    /// swapped so the face winds around its perimeter.
    QuadStrip,
    /// Triangles sharing vertex 0.
    TriangleFan,
}

impl Topology {
    pub const ALL: [Topology; 9] = [
        Topology::Lines,
        Topology::LineStrip,
        Topology::LineLoop,
        Topology::Triangles,
        Topology::Quads,
        Topology::Polygon,
        Topology::TriangleStrip,
        Topology::QuadStrip,
        Topology::TriangleFan,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Topology::Lines => "LINES",
            Topology::LineStrip => "LINE_STRIP",
            Topology::LineLoop => "LINE_LOOP",
            Topology::Triangles => "TRIANGLES",
            Topology::Quads => "QUADS",
            Topology::Polygon => "POLYGON",
            Topology::TriangleStrip => "TRIANGLE_STRIP",
            Topology::QuadStrip => "QUAD_STRIP",
            Topology::TriangleFan => "TRIANGLE_FAN",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Topology> {
        let tag = tag.trim();
        Topology::ALL
            .into_iter()
            .find(|t| t.tag().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Hands out colors round-robin, falling back to black for an empty list.
struct ColorCycle<'a> {
    colors: &'a [Color],
    next: usize,
}

impl<'a> ColorCycle<'a> {
    fn new(colors: &'a [Color]) -> Self {
        Self { colors, next: 0 }
    }

    fn take(&mut self) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        color
    }
}

/// Split `vertices` into surfaces according to `topology`.
///
/// Trailing vertices that do not complete a window are dropped.
pub fn decompose_to_surfaces(
    vertices: &[Point3<f64>],
    topology: Topology,
    colors: &[Color],
) -> Vec<Surface> {
    let mut cycle = ColorCycle::new(colors);
    let mut surfaces = Vec::new();
    let mut emit = |points: Vec<Point3<f64>>| surfaces.push(Surface::new(points, cycle.take()));

    match topology {
        Topology::Lines => vertices.chunks_exact(2).for_each(|w| emit(w.to_vec())),
        Topology::Triangles => vertices.chunks_exact(3).for_each(|w| emit(w.to_vec())),
        Topology::Quads => vertices.chunks_exact(4).for_each(|w| emit(w.to_vec())),
        Topology::LineStrip => vertices.windows(2).for_each(|w| emit(w.to_vec())),
        Topology::LineLoop => {
            vertices.windows(2).for_each(|w| emit(w.to_vec()));
            if vertices.len() >= 2 {
                emit(vec![vertices[vertices.len() - 1], vertices[0]]);
            }
        }
        Topology::TriangleStrip => vertices.windows(3).for_each(|w| emit(w.to_vec())),
        Topology::QuadStrip => {
            let mut start = 0;
            while start + 4 <= vertices.len() {
                let w = &vertices[start..start + 4];
                emit(vec![w[0], w[1], w[3], w[2]]);
                start += 2;
            }
        }
        Topology::TriangleFan => {
            if let Some((anchor, rest)) = vertices.split_first() {
                rest.windows(2).for_each(|w| emit(vec![*anchor, w[0], w[1]]));
            }
        }
        Topology::Polygon => {
            if !vertices.is_empty() {
                emit(vertices.to_vec());
            }
        }
    }

    surfaces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point3<f64>> {
        (0..n).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect()
    }

    fn xs(surface: &Surface) -> Vec<usize> {
        surface.points.iter().map(|p| p.x as usize).collect()
    }

    #[test]
    fn test_tags() {
        for t in Topology::ALL {
            assert_eq!(Topology::from_tag(t.tag()), Some(t));
        }
        assert_eq!(Topology::from_tag("PARTS"), None);
    }

    #[test]
    fn test_independent_windows_keep_vertex_count() {
        let cases = [(Topology::Lines, 2), (Topology::Triangles, 3), (Topology::Quads, 4)];
        for (topology, size) in cases {
            let v = points(size * 5);
            let surfaces = decompose_to_surfaces(&v, topology, &[Color::RED]);
            assert_eq!(surfaces.len(), 5);
            assert!(surfaces.iter().all(|s| s.len() == size));
            assert_eq!(surfaces.iter().map(Surface::len).sum::<usize>(), v.len());
        }
    }

    #[test]
    fn test_strip_and_loop() {
        let v = points(4);
        let strip = decompose_to_surfaces(&v, Topology::LineStrip, &[]);
        assert_eq!(strip.iter().map(xs).collect::<Vec<_>>(), vec![vec![0, 1], vec![1, 2], vec![2, 3]]);

        let ring = decompose_to_surfaces(&v, Topology::LineLoop, &[]);
        assert_eq!(ring.len(), 4);
        assert_eq!(xs(&ring[3]), vec![3, 0]);
    }

    #[test]
    fn test_triangle_strip_overlaps_by_two() {
        let surfaces = decompose_to_surfaces(&points(5), Topology::TriangleStrip, &[]);
        assert_eq!(
            surfaces.iter().map(xs).collect::<Vec<_>>(),
            vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4]]
        );
    }

    #[test]
    fn test_quad_strip_swaps_last_pair() {
        let surfaces = decompose_to_surfaces(&points(6), Topology::QuadStrip, &[]);
        assert_eq!(
            surfaces.iter().map(xs).collect::<Vec<_>>(),
            vec![vec![0, 1, 3, 2], vec![2, 3, 5, 4]]
        );
    }

    #[test]
    fn test_triangle_fan_reanchors() {
        let surfaces = decompose_to_surfaces(&points(5), Topology::TriangleFan, &[]);
        assert_eq!(
            surfaces.iter().map(xs).collect::<Vec<_>>(),
            vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4]]
        );
    }

    #[test]
    fn test_polygon_is_single_face() {
        let surfaces = decompose_to_surfaces(&points(7), Topology::Polygon, &[Color::BLUE]);
        assert_eq!(surfaces.len(), 1);
        assert_eq!(surfaces[0].len(), 7);
        assert!(decompose_to_surfaces(&[], Topology::Polygon, &[]).is_empty());
    }

    #[test]
    fn test_colors_round_robin() {
        let colors = [Color::RED, Color::GREEN];
        let surfaces = decompose_to_surfaces(&points(6), Topology::Lines, &colors);
        let used: Vec<Color> = surfaces.iter().map(|s| s.color).collect();
        assert_eq!(used, vec![Color::RED, Color::GREEN, Color::RED]);
        let fallback = decompose_to_surfaces(&points(2), Topology::Lines, &[]);
        assert_eq!(fallback[0].color, Color::BLACK);
    }

    #[test]
    fn test_trailing_vertices_dropped() {
        let surfaces = decompose_to_surfaces(&points(5), Topology::Lines, &[]);
        assert_eq!(surfaces.len(), 2);
    }
}
