/// Model-wide defaults applied when building and loading primitives
use crate::color::Color;
use crate::geometry::Plane;
use crate::primitive::{DEFAULT_ARC_DIVISIONS, MAX_ARC_DIVISIONS};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    /// Segments per arc for newly built arcs.
    pub arc_divisions: usize,
    /// Largest `Div` accepted when decoding an arc.
    pub max_arc_divisions: usize,
    /// Construction plane for the convenience builders.
    pub plane: Plane,
    /// Line and first face color for the convenience builders.
    pub color: Color,
    pub line_thickness: f64,
    /// Extrusion height used when a box is built without one.
    pub box_height: f64,
    /// Deepest parts nesting accepted when decoding.
    pub max_depth: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            arc_divisions: DEFAULT_ARC_DIVISIONS,
            max_arc_divisions: MAX_ARC_DIVISIONS,
            plane: Plane::Xy,
            color: Color::GREEN,
            line_thickness: 1.0,
            box_height: 1.0,
            max_depth: 256,
        }
    }
}
