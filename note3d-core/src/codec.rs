/// Flatten a scene graph into records and rebuild it from them
///
/// Each parts node becomes a `Parts` header, its elements, its child parts,
/// a `Matrix` record and `PartsEnd`. Each element is an `Element` header, a
/// `PrimitiveId` property record, one shape data record, a `Matrix` record
/// and `ElementEnd`. Matrices are written row-major.
use nalgebra::{Matrix4, Point2};
use tracing::{debug, warn};

use crate::color::Color;
use crate::config::ModelConfig;
use crate::error::{CodecError, PartialLoad};
use crate::geometry::Plane;
use crate::primitive::{
    ArcShape, BoxShape, LineShape, PolygonShape, Primitive, PrimitiveKind, Shape,
};
use crate::record::{parse_text, write_text, Record};
use crate::scene::{Element, PartsId, SceneGraph};
use crate::topology::Topology;

const PARTS: &str = "Parts";
const PARTS_END: &str = "PartsEnd";
const ELEMENT: &str = "Element";
const ELEMENT_END: &str = "ElementEnd";
const MATRIX: &str = "Matrix";
const PRIMITIVE_ID: &str = "PrimitiveId";

fn num(value: f64) -> String {
    format!("{value}")
}

fn header(tag: &str, name: &str, index: usize) -> Record {
    let mut record = Record::with_tag(tag);
    record.push(name).push(index.to_string());
    record
}

fn matrix_record(matrix: &Matrix4<f64>) -> Record {
    let mut record = Record::with_tag(MATRIX);
    record.push("4").push("4");
    for row in 0..4 {
        for col in 0..4 {
            record.push(num(matrix[(row, col)]));
        }
    }
    record
}

fn property_record(primitive: &Primitive) -> Record {
    let mut record = Record::with_tag(PRIMITIVE_ID);
    record
        .push(primitive.kind().tag())
        .push("PrimitiveFace")
        .push(primitive.plane().tag())
        .push("ElementType")
        .push(primitive.topology().tag())
        .push("LineColor")
        .push(primitive.line_color().name())
        .push("LineThickness")
        .push(num(primitive.line_thickness()))
        .push("FaceColors")
        .push(primitive.face_colors().len().to_string());
    for color in primitive.face_colors() {
        record.push(color.name());
    }
    record
}

fn data_record(shape: &Shape) -> Record {
    let mut record = Record::with_tag(shape.kind().data_tag());
    match shape {
        Shape::Line(line) => {
            record
                .push("Sp")
                .push(num(line.start.x))
                .push(num(line.start.y))
                .push("Ep")
                .push(num(line.end.x))
                .push(num(line.end.y));
        }
        Shape::Arc(arc) => {
            record
                .push("Arc")
                .push(num(arc.center.x))
                .push(num(arc.center.y))
                .push(num(arc.radius))
                .push(num(arc.start_angle))
                .push(num(arc.end_angle))
                .push("Div")
                .push(arc.divisions.to_string());
        }
        Shape::Polygon(polygon) => {
            record.push("Size").push(polygon.points.len().to_string());
            for p in &polygon.points {
                record.push(num(p.x)).push(num(p.y));
            }
        }
        Shape::WireCube(b) | Shape::Cube(b) => {
            record
                .push("Sp")
                .push(num(b.start.x))
                .push(num(b.start.y))
                .push("Ep")
                .push(num(b.end.x))
                .push(num(b.end.y))
                .push("H")
                .push(num(b.height));
        }
    }
    record
}

fn write_element(element: &Element, out: &mut Vec<Record>) {
    out.push(header(ELEMENT, element.name(), element.index()));
    out.push(property_record(element.primitive()));
    out.push(data_record(element.primitive().shape()));
    out.push(matrix_record(element.matrix()));
    out.push(Record::with_tag(ELEMENT_END));
}

fn write_parts(graph: &SceneGraph, id: PartsId, out: &mut Vec<Record>) {
    let Some(parts) = graph.parts(id) else {
        return;
    };
    out.push(header(PARTS, parts.name(), parts.index()));
    for element in parts.elements().iter().filter_map(|&e| graph.element(e)) {
        write_element(element, out);
    }
    for &child in parts.children() {
        write_parts(graph, child, out);
    }
    out.push(matrix_record(parts.matrix()));
    out.push(Record::with_tag(PARTS_END));
}

/// Flatten the whole tree, root first.
pub fn serialize(graph: &SceneGraph) -> Vec<Record> {
    let mut records = Vec::new();
    write_parts(graph, graph.root(), &mut records);
    records
}

pub fn to_text(graph: &SceneGraph) -> String {
    write_text(&serialize(graph))
}

/// Positional reader over one record's fields, skipping the tag.
struct Fields<'a> {
    record: &'a Record,
    number: usize,
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(record: &'a Record, number: usize) -> Self {
        Self {
            record,
            number,
            pos: 1,
        }
    }

    fn next(&mut self, field: &'static str) -> Result<&'a str, CodecError> {
        let value = self.record.get(self.pos).ok_or(CodecError::MissingField {
            record: self.number,
            field,
        })?;
        self.pos += 1;
        Ok(value)
    }

    fn key(&mut self, key: &'static str) -> Result<(), CodecError> {
        let found = self.next(key)?;
        if found.trim() != key {
            return Err(CodecError::UnexpectedTag {
                record: self.number,
                expected: key,
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn number(&mut self, field: &'static str) -> Result<f64, CodecError> {
        let value = self.next(field)?;
        value.trim().parse().map_err(|_| CodecError::InvalidNumber {
            record: self.number,
            value: value.to_string(),
        })
    }

    fn count(&mut self, field: &'static str) -> Result<usize, CodecError> {
        let value = self.next(field)?;
        value.trim().parse().map_err(|_| CodecError::InvalidNumber {
            record: self.number,
            value: value.to_string(),
        })
    }

    fn point(&mut self, field: &'static str) -> Result<Point2<f64>, CodecError> {
        Ok(Point2::new(self.number(field)?, self.number(field)?))
    }

    fn color(&mut self, field: &'static str) -> Result<Color, CodecError> {
        let name = self.next(field)?;
        Color::from_name(name).ok_or_else(|| CodecError::UnknownColor(name.to_string()))
    }

    fn rest(&self) -> usize {
        self.record.len().saturating_sub(self.pos)
    }
}

fn read_header(record: &Record, number: usize) -> Result<(String, usize), CodecError> {
    let mut fields = Fields::new(record, number);
    let name = fields.next("name")?.to_string();
    let index = fields.count("index")?;
    Ok((name, index))
}

fn read_matrix(record: &Record, number: usize) -> Result<Matrix4<f64>, CodecError> {
    let mut fields = Fields::new(record, number);
    let (rows, cols) = (fields.count("rows")?, fields.count("cols")?);
    if rows != 4 || cols != 4 || fields.rest() != 16 {
        return Err(CodecError::InvalidMatrix { record: number });
    }
    let values = (0..16)
        .map(|_| fields.number("matrix value"))
        .collect::<Result<Vec<f64>, _>>()?;
    Ok(Matrix4::from_row_slice(&values))
}

struct Properties {
    kind: PrimitiveKind,
    plane: Plane,
    topology: Topology,
    line_color: Color,
    line_thickness: f64,
    face_colors: Vec<Color>,
}

/// Property records are key/value pairs after the primitive id. Keys may
/// come in any order; `ElelmentType` is the spelling older files carry.
fn read_properties(record: &Record, number: usize) -> Result<Properties, CodecError> {
    let mut fields = Fields::new(record, number);
    let kind = fields.next("primitive")?;
    let kind = PrimitiveKind::from_tag(kind)
        .ok_or_else(|| CodecError::UnknownPrimitive(kind.to_string()))?;
    let mut properties = Properties {
        kind,
        plane: Plane::Xy,
        topology: kind.default_topology(),
        line_color: Color::BLACK,
        line_thickness: 1.0,
        face_colors: Vec::new(),
    };

    while fields.rest() > 0 {
        match fields.next("property key")?.trim() {
            "PrimitiveFace" => {
                let plane = fields.next("plane")?;
                properties.plane =
                    Plane::from_tag(plane).ok_or_else(|| CodecError::UnknownPlane(plane.to_string()))?;
            }
            "ElementType" | "ElelmentType" => {
                let topology = fields.next("topology")?;
                properties.topology = Topology::from_tag(topology)
                    .ok_or_else(|| CodecError::UnknownTopology(topology.to_string()))?;
            }
            "LineColor" => properties.line_color = fields.color("line color")?,
            "LineThickness" => properties.line_thickness = fields.number("line thickness")?,
            "FaceColors" => {
                let count = fields.count("face color count")?;
                properties.face_colors = (0..count)
                    .map(|_| fields.color("face color"))
                    .collect::<Result<Vec<_>, _>>()?;
            }
            key => {
                return Err(CodecError::UnexpectedTag {
                    record: number,
                    expected: "primitive property",
                    found: key.to_string(),
                })
            }
        }
    }
    Ok(properties)
}

fn read_box(fields: &mut Fields<'_>) -> Result<BoxShape, CodecError> {
    fields.key("Sp")?;
    let start = fields.point("start point")?;
    fields.key("Ep")?;
    let end = fields.point("end point")?;
    fields.key("H")?;
    let height = fields.number("height")?;
    Ok(BoxShape { start, end, height })
}

fn read_shape(
    kind: PrimitiveKind,
    record: &Record,
    number: usize,
    config: &ModelConfig,
) -> Result<Shape, CodecError> {
    let mut fields = Fields::new(record, number);
    let shape = match kind {
        PrimitiveKind::Line => {
            fields.key("Sp")?;
            let start = fields.point("start point")?;
            fields.key("Ep")?;
            let end = fields.point("end point")?;
            Shape::Line(LineShape { start, end })
        }
        PrimitiveKind::Arc => {
            fields.key("Arc")?;
            let center = fields.point("center")?;
            let radius = fields.number("radius")?;
            let start_angle = fields.number("start angle")?;
            let end_angle = fields.number("end angle")?;
            fields.key("Div")?;
            let divisions = fields.count("divisions")?;
            if divisions == 0 || divisions > config.max_arc_divisions {
                return Err(CodecError::ArcDivisions {
                    record: number,
                    divisions,
                    max: config.max_arc_divisions,
                });
            }
            Shape::Arc(ArcShape {
                center,
                radius,
                start_angle,
                end_angle,
                divisions,
            })
        }
        PrimitiveKind::Polygon => {
            fields.key("Size")?;
            let size = fields.count("size")?;
            let points = (0..size)
                .map(|_| fields.point("polygon point"))
                .collect::<Result<Vec<_>, _>>()?;
            Shape::Polygon(PolygonShape { points })
        }
        PrimitiveKind::WireCube => Shape::WireCube(read_box(&mut fields)?),
        PrimitiveKind::Cube => Shape::Cube(read_box(&mut fields)?),
    };
    Ok(shape)
}

struct DecodedElement {
    name: String,
    index: usize,
    primitive: Primitive,
    matrix: Matrix4<f64>,
}

/// Read from an `Element` header through its `ElementEnd`.
fn read_element<'a, I>(
    records: &mut I,
    header: &Record,
    header_number: usize,
    config: &ModelConfig,
) -> Result<DecodedElement, CodecError>
where
    I: Iterator<Item = (usize, &'a Record)>,
{
    let (name, index) = read_header(header, header_number)?;
    let mut properties = None;
    let mut shape = None;
    let mut matrix = Matrix4::identity();

    loop {
        let (number, record) = records.next().ok_or(CodecError::Truncated {
            expected: ELEMENT_END,
        })?;
        match record.tag() {
            PRIMITIVE_ID => properties = Some(read_properties(record, number)?),
            MATRIX => matrix = read_matrix(record, number)?,
            ELEMENT_END => break,
            tag => {
                let kind = PrimitiveKind::ALL
                    .into_iter()
                    .find(|k| k.data_tag() == tag)
                    .ok_or_else(|| CodecError::UnexpectedTag {
                        record: number,
                        expected: "element record",
                        found: tag.to_string(),
                    })?;
                shape = Some((number, read_shape(kind, record, number, config)?));
            }
        }
    }

    let properties = properties.ok_or(CodecError::MissingField {
        record: header_number,
        field: PRIMITIVE_ID,
    })?;
    let expected = properties.kind.data_tag();
    let (number, shape) = shape.ok_or(CodecError::MissingField {
        record: header_number,
        field: expected,
    })?;
    if shape.kind() != properties.kind {
        return Err(CodecError::UnexpectedTag {
            record: number,
            expected,
            found: shape.kind().data_tag().to_string(),
        });
    }

    let mut primitive = Primitive::new(shape, properties.plane)
        .with_topology(properties.topology)
        .with_line_thickness(properties.line_thickness)
        .with_face_colors(properties.face_colors);
    primitive.set_line_color(properties.line_color);

    Ok(DecodedElement {
        name,
        index,
        primitive,
        matrix,
    })
}

/// Single forward pass that attaches nodes to `graph` as soon as they are read.
fn decode_into(graph: &mut SceneGraph, records: &[Record]) -> Result<(), CodecError> {
    let max_depth = graph.config().max_depth;
    let mut records = records.iter().enumerate().map(|(i, r)| (i + 1, r));

    let (number, first) = records.next().ok_or(CodecError::Empty)?;
    if first.tag() != PARTS {
        return Err(CodecError::UnexpectedTag {
            record: number,
            expected: PARTS,
            found: first.tag().to_string(),
        });
    }
    let (name, index) = read_header(first, number)?;
    graph.set_root_header(&name, index);
    let mut stack = vec![graph.root()];

    while let Some((number, record)) = records.next() {
        let Some(&top) = stack.last() else {
            break;
        };
        match record.tag() {
            PARTS => {
                if stack.len() >= max_depth {
                    return Err(CodecError::TooDeep { max: max_depth });
                }
                let (name, index) = read_header(record, number)?;
                stack.push(graph.insert_parts(top, &name, index));
            }
            ELEMENT => {
                let element = read_element(&mut records, record, number, graph.config())?;
                graph.insert_element(top, &element.name, element.index, element.primitive, element.matrix);
            }
            MATRIX => graph.set_parts_matrix(top, read_matrix(record, number)?),
            PARTS_END => {
                stack.pop();
            }
            tag => {
                return Err(CodecError::UnexpectedTag {
                    record: number,
                    expected: "Parts, Element, Matrix or PartsEnd",
                    found: tag.to_string(),
                })
            }
        }
    }

    if !stack.is_empty() {
        return Err(CodecError::Truncated { expected: PARTS_END });
    }
    Ok(())
}

pub fn deserialize(records: &[Record]) -> Result<SceneGraph, PartialLoad> {
    deserialize_with(records, ModelConfig::default())
}

/// Rebuild a model. Indices are renumbered densely once loading stops.
///
/// On failure the error carries every node attached before the bad record.
/// An element that fails part way is dropped.
pub fn deserialize_with(records: &[Record], config: ModelConfig) -> Result<SceneGraph, PartialLoad> {
    let mut graph = SceneGraph::with_config(config);
    let result = decode_into(&mut graph, records);
    graph.reindex();
    graph.reset_current();
    match result {
        Ok(()) => {
            debug!(records = records.len(), items = graph.item_count(), "model decoded");
            Ok(graph)
        }
        Err(error) => {
            warn!(%error, items = graph.item_count(), "model only partially decoded");
            Err(PartialLoad::new(error, graph))
        }
    }
}

pub fn from_text(text: &str) -> Result<SceneGraph, PartialLoad> {
    from_text_with(text, ModelConfig::default())
}

/// Text that fails to parse yields an empty partial model.
pub fn from_text_with(text: &str, config: ModelConfig) -> Result<SceneGraph, PartialLoad> {
    match parse_text(text) {
        Ok(records) => deserialize_with(&records, config),
        Err(error) => {
            warn!(%error, "model text rejected");
            Err(PartialLoad::new(error, SceneGraph::with_config(config)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(fields: &[&str]) -> Record {
        fields.iter().copied().collect()
    }

    fn identity_matrix() -> Record {
        matrix_record(&Matrix4::identity())
    }

    fn line_element(name: &str, index: &str) -> Vec<Record> {
        vec![
            rec(&[ELEMENT, name, index]),
            rec(&[
                PRIMITIVE_ID, "Line", "PrimitiveFace", "xy", "ElementType", "LINES",
                "LineColor", "Red", "LineThickness", "2", "FaceColors", "1", "Red",
            ]),
            rec(&["LineData", "Sp", "0", "0", "Ep", "3", "4"]),
            identity_matrix(),
            rec(&[ELEMENT_END]),
        ]
    }

    #[test]
    fn test_empty_model_records() {
        let records = serialize(&SceneGraph::new());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], rec(&[PARTS, "Root", "0"]));
        assert_eq!(records[1].tag(), MATRIX);
        assert_eq!(records[1].len(), 19);
        assert_eq!(records[1].get(3), Some("1"));
        assert_eq!(records[2], rec(&[PARTS_END]));
    }

    #[test]
    fn test_box_record_keeps_height() {
        let mut graph = SceneGraph::new();
        graph.add_wire_cube(Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), Some(3.5));
        graph.add_cube(Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), Some(0.25));
        let records = serialize(&graph);
        let data: Vec<&Record> = records
            .iter()
            .filter(|r| r.tag() == "WireCubeData" || r.tag() == "CubeData")
            .collect();
        assert_eq!(data[0].fields().last().map(String::as_str), Some("3.5"));
        assert_eq!(data[1].tag(), "CubeData");

        let loaded = deserialize(&records).unwrap();
        let heights: Vec<f64> = loaded
            .walk()
            .into_iter()
            .filter_map(|item| match item {
                crate::scene::Item::Element(id) => match loaded.element(id)?.primitive().shape() {
                    Shape::WireCube(b) | Shape::Cube(b) => Some(b.height),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(heights, vec![3.5, 0.25]);
    }

    #[test]
    fn test_children_before_elements_are_accepted() {
        let mut records = vec![rec(&[PARTS, "Root", "0"]), rec(&[PARTS, "A", "7"])];
        records.push(identity_matrix());
        records.push(rec(&[PARTS_END]));
        records.extend(line_element("L", "9"));
        records.push(identity_matrix());
        records.push(rec(&[PARTS_END]));

        let graph = deserialize(&records).unwrap();
        // reindexed: Root 0, its element 1, child A 2
        let root = graph.root_parts().unwrap();
        assert_eq!(root.elements().len(), 1);
        assert_eq!(graph.find_node_owning(1), Some(graph.root()));
        assert_eq!(graph.parts(root.children()[0]).unwrap().index(), 2);
        assert_eq!(graph.next_index(), 3);

        let line = graph.element(root.elements()[0]).unwrap().primitive();
        assert_eq!(line.line_color(), Color::RED);
        assert_eq!(line.line_thickness(), 2.0);
        assert_eq!(line.vertices().len(), 2);
    }

    #[test]
    fn test_empty_and_wrong_first_record() {
        assert!(matches!(deserialize(&[]), Err(PartialLoad { source: CodecError::Empty, .. })));
        let err = deserialize(&[rec(&[ELEMENT, "x", "0"])]).unwrap_err();
        assert!(matches!(err.source, CodecError::UnexpectedTag { record: 1, .. }));
    }

    #[test]
    fn test_unknown_primitive_keeps_partial_tree() {
        let mut records = vec![rec(&[PARTS, "Root", "0"])];
        records.extend(line_element("good", "1"));
        records.push(rec(&[PARTS, "A", "2"]));
        records.push(rec(&[ELEMENT, "bad", "3"]));
        records.push(rec(&[
            PRIMITIVE_ID, "Spline", "PrimitiveFace", "xy", "ElementType", "LINES",
            "LineColor", "Red", "LineThickness", "1", "FaceColors", "0",
        ]));

        let err = deserialize(&records).unwrap_err();
        assert_eq!(err.source, CodecError::UnknownPrimitive("Spline".into()));
        let partial = err.into_graph();
        assert_eq!(partial.element_count(), 1);
        assert_eq!(partial.item_count(), 3);
    }

    #[test]
    fn test_missing_parts_end_is_truncated() {
        let mut records = vec![rec(&[PARTS, "Root", "0"])];
        records.extend(line_element("L", "1"));
        let err = deserialize(&records).unwrap_err();
        assert_eq!(err.source, CodecError::Truncated { expected: PARTS_END });
        assert_eq!(err.graph.element_count(), 1);
    }

    #[test]
    fn test_malformed_fields() {
        let mut records = vec![rec(&[PARTS, "Root", "0"])];
        let mut element = line_element("L", "1");
        element[2] = rec(&["LineData", "Sp", "0", "zero", "Ep", "3", "4"]);
        records.extend(element);
        let err = deserialize(&records).unwrap_err();
        assert_eq!(
            err.source,
            CodecError::InvalidNumber { record: 4, value: "zero".into() }
        );

        let bad_matrix = vec![rec(&[PARTS, "Root", "0"]), rec(&[MATRIX, "3", "3", "1"])];
        let err = deserialize(&bad_matrix).unwrap_err();
        assert_eq!(err.source, CodecError::InvalidMatrix { record: 2 });
    }

    #[test]
    fn test_unknown_color() {
        let mut records = vec![rec(&[PARTS, "Root", "0"])];
        let mut element = line_element("L", "1");
        element[1] = rec(&[
            PRIMITIVE_ID, "Line", "PrimitiveFace", "xy", "ElementType", "LINES",
            "LineColor", "Plaid", "LineThickness", "1", "FaceColors", "0",
        ]);
        records.extend(element);
        let err = deserialize(&records).unwrap_err();
        assert_eq!(err.source, CodecError::UnknownColor("Plaid".into()));
    }

    fn arc_model(divisions: &str) -> String {
        let mut records = vec![rec(&[PARTS, "Root", "0"]), rec(&[ELEMENT, "A", "1"])];
        records.push(rec(&[
            PRIMITIVE_ID, "Arc", "PrimitiveFace", "xy", "ElementType", "LINE_STRIP",
            "LineColor", "Green", "LineThickness", "1", "FaceColors", "1", "Green",
        ]));
        records.push(rec(&["ArcData", "Arc", "0", "0", "1", "0", "3.14", "Div", divisions]));
        records.push(identity_matrix());
        records.push(rec(&[ELEMENT_END]));
        records.push(identity_matrix());
        records.push(rec(&[PARTS_END]));
        write_text(&records)
    }

    #[test]
    fn test_arc_divisions_are_bounded() {
        let loaded = from_text(&arc_model("12")).unwrap();
        let id = loaded.element_by_index(1).unwrap();
        assert_eq!(loaded.element(id).unwrap().primitive().vertices().len(), 13);

        let max = ModelConfig::default().max_arc_divisions;
        for (text, divisions) in [("0", 0), ("1000000000", 1_000_000_000), ("18446744073709551615", usize::MAX)] {
            let err = from_text(&arc_model(text)).unwrap_err();
            assert_eq!(err.source, CodecError::ArcDivisions { record: 4, divisions, max });
            assert_eq!(err.graph.element_count(), 0);
        }
    }

    #[test]
    fn test_legacy_property_record() {
        let mut records = vec![rec(&[PARTS, "Root", "0"])];
        let mut element = line_element("L", "1");
        element[1] = rec(&[
            PRIMITIVE_ID, "Line", "PrimitiveFace", "yz", "ElelmentType", "LINE_STRIP",
            "LineColor", "DarkGreen", "LineThickness", "1.5", "FaceColors", "2", "Black", "LightSkyBlue",
        ]);
        records.extend(element);
        records.push(identity_matrix());
        records.push(rec(&[PARTS_END]));

        let graph = deserialize(&records).unwrap();
        let id = graph.element_by_index(1).unwrap();
        let line = graph.element(id).unwrap().primitive();
        assert_eq!(line.plane(), Plane::Yz);
        assert_eq!(line.topology(), Topology::LineStrip);
        assert_eq!(line.line_color().name(), "DarkGreen");
        assert_eq!(line.line_thickness(), 1.5);
        assert_eq!(line.face_colors().len(), 2);
    }

    #[test]
    fn test_properties_in_any_order_with_defaults() {
        let mut records = vec![rec(&[PARTS, "Root", "0"])];
        let mut element = line_element("L", "1");
        element[1] = rec(&[PRIMITIVE_ID, "Line", "LineColor", "Red", "PrimitiveFace", "zx"]);
        records.extend(element);
        records.push(identity_matrix());
        records.push(rec(&[PARTS_END]));

        let graph = deserialize(&records).unwrap();
        let id = graph.element_by_index(1).unwrap();
        let line = graph.element(id).unwrap().primitive();
        assert_eq!(line.plane(), Plane::Zx);
        assert_eq!(line.topology(), Topology::Lines);
        assert_eq!(line.line_color(), Color::RED);

        let mut bad = vec![rec(&[PARTS, "Root", "0"])];
        let mut element = line_element("L", "1");
        element[1] = rec(&[PRIMITIVE_ID, "Line", "Opacity", "1"]);
        bad.extend(element);
        let err = deserialize(&bad).unwrap_err();
        assert!(matches!(err.source, CodecError::UnexpectedTag { record: 3, .. }));
    }

    #[test]
    fn test_depth_limit() {
        let config = ModelConfig {
            max_depth: 3,
            ..ModelConfig::default()
        };
        let mut graph = SceneGraph::with_config(config.clone());
        graph.add_parts("A");
        graph.add_parts("B");
        let records = serialize(&graph);
        assert!(deserialize_with(&records, config.clone()).is_ok());

        graph.add_parts("C");
        let err = deserialize_with(&serialize(&graph), config).unwrap_err();
        assert_eq!(err.source, CodecError::TooDeep { max: 3 });
        assert_eq!(err.graph.item_count(), 3);
    }

    #[test]
    fn test_syntax_error_gives_empty_partial() {
        let err = from_text("Parts,\"Root,0\n").unwrap_err();
        assert!(matches!(err.source, CodecError::Syntax { line: 1, .. }));
        assert_eq!(err.graph.item_count(), 1);
    }

    #[test]
    fn test_text_round_trip_keeps_names() {
        let mut graph = SceneGraph::new();
        graph.add_parts("front, left");
        graph.add_line(Point2::new(0.1, 0.2), Point2::new(-3.0, 1e-7));
        let loaded = from_text(&to_text(&graph)).unwrap();
        assert_eq!(loaded.describe(1).unwrap().lines().next(), Some("parts: front, left [1]"));
        assert_eq!(serialize(&loaded), serialize(&graph));
    }
}
