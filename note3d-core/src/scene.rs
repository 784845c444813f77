/// Hierarchical model: parts nodes holding elements and child parts
///
/// Nodes live in slot arenas owned by [`SceneGraph`]. Links between them are
/// arena ids, and every node and element also carries a user-facing integer
/// index handed out by the graph's allocator. Slots are never reused within
/// one model, so an id to a removed node resolves to `None`.
use nalgebra::{Matrix4, Point2, Vector3};
use std::fmt;
use tracing::debug;

use crate::color::Color;
use crate::config::ModelConfig;
use crate::error::SceneError;
use crate::geometry::Surface;
use crate::pick::PickBox;
use crate::primitive::{ArcShape, PolygonShape, Primitive};
use crate::projection::{DrawSink, Drawing, Projection};
use crate::transform::Transform;

pub const ROOT_NAME: &str = "Root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartsId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// Either kind of indexed item in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Parts(PartsId),
    Element(ElementId),
}

/// A grouping node with its own placement
#[derive(Debug, Clone)]
pub struct Parts {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) matrix: Matrix4<f64>,
    pub(crate) children: Vec<PartsId>,
    pub(crate) elements: Vec<ElementId>,
    pub(crate) parent: Option<PartsId>,
}

impl Parts {
    fn new(name: &str, index: usize, parent: Option<PartsId>) -> Self {
        Self {
            index,
            name: name.to_string(),
            matrix: Matrix4::identity(),
            children: Vec::new(),
            elements: Vec::new(),
            parent,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn children(&self) -> &[PartsId] {
        &self.children
    }

    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn parent(&self) -> Option<PartsId> {
        self.parent
    }
}

/// A leaf owning one primitive and the surfaces generated from it
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) matrix: Matrix4<f64>,
    primitive: Primitive,
    surfaces: Vec<Surface>,
    pub(crate) owner: PartsId,
}

impl Element {
    fn new(name: &str, index: usize, primitive: Primitive, owner: PartsId) -> Self {
        let surfaces = primitive.surfaces();
        Self {
            index,
            name: name.to_string(),
            matrix: Matrix4::identity(),
            primitive,
            surfaces,
            owner,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Surfaces in the element's local frame.
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn owner(&self) -> PartsId {
        self.owner
    }

    fn edit(&mut self, f: impl FnOnce(&mut Primitive)) {
        f(&mut self.primitive);
        self.surfaces = self.primitive.surfaces();
    }

    fn drawings<'a>(
        &'a self,
        world: &'a Matrix4<f64>,
        projection: &'a Projection,
    ) -> impl Iterator<Item = Drawing> + 'a {
        let line_color = self.primitive.line_color();
        self.surfaces.iter().map(move |surface| {
            let placed = Surface::new(Transform::apply_all(&surface.points, world), surface.color);
            Drawing::from_surface(&placed, projection, line_color)
        })
    }
}

fn write_placement(f: &mut fmt::Formatter<'_>, matrix: &Matrix4<f64>) -> fmt::Result {
    let t = Transform::translation_part(matrix);
    let s = Transform::scale_part(matrix);
    let r = Transform::rotation_part(matrix).map(f64::to_degrees);
    writeln!(f, "translate: {} {} {}", t.x, t.y, t.z)?;
    writeln!(f, "scale: {} {} {}", s.x, s.y, s.z)?;
    write!(f, "rotate: {:.3} {:.3} {:.3}", r.x, r.y, r.z)
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.primitive;
        writeln!(f, "element: {} [{}]", self.name, self.index)?;
        writeln!(f, "primitive: {} {} {}", p.kind(), p.topology(), p.plane())?;
        let faces: Vec<&str> = p.face_colors().iter().map(Color::name).collect();
        writeln!(
            f,
            "line: {} {}  faces: {}",
            p.line_color(),
            p.line_thickness(),
            faces.join(" ")
        )?;
        write_placement(f, &self.matrix)
    }
}

/// Display adapter for a parts node; child names live in the graph.
pub struct PartsInfo<'a> {
    graph: &'a SceneGraph,
    parts: &'a Parts,
}

impl fmt::Display for PartsInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "parts: {} [{}]", self.parts.name, self.parts.index)?;
        write!(f, "children:")?;
        for child in self.parts.children.iter().filter_map(|&c| self.graph.parts(c)) {
            write!(f, " {}", child.name)?;
        }
        write!(f, "\nelements:")?;
        for element in self.parts.elements.iter().filter_map(|&e| self.graph.element(e)) {
            write!(f, " {}", element.name)?;
        }
        writeln!(f)?;
        write_placement(f, &self.parts.matrix)
    }
}

/// The editable model
#[derive(Debug, Clone)]
pub struct SceneGraph {
    parts: Vec<Option<Parts>>,
    elements: Vec<Option<Element>>,
    root: PartsId,
    current: PartsId,
    next_index: usize,
    config: ModelConfig,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    /// Empty model holding only the root node (index 0).
    pub fn with_config(config: ModelConfig) -> Self {
        let root = PartsId(0);
        Self {
            parts: vec![Some(Parts::new(ROOT_NAME, 0, None))],
            elements: Vec::new(),
            root,
            current: root,
            next_index: 1,
            config,
        }
    }

    /// Start a new model, keeping the configuration.
    pub fn clear(&mut self) {
        *self = Self::with_config(self.config.clone());
        debug!("model cleared");
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ModelConfig {
        &mut self.config
    }

    pub fn root(&self) -> PartsId {
        self.root
    }

    /// Node that convenience builders add to.
    pub fn current(&self) -> PartsId {
        self.current
    }

    pub fn set_current(&mut self, index: usize) -> Result<(), SceneError> {
        self.current = self.parts_id(index)?;
        Ok(())
    }

    /// Next index the allocator hands out.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn parts(&self, id: PartsId) -> Option<&Parts> {
        self.parts.get(id.0).and_then(Option::as_ref)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0).and_then(Option::as_ref)
    }

    pub fn root_parts(&self) -> Option<&Parts> {
        self.parts(self.root)
    }

    fn parts_mut(&mut self, id: PartsId) -> Option<&mut Parts> {
        self.parts.get_mut(id.0).and_then(Option::as_mut)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn index_of(&self, item: Item) -> Option<usize> {
        match item {
            Item::Parts(id) => self.parts(id).map(Parts::index),
            Item::Element(id) => self.element(id).map(Element::index),
        }
    }

    fn set_index(&mut self, item: Item, index: usize) {
        match item {
            Item::Parts(id) => {
                if let Some(parts) = self.parts_mut(id) {
                    parts.index = index;
                }
            }
            Item::Element(id) => {
                if let Some(element) = self.element_mut(id) {
                    element.index = index;
                }
            }
        }
    }

    fn allocate(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Pre-order walk: a node, its elements, then each child subtree.
    pub fn walk(&self) -> Vec<Item> {
        self.walk_from(self.root)
    }

    fn walk_from(&self, start: PartsId) -> Vec<Item> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(parts) = self.parts(id) else {
                continue;
            };
            order.push(Item::Parts(id));
            order.extend(parts.elements.iter().map(|&e| Item::Element(e)));
            stack.extend(parts.children.iter().rev());
        }
        order
    }

    pub fn item_count(&self) -> usize {
        self.walk().len()
    }

    pub fn element_count(&self) -> usize {
        self.walk()
            .iter()
            .filter(|item| matches!(item, Item::Element(_)))
            .count()
    }

    /// First item in walk order carrying `index`.
    pub fn find(&self, index: usize) -> Option<Item> {
        self.walk()
            .into_iter()
            .find(|&item| self.index_of(item) == Some(index))
    }

    pub fn parts_by_index(&self, index: usize) -> Option<PartsId> {
        match self.find(index)? {
            Item::Parts(id) => Some(id),
            Item::Element(_) => None,
        }
    }

    pub fn element_by_index(&self, index: usize) -> Option<ElementId> {
        match self.find(index)? {
            Item::Element(id) => Some(id),
            Item::Parts(_) => None,
        }
    }

    fn parts_id(&self, index: usize) -> Result<PartsId, SceneError> {
        match self.find(index) {
            Some(Item::Parts(id)) => Ok(id),
            Some(Item::Element(_)) => Err(SceneError::NotParts(index)),
            None => Err(SceneError::NotFound(index)),
        }
    }

    fn element_id(&self, index: usize) -> Result<ElementId, SceneError> {
        match self.find(index) {
            Some(Item::Element(id)) => Ok(id),
            Some(Item::Parts(_)) => Err(SceneError::NotElement(index)),
            None => Err(SceneError::NotFound(index)),
        }
    }

    /// Parts node whose child or element list directly holds `index`.
    ///
    /// `None` for the root and for indices not in the tree.
    pub fn find_node_owning(&self, index: usize) -> Option<PartsId> {
        self.walk().into_iter().find_map(|item| {
            let Item::Parts(id) = item else {
                return None;
            };
            let parts = self.parts(id)?;
            let holds_child = parts
                .children
                .iter()
                .any(|&c| self.index_of(Item::Parts(c)) == Some(index));
            let holds_element = parts
                .elements
                .iter()
                .any(|&e| self.index_of(Item::Element(e)) == Some(index));
            (holds_child || holds_element).then_some(id)
        })
    }

    /// Owner found by following parent links instead of searching.
    pub fn owner_of(&self, index: usize) -> Option<PartsId> {
        match self.find(index)? {
            Item::Parts(id) => self.parts(id)?.parent,
            Item::Element(id) => self.element(id).map(Element::owner),
        }
    }

    /// Fall back to the root for ids that no longer resolve.
    fn live(&self, id: PartsId) -> PartsId {
        if self.parts(id).is_some() {
            id
        } else {
            self.root
        }
    }

    fn attach_parts(&mut self, parent: PartsId, name: &str) -> (PartsId, usize) {
        let parent = self.live(parent);
        let index = self.allocate();
        let id = self.insert_parts(parent, name, index);
        debug!(index, name, "added parts");
        (id, index)
    }

    fn attach_element(&mut self, owner: PartsId, name: &str, primitive: Primitive) -> usize {
        let owner = self.live(owner);
        let index = self.allocate();
        let kind = primitive.kind();
        self.insert_element(owner, name, index, primitive, Matrix4::identity());
        debug!(index, name, %kind, "added element");
        index
    }

    /// Append a new parts node under `parent` and return its index.
    pub fn add_child(&mut self, parent: usize, name: &str) -> Result<usize, SceneError> {
        let parent = self.parts_id(parent)?;
        Ok(self.attach_parts(parent, name).1)
    }

    /// Attach `primitive` as a new element of `parent` and return its index.
    pub fn add_element(
        &mut self,
        parent: usize,
        name: &str,
        primitive: Primitive,
    ) -> Result<usize, SceneError> {
        let parent = self.parts_id(parent)?;
        Ok(self.attach_element(parent, name, primitive))
    }

    /// Add a parts node under the current one and make it current.
    pub fn add_parts(&mut self, name: &str) -> usize {
        let (id, index) = self.attach_parts(self.current, name);
        self.current = id;
        index
    }

    fn add_styled(&mut self, name: &str, primitive: Primitive) -> usize {
        let primitive = primitive
            .with_color(self.config.color)
            .with_line_thickness(self.config.line_thickness);
        self.attach_element(self.current, name, primitive)
    }

    pub fn add_line(&mut self, start: Point2<f64>, end: Point2<f64>) -> usize {
        let line = Primitive::line(start, end, self.config.plane);
        self.add_styled("LINE", line)
    }

    /// Full circle around `center` through `rim`.
    pub fn add_circle(&mut self, center: Point2<f64>, rim: Point2<f64>) -> usize {
        let shape = ArcShape::circle(center, nalgebra::distance(&center, &rim))
            .with_divisions(self.config.arc_divisions);
        let arc = Primitive::arc(shape, self.config.plane);
        self.add_styled("ARC", arc)
    }

    /// Arc from `start` through `mid` to `end`.
    pub fn add_arc(&mut self, start: Point2<f64>, mid: Point2<f64>, end: Point2<f64>) -> usize {
        let shape =
            ArcShape::through_points(start, mid, end).with_divisions(self.config.arc_divisions);
        let arc = Primitive::arc(shape, self.config.plane);
        self.add_styled("ARC", arc)
    }

    /// Four-point polygon from two opposite corners.
    pub fn add_rect(&mut self, a: Point2<f64>, b: Point2<f64>) -> usize {
        let rect = Primitive::polygon(PolygonShape::rect(a, b).points, self.config.plane);
        self.add_styled("POLYGON", rect)
    }

    pub fn add_polygon(&mut self, points: Vec<Point2<f64>>) -> usize {
        let polygon = Primitive::polygon(points, self.config.plane);
        self.add_styled("POLYGON", polygon)
    }

    /// `height` defaults to the configured box height.
    pub fn add_wire_cube(&mut self, start: Point2<f64>, end: Point2<f64>, height: Option<f64>) -> usize {
        let h = height.unwrap_or(self.config.box_height);
        let wire = Primitive::wire_cube(start, end, h, self.config.plane);
        self.add_styled("WIRECUBE", wire)
    }

    pub fn add_cube(&mut self, start: Point2<f64>, end: Point2<f64>, height: Option<f64>) -> usize {
        let h = height.unwrap_or(self.config.box_height);
        let cube = Primitive::cube(start, end, h, self.config.plane);
        self.add_styled("CUBE", cube)
    }

    /// Detach the item with `index` and everything below it.
    ///
    /// If the current node goes with it, its former parent becomes current.
    /// Returns `false` for the root and for unknown indices.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(owner) = self.find_node_owning(index) else {
            return false;
        };
        let Some(parts) = self.parts(owner) else {
            return false;
        };
        let child = parts
            .children
            .iter()
            .position(|&c| self.index_of(Item::Parts(c)) == Some(index))
            .map(|pos| (pos, parts.children[pos]));
        let element = parts
            .elements
            .iter()
            .position(|&e| self.index_of(Item::Element(e)) == Some(index))
            .map(|pos| (pos, parts.elements[pos]));

        if let Some((pos, child)) = child {
            let subtree = self.walk_from(child);
            if subtree.contains(&Item::Parts(self.current)) {
                self.current = owner;
            }
            if let Some(parts) = self.parts_mut(owner) {
                parts.children.remove(pos);
            }
            for item in subtree {
                self.free(item);
            }
            debug!(index, "removed parts");
            true
        } else if let Some((pos, element)) = element {
            if let Some(parts) = self.parts_mut(owner) {
                parts.elements.remove(pos);
            }
            self.free(Item::Element(element));
            debug!(index, "removed element");
            true
        } else {
            false
        }
    }

    fn free(&mut self, item: Item) {
        match item {
            Item::Parts(id) => {
                if let Some(slot) = self.parts.get_mut(id.0) {
                    *slot = None;
                }
            }
            Item::Element(id) => {
                if let Some(slot) = self.elements.get_mut(id.0) {
                    *slot = None;
                }
            }
        }
    }

    /// Renumber every item densely in walk order starting at 0.
    ///
    /// Returns the next free index, which the allocator continues from.
    pub fn reindex(&mut self) -> usize {
        let order = self.walk();
        for (index, item) in order.iter().enumerate() {
            self.set_index(*item, index);
        }
        self.next_index = order.len();
        debug!(next_index = self.next_index, "reindexed");
        self.next_index
    }

    /// Every element with the matrix accumulated down to its owner, in walk order.
    fn placed_elements(&self) -> Vec<(&Element, Matrix4<f64>)> {
        let mut placed = Vec::new();
        self.collect_placed(self.root, &Matrix4::identity(), &mut placed);
        placed
    }

    fn collect_placed<'a>(
        &'a self,
        id: PartsId,
        accumulated: &Matrix4<f64>,
        placed: &mut Vec<(&'a Element, Matrix4<f64>)>,
    ) {
        let Some(parts) = self.parts(id) else {
            return;
        };
        let accumulated = Transform::accumulate(&parts.matrix, accumulated);
        placed.extend(
            parts
                .elements
                .iter()
                .filter_map(|&e| self.element(e))
                .map(|element| (element, accumulated)),
        );
        for &child in &parts.children {
            self.collect_placed(child, &accumulated, placed);
        }
    }

    /// Indices of elements whose projected geometry meets `pick`, in walk order.
    pub fn pick(&self, pick: &PickBox, projection: impl Into<Projection>) -> Vec<usize> {
        let projection = projection.into();
        self.placed_elements()
            .into_iter()
            .filter(|(element, accumulated)| {
                let world = Transform::accumulate(&element.matrix, accumulated);
                element.primitive.pick_test(pick, &world, &projection)
            })
            .map(|(element, _)| element.index)
            .collect()
    }

    /// World placement of an item: its own matrix followed by every ancestor's.
    pub fn accumulated_matrix(&self, index: usize) -> Option<Matrix4<f64>> {
        let (mut matrix, mut next) = match self.find(index)? {
            Item::Parts(id) => (Matrix4::identity(), Some(id)),
            Item::Element(id) => {
                let element = self.element(id)?;
                (element.matrix, Some(element.owner))
            }
        };
        while let Some(parts) = next.and_then(|id| self.parts(id)) {
            matrix = Transform::accumulate(&matrix, &parts.matrix);
            next = parts.parent;
        }
        Some(matrix)
    }

    fn matrix_mut(&mut self, index: usize) -> Result<&mut Matrix4<f64>, SceneError> {
        let matrix = match self.find(index).ok_or(SceneError::NotFound(index))? {
            Item::Parts(id) => self.parts_mut(id).map(|p| &mut p.matrix),
            Item::Element(id) => self.element_mut(id).map(|e| &mut e.matrix),
        };
        matrix.ok_or(SceneError::NotFound(index))
    }

    /// `local = local × increment` on a parts node or element.
    pub fn apply_matrix(&mut self, index: usize, increment: &Matrix4<f64>) -> Result<(), SceneError> {
        let matrix = self.matrix_mut(index)?;
        *matrix = *matrix * increment;
        Ok(())
    }

    pub fn translate(&mut self, index: usize, offset: &Vector3<f64>) -> Result<(), SceneError> {
        self.apply_matrix(index, &Transform::translation(offset.x, offset.y, offset.z))
    }

    pub fn rotate_x(&mut self, index: usize, angle: f64) -> Result<(), SceneError> {
        self.apply_matrix(index, &Transform::rotation_x(angle))
    }

    pub fn rotate_y(&mut self, index: usize, angle: f64) -> Result<(), SceneError> {
        self.apply_matrix(index, &Transform::rotation_y(angle))
    }

    pub fn rotate_z(&mut self, index: usize, angle: f64) -> Result<(), SceneError> {
        self.apply_matrix(index, &Transform::rotation_z(angle))
    }

    pub fn scale(&mut self, index: usize, factors: &Vector3<f64>) -> Result<(), SceneError> {
        self.apply_matrix(index, &Transform::scale(factors.x, factors.y, factors.z))
    }

    pub fn clear_matrix(&mut self, index: usize) -> Result<(), SceneError> {
        *self.matrix_mut(index)? = Matrix4::identity();
        Ok(())
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), SceneError> {
        let renamed = match self.find(index).ok_or(SceneError::NotFound(index))? {
            Item::Parts(id) => self.parts_mut(id).map(|p| p.name = name.to_string()),
            Item::Element(id) => self.element_mut(id).map(|e| e.name = name.to_string()),
        };
        renamed.ok_or(SceneError::NotFound(index))
    }

    /// Mutate an element's primitive; vertices and surfaces are regenerated.
    pub fn edit_primitive(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Primitive),
    ) -> Result<(), SceneError> {
        let id = self.element_id(index)?;
        let element = self.element_mut(id).ok_or(SceneError::NotFound(index))?;
        element.edit(f);
        Ok(())
    }

    /// Line color and first face color of an element.
    pub fn set_color(&mut self, index: usize, color: Color) -> Result<(), SceneError> {
        self.edit_primitive(index, |primitive| primitive.set_color(color))?;
        debug!(index, color = color.name(), "recolored element");
        Ok(())
    }

    /// All surfaces in world coordinates, for 3D display.
    pub fn world_surfaces(&self) -> Vec<Surface> {
        self.placed_elements()
            .into_iter()
            .flat_map(|(element, accumulated)| {
                let world = Transform::accumulate(&element.matrix, &accumulated);
                element
                    .surfaces
                    .iter()
                    .map(move |s| Surface::new(Transform::apply_all(&s.points, &world), s.color))
            })
            .collect()
    }

    pub fn drawables(&self, projection: impl Into<Projection>) -> Vec<Drawing> {
        let projection = projection.into();
        self.placed_elements()
            .into_iter()
            .flat_map(|(element, accumulated)| {
                let world = Transform::accumulate(&element.matrix, &accumulated);
                element.drawings(&world, &projection).collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S, projection: impl Into<Projection>) {
        for drawing in self.drawables(projection) {
            drawing.draw_into(sink);
        }
    }

    /// Drawings of the elements in `indices` as if `increment` were already
    /// applied to their local matrices.
    pub fn drag_preview(
        &self,
        indices: &[usize],
        increment: &Matrix4<f64>,
        projection: impl Into<Projection>,
    ) -> Vec<Drawing> {
        let projection = projection.into();
        self.placed_elements()
            .into_iter()
            .filter(|(element, _)| indices.contains(&element.index))
            .flat_map(|(element, accumulated)| {
                let local = element.matrix * increment;
                let world = Transform::accumulate(&local, &accumulated);
                element.drawings(&world, &projection).collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn parts_info(&self, id: PartsId) -> Option<PartsInfo<'_>> {
        Some(PartsInfo {
            graph: self,
            parts: self.parts(id)?,
        })
    }

    /// Multi-line summary of the item with `index`.
    pub fn describe(&self, index: usize) -> Option<String> {
        match self.find(index)? {
            Item::Parts(id) => self.parts_info(id).map(|info| info.to_string()),
            Item::Element(id) => self.element(id).map(Element::to_string),
        }
    }

    pub(crate) fn set_root_header(&mut self, name: &str, index: usize) {
        let root = self.root;
        if let Some(parts) = self.parts_mut(root) {
            parts.name = name.to_string();
            parts.index = index;
        }
    }

    /// Attach a parts node carrying a decoded index, bypassing the allocator.
    pub(crate) fn insert_parts(&mut self, parent: PartsId, name: &str, index: usize) -> PartsId {
        let id = PartsId(self.parts.len());
        self.parts.push(Some(Parts::new(name, index, Some(parent))));
        if let Some(parent) = self.parts_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    pub(crate) fn insert_element(
        &mut self,
        owner: PartsId,
        name: &str,
        index: usize,
        primitive: Primitive,
        matrix: Matrix4<f64>,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        let mut element = Element::new(name, index, primitive, owner);
        element.matrix = matrix;
        self.elements.push(Some(element));
        if let Some(parts) = self.parts_mut(owner) {
            parts.elements.push(id);
        }
        id
    }

    pub(crate) fn set_parts_matrix(&mut self, id: PartsId, matrix: Matrix4<f64>) {
        if let Some(parts) = self.parts_mut(id) {
            parts.matrix = matrix;
        }
    }

    pub(crate) fn reset_current(&mut self) {
        self.current = self.root;
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
