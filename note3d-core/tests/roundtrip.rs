use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2, Vector3};
use note3d_core::{
    from_text, serialize, deserialize, to_text, Color, Item, Plane, PickBox, SceneGraph, Shape,
    Topology, Transform,
};

fn sample_model() -> SceneGraph {
    let mut graph = SceneGraph::new();
    graph.add_line(Point2::new(0.0, 0.0), Point2::new(10.0, 5.0));
    graph.add_circle(Point2::new(2.0, 2.0), Point2::new(3.0, 2.0));

    let body = graph.add_parts("body");
    graph.config_mut().plane = Plane::Yz;
    graph.add_arc(Point2::new(1.0, 0.0), Point2::new(0.0, 1.0), Point2::new(-1.0, 0.0));
    graph.add_rect(Point2::new(-1.0, -1.0), Point2::new(1.0, 2.0));
    graph.translate(body, &Vector3::new(1.5, -2.0, 0.25)).unwrap();
    graph.rotate_y(body, 0.3).unwrap();

    graph.add_parts("wheel");
    graph.config_mut().plane = Plane::Zx;
    graph.config_mut().color = Color::BLUE;
    let cube = graph.add_cube(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0), Some(0.5));
    graph.add_wire_cube(Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0), None);
    graph.add_polygon(vec![
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        Point2::new(4.0, 3.0),
    ]);
    graph.scale(cube, &Vector3::new(2.0, 1.0, 0.5)).unwrap();
    graph.set_color(cube, Color::ORANGE).unwrap();
    graph
}

/// Compare two models node by node in walk order.
fn assert_same_model(a: &SceneGraph, b: &SceneGraph) {
    let (wa, wb) = (a.walk(), b.walk());
    assert_eq!(wa.len(), wb.len());
    for (ia, ib) in wa.into_iter().zip(wb) {
        match (ia, ib) {
            (Item::Parts(pa), Item::Parts(pb)) => {
                let (pa, pb) = (a.parts(pa).unwrap(), b.parts(pb).unwrap());
                assert_eq!(pa.name(), pb.name());
                assert_eq!(pa.index(), pb.index());
                assert_eq!(pa.children().len(), pb.children().len());
                assert_eq!(pa.elements().len(), pb.elements().len());
                assert_relative_eq!(pa.matrix(), pb.matrix(), epsilon = 1e-9);
            }
            (Item::Element(ea), Item::Element(eb)) => {
                let (ea, eb) = (a.element(ea).unwrap(), b.element(eb).unwrap());
                assert_eq!(ea.name(), eb.name());
                assert_eq!(ea.index(), eb.index());
                assert_relative_eq!(ea.matrix(), eb.matrix(), epsilon = 1e-9);
                let (pa, pb) = (ea.primitive(), eb.primitive());
                assert_eq!(pa.kind(), pb.kind());
                assert_eq!(pa.plane(), pb.plane());
                assert_eq!(pa.topology(), pb.topology());
                assert_eq!(pa.line_color(), pb.line_color());
                assert_eq!(pa.face_colors(), pb.face_colors());
                assert_eq!(pa.vertices().len(), pb.vertices().len());
                for (va, vb) in pa.vertices().iter().zip(pb.vertices()) {
                    assert_relative_eq!(va, vb, epsilon = 1e-9);
                }
                assert_eq!(ea.surfaces().len(), eb.surfaces().len());
            }
            (ia, ib) => panic!("walk order differs: {ia:?} vs {ib:?}"),
        }
    }
}

#[test]
fn test_records_round_trip() {
    let graph = sample_model();
    let loaded = deserialize(&serialize(&graph)).unwrap();
    assert_same_model(&graph, &loaded);
    assert_eq!(loaded.next_index(), graph.item_count());
}

#[test]
fn test_text_round_trip() {
    let graph = sample_model();
    let text = to_text(&graph);
    assert!(text.starts_with("Parts,Root,0\n"));
    let loaded = from_text(&text).unwrap();
    assert_same_model(&graph, &loaded);
    assert_eq!(to_text(&loaded), text);
}

#[test]
fn test_loaded_model_picks_like_original() {
    let graph = sample_model();
    let loaded = from_text(&to_text(&graph)).unwrap();
    let pick = PickBox::around(Point2::new(5.0, 2.5), 0.2);
    let picked = graph.pick(&pick, Plane::Xy);
    assert_eq!(picked, vec![1]);
    assert_eq!(loaded.pick(&pick, Plane::Xy), picked);
}

#[test]
fn test_round_trip_after_remove_is_reindexed() {
    let mut graph = sample_model();
    assert!(graph.remove(2));
    let loaded = from_text(&to_text(&graph)).unwrap();
    let indices: Vec<usize> = loaded
        .walk()
        .into_iter()
        .filter_map(|item| loaded.index_of(item))
        .collect();
    assert_eq!(indices, (0..graph.item_count()).collect::<Vec<_>>());
}

#[test]
fn test_arc_parameters_survive() {
    let graph = sample_model();
    let loaded = deserialize(&serialize(&graph)).unwrap();
    let arcs: Vec<(f64, f64)> = loaded
        .walk()
        .into_iter()
        .filter_map(|item| match item {
            Item::Element(id) => match loaded.element(id)?.primitive().shape() {
                Shape::Arc(arc) => Some((arc.radius, arc.end_angle - arc.start_angle)),
                _ => None,
            },
            Item::Parts(_) => None,
        })
        .collect();
    assert_eq!(arcs.len(), 2);
    assert_relative_eq!(arcs[0].0, 1.0, epsilon = 1e-9);
    assert_relative_eq!(arcs[0].1, std::f64::consts::TAU, epsilon = 1e-9);
    assert_relative_eq!(arcs[1].1, std::f64::consts::PI, epsilon = 1e-9);
}

#[test]
fn test_drag_pair_leaves_model_unchanged() {
    let mut graph = sample_model();
    let before = serialize(&graph);
    let d = Vector2::new(3.25, -1.5);
    for plane in Plane::ALL {
        graph.apply_matrix(3, &Transform::drag_translation(&d, plane)).unwrap();
        graph.apply_matrix(3, &Transform::drag_translation(&-d, plane)).unwrap();
    }
    let after = deserialize(&serialize(&graph)).unwrap();
    assert_same_model(&deserialize(&before).unwrap(), &after);
}

#[test]
fn test_polygon_topology_change_survives() {
    let mut graph = sample_model();
    graph
        .edit_primitive(9, |p| p.set_topology(Topology::Polygon))
        .unwrap();
    let loaded = from_text(&to_text(&graph)).unwrap();
    let id = loaded.element_by_index(9).unwrap();
    let element = loaded.element(id).unwrap();
    assert_eq!(element.primitive().topology(), Topology::Polygon);
    assert_eq!(element.surfaces().len(), 1);
}
