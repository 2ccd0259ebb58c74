use glam::{DMat4, DVec2, DVec3};
use marker_mesh::{
    flatten_scene, frame_labels, resolve_texture_path, ColorRgba, Diagnostic, FlattenOptions,
    FrameCache, MarkerMesh, Material, MaterialTable, SceneGraph, SourceMesh, TextureHandle,
    VertexLayout,
};
use std::path::PathBuf;

fn triangle(material_index: usize) -> SourceMesh {
    SourceMesh {
        positions: vec![
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ],
        normals: Some(vec![DVec3::Z; 3]),
        tex_coords: Some(vec![DVec2::new(0.0, 1.0); 3]),
        colors: Some(vec![ColorRgba::new(1.0, 0.5, 0.0, 1.0); 3]),
        faces: vec![vec![0, 1, 2]],
        material_index,
    }
}

/// A Y-up asset as a loader would hand it over: the root carries an axis
/// fix-up, the meshes hang below it.
fn robot() -> (SceneGraph, MaterialTable) {
    let mut scene = SceneGraph::new();
    let root = scene.add_root("root", DMat4::from_rotation_x(-std::f64::consts::FRAC_PI_2));
    let body = scene.add_child(root, "body", DMat4::IDENTITY);
    let head = scene.add_child(body, "head", DMat4::from_translation(DVec3::new(0.0, 10.0, 0.0)));
    scene.attach_mesh(body, triangle(0));
    scene.attach_mesh(head, triangle(1));

    let materials = [Material::untextured(), Material::textured(TextureHandle(1))]
        .into_iter()
        .collect();
    (scene, materials)
}

#[test]
fn root_level_mesh_with_identity_options_is_unchanged() {
    let mut scene = SceneGraph::new();
    let root = scene.add_root("root", DMat4::from_scale(DVec3::splat(100.0)));
    scene.attach_mesh(root, triangle(0));

    let result = flatten_scene(&scene, &MaterialTable::new(), &FlattenOptions::default());
    assert!(result.diagnostics().is_empty());

    let vertices = result.sub_meshes()[0].colored_vertices().unwrap();
    assert_eq!(vertices[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(vertices[0].normal, [0.0, 0.0, 1.0]);
    assert_eq!(vertices[0].color, [1.0, 0.5, 0.0]);
    assert_eq!(result.sub_meshes()[0].indices(), &[0, 1, 2]);
}

#[test]
fn z_up_conversion_swaps_axes() {
    let mut scene = SceneGraph::new();
    let root = scene.add_root("root", DMat4::IDENTITY);
    scene.attach_mesh(root, triangle(0));

    let options = FlattenOptions {
        z_up: true,
        ..Default::default()
    };
    let result = flatten_scene(&scene, &MaterialTable::new(), &options);
    let vertices = result.sub_meshes()[0].colored_vertices().unwrap();
    assert_eq!(vertices[0].position, [1.0, -3.0, 2.0]);
    assert_eq!(vertices[0].normal, [0.0, -1.0, 0.0]);
}

#[test]
fn one_sub_mesh_per_entry_in_scene_order() {
    let (scene, materials) = robot();
    let result = flatten_scene(&scene, &materials, &FlattenOptions::default());

    let meshes = result.sub_meshes();
    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].material(), Some(0));
    assert_eq!(meshes[0].layout(), VertexLayout::Colored);
    assert_eq!(meshes[1].material(), Some(1));
    assert_eq!(meshes[1].layout(), VertexLayout::Textured);

    // Root rotation is excluded, the head translation is not
    let head = meshes[1].textured_vertices().unwrap();
    assert_eq!(head[0].position, [1.0, 12.0, 3.0]);
    assert_eq!(head[0].uv, [0.0, 1.0]);
}

#[test]
fn global_transform_and_scale_apply_to_every_entry() {
    let (scene, materials) = robot();
    let options = FlattenOptions {
        transform: DMat4::from_translation(DVec3::new(0.0, 0.0, -1.0)),
        scale: DVec3::splat(2.0),
        z_up: false,
    };
    let result = flatten_scene(&scene, &materials, &options);
    let body = result.sub_meshes()[0].vertices().positions();
    let head = result.sub_meshes()[1].vertices().positions();
    assert_eq!(body[0], [2.0, 4.0, 5.0]);
    assert_eq!(head[0], [2.0, 14.0, 5.0]);
}

#[test]
fn failed_entry_does_not_stop_siblings() {
    let (mut scene, materials) = robot();
    let mut broken = triangle(0);
    broken.colors = Some(vec![ColorRgba::default()]);
    scene.attach_mesh(1, broken);

    let result = flatten_scene(&scene, &materials, &FlattenOptions::default());
    assert_eq!(result.sub_meshes().len(), 2);
    assert!(matches!(
        result.diagnostics(),
        [Diagnostic::EntryFailed { node: 1, mesh: 1, .. }]
    ));
}

#[test]
fn flattening_is_repeatable() {
    let (scene, materials) = robot();
    let options = FlattenOptions {
        z_up: true,
        ..Default::default()
    };
    let first = flatten_scene(&scene, &materials, &options);
    let second = flatten_scene(&scene, &materials, &options);
    assert_eq!(first, second);
}

#[test]
fn marker_mesh_loads_scene() {
    let (scene, materials) = robot();
    let mut mesh = MarkerMesh::new();
    let result = mesh.load_scene(&scene, &materials, &FlattenOptions::default());
    assert!(result.diagnostics().is_empty());
    assert!(mesh.is_initialized());
    assert!(!mesh.needs_update());
    assert!(mesh.marker().is_none());
    assert_eq!(mesh.sub_meshes(), result.sub_meshes());
}

#[test]
fn frame_labels_follow_transform_stream() {
    let mut frames = FrameCache::new();
    for (parent, child) in [("map", "odom"), ("odom", "base_link"), ("map", "odom"), ("viz_base", "map")] {
        frames.observe_transform(parent, child);
    }
    let labels = frame_labels(&frames);
    let texts: Vec<&str> = labels.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["map", "odom", "base_link"]);
}

#[test]
fn texture_paths_resolve_next_to_model() {
    assert_eq!(
        resolve_texture_path("/opt/robot/meshes/arm.dae", "arm_diffuse.png"),
        PathBuf::from("/opt/robot/meshes/arm_diffuse.png")
    );
}
