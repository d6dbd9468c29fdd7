use beacon_core::mesh::*;
use glam::Vec3;

fn assert_indices_in_range(mesh: &MeshData) {
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < n));
}

#[test]
fn plane_is_centered_quad() {
    let mesh = plane(20.0, 20.0);
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
    assert_eq!(mesh.topology, Topology::Triangles);
    let (lo, hi) = mesh.bounds().unwrap();
    assert_eq!(lo, Vec3::new(-10.0, -10.0, 0.0));
    assert_eq!(hi, Vec3::new(10.0, 10.0, 0.0));
    assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
}

#[test]
fn disk_fans_around_center() {
    let mesh = disk(1.5, 32);
    assert_eq!(mesh.vertices.len(), 34);
    assert_eq!(mesh.indices.len(), 32 * 3);
    assert_indices_in_range(&mesh);
    for v in &mesh.vertices[1..] {
        let r = Vec3::from(v.position).length();
        assert!((r - 1.5).abs() < 1e-5);
        assert!(v.uv[0] >= 0.0 && v.uv[0] <= 1.0 && v.uv[1] >= 0.0 && v.uv[1] <= 1.0);
    }
}

#[test]
fn cone_apex_up_with_closed_base() {
    let mesh = cone(1.0, 2.0, 32);
    assert_eq!(mesh.vertices.len(), 2 * 33 + 34);
    assert_eq!(mesh.indices.len(), 32 * 3 * 2);
    assert_indices_in_range(&mesh);
    let (lo, hi) = mesh.bounds().unwrap();
    assert!((lo.y + 1.0).abs() < 1e-6 && (hi.y - 1.0).abs() < 1e-6);
    assert!((hi.x - 1.0).abs() < 1e-5 && (lo.z + 1.0).abs() < 1e-5);
    // Side normals lean upward.
    assert!(mesh.vertices[..66].iter().all(|v| v.normal[1] > 0.0));
}

#[test]
fn sphere_vertices_on_radius() {
    let mesh = sphere(0.5, 8, 6);
    assert_eq!(mesh.vertices.len(), 9 * 7);
    assert_eq!(mesh.indices.len(), 2 * 8 * 5 * 3);
    assert_indices_in_range(&mesh);
    for v in &mesh.vertices {
        assert!((Vec3::from(v.position).length() - 0.5).abs() < 1e-5);
        let n = Vec3::from(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn grid_is_line_list_on_xz() {
    let mesh = grid(20.0, 40);
    assert_eq!(mesh.topology, Topology::Lines);
    assert_eq!(mesh.vertices.len(), 41 * 4);
    assert_eq!(mesh.indices.len(), 41 * 4);
    let (lo, hi) = mesh.bounds().unwrap();
    assert_eq!(lo, Vec3::new(-10.0, 0.0, -10.0));
    assert_eq!(hi, Vec3::new(10.0, 0.0, 10.0));
}

#[test]
fn cuboid_has_six_flat_faces() {
    let mut mesh = plane(1.0, 1.0);
    let before = mesh.vertices.len();
    mesh.push_cuboid(Vec3::ZERO, Vec3::ONE);
    assert_eq!(mesh.vertices.len() - before, 24);
    assert_eq!(mesh.indices.len(), 6 + 36);
    assert_indices_in_range(&mesh);
}

#[test]
fn empty_mesh_has_no_bounds() {
    let mesh = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
        topology: Topology::Triangles,
    };
    assert!(mesh.bounds().is_none());
}
