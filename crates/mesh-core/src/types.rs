//! Core mesh types.

use nalgebra::{Point3, Vector3};

use crate::aabb::Aabb;

/// A triangle mesh as a flat vertex buffer plus indexed faces.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is [v0, v1, v2] with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Number of vertices in the mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces (triangles) in the mesh.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty (no vertices or faces).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Compute the axis-aligned bounding box over all vertices.
    /// Returns `None` if the mesh has no vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.vertices)
    }

    /// Iterate over triangles, yielding `Triangle` structs with actual
    /// vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize],
                self.vertices[i1 as usize],
                self.vertices[i2 as usize],
            )
        })
    }

    /// Append a standalone triangle, adding three new vertices.
    pub fn push_triangle(&mut self, triangle: &Triangle) {
        let vi = self.vertices.len() as u32;
        self.vertices.push(triangle.v0);
        self.vertices.push(triangle.v1);
        self.vertices.push(triangle.v2);
        self.faces.push([vi, vi + 1, vi + 2]);
    }

    /// Append an axis-aligned box centered at `center` with the given
    /// edge lengths: 8 vertices, 12 triangles.
    pub fn push_box(&mut self, center: Point3<f64>, extents: Vector3<f64>) {
        let h = extents * 0.5;
        let vi = self.vertices.len() as u32;

        self.vertices.push(Point3::new(center.x - h.x, center.y - h.y, center.z - h.z));
        self.vertices.push(Point3::new(center.x - h.x, center.y - h.y, center.z + h.z));
        self.vertices.push(Point3::new(center.x - h.x, center.y + h.y, center.z - h.z));
        self.vertices.push(Point3::new(center.x - h.x, center.y + h.y, center.z + h.z));
        self.vertices.push(Point3::new(center.x + h.x, center.y - h.y, center.z - h.z));
        self.vertices.push(Point3::new(center.x + h.x, center.y - h.y, center.z + h.z));
        self.vertices.push(Point3::new(center.x + h.x, center.y + h.y, center.z - h.z));
        self.vertices.push(Point3::new(center.x + h.x, center.y + h.y, center.z + h.z));

        // Back
        self.push_quad(vi + 2, vi + 6, vi + 4, vi);
        // Front
        self.push_quad(vi + 1, vi + 5, vi + 7, vi + 3);
        // Left
        self.push_quad(vi, vi + 1, vi + 3, vi + 2);
        // Right
        self.push_quad(vi + 6, vi + 7, vi + 5, vi + 4);
        // Bottom
        self.push_quad(vi + 4, vi + 5, vi + 1, vi);
        // Top
        self.push_quad(vi + 2, vi + 3, vi + 7, vi + 6);
    }

    /// Append a quad as two triangles.
    fn push_quad(&mut self, i0: u32, i1: u32, i2: u32, i3: u32) {
        self.faces.push([i0, i1, i2]);
        self.faces.push([i2, i3, i0]);
    }
}

/// A triangle with concrete vertex positions.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// The tightest axis-aligned box enclosing the triangle.
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            Point3::new(
                self.v0.x.min(self.v1.x).min(self.v2.x),
                self.v0.y.min(self.v1.y).min(self.v2.y),
                self.v0.z.min(self.v1.z).min(self.v2.z),
            ),
            Point3::new(
                self.v0.x.max(self.v1.x).max(self.v2.x),
                self.v0.y.max(self.v1.y).max(self.v2.y),
                self.v0.z.max(self.v1.z).max(self.v2.z),
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.bounds().is_none());
    }

    #[test]
    fn test_push_triangle() {
        let mut mesh = Mesh::new();
        mesh.push_triangle(&Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ));

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(!mesh.is_empty());

        let tri = mesh.triangles().next().expect("one triangle");
        assert_eq!(tri.v1, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_push_box_counts() {
        let mut mesh = Mesh::new();
        mesh.push_box(Point3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
    }

    #[test]
    fn test_push_box_bounds() {
        let mut mesh = Mesh::new();
        mesh.push_box(Point3::new(1.0, 2.0, 3.0), Vector3::new(2.0, 4.0, 6.0));

        let bounds = mesh.bounds().expect("non-empty mesh");
        assert_eq!(bounds.mins, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.maxs, Point3::new(2.0, 4.0, 6.0));
        assert_eq!(bounds.center(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_push_box_twice_offsets_indices() {
        let mut mesh = Mesh::new();
        mesh.push_box(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        mesh.push_box(Point3::new(5.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));

        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 24);
        // Every face of the second box must index into its own vertices.
        for face in &mesh.faces[12..] {
            for &idx in face {
                assert!(idx >= 8 && idx < 16);
            }
        }
    }

    #[test]
    fn test_triangle_aabb() {
        let tri = Triangle::new(
            Point3::new(1.0, 0.0, -1.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(-1.0, 1.0, 3.0),
        );
        let aabb = tri.aabb();
        assert_eq!(aabb.mins, Point3::new(-1.0, 0.0, -1.0));
        assert_eq!(aabb.maxs, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_triangles_iterator_indexes_shared_vertices() {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
        mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
        mesh.vertices.push(Point3::new(1.0, 1.0, 0.0));
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([2, 1, 3]);

        let tris: Vec<Triangle> = mesh.triangles().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[0].v0, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(tris[1].v2, Point3::new(1.0, 1.0, 0.0));
    }
}
