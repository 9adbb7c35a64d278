//! Triangle–box intersection testing.

use nalgebra::Vector3;

use crate::aabb::Aabb;
use crate::types::Triangle;

/// Tests whether a triangle intersects an axis-aligned box.
///
/// Separating-axis test over the three box axes, the triangle plane, and
/// the nine box-edge/triangle-edge cross products. Touching counts as
/// intersecting, so a triangle lying exactly in a box face is a hit, and
/// degenerate triangles still report overlap correctly.
pub fn triangle_intersects_aabb(triangle: &Triangle, aabb: &Aabb) -> bool {
    let center = aabb.center();
    let h = aabb.half_extents();

    // Work in box-local space: box centered at the origin.
    let t0 = triangle.v0 - center;
    let t1 = triangle.v1 - center;
    let t2 = triangle.v2 - center;

    // Box axes: the triangle's extent on x/y/z against the box extent.
    for i in 0..3 {
        let lo = t0[i].min(t1[i]).min(t2[i]);
        let hi = t0[i].max(t1[i]).max(t2[i]);
        if lo > h[i] || hi < -h[i] {
            return false;
        }
    }

    let e0 = t1 - t0;
    let e1 = t2 - t1;
    let e2 = t0 - t2;

    // Triangle plane against the box projection onto its normal.
    let normal = e0.cross(&e1);
    let dist = t0.dot(&normal);
    let radius = h.x * normal.x.abs() + h.y * normal.y.abs() + h.z * normal.z.abs();
    if dist.abs() > radius {
        return false;
    }

    // Cross products of box axes and triangle edges. Projections stay
    // unnormalized since both sides scale by the same factor.
    let axes = [Vector3::x(), Vector3::y(), Vector3::z()];
    for edge in [e0, e1, e2] {
        for box_axis in &axes {
            let axis: Vector3<f64> = box_axis.cross(&edge);
            if axis.norm_squared() < 1e-12 {
                continue;
            }

            let p0 = t0.dot(&axis);
            let p1 = t1.dot(&axis);
            let p2 = t2.dot(&axis);
            let lo = p0.min(p1).min(p2);
            let hi = p0.max(p1).max(p2);
            let radius = h.x * axis.x.abs() + h.y * axis.y.abs() + h.z * axis.z.abs();
            if lo > radius || hi < -radius {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_triangle_inside_box() {
        let tri = Triangle::new(
            Point3::new(-0.5, -0.5, 0.0),
            Point3::new(0.5, -0.5, 0.0),
            Point3::new(0.0, 0.5, 0.0),
        );
        assert!(triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_triangle_far_away() {
        let tri = Triangle::new(
            Point3::new(5.0, 5.0, 5.0),
            Point3::new(6.0, 5.0, 5.0),
            Point3::new(5.0, 6.0, 5.0),
        );
        assert!(!triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_large_triangle_spanning_box() {
        // All vertices outside the box, but the plane cuts through it.
        let tri = Triangle::new(
            Point3::new(-10.0, -10.0, 0.0),
            Point3::new(10.0, -10.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        );
        assert!(triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_triangle_on_box_face() {
        // Flat triangle lying exactly in the z = 1 face plane.
        let tri = Triangle::new(
            Point3::new(-0.5, -0.5, 1.0),
            Point3::new(0.5, -0.5, 1.0),
            Point3::new(0.0, 0.5, 1.0),
        );
        assert!(triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_plane_separation() {
        // Parallel to the z = 1 face but just beyond it.
        let tri = Triangle::new(
            Point3::new(-0.5, -0.5, 1.1),
            Point3::new(0.5, -0.5, 1.1),
            Point3::new(0.0, 0.5, 1.1),
        );
        assert!(!triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_edge_cross_separation() {
        // Per-axis extents overlap the box and the plane cuts through it,
        // but the triangle sits diagonally past the (1, 1, 0) edge.
        let tri = Triangle::new(
            Point3::new(2.5, 0.5, 0.0),
            Point3::new(0.5, 2.5, 0.0),
            Point3::new(2.5, 2.5, 0.0),
        );
        assert!(!triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_edge_touching_corner() {
        // Hypotenuse x + y = 2 touches the box corner exactly.
        let tri = Triangle::new(
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
        );
        assert!(triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_degenerate_triangle_through_box() {
        // Zero-area triangle collapsed onto a segment crossing the box.
        let tri = Triangle::new(
            Point3::new(-2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        );
        assert!(triangle_intersects_aabb(&tri, &unit_box()));
    }

    #[test]
    fn test_degenerate_triangle_outside_box() {
        let tri = Triangle::new(
            Point3::new(-2.0, 3.0, 0.0),
            Point3::new(2.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        assert!(!triangle_intersects_aabb(&tri, &unit_box()));
    }
}
