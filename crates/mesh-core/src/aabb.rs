//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

/// A world-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Corner with the smallest coordinate on every axis.
    pub mins: Point3<f64>,

    /// Corner with the largest coordinate on every axis.
    pub maxs: Point3<f64>,
}

impl Aabb {
    /// Create a box from its two extreme corners.
    #[inline]
    pub fn new(mins: Point3<f64>, maxs: Point3<f64>) -> Self {
        Self { mins, maxs }
    }

    /// Create a box from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point3<f64>, half_extents: Vector3<f64>) -> Self {
        Self {
            mins: center - half_extents,
            maxs: center + half_extents,
        }
    }

    /// Compute the tightest box enclosing all points.
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let first = *points.first()?;
        let mut mins = first;
        let mut maxs = first;

        for p in &points[1..] {
            mins.x = mins.x.min(p.x);
            mins.y = mins.y.min(p.y);
            mins.z = mins.z.min(p.z);
            maxs.x = maxs.x.max(p.x);
            maxs.y = maxs.y.max(p.y);
            maxs.z = maxs.z.max(p.z);
        }

        Some(Self { mins, maxs })
    }

    /// The center of the box.
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        self.mins + self.half_extents()
    }

    /// The size of the box along each axis.
    #[inline]
    pub fn extents(&self) -> Vector3<f64> {
        self.maxs - self.mins
    }

    /// Half the size of the box along each axis.
    #[inline]
    pub fn half_extents(&self) -> Vector3<f64> {
        self.extents() * 0.5
    }

    /// The smallest box enclosing both `self` and `other`.
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: Point3::new(
                self.mins.x.min(other.mins.x),
                self.mins.y.min(other.mins.y),
                self.mins.z.min(other.mins.z),
            ),
            maxs: Point3::new(
                self.maxs.x.max(other.maxs.x),
                self.maxs.y.max(other.maxs.y),
                self.maxs.z.max(other.maxs.z),
            ),
        }
    }

    /// The box grown by `margin` on every side.
    pub fn expanded(&self, margin: f64) -> Aabb {
        let m = Vector3::repeat(margin);
        Aabb {
            mins: self.mins - m,
            maxs: self.maxs + m,
        }
    }

    /// Whether the two boxes overlap. Touching counts as overlapping.
    ///
    /// Any NaN coordinate makes this return `false`.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.mins.x <= other.maxs.x
            && self.maxs.x >= other.mins.x
            && self.mins.y <= other.maxs.y
            && self.maxs.y >= other.mins.y
            && self.mins.z <= other.maxs.z
            && self.maxs.z >= other.mins.z
    }
}
