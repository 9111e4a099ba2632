//! Page-space rectangles for tags.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Edges with inverted coordinates swapped back into place.
    fn normalized(&self) -> (f64, f64, f64, f64) {
        (
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        (self.right - self.left).abs() * (self.bottom - self.top).abs()
    }

    /// Area shared with `other`, zero when the boxes do not touch.
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> f64 {
        let (l1, t1, r1, b1) = self.normalized();
        let (l2, t2, r2, b2) = other.normalized();

        let x_overlap = (r1.min(r2) - l1.max(l2)).max(0.0);
        let y_overlap = (b1.min(b2) - t1.max(t2)).max(0.0);
        x_overlap * y_overlap
    }

    /// Fraction of this box covered by `other`.
    #[must_use]
    pub fn intersection_over_self(&self, other: &Self) -> f64 {
        let area = self.area();
        if area <= 0.0 {
            return 0.0;
        }
        self.intersection_area(other) / area
    }

    /// Intersection-over-union ratio.
    #[must_use]
    pub fn intersection_over_union(&self, other: &Self) -> f64 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }
}
