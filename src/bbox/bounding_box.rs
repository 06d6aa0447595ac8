/// Number of coordinates per box: (left, top, right, bottom).
pub const BOX_SIZE: usize = 4;

/// Axis-aligned box in ltrb order. Plain value type, no identity beyond its
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        BoundingBox {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width clamped at zero, so an inverted box has no extent.
    pub fn width(&self) -> f32 {
        f32::max(self.right - self.left, 0.0)
    }

    pub fn height(&self) -> f32 {
        f32::max(self.bottom - self.top, 0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn intersection_area(&self, other: &BoundingBox) -> f32 {
        let left = f32::max(self.left, other.left);
        let top = f32::max(self.top, other.top);
        let right = f32::min(self.right, other.right);
        let bottom = f32::min(self.bottom, other.bottom);

        f32::max(right - left, 0.0) * f32::max(bottom - top, 0.0)
    }

    pub fn intersection_over_union(&self, other: &BoundingBox) -> f32 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;

        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }

    pub fn as_ltrb(&self) -> [f32; BOX_SIZE] {
        [self.left, self.top, self.right, self.bottom]
    }
}

/// Parse a flat coordinate slice into boxes, one per group of 4 values.
/// The slice length must already be validated as a multiple of 4.
pub fn read_boxes_from_slice(coords: &[f32]) -> Vec<BoundingBox> {
    coords
        .chunks_exact(BOX_SIZE)
        .map(|ltrb| BoundingBox::new(ltrb[0], ltrb[1], ltrb[2], ltrb[3]))
        .collect()
}
