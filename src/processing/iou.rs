use ndarray::Array2;

use crate::bbox::bounding_box::BoundingBox;

/// Dense IoU matrix between ground-truth boxes (rows) and anchors (columns).
///
/// Anchor areas are computed once and reused for every row; each row reuses
/// its box area across the column scan. Degenerate boxes have zero area, so
/// a zero union short-circuits to IoU 0 instead of dividing.
pub fn iou_matrix(boxes: &[BoundingBox], anchors: &[BoundingBox]) -> Array2<f32> {
    let anchor_areas: Vec<f32> = anchors.iter().map(BoundingBox::area).collect();

    let mut ious = Array2::<f32>::zeros((boxes.len(), anchors.len()));

    for (row, bbox) in boxes.iter().enumerate() {
        let box_area = bbox.area();

        for (col, anchor) in anchors.iter().enumerate() {
            let intersection = bbox.intersection_area(anchor);
            let union = box_area + anchor_areas[col] - intersection;

            if union > 0.0 {
                ious[[row, col]] = intersection / union;
            }
        }
    }

    ious
}
