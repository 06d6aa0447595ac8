use ndarray::Array2;

/// Index and value of the best-overlapping ground-truth box for one anchor.
/// Ties go to the lowest box index, first-seen-wins. The matrix must have at
/// least one row.
pub fn find_best_box_for_anchor(anchor_idx: usize, ious: &Array2<f32>) -> (usize, f32) {
    let column = ious.column(anchor_idx);

    let mut best_idx = 0;
    let mut best_iou = column[0];

    for (box_idx, &iou) in column.iter().enumerate().skip(1) {
        if iou > best_iou {
            best_iou = iou;
            best_idx = box_idx;
        }
    }

    (best_idx, best_iou)
}

/// Assign ground-truth boxes to anchors.
///
/// Each anchor independently takes its maximum-IoU box when that IoU reaches
/// `criteria`, otherwise it stays background. With `force_match`, a second
/// pass assigns every box to its maximum-IoU anchor regardless of threshold
/// (ties to the lowest anchor index; when two boxes claim the same anchor the
/// higher box index keeps it). Pairs come back in anchor-index order, at most
/// one per anchor; one box may be matched to many anchors.
pub fn match_boxes_with_anchors(
    ious: &Array2<f32>,
    criteria: f32,
    force_match: bool,
) -> Vec<(usize, usize)> {
    let (num_boxes, num_anchors) = ious.dim();

    if num_boxes == 0 {
        return Vec::new();
    }

    let mut best_box_for_anchor: Vec<Option<usize>> = vec![None; num_anchors];

    for anchor_idx in 0..num_anchors {
        let (box_idx, best_iou) = find_best_box_for_anchor(anchor_idx, ious);

        if best_iou >= criteria {
            best_box_for_anchor[anchor_idx] = Some(box_idx);
        }
    }

    if force_match {
        for box_idx in 0..num_boxes {
            let row = ious.row(box_idx);

            let mut best_anchor = 0;
            let mut best_iou = row[0];
            for (anchor_idx, &iou) in row.iter().enumerate().skip(1) {
                if iou > best_iou {
                    best_iou = iou;
                    best_anchor = anchor_idx;
                }
            }

            best_box_for_anchor[best_anchor] = Some(box_idx);
        }
    }

    best_box_for_anchor
        .iter()
        .enumerate()
        .filter_map(|(anchor_idx, matched)| matched.map(|box_idx| (anchor_idx, box_idx)))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::bbox::bounding_box::BoundingBox;
    use crate::processing::iou::iou_matrix;
    use crate::processing::matching::{find_best_box_for_anchor, match_boxes_with_anchors};
    use ndarray::array;

    #[test]
    fn test_anchor_takes_highest_iou_box() {
        // anchor 0: box 0 at 0.6, box 1 at 0.3
        let ious = array![[0.6, 0.0], [0.3, 0.0]];
        let matches = match_boxes_with_anchors(&ious, 0.5, false);
        assert_eq!(matches, vec![(0, 0)]);

        // same boxes presented in the opposite order
        let ious = array![[0.3, 0.0], [0.6, 0.0]];
        let matches = match_boxes_with_anchors(&ious, 0.5, false);
        assert_eq!(matches, vec![(0, 1)]);
    }

    #[test]
    fn test_ties_break_to_lowest_box_index() {
        let ious = array![[0.7], [0.7]];
        let (box_idx, best_iou) = find_best_box_for_anchor(0, &ious);
        assert_eq!(box_idx, 0);
        assert_eq!(best_iou, 0.7);
    }

    #[test]
    fn test_below_threshold_stays_background() {
        let ious = array![[0.4, 0.6]];
        let matches = match_boxes_with_anchors(&ious, 0.5, false);
        assert_eq!(matches, vec![(1, 0)]);
    }

    #[test]
    fn test_zero_boxes_produces_no_matches() {
        let ious = ndarray::Array2::<f32>::zeros((0, 3));
        assert!(match_boxes_with_anchors(&ious, 0.5, false).is_empty());
        assert!(match_boxes_with_anchors(&ious, 0.0, true).is_empty());
    }

    #[test]
    fn test_criteria_zero_matches_every_anchor() {
        // no overlap anywhere, but IoU >= 0 always holds
        let ious = ndarray::Array2::<f32>::zeros((2, 3));
        let matches = match_boxes_with_anchors(&ious, 0.0, false);
        assert_eq!(matches, vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_criteria_one_requires_perfect_overlap() {
        let ious = array![[1.0, 0.999]];
        let matches = match_boxes_with_anchors(&ious, 1.0, false);
        assert_eq!(matches, vec![(0, 0)]);
    }

    #[test]
    fn test_one_box_may_match_many_anchors() {
        let ious = array![[0.8, 0.6, 0.1]];
        let matches = match_boxes_with_anchors(&ious, 0.5, false);
        assert_eq!(matches, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_force_match_gives_every_box_an_anchor() {
        let boxes = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(100.0, 100.0, 110.0, 110.0),
        ];
        let anchors = vec![
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(20.0, 20.0, 30.0, 30.0),
            BoundingBox::new(99.0, 99.0, 111.0, 111.0),
        ];
        let ious = iou_matrix(&boxes, &anchors);

        // box 1 overlaps anchor 2 below the 0.9 threshold; without the
        // forced pass it would contribute no positive anchor
        let matches = match_boxes_with_anchors(&ious, 0.9, false);
        assert_eq!(matches, vec![(0, 0)]);

        let matches = match_boxes_with_anchors(&ious, 0.9, true);
        assert_eq!(matches, vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn test_force_match_conflict_keeps_higher_box_index() {
        // both boxes overlap anchor 0 best; the later box wins it
        let ious = array![[0.4, 0.1], [0.3, 0.05]];
        let matches = match_boxes_with_anchors(&ious, 1.0, true);
        assert_eq!(matches, vec![(0, 1)]);
    }
}
