use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};

use crate::bbox::bounding_box::{read_boxes_from_slice, BoundingBox, BOX_SIZE};
use crate::encoder::{EncodedSample, SampleEncoder};
use crate::error::errors::{Error, InvalidArgumentError};
use crate::processing::iou::iou_matrix;
use crate::processing::matching::match_boxes_with_anchors;

/// CPU encoder turning per-sample ground-truth annotations into fixed-size
/// training targets aligned to an immutable anchor set.
///
/// All fields are fixed at construction, so a shared `&BoxEncoder` can serve
/// concurrent per-sample invocations without synchronization.
#[derive(Debug)]
pub struct BoxEncoder {
    criteria: f32,
    anchors: Vec<BoundingBox>,
    force_match: bool,
}

impl BoxEncoder {
    /// Build an encoder from a similarity threshold and a flat anchor
    /// coordinate list (ltrb, 4 values per anchor).
    ///
    /// `force_match` adds a second matching pass that guarantees every
    /// ground-truth box at least one anchor regardless of threshold; pass
    /// `false` for plain threshold matching.
    pub fn new(criteria: f32, anchors: &[f32], force_match: bool) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&criteria) {
            return Err(InvalidArgumentError::CriteriaOutOfRange { criteria }.into());
        }

        if anchors.is_empty() {
            return Err(InvalidArgumentError::EmptyAnchors.into());
        }

        if anchors.len() % BOX_SIZE != 0 {
            return Err(InvalidArgumentError::AnchorsNotDivisible { len: anchors.len() }.into());
        }

        Ok(BoxEncoder {
            criteria,
            anchors: read_boxes_from_slice(anchors),
            force_match,
        })
    }

    pub fn criteria(&self) -> f32 {
        self.criteria
    }

    pub fn anchors(&self) -> &[BoundingBox] {
        &self.anchors
    }

    fn validate_sample(
        &self,
        boxes: &ArrayView2<f32>,
        labels: &ArrayView1<i32>,
    ) -> Result<(), Error> {
        if boxes.nrows() != labels.len() {
            return Err(InvalidArgumentError::BoxLabelCountMismatch {
                num_boxes: boxes.nrows(),
                num_labels: labels.len(),
            }
            .into());
        }

        if boxes.nrows() > 0 && boxes.ncols() != BOX_SIZE {
            return Err(InvalidArgumentError::BadBoxShape {
                ncols: boxes.ncols(),
            }
            .into());
        }

        Ok(())
    }

    fn read_boxes_from_view(boxes: &ArrayView2<f32>) -> Vec<BoundingBox> {
        boxes
            .outer_iter()
            .map(|row| BoundingBox::new(row[0], row[1], row[2], row[3]))
            .collect()
    }

    /// Fill every output slot with the anchor's own coordinates and the
    /// background label.
    fn write_anchors_to_output(
        &self,
        out_boxes: &mut ArrayViewMut2<f32>,
        out_labels: &mut ArrayViewMut1<i32>,
    ) {
        for (anchor_idx, anchor) in self.anchors.iter().enumerate() {
            let ltrb = anchor.as_ltrb();
            for (col, &coord) in ltrb.iter().enumerate() {
                out_boxes[[anchor_idx, col]] = coord;
            }
            out_labels[anchor_idx] = 0;
        }
    }

    /// Overwrite matched slots with the matched box's coordinates and label.
    fn write_matches_to_output(
        &self,
        matches: &[(usize, usize)],
        boxes: &[BoundingBox],
        labels: &ArrayView1<i32>,
        out_boxes: &mut ArrayViewMut2<f32>,
        out_labels: &mut ArrayViewMut1<i32>,
    ) {
        for &(anchor_idx, box_idx) in matches {
            let ltrb = boxes[box_idx].as_ltrb();
            for (col, &coord) in ltrb.iter().enumerate() {
                out_boxes[[anchor_idx, col]] = coord;
            }
            out_labels[anchor_idx] = labels[box_idx];
        }
    }
}

impl SampleEncoder for BoxEncoder {
    fn num_anchors(&self) -> usize {
        self.anchors.len()
    }

    fn encode_sample(
        &self,
        boxes: ArrayView2<f32>,
        labels: ArrayView1<i32>,
    ) -> Result<EncodedSample, Error> {
        let mut out_boxes = Array2::<f32>::zeros((self.anchors.len(), BOX_SIZE));
        let mut out_labels = Array1::<i32>::zeros(self.anchors.len());

        self.encode_sample_into(
            boxes,
            labels,
            out_boxes.view_mut(),
            out_labels.view_mut(),
        )?;

        Ok(EncodedSample {
            boxes: out_boxes,
            labels: out_labels,
        })
    }

    fn encode_sample_into(
        &self,
        boxes: ArrayView2<f32>,
        labels: ArrayView1<i32>,
        mut out_boxes: ArrayViewMut2<f32>,
        mut out_labels: ArrayViewMut1<i32>,
    ) -> Result<(), Error> {
        self.validate_sample(&boxes, &labels)?;

        if out_boxes.dim() != (self.anchors.len(), BOX_SIZE)
            || out_labels.len() != self.anchors.len()
        {
            return Err(InvalidArgumentError::BadOutputShape {
                num_anchors: self.anchors.len(),
                out_rows: out_boxes.nrows(),
                out_cols: out_boxes.ncols(),
                out_labels: out_labels.len(),
            }
            .into());
        }

        let gt_boxes = Self::read_boxes_from_view(&boxes);

        let ious = iou_matrix(&gt_boxes, &self.anchors);
        let matches = match_boxes_with_anchors(&ious, self.criteria, self.force_match);

        debug!(
            "encoded sample: {} boxes against {} anchors, {} matched",
            gt_boxes.len(),
            self.anchors.len(),
            matches.len()
        );

        self.write_anchors_to_output(&mut out_boxes, &mut out_labels);
        self.write_matches_to_output(&matches, &gt_boxes, &labels, &mut out_boxes, &mut out_labels);

        Ok(())
    }
}
