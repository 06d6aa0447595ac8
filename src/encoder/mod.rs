pub mod box_encoder;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2};

use crate::error::errors::Error;

/// One encoded training target: one box row and one label per anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSample {
    pub boxes: Array2<f32>,
    pub labels: Array1<i32>,
}

/// The encode-one-sample capability shared by backend variants. The CPU
/// implementation is [`box_encoder::BoxEncoder`]; a GPU variant implements
/// the same contract with the per-anchor scan parallelized.
pub trait SampleEncoder {
    fn num_anchors(&self) -> usize;

    /// Encode one sample into freshly allocated output tensors.
    fn encode_sample(
        &self,
        boxes: ArrayView2<f32>,
        labels: ArrayView1<i32>,
    ) -> Result<EncodedSample, Error>;

    /// Encode one sample into caller-owned buffers of shape
    /// (num_anchors, 4) and (num_anchors,). Either both buffers are written
    /// in full or the call fails before touching them.
    fn encode_sample_into(
        &self,
        boxes: ArrayView2<f32>,
        labels: ArrayView1<i32>,
        out_boxes: ArrayViewMut2<f32>,
        out_labels: ArrayViewMut1<i32>,
    ) -> Result<(), Error>;
}
