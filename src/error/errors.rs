#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidArgument(#[from] InvalidArgumentError),
}

#[derive(thiserror::Error, Debug)]
pub enum InvalidArgumentError {
    #[error("expected 0.0 <= criteria <= 1.0, actual value = {criteria}")]
    CriteriaOutOfRange { criteria: f32 },

    #[error("anchors size must be divisible by 4, actual value = {len}")]
    AnchorsNotDivisible { len: usize },

    #[error("anchor set must not be empty")]
    EmptyAnchors,

    #[error("expected one label per box, got {num_boxes} boxes and {num_labels} labels")]
    BoxLabelCountMismatch { num_boxes: usize, num_labels: usize },

    #[error("expected boxes with 4 coordinates per row, actual value = {ncols}")]
    BadBoxShape { ncols: usize },

    #[error(
        "output buffers must be ({num_anchors}, 4) and ({num_anchors},), \
         got ({out_rows}, {out_cols}) and ({out_labels},)"
    )]
    BadOutputShape {
        num_anchors: usize,
        out_rows: usize,
        out_cols: usize,
        out_labels: usize,
    },
}

#[cfg(test)]
mod tests {
    use crate::error::errors::{Error, InvalidArgumentError};

    #[test]
    fn test_invalid_argument_message_carries_value() {
        let err = Error::from(InvalidArgumentError::CriteriaOutOfRange { criteria: 1.5 });
        assert_eq!(
            err.to_string(),
            "expected 0.0 <= criteria <= 1.0, actual value = 1.5"
        );
    }

    #[test]
    fn test_every_error_is_invalid_argument_class() {
        let err = Error::from(InvalidArgumentError::AnchorsNotDivisible { len: 6 });
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
