use thiserror::Error;

use crate::iconvg::EncodeError;
use crate::tokenizer::PathDataError;
use svgr::{ReadError, ValidationError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read svg: {0}")]
    Read(#[from] ReadError),
    #[error("invalid svg: {0}")]
    Validation(#[from] ValidationError),
    #[error("output size must be positive, got {0}")]
    InvalidOutputSize(f32),
    #[error("invalid path data: {0}")]
    PathData(#[from] PathDataError),
    #[error("more than {0} distinct opacities")]
    TooManyOpacities(usize),
    #[error("failed to encode: {0}")]
    Encode(#[from] EncodeError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
