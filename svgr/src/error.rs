use std::{fmt, io, path::PathBuf, str::Utf8Error};

use thiserror::Error;

///A markup attribute whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid value {value:?} for attribute `{name}` of <{tag}>: {reason}")]
pub struct AttributeError {
    pub tag: String,
    pub name: String,
    pub value: String,
    pub reason: String,
}

impl AttributeError {
    pub fn new(tag: &str, name: &str, value: &str, reason: &dyn fmt::Display) -> Self {
	AttributeError {
	    tag: String::from(tag),
	    name: String::from(name),
	    value: String::from(value),
	    reason: reason.to_string(),
	}
    }
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
	path: PathBuf,
	source: io::Error,
    },
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("malformed markup: {0}")]
    Markup(String),
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    #[error("no <svg> root element")]
    MissingRoot,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no viewBox and no usable width/height")]
    MissingCanvas,
    #[error("no path or circle found in the SVG file")]
    NoShapes,
}
