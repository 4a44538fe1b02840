//! Converts svg icons into IconVG.
//!
//! ```ignore
//! let bytes = svg2ivg::from_file("icon.svg", &ConverterOptions::default())?;
//! ```
//!
//! Paths with a plain fill and circles are supported. Path data may use every
//! command except elliptical arcs; strokes, gradients and transforms are
//! ignored.

mod convert;
pub mod emitter;
mod error;
pub mod geometry;
pub mod iconvg;
pub mod opacity;
pub mod sink;
pub mod tokenizer;

pub use convert::{
    ConverterOptions, DEFAULT_OUTPUT_SIZE, ExclusionRule,
    convert, default_exclude_paths, from_content, from_document, from_file,
};
pub use error::{Error, Result};
pub use sink::PathSink;
pub use svgr::{Circle, Document, ShapePath, ViewBox};
