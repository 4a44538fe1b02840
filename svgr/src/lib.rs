//! Reads the drawable parts of an svg file into a [`Document`].
//!
//! Only the root `<svg>` element and its direct `<path>` and `<circle>`
//! children are kept. Groups, definitions and every other element are skipped
//! together with whatever they contain.

mod document;
mod error;
mod parse;
pub mod tag;
pub mod types;

use std::path::Path;

use svg::parser::Event;

pub use document::{Circle, Document, ShapePath};
pub use error::{AttributeError, ReadError, ValidationError};
pub use types::ViewBox;

pub fn read(content: &str) -> Result<Document, ReadError> {
    let parser = svg::read(content).map_err(|e| ReadError::Markup(e.to_string()))?;
    let events: Vec<Event> = parser.collect();

    parse::parse_svg(&events)
}

pub fn read_bytes(content: &[u8]) -> Result<Document, ReadError> {
    read(std::str::from_utf8(content)?)
}

pub fn open<P: AsRef<Path>>(path: P) -> Result<Document, ReadError> {
    let path = path.as_ref();
    let mut content = String::new();
    let svg_doc = svg::open(path, &mut content).map_err(|source| ReadError::Io {
	path: path.to_path_buf(),
	source,
    })?;
    let events: Vec<Event> = svg_doc.collect();

    parse::parse_svg(&events)
}
