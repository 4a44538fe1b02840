use std::path::Path;

use log::debug;

use crate::emitter::Emitter;
use crate::error::{Error, Result};
use crate::geometry::CanvasTransform;
use crate::iconvg::{Encoder, Metadata, Rectangle};
use crate::opacity::OpacityRegisters;
use crate::sink::PathSink;
use crate::tokenizer::Tokenizer;
use svgr::{Circle, Document, ShapePath};

pub const DEFAULT_OUTPUT_SIZE: f32 = 48.0;

///Drops paths whose data and fill both match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    pub d: String,
    pub fill: String,
}

impl ExclusionRule {
    pub fn new(d: &str, fill: &str) -> Self {
	ExclusionRule { d: String::from(d), fill: String::from(fill) }
    }

    pub fn matches(&self, path: &ShapePath) -> bool {
	path.d == self.d && path.fill == self.fill
    }
}

///The transparent full-canvas rectangles icon sets commonly start with.
pub fn default_exclude_paths() -> Vec<ExclusionRule> {
    vec![
	ExclusionRule::new("M0 0h24v24H0z", "none"),
	ExclusionRule::new("M0 0H24V24H0z", "none"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConverterOptions {
    ///Side length of the square output canvas.
    pub output_size: f32,
    pub exclude_paths: Vec<ExclusionRule>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
	ConverterOptions {
	    output_size: DEFAULT_OUTPUT_SIZE,
	    exclude_paths: default_exclude_paths(),
	}
    }
}

impl ConverterOptions {
    pub fn new() -> Self {
	ConverterOptions::default()
    }

    pub fn with_output_size(mut self, size: f32) -> Self {
	self.output_size = size;
	self
    }

    ///Replaces the exclusion rules.
    pub fn with_exclude_paths(mut self, rules: Vec<ExclusionRule>) -> Self {
	self.exclude_paths = rules;
	self
    }

    ///Adds an exclusion rule.
    pub fn with_exclude_path(mut self, rule: ExclusionRule) -> Self {
	self.exclude_paths.push(rule);
	self
    }

    fn is_excluded(&self, path: &ShapePath) -> bool {
	self.exclude_paths.iter().any(|rule| rule.matches(path))
    }
}

///Draws one path with `circles` appended to it.
fn emit_pass<S: PathSink>(sink: &mut S, transform: &CanvasTransform, registers: &mut OpacityRegisters,
			  path: Option<&ShapePath>, circles: &[Circle]) -> Result<()> {
    let adj = match path {
	Some(p) => registers.resolve(sink, p.effective_opacity())?,
	None => 0,
    };
    let mut emitter = Emitter::new(sink, transform, adj);

    if let Some(p) = path {
	for token in Tokenizer::new(&p.d) {
	    emitter.token(&token?)?;
	}
    }

    for circle in circles {
	emitter.circle(circle)?;
    }

    emitter.finish()?;
    Ok(())
}

///Converts `document` into calls on `sink`.
///
///Paths are drawn in document order, skipping excluded ones. The circles are
///appended to the first drawn path, or drawn on their own if there is none.
pub fn convert<S: PathSink>(mut document: Document, options: &ConverterOptions, sink: &mut S) -> Result<()> {
    if !(options.output_size > 0.0) {
	return Err(Error::InvalidOutputSize(options.output_size));
    }
    let canvas = document.validate()?;

    let transform = CanvasTransform::new(&canvas, options.output_size);
    debug!("canvas {:?} scaled to {}: {:?}", canvas, options.output_size, transform);

    // Kept as is for compatibility with existing output, even though it
    // doesn't describe the scaled canvas.
    let view_box = Rectangle::new(canvas.min_x - canvas.width, canvas.min_y - canvas.height,
				  canvas.width, canvas.height);
    sink.reset(&Metadata { view_box })?;

    let mut registers = OpacityRegisters::new();
    let mut circles = Some(document.circles.as_slice());

    for path in document.paths.iter() {
	if options.is_excluded(path) {
	    debug!("excluding path {:?}", path.d);
	    continue;
	}

	let tail = circles.take().unwrap_or(&[]);
	emit_pass(sink, &transform, &mut registers, Some(path), tail)?;
    }

    if let Some(tail) = circles {
	if !tail.is_empty() {
	    emit_pass(sink, &transform, &mut registers, None, tail)?;
	}
    }

    Ok(())
}

pub fn from_document(document: Document, options: &ConverterOptions) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new();
    convert(document, options, &mut encoder)?;
    Ok(encoder.bytes()?)
}

///Converts svg markup into IconVG bytes.
pub fn from_content(content: &[u8], options: &ConverterOptions) -> Result<Vec<u8>> {
    from_document(svgr::read_bytes(content)?, options)
}

pub fn from_file<P: AsRef<Path>>(path: P, options: &ConverterOptions) -> Result<Vec<u8>> {
    from_document(svgr::open(path)?, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iconvg::{Color, FIRST_PALETTE_COLOR, TRANSPARENT};
    use crate::sink::recording::{Call, RecordingSink};
    use crate::tokenizer::PathDataError;
    use svgr::{ValidationError, ViewBox};

    fn document(paths: Vec<ShapePath>, circles: Vec<Circle>) -> Document {
	Document {
	    view_box: Some(ViewBox::new(0.0, 0.0, 24.0, 24.0)),
	    paths,
	    circles,
	    ..Document::default()
	}
    }

    fn record(doc: Document, options: &ConverterOptions) -> Result<Vec<Call>> {
	let mut sink = RecordingSink::default();
	convert(doc, options, &mut sink)?;
	Ok(sink.calls)
    }

    #[test]
    fn reset_uses_the_canvas_rectangle() {
	let calls = record(document(vec![ShapePath::new("M4 4h1", "")], vec![]), &ConverterOptions::default()).unwrap();

	assert_eq!(calls[0], Call::Reset(Metadata { view_box: Rectangle::new(-24.0, -24.0, 24.0, 24.0) }));
    }

    #[test]
    fn excluded_paths_produce_no_calls() {
	let doc = document(vec![ShapePath::new("M0 0h24v24H0z", "none")], vec![]);
	let calls = record(doc, &ConverterOptions::default()).unwrap();

	assert_eq!(calls.len(), 1);

	let doc = document(vec![ShapePath::new("M0 0h24v24H0z", "none")], vec![]);
	let calls = record(doc, &ConverterOptions::new().with_exclude_paths(vec![])).unwrap();
	assert_eq!(calls.len(), 6);
    }

    #[test]
    fn exclusion_needs_both_fields() {
	let options = ConverterOptions::new().with_exclude_path(ExclusionRule::new("M1 1h2", "red"));
	let path = ShapePath::new("M1 1h2", "red");

	assert!(options.is_excluded(&path));
	assert!(!options.is_excluded(&ShapePath::new("M1 1h2", "none")));
	assert!(!options.is_excluded(&ShapePath::new("M1 1h3", "red")));
	assert_eq!(options.exclude_paths.len(), 3);
    }

    #[test]
    fn circles_follow_the_first_drawn_path() {
	let doc = document(vec![
	    ShapePath::new("M0 0h24v24H0z", "none"),
	    ShapePath::new("M4 4h2", ""),
	    ShapePath::new("M8 8h2", ""),
	], vec![Circle::new(12.0, 12.0, 1.0)]);
	let calls = record(doc, &ConverterOptions::default()).unwrap();

	let ends: Vec<usize> = calls.iter().enumerate()
	    .filter(|(_, c)| **c == Call::ClosePathEndPath)
	    .map(|(i, _)| i)
	    .collect();
	assert_eq!(ends.len(), 2);

	let arcs = calls[..ends[0]].iter().filter(|c| matches!(c, Call::Draw("rel_arc_to", _))).count();
	assert_eq!(arcs, 2);
	assert_eq!(calls[ends[0] + 1], Call::StartPath(0, -8.0, -8.0));
    }

    #[test]
    fn circles_alone_get_their_own_pass() {
	let doc = document(vec![ShapePath::new("M0 0H24V24H0z", "none")], vec![Circle::new(12.0, 12.0, 10.0)]);
	let calls = record(doc, &ConverterOptions::default()).unwrap();

	assert_eq!(calls[1], Call::StartPath(0, -20.0, 0.0));
	assert_eq!(calls.len(), 5);
    }

    #[test]
    fn opacities_share_registers() {
	let mut a = ShapePath::new("M1 1h1", "");
	a.opacity = Some(0.5);
	let mut b = ShapePath::new("M2 2h1", "");
	b.fill_opacity = Some(0.5);
	let calls = record(document(vec![a, b], vec![]), &ConverterOptions::default()).unwrap();

	let set = Call::SetColorRegister(1, false, Color::blend(128, TRANSPARENT, FIRST_PALETTE_COLOR));
	assert_eq!(calls.iter().filter(|c| **c == set).count(), 1);
	assert_eq!(calls[1], set);
	assert_eq!(calls[2], Call::StartPath(1, -22.0, -22.0));
	assert_eq!(calls[5], Call::StartPath(1, -20.0, -20.0));
    }

    #[test]
    fn output_size_must_be_positive() {
	let doc = document(vec![ShapePath::new("M1 1h1", "")], vec![]);
	let options = ConverterOptions::new().with_output_size(0.0);

	assert!(matches!(record(doc, &options), Err(Error::InvalidOutputSize(_))));
    }

    #[test]
    fn validation_happens_before_any_call() {
	let mut sink = RecordingSink::default();
	let doc = Document { width: Some(24.0), ..Document::default() };

	assert!(matches!(convert(doc, &ConverterOptions::default(), &mut sink),
			 Err(Error::Validation(ValidationError::NoShapes))));
	assert!(sink.calls.is_empty());
    }

    #[test]
    fn arcs_abort_the_conversion() {
	let doc = document(vec![ShapePath::new("M1 1h1", ""), ShapePath::new("M0 0a2 2 0 0 1 4 4", "")], vec![]);

	assert!(matches!(record(doc, &ConverterOptions::default()),
			 Err(Error::PathData(PathDataError::UnsupportedOperator { operator: 'a', .. }))));
    }
}
