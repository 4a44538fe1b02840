use log::debug;

use crate::error::{ReadError, ValidationError};
use crate::tag::{Node, Tag, attributes};
use crate::types::ViewBox;

///A filled `<path>` element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapePath {
    pub d: String,
    pub fill: String,
    pub fill_opacity: Option<f32>,
    pub opacity: Option<f32>,
}

impl ShapePath {
    pub fn new(d: &str, fill: &str) -> Self {
	ShapePath {
	    d: String::from(d),
	    fill: String::from(fill),
	    ..ShapePath::default()
	}
    }

    ///`opacity` wins over `fill-opacity`, without either the path is opaque.
    pub fn effective_opacity(&self) -> f32 {
	self.opacity.or(self.fill_opacity).unwrap_or(1.0)
    }
}

impl From<attributes::Path> for ShapePath {
    fn from(path: attributes::Path) -> Self {
	ShapePath {
	    d: path.data.unwrap_or_default(),
	    fill: path.fill.unwrap_or_default(),
	    fill_opacity: path.fill_opacity,
	    opacity: path.opacity,
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl Circle {
    pub fn new(cx: f32, cy: f32, r: f32) -> Self {
	Circle { cx, cy, r }
    }
}

impl From<attributes::Circle> for Circle {
    fn from(circle: attributes::Circle) -> Self {
	Circle {
	    cx: circle.cx.unwrap_or_default(),
	    cy: circle.cy.unwrap_or_default(),
	    r: circle.r.unwrap_or_default(),
	}
    }
}

///The drawable content of an svg file: the root element's size and its
///direct `<path>` and `<circle>` children, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub view_box: Option<ViewBox>,
    pub paths: Vec<ShapePath>,
    pub circles: Vec<Circle>,
}

impl Document {
    pub fn from_root(root: Node) -> Result<Document, ReadError> {
	let svg = match root.tag {
	    Tag::SVG(svg) => svg,
	    _ => return Err(ReadError::MissingRoot),
	};

	let mut document = Document {
	    width: svg.width.map(|w| w.0),
	    height: svg.height.map(|h| h.0),
	    view_box: svg.view_box,
	    ..Document::default()
	};

	for child in root.children {
	    if !child.children.is_empty() {
		debug!("ignoring {} elements nested in <{}>", child.children.len(), child.tag.name());
	    }

	    match child.tag {
		Tag::Path(path) => document.paths.push(path.into()),
		Tag::Circle(circle) => document.circles.push(circle.into()),
		Tag::SVG(_) => debug!("ignoring nested <svg>"),
	    }
	}

	Ok(document)
    }

    ///Makes the document ready for conversion and returns its canvas.
    ///
    ///Without a usable `viewBox` the canvas is `0 0 width height`.
    ///Commas in path data are replaced by spaces.
    pub fn validate(&mut self) -> Result<ViewBox, ValidationError> {
	let canvas = match self.view_box {
	    Some(vb) if !vb.is_empty() => vb,
	    _ => ViewBox::new(0.0, 0.0, self.width.unwrap_or(0.0), self.height.unwrap_or(0.0)),
	};
	if !(canvas.width > 0.0) {
	    return Err(ValidationError::MissingCanvas);
	}
	self.view_box = Some(canvas);

	if self.paths.is_empty() && self.circles.is_empty() {
	    return Err(ValidationError::NoShapes);
	}

	for path in self.paths.iter_mut() {
	    path.d = path.d.replace(',', " ");
	}

	Ok(canvas)
    }
}
