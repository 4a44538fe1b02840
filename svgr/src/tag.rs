use svg::node::Attributes;
use svg_macro::svg_tag;

use crate::error::AttributeError;
use crate::types::*;

#[svg_tag]
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    SVG(
	#[name("viewBox")]
	ViewBox,
	Width,
	Height,
    ),
    Path(
	#[name("d")]
	Data,
	Fill,
	FillOpacity,
	Opacity,
    ),
    Circle(
	Cx,
	Cy,
	R,
    ),
}

#[derive(Debug)]
pub struct Node {
    pub tag: Tag,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: Tag) -> Node {
	Node {
	    tag,
	    children: Vec::new(),
	}
    }
}
