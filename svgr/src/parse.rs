use std::slice::Iter;

use log::{debug, trace};
use svg::node::element::tag;
use svg::parser::Event;

use crate::document::Document;
use crate::error::ReadError;
use crate::tag::{Node, Tag};

///Builds the nodes of one nesting level, consuming events up to the end tag
///closing it. Elements that aren't supported are dropped along with their
///children.
fn parse_node(events: &mut Iter<Event>) -> Result<Vec<Node>, ReadError> {
    let mut siblings = Vec::new();

    while let Some(event) = events.next() {
	let (name, kind, attributes) = match event {
	    Event::Tag(name, kind, attributes) => (*name, kind, attributes),
	    Event::Error(e) => return Err(ReadError::Markup(e.to_string())),
	    _ => continue,
	};

	if *kind == tag::Type::End {
	    return Ok(siblings);
	}

	let node = match Tag::from_tag(name, attributes)? {
	    Some(tag) => Some(Node::new(tag)),
	    None => {
		trace!("skipping unsupported <{}>", name);
		None
	    },
	};

	let sibling = match kind {
	    tag::Type::Start => {
		let mut children = parse_node(events)?;
		node.map(|mut n| {
		    n.children.append(&mut children);
		    n
		})
	    },
	    _ => node,
	};

	if let Some(it) = sibling {
	    siblings.push(it);
	}
    }

    Ok(siblings)
}

pub fn parse_svg(events: &[Event]) -> Result<Document, ReadError> {
    let mut events_iter = events.iter();
    let nodes = parse_node(&mut events_iter)?;

    let root = nodes.into_iter()
	.find(|node| matches!(node.tag, Tag::SVG(_)))
	.ok_or(ReadError::MissingRoot)?;

    let document = Document::from_root(root)?;
    debug!("read {} paths and {} circles", document.paths.len(), document.circles.len());

    Ok(document)
}
