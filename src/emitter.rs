//! Turns path tokens and circles into sink calls, one pass at a time.

use log::warn;

use crate::geometry::{Axis, CanvasTransform};
use crate::iconvg::EncodeError;
use crate::sink::PathSink;
use crate::tokenizer::{Operator, Token};
use svgr::Circle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    NotStarted,
    Started,
}

///Emits one pass: a single path, opened by its first point and closed by
///[`Emitter::finish`].
pub struct Emitter<'a, S> {
    sink: &'a mut S,
    transform: &'a CanvasTransform,
    adj: u8,
    state: PathState,
}

impl<'a, S: PathSink> Emitter<'a, S> {
    pub fn new(sink: &'a mut S, transform: &'a CanvasTransform, adj: u8) -> Self {
	Emitter {
	    sink,
	    transform,
	    adj,
	    state: PathState::NotStarted,
	}
    }

    pub fn state(&self) -> PathState {
	self.state
    }

    fn start(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	self.sink.start_path(self.adj, x, y)?;
	self.state = PathState::Started;
	Ok(())
    }

    ///Token arguments in canvas space.
    fn normalize(&self, token: &Token) -> [f32; 6] {
	let mut out = [0.0; 6];

	for (i, (o, &v)) in out.iter_mut().zip(token.args()).enumerate() {
	    *o = if token.relative {
		self.transform.scale_length(v)
	    } else {
		let axis = match token.operator {
		    Operator::HorizontalLineTo => Axis::X,
		    Operator::VerticalLineTo => Axis::Y,
		    _ => Axis::of_operand(i),
		};
		self.transform.project(v, axis)
	    };
	}

	out
    }

    fn move_to(&mut self, token: &Token) -> Result<(), EncodeError> {
	match (self.state, token.relative) {
	    (PathState::NotStarted, _) => {
		// Nothing drawn yet, so the pen is at the origin and a relative
		// moveto lands on the same point as an absolute one.
		let a = self.normalize(&Token::new(Operator::MoveTo, false, token.args()));
		self.start(a[0], a[1])
	    },
	    (PathState::Started, false) => {
		let a = self.normalize(token);
		self.sink.close_path_abs_move_to(a[0], a[1])
	    },
	    (PathState::Started, true) => {
		let a = self.normalize(token);
		self.sink.close_path_rel_move_to(a[0], a[1])
	    },
	}
    }

    pub fn token(&mut self, token: &Token) -> Result<(), EncodeError> {
	match token.operator {
	    Operator::ClosePath => return Ok(()),
	    Operator::MoveTo => return self.move_to(token),
	    _ => {},
	}

	if self.state == PathState::NotStarted {
	    warn!("path data does not begin with a moveto, starting at the origin");
	    let (x, y) = (self.transform.project(0.0, Axis::X), self.transform.project(0.0, Axis::Y));
	    self.start(x, y)?;
	}

	let a = self.normalize(token);
	let sink = &mut *self.sink;

	match (token.operator, token.relative) {
	    (Operator::LineTo, false) => sink.abs_line_to(a[0], a[1]),
	    (Operator::LineTo, true) => sink.rel_line_to(a[0], a[1]),
	    (Operator::HorizontalLineTo, false) => sink.abs_h_line_to(a[0]),
	    (Operator::HorizontalLineTo, true) => sink.rel_h_line_to(a[0]),
	    (Operator::VerticalLineTo, false) => sink.abs_v_line_to(a[0]),
	    (Operator::VerticalLineTo, true) => sink.rel_v_line_to(a[0]),
	    (Operator::SmoothQuadTo, false) => sink.abs_smooth_quad_to(a[0], a[1]),
	    (Operator::SmoothQuadTo, true) => sink.rel_smooth_quad_to(a[0], a[1]),
	    (Operator::QuadTo, false) => sink.abs_quad_to(a[0], a[1], a[2], a[3]),
	    (Operator::QuadTo, true) => sink.rel_quad_to(a[0], a[1], a[2], a[3]),
	    (Operator::SmoothCubeTo, false) => sink.abs_smooth_cube_to(a[0], a[1], a[2], a[3]),
	    (Operator::SmoothCubeTo, true) => sink.rel_smooth_cube_to(a[0], a[1], a[2], a[3]),
	    (Operator::CubeTo, false) => sink.abs_cube_to(a[0], a[1], a[2], a[3], a[4], a[5]),
	    (Operator::CubeTo, true) => sink.rel_cube_to(a[0], a[1], a[2], a[3], a[4], a[5]),
	    (Operator::MoveTo, _) | (Operator::ClosePath, _) => Ok(()),
	}
    }

    ///A circle as two half turns from its leftmost point.
    pub fn circle(&mut self, circle: &Circle) -> Result<(), EncodeError> {
	let cx = self.transform.project(circle.cx, Axis::X);
	let cy = self.transform.project(circle.cy, Axis::Y);
	let r = self.transform.scale_length(circle.r);

	match self.state {
	    PathState::NotStarted => self.start(cx - r, cy)?,
	    PathState::Started => self.sink.close_path_abs_move_to(cx - r, cy)?,
	}

	self.sink.rel_arc_to(r, r, 0.0, false, true, 2.0 * r, 0.0)?;
	self.sink.rel_arc_to(r, r, 0.0, false, true, -2.0 * r, 0.0)
    }

    ///Ends the pass. A pass that never drew anything leaves no trace: the
    ///sink is still in styling mode then, where closing a path is an error.
    pub fn finish(self) -> Result<(), EncodeError> {
	match self.state {
	    PathState::Started => self.sink.close_path_end_path(),
	    PathState::NotStarted => Ok(()),
	}
    }
}
