//! IconVG encoding.
//!
//! The encoder is a [`PathSink`] writing the binary format: a magic
//! identifier, the metadata chunks and then the styling and drawing opcodes.
//! Consecutive drawing operations of the same kind share one opcode.

mod buffer;
mod color;

use log::trace;
use thiserror::Error;

pub use color::{Color, FIRST_PALETTE_COLOR, TRANSPARENT};

use crate::sink::PathSink;
use buffer::Buffer;

pub const MAGIC: [u8; 4] = [0x89, 0x49, 0x56, 0x47];

const MID_VIEW_BOX: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rectangle {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
	Rectangle { min: [min_x, min_y], max: [max_x, max_y] }
    }
}

pub const DEFAULT_VIEW_BOX: Rectangle = Rectangle { min: [-32.0, -32.0], max: [32.0, 32.0] };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metadata {
    pub view_box: Rectangle,
}

impl Default for Metadata {
    fn default() -> Self {
	Metadata { view_box: DEFAULT_VIEW_BOX }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("invalid selector adjustment {0}")]
    InvalidSelectorAdjustment(u8),
    #[error("invalid incrementing adjustment {0}")]
    InvalidIncrementingAdjustment(u8),
    #[error("invalid color {0:?}")]
    InvalidColor(Color),
    #[error("drawing operation in styling mode")]
    DrawingOpInStylingMode,
    #[error("styling operation in drawing mode")]
    StylingOpInDrawingMode,
    #[error("path is not terminated")]
    UnterminatedPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Initial,
    Styling,
    Drawing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawOp {
    Line,
    SmoothQuad,
    Quad,
    SmoothCube,
    Cube,
    Arc,
}

impl DrawOp {
    fn opcode(self, relative: bool) -> u8 {
	match (self, relative) {
	    (DrawOp::Line, false) => 0x00,
	    (DrawOp::Line, true) => 0x10,
	    (DrawOp::SmoothQuad, false) => 0x20,
	    (DrawOp::SmoothQuad, true) => 0x30,
	    (DrawOp::Quad, false) => 0x40,
	    (DrawOp::Quad, true) => 0x50,
	    (DrawOp::SmoothCube, false) => 0x60,
	    (DrawOp::SmoothCube, true) => 0x70,
	    (DrawOp::Cube, false) => 0x80,
	    (DrawOp::Cube, true) => 0xa0,
	    (DrawOp::Arc, false) => 0xc0,
	    (DrawOp::Arc, true) => 0xd0,
	}
    }

    fn arg_count(self) -> usize {
	match self {
	    DrawOp::Line | DrawOp::SmoothQuad => 2,
	    DrawOp::Quad | DrawOp::SmoothCube => 4,
	    DrawOp::Cube | DrawOp::Arc => 6,
	}
    }

    fn max_repeats(self) -> usize {
	match self {
	    DrawOp::Cube => 32,
	    _ => 16,
	}
    }
}

const MAX_ADJUSTMENT: u8 = 6;

///Writes IconVG bytes.
///
///Using the encoder without calling `reset` first encodes the default
///metadata.
#[derive(Debug)]
pub struct Encoder {
    buf: Buffer,
    mode: Mode,
    pending: Option<(DrawOp, bool)>,
    pending_args: Vec<f32>,
}

impl Default for Encoder {
    fn default() -> Self {
	Encoder::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
	Encoder {
	    buf: Buffer::new(),
	    mode: Mode::Initial,
	    pending: None,
	    pending_args: Vec::new(),
	}
    }

    ///The encoded image. Fails while a path is still open.
    pub fn bytes(&mut self) -> Result<Vec<u8>, EncodeError> {
	self.initialize();
	if self.mode == Mode::Drawing {
	    return Err(EncodeError::UnterminatedPath);
	}

	Ok(self.buf.as_slice().to_vec())
    }

    fn initialize(&mut self) {
	if self.mode == Mode::Initial {
	    self.write_header(&Metadata::default());
	}
    }

    fn write_header(&mut self, metadata: &Metadata) {
	self.buf.clear();
	self.buf.extend(&MAGIC);

	if metadata.view_box == DEFAULT_VIEW_BOX {
	    self.buf.encode_natural(0);
	} else {
	    let mut chunk = Buffer::new();
	    chunk.encode_natural(MID_VIEW_BOX);
	    let vb = metadata.view_box;
	    for &v in &[vb.min[0], vb.min[1], vb.max[0], vb.max[1]] {
		chunk.encode_coordinate(v);
	    }

	    self.buf.encode_natural(1);
	    self.buf.encode_natural(chunk.len() as u32);
	    self.buf.extend(chunk.as_slice());
	}

	self.mode = Mode::Styling;
	self.pending = None;
	self.pending_args.clear();
    }

    fn check_styling(&mut self) -> Result<(), EncodeError> {
	self.initialize();
	match self.mode {
	    Mode::Drawing => Err(EncodeError::StylingOpInDrawingMode),
	    _ => Ok(()),
	}
    }

    fn check_drawing(&mut self) -> Result<(), EncodeError> {
	self.initialize();
	match self.mode {
	    Mode::Drawing => Ok(()),
	    _ => Err(EncodeError::DrawingOpInStylingMode),
	}
    }

    ///Queues a repeatable drawing operation, writing out the previous ones
    ///if they were of another kind.
    fn draw(&mut self, op: DrawOp, relative: bool, args: &[f32]) -> Result<(), EncodeError> {
	self.check_drawing()?;
	if self.pending != Some((op, relative)) {
	    self.flush();
	    self.pending = Some((op, relative));
	}

	self.pending_args.extend_from_slice(args);
	Ok(())
    }

    fn flush(&mut self) {
	let (op, relative) = match self.pending.take() {
	    Some(pending) => pending,
	    None => return,
	};
	let args = std::mem::take(&mut self.pending_args);
	let n = op.arg_count();

	for run in args.chunks(n * op.max_repeats()) {
	    let repeats = run.len() / n;
	    trace!("opcode {:#04x} x{}", op.opcode(relative), repeats);
	    self.buf.push(op.opcode(relative) + (repeats - 1) as u8);

	    for segment in run.chunks(n) {
		if op == DrawOp::Arc {
		    self.buf.encode_coordinate(segment[0]);
		    self.buf.encode_coordinate(segment[1]);
		    self.buf.encode_zero_to_one(segment[2]);
		    self.buf.encode_natural(segment[3] as u32);
		    self.buf.encode_coordinate(segment[4]);
		    self.buf.encode_coordinate(segment[5]);
		} else {
		    for &v in segment {
			self.buf.encode_coordinate(v);
		    }
		}
	    }
	}

	self.pending_args = args;
	self.pending_args.clear();
    }

    fn single(&mut self, opcode: u8, args: &[f32]) -> Result<(), EncodeError> {
	self.check_drawing()?;
	self.flush();
	self.buf.push(opcode);
	for &v in args {
	    self.buf.encode_coordinate(v);
	}

	Ok(())
    }

    fn arc_flags(large_arc: bool, sweep: bool) -> f32 {
	(large_arc as u8 | (sweep as u8) << 1) as f32
    }
}

impl PathSink for Encoder {
    fn reset(&mut self, metadata: &Metadata) -> Result<(), EncodeError> {
	self.write_header(metadata);
	Ok(())
    }

    fn set_color_register(&mut self, adj: u8, incr: bool, color: Color) -> Result<(), EncodeError> {
	self.check_styling()?;

	let adj = if incr {
	    if adj != 0 {
		return Err(EncodeError::InvalidIncrementingAdjustment(adj));
	    }
	    7
	} else if adj > MAX_ADJUSTMENT {
	    return Err(EncodeError::InvalidSelectorAdjustment(adj));
	} else {
	    adj
	};

	if !color.is_valid() {
	    return Err(EncodeError::InvalidColor(color));
	}

	if let Some(c) = color.encode_1() {
	    self.buf.push(0x80 + adj);
	    self.buf.push(c);
	} else if let Some(c) = color.encode_2() {
	    self.buf.push(0x88 + adj);
	    self.buf.extend(&c);
	} else if let Some(c) = color.encode_3() {
	    self.buf.push(0x90 + adj);
	    self.buf.extend(&c);
	} else if let Some(c) = color.encode_4() {
	    self.buf.push(0x98 + adj);
	    self.buf.extend(&c);
	} else if let Color::Blend { t, c0, c1 } = color {
	    self.buf.push(0xa0 + adj);
	    self.buf.extend(&[t, c0, c1]);
	}

	Ok(())
    }

    fn start_path(&mut self, adj: u8, x: f32, y: f32) -> Result<(), EncodeError> {
	self.check_styling()?;
	if adj > MAX_ADJUSTMENT {
	    return Err(EncodeError::InvalidSelectorAdjustment(adj));
	}

	self.buf.push(0xc0 + adj);
	self.buf.encode_coordinate(x);
	self.buf.encode_coordinate(y);
	self.mode = Mode::Drawing;
	Ok(())
    }

    fn close_path_end_path(&mut self) -> Result<(), EncodeError> {
	self.single(0xe1, &[])?;
	self.mode = Mode::Styling;
	Ok(())
    }

    fn close_path_abs_move_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	self.single(0xe2, &[x, y])
    }

    fn close_path_rel_move_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	self.single(0xe3, &[x, y])
    }

    fn abs_h_line_to(&mut self, x: f32) -> Result<(), EncodeError> {
	self.single(0xe6, &[x])
    }

    fn rel_h_line_to(&mut self, x: f32) -> Result<(), EncodeError> {
	self.single(0xe7, &[x])
    }

    fn abs_v_line_to(&mut self, y: f32) -> Result<(), EncodeError> {
	self.single(0xe8, &[y])
    }

    fn rel_v_line_to(&mut self, y: f32) -> Result<(), EncodeError> {
	self.single(0xe9, &[y])
    }

    fn abs_line_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::Line, false, &[x, y])
    }

    fn rel_line_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::Line, true, &[x, y])
    }

    fn abs_smooth_quad_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::SmoothQuad, false, &[x, y])
    }

    fn rel_smooth_quad_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::SmoothQuad, true, &[x, y])
    }

    fn abs_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::Quad, false, &[x1, y1, x, y])
    }

    fn rel_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::Quad, true, &[x1, y1, x, y])
    }

    fn abs_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::SmoothCube, false, &[x2, y2, x, y])
    }

    fn rel_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::SmoothCube, true, &[x2, y2, x, y])
    }

    fn abs_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::Cube, false, &[x1, y1, x2, y2, x, y])
    }

    fn rel_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	self.draw(DrawOp::Cube, true, &[x1, y1, x2, y2, x, y])
    }

    fn abs_arc_to(&mut self, rx: f32, ry: f32, x_axis_rotation: f32, large_arc: bool, sweep: bool, x: f32, y: f32) -> Result<(), EncodeError> {
	let flags = Encoder::arc_flags(large_arc, sweep);
	self.draw(DrawOp::Arc, false, &[rx, ry, x_axis_rotation, flags, x, y])
    }

    fn rel_arc_to(&mut self, rx: f32, ry: f32, x_axis_rotation: f32, large_arc: bool, sweep: bool, x: f32, y: f32) -> Result<(), EncodeError> {
	let flags = Encoder::arc_flags(large_arc, sweep);
	self.draw(DrawOp::Arc, true, &[rx, ry, x_axis_rotation, flags, x, y])
    }
}
