use crate::iconvg::{Color, EncodeError, Metadata};

///Receives the drawing operations of a converted image.
///
///Coordinates are in destination canvas space. Every path is opened with
///`start_path` and ends with `close_path_end_path`; in between, the
///`close_path_*_move_to` calls begin further sub-paths.
#[allow(clippy::too_many_arguments)]
pub trait PathSink {
    fn reset(&mut self, metadata: &Metadata) -> Result<(), EncodeError>;

    ///Sets color register `CSEL-adj`. With `incr` the selector is advanced
    ///afterwards, which requires `adj` to be 0.
    fn set_color_register(&mut self, adj: u8, incr: bool, color: Color) -> Result<(), EncodeError>;

    fn start_path(&mut self, adj: u8, x: f32, y: f32) -> Result<(), EncodeError>;
    fn close_path_end_path(&mut self) -> Result<(), EncodeError>;
    fn close_path_abs_move_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError>;
    fn close_path_rel_move_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError>;

    fn abs_h_line_to(&mut self, x: f32) -> Result<(), EncodeError>;
    fn rel_h_line_to(&mut self, x: f32) -> Result<(), EncodeError>;
    fn abs_v_line_to(&mut self, y: f32) -> Result<(), EncodeError>;
    fn rel_v_line_to(&mut self, y: f32) -> Result<(), EncodeError>;
    fn abs_line_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError>;
    fn rel_line_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError>;

    fn abs_smooth_quad_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError>;
    fn rel_smooth_quad_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError>;
    fn abs_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) -> Result<(), EncodeError>;
    fn rel_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) -> Result<(), EncodeError>;

    fn abs_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError>;
    fn rel_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError>;
    fn abs_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError>;
    fn rel_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError>;

    ///`x_axis_rotation` is a fraction of a full turn, in `[0, 1)`.
    fn abs_arc_to(&mut self, rx: f32, ry: f32, x_axis_rotation: f32, large_arc: bool, sweep: bool, x: f32, y: f32) -> Result<(), EncodeError>;
    fn rel_arc_to(&mut self, rx: f32, ry: f32, x_axis_rotation: f32, large_arc: bool, sweep: bool, x: f32, y: f32) -> Result<(), EncodeError>;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
	Reset(Metadata),
	SetColorRegister(u8, bool, Color),
	StartPath(u8, f32, f32),
	ClosePathEndPath,
	ClosePathAbsMoveTo(f32, f32),
	ClosePathRelMoveTo(f32, f32),
	///Any other drawing operation, by method name. Arc flags are 0 or 1.
	Draw(&'static str, Vec<f32>),
    }

    ///Keeps every call, for checking what the converter asked for.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
	pub calls: Vec<Call>,
    }

    impl RecordingSink {
	fn draw(&mut self, name: &'static str, args: &[f32]) -> Result<(), EncodeError> {
	    self.calls.push(Call::Draw(name, args.to_vec()));
	    Ok(())
	}
    }

    fn flag(b: bool) -> f32 {
	if b { 1.0 } else { 0.0 }
    }

    impl PathSink for RecordingSink {
	fn reset(&mut self, metadata: &Metadata) -> Result<(), EncodeError> {
	    self.calls.push(Call::Reset(*metadata));
	    Ok(())
	}

	fn set_color_register(&mut self, adj: u8, incr: bool, color: Color) -> Result<(), EncodeError> {
	    self.calls.push(Call::SetColorRegister(adj, incr, color));
	    Ok(())
	}

	fn start_path(&mut self, adj: u8, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.calls.push(Call::StartPath(adj, x, y));
	    Ok(())
	}

	fn close_path_end_path(&mut self) -> Result<(), EncodeError> {
	    self.calls.push(Call::ClosePathEndPath);
	    Ok(())
	}

	fn close_path_abs_move_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.calls.push(Call::ClosePathAbsMoveTo(x, y));
	    Ok(())
	}

	fn close_path_rel_move_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.calls.push(Call::ClosePathRelMoveTo(x, y));
	    Ok(())
	}

	fn abs_h_line_to(&mut self, x: f32) -> Result<(), EncodeError> { self.draw("abs_h_line_to", &[x]) }
	fn rel_h_line_to(&mut self, x: f32) -> Result<(), EncodeError> { self.draw("rel_h_line_to", &[x]) }
	fn abs_v_line_to(&mut self, y: f32) -> Result<(), EncodeError> { self.draw("abs_v_line_to", &[y]) }
	fn rel_v_line_to(&mut self, y: f32) -> Result<(), EncodeError> { self.draw("rel_v_line_to", &[y]) }
	fn abs_line_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> { self.draw("abs_line_to", &[x, y]) }
	fn rel_line_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> { self.draw("rel_line_to", &[x, y]) }

	fn abs_smooth_quad_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("abs_smooth_quad_to", &[x, y])
	}

	fn rel_smooth_quad_to(&mut self, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("rel_smooth_quad_to", &[x, y])
	}

	fn abs_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("abs_quad_to", &[x1, y1, x, y])
	}

	fn rel_quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("rel_quad_to", &[x1, y1, x, y])
	}

	fn abs_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("abs_smooth_cube_to", &[x2, y2, x, y])
	}

	fn rel_smooth_cube_to(&mut self, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("rel_smooth_cube_to", &[x2, y2, x, y])
	}

	fn abs_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("abs_cube_to", &[x1, y1, x2, y2, x, y])
	}

	fn rel_cube_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("rel_cube_to", &[x1, y1, x2, y2, x, y])
	}

	fn abs_arc_to(&mut self, rx: f32, ry: f32, x_axis_rotation: f32, large_arc: bool, sweep: bool, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("abs_arc_to", &[rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y])
	}

	fn rel_arc_to(&mut self, rx: f32, ry: f32, x_axis_rotation: f32, large_arc: bool, sweep: bool, x: f32, y: f32) -> Result<(), EncodeError> {
	    self.draw("rel_arc_to", &[rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y])
	}
    }
}
