use svgr::ViewBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    ///The axis of the `index`th operand of a multi-value operator.
    pub fn of_operand(index: usize) -> Axis {
	if index & 0x01 == 0 { Axis::X } else { Axis::Y }
    }
}

///Maps source coordinates onto the square output canvas.
///
///The canvas box's width is scaled to `size` and its top left corner moved to
///`(-size/2, -size/2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    size: f32,
    length: f32,
    offset: [f32; 2],
}

impl CanvasTransform {
    pub fn new(canvas: &ViewBox, size: f32) -> Self {
	let length = canvas.width;
	CanvasTransform {
	    size,
	    length,
	    offset: [
		canvas.min_x * size / length,
		canvas.min_y * size / length,
	    ],
	}
    }

    pub fn offset(&self, axis: Axis) -> f32 {
	match axis {
	    Axis::X => self.offset[0],
	    Axis::Y => self.offset[1],
	}
    }

    ///Scales a relative value or a radius.
    pub fn scale_length(&self, v: f32) -> f32 {
	v * self.size / self.length
    }

    ///Maps an absolute coordinate on `axis`.
    pub fn project(&self, v: f32, axis: Axis) -> f32 {
	self.scale_length(v) - self.size / 2.0 - self.offset(axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_values_are_only_scaled() {
	let t = CanvasTransform::new(&ViewBox::new(4.0, 8.0, 24.0, 24.0), 48.0);

	assert_eq!(t.scale_length(16.0), 32.0);
	assert_eq!(t.scale_length(-2.5), -5.0);
    }

    #[test]
    fn absolute_values_are_centered_and_shifted() {
	let t = CanvasTransform::new(&ViewBox::new(0.0, 0.0, 24.0, 24.0), 48.0);
	assert_eq!(t.project(0.0, Axis::X), -24.0);
	assert_eq!(t.project(12.0, Axis::Y), 0.0);
	assert_eq!(t.project(24.0, Axis::X), 24.0);

	let t = CanvasTransform::new(&ViewBox::new(4.0, 8.0, 24.0, 24.0), 48.0);
	assert_eq!(t.offset(Axis::X), 8.0);
	assert_eq!(t.offset(Axis::Y), 16.0);
	assert_eq!(t.project(4.0, Axis::X), -24.0);
	assert_eq!(t.project(8.0, Axis::Y), -24.0);
	assert_eq!(t.project(4.0, Axis::Y), -32.0);
    }

    #[test]
    fn other_output_sizes() {
	let t = CanvasTransform::new(&ViewBox::new(0.0, 0.0, 96.0, 96.0), 64.0);

	assert_eq!(t.scale_length(48.0), 32.0);
	assert_eq!(t.project(48.0, Axis::X), 0.0);
    }

    #[test]
    fn operand_parity_selects_axis() {
	assert_eq!(Axis::of_operand(0), Axis::X);
	assert_eq!(Axis::of_operand(3), Axis::Y);
	assert_eq!(Axis::of_operand(4), Axis::X);
    }
}
