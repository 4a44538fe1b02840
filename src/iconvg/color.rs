///The 1-byte color for a fully transparent black.
pub const TRANSPARENT: u8 = 0x7f;
///The 1-byte color reading the first custom palette entry, which is opaque
///black in the default palette.
pub const FIRST_PALETTE_COLOR: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    ///Alpha-premultiplied RGBA.
    Rgba([u8; 4]),
    ///Custom palette entry, `0..64`.
    Palette(u8),
    ///Color register, `0..64`.
    Register(u8),
    ///`(255-t)*c0 + t*c1`, where the colors are given in their 1-byte form.
    Blend { t: u8, c0: u8, c1: u8 },
}

fn cube_level(c: u8) -> Option<u8> {
    match c {
	0x00 => Some(0),
	0x40 => Some(1),
	0x80 => Some(2),
	0xc0 => Some(3),
	0xff => Some(4),
	_ => None,
    }
}

impl Color {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
	Color::Rgba([r, g, b, a])
    }

    pub fn blend(t: u8, c0: u8, c1: u8) -> Self {
	Color::Blend { t, c0, c1 }
    }

    ///The 1-byte form, when there is one.
    pub fn encode_1(&self) -> Option<u8> {
	match *self {
	    Color::Rgba([r, g, b, 0xff]) => {
		match (cube_level(r), cube_level(g), cube_level(b)) {
		    (Some(r), Some(g), Some(b)) => Some(25 * r + 5 * g + b),
		    _ => None,
		}
	    },
	    Color::Rgba([0xc0, 0xc0, 0xc0, 0xc0]) => Some(0x7d),
	    Color::Rgba([0x80, 0x80, 0x80, 0x80]) => Some(0x7e),
	    Color::Rgba([0x00, 0x00, 0x00, 0x00]) => Some(TRANSPARENT),
	    Color::Palette(i) if i < 64 => Some(0x80 | i),
	    Color::Register(i) if i < 64 => Some(0xc0 | i),
	    _ => None,
	}
    }

    ///The 2-byte form: every channel repeats its high nibble.
    pub fn encode_2(&self) -> Option<[u8; 2]> {
	match *self {
	    Color::Rgba(c) if c.iter().all(|&x| x >> 4 == x & 0x0f) => {
		Some([(c[0] & 0xf0) | (c[1] >> 4), (c[2] & 0xf0) | (c[3] >> 4)])
	    },
	    _ => None,
	}
    }

    ///The 3-byte form, for opaque colors.
    pub fn encode_3(&self) -> Option<[u8; 3]> {
	match *self {
	    Color::Rgba([r, g, b, 0xff]) => Some([r, g, b]),
	    _ => None,
	}
    }

    ///The 4-byte form, only direct colors have one.
    pub fn encode_4(&self) -> Option<[u8; 4]> {
	match *self {
	    Color::Rgba(c) => Some(c),
	    _ => None,
	}
    }

    ///Premultiplied colors can't have a channel above their alpha.
    pub fn is_valid(&self) -> bool {
	match *self {
	    Color::Rgba([r, g, b, a]) => r <= a && g <= a && b <= a,
	    Color::Palette(i) | Color::Register(i) => i < 64,
	    Color::Blend { .. } => true,
	}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_byte_colors() {
	assert_eq!(Color::rgba(0x00, 0x00, 0x00, 0xff).encode_1(), Some(0x00));
	assert_eq!(Color::rgba(0xff, 0xff, 0xff, 0xff).encode_1(), Some(0x7c));
	assert_eq!(Color::rgba(0x40, 0x80, 0xc0, 0xff).encode_1(), Some(25 + 10 + 3));
	assert_eq!(Color::rgba(0x00, 0x00, 0x00, 0x00).encode_1(), Some(TRANSPARENT));
	assert_eq!(Color::Palette(0).encode_1(), Some(FIRST_PALETTE_COLOR));
	assert_eq!(Color::Register(3).encode_1(), Some(0xc3));

	assert_eq!(Color::rgba(0x10, 0x00, 0x00, 0xff).encode_1(), None);
	assert_eq!(Color::Palette(64).encode_1(), None);
	assert_eq!(Color::blend(0x80, TRANSPARENT, FIRST_PALETTE_COLOR).encode_1(), None);
    }

    #[test]
    fn direct_colors() {
	assert_eq!(Color::rgba(0x11, 0x22, 0x33, 0x44).encode_2(), Some([0x12, 0x34]));
	assert_eq!(Color::rgba(0x00, 0x00, 0x00, 0xff).encode_2(), Some([0x00, 0x0f]));
	assert_eq!(Color::rgba(0x12, 0x22, 0x33, 0x44).encode_2(), None);

	assert_eq!(Color::rgba(0x12, 0x34, 0x56, 0xff).encode_3(), Some([0x12, 0x34, 0x56]));
	assert_eq!(Color::rgba(0x12, 0x34, 0x56, 0x78).encode_3(), None);
	assert_eq!(Color::Register(1).encode_3(), None);
    }

    #[test]
    fn premultiplied_validity() {
	assert!(Color::rgba(0x20, 0x20, 0x20, 0x40).is_valid());
	assert!(!Color::rgba(0x80, 0x20, 0x20, 0x40).is_valid());
	assert!(!Color::Register(64).is_valid());
    }
}
