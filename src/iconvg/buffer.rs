///Output buffer with the IconVG number encodings.
#[derive(Debug, Default, Clone)]
pub(crate) struct Buffer(Vec<u8>);

impl Buffer {
    pub fn new() -> Self {
	Buffer::default()
    }

    pub fn len(&self) -> usize {
	self.0.len()
    }

    pub fn clear(&mut self) {
	self.0.clear();
    }

    pub fn as_slice(&self) -> &[u8] {
	&self.0
    }

    pub fn push(&mut self, b: u8) {
	self.0.push(b);
    }

    pub fn extend(&mut self, bytes: &[u8]) {
	self.0.extend_from_slice(bytes);
    }

    ///1, 2 or 4 bytes, the low bits of the first byte tell which.
    pub fn encode_natural(&mut self, u: u32) {
	if u < 1 << 7 {
	    self.push((u << 1) as u8);
	} else if u < 1 << 14 {
	    let u = (u << 2) | 0x01;
	    self.extend(&(u as u16).to_le_bytes());
	} else {
	    let u = u.wrapping_shl(3) | 0x03;
	    self.extend(&u.to_le_bytes());
	}
    }

    ///Small integers take 1 byte, multiples of 1/64 in `[-128, 128)` take 2.
    pub fn encode_coordinate(&mut self, f: f32) {
	let i = f as i32;
	if (-64..64).contains(&i) && i as f32 == f {
	    self.push(((i + 64) as u8) << 1);
	    return;
	}

	let scaled = f * 64.0;
	let i = scaled as i32;
	if (-128 * 64..128 * 64).contains(&i) && i as f32 == scaled {
	    let u = (((i + 128 * 64) as u32) << 2) | 0x01;
	    self.extend(&(u as u16).to_le_bytes());
	    return;
	}

	self.encode_4byte_real(f);
    }

    ///Multiples of 1/15120 take 2 bytes, or 1 when also a multiple of 1/120.
    pub fn encode_zero_to_one(&mut self, f: f32) {
	let scaled = f * 15120.0;
	let u = scaled as u32;
	if u < 15120 && u as f32 == scaled {
	    if u % 126 == 0 {
		self.push(((u / 126) << 1) as u8);
	    } else {
		let u = (u << 2) | 0x01;
		self.extend(&(u as u16).to_le_bytes());
	    }
	    return;
	}

	self.encode_4byte_real(f);
    }

    ///A float32 rounded to a multiple of 4 in its mantissa's lowest bits,
    ///which are then used as the length tag.
    pub fn encode_4byte_real(&mut self, f: f32) {
	let bits = f.to_bits();
	let mut mantissa = bits & 0x007f_ffff;
	if mantissa < 0x007f_fffe {
	    mantissa += 2;
	}

	let u = (bits & 0xff80_0000) | mantissa | 0x03;
	self.extend(&u.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natural(u: u32) -> Vec<u8> {
	let mut b = Buffer::new();
	b.encode_natural(u);
	b.as_slice().to_vec()
    }

    fn coordinate(f: f32) -> Vec<u8> {
	let mut b = Buffer::new();
	b.encode_coordinate(f);
	b.as_slice().to_vec()
    }

    fn zero_to_one(f: f32) -> Vec<u8> {
	let mut b = Buffer::new();
	b.encode_zero_to_one(f);
	b.as_slice().to_vec()
    }

    #[test]
    fn naturals() {
	assert_eq!(natural(0), [0x00]);
	assert_eq!(natural(1), [0x02]);
	assert_eq!(natural(127), [0xfe]);
	assert_eq!(natural(200), [0x21, 0x03]);
	assert_eq!(natural(20000), [0x03, 0x71, 0x02, 0x00]);
    }

    #[test]
    fn coordinates() {
	assert_eq!(coordinate(0.0), [0x80]);
	assert_eq!(coordinate(-24.0), [0x50]);
	assert_eq!(coordinate(24.0), [0xb0]);
	assert_eq!(coordinate(-64.0), [0x00]);

	assert_eq!(coordinate(64.0), [0x01, 0xc0]);
	assert_eq!(coordinate(8.5), [0x81, 0x88]);

	assert_eq!(coordinate(0.1), [0xcf, 0xcc, 0xcc, 0x3d]);
	assert_eq!(coordinate(300.0).len(), 4);
    }

    #[test]
    fn zero_to_ones() {
	assert_eq!(zero_to_one(0.0), [0x00]);
	assert_eq!(zero_to_one(0.25), [0x3c]);
	assert_eq!(zero_to_one(0.5), [0x78]);
	assert_eq!(zero_to_one(0.0625), [0xc5, 0x0e]);
	assert_eq!(zero_to_one(1.0).len(), 4);
	assert_eq!(zero_to_one(-0.5).len(), 4);
    }
}
