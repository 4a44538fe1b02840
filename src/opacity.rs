use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::iconvg::{Color, FIRST_PALETTE_COLOR, TRANSPARENT};
use crate::sink::PathSink;

///The adjustment of fully opaque paths, which use the palette color as is.
pub const OPAQUE: u8 = 0;

///How many distinct partial opacities one image can use.
pub const MAX_OPACITIES: usize = 254;

///Assigns color registers to opacity values.
///
///The first time an opacity is seen, the next free register is set to the
///palette color blended towards transparent. Later paths with the same
///opacity reuse it.
#[derive(Debug, Default)]
pub struct OpacityRegisters {
    adjustments: HashMap<u32, u8>,
}

impl OpacityRegisters {
    pub fn new() -> Self {
	OpacityRegisters::default()
    }

    pub fn len(&self) -> usize {
	self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
	self.adjustments.is_empty()
    }

    pub fn resolve<S: PathSink>(&mut self, sink: &mut S, opacity: f32) -> Result<u8> {
	if opacity == 1.0 {
	    return Ok(OPAQUE);
	}

	if let Some(&adj) = self.adjustments.get(&opacity.to_bits()) {
	    return Ok(adj);
	}

	if self.adjustments.len() >= MAX_OPACITIES {
	    return Err(Error::TooManyOpacities(MAX_OPACITIES));
	}

	let adj = (self.adjustments.len() + 1) as u8;
	let weight = (opacity * 255.0).round().clamp(0.0, 255.0) as u8;
	sink.set_color_register(adj, false, Color::blend(weight, TRANSPARENT, FIRST_PALETTE_COLOR))?;

	debug!("opacity {} uses register adjustment {}", opacity, adj);
	self.adjustments.insert(opacity.to_bits(), adj);
	Ok(adj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::recording::{Call, RecordingSink};

    #[test]
    fn opaque_paths_need_no_register() {
	let mut sink = RecordingSink::default();
	let mut registers = OpacityRegisters::new();

	assert_eq!(registers.resolve(&mut sink, 1.0).unwrap(), OPAQUE);
	assert!(sink.calls.is_empty());
	assert!(registers.is_empty());
    }

    #[test]
    fn registers_are_assigned_in_order_and_reused() {
	let mut sink = RecordingSink::default();
	let mut registers = OpacityRegisters::new();

	assert_eq!(registers.resolve(&mut sink, 0.3).unwrap(), 1);
	assert_eq!(registers.resolve(&mut sink, 0.5).unwrap(), 2);
	assert_eq!(registers.resolve(&mut sink, 0.3).unwrap(), 1);

	assert_eq!(sink.calls, vec![
	    Call::SetColorRegister(1, false, Color::blend(77, TRANSPARENT, FIRST_PALETTE_COLOR)),
	    Call::SetColorRegister(2, false, Color::blend(128, TRANSPARENT, FIRST_PALETTE_COLOR)),
	]);
	assert_eq!(registers.len(), 2);
    }

    #[test]
    fn out_of_range_opacities_are_clamped() {
	let mut sink = RecordingSink::default();
	let mut registers = OpacityRegisters::new();

	registers.resolve(&mut sink, 1.5).unwrap();
	registers.resolve(&mut sink, -0.5).unwrap();

	assert_eq!(sink.calls, vec![
	    Call::SetColorRegister(1, false, Color::blend(255, TRANSPARENT, FIRST_PALETTE_COLOR)),
	    Call::SetColorRegister(2, false, Color::blend(0, TRANSPARENT, FIRST_PALETTE_COLOR)),
	]);
    }

    #[test]
    fn register_space_runs_out() {
	let mut sink = RecordingSink::default();
	let mut registers = OpacityRegisters::new();

	for i in 0..MAX_OPACITIES {
	    registers.resolve(&mut sink, i as f32 / 1000.0).unwrap();
	}

	assert!(matches!(registers.resolve(&mut sink, 0.999), Err(Error::TooManyOpacities(254))));
	assert_eq!(registers.resolve(&mut sink, 0.0).unwrap(), 1);
    }
}
