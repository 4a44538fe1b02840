use std::{fmt, str::FromStr};

use nom::{Finish, IResult, bytes::complete::tag, character::complete::{char, multispace0}, combinator::{all_consuming, opt}, number::complete::float, sequence::{delimited, preceded, terminated, tuple}};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
	ViewBox { min_x, min_y, width, height }
    }

    pub fn is_empty(&self) -> bool {
	self.width == 0.0 && self.height == 0.0
    }
}

///A `width`/`height` value. Only user units are understood, an optional
///`px` suffix is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length(pub f32);

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNumberError(String);

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	write!(f, "invalid number list: {:?}", self.0)
    }
}

impl std::error::Error for ParseNumberError {}

fn number(input: &str) -> IResult<&str, f32> {
    float(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(char(','))(input)?;
    let (input, _) = multispace0(input)?;

    Ok((input, ()))
}

fn view_box(input: &str) -> IResult<&str, ViewBox> {
    let numbers = tuple((
	number,
	preceded(separator, number),
	preceded(separator, number),
	preceded(separator, number),
    ));

    let (input, (min_x, min_y, width, height)) =
	all_consuming(delimited(multispace0, numbers, multispace0))(input)?;

    Ok((input, ViewBox::new(min_x, min_y, width, height)))
}

fn length(input: &str) -> IResult<&str, f32> {
    all_consuming(delimited(multispace0, terminated(number, opt(tag("px"))), multispace0))(input)
}

impl FromStr for ViewBox {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	view_box(s).finish()
	    .map(|(_, vb)| vb)
	    .map_err(|_| ParseNumberError(String::from(s)))
    }
}

impl FromStr for Length {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
	length(s).finish()
	    .map(|(_, v)| Length(v))
	    .map_err(|_| ParseNumberError(String::from(s)))
    }
}

pub type Width = Length;
pub type Height = Length;

pub type Data = String;
pub type Fill = String;

pub type Opacity = f32;
pub type FillOpacity = f32;

pub type Cx = f32;
pub type Cy = f32;
pub type R = f32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_box_accepts_spaces_and_commas() {
	let vb: ViewBox = "0 0 24 24".parse().unwrap();
	assert_eq!(vb, ViewBox::new(0.0, 0.0, 24.0, 24.0));

	let vb: ViewBox = " -2,-2, 28 ,28 ".parse().unwrap();
	assert_eq!(vb, ViewBox::new(-2.0, -2.0, 28.0, 28.0));

	let vb: ViewBox = "0 0 20.5 10".parse().unwrap();
	assert_eq!(vb.width, 20.5);
    }

    #[test]
    fn view_box_needs_four_numbers() {
	assert!("0 0 24".parse::<ViewBox>().is_err());
	assert!("0 0 24 24 24".parse::<ViewBox>().is_err());
	assert!("a b c d".parse::<ViewBox>().is_err());
    }

    #[test]
    fn length_strips_px() {
	assert_eq!("24".parse::<Length>(), Ok(Length(24.0)));
	assert_eq!("48px".parse::<Length>(), Ok(Length(48.0)));
	assert!("10em".parse::<Length>().is_err());
    }
}
