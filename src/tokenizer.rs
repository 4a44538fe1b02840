//! Path data (`d` attribute) tokenizer.
//!
//! Tokens are produced lazily, one operator with its arguments at a time.
//! A number where an operator letter is expected repeats the previous
//! operator, a moveto included.

use nom::{IResult, number::complete::float};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathDataError {
    #[error("arcTo not supported (`{operator}` at offset {offset})")]
    UnsupportedOperator { operator: char, offset: usize },
    #[error("unknown operator `{operator}` at offset {offset}")]
    UnknownOperator { operator: char, offset: usize },
    #[error("malformed argument {index} of `{operator}` at offset {offset}")]
    MalformedArgument { operator: char, index: usize, offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    QuadTo,
    SmoothQuadTo,
    CubeTo,
    SmoothCubeTo,
    ClosePath,
}

impl Operator {
    fn from_letter(c: char, offset: usize) -> Result<Operator, PathDataError> {
	Ok(match c.to_ascii_uppercase() {
	    'M' => Operator::MoveTo,
	    'L' => Operator::LineTo,
	    'H' => Operator::HorizontalLineTo,
	    'V' => Operator::VerticalLineTo,
	    'Q' => Operator::QuadTo,
	    'T' => Operator::SmoothQuadTo,
	    'C' => Operator::CubeTo,
	    'S' => Operator::SmoothCubeTo,
	    'Z' => Operator::ClosePath,
	    'A' => return Err(PathDataError::UnsupportedOperator { operator: c, offset }),
	    _ => return Err(PathDataError::UnknownOperator { operator: c, offset }),
	})
    }

    pub fn letter(self, relative: bool) -> char {
	let upper = match self {
	    Operator::MoveTo => 'M',
	    Operator::LineTo => 'L',
	    Operator::HorizontalLineTo => 'H',
	    Operator::VerticalLineTo => 'V',
	    Operator::QuadTo => 'Q',
	    Operator::SmoothQuadTo => 'T',
	    Operator::CubeTo => 'C',
	    Operator::SmoothCubeTo => 'S',
	    Operator::ClosePath => 'Z',
	};

	if relative { upper.to_ascii_lowercase() } else { upper }
    }

    pub fn arg_count(self) -> usize {
	match self {
	    Operator::ClosePath => 0,
	    Operator::HorizontalLineTo | Operator::VerticalLineTo => 1,
	    Operator::MoveTo | Operator::LineTo | Operator::SmoothQuadTo => 2,
	    Operator::QuadTo | Operator::SmoothCubeTo => 4,
	    Operator::CubeTo => 6,
	}
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub operator: Operator,
    pub relative: bool,
    args: [f32; 6],
}

impl Token {
    pub fn new(operator: Operator, relative: bool, args: &[f32]) -> Token {
	let mut token = Token { operator, relative, args: [0.0; 6] };
	let n = operator.arg_count().min(args.len());
	token.args[..n].copy_from_slice(&args[..n]);
	token
    }

    pub fn args(&self) -> &[f32] {
	&self.args[..self.operator.arg_count()]
    }
}

fn number(input: &str) -> IResult<&str, f32> {
    float(input)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

pub struct Tokenizer<'a> {
    data: &'a str,
    rest: &'a str,
    current: Option<(Operator, bool)>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    ///A trailing close path is dropped, every pass ends with one anyway.
    pub fn new(data: &'a str) -> Tokenizer<'a> {
	let data = data.trim_end();
	let data = data.strip_suffix(|c: char| c == 'z' || c == 'Z').unwrap_or(data);

	Tokenizer {
	    data,
	    rest: data,
	    current: None,
	    done: false,
	}
    }

    fn offset(&self) -> usize {
	self.data.len() - self.rest.len()
    }

    fn next_token(&mut self) -> Result<Option<Token>, PathDataError> {
	self.rest = self.rest.trim_start();

	let c = match self.rest.chars().next() {
	    Some(c) => c,
	    None => return Ok(None),
	};
	let offset = self.offset();

	let (operator, relative) = if c.is_ascii_alphabetic() {
	    let operator = Operator::from_letter(c, offset)?;
	    self.rest = &self.rest[1..];
	    (operator, c.is_ascii_lowercase())
	} else {
	    match self.current {
		Some((op, relative)) if op.arg_count() > 0 => (op, relative),
		Some((op, relative)) => return Err(PathDataError::MalformedArgument {
		    operator: op.letter(relative),
		    index: 0,
		    offset,
		}),
		None => return Err(PathDataError::UnknownOperator { operator: c, offset }),
	    }
	};
	self.current = Some((operator, relative));

	let mut args = [0.0; 6];
	for (index, arg) in args.iter_mut().take(operator.arg_count()).enumerate() {
	    self.rest = self.rest.trim_start_matches(is_separator);

	    match number(self.rest) {
		Ok((rest, v)) => {
		    *arg = v;
		    self.rest = rest;
		},
		Err(_) => return Err(PathDataError::MalformedArgument {
		    operator: operator.letter(relative),
		    index,
		    offset: self.offset(),
		}),
	    }
	}

	Ok(Some(Token { operator, relative, args }))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, PathDataError>;

    fn next(&mut self) -> Option<Self::Item> {
	if self.done {
	    return None;
	}

	match self.next_token() {
	    Ok(Some(token)) => Some(Ok(token)),
	    Ok(None) => {
		self.done = true;
		None
	    },
	    Err(e) => {
		self.done = true;
		Some(Err(e))
	    },
	}
    }
}

impl<'a> std::iter::FusedIterator for Tokenizer<'a> {}
