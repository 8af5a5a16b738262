//! Well-Known Text reader.
//!
//! Accepts `POINT`, `LINESTRING` and `POLYGON` in two dimensions, keywords
//! in any case. Writing is the `Display` impl on [`Geometry`].

use super::{Coord, Geometry, GeometryKind};
use thiserror::Error;

/// Minimum coordinates in a line string.
const MIN_LINE_COORDS: usize = 2;

/// Minimum coordinates in a closed polygon ring.
const MIN_RING_COORDS: usize = 4;

/// Why a WKT string was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("WKT is empty")]
    Empty,

    #[error("unsupported geometry type '{0}' (expected POINT, LINESTRING or POLYGON)")]
    UnknownKind(String),

    #[error("expected '{expected}' at position {position}")]
    Expected { expected: char, position: usize },

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("invalid coordinate '{0}' (expected two numbers separated by whitespace)")]
    InvalidCoordinate(String),

    #[error("{kind} needs at least {min} coordinates, found {found}")]
    TooFewCoordinates {
        kind: GeometryKind,
        min: usize,
        found: usize,
    },

    #[error("POINT takes exactly one coordinate, found {0}")]
    PointArity(usize),

    #[error("polygon ring {0} is not closed")]
    OpenRing(usize),

    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

/// Parse WKT text into a [`Geometry`].
pub fn parse(input: &str) -> Result<Geometry, ParseError> {
    let mut reader = Reader::new(input);
    reader.skip_ws();
    if reader.at_end() {
        return Err(ParseError::Empty);
    }

    let keyword = reader.keyword();
    let kind = GeometryKind::from_keyword(keyword)
        .ok_or_else(|| ParseError::UnknownKind(keyword.to_string()))?;

    let geometry = match kind {
        GeometryKind::Point => {
            let coords = reader.coord_list()?;
            match coords.as_slice() {
                [c] => Geometry::Point(*c),
                _ => return Err(ParseError::PointArity(coords.len())),
            }
        }
        GeometryKind::LineString => {
            let coords = reader.coord_list()?;
            if coords.len() < MIN_LINE_COORDS {
                return Err(ParseError::TooFewCoordinates {
                    kind,
                    min: MIN_LINE_COORDS,
                    found: coords.len(),
                });
            }
            Geometry::LineString(coords)
        }
        GeometryKind::Polygon => {
            let rings = reader.ring_list()?;
            for (i, ring) in rings.iter().enumerate() {
                if ring.len() < MIN_RING_COORDS {
                    return Err(ParseError::TooFewCoordinates {
                        kind,
                        min: MIN_RING_COORDS,
                        found: ring.len(),
                    });
                }
                if ring.first() != ring.last() {
                    return Err(ParseError::OpenRing(i));
                }
            }
            Geometry::Polygon(rings)
        }
    };

    reader.skip_ws();
    match reader.rest() {
        "" => Ok(geometry),
        rest if rest.starts_with(')') => Err(ParseError::UnbalancedParentheses),
        rest => Err(ParseError::TrailingInput(rest.to_string())),
    }
}

/// Cursor over the input text.
struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Leading run of ASCII letters.
    fn keyword(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(())
            }
            None if expected == ')' => Err(ParseError::UnbalancedParentheses),
            _ => Err(ParseError::Expected {
                expected,
                position: self.pos,
            }),
        }
    }

    /// After an item: `,` continues the list, `)` ends it.
    fn list_continues(&mut self) -> Result<bool, ParseError> {
        self.skip_ws();
        match self.peek() {
            Some(',') => {
                self.pos += 1;
                Ok(true)
            }
            Some(')') => {
                self.pos += 1;
                Ok(false)
            }
            None => Err(ParseError::UnbalancedParentheses),
            Some(_) => Err(ParseError::Expected {
                expected: ')',
                position: self.pos,
            }),
        }
    }

    /// `( x y, x y, ... )`
    fn coord_list(&mut self) -> Result<Vec<Coord>, ParseError> {
        self.expect('(')?;
        let mut coords = Vec::new();
        loop {
            coords.push(self.coord()?);
            if !self.list_continues()? {
                return Ok(coords);
            }
        }
    }

    /// `( (ring), (ring), ... )`
    fn ring_list(&mut self) -> Result<Vec<Vec<Coord>>, ParseError> {
        self.expect('(')?;
        let mut rings = Vec::new();
        loop {
            rings.push(self.coord_list()?);
            if !self.list_continues()? {
                return Ok(rings);
            }
        }
    }

    /// Two finite numbers separated by whitespace, up to the next delimiter.
    fn coord(&mut self) -> Result<Coord, ParseError> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| matches!(c, ',' | '(' | ')'))
            .ok_or(ParseError::UnbalancedParentheses)?;
        let text = rest[..end].trim();
        self.pos += end;

        let invalid = || ParseError::InvalidCoordinate(text.to_string());
        let mut parts = text.split_whitespace();
        let (x, y) = match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(y), None) => (number(x).ok_or_else(invalid)?, number(y).ok_or_else(invalid)?),
            _ => return Err(invalid()),
        };
        Ok(Coord { x, y })
    }
}

fn number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
