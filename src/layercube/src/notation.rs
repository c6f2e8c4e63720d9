//! Human-readable move notation: `W`, `W2` and `W'` for a quarter, half and
//! counter-quarter turn of a face.

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::geometry::{Face, GeometryError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error(transparent)]
    UnknownFace(#[from] GeometryError),
    #[error("Bad turn suffix in `{0}`: expected nothing, `2` or `'`")]
    BadSuffix(String),
}

/// Some number of clockwise quarter turns of one face.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Turn {
    pub face: Face,
    /// Always 1, 2 or 3.
    pub quarter_turns: u8,
}

impl Turn {
    /// A sentence describing the turn, e.g. "Rotate GREEN 180 degrees".
    #[must_use]
    pub fn describe(&self) -> String {
        let amount = match self.quarter_turns {
            1 => "90 degrees clockwise",
            2 => "180 degrees",
            _ => "90 degrees anticlockwise",
        };
        format!("Rotate {} {amount}", self.face.name())
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quarter_turns {
            1 => write!(f, "{}", self.face),
            2 => write!(f, "{}2", self.face),
            _ => write!(f, "{}'", self.face),
        }
    }
}

/// Collapse every run of the same face into a single turn. Runs that add up
/// to a whole rotation are dropped without merging their neighbours.
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn compress(moves: &[Face]) -> Vec<Turn> {
    moves
        .iter()
        .dedup_with_count()
        .filter_map(|(count, &face)| {
            let quarter_turns = (count % 4) as u8;
            (quarter_turns != 0).then_some(Turn {
                face,
                quarter_turns,
            })
        })
        .collect()
}

#[must_use]
pub fn expand(turns: &[Turn]) -> Vec<Face> {
    turns
        .iter()
        .flat_map(|turn| std::iter::repeat_n(turn.face, turn.quarter_turns.into()))
        .collect()
}

#[must_use]
pub fn format_compact(moves: &[Face]) -> String {
    compress(moves).iter().join(" ")
}

/// Parse whitespace-separated turns such as `"W G' O2 6"` into quarter turns.
///
/// # Errors
///
/// Fails on an unknown face or a suffix other than `2` or `'`.
pub fn parse(text: &str) -> Result<Vec<Face>, NotationError> {
    let turns = text
        .split_whitespace()
        .map(|token| {
            if let Ok(face) = token.parse() {
                return Ok(Turn {
                    face,
                    quarter_turns: 1,
                });
            }
            let (face, quarter_turns) = if let Some(face) = token.strip_suffix('\'') {
                (face, 3)
            } else if let Some(face) = token.strip_suffix('2') {
                (face, 2)
            } else {
                (token, 1)
            };
            if face.is_empty() || face.ends_with('\'') {
                return Err(NotationError::BadSuffix(token.to_owned()));
            }
            Ok(Turn {
                face: face.parse()?,
                quarter_turns,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(expand(&turns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Face::*;

    #[test]
    fn runs_collapse_modulo_four() {
        let moves = [White, White, Green, Green, Green, Green, Red, Red, Red, White];
        assert_eq!(format_compact(&moves), "W2 R' W");
        assert_eq!(format_compact(&[Blue; 5]), "B");
        assert_eq!(format_compact(&[]), "");
    }

    #[test]
    fn dropped_runs_do_not_merge_neighbours() {
        let moves = [Orange, Yellow, Yellow, Yellow, Yellow, Orange];
        assert_eq!(format_compact(&moves), "O O");
    }

    #[test]
    fn parses_letters_and_labels() {
        assert_eq!(parse("W G' O2").unwrap(), vec![White, Green, Green, Green, Orange, Orange]);
        assert_eq!(parse("  6  2' ").unwrap(), vec![Yellow, Orange, Orange, Orange]);
        assert_eq!(parse("2 22").unwrap(), vec![Orange; 3]);
        assert!(parse("").unwrap().is_empty());
        assert!(matches!(parse("X"), Err(NotationError::UnknownFace(_))));
        assert!(matches!(parse("W''"), Err(NotationError::BadSuffix(_))));
    }

    #[test]
    fn describes_turns() {
        let turns = compress(&[Green, Green, Red, Red, Red, White]);
        let described = turns.iter().map(Turn::describe).collect_vec();
        assert_eq!(
            described,
            [
                "Rotate GREEN 180 degrees",
                "Rotate RED 90 degrees anticlockwise",
                "Rotate WHITE 90 degrees clockwise",
            ]
        );
    }
}
