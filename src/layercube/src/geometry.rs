//! Static geometry of the 3x3x3 cube: face labels, piece keys and the
//! clockwise neighbour ring of every face.
//!
//! Every physical piece is named by an ordered tuple of faces, its *key*.
//! Edge keys list the smaller label first. Corner keys lead with white or
//! yellow and continue clockwise around the corner when viewed from outside.
//! A cube state stores, for each key, the tuple of the piece occupying that
//! position with the value's `i`th face lying on the key's `i`th face.

use std::{fmt, str::FromStr};

use itertools::Itertools;
use thiserror::Error;

use crate::state::CubeState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("No piece of the cube has the faces {}", .0.iter().join(""))]
    NoSuchPiece(Vec<Face>),
    #[error("{1} does not border {0}")]
    NotAdjacent(Face, Face),
    #[error("Unknown face `{0}`: expected one of W O G B R Y, a colour name or a label 1-6")]
    UnknownFace(String),
}

/// One of the six faces. The discriminant is the face's label; labels of
/// opposite faces always sum to 7.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    White = 1,
    Orange = 2,
    Green = 3,
    Blue = 4,
    Red = 5,
    Yellow = 6,
}

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [White, Orange, Green, Blue, Red, Yellow];

        let mut i = 0;
        while i < v.len() {
            assert!(i + 1 == v[i] as usize);
            i += 1;
        }

        v
    };

    #[must_use]
    pub const fn label(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_label(label: u8) -> Option<Self> {
        match label {
            1..=6 => Some(Self::ALL[label as usize - 1]),
            _ => None,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[6 - self.label() as usize]
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Face::White => 'W',
            Face::Orange => 'O',
            Face::Green => 'G',
            Face::Blue => 'B',
            Face::Red => 'R',
            Face::Yellow => 'Y',
        }
    }

    /// The upper-case colour name, as used in spelled-out move descriptions.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Face::White => "WHITE",
            Face::Orange => "ORANGE",
            Face::Green => "GREEN",
            Face::Blue => "BLUE",
            Face::Red => "RED",
            Face::Yellow => "YELLOW",
        }
    }
}

impl FromStr for Face {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(label) = trimmed.parse::<u8>() {
            return Face::from_label(label)
                .ok_or_else(|| GeometryError::UnknownFace(s.to_owned()));
        }
        Face::ALL
            .into_iter()
            .find(|face| {
                trimmed.eq_ignore_ascii_case(face.name())
                    || (trimmed.len() == 1
                        && trimmed
                            .chars()
                            .next()
                            .is_some_and(|c| c.eq_ignore_ascii_case(&face.letter())))
            })
            .ok_or_else(|| GeometryError::UnknownFace(s.to_owned()))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub type Edge = [Face; 2];
pub type Corner = [Face; 3];

use Face::{Blue as B, Green as G, Orange as O, Red as R, White as W, Yellow as Y};

/// Edge keys: four white-layer edges, four middle-layer edges, then four
/// yellow-layer edges.
pub const EDGES: [Edge; 12] = [
    [W, O],
    [W, G],
    [W, B],
    [W, R],
    [O, B],
    [B, R],
    [G, R],
    [O, G],
    [O, Y],
    [G, Y],
    [B, Y],
    [R, Y],
];

/// Corner keys: four white-layer corners then four yellow-layer corners.
pub const CORNERS: [Corner; 8] = [
    [W, G, O],
    [W, O, B],
    [W, B, R],
    [W, R, G],
    [Y, B, O],
    [Y, O, G],
    [Y, G, R],
    [Y, R, B],
];

pub const WHITE_EDGES: [Edge; 4] = [EDGES[0], EDGES[1], EDGES[2], EDGES[3]];
pub const MIDDLE_EDGES: [Edge; 4] = [EDGES[4], EDGES[5], EDGES[6], EDGES[7]];
pub const YELLOW_EDGES: [Edge; 4] = [EDGES[8], EDGES[9], EDGES[10], EDGES[11]];
pub const WHITE_CORNERS: [Corner; 4] = [CORNERS[0], CORNERS[1], CORNERS[2], CORNERS[3]];
pub const YELLOW_CORNERS: [Corner; 4] = [CORNERS[4], CORNERS[5], CORNERS[6], CORNERS[7]];

/// The four faces bordering `face`, in clockwise order as seen looking at
/// `face` from outside the cube.
#[must_use]
pub const fn clockwise_neighbors(face: Face) -> [Face; 4] {
    match face {
        W => [O, B, R, G],
        O => [W, G, Y, B],
        G => [W, R, Y, O],
        // Seen from the opposite side the ring runs the other way
        B | R | Y => {
            let [a, b, c, d] = clockwise_neighbors(face.opposite());
            [d, c, b, a]
        }
    }
}

/// Index of `face` within `clockwise_neighbors(around)`.
#[must_use]
pub fn ring_position(around: Face, face: Face) -> Option<usize> {
    clockwise_neighbors(around)
        .into_iter()
        .position(|neighbor| neighbor == face)
}

/// A positional key of the cube, and equally the identity of a physical
/// piece.
pub trait Piece: Copy + Eq + fmt::Debug + 'static {
    /// All keys of this kind, in table order.
    const KEYS: &'static [Self];

    fn faces(&self) -> &[Face];

    /// Cyclically shift the tuple right by `power`, so that
    /// `shifted(p)[i] == self[(i - p) mod len]`.
    #[must_use]
    fn shifted(self, power: usize) -> Self;

    /// The occupants of every position of this kind in `state`, in key order.
    fn slots(state: &CubeState) -> &[Self];

    fn slot(self) -> Option<usize> {
        Self::KEYS.iter().position(|key| *key == self)
    }

    /// Whether both tuples name the same physical piece, ignoring
    /// orientation.
    fn same_faces(&self, other: &Self) -> bool {
        self.faces().iter().sorted().eq(other.faces().iter().sorted())
    }

    fn name(&self) -> String {
        self.faces().iter().join("")
    }
}

impl Piece for Edge {
    const KEYS: &'static [Self] = &EDGES;

    fn faces(&self) -> &[Face] {
        self
    }

    fn shifted(mut self, power: usize) -> Self {
        self.rotate_right(power % 2);
        self
    }

    fn slots(state: &CubeState) -> &[Self] {
        state.edges()
    }
}

impl Piece for Corner {
    const KEYS: &'static [Self] = &CORNERS;

    fn faces(&self) -> &[Face] {
        self
    }

    fn shifted(mut self, power: usize) -> Self {
        self.rotate_right(power % 3);
        self
    }

    fn slots(state: &CubeState) -> &[Self] {
        state.corners()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKey {
    Edge(Edge),
    Corner(Corner),
}

impl PieceKey {
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        match self {
            PieceKey::Edge(edge) => edge,
            PieceKey::Corner(corner) => corner,
        }
    }
}

impl fmt::Display for PieceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.faces().iter().join(""))
    }
}

/// The key naming the same edge as `edge`, if there is one.
#[must_use]
pub fn canonical_edge(edge: Edge) -> Option<Edge> {
    let [a, b] = edge;
    [[a, b], [b, a]]
        .into_iter()
        .find(|candidate| EDGES.contains(candidate))
}

/// The key naming the same corner as `corner`, if there is one. The corner
/// is rotated so its unique white (or else unique yellow) face leads, and
/// the mirrored order is accepted as well.
#[must_use]
pub fn canonical_corner(corner: Corner) -> Option<Corner> {
    let lead = [W, Y]
        .into_iter()
        .find(|lead| corner.iter().filter(|face| *face == lead).count() == 1)?;
    let at = corner.iter().position(|&face| face == lead)?;
    let rotated = [corner[at], corner[(at + 1) % 3], corner[(at + 2) % 3]];
    [rotated, [rotated[0], rotated[2], rotated[1]]]
        .into_iter()
        .find(|candidate| CORNERS.contains(candidate))
}

/// Canonicalize an arbitrary two or three face tuple.
///
/// # Errors
///
/// Returns `GeometryError::NoSuchPiece` when no edge or corner is made of
/// exactly these faces.
pub fn canonical_key(faces: &[Face]) -> Result<PieceKey, GeometryError> {
    match *faces {
        [a, b] => canonical_edge([a, b]).map(PieceKey::Edge),
        [a, b, c] => canonical_corner([a, b, c]).map(PieceKey::Corner),
        _ => None,
    }
    .ok_or_else(|| GeometryError::NoSuchPiece(faces.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_rings_are_symmetric() {
        for a in Face::ALL {
            for b in Face::ALL {
                let a_sees_b = clockwise_neighbors(a).contains(&b);
                assert_eq!(a_sees_b, clockwise_neighbors(b).contains(&a));
                assert_eq!(a_sees_b, a != b && a != b.opposite());
            }
        }
    }

    #[test]
    fn opposite_labels_sum_to_seven() {
        for face in Face::ALL {
            assert_eq!(face.label() + face.opposite().label(), 7);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn keys_are_their_own_canonical_form() {
        for edge in EDGES {
            assert_eq!(canonical_edge(edge), Some(edge));
            assert_eq!(canonical_edge([edge[1], edge[0]]), Some(edge));
        }
        for corner in CORNERS {
            assert_eq!(canonical_corner(corner), Some(corner));
            assert_eq!(canonical_corner(corner.shifted(1)), Some(corner));
            assert_eq!(canonical_corner([corner[0], corner[2], corner[1]]), Some(corner));
        }
    }

    #[test]
    fn corners_run_clockwise() {
        for corner in CORNERS {
            let ring = clockwise_neighbors(corner[0]);
            let at = ring_position(corner[0], corner[1]).unwrap();
            assert_eq!(ring[(at + 1) % 4], corner[2]);
        }
    }

    #[test]
    fn malformed_pieces_are_rejected() {
        assert_eq!(
            canonical_key(&[W, Y]),
            Err(GeometryError::NoSuchPiece(vec![W, Y]))
        );
        assert!(canonical_key(&[W, W, O]).is_err());
        assert!(canonical_key(&[W, O, Y]).is_err());
        assert!(canonical_key(&[O, G, R]).is_err());
        assert!(canonical_key(&[W]).is_err());
        assert_eq!(canonical_key(&[O, W]), Ok(PieceKey::Edge([W, O])));
        assert_eq!(canonical_key(&[O, W, G]), Ok(PieceKey::Corner([W, G, O])));
    }

    #[test]
    fn faces_parse_from_letters_names_and_labels() {
        assert_eq!("w".parse::<Face>(), Ok(W));
        assert_eq!("Orange".parse::<Face>(), Ok(O));
        assert_eq!("6".parse::<Face>(), Ok(Y));
        assert!("7".parse::<Face>().is_err());
        assert!("X".parse::<Face>().is_err());
        assert_eq!(Face::Green.to_string(), "G");
    }
}
