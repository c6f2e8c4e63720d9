use std::{array, collections::HashSet, ops::Index, sync::LazyLock};

use thiserror::Error;

use crate::geometry::{
    CORNERS, Corner, EDGES, Edge, Face, GeometryError, Piece, PieceKey, canonical_corner,
    canonical_edge, canonical_key, clockwise_neighbors,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("The piece {0} is placed more than once")]
    DuplicatePiece(PieceKey),
}

/// The full state of a cube: which piece occupies every position and how it
/// is turned. Only the rotation engine (`turn`) changes a state once it has
/// been built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    edges: [Edge; 12],
    corners: [Corner; 8],
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl CubeState {
    #[must_use]
    pub fn solved() -> Self {
        CubeState {
            edges: EDGES,
            corners: CORNERS,
        }
    }

    /// Build a state from the occupant of every position, in key order.
    ///
    /// # Errors
    ///
    /// Fails if an occupant is not a real piece or if some piece occupies two
    /// positions. Whether the state is reachable by turning a real cube is not
    /// checked.
    pub fn from_pieces(edges: [Edge; 12], corners: [Corner; 8]) -> Result<Self, StateError> {
        let mut seen = HashSet::new();
        let occupants = edges
            .iter()
            .map(Edge::as_slice)
            .chain(corners.iter().map(Corner::as_slice));
        for faces in occupants {
            let key = canonical_key(faces)?;
            if !seen.insert(key) {
                return Err(StateError::DuplicatePiece(key));
            }
        }
        Ok(CubeState { edges, corners })
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge; 12] {
        &self.edges
    }

    #[must_use]
    pub fn corners(&self) -> &[Corner; 8] {
        &self.corners
    }

    /// The occupant of the position named by an arbitrary face tuple.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NoSuchPiece` when `faces` names no position.
    pub fn piece(&self, faces: &[Face]) -> Result<PieceKey, GeometryError> {
        Ok(match canonical_key(faces)? {
            PieceKey::Edge(key) => PieceKey::Edge(self[key]),
            PieceKey::Corner(key) => PieceKey::Corner(self[key]),
        })
    }

    /// Turn `face` a quarter turn clockwise as seen from outside the cube.
    pub fn turn(&mut self, face: Face) {
        let ring = &TURN_RINGS[face as usize - 1];
        cycle(&mut self.edges, &ring.edges);
        cycle(&mut self.corners, &ring.corners);
    }

    pub fn apply_moves(&mut self, moves: impl IntoIterator<Item = Face>) {
        for face in moves {
            self.turn(face);
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.edges == EDGES && self.corners == CORNERS
    }

    /// Every `(position, occupant)` pair whose occupant is not the position's
    /// own piece in its home orientation, corners first.
    pub fn unsolved(&self) -> impl Iterator<Item = (PieceKey, PieceKey)> + '_ {
        let corners = CORNERS
            .iter()
            .zip(&self.corners)
            .filter(|(key, value)| key != value)
            .map(|(&key, &value)| (PieceKey::Corner(key), PieceKey::Corner(value)));
        let edges = EDGES
            .iter()
            .zip(&self.edges)
            .filter(|(key, value)| key != value)
            .map(|(&key, &value)| (PieceKey::Edge(key), PieceKey::Edge(value)));
        corners.chain(edges)
    }
}

pub(crate) fn slot_of<P: Piece>(key: P) -> usize {
    key.slot()
        .unwrap_or_else(|| panic!("{} is not a position of the cube", key.name()))
}

/// # Panics
///
/// Panics if the edge is not a canonical key.
impl Index<Edge> for CubeState {
    type Output = Edge;

    fn index(&self, key: Edge) -> &Edge {
        &self.edges[slot_of(key)]
    }
}

/// # Panics
///
/// Panics if the corner is not a canonical key.
impl Index<Corner> for CubeState {
    type Output = Corner;

    fn index(&self, key: Corner) -> &Corner {
        &self.corners[slot_of(key)]
    }
}

/// How far `value` is cyclically shifted relative to `key`: the smallest `p`
/// with `key.shifted(p) == value`. `None` if `value` is not a rotation of
/// `key`.
#[must_use]
pub fn orientation_delta<P: Piece>(key: P, value: P) -> Option<usize> {
    (0..key.faces().len()).find(|&power| key.shifted(power) == value)
}

/// The positions moved by one face turn, in ring order. Each entry is the
/// slot index of the position and the axis at which the key touches the
/// turning face.
struct TurnRing {
    edges: [(usize, usize); 4],
    corners: [(usize, usize); 4],
}

static TURN_RINGS: LazyLock<[TurnRing; 6]> = LazyLock::new(|| Face::ALL.map(TurnRing::new));

impl TurnRing {
    fn new(face: Face) -> Self {
        let ring = clockwise_neighbors(face);
        TurnRing {
            edges: array::from_fn(|i| locate(canonical_edge([face, ring[i]]), face)),
            corners: array::from_fn(|i| {
                locate(canonical_corner([face, ring[i], ring[(i + 1) % 4]]), face)
            }),
        }
    }
}

fn locate<P: Piece>(key: Option<P>, face: Face) -> (usize, usize) {
    let key = key.expect("bordering faces always share pieces");
    let axis = key
        .faces()
        .iter()
        .position(|&f| f == face)
        .expect("ring pieces touch the turning face");
    (slot_of(key), axis)
}

/// Move the occupant of every ring position one step clockwise. The value
/// is re-aligned to its new key, because the turning face can sit at a
/// different axis in the destination key than in the source key.
fn cycle<P: Piece>(slots: &mut [P], ring: &[(usize, usize); 4]) {
    let values = ring.map(|(slot, _)| slots[slot]);
    for (i, value) in values.into_iter().enumerate() {
        let (_, from_axis) = ring[i];
        let (to_slot, to_axis) = ring[(i + 1) % 4];
        let len = value.faces().len();
        slots[to_slot] = value.shifted((to_axis + len - from_axis) % len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Face::*;

    #[test]
    fn turning_white_cycles_the_top_layer() {
        let mut state = CubeState::solved();
        state.turn(White);

        assert_eq!(state[[White, Orange]], [White, Green]);
        assert_eq!(state[[White, Green]], [White, Red]);
        assert_eq!(state[[White, Blue]], [White, Orange]);
        assert_eq!(state[[White, Red]], [White, Blue]);
        assert_eq!(state[[White, Orange, Blue]], [White, Green, Orange]);
        assert_eq!(state[[White, Green, Orange]], [White, Red, Green]);
        assert_eq!(state[[White, Blue, Red]], [White, Orange, Blue]);
        assert_eq!(state[[White, Red, Green]], [White, Blue, Red]);
        assert_eq!(state.unsolved().count(), 8);
    }

    #[test]
    fn orientation_delta_finds_the_shift() {
        let key = [White, Green, Orange];
        assert_eq!(orientation_delta(key, key), Some(0));
        assert_eq!(orientation_delta(key, [Orange, White, Green]), Some(1));
        assert_eq!(orientation_delta(key, [Green, Orange, White]), Some(2));
        assert_eq!(orientation_delta(key, [White, Orange, Green]), None);
        assert_eq!(orientation_delta([White, Blue], [Blue, White]), Some(1));
    }

    #[test]
    fn duplicate_pieces_are_rejected() {
        let mut edges = EDGES;
        edges[1] = [Orange, White];
        assert_eq!(
            CubeState::from_pieces(edges, CORNERS),
            Err(StateError::DuplicatePiece(PieceKey::Edge([White, Orange])))
        );

        let mut corners = CORNERS;
        corners[0] = [White, Yellow, Orange];
        assert!(matches!(
            CubeState::from_pieces(EDGES, corners),
            Err(StateError::Geometry(GeometryError::NoSuchPiece(_)))
        ));
    }

    #[test]
    fn pieces_are_looked_up_in_any_order() {
        let mut state = CubeState::solved();
        state.turn(White);
        assert_eq!(state.piece(&[Orange, White]), Ok(PieceKey::Edge([White, Green])));
        assert!(state.piece(&[White, Yellow]).is_err());
    }
}
