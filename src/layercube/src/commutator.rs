//! Move generators. Each one is a fixed template written in roles, expanded
//! in a frame chosen from the pieces involved. Generators never look at or
//! change a cube state; they only build the sequence.

use std::iter;

use crate::{
    geometry::{Corner, Edge, Face, GeometryError, clockwise_neighbors, ring_position},
    placement::{
        Role::{self, D, F, L, R, U},
        RoleFrame,
    },
};

const FLIP_WHITE_EDGE: &[Role] = &[F, U, U, U, R, U];
const LIFT_WHITE_EDGE: &[Role] = &[F, F, F, R, R, R, D, R, F];
const EVICT_MIDDLE_EDGE: &[Role] = &[F, D, F, F, F];

const CORNER_FROM_BELOW: &[Role] = &[R, R, R, D, R, F, D, D, F, F, F];
const CORNER_FROM_FRONT: &[Role] = &[F, F, F, D, F];
const CORNER_FROM_RIGHT: &[Role] = &[F, D, D, D, F, F, F];
const CORNER_EXTRACT: &[Role] = &[D, F, D, D, D, F, F, F];

const MIDDLE_EDGE_LEFT: &[Role] = &[L, D, D, D, L, L, L, D, D, D, F, F, F, D, F];
const MIDDLE_EDGE_RIGHT: &[Role] = &[R, R, R, D, R, D, F, D, D, D, F, F, F];

const EDGE_CYCLE_FRONT: (&[Role], &[Role]) = (
    &[F, R, R, R, D, D, D, F, F, F, R],
    &[R, R, R, F, D, R, F, F, F],
);
const EDGE_CYCLE_LEFT: (&[Role], &[Role]) = (
    &[L, F, F, F, D, D, D, L, L, L, F],
    &[F, F, F, L, D, F, L, L, L],
);

const EDGE_FLIP: (&[Role], &[Role]) = (
    &[
        R, L, L, L, F, L, R, R, R, D, D, D, R, L, L, L, F, F, R, R, R, L,
    ],
    &[
        L, L, L, R, F, F, L, R, R, R, D, R, L, L, L, F, F, F, L, R, R, R,
    ],
);

const CORNER_CYCLE: (&[Role], &[Role]) = (
    &[R, R, R, L, D, R, D, D, D, L, L, L],
    &[L, D, R, R, R, D, D, D, L, L, L, R],
);

const CORNER_TWIST: (&[Role], &[Role]) = (
    &[R, R, R, D, R, D, D, D, R, R, R, D, R],
    &[R, R, R, D, D, D, R, D, R, R, R, D, D, D, R],
);

/// A sequence of roles under construction.
struct Recipe(Vec<Role>);

impl Recipe {
    fn new() -> Self {
        Recipe(Vec::new())
    }

    fn then(mut self, roles: &[Role]) -> Self {
        self.0.extend_from_slice(roles);
        self
    }

    fn turns(mut self, role: Role, quarter_turns: usize) -> Self {
        self.0.extend(iter::repeat_n(role, quarter_turns));
        self
    }

    /// `first U^p second U^(4-p)`, the shape of every last-layer commutator.
    fn commutator(self, (first, second): (&[Role], &[Role]), p: usize) -> Self {
        self.then(first)
            .turns(U, p)
            .then(second)
            .turns(U, 4 - p)
    }

    fn in_frame(self, frame: RoleFrame) -> Vec<Face> {
        self.0.into_iter().map(|role| frame.face(role)).collect()
    }
}

fn around(axis: Face, face: Face) -> Result<usize, GeometryError> {
    ring_position(axis, face).ok_or(GeometryError::NotAdjacent(axis, face))
}

/// `(a - b) mod 4` for ring positions.
fn offset(a: usize, b: usize) -> usize {
    (a + 4 - b) % 4
}

/// A white edge lies white side up in the wrong white-layer slot: swing the
/// slot's face down, rotate the white layer over the piece and swing back.
///
/// # Errors
///
/// Fails if the occupant is not a white edge.
pub fn realign_white_edge(position: Edge, occupant: Edge) -> Result<Vec<Face>, GeometryError> {
    let [_, home] = position;
    let [_, side] = occupant;
    let p = offset(around(Face::White, home)?, around(Face::White, side)?);
    Ok(Recipe::new()
        .then(&[F])
        .turns(U, p)
        .then(&[F, F, F])
        .turns(U, (4 - p) % 4)
        .in_frame(RoleFrame::new(Face::White, home)?))
}

/// Flip the white edge sitting in `position` with its white face outward.
///
/// # Errors
///
/// Fails if `position` is not a white-layer edge.
pub fn flip_white_edge(position: Edge) -> Result<Vec<Face>, GeometryError> {
    Ok(Recipe::new()
        .then(FLIP_WHITE_EDGE)
        .in_frame(RoleFrame::new(Face::White, position[1])?))
}

/// A white edge in the yellow layer shows white downward: turn the yellow
/// layer until it is under its home and raise it with a half turn.
///
/// # Errors
///
/// Fails if `position` is not a yellow-layer edge holding a white edge.
pub fn raise_white_edge(position: Edge, occupant: Edge) -> Result<Vec<Face>, GeometryError> {
    let [side, _] = occupant;
    let p = offset(
        around(Face::Yellow, side)?,
        around(Face::Yellow, position[0])?,
    );
    Ok(Recipe::new()
        .turns(D, p)
        .then(&[F, F])
        .in_frame(RoleFrame::new(Face::White, side)?))
}

/// A white edge in the yellow layer shows white sideways.
///
/// # Errors
///
/// Fails if `position` is not a yellow-layer edge.
pub fn lift_white_edge(position: Edge) -> Result<Vec<Face>, GeometryError> {
    Ok(Recipe::new()
        .then(LIFT_WHITE_EDGE)
        .in_frame(RoleFrame::new(Face::White, position[0])?))
}

/// Knock whatever sits in a middle-layer slot down into the yellow layer.
///
/// # Errors
///
/// Fails if `position` is not a middle-layer edge.
pub fn evict_middle_edge(position: Edge) -> Result<Vec<Face>, GeometryError> {
    let [a, b] = position;
    let ring = clockwise_neighbors(Face::Yellow);
    let front = if ring[(around(Face::Yellow, a)? + 1) % 4] == b {
        a
    } else {
        b
    };
    Ok(Recipe::new()
        .then(EVICT_MIDDLE_EDGE)
        .in_frame(RoleFrame::new(Face::White, front)?))
}

/// Bring the white corner at (or for) the yellow-layer `position` up into the
/// white layer. `occupant` may lack white entirely, in which case the corner
/// below a misplaced white corner is swapped out first.
///
/// # Errors
///
/// Fails if `position` is not a yellow-layer corner.
pub fn insert_white_corner(
    position: Corner,
    occupant: Corner,
) -> Result<Vec<Face>, GeometryError> {
    let yellow = |face| around(Face::Yellow, face);

    if occupant[0] == Face::White {
        let shared = position
            .iter()
            .filter(|face| occupant.contains(face))
            .count();
        let p = match shared {
            2 => 0,
            0 => 2,
            _ if position[2] == occupant[2] => 1,
            _ => 3,
        };
        Ok(Recipe::new()
            .turns(D, p)
            .then(CORNER_FROM_BELOW)
            .in_frame(RoleFrame::new(Face::White, occupant[2])?))
    } else if occupant[1] == Face::White {
        let front = occupant[2];
        let p = offset(yellow(front)?, yellow(position[2])?);
        Ok(Recipe::new()
            .turns(D, (p + 3) % 4)
            .then(CORNER_FROM_FRONT)
            .in_frame(RoleFrame::new(Face::White, front)?))
    } else if occupant[2] == Face::White {
        let front = occupant[1];
        let p = offset(yellow(front)?, yellow(position[1])?);
        Ok(Recipe::new()
            .turns(D, (p + 1) % 4)
            .then(CORNER_FROM_RIGHT)
            .in_frame(RoleFrame::new(Face::White, front)?))
    } else {
        Ok(Recipe::new()
            .then(CORNER_EXTRACT)
            .in_frame(RoleFrame::new(Face::White, position[1])?))
    }
}

/// Insert the middle edge `(matching, other)` from the yellow-layer edge
/// position `conduit`, or kick a wrong piece out of the `(matching, other)`
/// slot when the conduit holds no middle edge.
///
/// # Errors
///
/// Fails if `matching` and `other` are not adjacent side faces.
pub fn insert_middle_edge(
    conduit: Edge,
    matching: Face,
    other: Face,
) -> Result<Vec<Face>, GeometryError> {
    let target = around(Face::Yellow, matching)?;
    let p0 = offset(target, around(Face::Yellow, conduit[0])?);
    let p1 = offset(target, around(Face::Yellow, other)?);
    let insertion = if p1 == 1 {
        MIDDLE_EDGE_LEFT
    } else {
        MIDDLE_EDGE_RIGHT
    };
    Ok(Recipe::new()
        .turns(D, (p0 + p1) % 4)
        .then(insertion)
        .in_frame(RoleFrame::new(Face::White, matching)?))
}

/// Cycle the contents of three yellow-layer edge positions, holding yellow
/// up with `e2` in front. `e0` must be the edge across from `e2`.
///
/// # Errors
///
/// Fails if the keys are not yellow-layer edges.
pub fn cycle_yellow_edges(e0: Edge, e1: Edge, e2: Edge) -> Result<Vec<Face>, GeometryError> {
    debug_assert_eq!(e0[0], e2[0].opposite());
    let p = offset(around(Face::Yellow, e2[0])?, around(Face::Yellow, e1[0])?);
    let recipe = if p == 1 {
        Recipe::new().commutator(EDGE_CYCLE_FRONT, p)
    } else {
        Recipe::new().commutator(EDGE_CYCLE_LEFT, p)
    };
    Ok(recipe.in_frame(RoleFrame::new(Face::Yellow, e2[0])?))
}

/// Flip two yellow-layer edges in place.
///
/// # Errors
///
/// Fails if the keys are not yellow-layer edges.
pub fn flip_yellow_edges(e0: Edge, e1: Edge) -> Result<Vec<Face>, GeometryError> {
    let p = offset(around(Face::Yellow, e0[0])?, around(Face::Yellow, e1[0])?);
    Ok(Recipe::new()
        .commutator(EDGE_FLIP, p)
        .in_frame(RoleFrame::new(Face::Yellow, e0[0])?))
}

/// Cycle the contents of three yellow-layer corner positions. `c0` and `c2`
/// share only yellow; `c1` is the third.
///
/// # Errors
///
/// Fails if the keys are not corners.
pub fn cycle_yellow_corners(
    c0: Corner,
    c1: Corner,
    c2: Corner,
) -> Result<Vec<Face>, GeometryError> {
    let (frame, p) = if c0[2] == c1[1] {
        (RoleFrame::from_corner(c1)?, 1)
    } else {
        (RoleFrame::from_corner(c2)?, 3)
    };
    Ok(Recipe::new().commutator(CORNER_CYCLE, p).in_frame(frame))
}

/// Twist one yellow corner clockwise and another anticlockwise, leaving
/// every other piece where it was.
///
/// # Errors
///
/// Fails if the keys are not yellow-layer corners.
pub fn twist_yellow_corners(
    clockwise: Corner,
    anticlockwise: Corner,
) -> Result<Vec<Face>, GeometryError> {
    let front = anticlockwise[2];
    let p = offset(around(Face::Yellow, front)?, around(Face::Yellow, clockwise[2])?);
    Ok(Recipe::new()
        .commutator(CORNER_TWIST, p)
        .in_frame(RoleFrame::new(Face::Yellow, front)?))
}
