//! Case analysis for the seven stages. Each function inspects the state and
//! picks the next generator to run; none of them changes the state.

use itertools::Itertools;

use crate::{
    commutator,
    geometry::{
        Corner, Edge, Face, MIDDLE_EDGES, Piece, WHITE_CORNERS, WHITE_EDGES, YELLOW_CORNERS,
        YELLOW_EDGES,
    },
    solver::{Plan, SolveError, Stage},
    state::{CubeState, orientation_delta, slot_of},
};

use Face::{White, Yellow};

pub(crate) fn plan(stage: Stage, state: &CubeState) -> Result<Plan, SolveError> {
    let moves = match stage {
        Stage::WhiteEdges => white_edges(state)?,
        Stage::WhiteCorners => white_corners(state)?,
        Stage::MiddleEdges => middle_edges(state)?,
        Stage::YellowEdgePlacement => return yellow_edge_placement(state),
        Stage::YellowEdgeOrientation => yellow_edge_orientation(state)?,
        Stage::YellowCornerPlacement => yellow_corner_placement(state)?,
        Stage::YellowCornerOrientation => yellow_corner_orientation(state)?,
    };
    Ok(Plan::new(moves))
}

fn inconsistent(stage: Stage, detail: &'static str) -> SolveError {
    SolveError::Inconsistent { stage, detail }
}

fn white_edges(state: &CubeState) -> Result<Vec<Face>, SolveError> {
    let find = |positions: [Edge; 4], test: fn(Edge, Edge) -> bool| {
        positions
            .into_iter()
            .find(|&position| test(position, state[position]))
    };

    // Cases in priority order
    if let Some(position) = find(WHITE_EDGES, |key, value| value[0] == White && value != key) {
        return Ok(commutator::realign_white_edge(position, state[position])?);
    }
    if let Some(position) = find(WHITE_EDGES, |_, value| value[1] == White) {
        return Ok(commutator::flip_white_edge(position)?);
    }
    if let Some(position) = find(YELLOW_EDGES, |_, value| value[1] == White) {
        return Ok(commutator::raise_white_edge(position, state[position])?);
    }
    if let Some(position) = find(YELLOW_EDGES, |_, value| value[0] == White) {
        return Ok(commutator::lift_white_edge(position)?);
    }
    if let Some(position) = find(MIDDLE_EDGES, |_, value| value.contains(&White)) {
        return Ok(commutator::evict_middle_edge(position)?);
    }
    Err(inconsistent(Stage::WhiteEdges, "no white edge can be moved"))
}

fn white_corners(state: &CubeState) -> Result<Vec<Face>, SolveError> {
    let source = match YELLOW_CORNERS
        .iter()
        .find(|&&position| state[position].contains(&White))
    {
        Some(&position) => position,
        None => {
            // Work through the yellow corner under a misplaced white corner
            let target = WHITE_CORNERS
                .iter()
                .find(|&&position| state[position] != position)
                .ok_or_else(|| inconsistent(Stage::WhiteCorners, "no white corner is out of place"))?;
            [Yellow, target[2], target[1]]
        }
    };
    Ok(commutator::insert_white_corner(source, state[source])?)
}

fn is_middle_edge(edge: Edge) -> bool {
    !edge.contains(&White) && !edge.contains(&Yellow)
}

fn middle_edges(state: &CubeState) -> Result<Vec<Face>, SolveError> {
    let conduit = YELLOW_EDGES
        .iter()
        .copied()
        .find(|&position| is_middle_edge(state[position]))
        .unwrap_or(YELLOW_EDGES[0]);
    let occupant = state[conduit];
    let [matching, other] = if is_middle_edge(occupant) {
        occupant
    } else {
        MIDDLE_EDGES
            .iter()
            .copied()
            .find(|&position| state[position] != position)
            .ok_or_else(|| inconsistent(Stage::MiddleEdges, "no middle edge is out of place"))?
    };
    Ok(commutator::insert_middle_edge(conduit, matching, other)?)
}

fn misplaced<P: Piece>(state: &CubeState, positions: &[P]) -> Vec<P> {
    positions
        .iter()
        .copied()
        .filter(|&position| !P::slots(state)[slot_of(position)].same_faces(&position))
        .collect()
}

fn take<P: Piece>(pieces: &mut Vec<P>, piece: P) -> Option<P> {
    let at = pieces.iter().position(|&candidate| candidate == piece)?;
    Some(pieces.remove(at))
}

/// Turn the yellow layer until at least three of its edges are out of place,
/// then cycle three of them.
fn yellow_edge_placement(state: &CubeState) -> Result<Plan, SolveError> {
    const STAGE: Stage = Stage::YellowEdgePlacement;

    let mut probe = state.clone();
    let mut turns = 0;
    let mut to_move = loop {
        probe.turn(Yellow);
        turns += 1;
        let to_move = misplaced(&probe, &YELLOW_EDGES);
        if to_move.len() >= 3 || turns == 4 {
            break to_move;
        }
    };
    if to_move.is_empty() {
        return Err(inconsistent(STAGE, "no yellow edge is out of place"));
    }

    // Prefer a pivot whose occupant belongs across the cube from it, so the
    // cycle lands that piece at home
    let pivot = to_move
        .iter()
        .position(|&position| probe[position].contains(&position[0].opposite()))
        .unwrap_or(0);
    let e2 = to_move.remove(pivot);
    let e0 = take(&mut to_move, [e2[0].opposite(), Yellow])
        .ok_or_else(|| inconsistent(STAGE, "the edge across from the pivot is already placed"))?;
    let e1 = to_move
        .pop()
        .ok_or_else(|| inconsistent(STAGE, "fewer than three yellow edges to cycle"))?;

    Ok(Plan::with_setup(
        vec![Yellow; turns % 4],
        commutator::cycle_yellow_edges(e0, e1, e2)?,
    ))
}

fn yellow_edge_orientation(state: &CubeState) -> Result<Vec<Face>, SolveError> {
    let mut to_flip = YELLOW_EDGES
        .iter()
        .copied()
        .filter(|&position| state[position] != position)
        .collect_vec();
    match (to_flip.pop(), to_flip.pop()) {
        (Some(e0), Some(e1)) => Ok(commutator::flip_yellow_edges(e0, e1)?),
        _ => Err(inconsistent(
            Stage::YellowEdgeOrientation,
            "a single yellow edge is flipped",
        )),
    }
}

fn yellow_corner_placement(state: &CubeState) -> Result<Vec<Face>, SolveError> {
    const STAGE: Stage = Stage::YellowCornerPlacement;

    let mut to_move = misplaced(state, &YELLOW_CORNERS);
    // A corner whose occupant shares only yellow with it belongs diagonally
    // across; failing that, settle for the last misplaced corner
    let c2 = to_move
        .iter()
        .copied()
        .find(|&position| {
            state[position]
                .iter()
                .filter(|face| position.contains(face))
                .count()
                == 1
        })
        .or_else(|| to_move.last().copied())
        .ok_or_else(|| inconsistent(STAGE, "no yellow corner is out of place"))?;
    let c0: Corner = [c2[0], c2[1].opposite(), c2[2].opposite()];
    take(&mut to_move, c0)
        .ok_or_else(|| inconsistent(STAGE, "the corner across from the pivot is already placed"))?;
    take(&mut to_move, c2);
    let c1 = to_move
        .pop()
        .ok_or_else(|| inconsistent(STAGE, "fewer than three yellow corners to cycle"))?;

    Ok(commutator::cycle_yellow_corners(c0, c1, c2)?)
}

fn yellow_corner_orientation(state: &CubeState) -> Result<Vec<Face>, SolveError> {
    const STAGE: Stage = Stage::YellowCornerOrientation;

    let mut clockwise = Vec::new();
    let mut anticlockwise = Vec::new();
    for position in YELLOW_CORNERS {
        match orientation_delta(position, state[position]) {
            Some(0) => {}
            Some(1) => clockwise.push(position),
            Some(_) => anticlockwise.push(position),
            None => return Err(inconsistent(STAGE, "a yellow corner is mirrored")),
        }
    }

    let (cw, acw) = match (clockwise.len(), anticlockwise.len()) {
        (0, 0) => return Err(inconsistent(STAGE, "no yellow corner is twisted")),
        (1, 0) | (0, 1) => return Err(SolveError::SingleTwistedCorner),
        (0, _) => (anticlockwise.pop(), anticlockwise.pop()),
        (_, 0) => (clockwise.pop(), clockwise.pop()),
        _ => (clockwise.pop(), anticlockwise.pop()),
    };
    match (cw, acw) {
        (Some(cw), Some(acw)) => Ok(commutator::twist_yellow_corners(cw, acw)?),
        _ => Err(inconsistent(STAGE, "no pair of corners to twist")),
    }
}
