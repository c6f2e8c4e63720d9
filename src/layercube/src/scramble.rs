use fastrand::Rng;

use crate::{geometry::Face, state::CubeState};

pub const DEFAULT_SCRAMBLE_LENGTH: usize = 1000;

/// `length` uniformly random quarter turns.
#[must_use]
pub fn random_moves(rng: &mut Rng, length: usize) -> Vec<Face> {
    (0..length)
        .map(|_| Face::ALL[rng.usize(..Face::ALL.len())])
        .collect()
}

/// A reproducible scramble: the moves drawn from `seed` and the state they
/// produce from a solved cube.
#[must_use]
pub fn scrambled(seed: u64, length: usize) -> (Vec<Face>, CubeState) {
    let moves = random_moves(&mut Rng::with_seed(seed), length);
    let mut state = CubeState::solved();
    state.apply_moves(moves.iter().copied());
    (moves, state)
}
