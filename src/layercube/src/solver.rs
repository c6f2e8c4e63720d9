use std::{fmt, time::Instant};

use log::{debug, info};
use thiserror::Error;

use crate::{
    geometry::{
        Face, GeometryError, MIDDLE_EDGES, WHITE_CORNERS, WHITE_EDGES, YELLOW_CORNERS,
        YELLOW_EDGES,
    },
    notation, placement, stages, start,
    state::CubeState,
    success, working,
};

/// Upper bound on how many generator applications a single stage may take.
/// Real cubes never need more than a dozen.
pub const DEFAULT_MAX_STAGE_ITERATIONS: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("{stage}: {detail}. The cube cannot be in this state")]
    Inconsistent { stage: Stage, detail: &'static str },
    #[error("Exactly one yellow corner is twisted. The cube cannot be in this state")]
    SingleTwistedCorner,
    #[error("{stage} did not finish within {limit} iterations")]
    IterationLimitExceeded { stage: Stage, limit: usize },
    #[error("Every stage finished but the cube is not solved")]
    Unsolved,
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// The seven stages of the layer-by-layer method, in the order they run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    WhiteEdges,
    WhiteCorners,
    MiddleEdges,
    YellowEdgePlacement,
    YellowEdgeOrientation,
    YellowCornerPlacement,
    YellowCornerOrientation,
}

impl Stage {
    pub const ALL: [Self; 7] = [
        Stage::WhiteEdges,
        Stage::WhiteCorners,
        Stage::MiddleEdges,
        Stage::YellowEdgePlacement,
        Stage::YellowEdgeOrientation,
        Stage::YellowCornerPlacement,
        Stage::YellowCornerOrientation,
    ];

    /// 1-based position in the method.
    #[must_use]
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// The exit condition of this stage.
    #[must_use]
    pub fn is_complete(self, state: &CubeState) -> bool {
        use placement::{is_placed, is_strictly_placed};

        match self {
            Stage::WhiteEdges => is_strictly_placed(state, &WHITE_EDGES),
            Stage::WhiteCorners => is_strictly_placed(state, &WHITE_CORNERS),
            Stage::MiddleEdges => is_strictly_placed(state, &MIDDLE_EDGES),
            Stage::YellowEdgePlacement => is_placed(state, &YELLOW_EDGES),
            Stage::YellowEdgeOrientation => is_strictly_placed(state, &YELLOW_EDGES),
            Stage::YellowCornerPlacement => is_placed(state, &YELLOW_CORNERS),
            Stage::YellowCornerOrientation => is_strictly_placed(state, &YELLOW_CORNERS),
        }
    }

    /// Decide the next moves of this stage without touching `state`.
    ///
    /// # Errors
    ///
    /// Fails when no case of the stage applies, which only happens for states
    /// a real cube cannot reach.
    pub fn plan(self, state: &CubeState) -> Result<Plan, SolveError> {
        stages::plan(self, state)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Stage::WhiteEdges => "white edges",
            Stage::WhiteCorners => "white corners",
            Stage::MiddleEdges => "middle layer edges",
            Stage::YellowEdgePlacement => "placing yellow edges",
            Stage::YellowEdgeOrientation => "flipping yellow edges",
            Stage::YellowCornerPlacement => "placing yellow corners",
            Stage::YellowCornerOrientation => "twisting yellow corners",
        };
        write!(f, "Stage {} ({description})", self.number())
    }
}

/// One step of a stage: optional setup turns followed by a generator's
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub setup: Vec<Face>,
    pub moves: Vec<Face>,
}

impl Plan {
    #[must_use]
    pub fn new(moves: Vec<Face>) -> Self {
        Plan {
            setup: vec![],
            moves,
        }
    }

    #[must_use]
    pub fn with_setup(setup: Vec<Face>, moves: Vec<Face>) -> Self {
        Plan { setup, moves }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveBatch {
    pub stage: Stage,
    /// Setup turns emitted on their own rather than by a generator.
    pub auxiliary: bool,
    pub moves: Vec<Face>,
}

/// Every batch applied while solving, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    batches: Vec<MoveBatch>,
}

impl Solution {
    #[must_use]
    pub fn batches(&self) -> &[MoveBatch] {
        &self.batches
    }

    pub fn moves(&self) -> impl Iterator<Item = Face> + '_ {
        self.batches
            .iter()
            .flat_map(|batch| batch.moves.iter().copied())
    }

    pub fn stage_moves(&self, stage: Stage) -> impl Iterator<Item = Face> + '_ {
        self.batches
            .iter()
            .filter(move |batch| batch.stage == stage)
            .flat_map(|batch| batch.moves.iter().copied())
    }

    /// Number of quarter turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.iter().map(|batch| batch.moves.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drives the seven stages over a cube state.
#[derive(Debug, Clone)]
pub struct LayerSolver {
    max_stage_iterations: usize,
}

impl Default for LayerSolver {
    fn default() -> Self {
        LayerSolver {
            max_stage_iterations: DEFAULT_MAX_STAGE_ITERATIONS,
        }
    }
}

impl LayerSolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_stage_iterations(mut self, max_stage_iterations: usize) -> Self {
        self.max_stage_iterations = max_stage_iterations;
        self
    }

    /// Solve `state` in place, returning the moves applied.
    ///
    /// # Errors
    ///
    /// The solver fails on states no real cube can reach; see `SolveError`.
    /// `state` is left however far the solver got.
    pub fn solve(&self, state: &mut CubeState) -> Result<Solution, SolveError> {
        info!(start!("Solving cube layer by layer"));
        let start = Instant::now();

        let mut solution = Solution::default();
        for stage in Stage::ALL {
            self.solve_stage(state, stage, &mut solution)?;
        }
        if !state.is_solved() {
            return Err(SolveError::Unsolved);
        }

        info!(
            success!("Solved in {} quarter turns in {:.3}s"),
            solution.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(solution)
    }

    /// Run a single stage until its exit condition holds, appending its
    /// batches to `solution`.
    ///
    /// # Errors
    ///
    /// See `Stage::plan`. Also fails if the stage needs more than the
    /// configured number of iterations.
    pub fn solve_stage(
        &self,
        state: &mut CubeState,
        stage: Stage,
        solution: &mut Solution,
    ) -> Result<(), SolveError> {
        debug!(working!("{}..."), stage);
        let stage_start = Instant::now();
        let before = solution.len();

        let mut iterations = 0;
        while !stage.is_complete(state) {
            if iterations == self.max_stage_iterations {
                return Err(SolveError::IterationLimitExceeded {
                    stage,
                    limit: self.max_stage_iterations,
                });
            }
            iterations += 1;

            let Plan { setup, moves } = stage.plan(state)?;
            for (auxiliary, moves) in [(true, setup), (false, moves)] {
                if moves.is_empty() {
                    continue;
                }
                debug!(
                    working!("{} iteration {}: {}"),
                    stage,
                    iterations,
                    notation::format_compact(&moves)
                );
                state.apply_moves(moves.iter().copied());
                solution.batches.push(MoveBatch {
                    stage,
                    auxiliary,
                    moves,
                });
            }
        }

        info!(
            success!("{} done in {} iterations, {} quarter turns, {:.3}s"),
            stage,
            iterations,
            solution.len() - before,
            stage_start.elapsed().as_secs_f64()
        );
        Ok(())
    }
}
