use itertools::Itertools;
use layercube::{
    CubeState, Face, LayerSolver, Solution, SolveError, Stage,
    geometry::{CORNERS, EDGES, Piece},
    notation,
    scramble::scrambled,
    solver::DEFAULT_MAX_STAGE_ITERATIONS,
};
use log::info;

fn faces(labels: &[u8]) -> Vec<Face> {
    labels
        .iter()
        .map(|&label| Face::from_label(label).unwrap())
        .collect()
}

fn solve_moves(moves: &[Face]) -> (CubeState, Solution) {
    let mut state = CubeState::solved();
    state.apply_moves(moves.iter().copied());
    let solution = LayerSolver::new().solve(&mut state).unwrap();
    (state, solution)
}

#[test_log::test]
fn solved_cube_needs_no_moves() {
    let (state, solution) = solve_moves(&[]);
    assert!(state.is_solved());
    assert!(solution.is_empty());
    assert!(solution.batches().is_empty());
}

#[test_log::test]
fn solutions_solve_their_scrambles() {
    for length in [1, 2, 3, 20, 1000] {
        for seed in 0..40 {
            let (_, mut state) = scrambled(seed, length);
            let start = state.clone();
            let solution = LayerSolver::new().solve(&mut state).unwrap();
            assert!(state.is_solved());

            // Replaying the moves from the scrambled state lands on solved too
            let mut replay = start;
            replay.apply_moves(solution.moves());
            assert!(replay.is_solved(), "seed {seed}, length {length}");
        }
    }
}

#[test_log::test]
fn every_stage_respects_the_iteration_bound() {
    for seed in 100..200 {
        let (_, mut state) = scrambled(seed, 500);
        let solution = LayerSolver::new().solve(&mut state).unwrap();
        for stage in Stage::ALL {
            let iterations = solution
                .batches()
                .iter()
                .filter(|batch| batch.stage == stage && !batch.auxiliary)
                .count();
            assert!(iterations <= 12, "{stage} took {iterations} iterations");
        }
        assert!(solution.len() < 600);
    }
}

#[test_log::test]
fn move_counts_are_stable() {
    let cases: [(&[u8], usize, [usize; 7]); 6] = [
        (
            &[
                3, 1, 4, 1, 5, 2, 6, 5, 3, 5, 2, 4, 6, 2, 6, 4, 3, 3, 1, 2, 5, 4, 6, 1, 3, 2, 4,
                5, 1, 6,
            ],
            358,
            [41, 31, 74, 76, 48, 56, 32],
        ),
        (&[1], 441, [40, 56, 79, 50, 96, 56, 64]),
        (&[6], 51, [0, 0, 0, 51, 0, 0, 0]),
        (&[6, 6], 50, [0, 0, 0, 50, 0, 0, 0]),
        (&[2, 3], 212, [16, 34, 76, 26, 0, 28, 32]),
        (&[5, 5, 2], 243, [12, 5, 34, 52, 48, 28, 64]),
    ];

    for (scramble, total, per_stage) in cases {
        let (_, solution) = solve_moves(&faces(scramble));
        info!("{scramble:?}: {} quarter turns", solution.len());
        assert_eq!(solution.len(), total, "{scramble:?}");
        let counted = Stage::ALL.map(|stage| solution.stage_moves(stage).count());
        assert_eq!(counted, per_stage, "{scramble:?}");
    }
}

#[test_log::test]
fn single_turn_opens_with_a_white_edge_realignment() {
    let (_, solution) = solve_moves(&[Face::White]);
    let first = &solution.batches()[0];
    assert_eq!(first.stage, Stage::WhiteEdges);
    assert_eq!(notation::format_compact(&first.moves), "O W O' W'");
}

#[test_log::test]
fn yellow_turns_are_undone_by_setup_turns() {
    let (_, solution) = solve_moves(&[Face::Yellow]);
    let setup = solution
        .batches()
        .iter()
        .filter(|batch| batch.auxiliary)
        .collect_vec();
    assert!(!setup.is_empty());
    assert!(setup.iter().all(|batch| batch.stage == Stage::YellowEdgePlacement));
    assert!(
        setup
            .iter()
            .all(|batch| batch.moves.iter().all(|&face| face == Face::Yellow))
    );
}

/// After every single batch, the exit conditions of all finished stages must
/// still hold.
#[test_log::test]
fn finished_stages_stay_finished() {
    for seed in 0..30 {
        let (_, mut state) = scrambled(seed, 1000);
        for (done, stage) in Stage::ALL.into_iter().enumerate() {
            let mut iterations = 0;
            while !stage.is_complete(&state) {
                let plan = stage.plan(&state).unwrap();
                state.apply_moves(plan.setup.iter().chain(&plan.moves).copied());
                for finished in &Stage::ALL[..done] {
                    assert!(
                        finished.is_complete(&state),
                        "{stage} broke {finished} (seed {seed})"
                    );
                }
                iterations += 1;
                assert!(iterations <= DEFAULT_MAX_STAGE_ITERATIONS);
            }
        }
        assert!(state.is_solved());
    }
}

#[test_log::test]
fn planning_does_not_touch_the_state() {
    let (_, state) = scrambled(5, 1000);
    let before = state.clone();
    for stage in Stage::ALL {
        let _ = stage.plan(&state);
    }
    assert_eq!(state, before);
}

#[test_log::test]
fn a_single_twisted_corner_is_reported() {
    let mut corners = CORNERS;
    corners[6] = corners[6].shifted(1);
    let mut state = CubeState::from_pieces(EDGES, corners).unwrap();

    let error = LayerSolver::new().solve(&mut state).unwrap_err();
    assert_eq!(error, SolveError::SingleTwistedCorner);
}

#[test_log::test]
fn a_single_flipped_edge_is_reported() {
    let mut edges = EDGES;
    edges[9] = edges[9].shifted(1);
    let mut state = CubeState::from_pieces(edges, CORNERS).unwrap();

    let error = LayerSolver::new().solve(&mut state).unwrap_err();
    assert!(matches!(
        error,
        SolveError::Inconsistent {
            stage: Stage::YellowEdgeOrientation,
            ..
        }
    ));
}

#[test_log::test]
fn a_mirrored_corner_is_reported() {
    let mut corners = CORNERS;
    let [lead, a, b] = corners[4];
    corners[4] = [lead, b, a];
    let mut state = CubeState::from_pieces(EDGES, corners).unwrap();

    let error = LayerSolver::new().solve(&mut state).unwrap_err();
    assert!(matches!(
        error,
        SolveError::Inconsistent {
            stage: Stage::YellowCornerOrientation,
            ..
        }
    ));
}

#[test_log::test]
fn iteration_cap_stops_a_stage() {
    let mut state = CubeState::solved();
    state.turn(Face::White);

    let error = LayerSolver::new()
        .with_max_stage_iterations(0)
        .solve(&mut state)
        .unwrap_err();
    assert_eq!(
        error,
        SolveError::IterationLimitExceeded {
            stage: Stage::WhiteEdges,
            limit: 0
        }
    );
}

#[test_log::test]
fn a_stage_can_be_run_alone() {
    let (_, mut state) = scrambled(9, 1000);
    let mut solution = Solution::default();
    let solver = LayerSolver::new();
    solver
        .solve_stage(&mut state, Stage::WhiteEdges, &mut solution)
        .unwrap();

    assert!(Stage::WhiteEdges.is_complete(&state));
    assert!(
        solution
            .batches()
            .iter()
            .all(|batch| batch.stage == Stage::WhiteEdges)
    );
}
