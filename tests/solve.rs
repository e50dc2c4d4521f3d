use huarongdao::{is_goal, manhattan_distance, write_trace, Puzzle, Solver};

/// The classic opening: the 2x2 target up top between two vertical pairs,
/// a horizontal pair, two more vertical pairs, four singles, two holes.
const CLASSIC: &str = "2113\n2113\n4665\n4775\n7007";

#[test]
fn both_strategies_solve_the_classic_opening() {
    let (puzzle, board) = Puzzle::load(CLASSIC).unwrap();
    let lower_bound = manhattan_distance(&board);

    let mut dfs = Solver::dfs(puzzle.clone(), board.clone());
    let dfs_goal = dfs.run().unwrap().expect("dfs finds a solution");

    let mut astar = Solver::astar(puzzle.clone(), board.clone());
    let astar_goal = astar.run().unwrap().expect("astar finds a solution");

    assert!(is_goal(&dfs_goal.board));
    assert!(is_goal(&astar_goal.board));

    // The heuristic is admissible, so no solution beats its initial value,
    // and A* is optimal while DFS returns whatever it hits first.
    assert!(astar_goal.cost >= lower_bound);
    assert!(astar_goal.cost <= dfs_goal.cost);
}

#[test]
fn reconstructed_paths_are_single_slides_from_start_to_goal() {
    let (puzzle, board) = Puzzle::load(CLASSIC).unwrap();

    let mut astar = Solver::astar(puzzle.clone(), board.clone());
    let goal = astar.run().unwrap().expect("astar finds a solution");
    let (cost, states) = goal.path();

    assert_eq!(cost as usize, states.len() - 1);
    assert_eq!(puzzle.identity(&board), states[0].identity);
    assert!(is_goal(&states.last().unwrap().board));

    for pair in states.windows(2) {
        let successors = pair[0]
            .successors(&puzzle, manhattan_distance)
            .unwrap();
        assert!(
            successors
                .iter()
                .any(|next| next.identity == pair[1].identity),
            "trace step is not a legal slide"
        );
    }
}

#[test]
fn relabeled_inputs_produce_identical_traces() {
    // Swap the instance labels of the two left/right vertical pairs; the
    // physical puzzle is unchanged, so the optimal trace must be too.
    let relabeled = "3112\n3112\n5664\n5775\n7007";

    let mut traces = Vec::new();
    for input in [CLASSIC, relabeled] {
        let (puzzle, board) = Puzzle::load(input).unwrap();
        let mut astar = Solver::astar(puzzle.clone(), board);
        let goal = astar.run().unwrap().expect("astar finds a solution");
        let (cost, states) = goal.path();

        let mut out = Vec::new();
        write_trace(&mut out, &puzzle, cost, &states).unwrap();
        traces.push(String::from_utf8(out).unwrap());
    }

    assert_eq!(traces[0], traces[1]);
}
