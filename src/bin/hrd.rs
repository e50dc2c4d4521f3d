use std::fs::{self, File};
use std::io::BufWriter;
use std::time::Instant;

use anyhow::{Context, Result};

use huarongdao::{write_trace, Frontier, Puzzle, Solver};

fn solve_and_write<F: Frontier>(
    name: &str,
    mut solver: Solver<F>,
    output_path: &str,
) -> Result<()> {
    let start = Instant::now();
    let goal = solver.run()?;
    let elapsed = start.elapsed().as_secs_f32();

    match goal {
        Some(goal) => {
            let (cost, states) = goal.path();
            log::info!(
                "{name}: cost {cost}, {} states checked, {elapsed:.3}s",
                solver.states_checked()
            );

            let file = File::create(output_path)
                .with_context(|| format!("cannot create {output_path}"))?;
            write_trace(&mut BufWriter::new(file), solver.puzzle(), cost, &states)
                .with_context(|| format!("cannot write {output_path}"))?;
        }
        None => {
            eprintln!(
                "{name}: no solution found ({} states checked), skipping {output_path}",
                solver.states_checked()
            );
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("usage: {} <puzzle> <dfs-output> <astar-output>", args[0]);
        std::process::exit(1);
    }

    let input =
        fs::read_to_string(&args[1]).with_context(|| format!("cannot read {}", args[1]))?;
    let (puzzle, board) = Puzzle::load(&input)?;
    log::info!("loaded {}:\n{}", args[1], board.render(&puzzle.symbols));

    // The two strategies run independently; one failing to find a goal does
    // not stop the other.
    solve_and_write("dfs", Solver::dfs(puzzle.clone(), board.clone()), &args[2])?;
    solve_and_write("astar", Solver::astar(puzzle, board), &args[3])?;

    Ok(())
}
