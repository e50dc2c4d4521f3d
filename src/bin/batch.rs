//! Run both strategies over every puzzle file in a directory, writing
//! `<name>_dfs.txt` and `<name>_astar.txt` next to each other in the output
//! directory. A file that fails to load or solve is reported and skipped; the
//! rest of the batch still runs.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use huarongdao::{write_trace, Frontier, Puzzle, Solver};

fn solve_one<F: Frontier>(mut solver: Solver<F>, output_path: &Path) -> Result<bool> {
    match solver.run()? {
        Some(goal) => {
            let (cost, states) = goal.path();
            let file = File::create(output_path)
                .with_context(|| format!("cannot create {}", output_path.display()))?;
            write_trace(&mut BufWriter::new(file), solver.puzzle(), cost, &states)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn run_file(input_path: &Path, output_dir: &Path) -> Result<()> {
    let name = input_path
        .file_name()
        .with_context(|| format!("bad file name {}", input_path.display()))?
        .to_string_lossy()
        .into_owned();

    let input = fs::read_to_string(input_path)
        .with_context(|| format!("cannot read {}", input_path.display()))?;
    let (puzzle, board) = Puzzle::load(&input)?;

    let start = Instant::now();

    let dfs = Solver::dfs(puzzle.clone(), board.clone());
    if !solve_one(dfs, &output_dir.join(format!("{name}_dfs.txt")))? {
        eprintln!("{name}: dfs found no solution, output skipped");
    }

    let astar = Solver::astar(puzzle, board);
    if !solve_one(astar, &output_dir.join(format!("{name}_astar.txt")))? {
        eprintln!("{name}: astar found no solution, output skipped");
    }

    println!("{name}: finished in {:.3}s", start.elapsed().as_secs_f32());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: {} <input-dir> <output-dir>", args[0]);
        std::process::exit(1);
    }

    let input_dir = Path::new(&args[1]);
    let output_dir = Path::new(&args[2]);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;

    for entry in
        fs::read_dir(input_dir).with_context(|| format!("cannot read {}", input_dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }

        if let Err(error) = run_file(&path, output_dir) {
            eprintln!("{}: {error:#}", path.display());
        }
    }

    Ok(())
}
