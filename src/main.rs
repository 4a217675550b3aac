use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::info;

use flowsat::config::parse_timeout;
use flowsat::{Grid, Outcome, PuzzleError, Separator, Settings, Verdict};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Puzzle files, each solved on its own. Reads stdin if none are given.
    files: Vec<PathBuf>,
    /// Rows have no separator between tokens; every character is a cell.
    #[arg(short, long)]
    no_space: bool,
    /// Reject puzzles where a color does not appear exactly twice.
    #[arg(long)]
    strict_pairs: bool,
    /// Give up after this many seconds and report unknown.
    #[arg(short, long, value_name = "SECONDS", value_parser = parse_timeout)]
    timeout: Option<Duration>,
    /// On sat, also list the edge-color variables set to true.
    #[arg(short, long)]
    model: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            separator: if self.no_space { Separator::NoSpace } else { Separator::Space },
            strict_pairs: self.strict_pairs,
            timeout: self.timeout,
        }
    }
}

fn run(input: &str, settings: &Settings, show_model: bool) -> Result<Verdict, PuzzleError> {
    let grid = Grid::parse(input, settings)?;
    print!("{}", grid.render(settings.separator));

    let outcome = grid.solve(settings)?;
    println!("{}", outcome.verdict());

    if let (true, Outcome::Sat(assignment)) = (show_model, &outcome) {
        for var in assignment.true_vars() {
            println!("{}", var);
        }
    }

    Ok(outcome.verdict())
}

/// Solve every puzzle, reporting failures as they happen without stopping.
fn run_all(inputs: Vec<(String, io::Result<String>)>, settings: &Settings, show_model: bool) -> Vec<Result<Verdict, PuzzleError>> {
    inputs.into_iter()
        .map(|(name, input)| {
            info!("solving {}", name);
            let result = input.map_err(PuzzleError::from)
                .and_then(|input| run(&input, settings, show_model));
            if let Err(err) = &result {
                eprintln!("{}: {}", name, err);
            }
            result
        })
        .collect()
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let settings = args.settings();

    let inputs = if args.files.is_empty() {
        let mut input = String::new();
        let read = io::stdin().read_to_string(&mut input).map(|_| input);
        vec![("<stdin>".to_owned(), read)]
    } else {
        args.files.iter()
            .map(|path| (path.display().to_string(), std::fs::read_to_string(path)))
            .collect()
    };

    if run_all(inputs, &settings, args.model).iter().all(Result::is_ok) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
