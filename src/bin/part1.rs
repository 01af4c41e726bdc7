use anyhow::{Context, Result};
use clap::Parser;
use guard_patrol::{CLIArgs, Outcome};

fn main() -> Result<()> {
    guard_patrol::logging::init();
    let args = CLIArgs::parse();
    let (grid, guard) = guard_patrol::read_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read laboratory from given file({}).",
            args.input_path.display()
        )
    })?;

    let report = guard_patrol::patrol(&grid, guard);
    match report.outcome() {
        Outcome::Exited => println!(
            "The guard will visit {} position(s) before leaving given laboratory.",
            report.distinct_positions()
        ),
        Outcome::Looped => println!(
            "The guard never leaves given laboratory, it loops after visiting {} position(s).",
            report.distinct_positions()
        ),
    }

    Ok(())
}
