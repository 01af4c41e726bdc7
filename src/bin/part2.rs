use anyhow::{Context, Result};
use clap::Parser;
use guard_patrol::SearchCLIArgs;

fn main() -> Result<()> {
    guard_patrol::logging::init();
    let args = SearchCLIArgs::parse();
    let (grid, guard) = guard_patrol::read_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read laboratory from given file({}).",
            args.input_path.display()
        )
    })?;

    let report = guard_patrol::patrol(&grid, guard);
    let loop_n = guard_patrol::count_loop_obstacles(&grid, guard, report.path(), args.mode);
    println!(
        "There is(are) {} location(s) which can make guard loops in given laboratory.",
        loop_n
    );

    Ok(())
}
