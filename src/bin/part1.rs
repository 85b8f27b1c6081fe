use anyhow::{Context, Result};
use clap::Parser;
use day5::{report, CLIArgs};

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    args.logging.init_logging();
    let queue = day5::read_print_queue(&args.input_path).with_context(|| {
        format!(
            "Failed to read printer settings from given file({}).",
            args.input_path.display()
        )
    })?;

    let verdicts = report::evaluate(queue.rules(), queue.updates(), !args.serial);
    let summary = report::summarize(&verdicts);
    log::info!(
        "{} updates are in the right order, {} are not.",
        summary.valid_n,
        summary.invalid_n
    );
    println!(
        "The sum of middle page number in updates which satisfy given rules is {}.",
        summary.median_sum
    );

    Ok(())
}
