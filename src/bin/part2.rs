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

    let parallel = !args.serial;
    let verdicts = report::evaluate(queue.rules(), queue.updates(), parallel);
    let page_n_sum =
        report::corrected_median_sum(queue.rules(), queue.updates(), &verdicts, parallel);
    println!(
        "The sum of middle page number in corrected updates which violate given rules is {}.",
        page_n_sum
    );

    Ok(())
}
