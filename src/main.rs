use anyhow::Result;
use clap::Parser;

use time_entry::cli::{run_script, CliArgs};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    time_entry::tracing::init(args.log_dir.clone());

    let options = args.options()?;
    let tokens = args.tokens()?;
    let report = run_script(options, args.now, &tokens);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
