use anyhow::Result;
use clap::Parser;
use tracing::error;

use logtally::{analyze_log_file, loader, report, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    if args.init {
        return loader::init_default_endings(&args.endings);
    }

    match analyze_log_file(&args) {
        Ok(result) => report::print_analysis_results(&result, &args),
        Err(e) => {
            error!("Analysis failed: {e:#}");
            std::process::exit(1);
        }
    }
}
