use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logtally",
    about = "Count file downloads and their time range in Common Log Format access logs",
    version,
    long_about = None
)]
pub struct Args {
    /// Access log file to analyze
    #[arg(value_name = "LOGFILE", default_value = "traffic.txt")]
    pub log_file: PathBuf,

    /// File listing the extensions to count, one per line
    #[arg(short, long, value_name = "PATH", default_value = "config-endings.txt")]
    pub endings: PathBuf,

    /// Number of most downloaded files to list
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the endings file with default endings and exit
    #[arg(long)]
    pub init: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
