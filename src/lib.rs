pub mod analyzer;
pub mod args;
pub mod counter;
pub mod extensions;
pub mod loader;
pub mod patterns;
pub mod range;
pub mod report;
pub mod stats;
pub mod timestamp;
pub mod utils;

pub use analyzer::{analyze, analyze_log_file};
pub use args::Args;
pub use extensions::ExtensionSet;
pub use stats::{AnalysisResult, DownloadStats, TimestampRange};
pub use timestamp::TimestampFormat;
