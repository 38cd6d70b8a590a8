/// Command-line argument parsing and the solve runner
pub mod cli;
/// Solver constants and runtime defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG layer preview export
pub mod image;
/// JSON module file loading
pub mod module_file;
/// Solved grid JSON output
pub mod output;
/// Manual placements applied before solving
pub mod prefill;
/// Progress bar for solve attempts
pub mod progress;
