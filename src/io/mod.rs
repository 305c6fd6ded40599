/// Command-line argument parsing and batch orchestration
pub mod cli;
/// Shared constants and tier parameters
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Source loading and PNG rendering of layouts
pub mod image;
/// Progress bars for batch runs
pub mod progress;
