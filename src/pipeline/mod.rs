//! Comparison pipeline
//!
//! For each sample application, in lexical order:
//! 1. run its build command (bounded by a timeout, output discarded)
//! 2. locate `dist/` or `build/` and the `index.html` entry document
//! 3. extract references and resolve static imports transitively
//! 4. apply framework quirks and record the sizes

pub mod builder;
pub mod measure;
pub mod orchestrator;
pub mod progress;

pub use builder::{AppBuilder, BuildOutcome, DEFAULT_BUILD_COMMAND, DEFAULT_BUILD_TIMEOUT};
pub use measure::{measure_app, MeasureFailure};
pub use orchestrator::ComparisonOrchestrator;
pub use progress::BuildSpinner;
