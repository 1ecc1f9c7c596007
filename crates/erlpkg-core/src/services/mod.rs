//! Recipe services composed over the ports.
//!
//! Services receive their ports as trait objects so adapters (CLI, tests)
//! decide which implementation backs them.

pub mod orchestrator;
pub mod publisher;

pub use orchestrator::{BuildOrchestrator, BuildOutcome, BuildReport};
pub use publisher::{PackageDescriptor, PackagePublisher, library_file_names};
