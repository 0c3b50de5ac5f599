pub mod constants;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use filename::sanitize_channel;
pub use logging::init_tracing;
pub use progress::ProgressReporter;
