// Observability: logging, metrics, and the extraction observer

pub mod logging;
pub mod metrics;
pub mod observer;

// Re-export main functions for ease of use
pub use logging::init_logging;
pub use observer::{MemoryObserver, ObservedEvent, TracingObserver};
