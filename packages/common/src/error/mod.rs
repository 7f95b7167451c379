//! Logging infrastructure shared by the bridge crates

pub mod logging;

pub use logging::LoggingTransformer;
