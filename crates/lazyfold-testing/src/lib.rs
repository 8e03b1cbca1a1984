//! Testing utilities and harness for Lazyfold

pub mod mocks;
pub mod robot;

pub use mocks::RecordingHost;
pub use robot::PageRobot;
