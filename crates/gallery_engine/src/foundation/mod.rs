//! Foundation utilities: math, time, and logging

pub mod math;
pub mod time;
pub mod logging;
