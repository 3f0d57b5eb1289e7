#![warn(clippy::unwrap_used)]

pub mod constants;
pub mod misc;
