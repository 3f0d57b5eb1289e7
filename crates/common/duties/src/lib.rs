#![warn(clippy::unwrap_used)]

pub mod assembler;
pub mod error;
pub mod resolver;
pub mod state;
pub mod traits;
pub mod window;

#[cfg(test)]
mod test_utils;
