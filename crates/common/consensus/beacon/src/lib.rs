#![warn(clippy::unwrap_used)]

pub mod beacon_state;
pub mod committee;
pub mod genesis;
pub mod validator;
