pub mod beacon_chain;
pub mod clock;
pub mod node_status;
pub mod state_store;
