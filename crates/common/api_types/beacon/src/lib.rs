pub mod duties;
pub mod request;
pub mod responses;
