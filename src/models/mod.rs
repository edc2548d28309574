pub mod booking;
pub mod client;
pub mod inquiry;
pub mod package;
