pub mod attendance;
pub mod expiry;
