pub mod discovery;
pub mod persist;
pub mod reboot;
