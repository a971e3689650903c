pub mod http;
pub mod udp;
