//! Streaming adapters: file, UDP, and TCP (client and server) sources that
//! feed NMEA sentences through an `AisParser`.
pub mod utils;

pub use utils::{decode, decode_from_file, decode_from_tcp, decode_from_tcp_server, decode_from_udp};
