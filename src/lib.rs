use once_cell::sync::Lazy;
use std::net::Ipv4Addr;

pub mod config;
pub mod error;
pub mod listener;
pub mod parser;
pub mod query;
pub mod responder;

pub use config::Config;
pub use error::Error;
pub use parser::*;

pub static MDNS_IPV4: Lazy<Ipv4Addr> = Lazy::new(|| Ipv4Addr::new(224, 0, 0, 251));
pub const MDNS_PORT: u16 = 5353;
