use crate::ParserError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error in reading config file {path}: {source}")]
    ConfigRead { path: String, source: io::Error },

    #[error("error in parsing config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("error in parsing packet: {0}")]
    Parser(#[from] ParserError),

    #[error("system call failed: {0}")]
    Sys(#[from] nix::Error),

    #[error("host name is not valid UTF-8")]
    HostnameNotUtf8,

    #[error("could not find a non-loopback IPv4 address")]
    NoInterfaceAddress,
}
