use crate::{Error, MDNS_IPV4, MDNS_PORT};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Read,
    net::Ipv4Addr,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Name to answer for. Defaults to the system host name plus `.local`.
    #[serde(default)]
    pub hostname: Option<String>,

    /// Address put in answers and used as the outgoing multicast interface.
    #[serde(default)]
    pub interface_address: Option<Ipv4Addr>,

    #[serde(default = "default_group")]
    pub group: Ipv4Addr,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_ttl")]
    pub ttl: u32,

    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Unset means reads block forever.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,

    #[serde(default = "default_pid_dir")]
    pub pid_dir: String,
}

fn default_group() -> Ipv4Addr {
    *MDNS_IPV4
}

fn default_port() -> u16 {
    MDNS_PORT
}

fn default_ttl() -> u32 {
    300
}

fn default_buffer_size() -> usize {
    65535
}

fn default_pid_dir() -> String {
    "/var/run".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: None,
            interface_address: None,
            group: default_group(),
            port: default_port(),
            ttl: default_ttl(),
            buffer_size: default_buffer_size(),
            read_timeout_secs: None,
            pid_dir: default_pid_dir(),
        }
    }
}

impl Config {
    pub const FILENAME: &'static str = "config.toml";

    pub fn parse(mut filename: &str) -> Result<Config, Error> {
        if filename.is_empty() {
            filename = Config::FILENAME;
        }

        let mut f = File::open(filename).map_err(|source| Error::ConfigRead {
            path: filename.to_string(),
            source,
        })?;
        let mut contents = String::new();
        f.read_to_string(&mut contents)
            .map_err(|source| Error::ConfigRead {
                path: filename.to_string(),
                source,
            })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Like [`Config::parse`], but a missing file at the default location
    /// falls back to the built-in defaults.
    pub fn load(filename: Option<&str>) -> Result<Config, Error> {
        match filename {
            Some(filename) => Config::parse(filename),
            None if !Path::new(Config::FILENAME).exists() => {
                debug!("{} not found, using defaults", Config::FILENAME);
                Ok(Config::default())
            }
            None => Config::parse(Config::FILENAME),
        }
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    /// Absolute pid file path. Resolved up front because daemonizing changes
    /// the working directory to `/`.
    pub fn pid_file(&self) -> Result<PathBuf, Error> {
        Ok(fs::canonicalize(&self.pid_dir)?.join("tiny-mdns.pid"))
    }

    pub fn hostname(&self) -> Result<String, Error> {
        if let Some(hostname) = &self.hostname {
            return Ok(hostname.clone());
        }

        let hostname = nix::unistd::gethostname()?
            .into_string()
            .map_err(|_| Error::HostnameNotUtf8)?;

        Ok(format!("{}.local", hostname))
    }

    pub fn interface_address(&self) -> Result<Ipv4Addr, Error> {
        if let Some(address) = self.interface_address {
            return Ok(address);
        }

        get_if_addrs::get_if_addrs()?
            .into_iter()
            .filter(|interface| !interface.is_loopback())
            .find_map(|interface| match interface.ip() {
                std::net::IpAddr::V4(v4) => Some(v4),
                _ => None,
            })
            .ok_or(Error::NoInterfaceAddress)
    }
}
