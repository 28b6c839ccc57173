use crate::{
    listener::{join_multicast, new_socket},
    Config, Error, Header, Message, Question, ResourceRecord, CLASS_IN, TYPE_A,
};
use log::{debug, info, trace, warn};
use std::{
    io::Result as IoResult,
    net::{Ipv4Addr, SocketAddr, UdpSocket},
};

/// The A query for `hostname` exactly as an mDNS client sends it, with ID 0.
pub fn query_template(hostname: &str) -> Message {
    Message {
        question: Some(Question {
            qname: hostname.into(),
            qtype: TYPE_A,
            qclass: CLASS_IN,
        }),
        ..Default::default()
    }
}

pub fn answer_template(hostname: &str, address: Ipv4Addr, ttl: u32) -> Message {
    Message {
        header: Header {
            qr: true,
            aa: true,
            ..Default::default()
        },
        answer: Some(ResourceRecord::new(
            hostname.into(),
            TYPE_A,
            CLASS_IN,
            ttl,
            address.octets().to_vec(),
        )),
        ..Default::default()
    }
}

/// Pre-encoded query and answer. Incoming packets are matched against the
/// query byte-for-byte with their ID zeroed.
#[derive(Debug, Clone)]
pub struct Templates {
    query: Vec<u8>,
    answer: Vec<u8>,
}

impl Templates {
    pub fn new(hostname: &str, address: Ipv4Addr, ttl: u32) -> Self {
        Self {
            query: query_template(hostname).to_bytes(),
            answer: answer_template(hostname, address, ttl).to_bytes(),
        }
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    /// Returns the answer, carrying the packet's ID, when `packet` is the
    /// query this responder serves.
    pub fn respond(&mut self, packet: &[u8]) -> Option<&[u8]> {
        if packet.len() < 2 || packet[2..] != self.query[2..] {
            return None;
        }

        self.answer[..2].copy_from_slice(&packet[..2]);

        Some(&self.answer)
    }
}

/// Server socket on the configured port. Reads always block: the configured
/// read timeout only applies to query mode.
pub fn server_socket(config: &Config) -> IoResult<UdpSocket> {
    new_socket(config.port, None)
}

pub struct Responder {
    socket: UdpSocket,
    templates: Templates,
    buffer_size: usize,
}

impl Responder {
    pub fn new(config: &Config, hostname: &str, address: Ipv4Addr) -> Result<Self, Error> {
        let socket = server_socket(config)?;
        info!("started listening on {}:{}", Ipv4Addr::UNSPECIFIED, config.port);

        join_multicast(&socket, &config.group)?;
        info!("joined multicast group {}", config.group);

        Ok(Self {
            socket,
            templates: Templates::new(hostname, address, config.ttl),
            buffer_size: config.buffer_size,
        })
    }

    pub fn listener_loop(&mut self) {
        info!("listener started");

        let mut buf = vec![0u8; self.buffer_size];

        loop {
            match self.socket.recv_from(&mut buf) {
                Ok((len, remote_addr)) => self.process_packet(&buf[..len], remote_addr),
                Err(e) => {
                    warn!("error in reading from socket: {}", e);
                    continue;
                }
            };
        }
    }

    pub fn process_packet(&mut self, data: &[u8], remote_addr: SocketAddr) {
        trace!("read {}bytes from {}: {:02x?}", data.len(), remote_addr, data);

        let answer = match self.templates.respond(data) {
            Some(answer) => answer,
            None => {
                debug!("ignoring packet from {}", remote_addr);
                return;
            }
        };

        info!("query from {}", remote_addr);

        if let Err(e) = self.socket.send_to(answer, remote_addr) {
            warn!("error in sending answer to {}: {}", remote_addr, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> Templates {
        Templates::new("host.local", Ipv4Addr::new(192, 168, 1, 20), 300)
    }

    #[test]
    fn answers_matching_query_with_its_id() {
        let mut templates = templates();
        let mut packet = templates.query().to_vec();
        packet[..2].copy_from_slice(&[0xab, 0xcd]);

        let answer = templates.respond(&packet).unwrap().to_vec();
        assert_eq!(&answer[..2], &[0xab, 0xcd]);

        let message = Message::parse(&answer).unwrap();
        assert_eq!(message.header.id, 0xabcd);
        assert!(message.header.qr && message.header.aa);
        assert_eq!(message.answer_address(), Ok(&[192, 168, 1, 20][..]));
        assert_eq!(message.answer.unwrap().ttl, 300);
    }

    #[test]
    fn ignores_other_names_and_short_packets() {
        let mut templates = templates();
        let other = query_template("other.local").to_bytes();

        assert!(templates.respond(&other).is_none());
        assert!(templates.respond(&[]).is_none());
        assert!(templates.respond(&[0x12]).is_none());
    }

    #[test]
    fn server_socket_ignores_read_timeout() {
        let config = Config {
            port: 0,
            read_timeout_secs: Some(2),
            ..Default::default()
        };

        let socket = server_socket(&config).unwrap();
        assert_eq!(socket.read_timeout().unwrap(), None);
    }

    #[test]
    fn ignores_query_with_different_flags() {
        let mut templates = templates();
        let mut message = query_template("host.local");
        message.header.rd = true;

        assert!(templates.respond(&message.to_bytes()).is_none());
    }
}
