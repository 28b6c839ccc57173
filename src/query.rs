use crate::{listener::query_socket, responder::query_template, Config, Error, Message};
use log::{debug, trace};
use std::net::{Ipv4Addr, SocketAddrV4};

/// Asks the multicast group for `hostname` and returns the answer payload of
/// the first reply.
pub fn resolve(config: &Config, hostname: &str, interface: Ipv4Addr) -> Result<Vec<u8>, Error> {
    let packet = query_template(hostname).to_bytes();
    let destination = SocketAddrV4::new(config.group, config.port);

    let socket = query_socket(&interface, config.read_timeout())?;
    socket.send_to(&packet, destination)?;
    debug!("sent query for {} to {} via {}", hostname, destination, interface);

    let mut buf = vec![0u8; config.buffer_size];
    let (len, remote_addr) = socket.recv_from(&mut buf)?;
    trace!("read {}bytes from {}: {:02x?}", len, remote_addr, &buf[..len]);

    let message = Message::parse(&buf[..len])?;

    Ok(message.answer_address()?.to_vec())
}

/// Answer payload bytes joined with dots, `192.168.1.20` for an A record.
pub fn format_address(rdata: &[u8]) -> String {
    rdata
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
