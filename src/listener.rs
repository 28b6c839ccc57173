use log::trace;
use socket2::{Domain, Protocol, Socket, Type};
use std::{
    io::Result as IoResult,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket},
    time::Duration,
};

fn udp_socket(read_timeout: Option<Duration>) -> IoResult<Socket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_read_timeout(read_timeout)?;

    Ok(socket)
}

/// Socket bound to `0.0.0.0:port`, shared with any other mDNS stack on the
/// host through address/port reuse.
pub fn new_socket(port: u16, read_timeout: Option<Duration>) -> IoResult<UdpSocket> {
    let socket = udp_socket(read_timeout)?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    socket.bind(&SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port)).into())?;

    Ok(socket.into())
}

pub fn join_multicast(socket: &UdpSocket, group: &Ipv4Addr) -> IoResult<()> {
    trace!("joining group = {} interface = {}", group, Ipv4Addr::UNSPECIFIED);

    socket.join_multicast_v4(group, &Ipv4Addr::UNSPECIFIED)
}

/// Ephemeral-port socket whose multicast datagrams leave through `interface`.
pub fn query_socket(interface: &Ipv4Addr, read_timeout: Option<Duration>) -> IoResult<UdpSocket> {
    let socket = udp_socket(read_timeout)?;
    socket.set_multicast_if_v4(interface)?;

    socket.bind(&SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)).into())?;

    Ok(socket.into())
}
