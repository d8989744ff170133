//! Per-interface Probe sockets.
//!
//! Devices answer unicast to the source address of the Probe, so one socket
//! per interface both sends and receives.

use std::io;
use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

use super::interfaces::NetworkInterface;
use super::types::ProbeFailureKind;
use crate::protocol_constants::{DISCOVERY_MULTICAST_ADDR, DISCOVERY_MULTICAST_TTL};

/// A socket owned by one interface task for the duration of a discovery call.
#[async_trait]
pub trait ProbeSocket: Send + Sync {
    /// Sends the Probe to the discovery group.
    async fn send_probe(&self, payload: &[u8]) -> io::Result<()>;

    /// Waits for the next datagram.
    async fn recv(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;
}

/// Opens a [`ProbeSocket`] bound to a given interface.
pub trait ProbeSocketFactory: Send + Sync {
    fn open(&self, iface: &NetworkInterface) -> Result<Box<dyn ProbeSocket>, ProbeFailureKind>;
}

/// Opens real UDP sockets aimed at the WS-Discovery multicast group.
#[derive(Debug, Clone)]
pub struct MulticastSocketFactory {
    target: SocketAddr,
}

impl Default for MulticastSocketFactory {
    fn default() -> Self {
        Self {
            target: DISCOVERY_MULTICAST_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([239, 255, 255, 250], 3702))),
        }
    }
}

impl MulticastSocketFactory {
    /// Sends Probes to `target` instead of the standard group.
    #[must_use]
    pub fn with_target(target: SocketAddr) -> Self {
        Self { target }
    }
}

impl ProbeSocketFactory for MulticastSocketFactory {
    fn open(&self, iface: &NetworkInterface) -> Result<Box<dyn ProbeSocket>, ProbeFailureKind> {
        let ip = iface.ipv4().ok_or(ProbeFailureKind::NoIpv4Address)?;
        let socket = create_socket(ip).map_err(|e| ProbeFailureKind::SocketBind(e.to_string()))?;
        Ok(Box::new(UdpProbeSocket {
            socket,
            target: self.target,
        }))
    }
}

/// Creates a non-blocking UDP socket bound to `iface_ip` on an ephemeral
/// port, with multicast egress pinned to that interface.
fn create_socket(iface_ip: std::net::Ipv4Addr) -> io::Result<UdpSocket> {
    let bind_addr = SocketAddr::new(IpAddr::V4(iface_ip), 0);
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    if let Err(e) = socket.set_reuse_address(true) {
        log::warn!("[WS-Discovery] Failed to set SO_REUSEADDR on {}: {}", iface_ip, e);
    }

    // Without this the kernel routes multicast out of the default interface
    // whichever address we bound to.
    socket.set_multicast_if_v4(&iface_ip)?;

    if let Err(e) = socket.set_multicast_ttl_v4(DISCOVERY_MULTICAST_TTL) {
        log::warn!("[WS-Discovery] Failed to set multicast TTL on {}: {}", iface_ip, e);
    }

    socket.set_nonblocking(true)?;
    socket.bind(&bind_addr.into())?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

struct UdpProbeSocket {
    socket: UdpSocket,
    target: SocketAddr,
}

#[async_trait]
impl ProbeSocket for UdpProbeSocket {
    async fn send_probe(&self, payload: &[u8]) -> io::Result<()> {
        let sent = self.socket.send_to(payload, self.target).await?;
        if sent != payload.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("sent {} of {} bytes", sent, payload.len()),
            ));
        }
        Ok(())
    }

    async fn recv(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket.recv_from(buf).await
    }
}
