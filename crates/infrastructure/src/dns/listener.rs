use super::errors::ServerError;
use super::handler::RoundRobinHandler;
use hickory_proto::op::{Message, MessageType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const MAX_DATAGRAM_SIZE: usize = 4096;

/// Bind a non-blocking UDP socket on `addr`. IPv6 sockets are IPv6-only so
/// an interface's v4 and v6 listeners never collide.
pub fn bind_udp_socket(addr: SocketAddr) -> Result<UdpSocket, ServerError> {
    let bind_err = |source: io::Error| ServerError::Bind { addr, source };

    let socket =
        Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP)).map_err(bind_err)?;
    if addr.is_ipv6() {
        socket.set_only_v6(true).map_err(bind_err)?;
    }
    socket.bind(&addr.into()).map_err(bind_err)?;
    socket.set_nonblocking(true).map_err(bind_err)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket).map_err(bind_err)
}

/// Serve datagrams on `socket` (bound to `local_addr`) until `shutdown`
/// fires.
///
/// Returns `Ok` on shutdown and `Err` when the socket itself fails.
pub async fn serve_udp(
    socket: Arc<UdpSocket>,
    local_addr: SocketAddr,
    handler: Arc<RoundRobinHandler>,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE];

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!(bind_address = %local_addr, "DNS listener shutting down");
                return Ok(());
            }
            result = socket.recv_from(&mut recv_buf) => {
                match result {
                    Ok((len, from)) => {
                        answer_datagram(&socket, &handler, &recv_buf[..len], from).await;
                    }
                    Err(e) if is_transient(&e) => {
                        debug!(bind_address = %local_addr, error = %e, "Transient UDP recv error");
                    }
                    Err(source) => {
                        return Err(ServerError::Serve { addr: local_addr, source });
                    }
                }
            }
        }
    }
}

async fn answer_datagram(
    socket: &UdpSocket,
    handler: &RoundRobinHandler,
    datagram: &[u8],
    from: SocketAddr,
) {
    let request = match Message::from_vec(datagram) {
        Ok(message) => message,
        Err(e) => {
            debug!(client = %from, error = %e, "Dropping unparseable datagram");
            return;
        }
    };

    if request.message_type() == MessageType::Response {
        debug!(client = %from, id = request.id(), "Ignoring response message");
        return;
    }

    let response = handler.handle(&request);
    let wire = match encode_message(&response) {
        Ok(wire) => wire,
        Err(e) => {
            error!(client = %from, id = response.id(), error = %e, "Failed to encode response");
            return;
        }
    };

    if let Err(e) = socket.send_to(&wire, from).await {
        error!(client = %from, error = %e, "Failed to send response");
    }
}

pub fn encode_message(message: &Message) -> Result<Vec<u8>, hickory_proto::ProtoError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder)?;
    Ok(buf)
}

// ICMP port-unreachable from an earlier reply can surface on the next recv.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}
