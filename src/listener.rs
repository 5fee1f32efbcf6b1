//! Listener (spec.md §4.2): binds the IPv4 listening socket, advertises
//! its bound port on the diagnostic stream, then accepts connections
//! forever, gating each on the admission controller before handing it to a
//! freshly spawned, detached connection handler.

use std::io::Write as _;
use std::sync::Arc;

use log::{error, info};
use tokio::net::{TcpListener, TcpSocket};

use crate::admission::AdmissionController;
use crate::connection;
use crate::dictionary::Dictionary;
use crate::errors::Error;

/// Bind an IPv4 listening socket on `port` with address reuse enabled.
/// Split out from [`serve`] so tests can learn the bound port from
/// [`TcpListener::local_addr`] directly rather than scraping stderr.
pub async fn bind(port: &str) -> Result<TcpListener, Error> {
    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", port.parse::<u16>().unwrap_or(0))
        .parse()
        .expect("constructed address is always valid");

    let socket = TcpSocket::new_v4().map_err(Error::ListenFailed)?;
    socket.set_reuseaddr(true).map_err(Error::ListenFailed)?;
    socket.bind(addr).map_err(Error::ListenFailed)?;
    socket.listen(1024).map_err(Error::ListenFailed)
}

/// Bind, advertise, and serve forever. Only returns on a fatal error
/// (bind/listen failure, or an `accept()` failure — both process-fatal
/// per spec.md §7).
pub async fn serve(
    port: &str,
    dictionary: Dictionary,
    admission: Arc<AdmissionController>,
) -> Result<(), Error> {
    let listener = bind(port).await?;
    let bound_port = listener.local_addr().map_err(Error::ListenFailed)?.port();

    // Stable, machine-readable contract (spec.md §4.2/§6): the bound port,
    // decimal, newline-terminated, flushed, written before the first
    // accept. This is deliberately `eprintln!`, not `log` — log output
    // format is not part of the wire contract.
    eprintln!("{}", bound_port);
    std::io::stderr().flush().ok();
    info!("listening on 0.0.0.0:{}", bound_port);

    accept_loop(listener, dictionary, admission).await
}

/// Accept connections forever off an already-bound listener.
pub async fn accept_loop(
    listener: TcpListener,
    dictionary: Dictionary,
    admission: Arc<AdmissionController>,
) -> Result<(), Error> {
    let mut next_conn_id: u64 = 0;
    loop {
        let (socket, peer) = listener.accept().await.map_err(|e| {
            error!("error accepting connection: {}", e);
            Error::AcceptFailed(e)
        })?;

        admission.enter().await;
        next_conn_id += 1;
        let conn_id = next_conn_id;
        info!("connection {} admitted from {}", conn_id, peer);

        let dictionary = dictionary.clone();
        let admission = admission.clone();
        // Connection handlers are detached (fire-and-forget): they own
        // their socket exclusively and signal completion purely by
        // releasing admission, unlike crack workers which must be joined.
        tokio::spawn(async move {
            connection::handle(conn_id, socket, dictionary).await;
            admission.leave();
            info!("connection {} released", conn_id);
        });
    }
}
