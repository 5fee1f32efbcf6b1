//! Connection handler (spec.md §4.4): owns one accepted socket for its
//! full lifetime, reading request lines and writing responses until EOF or
//! a transport error.

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::dictionary::Dictionary;
use crate::protocol;

/// Drive one connection to completion. Never panics and never propagates
/// an error — transport failures just end the connection (spec.md §7,
/// "nothing inside a connection is fatal to the server").
pub async fn handle(conn_id: u64, socket: TcpStream, dictionary: Dictionary) {
    let (read_half, mut write_half) = socket.into_split();
    let mut reader = BufReader::new(read_half);
    // No maximum line length: the original imposes none, so neither do we
    // (spec.md §9, "Line protocol robustness").
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = match reader.read_line(&mut line).await {
            Ok(n) => n,
            Err(e) => {
                warn!("connection {}: read error: {}", conn_id, e);
                return;
            }
        };
        if bytes_read == 0 {
            info!("connection {}: client disconnected", conn_id);
            return;
        }

        let request = line.strip_suffix('\n').unwrap_or(&line);
        let response = protocol::process(request, &dictionary).await;

        if let Err(e) = write_half.write_all(response.as_bytes()).await {
            warn!("connection {}: write error: {}", conn_id, e);
            return;
        }
        if let Err(e) = write_half.write_all(b"\n").await {
            warn!("connection {}: write error: {}", conn_id, e);
            return;
        }
        if let Err(e) = write_half.flush().await {
            warn!("connection {}: flush error: {}", conn_id, e);
            return;
        }
    }
}
