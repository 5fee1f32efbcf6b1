//! `crackclient` entry point (spec.md §6, SPEC_FULL.md §B.3).
//!
//! Grounded directly on `examples/original_source/a4/crackclient.c`: read
//! job lines from a file or stdin, skip blank lines and `#` comments
//! client-side, send everything else to the server, and render the three
//! reserved/ordinary response shapes.

use log::{error, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crackserver::errors::Error;

const HOST: &str = "localhost";

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (port, jobfile) = match args.as_slice() {
        [port] => (port.clone(), None),
        [port, jobfile] => (port.clone(), Some(jobfile.clone())),
        _ => {
            eprintln!("Usage: crackclient portnum [jobfile]");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&port, jobfile.as_deref()).await {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(port: &str, jobfile: Option<&str>) -> Result<(), Error> {
    let input: Box<dyn tokio::io::AsyncRead + Unpin> = match jobfile {
        Some(path) => {
            info!("reading jobfile \"{}\"", path);
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|_| Error::JobfileOpen(path.to_string()))?;
            Box::new(file)
        }
        None => Box::new(tokio::io::stdin()),
    };
    let mut lines = BufReader::new(input).lines();

    let address = format!("{}:{}", HOST, port);
    let stream = TcpStream::connect(&address)
        .await
        .map_err(|_| Error::ConnectFailed(port.to_string()))?;
    let (read_half, mut write_half) = stream.into_split();
    let mut server_lines = BufReader::new(read_half).lines();

    let mut connection_terminated = false;

    while let Some(line) = lines.next_line().await.map_err(Error::from)? {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        info!("sending: {}", line);
        write_half.write_all(line.as_bytes()).await?;
        write_half.write_all(b"\n").await?;
        write_half.flush().await?;

        match server_lines.next_line().await.map_err(Error::from)? {
            Some(response) => {
                info!("received: {}", response);
                match response.as_str() {
                    ":invalid" => println!("Error in command"),
                    ":failed" => println!("Unable to decrypt"),
                    other => println!("{}", other),
                }
            }
            None => {
                connection_terminated = true;
                break;
            }
        }
    }

    if connection_terminated {
        return Err(Error::ConnectionTerminated);
    }
    Ok(())
}
