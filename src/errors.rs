//! Process-wide error type and exit-code mapping.

use std::fmt;

/// Exit codes from the CLI contract.
pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_DICT_OPEN: i32 = 2;
pub const EXIT_DICT_EMPTY: i32 = 3;
pub const EXIT_LISTEN: i32 = 4;

/// Errors that can occur anywhere in the server or client.
///
/// Startup variants carry their own exit code; the rest are handled inline
/// by the caller (turned into `:invalid`/`:failed` or a closed connection)
/// and never reach `main`.
#[derive(Debug)]
pub enum Error {
    /// Bad CLI arguments; usage line already printed by the caller.
    Usage,
    /// Dictionary file could not be opened.
    DictionaryOpen(String),
    /// Dictionary file had no retained words after filtering.
    DictionaryEmpty,
    /// The listening socket could not be bound.
    ListenFailed(std::io::Error),
    /// accept() failed; fatal per spec.
    AcceptFailed(std::io::Error),
    /// Read or write on a client socket failed.
    SocketError,
    /// Jobfile could not be opened (client only).
    JobfileOpen(String),
    /// Could not connect to the server (client only).
    ConnectFailed(String),
    /// Server closed the connection before the client ran out of input.
    ConnectionTerminated,
}

impl Error {
    /// Map an error that reached `main` to its process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage => EXIT_USAGE,
            Error::DictionaryOpen(_) => EXIT_DICT_OPEN,
            Error::DictionaryEmpty => EXIT_DICT_EMPTY,
            Error::ListenFailed(_) => EXIT_LISTEN,
            // The original server calls `exit(1)` on accept() failure, not
            // one of its own ErrorCodes values — kept verbatim rather than
            // folded into EXIT_LISTEN.
            Error::AcceptFailed(_) => EXIT_USAGE,
            Error::JobfileOpen(_) => 2,
            Error::ConnectFailed(_) => 3,
            Error::ConnectionTerminated => 4,
            // Only reachable from the client: a transport error mid-session
            // that isn't a clean EOF. Not in the original's exit-code
            // table; grouped with the connection-terminated code since both
            // mean "the session ended abnormally".
            Error::SocketError => 4,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage => write!(
                f,
                "Usage: crackserver [--maxconn connections] [--port portnum] \
                 [--dictionary filename]"
            ),
            Error::DictionaryOpen(path) => {
                write!(f, "crackserver: unable to open dictionary file \"{}\"", path)
            }
            Error::DictionaryEmpty => write!(f, "crackserver: no plain text words to test"),
            Error::ListenFailed(e) => write!(f, "crackserver: unable to open socket for listening: {}", e),
            Error::AcceptFailed(e) => write!(f, "crackserver: error accepting connection: {}", e),
            Error::SocketError => write!(f, "socket read/write error"),
            Error::JobfileOpen(path) => {
                write!(f, "crackclient: unable to open job file \"{}\"", path)
            }
            Error::ConnectFailed(port) => {
                write!(f, "crackclient: unable to connect to port {}", port)
            }
            Error::ConnectionTerminated => write!(f, "crackclient: server connection terminated"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Error::SocketError
    }
}
