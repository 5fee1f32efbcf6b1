//! Command-line configuration for `crackserver`.

use crate::errors::Error;

/// Port string meaning "choose an ephemeral port".
pub const ANY_PORT: &str = "0";
const MIN_PORTNUM: u32 = 1024;
const MAX_PORTNUM: u32 = 65535;
const DEFAULT_DICT: &str = "/usr/share/dict/words";

/// Immutable server configuration, built once in `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: String,
    pub max_connections: usize,
    pub dictionary_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: ANY_PORT.to_string(),
            max_connections: 0,
            dictionary_path: DEFAULT_DICT.to_string(),
        }
    }
}

/// Parse `crackserver`'s CLI arguments. `args` excludes argv[0].
///
/// Mirrors `initialise()` in the original server: each of `--maxconn`,
/// `--port`, `--dictionary` may appear at most once, any unrecognised flag,
/// missing value, or out-of-range value is a usage error, and any leftover
/// positional argument is a usage error.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ServerConfig, Error> {
    let mut config = ServerConfig::default();
    let mut maxconn_seen = false;
    let mut port_seen = false;
    let mut dict_seen = false;

    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--maxconn" => {
                if maxconn_seen {
                    return Err(Error::Usage);
                }
                maxconn_seen = true;
                let value = iter.next().ok_or(Error::Usage)?;
                config.max_connections = parse_non_negative(&value)?;
            }
            "--port" => {
                if port_seen {
                    return Err(Error::Usage);
                }
                port_seen = true;
                let value = iter.next().ok_or(Error::Usage)?;
                config.port = parse_port(&value)?;
            }
            "--dictionary" => {
                if dict_seen {
                    return Err(Error::Usage);
                }
                dict_seen = true;
                config.dictionary_path = iter.next().ok_or(Error::Usage)?;
            }
            _ => return Err(Error::Usage),
        }
    }

    Ok(config)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_non_negative(value: &str) -> Result<usize, Error> {
    if !is_digits(value) {
        return Err(Error::Usage);
    }
    value.parse::<usize>().map_err(|_| Error::Usage)
}

fn parse_port(value: &str) -> Result<String, Error> {
    if !is_digits(value) {
        return Err(Error::Usage);
    }
    let port_num: u32 = value.parse().map_err(|_| Error::Usage)?;
    if value == ANY_PORT || (port_num >= MIN_PORTNUM && port_num <= MAX_PORTNUM) {
        Ok(value.to_string())
    } else {
        Err(Error::Usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_when_no_args() {
        let config = parse_args(args(&[])).unwrap();
        assert_eq!(config.port, "0");
        assert_eq!(config.max_connections, 0);
        assert_eq!(config.dictionary_path, DEFAULT_DICT);
    }

    #[test]
    fn accepts_all_three_flags() {
        let config = parse_args(args(&[
            "--maxconn",
            "5",
            "--port",
            "3000",
            "--dictionary",
            "/tmp/words",
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.port, "3000");
        assert_eq!(config.dictionary_path, "/tmp/words");
    }

    #[test]
    fn rejects_duplicate_flag() {
        assert!(parse_args(args(&["--port", "2000", "--port", "3000"])).is_err());
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(parse_args(args(&["--port", "80"])).is_err());
        assert!(parse_args(args(&["--port", "70000"])).is_err());
    }

    #[test]
    fn rejects_non_digit_maxconn() {
        assert!(parse_args(args(&["--maxconn", "-1"])).is_err());
        assert!(parse_args(args(&["--maxconn", "abc"])).is_err());
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(parse_args(args(&["--bogus", "1"])).is_err());
    }

    #[test]
    fn rejects_trailing_positional() {
        assert!(parse_args(args(&["extra"])).is_err());
    }

    #[test]
    fn port_zero_is_always_allowed() {
        assert!(parse_args(args(&["--port", "0"])).is_ok());
    }
}
