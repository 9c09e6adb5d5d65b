//! Line protocol parser and reply encoder
//!
//! One command per line, tokens separated by single spaces. Values are
//! single tokens; a spaced value changes the token count and is rejected
//! as a wrong-arity command.

use bytes::BytesMut;
use std::fmt;

/// Extract the next complete line from the read buffer.
///
/// Consumes everything up to and including the first `\n`, stripping that
/// newline and one preceding `\r` if present. Returns `None` when no full
/// line is buffered yet; the caller reads more and retries.
pub fn next_line(buf: &mut BytesMut) -> Option<String> {
    let pos = buf.iter().position(|&b| b == b'\n')?;
    let line = buf.split_to(pos + 1);

    let mut end = pos;
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }

    Some(String::from_utf8_lossy(&line[..end]).into_owned())
}

/// A decoded client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `PUT key value`
    Put {
        /// Entry key
        key: String,
        /// Entry value
        value: String,
    },
    /// `GET key`
    Get {
        /// Entry key
        key: String,
    },
    /// `DEL key`
    Del {
        /// Entry key
        key: String,
    },
    /// `SIZE`
    Size,
}

/// Client-input errors surfaced while decoding a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    /// Wrong token count for a recognized verb; `wanted` counts the verb too.
    InvalidArgs {
        /// Expected total token count
        wanted: usize,
    },
    /// Unrecognized verb
    UnknownCommand,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidArgs { wanted } => {
                write!(f, "invalid args. wanted {} args", wanted)
            }
            ProtocolError::UnknownCommand => write!(f, "invalid command"),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl Command {
    /// Decode one line into a command.
    ///
    /// Splits on single spaces, so consecutive spaces produce empty tokens
    /// and fail the arity check. `SIZE` dispatches on the verb alone and
    /// ignores anything after it.
    pub fn parse(line: &str) -> Result<Command, ProtocolError> {
        let tokens: Vec<&str> = line.split(' ').collect();

        match tokens[0] {
            "PUT" => {
                if tokens.len() != 3 {
                    return Err(ProtocolError::InvalidArgs { wanted: 3 });
                }
                Ok(Command::Put {
                    key: tokens[1].to_string(),
                    value: tokens[2].to_string(),
                })
            }
            "GET" => {
                if tokens.len() != 2 {
                    return Err(ProtocolError::InvalidArgs { wanted: 2 });
                }
                Ok(Command::Get {
                    key: tokens[1].to_string(),
                })
            }
            "DEL" => {
                if tokens.len() != 2 {
                    return Err(ProtocolError::InvalidArgs { wanted: 2 });
                }
                Ok(Command::Del {
                    key: tokens[1].to_string(),
                })
            }
            "SIZE" => Ok(Command::Size),
            _ => Err(ProtocolError::UnknownCommand),
        }
    }
}

/// A reply to be written back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Successful write or delete: `OK`
    Ok,
    /// Successful lookup: the stored value
    Value(String),
    /// Entry count as decimal text
    Size(usize),
    /// One-line error text
    Error(String),
}

impl Reply {
    /// Encode the reply, newline-terminated.
    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Reply::Ok => b"OK\n".to_vec(),
            Reply::Value(value) => format!("{}\n", value).into_bytes(),
            Reply::Size(n) => format!("{}\n", n).into_bytes(),
            Reply::Error(msg) => format!("{}\n", msg).into_bytes(),
        }
    }
}
