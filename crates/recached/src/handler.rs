//! Command handler bridging the wire protocol and the cache engine

use std::sync::Arc;

use recache::{Cache, Error};

use crate::protocol::{Command, Reply};

/// Per-connection command dispatcher over a shared cache handle.
pub struct CommandHandler {
    cache: Arc<Cache>,
}

impl CommandHandler {
    /// Create a handler over `cache`.
    pub fn new(cache: Arc<Cache>) -> Self {
        Self { cache }
    }

    /// Execute one decoded line and produce the reply for it.
    ///
    /// Every outcome becomes a reply; nothing here can fail the connection.
    pub fn handle(&self, line: &str) -> Reply {
        let cmd = match Command::parse(line) {
            Ok(cmd) => cmd,
            Err(e) => return Reply::Error(e.to_string()),
        };

        match cmd {
            Command::Put { key, value } => {
                self.cache.put(key, value);
                Reply::Ok
            }
            Command::Get { key } => match self.cache.get(&key) {
                Ok(value) => Reply::Value(value),
                Err(Error::NotFound) => Reply::Error("not found".to_string()),
            },
            Command::Del { key } => match self.cache.delete(&key) {
                Ok(()) => Reply::Ok,
                Err(Error::NotFound) => Reply::Error("key not found".to_string()),
            },
            Command::Size => Reply::Size(self.cache.len()),
        }
    }
}
