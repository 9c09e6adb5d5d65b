//! Integration tests driving the real server loop over a TCP socket

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{tcp::OwnedReadHalf, TcpListener, TcpStream};

use recache::Cache;
use recached::server;

async fn start_server(capacity: usize) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cache = Arc::new(Cache::new(capacity));

    tokio::spawn(server::serve(listener, cache));
    addr
}

struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: tokio::net::tcp::OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read, writer) = stream.into_split();
        Self {
            reader: BufReader::new(read),
            writer,
        }
    }

    /// Send one command line and read the one-line reply, newline stripped.
    async fn send(&mut self, command: &str) -> String {
        self.writer
            .write_all(format!("{}\n", command).as_bytes())
            .await
            .unwrap();

        let mut reply = String::new();
        self.reader.read_line(&mut reply).await.unwrap();
        assert!(reply.ends_with('\n'), "reply not newline-terminated");
        reply.truncate(reply.len() - 1);
        reply
    }
}

#[tokio::test]
async fn test_capacity_three_eviction_over_socket() {
    let addr = start_server(3).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.send("PUT a 1").await, "OK");
    assert_eq!(client.send("PUT b 2").await, "OK");
    assert_eq!(client.send("PUT c 3").await, "OK");
    assert_eq!(client.send("PUT d 4").await, "OK"); // evicts a

    assert_eq!(client.send("GET a").await, "not found");
    assert_eq!(client.send("GET d").await, "4");
    assert_eq!(client.send("SIZE").await, "3");
}

#[tokio::test]
async fn test_empty_cache_replies() {
    let addr = start_server(3).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.send("GET missing").await, "not found");
    assert_eq!(client.send("SIZE").await, "0");
}

#[tokio::test]
async fn test_malformed_command_keeps_connection_usable() {
    let addr = start_server(3).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(
        client.send("PUT onlykey").await,
        "invalid args. wanted 3 args"
    );
    assert_eq!(client.send("GET").await, "invalid args. wanted 2 args");
    assert_eq!(client.send("BOGUS x y").await, "invalid command");

    assert_eq!(client.send("PUT a 1").await, "OK");
    assert_eq!(client.send("GET a").await, "1");
}

#[tokio::test]
async fn test_delete_over_socket() {
    let addr = start_server(3).await;
    let mut client = Client::connect(addr).await;

    assert_eq!(client.send("PUT a 1").await, "OK");
    assert_eq!(client.send("DEL a").await, "OK");
    assert_eq!(client.send("DEL a").await, "key not found");
    assert_eq!(client.send("SIZE").await, "0");
}

#[tokio::test]
async fn test_two_connections_share_the_cache() {
    let addr = start_server(3).await;
    let mut writer = Client::connect(addr).await;
    let mut reader = Client::connect(addr).await;

    assert_eq!(writer.send("PUT shared 42").await, "OK");
    assert_eq!(reader.send("GET shared").await, "42");
    assert_eq!(reader.send("SIZE").await, "1");
}

#[tokio::test]
async fn test_pipelined_lines_in_one_write() {
    let addr = start_server(3).await;
    let mut client = Client::connect(addr).await;

    // Two commands in a single segment; both must be answered in order.
    client
        .writer
        .write_all(b"PUT a 1\nGET a\n")
        .await
        .unwrap();

    let mut reply = String::new();
    client.reader.read_line(&mut reply).await.unwrap();
    assert_eq!(reply, "OK\n");

    reply.clear();
    client.reader.read_line(&mut reply).await.unwrap();
    assert_eq!(reply, "1\n");
}
