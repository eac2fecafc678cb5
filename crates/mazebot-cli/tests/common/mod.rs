#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/mazes")
        .canonicalize()
        .expect("maze fixtures present")
}

pub fn fixture_json(number: u64) -> String {
    std::fs::read_to_string(fixtures_dir().join(format!("{number}.json"))).expect("fixture")
}

/// `mazebot` with quiet logging and no proxy between it and local stub servers.
pub fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("mazebot");
    cmd.env("RUST_LOG", "error")
        .env_remove("MAZEBOT_MAZE_DIR")
        .env_remove("MAZEBOT_API_BASE")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env("NO_PROXY", "127.0.0.1,localhost")
        .env("no_proxy", "127.0.0.1,localhost");
    cmd
}

/// Local HTTP server answering one connection per canned response, in order.
pub struct StubServer {
    pub base: String,
    requests: Receiver<String>,
}

impl StubServer {
    pub fn start(responses: Vec<(&'static str, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local port");
        let base = format!("http://{}", listener.local_addr().expect("local addr"));
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                let request = answer(stream, status, &body);
                if tx.send(request).is_err() {
                    return;
                }
            }
        });

        Self { base, requests: rx }
    }

    /// Raw requests received so far, waiting briefly for `count` of them.
    pub fn requests(&self, count: usize) -> Vec<String> {
        (0..count)
            .map_while(|_| self.requests.recv_timeout(Duration::from_secs(5)).ok())
            .collect()
    }
}

fn answer(stream: std::net::TcpStream, status: &str, body: &str) -> String {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request = String::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read request line");
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().expect("numeric content length");
            }
        }
        let done = line == "\r\n" || line.is_empty();
        request.push_str(&line);
        if done {
            break;
        }
    }

    let mut payload = vec![0u8; content_length];
    reader.read_exact(&mut payload).expect("read request body");
    request.push_str(&String::from_utf8_lossy(&payload));

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut stream = stream;
    stream
        .write_all(response.as_bytes())
        .expect("write response");
    stream.flush().expect("flush response");
    request
}
