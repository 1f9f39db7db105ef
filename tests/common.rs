#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

pub fn csc() -> Command {
    cargo_bin_cmd!("clocksync")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_clocksync.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the schema for a test DB (test mode: no config file written)
pub fn init_test_db(db_path: &str) {
    csc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// A base URL nothing listens on: connections are refused immediately.
pub fn refused_server() -> &'static str {
    "http://127.0.0.1:1"
}

/// One-shot HTTP stub server.
///
/// Accepts a single connection, reads one full request (headers plus
/// Content-Length body), answers with `status`, and hands the raw request
/// back through the join handle.
pub fn spawn_stub_server(status: u16) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let addr = listener.local_addr().expect("stub addr");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut buf = [0u8; 16384];
        let mut req: Vec<u8> = Vec::new();

        loop {
            let n = stream.read(&mut buf).expect("read request");
            if n == 0 {
                break;
            }
            req.extend_from_slice(&buf[..n]);

            if let Some(pos) = find_subslice(&req, b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&req[..pos]).to_string();
                let clen = head
                    .lines()
                    .find_map(|l| {
                        let l = l.to_ascii_lowercase();
                        l.strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if req.len() >= pos + 4 + clen {
                    break;
                }
            }
        }

        let reason = if (200..300).contains(&status) { "OK" } else { "ERR" };
        let body = "{}";
        let resp = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        stream.write_all(resp.as_bytes()).expect("write response");

        String::from_utf8_lossy(&req).to_string()
    });

    (format!("http://{}", addr), handle)
}

/// HTTP stub that accepts one connection and never answers.
///
/// Reads the request but sends no response, so the client's own timeout
/// is the only way out. The thread exits once the client gives up and
/// closes the connection.
pub fn spawn_stalling_server() -> (String, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stalling server");
    let addr = listener.local_addr().expect("stalling addr");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut buf = [0u8; 4096];
        while let Ok(n) = stream.read(&mut buf) {
            if n == 0 {
                break;
            }
        }
    });

    (format!("http://{}", addr), handle)
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
