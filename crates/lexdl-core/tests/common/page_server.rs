//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers every request with one canned response. Can stall before or after
//! the headers to exercise fetch timeouts, and records each request head so
//! tests can inspect what the client sent.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stall {
    None,
    /// Accept the connection but never send a status line.
    BeforeHeaders,
    /// Send headers and the first body bytes, then go quiet.
    AfterHeaders,
}

#[derive(Debug, Clone)]
pub struct PageServerOptions {
    pub status: &'static str,
    pub body: Vec<u8>,
    pub location: Option<String>,
    pub stall: Stall,
}

impl Default for PageServerOptions {
    fn default() -> Self {
        Self {
            status: "200 OK",
            body: Vec::new(),
            location: None,
            stall: Stall::None,
        }
    }
}

pub struct PageServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl PageServer {
    /// Request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `body` with `status` for every request.
pub fn start(status: &'static str, body: &str) -> PageServer {
    start_with_options(PageServerOptions {
        status,
        body: body.as_bytes().to_vec(),
        ..Default::default()
    })
}

/// Like `start` but with full control over the response. The server runs in
/// a background thread until the process exits.
pub fn start_with_options(opts: PageServerOptions) -> PageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = Arc::clone(&opts);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &opts, &seen));
        }
    });
    PageServer {
        url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

/// A URL on which nothing is listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, opts: &PageServerOptions, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    seen.lock()
        .unwrap()
        .push(String::from_utf8_lossy(&buf[..n]).into_owned());

    if opts.stall == Stall::BeforeHeaders {
        thread::sleep(Duration::from_secs(5));
        return;
    }

    let location = opts
        .location
        .as_deref()
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        opts.status,
        opts.body.len(),
        location
    );
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }

    if opts.stall == Stall::AfterHeaders {
        let half = opts.body.len() / 2;
        let _ = stream.write_all(&opts.body[..half]);
        let _ = stream.flush();
        thread::sleep(Duration::from_secs(5));
        return;
    }
    let _ = stream.write_all(&opts.body);
}
