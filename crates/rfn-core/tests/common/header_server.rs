//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses per request path, records every raw request it
//! receives and how many body bytes each response got onto the wire, and
//! closes the connection after each response.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Canned response for one path.
#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
    /// Read the request, then hold the connection without answering.
    pub stall: Option<Duration>,
}

impl Route {
    pub fn ok() -> Self {
        Self {
            status: "200 OK",
            headers: Vec::new(),
            body: b"hello".to_vec(),
            stall: None,
        }
    }

    pub fn status(mut self, status: &'static str) -> Self {
        self.status = status;
        self
    }

    pub fn header(self, name: &str, value: &str) -> Self {
        self.raw_header(name, value.as_bytes())
    }

    /// Header value sent byte for byte, e.g. ISO-8859-1 text.
    pub fn raw_header(mut self, name: &str, value: &[u8]) -> Self {
        self.headers.push((name.to_string(), value.to_vec()));
        self
    }

    pub fn stall(mut self, for_how_long: Duration) -> Self {
        self.stall = Some(for_how_long);
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }
}

#[derive(Default)]
struct Journal {
    requests: Vec<String>,
    /// (path, body bytes written before the client hung up or the body ended)
    bodies: Vec<(String, usize)>,
}

pub struct HeaderServer {
    base_url: String,
    journal: Arc<Mutex<Journal>>,
}

impl HeaderServer {
    /// Starts a server in a background thread. Unknown paths get a bare 404.
    /// The server runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let journal = Arc::new(Mutex::new(Journal::default()));
        let log = Arc::clone(&journal);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            journal,
        }
    }

    /// Absolute URL for `path_and_query` (must start with `/`).
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Raw request heads received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.journal.lock().unwrap().requests.clone()
    }

    /// Body bytes written for the first finished response on `path`, waiting up
    /// to `wait` for the handler to finish.
    pub fn body_bytes_sent(&self, path: &str, wait: Duration) -> Option<usize> {
        let deadline = Instant::now() + wait;
        loop {
            let sent = self
                .journal
                .lock()
                .unwrap()
                .bodies
                .iter()
                .find(|(p, _)| p == path)
                .map(|(_, n)| *n);
            if sent.is_some() || Instant::now() >= deadline {
                return sent;
            }
            thread::sleep(Duration::from_millis(20));
        }
    }
}

/// A URL on a local port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/file.bin", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, log: &Mutex<Journal>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]).into_owned();
    let path = request_path(&request).unwrap_or("/").to_string();
    log.lock().unwrap().requests.push(request);

    let route = match routes.get(&path) {
        Some(r) => r.clone(),
        None => Route::ok().status("404 Not Found").body(Vec::new()),
    };

    if let Some(d) = route.stall {
        thread::sleep(d);
        return;
    }

    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        route.body.len()
    )
    .into_bytes();
    for (name, value) in &route.headers {
        head.extend_from_slice(name.as_bytes());
        head.extend_from_slice(b": ");
        head.extend_from_slice(value);
        head.extend_from_slice(b"\r\n");
    }
    head.extend_from_slice(b"\r\n");

    if stream.write_all(&head).is_err() {
        return;
    }
    // The client may hang up once it has the headers.
    let mut sent = 0;
    for chunk in route.body.chunks(16 * 1024) {
        if stream.write_all(chunk).is_err() {
            break;
        }
        sent += chunk.len();
    }
    log.lock().unwrap().bodies.push((path, sent));
}

/// Path of the request line, without the query string.
fn request_path(request: &str) -> Option<&str> {
    let target = request.lines().next()?.split_whitespace().nth(1)?;
    Some(target.split('?').next().unwrap_or(target))
}
