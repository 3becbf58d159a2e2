#![allow(dead_code)]

use std::{
    io::{BufRead, BufReader, Write},
    net::{TcpListener, TcpStream},
    sync::{Arc, Mutex},
    thread,
};

use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Minimal HTTP/1.1 server on 127.0.0.1 that answers one request per
/// connection and records what it received.
pub struct StubForge {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubForge {
    pub fn start<F>(respond: F) -> Self
    where
        F: Fn(&str) -> StubResponse + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                serve_one(stream, &log, &respond);
            }
        });

        Self { base_url, requests }
    }

    /// Serves `pages[n]` for `page=n` and `[]` past the end.
    pub fn with_pages(pages: Vec<Value>) -> Self {
        Self::start(move |path| {
            let body = page_param(path)
                .and_then(|page| pages.get(page))
                .cloned()
                .unwrap_or_else(|| json!([]));
            StubResponse::ok(body.to_string())
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn serve_one<F>(mut stream: TcpStream, log: &Mutex<Vec<RecordedRequest>>, respond: &F)
where
    F: Fn(&str) -> StubResponse,
{
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(read_half);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let Some(path) = request_line.split_whitespace().nth(1) else {
        return;
    };
    let path = path.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    log.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        headers,
    });

    let response = respond(&path);
    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        if response.status < 400 { "OK" } else { "Error" },
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(reply.as_bytes());
    let _ = stream.flush();
}

pub fn page_param(path: &str) -> Option<usize> {
    path.rsplit("page=").next()?.parse().ok()
}

/// Issue payload shaped like the forge's, with reactions included.
pub fn issue_json(number: usize) -> Value {
    json!({
        "html_url": format!("https://github.com/acme/api/issues/{number}"),
        "title": format!("Issue {number}"),
        "user": {"login": "alice"},
        "labels": [{"name": "bug"}, {"name": "P1"}],
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-05T00:00:00Z",
        "comments": 3,
        "reactions": {"total_count": 7, "+1": 7}
    })
}

pub fn issue_page(first: usize, count: usize) -> Value {
    Value::Array((first..first + count).map(issue_json).collect())
}
