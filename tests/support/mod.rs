#![allow(dead_code)]

use qeek_api_client::qts::Transport;
use qeek_api_client::TransportError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Replays canned bus responses in order and records every invocation.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<Vec<u8>, TransportError>>>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, json: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(json.as_bytes().to_vec()));
        self
    }

    /// Queue a reply ahead of everything already scripted.
    pub fn reply_first(self, json: &str) -> Self {
        self.replies.borrow_mut().push_front(Ok(json.as_bytes().to_vec()));
        self
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|args| args[1].clone()).collect()
    }

    pub fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn invoke(&self, args: &[String]) -> Result<Vec<u8>, TransportError> {
        self.calls.borrow_mut().push(args.to_vec());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected bus call: {args:?}"))
    }
}

pub fn exit_failure() -> TransportError {
    TransportError::Exit {
        code: Some(1),
        stderr: "qbus: connection refused".into(),
    }
}

/// Serve one HTTP response on a loopback port; the handle yields the raw request.
pub fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        String::from_utf8_lossy(&request).into_owned()
    });
    (format!("http://{addr}"), handle)
}
