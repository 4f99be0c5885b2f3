//! Minimal synchronous msgpack-RPC client.
//!
//! Neovim's API is msgpack-RPC over the child's stdio:
//!
//! ```text
//! request       [0, msgid, method, params]
//! response      [1, msgid, error, result]
//! notification  [2, method, params]
//! ```
//!
//! Calls are strictly sequential. While waiting for a response, incoming
//! notifications are logged and dropped, and requests from the peer are
//! answered with an error since neonv exposes no handlers.

use crate::error::{NeonvError, Result};
use log::{debug, trace};
use rmpv::Value;
use std::io::{BufReader, Read, Write};

const REQUEST: u64 = 0;
const RESPONSE: u64 = 1;
const NOTIFICATION: u64 = 2;

pub struct RpcSession<R: Read, W: Write> {
    reader: BufReader<R>,
    writer: W,
    next_id: u32,
}

impl<R: Read, W: Write> RpcSession<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            next_id: 0,
        }
    }

    /// Sends one request and blocks until its response arrives.
    pub fn call(&mut self, method: &str, params: Vec<Value>) -> Result<Value> {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        trace!("event=rpc_request module=rpc id={} method={}", id, method);
        let request = Value::Array(vec![
            Value::from(REQUEST),
            Value::from(id),
            Value::from(method),
            Value::Array(params),
        ]);
        self.send(&request)?;

        loop {
            let message = rmpv::decode::read_value(&mut self.reader)
                .map_err(|e| NeonvError::Rpc(e.to_string()))?;
            let parts = match message {
                Value::Array(parts) if !parts.is_empty() => parts,
                other => return Err(NeonvError::Rpc(format!("not a message: {}", other))),
            };

            match parts[0].as_u64() {
                Some(RESPONSE) => {
                    let [_, msg_id, error, result]: [Value; 4] = parts
                        .try_into()
                        .map_err(|_| NeonvError::Rpc("short response".to_string()))?;
                    if msg_id.as_u64() != Some(u64::from(id)) {
                        debug!("event=rpc_stale module=rpc id={} expected={}", msg_id, id);
                        continue;
                    }
                    if !error.is_nil() {
                        return Err(NeonvError::Remote(format!(
                            "{}: {}",
                            method,
                            error_message(&error)
                        )));
                    }
                    return Ok(result);
                }
                Some(NOTIFICATION) => {
                    let name = parts.get(1).and_then(Value::as_str).unwrap_or("?");
                    trace!("event=rpc_notification module=rpc method={}", name);
                }
                Some(REQUEST) => {
                    let msg_id = parts.get(1).cloned().unwrap_or(Value::Nil);
                    let name = parts.get(2).and_then(Value::as_str).unwrap_or("?");
                    debug!("event=rpc_unhandled module=rpc method={}", name);
                    let reply = Value::Array(vec![
                        Value::from(RESPONSE),
                        msg_id,
                        Value::from(format!("neonv does not handle {}", name)),
                        Value::Nil,
                    ]);
                    self.send(&reply)?;
                }
                _ => return Err(NeonvError::Rpc(format!("unknown message type: {}", parts[0]))),
            }
        }
    }

    fn send(&mut self, value: &Value) -> Result<()> {
        rmpv::encode::write_value(&mut self.writer, value)
            .map_err(|e| NeonvError::Rpc(e.to_string()))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Neovim errors arrive as `[type, message]`.
fn error_message(error: &Value) -> String {
    match error {
        Value::Array(parts) => parts
            .get(1)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        Value::String(s) => s.as_str().unwrap_or_default().to_string(),
        other => other.to_string(),
    }
}
