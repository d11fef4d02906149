// ---------------------------------------------------------------------------
// Integration tests for labstock-scrape-engine JSON-RPC 2.0 / NDJSON protocol
// ---------------------------------------------------------------------------
//
// Network-free: these cover initialization, key resolution, and the
// classifier surface. The extraction mapping itself is unit-tested in
// src/extract.rs against canned responses.
// ---------------------------------------------------------------------------

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{json, Value};

struct ScrapeProcess {
    child: Child,
    reader: BufReader<std::process::ChildStdout>,
    next_id: AtomicU64,
}

impl ScrapeProcess {
    fn spawn() -> Self {
        let bin = env!("CARGO_BIN_EXE_labstock-scrape-engine");
        let mut child = Command::new(bin)
            // Key resolution must be driven by params in these tests.
            .env_remove("FIRECRAWL_API_KEY")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn labstock-scrape-engine");

        let stdout = child.stdout.take().expect("no stdout");
        let reader = BufReader::new(stdout);

        Self {
            child,
            reader,
            next_id: AtomicU64::new(1),
        }
    }

    fn send(&mut self, method: &str, params: Value) -> Result<Value, Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let stdin = self.child.stdin.as_mut().expect("no stdin");
        let mut line = serde_json::to_string(&request).unwrap();
        line.push('\n');
        stdin.write_all(line.as_bytes()).unwrap();
        stdin.flush().unwrap();

        loop {
            let mut buf = String::new();
            let bytes_read = self
                .reader
                .read_line(&mut buf)
                .expect("failed to read from stdout");
            if bytes_read == 0 {
                panic!("unexpected EOF while waiting for response to id={}", id);
            }
            let buf = buf.trim();
            if buf.is_empty() {
                continue;
            }
            let parsed: Value = serde_json::from_str(buf)
                .unwrap_or_else(|e| panic!("invalid JSON from engine: {e}\nline: {buf}"));
            if parsed.get("id").is_none() {
                continue;
            }
            assert_eq!(parsed["id"].as_u64(), Some(id), "response id mismatch");
            if let Some(error) = parsed.get("error") {
                return Err(error.clone());
            }
            return Ok(parsed.get("result").cloned().unwrap_or(Value::Null));
        }
    }
}

impl Drop for ScrapeProcess {
    fn drop(&mut self) {
        drop(self.child.stdin.take());
        let _ = self.child.wait();
    }
}

#[test]
fn initialize_without_key_is_rejected() {
    let mut proc = ScrapeProcess::spawn();
    let err = proc.send("scrape/initialize", json!({})).unwrap_err();
    assert_eq!(err["data"]["scrapeCode"].as_str(), Some("SCRAPE_MISSING_KEY"));
}

#[test]
fn initialize_with_key_param_succeeds() {
    let mut proc = ScrapeProcess::spawn();
    let result = proc
        .send("scrape/initialize", json!({ "apiKey": "fc-test-key" }))
        .unwrap();
    assert!(result.is_object());
}

#[test]
fn scraping_before_initialize_is_rejected() {
    let mut proc = ScrapeProcess::spawn();
    let err = proc
        .send("scrape/page", json!({ "url": "https://example.com" }))
        .unwrap_err();
    assert_eq!(err["data"]["scrapeCode"].as_str(), Some("SCRAPE_NOT_READY"));
}

#[test]
fn classify_is_available_without_initialize() {
    let mut proc = ScrapeProcess::spawn();
    let result = proc
        .send("scrape/classify", json!({ "name": "Ostarine MK-2866" }))
        .unwrap();
    assert_eq!(result["category"].as_str(), Some("sarms"));

    let result = proc
        .send("scrape/classify", json!({ "name": "Modafinil" }))
        .unwrap();
    assert_eq!(result["category"].as_str(), Some("other"));
}

#[test]
fn unknown_method_is_method_not_found() {
    let mut proc = ScrapeProcess::spawn();
    let err = proc.send("scrape/unknown", json!({})).unwrap_err();
    assert_eq!(err["code"].as_i64(), Some(-32601));
}
