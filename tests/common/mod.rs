//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use courier::storage::Storage;

/// Creates a fresh, empty directory under the system temp dir.
pub fn temp_dir(label: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "courier-{}-{}-{}",
        label,
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// In-memory storage.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn with_file(name: &str, contents: &[u8]) -> Self {
        let storage = Self::default();
        storage
            .files
            .lock()
            .unwrap()
            .insert(name.to_string(), contents.to_vec());
        storage
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, name: &str) -> impl Future<Output = bool> + Send {
        let found = self.files.lock().unwrap().contains_key(name);
        async move { found }
    }

    fn read(&self, name: &str) -> impl Future<Output = io::Result<Vec<u8>>> + Send {
        let found = self.get(name);
        async move { found.ok_or_else(|| io::Error::from(io::ErrorKind::NotFound)) }
    }

    fn write(&self, name: &str, contents: &[u8]) -> impl Future<Output = io::Result<()>> + Send {
        self.files
            .lock()
            .unwrap()
            .insert(name.to_string(), contents.to_vec());
        async { Ok(()) }
    }
}

/// Storage where every file exists but no I/O succeeds.
#[derive(Clone, Default)]
pub struct BrokenStorage;

impl Storage for BrokenStorage {
    fn exists(&self, _name: &str) -> impl Future<Output = bool> + Send {
        async { true }
    }

    fn read(&self, _name: &str) -> impl Future<Output = io::Result<Vec<u8>>> + Send {
        async { Err(io::Error::from(io::ErrorKind::PermissionDenied)) }
    }

    fn write(&self, _name: &str, _contents: &[u8]) -> impl Future<Output = io::Result<()>> + Send {
        async { Err(io::Error::from(io::ErrorKind::PermissionDenied)) }
    }
}

/// A response split back into its parts.
pub struct RawResponse {
    pub status_line: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

pub fn split_response(bytes: &[u8]) -> RawResponse {
    let end = bytes
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8(bytes[..end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap().to_string();
    let headers = lines
        .map(|line| {
            let (k, v) = line.split_once(": ").unwrap();
            (k.to_string(), v.to_string())
        })
        .collect();

    RawResponse {
        status_line,
        headers,
        body: bytes[end + 4..].to_vec(),
    }
}

pub fn gunzip(data: &[u8]) -> Vec<u8> {
    use std::io::Read;

    let mut out = Vec::new();
    flate2::read::GzDecoder::new(data)
        .read_to_end(&mut out)
        .unwrap();
    out
}
