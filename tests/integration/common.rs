use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use holidaze::api::HttpClient;
use holidaze::api::endpoints::Endpoints;
use holidaze::api::transport::{HttpRequest, HttpResponse, Transport};
use holidaze::config::Config;
use holidaze::core::context::AppContext;
use holidaze::core::models::{AuthUser, Profile};
use holidaze::errors::{Error, Result};
use holidaze::logging::Logger;
use holidaze::session::MemorySessionStore;

pub fn binary_path() -> String {
    let raw = PathBuf::from(env!("CARGO_BIN_EXE_holidaze"));
    if raw.is_absolute() {
        return raw.to_string_lossy().to_string();
    }
    let from_manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(&raw);
    if from_manifest.exists() {
        return from_manifest.to_string_lossy().to_string();
    }
    raw.to_string_lossy().to_string()
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

/// A config pointing at an unroutable API so no test can reach the network.
pub fn write_valid_config(dir: &Path) {
    let cfg = r#"{
      "api_base_url": { "value": "http://127.0.0.1:9", "description": "base" },
      "api_key": { "value": null, "description": "key" },
      "request_timeout_secs": { "value": 2, "description": "timeout" },
      "venues_page_size": { "value": 10, "description": "page size" },
      "file_logging_enabled": { "value": "True", "description": "file logging" }
    }"#;
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn run_with_input(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(binary_path())
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();

    child.wait_with_output().unwrap()
}

pub fn run(dir: &Path, args: &[&str]) -> Output {
    run_with_input(dir, args, "")
}

fn strip_ansi_and_control(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut bytes = s.bytes().peekable();

    while let Some(b) = bytes.next() {
        if b == 0x1B {
            if matches!(bytes.peek(), Some(b'[')) {
                let _ = bytes.next();
                for nb in bytes.by_ref() {
                    if (nb as char).is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
        }

        if b.is_ascii_control() {
            continue;
        }

        out.push(b as char);
    }

    out
}

pub fn normalized_lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buf)
        .lines()
        .map(|l| strip_ansi_and_control(l).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn read_log_contents(dir: &Path) -> Option<String> {
    let logs_dir = dir.join("logs");
    let mut entries = fs::read_dir(&logs_dir).ok()?;
    let entry = entries.find_map(|e| e.ok())?;
    fs::read_to_string(entry.path()).ok()
}

/// Answers requests from a queue of canned responses and keeps what was sent.
#[derive(Clone, Default)]
pub struct CannedTransport {
    sent: Arc<Mutex<Vec<HttpRequest>>>,
    replies: Arc<Mutex<VecDeque<HttpResponse>>>,
}

impl CannedTransport {
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies.lock().unwrap().push_back(HttpResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for CannedTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.sent.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Transport("no canned reply".into()))
    }
}

pub fn guest(name: &str) -> AuthUser {
    AuthUser {
        profile: Profile {
            name: name.into(),
            email: format!("{name}@stud.noroff.no"),
            bio: None,
            avatar: None,
            banner: None,
            venue_manager: false,
        },
        access_token: format!("token-{name}"),
    }
}

/// A context over `transport` with `user` signed in and file logging into `dir/logs`.
pub fn build_context(dir: &Path, transport: &CannedTransport, user: AuthUser) -> (AppContext, Logger) {
    write_valid_config(dir);
    let config = Config::load_from(dir.join("config.json")).expect("config should load");
    let logger = Logger::capturing();
    logger.set_log_dir(dir.join("logs"));
    logger.set_file_logging_enabled(true);
    let client = HttpClient::new(
        Endpoints::new("https://api.example.test").unwrap(),
        Some("test-key".into()),
        Box::new(transport.clone()),
        logger.clone(),
    );
    let ctx = AppContext::with_parts(
        config,
        Box::new(client),
        Box::new(MemorySessionStore::with_user(user)),
        logger.clone(),
    );
    (ctx, logger)
}
