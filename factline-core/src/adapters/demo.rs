//! Demo news backend
//!
//! An in-process HTTP server implementing the slice of the news API this
//! client consumes, with deterministic sample data. Powers demo mode and
//! the test suite, so neither needs a real backend.
//!
//! Implemented surface:
//! - GET /news (with optional _limit/_page), GET /news/{id}
//! - POST /news, DELETE /news/{id} (bearer)
//! - POST /comments, DELETE /comments/{id}
//! - GET /users, PUT /users/{id}/promote-to-member, /demote-to-reader (bearer)
//! - POST /api/v1/auth/authenticate, /api/v1/auth/register

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::domain::{Comment, CommentAuthor, News, NewsDraft, Registration, Role, User, Vote};

/// Configuration for demo data and failure injection
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Number of news items to seed
    pub num_news: usize,
    /// Password accepted for every demo account
    pub password: String,
    /// Whether to reject every authentication attempt
    pub fail_auth: bool,
    /// Whether to answer every request with HTTP 500
    pub fail_server: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            num_news: 8,
            password: "factline".to_string(),
            fail_auth: false,
            fail_server: false,
            delay_ms: 0,
        }
    }
}

/// Mutable backend state shared across request threads
struct DemoState {
    news: Vec<News>,
    users: Vec<User>,
    next_news_id: i64,
    next_comment_id: i64,
    next_user_id: i64,
}

/// Demo news server
pub struct DemoServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl DemoServer {
    /// Start a new demo server on a random available port
    pub fn start(config: DemoConfig) -> std::io::Result<Self> {
        Self::start_on_port(0, config)
    }

    /// Start the demo server on a specific port (0 for random)
    pub fn start_on_port(port: u16, config: DemoConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(format!("127.0.0.1:{}", port))?;
        let actual_port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let (news, next_comment_id) = seed_news(config.num_news);
        let users = seed_users();
        let state = Arc::new(Mutex::new(DemoState {
            next_news_id: news.len() as i64 + 1,
            next_comment_id,
            next_user_id: users.len() as i64 + 1,
            news,
            users,
        }));

        // Set listener to non-blocking for graceful shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = state.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &state);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        // No connection available, sleep briefly
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port: actual_port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the port the server is listening on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the base URL for this demo server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the demo server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DemoServer {
    fn drop(&mut self) {
        self.stop();
    }
}

// =============================================================================
// Request handling
// =============================================================================

struct DemoRequest {
    method: String,
    path: String,
    headers: String,
    body: String,
}

fn handle_connection(mut stream: TcpStream, config: &DemoConfig, state: &Arc<Mutex<DemoState>>) {
    // Accepted sockets may inherit non-blocking from the listener on some
    // platforms; the body read loop needs blocking mode with a deadline.
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));

    let request = match read_request(&mut stream) {
        Some(request) => request,
        None => return,
    };

    // Add configured delay
    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if config.fail_server {
        send_response(
            &mut stream,
            500,
            "Internal Server Error",
            r#"{"error": "Demo backend failure"}"#,
        );
        return;
    }

    let path_without_query = request.path.split('?').next().unwrap_or("").to_string();
    let owned_segments: Vec<String> = path_without_query
        .trim_matches('/')
        .split('/')
        .map(|s| s.to_string())
        .collect();
    let segments: Vec<&str> = owned_segments.iter().map(|s| s.as_str()).collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("GET", ["news"]) => handle_list_news(&mut stream, &request, state),
        ("GET", ["news", id]) => handle_get_news(&mut stream, id, state),
        ("POST", ["news"]) => handle_create_news(&mut stream, &request, state),
        ("DELETE", ["news", id]) => handle_delete_news(&mut stream, &request, id, state),
        ("POST", ["comments"]) => handle_create_comment(&mut stream, &request, state),
        ("DELETE", ["comments", id]) => handle_delete_comment(&mut stream, id, state),
        ("GET", ["users"]) => handle_list_users(&mut stream, &request, state),
        ("PUT", ["users", id, "promote-to-member"]) => {
            handle_role_change(&mut stream, &request, id, state, true)
        }
        ("PUT", ["users", id, "demote-to-reader"]) => {
            handle_role_change(&mut stream, &request, id, state, false)
        }
        ("POST", ["api", "v1", "auth", "authenticate"]) => {
            handle_authenticate(&mut stream, &request, config, state)
        }
        ("POST", ["api", "v1", "auth", "register"]) => {
            handle_register(&mut stream, &request, state)
        }
        _ => send_response(
            &mut stream,
            404,
            "Not Found",
            r#"{"error": "Endpoint not found"}"#,
        ),
    }
}

/// Read one HTTP request, draining the body per Content-Length
fn read_request(stream: &mut TcpStream) -> Option<DemoRequest> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];

    let header_end = loop {
        match stream.read(&mut buffer) {
            Ok(0) => return None,
            Ok(n) => {
                data.extend_from_slice(&buffer[..n]);
                if let Some(pos) = find_header_end(&data) {
                    break pos;
                }
                if data.len() > 65536 {
                    return None;
                }
            }
            Err(_) => return None,
        }
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = header_end + 4;
    while data.len() < body_start + content_length {
        match stream.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => data.extend_from_slice(&buffer[..n]),
            Err(_) => return None,
        }
    }

    let body = String::from_utf8_lossy(&data[body_start..]).to_string();
    let first_line = headers.lines().next()?;
    let mut parts = first_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    Some(DemoRequest {
        method,
        path,
        headers,
        body,
    })
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn send_json<T: serde::Serialize>(
    stream: &mut TcpStream,
    status: u16,
    status_text: &str,
    body: &T,
) {
    match serde_json::to_string(body) {
        Ok(json) => send_response(stream, status, status_text, &json),
        Err(_) => send_response(
            stream,
            500,
            "Internal Server Error",
            r#"{"error": "Serialization failed"}"#,
        ),
    }
}

fn send_not_found(stream: &mut TcpStream) {
    send_response(stream, 404, "Not Found", r#"{"error": "Resource not found"}"#);
}

fn send_unauthorized(stream: &mut TcpStream) {
    send_response(
        stream,
        401,
        "Unauthorized",
        r#"{"error": "Missing or invalid token"}"#,
    );
}

/// Bearer check: demo tokens all share a recognizable prefix
fn has_bearer_token(request: &DemoRequest) -> bool {
    request
        .headers
        .to_lowercase()
        .contains("authorization: bearer demo-token")
}

fn query_param(path: &str, name: &str) -> Option<u32> {
    let query = path.split_once('?')?.1;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key == name {
            value.parse().ok()
        } else {
            None
        }
    })
}

fn lock_state(state: &Arc<Mutex<DemoState>>) -> std::sync::MutexGuard<'_, DemoState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

// =============================================================================
// Handlers
// =============================================================================

fn handle_list_news(stream: &mut TcpStream, request: &DemoRequest, state: &Arc<Mutex<DemoState>>) {
    let limit = query_param(&request.path, "_limit");
    let page = query_param(&request.path, "_page");

    let items: Vec<News> = {
        let state = lock_state(state);
        match (limit, page) {
            (limit, Some(page)) => {
                let per_page = limit.unwrap_or(10) as usize;
                let start = (page.max(1) as usize - 1) * per_page;
                state
                    .news
                    .iter()
                    .skip(start)
                    .take(per_page)
                    .cloned()
                    .collect()
            }
            (Some(limit), None) => state.news.iter().take(limit as usize).cloned().collect(),
            (None, None) => state.news.clone(),
        }
    };

    send_json(stream, 200, "OK", &items);
}

fn handle_get_news(stream: &mut TcpStream, id: &str, state: &Arc<Mutex<DemoState>>) {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            send_not_found(stream);
            return;
        }
    };

    let found = {
        let state = lock_state(state);
        state.news.iter().find(|n| n.id == id).cloned()
    };

    match found {
        Some(news) => send_json(stream, 200, "OK", &news),
        None => send_not_found(stream),
    }
}

fn handle_create_news(
    stream: &mut TcpStream,
    request: &DemoRequest,
    state: &Arc<Mutex<DemoState>>,
) {
    let draft: NewsDraft = match serde_json::from_str(&request.body) {
        Ok(draft) => draft,
        Err(_) => {
            send_response(
                stream,
                400,
                "Bad Request",
                r#"{"error": "Invalid news payload"}"#,
            );
            return;
        }
    };

    let created = {
        let mut state = lock_state(state);
        let news = News {
            id: state.next_news_id,
            topic: draft.topic,
            short_detail: draft.short_detail,
            full_detail: draft.full_detail,
            reporter: draft.reporter,
            report_date: draft.report_date,
            image_url: draft.image_url,
            comments: vec![],
        };
        state.next_news_id += 1;
        state.news.push(news.clone());
        news
    };

    send_json(stream, 201, "Created", &created);
}

fn handle_delete_news(
    stream: &mut TcpStream,
    request: &DemoRequest,
    id: &str,
    state: &Arc<Mutex<DemoState>>,
) {
    if !has_bearer_token(request) {
        send_unauthorized(stream);
        return;
    }

    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            send_not_found(stream);
            return;
        }
    };

    let removed = {
        let mut state = lock_state(state);
        let before = state.news.len();
        state.news.retain(|n| n.id != id);
        state.news.len() < before
    };

    if removed {
        send_response(stream, 200, "OK", "{}");
    } else {
        send_not_found(stream);
    }
}

fn handle_create_comment(
    stream: &mut TcpStream,
    request: &DemoRequest,
    state: &Arc<Mutex<DemoState>>,
) {
    #[derive(Deserialize)]
    struct NewsRef {
        id: i64,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CommentBody {
        user: CommentAuthor,
        vote: Vote,
        comment: String,
        #[serde(default)]
        image_url: Vec<String>,
        news: NewsRef,
    }

    let body: CommentBody = match serde_json::from_str(&request.body) {
        Ok(body) => body,
        Err(_) => {
            send_response(
                stream,
                400,
                "Bad Request",
                r#"{"error": "Invalid comment payload"}"#,
            );
            return;
        }
    };

    let created = {
        let mut state = lock_state(state);
        let comment_id = state.next_comment_id;
        let news = match state.news.iter_mut().find(|n| n.id == body.news.id) {
            Some(news) => news,
            None => {
                send_not_found(stream);
                return;
            }
        };
        let comment = Comment {
            id: comment_id,
            user: body.user,
            vote: body.vote,
            comment: body.comment,
            image_url: body.image_url,
        };
        news.comments.push(comment.clone());
        state.next_comment_id += 1;
        comment
    };

    send_json(stream, 201, "Created", &created);
}

fn handle_delete_comment(stream: &mut TcpStream, id: &str, state: &Arc<Mutex<DemoState>>) {
    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            send_not_found(stream);
            return;
        }
    };

    let removed = {
        let mut state = lock_state(state);
        let mut removed = false;
        for news in state.news.iter_mut() {
            let before = news.comments.len();
            news.comments.retain(|c| c.id != id);
            if news.comments.len() < before {
                removed = true;
                break;
            }
        }
        removed
    };

    if removed {
        send_response(stream, 200, "OK", "{}");
    } else {
        send_not_found(stream);
    }
}

fn handle_list_users(stream: &mut TcpStream, request: &DemoRequest, state: &Arc<Mutex<DemoState>>) {
    if !has_bearer_token(request) {
        send_unauthorized(stream);
        return;
    }

    let users = {
        let state = lock_state(state);
        state.users.clone()
    };
    send_json(stream, 200, "OK", &users);
}

fn handle_role_change(
    stream: &mut TcpStream,
    request: &DemoRequest,
    id: &str,
    state: &Arc<Mutex<DemoState>>,
    promote: bool,
) {
    if !has_bearer_token(request) {
        send_unauthorized(stream);
        return;
    }

    let id = match id.parse::<i64>() {
        Ok(id) => id,
        Err(_) => {
            send_not_found(stream);
            return;
        }
    };

    let updated = {
        let mut state = lock_state(state);
        match state.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                if promote {
                    if !user.roles.contains(&Role::Member) {
                        user.roles.push(Role::Member);
                    }
                } else {
                    user.roles = vec![Role::Reader];
                }
                Some(user.clone())
            }
            None => None,
        }
    };

    match updated {
        Some(user) => send_json(stream, 200, "OK", &user),
        None => send_not_found(stream),
    }
}

fn handle_authenticate(
    stream: &mut TcpStream,
    request: &DemoRequest,
    config: &DemoConfig,
    state: &Arc<Mutex<DemoState>>,
) {
    #[derive(Deserialize)]
    struct AuthBody {
        email: String,
        password: String,
    }

    if config.fail_auth {
        send_unauthorized(stream);
        return;
    }

    let body: AuthBody = match serde_json::from_str(&request.body) {
        Ok(body) => body,
        Err(_) => {
            send_response(
                stream,
                400,
                "Bad Request",
                r#"{"error": "Invalid credentials payload"}"#,
            );
            return;
        }
    };

    let matched = {
        let state = lock_state(state);
        state.users.iter().find(|u| u.email == body.email).cloned()
    };

    match matched {
        Some(user) if body.password == config.password => {
            let response = serde_json::json!({
                "access_token": format!("demo-token-{}", user.id),
                "user": user,
            });
            send_json(stream, 200, "OK", &response);
        }
        _ => send_unauthorized(stream),
    }
}

fn handle_register(stream: &mut TcpStream, request: &DemoRequest, state: &Arc<Mutex<DemoState>>) {
    let registration: Registration = match serde_json::from_str(&request.body) {
        Ok(registration) => registration,
        Err(_) => {
            send_response(
                stream,
                400,
                "Bad Request",
                r#"{"error": "Invalid registration payload"}"#,
            );
            return;
        }
    };

    let created = {
        let mut state = lock_state(state);
        if state.users.iter().any(|u| u.email == registration.email) {
            send_response(
                stream,
                409,
                "Conflict",
                r#"{"error": "Email already registered"}"#,
            );
            return;
        }
        let user = User {
            id: state.next_user_id,
            firstname: registration.firstname,
            lastname: registration.lastname,
            email: registration.email,
            image: registration.image,
            roles: vec![Role::Reader],
        };
        state.next_user_id += 1;
        state.users.push(user.clone());
        user
    };

    send_json(stream, 201, "Created", &created);
}

// =============================================================================
// Seed data
// =============================================================================

/// Seed accounts: one admin, one member, one reader. All authenticate with
/// the configured demo password.
fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            firstname: "Paka".to_string(),
            lastname: "Wong".to_string(),
            email: "admin@factline.dev".to_string(),
            image: "https://demo.factline.dev/avatars/paka.png".to_string(),
            roles: vec![Role::Admin, Role::Member, Role::Reader],
        },
        User {
            id: 2,
            firstname: "Somsak".to_string(),
            lastname: "Rattana".to_string(),
            email: "reporter@factline.dev".to_string(),
            image: "https://demo.factline.dev/avatars/somsak.png".to_string(),
            roles: vec![Role::Member, Role::Reader],
        },
        User {
            id: 3,
            firstname: "Mina".to_string(),
            lastname: "Sato".to_string(),
            email: "reader@factline.dev".to_string(),
            image: "https://demo.factline.dev/avatars/mina.png".to_string(),
            roles: vec![Role::Reader],
        },
    ]
}

/// Seed news items cycling through the four vote patterns: real majority,
/// fake majority, tied, and unvoted. Returns the items and the next free
/// comment id.
fn seed_news(count: usize) -> (Vec<News>, i64) {
    let topics = [
        (
            "City council approves riverfront cleanup",
            "Cleanup funding passed 7-2 after a long public session.",
            "Pim Charoen",
        ),
        (
            "New rail link cuts commute by half",
            "The airport express opened to the public this morning.",
            "Anan Srisuwan",
        ),
        (
            "Street vendors face new permit rules",
            "Permits will be required in the old town starting next month.",
            "Kanya Boon",
        ),
        (
            "Reservoir levels hit ten-year low",
            "Officials urge households to reduce water use through April.",
            "Niran Petch",
        ),
        (
            "Night market fire contained in an hour",
            "No injuries reported; twelve stalls damaged in the east wing.",
            "Pim Charoen",
        ),
        (
            "University drops entrance exam fees",
            "Applications open next week under the new fee-free policy.",
            "Dao Meesang",
        ),
        (
            "Coastal road reopens after landslide",
            "One lane remains closed for inspection until Friday.",
            "Anan Srisuwan",
        ),
        (
            "Hospital expands emergency ward",
            "Capacity doubles following a record quarter of admissions.",
            "Kanya Boon",
        ),
    ];

    let commenters = ["somchai99", "nok_review", "factcheck_tan", "mali.p"];
    let remarks = [
        "confirmed by two independent outlets",
        "the attached photo looks edited",
        "I was there, this matches what I saw",
        "no official statement backs this up",
    ];

    let today = Utc::now().date_naive();
    let mut next_comment_id: i64 = 1;
    let mut items = Vec::with_capacity(count);

    for i in 0..count {
        let (topic, short_detail, reporter) = topics[i % topics.len()];
        let votes: &[Vote] = match i % 4 {
            0 => &[Vote::Real, Vote::Real, Vote::Fake],
            1 => &[Vote::Fake, Vote::Fake, Vote::Real],
            2 => &[Vote::Real, Vote::Fake],
            _ => &[],
        };

        let comments = votes
            .iter()
            .enumerate()
            .map(|(j, vote)| {
                let comment = Comment {
                    id: next_comment_id,
                    // Alternate author shapes so both wire forms stay exercised
                    user: if j % 2 == 0 {
                        CommentAuthor::Name(commenters[j % commenters.len()].to_string())
                    } else {
                        CommentAuthor::User {
                            id: (j % 3) as i64 + 1,
                            firstname: "Mina".to_string(),
                            lastname: "Sato".to_string(),
                        }
                    },
                    vote: *vote,
                    comment: remarks[(i + j) % remarks.len()].to_string(),
                    image_url: vec![],
                };
                next_comment_id += 1;
                comment
            })
            .collect();

        items.push(News {
            id: i as i64 + 1,
            topic: topic.to_string(),
            short_detail: short_detail.to_string(),
            full_detail: format!(
                "{} Full report: {} Officials say further updates will follow.",
                short_detail, topic
            ),
            reporter: reporter.to_string(),
            report_date: today - Duration::days(i as i64),
            image_url: vec![format!(
                "https://demo.factline.dev/images/news-{}.jpg",
                i + 1
            )],
            comments,
        });
    }

    (items, next_comment_id)
}
