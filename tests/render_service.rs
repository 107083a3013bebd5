use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use splitmark::app::{Message, Model, Session};
use splitmark::clipboard::Clipboard;
use splitmark::config::EditorSettings;
use splitmark::render::{ERROR_MESSAGE, HttpRenderer, MarkdownRenderer, RenderError};

struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Answer exactly one request, returning what the client sent.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/markdown", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });
    (url, handle)
}

/// Accept one connection and hold it open without answering.
fn hang_once(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/markdown", listener.local_addr().unwrap());
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        thread::sleep(hold);
        drop(stream);
    });
    url
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let content_length = head
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
            if buf.len() >= head_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

#[test]
fn test_successful_render_posts_json_and_returns_html() {
    let (url, server) = serve_once("200 OK", r#"{"html":"<h1>Hi</h1>"}"#);
    let renderer = HttpRenderer::new(url, Duration::from_secs(5));

    let html = renderer.render("# Hi").unwrap();
    assert_eq!(html, "<h1>Hi</h1>");

    let request = server.join().unwrap();
    assert!(request.starts_with("POST /api/markdown"));
    assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(request.ends_with(r##"{"markdown":"# Hi"}"##));
}

#[test]
fn test_server_error_maps_to_status() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
    let renderer = HttpRenderer::new(url, Duration::from_secs(5));

    let err = renderer.render("# Hi").unwrap_err();
    assert_eq!(err, RenderError::Status(500));
    server.join().unwrap();
}

#[test]
fn test_malformed_body_maps_to_decode_error() {
    let (url, server) = serve_once("200 OK", r#"{"markup":"<p>x</p>"}"#);
    let renderer = HttpRenderer::new(url, Duration::from_secs(5));

    let err = renderer.render("x").unwrap_err();
    assert!(matches!(err, RenderError::Decode(_)), "got {err:?}");
    server.join().unwrap();
}

#[test]
fn test_session_shows_service_html_in_preview() {
    let (url, server) = serve_once("200 OK", r#"{"html":"<h1>Hi</h1><p>there &amp; back</p>"}"#);
    let settings = EditorSettings {
        endpoint: url.clone(),
        ..EditorSettings::default()
    };
    let renderer: Arc<dyn MarkdownRenderer> =
        Arc::new(HttpRenderer::new(url, Duration::from_secs(5)));
    let mut session = Session::new(
        Model::default(),
        settings,
        renderer,
        Box::new(NoClipboard),
    );

    session.handle(Message::SetDocument("# Hi\n\nthere & back".to_string()), 0);
    session.tick(300);
    assert!(session.wait_for_render(Duration::from_secs(5), 310));

    assert_eq!(
        session.model().preview_lines(),
        vec!["Hi".to_string(), String::new(), "there & back".to_string()]
    );
    assert!(!session.model().render.is_rendering());
    server.join().unwrap();
}

#[test]
fn test_silent_service_times_out_as_network_error() {
    let url = hang_once(Duration::from_secs(10));
    let renderer = HttpRenderer::new(url, Duration::from_secs(1));

    let started = Instant::now();
    let err = renderer.render("# Hi").unwrap_err();
    assert!(matches!(err, RenderError::Network(_)), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(8));
}

#[test]
fn test_session_leaves_rendering_state_when_service_hangs() {
    let url = hang_once(Duration::from_secs(10));
    let settings = EditorSettings {
        endpoint: url.clone(),
        timeout: Duration::from_secs(1),
        ..EditorSettings::default()
    };
    let renderer: Arc<dyn MarkdownRenderer> =
        Arc::new(HttpRenderer::new(url, Duration::from_secs(1)));
    let mut session = Session::new(
        Model::default(),
        settings,
        renderer,
        Box::new(NoClipboard),
    );

    session.handle(Message::SetDocument("# Hi".to_string()), 0);
    session.tick(300);
    assert!(session.model().render.is_rendering());
    assert!(session.wait_for_render(Duration::from_secs(8), 1300));

    let render = &session.model().render;
    assert!(!render.is_rendering());
    assert_eq!(render.preview_content(), ERROR_MESSAGE);
    assert!(matches!(render.error(), Some(RenderError::Network(_))));
}
