//! Loading documents from files and HTTP URLs.
//!
//! HTTP tests run against a one-shot server on 127.0.0.1, never the network.

use dynajson_core::{DynaError, Element, Loader};
use std::io::Write;

fn fixture_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/read2.json")
}

// ============================================================================
// Filesystem
// ============================================================================

#[test]
fn load_fixture_and_navigate() {
    let root = Element::load(fixture_path()).unwrap();
    let gloss_div = root.select(["glossary", "GlossDiv"]);
    assert_eq!(gloss_div.select_by_key("title").as_str(), "S");
    let see_also = gloss_div
        .select(["GlossList", "GlossEntry", "GlossDef", "GlossSeeAlso"])
        .to_string();
    assert_eq!(see_also, r#"["GML", "XML"]"#);
}

#[test]
fn load_matches_parse_of_same_bytes() {
    let bytes = std::fs::read(fixture_path()).unwrap();
    let parsed = Element::parse(&bytes).unwrap();
    let loaded = Element::load(fixture_path()).unwrap();
    assert_eq!(parsed.value(), loaded.value());
}

#[test]
fn load_from_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.json");
    std::fs::write(&path, r#"{"a": [1, 2]}"#).unwrap();
    let root = Loader::new().load(path.to_str().unwrap()).unwrap();
    assert_eq!(root.select_by_key("a").count(), 2);
}

#[test]
fn unreadable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = Element::load(path.to_str().unwrap()).unwrap_err();
    match &err {
        DynaError::Io { locator, .. } => assert!(locator.ends_with("missing.json")),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{not json").unwrap();
    let err = Element::load(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, DynaError::Parse(_)));
}

// ============================================================================
// HTTP
// ============================================================================

#[cfg(feature = "http")]
mod http {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Helper: serve one canned response on a random local port and return a
    /// URL pointing at it.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/swagger.json")
    }

    #[test]
    fn http_200_is_parsed() {
        let url = serve_once("200 OK", r#"{"swagger": "2.0", "schemes": ["https", "http"]}"#);
        let root = Loader::new()
            .timeout(Duration::from_secs(10))
            .load(&url)
            .unwrap();
        assert_eq!(root.select_by_key("swagger").as_str(), "2.0");
        assert_eq!(root.select_by_key("schemes").as_element_array().len(), 2);
    }

    #[test]
    fn http_non_success_status_is_reported() {
        let url = serve_once("404 Not Found", "{}");
        let err = Element::load(&url).unwrap_err();
        match &err {
            DynaError::Http { status, url: u } => {
                assert_eq!(*status, 404);
                assert_eq!(u, &url);
            }
            other => panic!("expected Http, got {other:?}"),
        }
        assert!(err.is_io());
    }

    #[test]
    fn http_malformed_body_is_parse_error() {
        let url = serve_once("200 OK", "[1, 2");
        let err = Element::load(&url).unwrap_err();
        assert!(matches!(err, DynaError::Parse(_)));
    }

    #[test]
    fn connection_refused_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let err = Element::load(&format!("http://127.0.0.1:{port}/x.json")).unwrap_err();
        assert!(matches!(err, DynaError::Transport { .. }));
        assert!(err.is_io());
    }
}
