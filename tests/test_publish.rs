use cigartree::cigar_tree::{CigarTree, CigarTreeOptions};
use cigartree::pipeline::Job;
use cigartree::publish::{HttpPublisher, PublishError, Publisher, RecordingPublisher};
use cigartree::{BuildError, Error, build_cigar_tree, parse_alignment_str, parse_newick_str};
use serde_json::{Value, json};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use tempfile::TempDir;

fn scenario_tree() -> CigarTree {
    let tree = parse_newick_str("(A:1,B:1);").unwrap();
    let index = parse_alignment_str(">A\nAC-T\n>B\nACGT\n").unwrap();
    build_cigar_tree(&tree, &index, CigarTreeOptions::default()).unwrap()
}

fn write_inputs(newick: &str, fasta: &str) -> (TempDir, Job) {
    let dir = TempDir::new().unwrap();
    let tree_path = dir.path().join("family.nwk");
    let alignment_path = dir.path().join("family.fasta");
    std::fs::write(&tree_path, newick).unwrap();
    std::fs::write(&alignment_path, fasta).unwrap();
    let job = Job::new("PF00001", tree_path, alignment_path);
    (dir, job)
}

// --- ONE-SHOT HTTP SERVER ---
struct CapturedRequest {
    head: String,
    body: String,
}

/// Serves exactly one request with the given status line and body.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    serve_raw(format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ))
}

/// Serves exactly one request, answering with `response` verbatim.
fn serve_raw(response: String) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/history", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .map(|(_, value)| value.trim().parse::<usize>().unwrap())
            .unwrap_or(0);
        while buffer.len() < header_end + content_length {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before body was complete");
            buffer.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buffer[header_end..header_end + content_length]).into_owned();

        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            head,
            body: request_body,
        }
    });

    (base_url, handle)
}

fn local_publisher(base_url: &str) -> HttpPublisher {
    let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
    HttpPublisher::new(base_url).with_client(client)
}

// --- TESTS HTTP PUBLISHER ---
#[test]
fn test_http_submit_success() {
    let (base_url, server) = serve_once("200 OK", r#"{"status":"stored","version":3}"#);
    let tree = scenario_tree();

    let acknowledgement = local_publisher(&base_url).submit("PF/01", &tree).unwrap();
    assert_eq!(acknowledgement, Some(json!({"status": "stored", "version": 3})));

    let request = server.join().unwrap();
    assert!(request.head.starts_with("POST /history/PF%2F01 HTTP/1.1\r\n"));
    assert!(request.head.to_ascii_lowercase().contains("content-type: application/json"));
    let sent: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(sent, serde_json::to_value(&tree).unwrap());
}

#[test]
fn test_http_submit_trailing_slash_and_empty_body() {
    let (base_url, server) = serve_once("201 Created", "");
    let acknowledgement = local_publisher(&format!("{base_url}/"))
        .submit("fam1", &scenario_tree())
        .unwrap();
    assert_eq!(acknowledgement, None);

    let request = server.join().unwrap();
    assert!(request.head.starts_with("POST /history/fam1 HTTP/1.1\r\n"));
}

#[test]
fn test_http_submit_non_success_status() {
    let (base_url, server) = serve_once("500 Internal Server Error", "boom");
    let err = local_publisher(&base_url).submit("fam1", &scenario_tree()).unwrap_err();
    match err {
        PublishError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    // The tree was still sent in full
    let request = server.join().unwrap();
    assert!(request.body.contains("\"2M1D1M\""));
}

#[test]
fn test_http_submit_status_kept_when_body_is_cut_off() {
    let (base_url, server) = serve_raw(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\nConnection: close\r\n\r\nbusy".to_string(),
    );
    let err = local_publisher(&base_url).submit("fam1", &scenario_tree()).unwrap_err();
    match err {
        PublishError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    server.join().unwrap();
}

#[test]
fn test_http_submit_text_acknowledgement() {
    let (base_url, server) = serve_once("200 OK", "stored");
    let acknowledgement = local_publisher(&base_url).submit("fam1", &scenario_tree()).unwrap();
    assert_eq!(acknowledgement, Some(json!("stored")));
    server.join().unwrap();
}

#[test]
fn test_http_submit_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/history", listener.local_addr().unwrap());
    drop(listener);

    let err = local_publisher(&base_url).submit("fam1", &scenario_tree()).unwrap_err();
    assert!(matches!(err, PublishError::Transport(_)));
}

// --- TESTS PIPELINE WITH RECORDING PUBLISHER ---
#[test]
fn test_job_publishes_once() {
    let (_dir, job) = write_inputs("(A:1,B:1);", ">A\nAC-T\n>B\nACGT\n");
    let publisher = RecordingPublisher::new().with_acknowledgement(json!({"ok": true}));
    let mut diagnostics = Vec::new();

    let acknowledgement = job.run(&publisher, &mut diagnostics).unwrap();
    assert_eq!(acknowledgement, Some(json!({"ok": true})));

    let submissions = publisher.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].family_id, "PF00001");
    assert_eq!(submissions[0].document["child"][0]["cigar"], json!("2M1D1M"));

    let printed: Value = serde_json::from_slice(&diagnostics).unwrap();
    assert_eq!(printed, submissions[0].document);
}

#[test]
fn test_job_omits_sequences() {
    let (_dir, job) = write_inputs("(A:1,B:1);", ">A\nAC-T\n>B\nACGT\n");
    let job = job.with_options(CigarTreeOptions::default().without_sequences());
    let publisher = RecordingPublisher::new();

    assert_eq!(job.run(&publisher, &mut Vec::new()).unwrap(), None);
    let document = &publisher.submissions()[0].document;
    assert!(document["child"][0].get("seq").is_none());
}

#[test]
fn test_missing_sequence_publishes_nothing() {
    let (_dir, job) = write_inputs("(A:1,(B:1,C:1));", ">A\nAC-T\n>B\nACGT\n");
    let publisher = RecordingPublisher::new();
    let mut diagnostics = Vec::new();

    let err = job.run(&publisher, &mut diagnostics).unwrap_err();
    assert_eq!(
        err.as_build_error(),
        Some(&BuildError::MissingSequence { name: "C".to_string() })
    );
    assert!(publisher.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_malformed_alignment_publishes_nothing() {
    let (_dir, job) = write_inputs("(A,B);", ">A\nAC-T\n>B\nACG\n");
    let publisher = RecordingPublisher::new();

    let err = job.run(&publisher, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Build(BuildError::MalformedAlignment { .. })));
    assert!(publisher.is_empty());
}

#[test]
fn test_invalid_tree_names_path() {
    let (_dir, job) = write_inputs("(A,B", ">A\nAC\n>B\nAC\n");
    let publisher = RecordingPublisher::new();

    match job.run(&publisher, &mut Vec::new()) {
        Err(Error::Tree { path, .. }) => assert_eq!(path, job.tree_path),
        other => panic!("expected tree error, got {other:?}"),
    }
    assert!(publisher.is_empty());
}
