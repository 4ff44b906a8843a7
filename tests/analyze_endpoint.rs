use std::net::SocketAddr;

use skill_matcher::core::ServiceClient;
use skill_matcher::errors::GENERIC_FAILURE_MESSAGE;
use skill_matcher::presenter::{ReportView, ScoreCategory};
use skill_matcher::{analyze_resume, InputCollector, RequestState, ResumeFile, SubmissionController};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const SCENARIO_BODY: &str = r#"{"match_score": 82, "matched_keywords": ["Go"], "missing_keywords": ["Kubernetes"], "ai_summary": "Strong match."}"#;

/// Accept one connection, capture the raw request and answer with a canned
/// response.
async fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        request
    });

    (addr, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let headers = text[..header_end].to_lowercase();
        let body_len = buf.len() - (header_end + 4);

        if let Some(length) = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
        {
            if body_len >= length {
                break;
            }
        } else if text.ends_with("0\r\n\r\n") {
            break;
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn collector_with(file_name: &str, job_description: &str, use_ai: bool) -> InputCollector {
    let mut collector = InputCollector::new();
    collector.set_resume_file(Some(ResumeFile::new(file_name, b"%PDF-1.4 fake".to_vec())));
    collector.set_job_description(job_description);
    collector.set_use_enhanced_analysis(use_ai);
    collector
}

#[tokio::test]
async fn test_scenario_success_and_wire_format() {
    let (addr, server) = serve_once("200 OK", SCENARIO_BODY).await;
    let client = ServiceClient::new(format!("http://{}", addr)).unwrap();
    let mut controller = SubmissionController::new(client);
    let collector = collector_with("r.pdf", "Backend engineer with Go experience", false);

    let state = controller.submit(collector.input()).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /analyze/ HTTP/1.1\r\n"));
    assert!(request.to_lowercase().contains("content-type: multipart/form-data"));
    assert!(request.contains(r#"name="resume"; filename="r.pdf""#));
    assert!(request.contains("%PDF-1.4 fake"));
    assert!(request.contains("name=\"job_description\"\r\n\r\nBackend engineer with Go experience\r\n"));
    assert!(request.contains("name=\"use_ai\"\r\n\r\nfalse\r\n"));

    let result = state.result().expect("expected a result").clone();
    let view = ReportView::from_result(&result);
    assert_eq!(view.score.category, ScoreCategory::High);
    assert_eq!(view.score.percent, 82);
    assert_eq!(view.matched_keywords, vec!["Go"]);
    assert_eq!(view.missing_keywords, vec!["Kubernetes"]);
    assert_eq!(result.summary_text, "Strong match.");
}

#[tokio::test]
async fn test_use_ai_flag_is_sent_as_true() {
    let (addr, server) = serve_once("200 OK", SCENARIO_BODY).await;
    let mut controller =
        SubmissionController::new(ServiceClient::new(format!("http://{}/", addr)).unwrap());
    let collector = collector_with("CV.PDF", "Data engineer", true);

    controller.submit(collector.input()).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("POST /analyze/ HTTP/1.1\r\n"));
    assert!(request.contains(r#"filename="CV.PDF""#));
    assert!(request.contains("name=\"use_ai\"\r\n\r\ntrue\r\n"));
}

#[tokio::test]
async fn test_service_reported_error() {
    let (addr, server) = serve_once("200 OK", r#"{"error": "Could not parse PDF"}"#).await;
    let mut controller =
        SubmissionController::new(ServiceClient::new(format!("http://{}", addr)).unwrap());
    let collector = collector_with("r.pdf", "Backend engineer", false);

    let state = controller.submit(collector.input()).await.unwrap();
    server.await.unwrap();

    assert_eq!(state, RequestState::Failed("Could not parse PDF".to_string()));
}

#[tokio::test]
async fn test_error_body_on_non_success_status_is_shown() {
    let (addr, server) =
        serve_once("422 Unprocessable Entity", r#"{"error": "Resume must be a PDF file."}"#).await;
    let mut controller =
        SubmissionController::new(ServiceClient::new(format!("http://{}", addr)).unwrap());
    let collector = collector_with("r.pdf", "Backend engineer", false);

    let state = controller.submit(collector.input()).await.unwrap();
    server.await.unwrap();

    assert_eq!(
        state.error_message(),
        Some("Resume must be a PDF file.")
    );
}

#[tokio::test]
async fn test_unusable_responses_collapse_to_generic_message() {
    let cases: [(&'static str, &'static str); 3] = [
        ("502 Bad Gateway", "<html>upstream down</html>"),
        ("200 OK", "not json at all"),
        ("200 OK", r#"{"match_score": 50}"#),
    ];

    for (status, body) in cases {
        let (addr, server) = serve_once(status, body).await;
        let mut controller =
            SubmissionController::new(ServiceClient::new(format!("http://{}", addr)).unwrap());
        let collector = collector_with("r.pdf", "Backend engineer", false);

        let state = controller.submit(collector.input()).await.unwrap();
        server.await.unwrap();

        assert_eq!(
            state,
            RequestState::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
            "{} {}",
            status,
            body
        );
    }
}

#[tokio::test]
async fn test_connection_refused_is_generic() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut controller =
        SubmissionController::new(ServiceClient::new(format!("http://{}", addr)).unwrap());
    let collector = collector_with("r.pdf", "Backend engineer", false);

    let state = controller.submit(collector.input()).await.unwrap();
    assert_eq!(state.error_message(), Some(GENERIC_FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_analyze_resume_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.Pdf");
    tokio::fs::write(&path, b"%PDF-1.7").await.unwrap();

    let (addr, server) = serve_once("200 OK", SCENARIO_BODY).await;
    let state = analyze_resume(&format!("http://{}", addr), Some(path.as_path()), "Go developer", false)
        .await
        .unwrap();
    let request = server.await.unwrap();

    assert!(request.contains(r#"filename="resume.Pdf""#));
    assert!(matches!(state, RequestState::Succeeded(_)));
}

#[tokio::test]
async fn test_analyze_resume_without_file_never_connects() {
    // Nothing listens here; validation must fail before any connection.
    let state = analyze_resume("http://127.0.0.1:9", None, "Go developer", false)
        .await
        .unwrap();
    assert_eq!(
        state,
        RequestState::Failed("Please upload a resume PDF file.".to_string())
    );
}
