use docreview_api_client::api::REVIEW_PATH;
use docreview_api_client::session::ReviewSession;
use docreview_api_client::{ApiClient, ReviewApi, TemplateType};
use docreview_core::error::{NETWORK_ERROR, REQUEST_FAILED};
use docreview_core::{CandidateFile, FileValidator, ResultView};
use mockito::Matcher;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const MB: usize = 1024 * 1024;

fn client(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(server.url(), Duration::from_secs(60)).unwrap()
}

fn review_body() -> String {
    json!({
        "success": true,
        "data": {
            "total_score": 82,
            "detail_json": {
                "grammar": 85,
                "logic": 80,
                "innovation": 75,
                "readability": 82,
                "standardization": 88
            },
            "issues": [
                {
                    "loc_start": 12,
                    "loc_end": 20,
                    "issue_type": "grammar",
                    "message": "subject and verb disagree",
                    "suggestion": "use \"are\""
                }
            ],
            "word_count": 530
        }
    })
    .to_string()
}

fn txt(size: usize) -> CandidateFile {
    CandidateFile::new("notes.txt", "text/plain", vec![b'a'; size])
}

#[tokio::test]
async fn test_upload_sends_multipart_and_returns_review() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", REVIEW_PATH)
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="notes.txt""#.to_string()),
            Matcher::Regex(r#"name="review_type"\r\n\r\nacademic"#.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(review_body())
        .expect(1)
        .create_async()
        .await;

    let result = client(&server)
        .review_document(&txt(2 * MB), TemplateType::Academic, Arc::new(|_| {}))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.total_score, 82.0);
    assert_eq!(result.word_count, 530);
    assert_eq!(result.issues.len(), 1);

    let text = ResultView::from(&result).to_string();
    assert!(text.contains("Total score: 82"));
    assert!(text.contains("Word count:  530"));
    assert!(text.contains("[grammar] chars 12-20"));
}

#[tokio::test]
async fn test_upload_progress_is_monotonic_and_completes() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", REVIEW_PATH)
        .with_status(200)
        .with_body(review_body())
        .create_async()
        .await;

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    client(&server)
        .review_document(
            &txt(2 * MB),
            TemplateType::Business,
            Arc::new(move |pct| sink.lock().unwrap().push(pct)),
        )
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    assert!(seen.iter().all(|pct| (0.0..=100.0).contains(pct)));
    assert_eq!(*seen.last().unwrap(), 100.0);
}

#[tokio::test]
async fn test_unsupported_media_type_with_empty_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", REVIEW_PATH)
        .with_status(415)
        .create_async()
        .await;

    let err = client(&server)
        .review_document(&txt(100), TemplateType::Academic, Arc::new(|_| {}))
        .await
        .unwrap_err();

    assert!(err.message().contains("unsupported file format"));
}

#[tokio::test]
async fn test_server_error_text_is_preferred() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", REVIEW_PATH)
        .with_status(413)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"document has too many pages"}"#)
        .create_async()
        .await;

    let err = client(&server)
        .review_document(&txt(100), TemplateType::Academic, Arc::new(|_| {}))
        .await
        .unwrap_err();

    assert_eq!(err.message(), "document has too many pages");
}

#[tokio::test]
async fn test_unmapped_status_falls_back_to_generic_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", REVIEW_PATH)
        .with_status(500)
        .with_body("<html>internal error</html>")
        .create_async()
        .await;

    let err = client(&server)
        .review_document(&txt(100), TemplateType::Academic, Arc::new(|_| {}))
        .await
        .unwrap_err();

    assert_eq!(err.message(), REQUEST_FAILED);
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", REVIEW_PATH)
        .with_status(200)
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;

    let err = client(&server)
        .review_document(&txt(100), TemplateType::Academic, Arc::new(|_| {}))
        .await
        .unwrap_err();

    assert!(err.message().starts_with("review failed"));
}

#[tokio::test]
async fn test_envelope_without_data_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", REVIEW_PATH)
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    let err = client(&server)
        .review_document(&txt(100), TemplateType::Academic, Arc::new(|_| {}))
        .await
        .unwrap_err();

    assert_eq!(
        err.message(),
        "review failed: server returned no review result"
    );
}

#[tokio::test]
async fn test_unreachable_server_reports_network_error() {
    let client = ApiClient::new("http://127.0.0.1:1".to_string(), Duration::from_secs(5)).unwrap();

    let err = client
        .review_document(&txt(100), TemplateType::Academic, Arc::new(|_| {}))
        .await
        .unwrap_err();

    assert_eq!(err.message(), NETWORK_ERROR);
}

#[tokio::test]
async fn test_timeout_reports_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _silent = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let client = ApiClient::new(format!("http://{}", addr), Duration::from_millis(300)).unwrap();
    let err = client.get_review_result("task-7").await.unwrap_err();

    assert_eq!(err.message(), NETWORK_ERROR);
}

#[tokio::test]
async fn test_submit_review_sends_json_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/review/submit")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "document_id": "doc-42",
            "template_type": "code"
        })))
        .with_status(200)
        .with_body(r#"{"success":true,"data":{"task_id":"task-7","status":"pending"}}"#)
        .expect(1)
        .create_async()
        .await;

    let receipt = client(&server)
        .submit_review("doc-42", TemplateType::Code)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.task_id, "task-7");
    assert!(!receipt.status.is_terminal());
}

#[tokio::test]
async fn test_result_missing_word_count_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/review/task-7/result")
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "data": {
                    "total_score": 82,
                    "detail_json": {
                        "grammar": 85,
                        "logic": 80,
                        "readability": 82,
                        "standardization": 88
                    },
                    "issues": []
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server)
        .get_review_result("task-7")
        .await
        .unwrap_err();

    assert!(err.message().contains("word_count"));
}

#[tokio::test]
async fn test_result_fetch_returns_review() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/review/task-7/result")
        .with_status(200)
        .with_body(review_body())
        .create_async()
        .await;

    let result = client(&server).get_review_result("task-7").await.unwrap();
    assert_eq!(result.detail_json.innovation, Some(75.0));
}

#[tokio::test]
async fn test_result_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/review/missing/result")
        .with_status(404)
        .create_async()
        .await;

    let err = client(&server)
        .get_review_result("missing")
        .await
        .unwrap_err();

    assert_eq!(err.message(), "resource not found");
}

#[tokio::test]
async fn test_oversized_file_is_rejected_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut session = ReviewSession::new(client(&server), FileValidator::default());
    let err = session.select(txt(12 * MB)).unwrap_err();
    assert!(err.message().contains("10MB"));

    let err = session
        .upload(TemplateType::Academic, |_| {})
        .await
        .unwrap_err();
    assert!(err.message().contains("10MB"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_round_trip_updates_state() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", REVIEW_PATH)
        .with_status(200)
        .with_body(review_body())
        .create_async()
        .await;

    let mut session = ReviewSession::new(client(&server), FileValidator::default());
    session.select(txt(MB)).unwrap();

    let mut last = 0.0;
    session
        .upload(TemplateType::Academic, |pct| last = pct)
        .await
        .unwrap();

    assert_eq!(last, 100.0);
    let state = session.state();
    assert!(!state.is_in_flight());
    assert_eq!(state.progress(), 0.0);
    assert_eq!(
        state.status(),
        Some("review completed, total score: 82 (530 words)")
    );
}

#[tokio::test]
async fn test_unsupported_type_is_rejected_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut session = ReviewSession::new(client(&server), FileValidator::default());
    let err = session
        .select(CandidateFile::new("scan.png", "image/png", vec![0u8; 64]))
        .unwrap_err();
    for ext in [".docx", ".pdf", ".txt", ".py", ".java", ".cpp"] {
        assert!(err.message().contains(ext), "missing {ext} in {}", err.message());
    }
    assert!(session.state().selected_file().is_none());

    mock.assert_async().await;
}
