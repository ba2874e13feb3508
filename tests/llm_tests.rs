use code_sage::config::{ReasoningDepth, SafetyThreshold, Settings};
use code_sage::error::SageError;
use code_sage::llm::{
    ChatMessage, CompletionClient, CompletionOptions, OpenAiClient, split_reasoning,
};
use code_sage::prompts::reasoning_instruction;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn test_settings(base_url: &str, timeout_secs: u64) -> Settings {
    Settings {
        api_key: "sk-test".to_string(),
        model: "test-model".to_string(),
        base_url: base_url.to_string(),
        temperature: 0.2,
        max_tokens: 256,
        top_p: 0.95,
        reasoning_depth: ReasoningDepth::Medium,
        safety_threshold: SafetyThreshold::Medium,
        log_level: "info".to_string(),
        request_timeout_secs: timeout_secs,
        enable_streaming: false,
    }
}

/// Minimal HTTP/1.1 response with the given status line and JSON body.
fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Accept one connection, read the request, and write a canned response.
async fn serve_one(listener: TcpListener, response: String) {
    if let Ok((mut stream, _)) = listener.accept().await {
        let mut buf = [0u8; 8192];
        let _ = stream.read(&mut buf).await;
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.flush().await;
    }
}

#[test]
fn test_split_reasoning_multiple_blocks() {
    let result = split_reasoning("first block\n\nsecond block\n\nthe answer");
    assert_eq!(result.reasoning, "first block\n\nsecond block");
    assert_eq!(result.answer, "the answer");
}

#[test]
fn test_split_reasoning_two_blocks() {
    let result = split_reasoning("because of X\n\ntherefore Y");
    assert_eq!(result.reasoning, "because of X");
    assert_eq!(result.answer, "therefore Y");
}

#[test]
fn test_split_reasoning_no_separator_returns_text_unchanged() {
    let text = "a single paragraph with no blank line";
    let result = split_reasoning(text);
    assert_eq!(result.reasoning, "");
    assert_eq!(result.answer, text);
}

#[test]
fn test_split_reasoning_preserves_leftover_newlines() {
    // Three consecutive newlines: the separator is consumed greedily from
    // the left, so the stray newline stays attached to the answer block.
    let result = split_reasoning("a\n\n\nb");
    assert_eq!(result.reasoning, "a");
    assert_eq!(result.answer, "\nb");
}

#[test]
fn test_reasoning_instruction_mapping() {
    assert_eq!(
        reasoning_instruction(ReasoningDepth::Low),
        "Think step by step."
    );
    assert_eq!(
        reasoning_instruction(ReasoningDepth::Medium),
        "Think through this carefully, showing your reasoning process."
    );
    assert!(reasoning_instruction(ReasoningDepth::High).contains("multiple approaches"));
}

#[tokio::test]
async fn test_successful_completion_extracts_first_choice_text() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello world"}}]}"#;
    tokio::spawn(serve_one(listener, http_response("200 OK", body)));

    let client = OpenAiClient::new(&test_settings(&format!("http://{addr}"), 5));
    let text = client
        .complete(vec![ChatMessage::user("hi")], CompletionOptions::default())
        .await
        .expect("completion should succeed");

    assert_eq!(text, "hello world");
}

#[tokio::test]
async fn test_non_success_status_surfaces_api_error_with_status_and_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(serve_one(
        listener,
        http_response("500 Internal Server Error", r#"{"error":"boom"}"#),
    ));

    let client = OpenAiClient::new(&test_settings(&format!("http://{addr}"), 5));
    let err = client
        .complete(vec![ChatMessage::user("hi")], CompletionOptions::default())
        .await
        .expect_err("500 must surface as an error");

    match err {
        SageError::Api { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected API error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_response_shape_is_a_format_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(serve_one(
        listener,
        http_response("200 OK", r#"{"id":"cmpl-1","choices":[]}"#),
    ));

    let client = OpenAiClient::new(&test_settings(&format!("http://{addr}"), 5));
    let err = client
        .complete(vec![ChatMessage::user("hi")], CompletionOptions::default())
        .await
        .expect_err("empty choices must surface as an error");

    assert!(
        matches!(err, SageError::ResponseFormat(_)),
        "expected format error, got: {err:?}"
    );
}

#[tokio::test]
async fn test_timeout_yields_timeout_error_distinct_from_api_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    // Accept the connection and hold it open without ever responding.
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            drop(stream);
        }
    });

    let client = OpenAiClient::new(&test_settings(&format!("http://{addr}"), 1));
    let start = std::time::Instant::now();
    let err = client
        .complete(vec![ChatMessage::user("hi")], CompletionOptions::default())
        .await
        .expect_err("a hung endpoint must time out");

    assert!(
        matches!(err, SageError::Timeout { timeout_secs: 1 }),
        "expected timeout error, got: {err:?}"
    );
    assert!(!matches!(err, SageError::Api { .. }));
    // Bounded: well past the 1s limit but nowhere near the 60s hang.
    assert!(start.elapsed() < std::time::Duration::from_secs(10));
}

#[tokio::test]
async fn test_streaming_mode_accumulates_delta_fragments() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let events = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\", \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"world\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{events}",
        events.len()
    );
    tokio::spawn(serve_one(listener, response));

    let client = OpenAiClient::new(&test_settings(&format!("http://{addr}"), 5));
    let options = CompletionOptions {
        stream: Some(true),
        ..CompletionOptions::default()
    };
    let text = client
        .complete(vec![ChatMessage::user("hi")], options)
        .await
        .expect("streaming completion should succeed");

    assert_eq!(text, "Hello, world");
}

#[tokio::test]
async fn test_complete_with_reasoning_appends_instruction_and_splits() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let body =
        r#"{"choices":[{"message":{"content":"thinking about it\n\nthe final answer"}}]}"#;
    let response = http_response("200 OK", body);
    let (request_tx, request_rx) = tokio::sync::oneshot::channel();

    // Read until the depth instruction shows up in the request body, then
    // respond and hand the captured request back to the test.
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        request.extend_from_slice(&buf[..n]);
                        if String::from_utf8_lossy(&request).contains("Think step by step.") {
                            break;
                        }
                    }
                }
            }
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.flush().await;
            let _ = request_tx.send(String::from_utf8_lossy(&request).into_owned());
        }
    });

    let client = OpenAiClient::new(&test_settings(&format!("http://{addr}"), 5));
    let result = client
        .complete_with_reasoning(
            vec![ChatMessage::user("why?")],
            Some(ReasoningDepth::Low),
        )
        .await
        .expect("reasoning completion should succeed");

    assert_eq!(result.reasoning, "thinking about it");
    assert_eq!(result.answer, "the final answer");

    let request = request_rx.await.expect("request should be captured");
    assert!(
        request.contains("Think step by step."),
        "depth instruction should be appended to the final user message"
    );
}
