//! Integration tests for the Gemini gateway and the pipelines built on it.
//!
//! Every test runs against a local mock of `generateContent` (see
//! tests/common), so no API key or network access is needed.

mod common;

use axum::http::StatusCode;
use common::{spawn_mock, spawn_text_mock, spawn_truncated_response, TEST_API_KEY};
use serde_json::json;
use stratify_lib::llm::{
    self, analyze::EMPTY_CSV, execute::NO_STEPS_SELECTED, ContinuationContext, CsvAnalysisRequest,
    ExecutePathRequest, ExecuteStepsRequest, GatewayConfig, GatewayError, GeminiClient,
};

fn data_steps() -> Vec<String> {
    vec![
        "Gather relevant data".to_string(),
        "Analyze patterns".to_string(),
        "Draw conclusions".to_string(),
    ]
}

// ── Gateway ──────────────────────────────────────────────────────────

#[tokio::test]
async fn call_model_sends_generate_content_request() {
    let mock = spawn_text_mock("  Hello from Gemini  ").await;

    let text = mock.client().call_model("Say hello", 256).await.unwrap();
    assert_eq!(text, "Hello from Gemini");

    let req = mock.last_request();
    assert_eq!(req.path, "/v1beta/models/gemini-2.0-flash:generateContent");
    assert_eq!(req.query.as_deref(), Some(format!("key={}", TEST_API_KEY).as_str()));
    assert_eq!(req.prompt(), "Say hello");
    assert_eq!(req.body["contents"][0]["role"], "user");
    assert_eq!(req.max_output_tokens(), 256);
    assert_eq!(req.body["generationConfig"]["temperature"], 0.8);
    assert_eq!(req.body["generationConfig"]["topP"], 0.9);
}

#[tokio::test]
async fn missing_key_makes_no_request() {
    let mock = spawn_text_mock("unused").await;

    let err = mock.client_without_key().call_model("ping", 16).await.unwrap_err();
    assert_eq!(err, GatewayError::MissingApiKey);
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn provider_error_message_is_surfaced() {
    let mock = spawn_mock(
        StatusCode::BAD_REQUEST,
        json!({"error": {"code": 400, "message": "API key not valid. Please pass a valid API key."}}),
    )
    .await;

    let err = mock.client().call_model("hi", 64).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Gemini API Error (400): API key not valid. Please pass a valid API key."
    );
}

#[tokio::test]
async fn provider_error_without_message_uses_status_text() {
    let mock = spawn_mock(StatusCode::SERVICE_UNAVAILABLE, json!(null)).await;

    let err = mock.client().call_model("hi", 64).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Provider {
            status: 503,
            message: "Request failed with status code 503".to_string()
        }
    );
}

#[tokio::test]
async fn empty_candidate_text_is_an_error() {
    let mock = spawn_mock(
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": "   "}]}}]}),
    )
    .await;

    let err = mock.client().call_model("hi", 64).await.unwrap_err();
    assert_eq!(err, GatewayError::EmptyOutput);
    assert_eq!(err.to_string(), "Gemini response contained no text.");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Grab a free port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = GatewayConfig::new(TEST_API_KEY).with_base_url(&format!("http://{}", addr));
    let err = GeminiClient::new(config).call_model("hi", 64).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport { .. }), "got {:?}", err);
    assert!(err.to_string().starts_with("Gemini API Error (N/A): "));
    assert!(!err.to_string().contains(TEST_API_KEY), "key leaked: {}", err);
    assert!(!err.to_string().contains("key="), "query leaked: {}", err);
}

#[tokio::test]
async fn truncated_error_body_keeps_provider_status() {
    let base_url = spawn_truncated_response(502).await;

    let config = GatewayConfig::new(TEST_API_KEY).with_base_url(&base_url);
    let err = GeminiClient::new(config).call_model("hi", 64).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Provider {
            status: 502,
            message: "Request failed with status code 502".to_string(),
        }
    );
    assert!(!err.to_string().contains(TEST_API_KEY));
}

// ── Thinking paths ───────────────────────────────────────────────────

#[tokio::test]
async fn thinking_paths_are_parsed_from_prose_wrapped_json() {
    let mock = spawn_text_mock(
        r#"Here are four approaches:
```json
{"paths": [
  {"name": "First Principles", "steps": ["Strip assumptions", "Rebuild from basics", "Validate"]},
  {"name": "Analogy", "steps": ["Find a parallel", "Map the structure", "Adapt the lessons"]},
  {"name": "Inversion", "steps": ["Define failure", "List causes", "Avoid them"]},
  {"name": "Experiment", "steps": ["Form a hypothesis", "Run a test", "Measure"]}
]}
```
Let me know which one you like."#,
    )
    .await;

    let outcome = llm::generate_thinking_paths(&mock.client(), "How should I price my app?").await;
    assert!(outcome.success);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.paths.len(), 4);
    assert_eq!(outcome.paths[2].name, "Inversion");

    let req = mock.last_request();
    assert_eq!(req.max_output_tokens(), 2048);
    assert!(req.prompt().contains(r#""How should I price my app?""#));
}

#[tokio::test]
async fn unparseable_paths_fall_back_to_keyword_set() {
    let mock = spawn_text_mock("I'd rather just chat about your code.").await;

    let outcome = llm::generate_thinking_paths(&mock.client(), "Review my code").await;
    assert!(!outcome.success);
    assert_eq!(outcome.paths, llm::fallback_paths("Review my code"));
    assert_eq!(outcome.paths[0].name, "Step by Step");
    assert_eq!(
        outcome.error.as_deref(),
        Some("Failed to parse thinking paths JSON: No JSON found in Gemini output.")
    );
}

#[tokio::test]
async fn gateway_failure_falls_back_with_gateway_message() {
    let mock = spawn_text_mock("unused").await;

    let outcome =
        llm::generate_thinking_paths(&mock.client_without_key(), "analyze churn data").await;
    assert!(!outcome.success);
    assert_eq!(outcome.paths[0].name, "Data Driven");
    assert_eq!(outcome.error, Some(GatewayError::MissingApiKey.to_string()));
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn parsed_paths_without_key_are_empty_success() {
    let mock = spawn_text_mock(r#"{"ideas": ["a", "b"]}"#).await;

    let outcome = llm::generate_thinking_paths(&mock.client(), "anything").await;
    assert!(outcome.success);
    assert!(outcome.paths.is_empty());
}

#[tokio::test]
async fn null_paths_are_an_empty_success() {
    let mock = spawn_text_mock(r#"Nothing fits: {"paths": null}"#).await;

    let outcome = llm::generate_thinking_paths(&mock.client(), "anything").await;
    assert!(outcome.success);
    assert!(outcome.error.is_none());
    assert!(outcome.paths.is_empty());
}

#[tokio::test]
async fn updated_paths_are_parsed_on_success() {
    let mock = spawn_text_mock(
        r#"{"paths": [
  {"name": "Go Deeper", "steps": ["Pick the strongest lead", "Quantify it", "Stress-test it"]},
  {"name": "Flip It", "steps": ["State the opposite", "Look for evidence", "Reconcile"]}
]}"#,
    )
    .await;
    let ctx = ContinuationContext {
        original_query: "How do I grow revenue?".to_string(),
        last_response: "Pricing is the main lever.".to_string(),
        last_path_name: "Data Driven".to_string(),
        last_steps_executed: 3,
        ..ContinuationContext::default()
    };

    let outcome = llm::generate_updated_paths(&mock.client(), &ctx).await;
    assert!(outcome.success);
    assert!(outcome.error.is_none());
    assert_eq!(outcome.paths.len(), 2);
    assert_eq!(outcome.paths[0].name, "Go Deeper");
    assert_eq!(outcome.paths[1].steps[2], "Reconcile");
    assert_eq!(mock.last_request().max_output_tokens(), 768);
}

#[tokio::test]
async fn updated_paths_gateway_failure_uses_fixed_set_and_raw_message() {
    let mock = spawn_mock(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": {"code": 500, "message": "Internal error encountered."}}),
    )
    .await;
    let ctx = ContinuationContext {
        original_query: "Should we expand to Europe?".to_string(),
        last_path_name: "Strategic".to_string(),
        last_steps_executed: 1,
        ..ContinuationContext::default()
    };

    let outcome = llm::generate_updated_paths(&mock.client(), &ctx).await;
    assert!(!outcome.success);
    assert_eq!(outcome.paths, llm::continuation_paths("ignored", 0));
    assert_eq!(
        outcome.error.as_deref(),
        Some("Gemini API Error (500): Internal error encountered.")
    );
    assert_eq!(mock.hits(), 1);
}

#[tokio::test]
async fn updated_paths_embed_context_and_fall_back_to_fixed_set() {
    let mock = spawn_text_mock("{ this is not json }").await;
    let ctx = ContinuationContext {
        original_query: "How do I grow revenue?".to_string(),
        last_response: "r".repeat(900),
        last_path_name: "Data Driven".to_string(),
        last_steps_executed: 2,
        ..ContinuationContext::default()
    };

    let outcome = llm::generate_updated_paths(&mock.client(), &ctx).await;
    assert!(!outcome.success);
    assert_eq!(outcome.paths, llm::continuation_paths("ignored", 0));
    assert!(outcome
        .error
        .as_deref()
        .unwrap()
        .starts_with("Failed to parse continuation paths JSON: "));

    let req = mock.last_request();
    assert_eq!(req.max_output_tokens(), 768);
    assert!(req.prompt().contains(&format!("\"{}...\"", "r".repeat(500))));
    assert!(req.prompt().contains(r#""Data Driven" (executed 2 steps)"#));
}

// ── Execute ──────────────────────────────────────────────────────────

#[tokio::test]
async fn execute_path_returns_verbatim_text() {
    let answer = "**Following \"Data Driven\" Approach:**\n\n**Step 1: Gather relevant data**\n- {not json}";
    let mock = spawn_text_mock(answer).await;
    let request = ExecutePathRequest {
        query: "Why are users churning?".to_string(),
        path_name: "Data Driven".to_string(),
        steps: data_steps(),
        execute_up_to_step: 2,
    };

    let outcome = llm::execute_thinking_path(&mock.client(), &request).await;
    assert!(outcome.success);
    assert_eq!(outcome.response.as_deref(), Some(answer));
    assert_eq!(outcome.path_name.as_deref(), Some("Data Driven"));
    assert_eq!(outcome.steps_executed, Some(2));

    let req = mock.last_request();
    assert_eq!(req.max_output_tokens(), 4096);
    assert!(req.prompt().contains("Step 2: Analyze patterns\n"));
    assert!(!req.prompt().contains("Step 3: Draw conclusions"));
}

#[tokio::test]
async fn execute_path_reports_gateway_error() {
    let mock = spawn_mock(StatusCode::TOO_MANY_REQUESTS, json!({"message": "slow down"})).await;
    let request = ExecutePathRequest {
        query: "q".to_string(),
        path_name: "p".to_string(),
        steps: data_steps(),
        execute_up_to_step: 1,
    };

    let outcome = llm::execute_thinking_path(&mock.client(), &request).await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("Gemini API Error (429): slow down"));
    assert!(outcome.response.is_none());
}

#[tokio::test]
async fn selected_steps_are_sorted_and_deduplicated() {
    let mock = spawn_text_mock("Step results").await;
    let request = ExecuteStepsRequest {
        query: "Why are users churning?".to_string(),
        path_name: "Data Driven".to_string(),
        steps: data_steps(),
        selected_steps: vec![3, 1, 2, 1],
    };

    let outcome = llm::execute_thinking_steps(&mock.client(), &request).await;
    assert!(outcome.success);
    assert_eq!(outcome.selected_steps, Some(vec![1, 2, 3]));
    assert_eq!(outcome.response.as_deref(), Some("Step results"));

    let req = mock.last_request();
    assert_eq!(req.max_output_tokens(), 4096);
    let prompt = req.prompt();
    let one = prompt.find("**Step 1: Gather relevant data**").unwrap();
    let two = prompt.find("**Step 2: Analyze patterns**").unwrap();
    let three = prompt.find("**Step 3: Draw conclusions**").unwrap();
    assert!(one < two && two < three);
    assert_eq!(prompt.matches("**Step 1:").count(), 1);
}

#[tokio::test]
async fn no_selected_steps_makes_no_request() {
    let mock = spawn_text_mock("unused").await;
    let request = ExecuteStepsRequest {
        query: "q".to_string(),
        path_name: "p".to_string(),
        steps: data_steps(),
        selected_steps: vec![],
    };

    let outcome = llm::execute_thinking_steps(&mock.client(), &request).await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some(NO_STEPS_SELECTED));
    assert_eq!(mock.hits(), 0);
}

// ── CSV + ping ───────────────────────────────────────────────────────

#[tokio::test]
async fn empty_csv_makes_no_request() {
    let mock = spawn_text_mock("unused").await;
    let request = CsvAnalysisRequest {
        file_name: "empty.csv".to_string(),
        csv_text: String::new(),
    };

    let outcome = llm::analyze_csv(&mock.client(), &request).await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some(EMPTY_CSV));
    assert_eq!(outcome.error.as_deref(), Some("Empty or invalid CSV content."));
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn long_csv_is_truncated_to_budget() {
    let mock = spawn_text_mock("## Summary\nLooks like sales data.").await;
    let csv_text = format!("region,amount\n{}", "north,1\n".repeat(2000));
    assert!(csv_text.chars().count() > 8000);
    let request = CsvAnalysisRequest {
        file_name: "sales.csv".to_string(),
        csv_text: csv_text.clone(),
    };

    let outcome = llm::analyze_csv(&mock.client(), &request).await;
    assert!(outcome.success);
    assert_eq!(outcome.text.as_deref(), Some("## Summary\nLooks like sales data."));

    let req = mock.last_request();
    assert_eq!(req.max_output_tokens(), 4096);
    let prompt = req.prompt();
    let start = prompt.find("---CSV START---\n").unwrap() + "---CSV START---\n".len();
    let end = prompt.find("\n---CSV END---").unwrap();
    let embedded = &prompt[start..end];
    assert_eq!(embedded.chars().count(), 8000);
    assert_eq!(embedded, &csv_text[..8000]);
}

#[tokio::test]
async fn ping_sends_default_message_with_small_budget() {
    let mock = spawn_text_mock("pong").await;

    let outcome = llm::ping(&mock.client(), None).await;
    assert!(outcome.success);
    assert_eq!(outcome.response.as_deref(), Some("pong"));

    let req = mock.last_request();
    assert_eq!(req.prompt(), "ping");
    assert_eq!(req.max_output_tokens(), 128);
}
