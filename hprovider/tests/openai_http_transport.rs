#![cfg(feature = "provider-openai")]

use std::time::Duration;

use hprovider::adapters::openai::{
    OpenAiAuth, OpenAiFinishReason, OpenAiFunction, OpenAiHttpTransport, OpenAiMessage,
    OpenAiRequest, OpenAiRole, OpenAiTransport,
};
use hprovider::{ProviderErrorKind, SecretString};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> OpenAiHttpTransport {
    OpenAiHttpTransport::with_timeout(Duration::from_secs(5))
        .expect("client should build")
        .with_base_url(server.uri())
}

fn bmi_request() -> OpenAiRequest {
    OpenAiRequest {
        model: "gpt-4-0613".to_string(),
        messages: vec![OpenAiMessage {
            role: OpenAiRole::User,
            content: "what is my bmi".to_string(),
            function_call: None,
        }],
        functions: vec![OpenAiFunction {
            name: "calculate_bmi".to_string(),
            description: "Calculate the Body Mass Index (BMI) for a person.".to_string(),
            parameters_schema: r#"{"type":"object","properties":{}}"#.to_string(),
        }],
        temperature: None,
        max_tokens: None,
    }
}

#[tokio::test]
async fn http_transport_posts_functions_and_parses_function_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4-0613",
            "functions": [{"name": "calculate_bmi"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4-0613",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "function_call": {"name": "calculate_bmi", "arguments": "{\"weight\":70}"}
                },
                "finish_reason": "function_call"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = transport_for(&server)
        .complete(bmi_request(), OpenAiAuth::ApiKey(SecretString::new("sk-test")))
        .await
        .expect("request should succeed");

    assert_eq!(response.finish_reason, OpenAiFinishReason::FunctionCall);
    let call = response.message.function_call.expect("function call");
    assert_eq!(call.name, "calculate_bmi");
    assert_eq!(call.arguments, "{\"weight\":70}");
    assert_eq!(response.usage.total_tokens, 17);
}

#[tokio::test]
async fn http_transport_classifies_error_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let error = transport_for(&server)
        .complete(bmi_request(), OpenAiAuth::ApiKey(SecretString::new("sk-bad")))
        .await
        .expect_err("request should fail");

    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert_eq!(error.message, "Incorrect API key provided");
}

#[tokio::test]
async fn http_transport_reports_rate_limits_as_retryable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let error = transport_for(&server)
        .complete(bmi_request(), OpenAiAuth::Anonymous)
        .await
        .expect_err("request should fail");

    assert_eq!(error.kind, ProviderErrorKind::RateLimited);
    assert!(error.retryable);
}
