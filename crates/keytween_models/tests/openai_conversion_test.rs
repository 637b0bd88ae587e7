//! Tests for OpenAI request/response conversion.

use keytween_core::{GenerateRequest, ImageRequest, Input, MediaSource, Message, Output, Role};
use keytween_interface::BackendFactory;
use keytween_models::{
    ChatResponse, OpenAiFactory, OpenAiSettings, from_chat_response, to_chat_request,
    to_image_request,
};

fn keyframe_request() -> GenerateRequest {
    let system = Message::new(
        Role::System,
        vec![Input::Text("You generate concise prompts.".to_string())],
    );
    let user = Message::new(
        Role::User,
        vec![
            Input::Text("Create 2 intermediate image descriptions.".to_string()),
            Input::Image {
                mime: Some("image/png".to_string()),
                source: MediaSource::Base64("U1RBUlQ=".to_string()),
            },
            Input::Image {
                mime: Some("image/jpeg".to_string()),
                source: MediaSource::Binary(b"END".to_vec()),
            },
        ],
    );

    GenerateRequest::builder()
        .messages(vec![system, user])
        .max_tokens(Some(100))
        .temperature(Some(0.7))
        .build()
        .expect("Failed to build request")
}

#[test]
fn test_chat_request_wire_format() {
    let settings = OpenAiSettings::default();
    let chat = to_chat_request(&keyframe_request(), &settings).expect("Conversion failed");
    let json = serde_json::to_value(&chat).expect("Failed to serialize");

    assert_eq!(json["model"], "gpt-4o");
    assert_eq!(json["max_tokens"], 100);

    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][0]["content"], "You generate concise prompts.");

    let parts = &json["messages"][1]["content"];
    assert_eq!(json["messages"][1]["role"], "user");
    assert_eq!(parts[0]["type"], "text");
    assert_eq!(parts[1]["type"], "image_url");
    assert_eq!(parts[1]["image_url"]["url"], "data:image/png;base64,U1RBUlQ=");
    assert_eq!(parts[2]["image_url"]["url"], "data:image/jpeg;base64,RU5E");
}

#[test]
fn test_request_model_overrides_settings() {
    let request = GenerateRequest::builder()
        .messages(vec![Message::new(Role::User, vec![Input::Text("hi".to_string())])])
        .model(Some("gpt-4o-mini".to_string()))
        .build()
        .expect("Failed to build request");

    let chat = to_chat_request(&request, &OpenAiSettings::default()).expect("Conversion failed");
    assert_eq!(chat.model(), "gpt-4o-mini");
    assert!(chat.temperature().is_none());
}

#[test]
fn test_empty_request_is_rejected() {
    let result = to_chat_request(&GenerateRequest::default(), &OpenAiSettings::default());
    assert!(result.is_err());
}

#[test]
fn test_chat_response_first_choice_text() {
    let body = r#"{
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "1. A cat\n2. A dog"}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18}
    }"#;

    let response: ChatResponse = serde_json::from_str(body).expect("Failed to parse");
    let converted = from_chat_response(&response).expect("Conversion failed");

    assert_eq!(
        converted.outputs(),
        &vec![Output::Text("1. A cat\n2. A dog".to_string())]
    );
}

#[test]
fn test_chat_response_without_choices_fails() {
    let response: ChatResponse =
        serde_json::from_str(r#"{"choices": []}"#).expect("Failed to parse");
    let err = from_chat_response(&response).unwrap_err();
    assert!(err.to_string().contains("no choices"));
}

#[test]
fn test_image_request_uses_settings_defaults() {
    let settings = OpenAiSettings::default().with_image_size("1792x1024");
    let request = ImageRequest::new("A cat mid-leap");

    let wire = to_image_request(&request, &settings).expect("Conversion failed");
    let json = serde_json::to_value(&wire).expect("Failed to serialize");

    assert_eq!(json["model"], "dall-e-3");
    assert_eq!(json["prompt"], "A cat mid-leap");
    assert_eq!(json["n"], 1);
    assert_eq!(json["size"], "1792x1024");
    assert_eq!(json["response_format"], "b64_json");
}

#[test]
fn test_factory_rejects_blank_key() {
    let factory = OpenAiFactory::default();

    let err = factory.connect("   ").unwrap_err();
    assert!(err.is_validation());

    assert!(factory.connect("sk-test").is_ok());
}
