//! Live API tests. Run with `--features api` and `OPENAI_API_KEY` set.

use keytween_core::{GenerateRequest, ImageRequest, Input, Message, Output, Role};
use keytween_interface::{ImageSynthesis, TweenDriver};
use keytween_models::OpenAiClient;
use std::env;

fn client() -> OpenAiClient {
    let _ = dotenvy::dotenv();
    let api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set for API tests");
    OpenAiClient::new(api_key)
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_simple_generation() -> Result<(), Box<dyn std::error::Error>> {
    let message = Message::new(
        Role::User,
        vec![Input::Text("Say 'test' and nothing else.".to_string())],
    );
    let request = GenerateRequest::builder()
        .messages(vec![message])
        .max_tokens(Some(10))
        .build()?;

    let response = client().generate(&request).await?;

    assert!(!response.text().is_empty());
    println!("Response: {:?}", response.outputs());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_image_synthesis() -> Result<(), Box<dyn std::error::Error>> {
    let output = client()
        .synthesize(&ImageRequest::new("A single red circle on white"))
        .await?;

    match output {
        Output::Image { data, .. } => assert!(data.starts_with(&[0x89, b'P', b'N', b'G'])),
        other => panic!("Expected image output, got {:?}", other),
    }
    Ok(())
}
