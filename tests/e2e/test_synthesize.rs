use crate::e2e::helpers;

use helpers::tts_mocks::{mock_audio_bytes, MockTtsRepository};
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use std::time::Duration;
use test_context::test_context;
use tts_form::domain::tts::LanguageCode;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_hello_world_in_english(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Hello world", "language": "en" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header(
            "content-disposition",
            "attachment; filename=\"TTS_Output_en.mp3\"",
        )
        .assert_header("x-text-source", "from direct input")
        .assert_header("x-language", "en")
        .assert_header("x-character-count", "11");

    assert!(response.body_bytes.starts_with(&mock_audio_bytes()));
    assert_eq!(
        ctx.tts_repo.requests(),
        vec![("Hello world".to_string(), LanguageCode::English)]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_default_to_english(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": "No language given" }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-language", "en");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_repeated_requests_from_cache(ctx: &TestContext) {
    let body = json!({ "text": "নমস্কার", "language": "bn" });

    let first = ctx.client.post("/api/tts/synthesize", &body).await.unwrap();
    let second = ctx.client.post("/api/tts/synthesize", &body).await.unwrap();

    first.assert_status(StatusCode::OK);
    second.assert_status(StatusCode::OK);
    assert_eq!(first.body_bytes, second.body_bytes);
    assert_eq!(ctx.tts_repo.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_normalize_cache_keys(ctx: &TestContext) {
    for text in ["Hello world", "Hello world ", " Hello world"] {
        ctx.client
            .post("/api/tts/synthesize", &json!({ "text": text }))
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    assert_eq!(ctx.tts_repo.calls(), 3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_blank_text_without_synthesizing(ctx: &TestContext) {
    for text in ["", "   ", "\n\t"] {
        let response = ctx
            .client
            .post("/api/tts/synthesize", &json!({ "text": text }))
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_state("rejected_empty")
            .assert_error_message("Enter text or upload file.");
        assert_eq!(response.field("severity"), Some("warning"));
    }

    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_enforce_the_length_limit_inclusively(ctx: &TestContext) {
    let exact = "a".repeat(5000);
    ctx.client
        .post("/api/tts/synthesize", &json!({ "text": exact }))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let over = "a".repeat(5001);
    let response = ctx
        .client
        .post("/api/tts/synthesize", &json!({ "text": over }))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_state("rejected_too_long")
        .assert_error_message("Text is too long! (Max 5000 chars recommended).");
    assert_eq!(ctx.tts_repo.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_six_thousand_chars_in_french(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "ç".repeat(6000), "language": "fr" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_state("rejected_too_long");
    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_languages(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/tts/synthesize",
            &json!({ "text": "Ciao", "language": "it" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("unsupported language code 'it'");
    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_supported_languages(ctx: &TestContext) {
    let response = ctx.client.get("/api/languages").await.unwrap();

    response.assert_status(StatusCode::OK);
    let languages = response.body.as_ref().unwrap().as_array().unwrap();
    let codes: Vec<&str> = languages
        .iter()
        .filter_map(|l| l.get("code").and_then(|c| c.as_str()))
        .collect();
    assert_eq!(codes, vec!["en", "bn", "hi", "fr", "es", "de", "ja"]);
    assert_eq!(languages[2]["name"].as_str(), Some("Hindi"));
}

#[tokio::test]
async fn it_should_report_provider_failures_and_retry_next_time() {
    let ctx = TestContext::with_repository(MockTtsRepository::failing(
        "404 (Not Found) from TTS API. Probable cause: unsupported language or upstream API changes",
    ))
    .await;

    for _ in 0..2 {
        let response = ctx
            .client
            .post(
                "/api/tts/synthesize",
                &json!({ "text": "こんにちは", "language": "ja" }),
            )
            .await
            .unwrap();

        response
            .assert_status(StatusCode::BAD_GATEWAY)
            .assert_state("failed")
            .assert_error_message("Error: 404 (Not Found) from TTS API");
        assert_eq!(
            response.field("hint"),
            Some("Check text length or unsupported characters.")
        );
    }

    // Failures are never cached
    assert_eq!(ctx.tts_repo.calls(), 2);
}

#[tokio::test]
async fn it_should_share_one_synthesis_between_concurrent_requests() {
    let ctx = TestContext::with_repository(MockTtsRepository::slow(Duration::from_millis(200))).await;
    let body = json!({ "text": "Guten Tag", "language": "de" });

    let responses = futures::future::join_all(
        (0..4).map(|_| ctx.client.post("/api/tts/synthesize", &body)),
    )
    .await;

    for response in responses {
        response.unwrap().assert_status(StatusCode::OK);
    }
    assert_eq!(ctx.tts_repo.calls(), 1);
}
