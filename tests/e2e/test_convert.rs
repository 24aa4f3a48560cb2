use crate::e2e::helpers;

use helpers::api_client::FormPart;
use helpers::tts_mocks::MockTtsRepository;
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;
use tts_form::infrastructure::config::Config;
use tts_form::domain::tts::LanguageCode;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_convert_typed_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[
                FormPart::Text { name: "language", value: "es" },
                FormPart::Text { name: "text", value: "Hola mundo" },
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-text-source", "from direct input")
        .assert_header(
            "content-disposition",
            "attachment; filename=\"TTS_Output_es.mp3\"",
        );
    assert_eq!(
        ctx.tts_repo.requests(),
        vec![("Hola mundo".to_string(), LanguageCode::Spanish)]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_prefer_the_uploaded_file_over_typed_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[
                FormPart::Text { name: "language", value: "hi" },
                FormPart::Text { name: "text", value: "typed text is ignored" },
                FormPart::File {
                    name: "file",
                    file_name: "story.txt",
                    bytes: "नमस्ते दुनिया".as_bytes(),
                },
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-text-source", "from file upload")
        .assert_header("x-language", "hi");
    assert_eq!(
        ctx.tts_repo.requests(),
        vec![("नमस्ते दुनिया".to_string(), LanguageCode::Hindi)]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_undecodable_upload_as_empty(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[
                FormPart::Text { name: "language", value: "en" },
                FormPart::File {
                    name: "file",
                    file_name: "latin1.txt",
                    bytes: &[0x63, 0x61, 0x66, 0xE9, 0xFF],
                },
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_state("rejected_empty")
        .assert_error_message("Uploaded file is not valid UTF-8 text.");
    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_an_empty_upload_even_with_typed_text(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[
                FormPart::Text { name: "text", value: "typed text" },
                FormPart::File {
                    name: "file",
                    file_name: "empty.txt",
                    bytes: b"",
                },
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_state("rejected_empty");
    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_ignore_an_unselected_file_input(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[
                FormPart::Text { name: "language", value: "de" },
                FormPart::Text { name: "text", value: "Guten Morgen" },
                FormPart::File {
                    name: "file",
                    file_name: "",
                    bytes: b"",
                },
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-text-source", "from direct input");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_only_accept_txt_uploads(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[FormPart::File {
                name: "file",
                file_name: "slides.pdf",
                bytes: b"%PDF-1.7",
            }],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE)
        .assert_error_message("only .txt files are supported");
    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_form_without_text_or_file(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[FormPart::Text { name: "language", value: "en" }],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_state("rejected_empty")
        .assert_error_message("Enter text or upload file.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_oversized_uploads(ctx: &TestContext) {
    let text = "word ".repeat(1001);
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[FormPart::File {
                name: "file",
                file_name: "long.txt",
                bytes: text.as_bytes(),
            }],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_state("rejected_too_long");
    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[tokio::test]
async fn it_should_reject_uploads_over_the_body_limit() {
    let ctx = TestContext::with_config(
        Config {
            max_upload_bytes: 1024,
            ..Config::default()
        },
        MockTtsRepository::new(),
    )
    .await;
    let text = "a".repeat(128 * 1024);

    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[
                FormPart::Text { name: "language", value: "en" },
                FormPart::File {
                    name: "file",
                    file_name: "big.txt",
                    bytes: text.as_bytes(),
                },
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_error_message("Request body too large");
    assert_eq!(ctx.tts_repo.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_file_names_with_quotes(ctx: &TestContext) {
    let response = ctx
        .client
        .post_multipart(
            "/api/tts/convert",
            &[
                FormPart::Text { name: "language", value: "en" },
                FormPart::File {
                    name: "file",
                    file_name: "my \"notes\".txt",
                    bytes: b"Quoted names still convert",
                },
            ],
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-text-source", "from file upload");
    assert_eq!(ctx.tts_repo.calls(), 1);
}
