use super::image_fixtures::{jpeg_bytes, png_payload, rgba_png_bytes};
use agemorph::error::ErrorKind;
use agemorph::export::{ExportFormat, export_image};
use agemorph::llm::GeminiTransformer;
use agemorph::llm::gemini::DEFAULT_MODEL;
use agemorph::media::ImagePayload;
use agemorph::prompt::TransformationParameters;
use agemorph::session::{GenerateOutcome, LifecycleController, SessionState};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash-image-preview:generateContent";

fn controller_for(server: &MockServer) -> LifecycleController {
    let transformer = GeminiTransformer::new(Some("integration-key"), DEFAULT_MODEL)
        .with_base_url(&format!("{}/v1beta", server.uri()));
    LifecycleController::new(Arc::new(transformer), TransformationParameters::default())
}

fn jpeg_source() -> ImagePayload {
    ImagePayload::new(jpeg_bytes(), "image/jpeg")
}

#[tokio::test]
async fn generate_then_export_both_formats() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(body_string_contains(
            "Make the person in this photo look like they are 45 years old. \
             Dress them in the attire of a Doctor. \
             Preserve the original background as much as possible. \
             Maintain a realistic photographic style.",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Here is the edited photo."},
                {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(rgba_png_bytes())}}
            ]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.select_source(jpeg_source());
    controller.update_parameters(|p| {
        p.set_age(45);
        p.profession = "Doctor".into();
    });

    let GenerateOutcome::Completed(result) = controller.generate().await else {
        panic!("expected a completed generation");
    };
    assert_eq!(result, png_payload());
    assert_eq!(controller.snapshot().source(), Some(&jpeg_source()));

    let dir = TempDir::new().unwrap();
    let png = export_image(&result, ExportFormat::Png).unwrap();
    let jpeg = export_image(&result, ExportFormat::Jpeg).unwrap();
    let png_path = png.save_to(dir.path()).await.unwrap();
    let jpeg_path = jpeg.save_to(dir.path()).await.unwrap();

    let png_back = image::open(&png_path).unwrap();
    assert!(png_back.color().has_alpha());
    assert_eq!(png_back.to_rgba8().get_pixel(0, 0)[3], 0);

    let jpeg_back = image::open(&jpeg_path).unwrap();
    assert!(!jpeg_back.color().has_alpha());
    assert!(jpeg_back.to_rgb8().get_pixel(0, 0).0.iter().all(|&c| c > 200));
}

#[tokio::test]
async fn safety_rejection_fails_then_new_source_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "blocked due to SAFETY"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.select_source(jpeg_source());

    let GenerateOutcome::Failed(error) = controller.generate().await else {
        panic!("expected a failed generation");
    };
    assert_eq!(error.kind, ErrorKind::SafetyBlocked);
    let state = controller.snapshot();
    assert!(matches!(state, SessionState::Failed { .. }));
    assert_eq!(state.source(), Some(&jpeg_source()));

    controller.select_source(png_payload());
    assert!(controller.result().is_none());
    assert!(controller.error().is_none());
    assert_eq!(
        controller.snapshot(),
        SessionState::SourceSelected {
            source: png_payload()
        }
    );
}

#[tokio::test]
async fn upstream_outage_is_generic_failure_and_reset_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let controller = controller_for(&server);
    controller.select_source(jpeg_source());
    controller.update_parameters(|p| p.background = "a busy market".into());

    let GenerateOutcome::Failed(error) = controller.generate().await else {
        panic!("expected a failed generation");
    };
    assert_eq!(error.kind, ErrorKind::TransformationFailed);
    assert_eq!(
        error.message,
        "Failed to transform image. Please check the logs for details."
    );

    controller.reset(true);
    assert_eq!(controller.snapshot(), SessionState::Empty);
    assert_eq!(controller.parameters(), TransformationParameters::default());
    assert_eq!(controller.generate().await, GenerateOutcome::NoSource);
}
