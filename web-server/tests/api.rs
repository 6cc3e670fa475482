//! Router tests: every route driven in-process with `oneshot`

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use dr_scoring_core::{
    load_classifier, ClassProbabilities, Classifier, ClassifierError, FeatureRecord, Label,
    FEATURE_LAYOUT,
};
use dr_web_server::{
    config::Config, create_router, models::PredictionResponse, AppState, ModelState,
};
use serde_json::Value;
use tokio_test::assert_ok;
use tower::ServiceExt;

/// Always answers "present" with 70%
struct SeventyPercent {
    names: Vec<String>,
}

impl SeventyPercent {
    fn new() -> Self {
        Self {
            names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Classifier for SeventyPercent {
    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn predict(&self, _record: &FeatureRecord) -> Result<Label, ClassifierError> {
        Ok(Label::Present)
    }

    fn predict_probability(
        &self,
        _record: &FeatureRecord,
    ) -> Result<ClassProbabilities, ClassifierError> {
        Ok(ClassProbabilities::new(0.3, 0.7))
    }
}

fn shipped_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("models")
        .join("dr_logistic_model.json")
}

fn app_with_stub() -> (Router, AppState) {
    let loaded = load_classifier(shipped_model_path()).unwrap();
    let model = ModelState::Ready {
        scorer: dr_scoring_core::Scorer::new(Arc::new(SeventyPercent::new())),
        metadata: loaded.metadata,
    };
    let state = AppState::new(Config::default(), model);
    (create_router(state.clone()), state)
}

fn app_without_model() -> Router {
    create_router(AppState::new(
        Config::default(),
        ModelState::Unavailable("model not found: models/missing.json".to_string()),
    ))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = assert_ok!(axum::body::to_bytes(response.into_body(), usize::MAX).await);
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["model_loaded"], true);
}

#[tokio::test]
async fn test_health_degraded_without_model() {
    let response = app_without_model()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["model_loaded"], false);
}

#[tokio::test]
async fn test_api_predict() {
    let (app, state) = app_with_stub();
    let response = app
        .oneshot(json_post(
            "/api/v1/predict",
            r#"{"age": 50, "systolic_bp": 120.0, "diastolic_bp": 80.0, "cholesterol": 90.0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let prediction: PredictionResponse = serde_json::from_str(&body_text(response).await).unwrap();

    assert_eq!(prediction.label, Label::Present);
    assert_eq!(prediction.label_text, "DR Present");
    assert_eq!(prediction.confidence, 0.7);
    assert_eq!(prediction.derived.pulse_pressure, 40.0);
    assert!((prediction.derived.mean_arterial_pressure - 93.33).abs() < 0.01);
    assert_eq!(
        prediction.report,
        "Prediction: DR Present\nConfidence: 0.70\nPulse Pressure: 40.00\nMean Arterial Pressure: 93.33\n"
    );
    assert_eq!(state.stats.snapshot().scored, 1);
}

#[tokio::test]
async fn test_api_predict_defaults_missing_fields() {
    let (app, _) = app_with_stub();
    let response = app.oneshot(json_post("/api/v1/predict", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let prediction: PredictionResponse = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(prediction.input.age, 50);
    assert_eq!(prediction.input.cholesterol, 90.0);
}

#[tokio::test]
async fn test_api_predict_out_of_range() {
    let (app, state) = app_with_stub();
    let response = app
        .oneshot(json_post("/api/v1/predict", r#"{"age": 20}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], 400);
    // Never reached the scorer
    assert_eq!(state.stats.snapshot().scored, 0);
    assert_eq!(state.stats.snapshot().failed, 0);
}

#[tokio::test]
async fn test_api_predict_without_model() {
    let response = app_without_model()
        .oneshot(json_post("/api/v1/predict", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], 503);
}

#[tokio::test]
async fn test_api_report_download() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(json_post(
            "/api/v1/report",
            r#"{"age": 30, "systolic_bp": 70, "diastolic_bp": 60, "cholesterol": 70}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"dr_prediction_report.txt\""
    );
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));

    let report = body_text(response).await;
    assert_eq!(report.lines().count(), 4);
    assert!(report.contains("Pulse Pressure: 10.00"));
    assert!(report.contains("Mean Arterial Pressure: 63.33"));
}

#[tokio::test]
async fn test_report_link_from_result_page() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(
            Request::get("/report?age=60&systolic_bp=100&diastolic_bp=100&cholesterol=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = body_text(response).await;
    assert!(report.contains("Pulse Pressure: 0.00"));
    assert!(report.contains("Mean Arterial Pressure: 100.00"));
}

#[tokio::test]
async fn test_api_predict_undecodable_body_is_bad_request() {
    let bodies = [
        r#"{"age": 25.5}"#,
        r#"{"age": -5}"#,
        r#"{"systolic_bp": "high"}"#,
        "not json",
    ];

    for body in bodies {
        let (app, state) = app_with_stub();
        let response = app.oneshot(json_post("/api/v1/predict", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], 400);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid input"));
        assert_eq!(state.stats.snapshot().scored, 0);
    }
}

#[tokio::test]
async fn test_api_report_undecodable_body_is_bad_request() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(json_post("/api/v1/report", r#"{"age": -5}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_link_out_of_range() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(
            Request::get("/report?age=50&systolic_bp=200&diastolic_bp=80&cholesterol=90")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], "Systolic blood pressure must be between 70 and 130");
}

#[tokio::test]
async fn test_report_link_undecodable_query() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(
            Request::get("/report?age=abc&systolic_bp=120&diastolic_bp=80&cholesterol=90")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn test_report_download_not_counted_twice() {
    let (app, state) = app_with_stub();

    let response = app
        .clone()
        .oneshot(
            Request::post("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("age=50&systolic_bp=120&diastolic_bp=80&cholesterol=90"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::get("/report?age=50&systolic_bp=120&diastolic_bp=80&cholesterol=90")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(state.stats.snapshot().scored, 1);
}

#[tokio::test]
async fn test_form_page() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Enter Patient Details"));
    assert!(page.contains(r#"value="50""#));
}

#[tokio::test]
async fn test_form_page_blocked_without_model() {
    let response = app_without_model()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let page = body_text(response).await;
    assert!(page.contains("prediction model is unavailable"));
}

#[tokio::test]
async fn test_form_submit() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(
            Request::post("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("age=50&systolic_bp=120&diastolic_bp=80&cholesterol=90"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("presence of Diabetic Retinopathy (Confidence: 0.70)"));
    assert!(page.contains("40.00 mmHg"));
    assert!(page.contains("Download Report"));
}

#[tokio::test]
async fn test_form_submit_out_of_range() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(
            Request::post("/predict")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("age=50&systolic_bp=150&diastolic_bp=80&cholesterol=90"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let page = body_text(response).await;
    assert!(page.contains("class=\"error\""));
}

#[tokio::test]
async fn test_form_submit_undecodable_fields() {
    let bodies = [
        "age=abc&systolic_bp=120&diastolic_bp=80&cholesterol=90",
        "age=50&systolic_bp=&diastolic_bp=80&cholesterol=90",
        "age=-5&systolic_bp=120&diastolic_bp=80&cholesterol=90",
    ];

    for body in bodies {
        let (app, _) = app_with_stub();
        let response = app
            .oneshot(
                Request::post("/predict")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        let page = body_text(response).await;
        assert!(page.contains("class=\"error\">Invalid input"));
        assert!(page.contains("Enter Patient Details"));
    }
}

#[tokio::test]
async fn test_model_status() {
    let (app, _) = app_with_stub();
    let response = app
        .oneshot(Request::get("/api/v1/model").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["loaded"], true);
    assert_eq!(json["metadata"]["model_type"], "logistic_regression");
    assert_eq!(json["layout"]["feature_count"], 6);
    assert_eq!(json["scoring"]["scored"], 0);
}

#[tokio::test]
async fn test_shipped_model_end_to_end() {
    let loaded = load_classifier(shipped_model_path()).unwrap();
    let app = create_router(AppState::new(Config::default(), ModelState::ready(loaded)));

    let response = app
        .oneshot(json_post(
            "/api/v1/predict",
            r#"{"age": 95, "systolic_bp": 130, "diastolic_bp": 70, "cholesterol": 125}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let prediction: PredictionResponse = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(prediction.label, Label::Present);
    assert!(prediction.confidence > 0.5 && prediction.confidence <= 1.0);
}
