use std::path::{Path, PathBuf};

use stock_forecast::error::AppError;
use stock_forecast::inference::load_gateway;
use stock_forecast::sequence::build_window;

fn temp_file(ext: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("stock-forecast-{}.{}", uuid::Uuid::new_v4(), ext));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_json_weights() {
    let weights: Vec<f32> = (0..4).map(|i| if i == 3 { 1.0 } else { 0.0 }).collect();
    let body = serde_json::json!({ "weights": weights, "bias": 0.25 }).to_string();
    let path = temp_file("json", &body);

    let gateway = load_gateway(&path, 4).unwrap();
    assert_eq!(gateway.name(), "linear");
    assert_eq!(gateway.window_size(), 4);

    let window = build_window(&[0.0, 0.1, 0.2, 0.3, 0.5], 4).unwrap();
    let out = gateway.predict(&window).unwrap();
    assert_eq!(out.len(), 1);
    assert!((out[0] - 0.75).abs() < 1e-6);
    std::fs::remove_file(path).ok();
}

#[test]
fn weight_count_must_match_window() {
    let path = temp_file("json", r#"{"weights":[0.1,0.2,0.3]}"#);
    let err = load_gateway(&path, 100).err().unwrap();
    assert!(matches!(err, AppError::ModelLoad(_)));
    std::fs::remove_file(path).ok();
}

#[test]
fn malformed_artifact_is_an_error() {
    let path = temp_file("json", "{ weights: ");
    assert!(matches!(load_gateway(&path, 3), Err(AppError::Json(_))));
    std::fs::remove_file(path).ok();
}

#[test]
fn missing_artifact_is_an_error() {
    let err = load_gateway(Path::new("models/does-not-exist.json"), 100).err().unwrap();
    assert!(matches!(err, AppError::Io(_)));
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load_gateway(Path::new("models/model.keras"), 100).err().unwrap();
    assert!(matches!(err, AppError::UnsupportedModel(_)));
}

#[cfg(not(feature = "onnx"))]
#[test]
fn onnx_requires_feature() {
    let err = load_gateway(Path::new("models/model.onnx"), 100).err().unwrap();
    assert!(matches!(err, AppError::UnsupportedModel(_)));
}

#[test]
fn bundled_model_matches_default_window() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/stock_price_model.json");
    let gateway = load_gateway(&path, 100).unwrap();
    assert_eq!(gateway.window_size(), 100);
}
