use stock_forecast::sequence::{build_window, trailing, InsufficientHistory, DEFAULT_WINDOW_SIZE};

#[test]
fn window_dimension_is_exact_for_longer_inputs() {
    for len in [100usize, 101, 150, 504] {
        let normalized: Vec<f64> = (0..len).map(|i| i as f64 / len as f64).collect();
        let window = build_window(&normalized, DEFAULT_WINDOW_SIZE).unwrap();
        assert_eq!(window.shape(), [1, DEFAULT_WINDOW_SIZE, 1]);
        assert_eq!(window.window_size(), DEFAULT_WINDOW_SIZE);
    }
}

#[test]
fn window_takes_trailing_values_in_order() {
    let normalized = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5];
    let window = build_window(&normalized, 3).unwrap();
    assert_eq!(window.values(), &[0.3f32, 0.4, 0.5]);
}

#[test]
fn short_input_is_rejected() {
    let normalized = vec![0.5; 99];
    let err = build_window(&normalized, 100).unwrap_err();
    assert_eq!(
        err,
        InsufficientHistory {
            required: 100,
            available: 99
        }
    );
}

#[test]
fn build_is_deterministic() {
    let normalized: Vec<f64> = (0..130).map(|i| ((i * 13) % 17) as f64 / 17.0).collect();
    let a = build_window(&normalized, 100).unwrap();
    let b = build_window(&normalized, 100).unwrap();
    assert_eq!(a, b);
}

#[test]
fn trailing_clamps_to_length() {
    let v = [1, 2, 3];
    assert_eq!(trailing(&v, 2), &[2, 3]);
    assert_eq!(trailing(&v, 10), &[1, 2, 3]);
}
