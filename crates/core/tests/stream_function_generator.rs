//! Random stream function generation: range, failure modes, reproducibility

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stream_field_core::stream_function::stream_function_from_noise;
use stream_field_core::{
    generate_stream_function, FieldData, FieldError, FlowDiagnostics, StreamFunctionConfig,
    StreamFunctionGenerator,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_generated_field_spans_unit_range() {
    let mut rng = StdRng::seed_from_u64(123);
    for (n, sigma) in [(4, 0.0), (16, 0.5), (32, 1.0), (33, 3.0), (64, 8.0), (10, 40.0)] {
        let psi = generate_stream_function(n, sigma, &mut rng).unwrap();
        assert_eq!(psi.shape(), (n, n));
        assert!(
            psi.data.iter().all(|v| (-1.0..=1.0).contains(v)),
            "N={n}, sigma={sigma}: value outside [-1, 1]"
        );
        assert_abs_diff_eq!(psi.max_abs(), 1.0, epsilon = 1e-15);
    }
}

#[test]
fn test_smoothing_reduces_roughness() {
    // Mean squared neighbour difference drops as sigma grows
    let roughness = |psi: &FieldData| {
        let n = psi.width;
        let mut total = 0.0;
        for y in 0..n {
            for x in 0..n {
                let d = psi.get((x + 1) % n, y) - psi.get(x, y);
                total += d * d;
            }
        }
        total / (n * n) as f64
    };

    let rough = generate_stream_function(64, 0.0, &mut StdRng::seed_from_u64(8)).unwrap();
    let smooth = generate_stream_function(64, 4.0, &mut StdRng::seed_from_u64(8)).unwrap();
    assert!(roughness(&smooth) < 0.1 * roughness(&rough));
}

#[test]
fn test_all_zero_noise_is_a_domain_error() {
    let zero = FieldData::square(16);
    let err = stream_function_from_noise(&zero, 1.0).unwrap_err();
    assert_eq!(err, FieldError::ZeroField);
    assert!(err.to_string().contains("cannot normalize"));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        generate_stream_function(0, 1.0, &mut rng),
        Err(FieldError::InvalidParameter {
            name: "grid_size",
            ..
        })
    ));
    assert!(matches!(
        generate_stream_function(8, -0.5, &mut rng),
        Err(FieldError::InvalidParameter { name: "sigma", .. })
    ));
}

#[test]
fn test_seeded_generation_is_deterministic() {
    let a = generate_stream_function(32, 1.0, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = generate_stream_function(32, 1.0, &mut StdRng::seed_from_u64(42)).unwrap();
    let c = generate_stream_function(32, 1.0, &mut StdRng::seed_from_u64(43)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_unseeded_generator_reports_its_seed() {
    let mut generator = StreamFunctionGenerator::new(StreamFunctionConfig {
        grid_size: 16,
        sigma: 1.0,
        seed: None,
    })
    .unwrap();
    let first = generator.generate().unwrap();

    let mut replay = StreamFunctionGenerator::new(StreamFunctionConfig {
        seed: Some(generator.seed()),
        ..generator.config().clone()
    })
    .unwrap();
    assert_eq!(first, replay.generate().unwrap());
}

#[test]
fn test_config_from_json() {
    let config: StreamFunctionConfig =
        serde_json::from_str(r#"{ "grid_size": 48, "sigma": 2.5, "seed": 9 }"#).unwrap();
    assert_eq!(config.grid_size, 48);
    assert_eq!(config.seed, Some(9));
    assert!(config.validate().is_ok());
}

#[test]
fn test_generated_field_through_pipeline() {
    let mut generator = StreamFunctionGenerator::new(StreamFunctionConfig {
        grid_size: 32,
        sigma: 1.0,
        seed: Some(42),
    })
    .unwrap();
    let flow = FlowDiagnostics::compute(generator.generate().unwrap()).unwrap();
    let report = flow.report();

    assert_eq!(report.grid_size, 32);
    assert_eq!(flow.velocity.shape(), (32, 32));
    assert!(report.checks.max_continuity < 1e-10);
    assert!(report.checks.max_alignment < 1e-10);
    assert!(report.checks.max_magnitude < 1e-10);
    assert!(report.max_speed > 0.0);
    assert!(report.psi.min >= -1.0 && report.psi.max <= 1.0);
}
