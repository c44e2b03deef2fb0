//! Results must not depend on the number of rayon worker threads
//!
//! Every parallel loop writes disjoint output rows, so a single-threaded pool,
//! a small pool and the global pool all produce bit-identical fields.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::ThreadPoolBuilder;
use stream_field_core::{
    ddx, ddy, generate_stream_function, second_partials, FieldData, SecondPartials,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Outputs {
    psi: FieldData,
    dx: FieldData,
    dy: FieldData,
    partials: SecondPartials,
}

fn run_pipeline(n: usize, sigma: f64, seed: u64) -> Outputs {
    let psi = generate_stream_function(n, sigma, &mut StdRng::seed_from_u64(seed)).unwrap();
    Outputs {
        dx: ddx(&psi),
        dy: ddy(&psi),
        partials: second_partials(&psi).unwrap(),
        psi,
    }
}

fn run_with_threads(threads: usize, n: usize, sigma: f64, seed: u64) -> Outputs {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap()
        .install(|| run_pipeline(n, sigma, seed))
}

fn assert_bit_identical(a: &FieldData, b: &FieldData, what: &str) {
    assert_eq!(a.shape(), b.shape(), "{what}: shape differs");
    for (i, (x, y)) in a.data.iter().zip(&b.data).enumerate() {
        assert_eq!(x.to_bits(), y.to_bits(), "{what}: value {i} differs");
    }
}

fn assert_outputs_identical(a: &Outputs, b: &Outputs) {
    assert_bit_identical(&a.psi, &b.psi, "psi");
    assert_bit_identical(&a.dx, &b.dx, "ddx");
    assert_bit_identical(&a.dy, &b.dy, "ddy");
    assert_bit_identical(&a.partials.xx, &b.partials.xx, "psi_xx");
    assert_bit_identical(&a.partials.yy, &b.partials.yy, "psi_yy");
    assert_bit_identical(&a.partials.xy, &b.partials.xy, "psi_xy");
}

#[test]
fn test_single_thread_matches_global_pool() {
    for (n, sigma, seed) in [(32, 1.0, 42), (17, 2.5, 7), (64, 4.0, 2024)] {
        let single = run_with_threads(1, n, sigma, seed);
        let global = run_pipeline(n, sigma, seed);
        assert_outputs_identical(&single, &global);
    }
}

#[test]
fn test_pool_size_does_not_matter() {
    let reference = run_with_threads(1, 48, 3.0, 99);
    for threads in [2, 3, 8] {
        let other = run_with_threads(threads, 48, 3.0, 99);
        assert_outputs_identical(&reference, &other);
    }
}
