// Test intent: checks forward/inverse DFT results, symmetry and windowing.

use std::f64::consts::PI;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pardft::{
    ComplexSequence, CorePool, DftEngine, DiscreteSystem, ExecutorConfig, ProcessingError,
    RangeExecutor, RealSequence, SineWaveGenerator, Window,
};

/// Largest allowed difference between an expected and a computed sample.
const TOLERANCE: i32 = 1;

fn assert_close(actual: i32, expected: i32, what: &str) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "{what}: expected {expected}, got {actual}"
    );
}

/// Sum of a 1000 Hz and a 2000 Hz sine sampled at `rate` for `samples`
/// samples.
fn two_tones(pool: &CorePool, rate: u32, samples: usize) -> RealSequence {
    let executor = RangeExecutor::new(pool);
    let generator = SineWaveGenerator::new(rate);
    let duration = samples as f64 / rate as f64;
    let low = generator
        .generate(&executor, 1000.0, duration, 10_000, 0.0)
        .unwrap();
    let mut sum = low;
    let high = generator
        .generate(&executor, 2000.0, duration, 5000, 3.0 * PI / 4.0)
        .unwrap();
    executor
        .execute(&DiscreteSystem::Adder, sum.view_mut(), &[high.view()])
        .unwrap();
    sum
}

#[test]
fn simple_forward() {
    let pool = CorePool::new(2).unwrap();
    let signal = two_tones(&pool, 8000, 8);
    assert_eq!(signal.len(), 8);

    let spectrum = DftEngine::new(&pool).forward(&signal).unwrap();
    let expected = [
        (1, 0, -39_999),
        (2, 14_140, 14_140),
        (3, 0, 0),
        (4, 0, 0),
        (5, 0, 0),
        (6, 14_140, -14_140),
        (7, 0, 39_999),
    ];
    for (bin, real, imaginary) in expected {
        let (re, im) = spectrum.get(bin);
        assert_close(re, real, &format!("Re[{bin}]"));
        assert_close(im, imaginary, &format!("Im[{bin}]"));
    }
}

#[test]
fn simple_forward_odd_symmetry() {
    let pool = CorePool::new(3).unwrap();
    let signal = two_tones(&pool, 9000, 9);
    assert_eq!(signal.len(), 9);

    let spectrum = DftEngine::new(&pool).forward(&signal).unwrap();
    let imaginary = spectrum.imaginary_values();
    assert_eq!(imaginary[1], -imaginary[8]);
    assert_eq!(imaginary[2], -imaginary[7]);
}

#[test]
fn real_input_spectrum_is_conjugate_symmetric() {
    let pool = CorePool::new(4).unwrap();
    let engine = DftEngine::new(&pool);
    let mut rng = StdRng::seed_from_u64(42);
    for len in [2usize, 7, 16, 33, 100] {
        let signal =
            RealSequence::from_values((0..len).map(|_| rng.gen_range(-20_000..20_000)).collect());
        let spectrum = engine.forward(&signal).unwrap();
        for k in 1..len {
            let (re, im) = spectrum.get(k);
            let (mirror_re, mirror_im) = spectrum.get(len - k);
            assert_eq!(re, mirror_re, "len {len}, bin {k}");
            assert_eq!(im, -mirror_im, "len {len}, bin {k}");
        }
    }
}

/// The upper half is filled in parallel chunks once the minimum division
/// size drops to one sample.
#[test]
fn chunked_mirror_keeps_spectrum_symmetric() {
    let pool = CorePool::new(4).unwrap();
    let config = ExecutorConfig::from_env()
        .with_cores(4)
        .with_minimum_division_size(1);
    let chunked = DftEngine::from_config(&pool, &config);
    let inline = DftEngine::new(&pool);
    let mut rng = StdRng::seed_from_u64(7);
    for len in [2usize, 3, 7, 16, 33, 100] {
        let signal =
            RealSequence::from_values((0..len).map(|_| rng.gen_range(-20_000..20_000)).collect());
        let spectrum = chunked.forward(&signal).unwrap();
        for k in 1..len {
            let (re, im) = spectrum.get(k);
            let (mirror_re, mirror_im) = spectrum.get(len - k);
            assert_eq!(re, mirror_re, "len {len}, bin {k}");
            assert_eq!(im, -mirror_im, "len {len}, bin {k}");
        }
        assert_eq!(spectrum, inline.forward(&signal).unwrap(), "len {len}");
    }
}

#[test]
fn exact_bin_sinusoid_concentrates_energy() {
    const SAMPLES: usize = 64;
    const BIN: usize = 5;
    let pool = CorePool::new(2).unwrap();
    let executor = RangeExecutor::new(&pool);
    // 100 Hz per bin at 6400 samples per second.
    let signal = SineWaveGenerator::new(6400)
        .generate(&executor, (BIN * 100) as f64, 0.01, 10_000, 0.0)
        .unwrap();
    assert_eq!(signal.len(), SAMPLES);

    let spectrum = DftEngine::new(&pool).forward(&signal).unwrap();
    let peak = -(SAMPLES as i32) * 10_000 / 2;
    assert!((spectrum.get(BIN).1 - peak).abs() <= SAMPLES as i32);
    assert!((spectrum.get(SAMPLES - BIN).1 + peak).abs() <= SAMPLES as i32);
    for k in (0..SAMPLES).filter(|&k| k != BIN && k != SAMPLES - BIN) {
        let (re, im) = spectrum.get(k);
        assert!(re.abs() <= SAMPLES as i32, "Re[{k}] = {re}");
        assert!(im.abs() <= SAMPLES as i32, "Im[{k}] = {im}");
    }
}

#[test]
fn inverse_restores_simple_signal() {
    let pool = CorePool::new(2).unwrap();
    let signal = two_tones(&pool, 8000, 8);
    let engine = DftEngine::new(&pool);
    let restored = engine.inverse(&engine.forward(&signal).unwrap()).unwrap();
    for (n, (&a, &b)) in signal.values().iter().zip(restored.values()).enumerate() {
        assert_close(b, a, &format!("x[{n}]"));
    }
}

#[test]
fn dc_bin_inverts_to_a_constant() {
    let pool = CorePool::new(2).unwrap();
    let mut real = vec![0; 16];
    real[0] = 16_000;
    let spectrum = ComplexSequence::from_parts(real, vec![0; 16]).unwrap();
    let signal = DftEngine::new(&pool).inverse(&spectrum).unwrap();
    assert!(signal.values().iter().all(|&v| v == 1000));
}

#[test]
fn transforms_accept_subsequences() {
    let pool = CorePool::new(3).unwrap();
    let signal = RealSequence::from_values((0..40).map(|n| n * 37 - 700).collect());
    let engine = DftEngine::new(&pool);
    let spectrum = engine.forward(signal.subsequence(10, 29)).unwrap();
    assert_eq!(spectrum.len(), 20);
    let expected: i32 = signal.values()[10..30].iter().sum();
    assert_close(spectrum.get(0).0, expected, "Re[0]");

    let restored = engine.inverse(spectrum.view()).unwrap();
    assert_eq!(restored.len(), 20);
    for (n, (&a, &b)) in signal.values()[10..30].iter().zip(restored.values()).enumerate() {
        assert_close(b, a, &format!("x[{n}]"));
    }
}

#[test]
fn hanning_window_on_constant_signal() {
    let pool = CorePool::new(2).unwrap();
    let signal = RealSequence::from_values(vec![1000; 64]);
    let engine = DftEngine::new(&pool).with_window(Window::Hanning);
    assert_eq!(engine.window(), Window::Hanning);
    let spectrum = engine.forward(&signal).unwrap();
    assert_close(spectrum.get(0).0, 32_000, "Re[0]");
    assert_close(spectrum.get(1).0, -16_000, "Re[1]");
    assert_close(spectrum.get(63).0, -16_000, "Re[63]");
    for k in 2..63 {
        assert_close(spectrum.get(k).0, 0, &format!("Re[{k}]"));
        assert_close(spectrum.get(k).1, 0, &format!("Im[{k}]"));
    }
}

#[test]
fn hamming_window_on_constant_signal() {
    let pool = CorePool::new(2).unwrap();
    let signal = RealSequence::from_values(vec![1000; 64]);
    let spectrum = DftEngine::new(&pool)
        .with_window(Window::Hamming)
        .forward(&signal)
        .unwrap();
    assert_close(spectrum.get(0).0, 34_560, "Re[0]");
    assert_close(spectrum.get(1).0, -14_720, "Re[1]");
    assert_close(spectrum.get(32).0, 0, "Re[32]");
}

#[test]
fn empty_sequences_are_rejected() {
    let pool = CorePool::new(1).unwrap();
    let engine = DftEngine::new(&pool);
    assert_eq!(
        engine.forward(&RealSequence::new(0)).unwrap_err(),
        ProcessingError::EmptyInput
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_forward_inverse_roundtrip(
        cores in 1usize..5,
        ref values in proptest::collection::vec(-10_000i32..10_000, 32..96),
    ) {
        let pool = CorePool::new(cores).unwrap();
        let engine = DftEngine::new(&pool);
        let signal = RealSequence::from_values(values.clone());
        let restored = engine.inverse(&engine.forward(&signal).unwrap()).unwrap();
        for (&a, &b) in signal.values().iter().zip(restored.values()) {
            prop_assert!((a - b).abs() <= TOLERANCE, "expected {}, got {}", a, b);
        }
    }
}
