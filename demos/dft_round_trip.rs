//! Forward and inverse DFT of a two-tone signal with each analysis window.

use pardft::{
    ComplexSequence, CorePool, DftEngine, DiscreteSystem, ProcessingError, RangeExecutor,
    SineWaveGenerator, Window,
};

/// Samples per second; with 64 samples each bin is 100 Hz wide.
const RATE: u32 = 6400;
const SAMPLES: usize = 64;

fn magnitudes(spectrum: &ComplexSequence) -> Vec<u32> {
    spectrum
        .real_values()
        .iter()
        .zip(spectrum.imaginary_values())
        .map(|(&re, &im)| (re as f64).hypot(im as f64).round() as u32)
        .collect()
}

fn main() -> Result<(), ProcessingError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let pool = CorePool::try_default()?;
    let executor = RangeExecutor::new(&pool);
    let generator = SineWaveGenerator::new(RATE);
    let duration = SAMPLES as f64 / RATE as f64;
    let mut signal = generator.generate(&executor, 500.0, duration, 10_000, 0.0)?;
    let overtone = generator.generate(&executor, 1250.0, duration, 3000, 0.0)?;
    executor.execute(&DiscreteSystem::Adder, signal.view_mut(), &[overtone.view()])?;

    for window in [Window::Rectangular, Window::Hamming, Window::Hanning] {
        let engine = DftEngine::new(&pool).with_window(window);
        let spectrum = engine.forward(&signal)?;
        let bins = magnitudes(&spectrum);
        println!("{window:?} window, bins 0..=16:");
        println!("   {:?}", &bins[..=16]);

        let restored = engine.inverse(&spectrum)?;
        let worst = signal
            .values()
            .iter()
            .zip(restored.values())
            .map(|(a, b)| (a - b).abs())
            .max()
            .unwrap_or(0);
        println!("   largest difference from the input: {worst}\n");
    }
    Ok(())
}
