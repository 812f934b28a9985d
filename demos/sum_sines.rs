//! Generates a few sine waves and combines them with the discrete systems.
//!
//! Run with `RUST_LOG=trace` to see how the work is divided.

use std::f64::consts::PI;

use pardft::{
    CorePool, DiscreteSystem, ProcessingError, RangeExecutor, RealSequence, SequenceView,
    SineWaveGenerator,
};

fn print_samples(label: &str, sequence: &RealSequence) {
    let shown: Vec<i32> = sequence.values().iter().copied().take(12).collect();
    println!("   {label:<12} {shown:?} ({} samples)", sequence.len());
}

fn main() -> Result<(), ProcessingError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let pool = CorePool::global()?;
    let executor = RangeExecutor::new(pool);
    let generator = SineWaveGenerator::new(44_100);
    println!("=== pardft sine sum on {} workers ===\n", pool.cores());

    let low = generator.generate(&executor, 440.0, 1.0, 10_000, 0.0)?;
    let high = generator.generate(&executor, 880.0, 1.0, 5000, PI / 3.0)?;
    print_samples("440 Hz", &low);
    print_samples("880 Hz", &high);

    let mut sum = low.clone();
    executor.execute(&DiscreteSystem::Adder, sum.view_mut(), &[high.view()])?;
    print_samples("sum", &sum);

    let mut difference = low.clone();
    executor.execute(&DiscreteSystem::Subtracter, difference.view_mut(), &[high.view()])?;
    print_samples("difference", &difference);

    let mut product = low;
    executor.execute(&DiscreteSystem::Multiplier, product.view_mut(), &[high.view()])?;
    print_samples("product", &product);

    executor.execute(
        &DiscreteSystem::ConstantMultiplier(0.25),
        sum.view_mut(),
        &[] as &[SequenceView<'_>],
    )?;
    print_samples("sum / 4", &sum);

    Ok(())
}
