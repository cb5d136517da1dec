// Example: reducing a long series for charting with each strategy.
use datawindow::{SampleConfig, SampleStrategy, Sampler};

fn main() {
    // A slow wave with a single spike in the middle.
    let series: Vec<(u32, f64)> = (0..10_000u32)
        .map(|t| {
            let y = if t == 5_000 { 50.0 } else { (t as f64 / 500.0).sin() };
            (t, y)
        })
        .collect();

    for strategy in [
        SampleStrategy::Uniform,
        SampleStrategy::TimeSeries,
        SampleStrategy::Intelligent,
    ] {
        let sampler = Sampler::new(SampleConfig::new(200, strategy).expect("at least 2 points"));
        let reduced = sampler.reduce(&series);
        let keeps_spike = reduced.iter().any(|&(t, _)| t == 5_000);
        println!(
            "{strategy:?}: {} points, first={:?}, last={:?}, spike kept={keeps_spike}",
            reduced.len(),
            reduced.first(),
            reduced.last()
        );
    }
}
