// Example: chunked processing driven by a frame loop, timed with a registry.
use std::convert::Infallible;

use datawindow_adapter::{BatchPoll, Resume, TimingRegistry, batch_process};

fn main() {
    let mut timings = TimingRegistry::monotonic();
    timings.subscribe(|name, rec| {
        println!("{name}: {:.3}ms", rec.duration_ms.unwrap_or_default());
        Ok(())
    });

    let mut runner = batch_process(
        (0..10_000u64).collect(),
        1_000,
        |n| Ok::<_, Infallible>(n * n),
        8,
    )
    .expect("non-zero batch size");

    timings.start_timing("squares");
    let mut now_ms = 0u64;
    let squares = loop {
        match runner.poll(now_ms) {
            Ok(BatchPoll::Ready(out)) => break out,
            Ok(BatchPoll::Pending(Resume::At(at))) => now_ms = at,
            Ok(BatchPoll::Pending(Resume::NextFrame)) => now_ms += 16,
            Ok(BatchPoll::Drained | BatchPoll::Aborted { .. }) => unreachable!("fresh runner"),
            Err(err) => match err.source {},
        }
        let (done, total) = runner.progress();
        println!("t={now_ms}ms {done}/{total}");
    };
    timings.end_timing("squares");

    println!("sum={}", squares.iter().sum::<u64>());
}
