// Example: feeding a burst of scroll events through a throttled window controller.
use datawindow::WindowOptions;
use datawindow_adapter::WindowController;

fn main() {
    let opts = WindowOptions::new(20, 400).with_buffer(3);
    let mut c = WindowController::new((0..50_000u32).collect(), opts, 16).expect("valid options");

    // One scroll event every 4ms, as a fast wheel would produce.
    let mut now_ms = 0u64;
    for step in 1..=20u64 {
        now_ms += 4;
        if c.on_scroll(step * 150, now_ms) {
            println!("t={now_ms} applied window={:?}", c.window().visible_window());
        }
        if c.tick(now_ms) {
            println!("t={now_ms} caught up window={:?}", c.window().visible_window());
        }
    }

    // Frames keep ticking after input stops, so the last offset is never lost.
    while let Some(deadline) = c.next_deadline() {
        now_ms = now_ms.max(deadline);
        c.tick(now_ms);
    }
    println!(
        "final scroll_top={} window={:?}",
        c.window().scroll_top(),
        c.window().visible_window()
    );
}
