// Example: windowing a large fixed-height list.
use datawindow::{VirtualWindow, WindowOptions};

fn main() {
    let rows: Vec<String> = (0..100_000).map(|i| format!("row {i}")).collect();
    let mut w = VirtualWindow::new(rows, WindowOptions::new(24, 600).with_buffer(5))
        .expect("valid options");

    println!("total_height={}", w.total_height());
    println!("initial={:?}", w.visible_window());

    for scroll_top in [0u64, 10, 2_400, 2_410, 1_000_000_000] {
        let changed = w.update_scroll_top(scroll_top);
        println!(
            "scroll_top={scroll_top} applied={} changed={changed} window={:?}",
            w.scroll_top(),
            w.visible_window()
        );
    }

    w.for_each_visible(|i, row| {
        if i % 10 == 0 {
            println!("  {i}: {row}");
        }
    });
}
