// Example: debounced search input plus load-once-when-visible thumbnails.
use datawindow_adapter::{
    Debounce, Span, Viewport, VisibilityEvent, VisibilityLoader, VisibilityOptions,
};

fn main() {
    let mut search = Debounce::new(250, |query: String| println!("search for {query:?}"));
    for (t, q) in [(0u64, "r"), (80, "ru"), (150, "rus"), (220, "rust")] {
        search.call(t, q.to_string());
    }
    if let Some(deadline) = search.next_deadline() {
        search.tick(deadline);
    }

    let on_visible = |e: &VisibilityEvent<u64>| {
        println!("load thumbnail {} (ratio {:.2})", e.id, e.ratio)
    };
    let mut loader = VisibilityLoader::new(VisibilityOptions::default(), on_visible);
    for id in 0..40u64 {
        loader.observe(id, Span::new(id * 120, 120));
    }

    for offset in [0u64, 300, 600, 300, 2_000] {
        let fired = loader.check_viewport(Viewport::new(offset, 480));
        println!("viewport at {offset}: {fired} new loads, {} pending", loader.observed_len());
    }
    loader.cleanup();
}
