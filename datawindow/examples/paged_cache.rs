// Example: paging through a snapshot with a small LRU of rendered pages.
use datawindow::{BoundedCache, PagedView};

fn render(items: &[u32]) -> String {
    items
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn main() {
    let mut view = PagedView::new((1..=95).collect(), 10).expect("non-zero page size");
    let mut rendered: BoundedCache<usize, String> =
        BoundedCache::new(3).expect("non-zero capacity");

    for requested in [1usize, 2, 3, 1, 4, 2, 99] {
        let page = view.get_page_data(requested);
        let index = page.index;
        let text = rendered.get_or_insert_with(index, || render(page.items));
        println!("page {requested} -> {index}/{}: {text}", view.total_pages());
    }

    println!("cached pages (oldest first): {:?}", rendered.keys_lru().collect::<Vec<_>>());
    println!("stats: {:?}", rendered.stats());
}
