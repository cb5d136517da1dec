use crate::*;

use alloc::borrow::Cow;
use alloc::vec::Vec;
use proptest::prelude::*;

fn window_over(
    len: usize,
    item_height: u32,
    container_height: u32,
    buffer: usize,
) -> VirtualWindow<usize> {
    let opts = WindowOptions::new(item_height, container_height).with_buffer(buffer);
    VirtualWindow::new((0..len).collect(), opts).unwrap()
}

// ===== PagedView =====

#[test]
fn page_number_past_the_end_clamps_to_last_page() {
    let mut pv = PagedView::new((1..=100).collect::<Vec<u32>>(), 10).unwrap();
    assert_eq!(pv.total_pages(), 10);

    let page = pv.get_page_data(11);
    assert_eq!(page.index, 10);
    assert_eq!(page.items, &(91..=100).collect::<Vec<u32>>()[..]);
    assert_eq!(pv.current_page(), 10);
}

#[test]
fn page_zero_clamps_to_first_page() {
    let mut pv = PagedView::new((1..=25).collect::<Vec<u32>>(), 10).unwrap();
    let page = pv.get_page_data(0);
    assert_eq!(page.index, 1);
    assert_eq!(page.items, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
}

#[test]
fn last_page_is_short() {
    let mut pv = PagedView::new((1..=25).collect::<Vec<u32>>(), 10).unwrap();
    assert_eq!(pv.total_pages(), 3);
    let page = pv.get_page_data(3);
    assert_eq!(page.items, &[21, 22, 23, 24, 25]);
    assert_eq!(page.size, 10);
}

#[test]
fn empty_snapshot_has_one_empty_page() {
    let mut pv = PagedView::new(Vec::<u8>::new(), 4).unwrap();
    assert_eq!(pv.total_pages(), 1);
    let page = pv.get_page_data(7);
    assert_eq!(page.index, 1);
    assert!(page.is_empty());
}

#[test]
fn update_data_pulls_current_page_back_into_range() {
    let mut pv = PagedView::new((0..100).collect::<Vec<u32>>(), 10).unwrap();
    pv.get_page_data(9);
    pv.update_data((0..35).collect());
    assert_eq!(pv.total_pages(), 4);
    assert_eq!(pv.current_page(), 4);
    assert_eq!(pv.current_page_data().items, &[30, 31, 32, 33, 34]);

    pv.update_data(Vec::new());
    assert_eq!(pv.current_page(), 1);
}

#[test]
fn next_and_prev_stop_at_the_edges() {
    let mut pv = PagedView::new((0..20).collect::<Vec<u32>>(), 10).unwrap();
    assert!(!pv.has_prev());
    assert_eq!(pv.prev_page().index, 1);
    assert_eq!(pv.next_page().index, 2);
    assert!(!pv.has_next());
    assert_eq!(pv.next_page().index, 2);
    assert!(pv.has_prev());
}

#[test]
fn zero_page_size_is_rejected() {
    assert_eq!(
        PagedView::new(alloc::vec![1, 2, 3], 0).unwrap_err(),
        ConfigError::ZeroPageSize
    );
}

proptest! {
    #[test]
    fn pages_concatenate_back_to_the_snapshot(
        data in proptest::collection::vec(any::<u16>(), 0..300),
        page_size in 1usize..40,
        requested in 0usize..50,
    ) {
        let mut pv = PagedView::new(data.clone(), page_size).unwrap();
        let rebuilt: Vec<u16> = pv.pages().flat_map(|p| p.items.iter().copied()).collect();
        prop_assert_eq!(&rebuilt, &data);

        let page = pv.get_page_data(requested);
        prop_assert!(page.items.len() <= page_size);
        let index = page.index;
        prop_assert!(index >= 1 && index <= pv.total_pages());
    }
}

// ===== Sampler =====

#[test]
fn small_input_is_returned_borrowed() {
    let series: Vec<f64> = (0..10).map(f64::from).collect();
    for strategy in [
        SampleStrategy::Uniform,
        SampleStrategy::TimeSeries,
        SampleStrategy::Intelligent,
    ] {
        let sampler = Sampler::new(SampleConfig::new(10, strategy).unwrap());
        let out = sampler.reduce(&series);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, &series[..]);
    }
}

#[test]
fn time_series_keeps_both_endpoints_within_budget() {
    let series: Vec<u32> = (0..1000).collect();
    let out = time_series_sampling(&series, 100);
    assert!(out.len() <= 100);
    assert_eq!(out.first(), Some(&0));
    assert_eq!(out.last(), Some(&999));
}

#[test]
fn time_series_appends_missing_tail_when_there_is_room() {
    // step = ceil(10 / 4) = 3 -> 0, 3, 6, 9: the stride already lands on the tail.
    let series: Vec<u32> = (0..10).collect();
    assert_eq!(&*time_series_sampling(&series, 4), &[0, 3, 6, 9]);

    // step = ceil(11 / 4) = 3 -> 0, 3, 6, 9 then the tail would make 5: 9 is replaced.
    let series: Vec<u32> = (0..11).collect();
    assert_eq!(&*time_series_sampling(&series, 4), &[0, 3, 6, 10]);

    let series: Vec<u32> = (0..8).collect();
    // step = ceil(8 / 5) = 2 -> 0, 2, 4, 6 plus the tail fits.
    assert_eq!(&*time_series_sampling(&series, 5), &[0, 2, 4, 6, 7]);
}

#[test]
fn uniform_has_exact_length_and_pinned_tail() {
    let series: Vec<u32> = (0..1000).collect();
    let out = uniform_sampling(&series, 7);
    assert_eq!(out.len(), 7);
    assert_eq!(&*out, &[0, 142, 285, 428, 571, 714, 999]);
}

#[test]
fn intelligent_keeps_a_short_spike() {
    let mut series = alloc::vec![1.0f64; 200];
    series[57] = 50.0;
    series[58] = 1.0;

    let uniform = uniform_sampling(&series, 10);
    assert!(!uniform.iter().any(|&v| v == 50.0));

    let sampler = Sampler::new(SampleConfig::new(10, SampleStrategy::Intelligent).unwrap());
    let idx = sampler.sample_indices(&series, |v| *v);
    assert_eq!(idx.first(), Some(&0));
    assert_eq!(idx.last(), Some(&199));
    assert!(idx.contains(&57));
    assert!(idx.contains(&58));
    assert_eq!(idx.len(), 10);
}

#[test]
fn intelligent_breaks_ties_toward_earlier_points() {
    // Every interior jump is 1.0; the two slots go to indexes 1 and 2.
    let series: Vec<i32> = (0..10).collect();
    let out = intelligent_sampling(&series, 4);
    assert_eq!(&*out, &[0, 1, 2, 9]);
}

#[test]
fn intelligent_reads_y_of_pairs() {
    let series: Vec<(u64, f32)> = (0..50u64)
        .map(|t| (t, if t == 20 { 9.0 } else { 0.0 }))
        .collect();
    let out = intelligent_sampling(&series, 4);
    let ts: Vec<u64> = out.iter().map(|p| p.0).collect();
    assert_eq!(ts, alloc::vec![0, 20, 21, 49]);
}

#[test]
fn nan_values_rank_as_flat() {
    let series = [0.0, f64::NAN, 0.0, 5.0, 0.0, 0.0];
    let out = intelligent_sampling(&series, 4);
    assert_eq!(out.len(), 4);
    assert_eq!(out[1], 5.0);
    assert_eq!(out[2], 0.0);
}

#[test]
fn sample_config_rejects_fewer_than_two_points() {
    assert_eq!(
        SampleConfig::new(1, SampleStrategy::Uniform).unwrap_err(),
        ConfigError::TooFewPoints(1)
    );
    // The free functions raise the budget instead.
    let series: Vec<u8> = (0..10).collect();
    assert_eq!(&*uniform_sampling(&series, 0), &[0, 9]);
}

fn arb_strategy() -> impl Strategy<Value = SampleStrategy> {
    prop_oneof![
        Just(SampleStrategy::Uniform),
        Just(SampleStrategy::TimeSeries),
        Just(SampleStrategy::Intelligent),
    ]
}

proptest! {
    #[test]
    fn sampling_keeps_endpoints_order_and_budget(
        series in proptest::collection::vec(-1000i32..1000, 0..400),
        max_points in 2usize..60,
        strategy in arb_strategy(),
    ) {
        let sampler = Sampler::new(SampleConfig::new(max_points, strategy).unwrap());
        let idx = sampler.sample_indices(&series, |v| f64::from(*v));

        prop_assert!(idx.len() <= max_points);
        prop_assert!(idx.windows(2).all(|w| w[0] < w[1]));
        if series.len() > max_points {
            prop_assert_eq!(idx.first().copied(), Some(0));
            prop_assert_eq!(idx.last().copied(), Some(series.len() - 1));
        } else {
            prop_assert_eq!(idx.len(), series.len());
        }
        if strategy != SampleStrategy::TimeSeries && series.len() > max_points {
            prop_assert_eq!(idx.len(), max_points);
        }
    }
}

// ===== IndexEmitter =====

#[test]
fn emitter_drops_duplicates_around_endpoints() {
    let mut out = Vec::new();
    let mut sink = |i: usize| out.push(i);
    let mut e = IndexEmitter::new(5, &mut sink);
    e.emit_with_endpoints([0, 2, 2, 3, 4]);
    assert_eq!(out, alloc::vec![0, 2, 3, 4]);
}

#[test]
fn emitter_on_empty_series_emits_nothing() {
    let mut out = Vec::new();
    let mut sink = |i: usize| out.push(i);
    IndexEmitter::new(0, &mut sink).emit_with_endpoints(core::iter::empty());
    assert!(out.is_empty());
}

// ===== VirtualWindow =====

#[test]
fn initial_window_renders_visible_count_plus_buffer() {
    let w = window_over(1000, 50, 400, 5);
    assert_eq!(w.visible_count(), 8);
    assert_eq!(w.start_index(), 0);
    assert_eq!(w.end_index(), 13);
    assert_eq!(w.offset(), 0);
}

#[test]
fn scroll_to_1000px_renders_15_to_33() {
    let mut w = window_over(1000, 50, 400, 5);
    assert!(w.update_scroll_top(1000));
    assert_eq!(w.start_index(), 15);
    assert_eq!(w.end_index(), 33);
    assert_eq!(w.offset(), 750);
    assert_eq!(w.visible_data().first(), Some(&15));
    assert_eq!(w.visible_data().len(), 18);
    assert_eq!(
        w.visible_window(),
        VisibleWindow {
            start_index: 15,
            end_index: 33,
            offset_px: 750,
        }
    );
}

#[test]
fn sub_item_scroll_is_not_a_change() {
    let mut w = window_over(1000, 50, 400, 5);
    assert!(w.update_scroll_top(1000));
    assert!(!w.update_scroll_top(1010));
    assert!(!w.update_scroll_top(1049));
    assert_eq!(w.scroll_top(), 1049);
    assert!(w.update_scroll_top(1050));
    assert_eq!(w.start_index(), 16);
}

#[test]
fn scroll_past_the_end_is_clamped() {
    let mut w = window_over(100, 10, 95, 2);
    assert_eq!(w.max_scroll_top(), 905);
    w.update_scroll_top(u64::MAX);
    assert_eq!(w.scroll_top(), 905);
    assert_eq!(w.end_index(), 100);
    assert!(w.end_index() - w.start_index() >= w.visible_count());
}

#[test]
fn offsets_between_max_scroll_and_total_height_match_the_bottom_range() {
    let mut w = window_over(1000, 50, 500, 5);
    assert_eq!(w.max_scroll_top(), 49_500);
    w.update_scroll_top(49_500);
    let bottom = w.visible_window();
    assert_eq!((bottom.start_index, bottom.end_index), (985, 1000));

    for offset in [49_501, 49_900, w.total_height()] {
        assert!(!w.update_scroll_top(offset));
        assert_eq!(w.scroll_top(), 49_500);
        assert_eq!(w.visible_window(), bottom);
    }
}

#[test]
fn update_data_restarts_at_the_top() {
    let mut w = window_over(1000, 50, 400, 5);
    w.update_scroll_top(10_000);
    w.update_data((0..6).collect());
    assert_eq!(w.scroll_top(), 0);
    assert_eq!(w.start_index(), 0);
    assert_eq!(w.end_index(), 6);
    assert_eq!(w.visible_data(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn resizing_the_container_recomputes() {
    let mut w = window_over(1000, 50, 400, 0);
    w.update_scroll_top(500);
    assert_eq!((w.start_index(), w.end_index()), (10, 18));
    assert!(w.set_container_height(800));
    assert_eq!(w.visible_count(), 16);
    assert_eq!((w.start_index(), w.end_index()), (10, 26));
    assert!(!w.set_container_height(800));
}

#[test]
fn state_roundtrips_through_restore() {
    let mut a = window_over(500, 20, 300, 3);
    a.update_scroll_top(4321);
    let state = a.state();

    let mut b = window_over(500, 20, 100, 3);
    assert!(b.restore_state(state));
    assert_eq!(b.visible_window(), a.visible_window());
}

#[test]
fn for_each_visible_reports_absolute_indexes() {
    let mut w = window_over(50, 10, 30, 1);
    w.update_scroll_top(100);
    let mut seen = Vec::new();
    w.for_each_visible(|i, v| {
        assert_eq!(i, *v);
        seen.push(i);
    });
    assert_eq!(seen, (9..14).collect::<Vec<_>>());
}

#[test]
fn zero_item_height_is_rejected() {
    let err = VirtualWindow::new(alloc::vec![1], WindowOptions::new(0, 100)).unwrap_err();
    assert_eq!(err, ConfigError::ZeroItemHeight);
}

proptest! {
    #[test]
    fn window_bounds_hold_for_any_offset(
        len in 0usize..2000,
        item_height in 1u32..80,
        container_height in 0u32..1200,
        buffer in 0usize..12,
        offsets in proptest::collection::vec(any::<u64>(), 1..20),
    ) {
        let mut w = window_over(len, item_height, container_height, buffer);
        for offset in offsets {
            let offset = offset % (w.total_height() + 5_000);
            let before = w.visible_window();
            let changed = w.update_scroll_top(offset);
            let after = w.visible_window();
            prop_assert_eq!(changed, before != after);

            prop_assert!(after.start_index <= after.end_index);
            prop_assert!(after.end_index <= len);
            if len >= w.visible_count() + buffer {
                prop_assert!(after.len() >= w.visible_count());
            }
            prop_assert_eq!(after.offset_px, after.start_index as u64 * item_height as u64);
        }
    }
}

// ===== BoundedCache =====

#[test]
fn third_insert_evicts_the_first() {
    let mut c = BoundedCache::new(2).unwrap();
    c.set("a", 1);
    c.set("b", 2);
    let evicted = c.set("c", 3);
    assert_eq!(evicted, Some(("a", 1)));
    assert_eq!(c.get(&"a"), None);
    assert_eq!(c.get(&"b"), Some(&2));
    assert_eq!(c.get(&"c"), Some(&3));
    assert_eq!(
        c.stats(),
        CacheStats {
            hits: 2,
            misses: 1,
            evictions: 1,
        }
    );
}

#[test]
fn get_bumps_recency() {
    let mut c = BoundedCache::new(2).unwrap();
    c.set(1, "one");
    c.set(2, "two");
    assert_eq!(c.get(&1), Some(&"one"));
    c.set(3, "three");
    assert!(c.contains_key(&1));
    assert!(!c.contains_key(&2));
    assert_eq!(c.keys_lru().copied().collect::<Vec<_>>(), alloc::vec![1, 3]);
}

#[test]
fn set_existing_updates_and_bumps() {
    let mut c = BoundedCache::new(2).unwrap();
    c.set(1, 10);
    c.set(2, 20);
    assert_eq!(c.set(1, 11), None);
    assert_eq!(c.len(), 2);
    c.set(3, 30);
    assert_eq!(c.peek(&1), Some(&11));
    assert_eq!(c.peek(&2), None);
}

#[test]
fn peek_does_not_bump() {
    let mut c = BoundedCache::new(2).unwrap();
    c.set(1, ());
    c.set(2, ());
    assert!(c.peek(&1).is_some());
    c.set(3, ());
    assert!(!c.contains_key(&1));
}

#[test]
fn remove_keeps_order_consistent() {
    let mut c = BoundedCache::new(4).unwrap();
    for k in 0..4 {
        c.set(k, k * 10);
    }
    assert_eq!(c.remove(&1), Some(10));
    assert_eq!(c.remove(&1), None);
    assert_eq!(c.keys_lru().copied().collect::<Vec<_>>(), alloc::vec![0, 2, 3]);
    c.get(&0);
    c.set(4, 40);
    c.set(5, 50);
    assert_eq!(c.keys_lru().copied().collect::<Vec<_>>(), alloc::vec![3, 0, 4, 5]);
    assert_eq!(c.get(&3), Some(&30));
}

#[test]
fn get_or_insert_with_computes_once() {
    let mut c = BoundedCache::new(2).unwrap();
    let mut calls = 0;
    for _ in 0..3 {
        let v = *c.get_or_insert_with("k", || {
            calls += 1;
            7
        });
        assert_eq!(v, 7);
    }
    assert_eq!(calls, 1);
    assert_eq!(c.stats().misses, 1);
    assert_eq!(c.stats().hits, 2);
}

#[test]
fn get_or_insert_with_evicts_at_capacity() {
    let mut c = BoundedCache::new(2).unwrap();
    c.get_or_insert_with(1, || 10);
    c.get_or_insert_with(2, || 20);
    c.get_or_insert_with(1, || 0);
    assert_eq!(*c.get_or_insert_with(3, || 30), 30);

    assert!(!c.contains_key(&2));
    assert_eq!(c.keys_lru().copied().collect::<Vec<_>>(), alloc::vec![1, 3]);
    assert_eq!(c.capacity(), 2);
    assert_eq!(
        c.stats(),
        CacheStats {
            hits: 1,
            misses: 3,
            evictions: 1,
        }
    );
}

#[test]
fn updating_a_full_cache_never_evicts() {
    let mut c = BoundedCache::new(2).unwrap();
    c.set("x", 1);
    c.set("y", 2);
    assert_eq!(c.set("x", 3), None);
    assert_eq!(c.set("y", 4), None);
    assert_eq!(c.len(), 2);
    assert_eq!(c.stats().evictions, 0);
    assert_eq!(c.peek(&"x"), Some(&3));
}

#[test]
fn string_keys_lookup_by_str() {
    let mut c: BoundedCache<alloc::string::String, u32> = BoundedCache::new(3).unwrap();
    c.set("report:7".into(), 7);
    assert_eq!(c.get("report:7"), Some(&7));
    assert_eq!(c.get("report:8"), None);
}

#[test]
fn clear_empties_everything() {
    let mut c = BoundedCache::new(3).unwrap();
    c.set(1, 1);
    c.set(2, 2);
    c.clear();
    assert!(c.is_empty());
    assert_eq!(c.keys_lru().count(), 0);
    assert_eq!(c.get(&1), None);
    c.set(3, 3);
    assert_eq!(c.keys_lru().copied().collect::<Vec<_>>(), alloc::vec![3]);
}

#[test]
fn zero_capacity_is_rejected() {
    assert_eq!(
        BoundedCache::<u8, u8>::new(0).unwrap_err(),
        ConfigError::ZeroCapacity
    );
}

#[derive(Clone, Debug)]
enum CacheOp {
    Set(u8, u32),
    Get(u8),
    Remove(u8),
}

fn arb_cache_op() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (0u8..16, any::<u32>()).prop_map(|(k, v)| CacheOp::Set(k, v)),
        (0u8..16).prop_map(CacheOp::Get),
        (0u8..16).prop_map(CacheOp::Remove),
    ]
}

proptest! {
    #[test]
    fn cache_matches_a_naive_model(
        capacity in 1usize..8,
        ops in proptest::collection::vec(arb_cache_op(), 0..200),
    ) {
        let mut cache = BoundedCache::new(capacity).unwrap();
        // Model: most recent at the back.
        let mut model: Vec<(u8, u32)> = Vec::new();

        for op in ops {
            match op {
                CacheOp::Set(k, v) => {
                    if let Some(pos) = model.iter().position(|e| e.0 == k) {
                        model.remove(pos);
                    } else if model.len() == capacity {
                        model.remove(0);
                    }
                    model.push((k, v));
                    cache.set(k, v);
                }
                CacheOp::Get(k) => {
                    let expected = model.iter().position(|e| e.0 == k).map(|pos| {
                        let e = model.remove(pos);
                        model.push(e);
                        e.1
                    });
                    prop_assert_eq!(cache.get(&k).copied(), expected);
                }
                CacheOp::Remove(k) => {
                    let expected = model.iter().position(|e| e.0 == k).map(|pos| model.remove(pos).1);
                    prop_assert_eq!(cache.remove(&k), expected);
                }
            }
            prop_assert!(cache.len() <= capacity);
            let keys: Vec<u8> = cache.keys_lru().copied().collect();
            let model_keys: Vec<u8> = model.iter().map(|e| e.0).collect();
            prop_assert_eq!(keys, model_keys);
        }
    }
}
