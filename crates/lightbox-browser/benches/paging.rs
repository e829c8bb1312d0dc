use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lightbox_browser::paging::{PagingEngine, PagingParams};
use lightbox_browser::{BrowserConfig, DrawOrder, ItemWindow, Size};
use web_time::Instant;

const VIEWPORT: Size = Size::new(1080.0, 1920.0);

fn drag_across_many_items(c: &mut Criterion) {
    let params = PagingParams::new(&BrowserConfig::default(), VIEWPORT, 1_000);

    c.bench_function("paging_drag_across_many_items", |b| {
        b.iter(|| {
            let mut window: ItemWindow<()> = ItemWindow::new(0, DrawOrder::PreviousToNext);
            let mut engine = PagingEngine::new();
            engine.begin();
            let mut recycles = 0;
            for step in 1..=200 {
                recycles += engine
                    .drag(black_box(step as f32 * -37.0), &mut window, &params)
                    .len();
            }
            recycles
        });
    });
}

fn fling_and_settle(c: &mut Criterion) {
    let params = PagingParams::new(&BrowserConfig::default(), VIEWPORT, 10);

    c.bench_function("paging_fling_and_settle", |b| {
        b.iter(|| {
            let mut window: ItemWindow<()> = ItemWindow::new(3, DrawOrder::PreviousToNext);
            let mut engine = PagingEngine::new();
            engine.begin();
            engine.drag(-120.0, &mut window, &params);
            engine.release(Instant::now(), black_box(-2_400.0), &window, &params);
            while !engine.is_idle() {
                engine.step(&mut window, &params);
            }
            window.current().index()
        });
    });
}

criterion_group!(benches, drag_across_many_items, fling_and_settle);
criterion_main!(benches);
