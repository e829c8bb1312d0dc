use super::*;
use crate::config::DrawOrder;
use crate::source::ZoomRange;
use lightbox_ui_graphics::{Point, Rect};
use std::cell::RefCell;

const VIEWPORT: Size = Size::new(400.0, 800.0);

#[derive(Clone, Debug, PartialEq)]
struct Pic(usize);

impl MediaImage for Pic {
    fn pixel_size(&self) -> Size {
        Size::new(200.0, 100.0)
    }
}

#[derive(Default)]
struct Recorder {
    count: usize,
    target: Option<Rect>,
    requests: RefCell<Vec<FetchRequest>>,
}

impl MediaSource for Recorder {
    type Image = Pic;

    fn item_count(&self) -> usize {
        self.count
    }

    fn request_item(&self, request: FetchRequest) {
        self.requests.borrow_mut().push(request);
    }

    fn dismissal_target(&self) -> Option<Rect> {
        self.target
    }
}

fn browser(count: usize, start: usize) -> MediaBrowser<Recorder> {
    let source = Recorder {
        count,
        ..Recorder::default()
    };
    MediaBrowser::new(source, BrowserConfig::default(), VIEWPORT, start).unwrap()
}

fn take_requests(browser: &MediaBrowser<Recorder>) -> Vec<FetchRequest> {
    browser.source().requests.take()
}

fn load_all(browser: &mut MediaBrowser<Recorder>) {
    for request in take_requests(browser) {
        let media = LoadedMedia::new(Pic(request.index));
        browser.complete_fetch(request.ticket, request.index, Ok(media));
    }
}

fn events(browser: &mut MediaBrowser<Recorder>) -> Vec<BrowserEvent> {
    let mut out = Vec::new();
    browser.drain_events(|event| out.push(event));
    out
}

fn run_until_idle(browser: &mut MediaBrowser<Recorder>, mut now: Instant) -> Instant {
    for _ in 0..1_000 {
        match browser.next_deadline() {
            Some(due) => {
                now = now.max(due);
                browser.tick(now);
            }
            None => return now,
        }
    }
    panic!("browser never went idle");
}

fn pan(browser: &mut MediaBrowser<Recorder>, now: Instant, translation: Point, velocity: Point) {
    browser.handle_pan(now, PanSample::began());
    browser.handle_pan(now, PanSample::changed(translation));
    browser.handle_pan(now, PanSample::ended(translation, velocity));
}

#[test]
fn new_requests_every_slot_around_the_start() {
    let browser = browser(5, 0);
    let mut indices: Vec<usize> = take_requests(&browser).iter().map(|r| r.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 4]);
    assert_eq!(browser.focused_index(), 0);
    assert!(browser.window().iter().all(ItemView::is_loading));
}

#[test]
fn start_index_is_clamped() {
    let browser = browser(5, 9);
    assert_eq!(browser.focused_index(), 4);
    assert_eq!(browser.window().current().index(), 4);
}

#[test]
fn empty_viewport_is_rejected() {
    let result = MediaBrowser::new(
        Recorder::default(),
        BrowserConfig::default(),
        Size::new(0.0, 800.0),
        0,
    );
    assert!(matches!(result, Err(BrowserError::EmptyViewport { .. })));
}

#[test]
fn empty_source_requests_nothing() {
    let mut browser = browser(0, 3);
    assert!(take_requests(&browser).is_empty());
    assert!(browser
        .render_items()
        .iter()
        .all(|item| item.index.is_none() && !item.is_loading));

    pan(&mut browser, Instant::now(), Point::new(-300.0, 0.0), Point::new(-900.0, 0.0));
    assert_eq!(browser.next_deadline(), None);
    assert!(events(&mut browser).is_empty());
}

#[test]
fn focused_fetch_sets_the_background() {
    let mut browser = browser(5, 2);
    load_all(&mut browser);
    assert_eq!(browser.background_image(), Some(&Pic(2)));
    assert_eq!(events(&mut browser), vec![BrowserEvent::BackgroundChanged]);
    assert!(browser.window().iter().all(|item| !item.is_loading()));
}

#[test]
fn failed_fetch_clears_loading() {
    let mut browser = browser(5, 0);
    let request = take_requests(&browser)[0];
    let outcome = browser.complete_fetch(
        request.ticket,
        request.index,
        Err(FetchError::Load("decode".into())),
    );
    assert_eq!(outcome, FetchOutcome::Failed);
    let item = browser.window().slot(request.ticket.slot).unwrap();
    assert!(!item.is_loading());
    assert!(item.image().is_none());
}

#[test]
fn completion_for_a_recycled_slot_is_stale() {
    let mut browser = browser(5, 0);
    let before = take_requests(&browser);
    let previous = before
        .iter()
        .copied()
        .find(|request| request.index == 4)
        .unwrap();

    let now = Instant::now();
    pan(&mut browser, now, Point::new(-300.0, 0.0), Point::ZERO);
    let after = take_requests(&browser);
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].ticket.slot, previous.ticket.slot);
    assert_eq!(after[0].index, 2);

    let outcome = browser.complete_fetch(previous.ticket, 4, Ok(LoadedMedia::new(Pic(4))));
    assert_eq!(outcome, FetchOutcome::Stale);
    let slot = browser.window().slot(previous.ticket.slot).unwrap();
    assert!(slot.is_loading());
    assert!(slot.image().is_none());

    let wrong_index = browser.complete_fetch(after[0].ticket, 3, Ok(LoadedMedia::new(Pic(3))));
    assert_eq!(wrong_index, FetchOutcome::Stale);
    let fresh = browser.complete_fetch(after[0].ticket, 2, Ok(LoadedMedia::new(Pic(2))));
    assert_eq!(fresh, FetchOutcome::Applied);
}

#[test]
fn horizontal_drag_pages_and_settles() {
    let mut browser = browser(5, 0);
    load_all(&mut browser);
    events(&mut browser);

    let now = Instant::now();
    pan(&mut browser, now, Point::new(-300.0, 0.0), Point::new(-100.0, 0.0));
    assert_eq!(browser.focused_index(), 1);
    assert_eq!(browser.paging_phase(), PagingPhase::Settling);
    assert_eq!(
        events(&mut browser),
        vec![BrowserEvent::BackgroundChanged, BrowserEvent::FocusChanged(1)]
    );
    assert_eq!(browser.background_image(), Some(&Pic(1)));

    run_until_idle(&mut browser, now);
    assert_eq!(browser.paging_phase(), PagingPhase::Idle);
    assert_eq!(browser.window().current().position(), 0.0);
    assert!(events(&mut browser).is_empty());
}

#[test]
fn vertical_drag_past_threshold_dismisses() {
    let mut browser = browser(5, 0);
    load_all(&mut browser);
    events(&mut browser);

    let now = Instant::now();
    browser.handle_pan(now, PanSample::began());
    browser.handle_pan(now, PanSample::changed(Point::new(0.0, 300.0)));
    assert_eq!(browser.active_route(), Some(GestureRoute::Dismiss));
    assert!(browser.is_content_hidden());
    assert!(browser.render_items().iter().all(|item| item.transform.hidden));
    let overlay = browser.dismiss_overlay().unwrap();
    assert_eq!(overlay.image, Some(&Pic(0)));
    assert_eq!(overlay.transform.translation, Point::new(0.0, 300.0));

    browser.handle_pan(now, PanSample::ended(Point::new(0.0, 300.0), Point::ZERO));
    assert_eq!(browser.dismiss_phase(), DismissPhase::Completing);
    run_until_idle(&mut browser, now);

    assert!(browser.is_dismissed());
    assert_eq!(
        events(&mut browser),
        vec![
            BrowserEvent::ControlsVisibilityChanged { hidden: true },
            BrowserEvent::DismissRequested,
        ]
    );
}

#[test]
fn short_vertical_drag_restores_content() {
    let mut browser = browser(5, 0);
    let now = Instant::now();
    pan(&mut browser, now, Point::new(0.0, 100.0), Point::ZERO);
    assert_eq!(browser.dismiss_phase(), DismissPhase::SpringingBack);

    run_until_idle(&mut browser, now);
    assert!(!browser.is_dismissed());
    assert!(!browser.is_content_hidden());
    assert!(!browser.controls_hidden());
    assert_eq!(browser.controls_alpha(), 1.0);
    assert_eq!(
        events(&mut browser),
        vec![
            BrowserEvent::ControlsVisibilityChanged { hidden: true },
            BrowserEvent::ControlsVisibilityChanged { hidden: false },
        ]
    );
}

#[test]
fn taps_are_ignored_while_dismissing() {
    let mut browser = browser(5, 0);
    let now = Instant::now();
    browser.handle_pan(now, PanSample::began());
    browser.handle_pan(now, PanSample::changed(Point::new(0.0, 120.0)));
    events(&mut browser);

    browser.handle_tap(now, TapEvent::single(Point::new(10.0, 10.0)));
    assert!(browser.controls_hidden());
    assert!(events(&mut browser).is_empty());
}

#[test]
fn single_tap_toggles_controls() {
    let mut browser = browser(5, 0);
    let now = Instant::now();
    browser.handle_tap(now, TapEvent::single(Point::ZERO));
    assert!(browser.controls_hidden());
    assert!(browser.page_indicator().hidden);
    assert_eq!(
        events(&mut browser),
        vec![BrowserEvent::ControlsVisibilityChanged { hidden: true }]
    );
}

#[test]
fn zoomed_item_keeps_pans_away_from_paging() {
    let mut browser = browser(5, 0);
    for request in take_requests(&browser) {
        let media = LoadedMedia::new(Pic(request.index)).with_zoom_range(ZoomRange::new(1.0, 4.0));
        browser.complete_fetch(request.ticket, request.index, Ok(media));
    }

    browser.handle_tap(Instant::now(), TapEvent::double(Point::ZERO));
    assert_eq!(browser.window().current().zoom_scale(), 4.0);

    let now = Instant::now();
    browser.handle_pan(now, PanSample::began());
    browser.handle_pan(now, PanSample::changed(Point::new(-300.0, 0.0)));
    assert_eq!(browser.active_route(), Some(GestureRoute::Content));
    assert_eq!(browser.window().current().position(), 0.0);
    browser.handle_pan(now, PanSample::ended(Point::new(-300.0, 0.0), Point::ZERO));
    assert_eq!(browser.paging_phase(), PagingPhase::Idle);

    assert_eq!(browser.toggle_zoom(), 1.0);
}

#[test]
fn appear_arms_auto_hide() {
    let mut browser = browser(5, 0);
    let now = Instant::now();
    browser.appear(now);
    let due = now + Duration::from_secs(3);
    assert_eq!(browser.next_deadline(), Some(due));

    browser.tick(due);
    assert!(browser.controls_hidden());
    assert_eq!(
        events(&mut browser),
        vec![BrowserEvent::ControlsVisibilityChanged { hidden: true }]
    );

    browser.disappear();
    run_until_idle(&mut browser, due);
    assert_eq!(browser.controls_alpha(), 0.0);
}

#[test]
fn disappear_cancels_auto_hide() {
    let mut browser = browser(5, 0);
    let now = Instant::now();
    browser.appear(now);
    browser.disappear();
    assert_eq!(browser.next_deadline(), None);
}

#[test]
fn jump_recentres_and_requests_new_content() {
    let mut browser = browser(5, 0);
    load_all(&mut browser);
    events(&mut browser);

    browser.jump_to(3);
    assert_eq!(browser.focused_index(), 3);
    assert_eq!(events(&mut browser), vec![BrowserEvent::FocusChanged(3)]);
    let mut indices: Vec<usize> = take_requests(&browser).iter().map(|r| r.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, vec![2, 3, 4]);

    browser.jump_to(42);
    assert_eq!(browser.focused_index(), 4);
}

#[test]
fn custom_policy_replaces_the_stock_transition() {
    let mut browser = browser(5, 0);
    let policy: Rc<dyn TransformPolicy> =
        Rc::new(|_: ItemGeometry, position: f32| VisualTransform::translated(position * 10.0, 0.0));
    browser.set_transform_policy(Some(policy));

    let items = browser.render_items();
    assert_eq!(items.len(), WINDOW_LEN);
    for item in &items {
        assert_eq!(item.transform.translation.x, item.position * 10.0);
    }
    drop(items);

    browser.set_transform_policy(None);
    let stock = browser.render_items();
    let next = stock.iter().find(|item| item.position == 1.0).unwrap();
    assert_eq!(next.transform.translation.x, 450.0);
}

#[test]
fn draw_order_change_flips_the_stack() {
    let mut browser = browser(5, 0);
    let before: Vec<f32> = browser.render_items().iter().map(|i| i.position).collect();
    assert_eq!(before, vec![-1.0, 0.0, 1.0]);

    let config = BrowserConfig::default().with_draw_order(DrawOrder::NextToPrevious);
    browser.set_config(config).unwrap();
    let after: Vec<f32> = browser.render_items().iter().map(|i| i.position).collect();
    assert_eq!(after, vec![1.0, 0.0, -1.0]);
}

#[test]
fn close_requests_dismissal_once() {
    let mut browser = browser(5, 0);
    browser.close();
    browser.close();
    assert_eq!(events(&mut browser), vec![BrowserEvent::DismissRequested]);

    pan(&mut browser, Instant::now(), Point::new(-300.0, 0.0), Point::ZERO);
    assert_eq!(browser.focused_index(), 0);
}
