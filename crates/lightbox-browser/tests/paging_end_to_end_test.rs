//! Paging driven through the full browser: arbiter, engine, recycling and
//! fetch bookkeeping together.

use lightbox_browser::{
    Axis, BrowserConfig, BrowserEvent, BrowserStyle, DrawOrder, FetchOutcome, PagingPhase,
};
use lightbox_testing::prelude::*;
use lightbox_testing::{assert_window_at_rest, FakeImage};

fn robot_at(config: BrowserConfig, item_count: usize, start: usize) -> BrowserRobot {
    BrowserRobot::new(
        FakeMediaSource::new(item_count),
        config,
        Size::new(400.0, 800.0),
        start,
    )
    .unwrap()
}

fn focus_changes(events: &[BrowserEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            BrowserEvent::FocusChanged(index) => Some(*index),
            _ => None,
        })
        .collect()
}

#[test]
fn swipe_forward_moves_focus_by_one() {
    let mut robot = BrowserRobot::with_items(5).unwrap();
    robot.load_pending();
    robot.take_events();

    robot.swipe(Point::new(-300.0, 0.0), Point::new(-100.0, 0.0));
    robot.settle();

    assert_eq!(robot.browser().focused_index(), 1);
    assert_eq!(robot.window_indices(), [Some(0), Some(1), Some(2)]);
    assert_window_at_rest(robot.window_positions(), "after swipe");
    assert_eq!(focus_changes(&robot.take_events()), vec![1]);
    assert_eq!(robot.browser().background_image(), Some(&FakeImage::new(1)));
    assert_eq!(robot.source().pending().len(), 1);
    assert_eq!(robot.source().pending()[0].index, 2);
}

#[test]
fn fling_pages_without_crossing_under_the_finger() {
    let mut robot = BrowserRobot::with_items(5).unwrap();
    robot.swipe(Point::new(-90.0, 0.0), Point::new(-600.0, 0.0));
    assert!(robot.take_events().is_empty());

    robot.settle();
    assert_eq!(robot.browser().focused_index(), 1);
    assert_eq!(focus_changes(&robot.take_events()), vec![1]);
}

#[test]
fn carousel_wraps_from_last_to_first() {
    let mut robot = robot_at(BrowserConfig::default(), 5, 4);
    robot.swipe(Point::new(-300.0, 0.0), Point::new(-100.0, 0.0));
    robot.settle();

    assert_eq!(robot.browser().focused_index(), 0);
    assert_eq!(robot.window_indices(), [Some(4), Some(0), Some(1)]);
    assert_eq!(focus_changes(&robot.take_events()), vec![0]);
}

#[test]
fn carousel_wraps_backward_from_first() {
    let mut robot = BrowserRobot::with_items(5).unwrap();
    robot.swipe(Point::new(320.0, 0.0), Point::ZERO);
    robot.settle();

    assert_eq!(robot.browser().focused_index(), 4);
    assert_eq!(robot.window_indices(), [Some(3), Some(4), Some(0)]);
}

#[test]
fn linear_style_holds_the_first_and_last_item() {
    let config = BrowserConfig::default().with_browser_style(BrowserStyle::Linear);

    let mut first = robot_at(config.clone(), 5, 0);
    first.swipe(Point::new(300.0, 0.0), Point::new(1_500.0, 0.0));
    first.settle();
    assert_eq!(first.browser().focused_index(), 0);
    assert_window_at_rest(first.window_positions(), "first item");
    assert!(focus_changes(&first.take_events()).is_empty());

    let mut last = robot_at(config, 5, 4);
    last.swipe(Point::new(-300.0, 0.0), Point::new(-1_500.0, 0.0));
    last.settle();
    assert_eq!(last.browser().focused_index(), 4);
    assert_window_at_rest(last.window_positions(), "last item");
}

#[test]
fn dragging_back_and_forth_returns_home() {
    let mut robot = robot_at(BrowserConfig::default(), 4, 2);
    robot.drag(Point::new(-300.0, 0.0), 3);
    robot.move_to(Point::new(200.0, 0.0));
    robot.move_to(Point::ZERO);
    robot.release(Point::ZERO);
    robot.settle();

    assert_eq!(robot.browser().focused_index(), 2);
    assert_window_at_rest(robot.window_positions(), "round trip");
    assert_eq!(focus_changes(&robot.take_events()), vec![3, 2]);
}

#[test]
fn completions_may_arrive_out_of_order() {
    let mut robot = BrowserRobot::with_items(5).unwrap();
    robot.swipe(Point::new(-300.0, 0.0), Point::new(-100.0, 0.0));
    robot.settle();
    robot.take_events();

    let mut pending = robot.source().take_pending();
    pending.sort_by(|a, b| b.index.cmp(&a.index));
    let outcomes: Vec<(usize, FetchOutcome)> = pending
        .into_iter()
        .map(|request| {
            let media = LoadedMedia::new(FakeImage::new(request.index));
            (request.index, robot.complete(request, Ok(media)))
        })
        .collect();

    assert_eq!(
        outcomes,
        vec![
            (4, FetchOutcome::Stale),
            (2, FetchOutcome::Applied),
            (1, FetchOutcome::Applied),
            (0, FetchOutcome::Applied),
        ]
    );
    assert_eq!(robot.browser().background_image(), Some(&FakeImage::new(1)));
    assert_eq!(robot.take_events(), vec![BrowserEvent::BackgroundChanged]);
    assert!(robot.browser().window().iter().all(|item| !item.is_loading()));
}

#[test]
fn recycled_slot_draws_on_top_for_previous_to_next() {
    let mut robot = BrowserRobot::with_items(5).unwrap();
    let recycled = robot.browser().window().previous().slot();
    robot.swipe(Point::new(-300.0, 0.0), Point::new(-100.0, 0.0));

    let stack = robot.browser().window().draw_stack();
    assert_eq!(stack[2], recycled);

    let config = BrowserConfig::default().with_draw_order(DrawOrder::NextToPrevious);
    let mut reversed = robot_at(config, 5, 0);
    let recycled = reversed.browser().window().previous().slot();
    reversed.swipe(Point::new(-300.0, 0.0), Point::new(-100.0, 0.0));
    assert_eq!(reversed.browser().window().draw_stack()[0], recycled);
}

#[test]
fn vertical_axis_pages_on_vertical_drags() {
    let config = BrowserConfig::default().with_gesture_axis(Axis::Vertical);
    let mut robot = robot_at(config, 3, 0);
    robot.swipe(Point::new(0.0, -500.0), Point::new(0.0, -100.0));
    robot.settle();
    assert_eq!(robot.browser().focused_index(), 1);

    robot.drag(Point::new(200.0, 0.0), 2);
    assert!(robot.browser().is_content_hidden());
    assert_eq!(robot.browser().paging_phase(), PagingPhase::Idle);
}

#[test]
fn jump_to_recentres_without_animation() {
    let mut robot = BrowserRobot::with_items(8).unwrap();
    robot.source().take_pending();

    robot.browser_mut().jump_to(6);
    assert_eq!(robot.take_events(), vec![BrowserEvent::FocusChanged(6)]);
    assert_eq!(robot.window_indices(), [Some(5), Some(6), Some(7)]);
    assert_eq!(robot.source().take_pending().len(), 3);
    assert_eq!(robot.browser().next_deadline(), None);
}

#[test]
fn reload_picks_up_a_shrunken_source() {
    let mut robot = robot_at(BrowserConfig::default(), 6, 5);
    robot.source().set_item_count(3);
    robot.browser_mut().reload();

    assert_eq!(robot.browser().item_count(), 3);
    assert_eq!(robot.browser().focused_index(), 2);
    assert_eq!(robot.take_events(), vec![BrowserEvent::FocusChanged(2)]);
}
