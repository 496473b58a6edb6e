//! End-to-end auto-scroll behavior against a headless element tree

use std::cell::RefCell;
use std::rc::Rc;

use drift_animation::FrameClock;
use drift_core::{Point, Rect, ScrollContainer, Size};
use drift_layout::{ElementId, ElementStyle, ElementTree};
use drift_platform::{InputEvent, InputHub, MouseEvent, TouchEvent};
use drift_scroll::{AutoScroll, AutoScrollConfig, FrameOutcome};

/// A 500x300 list at the window origin with a card inside it
struct Board {
    tree: ElementTree,
    list: ElementId,
    card: ElementId,
    clock: FrameClock,
    hub: Rc<InputHub>,
    auto_scroll: AutoScroll<ElementTree>,
    scrolls: Rc<RefCell<Vec<(f32, f32)>>>,
}

impl Board {
    fn new(config: AutoScrollConfig) -> Self {
        let tree = ElementTree::new(Size::new(1280.0, 720.0));
        let list = tree.add_element(
            tree.root(),
            ElementStyle::scroll(Rect::new(0.0, 0.0, 500.0, 300.0), Size::new(2000.0, 1200.0)),
        );
        let card = tree.add_element(list, ElementStyle::new(Rect::new(10.0, 10.0, 120.0, 40.0)));

        let clock = FrameClock::new();
        let hub = Rc::new(InputHub::new());
        let mut auto_scroll = AutoScroll::new(tree.clone(), Rc::new(clock.handle()), hub.clone());
        auto_scroll.set_reference(Some(card));

        let scrolls = Rc::new(RefCell::new(Vec::new()));
        let sink = scrolls.clone();
        auto_scroll.on_scroll(move |x, y| sink.borrow_mut().push((x, y)));
        auto_scroll.set_config(config);

        Self {
            tree,
            list,
            card,
            clock,
            hub,
            auto_scroll,
            scrolls,
        }
    }

    fn pointer(&self, x: f32, y: f32) {
        self.hub
            .dispatch(&InputEvent::Mouse(MouseEvent::Moved { x, y }));
    }

    fn offset(&self) -> Point {
        self.tree.scroll_offset(self.list).unwrap_or_default()
    }
}

#[test]
fn test_resolves_the_list_not_the_card() {
    let board = Board::new(AutoScrollConfig::default());
    assert_eq!(board.tree.scroll_parent(board.card), board.list);
    assert_eq!(
        board.auto_scroll.target_bounds(),
        Some(Rect::new(0.0, 0.0, 500.0, 300.0))
    );
}

#[test]
fn test_pointer_past_right_edge_scrolls_right() {
    let board = Board::new(AutoScrollConfig::enabled());
    board.pointer(520.0, 150.0);
    board.clock.tick();

    assert_eq!(board.offset(), Point::new(14.0, 0.0));
    assert_eq!(*board.scrolls.borrow(), vec![(520.0, 150.0)]);
}

#[test]
fn test_dead_center_never_scrolls() {
    let board = Board::new(AutoScrollConfig::enabled());
    board.pointer(250.0, 150.0);
    for _ in 0..10 {
        board.clock.tick();
    }

    assert_eq!(board.offset(), Point::ZERO);
    assert!(board.scrolls.borrow().is_empty());
    assert_eq!(board.clock.pending_count(), 1);
}

#[test]
fn test_holding_in_a_corner_scrolls_both_axes_each_frame() {
    let board = Board::new(AutoScrollConfig::enabled());
    if let Some(list) = board.tree.element(board.list) {
        list.set_scroll_offset(Point::new(200.0, 200.0));
    }

    // 30 into the left gutter, 40 into the top gutter
    board.pointer(20.0, 10.0);
    board.clock.tick();
    board.clock.tick();

    assert_eq!(board.offset(), Point::new(188.0, 184.0));
    assert_eq!(board.scrolls.borrow().len(), 2);
}

#[test]
fn test_stops_at_the_end_of_the_content() {
    let board = Board::new(AutoScrollConfig::enabled().with_intensity(10.0));
    board.pointer(600.0, 150.0);
    for _ in 0..5 {
        board.clock.tick();
    }
    // max scroll is 2000 - 500
    assert_eq!(board.offset().x, 1500.0);
}

#[test]
fn test_disable_removes_everything() {
    let mut board = Board::new(AutoScrollConfig::enabled());
    board.pointer(520.0, 150.0);
    board.clock.tick();

    board.auto_scroll.set_enabled(false);
    assert_eq!(board.hub.listener_count(), 0);
    assert!(!board.clock.has_pending());
    assert_eq!(board.auto_scroll.pointer(), None);

    board.pointer(520.0, 150.0);
    board.clock.tick();
    assert_eq!(board.offset(), Point::new(14.0, 0.0));
}

#[test]
fn test_re_enable_needs_a_fresh_pointer() {
    let mut board = Board::new(AutoScrollConfig::enabled());
    board.pointer(520.0, 150.0);
    board.clock.tick();
    board.auto_scroll.set_enabled(false);
    board.auto_scroll.set_enabled(true);

    board.clock.tick();
    assert_eq!(board.auto_scroll.last_frame(), Some(FrameOutcome::Waiting));
    assert_eq!(board.offset().x, 14.0);

    board.pointer(520.0, 150.0);
    board.clock.tick();
    assert_eq!(board.offset().x, 28.0);
}

#[test]
fn test_bounds_are_captured_at_resolution() {
    let board = Board::new(AutoScrollConfig::enabled());
    // The list grows, but the gutters stay where they were measured
    board
        .tree
        .set_bounds(board.list, Rect::new(0.0, 0.0, 800.0, 300.0));

    board.pointer(520.0, 150.0);
    board.clock.tick();
    assert_eq!(board.offset().x, 14.0);
}

#[test]
fn test_new_reference_rebinds() {
    let mut board = Board::new(AutoScrollConfig::enabled());
    let strip = board.tree.add_element(
        board.tree.root(),
        ElementStyle::scroll_x(Rect::new(0.0, 400.0, 600.0, 100.0), Size::new(3000.0, 100.0)),
    );
    let chip = board
        .tree
        .add_element(strip, ElementStyle::new(Rect::new(10.0, 410.0, 50.0, 30.0)));

    board.auto_scroll.set_reference(Some(chip));
    assert_eq!(
        board.auto_scroll.target_bounds(),
        Some(Rect::new(0.0, 400.0, 600.0, 100.0))
    );

    board.pointer(590.0, 450.0);
    board.clock.tick();
    assert_eq!(board.tree.scroll_offset(strip), Some(Point::new(8.0, 0.0)));
    assert_eq!(board.offset(), Point::ZERO);
}

#[test]
fn test_touch_drag_follows_primary_touch() {
    let board = Board::new(AutoScrollConfig::enabled());
    let touch = |event| {
        board.hub.dispatch(&InputEvent::Touch(event));
    };

    touch(TouchEvent::Started {
        id: 7,
        x: 250.0,
        y: 150.0,
    });
    touch(TouchEvent::Started {
        id: 8,
        x: 490.0,
        y: 150.0,
    });
    touch(TouchEvent::Moved {
        id: 8,
        x: 495.0,
        y: 150.0,
    });
    board.clock.tick();
    assert_eq!(board.offset(), Point::ZERO);

    touch(TouchEvent::Ended {
        id: 7,
        x: 250.0,
        y: 150.0,
    });
    touch(TouchEvent::Moved {
        id: 8,
        x: 500.0,
        y: 290.0,
    });
    board.clock.tick();
    assert_eq!(board.offset(), Point::new(10.0, 8.0));
}

#[test]
fn test_dropping_the_controller_cleans_up() {
    let Board {
        hub,
        clock,
        auto_scroll,
        ..
    } = Board::new(AutoScrollConfig::enabled());
    assert_eq!(hub.listener_count(), 2);

    drop(auto_scroll);
    assert_eq!(hub.listener_count(), 0);
    assert_eq!(clock.tick(), 0);
}
