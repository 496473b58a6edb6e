//! Headless scenario replay
//!
//! Builds a one-container element tree, wires an [`AutoScroll`] to a
//! [`FrameClock`] and an [`InputHub`], then replays the scenario through a
//! [`HeadlessEventLoop`], recording what every delivered frame did.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;

use anyhow::Result;
use drift_animation::FrameClock;
use drift_core::{Point, Rect, ScrollContainer, Size};
use drift_layout::{ElementStyle, ElementTree};
use drift_platform::{
    ControlFlow, Event, EventLoop, HeadlessEventLoop, InputEvent, InputHub, LifecycleEvent,
    MouseEvent, TouchEvent,
};
use drift_scroll::{AutoScroll, FrameOutcome};
use serde::Serialize;
use tracing::debug;

use crate::config::{InputStep, Scenario, StepKind};

/// Application events interleaved with platform input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Control {
    Enable,
    Disable,
}

/// What happened on one delivered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStatus {
    /// Auto-scroll was off
    Idle,
    /// Armed, but no pointer position yet
    Waiting,
    /// Pointer outside every gutter
    Outside,
    Scrolled,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Display frame number, counting only delivered frames
    pub frame: u64,
    pub status: FrameStatus,
    pub pointer: Option<[f32; 2]>,
    pub offset: [f32; 2],
    /// Position passed to the scroll callback, if it fired
    pub on_scroll: Option<[f32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub frames_scripted: u64,
    pub frames_delivered: u64,
    pub scroll_events: usize,
    pub final_offset: [f32; 2],
    pub frames: Vec<FrameReport>,
}

fn pair(point: Point) -> [f32; 2] {
    [point.x, point.y]
}

fn step_event(step: &InputStep) -> Event<Control> {
    let (id, x, y) = (step.id, step.x, step.y);
    match step.kind {
        StepKind::Pointer => Event::Input(InputEvent::Mouse(MouseEvent::Moved { x, y })),
        StepKind::TouchStart => Event::Input(InputEvent::Touch(TouchEvent::Started { id, x, y })),
        StepKind::TouchMove => Event::Input(InputEvent::Touch(TouchEvent::Moved { id, x, y })),
        StepKind::TouchEnd => Event::Input(InputEvent::Touch(TouchEvent::Ended { id, x, y })),
        StepKind::Suspend => Event::Lifecycle(LifecycleEvent::Suspended),
        StepKind::Resume => Event::Lifecycle(LifecycleEvent::Resumed),
        StepKind::Disable => Event::User(Control::Disable),
        StepKind::Enable => Event::User(Control::Enable),
    }
}

/// Flatten the timeline: each frame's steps in file order, then the frame
fn script(scenario: &Scenario, frames: u64) -> Vec<Event<Control>> {
    let mut events = Vec::new();
    for frame in 0..frames {
        events.extend(scenario.steps_at(frame).map(step_event));
        events.push(Event::Frame);
    }
    events
}

/// Replay a scenario
///
/// `frames` overrides the scenario's frame count. With `realtime`, frames
/// are paced at the clock's target rate instead of running back to back.
pub fn run(scenario: &Scenario, frames: Option<u64>, realtime: bool) -> Result<Report> {
    let frames_scripted = frames.unwrap_or(scenario.frames);
    let container = &scenario.container;

    let tree = ElementTree::new(container.viewport());
    let bounds = container.bounds();
    let list = tree.add_element(
        tree.root(),
        ElementStyle::scroll(bounds, container.scroll_size()),
    );
    let subject = tree.add_element(
        list,
        ElementStyle::new(Rect::from_origin_size(bounds.origin, Size::ZERO)),
    );
    if let Some(handle) = tree.element(list) {
        handle.set_scroll_offset(container.scroll_offset());
    }

    let clock = FrameClock::new();
    let hub = Rc::new(InputHub::new());
    let mut auto_scroll = AutoScroll::new(tree.clone(), Rc::new(clock.handle()), hub.clone());
    auto_scroll.set_reference(Some(subject));

    let fired: Rc<RefCell<Option<[f32; 2]>>> = Rc::new(RefCell::new(None));
    let sink = fired.clone();
    auto_scroll.on_scroll(move |x, y| *sink.borrow_mut() = Some([x, y]));
    auto_scroll.set_config(scenario.config());

    let mut reports = Vec::new();
    let interval = clock.frame_interval();

    HeadlessEventLoop::with_user_events(script(scenario, frames_scripted)).run(|event| {
        match event {
            Event::Input(input) => {
                hub.dispatch(&input);
            }
            Event::User(Control::Enable) => auto_scroll.set_enabled(true),
            Event::User(Control::Disable) => auto_scroll.set_enabled(false),
            Event::Lifecycle(lifecycle) => debug!(?lifecycle, "lifecycle change"),
            Event::Frame => {
                if realtime {
                    thread::sleep(interval);
                }
                let armed = auto_scroll.is_armed();
                clock.tick();

                let status = match (armed, auto_scroll.last_frame()) {
                    (false, _) | (true, None) => FrameStatus::Idle,
                    (true, Some(FrameOutcome::Waiting)) => FrameStatus::Waiting,
                    (true, Some(FrameOutcome::Outside)) => FrameStatus::Outside,
                    (true, Some(FrameOutcome::Scrolled { .. })) => FrameStatus::Scrolled,
                };
                reports.push(FrameReport {
                    frame: clock.frame_count(),
                    status,
                    pointer: auto_scroll.pointer().map(pair),
                    offset: pair(tree.scroll_offset(list).unwrap_or_default()),
                    on_scroll: fired.borrow_mut().take(),
                });
            }
        }
        ControlFlow::Continue
    })?;

    let scroll_events = reports.iter().filter(|r| r.on_scroll.is_some()).count();
    debug!(frames = reports.len(), scroll_events, "scenario finished");

    Ok(Report {
        frames_scripted,
        frames_delivered: clock.frame_count(),
        scroll_events,
        final_offset: pair(tree.scroll_offset(list).unwrap_or_default()),
        frames: reports,
    })
}

/// Render a report as an aligned table
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>6}  {:<9}  {:<16}  {:<16}  {}\n",
        "frame", "status", "pointer", "offset", "on_scroll"
    ));
    for frame in &report.frames {
        out.push_str(&format!(
            "{:>6}  {:<9}  {:<16}  {:<16}  {}\n",
            frame.frame,
            format!("{:?}", frame.status).to_lowercase(),
            frame.pointer.map(fmt_pair).unwrap_or_else(|| "-".to_string()),
            fmt_pair(frame.offset),
            frame.on_scroll.map(fmt_pair).unwrap_or_else(|| "-".to_string()),
        ));
    }
    out.push_str(&format!(
        "\n{} of {} frames delivered, {} scroll events, final offset {}\n",
        report.frames_delivered,
        report.frames_scripted,
        report.scroll_events,
        fmt_pair(report.final_offset)
    ));
    out
}

fn fmt_pair([x, y]: [f32; 2]) -> String {
    format!("({x}, {y})")
}
