// File: crates/chart-core/src/interaction.rs
// Summary: Hover/click state machine over a scene, tooltip content, and click notifications.

use tracing::{debug, info};

use crate::format;
use crate::geometry::{Point, PrimitiveId, Scene};

/// Tooltip is drawn this far right of and below the pointer.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, 10.0);

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering { target: PrimitiveId, pointer: Point },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(Point),
    /// Pointer left the canvas.
    Leave,
    Click(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Response {
    None,
    /// Still over the same primitive; only the pointer moved.
    Moved,
    Changed { from: Option<PrimitiveId>, to: Option<PrimitiveId> },
    Clicked(PrimitiveId),
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl TooltipContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), lines: Vec::new() }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Title followed by lines, one per row.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.title.as_str()).chain(self.lines.iter().map(String::as_str))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub position: Point,
    pub content: TooltipContent,
}

/// User-facing message emitted when a primitive is clicked.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub category: String,
    pub value: f64,
    pub message: String,
}

impl Notification {
    pub fn new(category: impl Into<String>, value: f64) -> Self {
        let category = category.into();
        let message = format!("Value: {} and Category: {}", format::plain(value), category);
        Self { category, value, message }
    }
}

/// Delivery seam for click notifications (toasts, logs, test recorders).
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

impl<F: Fn(&Notification)> Notifier for F {
    fn notify(&self, notification: &Notification) {
        self(notification)
    }
}

/// Writes notifications to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: &Notification) {
        info!(category = %n.category, value = n.value, "{}", n.message);
    }
}

/// Single-hover state for one chart instance.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    state: HoverState,
}

impl Interaction {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> HoverState { self.state }

    pub fn hovered(&self) -> Option<PrimitiveId> {
        match self.state {
            HoverState::Idle => None,
            HoverState::Hovering { target, .. } => Some(target),
        }
    }

    /// Where the tooltip goes, if one is showing.
    pub fn tooltip_anchor(&self) -> Option<Point> {
        match self.state {
            HoverState::Idle => None,
            HoverState::Hovering { pointer, .. } => Some(pointer.offset(TOOLTIP_OFFSET.0, TOOLTIP_OFFSET.1)),
        }
    }

    pub fn reset(&mut self) {
        self.state = HoverState::Idle;
    }

    pub fn handle(&mut self, scene: &Scene, event: PointerEvent) -> Response {
        match event {
            PointerEvent::Move(p) => {
                let hit = scene.hit_test(p);
                let prev = self.hovered();
                self.state = match hit {
                    Some(target) => HoverState::Hovering { target, pointer: p },
                    None => HoverState::Idle,
                };
                if hit == prev {
                    if hit.is_some() { Response::Moved } else { Response::None }
                } else {
                    debug!(from = ?prev, to = ?hit, "hover changed");
                    Response::Changed { from: prev, to: hit }
                }
            }
            PointerEvent::Leave => {
                let prev = self.hovered();
                self.state = HoverState::Idle;
                match prev {
                    Some(_) => Response::Changed { from: prev, to: None },
                    None => Response::None,
                }
            }
            PointerEvent::Click(p) => match scene.hit_test(p) {
                Some(id) => Response::Clicked(id),
                None => Response::None,
            },
        }
    }
}
