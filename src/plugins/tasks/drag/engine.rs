//! Pointer drag lifecycle for task rows.
//!
//! Idle -> Pressed -> Dragging -> Idle. Time is passed in by the host so the
//! engine never reads a clock itself.

use std::time::Instant;

use super::drop::{DropAction, DropTarget};
use super::geometry::{Point, Rect};
use super::hit_test::{resolve_drop_target, SpatialQuery};
use crate::core::settings::DragSettings;
use crate::plugins::tasks::errors::StoreError;
use crate::plugins::tasks::store::{MutationOutcome, TaskDataStore};
use crate::plugins::tasks::types::{Task, TaskData};

/// The task being dragged and where it was grabbed.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub task_id: String,
    pub folder_id: String,
    /// Copy of the task for rendering the preview.
    pub task: Task,
    /// Pointer position inside the task row when it was grabbed.
    pub grab_offset: Point,
    pub pressed_at: Instant,
    pub start: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,

    /// Pointer is down on a task but has not become a drag yet.
    Pressed { session: DragSession },

    Dragging {
        session: DragSession,
        pointer: Point,
        /// Set once the pointer moved past the threshold after the
        /// activation delay. Only such drags suppress the following click.
        activated: bool,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Pressed { session } | DragState::Dragging { session, .. } => Some(session),
        }
    }
}

/// What a pointer release amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// Nothing was pressed.
    Ignored,
    /// The press never became a drag.
    Click { task_id: String, folder_id: String },
    /// A drag ended. `None` when there was no usable drop target.
    Drop(Option<DropAction>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    /// Dragging over a valid target.
    Copy,
    /// Dragging over nothing droppable.
    NoDrop,
}

pub struct DragEngine {
    settings: DragSettings,
    state: DragState,
    target: Option<DropTarget>,
    suppress_clicks_until: Option<Instant>,
}

impl DragEngine {
    pub fn new(settings: DragSettings) -> Self {
        Self {
            settings,
            state: DragState::Idle,
            target: None,
            suppress_clicks_until: None,
        }
    }

    pub fn settings(&self) -> &DragSettings {
        &self.settings
    }

    pub fn drag_state(&self) -> &DragState {
        &self.state
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.target.as_ref()
    }

    fn session_for(task: &Task, folder_id: &str, pointer: Point, element: Rect, now: Instant) -> DragSession {
        DragSession {
            task_id: task.id.clone(),
            folder_id: folder_id.to_string(),
            task: task.clone(),
            grab_offset: pointer.offset_from(element.origin()),
            pressed_at: now,
            start: pointer,
        }
    }

    /// Pointer went down on a task row. Replaces any gesture in progress.
    pub fn press(&mut self, task: &Task, folder_id: &str, pointer: Point, element: Rect, now: Instant) {
        tracing::debug!(target: "drag", task_id = %task.id, folder_id, "Press");
        self.target = None;
        self.state = DragState::Pressed {
            session: Self::session_for(task, folder_id, pointer, element, now),
        };
    }

    /// Starts dragging right away, skipping press recognition.
    pub fn begin_drag(&mut self, task: &Task, folder_id: &str, pointer: Point, element: Rect, now: Instant) {
        tracing::debug!(target: "drag", task_id = %task.id, folder_id, "Drag started");
        self.target = None;
        self.state = DragState::Dragging {
            session: Self::session_for(task, folder_id, pointer, element, now),
            pointer,
            activated: false,
        };
    }

    /// Promotes a held press to a drag once the press delay has passed.
    pub fn tick(&mut self, now: Instant) {
        let DragState::Pressed { session } = &self.state else {
            return;
        };
        if now.saturating_duration_since(session.pressed_at) < self.settings.press_delay() {
            return;
        }

        tracing::debug!(target: "drag", task_id = %session.task_id, "Drag started after hold");
        let session = session.clone();
        let pointer = session.start;
        self.state = DragState::Dragging {
            session,
            pointer,
            activated: false,
        };
    }

    /// Tracks the pointer and recomputes the drop target from scratch.
    pub fn pointer_move(&mut self, pointer: Point, query: &dyn SpatialQuery, data: &TaskData, now: Instant) {
        let threshold = self.settings.press_threshold_px;
        let activation_delay = self.settings.activation_delay();

        let next = match std::mem::take(&mut self.state) {
            DragState::Idle => DragState::Idle,
            DragState::Pressed { session } => {
                if pointer.moved_beyond(session.start, threshold) {
                    tracing::debug!(target: "drag", task_id = %session.task_id, "Drag started after move");
                    let activated =
                        now.saturating_duration_since(session.pressed_at) >= activation_delay;
                    DragState::Dragging {
                        session,
                        pointer,
                        activated,
                    }
                } else {
                    DragState::Pressed { session }
                }
            }
            DragState::Dragging {
                session, activated, ..
            } => {
                let activated = activated
                    || (now.saturating_duration_since(session.pressed_at) >= activation_delay
                        && pointer.moved_beyond(session.start, threshold));
                DragState::Dragging {
                    session,
                    pointer,
                    activated,
                }
            }
        };
        self.state = next;

        let DragState::Dragging { session, .. } = &self.state else {
            return;
        };
        let candidates = query.candidates_at(pointer);
        let next_target =
            resolve_drop_target(&candidates, pointer, &session.task_id, &session.folder_id, data);
        if next_target != self.target {
            tracing::trace!(target: "drag", drop_target = ?next_target, "Drop target changed");
        }
        self.target = next_target;
    }

    /// Ends the gesture and returns to idle. A drag resolves against the
    /// target computed on the last pointer move.
    pub fn release(&mut self, data: &TaskData, now: Instant) -> Release {
        let target = self.target.take();
        match std::mem::take(&mut self.state) {
            DragState::Idle => Release::Ignored,
            DragState::Pressed { session } => Release::Click {
                task_id: session.task_id,
                folder_id: session.folder_id,
            },
            DragState::Dragging {
                session, activated, ..
            } => {
                if activated {
                    self.suppress_clicks_until = Some(now + self.settings.click_cooldown());
                }
                let action = target.and_then(|target| {
                    DropAction::compute(&session.task_id, &session.folder_id, &target, data)
                });
                tracing::debug!(target: "drag", task_id = %session.task_id, ?action, "Drag released");
                Release::Drop(action)
            }
        }
    }

    /// Releases and runs the resulting store mutation, if any.
    pub async fn release_into(
        &mut self,
        store: &mut TaskDataStore,
        now: Instant,
    ) -> Result<Option<MutationOutcome>, StoreError> {
        let snapshot = store.snapshot();
        match self.release(&snapshot, now) {
            Release::Drop(Some(action)) => action.apply(store).await.map(Some),
            _ => Ok(None),
        }
    }

    /// Whether a click arriving at `now` is the tail end of a drag and
    /// should not select anything.
    pub fn should_ignore_click(&self, now: Instant) -> bool {
        self.suppress_clicks_until.is_some_and(|until| now < until)
    }

    /// Where the drag preview's top-left corner goes so it stays under the
    /// pointer at the grab offset.
    pub fn preview_position(&self) -> Option<Point> {
        match &self.state {
            DragState::Dragging { session, pointer, .. } => Some(pointer.offset_from(session.grab_offset)),
            _ => None,
        }
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match (&self.state, &self.target) {
            (DragState::Dragging { .. }, Some(_)) => CursorHint::Copy,
            (DragState::Dragging { .. }, None) => CursorHint::NoDrop,
            _ => CursorHint::Default,
        }
    }
}
