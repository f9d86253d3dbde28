//! Drag/drop interaction controller
//!
//! Maps continuous pointer movement to discrete column-hover and drop
//! decisions. One card may be dragged at a time; the board consumes the
//! controller's signals through [`DragListener`].

use uuid::Uuid;

use crate::task::{Task, TaskStatus};

use super::model::{column_at, CardVisual, PointerSample};

/// Signals raised by the drag controller
///
/// The board view implements this to float a clone of the lifted card,
/// highlight the hovered column, and apply or clear the drop.
pub trait DragListener {
    /// A card was lifted
    fn drag_started(&mut self, _task: &Task) {}

    /// The hovered column changed or was cleared
    fn hover_changed(&mut self, _column: Option<TaskStatus>) {}

    /// The card was dropped on a different column
    fn task_moved(&mut self, _task_id: Uuid, _status: TaskStatus) {}

    /// The card was dropped on its own column; restore it without a mutation
    fn drag_cleared(&mut self, _task_id: Uuid) {}
}

/// Phase of the drag state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

struct ActiveDrag {
    task_id: Uuid,
    origin: TaskStatus,
    hovered: Option<TaskStatus>,
    visual: CardVisual,
}

/// Drag/drop state machine for one board
///
/// `Idle -> Dragging -> Idle`; every gesture release is treated as a drop at
/// the final pointer position, there is no distinct cancel gesture.
pub struct DragController<L: DragListener> {
    board_width: f32,
    listener: L,
    active: Option<ActiveDrag>,
}

impl<L: DragListener> DragController<L> {
    pub fn new(board_width: f32, listener: L) -> Self {
        Self {
            board_width,
            listener,
            active: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        if self.active.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    /// Visual state for a card; rest unless it is the active drag
    pub fn card_visual(&self, task_id: Uuid) -> CardVisual {
        match &self.active {
            Some(active) if active.task_id == task_id => active.visual,
            _ => CardVisual::REST,
        }
    }

    /// Column currently highlighted as the drop target
    pub fn hovered_column(&self) -> Option<TaskStatus> {
        self.active.as_ref().and_then(|a| a.hovered)
    }

    /// Gesture start; ignored while another card is already dragging
    pub fn begin(&mut self, task: &Task) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(ActiveDrag {
            task_id: task.id,
            origin: task.status,
            hovered: None,
            visual: CardVisual::LIFTED,
        });
        self.listener.drag_started(task);
    }

    /// Pointer moved while dragging
    ///
    /// Tracks the card offset and raises the hovered column on every sample.
    pub fn update(&mut self, sample: PointerSample) {
        let column = match self.active.as_mut() {
            Some(active) => {
                active.visual.translate_x = sample.translation_x;
                active.visual.translate_y = sample.translation_y;
                let column = column_at(sample.absolute_x, self.board_width);
                active.hovered = Some(column);
                column
            }
            None => return,
        };
        self.listener.hover_changed(Some(column));
    }

    /// Gesture release; the drop target is recomputed from the final position
    ///
    /// Emits a move intent when the target column differs from the card's
    /// origin, a clear intent otherwise. Either way the visual state returns
    /// to rest and the hover signal is cleared.
    pub fn release(&mut self, sample: PointerSample) {
        let Some(active) = self.active.take() else {
            return;
        };
        let target = column_at(sample.absolute_x, self.board_width);
        if target != active.origin {
            self.listener.task_moved(active.task_id, target);
        } else {
            self.listener.drag_cleared(active.task_id);
        }
        self.listener.hover_changed(None);
    }
}
