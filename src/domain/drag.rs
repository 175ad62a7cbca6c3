//! Pointer capture and drag handling for signature placements

use super::composition::Composition;
use super::geometry::{Position, Size, clamp_origin};
use super::placement::PlacementId;

/// Tracks which placement (if any) is being dragged
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    captured: Option<PlacementId>,
}

/// Origin that puts the centre of a `size` box on `point`
fn centred_on(point: Position, size: Size) -> Position {
    let half_w = i32::try_from(size.width / 2).unwrap_or(i32::MAX);
    let half_h = i32::try_from(size.height / 2).unwrap_or(i32::MAX);
    Position::new(point.x.saturating_sub(half_w), point.y.saturating_sub(half_h))
}

impl DragState {
    pub fn captured(&self) -> Option<PlacementId> {
        self.captured
    }

    /// Press at `point`. Captures the topmost placement under it without
    /// moving it.
    ///
    /// Returns whether the event was consumed.
    pub fn pointer_down(&mut self, composition: &Composition, point: Position) -> bool {
        self.captured = composition.hit_test(point);
        self.captured.is_some()
    }

    /// Move to `point`. While the pointer is inside the captured placement's
    /// current rectangle, the placement is re-centred on the pointer, which
    /// leaves half the box as slack on every side for the next move.
    ///
    /// Returns whether the event was consumed.
    pub fn pointer_move(
        &mut self,
        composition: &mut Composition,
        point: Position,
        canvas: Option<Size>,
    ) -> bool {
        let Some(id) = self.captured else {
            return false;
        };
        let Some(placement) = composition.placement(id) else {
            self.captured = None;
            return false;
        };
        if !placement.contains(point) {
            return false;
        }

        let mut origin = centred_on(point, placement.size);
        if let Some(canvas) = canvas {
            origin = clamp_origin(origin, placement.size, canvas);
        }
        composition.move_placement(id, origin)
    }

    /// Release capture. Returns whether a placement was captured.
    pub fn pointer_up(&mut self) -> bool {
        self.captured.take().is_some()
    }
}
