use crate::error::PaintResult;
use crate::geometry::PixelRect;
use crate::surface::{PixelRegion, PixelSurface, SurfaceSnapshot};

/// One undoable change to the sheet.
///
/// Stores the changed rectangle as it looked before and after, so undo and
/// redo are plain pastes and never re-run the tool.
#[derive(Clone)]
pub struct Command {
    label: &'static str,
    before: PixelRegion,
    after: PixelRegion,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("label", &self.label)
            .field("rect", &self.before.rect())
            .finish()
    }
}

impl Command {
    /// Records what changed on `surface` since `base` was taken.
    ///
    /// Returns `Ok(None)` when the sheet is pixel-identical to `base`, so
    /// operations that end up changing nothing leave no history entry.
    pub fn from_changes(
        label: &'static str,
        base: &SurfaceSnapshot,
        surface: &PixelSurface,
    ) -> PaintResult<Option<Self>> {
        let Some(rect) = surface.diff_bounds(base) else {
            return Ok(None);
        };
        Ok(Some(Self {
            label,
            before: base.region(rect)?,
            after: surface.copy_region(rect)?,
        }))
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn rect(&self) -> PixelRect {
        self.before.rect()
    }

    /// Bytes held by this entry
    pub fn byte_len(&self) -> usize {
        self.before.byte_len() + self.after.byte_len()
    }

    pub fn execute(&self, surface: &mut PixelSurface) {
        surface.restore_region(&self.after);
    }

    pub fn undo(&self, surface: &mut PixelSurface) {
        surface.restore_region(&self.before);
    }
}
