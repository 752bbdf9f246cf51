//! Single-level graphics state save/restore
//!
//! There is exactly one current [`DrawContext`] and exactly one snapshot
//! slot. Saving while a snapshot is pending, or restoring with none
//! pending, is rejected with a [`StateError`] and leaves the state
//! untouched. [`GraphicsState::scoped`] ties the restore to a guard's
//! lifetime so every exit path (including an early `return`) restores.

use core::ops::{Deref, DerefMut};

use super::types::{ClipWindow, DrawContext};

/// Graphics state misuse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// `save` called while a snapshot is already pending
    AlreadySaved,
    /// `restore` called with no pending snapshot
    NothingSaved,
}

/// Current drawing context plus one snapshot slot
#[derive(Debug, Clone)]
pub struct GraphicsState {
    current: DrawContext,
    saved: Option<DrawContext>,
}

impl GraphicsState {
    /// Create with the given context as current and an empty slot
    pub const fn new(current: DrawContext) -> Self {
        Self {
            current,
            saved: None,
        }
    }

    /// Current context
    pub fn current(&self) -> &DrawContext {
        &self.current
    }

    /// Current context, mutable
    pub fn current_mut(&mut self) -> &mut DrawContext {
        &mut self.current
    }

    /// Check if a snapshot is pending
    pub fn is_saved(&self) -> bool {
        self.saved.is_some()
    }

    /// Capture the current context and open the clip to `full`
    ///
    /// Font, colors and text attributes stay as they were; only the clip
    /// window is reset so the caller can draw anywhere.
    pub fn save(&mut self, full: ClipWindow) -> Result<(), StateError> {
        if self.saved.is_some() {
            return Err(StateError::AlreadySaved);
        }
        self.saved = Some(self.current);
        self.current.clip = full;
        Ok(())
    }

    /// Write the snapshot back as current and clear the slot
    pub fn restore(&mut self) -> Result<(), StateError> {
        let snapshot = self.saved.take().ok_or(StateError::NothingSaved)?;
        self.current = snapshot;
        Ok(())
    }

    /// Save now and restore when the returned guard is dropped
    pub fn scoped(&mut self, full: ClipWindow) -> Result<StateGuard<'_>, StateError> {
        self.save(full)?;
        Ok(StateGuard { state: self })
    }
}

/// Restores the saved context on drop
///
/// Dereferences to the (temporarily reset) current context.
pub struct StateGuard<'a> {
    state: &'a mut GraphicsState,
}

impl Deref for StateGuard<'_> {
    type Target = DrawContext;

    fn deref(&self) -> &DrawContext {
        &self.state.current
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut DrawContext {
        &mut self.state.current
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        // The guard only exists after a successful save and holds the only
        // borrow, so the slot is still occupied here.
        let _ = self.state.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::types::{Color, FontId, Size};
    use proptest::prelude::*;

    fn phase_context() -> DrawContext {
        let mut ctx = DrawContext::for_display(Size::new(240, 320));
        ctx.clip = ClipWindow::new(0, 21, 239, 298);
        ctx.font = FontId::Ubuntu16;
        ctx.fg = Color::ORANGE;
        ctx.bg = Color::NAVY;
        ctx.text.wrap = true;
        ctx
    }

    const FULL: ClipWindow = ClipWindow::new(0, 0, 239, 319);

    #[test]
    fn test_save_restore_is_noop() {
        let before = phase_context();
        let mut state = GraphicsState::new(before);

        state.save(FULL).unwrap();
        state.restore().unwrap();

        assert_eq!(*state.current(), before);
        assert!(!state.is_saved());
    }

    #[test]
    fn test_save_resets_only_clip() {
        let before = phase_context();
        let mut state = GraphicsState::new(before);

        state.save(FULL).unwrap();
        assert_eq!(state.current().clip, FULL);
        assert_eq!(state.current().font, before.font);
        assert_eq!(state.current().fg, before.fg);
        assert_eq!(state.current().bg, before.bg);
    }

    #[test]
    fn test_double_save_rejected() {
        let mut state = GraphicsState::new(phase_context());
        state.save(FULL).unwrap();
        state.current_mut().fg = Color::RED;

        assert_eq!(state.save(FULL), Err(StateError::AlreadySaved));

        // The pending snapshot was not overwritten
        state.restore().unwrap();
        assert_eq!(*state.current(), phase_context());
    }

    #[test]
    fn test_restore_without_save_rejected() {
        let mut state = GraphicsState::new(phase_context());
        state.current_mut().fg = Color::PINK;

        assert_eq!(state.restore(), Err(StateError::NothingSaved));
        assert_eq!(state.current().fg, Color::PINK);
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let before = phase_context();
        let mut state = GraphicsState::new(before);

        {
            let mut guard = state.scoped(FULL).unwrap();
            guard.font = FontId::Default;
            guard.fg = Color::YELLOW;
            guard.bg = Color::new(64, 64, 64);
            assert_eq!(guard.clip, FULL);
        }

        assert_eq!(*state.current(), before);
        assert!(!state.is_saved());
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn draw_then_bail(state: &mut GraphicsState, bail: bool) -> Option<()> {
            let mut guard = state.scoped(FULL).ok()?;
            guard.fg = Color::GREEN;
            if bail {
                return None;
            }
            guard.bg = Color::BLUE;
            Some(())
        }

        let before = phase_context();
        let mut state = GraphicsState::new(before);
        assert!(draw_then_bail(&mut state, true).is_none());
        assert_eq!(*state.current(), before);
        assert!(draw_then_bail(&mut state, false).is_some());
        assert_eq!(*state.current(), before);
    }

    #[test]
    fn test_scoped_rejected_while_saved() {
        let mut state = GraphicsState::new(phase_context());
        state.save(FULL).unwrap();
        assert!(matches!(state.scoped(FULL), Err(StateError::AlreadySaved)));
    }

    fn arb_color() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::new(r, g, b))
    }

    fn arb_context() -> impl Strategy<Value = DrawContext> {
        (
            (0i32..100, 0i32..100, 100i32..240, 100i32..320),
            0usize..FontId::BUILTIN.len(),
            arb_color(),
            arb_color(),
            0u16..360,
        )
            .prop_map(|((l, t, r, b), font, fg, bg, rotation)| {
                let mut ctx = DrawContext::for_display(Size::new(240, 320));
                ctx.clip = ClipWindow::new(l, t, r, b);
                ctx.font = FontId::BUILTIN[font];
                ctx.fg = fg;
                ctx.bg = bg;
                ctx.text.rotation = rotation;
                ctx
            })
    }

    proptest! {
        #[test]
        fn prop_mutation_between_save_and_restore_is_undone(
            before in arb_context(),
            during in arb_context(),
        ) {
            let mut state = GraphicsState::new(before);
            state.save(FULL).unwrap();
            *state.current_mut() = during;
            state.restore().unwrap();
            prop_assert_eq!(*state.current(), before);
        }
    }
}
