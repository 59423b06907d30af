//! Breakout layout of the playground panel.
//!
//! The playground is rendered inside the narrow, centered document column but has to
//! span the whole viewport. The panel is shifted left by the container's own offset
//! from the document's left edge and given the viewport's client width.

use zoon::{Mutable, Signal, map_ref};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakoutLayout {
    /// Relative horizontal position of the panel in px (never positive).
    pub left: i32,
    pub width: u32,
}

impl BreakoutLayout {
    /// CSS `left` value.
    pub fn left_css(&self) -> String {
        format!("{}px", self.left)
    }

    /// CSS `width` value.
    pub fn width_css(&self) -> String {
        format!("{}px", self.width)
    }
}

pub fn breakout_layout(container_offset: i32, viewport_width: u32) -> BreakoutLayout {
    BreakoutLayout {
        left: -container_offset,
        width: viewport_width,
    }
}

/// Vertical alignment of a scroll-into-view request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollRequest {
    pub block: ScrollBlock,
    pub behavior: ScrollBehavior,
}

impl ScrollRequest {
    /// Issued once a freshly opened playground has settled: bring its bottom edge
    /// into view.
    pub const REVEAL_PLAYGROUND: Self = Self {
        block: ScrollBlock::End,
        behavior: ScrollBehavior::Smooth,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakoutState {
    /// Container not measured yet, nothing is rendered in breakout mode.
    Uninitialized,
    Measured(BreakoutLayout),
}

impl BreakoutState {
    fn from_inputs(container_offset: Option<i32>, viewport_width: Option<u32>) -> Self {
        match (container_offset, viewport_width) {
            (Some(offset), Some(width)) => Self::Measured(breakout_layout(offset, width)),
            _ => Self::Uninitialized,
        }
    }

    pub fn layout(&self) -> Option<BreakoutLayout> {
        match self {
            Self::Measured(layout) => Some(*layout),
            Self::Uninitialized => None,
        }
    }
}

/// Tracks the two geometry inputs of one playground panel.
///
/// The layout is never stored, only derived from the latest inputs, so repeated
/// observations of the same geometry cannot drift.
#[derive(Clone, Debug, Default)]
pub struct BreakoutController {
    container_offset: Mutable<Option<i32>>,
    viewport_width: Mutable<Option<u32>>,
}

impl BreakoutController {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the container is not mounted (anymore).
    pub fn observe_container_offset(&self, offset: Option<i32>) {
        self.container_offset.set_neq(offset);
    }

    pub fn observe_viewport_width(&self, width: u32) {
        self.viewport_width.set_neq(Some(width));
    }

    pub fn state(&self) -> BreakoutState {
        BreakoutState::from_inputs(self.container_offset.get(), self.viewport_width.get())
    }

    pub fn state_signal(&self) -> impl Signal<Item = BreakoutState> + Unpin + use<> {
        map_ref! {
            let offset = self.container_offset.signal(),
            let width = self.viewport_width.signal() =>
            BreakoutState::from_inputs(*offset, *width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_is_shifted_by_container_offset() {
        assert_eq!(breakout_layout(120, 1280), BreakoutLayout { left: -120, width: 1280 });
        assert_eq!(breakout_layout(0, 800).left_css(), "0px");
        assert_eq!(breakout_layout(48, 800).left_css(), "-48px");
    }

    #[test]
    fn stays_uninitialized_until_container_is_measured() {
        let controller = BreakoutController::new();
        controller.observe_viewport_width(1280);
        assert_eq!(controller.state(), BreakoutState::Uninitialized);
        assert_eq!(controller.state().layout(), None);

        controller.observe_container_offset(Some(120));
        assert_eq!(
            controller.state(),
            BreakoutState::Measured(BreakoutLayout { left: -120, width: 1280 })
        );
    }

    #[test]
    fn viewport_resize_recomputes_width_and_offset() {
        let controller = BreakoutController::new();
        controller.observe_container_offset(Some(120));
        controller.observe_viewport_width(1280);

        // The centered column moves left as the viewport narrows.
        controller.observe_viewport_width(1000);
        controller.observe_container_offset(Some(40));
        assert_eq!(
            controller.state().layout(),
            Some(BreakoutLayout { left: -40, width: 1000 })
        );
    }

    #[test]
    fn unmounting_returns_to_uninitialized() {
        let controller = BreakoutController::new();
        controller.observe_container_offset(Some(12));
        controller.observe_viewport_width(640);
        controller.observe_container_offset(None);
        assert_eq!(controller.state(), BreakoutState::Uninitialized);
    }

    #[test]
    fn repeated_observations_do_not_drift() {
        let controller = BreakoutController::new();
        controller.observe_container_offset(Some(96));
        controller.observe_viewport_width(1440);
        let first = controller.state();
        for _ in 0..10 {
            controller.observe_container_offset(Some(96));
            controller.observe_viewport_width(1440);
        }
        assert_eq!(controller.state(), first);
    }
}
