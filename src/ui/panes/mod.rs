//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tokens`]: Token stream with the parse cursor at the current step
//! - [`trace`]: Recorded parse steps, current step highlighted
//! - [`tree`]: The resulting AST, or the parse error
//! - [`status`]: Status bar with keybindings and replay position
//!
//! Each pane module exports a primary `render_*` function. Panes are stateless
//! apart from the scroll offset the caller passes in.

pub mod status;
pub mod tokens;
pub mod trace;
pub mod tree;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use trace::render_trace_pane;
pub use tree::render_tree_pane;

/// Bordered block with the focus-dependent border style
pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, min 1
pub(crate) fn inner_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Scroll so that `selected` is inside the visible window, then clamp.
///
/// With `follow` unset only the clamp is applied, so manual scrolling sticks.
pub(crate) fn update_scroll(
    scroll: &mut usize,
    selected: usize,
    total: usize,
    visible: usize,
    follow: bool,
) {
    if follow {
        if selected < *scroll {
            *scroll = selected;
        } else if selected >= *scroll + visible {
            *scroll = selected + 1 - visible;
        }
    }

    if total > visible {
        *scroll = (*scroll).min(total - visible);
    } else {
        *scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_brings_selection_into_view() {
        let mut scroll = 0;
        update_scroll(&mut scroll, 12, 20, 5, true);
        assert_eq!(scroll, 8);

        update_scroll(&mut scroll, 3, 20, 5, true);
        assert_eq!(scroll, 3);
    }

    #[test]
    fn test_clamp_without_follow() {
        let mut scroll = 50;
        update_scroll(&mut scroll, 0, 20, 5, false);
        assert_eq!(scroll, 15);

        let mut scroll = 4;
        update_scroll(&mut scroll, 0, 3, 5, false);
        assert_eq!(scroll, 0);
    }
}
