//! Token stream pane
//!
//! One row per token plus a trailing end-of-input row, so the cursor always has
//! a row to sit on. Consumed tokens are dimmed.

use super::{inner_height, pane_block, update_scroll};
use crate::parser::token::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Integer => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Operator => Style::default().fg(DEFAULT_THEME.operator),
        TokenKind::LeftParen | TokenKind::RightParen => Style::default().fg(DEFAULT_THEME.primary),
    }
}

/// Render the token pane with `cursor` marking the next unconsumed token
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    cursor: usize,
    is_focused: bool,
    follow: bool,
    scroll: &mut usize,
) {
    let block = pane_block(format!(" Tokens ({}) ", tokens.len()), is_focused);

    let total_rows = tokens.len() + 1;
    let selected = cursor.min(tokens.len());
    let visible_height = inner_height(area);
    update_scroll(scroll, selected, total_rows, visible_height, follow);

    let rows = tokens
        .iter()
        .map(|token| {
            vec![
                Span::styled(format!("{:<6}", token.text), token_style(token.kind)),
                Span::styled(token.kind.to_string(), Style::default().fg(DEFAULT_THEME.comment)),
            ]
        })
        .chain(std::iter::once(vec![Span::styled(
            "<end>",
            Style::default().fg(DEFAULT_THEME.comment),
        )]));

    let items: Vec<ListItem> = rows
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, content)| {
            let is_current = idx == selected;
            let marker = if is_current { "▶ " } else { "  " };

            let mut spans = vec![
                Span::styled(
                    marker,
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{:>3} ", idx), Style::default().fg(DEFAULT_THEME.comment)),
            ];
            spans.extend(content);

            let item = ListItem::new(Line::from(spans));
            if is_current {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else if idx < selected {
                item.style(Style::default().add_modifier(Modifier::DIM))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
