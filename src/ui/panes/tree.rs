//! AST pane: the printed tree, or the error that stopped the parse

use super::{inner_height, pane_block, update_scroll};
use crate::parser::ast::{AstNode, BinOp};
use crate::parser::parse::ParseError;
use crate::parser::printer::print;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outcome: &Result<AstNode, ParseError>,
    indent_width: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Abstract Syntax Tree ".to_string(), is_focused);

    let ast = match outcome {
        Ok(ast) => ast,
        Err(err) => {
            let paragraph = Paragraph::new(format!("Syntax Error: {}", err))
                .block(block)
                .style(
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let visible_height = inner_height(area);
    update_scroll(scroll, 0, ast.node_count(), visible_height, false);

    let lines: Vec<Line> = print(ast, 0)
        .skip(*scroll)
        .take(visible_height)
        .map(|line| {
            let color = if BinOp::from_symbol(line.value).is_some() {
                DEFAULT_THEME.operator
            } else {
                DEFAULT_THEME.number
            };
            Line::styled(line.render(indent_width), Style::default().fg(color))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
