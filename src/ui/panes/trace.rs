//! Parse trace pane

use super::{inner_height, pane_block, update_scroll};
use crate::trace::{ParseTrace, TraceEvent, TraceStep};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn step_style(step: &TraceStep) -> Style {
    match step.event {
        TraceEvent::Enter(_) | TraceEvent::Exit(_) => Style::default().fg(DEFAULT_THEME.rule),
        TraceEvent::Consume(_) => Style::default().fg(DEFAULT_THEME.fg),
        TraceEvent::Leaf(_) => Style::default().fg(DEFAULT_THEME.number),
        TraceEvent::Combine(_) => Style::default().fg(DEFAULT_THEME.operator),
        TraceEvent::Fail(_) => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
    }
}

/// Title showing the active rule path at the current step
fn trace_title(trace: &ParseTrace, position: usize) -> String {
    let path = trace
        .get(position)
        .map(|step| {
            step.rule_stack
                .iter()
                .map(|rule| rule.to_string())
                .collect::<Vec<_>>()
                .join(" › ")
        })
        .filter(|path| !path.is_empty());

    let truncated = if trace.is_truncated() { " [truncated]" } else { "" };
    match path {
        Some(path) => format!(" Trace: {}{} ", path, truncated),
        None => format!(" Trace{} ", truncated),
    }
}

/// Render the trace pane with the step at `position` highlighted
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &ParseTrace,
    position: usize,
    is_focused: bool,
    follow: bool,
    scroll: &mut usize,
) {
    let block = pane_block(trace_title(trace, position), is_focused);

    if trace.is_empty() {
        let paragraph = Paragraph::new("(no trace recorded)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = inner_height(area);
    update_scroll(scroll, position, trace.len(), visible_height, follow);

    let items: Vec<ListItem> = trace
        .steps()
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, step)| {
            let indent = "  ".repeat(step.depth().saturating_sub(1));
            let text = format!("{:>4} {}{}", idx + 1, indent, step);
            let style = if idx == position {
                step_style(step)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                step_style(step)
            };
            ListItem::new(text).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Rule;

    #[test]
    fn test_title_shows_rule_path() {
        let mut trace = ParseTrace::new();
        trace.push(TraceStep {
            event: TraceEvent::Enter(Rule::Factor),
            cursor: 0,
            rule_stack: vec![Rule::Expression, Rule::Term, Rule::Factor],
        });
        assert_eq!(trace_title(&trace, 0), " Trace: expression › term › factor ");
        assert_eq!(trace_title(&trace, 5), " Trace ");
    }
}
