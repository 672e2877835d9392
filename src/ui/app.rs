//! Main TUI application state and logic

use crate::parser::ast::AstNode;
use crate::parser::parse::ParseError;
use crate::parser::token::Token;
use crate::trace::{ParseTrace, TraceStep};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tokens,
    Trace,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (left to right, wrapping)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tokens => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Tokens,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Trace => FocusedPane::Tokens,
            FocusedPane::Tree => FocusedPane::Trace,
        }
    }
}

/// The main application state
pub struct App {
    /// Tokens that were fed to the parser
    pub tokens: Vec<Token>,

    /// Recorded parse steps being replayed
    pub trace: ParseTrace,

    /// Final result of the parse
    pub outcome: Result<AstNode, ParseError>,

    /// Spaces per level in the tree pane
    pub indent_width: usize,

    /// Index of the current trace step
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tokens_scroll: usize,
    pub trace_scroll: usize,
    pub tree_scroll: usize,

    /// Scroll the step-driven panes to the current step on the next render
    pub follow_position: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(
        tokens: Vec<Token>,
        trace: ParseTrace,
        outcome: Result<AstNode, ParseError>,
        indent_width: usize,
    ) -> Self {
        App {
            tokens,
            trace,
            outcome,
            indent_width,
            position: 0,
            focused_pane: FocusedPane::Trace,
            tokens_scroll: 0,
            trace_scroll: 0,
            tree_scroll: 0,
            follow_position: true,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(500) {
                if self.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// The step being displayed, if any steps were recorded
    pub fn current_step(&self) -> Option<&TraceStep> {
        self.trace.get(self.position)
    }

    /// Cursor position in the token stream at the current step
    pub fn cursor(&self) -> usize {
        self.current_step().map_or(0, |step| step.cursor)
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(45),
                Constraint::Percentage(30),
            ])
            .split(main_chunks[0]);

        let follow = std::mem::take(&mut self.follow_position);

        super::panes::render_tokens_pane(
            frame,
            columns[0],
            &self.tokens,
            self.cursor(),
            self.focused_pane == FocusedPane::Tokens,
            follow,
            &mut self.tokens_scroll,
        );

        super::panes::render_trace_pane(
            frame,
            columns[1],
            &self.trace,
            self.position,
            self.focused_pane == FocusedPane::Trace,
            follow,
            &mut self.trace_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[2],
            &self.outcome,
            self.indent_width,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.position,
            self.trace.len(),
            self.outcome.is_err(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.step_forward() {
                        break;
                    }
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: already at the first step".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: already at the last step".to_string()
                };
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or_else(Instant::now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.jump_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Advance one step; false if already at the last step
    pub fn step_forward(&mut self) -> bool {
        if self.position + 1 < self.trace.len() {
            self.position += 1;
            self.follow_position = true;
            true
        } else {
            false
        }
    }

    /// Go back one step; false if already at the first step
    pub fn step_backward(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            self.follow_position = true;
            true
        } else {
            false
        }
    }

    pub fn jump_to_start(&mut self) {
        self.position = 0;
        self.follow_position = true;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.trace.len().saturating_sub(1);
        self.follow_position = true;
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Trace => &mut self.trace_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::{ParseOptions, Parser};
    use crate::trace::TraceEvent;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app_for(tokens: Vec<Token>) -> App {
        let options = ParseOptions {
            trace: true,
            ..ParseOptions::default()
        };
        let mut parser = Parser::with_options(tokens.clone(), options);
        let outcome = parser.parse();
        let trace = parser.take_trace().unwrap_or_default();
        App::new(tokens, trace, outcome, 4)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_stepping_moves_cursor() {
        let mut app = app_for(vec![Token::integer("1"), Token::operator("+"), Token::integer("2")]);
        assert_eq!(app.position, 0);
        assert_eq!(app.cursor(), 0);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.position, app.trace.len() - 1);
        assert_eq!(app.cursor(), 3);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.position, app.trace.len() - 1);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.position, 0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.position, 0);
    }

    #[test]
    fn test_number_keys_step_n_times() {
        let mut app = app_for(vec![Token::integer("7")]);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.position, 3);
        assert_eq!(app.status_message, "Stepped forward 3 step(s)");
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app_for(vec![Token::integer("7")]);
        assert_eq!(app.focused_pane, FocusedPane::Trace);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
    }

    #[test]
    fn test_quit() {
        let mut app = app_for(vec![Token::integer("7")]);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_successful_parse() {
        let mut app = app_for(vec![Token::integer("1"), Token::operator("+"), Token::integer("2")]);
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Abstract Syntax Tree"));
        assert!(text.contains("Tokens (3)"));
        assert!(text.contains("enter expression"));
        assert!(!app.follow_position);
    }

    #[test]
    fn test_render_failed_parse() {
        let mut app = app_for(vec![Token::left_paren(), Token::integer("2")]);
        assert!(matches!(
            app.trace.steps().last().map(|s| &s.event),
            Some(TraceEvent::Fail(_))
        ));

        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        assert!(screen_text(&terminal).contains("Syntax Error"));
    }
}
