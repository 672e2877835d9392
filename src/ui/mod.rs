//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! Replays a recorded [`ParseTrace`] step by step. The UI is organized into
//! three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane (tokens,
//!   trace, tree, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the tokens, the
//! trace and the parse outcome, then call [`App::run`] to start the event loop.
//!
//! [`ParseTrace`]: crate::trace::ParseTrace
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
