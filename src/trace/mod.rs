// Step-by-step record of a parse, for replay and debugging

use crate::parser::ast::BinOp;
use crate::parser::constants::DEFAULT_TRACE_LIMIT;
use crate::parser::token::Token;
use std::fmt;

/// Grammar rule being evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Expression,
    Term,
    Factor,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rule::Expression => "expression",
            Rule::Term => "term",
            Rule::Factor => "factor",
        };
        f.write_str(name)
    }
}

/// What happened at a single step of the parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Enter(Rule),
    Consume(Token),
    Leaf(String),
    Combine(BinOp),
    Exit(Rule),
    Fail(String),
}

/// One recorded step, with the parser state at the moment it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub event: TraceEvent,
    /// Cursor position after the event
    pub cursor: usize,
    /// Active rules, outermost first
    pub rule_stack: Vec<Rule>,
}

impl TraceStep {
    pub fn depth(&self) -> usize {
        self.rule_stack.len()
    }
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.event {
            TraceEvent::Enter(rule) => write!(f, "enter {}", rule),
            TraceEvent::Consume(token) => {
                write!(f, "Parsing token: type={}, value={}", token.kind, token.text)
            }
            TraceEvent::Leaf(text) => write!(f, "leaf {}", text),
            TraceEvent::Combine(op) => write!(f, "combine {}", op),
            TraceEvent::Exit(rule) => write!(f, "exit {}", rule),
            TraceEvent::Fail(message) => write!(f, "fail: {}", message),
        }
    }
}

/// Bounded history of trace steps.
///
/// Once `max_steps` is reached further steps are dropped and the trace is
/// marked truncated; recording never fails the parse itself.
#[derive(Debug, Clone)]
pub struct ParseTrace {
    steps: Vec<TraceStep>,
    max_steps: usize,
    truncated: bool,
}

impl ParseTrace {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_TRACE_LIMIT)
    }

    pub fn with_limit(max_steps: usize) -> Self {
        ParseTrace {
            steps: Vec::new(),
            max_steps,
            truncated: false,
        }
    }

    /// Add a step to history
    pub fn push(&mut self, step: TraceStep) {
        if self.steps.len() >= self.max_steps {
            self.truncated = true;
            return;
        }
        self.steps.push(step);
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&TraceStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn limit(&self) -> usize {
        self.max_steps
    }
}

impl Default for ParseTrace {
    fn default() -> Self {
        Self::new()
    }
}
