// Default limits for loading, parsing and printing

/// Spaces per depth level when printing the tree
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Maximum parenthesis nesting accepted before the parser gives up
/// instead of recursing further
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Maximum number of trace steps kept in a single parse trace
pub const DEFAULT_TRACE_LIMIT: usize = 10_000;
