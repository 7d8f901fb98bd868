//! Logical-line joining
//!
//! Form definitions are physically line-oriented but one item may span
//! several physical lines: a line that begins with leading whitespace in the
//! untrimmed source continues the previous logical line. Blank lines (empty
//! after trimming) are discarded and never break a continuation run.

/// Join physical lines into logical lines.
///
/// Rules:
/// - lines that are empty after trimming are dropped;
/// - a line starting with a space or tab appends its trimmed content to the
///   current accumulator, separated by a single space;
/// - any other line flushes the accumulator and starts a new logical line.
///
/// An indented line at the very start of the input (no accumulator yet)
/// simply opens the first logical line.
pub fn join_logical_lines(source: &str) -> Vec<String> {
    let mut logical = Vec::new();
    let mut current = String::new();

    for raw in source.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let continuation = raw.starts_with(' ') || raw.starts_with('\t');
        if continuation && !current.is_empty() {
            current.push(' ');
            current.push_str(trimmed);
        } else {
            if !current.is_empty() {
                logical.push(std::mem::take(&mut current));
            }
            current.push_str(trimmed);
        }
    }
    if !current.is_empty() {
        logical.push(current);
    }
    logical
}
