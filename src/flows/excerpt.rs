//! Excerpt selection - head and tail windows of the corpus

/// Default excerpt window in lines
pub const DEFAULT_WINDOW: usize = 1500;

/// Head and tail slices of a line sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Excerpt<'a> {
    pub head: &'a [String],
    pub tail: &'a [String],
}

/// Select the first `window` lines and, when the sequence is longer than the
/// window, the last `window` lines
///
/// The tail is empty when the head already covers everything. The two may
/// overlap when the sequence is shorter than twice the window.
pub fn select_excerpt(lines: &[String], window: usize) -> Excerpt<'_> {
    let total = lines.len();
    let head = &lines[..total.min(window)];
    let tail = if total > window {
        &lines[total - window..]
    } else {
        &lines[total..]
    };

    Excerpt { head, tail }
}
