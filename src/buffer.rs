// Output buffer - bounded transcript of terminal lines
//
// Append-only ring: once the buffer holds more than `capacity` lines the
// oldest ones are evicted. Eviction is the defined behavior, not an error.

use crate::lines::{Line, LineId};
use std::collections::VecDeque;

/// Default number of lines kept in the transcript
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Bounded, oldest-first-evicting sequence of lines
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    lines: VecDeque<Line>,
    capacity: usize,
    /// Total lines evicted so far
    evicted: usize,
}

impl OutputBuffer {
    /// Create an empty buffer holding at most `capacity` lines
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(DEFAULT_MAX_LINES)),
            capacity,
            evicted: 0,
        }
    }

    /// Append a line, evicting the oldest if over capacity
    ///
    /// Returns the ids of evicted lines so render caches can drop them.
    pub fn push(&mut self, line: Line) -> Vec<LineId> {
        self.lines.push_back(line);
        self.evict()
    }

    /// Append lines in order
    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) -> Vec<LineId> {
        self.lines.extend(lines);
        self.evict()
    }

    fn evict(&mut self) -> Vec<LineId> {
        let mut evicted = Vec::new();
        while self.lines.len() > self.capacity {
            if let Some(line) = self.lines.pop_front() {
                evicted.push(line.id);
            }
        }
        self.evicted += evicted.len();
        evicted
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of lines evicted since creation
    pub fn evicted(&self) -> usize {
        self.evicted
    }

    /// Lines from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Line> + ExactSizeIterator {
        self.lines.iter()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::Fragment;

    fn numbered(n: u64) -> Line {
        Line::new(LineId(n), vec![Fragment::text(format!("line {}", n))])
    }

    #[test]
    fn test_keeps_most_recent_lines_in_order() {
        let mut buffer = OutputBuffer::new(3);
        let evicted = buffer.extend((1..=5).map(numbered));

        assert_eq!(buffer.len(), 3);
        let texts: Vec<String> = buffer.iter().map(Line::text_content).collect();
        assert_eq!(texts, vec!["line 3", "line 4", "line 5"]);
        assert_eq!(evicted, vec![LineId(1), LineId(2)]);
        assert_eq!(buffer.evicted(), 2);
    }

    #[test]
    fn test_push_under_capacity_evicts_nothing() {
        let mut buffer = OutputBuffer::new(10);
        assert!(buffer.push(numbered(1)).is_empty());
        assert!(buffer.push(numbered(2)).is_empty());
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.iter().last().map(|l| l.id), Some(LineId(2)));
    }

    #[test]
    fn test_push_at_capacity_evicts_oldest() {
        let mut buffer = OutputBuffer::new(2);
        buffer.push(numbered(1));
        buffer.push(numbered(2));
        assert_eq!(buffer.push(numbered(3)), vec![LineId(1)]);
        assert_eq!(buffer.iter().next().map(|l| l.id), Some(LineId(2)));
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut buffer = OutputBuffer::new(0);
        buffer.push(numbered(1));
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.evicted(), 1);
    }

    #[test]
    fn test_default_capacity() {
        let buffer = OutputBuffer::default();
        assert_eq!(buffer.capacity(), DEFAULT_MAX_LINES);
        assert_eq!(buffer.len(), 0);
    }
}
