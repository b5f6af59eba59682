// Scroll state for the transcript
//
// Offsets count wrapped rows, not transcript lines. Auto-follow keeps the
// view pinned to the newest output; scrolling up releases it and reaching
// the bottom again re-engages it.

/// Scroll position over a list of rows
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Row index at top of viewport
    offset: usize,

    /// Total number of rows in content
    total: usize,

    /// Number of rows visible in viewport
    viewport: usize,

    /// Whether new content keeps the view at the bottom
    pub auto_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        // If auto-following, snap to bottom
        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            // Clamp offset to valid range
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by `rows`
    /// Disables auto-follow (user took control)
    pub fn scroll_up(&mut self, rows: usize) {
        if self.offset > 0 {
            self.offset = self.offset.saturating_sub(rows);
            self.auto_follow = false;
        }
    }

    /// Scroll down by `rows`
    /// Re-enables auto-follow if we reach the bottom
    pub fn scroll_down(&mut self, rows: usize) {
        self.offset = (self.offset + rows).min(self.max_offset());
        if self.offset >= self.max_offset() {
            self.auto_follow = true;
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        self.scroll_up(self.viewport.max(1));
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        self.scroll_down(self.viewport.max(1));
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = self.max_offset() == 0;
    }

    /// Jump to bottom (and enable auto-follow)
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.auto_follow = true;
    }

    /// Toggle auto-follow mode
    pub fn toggle_auto_follow(&mut self) {
        self.auto_follow = !self.auto_follow;
        if self.auto_follow {
            self.offset = self.max_offset();
        }
    }

    /// Get current scroll offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    pub fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
