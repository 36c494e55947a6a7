/// Scroll-driven reading progress, 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReadingProgress {
    percent: f32,
}

impl ReadingProgress {
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Hidden until the reader has scrolled
    pub fn is_visible(&self) -> bool {
        self.percent > 0.0
    }

    /// Keeps the last value when the content does not scroll.
    pub fn on_scroll(&mut self, scroll_top: f32, content_height: f32, viewport_height: f32) {
        let scrollable = content_height - viewport_height;
        if scrollable > 0.0 {
            self.percent = (scroll_top.max(0.0) / scrollable * 100.0).min(100.0);
        }
    }
}
