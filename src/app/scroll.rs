use crate::app::App;

/// Lines covered by one PageUp/PageDown step.
const PAGE_SCROLL_LINES: usize = 20;

/// Far past any plausible transcript; the render pass clamps it to the
/// real maximum, which lands the view on the oldest line.
const TOP_JUMP_OFFSET: usize = 10000;

/// Transcript scrollback. `chat_scroll_offset` counts lines up from the
/// bottom, so 0 is the live tail; `chat_auto_scroll` marks whether the
/// view follows new replies or stays anchored where the user left it.
impl App {
    pub fn scroll_chat_up_lines(&mut self, lines: usize) {
        // Moving into history stops the view from following replies.
        self.chat_auto_scroll = false;
        self.show_status_toast("SCROLLED");
        self.chat_scroll_offset = self.chat_scroll_offset.saturating_add(lines);
    }

    pub fn scroll_chat_down_lines(&mut self, lines: usize) {
        self.show_status_toast("SCROLLED");
        if self.chat_scroll_offset > 0 {
            self.chat_scroll_offset = self.chat_scroll_offset.saturating_sub(lines);
        }
        if self.chat_scroll_offset == 0 {
            // Back at the tail; resume following new replies.
            self.chat_auto_scroll = true;
        }
    }

    pub fn scroll_chat_up_page(&mut self) {
        self.scroll_chat_up_lines(PAGE_SCROLL_LINES);
    }

    pub fn scroll_chat_down_page(&mut self) {
        self.scroll_chat_down_lines(PAGE_SCROLL_LINES);
    }

    pub fn jump_to_top(&mut self) {
        self.chat_auto_scroll = false;
        self.show_status_toast("SCROLLED");
        self.chat_scroll_offset = TOP_JUMP_OFFSET;
    }

    pub fn jump_to_bottom(&mut self) {
        self.show_status_toast("SCROLLED");
        self.reset_chat_scroll();
    }

    /// Bottom anchor without the toast; sending a message calls this so
    /// the user's own text is always in view.
    pub fn reset_chat_scroll(&mut self) {
        self.chat_scroll_offset = 0;
        self.chat_auto_scroll = true;
    }
}

#[cfg(test)]
mod tests {
    use super::TOP_JUMP_OFFSET;
    use crate::app::App;

    #[test]
    fn test_scrolling_up_disables_auto_scroll() {
        let mut app = App::new();
        app.scroll_chat_up_lines(3);
        assert_eq!(app.chat_scroll_offset, 3);
        assert!(!app.chat_auto_scroll);
        assert_eq!(app.status_toast_message(), Some("SCROLLED"));
    }

    #[test]
    fn test_scrolling_back_to_bottom_reenables_auto_scroll() {
        let mut app = App::new();
        app.scroll_chat_up_lines(10);
        app.scroll_chat_down_lines(3);
        assert_eq!(app.chat_scroll_offset, 7);
        assert!(!app.chat_auto_scroll);
        app.scroll_chat_down_lines(7);
        assert_eq!(app.chat_scroll_offset, 0);
        assert!(app.chat_auto_scroll);
    }

    #[test]
    fn test_page_scroll_covers_twenty_lines() {
        let mut app = App::new();
        app.scroll_chat_up_page();
        assert_eq!(app.chat_scroll_offset, 20);
        app.scroll_chat_down_page();
        assert_eq!(app.chat_scroll_offset, 0);
        assert!(app.chat_auto_scroll);
    }

    #[test]
    fn test_jump_to_top_then_bottom() {
        let mut app = App::new();
        app.jump_to_top();
        assert_eq!(app.chat_scroll_offset, TOP_JUMP_OFFSET);
        assert!(!app.chat_auto_scroll);
        app.jump_to_bottom();
        assert_eq!(app.chat_scroll_offset, 0);
        assert!(app.chat_auto_scroll);
    }
}
