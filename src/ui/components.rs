use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Configuration for text input rendering
pub struct TextInputConfig<'a> {
    pub content: &'a str,
    pub title: &'a str,
    pub title_style: Option<Style>,
    pub placeholder: Option<&'a str>,
    pub show_cursor: bool,
    pub cursor_position: Option<usize>,
}

impl<'a> TextInputConfig<'a> {
    /// Creates a new text input configuration
    pub fn new(content: &'a str, title: &'a str) -> Self {
        Self {
            content,
            title,
            title_style: None,
            placeholder: None,
            show_cursor: true,
            cursor_position: None,
        }
    }

    /// Sets the placeholder text
    pub fn with_placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Sets whether to show the cursor
    pub fn with_cursor_visible(mut self, show_cursor: bool) -> Self {
        self.show_cursor = show_cursor;
        self
    }

    /// Sets title style
    pub fn with_title_style(mut self, title_style: Style) -> Self {
        self.title_style = Some(title_style);
        self
    }

    /// Sets cursor position (character index)
    pub fn with_cursor_position(mut self, cursor_position: usize) -> Self {
        self.cursor_position = Some(cursor_position);
        self
    }
}

/// Renders a single-line text input with a blinking cursor and
/// horizontal windowing around the cursor when content overflows.
pub fn render_text_input(frame: &mut Frame, area: Rect, config: TextInputConfig) {
    let cursor_indicator = if config.show_cursor { "█" } else { "" };

    let line = if config.content.is_empty() {
        let placeholder = config.placeholder.unwrap_or("");
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                cursor_indicator,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let inner_width = area.width.saturating_sub(2) as usize;
        let prefix_width = 2;
        let cursor_width = if config.show_cursor { 1 } else { 0 };
        let available_width = inner_width
            .saturating_sub(prefix_width + cursor_width)
            .max(1);
        let cursor_index = config
            .cursor_position
            .unwrap_or_else(|| config.content.chars().count());
        let (start, end) = visible_window(config.content, cursor_index, available_width);
        let visible_content = slice_by_chars(config.content, start, end);
        let relative_cursor = cursor_index
            .saturating_sub(start)
            .min(visible_content.chars().count());
        let before = slice_by_chars(&visible_content, 0, relative_cursor);
        let after = slice_by_chars(
            &visible_content,
            relative_cursor,
            visible_content.chars().count(),
        );

        let mut spans = vec![Span::styled("> ", Style::default().fg(Color::Cyan))];
        spans.push(Span::styled(before, Style::default().fg(Color::White)));
        if config.show_cursor {
            spans.push(Span::styled(
                cursor_indicator,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        spans.push(Span::styled(after, Style::default().fg(Color::White)));
        Line::from(spans)
    };

    let border_color = if config.content.is_empty() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    frame.render_widget(
        Paragraph::new(line).block({
            let title_style = config.title_style.unwrap_or_else(Style::default);
            let title = Line::from(vec![Span::styled(config.title, title_style)]);
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color))
        }),
        area,
    );
}

/// Picks the char range to show so the cursor always stays in view.
fn visible_window(content: &str, cursor: usize, width: usize) -> (usize, usize) {
    let length = content.chars().count();
    let cursor = cursor.min(length);
    if length <= width {
        return (0, length);
    }
    let mut start = cursor.saturating_sub(width.saturating_sub(1));
    if start + width > length {
        start = length.saturating_sub(width);
    }
    (start, start + width)
}

fn slice_by_chars(value: &str, start: usize, end: usize) -> String {
    value
        .chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

pub fn render_status_toast(frame: &mut Frame, area: Rect, message: &str) {
    let toast = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {} ", message),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )]))
    .alignment(ratatui::layout::Alignment::Right);

    frame.render_widget(toast, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_window_fits_short_content() {
        assert_eq!(visible_window("hola", 4, 10), (0, 4));
    }

    #[test]
    fn test_visible_window_follows_cursor_at_end() {
        // 10 chars, width 4: show the last 4 with the cursor at the edge.
        assert_eq!(visible_window("0123456789", 10, 4), (6, 10));
    }

    #[test]
    fn test_visible_window_mid_content() {
        let (start, end) = visible_window("0123456789", 5, 4);
        assert_eq!(end - start, 4);
        assert!((start..=end).contains(&5));
    }

    #[test]
    fn test_slice_by_chars_is_char_safe() {
        assert_eq!(slice_by_chars("José y Ana", 0, 4), "José");
        assert_eq!(slice_by_chars("José y Ana", 5, 6), "y");
    }
}
