use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::components;

use crate::app::{App, ChatMessage, Fragment, MessageBody, MessageRole};

/// Primary chat view with header, messages, input, and footer
pub fn render_chat_view(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Chat history
            Constraint::Length(3), // Input
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    if let [header, history, input, footer] = &chunks[..] {
        render_chat_header(f, app, *header);
        render_chat_history(f, app, *history);
        render_chat_input(f, app, *input);
        render_chat_footer(f, app, *footer);
    }
}

/// Styling for a chat message based on its role
struct MessageStyles {
    prefix: String,
    prefix_style: Style,
    content_style: Style,
    role_indicator: &'static str,
}

impl MessageStyles {
    fn for_message(message: &ChatMessage) -> Self {
        match message.role {
            MessageRole::User => Self {
                prefix: message
                    .display_name
                    .clone()
                    .unwrap_or_else(|| "You".to_string()),
                prefix_style: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                content_style: Style::default().fg(Color::White),
                role_indicator: ">",
            },
            MessageRole::Assistant => Self {
                prefix: "Lumi".to_string(),
                prefix_style: Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
                content_style: Style::default().fg(Color::Gray),
                role_indicator: "<",
            },
            MessageRole::System => Self {
                prefix: "System".to_string(),
                prefix_style: Style::default().fg(Color::Yellow),
                content_style: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                role_indicator: "*",
            },
        }
    }
}

fn render_chat_header(f: &mut Frame, app: &App, area: Rect) {
    let header_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = header_block.inner(area);
    f.render_widget(header_block, area);

    let title_spans = vec![
        Span::styled(
            " Lumi ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" Beauty Chat", Style::default().fg(Color::White)),
        Span::styled(
            format!("  v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let title_width: usize = title_spans
        .iter()
        .map(|span| span.content.as_ref().width())
        .sum();

    let status = app
        .last_question
        .as_deref()
        .map(|question| format!("Your last question: \"{question}\" "));

    match status {
        Some(status) => {
            let available = (inner.width as usize).saturating_sub(title_width + 1);
            let status = truncate_to_width(&status, available);
            let status_width = status.width().min(u16::MAX as usize) as u16;
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(status_width)])
                .split(inner);
            if let [title_area, status_area] = &chunks[..] {
                f.render_widget(Paragraph::new(Line::from(title_spans)), *title_area);
                f.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        status,
                        Style::default().fg(Color::DarkGray),
                    )))
                    .alignment(Alignment::Right),
                    *status_area,
                );
            }
        }
        None => {
            f.render_widget(Paragraph::new(Line::from(title_spans)), inner);
        }
    }
}

fn render_chat_history(f: &mut Frame, app: &App, area: Rect) {
    let max_content_width = (area.width.saturating_sub(6)) as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();

    for (index, message) in app.chat_history.iter().enumerate() {
        if index > 0 {
            add_spacing(&mut lines);
        }
        match message.role {
            MessageRole::System => {
                lines.extend(render_system_message(message, max_content_width));
            }
            MessageRole::User | MessageRole::Assistant => {
                lines.extend(render_regular_message(message, max_content_width));
            }
        }
    }

    if app.is_loading {
        if !lines.is_empty() {
            add_spacing(&mut lines);
        }
        add_loading_indicator(&mut lines, app.loading_frame);
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let scroll = calculate_scroll_position(app, lines.len(), visible_height);

    // Lines hidden below the view while scrolled up.
    let max_scroll = lines.len().saturating_sub(visible_height);
    let hidden_below = max_scroll.saturating_sub(scroll as usize);
    let title = if hidden_below > 0 {
        format!(" Conversation [+{hidden_below} lines] ")
    } else {
        " Conversation ".to_string()
    };

    let history = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, Style::default().fg(Color::Magenta)))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .scroll((scroll, 0));
    f.render_widget(history, area);
}

fn render_regular_message(message: &ChatMessage, max_content_width: usize) -> Vec<Line<'static>> {
    let styles = MessageStyles::for_message(message);
    let mut message_lines = Vec::new();

    message_lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", styles.role_indicator),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(styles.prefix.clone(), styles.prefix_style),
        Span::styled(
            format!("  {}", message.timestamp),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    for content_line in wrap_body(&message.body, max_content_width, 1) {
        let mut spans = vec![Span::raw("   ")];
        spans.extend(fragment_spans(&content_line, styles.content_style));
        message_lines.push(Line::from(spans));
    }

    message_lines
}

fn render_system_message(message: &ChatMessage, max_content_width: usize) -> Vec<Line<'static>> {
    let style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);
    wrap_body(&message.body, max_content_width, 1)
        .into_iter()
        .map(|content_line| {
            let mut spans = vec![Span::raw("  ")];
            spans.extend(fragment_spans(&content_line, style));
            Line::from(spans)
        })
        .collect()
}

/// Turns one wrapped line back into spans, bolding emphasized runs.
fn fragment_spans(fragments: &[Fragment], base_style: Style) -> Vec<Span<'static>> {
    fragments
        .iter()
        .map(|fragment| {
            let style = if fragment.emphasis {
                base_style.add_modifier(Modifier::BOLD)
            } else {
                base_style
            };
            Span::styled(fragment.text.clone(), style)
        })
        .collect()
}

fn add_loading_indicator(lines: &mut Vec<Line<'static>>, frame_index: u8) {
    let dots_frames = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
    let dots = dots_frames
        .get(frame_index as usize % dots_frames.len())
        .copied()
        .unwrap_or("⣾");
    let label = "Lumi";
    let pulse = pulse_index_for_frame(frame_index, label.chars().count());

    let mut spans = vec![Span::styled(
        " < ".to_string(),
        Style::default().fg(Color::DarkGray),
    )];
    for (index, character) in label.chars().enumerate() {
        let style = if index == pulse {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(character.to_string(), style));
    }
    spans.push(Span::styled(
        format!("  {dots} thinking"),
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::from(spans));
}

fn pulse_index_for_frame(frame_index: u8, label_length: usize) -> usize {
    if label_length == 0 {
        return 0;
    }
    (frame_index as usize / 2) % label_length
}

fn add_spacing(lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(""));
}

fn calculate_scroll_position(app: &App, total_lines: usize, visible_height: usize) -> u16 {
    if total_lines <= visible_height {
        return 0;
    }
    let max_scroll = total_lines.saturating_sub(visible_height);
    let scroll = if app.chat_auto_scroll {
        max_scroll
    } else {
        max_scroll.saturating_sub(app.chat_scroll_offset)
    };
    scroll.min(u16::MAX as usize) as u16
}

fn render_chat_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, placeholder, show_cursor) = if app.is_loading {
        (" Message (waiting) ", "Waiting for response...", false)
    } else {
        (
            " Message ",
            "Ask about skincare, makeup, or haircare...",
            true,
        )
    };

    let config = components::TextInputConfig::new(app.chat_input.content(), title)
        .with_placeholder(placeholder)
        .with_cursor_visible(show_cursor)
        .with_cursor_position(app.chat_input.cursor_position())
        .with_title_style(Style::default().fg(Color::Cyan));
    components::render_text_input(f, area, config);
}

fn render_chat_footer(f: &mut Frame, app: &App, area: Rect) {
    let footer_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = footer_block.inner(area);
    f.render_widget(footer_block, area);

    let footer = Paragraph::new(Line::from(build_footer_spans(app)));
    match app.status_toast_message() {
        Some(message) => {
            let toast_width = (message.width() + 2).min(inner.width as usize) as u16;
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(toast_width)])
                .split(inner);
            if let [keys_area, toast_area] = &chunks[..] {
                f.render_widget(footer, *keys_area);
                components::render_status_toast(f, *toast_area, &message);
            }
        }
        None => {
            f.render_widget(footer, inner);
        }
    }
}

fn build_footer_spans(app: &App) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled(
            " CHAT ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    if !app.online {
        spans.push(Span::styled(
            " OFFLINE ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  "));
    }

    for (key, action) in [("Enter", "send"), ("↑/↓", "scroll"), ("Esc", "quit")] {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans
}

/// Wraps a message body to `max_width` columns, keeping the emphasis of
/// every fragment intact across line breaks. Hard newlines are honored,
/// leading and trailing blank lines are dropped, and interior runs of
/// blank lines collapse to `max_empty_lines`.
fn wrap_body(body: &MessageBody, max_width: usize, max_empty_lines: usize) -> Vec<Vec<Fragment>> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<Vec<Fragment>> = Vec::new();
    for raw_line in split_on_newlines(&styled_chars(body)) {
        if raw_line.is_empty() {
            lines.push(Vec::new());
        } else {
            lines.extend(wrap_styled_line(&raw_line, max_width));
        }
    }

    trim_empty_edges(&mut lines);
    collapse_empty_lines(&mut lines, max_empty_lines);
    lines
}

/// Flattens the body into one (char, emphasis) stream so wrapping can
/// walk characters without caring about fragment boundaries.
fn styled_chars(body: &MessageBody) -> Vec<(char, bool)> {
    let mut characters = Vec::new();
    for fragment in &body.fragments {
        for character in fragment.text.chars() {
            characters.push((character, fragment.emphasis));
        }
    }
    characters
}

fn split_on_newlines(characters: &[(char, bool)]) -> Vec<Vec<(char, bool)>> {
    let mut result = vec![Vec::new()];
    for &(character, emphasis) in characters {
        if character == '\r' {
            continue;
        }
        if character == '\n' {
            result.push(Vec::new());
        } else if let Some(last) = result.last_mut() {
            last.push((character, emphasis));
        }
    }
    result
}

fn wrap_styled_line(characters: &[(char, bool)], max_width: usize) -> Vec<Vec<Fragment>> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;
    let mut width = 0usize;
    let mut last_space: Option<usize> = None;

    while let Some(&(character, _)) = characters.get(index) {
        let char_width = UnicodeWidthChar::width(character).unwrap_or(0).max(1);

        if character.is_whitespace() {
            last_space = Some(index);
        }

        if width + char_width > max_width && width > 0 {
            // Break at the last space past the line start, else mid-word.
            let end = last_space.filter(|space| *space > start).unwrap_or(index);
            lines.push(chars_to_fragments(trim_end_chars(
                characters.get(start..end).unwrap_or_default(),
            )));
            start = if characters
                .get(end)
                .is_some_and(|(character, _)| character.is_whitespace())
            {
                end + 1
            } else {
                end
            };
            index = start;
            width = 0;
            last_space = None;
            continue;
        }

        width += char_width;
        index += 1;
    }

    if start < characters.len() {
        lines.push(chars_to_fragments(trim_end_chars(
            characters.get(start..).unwrap_or_default(),
        )));
    }

    if lines.is_empty() {
        lines.push(Vec::new());
    }
    lines
}

/// Rebuilds fragments from chars, merging adjacent runs of equal emphasis.
fn chars_to_fragments(characters: &[(char, bool)]) -> Vec<Fragment> {
    let mut fragments: Vec<Fragment> = Vec::new();
    for &(character, emphasis) in characters {
        match fragments.last_mut() {
            Some(fragment) if fragment.emphasis == emphasis => fragment.text.push(character),
            _ => fragments.push(Fragment {
                text: character.to_string(),
                emphasis,
            }),
        }
    }
    fragments
}

fn trim_end_chars(characters: &[(char, bool)]) -> &[(char, bool)] {
    let mut end = characters.len();
    while end > 0
        && characters
            .get(end.saturating_sub(1))
            .is_some_and(|(character, _)| character.is_whitespace())
    {
        end -= 1;
    }
    characters.get(..end).unwrap_or_default()
}

fn line_is_empty(line: &[Fragment]) -> bool {
    line.iter().all(|fragment| fragment.text.is_empty())
}

fn trim_empty_edges(lines: &mut Vec<Vec<Fragment>>) {
    while lines.first().is_some_and(|line| line_is_empty(line)) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line_is_empty(line)) {
        lines.pop();
    }
}

fn collapse_empty_lines(lines: &mut Vec<Vec<Fragment>>, max_empty_lines: usize) {
    let mut collapsed: Vec<Vec<Fragment>> = Vec::new();
    let mut empty_run = 0usize;
    for line in lines.drain(..) {
        if line_is_empty(&line) {
            empty_run += 1;
            if empty_run <= max_empty_lines {
                collapsed.push(line);
            }
        } else {
            empty_run = 0;
            collapsed.push(line);
        }
    }
    *lines = collapsed;
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut result = String::new();
    let mut width = 0usize;
    for character in text.chars() {
        let char_width = UnicodeWidthChar::width(character).unwrap_or(0).max(1);
        if width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(character);
        width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &[Fragment]) -> String {
        line.iter().map(|fragment| fragment.text.as_str()).collect()
    }

    #[test]
    fn test_wrap_body_short_plain_text() {
        let body = MessageBody::plain("hello");
        let lines = wrap_body(&body, 20, 1);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|line| line_text(line)).unwrap(), "hello");
        let first = lines.first().and_then(|line| line.first()).unwrap();
        assert!(!first.emphasis);
    }

    #[test]
    fn test_wrap_body_breaks_at_word_boundary() {
        let body = MessageBody::plain("aaa bbb ccc");
        let lines = wrap_body(&body, 7, 1);
        let texts: Vec<String> = lines.iter().map(|line| line_text(line)).collect();
        assert_eq!(texts, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_wrap_body_keeps_emphasis_across_break() {
        let mut body = MessageBody::default();
        body.push("meet ");
        body.push_emphasis("Ana Marie");
        body.push(" ok");

        let lines = wrap_body(&body, 8, 1);
        assert_eq!(
            lines,
            vec![
                vec![
                    Fragment {
                        text: "meet ".to_string(),
                        emphasis: false,
                    },
                    Fragment {
                        text: "Ana".to_string(),
                        emphasis: true,
                    },
                ],
                vec![
                    Fragment {
                        text: "Marie".to_string(),
                        emphasis: true,
                    },
                    Fragment {
                        text: " ok".to_string(),
                        emphasis: false,
                    },
                ],
            ]
        );
    }

    #[test]
    fn test_wrap_body_splits_long_word_mid_run() {
        let body = MessageBody::plain("abcdefghij");
        let lines = wrap_body(&body, 4, 1);
        let texts: Vec<String> = lines.iter().map(|line| line_text(line)).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_body_honors_hard_newlines_and_collapses_blanks() {
        let body = MessageBody::plain("first\n\n\n\nsecond");
        let lines = wrap_body(&body, 20, 1);
        let texts: Vec<String> = lines.iter().map(|line| line_text(line)).collect();
        assert_eq!(texts, vec!["first", "", "second"]);
    }

    #[test]
    fn test_wrap_body_trims_blank_edges() {
        let body = MessageBody::plain("\n\nmiddle\n\n");
        let lines = wrap_body(&body, 20, 1);
        let texts: Vec<String> = lines.iter().map(|line| line_text(line)).collect();
        assert_eq!(texts, vec!["middle"]);
    }

    #[test]
    fn test_merged_fragments_after_wrap() {
        // Two adjacent plain fragments come back out as one run.
        let mut body = MessageBody::default();
        body.push("ab");
        body.push("cd");
        let lines = wrap_body(&body, 10, 1);
        let first = lines.first().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.first().unwrap().text, "abcd");
    }

    #[test]
    fn test_truncate_to_width_passes_short_text() {
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn test_truncate_to_width_adds_ellipsis() {
        assert_eq!(truncate_to_width("a very long question", 8), "a very …");
    }
}
