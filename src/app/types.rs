/// A run of message text with uniform styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub emphasis: bool,
}

/// Message content as a list of styled fragments. Fragment text is only
/// ever data: nothing in it is parsed as markup, so whatever the user or
/// the worker sends is rendered literally, angle brackets included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageBody {
    pub fragments: Vec<Fragment>,
}

impl MessageBody {
    pub fn plain(text: impl Into<String>) -> Self {
        let mut body = Self::default();
        body.push(text);
        body
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.fragments.push(Fragment {
            text: text.into(),
            emphasis: false,
        });
    }

    pub fn push_emphasis(&mut self, text: impl Into<String>) {
        self.fragments.push(Fragment {
            text: text.into(),
            emphasis: true,
        });
    }

    /// The unstyled text, fragments concatenated in order.
    #[allow(dead_code)]
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|fragment| fragment.text.as_str())
            .collect()
    }
}

impl From<String> for MessageBody {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<&str> for MessageBody {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

/// A transcript message with role, styled body, and timestamp
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub body: MessageBody,
    pub timestamp: String,
    /// Label shown in place of "You" once the profile has a name.
    pub display_name: Option<String>,
}

impl ChatMessage {
    fn now_timestamp() -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }

    pub fn user(body: impl Into<MessageBody>, display_name: Option<String>) -> Self {
        Self {
            role: MessageRole::User,
            body: body.into(),
            timestamp: Self::now_timestamp(),
            display_name,
        }
    }

    pub fn assistant(body: impl Into<MessageBody>) -> Self {
        Self {
            role: MessageRole::Assistant,
            body: body.into(),
            timestamp: Self::now_timestamp(),
            display_name: None,
        }
    }

    pub fn system(body: impl Into<MessageBody>) -> Self {
        Self {
            role: MessageRole::System,
            body: body.into(),
            timestamp: Self::now_timestamp(),
            display_name: None,
        }
    }
}

/// Role of a transcript message
#[derive(Debug, Clone, PartialEq)]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone)]
pub struct StatusToast {
    pub message: String,
    pub created_at: std::time::Instant,
}

impl StatusToast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self, duration: std::time::Duration) -> bool {
        self.created_at.elapsed() >= duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_body_is_one_fragment() {
        let body = MessageBody::plain("hello");
        assert_eq!(body.fragments.len(), 1);
        assert!(!body.fragments.first().unwrap().emphasis);
        assert_eq!(body.text(), "hello");
    }

    #[test]
    fn test_mixed_fragments_concatenate_in_order() {
        let mut body = MessageBody::plain("Nice to meet you, ");
        body.push_emphasis("Ana");
        body.push("!");
        assert_eq!(body.text(), "Nice to meet you, Ana!");
        let emphasized: Vec<bool> = body.fragments.iter().map(|f| f.emphasis).collect();
        assert_eq!(emphasized, vec![false, true, false]);
    }

    #[test]
    fn test_markup_like_text_stays_literal() {
        let body = MessageBody::plain("<script>alert('x')</script>");
        assert_eq!(body.text(), "<script>alert('x')</script>");
        assert_eq!(body.fragments.len(), 1);
    }

    #[test]
    fn test_user_message_carries_display_name() {
        let message = ChatMessage::user("hola", Some("Ana".to_string()));
        assert_eq!(message.role, MessageRole::User);
        assert_eq!(message.display_name.as_deref(), Some("Ana"));
    }
}
