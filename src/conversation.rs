use crate::agents::{ChatMessage, MessageRole};

/// Session-scoped, append-only record of the turns exchanged with the
/// worker. Seeded with a single system entry holding the behavioral
/// prompt; user/assistant pairs are appended only after a turn succeeds.
/// Nothing here is persisted; only the profile outlives the session.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(prompt)],
        }
    }

    /// The behavioral prompt from the seed entry, empty if unseeded.
    pub fn system_prompt(&self) -> &str {
        self.messages
            .first()
            .filter(|msg| msg.role == MessageRole::System)
            .map_or("", |msg| msg.content.as_str())
    }

    /// Records a completed exchange. Failed turns never reach this.
    pub fn append_turn(&mut self, user_text: impl Into<String>, assistant_text: impl Into<String>) {
        self.messages.push(ChatMessage::user(user_text));
        self.messages.push(ChatMessage::assistant(assistant_text));
    }

    /// The user/assistant history without the system seed.
    pub fn non_system(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages
            .iter()
            .filter(|msg| msg.role != MessageRole::System)
    }

    /// Assembles the outbound payload for one turn: the behavioral
    /// prompt re-supplied fresh, the context note, every prior
    /// non-system message, then the new user text. The note itself is
    /// never appended to the record.
    pub fn turn_request(&self, context_note: &str, user_text: &str) -> Vec<ChatMessage> {
        let mut turn = Vec::with_capacity(self.messages.len() + 3);
        turn.push(ChatMessage::system(self.system_prompt()));
        turn.push(ChatMessage::system(context_note));
        turn.extend(self.non_system().cloned());
        turn.push(ChatMessage::user(user_text));
        turn
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_system_prompt() {
        let conversation = Conversation::with_system_prompt("be helpful");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.system_prompt(), "be helpful");
        assert_eq!(conversation.non_system().count(), 0);
    }

    #[test]
    fn test_append_turn_keeps_order() {
        let mut conversation = Conversation::with_system_prompt("be helpful");
        conversation.append_turn("q1", "a1");
        conversation.append_turn("q2", "a2");
        let contents: Vec<&str> = conversation
            .non_system()
            .map(|msg| msg.content.as_str())
            .collect();
        assert_eq!(contents, vec!["q1", "a1", "q2", "a2"]);
    }

    #[test]
    fn test_turn_request_shape() {
        let mut conversation = Conversation::with_system_prompt("be helpful");
        conversation.append_turn("q1", "a1");
        let turn = conversation.turn_request("note", "q2");

        assert_eq!(turn.len(), 5);
        assert_eq!(turn.first(), Some(&ChatMessage::system("be helpful")));
        assert_eq!(turn.get(1), Some(&ChatMessage::system("note")));
        assert_eq!(turn.get(2), Some(&ChatMessage::user("q1")));
        assert_eq!(turn.get(3), Some(&ChatMessage::assistant("a1")));
        assert_eq!(turn.last(), Some(&ChatMessage::user("q2")));
    }

    #[test]
    fn test_turn_request_never_duplicates_the_seed() {
        let mut conversation = Conversation::with_system_prompt("be helpful");
        conversation.append_turn("q1", "a1");
        let _ = conversation.turn_request("note", "q2");
        let _ = conversation.turn_request("other note", "q3");
        // Building requests must not grow the record.
        assert_eq!(conversation.len(), 3);
        let system_entries = conversation.len() - conversation.non_system().count();
        assert_eq!(system_entries, 1);
    }

    #[test]
    fn test_first_turn_request_has_no_history() {
        let conversation = Conversation::with_system_prompt("be helpful");
        let turn = conversation.turn_request("note", "hello");
        assert_eq!(turn.len(), 3);
        assert_eq!(turn.last(), Some(&ChatMessage::user("hello")));
    }
}
