use super::WorkerEvent;
use crate::agents::ChatMessage as WireMessage;
use crate::app::App;
use crate::app::types::{ChatMessage, MessageBody};
use crate::services::{context, names};

impl App {
    /// Handles a composer submit. Ordering matters here: the user bubble
    /// is labelled with the name state from *before* this message, the
    /// question is remembered before the context note is built so the
    /// note already includes it, and the composer only freezes once a
    /// request actually goes out.
    pub fn send_chat_message(&mut self) {
        // Composer is frozen while a turn is in flight.
        if self.is_loading {
            return;
        }

        let text = self.chat_input.content().trim().to_string();
        if text.is_empty() {
            return;
        }

        if !self.online {
            // Keep the typed text so it can go out after reconnecting.
            self.add_system_message("⚠️ You're offline. Please reconnect before sending messages.");
            return;
        }

        self.last_question = Some(text.clone());
        let label = self.profile.name.clone();
        self.chat_history.push(ChatMessage::user(text.as_str(), label));
        self.chat_input.clear();
        self.reset_chat_scroll();
        self.is_loading = true;

        self.capture_name(&text);
        self.profile.remember_question(&text);
        self.persist_profile();

        let note = context::build_context_note(&self.profile);
        let turn = self.conversation.turn_request(&note, &text);
        self.pending_user_text = Some(text);
        self.spawn_worker_chat_thread(turn);
    }

    fn spawn_worker_chat_thread(&mut self, turn: Vec<WireMessage>) {
        let (Some(worker), Some(worker_tx)) = (self.worker.clone(), self.worker_tx.clone()) else {
            self.is_loading = false;
            self.pending_user_text = None;
            self.push_error_message("worker not configured");
            return;
        };
        std::thread::spawn(move || {
            let _ = match worker.chat(&turn) {
                Ok(reply) => worker_tx.send(WorkerEvent::Reply(reply)),
                Err(error) => worker_tx.send(WorkerEvent::Failure(error.to_string())),
            };
        });
    }

    /// Drains one pending event per UI tick. Connectivity changes are
    /// handled even while a turn is in flight; the request itself is
    /// never cancelled.
    pub fn check_worker_events(&mut self) {
        if let Some(rx) = &self.worker_rx
            && let Ok(event) = rx.try_recv()
        {
            match event {
                WorkerEvent::Reply(reply) => {
                    self.is_loading = false;
                    if let Some(user_text) = self.pending_user_text.take() {
                        self.conversation.append_turn(user_text, reply.clone());
                    }
                    self.chat_history.push(ChatMessage::assistant(reply));

                    // Auto-scroll to bottom if enabled
                    if self.chat_auto_scroll {
                        self.chat_scroll_offset = 0;
                    }
                }
                WorkerEvent::Failure(detail) => {
                    self.is_loading = false;
                    // A failed turn never enters the conversation record.
                    self.pending_user_text = None;
                    self.push_error_message(&detail);

                    if self.chat_auto_scroll {
                        self.chat_scroll_offset = 0;
                    }
                }
                WorkerEvent::ConnectivityChanged(online) => {
                    self.online = online;
                    if online {
                        self.add_system_message("✅ Back online.");
                    } else {
                        self.add_system_message(
                            "⚠️ You are offline. I'll try again when you reconnect.",
                        );
                    }
                }
            }
        }
    }

    /// Stores an introduced name and acknowledges it in the transcript.
    fn capture_name(&mut self, text: &str) {
        let Some(name) = names::extract_name(text) else {
            return;
        };
        self.profile.name = Some(name.clone());
        self.persist_profile();

        let mut body = MessageBody::plain("Nice to meet you, ");
        body.push_emphasis(name);
        body.push("! I'll remember your name for this chat.");
        self.chat_history.push(ChatMessage::assistant(body));
    }

    /// Best-effort write; a failed save never interrupts the chat.
    fn persist_profile(&self) {
        if let Some(store) = &self.profile_store {
            let _ = store.save(&self.profile);
        }
    }

    fn push_error_message(&mut self, detail: &str) {
        let mut body = MessageBody::plain("⚠️ ");
        body.push_emphasis("Error:");
        body.push(format!(" {detail}"));
        self.chat_history.push(ChatMessage::system(body));
    }

    pub fn add_system_message(&mut self, content: &str) {
        self.chat_history.push(ChatMessage::system(content));
    }

    pub fn add_chat_input_char(&mut self, character: char) {
        if self.is_loading {
            return;
        }
        self.chat_input.add_char(character);
    }

    pub fn remove_chat_input_char(&mut self) {
        if self.is_loading {
            return;
        }
        self.chat_input.remove_char();
    }

    pub fn delete_chat_input_char(&mut self) {
        if self.is_loading {
            return;
        }
        self.chat_input.delete_char();
    }

    pub fn move_chat_cursor_left(&mut self) {
        if self.is_loading {
            return;
        }
        self.chat_input.move_left();
    }

    pub fn move_chat_cursor_right(&mut self) {
        if self.is_loading {
            return;
        }
        self.chat_input.move_right();
    }
}
