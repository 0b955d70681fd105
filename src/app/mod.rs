mod chat;
mod scroll;
#[path = "text-input.rs"]
mod text_input;
mod types;

pub use text_input::TextInput;
pub use types::*;

use crate::agents::WorkerClient;
use crate::config::Config;
use crate::conversation::Conversation;
use crate::profile::{Profile, ProfileStore};
use crate::services::net;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

/// Events delivered to the UI loop from background threads
pub enum WorkerEvent {
    Reply(String),
    Failure(String),
    ConnectivityChanged(bool),
}

/// Main application state. One value owns the whole session: transcript,
/// wire record, profile, composer, and in-flight bookkeeping.
pub struct App {
    pub should_quit: bool,

    // Chat-related fields
    pub chat_history: Vec<ChatMessage>,
    pub chat_input: TextInput,
    pub conversation: Conversation,
    pub is_loading: bool,
    pub online: bool,
    /// Submitted text waiting for its reply; consumed into the
    /// conversation record on success, dropped on failure.
    pub pending_user_text: Option<String>,
    pub last_question: Option<String>,
    pub worker: Option<WorkerClient>,
    pub worker_rx: Option<Receiver<WorkerEvent>>,
    pub worker_tx: Option<Sender<WorkerEvent>>,
    pub chat_scroll_offset: usize,
    pub chat_auto_scroll: bool, // Whether to auto-scroll to bottom on new messages

    // Profile fields
    pub profile: Profile,
    pub profile_store: Option<ProfileStore>,

    pub status_toast: Option<StatusToast>,
    pub loading_frame: u8,
    pub last_loading_tick: Option<std::time::Instant>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates a new application instance with default settings
    pub fn new() -> Self {
        Self {
            should_quit: false,
            chat_history: Vec::new(),
            chat_input: TextInput::new(),
            conversation: Conversation::default(),
            is_loading: false,
            online: true, // Assume online until a probe says otherwise
            pending_user_text: None,
            last_question: None,
            worker: None,
            worker_rx: None,
            worker_tx: None,
            chat_scroll_offset: 0,
            chat_auto_scroll: true, // Start with auto-scroll enabled
            profile: Profile::default(),
            profile_store: None,
            status_toast: None,
            loading_frame: 0,
            last_loading_tick: None,
        }
    }

    /// Initializes services (worker client, profile store, connectivity
    /// watcher) with configuration
    pub fn init_services(&mut self, config: &Config) {
        self.conversation =
            Conversation::with_system_prompt(config.assistant.system_prompt.clone());
        self.worker = WorkerClient::new(config.worker.url.clone()).ok();

        // A store that cannot be opened degrades to an in-memory profile.
        if let Ok(store) = ProfileStore::open_default() {
            self.profile = store.load();
            self.profile_store = Some(store);
        }

        let (tx, rx) = channel();
        self.worker_tx = Some(tx);
        self.worker_rx = Some(rx);

        self.spawn_connectivity_watcher(config.worker.url.clone());
        self.add_greeting_message();
    }

    /// Probes the worker URL in the background and reports transitions
    /// only; the steady state stays quiet.
    fn spawn_connectivity_watcher(&self, url: String) {
        let Some(worker_tx) = self.worker_tx.clone() else {
            return;
        };
        std::thread::spawn(move || {
            let mut online = true;
            loop {
                let now_online = net::probe(&url);
                if now_online != online {
                    online = now_online;
                    if worker_tx
                        .send(WorkerEvent::ConnectivityChanged(online))
                        .is_err()
                    {
                        // UI side is gone
                        break;
                    }
                }
                std::thread::sleep(net::PROBE_INTERVAL);
            }
        });
    }

    /// Display-only greeting; never part of the wire record.
    fn add_greeting_message(&mut self) {
        self.chat_history.push(ChatMessage::assistant(
            "👋 Hi! I'm Lumi, your beauty assistant. Ask me about products, routines, or \
             recommendations and I'll tailor them to you.",
        ));
    }

    pub fn show_status_toast(&mut self, message: impl Into<String>) {
        self.status_toast = Some(StatusToast::new(message));
    }

    pub fn clear_expired_status_toast(&mut self) {
        let should_clear = self
            .status_toast
            .as_ref()
            .is_some_and(|toast| toast.is_expired(Duration::from_secs(3)));
        if should_clear {
            self.status_toast = None;
        }
    }

    #[must_use]
    pub fn status_toast_message(&self) -> Option<&str> {
        self.status_toast
            .as_ref()
            .map(|toast| toast.message.as_str())
    }
}
