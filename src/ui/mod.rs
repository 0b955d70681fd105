mod chat;
mod components;

use crate::app::App;
use ratatui::Frame;

pub fn render(f: &mut Frame, app: &App) {
    chat::render_chat_view(f, app);
}
