// Defensive programming lints - prevent panics and unsafe patterns
#![deny(clippy::indexing_slicing)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::fallible_impl_from)]
#![warn(clippy::wildcard_enum_match_arm)]
#![warn(clippy::fn_params_excessive_bools)]
// Idiomatic Rust lints
#![warn(clippy::needless_return)]
#![warn(clippy::let_and_return)]
#![warn(clippy::must_use_candidate)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::explicit_iter_loop)]

mod agents;
mod app;
mod config;
mod conversation;
mod profile;
mod services;
mod ui;

use app::App;
use color_eyre::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::{io, time::Duration};

fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    // Load config
    let config = config::Config::load()?;

    // Check for command-line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        return handle_cli_args(&args);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and initialize services
    let mut app = App::new();
    app.init_services(&config);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn handle_cli_args(args: &[String]) -> Result<()> {
    let cmd = args
        .get(1)
        .ok_or_else(|| color_eyre::eyre::eyre!("No command provided"))?;
    let program_name = args.first().map_or("lumi", String::as_str);

    match cmd.as_str() {
        "--help" | "-h" => print_help(program_name),
        "--version" | "-v" => println!("Lumi Beauty Chat v{}", env!("CARGO_PKG_VERSION")),
        "profile" => {
            let store = profile::ProfileStore::open_default()?;
            let saved = store.load();
            println!("Profile file: {}", store.path().display());
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        cmd_str => {
            eprintln!("Unknown command: {}", cmd_str);
            eprintln!("Run with --help for available commands.");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_help(program_name: &str) {
    println!("Lumi Beauty Chat - terminal beauty assistant");
    println!();
    println!("Usage: {} [command]", program_name);
    println!();
    println!("Commands:");
    println!("  profile    - Print the saved profile as JSON");
    println!("  --help     - Show this help");
    println!("  --version  - Show version");
    println!();
    println!("Run without arguments to start interactive mode.");
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Check for worker replies and connectivity changes
        app.check_worker_events();
        tick_loading_animation(app);
        app.clear_expired_status_toast();

        terminal.draw(|f| ui::render(f, app))?;

        if app.should_quit {
            break;
        }

        // Poll for events with a timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle KeyPress events to avoid duplicate handling
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_chat_key(app, key.code, key.modifiers);
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(app, mouse);
                }
                Event::Paste(paste) => {
                    handle_paste(app, &paste);
                }
                Event::FocusGained | Event::FocusLost | Event::Resize(_, _) => {}
            }
        }
    }

    Ok(())
}

fn tick_loading_animation(app: &mut App) {
    use std::time::{Duration, Instant};
    if !app.is_loading {
        app.loading_frame = 0;
        app.last_loading_tick = None;
        return;
    }

    let now = Instant::now();
    let should_tick = app
        .last_loading_tick
        .map(|last_tick| now.duration_since(last_tick) >= Duration::from_millis(200))
        .unwrap_or(true);

    if should_tick {
        app.loading_frame = app.loading_frame.wrapping_add(1);
        app.last_loading_tick = Some(now);
    }
}

fn handle_chat_key(app: &mut App, key_code: KeyCode, modifiers: KeyModifiers) {
    match (key_code, modifiers) {
        (KeyCode::Char('c'), key_modifiers) if key_modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (KeyCode::Up, key_modifiers)
            if app.chat_input.is_empty() || key_modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.scroll_chat_up_lines(3);
        }
        (KeyCode::Down, key_modifiers)
            if app.chat_input.is_empty() || key_modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.scroll_chat_down_lines(3);
        }
        (KeyCode::PageUp, _) => app.scroll_chat_up_page(),
        (KeyCode::PageDown, _) => app.scroll_chat_down_page(),
        (KeyCode::End, _) => app.jump_to_bottom(),
        (KeyCode::Home, _) => app.jump_to_top(),
        (KeyCode::Esc, _) => app.should_quit = true,
        (KeyCode::Enter, _) => app.send_chat_message(),
        (KeyCode::Left, _) => app.move_chat_cursor_left(),
        (KeyCode::Right, _) => app.move_chat_cursor_right(),
        (KeyCode::Char(character), _) => app.add_chat_input_char(character),
        (KeyCode::Backspace, _) => app.remove_chat_input_char(),
        (KeyCode::Delete, _) => app.delete_chat_input_char(),
        (KeyCode::Up, _)
        | (KeyCode::Down, _)
        | (KeyCode::Tab, _)
        | (KeyCode::BackTab, _)
        | (KeyCode::Insert, _)
        | (KeyCode::F(_), _)
        | (KeyCode::Null, _)
        | (KeyCode::CapsLock, _)
        | (KeyCode::ScrollLock, _)
        | (KeyCode::NumLock, _)
        | (KeyCode::PrintScreen, _)
        | (KeyCode::Pause, _)
        | (KeyCode::Menu, _)
        | (KeyCode::KeypadBegin, _)
        | (KeyCode::Media(_), _)
        | (KeyCode::Modifier(_), _) => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse: event::MouseEvent) {
    match mouse.kind {
        event::MouseEventKind::ScrollUp => {
            app.scroll_chat_up_lines(3);
        }
        event::MouseEventKind::ScrollDown => {
            app.scroll_chat_down_lines(3);
        }
        event::MouseEventKind::ScrollLeft | event::MouseEventKind::ScrollRight => {
            // Ignore horizontal scrolling
        }
        event::MouseEventKind::Down(_)
        | event::MouseEventKind::Up(_)
        | event::MouseEventKind::Drag(_)
        | event::MouseEventKind::Moved => {}
    }
}

fn handle_paste(app: &mut App, paste: &str) {
    // The composer is single-line; pasted newlines become spaces.
    let text = paste.replace('\r', "").replace('\n', " ");
    if text.trim().is_empty() {
        return;
    }

    for character in text.chars() {
        app.add_chat_input_char(character);
    }
}
