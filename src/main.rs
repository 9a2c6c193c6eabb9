mod ui;
mod clock;
mod settings;
mod logging;

use winit::event_loop::EventLoop;
use tokio::sync::Mutex;
use std::sync::Arc;
use std::thread;
use std::net::{TcpListener, TcpStream};
use std::io::{BufRead, BufReader, Write};
use std::time::Duration;
use log::Level::Error;

use crate::settings::{ColorScheme, Settings, SettingsState, SharedSettings, ThemeMode};

#[tokio::main]
async fn main() {
    // Initialize logging
    logging::init_logging();

    // Load persisted settings and create shared state
    let settings_path = settings::settings_path();
    let settings = Settings::load_or_default(&settings_path);
    let shared_settings: SharedSettings = Arc::new(Mutex::new(SettingsState::new(settings)));

    // Autosave task: flush dirty settings to disk in the background
    let autosave_settings = shared_settings.clone();
    let autosave_path = settings_path.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(2)).await;
            let snapshot = {
                let mut state = autosave_settings.lock().await;
                state.take_dirty().then(|| state.settings().clone())
            };
            if let Some(snapshot) = snapshot {
                match snapshot.save(&autosave_path) {
                    Ok(()) => settings_log!(log::Level::Debug, "Settings saved to {}", autosave_path.display()),
                    Err(e) => settings_log!(Error, "Failed to save settings: {}", e),
                }
            }
        }
    });

    // Start the command listener (in a background thread)
    start_command_listener(shared_settings.clone());

    // Create event loop
    let event_loop = EventLoop::new();

    // Run UI
    ui::run_ui(event_loop, shared_settings);
}

fn start_command_listener(shared_settings: SharedSettings) {
    thread::spawn(move || {
        let listener = TcpListener::bind("127.0.0.1:7878").expect("Failed to bind TCP listener");
        for stream in listener.incoming() {
            if let Ok(stream) = stream {
                handle_command(stream, &shared_settings);
            }
        }
    });
}

fn handle_command(mut stream: TcpStream, shared_settings: &SharedSettings) {
    let reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(e) => {
            settings_log!(Error, "Failed to clone command stream: {}", e);
            return;
        }
    });
    for line in reader.lines() {
        if let Ok(cmd) = line {
            let mut state = shared_settings.blocking_lock();
            let tokens: Vec<_> = cmd.trim().split_whitespace().collect();
            let mut response = "OK\n".to_string();
            match tokens.as_slice() {
                ["set_mode", mode] => match *mode {
                    "Light" => state.set_theme_mode(ThemeMode::Light),
                    "Dark" => state.set_theme_mode(ThemeMode::Dark),
                    _ => response = format!("ERR invalid mode: {}\n", mode),
                },
                ["set_scheme", scheme] => match ColorScheme::parse(scheme) {
                    Some(scheme) => state.set_color_scheme(scheme),
                    None => response = format!("ERR invalid scheme: {}\n", scheme),
                },
                ["set_format", format] => match *format {
                    "12" => state.set_24_hour(false),
                    "24" => state.set_24_hour(true),
                    _ => response = format!("ERR invalid format: {}\n", format),
                },
                ["set_animations", flag] => match *flag {
                    "on" => state.set_animations_enabled(true),
                    "off" => state.set_animations_enabled(false),
                    _ => response = format!("ERR invalid flag: {}\n", flag),
                },
                ["set_indicator", flag] => match *flag {
                    "on" => state.set_indicator_line(true),
                    "off" => state.set_indicator_line(false),
                    _ => response = format!("ERR invalid flag: {}\n", flag),
                },
                ["set_paper", flag] => match *flag {
                    "on" => state.set_paper_texture(true),
                    "off" => state.set_paper_texture(false),
                    _ => response = format!("ERR invalid flag: {}\n", flag),
                },
                // "local" or an IANA name; unknown names fall back to local
                // time with a warning when the clock source resolves them
                ["set_zone", zone] => state.set_time_zone(zone),
                ["set_sensitivity", radius] => match radius.parse::<f64>() {
                    Ok(radius) if radius.is_finite() => state.set_motion_sensitivity(radius),
                    _ => response = format!("ERR invalid sensitivity: {}\n", radius),
                },
                _ => response = "ERR unknown command\n".to_string(),
            }
            let _ = stream.write_all(response.as_bytes());
            break;
        }
    }
}
