//! visionDesktop: the visionOS desktop shell
//!
//! A pop-art retro desktop: icons, draggable windows, a taskbar, and two
//! built-in toys (Snake and Paint). Winning Snake unlocks the secret file.

mod config;
mod content;
mod desktop;
mod filesystem;
mod icons;
mod mascot;
mod shell;
mod splash;
mod taskbar;
mod window;
mod window_manager;

use config::DesktopConfig;
use desktop::DesktopApp;
use eframe::NativeOptions;
use std::io::Write;
use std::path::PathBuf;

/// Maximum number of restart attempts before giving up
const MAX_RESTART_ATTEMPTS: u32 = 5;

/// Delay between restart attempts
const RESTART_DELAY_SECS: u64 = 2;

const EMBEDDED_ENV: &str = "VISIONOS_EMBEDDED";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    setup_panic_handler();
    run_desktop_loop();
}

fn crash_log_path() -> PathBuf {
    std::env::temp_dir().join("visionos-crash.log")
}

/// Log panics and append them to the crash log
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        log::error!("[visiondesktop] PANIC at {}: {}", location, msg);

        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(crash_log_path())
        {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "[{}] PANIC at {}: {}", timestamp, location, msg);

            let backtrace = std::backtrace::Backtrace::capture();
            if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
                let _ = writeln!(file, "Backtrace:\n{}", backtrace);
            }
        }
    }));
}

/// Run the desktop, restarting after failures when embedded
fn run_desktop_loop() {
    let mut restart_count = 0u32;

    loop {
        let result = std::panic::catch_unwind(run_desktop);

        match result {
            Ok(Ok(())) => {
                log::info!("[visiondesktop] clean shutdown");
                break;
            }
            Ok(Err(e)) => {
                log::error!("[visiondesktop] eframe error: {}", e);
                restart_count += 1;
            }
            Err(_) => {
                log::error!("[visiondesktop] caught panic, attempting recovery");
                restart_count += 1;
            }
        }

        if !should_restart(restart_count, is_embedded()) {
            log::error!("[visiondesktop] not restarting after {} failure(s)", restart_count);
            break;
        }

        log::warn!(
            "[visiondesktop] restarting in {} seconds (attempt {}/{})",
            RESTART_DELAY_SECS,
            restart_count,
            MAX_RESTART_ATTEMPTS
        );
        std::thread::sleep(std::time::Duration::from_secs(RESTART_DELAY_SECS));
    }
}

/// Only embedded installs restart; a development run stops at the first
/// failure so it can be debugged.
fn should_restart(restart_count: u32, embedded: bool) -> bool {
    embedded && restart_count < MAX_RESTART_ATTEMPTS
}

fn run_desktop() -> Result<(), eframe::Error> {
    let config = DesktopConfig::load();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("visionOS"),
        ..Default::default()
    };

    eframe::run_native(
        "visionOS",
        options,
        Box::new(move |cc| {
            visioncore::VisionTheme::default().apply(&cc.egui_ctx);
            Box::new(DesktopApp::new(config))
        }),
    )
}

fn is_embedded() -> bool {
    std::env::var_os(EMBEDDED_ENV).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_restart() {
        assert!(!should_restart(1, false));
        assert!(should_restart(1, true));
        assert!(should_restart(MAX_RESTART_ATTEMPTS - 1, true));
        assert!(!should_restart(MAX_RESTART_ATTEMPTS, true));
    }

    #[test]
    fn test_crash_log_in_temp_dir() {
        assert!(crash_log_path().starts_with(std::env::temp_dir()));
    }
}
