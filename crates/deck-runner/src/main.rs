//! Demonstration shell for the deck front-end.
//!
//! Runs a Super NES session against the built-in test-pattern core —
//! a stand-in that lets the whole front-end (device registry, render pump,
//! session lifecycle) run without a native emulation core. Real cores
//! plug in through `CoreLoader`.
//!
//! Controls:
//! - Arrows/X/Z/S/A/Q/W/Enter/Right Shift — player 1 keyboard pad
//! - F2 — rotate the active gamepad's player slot
//! - Escape — quit

mod pattern;
mod shell;

use console_snes::SnesSession;
use deck_frontend::ConsoleSession;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut session: SnesSession = ConsoleSession::new(Box::new(pattern::PatternLoader));

    let cartridge = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pattern.sfc".to_string());
    if let Err(err) = session.insert_cartridge(&cartridge) {
        eprintln!("Failed to boot {cartridge}: {err}");
        std::process::exit(1);
    }

    shell::run(
        session,
        shell::ShellConfig {
            title: "Super NES (F2: rotate player slot)".into(),
            scale: 3,
        },
    );
}
