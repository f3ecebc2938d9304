//! Key logger: opens the input window and logs every key edge.
//!
//! Run with: `cargo run -p input-window --example key_logger --features window`
//!
//! Press Escape or close the window to quit. Set `RUST_LOG=info` to see the
//! edges.

use input_window::prelude::*;

struct Logger {
    quit: bool,
}

impl KeyHandler for Logger {
    fn key(&mut self, event: KeyEvent) {
        tracing::info!(
            scancode = event.scancode,
            key = %event.key,
            code = event.key.code(),
            pressed = event.pressed,
            "key"
        );
        if event.key == Key::Escape && event.pressed {
            self.quit = true;
        }
    }

    fn idle(&mut self) -> LoopAction {
        if self.quit {
            LoopAction::Exit
        } else {
            LoopAction::Continue
        }
    }
}

fn main() -> Result<(), WindowError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = WindowConfig::from_env()?.with_size(480, 320);
    let mut runner = WindowRunner::new()?;
    let summary = runner.run(&config, Logger { quit: false })?;
    println!("{} key events, exit: {:?}", summary.key_events, summary.exit);
    Ok(())
}
