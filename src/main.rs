mod config;
mod controller;
mod coordinator;
mod error;
mod fetch;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use config::AppConfig;
use controller::AppController;
use coordinator::{delivery_channel, DeliveryRx};
use fetch::{Fetcher, HttpTransport};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Store Search Starting ===");

    let config = AppConfig::from_env()?;
    tracing::info!(
        endpoint = %config.endpoint,
        page_limit = config.page_limit,
        timeout_ms = config.request_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    let transport = HttpTransport::new(config.request_timeout)?;
    let fetcher = Fetcher::new(Arc::new(transport));
    let (deliveries, rx) = delivery_channel();
    let controller = AppController::new(fetcher, &config, deliveries);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, controller, rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Store Search shutting down");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut controller: AppController,
    mut rx: DeliveryRx,
) -> io::Result<()> {
    loop {
        // Apply everything the network tasks finished since the last frame
        while let Ok(delivery) = rx.try_recv() {
            controller.handle_delivery(delivery);
        }

        let size = terminal.size()?;
        controller.set_visible_rows(AppView::visible_rows(Rect::new(0, 0, size.width, size.height)));

        terminal.draw(|f| {
            AppView::render(f, controller.model());
        })?;

        // Short poll keeps deliveries flowing while the user is idle
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key);
            }
        }

        if controller.should_quit() {
            break;
        }
    }

    controller.shutdown();
    Ok(())
}
