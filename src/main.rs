mod config;
mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::AppController;
use model::{discover, AppModel, CatalogLoader, ContentSource, MediaPaths, MediaResolver, ModalPresenter};
use view::{AppView, FrameState};

/// Terminal browser for a music archive of JSON documents
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Content root: a local directory or an http(s):// base URL
    #[arg(short, long)]
    root: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write file-list.txt for a local root and exit
    #[arg(long)]
    list_files: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(root) = args.root {
        config.content_root = root;
    }

    if args.list_files {
        if config.is_remote() {
            anyhow::bail!("--list-files needs a local content root");
        }
        let output = discover::write_file_list(&PathBuf::from(&config.content_root))?;
        println!("File list written to {}", output.display());
        return Ok(());
    }

    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(root = %config.content_root, "=== Archive Browser Starting ===");

    let source = Arc::new(ContentSource::from_root(&config.content_root, config.media.request_timeout())?);
    if let Some(root) = source.local_root() {
        discover::fill_manifest(&mut config, root);
    }

    let paths = MediaPaths::from_config(&config.layout, &config.media);
    let resolver = MediaResolver::new(paths.clone(), config.media.probe);
    let modal = ModalPresenter::new(source.clone(), resolver.clone(), config.ui.close_delay());
    let app_model = AppModel::new(modal, paths, config.ui.error_display());
    let loader = CatalogLoader::new(source, config.layout.clone());

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone(), loader, resolver, config.manifest.clone());

    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.load_home().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Archive Browser shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (state, should_quit) = {
            let model_guard = model.lock().await;

            model_guard.auto_clear_old_errors().await;

            let state = FrameState {
                site: model_guard.get_site_info().await,
                cards: model_guard.get_home_cards().await,
                playback: model_guard.get_playback_info().await,
                ui_state: model_guard.get_ui_state().await,
                content_state: model_guard.get_content_state().await,
                modal: model_guard.modal.snapshot().await,
            };
            (state, model_guard.should_quit().await)
        };

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &state);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
