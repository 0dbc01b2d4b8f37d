// ============================================================================
// LazyRates - Taux de change dans le terminal
// ============================================================================
// Choix d'une devise de base dans un menu déroulant, récupération des taux
// depuis exchangerate-api.com et affichage d'une carte par devise cible
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Async dans sync : le fetch HTTP bloque volontairement le thread UI
// 4. Restauration du terminal même en cas d'erreur
// ============================================================================

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use lazyrates::api::{ExchangeRateFetcher, RateFetcher};
use lazyrates::app::App;
use lazyrates::config::FetcherConfig;
use lazyrates::controller::DisplayController;
use lazyrates::models::base_currency_at;
use lazyrates::ui::{events::EventHandler, render};

// ============================================================================
// AppCommand
// ============================================================================
// CONCEPT RUST : Command pattern
// - handle_event() ne fait pas d'I/O, il retourne une commande
// - La boucle exécute la commande après avoir dessiné l'indicateur
// ============================================================================

/// Commandes produites par la gestion des événements
#[derive(Debug, Clone, PartialEq, Eq)]
enum AppCommand {
    /// Relancer la mise à jour des taux pour la sélection courante
    UpdateRates,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne
// ============================================================================

/// Répertoire des logs
///
/// - Linux : ~/.local/share/lazyrates/logs
/// - macOS : ~/Library/Application Support/lazyrates/logs
/// - Sinon : ./logs
fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazyrates").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/lazyrates/logs/lazyrates.log
/// RUST_LOG=lazyrates=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazyrates.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour lazyrates, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyrates=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("LazyRates starting up");

    let fetcher = ExchangeRateFetcher::new(FetcherConfig::default())?;
    let mut controller = DisplayController::new(fetcher);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::new();
    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &mut controller, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// Render -> Input -> Update, sur un seul thread
// Pendant un fetch, la boucle est bloquée : aucun second événement ne peut
// être traité, donc un seul fetch à la fois
// ============================================================================

/// Exécute la boucle principale de l'application
fn run<F: RateFetcher>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    controller: &mut DisplayController<F>,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        match events.next() {
            Ok(event) => {
                if let Some(command) = handle_event(app, event) {
                    match command {
                        AppCommand::UpdateRates => {
                            let message = app
                                .selected_base
                                .as_deref()
                                .map(|code| format!("Chargement des taux pour {}...", code));
                            app.start_loading(message);

                            // Dessine l'indicateur avant de bloquer sur le réseau
                            terminal.draw(|frame| render(frame, app))?;
                            controller.update_exchange_rates(app);
                        }
                    }
                }
            }
            Err(e) => {
                warn!(error = ?e, "Failed to read terminal event");
            }
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - L'ordre des bras compte : quit et raccourcis d'abord, puis le menu
/// - Retourne Some(commande) quand il faut récupérer des taux
fn handle_event(app: &mut App, event: lazyrates::ui::events::Event) -> Option<AppCommand> {
    use lazyrates::ui::events::{
        get_base_shortcut, is_confirm_event, is_down_event, is_escape_event, is_quit_event,
        is_reload_event, is_up_event, Event,
    };

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            // Two-step : première pression demande confirmation
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
            None
        }

        // '1'..'6' : choix direct d'une devise de base (ferme le menu)
        Event::Key(_) if get_base_shortcut(&event).is_some() => {
            app.cancel_quit();
            let code = get_base_shortcut(&event).and_then(base_currency_at)?;
            info!(base = %code, "User selected base currency (shortcut)");
            app.select_base(code);
            Some(AppCommand::UpdateRates)
        }

        // ========================================
        // Menu déroulant ouvert
        // ========================================
        Event::Key(_) if is_up_event(&event) && app.is_dropdown_open() => {
            app.cancel_quit();
            app.dropdown_up();
            None
        }
        Event::Key(_) if is_down_event(&event) && app.is_dropdown_open() => {
            app.cancel_quit();
            app.dropdown_down();
            None
        }
        Event::Key(_) if is_confirm_event(&event) && app.is_dropdown_open() => {
            app.cancel_quit();
            let code = app.highlighted_base()?;
            info!(base = %code, "User selected base currency");
            app.select_base(code);
            Some(AppCommand::UpdateRates)
        }
        Event::Key(_) if is_escape_event(&event) && app.is_dropdown_open() => {
            app.cancel_quit();
            debug!("User closed dropdown");
            app.close_dropdown();
            None
        }

        // ========================================
        // Dashboard
        // ========================================
        Event::Key(_) if is_confirm_event(&event) => {
            app.cancel_quit();
            debug!("User opened dropdown");
            app.open_dropdown();
            None
        }
        Event::Key(_) if is_reload_event(&event) => {
            app.cancel_quit();
            info!(base = ?app.selected_base, "User requested reload");
            Some(AppCommand::UpdateRates)
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation de quit
            app.cancel_quit();
            None
        }

        Event::Tick => None,
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use lazyrates::ui::events::Event;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_dropdown_selection_triggers_update() {
        let mut app = App::new();

        assert_eq!(handle_event(&mut app, key(KeyCode::Enter)), None);
        assert!(app.is_dropdown_open());

        handle_event(&mut app, key(KeyCode::Down));
        handle_event(&mut app, key(KeyCode::Down));
        let command = handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(command, Some(AppCommand::UpdateRates));
        assert_eq!(app.selected_base.as_deref(), Some("JPY"));
        assert!(!app.is_dropdown_open());
    }

    #[test]
    fn test_escape_closes_without_selection() {
        let mut app = App::new();
        handle_event(&mut app, key(KeyCode::Enter));
        handle_event(&mut app, key(KeyCode::Down));

        assert_eq!(handle_event(&mut app, key(KeyCode::Esc)), None);
        assert!(!app.is_dropdown_open());
        assert!(app.selected_base.is_none());
    }

    #[test]
    fn test_shortcut_and_reload() {
        let mut app = App::new();

        // Rien de sélectionné : la mise à jour affichera l'erreur
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('r'))), Some(AppCommand::UpdateRates));
        assert!(app.selected_base.is_none());

        assert_eq!(handle_event(&mut app, key(KeyCode::Char('4'))), Some(AppCommand::UpdateRates));
        assert_eq!(app.selected_base.as_deref(), Some("GBP"));
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::new();

        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.is_running());
        assert!(app.is_awaiting_quit_confirmation());

        // Une autre touche annule
        handle_event(&mut app, key(KeyCode::Char('x')));
        assert!(!app.is_awaiting_quit_confirmation());

        handle_event(&mut app, key(KeyCode::Char('q')));
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }
}
