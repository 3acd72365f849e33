// ============================================================================
// Stockter - Client TUI des données financières des actions coréennes
// ============================================================================
// Trois pages : recherche d'action, classement annuel, classement trimestriel.
// Toutes les données viennent du serveur Stockter (API JSON en GET).
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui applique les réponses, dessine, lit le clavier
// 3. Async dans sync : un runtime tokio multi-thread exécute les requêtes,
//    l'UI reste synchrone
// 4. Channels : les réponses reviennent par mpsc, seul le thread UI modifie App
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use stockter::api::ApiClient;
use stockter::app::{App, Page};
use stockter::config::{Config, LoggingConfig};
use stockter::dispatcher::{Dispatcher, Outcome};
use stockter::handler::handle_event;
use stockter::ui::{render, EventHandler};

// ============================================================================
// Ligne de commande
// ============================================================================

/// Page de départ
#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartPage {
    Search,
    Annual,
    Quarterly,
}

impl From<StartPage> for Page {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Search => Page::Search,
            StartPage::Annual => Page::AnnualRanking,
            StartPage::Quarterly => Page::QuarterlyRanking,
        }
    }
}

/// Client terminal des données financières Stockter
#[derive(Debug, Parser)]
#[command(name = "stockter", version, about)]
struct Args {
    /// Page affichée au démarrage
    #[arg(long, value_enum, default_value = "search")]
    page: StartPage,

    /// Métrique sélectionnée au démarrage sur une page de classement (ex: PER)
    #[arg(long)]
    metric: Option<String>,

    /// Recherche lancée au démarrage
    #[arg(long)]
    query: Option<String>,

    /// URL du serveur (prioritaire sur le fichier et l'environnement)
    #[arg(long)]
    api_url: Option<String>,

    /// Fichier de configuration TOML
    #[arg(long)]
    config: Option<PathBuf>,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans <data local dir>/stockter/logs/stockter.log
/// (ou le répertoire de la configuration).
///
/// ```bash
/// tail -f ~/.local/share/stockter/logs/stockter.log
/// RUST_LOG=stockter=trace stockter
/// ```
fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.resolve_directory();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "stockter.log");

    // RUST_LOG l'emporte sur la configuration
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.filter.as_str().into());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
        .context("Échec de l'initialisation du logging")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Configuration invalide")?;
    if let Some(url) = &args.api_url {
        config = config.with_base_url(url.as_str()).context("URL de l'API invalide")?;
    }

    // Sans logs, l'application reste utilisable
    init_logging(&config.logging).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(base_url = %config.api.normalized_base_url(), "Stockter starting up");

    // CONCEPT RUST : runtime tokio sans #[tokio::main]
    // - Le thread principal garde la boucle TUI (bloquante)
    // - Les workers du runtime exécutent les requêtes HTTP
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("stockter-worker")
        .build()
        .context("Échec de la création du runtime tokio")?;

    let client = ApiClient::new(&config.api).context("Échec de la création du client HTTP")?;
    let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>();
    let dispatcher = Dispatcher::new(runtime.handle().clone(), client, outcome_tx);

    let mut app = App::with_page(args.page.into());
    apply_startup_args(&mut app, &args, &dispatcher);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    info!("Starting event loop");
    let events = EventHandler::new();
    let result = run(&mut terminal, &mut app, &events, &dispatcher, &outcome_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Options --metric et --query : même effet qu'une action au clavier
fn apply_startup_args(app: &mut App, args: &Args, dispatcher: &Dispatcher) {
    if let Some(label) = &args.metric {
        let command = match app.current_page {
            Page::AnnualRanking => app.annual.select_metric_label(label),
            Page::QuarterlyRanking => app.quarterly.select_metric_label(label),
            Page::Search => {
                warn!(label = %label, "--metric ignored on the search page");
                None
            }
        };
        if let Some(command) = command {
            dispatcher.dispatch(command);
        }
    }

    if let Some(query) = &args.query {
        // La saisie n'est pas active : seule la recherche part
        app.search.set_query(query.as_str());
        if let Some(command) = app.search.submit_search() {
            dispatcher.dispatch(command);
        }
    }
}

// ============================================================================
// Event loop
// ============================================================================

/// Boucle principale : réponses → rendu → événement
///
/// CONCEPT RUST : Ownership unique de App
/// - Pas d'Arc<Mutex<App>> : les tâches tokio ne touchent jamais l'état
/// - Elles renvoient un Outcome que la boucle applique
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    dispatcher: &Dispatcher,
    outcomes: &mpsc::Receiver<Outcome>,
) -> Result<()> {
    while app.is_running() {
        // ========================================
        // 0. RÉSULTATS : applique toutes les réponses arrivées
        // ========================================
        // CONCEPT : Non-blocking receive avec try_recv
        // - Le Dispatcher garde un Sender : Disconnected n'arrive pas
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply(outcome);
        }

        // ========================================
        // 1. RENDER : dessine l'interface
        // ========================================
        terminal.draw(|frame| render(frame, app))?;

        // ========================================
        // 2. INPUT : traite l'événement, lance la requête éventuelle
        // ========================================
        match events.next() {
            Ok(event) => {
                if let Some(command) = handle_event(app, &event) {
                    dispatcher.dispatch(command);
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
// Terminal
// ============================================================================

/// Configure le terminal en mode TUI (raw mode + alternate screen)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
