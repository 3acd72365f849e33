// ============================================================================
// Dispatcher : exécution des requêtes en arrière-plan
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - Les pages transforment une action utilisateur en Command
// - Le Dispatcher lance une tâche tokio par Command (requête HTTP)
// - Le résultat revient à la boucle d'événements sous forme d'Outcome
//   via un channel mpsc, et c'est le thread UI qui modifie l'état
//
// Chaque action déclenche au plus une requête. Pas d'annulation, pas de
// dédoublonnage : les pages ignorent simplement les réponses périmées.
// ============================================================================

use std::sync::mpsc;

use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{NewsItem, QuarterlySelection, RankingSelection, SeriesMetric, StockRecord};

/// Requête à exécuter, produite par une action utilisateur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Recherche validée (Enter ou suggestion choisie)
    Search { query: String },

    /// Autocomplétion pendant la saisie
    Suggest { query: String },

    /// Classement annuel
    Ranking(RankingSelection),

    /// Classement trimestriel
    QuarterlyRanking(QuarterlySelection),

    /// Série annuelle de l'action sélectionnée
    AnnualSeries {
        stock_name: String,
        metric: SeriesMetric,
    },

    /// Série trimestrielle de l'action sélectionnée
    QuarterlySeries {
        stock_name: String,
        metric: SeriesMetric,
    },

    /// Dernières actualités de l'action sélectionnée
    LatestNews { stock_name: String },
}

impl Command {
    /// Requête HTTP correspondante
    pub fn request(&self) -> ApiRequest {
        match self {
            Command::Search { query } | Command::Suggest { query } => ApiRequest::search(query),
            Command::Ranking(selection) => ApiRequest::ranking(selection),
            Command::QuarterlyRanking(selection) => ApiRequest::quarterly_ranking(selection),
            Command::AnnualSeries { stock_name, metric } => {
                ApiRequest::annual_series(*metric, stock_name)
            }
            Command::QuarterlySeries { stock_name, metric } => {
                ApiRequest::quarterly_series(*metric, stock_name)
            }
            Command::LatestNews { stock_name } => ApiRequest::latest_news(stock_name),
        }
    }
}

/// Résultat d'une Command, avec ce qu'il faut pour savoir s'il est périmé
#[derive(Debug)]
pub enum Outcome {
    Search {
        query: String,
        result: Result<Vec<StockRecord>, ApiError>,
    },
    Suggest {
        query: String,
        result: Result<Vec<StockRecord>, ApiError>,
    },
    Ranking {
        selection: RankingSelection,
        result: Result<Vec<StockRecord>, ApiError>,
    },
    QuarterlyRanking {
        selection: QuarterlySelection,
        result: Result<Vec<StockRecord>, ApiError>,
    },
    AnnualSeries {
        stock_name: String,
        metric: SeriesMetric,
        result: Result<Vec<StockRecord>, ApiError>,
    },
    QuarterlySeries {
        stock_name: String,
        metric: SeriesMetric,
        result: Result<Vec<StockRecord>, ApiError>,
    },
    LatestNews {
        stock_name: String,
        result: Result<Vec<NewsItem>, ApiError>,
    },
}

/// Exécute une Command et emballe son résultat
pub async fn execute(client: &ApiClient, command: Command) -> Outcome {
    let request = command.request();

    match command {
        Command::Search { query } => Outcome::Search {
            result: client.fetch_records(&request).await,
            query,
        },
        Command::Suggest { query } => Outcome::Suggest {
            result: client.fetch_records(&request).await,
            query,
        },
        Command::Ranking(selection) => Outcome::Ranking {
            result: client.fetch_records(&request).await,
            selection,
        },
        Command::QuarterlyRanking(selection) => Outcome::QuarterlyRanking {
            result: client.fetch_records(&request).await,
            selection,
        },
        Command::AnnualSeries { stock_name, metric } => Outcome::AnnualSeries {
            result: client.fetch_records(&request).await,
            stock_name,
            metric,
        },
        Command::QuarterlySeries { stock_name, metric } => Outcome::QuarterlySeries {
            result: client.fetch_records(&request).await,
            stock_name,
            metric,
        },
        Command::LatestNews { stock_name } => Outcome::LatestNews {
            result: client.fetch_news(&request).await,
            stock_name,
        },
    }
}

/// Lance les Commands sur le runtime tokio
pub struct Dispatcher {
    handle: Handle,
    client: ApiClient,
    results: mpsc::Sender<Outcome>,
}

impl Dispatcher {
    pub fn new(handle: Handle, client: ApiClient, results: mpsc::Sender<Outcome>) -> Self {
        Self {
            handle,
            client,
            results,
        }
    }

    /// Lance la requête sans attendre (fire-and-forget)
    ///
    /// CONCEPT RUST : async move
    /// - La tâche prend possession de ses clones (client, sender, command)
    /// - Elle vit indépendamment de l'appelant ('static)
    pub fn dispatch(&self, command: Command) {
        info!(?command, "Dispatching command");
        let client = self.client.clone();
        let results = self.results.clone();

        self.handle.spawn(async move {
            let outcome = execute(&client, command).await;
            debug!("Command finished");
            if results.send(outcome).is_err() {
                warn!("Event loop gone, dropping outcome");
            }
        });
    }
}
