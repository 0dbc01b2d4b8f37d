// ============================================================================
// API Client : exchangerate-api.com
// ============================================================================
// Récupère les derniers taux de change pour une devise de base
//
// CONCEPTS RUST :
// 1. async/await : l'appel HTTP est asynchrone (reqwest)
// 2. Trait RateFetcher : façade synchrone utilisée par la boucle TUI
// 3. Result -> Option : les erreurs sont loggées puis converties en None
// ============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::config::FetcherConfig;
use crate::models::RateSnapshot;

// ============================================================================
// Structure de la réponse JSON
// ============================================================================
// Exemple :
// {
//   "base": "USD",
//   "date": "2026-10-16",
//   "time_last_updated": 1792108801,
//   "rates": { "USD": 1, "AED": 3.67, "JPY": 150.12, ... }
// }
//
// Seul "rates" est obligatoire : s'il manque, la désérialisation échoue
// ============================================================================

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: Option<String>,
    date: Option<String>,
    time_last_updated: Option<i64>,
    rates: IndexMap<String, f64>,
}

// ============================================================================
// Trait RateFetcher
// ============================================================================
// CONCEPT RUST : Trait comme point d'injection
// - Le contrôleur ne connaît que ce trait
// - En production : ExchangeRateFetcher (HTTP)
// - En test : un stub en mémoire
// ============================================================================

/// Source de taux de change appelée de manière synchrone
pub trait RateFetcher {
    /// Récupère les taux pour `base_currency`
    ///
    /// Retourne None en cas d'échec (réseau, statut HTTP, JSON invalide).
    /// L'erreur est déjà loggée par l'implémentation.
    fn fetch(&mut self, base_currency: &str) -> Option<RateSnapshot>;
}

/// Implémentation HTTP de RateFetcher
///
/// CONCEPT RUST : Async dans sync
/// - Possède son propre runtime tokio
/// - block_on() exécute le fetch et bloque le thread UI jusqu'à la réponse
pub struct ExchangeRateFetcher {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    config: FetcherConfig,
}

impl ExchangeRateFetcher {
    /// Crée le fetcher avec son runtime et son client HTTP
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()
            .context("Échec de la création du runtime tokio")?;

        let client = {
            let _guard = runtime.enter();
            build_client()?
        };

        Ok(Self {
            runtime,
            client,
            config,
        })
    }
}

impl RateFetcher for ExchangeRateFetcher {
    fn fetch(&mut self, base_currency: &str) -> Option<RateSnapshot> {
        let result = self
            .runtime
            .block_on(fetch_exchange_rates(&self.client, &self.config, base_currency));

        match result {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                error!(base = %base_currency, error = ?e, "Failed to fetch exchange rates");
                None
            }
        }
    }
}

// ============================================================================
// Fonctions publiques de l'API
// ============================================================================

/// Construit le client HTTP (timeouts par défaut de reqwest)
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("lazyrates/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Échec de la création du client HTTP")
}

/// Récupère les derniers taux pour une devise de base
///
/// Exactement une requête GET par appel, suivie de la pause configurée
/// (1 seconde par défaut) quand le statut HTTP est un succès.
///
/// # Arguments
/// * `client` - Client reqwest partagé
/// * `config` - URL de l'API et durée de la pause
/// * `base_currency` - Code de la devise de base (ex: "USD")
///
/// # Exemple
/// let snapshot = fetch_exchange_rates(&client, &config, "USD").await?;
/// println!("{} taux reçus pour {}", snapshot.len(), snapshot.base);
#[instrument(skip(client, config))]
pub async fn fetch_exchange_rates(
    client: &reqwest::Client,
    config: &FetcherConfig,
    base_currency: &str,
) -> Result<RateSnapshot> {
    let url = config.latest_url(base_currency);
    debug!(url = %url, "Sending HTTP request to exchange rate API");

    let response = client
        .get(&url)
        .send()
        .await
        .context("Échec de la requête HTTP vers l'API de taux de change")?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        warn!(status = %status, "Exchange rate API returned error status");
        anyhow::bail!("L'API de taux de change a retourné une erreur : HTTP {}", status);
    }

    // Pause de courtoisie pour ne pas surcharger l'API
    if !config.request_pause.is_zero() {
        debug!(pause_ms = config.request_pause.as_millis() as u64, "Rate limiting pause");
        tokio::time::sleep(config.request_pause).await;
    }

    let body = response
        .text()
        .await
        .context("Échec de la lecture du corps de la réponse")?;

    let snapshot = parse_latest_rates(base_currency, &body)?;

    info!(rates = snapshot.len(), date = ?snapshot.date, "Successfully fetched exchange rates");
    Ok(snapshot)
}

/// Parse le corps JSON et construit le snapshot
///
/// CONCEPT RUST : Ownership
/// - La réponse désérialisée est consommée (move) pour construire le snapshot
/// - Les rates ne sont pas copiés
fn parse_latest_rates(base_currency: &str, body: &str) -> Result<RateSnapshot> {
    let response: LatestRatesResponse = serde_json::from_str(body)
        .context("Échec du parsing JSON de la réponse de l'API de taux")?;

    if let Some(base) = response.base.as_deref() {
        if base != base_currency {
            debug!(requested = %base_currency, returned = %base, "API returned a different base");
        }
    }

    let last_updated = response
        .time_last_updated
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));

    Ok(RateSnapshot::new(base_currency.to_string(), response.rates)
        .with_metadata(response.date, last_updated))
}

// ============================================================================
// Tests unitaires
// ============================================================================
