// ============================================================================
// Configuration
// ============================================================================
// Constantes de l'application : API, listes de devises, géométrie des cartes
//
// Pas de fichier de config ni de flags CLI : tout est fixé à la compilation.
// Seule la variable RUST_LOG est lue (filtre des logs).
// ============================================================================

use std::time::Duration;

/// URL de base de l'API exchangerate-api.com
pub const EXCHANGE_API_BASE_URL: &str = "https://api.exchangerate-api.com";

/// Pause après chaque requête (courtoisie envers l'API)
pub const REQUEST_PAUSE: Duration = Duration::from_secs(1);

/// Devises proposées dans le menu déroulant
pub const BASE_CURRENCIES: [&str; 6] = ["USD", "EUR", "JPY", "GBP", "AUD", "CAD"];

/// Devises affichées sous forme de cartes (allow-list)
pub const TARGET_CURRENCIES: [&str; 9] = [
    "USD", "EUR", "JPY", "GBP", "AUD", "CAD", "CNY", "CHF", "INR",
];

/// Largeur d'une carte en colonnes
pub const CARD_WIDTH: u16 = 30;

/// Hauteur d'une carte en lignes (bordures incluses)
pub const CARD_HEIGHT: u16 = 4;

/// Espacement horizontal entre deux cartes
pub const CARD_SPACING: u16 = 1;

/// Intervalle de polling des événements clavier
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Paramètres du client de taux de change
///
/// CONCEPT : les tests construisent leur propre config
/// - api_base_url pointe vers un MockServer wiremock
/// - request_pause à zéro pour des tests rapides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Racine de l'API (sans slash final)
    pub api_base_url: String,

    /// Pause après une réponse HTTP réussie
    pub request_pause: Duration,
}

impl FetcherConfig {
    /// Crée une config pointant vers une autre racine d'API
    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_pause: REQUEST_PAUSE,
        }
    }

    /// Remplace la pause après requête
    pub fn request_pause(mut self, pause: Duration) -> Self {
        self.request_pause = pause;
        self
    }

    /// Construit l'URL des derniers taux pour une devise de base
    pub fn latest_url(&self, base_currency: &str) -> String {
        format!("{}/v4/latest/{}", self.api_base_url, base_currency)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self::with_base_url(EXCHANGE_API_BASE_URL)
    }
}
