// ============================================================================
// Module : api
// ============================================================================
// Client de l'API de taux de change (exchangerate-api.com)
// ============================================================================

pub mod exchange_rate; // Client API exchangerate-api.com

// Re-export des éléments principaux
pub use exchange_rate::{fetch_exchange_rates, ExchangeRateFetcher, RateFetcher};
