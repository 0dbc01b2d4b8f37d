// ============================================================================
// Structure : RateSnapshot
// ============================================================================
// Photo instantanée des taux de change pour une devise de base
//
// CONCEPTS RUST :
// 1. IndexMap : HashMap qui conserve l'ordre d'insertion
//    - Les cartes doivent suivre l'ordre de la réponse JSON
// 2. Immutabilité : pas de méthode &mut self, un nouveau snapshot
//    remplace l'ancien à chaque changement de sélection
// ============================================================================

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Taux de change valides à l'instant du fetch
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    /// Devise de base demandée (ex: "USD")
    pub base: String,

    /// Code devise -> taux, dans l'ordre reçu de l'API
    pub rates: IndexMap<String, f64>,

    /// Date des taux annoncée par l'API (ex: "2026-10-16")
    pub date: Option<String>,

    /// Dernière mise à jour côté API
    pub last_updated: Option<DateTime<Utc>>,

    /// Instant local du fetch
    pub fetched_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Crée un snapshot horodaté maintenant
    pub fn new(base: String, rates: IndexMap<String, f64>) -> Self {
        Self {
            base,
            rates,
            date: None,
            last_updated: None,
            fetched_at: Utc::now(),
        }
    }

    /// Ajoute les métadonnées renvoyées par l'API
    pub fn with_metadata(mut self, date: Option<String>, last_updated: Option<DateTime<Utc>>) -> Self {
        self.date = date;
        self.last_updated = last_updated;
        self
    }

    /// Nombre de devises dans le snapshot
    pub fn len(&self) -> usize {
        self.rates.len()
    }
}
