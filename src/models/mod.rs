// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod currency;      // Listes de devises et appartenance
pub mod rate_card;     // Carte affichée pour une devise cible
pub mod rate_snapshot; // Taux reçus de l'API

// Re-export des structures principales pour simplifier les imports
pub use currency::{base_currency_at, is_base_currency, is_target_currency};
pub use rate_card::RateCard;
pub use rate_snapshot::RateSnapshot;
