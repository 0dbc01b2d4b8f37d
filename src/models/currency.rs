// ============================================================================
// Codes devises
// ============================================================================
// Un code devise est une simple chaîne ISO 4217 ("USD", "JPY"...)
// La seule validation est l'appartenance aux listes fixes de config.rs
// ============================================================================

use crate::config::{BASE_CURRENCIES, TARGET_CURRENCIES};

/// Vérifie si le code fait partie des devises de base proposées
pub fn is_base_currency(code: &str) -> bool {
    BASE_CURRENCIES.contains(&code)
}

/// Vérifie si le code fait partie des devises affichées en cartes
pub fn is_target_currency(code: &str) -> bool {
    TARGET_CURRENCIES.contains(&code)
}

/// Retourne la devise de base à une position du menu déroulant
///
/// CONCEPT RUST : Option<&'static str>
/// - Les codes sont des constantes, on retourne une référence statique
/// - None si l'index sort de la liste
pub fn base_currency_at(index: usize) -> Option<&'static str> {
    BASE_CURRENCIES.get(index).copied()
}
