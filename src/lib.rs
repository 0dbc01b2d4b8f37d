// ============================================================================
// LazyRates - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;        // API exchangerate-api.com
pub mod app;        // État de l'application
pub mod config;     // Constantes et paramètres du client
pub mod controller; // Réaction au changement de devise
pub mod models;     // Structures de données
pub mod ui;         // Interface utilisateur
