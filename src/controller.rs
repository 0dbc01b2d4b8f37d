// ============================================================================
// DisplayController
// ============================================================================
// Réagit au changement de devise de base :
// 1. Lit la sélection (erreur si aucune)
// 2. Appelle le RateFetcher (bloquant)
// 3. Filtre les taux sur l'allow-list et reconstruit les cartes
//
// CONCEPT RUST : Générique avec trait bound
// - DisplayController<F: RateFetcher> accepte n'importe quelle source
// - Dispatch statique : pas de Box<dyn>, le compilateur monomorphise
// ============================================================================

use tracing::{info, instrument, warn};

use crate::api::RateFetcher;
use crate::app::{App, DisplayError};
use crate::config::TARGET_CURRENCIES;
use crate::models::{is_base_currency, RateCard, RateSnapshot};

/// Contrôleur de l'affichage des taux
pub struct DisplayController<F: RateFetcher> {
    fetcher: F,
}

impl<F: RateFetcher> DisplayController<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Accès à la source de taux (utile en test)
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Événement "changement de sélection" du menu déroulant
    ///
    /// Un code hors de la liste des devises de base est ignoré.
    pub fn select_base_currency(&mut self, app: &mut App, code: &str) {
        if !is_base_currency(code) {
            warn!(base = %code, "Ignoring unknown base currency");
            return;
        }
        app.select_base(code);
        self.update_exchange_rates(app);
    }

    /// Met à jour les cartes pour la devise de base sélectionnée
    ///
    /// Le contenu précédent est toujours remplacé : cartes, erreur ou rien
    /// ne survit d'une mise à jour à l'autre.
    #[instrument(skip_all)]
    pub fn update_exchange_rates(&mut self, app: &mut App) {
        let Some(base) = app.selected_base.clone() else {
            warn!("No base currency selected");
            app.show_error(DisplayError::NoBaseSelected);
            app.stop_loading();
            return;
        };

        match self.fetcher.fetch(&base) {
            Some(snapshot) => {
                let cards = build_cards(&snapshot, &TARGET_CURRENCIES);
                info!(received = snapshot.len(), displayed = cards.len(), "Exchange rates displayed");
                app.show_rates(cards, &snapshot);
            }
            None => {
                warn!("Exchange rate data unavailable");
                app.show_error(DisplayError::DataUnavailable);
            }
        }

        app.stop_loading();
    }
}

/// Construit les cartes pour les devises de l'allow-list
///
/// CONCEPT RUST : Iterator chaining
/// - .filter() garde les codes de l'allow-list
/// - L'ordre est celui du snapshot (ordre de la réponse), pas celui de `targets`
pub fn build_cards(snapshot: &RateSnapshot, targets: &[&str]) -> Vec<RateCard> {
    snapshot
        .rates
        .iter()
        .filter(|(code, _)| targets.contains(&code.as_str()))
        .map(|(code, &rate)| RateCard::new(code.clone(), snapshot.base.clone(), rate))
        .collect()
}

// ============================================================================
// Tests unitaires
// ============================================================================
