// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Enums pour state machines : Idle -> Displayed | Error
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Le rendu lit depuis App
// - Seuls la boucle d'événements et le DisplayController modifient App
// ============================================================================

use chrono::{DateTime, Utc};

use crate::config::BASE_CURRENCIES;
use crate::models::{base_currency_at, RateCard, RateSnapshot};

// ============================================================================
// Enum : Screen
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : menu fermé, cartes visibles
    Dashboard,

    /// Menu déroulant ouvert : choix de la devise de base
    Dropdown,
}

// ============================================================================
// Enum : DisplayError
// ============================================================================
// Les deux seules erreurs visibles par l'utilisateur
// Toutes deux récupérables : l'app attend la sélection suivante
// ============================================================================

/// Erreur affichée en rouge à la place des cartes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Aucune devise de base choisie
    NoBaseSelected,

    /// Échec réseau, statut HTTP ou JSON invalide
    DataUnavailable,
}

impl DisplayError {
    /// Message affiché à l'utilisateur
    pub fn message(&self) -> &'static str {
        match self {
            DisplayError::NoBaseSelected => "Aucune devise de base sélectionnée",
            DisplayError::DataUnavailable => "Impossible de récupérer les taux de change",
        }
    }
}

// ============================================================================
// Enum : RatesView
// ============================================================================
// CONCEPT RUST : Enum avec données
// - Cartes et erreur sont mutuellement exclusives
// - Passer d'un état à l'autre remplace tout le contenu (pas de cartes périmées)
// ============================================================================

/// Contenu de la zone principale
#[derive(Debug, Clone, PartialEq)]
pub enum RatesView {
    /// Rien encore sélectionné
    Idle,

    /// Cartes de conversion, dans l'ordre de la réponse API
    Displayed(Vec<RateCard>),

    /// Message d'erreur
    Error(DisplayError),
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Position du curseur dans le menu déroulant
    pub dropdown_index: usize,

    /// Devise de base sélectionnée (None tant que rien n'est choisi)
    pub selected_base: Option<String>,

    /// Contenu de la zone principale
    pub view: RatesView,

    /// Date des taux annoncée par l'API (dernier succès)
    pub rates_date: Option<String>,

    /// Dernière mise à jour annoncée par l'API (time_last_updated)
    pub last_updated: Option<DateTime<Utc>>,

    /// Instant du dernier fetch réussi
    pub fetched_at: Option<DateTime<Utc>>,

    /// Two-step quit : première pression de 'q' -> true
    pub confirm_quit: bool,

    /// Indique qu'un fetch va bloquer l'UI
    pub is_loading: bool,

    /// Message affiché pendant le chargement
    pub loading_message: Option<String>,
}

impl App {
    /// Crée une App sans sélection
    pub fn new() -> Self {
        Self {
            running: true,
            current_screen: Screen::Dashboard,
            dropdown_index: 0,
            selected_base: None,
            view: RatesView::Idle,
            rates_date: None,
            last_updated: None,
            fetched_at: None,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Menu déroulant
    // ========================================================================

    /// Ouvre le menu, curseur positionné sur la sélection courante
    pub fn open_dropdown(&mut self) {
        if let Some(index) = self
            .selected_base
            .as_deref()
            .and_then(|code| BASE_CURRENCIES.iter().position(|c| *c == code))
        {
            self.dropdown_index = index;
        }
        self.current_screen = Screen::Dropdown;
    }

    /// Ferme le menu sans changer la sélection
    pub fn close_dropdown(&mut self) {
        self.current_screen = Screen::Dashboard;
    }

    /// Vérifie si le menu est ouvert
    pub fn is_dropdown_open(&self) -> bool {
        self.current_screen == Screen::Dropdown
    }

    /// Remonte le curseur du menu
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() ne descend pas en dessous de 0
    pub fn dropdown_up(&mut self) {
        self.dropdown_index = self.dropdown_index.saturating_sub(1);
    }

    /// Descend le curseur du menu
    pub fn dropdown_down(&mut self) {
        let max_index = BASE_CURRENCIES.len().saturating_sub(1);
        self.dropdown_index = (self.dropdown_index + 1).min(max_index);
    }

    /// Devise sous le curseur du menu
    pub fn highlighted_base(&self) -> Option<&'static str> {
        base_currency_at(self.dropdown_index)
    }

    /// Enregistre la devise de base choisie et ferme le menu
    pub fn select_base(&mut self, code: &str) {
        if let Some(index) = BASE_CURRENCIES.iter().position(|c| *c == code) {
            self.dropdown_index = index;
        }
        self.selected_base = Some(code.to_string());
        self.current_screen = Screen::Dashboard;
    }

    // ========================================================================
    // Contenu affiché
    // ========================================================================

    /// Remplace le contenu par des cartes
    ///
    /// Les métadonnées (date, mise à jour API, instant du fetch) viennent
    /// du snapshot dont les cartes sont issues.
    pub fn show_rates(&mut self, cards: Vec<RateCard>, snapshot: &RateSnapshot) {
        self.view = RatesView::Displayed(cards);
        self.rates_date = snapshot.date.clone();
        self.last_updated = snapshot.last_updated;
        self.fetched_at = Some(snapshot.fetched_at);
    }

    /// Remplace le contenu par un message d'erreur
    pub fn show_error(&mut self, error: DisplayError) {
        self.view = RatesView::Error(error);
        self.rates_date = None;
        self.last_updated = None;
        self.fetched_at = None;
    }

    /// Cartes affichées (vide si erreur ou rien de sélectionné)
    pub fn cards(&self) -> &[RateCard] {
        match &self.view {
            RatesView::Displayed(cards) => cards,
            _ => &[],
        }
    }

    /// Erreur affichée, s'il y en a une
    pub fn display_error(&self) -> Option<DisplayError> {
        match self.view {
            RatesView::Error(error) => Some(error),
            _ => None,
        }
    }

    // ========================================================================
    // Chargement et confirmation de quit
    // ========================================================================

    /// Démarre le chargement avec un message optionnel
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Termine le chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
