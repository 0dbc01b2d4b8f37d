// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching : identifier la touche pressée
// 3. Error handling avec Result
// ============================================================================

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

use crate::config::{BASE_CURRENCIES, TICK_RATE};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (pas d'entrée pendant TICK_RATE)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler;

impl EventHandler {
    /// Crée un nouveau gestionnaire d'événements
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au plus TICK_RATE
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Sur certains OS, on reçoit Press ET Release
                // On ne garde que Press pour éviter les doublons
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),

                // Release, resize, souris... ignorés
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Vérifie si l'événement est la touche 'q' (quitter)
pub fn is_quit_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    } else {
        false
    }
}

/// Vérifie si l'événement est Échap
pub fn is_escape_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Esc)
    } else {
        false
    }
}

/// Vérifie si l'événement est Entrée ou Espace (ouvrir / valider le menu)
pub fn is_confirm_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    } else {
        false
    }
}

/// Vérifie si l'événement est la flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    } else {
        false
    }
}

/// Vérifie si l'événement est 'r' (recharger la sélection courante)
pub fn is_reload_event(event: &Event) -> bool {
    if let Event::Key(key) = event {
        matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
    } else {
        false
    }
}

/// Raccourci '1'..'6' : index de la devise de base dans le menu
///
/// CONCEPT RUST : Option chaining
/// - to_digit() échoue pour un non-chiffre
/// - checked_sub() rejette '0'
/// - filter() rejette les index hors de la liste
pub fn get_base_shortcut(event: &Event) -> Option<usize> {
    if let Event::Key(key) = event {
        if let KeyCode::Char(c) = key.code {
            return c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .filter(|&index| index < BASE_CURRENCIES.len());
        }
    }
    None
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, event::KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_confirm_and_navigation_events() {
        assert!(is_confirm_event(&key(KeyCode::Enter)));
        assert!(is_confirm_event(&key(KeyCode::Char(' '))));
        assert!(is_up_event(&key(KeyCode::Char('k'))));
        assert!(is_down_event(&key(KeyCode::Down)));
        assert!(is_reload_event(&key(KeyCode::Char('r'))));
        assert!(!is_reload_event(&Event::Tick));
    }

    #[test]
    fn test_base_shortcut() {
        assert_eq!(get_base_shortcut(&key(KeyCode::Char('1'))), Some(0));
        assert_eq!(get_base_shortcut(&key(KeyCode::Char('6'))), Some(5));
        assert_eq!(get_base_shortcut(&key(KeyCode::Char('0'))), None);
        assert_eq!(get_base_shortcut(&key(KeyCode::Char('7'))), None);
        assert_eq!(get_base_shortcut(&key(KeyCode::Char('x'))), None);
        assert_eq!(get_base_shortcut(&Event::Tick), None);
    }
}
