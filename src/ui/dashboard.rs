// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine l'interface TUI en utilisant les widgets de ratatui
//
// Disposition verticale :
//   ┌ Barre de titre ─────────────────────┐
//   │ Menu déroulant (devise de base)     │
//   │ Ligne de statut (date / chargement) │
//   │ Cartes en grille (retour à la ligne)│
//   └ Footer (raccourcis) ────────────────┘
//
// CONCEPTS RATATUI :
// 1. Layout : découpage de l'espace en zones
// 2. Clear : efface une zone avant de dessiner un popup
// 3. Rect : calcul manuel de positions pour la grille de cartes
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, RatesView};
use crate::config::{BASE_CURRENCIES, CARD_HEIGHT, CARD_SPACING, CARD_WIDTH};
use crate::models::RateCard;

/// Titre de l'application (barre du haut)
pub const APP_TITLE: &str = "Taux de change";

/// Dessine l'interface complète
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, chunks[0]);
    render_dropdown_field(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
    render_main_content(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);

    // Le popup est dessiné en dernier : il recouvre les cartes
    if app.is_dropdown_open() {
        render_dropdown_popup(frame, app, chunks[1]);
    }
}

/// Crée le layout principal
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Barre de titre
            Constraint::Length(3), // Menu déroulant
            Constraint::Length(1), // Statut
            Constraint::Min(0),    // Cartes
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Dessine la barre de titre (app bar)
fn render_header(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Indexed(54))))
    .style(Style::default().bg(Color::Indexed(54)))
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le champ du menu déroulant (fermé)
fn render_dropdown_field(frame: &mut Frame, app: &App, area: Rect) {
    let area = Rect {
        width: area.width.min(CARD_WIDTH),
        ..area
    };

    let border_color = if app.is_dropdown_open() { Color::Yellow } else { Color::Cyan };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Devise de base ");

    let line = match app.selected_base.as_deref() {
        Some(code) => Line::from(vec![
            Span::styled(code, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(" ▾", Style::default().fg(Color::Gray)),
        ]),
        None => Line::from(Span::styled(
            "Sélectionner... ▾",
            Style::default().fg(Color::Gray),
        )),
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Dessine la liste des devises sous le champ
fn render_dropdown_popup(frame: &mut Frame, app: &App, field: Rect) {
    let popup = dropdown_popup_area(field, frame.size());

    let items: Vec<ListItem> = BASE_CURRENCIES
        .iter()
        .enumerate()
        .map(|(index, code)| {
            let style = if index == app.dropdown_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(" {} {}", index + 1, code)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(list, popup);
}

/// Zone du popup : juste sous le champ, bornée par l'écran
fn dropdown_popup_area(field: Rect, screen: Rect) -> Rect {
    let y = field.y + field.height;
    let height = (BASE_CURRENCIES.len() as u16 + 2).min(screen.height.saturating_sub(y));
    Rect {
        x: field.x,
        y,
        width: field.width.min(CARD_WIDTH),
        height,
    }
}

/// Dessine la ligne de statut : chargement ou date des taux
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.is_loading {
        let message = app.loading_message.as_deref().unwrap_or("Chargement...");
        Line::from(Span::styled(
            format!("⏳ {}", message),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(fetched_at) = app.fetched_at {
        let date = app.rates_date.as_deref().unwrap_or("?");
        let published = app
            .last_updated
            .map(|updated| format!(" · publiés le {}", updated.format("%Y-%m-%d %H:%M UTC")))
            .unwrap_or_default();
        Line::from(Span::styled(
            format!(
                " Taux du {}{} · récupérés à {}",
                date,
                published,
                fetched_at.format("%H:%M:%S UTC")
            ),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Dessine les cartes ou le message d'erreur
fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match &app.view {
        RatesView::Idle => {}
        RatesView::Error(error) => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                error.message(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            frame.render_widget(paragraph, area);
        }
        RatesView::Displayed(cards) => {
            for (card, rect) in cards.iter().zip(card_grid(area, cards.len())) {
                render_card(frame, card, rect);
            }
        }
    }
}

/// Dessine une carte : code cible + texte de conversion
fn render_card(frame: &mut Frame, card: &RateCard, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            card.target.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.conversion_text(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Positionne les cartes en lignes qui reviennent à la ligne
///
/// CONCEPT : Wrap layout
/// - Autant de colonnes que la largeur le permet (au moins une)
/// - Les cartes qui dépassent en bas de la zone ne sont pas dessinées
pub fn card_grid(area: Rect, count: usize) -> Vec<Rect> {
    let width = CARD_WIDTH.min(area.width);
    if width == 0 || area.height < CARD_HEIGHT {
        return Vec::new();
    }

    let columns = ((area.width + CARD_SPACING) / (CARD_WIDTH + CARD_SPACING)).max(1) as usize;

    (0..count)
        .map_while(|index| {
            let row = (index / columns) as u16;
            let column = (index % columns) as u16;
            let y = area.y + row * CARD_HEIGHT;
            if y + CARD_HEIGHT > area.y + area.height {
                return None;
            }
            Some(Rect {
                x: area.x + column * (CARD_WIDTH + CARD_SPACING),
                y,
                width,
                height: CARD_HEIGHT,
            })
        })
        .collect()
}

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else if app.is_dropdown_open() {
        Line::from(vec![
            Span::styled("[↑↓ / j k]", key_style),
            Span::raw(" Naviguer  "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Choisir  "),
            Span::styled("[ESC]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Fermer"),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[Enter]", key_style),
            Span::raw(" Devise  "),
            Span::styled("[1-6]", key_style),
            Span::raw(" Choix direct  "),
            Span::styled("[r]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Actualiser"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DisplayError;
    use crate::models::RateSnapshot;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_card_grid_wraps() {
        // 100 colonnes : 3 cartes de 30 + espacement par ligne
        let area = Rect::new(0, 0, 100, 20);
        let rects = card_grid(area, 5);

        assert_eq!(rects.len(), 5);
        assert_eq!(rects[0], Rect::new(0, 0, 30, 4));
        assert_eq!(rects[2], Rect::new(62, 0, 30, 4));
        assert_eq!(rects[3], Rect::new(0, 4, 30, 4));
    }

    #[test]
    fn test_card_grid_narrow_and_short() {
        // Plus étroit qu'une carte : une colonne, largeur réduite
        let rects = card_grid(Rect::new(0, 0, 20, 8), 3);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[1], Rect::new(0, 4, 20, 4));

        assert!(card_grid(Rect::new(0, 0, 80, 3), 3).is_empty());
    }

    #[test]
    fn test_render_cards() {
        let mut app = App::new();
        app.select_base("USD");
        let published = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 1).unwrap();
        let snapshot = RateSnapshot::new("USD".to_string(), IndexMap::new())
            .with_metadata(Some("2026-10-16".to_string()), Some(published));
        app.show_rates(
            vec![
                RateCard::new("JPY".to_string(), "USD".to_string(), 150.1234),
                RateCard::new("CNY".to_string(), "USD".to_string(), 7.1),
            ],
            &snapshot,
        );

        let text = screen_text(&app);
        assert!(text.contains(APP_TITLE));
        assert!(text.contains("1 USD = 150.12 JPY"));
        assert!(text.contains("1 USD = 7.10 CNY"));
        assert!(text.contains("Taux du 2026-10-16"));
        assert!(text.contains("publiés le 2026-10-16 00:00 UTC"));
    }

    #[test]
    fn test_render_status_without_api_timestamp() {
        let mut app = App::new();
        let snapshot = RateSnapshot::new("EUR".to_string(), IndexMap::new());
        app.show_rates(Vec::new(), &snapshot);

        let text = screen_text(&app);
        assert!(text.contains("Taux du ?"));
        assert!(text.contains("récupérés à"));
        assert!(!text.contains("publiés le"));
    }

    #[test]
    fn test_render_error() {
        let mut app = App::new();
        app.show_error(DisplayError::NoBaseSelected);

        let text = screen_text(&app);
        assert!(text.contains(DisplayError::NoBaseSelected.message()));
        assert!(!text.contains("1 USD"));
    }

    #[test]
    fn test_render_dropdown_popup() {
        let mut app = App::new();
        app.open_dropdown();

        let text = screen_text(&app);
        for code in BASE_CURRENCIES {
            assert!(text.contains(code));
        }
    }
}
