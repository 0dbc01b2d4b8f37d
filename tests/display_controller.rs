// ============================================================================
// Tests d'intégration : DisplayController + ExchangeRateFetcher
// ============================================================================
// Chaîne complète contre un serveur HTTP simulé (wiremock) :
// sélection -> requête GET -> filtrage allow-list -> cartes ou erreur
//
// Les tests sont synchrones comme la boucle TUI : le MockServer tourne sur
// un runtime dédié pendant que le fetcher bloque sur le sien
// ============================================================================

use std::time::Duration;

use lazyrates::api::ExchangeRateFetcher;
use lazyrates::app::{App, DisplayError, RatesView};
use lazyrates::config::FetcherConfig;
use lazyrates::controller::DisplayController;
use lazyrates::models::RateCard;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Champs dans cet ordre : le serveur est libéré avant son runtime
struct Harness {
    server: MockServer,
    runtime: Runtime,
}

impl Harness {
    fn start() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    fn mount(&self, base: &str, template: ResponseTemplate) {
        self.runtime.block_on(
            Mock::given(method("GET"))
                .and(path(format!("/v4/latest/{base}")))
                .respond_with(template)
                .mount(&self.server),
        );
    }

    fn mount_json(&self, base: &str, body: &str) {
        self.mount(base, ResponseTemplate::new(200).set_body_string(body.to_string()));
    }

    fn reset(&self) {
        self.runtime.block_on(self.server.reset());
    }

    fn request_count(&self) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .map(|requests| requests.len())
            .unwrap_or_default()
    }

    fn controller(&self) -> DisplayController<ExchangeRateFetcher> {
        let config = FetcherConfig::with_base_url(&self.server.uri()).request_pause(Duration::ZERO);
        DisplayController::new(ExchangeRateFetcher::new(config).unwrap())
    }
}

fn texts(app: &App) -> Vec<String> {
    app.cards().iter().map(RateCard::conversion_text).collect()
}

#[test]
fn displays_one_card_per_allowed_currency() {
    let harness = Harness::start();
    harness.mount_json(
        "USD",
        r#"{
            "base": "USD",
            "date": "2026-10-16",
            "time_last_updated": 1792108801,
            "rates": {"USD": 1, "AED": 3.67, "JPY": 150.1234, "ZAR": 17.4, "CNY": 7.1, "EUR": 0.92}
        }"#,
    );

    let mut controller = harness.controller();
    let mut app = App::new();
    controller.select_base_currency(&mut app, "USD");

    assert_eq!(
        texts(&app),
        vec![
            "1 USD = 1.00 USD",
            "1 USD = 150.12 JPY",
            "1 USD = 7.10 CNY",
            "1 USD = 0.92 EUR",
        ]
    );
    assert_eq!(app.rates_date.as_deref(), Some("2026-10-16"));
    assert_eq!(harness.request_count(), 1);
}

#[test]
fn server_error_clears_previous_cards() {
    let harness = Harness::start();
    harness.mount_json("USD", r#"{"rates": {"JPY": 150.1234, "CNY": 7.1}}"#);

    let mut controller = harness.controller();
    let mut app = App::new();
    controller.select_base_currency(&mut app, "USD");
    assert_eq!(app.cards().len(), 2);

    harness.mount("EUR", ResponseTemplate::new(503));
    controller.select_base_currency(&mut app, "EUR");

    assert_eq!(app.view, RatesView::Error(DisplayError::DataUnavailable));
    assert!(app.cards().is_empty());
}

#[test]
fn malformed_body_shows_data_unavailable() {
    let harness = Harness::start();
    harness.mount_json("GBP", r#"{"base": "GBP", "date": "2026-10-16"}"#);
    harness.mount_json("AUD", "not json at all");

    let mut controller = harness.controller();
    let mut app = App::new();

    controller.select_base_currency(&mut app, "GBP");
    assert_eq!(app.display_error(), Some(DisplayError::DataUnavailable));

    controller.select_base_currency(&mut app, "AUD");
    assert_eq!(app.display_error(), Some(DisplayError::DataUnavailable));
    assert!(app.cards().is_empty());
}

#[test]
fn missing_selection_never_hits_the_network() {
    let harness = Harness::start();

    let mut controller = harness.controller();
    let mut app = App::new();
    controller.update_exchange_rates(&mut app);

    assert_eq!(app.view, RatesView::Error(DisplayError::NoBaseSelected));
    assert!(app.cards().is_empty());
    assert_eq!(harness.request_count(), 0);
}

#[test]
fn reselecting_replaces_all_cards() {
    let harness = Harness::start();
    harness.mount_json("USD", r#"{"rates": {"JPY": 150.0, "EUR": 0.92, "GBP": 0.79}}"#);
    harness.mount_json("JPY", r#"{"rates": {"USD": 0.0067, "KRW": 9.1}}"#);

    let mut controller = harness.controller();
    let mut app = App::new();

    controller.select_base_currency(&mut app, "USD");
    assert_eq!(app.cards().len(), 3);

    controller.select_base_currency(&mut app, "JPY");
    assert_eq!(texts(&app), vec!["1 JPY = 0.01 USD"]);

    // Plus aucun mock : le serveur répond 404
    harness.reset();
    controller.select_base_currency(&mut app, "USD");
    assert_eq!(app.display_error(), Some(DisplayError::DataUnavailable));
    assert!(app.cards().is_empty());
}
