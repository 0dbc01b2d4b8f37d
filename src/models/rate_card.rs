// ============================================================================
// Structure : RateCard
// ============================================================================
// Une carte affichée pour une devise cible
// Format : "1 USD = 150.12 JPY"
// ============================================================================

/// Carte de conversion base -> cible
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    /// Devise cible (titre de la carte)
    pub target: String,

    /// Devise de base
    pub base: String,

    /// 1 base = rate cible
    pub rate: f64,
}

impl RateCard {
    pub fn new(target: String, base: String, rate: f64) -> Self {
        Self { target, base, rate }
    }

    /// Texte de conversion arrondi à deux décimales
    ///
    /// CONCEPT RUST : {:.2}
    /// - Précision fixe dans format!
    /// - Arrondi au plus proche (150.1234 -> 150.12)
    pub fn conversion_text(&self) -> String {
        format!("1 {} = {:.2} {}", self.base, self.rate, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_text_two_decimals() {
        let card = RateCard::new("JPY".to_string(), "USD".to_string(), 150.1234);
        assert_eq!(card.conversion_text(), "1 USD = 150.12 JPY");

        let card = RateCard::new("CNY".to_string(), "USD".to_string(), 7.1);
        assert_eq!(card.conversion_text(), "1 USD = 7.10 CNY");
    }

    #[test]
    fn test_conversion_text_rounds_up() {
        let card = RateCard::new("EUR".to_string(), "GBP".to_string(), 1.176);
        assert_eq!(card.conversion_text(), "1 GBP = 1.18 EUR");
    }
}
