use std::fmt;

/// Categorical trading decision derived from a model prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Sell,
    Buy,
    Hold,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Sell => write!(f, "SELL"),
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// Decision boundaries for mapping a prediction to a [`TradeAction`].
///
/// The inner band is inclusive: a prediction exactly on either threshold
/// resolves to HOLD. Numeric determinism tests depend on this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionThresholds {
    sell: f64,
    buy: f64,
}

impl DecisionThresholds {
    pub fn new(sell: f64, buy: f64) -> Result<Self, String> {
        if !sell.is_finite() || !buy.is_finite() {
            return Err(format!(
                "thresholds must be finite (sell={}, buy={})",
                sell, buy
            ));
        }
        if buy >= sell {
            return Err(format!(
                "buy threshold ({}) must be below sell threshold ({})",
                buy, sell
            ));
        }
        Ok(Self { sell, buy })
    }

    pub fn sell(&self) -> f64 {
        self.sell
    }

    pub fn buy(&self) -> f64 {
        self.buy
    }

    /// Pure, total decision function.
    pub fn decide(&self, prediction: f64) -> TradeAction {
        if prediction > self.sell {
            TradeAction::Sell
        } else if prediction < self.buy {
            TradeAction::Buy
        } else {
            TradeAction::Hold
        }
    }
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            sell: 1.05,
            buy: 0.95,
        }
    }
}

/// A trading decision together with the prediction it was derived from.
///
/// Ephemeral: exists only long enough to be rendered into a notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub action: TradeAction,
    pub prediction: f64,
}

impl Signal {
    pub fn from_prediction(prediction: f64, thresholds: &DecisionThresholds) -> Self {
        Self {
            action: thresholds.decide(prediction),
            prediction,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Signal: {} (predicted price ratio {:.4})",
            self.action, self.prediction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_above_sell_threshold() {
        let t = DecisionThresholds::default();
        assert_eq!(t.decide(1.10), TradeAction::Sell);
        assert_eq!(t.decide(1.0500001), TradeAction::Sell);
    }

    #[test]
    fn test_decide_below_buy_threshold() {
        let t = DecisionThresholds::default();
        assert_eq!(t.decide(0.90), TradeAction::Buy);
        assert_eq!(t.decide(0.9499999), TradeAction::Buy);
    }

    #[test]
    fn test_decide_inner_band_holds() {
        let t = DecisionThresholds::default();
        assert_eq!(t.decide(1.00), TradeAction::Hold);
        assert_eq!(t.decide(0.96), TradeAction::Hold);
    }

    #[test]
    fn test_boundary_values_resolve_to_hold() {
        let t = DecisionThresholds::default();
        assert_eq!(t.decide(1.05), TradeAction::Hold);
        assert_eq!(t.decide(0.95), TradeAction::Hold);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = DecisionThresholds::new(1.20, 0.80).unwrap();
        assert_eq!(t.decide(1.10), TradeAction::Hold);
        assert_eq!(t.decide(1.21), TradeAction::Sell);
        assert_eq!(t.decide(0.79), TradeAction::Buy);
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        assert!(DecisionThresholds::new(0.95, 1.05).is_err());
        assert!(DecisionThresholds::new(1.0, 1.0).is_err());
        assert!(DecisionThresholds::new(f64::NAN, 0.95).is_err());
        assert!(DecisionThresholds::new(f64::INFINITY, 0.95).is_err());
    }

    #[test]
    fn test_signal_rendering() {
        let signal = Signal::from_prediction(1.10, &DecisionThresholds::default());
        assert_eq!(signal.action, TradeAction::Sell);
        let text = signal.render();
        assert!(text.contains("SELL"));
        assert!(text.contains("1.1000"));
    }
}
