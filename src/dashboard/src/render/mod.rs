//! Output backends for a [`DashboardView`].

pub mod chart;
pub mod json;
pub mod terminal;

pub use json::JsonRenderer;
pub use terminal::TerminalRenderer;

use crate::view::DashboardView;

/// Shown wherever a value could not be computed.
pub const PLACEHOLDER: &str = "—";

/// Signal rules card, one `(label, condition)` row per outcome.
pub const SIGNAL_RULES: [(&str, &str); 3] = [
    (
        "Buy",
        "EMA20 > EMA50, MACD Hist > 0, RSI 50-70 and sentiment >= 0.",
    ),
    (
        "Sell",
        "EMA20 < EMA50, MACD Hist < 0, RSI < 45 or sentiment < 0.",
    ),
    ("Neutral", "mixed signals, wait for confirmation."),
];

pub const DISCLAIMER: &str =
    "*Educational dashboard. Not financial advice. Adjust the rules to your own risk profile.";

pub trait Renderer {
    fn render(&mut self, view: &DashboardView) -> anyhow::Result<()>;
}

/// `value` with `decimals` places, or [`PLACEHOLDER`] when absent.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// Price KPI: a zero price means nothing was loaded.
pub fn fmt_price(price: f64) -> String {
    if price == 0.0 {
        PLACEHOLDER.to_string()
    } else {
        format!("{price:.2}")
    }
}

/// Signed percent change, `0.00%` when not finite.
pub fn fmt_change(pct: f64) -> String {
    if pct.is_finite() {
        format!("{pct:+.2}%")
    } else {
        "0.00%".to_string()
    }
}

/// Headline score with an explicit `+` for positive values.
pub fn fmt_score(score: i64) -> String {
    if score > 0 {
        format!("+{score}")
    } else {
        score.to_string()
    }
}
