//! Technical indicators over a closing-price sequence.
//!
//! Every series returned here has the same length as its input: values are
//! seeded from the first element instead of being lagged or truncated, so the
//! last element always lines up with the latest candle.

/// RSI value reported when there is no price change to measure.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Stand-in for a zero average gain or loss, keeps `RS` finite.
const RSI_EPSILON: f64 = 0.00001;

/// Exponential moving average with smoothing constant `k = 2 / (period + 1)`.
///
/// The first output equals the first input; each later output is
/// `v[i] * k + out[i - 1] * (1 - k)`.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;

    for &v in values {
        let next = match prev {
            None => v,
            Some(p) => v * k + p * (1.0 - k),
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

/// Relative strength index, EMA-smoothed.
///
/// Fewer than two values yields [`RSI_NEUTRAL`] for every element. Otherwise
/// the first element is the neutral seed (it has no previous close) and the
/// rest are `100 - 100 / (1 + avg_gain / avg_loss)`.
pub fn rsi(values: &[f64], period: usize) -> Vec<f64> {
    if values.len() < 2 {
        return vec![RSI_NEUTRAL; values.len()];
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = values
        .windows(2)
        .map(|w| {
            let diff = w[1] - w[0];
            (diff.max(0.0), (-diff).max(0.0))
        })
        .unzip();

    let avg_gain = ema(&gains, period);
    let avg_loss = ema(&losses, period);

    let mut out = Vec::with_capacity(values.len());
    out.push(RSI_NEUTRAL);
    for (&g, &l) in avg_gain.iter().zip(&avg_loss) {
        let rs = nonzero_or_epsilon(g) / nonzero_or_epsilon(l);
        out.push(100.0 - 100.0 / (1.0 + rs));
    }

    let fill = out.last().copied().unwrap_or(RSI_NEUTRAL);
    out.resize(values.len(), fill);
    out
}

fn nonzero_or_epsilon(v: f64) -> f64 {
    if v == 0.0 || v.is_nan() { RSI_EPSILON } else { v }
}

/// The three MACD series, index-aligned with the input closes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Macd {
    /// Fast EMA minus slow EMA.
    pub line: Vec<f64>,
    /// EMA of [`Macd::line`].
    pub signal: Vec<f64>,
    /// `line - signal`.
    pub hist: Vec<f64>,
}

/// Moving-average convergence/divergence.
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let ema_fast = ema(values, fast);
    let ema_slow = ema(values, slow);

    let line: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal);
    let hist = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();

    Macd {
        line,
        signal: signal_line,
        hist,
    }
}

/// Percent change from `b` to `a`. Either side missing gives `0`.
///
/// A zero `b` is not special-cased; callers that display the result decide
/// what to do with a non-finite value.
pub fn pct_change(a: Option<f64>, b: Option<f64>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => (a - b) / b * 100.0,
        _ => 0.0,
    }
}
