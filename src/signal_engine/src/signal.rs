//! Rule-based Buy/Sell/Neutral signal.
//!
//! A linear heuristic, not a validated model: each indicator votes `+1`,
//! `-1` or `0`, half the news sentiment is added on top, and the total is
//! bucketed into a [`SignalLabel`].

use std::fmt;

use serde::Serialize;

use crate::snapshot::IndicatorSnapshot;

/// Score at or above which the signal reads Buy (and at or below the negation, Sell).
pub const SIGNAL_THRESHOLD: f64 = 1.0;

/// Discrete recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalLabel {
    /// Score `>= 1`.
    Buy,
    /// Score `<= -1`.
    Sell,
    /// Mixed signals.
    Neutral,
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalLabel::Buy => "Buy",
            SignalLabel::Sell => "Sell",
            SignalLabel::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

/// Consolidated score and its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signal {
    /// Sum of the individual votes plus `sentiment / 2`.
    pub score: f64,
    /// Bucketed score.
    pub label: SignalLabel,
}

/// Blends the latest indicators with the summed news sentiment.
///
/// Absent indicators do not vote. Equal EMAs vote `-1`, the comparison is a
/// strict greater-than.
pub fn combine(ind: &IndicatorSnapshot, sentiment_sum: i64) -> Signal {
    let mut score = 0.0;

    if let (Some(fast), Some(slow)) = (ind.ema20, ind.ema50) {
        score += if fast > slow { 1.0 } else { -1.0 };
    }
    if let Some(hist) = ind.macd_hist {
        score += if hist > 0.0 { 1.0 } else { -1.0 };
    }
    if let Some(rsi) = ind.rsi14 {
        score += if rsi > 50.0 && rsi < 70.0 {
            1.0
        } else if rsi < 45.0 {
            -1.0
        } else {
            0.0
        };
    }
    score += sentiment_sum as f64 / 2.0;

    Signal {
        score,
        label: label_for(score),
    }
}

/// Buckets a raw score.
pub fn label_for(score: f64) -> SignalLabel {
    if score >= SIGNAL_THRESHOLD {
        SignalLabel::Buy
    } else if score <= -SIGNAL_THRESHOLD {
        SignalLabel::Sell
    } else {
        SignalLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ind(ema20: f64, ema50: f64, hist: f64, rsi: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            ema20: Some(ema20),
            ema50: Some(ema50),
            macd_hist: Some(hist),
            rsi14: Some(rsi),
            ..Default::default()
        }
    }

    #[test]
    fn all_bullish_votes_buy() {
        let s = combine(&ind(105.0, 100.0, 0.5, 60.0), 0);
        assert_eq!(s.score, 3.0);
        assert_eq!(s.label, SignalLabel::Buy);
    }

    #[test]
    fn equal_emas_vote_down() {
        let s = combine(&ind(100.0, 100.0, 0.5, 47.0), 0);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.label, SignalLabel::Neutral);
    }

    #[test]
    fn zero_histogram_votes_down() {
        let s = combine(&ind(101.0, 100.0, 0.0, 47.0), 0);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn rsi_bands() {
        let at = |rsi| {
            let ind = IndicatorSnapshot {
                rsi14: Some(rsi),
                ..Default::default()
            };
            combine(&ind, 0).score
        };
        assert_eq!(at(60.0), 1.0);
        assert_eq!(at(50.0), 0.0);
        assert_eq!(at(45.0), 0.0);
        assert_eq!(at(44.9), -1.0);
        assert_eq!(at(70.0), 0.0);
        assert_eq!(at(85.0), 0.0);
    }

    #[test]
    fn sentiment_adds_half_unrounded() {
        let s = combine(&IndicatorSnapshot::default(), 3);
        assert_eq!(s.score, 1.5);
        assert_eq!(s.label, SignalLabel::Buy);

        let s = combine(&IndicatorSnapshot::default(), -1);
        assert_eq!(s.score, -0.5);
        assert_eq!(s.label, SignalLabel::Neutral);
    }

    #[test]
    fn all_bearish_votes_sell() {
        let s = combine(&ind(95.0, 100.0, -0.2, 30.0), -2);
        assert_eq!(s.score, -4.0);
        assert_eq!(s.label, SignalLabel::Sell);
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(label_for(1.0), SignalLabel::Buy);
        assert_eq!(label_for(0.999), SignalLabel::Neutral);
        assert_eq!(label_for(-1.0), SignalLabel::Sell);
    }

    #[test]
    fn serializes_for_renderers() {
        let s = combine(&ind(105.0, 100.0, 0.5, 60.0), 0);
        insta::assert_json_snapshot!(s, @r#"
        {
          "score": 3.0,
          "label": "Buy"
        }
        "#);
    }
}
