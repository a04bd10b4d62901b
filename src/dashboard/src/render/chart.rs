//! ASCII candlestick chart.

use market_data_ingestor::models::candle::Candle;

const UP_BODY: char = '█';
const DOWN_BODY: char = '░';
const WICK: char = '│';

/// Draws the last `max_width` candles in `height` rows, one column per candle.
///
/// Each row starts with a price axis label; the top and bottom rows carry the
/// series high and low. A flat series is drawn on the top row.
pub fn render_candles(candles: &[Candle], height: usize, max_width: usize) -> Vec<String> {
    let height = height.max(2);
    let start = candles.len().saturating_sub(max_width);
    let candles = &candles[start..];
    if candles.is_empty() {
        return vec!["(no data)".to_string()];
    }

    let (hi, lo) = candles
        .iter()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(h, l), c| {
            (h.max(c.high), l.min(c.low))
        });
    let range = if hi > lo { hi - lo } else { 1.0 };
    let rows = (height - 1) as f64;
    let row_of = |price: f64| (((hi - price) / range) * rows).round() as usize;

    let columns: Vec<[usize; 4]> = candles
        .iter()
        .map(|c| {
            [
                row_of(c.high),
                row_of(c.open.max(c.close)),
                row_of(c.open.min(c.close)),
                row_of(c.low),
            ]
        })
        .collect();

    let hi_label = format!("{hi:.2}");
    let lo_label = format!("{lo:.2}");
    let axis_width = hi_label.len().max(lo_label.len());

    (0..height)
        .map(|r| {
            let label = match r {
                0 => hi_label.as_str(),
                r if r == height - 1 => lo_label.as_str(),
                _ => "",
            };
            let mut line = format!("{label:>axis_width$} ┤");
            for (c, rows) in candles.iter().zip(&columns) {
                let [wick_top, body_top, body_bottom, wick_bottom] = rows;
                let glyph = if (*body_top..=*body_bottom).contains(&r) {
                    if c.close >= c.open { UP_BODY } else { DOWN_BODY }
                } else if (*wick_top..=*wick_bottom).contains(&r) {
                    WICK
                } else {
                    ' '
                };
                line.push(glyph);
            }
            line.trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle {
            time: 0,
            open,
            high,
            low,
            close,
        }
    }

    #[test]
    fn empty_series() {
        assert_eq!(render_candles(&[], 10, 40), vec!["(no data)"]);
    }

    #[test]
    fn draws_bodies_and_wicks() {
        let candles = [c(10.0, 14.0, 10.0, 12.0), c(12.0, 12.0, 6.0, 8.0)];
        let lines = render_candles(&candles, 5, 40);

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines,
            vec![
                "14.00 ┤│",
                "      ┤█░",
                "      ┤█░",
                "      ┤ ░",
                " 6.00 ┤ │",
            ]
        );
    }

    #[test]
    fn keeps_only_the_latest_candles() {
        let candles: Vec<Candle> = (0..10_i32)
            .map(|i| c(1.0, 2.0, 0.0, 1.0 + f64::from(i) * 0.01))
            .collect();
        let lines = render_candles(&candles, 3, 4);
        assert_eq!(lines[0], "2.00 ┤││││");
    }

    #[test]
    fn flat_series_does_not_divide_by_zero() {
        let lines = render_candles(&[c(5.0, 5.0, 5.0, 5.0)], 4, 10);
        assert_eq!(lines[0], "5.00 ┤█");
        assert_eq!(lines.len(), 4);
    }
}
