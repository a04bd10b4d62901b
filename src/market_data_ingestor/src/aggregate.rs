//! Downsampling of candle series.
//!
//! Buckets are counted in candles, not in wall-clock time: a bucket size of
//! 15 merges every 15 consecutive source candles, whatever their spacing.

use crate::models::candle::Candle;

/// Merges consecutive groups of `minutes` candles into one candle each.
///
/// - `open` of the first candle, `close` of the last
/// - highest `high`, lowest `low`
/// - `time` of the first candle
///
/// A trailing partial group is still emitted. `minutes <= 1` returns the
/// input unchanged.
pub fn aggregate(candles: &[Candle], minutes: u32) -> Vec<Candle> {
    if minutes <= 1 {
        return candles.to_vec();
    }
    candles.chunks(minutes as usize).map(merge_bucket).collect()
}

// `chunks` never yields an empty slice.
fn merge_bucket(bucket: &[Candle]) -> Candle {
    let first = bucket[0];
    let last = bucket[bucket.len() - 1];
    let (high, low) = bucket
        .iter()
        .fold((f64::NEG_INFINITY, f64::INFINITY), |(h, l), c| {
            (h.max(c.high), l.min(c.low))
        });

    Candle {
        time: first.time,
        open: first.open,
        high,
        low,
        close: last.close,
    }
}
