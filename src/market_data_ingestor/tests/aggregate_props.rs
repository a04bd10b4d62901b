use market_data_ingestor::{aggregate::aggregate, models::candle::Candle};
use proptest::prelude::*;

/// Well-formed candles one minute apart.
fn candles() -> impl Strategy<Value = Vec<Candle>> {
    proptest::collection::vec(
        (1.0f64..5000.0, 1.0f64..5000.0, 0.0f64..10.0, 0.0f64..10.0),
        0..300,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (open, close, up, down))| Candle {
                time: 1_700_000_000 + i as i64 * 60,
                open,
                high: open.max(close) + up,
                low: open.min(close) - down,
                close,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn size_one_is_identity(seq in candles()) {
        prop_assert_eq!(aggregate(&seq, 1), seq);
    }

    #[test]
    fn buckets_stay_well_formed(seq in candles(), minutes in 1u32..250) {
        for bucket in aggregate(&seq, minutes) {
            prop_assert!(bucket.is_well_formed(), "{:?}", bucket);
        }
    }

    #[test]
    fn bucket_count_and_edges(seq in candles(), minutes in 2u32..250) {
        let out = aggregate(&seq, minutes);
        let m = minutes as usize;
        prop_assert_eq!(out.len(), seq.len().div_ceil(m));

        for (i, bucket) in out.iter().enumerate() {
            let group = &seq[i * m..((i + 1) * m).min(seq.len())];
            prop_assert_eq!(bucket.time, group[0].time);
            prop_assert_eq!(bucket.open, group[0].open);
            prop_assert_eq!(bucket.close, group[group.len() - 1].close);
        }
    }

    #[test]
    fn times_stay_strictly_increasing(seq in candles(), minutes in 1u32..250) {
        let out = aggregate(&seq, minutes);
        prop_assert!(out.windows(2).all(|w| w[0].time < w[1].time));
    }
}
