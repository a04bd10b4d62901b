//! Keyword sentiment for news headlines.
//!
//! Scoring is a plain substring count over two fixed vocabularies. A term
//! that happens to be contained in another term is counted on its own, and
//! each term counts at most once per text.

/// Terms that add one point when present.
pub const POSITIVE_TERMS: [&str; 7] = [
    "otimista",
    "alta",
    "subida",
    "cresce",
    "recorde",
    "acima",
    "fluxo comprador",
];

/// Terms that subtract one point when present.
pub const NEGATIVE_TERMS: [&str; 7] = [
    "queda",
    "baixa",
    "crise",
    "alerta",
    "abaixo",
    "despenca",
    "fluxo vendedor",
];

/// Scores `text` against [`POSITIVE_TERMS`] and [`NEGATIVE_TERMS`].
pub fn simple_sentiment(text: &str) -> i64 {
    let text = text.to_lowercase();
    let hits = |terms: &[&str]| terms.iter().filter(|t| text.contains(*t)).count() as i64;
    hits(&POSITIVE_TERMS) - hits(&NEGATIVE_TERMS)
}

/// Total score across a set of already scored items.
pub fn sentiment_sum<I>(scores: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    scores.into_iter().sum()
}
