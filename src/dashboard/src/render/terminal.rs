use std::io::Write;

use anyhow::Context;

use super::{
    DISCLAIMER, Renderer, SIGNAL_RULES, chart::render_candles, fmt_change, fmt_opt, fmt_price,
    fmt_score,
};
use crate::view::DashboardView;

/// Plain-text cards followed by a candlestick chart of the active tab.
pub struct TerminalRenderer<W: Write> {
    out: W,
    chart_height: usize,
    chart_width: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            chart_height: 12,
            chart_width: 72,
        }
    }

    pub fn with_chart_size(mut self, height: usize, width: usize) -> Self {
        self.chart_height = height;
        self.chart_width = width;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_view(&mut self, v: &DashboardView) -> std::io::Result<()> {
        let out = &mut self.out;

        write!(out, "Gold Dashboard: Buy/Sell | {}", v.asset_label)?;
        if v.loading {
            write!(out, "  [refreshing...]")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "Consolidated view of candles, indicators and news. Updated {}",
            v.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        writeln!(out, "\n== Current price ==")?;
        writeln!(
            out,
            "  {}  {}",
            fmt_price(v.price.now),
            fmt_change(v.price.change_pct)
        )?;

        let basis = v.indicator_basis.as_deref().unwrap_or("-");
        let ind = &v.indicators;
        writeln!(out, "\n== Indicators ({basis}) ==")?;
        writeln!(
            out,
            "  EMA 20  {:>10}    EMA 50     {:>10}",
            fmt_opt(ind.ema20, 2),
            fmt_opt(ind.ema50, 2)
        )?;
        writeln!(
            out,
            "  RSI 14  {:>10}    MACD Hist  {:>10}",
            fmt_opt(ind.rsi14, 1),
            fmt_opt(ind.macd_hist, 3)
        )?;

        writeln!(out, "\n== Consolidated signal ==")?;
        writeln!(
            out,
            "  [{}]  score {:.2}",
            v.signal.label, v.signal.score
        )?;

        let tabs: Vec<String> = v
            .tabs
            .iter()
            .map(|t| {
                if t.active {
                    format!("[{}]", t.label)
                } else {
                    t.label.clone()
                }
            })
            .collect();
        writeln!(out, "\n== Candles: {} ==", tabs.join(" "))?;
        let candles = v.active_tab().map(|t| t.candles.as_slice()).unwrap_or_default();
        for line in render_candles(candles, self.chart_height, self.chart_width) {
            writeln!(out, "  {line}")?;
        }

        writeln!(
            out,
            "\n== News (sentiment: {:.1}) ==",
            v.sentiment_sum as f64
        )?;
        if v.news.is_empty() {
            writeln!(out, "  (no headlines)")?;
        }
        for n in &v.news {
            writeln!(out, "  {}  {:>3}  {}", n.published, fmt_score(n.score), n.title)?;
        }

        writeln!(out, "\n== Signal rules ==")?;
        for (label, rule) in SIGNAL_RULES {
            writeln!(out, "  {label} when: {rule}")?;
        }
        writeln!(out, "  {DISCLAIMER}")?;
        out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        self.write_view(view).context("failed to write dashboard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DashboardConfig, state::MarketSnapshot};

    #[test]
    fn empty_view_shows_placeholders() {
        let cfg = DashboardConfig::default();
        let view = DashboardView::build(&MarketSnapshot::empty("XAUUSD"), &cfg, None, false);

        let mut r = TerminalRenderer::new(Vec::new());
        r.render(&view).unwrap();
        let text = String::from_utf8(r.into_inner()).unwrap();

        assert!(text.starts_with("Gold Dashboard: Buy/Sell | Gold (XAUUSD)\n"));
        assert!(text.contains("== Current price ==\n  —  0.00%\n"));
        assert!(text.contains("== Indicators (-) =="));
        assert!(text.contains("  EMA 20           —    EMA 50              —\n"));
        assert!(text.contains("[Neutral]  score 0.00"));
        assert!(text.contains("== Candles: [Hour] Day Week Fortnight Month =="));
        assert!(text.contains("(no data)"));
        assert!(text.contains("== News (sentiment: 0.0) ==\n  (no headlines)"));
        assert!(text.contains("Buy when: EMA20 > EMA50"));
        assert!(text.trim_end().ends_with(DISCLAIMER));
    }

    #[test]
    fn loading_flag_is_visible() {
        let cfg = DashboardConfig::default();
        let view = DashboardView::build(&MarketSnapshot::empty("GLD"), &cfg, Some("1w"), true);

        let mut r = TerminalRenderer::new(Vec::new()).with_chart_size(4, 10);
        r.render(&view).unwrap();
        let text = String::from_utf8(r.into_inner()).unwrap();

        assert!(text.lines().next().unwrap().ends_with("[refreshing...]"));
        assert!(text.contains("Hour Day [Week] Fortnight Month"));
    }
}
