use std::io::Write;

use anyhow::Context;

use super::Renderer;
use crate::view::DashboardView;

/// Writes the view model as pretty JSON, one document per render.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &DashboardView) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, view).context("failed to serialize view")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
