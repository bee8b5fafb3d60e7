//! Report rendering: draws a `ReportLayout` to a single-page PDF.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use ranking_engine::report::{PAGE_HEIGHT_PT, PAGE_WIDTH_PT};
use ranking_engine::ReportLayout;

use crate::error::ScoutError;

/// Leaf output seam so the pipeline can run without touching the filesystem.
pub trait ReportRenderer: Send + Sync {
  /// Write the layout to `path` and return where it ended up.
  fn render(&self, layout: &ReportLayout, path: &Path) -> Result<PathBuf, ScoutError>;
}

impl<T: ReportRenderer + ?Sized> ReportRenderer for &T {
  fn render(&self, layout: &ReportLayout, path: &Path) -> Result<PathBuf, ScoutError> {
    (**self).render(layout, path)
  }
}

/// A4 PDF with the Helvetica builtin fonts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
  fn render(&self, layout: &ReportLayout, path: &Path) -> Result<PathBuf, ScoutError> {
    let (doc, page, layer) = PdfDocument::new(
      layout.title.as_str(),
      Mm::from(Pt(PAGE_WIDTH_PT)),
      Mm::from(Pt(PAGE_HEIGHT_PT)),
      "report",
    );
    let regular = doc
      .add_builtin_font(BuiltinFont::Helvetica)
      .map_err(|e| ScoutError::render(e.to_string()))?;
    let bold = doc
      .add_builtin_font(BuiltinFont::HelveticaBold)
      .map_err(|e| ScoutError::render(e.to_string()))?;

    let canvas = doc.get_page(page).get_layer(layer);
    for run in &layout.runs {
      let font = if run.style.is_bold() { &bold } else { &regular };
      canvas.use_text(
        run.text.as_str(),
        run.style.font_size(),
        Mm::from(Pt(run.x)),
        Mm::from(Pt(run.y)),
        font,
      );
    }

    let mut out = BufWriter::new(File::create(path)?);
    doc
      .save(&mut out)
      .map_err(|e| ScoutError::render(e.to_string()))?;
    Ok(path.to_path_buf())
  }
}
