use crate::core::layout::DocumentLayout;
use crate::core::metrics::FontFace;
use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info};
use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const LAYER_NAME: &str = "Layer 1";

struct Fonts {
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> anyhow::Result<Self> {
        let load = |face: FontFace| {
            doc.add_builtin_font(face.builtin())
                .map_err(|e| anyhow::anyhow!("Failed to load font {:?}: {:?}", face, e))
        };
        Ok(Self {
            bold: load(FontFace::HelveticaBold)?,
            mono: load(FontFace::Courier)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::HelveticaBold => &self.bold,
            FontFace::Courier => &self.mono,
        }
    }
}

/// Serialise a laid-out document to PDF bytes.
pub fn render_pdf(layout: &DocumentLayout) -> anyhow::Result<Vec<u8>> {
    let width = Mm(layout.geometry.width_mm);
    let height = Mm(layout.geometry.height_mm);

    let (doc, first_page, first_layer) =
        PdfDocument::new(layout.title.as_str(), width, height, LAYER_NAME);
    let fonts = Fonts::load(&doc)?;

    for (i, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for run in &page.runs {
            layer.use_text(
                run.text.as_str(),
                run.size_pt,
                Mm(run.x_mm),
                Mm(layout.geometry.height_mm - run.baseline_mm),
                fonts.get(run.font),
            );
        }
    }

    debug!("Serialising {} pages", layout.pages.len());
    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("Failed to render PDF: {:?}", e))
}

/// Write the document to `path`, replacing whatever is there.
pub fn write_output(layout: &DocumentLayout, path: &Path) -> anyhow::Result<()> {
    let bytes = render_pdf(layout)?;
    debug!("Writing {} bytes to {}", bytes.len(), path.display());
    fs::write(path, &bytes)
        .with_context(|| format!("Failed to write output file {}", path.display()))?;
    info!("Output written to file: {}", path.display());
    Ok(())
}

pub fn print_success(path: &Path) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(SetForegroundColor(Color::Green))?;
    writeln!(stdout, "✅ PDF successfully created: {}", path.display())?;
    stdout.execute(ResetColor)?;
    Ok(())
}
