//! PDF generation from markdown notes.
//!
//! Uses genpdf to render the notes to an A4 portrait document with styled
//! headings, bold spans, and bullet points.

use std::path::Path;

use anyhow::{Context, Result};
use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Style, StyledString};
use genpdf::{Document, Margins, PaperSize, SimplePageDecorator};
use tracing::info;

use crate::markdown::{segment, Segment};

/// Font sizes for PDF output (in points).
const BODY_SIZE: u8 = 11;
const H1_SIZE: u8 = 18;
const H2_SIZE: u8 = 14;
const H3_SIZE: u8 = 12;

/// Directories and family names probed for an embeddable font, in order.
const FONT_CANDIDATES: &[(&str, &str)] = &[
    ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
    ("/usr/share/fonts/liberation-sans", "LiberationSans"),
    ("/usr/share/fonts/liberation", "LiberationSans"),
    ("/usr/local/share/fonts/liberation", "LiberationSans"),
];

/// Write markdown-formatted notes to a PDF file.
///
/// # Errors
///
/// Returns an error if:
/// - No suitable font can be loaded from the system
/// - The PDF file cannot be written to the specified path
pub fn write_pdf(path: &Path, notes: &str, margin_mm: f64) -> Result<()> {
    info!(
        path = %path.display(),
        content_length = notes.len(),
        "Generating PDF notes"
    );

    let font_family =
        load_font_family().context("Failed to load a system font for PDF generation")?;

    let mut doc = Document::new(font_family);
    doc.set_title("TubeNotes");
    doc.set_paper_size(PaperSize::A4);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(margin_mm, margin_mm, margin_mm, margin_mm));
    doc.set_page_decorator(decorator);

    // Inline segments accumulate into one paragraph until the line ends;
    // block segments flush directly.
    let mut para: Option<Paragraph> = None;
    let mut after_block = false;

    for seg in segment(notes) {
        match seg {
            Segment::Heading(level, text) => {
                let size = match level {
                    1 => H1_SIZE,
                    2 => H2_SIZE,
                    _ => H3_SIZE,
                };
                doc.push(Paragraph::new(StyledString::new(
                    text,
                    Style::new().bold().with_font_size(size),
                )));
                after_block = true;
            }
            Segment::Bullet(text) => {
                doc.push(Paragraph::new(StyledString::new(
                    format!("  \u{2022}  {}", text),
                    Style::new().with_font_size(BODY_SIZE),
                )));
                after_block = true;
            }
            Segment::Bold(text) => {
                para.get_or_insert_with(Paragraph::default)
                    .push_styled(text, Style::new().bold().with_font_size(BODY_SIZE));
            }
            Segment::Text(text) => {
                para.get_or_insert_with(Paragraph::default)
                    .push_styled(text, Style::new().with_font_size(BODY_SIZE));
            }
            Segment::Break => {
                if let Some(p) = para.take() {
                    doc.push(p);
                } else if after_block {
                    // The break that terminates a heading or bullet line.
                } else {
                    doc.push(Break::new(0.5));
                }
                after_block = false;
            }
        }
    }
    if let Some(p) = para.take() {
        doc.push(p);
    }

    doc.render_to_file(path)
        .with_context(|| format!("Failed to render PDF to {}", path.display()))?;

    info!(path = %path.display(), "PDF notes saved");
    Ok(())
}

/// Load a font family for PDF generation.
///
/// Probes Liberation Sans locations first, then falls back to DejaVu Sans,
/// whose files do not follow the `{family}-Italic.ttf` naming scheme and are
/// loaded individually.
fn load_font_family() -> Result<FontFamily<FontData>> {
    for (dir, family) in FONT_CANDIDATES {
        if Path::new(dir).is_dir() {
            if let Ok(fonts) = genpdf::fonts::from_files(dir, family, None) {
                return Ok(fonts);
            }
        }
    }

    load_dejavu()
}

fn load_dejavu() -> Result<FontFamily<FontData>> {
    let dir = Path::new("/usr/share/fonts/truetype/dejavu");

    let load = |file: &str| -> Result<FontData> {
        let path = dir.join(file);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read font: {}", path.display()))?;
        FontData::new(bytes, None)
            .with_context(|| format!("Failed to parse font: {}", path.display()))
    };

    Ok(FontFamily {
        regular: load("DejaVuSans.ttf")?,
        bold: load("DejaVuSans-Bold.ttf")?,
        italic: load("DejaVuSans-Oblique.ttf")?,
        bold_italic: load("DejaVuSans-BoldOblique.ttf")?,
    })
}
