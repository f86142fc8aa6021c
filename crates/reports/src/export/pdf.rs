//! Printable report: title, store header block, bordered and striped
//! table, optional total row and signature lines.
//!
//! Layout is computed first as plain data ([`PdfLayout`]) and then drawn
//! with `printpdf`, so page breaking and cell text can be checked without
//! parsing PDF output. Texts in the layout are exactly the strings drawn.

use std::borrow::Cow;
use std::io::{BufWriter, Cursor};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

use crate::export::{DocumentMeta, ExportError};
use crate::model::{ReportRow, ReportSpec, SummaryTotals};

const MARGIN: f32 = 12.0;
const ROW_HEIGHT: f32 = 7.0;
const TABLE_FONT: f32 = 8.5;
const TITLE_FONT: f32 = 16.0;
const META_FONT: f32 = 9.5;
/// Average Helvetica glyph width relative to the font size, in mm per pt
const CHAR_WIDTH: f32 = 0.5 * 0.3528;
/// Columns wider than this many characters are clipped
const MAX_COLUMN_CHARS: usize = 40;
const SIGNATURE_WIDTH: f32 = 50.0;

/// TrueType faces embedded in the PDF
#[derive(Clone, PartialEq)]
pub struct PdfFont {
    pub regular: Cow<'static, [u8]>,
    pub bold: Cow<'static, [u8]>,
}

impl PdfFont {
    /// DejaVu Sans, which covers the rupee sign
    pub fn bundled() -> Self {
        Self {
            regular: Cow::Borrowed(include_bytes!("../../assets/fonts/DejaVuSans.ttf")),
            bold: Cow::Borrowed(include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf")),
        }
    }
}

impl std::fmt::Debug for PdfFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfFont")
            .field("regular", &self.regular.len())
            .field("bold", &self.bold.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub from: (f32, f32),
    pub to: (f32, f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillItem {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shade: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub texts: Vec<TextItem>,
    pub lines: Vec<LineItem>,
    pub fills: Vec<FillItem>,
    /// Display cells of the table header row drawn on this page
    pub header_cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub width: f32,
    pub height: f32,
    pub pages: Vec<PageLayout>,
}

pub fn encode_pdf(
    spec: &ReportSpec,
    rows: &[ReportRow],
    totals: Option<&SummaryTotals>,
    meta: &DocumentMeta,
) -> Result<Vec<u8>, ExportError> {
    let layout = layout_pdf(spec, rows, totals, meta);
    render(&spec.title, &layout, meta.font.as_ref())
}

/// Landscape once the table gets wide
fn page_size(columns: usize) -> (f32, f32) {
    if columns > 6 {
        (297.0, 210.0)
    } else {
        (210.0, 297.0)
    }
}

fn column_widths(header: &[String], body: &[Vec<String>], table_width: f32) -> Vec<f32> {
    let weights: Vec<f32> = (0..header.len())
        .map(|i| {
            let longest = body
                .iter()
                .filter_map(|r| r.get(i))
                .chain(std::iter::once(&header[i]))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(1);
            longest.clamp(4, MAX_COLUMN_CHARS) as f32
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.iter().map(|w| w / total * table_width).collect()
}

/// Flatten line breaks and clip to what fits in `width`
fn fit_text(text: &str, width: f32, size: f32) -> String {
    let flat = text.replace('\n', ", ");
    let max_chars = ((width - 2.0) / (size * CHAR_WIDTH)).floor().max(1.0) as usize;
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let keep = max_chars.saturating_sub(2).max(1);
        let mut clipped: String = flat.chars().take(keep).collect();
        clipped.push_str("..");
        clipped
    }
}

struct PageCursor {
    pages: Vec<PageLayout>,
    y: f32,
    height: f32,
    /// Text is drawn with an embedded TrueType font
    embedded: bool,
}

impl PageCursor {
    fn current(&mut self) -> &mut PageLayout {
        // invariant: at least one page exists
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = self.height - MARGIN;
    }

    /// `text` as the selected font can draw it
    fn drawable(&self, text: &str) -> String {
        if self.embedded {
            text.to_string()
        } else {
            builtin_safe(text)
        }
    }

    fn text(&mut self, text: String, x: f32, size: f32, bold: bool) {
        let text = self.drawable(&text);
        let y = self.y;
        self.current().texts.push(TextItem {
            text,
            x,
            y,
            size,
            bold,
        });
    }
}

pub fn layout_pdf(
    spec: &ReportSpec,
    rows: &[ReportRow],
    totals: Option<&SummaryTotals>,
    meta: &DocumentMeta,
) -> PdfLayout {
    let header = spec.header_labels();
    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| spec.display_row(i, row))
        .collect();

    let (width, height) = page_size(header.len());
    let table_width = width - 2.0 * MARGIN;
    let widths = column_widths(&header, &body, table_width);

    let mut cursor = PageCursor {
        pages: vec![PageLayout::default()],
        y: height - MARGIN,
        height,
        embedded: meta.font.is_some(),
    };

    // Title and store header block
    cursor.y -= 6.0;
    cursor.text(spec.title.clone(), MARGIN, TITLE_FONT, true);
    cursor.text(
        format!("Date: {}", meta.generated_on.format(&spec.format.date_format)),
        width - MARGIN - 40.0,
        META_FONT,
        false,
    );
    cursor.y -= 7.0;
    for line in meta.business.header_lines() {
        cursor.text(line, MARGIN, META_FONT, false);
        cursor.y -= 4.5;
    }
    cursor.y -= 4.0;

    let bottom = MARGIN + ROW_HEIGHT;

    draw_row(&mut cursor, &header, &widths, Some(0.82), true);
    cursor.current().header_cells = header.clone();

    for (i, cells) in body.iter().enumerate() {
        if cursor.y - ROW_HEIGHT < bottom {
            cursor.new_page();
            draw_row(&mut cursor, &header, &widths, Some(0.82), true);
            cursor.current().header_cells = header.clone();
        }
        let stripe = if i % 2 == 1 { Some(0.95) } else { None };
        draw_row(&mut cursor, cells, &widths, stripe, false);
    }

    if let Some(totals) = totals.filter(|t| !t.sums.is_empty()) {
        if cursor.y - ROW_HEIGHT < bottom {
            cursor.new_page();
        }
        let cells = spec.total_cells(totals, "Total");
        draw_row(&mut cursor, &cells, &widths, Some(0.88), true);
    }

    if !meta.signatures.is_empty() {
        let space = 25.0;
        if cursor.y - space < MARGIN {
            cursor.new_page();
        }
        cursor.y -= space;
        let slot = table_width / meta.signatures.len() as f32;
        for (i, label) in meta.signatures.iter().enumerate() {
            let x = MARGIN + slot * i as f32 + (slot - SIGNATURE_WIDTH).max(0.0) / 2.0;
            let y = cursor.y;
            cursor.current().lines.push(LineItem {
                from: (x, y),
                to: (x + SIGNATURE_WIDTH.min(slot), y),
            });
            cursor.y -= 4.5;
            cursor.text(label.clone(), x, META_FONT, false);
            cursor.y += 4.5;
        }
    }

    PdfLayout {
        width,
        height,
        pages: cursor.pages,
    }
}

fn draw_row(
    cursor: &mut PageCursor,
    cells: &[String],
    widths: &[f32],
    shade: Option<f32>,
    bold: bool,
) {
    let top = cursor.y;
    let bottom_y = top - ROW_HEIGHT;
    let table_width: f32 = widths.iter().sum();
    let texts: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| fit_text(&cursor.drawable(cell), *w, TABLE_FONT))
        .collect();
    let page = cursor.current();

    if let Some(shade) = shade {
        page.fills.push(FillItem {
            x: MARGIN,
            y: bottom_y,
            width: table_width,
            height: ROW_HEIGHT,
            shade,
        });
    }

    // top and bottom borders
    page.lines.push(LineItem {
        from: (MARGIN, top),
        to: (MARGIN + table_width, top),
    });
    page.lines.push(LineItem {
        from: (MARGIN, bottom_y),
        to: (MARGIN + table_width, bottom_y),
    });

    let mut x = MARGIN;
    page.lines.push(LineItem {
        from: (x, top),
        to: (x, bottom_y),
    });
    for (text, w) in texts.into_iter().zip(widths) {
        page.texts.push(TextItem {
            text,
            x: x + 1.0,
            y: bottom_y + 2.2,
            size: TABLE_FONT,
            bold,
        });
        x += w;
        page.lines.push(LineItem {
            from: (x, top),
            to: (x, bottom_y),
        });
    }

    cursor.y = bottom_y;
}

/// Built-in PDF fonts only cover Latin-1
fn builtin_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '₹' => out.push_str("Rs."),
            c if (c as u32) < 0x100 => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn render(title: &str, layout: &PdfLayout, font: Option<&PdfFont>) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(layout.width), Mm(layout.height), "Layer 1");

    let (regular, bold) = match font {
        Some(font) => (
            doc.add_external_font(Cursor::new(font.regular.as_ref()))
                .map_err(|e| ExportError::Pdf(e.to_string()))?,
            doc.add_external_font(Cursor::new(font.bold.as_ref()))
                .map_err(|e| ExportError::Pdf(e.to_string()))?,
        ),
        None => (
            doc.add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ExportError::Pdf(e.to_string()))?,
            doc.add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ExportError::Pdf(e.to_string()))?,
        ),
    };

    for (i, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(layout.width), Mm(layout.height), "Layer 1")
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        draw_page(&layer, page, &regular, &bold);
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &PageLayout,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for fill in &page.fills {
        layer.set_fill_color(Color::Rgb(Rgb::new(fill.shade, fill.shade, fill.shade, None)));
        layer.add_rect(Rect::new(
            Mm(fill.x),
            Mm(fill.y),
            Mm(fill.x + fill.width),
            Mm(fill.y + fill.height),
        ));
    }

    layer.set_outline_color(Color::Rgb(Rgb::new(0.55, 0.55, 0.55, None)));
    layer.set_outline_thickness(0.4);
    for line in &page.lines {
        layer.add_line(Line {
            points: vec![
                (Point::new(Mm(line.from.0), Mm(line.from.1)), false),
                (Point::new(Mm(line.to.0), Mm(line.to.1)), false),
            ],
            is_closed: false,
        });
    }

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    for item in &page.texts {
        let font = if item.bold { bold } else { regular };
        layer.use_text(item.text.as_str(), item.size, Mm(item.x), Mm(item.y), font);
    }
}
