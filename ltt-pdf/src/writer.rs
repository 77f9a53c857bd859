//! Single-page document assembly on top of `pdf-writer`.
//!
//! Only the standard Helvetica fonts are used, so no font program is
//! embedded. Text is encoded in WinAnsi to match the font dictionaries.

use chrono::{DateTime, Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

/// A4 portrait in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

/// Font resource names used in the content stream.
pub const BODY_FONT: Name<'static> = Name(b"F1");
pub const TITLE_FONT: Name<'static> = Name(b"F2");

/// Text placed on the page, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub font: Name<'static>,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Document information dictionary entries.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    pub created_at: DateTime<Utc>,
}

/// Writes a complete single-page document containing `runs`.
pub fn write_document(
    runs: &[TextRun],
    info: &DocumentInfo,
) -> Vec<u8> {
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let body_font_id = Ref::new(4);
    let title_font_id = Ref::new(5);
    let content_id = Ref::new(6);
    let info_id = Ref::new(7);

    let mut pdf = Pdf::new();
    pdf.set_version(1, 4);

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources()
        .fonts()
        .pair(BODY_FONT, body_font_id)
        .pair(TITLE_FONT, title_font_id);
    page.finish();

    for (id, base_font) in [
        (body_font_id, Name(b"Helvetica")),
        (title_font_id, Name(b"Helvetica-Bold")),
    ] {
        pdf.type1_font(id)
            .base_font(base_font)
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    pdf.stream(content_id, &content_stream(runs));

    pdf.document_info(info_id)
        .title(TextStr(&info.title))
        .producer(TextStr(&info.producer))
        .creation_date(pdf_date(&info.created_at));

    pdf.finish()
}

/// The creation timestamp as a PDF date in UTC.
pub fn pdf_date(at: &DateTime<Utc>) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(0)
}

fn content_stream(runs: &[TextRun]) -> Vec<u8> {
    let mut content = Content::new();
    for run in runs {
        let text = encode_win_ansi(&run.text);
        content.begin_text();
        content.set_font(run.font, run.size);
        content.next_line(run.x, run.y);
        content.show(Str(&text));
        content.end_text();
    }
    content.finish()
}

/// Encodes `text` in WinAnsi. Characters it cannot represent become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi).collect()
}

fn win_ansi(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{20ac}' => 0x80,
        '\u{a0}'..='\u{ff}' => ch as u8,
        _ => b'?',
    }
}

/// Helvetica-Bold advance widths for printable ASCII, in thousandths of
/// an em. Bold is never narrower than regular, so body text measured with
/// it always fits.
const BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Upper bound on the rendered width of `text` at `size` points.
pub fn text_width(
    text: &str,
    size: f32,
) -> f32 {
    let units: u32 = text
        .chars()
        .map(|ch| match ch {
            ' '..='~' => u32::from(BOLD_WIDTHS[ch as usize - 0x20]),
            _ => 1000,
        })
        .sum();
    units as f32 * size / 1000.0
}
