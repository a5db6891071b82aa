use crate::error::RastreioError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

/// One word of a page with its bounding box, in points from the top-left
/// corner of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordBox {
    pub page: usize,
    pub text: String,
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    x0: f64,
    top: f64,
    x1: f64,
    bottom: f64,
}

/// Parse the XHTML written by `pdftotext -bbox` into word boxes, in
/// document order. Pages are numbered from 1 in the order they appear.
///
/// Words whose box attributes are missing or not numeric are skipped.
pub fn parse_bbox_xml(xml: &str) -> Result<Vec<WordBox>, RastreioError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut out = Vec::new();
    let mut page = 0;
    let mut current: Option<(Bounds, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"page" => page += 1,
                b"word" => {
                    current = word_bounds(&e).map(|b| (b, String::new()));
                    if current.is_none() {
                        tracing::debug!(page, "word without usable bbox skipped");
                    }
                }
                _ => {}
            },
            Event::Text(e) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"word" => {
                if let Some((bounds, text)) = current.take() {
                    out.push(WordBox {
                        page,
                        text,
                        x0: bounds.x0,
                        top: bounds.top,
                        x1: bounds.x1,
                        bottom: bounds.bottom,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

fn word_bounds(tag: &BytesStart<'_>) -> Option<Bounds> {
    Some(Bounds {
        x0: attr_f64(tag, b"xMin")?,
        top: attr_f64(tag, b"yMin")?,
        x1: attr_f64(tag, b"xMax")?,
        bottom: attr_f64(tag, b"yMax")?,
    })
}

fn attr_f64(tag: &BytesStart<'_>, name: &[u8]) -> Option<f64> {
    let attr = tag.try_get_attribute(name).ok()??;
    attr.unescape_value().ok()?.trim().parse().ok()
}
