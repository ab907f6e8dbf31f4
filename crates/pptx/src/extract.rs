//! Text and geometry extraction from slide XML.
//!
//! Used by the cloning fallback (text-only shape copies), notes reading, and
//! round-trip verification.

use quick_xml::events::Event;
use quick_xml::Reader;
use rfp_core::Result;

use crate::analyze::local_name;

/// Text content and bounding box of one shape on a slide.
#[derive(Debug, Default, Clone)]
pub struct ShapeText {
    /// Plain text, paragraphs joined with newlines.
    pub text: String,

    /// Placeholder type attribute, if the shape is a placeholder.
    pub ph_type: Option<String>,

    /// Bounding box in EMU (zero when the shape has no explicit transform).
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// Extract text-bearing shapes from slide (or notes-slide) XML, in document
/// order. XML errors are logged and extraction continues with what was read.
pub fn extract_shape_texts(xml: &str) -> Result<Vec<ShapeText>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut current: Option<ShapeText> = None;
    let mut in_text_body = false;
    let mut in_paragraph = false;
    let mut text = String::new();

    loop {
        let event = reader.read_event();
        match event {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let is_empty = matches!(event, Ok(Event::Empty(_)));
                match local_name(e.name().as_ref()) {
                    b"sp" | b"pic" if !is_empty => {
                        current = Some(ShapeText::default());
                        text.clear();
                    }
                    b"ph" => {
                        if let Some(ref mut shape) = current {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"type" {
                                    shape.ph_type =
                                        Some(String::from_utf8_lossy(&attr.value).to_string());
                                }
                            }
                        }
                    }
                    b"off" => {
                        if let Some(ref mut shape) = current {
                            for attr in e.attributes().flatten() {
                                let value = String::from_utf8_lossy(&attr.value);
                                match attr.key.as_ref() {
                                    b"x" => shape.x = value.parse().unwrap_or(0),
                                    b"y" => shape.y = value.parse().unwrap_or(0),
                                    _ => {}
                                }
                            }
                        }
                    }
                    b"ext" => {
                        if let Some(ref mut shape) = current {
                            for attr in e.attributes().flatten() {
                                let value = String::from_utf8_lossy(&attr.value);
                                match attr.key.as_ref() {
                                    b"cx" => shape.cx = value.parse().unwrap_or(0),
                                    b"cy" => shape.cy = value.parse().unwrap_or(0),
                                    _ => {}
                                }
                            }
                        }
                    }
                    b"txBody" if !is_empty => {
                        in_text_body = true;
                    }
                    b"p" if in_text_body && !is_empty => {
                        in_paragraph = true;
                        if !text.is_empty() {
                            text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_paragraph {
                    text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" | b"pic" => {
                    if let Some(mut shape) = current.take() {
                        shape.text = text.trim().to_string();
                        shapes.push(shape);
                    }
                    text.clear();
                    in_text_body = false;
                    in_paragraph = false;
                }
                b"txBody" => in_text_body = false,
                b"p" => in_paragraph = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("XML parsing error during extraction (continuing): {}", e);
                break;
            }
            _ => {}
        }
    }

    Ok(shapes)
}

/// Extract the visible text lines of a slide, in document order, skipping
/// empty shapes.
pub fn slide_text_lines(xml: &str) -> Result<Vec<String>> {
    Ok(extract_shape_texts(xml)?
        .into_iter()
        .filter(|s| !s.text.is_empty())
        .map(|s| s.text)
        .collect())
}

/// Extract the notes text from a notes-slide part.
///
/// Prefers the body placeholder (where notes live); falls back to all text
/// when no body placeholder is present.
pub fn notes_text(xml: &str) -> Result<Option<String>> {
    let shapes = extract_shape_texts(xml)?;
    let body: Vec<&ShapeText> = shapes
        .iter()
        .filter(|s| s.ph_type.as_deref() == Some("body"))
        .collect();

    let text = if body.is_empty() {
        shapes
            .iter()
            .filter(|s| !s.text.is_empty())
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        body.iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: &str = r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr><a:xfrm><a:off x="100" y="200"/><a:ext cx="300" cy="400"/></a:xfrm></p:spPr><p:txBody><a:bodyPr/><a:p><a:r><a:t>Hello</a:t></a:r></a:p><a:p><a:r><a:t>World</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;

    #[test]
    fn extracts_text_and_geometry() {
        let shapes = extract_shape_texts(SLIDE).unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].text, "Hello\nWorld");
        assert_eq!(shapes[0].ph_type.as_deref(), Some("title"));
        assert_eq!((shapes[0].x, shapes[0].y), (100, 200));
        assert_eq!((shapes[0].cx, shapes[0].cy), (300, 400));
    }

    #[test]
    fn slide_text_skips_empty_shapes() {
        let lines = slide_text_lines(SLIDE).unwrap();
        assert_eq!(lines, vec!["Hello\nWorld"]);
    }
}
