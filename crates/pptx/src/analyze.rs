//! Template analysis: enumerate slide layouts and their placeholders.
//!
//! Callers use the analysis to pick layout indices before adding slides,
//! instead of guessing what a template provides.

use quick_xml::events::Event;
use quick_xml::Reader;
use rfp_core::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::package::Pptx;

/// A named, positioned content region defined by a slide layout.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceholderInfo {
    /// Placeholder index within the layout (0 when unspecified).
    pub idx: u32,

    /// Shape name, e.g. "Title 1".
    pub name: String,

    /// Placeholder type classification, e.g. "TITLE", "BODY", "SUBTITLE".
    pub placeholder_type: String,

    /// Raw `p:ph` type attribute, needed to reference this placeholder from
    /// a new slide. Not part of the reported analysis.
    #[serde(skip)]
    pub ph_type_raw: Option<String>,

    /// Bounding geometry in EMU.
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

/// One slide layout available in a presentation.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutInfo {
    /// Layout name, e.g. "Title and Content".
    pub name: String,

    /// Layout index (position in the package's layout list).
    pub index: usize,

    /// Placeholders defined by the layout, in document order.
    pub placeholders: Vec<PlaceholderInfo>,
}

/// Read-only analysis of a template's layouts and placeholders.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateAnalysis {
    /// Path the template was opened from.
    pub file_path: PathBuf,

    /// Slide width in EMU.
    pub slide_width: i64,

    /// Slide height in EMU.
    pub slide_height: i64,

    /// Number of layouts.
    pub layout_count: usize,

    /// Layouts in index order.
    pub layouts: Vec<LayoutInfo>,
}

impl TemplateAnalysis {
    /// Find a layout index by case-insensitive partial name match.
    pub fn find_layout_by_name(&self, pattern: &str) -> Option<usize> {
        let needle = pattern.to_lowercase();
        self.layouts
            .iter()
            .find(|l| l.name.to_lowercase().contains(&needle))
            .map(|l| l.index)
    }
}

/// Analyze all layouts in a package.
pub(crate) fn analyze_package(pptx: &Pptx, origin: &Path) -> Result<TemplateAnalysis> {
    let (slide_width, slide_height) = parse_slide_size(pptx.part_str("ppt/presentation.xml")?);

    let mut layouts = Vec::new();
    for (index, part) in pptx.layout_paths().iter().enumerate() {
        let xml = pptx.part_str(part)?;
        let (name, placeholders) = parse_layout(xml)?;
        layouts.push(LayoutInfo {
            name: name.unwrap_or_else(|| format!("Layout {}", index + 1)),
            index,
            placeholders,
        });
    }

    Ok(TemplateAnalysis {
        file_path: origin.to_path_buf(),
        slide_width,
        slide_height,
        layout_count: layouts.len(),
        layouts,
    })
}

/// Extract the slide size from presentation.xml, defaulting to 16:9.
fn parse_slide_size(xml: &str) -> (i64, i64) {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                let mut cx = 12192000;
                let mut cy = 6858000;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value);
                    match attr.key.as_ref() {
                        b"cx" => cx = value.parse().unwrap_or(cx),
                        b"cy" => cy = value.parse().unwrap_or(cy),
                        _ => {}
                    }
                }
                return (cx, cy);
            }
            Ok(Event::Eof) | Err(_) => return (12192000, 6858000),
            _ => {}
        }
    }
}

/// Parse a layout part: the layout name and its placeholder shapes.
fn parse_layout(xml: &str) -> Result<(Option<String>, Vec<PlaceholderInfo>)> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut layout_name: Option<String> = None;
    let mut placeholders = Vec::new();

    // State for the shape currently being parsed.
    let mut in_sp = false;
    let mut shape_name = String::new();
    let mut ph_seen = false;
    let mut ph_type: Option<String> = None;
    let mut ph_idx: u32 = 0;
    let mut geom = (0i64, 0i64, 0i64, 0i64);

    loop {
        let event = reader.read_event();
        match event {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let is_empty = matches!(event, Ok(Event::Empty(_)));
                match local_name(e.name().as_ref()) {
                    b"cSld" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"name" {
                                let value = String::from_utf8_lossy(&attr.value).to_string();
                                if !value.is_empty() {
                                    layout_name = Some(value);
                                }
                            }
                        }
                    }
                    b"sp" if !is_empty => {
                        in_sp = true;
                        shape_name.clear();
                        ph_seen = false;
                        ph_type = None;
                        ph_idx = 0;
                        geom = (0, 0, 0, 0);
                    }
                    b"cNvPr" if in_sp && shape_name.is_empty() => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"name" {
                                shape_name = String::from_utf8_lossy(&attr.value).to_string();
                            }
                        }
                    }
                    b"ph" if in_sp => {
                        ph_seen = true;
                        for attr in e.attributes().flatten() {
                            let value = String::from_utf8_lossy(&attr.value);
                            match attr.key.as_ref() {
                                b"type" => ph_type = Some(value.to_string()),
                                b"idx" => ph_idx = value.parse().unwrap_or(0),
                                _ => {}
                            }
                        }
                    }
                    b"off" if in_sp => {
                        for attr in e.attributes().flatten() {
                            let value = String::from_utf8_lossy(&attr.value);
                            match attr.key.as_ref() {
                                b"x" => geom.0 = value.parse().unwrap_or(0),
                                b"y" => geom.1 = value.parse().unwrap_or(0),
                                _ => {}
                            }
                        }
                    }
                    b"ext" if in_sp => {
                        for attr in e.attributes().flatten() {
                            let value = String::from_utf8_lossy(&attr.value);
                            match attr.key.as_ref() {
                                b"cx" => geom.2 = value.parse().unwrap_or(0),
                                b"cy" => geom.3 = value.parse().unwrap_or(0),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                if local_name(e.name().as_ref()) == b"sp" && in_sp {
                    if ph_seen {
                        placeholders.push(PlaceholderInfo {
                            idx: ph_idx,
                            name: shape_name.clone(),
                            placeholder_type: placeholder_type_name(ph_type.as_deref()),
                            ph_type_raw: ph_type.clone(),
                            left: geom.0,
                            top: geom.1,
                            width: geom.2,
                            height: geom.3,
                        });
                    }
                    in_sp = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("error parsing layout: {}", e)));
            }
            _ => {}
        }
    }

    Ok((layout_name, placeholders))
}

/// Map a `p:ph` type attribute to a readable classification name.
fn placeholder_type_name(ph_type: Option<&str>) -> String {
    match ph_type {
        Some("ctrTitle") => "CENTER_TITLE",
        Some("title") => "TITLE",
        Some("subTitle") => "SUBTITLE",
        Some("body") => "BODY",
        Some("pic") => "PICTURE",
        Some("tbl") => "TABLE",
        Some("chart") => "CHART",
        Some("dt") => "DATE",
        Some("ftr") => "FOOTER",
        Some("sldNum") => "SLIDE_NUMBER",
        Some(other) => return other.to_uppercase(),
        // No type attribute means a generic object placeholder.
        None => "OBJECT",
    }
    .to_string()
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyzes_blank_skeleton_layouts() {
        let pptx = Pptx::blank();
        let analysis = pptx.analyze(Path::new("blank.pptx")).unwrap();

        assert_eq!(analysis.layout_count, 4);
        assert_eq!(analysis.slide_width, 12192000);
        assert_eq!(analysis.slide_height, 6858000);

        let names: Vec<&str> = analysis.layouts.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Title Slide", "Title and Content", "Section Header", "Blank"]
        );

        let title_slide = &analysis.layouts[0];
        assert_eq!(title_slide.placeholders.len(), 2);
        assert_eq!(title_slide.placeholders[0].placeholder_type, "CENTER_TITLE");
        assert_eq!(title_slide.placeholders[1].placeholder_type, "SUBTITLE");
        assert_eq!(title_slide.placeholders[1].idx, 1);
        assert!(title_slide.placeholders[0].width > 0);

        assert!(analysis.layouts[3].placeholders.is_empty());
    }

    #[test]
    fn finds_layouts_by_partial_name() {
        let pptx = Pptx::blank();
        let analysis = pptx.analyze(Path::new("blank.pptx")).unwrap();
        assert_eq!(analysis.find_layout_by_name("content"), Some(1));
        assert_eq!(analysis.find_layout_by_name("BLANK"), Some(3));
        assert_eq!(analysis.find_layout_by_name("nonexistent"), None);
    }

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:off"), b"off");
        assert_eq!(local_name(b"sp"), b"sp");
    }
}
