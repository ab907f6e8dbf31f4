//! Cross-package slide cloning.
//!
//! Shapes are copied verbatim at the XML level. Shapes that reference package
//! relationships (embedded images, linked media) cannot transfer across
//! packages, so they degrade to a plain text box carrying the shape's text
//! and bounding box; shapes with no text are skipped. One uncopyable shape
//! never blocks the rest of the slide.

use quick_xml::events::Event;
use quick_xml::Reader;
use rfp_core::{Error, Result};
use std::path::Path;

use crate::analyze::local_name;
use crate::compose::text_box_xml;
use crate::extract;
use crate::package::Pptx;

/// Shape ids in cloned slides start here to stay clear of the target
/// slide's own shapes.
const CLONE_ID_BASE: u32 = 100;

impl Pptx {
    /// Clone a slide from another package into this one, returning the new
    /// slide's 0-based index.
    ///
    /// The new slide lands under a blank-like layout (first layout whose name
    /// contains "blank", else the last layout). Source speaker notes are
    /// carried over.
    pub fn clone_slide_from(&mut self, source: &Pptx, source_index: usize) -> Result<usize> {
        let source_paths = source.slide_paths();
        if source_index >= source_paths.len() {
            return Err(Error::SlideIndexOutOfRange {
                requested: source_index,
                available: source_paths.len(),
            });
        }

        let analysis = self.analyze(Path::new(""))?;
        let layout_index = analysis
            .find_layout_by_name("blank")
            .unwrap_or(analysis.layout_count.saturating_sub(1));

        let new_index = self.add_slide(layout_index, &[])?;

        let source_xml = source.part_str(&source_paths[source_index])?;
        let mut next_id = CLONE_ID_BASE;
        for fragment in top_level_shapes(source_xml)? {
            if fragment.contains("r:embed") || fragment.contains("r:link") || fragment.contains("r:id=") {
                next_id = self.append_fallback(new_index, &fragment, next_id)?;
            } else {
                self.append_shape_xml(new_index, &fragment)?;
            }
        }

        if let Some(notes) = source.notes_text(source_index)? {
            self.set_notes(new_index, &notes)?;
        }

        Ok(new_index)
    }

    /// Degraded copy: text and bounding box only. Returns the next free
    /// shape id.
    fn append_fallback(
        &mut self,
        slide_index: usize,
        fragment: &str,
        mut next_id: u32,
    ) -> Result<u32> {
        let shapes = extract::extract_shape_texts(fragment)?;
        let mut copied = false;
        for shape in &shapes {
            if shape.text.is_empty() {
                continue;
            }
            let cx = if shape.cx > 0 { shape.cx } else { 3_657_600 };
            let cy = if shape.cy > 0 { shape.cy } else { 914_400 };
            let xml = text_box_xml(next_id, &shape.text, shape.x, shape.y, cx, cy);
            self.append_shape_xml(slide_index, &xml)?;
            next_id += 1;
            copied = true;
        }
        if !copied {
            log::debug!("skipping uncopyable shape with no text content");
        }
        Ok(next_id)
    }
}

/// Slice the top-level shape elements out of a slide's spTree, in document
/// order, as raw XML fragments.
fn top_level_shapes(xml: &str) -> Result<Vec<String>> {
    const SHAPE_NAMES: [&[u8]; 5] = [
        b"sp" as &[u8],
        b"pic",
        b"graphicFrame",
        b"grpSp",
        b"cxnSp",
    ];

    let mut fragments = Vec::new();
    let mut reader = Reader::from_str(xml);
    // Positions must map back to the source text, so no trimming here.

    let mut in_sp_tree = false;
    let mut capture_start: Option<usize> = None;
    let mut capture_depth = 0usize;
    let mut last_pos = 0usize;

    loop {
        let event = reader.read_event();
        let pos_after = reader.buffer_position();
        match event {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref()).to_vec();
                if capture_start.is_some() {
                    capture_depth += 1;
                } else if name == b"spTree" {
                    in_sp_tree = true;
                } else if in_sp_tree && SHAPE_NAMES.contains(&name.as_slice()) {
                    capture_start = Some(last_pos);
                    capture_depth = 1;
                }
            }
            Ok(Event::End(ref e)) => {
                let name = local_name(e.name().as_ref()).to_vec();
                if let Some(start) = capture_start {
                    capture_depth -= 1;
                    if capture_depth == 0 {
                        fragments.push(xml[start..pos_after].trim().to_string());
                        capture_start = None;
                    }
                } else if name == b"spTree" {
                    in_sp_tree = false;
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = local_name(e.name().as_ref()).to_vec();
                if capture_start.is_none()
                    && in_sp_tree
                    && SHAPE_NAMES.contains(&name.as_slice())
                {
                    fragments.push(xml[last_pos..pos_after].trim().to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("error slicing shapes: {}", e)));
            }
            _ => {}
        }
        last_pos = pos_after;
    }

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ShapeSpec;

    fn deck_with_slide(lines: &[&str]) -> Pptx {
        let mut pptx = Pptx::blank();
        let shapes: Vec<ShapeSpec> = lines
            .iter()
            .map(|line| ShapeSpec::TextBox {
                text: line.to_string(),
                x: 914_400,
                y: 914_400,
                cx: 3_657_600,
                cy: 914_400,
            })
            .collect();
        pptx.add_slide(3, &shapes).unwrap();
        pptx
    }

    #[test]
    fn clones_shapes_across_packages() {
        let source = deck_with_slide(&["Delivery footprint", "24/7 coverage"]);
        let mut target = Pptx::blank();

        let index = target.clone_slide_from(&source, 0).unwrap();
        assert_eq!(index, 0);
        assert_eq!(
            target.slide_text(0).unwrap(),
            vec!["Delivery footprint", "24/7 coverage"]
        );
    }

    #[test]
    fn out_of_range_clone_leaves_target_unchanged() {
        let source = deck_with_slide(&["only slide"]);
        let mut target = Pptx::blank();
        target.add_slide(0, &[]).unwrap();

        let err = target.clone_slide_from(&source, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::SlideIndexOutOfRange {
                requested: 5,
                available: 1
            }
        ));
        assert_eq!(target.slide_count(), 1);
    }

    #[test]
    fn clone_carries_speaker_notes() {
        let mut source = deck_with_slide(&["Case study"]);
        source.set_notes(0, "[T2] client_17 outcome data").unwrap();

        let mut target = Pptx::blank();
        let index = target.clone_slide_from(&source, 0).unwrap();
        assert_eq!(
            target.notes_text(index).unwrap().as_deref(),
            Some("[T2] client_17 outcome data")
        );
    }

    #[test]
    fn relationship_bearing_shape_degrades_to_text_box() {
        let mut source = deck_with_slide(&[]);
        // A picture shape referencing an image relationship: the blip target
        // does not exist in the target package, so only text could survive.
        // A picture has none, so it is skipped.
        let pic = r#"<p:pic><p:nvPicPr><p:cNvPr id="9" name="Logo"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId7"/></p:blipFill><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm></p:spPr></p:pic>"#;
        source.append_shape_xml(0, pic).unwrap();

        let mut target = Pptx::blank();
        let index = target.clone_slide_from(&source, 0).unwrap();
        assert!(target.slide_text(index).unwrap().is_empty());
        assert_eq!(target.slide_count(), 1);
    }

    #[test]
    fn slices_top_level_shapes_only() {
        let xml = r#"<p:sld><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:txBody><a:p><a:r><a:t>one</a:t></a:r></a:p></p:txBody></p:sp><p:grpSp><p:sp><p:txBody/></p:sp></p:grpSp></p:spTree></p:cSld></p:sld>"#;
        let shapes = top_level_shapes(xml).unwrap();
        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].starts_with("<p:sp>"));
        assert!(shapes[1].starts_with("<p:grpSp>"));
    }
}
