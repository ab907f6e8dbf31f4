//! Slide composition: new slide parts, placeholder text, tables, and notes.
//!
//! Generated XML references layout placeholders by type/idx so position and
//! styling inherit from the template.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use rfp_core::types::TextSegment;
use rfp_core::{Error, Result};

use crate::analyze::local_name;
use crate::package::Pptx;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_NOTES_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";
const REL_NOTES_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster";
const REL_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const CT_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_NOTES_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";
const CT_NOTES_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml";

const EMU_PER_INCH: i64 = 914_400;

/// One shape to place on a new slide.
#[derive(Debug, Clone)]
pub enum ShapeSpec {
    /// A placeholder inherited from the layout, filled with rich text.
    Placeholder {
        /// Raw placeholder type attribute from the layout (e.g. "ctrTitle").
        ph_type: Option<String>,
        /// Placeholder index within the layout.
        ph_idx: u32,
        /// Text runs to render.
        segments: Vec<TextSegment>,
    },

    /// A table sized to its data, populated cell by cell.
    Table { data: Vec<Vec<String>> },

    /// A free text box with explicit geometry in EMU.
    TextBox {
        text: String,
        x: i64,
        y: i64,
        cx: i64,
        cy: i64,
    },

    /// Pre-rendered shape XML spliced in verbatim (used by slide cloning).
    Raw(String),
}

impl Pptx {
    /// Add a new slide under the given layout, returning its 0-based index.
    pub fn add_slide(&mut self, layout_index: usize, shapes: &[ShapeSpec]) -> Result<usize> {
        let layouts = self.layout_paths();
        let layout_part = layouts.get(layout_index).ok_or(Error::LayoutIndexOutOfRange {
            requested: layout_index,
            available: layouts.len(),
        })?;
        let layout_target = layout_part
            .strip_prefix("ppt/")
            .map(|p| format!("../{}", p))
            .unwrap_or_else(|| layout_part.clone());

        let n = self.next_slide_number();
        let slide_part = format!("ppt/slides/slide{n}.xml");
        let rels_part = format!("ppt/slides/_rels/slide{n}.xml.rels");

        let mut body = String::new();
        let mut shape_id = 2u32;
        for shape in shapes {
            body.push_str(&render_shape(shape, shape_id));
            shape_id += 1;
        }

        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
             <p:cSld><p:spTree>\
             <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
             {body}\
             </p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"
        );
        self.set_part(slide_part.as_str(), xml.into_bytes());

        self.add_relationship(&rels_part, REL_SLIDE_LAYOUT, &layout_target)?;
        self.add_content_type_override(&slide_part, CT_SLIDE)?;
        let rid = self.add_relationship(
            "ppt/_rels/presentation.xml.rels",
            REL_SLIDE,
            &format!("slides/slide{n}.xml"),
        )?;
        self.register_slide(&rid)?;

        Ok(self.slide_count() - 1)
    }

    /// Append a pre-rendered shape to an existing slide's shape tree.
    pub(crate) fn append_shape_xml(&mut self, slide_index: usize, shape_xml: &str) -> Result<()> {
        let part = self.slide_part_for_index(slide_index)?;
        let xml = self.part_str(&part)?.to_string();
        let pos = xml
            .rfind("</p:spTree>")
            .ok_or_else(|| Error::XmlError(format!("no shape tree in '{}'", part)))?;
        let mut patched = String::with_capacity(xml.len() + shape_xml.len());
        patched.push_str(&xml[..pos]);
        patched.push_str(shape_xml);
        patched.push_str(&xml[pos..]);
        self.set_part(part, patched.into_bytes());
        Ok(())
    }

    /// Visible text of the slide at `slide_index`, one entry per shape.
    pub fn slide_text(&self, slide_index: usize) -> Result<Vec<String>> {
        let part = self.slide_part_for_index(slide_index)?;
        crate::extract::slide_text_lines(self.part_str(&part)?)
    }

    /// Set (or replace) the speaker notes of a slide.
    pub fn set_notes(&mut self, slide_index: usize, text: &str) -> Result<()> {
        let slide_part = self.slide_part_for_index(slide_index)?;
        let slide_rels = rels_part_for(&slide_part);

        // Reuse the existing notes part when the slide already has one.
        if let Some(target) = self
            .part(&slide_rels)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|xml| find_relationship_target(xml, "/notesSlide"))
        {
            // The rels and content-type entries already exist for this part.
            let notes_part = resolve_target("ppt/slides", &target);
            self.set_part(notes_part, notes_slide_xml(text).into_bytes());
            return Ok(());
        }

        self.ensure_notes_master()?;

        let k = self.next_notes_number();
        let notes_part = format!("ppt/notesSlides/notesSlide{k}.xml");
        let notes_rels = format!("ppt/notesSlides/_rels/notesSlide{k}.xml.rels");

        self.set_part(notes_part.as_str(), notes_slide_xml(text).into_bytes());
        self.add_relationship(&notes_rels, REL_NOTES_MASTER, "../notesMasters/notesMaster1.xml")?;
        self.add_relationship(
            &notes_rels,
            REL_SLIDE,
            &format!("../slides/{}", part_file_name(&slide_part)),
        )?;
        self.add_content_type_override(&notes_part, CT_NOTES_SLIDE)?;
        self.add_relationship(
            &slide_rels,
            REL_NOTES_SLIDE,
            &format!("../notesSlides/notesSlide{k}.xml"),
        )?;
        Ok(())
    }

    /// Read the speaker notes of a slide, if any.
    pub fn notes_text(&self, slide_index: usize) -> Result<Option<String>> {
        let slide_part = self.slide_part_for_index(slide_index)?;
        let slide_rels = rels_part_for(&slide_part);
        let Some(rels_xml) = self
            .part(&slide_rels)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
        else {
            return Ok(None);
        };
        let Some(target) = find_relationship_target(rels_xml, "/notesSlide") else {
            return Ok(None);
        };
        let notes_part = resolve_target("ppt/slides", &target);
        match self.part(&notes_part) {
            Some(bytes) => {
                let xml = std::str::from_utf8(bytes)
                    .map_err(|e| Error::XmlError(format!("notes part is not UTF-8: {}", e)))?;
                crate::extract::notes_text(xml)
            }
            None => Ok(None),
        }
    }

    /// The slide part name for a 0-based slide index.
    pub(crate) fn slide_part_for_index(&self, slide_index: usize) -> Result<String> {
        let paths = self.slide_paths();
        paths
            .get(slide_index)
            .cloned()
            .ok_or(Error::SlideIndexOutOfRange {
                requested: slide_index,
                available: paths.len(),
            })
    }

    /// Create the notes master if the package does not carry one.
    fn ensure_notes_master(&mut self) -> Result<()> {
        if self.has_part("ppt/notesMasters/notesMaster1.xml") {
            return Ok(());
        }

        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <p:notesMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
             <p:cSld><p:spTree>\
             <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
             </p:spTree></p:cSld>\
             <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
             </p:notesMaster>"
        );
        self.set_part("ppt/notesMasters/notesMaster1.xml", xml.into_bytes());

        if self.has_part("ppt/theme/theme1.xml") {
            self.add_relationship(
                "ppt/notesMasters/_rels/notesMaster1.xml.rels",
                REL_THEME,
                "../theme/theme1.xml",
            )?;
        }
        self.add_content_type_override("ppt/notesMasters/notesMaster1.xml", CT_NOTES_MASTER)?;
        let rid = self.add_relationship(
            "ppt/_rels/presentation.xml.rels",
            REL_NOTES_MASTER,
            "notesMasters/notesMaster1.xml",
        )?;
        self.register_notes_master(&rid)?;
        Ok(())
    }
}

fn render_shape(shape: &ShapeSpec, shape_id: u32) -> String {
    match shape {
        ShapeSpec::Placeholder {
            ph_type,
            ph_idx,
            segments,
        } => placeholder_xml(shape_id, ph_type.as_deref(), *ph_idx, segments),
        ShapeSpec::Table { data } => table_xml(shape_id, data),
        ShapeSpec::TextBox { text, x, y, cx, cy } => {
            text_box_xml(shape_id, text, *x, *y, *cx, *cy)
        }
        ShapeSpec::Raw(xml) => xml.clone(),
    }
}

fn placeholder_xml(
    shape_id: u32,
    ph_type: Option<&str>,
    ph_idx: u32,
    segments: &[TextSegment],
) -> String {
    let type_attr = ph_type.map(|t| format!(" type=\"{t}\"")).unwrap_or_default();
    let idx_attr = if ph_idx > 0 {
        format!(" idx=\"{ph_idx}\"")
    } else {
        String::new()
    };
    let name = match ph_type {
        Some("ctrTitle") | Some("title") => format!("Title {shape_id}"),
        Some("subTitle") => format!("Subtitle {shape_id}"),
        _ => format!("Content Placeholder {shape_id}"),
    };
    let paragraphs = render_paragraphs(segments);
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{shape_id}\" name=\"{name}\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph{type_attr}{idx_attr}/></p:nvPr></p:nvSpPr>\
         <p:spPr/>\
         <p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"
    )
}

/// A plain text box with explicit geometry, used by the clone fallback.
pub(crate) fn text_box_xml(shape_id: u32, text: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    let segments = [TextSegment::plain(text)];
    let paragraphs = render_paragraphs(&segments);
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{shape_id}\" name=\"TextBox {shape_id}\"/>\
         <p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"
    )
}

/// Render segments as paragraphs of runs. An embedded newline starts a new
/// paragraph; formatting never leaks across segments.
fn render_paragraphs(segments: &[TextSegment]) -> String {
    if segments.is_empty() {
        return "<a:p><a:endParaRPr/></a:p>".to_string();
    }

    let mut paragraphs: Vec<String> = vec![String::new()];
    for seg in segments {
        let mut first = true;
        for part in seg.text.split('\n') {
            if !first {
                paragraphs.push(String::new());
            }
            first = false;
            if !part.is_empty() {
                paragraphs.last_mut().unwrap().push_str(&render_run(part, seg));
            }
        }
    }

    paragraphs
        .into_iter()
        .map(|runs| {
            if runs.is_empty() {
                "<a:p><a:endParaRPr/></a:p>".to_string()
            } else {
                format!("<a:p>{runs}</a:p>")
            }
        })
        .collect()
}

fn render_run(text: &str, seg: &TextSegment) -> String {
    let mut attrs = String::new();
    if seg.bold {
        attrs.push_str(" b=\"1\"");
    }
    if seg.italic {
        attrs.push_str(" i=\"1\"");
    }
    if seg.underline {
        attrs.push_str(" u=\"sng\"");
    }
    if let Some(size) = seg.font_size {
        attrs.push_str(&format!(" sz=\"{}\"", size * 100));
    }

    let fill = seg
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .map(|rgb| format!("<a:solidFill><a:srgbClr val=\"{rgb}\"/></a:solidFill>"))
        .unwrap_or_default();

    format!(
        "<a:r><a:rPr lang=\"en-US\"{attrs}>{fill}</a:rPr><a:t>{}</a:t></a:r>",
        escape(text)
    )
}

/// Parse "#RRGGBB" (hash optional) into an uppercase hex triplet. Malformed
/// colors are ignored rather than failing the slide.
fn parse_hex_color(color: &str) -> Option<String> {
    let hex = color.trim_start_matches('#');
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(hex.to_uppercase())
    } else {
        log::debug!("ignoring malformed color '{}'", color);
        None
    }
}

fn table_xml(shape_id: u32, data: &[Vec<String>]) -> String {
    let rows = data.len().max(1);
    let cols = data.iter().map(|r| r.len()).max().unwrap_or(1).max(1);

    let left = EMU_PER_INCH / 2;
    let top = EMU_PER_INCH * 3 / 2;
    let width = EMU_PER_INCH * 9;
    let height = (EMU_PER_INCH * 3 / 10) * rows as i64;
    let col_width = width / cols as i64;
    let row_height = height / rows as i64;

    let grid: String = (0..cols)
        .map(|_| format!("<a:gridCol w=\"{col_width}\"/>"))
        .collect();

    let body: String = data
        .iter()
        .map(|row| {
            let cells: String = (0..cols)
                .map(|c| {
                    let text = row.get(c).map(String::as_str).unwrap_or("");
                    let para = if text.is_empty() {
                        "<a:p><a:endParaRPr/></a:p>".to_string()
                    } else {
                        format!(
                            "<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>",
                            escape(text)
                        )
                    };
                    format!(
                        "<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>{para}</a:txBody><a:tcPr/></a:tc>"
                    )
                })
                .collect();
            format!("<a:tr h=\"{row_height}\">{cells}</a:tr>")
        })
        .collect();

    format!(
        "<p:graphicFrame><p:nvGraphicFramePr>\
         <p:cNvPr id=\"{shape_id}\" name=\"Table {shape_id}\"/>\
         <p:cNvGraphicFramePr><a:graphicFrameLocks noGrp=\"1\"/></p:cNvGraphicFramePr>\
         <p:nvPr/></p:nvGraphicFramePr>\
         <p:xfrm><a:off x=\"{left}\" y=\"{top}\"/><a:ext cx=\"{width}\" cy=\"{height}\"/></p:xfrm>\
         <a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/table\">\
         <a:tbl><a:tblPr firstRow=\"1\" bandRow=\"1\"/><a:tblGrid>{grid}</a:tblGrid>{body}</a:tbl>\
         </a:graphicData></a:graphic></p:graphicFrame>"
    )
}

fn notes_slide_xml(text: &str) -> String {
    let segments = [TextSegment::plain(text)];
    let paragraphs = render_paragraphs(&segments);
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:notes xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
         <p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Notes Placeholder 1\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"body\" idx=\"1\"/></p:nvPr></p:nvSpPr>\
         <p:spPr/>\
         <p:txBody><a:bodyPr/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>\
         </p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>"
    )
}

/// The rels part for a given part, e.g. "ppt/slides/_rels/slide1.xml.rels".
fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

fn part_file_name(part: &str) -> &str {
    part.rsplit_once('/').map(|(_, f)| f).unwrap_or(part)
}

/// Resolve a relationship target relative to `base_dir` into a part name.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return stripped.to_string();
    }
    let mut dir: Vec<&str> = base_dir.split('/').collect();
    let mut rest = target;
    while let Some(stripped) = rest.strip_prefix("../") {
        dir.pop();
        rest = stripped;
    }
    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{}/{}", dir.join("/"), rest)
    }
}

/// Find the target of the first relationship whose type ends with
/// `type_suffix`.
fn find_relationship_target(rels_xml: &str, type_suffix: &str) -> Option<String> {
    let mut reader = Reader::from_str(rels_xml);
    reader.trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel_type = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }
                if rel_type.ends_with(type_suffix) {
                    return Some(target);
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title_fill(text: &str) -> ShapeSpec {
        ShapeSpec::Placeholder {
            ph_type: Some("ctrTitle".to_string()),
            ph_idx: 0,
            segments: vec![TextSegment::plain(text)],
        }
    }

    #[test]
    fn added_slide_round_trips_title_text() {
        let mut pptx = Pptx::blank();
        let index = pptx.add_slide(0, &[title_fill("Proposal for Acme")]).unwrap();
        assert_eq!(index, 0);
        assert_eq!(pptx.slide_count(), 1);

        let bytes = pptx.to_bytes().unwrap();
        let reopened = Pptx::from_bytes(&bytes).unwrap();
        assert_eq!(reopened.slide_count(), 1);
        let lines = reopened.slide_text(0).unwrap();
        assert_eq!(lines, vec!["Proposal for Acme"]);
    }

    #[test]
    fn add_slide_rejects_bad_layout_index() {
        let mut pptx = Pptx::blank();
        let err = pptx.add_slide(99, &[]).unwrap_err();
        assert!(matches!(err, Error::LayoutIndexOutOfRange { .. }));
    }

    #[test]
    fn newline_in_segment_splits_paragraphs() {
        let xml = render_paragraphs(&[TextSegment::plain("line one\nline two")]);
        assert_eq!(xml.matches("<a:p>").count(), 2);
    }

    #[test]
    fn formatting_attributes_render() {
        let seg = TextSegment {
            text: "important".to_string(),
            bold: true,
            underline: true,
            font_size: Some(24),
            color: Some("#4B4BF9".to_string()),
            ..TextSegment::default()
        };
        let xml = render_run("important", &seg);
        assert!(xml.contains("b=\"1\""));
        assert!(xml.contains("u=\"sng\""));
        assert!(xml.contains("sz=\"2400\""));
        assert!(xml.contains("srgbClr val=\"4B4BF9\""));
    }

    #[test]
    fn malformed_color_is_ignored() {
        assert_eq!(parse_hex_color("#zzz"), None);
        assert_eq!(parse_hex_color("4B4BF9"), Some("4B4BF9".to_string()));
    }

    #[test]
    fn text_is_xml_escaped() {
        let xml = render_run("A & B < C", &TextSegment::plain("A & B < C"));
        assert!(xml.contains("A &amp; B &lt; C"));
    }

    #[test]
    fn table_pads_ragged_rows() {
        let data = vec![
            vec!["Metric".to_string(), "Target".to_string()],
            vec!["CSAT".to_string()],
        ];
        let xml = table_xml(3, &data);
        assert_eq!(xml.matches("<a:gridCol").count(), 2);
        assert_eq!(xml.matches("<a:tc>").count(), 4);
        assert!(xml.contains("CSAT"));
    }

    #[test]
    fn notes_survive_a_round_trip() {
        let mut pptx = Pptx::blank();
        let index = pptx.add_slide(1, &[title_fill("Delivery")]).unwrap();
        pptx.set_notes(index, "Sources: [T1] claim_042").unwrap();

        let reopened = Pptx::from_bytes(&pptx.to_bytes().unwrap()).unwrap();
        assert_eq!(
            reopened.notes_text(0).unwrap().as_deref(),
            Some("Sources: [T1] claim_042")
        );
        // The slide itself is untouched by notes.
        assert_eq!(reopened.slide_text(0).unwrap(), vec!["Delivery"]);
    }

    #[test]
    fn set_notes_twice_replaces_not_duplicates() {
        let mut pptx = Pptx::blank();
        let index = pptx.add_slide(1, &[]).unwrap();
        pptx.set_notes(index, "first").unwrap();
        pptx.set_notes(index, "second").unwrap();
        assert_eq!(pptx.notes_text(index).unwrap().as_deref(), Some("second"));
        // Only one notes part exists.
        assert_eq!(pptx.next_notes_number(), 2);
    }

    #[test]
    fn resolve_target_handles_parent_dirs() {
        assert_eq!(
            resolve_target("ppt/slides", "../notesSlides/notesSlide1.xml"),
            "ppt/notesSlides/notesSlide1.xml"
        );
        assert_eq!(
            resolve_target("ppt", "slides/slide1.xml"),
            "ppt/slides/slide1.xml"
        );
    }

    #[test]
    fn saved_package_is_reloadable_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("deck.pptx");

        let mut pptx = Pptx::blank();
        pptx.add_slide(0, &[title_fill("On Disk")]).unwrap();
        pptx.save(&path).unwrap();

        let reopened = Pptx::open(&path).unwrap();
        assert_eq!(reopened.slide_count(), 1);
        assert_eq!(reopened.slide_text(0).unwrap(), vec!["On Disk"]);
        // Analysis still works after reload.
        let analysis = reopened.analyze(&path).unwrap();
        assert_eq!(analysis.layout_count, 4);
    }
}
