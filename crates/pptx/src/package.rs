//! In-memory PPTX package: ZIP container handling and part bookkeeping.

use regex::Regex;
use rfp_core::{Error, Result};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use std::sync::LazyLock;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::analyze::{self, TemplateAnalysis};
use crate::skeleton;

/// Matches slide parts like "ppt/slides/slide12.xml", capturing the number.
static SLIDE_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").unwrap());

/// Matches layout parts like "ppt/slideLayouts/slideLayout3.xml".
static LAYOUT_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slideLayouts/slideLayout(\d+)\.xml$").unwrap());

/// Matches notes-slide parts.
static NOTES_PART_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/notesSlides/notesSlide(\d+)\.xml$").unwrap());

/// Matches relationship ids like rId7, capturing the number.
static RID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"Id="rId(\d+)""#).unwrap());

/// Matches numeric id attributes (used for p:sldId allocation).
static ID_ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#" id="(\d+)""#).unwrap());

/// A PowerPoint package held in memory as a map of part name → bytes.
///
/// One `Pptx` is one open presentation; all mutation goes through the
/// composition and cloning modules.
#[derive(Debug)]
pub struct Pptx {
    parts: BTreeMap<String, Vec<u8>>,
}

impl Pptx {
    /// Create a blank 16:9 presentation from the built-in skeleton.
    pub fn blank() -> Self {
        Self {
            parts: skeleton::blank_parts().into_iter().collect(),
        }
    }

    /// Open a PPTX/POTX package from disk.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Open a package from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::CorruptedPackage(format!("not a ZIP archive: {}", e)))?;

        let mut parts = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::ZipError(format!("failed to read entry {}: {}", i, e)))?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)
                .map_err(|e| Error::ZipError(format!("failed to read '{}': {}", name, e)))?;
            parts.insert(name, bytes);
        }

        if !parts.contains_key("ppt/presentation.xml") {
            return Err(Error::CorruptedPackage(
                "missing ppt/presentation.xml".to_string(),
            ));
        }

        Ok(Self { parts })
    }

    /// Serialize the package to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(path)?;
        self.write_archive(file)
    }

    /// Serialize the package to an in-memory byte buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_archive(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    fn write_archive<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default();
        for (name, bytes) in &self.parts {
            zip.start_file(name, options)
                .map_err(|e| Error::ZipError(format!("failed to start '{}': {}", name, e)))?;
            zip.write_all(bytes)?;
        }
        zip.finish()
            .map_err(|e| Error::ZipError(format!("failed to finalize archive: {}", e)))?;
        Ok(())
    }

    /// Get a part's raw bytes.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(|b| b.as_slice())
    }

    /// Get a part as UTF-8 text.
    pub fn part_str(&self, name: &str) -> Result<&str> {
        let bytes = self
            .parts
            .get(name)
            .ok_or_else(|| Error::CorruptedPackage(format!("missing part '{}'", name)))?;
        std::str::from_utf8(bytes)
            .map_err(|e| Error::XmlError(format!("part '{}' is not UTF-8: {}", name, e)))
    }

    /// Insert or replace a part.
    pub(crate) fn set_part(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.parts.insert(name.into(), bytes);
    }

    pub(crate) fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Slide part names in presentation order (numeric part order).
    pub fn slide_paths(&self) -> Vec<String> {
        self.numbered_parts(&SLIDE_PART_REGEX)
    }

    /// Layout part names in numeric order; index into this list is the
    /// layout index used throughout the API.
    pub fn layout_paths(&self) -> Vec<String> {
        self.numbered_parts(&LAYOUT_PART_REGEX)
    }

    fn numbered_parts(&self, pattern: &Regex) -> Vec<String> {
        let mut numbered: Vec<(usize, String)> = self
            .parts
            .keys()
            .filter_map(|name| {
                pattern
                    .captures(name)
                    .and_then(|c| c[1].parse::<usize>().ok())
                    .map(|n| (n, name.clone()))
            })
            .collect();
        numbered.sort();
        numbered.into_iter().map(|(_, name)| name).collect()
    }

    /// Number of slides in the package.
    pub fn slide_count(&self) -> usize {
        self.slide_paths().len()
    }

    /// Count slides in a file on disk, defaulting to 1 when the file cannot
    /// be opened or parsed. Library members are best-effort: a malformed deck
    /// must never abort an index scan.
    pub fn count_slides_in_file(path: &Path) -> usize {
        match Self::open(path) {
            Ok(pptx) => pptx.slide_count().max(1),
            Err(e) => {
                log::debug!("slide count fallback for {}: {}", path.display(), e);
                1
            }
        }
    }

    /// Analyze the package's layouts and placeholders.
    pub fn analyze(&self, origin: &Path) -> Result<TemplateAnalysis> {
        analyze::analyze_package(self, origin)
    }

    /// Next free number for a slide part.
    pub(crate) fn next_slide_number(&self) -> usize {
        self.next_part_number(&SLIDE_PART_REGEX)
    }

    /// Next free number for a notes-slide part.
    pub(crate) fn next_notes_number(&self) -> usize {
        self.next_part_number(&NOTES_PART_REGEX)
    }

    fn next_part_number(&self, pattern: &Regex) -> usize {
        self.parts
            .keys()
            .filter_map(|name| pattern.captures(name).and_then(|c| c[1].parse::<usize>().ok()))
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Register a content-type override for a new part.
    pub(crate) fn add_content_type_override(
        &mut self,
        part_name: &str,
        content_type: &str,
    ) -> Result<()> {
        let xml = self.part_str("[Content_Types].xml")?.to_string();
        let entry = format!("<Override PartName=\"/{part_name}\" ContentType=\"{content_type}\"/>");
        let patched = splice_before(&xml, "</Types>", &entry)?;
        self.set_part("[Content_Types].xml", patched.into_bytes());
        Ok(())
    }

    /// Add a relationship to a rels part (created if absent), returning the
    /// allocated relationship id.
    pub(crate) fn add_relationship(
        &mut self,
        rels_part: &str,
        rel_type: &str,
        target: &str,
    ) -> Result<String> {
        let xml = match self.parts.get(rels_part) {
            Some(bytes) => std::str::from_utf8(bytes)
                .map_err(|e| Error::XmlError(format!("part '{}' is not UTF-8: {}", rels_part, e)))?
                .to_string(),
            None => {
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
                 </Relationships>"
                    .to_string()
            }
        };

        let next = RID_REGEX
            .captures_iter(&xml)
            .filter_map(|c| c[1].parse::<usize>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let rid = format!("rId{next}");
        let entry = format!("<Relationship Id=\"{rid}\" Type=\"{rel_type}\" Target=\"{target}\"/>");
        let patched = splice_before(&xml, "</Relationships>", &entry)?;
        self.set_part(rels_part, patched.into_bytes());
        Ok(rid)
    }

    /// Append a slide entry to the presentation's slide id list.
    pub(crate) fn register_slide(&mut self, rid: &str) -> Result<()> {
        let mut xml = self.part_str("ppt/presentation.xml")?.to_string();

        // Normalize a self-closing or missing slide id list first.
        if !xml.contains("</p:sldIdLst>") {
            if xml.contains("<p:sldIdLst/>") {
                xml = xml.replace("<p:sldIdLst/>", "<p:sldIdLst></p:sldIdLst>");
            } else {
                xml = splice_after(
                    &xml,
                    "</p:sldMasterIdLst>",
                    "<p:sldIdLst></p:sldIdLst>",
                )?;
            }
        }

        let next_id = ID_ATTR_REGEX
            .captures_iter(&xml)
            .filter_map(|c| c[1].parse::<u64>().ok())
            .filter(|id| (256..2147483648).contains(id))
            .max()
            .unwrap_or(255)
            + 1;

        let entry = format!("<p:sldId id=\"{next_id}\" r:id=\"{rid}\"/>");
        let patched = splice_before(&xml, "</p:sldIdLst>", &entry)?;
        self.set_part("ppt/presentation.xml", patched.into_bytes());
        Ok(())
    }

    /// Register a notes master in the presentation if one is not yet listed.
    pub(crate) fn register_notes_master(&mut self, rid: &str) -> Result<()> {
        let xml = self.part_str("ppt/presentation.xml")?.to_string();
        if xml.contains("<p:notesMasterIdLst>") {
            return Ok(());
        }
        let entry =
            format!("<p:notesMasterIdLst><p:notesMasterId r:id=\"{rid}\"/></p:notesMasterIdLst>");
        let patched = splice_after(&xml, "</p:sldMasterIdLst>", &entry)?;
        self.set_part("ppt/presentation.xml", patched.into_bytes());
        Ok(())
    }
}

/// Insert `insertion` immediately before the first occurrence of `marker`.
fn splice_before(xml: &str, marker: &str, insertion: &str) -> Result<String> {
    let pos = xml
        .find(marker)
        .ok_or_else(|| Error::XmlError(format!("expected '{}' in part", marker)))?;
    let mut out = String::with_capacity(xml.len() + insertion.len());
    out.push_str(&xml[..pos]);
    out.push_str(insertion);
    out.push_str(&xml[pos..]);
    Ok(out)
}

/// Insert `insertion` immediately after the first occurrence of `marker`.
fn splice_after(xml: &str, marker: &str, insertion: &str) -> Result<String> {
    let pos = xml
        .find(marker)
        .ok_or_else(|| Error::XmlError(format!("expected '{}' in part", marker)))?;
    let end = pos + marker.len();
    let mut out = String::with_capacity(xml.len() + insertion.len());
    out.push_str(&xml[..end]);
    out.push_str(insertion);
    out.push_str(&xml[end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_package_round_trips_through_bytes() {
        let pptx = Pptx::blank();
        let bytes = pptx.to_bytes().unwrap();
        let reopened = Pptx::from_bytes(&bytes).unwrap();
        assert_eq!(reopened.slide_count(), 0);
        assert_eq!(reopened.layout_paths().len(), 4);
    }

    #[test]
    fn open_missing_file_is_not_found() {
        let err = Pptx::open(Path::new("/no/such/deck.pptx")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn garbage_bytes_are_a_corrupted_package() {
        let err = Pptx::from_bytes(b"this is not a zip").unwrap_err();
        assert!(matches!(err, Error::CorruptedPackage(_)));
    }

    #[test]
    fn numbered_parts_sort_numerically_not_lexically() {
        let mut pptx = Pptx::blank();
        for n in [2usize, 10, 1] {
            pptx.set_part(format!("ppt/slides/slide{}.xml", n), b"<p:sld/>".to_vec());
        }
        let paths = pptx.slide_paths();
        assert_eq!(
            paths,
            vec![
                "ppt/slides/slide1.xml",
                "ppt/slides/slide2.xml",
                "ppt/slides/slide10.xml",
            ]
        );
        assert_eq!(pptx.next_slide_number(), 11);
    }

    #[test]
    fn count_slides_defaults_to_one_for_unreadable_files() {
        assert_eq!(Pptx::count_slides_in_file(Path::new("/no/such.pptx")), 1);
    }

    #[test]
    fn relationship_ids_increment() {
        let mut pptx = Pptx::blank();
        let rid = pptx
            .add_relationship(
                "ppt/_rels/presentation.xml.rels",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide",
                "slides/slide1.xml",
            )
            .unwrap();
        // Skeleton presentation rels already carry rId1 and rId2.
        assert_eq!(rid, "rId3");
    }
}
