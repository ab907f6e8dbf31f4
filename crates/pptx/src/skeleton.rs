//! Static OOXML parts for a blank 16:9 presentation.
//!
//! Seeds the minimal package used by `Pptx::blank()`: one slide master, one
//! theme, four layouts (Title Slide, Title and Content, Section Header,
//! Blank), and an empty slide id list.

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

fn content_types() -> String {
    let mut overrides = String::new();
    overrides.push_str(
        "<Override PartName=\"/ppt/presentation.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml\"/>",
    );
    overrides.push_str(
        "<Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml\"/>",
    );
    for i in 1..=4 {
        overrides.push_str(&format!(
            "<Override PartName=\"/ppt/slideLayouts/slideLayout{i}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>",
        ));
    }
    overrides.push_str(
        "<Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>",
    );
    format!(
        "{XML_DECL}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>{overrides}</Types>"
    )
}

fn root_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"ppt/presentation.xml\"/>\
         </Relationships>"
    )
}

fn presentation() -> String {
    format!(
        "{XML_DECL}<p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:sldIdLst></p:sldIdLst>\
         <p:sldSz cx=\"12192000\" cy=\"6858000\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>"
    )
}

fn presentation_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"slideMasters/slideMaster1.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"theme/theme1.xml\"/>\
         </Relationships>"
    )
}

fn slide_master() -> String {
    let mut layout_ids = String::new();
    for i in 1..=4u32 {
        layout_ids.push_str(&format!(
            "<p:sldLayoutId id=\"{}\" r:id=\"rId{i}\"/>",
            2147483648u64 + i as u64,
        ));
    }
    format!(
        "{XML_DECL}<p:sldMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\
         <p:cSld><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
         </p:spTree></p:cSld>\
         <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\
         <p:sldLayoutIdLst>{layout_ids}</p:sldLayoutIdLst>\
         </p:sldMaster>"
    )
}

fn slide_master_rels() -> String {
    let mut rels = String::new();
    for i in 1..=4 {
        rels.push_str(&format!(
            "<Relationship Id=\"rId{i}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout\" Target=\"../slideLayouts/slideLayout{i}.xml\"/>",
        ));
    }
    rels.push_str(
        "<Relationship Id=\"rId5\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme\" Target=\"../theme/theme1.xml\"/>",
    );
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{rels}</Relationships>"
    )
}

/// A placeholder shape inside a layout part.
fn layout_placeholder(
    shape_id: u32,
    name: &str,
    ph_type: Option<&str>,
    ph_idx: Option<u32>,
    geom: (i64, i64, i64, i64),
) -> String {
    let type_attr = ph_type.map(|t| format!(" type=\"{t}\"")).unwrap_or_default();
    let idx_attr = ph_idx.map(|i| format!(" idx=\"{i}\"")).unwrap_or_default();
    let (x, y, cx, cy) = geom;
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{shape_id}\" name=\"{name}\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph{type_attr}{idx_attr}/></p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr/></a:p></p:txBody></p:sp>"
    )
}

fn layout(name: &str, layout_type: &str, placeholders: &str) -> String {
    format!(
        "{XML_DECL}<p:sldLayout xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" type=\"{layout_type}\" preserve=\"1\">\
         <p:cSld name=\"{name}\"><p:spTree>\
         <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
         {placeholders}\
         </p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"
    )
}

fn layout_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" Target=\"../slideMasters/slideMaster1.xml\"/>\
         </Relationships>"
    )
}

fn title_slide_layout() -> String {
    let mut ph = layout_placeholder(
        2,
        "Title 1",
        Some("ctrTitle"),
        None,
        (1524000, 1122363, 9144000, 2387600),
    );
    ph.push_str(&layout_placeholder(
        3,
        "Subtitle 2",
        Some("subTitle"),
        Some(1),
        (1524000, 3602038, 9144000, 1655762),
    ));
    layout("Title Slide", "title", &ph)
}

fn title_and_content_layout() -> String {
    let mut ph = layout_placeholder(
        2,
        "Title 1",
        Some("title"),
        None,
        (838200, 365125, 10515600, 1325563),
    );
    ph.push_str(&layout_placeholder(
        3,
        "Content Placeholder 2",
        None,
        Some(1),
        (838200, 1825625, 10515600, 4351338),
    ));
    layout("Title and Content", "obj", &ph)
}

fn section_header_layout() -> String {
    let mut ph = layout_placeholder(
        2,
        "Title 1",
        Some("title"),
        None,
        (831850, 1709738, 10515600, 1609725),
    );
    ph.push_str(&layout_placeholder(
        3,
        "Text Placeholder 2",
        Some("body"),
        Some(1),
        (831850, 3319463, 10515600, 1500187),
    ));
    layout("Section Header", "secHead", &ph)
}

fn blank_layout() -> String {
    layout("Blank", "blank", "")
}

fn theme() -> String {
    format!(
        "{XML_DECL}<a:theme xmlns:a=\"{NS_A}\" name=\"Office Theme\"><a:themeElements>\
         <a:clrScheme name=\"Office\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"09092D\"/></a:dk2>\
         <a:lt2><a:srgbClr val=\"F3F3F7\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4B4BF9\"/></a:accent1>\
         <a:accent2><a:srgbClr val=\"FF8D96\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"BFA1FF\"/></a:accent3>\
         <a:accent4><a:srgbClr val=\"8BF0BB\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"F9EF77\"/></a:accent5>\
         <a:accent6><a:srgbClr val=\"09092D\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink>\
         <a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"Office\">\
         <a:fillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:fillStyleLst>\
         <a:lnStyleLst><a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln><a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln><a:ln><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:ln></a:lnStyleLst>\
         <a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>\
         <a:bgFillStyleLst><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill></a:bgFillStyleLst>\
         </a:fmtScheme></a:themeElements></a:theme>"
    )
}

/// All parts of the blank skeleton package, in part-name order.
pub(crate) fn blank_parts() -> Vec<(String, Vec<u8>)> {
    let layouts = [
        title_slide_layout(),
        title_and_content_layout(),
        section_header_layout(),
        blank_layout(),
    ];

    let mut parts = vec![
        ("[Content_Types].xml".to_string(), content_types()),
        ("_rels/.rels".to_string(), root_rels()),
        ("ppt/presentation.xml".to_string(), presentation()),
        (
            "ppt/_rels/presentation.xml.rels".to_string(),
            presentation_rels(),
        ),
        (
            "ppt/slideMasters/slideMaster1.xml".to_string(),
            slide_master(),
        ),
        (
            "ppt/slideMasters/_rels/slideMaster1.xml.rels".to_string(),
            slide_master_rels(),
        ),
        ("ppt/theme/theme1.xml".to_string(), theme()),
    ];
    for (i, xml) in layouts.into_iter().enumerate() {
        parts.push((format!("ppt/slideLayouts/slideLayout{}.xml", i + 1), xml));
        parts.push((
            format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", i + 1),
            layout_rels(),
        ));
    }

    parts
        .into_iter()
        .map(|(name, xml)| (name, xml.into_bytes()))
        .collect()
}
