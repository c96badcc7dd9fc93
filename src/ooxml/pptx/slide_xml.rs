//! XML for a new, empty slide based on a layout.
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::shapes::placeholder::{PlaceholderShape, PlaceholderType};
use std::fmt::Write;

/// Generate the XML of a slide that clones the cloneable placeholders of a layout.
///
/// Cloned placeholders carry their type and index but an empty `<p:spPr/>`, so
/// their geometry is inherited from the layout. Date, footer and slide-number
/// placeholders are not cloned.
pub fn new_slide_xml(layout_placeholders: &[PlaceholderShape]) -> String {
    let mut xml = String::with_capacity(1024 + layout_placeholders.len() * 256);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    // Writing into a String cannot fail
    let _ = write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        namespace::DML_MAIN,
        namespace::OFC_RELATIONSHIPS,
        namespace::PML_MAIN
    );
    xml.push_str("<p:cSld>");
    xml.push_str("<p:spTree>");
    xml.push_str("<p:nvGrpSpPr>");
    xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
    xml.push_str("<p:cNvGrpSpPr/>");
    xml.push_str("<p:nvPr/>");
    xml.push_str("</p:nvGrpSpPr>");
    xml.push_str("<p:grpSpPr/>");

    let cloneable = layout_placeholders
        .iter()
        .filter(|ph| ph.ph_type.is_cloned_on_new_slide());
    for (shape_id, ph) in (2u32..).zip(cloneable) {
        write_placeholder(&mut xml, shape_id, ph);
    }

    xml.push_str("</p:spTree>");
    xml.push_str("</p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");

    xml
}

fn write_placeholder(xml: &mut String, shape_id: u32, ph: &PlaceholderShape) {
    xml.push_str("<p:sp>");
    xml.push_str("<p:nvSpPr>");
    let _ = write!(
        xml,
        r#"<p:cNvPr id="{}" name="{}"/>"#,
        shape_id,
        escape_xml(&ph.name)
    );
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str("<p:nvPr><p:ph");
    if ph.ph_type != PlaceholderType::Object {
        let _ = write!(xml, r#" type="{}""#, ph.ph_type.token());
    }
    if ph.idx != 0 {
        let _ = write!(xml, r#" idx="{}""#, ph.idx);
    }
    xml.push_str("/></p:nvPr>");
    xml.push_str("</p:nvSpPr>");
    xml.push_str("<p:spPr/>");
    xml.push_str("</p:sp>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::shapes::placeholder::{Xfrm, parse_placeholders};

    #[test]
    fn test_clones_all_but_footer_family() {
        let layout = vec![
            PlaceholderShape {
                name: "Title & More".to_string(),
                ph_type: PlaceholderType::Title,
                idx: 0,
                xfrm: Some(Xfrm { x: 1, y: 2, cx: 3, cy: 4 }),
            },
            PlaceholderShape {
                name: "Content".to_string(),
                ph_type: PlaceholderType::Object,
                idx: 1,
                xfrm: None,
            },
            PlaceholderShape {
                name: "Footer".to_string(),
                ph_type: PlaceholderType::Footer,
                idx: 11,
                xfrm: None,
            },
            PlaceholderShape {
                name: "Number".to_string(),
                ph_type: PlaceholderType::SlideNumber,
                idx: 12,
                xfrm: None,
            },
        ];

        let xml = new_slide_xml(&layout);
        let cloned = parse_placeholders(xml.as_bytes()).unwrap();

        assert_eq!(cloned.len(), 2);
        assert_eq!(cloned[0].name, "Title & More");
        assert_eq!(cloned[0].ph_type, PlaceholderType::Title);
        assert_eq!(cloned[0].xfrm, None);
        assert_eq!(cloned[1].ph_type, PlaceholderType::Object);
        assert_eq!(cloned[1].idx, 1);
    }

    #[test]
    fn test_empty_layout() {
        let xml = new_slide_xml(&[]);
        assert!(xml.contains("<p:spTree>"));
        assert!(parse_placeholders(xml.as_bytes()).unwrap().is_empty());
    }
}
