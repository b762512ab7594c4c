//! Slide part XML.

use std::fmt::Write as FmtWrite;

use deck_core::{Result, Slide};

use crate::package::XML_DECLARATION;
use crate::shape::write_shape;

/// Id 1 belongs to the slide's group shape.
const FIRST_SHAPE_ID: u32 = 2;

/// Serialize a slide with a solid background and its shapes in z-order.
pub(crate) fn slide_xml(slide: &Slide) -> Result<String> {
    let mut xml = String::with_capacity(2048 + slide.shapes().len() * 1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    );
    xml.push_str("<p:cSld>");
    write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        slide.background().hex()
    )?;

    xml.push_str("<p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

    for (shape, id) in slide.shapes().iter().zip(FIRST_SHAPE_ID..) {
        write_shape(&mut xml, shape, id)?;
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{AutoShape, Frame, Rgb, TextBox};

    #[test]
    fn test_slide_background_and_shape_ids() {
        let mut slide = Slide::new(Rgb::new(26, 26, 26));
        slide.push(AutoShape::rectangle(Frame::default()));
        slide.push(TextBox::new(Frame::default(), "Hello"));

        let xml = slide_xml(&slide).unwrap();
        assert!(xml.contains(r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="1A1A1A"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#));
        assert!(xml.contains(r#"<p:cNvPr id="2" name="Rectangle 1"/>"#));
        assert!(xml.contains(r#"<p:cNvPr id="3" name="TextBox 2"/>"#));

        let rect = xml.find("Rectangle 1").unwrap();
        let text = xml.find("TextBox 2").unwrap();
        assert!(rect < text);
    }

    #[test]
    fn test_empty_slide() {
        let xml = slide_xml(&Slide::new(Rgb::WHITE)).unwrap();
        assert!(xml.contains("FFFFFF"));
        assert!(xml.contains("<p:spTree>"));
        assert!(!xml.contains("<p:sp>"));
    }
}
