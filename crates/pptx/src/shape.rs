//! DrawingML for the shapes a slide can hold.

use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

use deck_core::normalize::sanitize;
use deck_core::{
    Alignment, AutoShape, Connector, ConnectorKind, DashStyle, Fill, Font, Frame, Geometry, Line,
    Paragraph, Result, Shape, Table, TextBody, TextBox,
};

/// Medium Style 2 - Accent 1.
pub(crate) const TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

const TABLE_GRAPHIC_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

/// Write one shape with the given id. Names count from 1 like the ids
/// of a fresh slide, where id 1 is the group root.
pub(crate) fn write_shape(xml: &mut String, shape: &Shape, id: u32) -> Result<()> {
    match shape {
        Shape::TextBox(tb) => write_text_box(xml, tb, id),
        Shape::AutoShape(s) => write_auto_shape(xml, s, id),
        Shape::Connector(c) => write_connector(xml, c, id),
        Shape::Table(t) => write_table(xml, t, id),
    }
}

fn write_text_box(xml: &mut String, tb: &TextBox, id: u32) -> Result<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="TextBox {}"/>"#, id, id - 1)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &tb.frame, "")?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
    xml.push_str("</p:spPr>");

    xml.push_str("<p:txBody>");
    let wrap = if tb.word_wrap { "square" } else { "none" };
    write!(
        xml,
        r#"<a:bodyPr wrap="{}" rtlCol="0"><a:spAutoFit/></a:bodyPr><a:lstStyle/>"#,
        wrap
    )?;
    write_paragraphs(xml, &tb.body)?;
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_auto_shape(xml: &mut String, shape: &AutoShape, id: u32) -> Result<()> {
    let (name, preset) = match shape.geometry {
        Geometry::Rectangle => ("Rectangle", "rect"),
        Geometry::Oval => ("Oval", "ellipse"),
    };

    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{} {}"/>"#, id, name, id - 1)?;
    xml.push_str("<p:cNvSpPr/><p:nvPr/></p:nvSpPr>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &shape.frame, "")?;
    write!(xml, r#"<a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#, preset)?;
    write_fill(xml, shape.fill)?;
    write_line(xml, &shape.line)?;
    xml.push_str("</p:spPr>");

    xml.push_str(concat!(
        "<p:style>",
        r#"<a:lnRef idx="1"><a:schemeClr val="accent1"/></a:lnRef>"#,
        r#"<a:fillRef idx="3"><a:schemeClr val="accent1"/></a:fillRef>"#,
        r#"<a:effectRef idx="2"><a:schemeClr val="accent1"/></a:effectRef>"#,
        r#"<a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef>"#,
        "</p:style>",
    ));

    xml.push_str(r#"<p:txBody><a:bodyPr rtlCol="0" anchor="ctr"/><a:lstStyle/>"#);
    match &shape.body {
        Some(body) => write_paragraphs(xml, body)?,
        None => xml.push_str(r#"<a:p><a:pPr algn="ctr"/></a:p>"#),
    }
    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn write_connector(xml: &mut String, connector: &Connector, id: u32) -> Result<()> {
    let preset = match connector.kind {
        ConnectorKind::Straight => "line",
        ConnectorKind::Curved => "curvedConnector3",
    };
    let mut flips = String::new();
    if connector.flip_h() {
        flips.push_str(r#" flipH="1""#);
    }
    if connector.flip_v() {
        flips.push_str(r#" flipV="1""#);
    }

    xml.push_str("<p:cxnSp><p:nvCxnSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="Connector {}"/>"#, id, id - 1)?;
    xml.push_str("<p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr>");

    xml.push_str("<p:spPr>");
    write_xfrm(xml, &connector.frame(), &flips)?;
    write!(xml, r#"<a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#, preset)?;
    write_line(xml, &connector.line)?;
    xml.push_str("</p:spPr>");

    xml.push_str(concat!(
        "<p:style>",
        r#"<a:lnRef idx="1"><a:schemeClr val="accent1"/></a:lnRef>"#,
        r#"<a:fillRef idx="0"><a:schemeClr val="accent1"/></a:fillRef>"#,
        r#"<a:effectRef idx="0"><a:schemeClr val="accent1"/></a:effectRef>"#,
        r#"<a:fontRef idx="minor"><a:schemeClr val="tx1"/></a:fontRef>"#,
        "</p:style>",
    ));
    xml.push_str("</p:cxnSp>");
    Ok(())
}

fn write_table(xml: &mut String, table: &Table, id: u32) -> Result<()> {
    let frame = &table.frame;

    xml.push_str("<p:graphicFrame><p:nvGraphicFramePr>");
    write!(xml, r#"<p:cNvPr id="{}" name="Table {}"/>"#, id, id - 1)?;
    xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr>"#);
    write!(
        xml,
        r#"<p:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></p:xfrm>"#,
        frame.x.value(),
        frame.y.value(),
        frame.cx.value(),
        frame.cy.value()
    )?;

    write!(
        xml,
        r#"<a:graphic><a:graphicData uri="{}"><a:tbl>"#,
        TABLE_GRAPHIC_URI
    )?;
    write!(
        xml,
        r#"<a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{}</a:tableStyleId></a:tblPr>"#,
        TABLE_STYLE_ID
    )?;

    xml.push_str("<a:tblGrid>");
    for width in &table.columns {
        write!(xml, r#"<a:gridCol w="{}"/>"#, width.value())?;
    }
    xml.push_str("</a:tblGrid>");

    let row_height = table.row_height().value();
    for row in &table.rows {
        write!(xml, r#"<a:tr h="{}">"#, row_height)?;
        for cell in row {
            xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>");
            write_paragraphs(xml, cell)?;
            xml.push_str("</a:txBody><a:tcPr/></a:tc>");
        }
        xml.push_str("</a:tr>");
    }

    xml.push_str("</a:tbl></a:graphicData></a:graphic></p:graphicFrame>");
    Ok(())
}

fn write_xfrm(xml: &mut String, frame: &Frame, attrs: &str) -> Result<()> {
    write!(
        xml,
        r#"<a:xfrm{}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        attrs,
        frame.x.value(),
        frame.y.value(),
        frame.cx.value(),
        frame.cy.value()
    )?;
    Ok(())
}

/// `Fill::Theme` writes nothing and lets the style reference apply.
fn write_fill(xml: &mut String, fill: Fill) -> Result<()> {
    match fill {
        Fill::Theme => {},
        Fill::NoFill => xml.push_str("<a:noFill/>"),
        Fill::Solid(color) => write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            color.hex()
        )?,
    }
    Ok(())
}

fn write_line(xml: &mut String, line: &Line) -> Result<()> {
    if *line == Line::default() {
        return Ok(());
    }

    xml.push_str("<a:ln");
    if let Some(width) = line.width {
        write!(xml, r#" w="{}""#, width.value())?;
    }
    xml.push('>');
    write_fill(xml, line.fill)?;
    if let Some(DashStyle::Dash) = line.dash {
        xml.push_str(r#"<a:prstDash val="dash"/>"#);
    }
    xml.push_str("</a:ln>");
    Ok(())
}

/// Every text body gets at least one paragraph.
fn write_paragraphs(xml: &mut String, body: &TextBody) -> Result<()> {
    if body.paragraphs.is_empty() {
        return write_paragraph(xml, &Paragraph::default());
    }
    for paragraph in &body.paragraphs {
        write_paragraph(xml, paragraph)?;
    }
    Ok(())
}

/// Paragraphs without an alignment follow the master (left).
fn write_paragraph(xml: &mut String, paragraph: &Paragraph) -> Result<()> {
    xml.push_str("<a:p>");
    if let Some(align) = paragraph.align {
        let algn = match align {
            Alignment::Left => "l",
            Alignment::Center => "ctr",
            Alignment::Right => "r",
        };
        write!(xml, r#"<a:pPr algn="{}"/>"#, algn)?;
    }

    for run in &paragraph.runs {
        let text = sanitize(&run.text);
        if text.is_empty() {
            continue;
        }
        let font = paragraph.font.merged(&run.font);
        for (idx, segment) in text.split('\n').enumerate() {
            if idx > 0 {
                xml.push_str("<a:br>");
                write_run_properties(xml, "a:rPr", &font)?;
                xml.push_str("</a:br>");
            }
            if segment.is_empty() {
                continue;
            }
            xml.push_str("<a:r>");
            write_run_properties(xml, "a:rPr", &font)?;
            write!(xml, "<a:t>{}</a:t>", escape(segment))?;
            xml.push_str("</a:r>");
        }
    }

    write_run_properties(xml, "a:endParaRPr", &paragraph.font)?;
    xml.push_str("</a:p>");
    Ok(())
}

fn write_run_properties(xml: &mut String, tag: &str, font: &Font) -> Result<()> {
    write!(xml, r#"<{} lang="en-US""#, tag)?;
    if let Some(size) = font.size {
        write!(xml, r#" sz="{}""#, (size * 100.0) as u32)?;
    }
    if let Some(bold) = font.bold {
        write!(xml, r#" b="{}""#, u8::from(bold))?;
    }
    if let Some(italic) = font.italic {
        write!(xml, r#" i="{}""#, u8::from(italic))?;
    }
    xml.push_str(r#" dirty="0""#);

    if font.color.is_none() && font.name.is_none() {
        xml.push_str("/>");
        return Ok(());
    }

    xml.push('>');
    if let Some(color) = font.color {
        write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            color.hex()
        )?;
    }
    if let Some(name) = &font.name {
        write!(xml, r#"<a:latin typeface="{}"/>"#, escape(name.as_str()))?;
    }
    write!(xml, "</{}>", tag)?;
    Ok(())
}
