use super::model::ZabbixExport;
use crate::error::{Error, Result};
use quick_xml::se::Serializer;
use serde::Serialize;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const ROOT_ELEMENT: &str = "zabbix_export";

fn encode_error(err: impl std::fmt::Display) -> Error {
    Error::Encode {
        what: "template XML",
        message: err.to_string(),
    }
}

/// Render the export as indented XML, declaration first, trailing newline.
pub fn render(export: &ZabbixExport) -> Result<String> {
    let mut body = String::new();
    let mut serializer =
        Serializer::with_root(&mut body, Some(ROOT_ELEMENT)).map_err(encode_error)?;
    serializer.indent(' ', 2);
    export.serialize(serializer).map_err(encode_error)?;

    let mut out = String::with_capacity(XML_DECLARATION.len() + body.len() + 2);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    out.push_str(&body);
    out.push('\n');
    Ok(out)
}
