//! Small helpers for emitting package XML.

use crate::template::XML_DECL;
use std::fmt::Write as FmtWrite;

/// Escape text for use in element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// A relationships part (`*.rels`) under construction.
///
/// Ids are handed out in insertion order as `rId1`, `rId2`, ...
#[derive(Debug, Default)]
pub struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its id.
    pub fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.into()));
        id
    }

    pub fn to_xml(&self) -> Result<String, std::fmt::Error> {
        let mut xml = String::with_capacity(256 + self.entries.len() * 160);
        xml.push_str(XML_DECL);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.entries {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id,
                rel_type,
                escape(target)
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape("「📄 LN一覧」"), "「📄 LN一覧」");
    }

    #[test]
    fn test_relationship_ids_are_sequential() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add("t/slideLayout", "../slideLayouts/slideLayout1.xml"), "rId1");
        assert_eq!(rels.add("t/image", "../media/image1.png"), "rId2");
        let xml = rels.to_xml().unwrap();
        assert_eq!(xml.matches("<Relationship ").count(), 2);
        assert!(xml.contains(r#"Id="rId2" Type="t/image" Target="../media/image1.png""#));
    }
}
