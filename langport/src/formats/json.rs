//! JSON namespace files, used both as a source format and as the output
//! format written for the i18n runtime.

use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::TranslationNode};

/// Parses a JSON document into a tree, keeping object key order.
pub fn parse(text: &str) -> Result<TranslationNode, serde_json::Error> {
    serde_json::from_str(text)
}

impl Parser for TranslationNode {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes pretty-printed JSON followed by a newline.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_output_is_pretty_and_ordered() {
        let node = parse(r#"{"b": "B", "a": {"y": "1", "x": "2"}}"#).unwrap();
        let mut buffer = Vec::new();
        node.to_writer(&mut buffer).unwrap();
        let written = String::from_utf8(buffer).unwrap();
        assert_eq!(
            written,
            "{\n  \"b\": \"B\",\n  \"a\": {\n    \"y\": \"1\",\n    \"x\": \"2\"\n  }\n}\n"
        );
    }

    #[test]
    fn test_empty_group_writes_empty_object() {
        let mut buffer = Vec::new();
        TranslationNode::group().to_writer(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{}\n");
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("common.json");
        std::fs::write(&path, r#"{"hello": "Hello :name"}"#).unwrap();
        let node = TranslationNode::read_from(&path).unwrap();
        assert_eq!(node.get_path("hello"), Some(&TranslationNode::leaf("Hello :name")));
    }
}
