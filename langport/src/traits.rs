//! Traits for reading and writing langport's JSON artifacts.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for reading and writing one JSON artifact from/to one file.
///
/// Implemented by [`crate::TranslationNode`] (namespace files) and
/// [`crate::VersionMap`] (`versions.json`).
///
/// # Example
///
/// ```rust,no_run
/// use langport::{TranslationNode, traits::Parser};
/// let tree = TranslationNode::read_from("public/locales/en/auth.json")?;
/// tree.write_to("public/locales/en/auth.copy.json")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::read_error(path, e))?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
