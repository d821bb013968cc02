//! In-memory CSV writer for one artifact.

use csv::Writer;

use crate::error_handling::ExportError;

/// Builds one CSV document in memory.
pub(crate) struct ArtifactWriter {
    writer: Writer<Vec<u8>>,
}

impl ArtifactWriter {
    /// Starts a document with `headers` as its first record.
    pub(crate) fn new<I, T>(headers: I) -> Result<Self, ExportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(headers)?;
        Ok(ArtifactWriter { writer })
    }

    pub(crate) fn row<I, T>(&mut self, fields: I) -> Result<(), ExportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer.write_record(fields)?;
        Ok(())
    }

    /// Flushes and returns the document text.
    pub(crate) fn finish(self) -> Result<String, ExportError> {
        let bytes = self
            .writer
            .into_inner()
            .map_err(|e| ExportError::Flush(e.error().to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Boolean cell text.
pub(crate) fn flag(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

/// Fixed two-decimal cell text.
pub(crate) fn decimal(value: f64) -> String {
    format!("{value:.2}")
}
