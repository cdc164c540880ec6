use crate::application::request::RequestSummary;
use crate::error::Result;
use crate::interfaces::SummarySink;
use std::io::Write;

/// Writes one JSON object per line.
pub struct JsonSummaryWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonSummaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> SummarySink for JsonSummaryWriter<W> {
    fn write(&mut self, summary: &RequestSummary) -> Result<()> {
        serde_json::to_writer(&mut self.writer, summary)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::request::AuthorizationRequest;
    use crate::domain::language::Language;
    use crate::domain::transaction::Transaction;
    use serde_json::Value;

    #[test]
    fn test_writes_json_lines() {
        let mut tx = Transaction::new();
        tx.set_tid("abc1").unwrap();
        tx.set_product_type("A").unwrap();
        let summary = AuthorizationRequest::new(tx, None, Language::English).summary();

        let mut buffer = Vec::new();
        {
            let mut writer = JsonSummaryWriter::new(&mut buffer);
            writer.write(&summary).unwrap();
            writer.write(&summary).unwrap();
            writer.finish().unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().count(), 2);

        let value: Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(value["tid"], "abc1");
        assert_eq!(value["product"], "A");
        assert_eq!(value["language"], "EN");
        assert_eq!(value["card"], Value::Null);
    }
}
