use crate::application::request::RequestSummary;
use crate::error::Result;
use crate::interfaces::SummarySink;
use std::io::Write;

/// Writes request summaries as CSV rows, header first.
pub struct CsvSummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }
}

impl<W: Write> SummarySink for CsvSummaryWriter<W> {
    fn write(&mut self, summary: &RequestSummary) -> Result<()> {
        self.writer.serialize(summary)?;
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
    use crate::domain::card::Card;
    use crate::domain::language::Language;
    use crate::domain::transaction::Transaction;

    #[test]
    fn test_writes_header_and_rows() {
        let mut tx = Transaction::new();
        tx.set_tid("abc1").unwrap();
        tx.set_amount(1237);
        let mut card = Card::new();
        card.set_number("4923993827951627")
            .and_then(|c| c.set_brand("visa"))
            .unwrap();
        let summary = AuthorizationRequest::new(tx, Some(card), Language::Spanish).summary();

        let mut buffer = Vec::new();
        {
            let mut writer = CsvSummaryWriter::new(&mut buffer);
            writer.write(&summary).unwrap();
            writer.finish().unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();

        assert_eq!(
            lines.next().unwrap(),
            "tid,product,installments,currency,amount,capture,authorization,order,timestamp,description,tokenize,brand,card,holder,expiry,security_indicator,token,language"
        );
        assert_eq!(
            lines.next().unwrap(),
            "abc1,1,1,986,12.37,false,0,,,,false,visa,492399******1627,,,,false,ES"
        );
    }
}
