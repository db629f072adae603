use crate::error::Result;
use crate::interfaces::batch::Outcome;
use std::io::Write;

/// Writes request outcomes as CSV with header `row,type,status,detail`.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcomes(&mut self, outcomes: impl IntoIterator<Item = Outcome>) -> Result<()> {
        for outcome in outcomes {
            self.writer.serialize(outcome)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let mut buffer = Vec::new();
        {
            let mut writer = OutcomeWriter::new(&mut buffer);
            writer
                .write_outcomes(vec![
                    Outcome {
                        row: 1,
                        r#type: "charge",
                        status: "charged",
                        detail: "1".into(),
                    },
                    Outcome {
                        row: 2,
                        r#type: "charge",
                        status: "currency_not_supported",
                        detail: "currency [EUR] not supported".into(),
                    },
                ])
                .unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "row,type,status,detail\n1,charge,charged,1\n2,charge,currency_not_supported,currency [EUR] not supported\n"
        );
    }
}
