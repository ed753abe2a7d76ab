//! CSV Export functionality
//!
//! One row per included item, in presentation order, with a fixed header.
//! Quoting goes through the `csv` crate so supplier names and descriptions
//! containing delimiters, quotes or line breaks read back unchanged.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::config::settings::Settings;
use crate::error::{BorderoError, BorderoResult};
use crate::models::money::currency_minor_units;
use crate::models::{PaymentItem, WeekPeriod};

/// Column names of the export, in order
pub const EXPORT_HEADER: [&str; 9] = [
    "fornecedor",
    "descricao",
    "centroCusto",
    "banco",
    "conta",
    "metodo",
    "vencimento",
    "valor",
    "status",
];

/// A single exported line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub fornecedor: String,
    pub descricao: String,
    #[serde(rename = "centroCusto")]
    pub centro_custo: String,
    pub banco: String,
    pub conta: String,
    pub metodo: String,
    /// `YYYY-MM-DD` in the period's offset, or the raw text if unreadable
    pub vencimento: String,
    pub valor: String,
    pub status: String,
}

impl ExportRow {
    pub fn from_item(item: &PaymentItem, period: &WeekPeriod, decimal_separator: char) -> Self {
        let vencimento = item
            .due_at(period.offset())
            .map(|due| {
                due.with_timezone(&period.offset())
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .unwrap_or_else(|_| item.due.clone());

        Self {
            fornecedor: item.supplier.clone(),
            descricao: item.description.clone(),
            centro_custo: item.cost_center.clone(),
            banco: item.bank.clone(),
            conta: item.account.clone(),
            metodo: item.method.to_string(),
            vencimento,
            valor: item
                .value
                .format_decimal(currency_minor_units(&item.currency), decimal_separator),
            status: item.status.to_string(),
        }
    }

    fn as_record(&self) -> [&str; 9] {
        [
            &self.fornecedor,
            &self.descricao,
            &self.centro_custo,
            &self.banco,
            &self.conta,
            &self.metodo,
            &self.vencimento,
            &self.valor,
            &self.status,
        ]
    }
}

/// Build the export rows for the included items
pub fn export_rows<'a, I>(included: I, period: &WeekPeriod, settings: &Settings) -> Vec<ExportRow>
where
    I: IntoIterator<Item = &'a PaymentItem>,
{
    included
        .into_iter()
        .map(|item| ExportRow::from_item(item, period, settings.decimal_separator))
        .collect()
}

/// Write rows as CSV; the header is written even when there are no rows
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W, delimiter: u8) -> BorderoResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(EXPORT_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.as_record())?;
    }

    csv_writer
        .flush()
        .map_err(|e| BorderoError::Csv(e.to_string()))?;

    Ok(())
}

/// Default file name for a week's export, e.g. `bordero-semanal-2025-01-13.csv`
pub fn export_filename(period: &WeekPeriod, extension: &str) -> String {
    format!(
        "bordero-semanal-{}.{}",
        period.start_date().format("%Y-%m-%d"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountKey, ItemStatus, Money, PaymentMethod};
    use chrono::{FixedOffset, TimeZone};

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn period() -> WeekPeriod {
        WeekPeriod::containing(brt().with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap())
    }

    fn item() -> PaymentItem {
        PaymentItem::new(
            "1",
            "Fornecedor A",
            AccountKey::new("Itaú", "Operacional"),
            PaymentMethod::Pix,
            brt().with_ymd_and_hms(2025, 1, 13, 22, 0, 0).unwrap(),
            Money::from_cents(320050),
        )
        .with_description("Serviços de limpeza")
        .with_cost_center("Manutenção")
        .with_status(ItemStatus::Approved)
    }

    fn read_back(bytes: &[u8], delimiter: u8) -> Vec<Vec<String>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_reader(bytes);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_row_columns() {
        let settings = Settings::default();
        let rows = export_rows([&item()], &period(), &settings);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.fornecedor, "Fornecedor A");
        assert_eq!(row.metodo, "PIX");
        // 22:00 at -03:00 stays on the 13th in the period's offset
        assert_eq!(row.vencimento, "2025-01-13");
        assert_eq!(row.valor, "3200,50");
        assert_eq!(row.status, "Aprovado");
    }

    #[test]
    fn test_decimal_separator_and_minor_units() {
        let settings = Settings {
            decimal_separator: '.',
            ..Settings::default()
        };
        let mut yen = item();
        yen.currency = "JPY".into();
        yen.value = Money::from_cents(123456);

        let rows = export_rows([&item(), &yen], &period(), &settings);
        assert_eq!(rows[0].valor, "3200.50");
        assert_eq!(rows[1].valor, "1235");
    }

    #[test]
    fn test_three_minor_digit_currency_keeps_last_digit() {
        let json = r#"{
            "id": "7", "fornecedor": "Kuwait Co", "banco": "NBK", "conta": "Main",
            "metodo": "TED", "vencimento": "2025-01-14", "valor": "1.005", "moeda": "KWD"
        }"#;
        let kwd: PaymentItem = serde_json::from_str(json).unwrap();
        assert!(kwd.validate().is_ok());

        let rows = export_rows([&kwd, &kwd], &period(), &Settings::default());
        assert_eq!(rows[0].valor, "1,005");

        let total: Money = [&kwd, &kwd].iter().map(|item| item.value).sum();
        assert_eq!(total.format_decimal(3, ','), "2,010");
    }

    #[test]
    fn test_unparseable_due_date_is_kept_raw() {
        let mut broken = item();
        broken.due = "amanhã".into();
        let rows = export_rows([&broken], &period(), &Settings::default());
        assert_eq!(rows[0].vencimento, "amanhã");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_failure_is_csv_error() {
        let rows = export_rows([&item()], &period(), &Settings::default());
        let err = write_csv(&rows, BrokenPipe, b',').unwrap_err();
        assert!(matches!(err, BorderoError::Csv(_)));
    }

    #[test]
    fn test_header_written_for_empty_export() {
        let mut out = Vec::new();
        write_csv(&[], &mut out, b',').unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "fornecedor,descricao,centroCusto,banco,conta,metodo,vencimento,valor,status\n"
        );
    }

    #[test]
    fn test_round_trip_with_special_characters() {
        let mut tricky = item();
        tricky.supplier = "Silva, Souza & \"Cia\"".into();
        tricky.description = "linha 1\nlinha 2".into();
        tricky.cost_center = "a;b".into();

        let rows = export_rows([&tricky], &period(), &Settings::default());

        for delimiter in [b',', b';'] {
            let mut out = Vec::new();
            write_csv(&rows, &mut out, delimiter).unwrap();

            let records = read_back(&out, delimiter);
            assert_eq!(records.len(), 2);
            assert_eq!(records[0], EXPORT_HEADER.to_vec());
            assert_eq!(records[1][0], "Silva, Souza & \"Cia\"");
            assert_eq!(records[1][1], "linha 1\nlinha 2");
            assert_eq!(records[1][2], "a;b");
            assert_eq!(records[1][7], "3200,50");
        }
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename(&period(), "csv"),
            "bordero-semanal-2025-01-13.csv"
        );
    }
}
