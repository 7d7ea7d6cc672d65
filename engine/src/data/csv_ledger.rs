use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use shared::models::{FundingProject, NewUpdate, UpdateKind};
use shared::utils::{format_currency, parse_currency, parse_date};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

pub const DATE_HEADER: &str = "日付";
pub const AUTHOR_HEADER: &str = "名前";
pub const AMOUNT_HEADER: &str = "金額";
pub const MESSAGE_HEADER: &str = "メッセージ";

/// One row of a contribution ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRecord {
    pub date: NaiveDate,
    pub author: String,
    pub amount: i64,
    pub message: String,
}

impl ContributionRecord {
    /// Midnight UTC of the contribution date.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn to_update(&self) -> NewUpdate {
        NewUpdate::donation(self.amount, self.message.clone())
    }
}

pub struct ContributionCsv;

impl ContributionCsv {
    // CSV Header: 日付;名前;金額;メッセージ
    // Example Row: 2025-01-08;おじいちゃん;50,000円;入学お祝い金です
    pub fn load_contributions_from_csv(file_path: impl AsRef<Path>) -> Result<Vec<ContributionRecord>> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open CSV file '{}'", file_path.display()))?;
        Self::read_contributions(BufReader::new(file))
    }

    pub fn read_contributions<R: std::io::Read>(reader: R) -> Result<Vec<ContributionRecord>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut records = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let date_str = Self::required_field(&record, &headers, DATE_HEADER, line)?;
            let author = Self::required_field(&record, &headers, AUTHOR_HEADER, line)?;
            let amount_str = Self::required_field(&record, &headers, AMOUNT_HEADER, line)?;
            let message = Self::get_field(&record, &headers, MESSAGE_HEADER).unwrap_or("");

            let date = parse_date(date_str)
                .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", DATE_HEADER, line, e))?;
            let amount = parse_currency(amount_str)
                .map_err(|e| anyhow!("Error parsing '{}' at line {}: {}", AMOUNT_HEADER, line, e))?;
            if amount == 0 {
                return Err(anyhow!("Zero amount at line {}", line));
            }
            if author.is_empty() {
                return Err(anyhow!("Empty '{}' at line {}", AUTHOR_HEADER, line));
            }

            records.push(ContributionRecord {
                date,
                author: author.to_string(),
                amount,
                message: message.to_string(),
            });
        }
        Ok(records)
    }

    /// Writes the project's donations in the same layout the loader reads.
    pub fn write_ledger<W: Write>(writer: W, project: &FundingProject) -> Result<usize> {
        let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(writer);
        wtr.write_record([DATE_HEADER, AUTHOR_HEADER, AMOUNT_HEADER, MESSAGE_HEADER])?;

        let mut written = 0;
        for update in project.updates.iter().filter(|u| u.kind == UpdateKind::Donation) {
            let amount = update
                .amount
                .ok_or_else(|| anyhow!("Donation '{}' has no amount", update.id))?;
            wtr.write_record([
                update.timestamp.date_naive().format("%Y-%m-%d").to_string(),
                update.author.clone(),
                format_currency(amount)?,
                update.content.clone(),
            ])?;
            written += 1;
        }
        wtr.flush()?;
        Ok(written)
    }

    pub fn export_ledger_to_csv(file_path: impl AsRef<Path>, project: &FundingProject) -> Result<usize> {
        let file_path = file_path.as_ref();
        let file = File::create(file_path)
            .with_context(|| format!("Failed to create CSV file '{}'", file_path.display()))?;
        Self::write_ledger(file, project)
    }

    fn required_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str, line: usize) -> Result<&'a str> {
        Self::get_field(record, headers, name)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }

    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|pos| record.get(pos))
    }
}
