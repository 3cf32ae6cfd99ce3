//! Append-only JSONL writer and reader for [`AuditEntry`]

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{BudgetError, BudgetResult};

use super::entry::AuditEntry;

/// One JSON object per line; a line is complete once `log` returns
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append `entry` as a single line
    pub fn log(&self, entry: &AuditEntry) -> BudgetResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| {
                file.write_all(&line)?;
                file.flush()
            })
            .map_err(|e| BudgetError::Io(format!("audit log {}: {}", self.log_path.display(), e)))
    }

    /// Every entry in the log, oldest first; a missing log reads as empty
    pub fn read_all(&self) -> BudgetResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BudgetError::Io(format!(
                    "audit log {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|e| {
                    BudgetError::Json(format!("audit log line {}: {}", index + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BudgetResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{Operation, WriteOrigin};
    use crate::models::{BudgetId, CategoryId, Money, NewBudget, Period};
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn entry(id: i64) -> AuditEntry {
        let budget = NewBudget::new(
            CategoryId::new(1),
            Money::from_cents(100),
            Period::new(2025, 1).unwrap(),
        )
        .into_budget(BudgetId::new(id));
        AuditEntry::create(&budget, WriteOrigin::Manual)
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].budget_id, BudgetId::new(1));
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for i in 0..10 {
            logger.log(&entry(i)).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.budget_id.value()).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn test_empty_log() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_log_is_io_error() {
        let temp = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp.path().to_path_buf());
        assert!(matches!(logger.log(&entry(1)), Err(BudgetError::Io(_))));
    }

    #[test]
    fn test_corrupt_line_names_line_number() {
        let (logger, temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(temp.path().join("audit.log"))
            .unwrap();
        writeln!(file, "{{ not json").unwrap();

        match logger.read_all() {
            Err(BudgetError::Json(message)) => assert!(message.contains("line 2")),
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn test_survives_restart() {
        let (logger, temp) = create_test_logger();
        logger.log(&entry(1)).unwrap();

        let reopened = AuditLogger::new(temp.path().join("audit.log"));
        assert_eq!(reopened.read_all().unwrap().len(), 1);
    }
}
