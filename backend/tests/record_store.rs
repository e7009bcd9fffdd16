use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use expense_tracker::config::AppConfig;
use expense_tracker::domain::models::ExpenseId;
use expense_tracker::domain::{ExpenseError, ExpenseService};
use expense_tracker::storage::csv::BeforeReplaceHook;
use expense_tracker::storage::{CsvConnection, StoreStatus};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> (ExpenseService<CsvConnection>, AppConfig) {
    let config = AppConfig::for_directory(dir.path());
    let connection = CsvConnection::new(&config).unwrap();
    let service = ExpenseService::new(&connection);
    (service, config)
}

/// A store whose rewrites fail right before the final rename once `armed` is set
fn open_faulty_store(dir: &TempDir, armed: Arc<AtomicBool>) -> ExpenseService<CsvConnection> {
    let config = AppConfig::for_directory(dir.path());
    let hook: BeforeReplaceHook = Arc::new(move |_temp_path: &Path| {
        if armed.load(Ordering::SeqCst) {
            Err(io::Error::new(io::ErrorKind::Interrupted, "simulated crash"))
        } else {
            Ok(())
        }
    });
    let connection = CsvConnection::new(&config).unwrap().with_before_replace(hook);
    ExpenseService::new(&connection)
}

#[test]
fn initialize_creates_store_with_header() {
    let dir = TempDir::new().unwrap();
    let (service, config) = open_store(&dir);

    assert_eq!(service.initialize().unwrap(), StoreStatus::Created);
    assert_eq!(
        fs::read_to_string(config.expense_file_path()).unwrap(),
        "ID,Date,Description,Amount\n"
    );
    assert_eq!(service.initialize().unwrap(), StoreStatus::Ready);
}

#[test]
fn list_without_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let (service, _config) = open_store(&dir);

    assert!(service.list().unwrap().is_empty());
}

#[test]
fn add_appends_exactly_one_record_with_fresh_id() {
    let dir = TempDir::new().unwrap();
    let (service, _config) = open_store(&dir);
    service.initialize().unwrap();

    let mut seen = HashSet::new();
    for (date, description, amount) in [
        ("2024-05-01", "Groceries", "42.10"),
        ("2024-05-03", "Cinema", "12"),
        ("2024-06-11", "Train ticket", "89.99"),
    ] {
        let before = service.list().unwrap();
        let id = service.add(date, description, amount).unwrap();
        let after = service.list().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        let added = after.last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.date, date);
        assert_eq!(added.description, description);
        assert_eq!(added.amount, amount);
        assert!(seen.insert(id));
    }
}

#[test]
fn add_rejects_bad_amounts_and_dates() {
    let dir = TempDir::new().unwrap();
    let (service, _config) = open_store(&dir);
    service.initialize().unwrap();

    assert!(matches!(
        service.add("2024-05-01", "Refund", "0"),
        Err(ExpenseError::InvalidAmount(_))
    ));
    assert!(matches!(
        service.add("2024-05-01", "Refund", "-5"),
        Err(ExpenseError::InvalidAmount(_))
    ));
    assert!(matches!(
        service.add("13/31/2024", "Lunch", "10"),
        Err(ExpenseError::InvalidDate(_))
    ));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn update_unknown_id_fails_and_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let (service, _config) = open_store(&dir);
    service.initialize().unwrap();
    service.add("2024-05-01", "Lunch", "10").unwrap();
    let before = service.list().unwrap();

    let result = service.update(&ExpenseId::generate(), "2024-05-02", "Dinner", "20");

    assert!(matches!(result, Err(ExpenseError::NotFound(_))));
    assert_eq!(service.list().unwrap(), before);
}

#[test]
fn delete_removes_record_and_preserves_order() {
    let dir = TempDir::new().unwrap();
    let (service, _config) = open_store(&dir);
    service.initialize().unwrap();
    let ids: Vec<ExpenseId> = (1..=4)
        .map(|day| {
            service
                .add(&format!("2024-05-0{}", day), &format!("Item {}", day), "5")
                .unwrap()
        })
        .collect();
    let before = service.list().unwrap();

    service.delete(&ids[1]).unwrap();

    let after = service.list().unwrap();
    assert!(after.iter().all(|e| e.id != ids[1]));
    let expected: Vec<_> = before.into_iter().filter(|e| e.id != ids[1]).collect();
    assert_eq!(after, expected);
}

#[test]
fn update_with_same_values_round_trips() {
    let dir = TempDir::new().unwrap();
    let (service, _config) = open_store(&dir);
    service.initialize().unwrap();
    let id = service.add("2024-05-01", "Lunch", "12.50").unwrap();
    let original = service.get(&id).unwrap();

    service.update(&id, "2024-05-01", "Lunch", "12.50").unwrap();

    assert_eq!(service.list().unwrap(), vec![original]);
}

#[test]
fn interrupted_update_keeps_previous_content() {
    let dir = TempDir::new().unwrap();
    let armed = Arc::new(AtomicBool::new(false));
    let service = open_faulty_store(&dir, armed.clone());
    service.initialize().unwrap();
    let id = service.add("2024-05-01", "Lunch", "10").unwrap();
    service.add("2024-05-02", "Dinner", "20").unwrap();
    let before = service.list().unwrap();

    armed.store(true, Ordering::SeqCst);
    let err = service.update(&id, "2024-05-01", "Brunch", "15").unwrap_err();

    assert!(err.is_io_failure());
    assert_eq!(service.list().unwrap(), before);
}

#[test]
fn interrupted_delete_keeps_previous_content() {
    let dir = TempDir::new().unwrap();
    let armed = Arc::new(AtomicBool::new(false));
    let service = open_faulty_store(&dir, armed.clone());
    service.initialize().unwrap();
    let id = service.add("2024-05-01", "Lunch", "10").unwrap();
    let before = service.list().unwrap();

    armed.store(true, Ordering::SeqCst);
    assert!(service.delete(&id).unwrap_err().is_io_failure());

    assert_eq!(service.list().unwrap(), before);

    armed.store(false, Ordering::SeqCst);
    service.delete(&id).unwrap();
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn crash_before_replace_leaves_stale_temp_that_initialize_cleans_up() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::for_directory(dir.path());
    let crash = Arc::new(AtomicBool::new(false));
    let flag = crash.clone();
    let hook: BeforeReplaceHook = Arc::new(move |_: &Path| -> io::Result<()> {
        if flag.load(Ordering::SeqCst) {
            panic!("process killed mid-rewrite");
        }
        Ok(())
    });
    let connection = CsvConnection::new(&config).unwrap().with_before_replace(hook);
    let service = ExpenseService::new(&connection);
    service.initialize().unwrap();
    let id = service.add("2024-05-01", "Lunch", "10").unwrap();
    let before = service.list().unwrap();

    crash.store(true, Ordering::SeqCst);
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| service.delete(&id)));
    assert!(outcome.is_err());

    assert!(connection.temp_file_path().exists());
    assert_eq!(service.list().unwrap(), before);

    crash.store(false, Ordering::SeqCst);
    assert_eq!(service.initialize().unwrap(), StoreStatus::Ready);
    assert!(!connection.temp_file_path().exists());
    assert_eq!(service.list().unwrap(), before);
}

#[test]
fn mismatched_schema_warns_on_initialize_and_fails_reads() {
    let dir = TempDir::new().unwrap();
    let (service, config) = open_store(&dir);
    fs::write(
        config.expense_file_path(),
        "Date,Description,Amount\n2024-05-01,Lunch,10\n",
    )
    .unwrap();

    assert!(matches!(
        service.initialize().unwrap(),
        StoreStatus::SchemaMismatch { .. }
    ));
    assert!(matches!(service.list(), Err(ExpenseError::CorruptStore { .. })));
    assert!(matches!(
        service.add("2024-05-02", "Dinner", "20"),
        Err(ExpenseError::CorruptStore { .. })
    ));
}

#[test]
fn short_hand_edited_row_does_not_block_the_store() {
    let dir = TempDir::new().unwrap();
    let (service, config) = open_store(&dir);
    service.initialize().unwrap();
    let lunch = service.add("2024-05-01", "Lunch", "10").unwrap();
    service.add("2024-05-02", "Dinner", "20").unwrap();
    let mut contents = fs::read_to_string(config.expense_file_path()).unwrap();
    contents.push_str("legacy,2024-05-03,Old\n");
    fs::write(config.expense_file_path(), contents).unwrap();

    let expenses = service.list().unwrap();
    assert_eq!(expenses.len(), 3);
    assert_eq!(expenses[2].description, "Old");
    assert_eq!(expenses[2].amount, "");

    service.delete(&lunch).unwrap();
    service.delete(&ExpenseId::from("legacy")).unwrap();

    let remaining: Vec<String> = service
        .list()
        .unwrap()
        .into_iter()
        .map(|e| e.description)
        .collect();
    assert_eq!(remaining, vec!["Dinner"]);
}
