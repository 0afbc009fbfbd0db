use async_trait::async_trait;
use scrapmon::counter::Alphabet;
use scrapmon::scraper::{FetchError, FetchedImage, Fetcher, Scrapper, StopReason};
use scrapmon::state::ScreenShotStatus;
use scrapmon::storage::{
    DatabaseManager, FileManager, LocalFileStore, Purger, ScreenShot, SqliteStorage, Storage,
    StorageError, StorageResult,
};
use scrapmon::ScrapmonError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// What the scripted fetcher answers for a code
#[derive(Clone)]
enum Reply {
    Image(&'static str),
    Nothing,
    Unreachable,
}

/// Fetcher answering from a script; unscripted codes get no payload
#[derive(Default)]
struct ScriptedFetcher {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn with(mut self, code: &str, reply: Reply) -> Self {
        self.replies.insert(code.to_string(), reply);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch_by_code(&self, code: &str) -> Result<Option<FetchedImage>, FetchError> {
        self.calls.lock().unwrap().push(code.to_string());

        match self.replies.get(code).cloned().unwrap_or(Reply::Nothing) {
            Reply::Image(image_type) => Ok(Some(FetchedImage {
                data: format!("image for {}", code).into_bytes(),
                image_type: image_type.to_string(),
            })),
            Reply::Nothing => Ok(None),
            Reply::Unreachable => Err(FetchError::Status {
                url: format!("https://prnt.sc/{}", code),
                status: 503,
            }),
        }
    }
}

/// Code space used by most tests: base 36, three digits, last code "zzz"
fn alphabet() -> Alphabet {
    Alphabet::parse("0123456789abcdefghijklmnopqrstuvwxyz").unwrap()
}

fn storage(dir: &TempDir) -> Storage<SqliteStorage, LocalFileStore> {
    Storage::new(
        SqliteStorage::open_in_memory().unwrap(),
        LocalFileStore::new(dir.path().join("screenshots")),
    )
}

fn seed(storage: &mut Storage<SqliteStorage, LocalFileStore>, codes: &[&str]) {
    for code in codes {
        storage
            .db
            .create_screenshot(&ScreenShot::pending(*code))
            .unwrap();
        storage
            .db
            .update_status_by_code(code, ScreenShotStatus::Failure)
            .unwrap();
    }
}

#[tokio::test]
async fn test_resumes_after_latest_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = storage(&dir);
    seed(&mut storage, &["003", "005"]);

    let alphabet = Alphabet::parse("0123456789").unwrap();
    let mut scrapper = Scrapper::new(storage, ScriptedFetcher::default(), alphabet, 3);

    let report = scrapper.run(None, 1).await.unwrap();

    assert_eq!(report.last_code.as_deref(), Some("006"));
    assert!(scrapper.storage().db.code_exists("006").unwrap());
    assert!(!scrapper.storage().db.code_exists("004").unwrap());
}

#[tokio::test]
async fn test_empty_payload_recorded_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default().with("009", Reply::Nothing);
    let mut scrapper = Scrapper::new(storage(&dir), fetcher, alphabet(), 3);

    let report = scrapper.run(Some("009"), 1).await.unwrap();

    assert_eq!(report.failed, 1);
    let record = scrapper.storage().db.get_by_code("009").unwrap().unwrap();
    assert_eq!(record.status, ScreenShotStatus::Failure);
    assert!(record.file_uri.is_empty());
}

#[tokio::test]
async fn test_payload_saved_as_code_and_type() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default().with("00a", Reply::Image("png"));
    let mut scrapper = Scrapper::new(storage(&dir), fetcher, alphabet(), 3);

    let report = scrapper.run(Some("00a"), 1).await.unwrap();

    assert_eq!(report.succeeded, 1);
    let record = scrapper.storage().db.get_by_code("00a").unwrap().unwrap();
    assert_eq!(record.status, ScreenShotStatus::Success);
    assert!(record.file_uri.ends_with("00a.png"));
    assert_eq!(
        std::fs::read(&record.file_uri).unwrap(),
        b"image for 00a".to_vec()
    );
}

#[tokio::test]
async fn test_fetch_error_is_recorded_and_pass_continues() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default()
        .with("001", Reply::Unreachable)
        .with("002", Reply::Image("jpg"));
    let mut scrapper = Scrapper::new(storage(&dir), fetcher, alphabet(), 3);

    let report = scrapper.run(Some("001"), 2).await.unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.succeeded, 1);

    let db = &scrapper.storage().db;
    assert_eq!(
        db.get_by_code("001").unwrap().unwrap().status,
        ScreenShotStatus::Failure
    );
    assert_eq!(
        db.get_by_code("002").unwrap().unwrap().status,
        ScreenShotStatus::Success
    );
}

#[tokio::test]
async fn test_existing_records_are_never_refetched() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = storage(&dir);
    seed(&mut storage, &["001", "003"]);

    let mut scrapper = Scrapper::new(storage, ScriptedFetcher::default(), alphabet(), 3);
    let report = scrapper.run(Some("000"), 5).await.unwrap();

    assert_eq!(report.visited, 5);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.created(), 3);

    assert_eq!(scrapper.fetcher().calls(), vec!["000", "002", "004"]);
    assert_eq!(scrapper.storage().db.count_total().unwrap(), 5);
}

#[tokio::test]
async fn test_second_pass_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default()
        .with("001", Reply::Image("png"))
        .with("100", Reply::Unreachable);
    let alphabet = Alphabet::parse("01").unwrap();
    let mut scrapper = Scrapper::new(storage(&dir), fetcher, alphabet, 3);

    let first = scrapper.run(Some("0"), 100).await.unwrap();
    assert_eq!(first.stop, StopReason::CodeSpaceExhausted);
    // 000 through 110; 111 is the last code and is never fetched
    assert_eq!(first.created(), 7);

    let second = scrapper.run(Some("0"), 100).await.unwrap();
    assert_eq!(second.stop, StopReason::CodeSpaceExhausted);
    assert_eq!(second.created(), 0);
    assert_eq!(second.skipped, 7);
    assert_eq!(scrapper.storage().db.count_total().unwrap(), 7);
}

#[tokio::test]
async fn test_resume_at_end_of_code_space() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = storage(&dir);
    seed(&mut storage, &["110"]);

    let alphabet = Alphabet::parse("01").unwrap();
    let mut scrapper = Scrapper::new(storage, ScriptedFetcher::default(), alphabet, 3);

    let report = scrapper.run(None, 10).await.unwrap();
    assert_eq!(report.visited, 0);
    assert_eq!(report.stop, StopReason::CodeSpaceExhausted);
}

#[tokio::test]
async fn test_interrupted_record_blocks_refetch() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = storage(&dir);
    // A crash between "ongoing" and "success" leaves this behind
    storage
        .db
        .create_screenshot(&ScreenShot::pending("004"))
        .unwrap();
    storage
        .db
        .update_status_by_code("004", ScreenShotStatus::Ongoing)
        .unwrap();

    let fetcher = ScriptedFetcher::default().with("004", Reply::Image("png"));
    let mut scrapper = Scrapper::new(storage, fetcher, alphabet(), 3);

    let report = scrapper.run(Some("004"), 1).await.unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(
        scrapper.storage().db.get_by_code("004").unwrap().unwrap().status,
        ScreenShotStatus::Ongoing
    );
}

#[tokio::test]
async fn test_purge_then_restart_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default().with("001", Reply::Image("png"));
    let mut scrapper = Scrapper::new(storage(&dir), fetcher, alphabet(), 3);

    scrapper.run(None, 3).await.unwrap();
    let saved = dir.path().join("screenshots").join("001.png");
    assert!(saved.exists());

    scrapper.storage_mut().purge().unwrap();

    for code in ["000", "001", "002"] {
        assert!(!scrapper.storage().db.code_exists(code).unwrap());
    }
    assert!(!saved.exists());

    let report = scrapper.run(None, 1).await.unwrap();
    assert_eq!(report.last_code.as_deref(), Some("000"));
}

#[tokio::test]
async fn test_fetcher_sees_codes_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default();
    let mut scrapper = Scrapper::new(storage(&dir), fetcher, alphabet(), 3);

    scrapper.run(Some("0zy"), 3).await.unwrap();

    assert_eq!(scrapper.fetcher().calls(), vec!["0zy", "0zz", "100"]);
}

/// File store whose writes always fail
struct ReadOnlyFiles {
    root: PathBuf,
}

impl Purger for ReadOnlyFiles {
    fn purge(&mut self) -> StorageResult<()> {
        Ok(())
    }
}

impl FileManager for ReadOnlyFiles {
    fn root(&self) -> &Path {
        &self.root
    }

    fn save_file(&mut self, _data: &[u8], _path: &Path) -> StorageResult<PathBuf> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        )))
    }
}

#[tokio::test]
async fn test_file_save_failure_aborts_pass() {
    let fetcher = ScriptedFetcher::default().with("002", Reply::Image("png"));
    let storage = Storage::new(
        SqliteStorage::open_in_memory().unwrap(),
        ReadOnlyFiles {
            root: PathBuf::from("/readonly"),
        },
    );
    let mut scrapper = Scrapper::new(storage, fetcher, alphabet(), 3);

    let err = scrapper.run(Some("001"), 5).await.unwrap_err();
    assert!(matches!(err, ScrapmonError::FileSave { ref code, .. } if code == "002"));

    let db = &scrapper.storage().db;
    assert_eq!(
        db.get_by_code("002").unwrap().unwrap().status,
        ScreenShotStatus::Ongoing
    );
    assert!(!db.code_exists("003").unwrap());
}

/// Database that refuses to create a record for one code
struct FailingCreate {
    inner: SqliteStorage,
    fail_on: &'static str,
}

impl Purger for FailingCreate {
    fn purge(&mut self) -> StorageResult<()> {
        self.inner.purge()
    }
}

impl DatabaseManager for FailingCreate {
    fn create_screenshot(&mut self, screenshot: &ScreenShot) -> StorageResult<i64> {
        if screenshot.ref_code == self.fail_on {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.create_screenshot(screenshot)
    }

    fn update_status_by_code(
        &mut self,
        code: &str,
        status: ScreenShotStatus,
    ) -> StorageResult<()> {
        self.inner.update_status_by_code(code, status)
    }

    fn update_screenshot_by_code(&mut self, screenshot: &ScreenShot) -> StorageResult<()> {
        self.inner.update_screenshot_by_code(screenshot)
    }

    fn latest_created_code(&self) -> StorageResult<Option<String>> {
        self.inner.latest_created_code()
    }

    fn code_exists(&self, code: &str) -> StorageResult<bool> {
        self.inner.code_exists(code)
    }

    fn get_by_code(&self, code: &str) -> StorageResult<Option<ScreenShot>> {
        self.inner.get_by_code(code)
    }

    fn count_by_status(&self, status: ScreenShotStatus) -> StorageResult<u64> {
        self.inner.count_by_status(status)
    }

    fn count_total(&self) -> StorageResult<u64> {
        self.inner.count_total()
    }
}

#[tokio::test]
async fn test_store_failure_aborts_pass() {
    let dir = tempfile::tempdir().unwrap();
    let db = FailingCreate {
        inner: SqliteStorage::open_in_memory().unwrap(),
        fail_on: "003",
    };
    let storage = Storage::new(db, LocalFileStore::new(dir.path()));
    let mut scrapper = Scrapper::new(storage, ScriptedFetcher::default(), alphabet(), 3);

    let err = scrapper.run(Some("001"), 10).await.unwrap_err();
    match err {
        ScrapmonError::Store { code, stage, .. } => {
            assert_eq!(code, "003");
            assert_eq!(stage, "creating the pending record");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(scrapper.storage().db.count_total().unwrap(), 2);
}
