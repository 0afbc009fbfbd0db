//! Scraper controller - the resumable enumeration loop
//!
//! This module walks the code space in ascending order and turns every code
//! without a record into exactly one fetch attempt:
//! - Resuming right after the most recently recorded code
//! - Skipping codes that already have a record, whatever its status
//! - Recording fetch failures instead of retrying them
//! - Aborting on any database or file store failure

use crate::counter::{Alphabet, CustomNumber};
use crate::scraper::fetcher::Fetcher;
use crate::state::ScreenShotStatus;
use crate::storage::{DatabaseManager, FileManager, ScreenShot, Storage, StorageError};
use crate::ScrapmonError;

/// Why a pass stopped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopReason {
    /// The iteration budget ran out
    #[default]
    BudgetExhausted,
    /// The last code of the space was reached
    CodeSpaceExhausted,
}

/// Summary of one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Codes the pass looked at, skipped ones included
    pub visited: u64,
    /// Codes that already had a record
    pub skipped: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// Last code looked at
    pub last_code: Option<String>,
    pub stop: StopReason,
}

impl PassReport {
    /// Records created during the pass
    pub fn created(&self) -> u64 {
        self.succeeded + self.failed
    }
}

enum Outcome {
    Saved,
    Failed,
}

/// Drives passes over the code space
///
/// The scraper assumes it is the only writer of both backends: checking for a
/// record and creating it are two separate store calls.
pub struct Scrapper<D, F, C> {
    storage: Storage<D, F>,
    fetcher: C,
    alphabet: Alphabet,
    width: usize,
}

impl<D, F, C> Scrapper<D, F, C>
where
    D: DatabaseManager,
    F: FileManager,
    C: Fetcher,
{
    /// Creates a scraper over codes of `width` digits in `alphabet`
    pub fn new(storage: Storage<D, F>, fetcher: C, alphabet: Alphabet, width: usize) -> Self {
        Self {
            storage,
            fetcher,
            alphabet,
            width,
        }
    }

    pub fn storage(&self) -> &Storage<D, F> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage<D, F> {
        &mut self.storage
    }

    pub fn fetcher(&self) -> &C {
        &self.fetcher
    }

    /// The code at which enumeration stops
    pub fn max_code(&self) -> String {
        self.alphabet.max_code(self.width)
    }

    /// Runs one pass of at most `iterations` codes
    ///
    /// With an explicit `start_code` the pass begins at that code. Without
    /// one it resumes after the most recently created record, or at zero on
    /// an empty store. The pass ends when the budget is spent or the maximum
    /// code is reached; the maximum code itself is never fetched.
    ///
    /// # Errors
    ///
    /// Fetch failures are recorded as `failure` and never end the pass. Any
    /// store or file store error ends it immediately, as does a start code
    /// that is not valid for the alphabet and width.
    pub async fn run(
        &mut self,
        start_code: Option<&str>,
        iterations: u64,
    ) -> Result<PassReport, ScrapmonError> {
        let alphabet = self.alphabet.clone();
        let max_code = self.max_code();
        let mut number = self.resume_point(&alphabet, start_code)?;
        let mut budget = iterations;
        let mut report = PassReport::default();

        tracing::info!(
            "Starting pass at {} with {} iterations",
            number.render_padded(self.width),
            iterations
        );

        loop {
            let code = number.render_padded(self.width);

            // Resuming after the maximum code leaves nothing to visit
            if code == max_code || number.len() > self.width {
                report.stop = StopReason::CodeSpaceExhausted;
                break;
            }
            if budget == 0 {
                report.stop = StopReason::BudgetExhausted;
                break;
            }

            if self
                .storage
                .db
                .code_exists(&code)
                .map_err(store_error("checking for an existing record", &code))?
            {
                tracing::debug!("Skipping {}, already recorded", code);
                report.skipped += 1;
            } else {
                match self.archive(&code).await? {
                    Outcome::Saved => report.succeeded += 1,
                    Outcome::Failed => report.failed += 1,
                }
            }

            report.visited += 1;
            report.last_code = Some(code);
            number.increment();
            budget -= 1;

            if report.visited % 100 == 0 {
                tracing::info!(
                    "Progress: {} codes visited, {} saved, {} failed, {} iterations left",
                    report.visited,
                    report.succeeded,
                    report.failed,
                    budget
                );
            }
        }

        tracing::info!(
            "Pass finished ({:?}): {} visited, {} skipped, {} saved, {} failed",
            report.stop,
            report.visited,
            report.skipped,
            report.succeeded,
            report.failed
        );

        Ok(report)
    }

    /// Resolves the first code of a pass
    fn resume_point<'a>(
        &self,
        alphabet: &'a Alphabet,
        start_code: Option<&str>,
    ) -> Result<CustomNumber<'a>, ScrapmonError> {
        if let Some(code) = start_code {
            let number = CustomNumber::from_string(alphabet, code)?;
            if number.len() > self.width {
                return Err(ScrapmonError::InvalidStartCode {
                    code: code.to_string(),
                    width: self.width,
                });
            }
            return Ok(number);
        }

        match self.storage.db.latest_created_code()? {
            None => {
                tracing::info!("No previous records, starting from zero");
                Ok(CustomNumber::zero(alphabet))
            }
            Some(latest) => {
                tracing::info!("Resuming after {}", latest);
                let mut number = CustomNumber::from_string(alphabet, &latest)?;
                number.increment();
                Ok(number)
            }
        }
    }

    /// Makes the single fetch attempt for a code without a record
    async fn archive(&mut self, code: &str) -> Result<Outcome, ScrapmonError> {
        let mut record = ScreenShot::pending(code);
        record.id = self
            .storage
            .db
            .create_screenshot(&record)
            .map_err(store_error("creating the pending record", code))?;

        let image = match self.fetcher.fetch_by_code(code).await {
            Ok(Some(image)) => image,
            Ok(None) => {
                tracing::debug!("No screenshot for {}", code);
                self.mark_failed(code)?;
                return Ok(Outcome::Failed);
            }
            Err(e) => {
                tracing::warn!("Could not fetch {}: {}", code, e);
                self.mark_failed(code)?;
                return Ok(Outcome::Failed);
            }
        };

        self.storage
            .db
            .update_status_by_code(code, ScreenShotStatus::Ongoing)
            .map_err(store_error("marking the record ongoing", code))?;

        let path = self
            .storage
            .files
            .root()
            .join(format!("{}.{}", code, image.image_type));
        let saved = self
            .storage
            .files
            .save_file(&image.data, &path)
            .map_err(|source| ScrapmonError::FileSave {
                code: code.to_string(),
                source,
            })?;

        record.file_uri = saved.display().to_string();
        record.status = ScreenShotStatus::Success;
        self.storage
            .db
            .update_screenshot_by_code(&record)
            .map_err(store_error("marking the record successful", code))?;

        tracing::debug!("Saved {} to {}", code, record.file_uri);
        Ok(Outcome::Saved)
    }

    fn mark_failed(&mut self, code: &str) -> Result<(), ScrapmonError> {
        self.storage
            .db
            .update_status_by_code(code, ScreenShotStatus::Failure)
            .map_err(store_error("marking the record failed", code))
    }
}

fn store_error<'a>(
    stage: &'static str,
    code: &'a str,
) -> impl FnOnce(StorageError) -> ScrapmonError + 'a {
    move |source| ScrapmonError::Store {
        stage,
        code: code.to_string(),
        source,
    }
}
