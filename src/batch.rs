use crate::archiver::{run_archive_job, ArchiveJob};
use crate::engine::{EngineLocation, ToolRunner};
use crate::error::Error;
use crate::progress::BatchReporter;
use crate::prompt::Confirm;
use crate::scan;
use crate::timestamp::TagPrecision;
use crate::verifier::{run_verify_job, TestMode, VerifyJob};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Whether to ask before starting and whether a failed item stops the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    pub require_confirmation: bool,
    pub continue_on_error: bool,
}

impl BatchPolicy {
    /// Simple flow: always confirm, first failure aborts the batch.
    pub const LEGACY: BatchPolicy = BatchPolicy {
        require_confirmation: true,
        continue_on_error: false,
    };

    /// Advanced flow: no prompt unless asked for, failures are recorded and
    /// the batch carries on.
    pub const ADVANCED: BatchPolicy = BatchPolicy {
        require_confirmation: false,
        continue_on_error: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Archive,
    Verify,
}

impl BatchKind {
    pub fn noun(self) -> &'static str {
        match self {
            BatchKind::Archive => "folder",
            BatchKind::Verify => "archive",
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            BatchKind::Archive => "Archive",
            BatchKind::Verify => "Test",
        }
    }
}

/// Settings shared by every [`ArchiveJob`] in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveTemplate {
    /// Defaults to the batch root.
    pub destination_dir: Option<PathBuf>,
    pub timestamp: Option<TagPrecision>,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyTemplate {
    pub recursive: bool,
    pub mode: TestMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    Archive(ArchiveTemplate),
    Verify(VerifyTemplate),
}

impl BatchOperation {
    pub fn kind(&self) -> BatchKind {
        match self {
            BatchOperation::Archive(_) => BatchKind::Archive,
            BatchOperation::Verify(_) => BatchKind::Verify,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub root: PathBuf,
    pub policy: BatchPolicy,
    pub operation: BatchOperation,
}

impl BatchRequest {
    /// Archive every child folder of `root` into `root` as `[YYYY-MM-DD] name.7z`.
    pub fn legacy_archive(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: BatchPolicy::LEGACY,
            operation: BatchOperation::Archive(ArchiveTemplate {
                destination_dir: None,
                timestamp: Some(TagPrecision::Date),
                suffix: None,
            }),
        }
    }

    pub fn advanced_archive(root: impl Into<PathBuf>, template: ArchiveTemplate) -> Self {
        Self {
            root: root.into(),
            policy: BatchPolicy::ADVANCED,
            operation: BatchOperation::Archive(template),
        }
    }

    /// Test every `*.7z` directly under `root`, checking all entries.
    pub fn legacy_verify(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: BatchPolicy::LEGACY,
            operation: BatchOperation::Verify(VerifyTemplate {
                recursive: false,
                mode: TestMode::AllEntries,
            }),
        }
    }

    pub fn advanced_verify(root: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            root: root.into(),
            policy: BatchPolicy::ADVANCED,
            operation: BatchOperation::Verify(VerifyTemplate {
                recursive,
                mode: TestMode::Archive,
            }),
        }
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn destination_dir(&self) -> Option<PathBuf> {
        match &self.operation {
            BatchOperation::Archive(template) => Some(
                template
                    .destination_dir
                    .clone()
                    .unwrap_or_else(|| self.root.clone()),
            ),
            BatchOperation::Verify(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub item: PathBuf,
    /// Archive written for this item, archive batches only.
    pub archive: Option<PathBuf>,
    pub status: ItemStatus,
    pub diagnostic: String,
}

impl ItemOutcome {
    fn failed(item: &Path, error: &Error) -> Self {
        Self {
            item: item.to_path_buf(),
            archive: None,
            status: ItemStatus::Failed,
            diagnostic: error.to_string(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == ItemStatus::Succeeded
    }
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub kind: BatchKind,
    pub root: PathBuf,
    pub outcomes: Vec<ItemOutcome>,
    pub duration: Duration,
}

impl BatchResult {
    fn new(kind: BatchKind, root: &Path) -> Self {
        Self {
            kind,
            root: root.to_path_buf(),
            outcomes: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.processed() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}

/// Drives one batch: enumerate, report, confirm, then process every item in
/// order.
pub struct BatchRunner<'a> {
    engine: &'a EngineLocation,
    runner: &'a dyn ToolRunner,
    reporter: &'a dyn BatchReporter,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        engine: &'a EngineLocation,
        runner: &'a dyn ToolRunner,
        reporter: &'a dyn BatchReporter,
    ) -> Self {
        Self {
            engine,
            runner,
            reporter,
        }
    }

    /// Run the batch.
    ///
    /// Returns [`Error::UserAborted`] when the confirmation is declined, in
    /// which case nothing was touched. With `continue_on_error` unset the
    /// first item error is returned after the partial result is reported.
    pub fn run(
        &self,
        request: &BatchRequest,
        confirm: &mut dyn Confirm,
    ) -> Result<BatchResult, Error> {
        let started = Instant::now();
        let kind = request.operation.kind();
        let root = request.root.as_path();

        let destination_dir = request.destination_dir();
        if let Some(dest) = &destination_dir {
            if dest.exists() && !dest.is_dir() {
                return Err(Error::invalid_input(dest, "destination is not a directory"));
            }
        }

        let items = enumerate(request, destination_dir.as_deref())?;
        info!(
            "{} {}(s) found under {}",
            items.len(),
            kind.noun(),
            root.display()
        );
        self.reporter.on_candidates(kind, root, &items);

        let mut result = BatchResult::new(kind, root);

        if items.is_empty() {
            self.reporter.on_batch_complete(&result);
            return Ok(result);
        }

        if request.policy.require_confirmation {
            let prompt = format!(
                "{} {} {}(s) under {}?",
                kind.verb(),
                items.len(),
                kind.noun(),
                root.display()
            );
            if !confirm.ask_yes_no(&prompt)? {
                info!("Batch declined at confirmation, nothing processed");
                return Err(Error::UserAborted);
            }
        }

        let total = items.len();
        for (index, item) in items.iter().enumerate() {
            self.reporter.on_item_start(index, total, item);

            let processed =
                self.process_item(&request.operation, item, destination_dir.as_deref());
            let outcome = match processed {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!("{} failed: {}", item.display(), err);
                    let outcome = ItemOutcome::failed(item, &err);
                    self.reporter.on_item_complete(&outcome);
                    result.outcomes.push(outcome);

                    if !request.policy.continue_on_error {
                        result.duration = started.elapsed();
                        self.reporter.on_batch_halted(&result, &err);
                        return Err(err);
                    }
                    continue;
                }
            };

            self.reporter.on_item_complete(&outcome);
            result.outcomes.push(outcome);
        }

        result.duration = started.elapsed();
        info!(
            "Batch finished: {} processed, {} failed",
            result.processed(),
            result.failed()
        );
        self.reporter.on_batch_complete(&result);
        Ok(result)
    }

    fn process_item(
        &self,
        operation: &BatchOperation,
        item: &Path,
        destination_dir: Option<&Path>,
    ) -> Result<ItemOutcome, Error> {
        match operation {
            BatchOperation::Archive(template) => {
                let job = ArchiveJob::new(
                    item,
                    destination_dir.unwrap_or(item),
                    None,
                    template.timestamp,
                    template.suffix.as_deref(),
                )?;
                let archive = run_archive_job(self.engine, self.runner, &job)?;
                Ok(ItemOutcome {
                    item: item.to_path_buf(),
                    diagnostic: format!("created {}", archive.display()),
                    archive: Some(archive),
                    status: ItemStatus::Succeeded,
                })
            }
            BatchOperation::Verify(template) => {
                let job = VerifyJob {
                    archive: item.to_path_buf(),
                    mode: template.mode,
                };
                let output = run_verify_job(self.engine, self.runner, &job)?;
                Ok(ItemOutcome {
                    item: item.to_path_buf(),
                    archive: None,
                    status: ItemStatus::Succeeded,
                    diagnostic: output.stdout.trim().to_string(),
                })
            }
        }
    }
}

fn enumerate(
    request: &BatchRequest,
    destination_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, Error> {
    match &request.operation {
        BatchOperation::Archive(_) => {
            let mut dirs = scan::list_child_directories(&request.root)?;
            // An existing output folder inside the root is not a source.
            if let Some(dest) = destination_dir {
                dirs.retain(|dir| !same_directory(dir, dest));
            }
            Ok(dirs)
        }
        BatchOperation::Verify(template) => {
            scan::list_archive_files(&request.root, template.recursive)
        }
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
