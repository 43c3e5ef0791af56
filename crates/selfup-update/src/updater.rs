//! Update orchestration
//!
//! [`UpdatePipeline`] sequences the components for one binary:
//!
//! 1. Fetch the latest release and stop early when already current
//! 2. Resolve the platform asset and its published checksum
//! 3. Download into a private scratch directory
//! 4. Verify the SHA-256 checksum
//! 5. Extract the executable
//! 6. Swap it in place of the installed binary, rolling back on failure
//!
//! Stages run strictly one after another. The scratch directory is removed
//! on every exit path once created, including when the future is dropped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::assets;
use crate::checksum;
use crate::context::{PipelineContext, UpdateTarget};
use crate::error::{StageError, UpdateError};
use crate::extract;
use crate::platform::Platform;
use crate::releases::{Release, ReleaseSource};
use crate::state::{Stage, StateObserver, TracingObserver, UpdateState};
use crate::swap::{BinarySwapper, ExecutableReplacer};
use crate::version;

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The installed version already matches the latest release
    UpToDate { version: String },

    /// The binary was replaced
    Updated {
        from: String,
        to: String,
        asset: String,
    },
}

/// Result of an availability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    /// Version the target reports
    pub current: String,

    /// Tag of the latest release
    pub latest: String,

    /// Whether `run` would replace the binary
    pub update_available: bool,

    /// Whether the latest release is older than the current version
    pub is_downgrade: bool,

    /// The release that was compared, for [`UpdatePipeline::run_release`]
    pub release: Release,
}

/// Self-update pipeline for one binary
pub struct UpdatePipeline<S, R> {
    target: UpdateTarget,
    source: S,
    swapper: BinarySwapper<R>,
    platform: Option<Platform>,
    observer: Arc<dyn StateObserver>,
    scratch_root: Option<PathBuf>,
}

impl<S, R> UpdatePipeline<S, R>
where
    S: ReleaseSource,
    R: ExecutableReplacer,
{
    pub fn new(target: UpdateTarget, source: S, replacer: R) -> Self {
        Self {
            target,
            source,
            swapper: BinarySwapper::new(replacer),
            platform: None,
            observer: Arc::new(TracingObserver),
            scratch_root: None,
        }
    }

    /// Resolve assets for `platform` instead of the host
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Report state transitions to `observer`
    pub fn with_observer(mut self, observer: Arc<dyn StateObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Create scratch directories under `root` instead of the system temp dir
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    pub fn target(&self) -> &UpdateTarget {
        &self.target
    }

    pub fn replacer(&self) -> &R {
        self.swapper.replacer()
    }

    /// Compare the current version against the latest release without downloading
    pub async fn check(&self) -> Result<UpdateCheck, StageError> {
        let release = self
            .source
            .latest_release(self.target.owner(), self.target.repo())
            .await
            .map_err(|e| StageError::new(Stage::CheckingVersion, e))?;

        let current = self.target.current_version();
        let check = UpdateCheck {
            current: current.to_string(),
            update_available: !version::is_up_to_date(current, Some(&release.tag_name)),
            is_downgrade: version::is_downgrade(current, &release.tag_name),
            latest: release.tag_name.clone(),
            release,
        };

        debug!(
            current = %check.current,
            latest = %check.latest,
            update_available = check.update_available,
            "update check complete"
        );
        Ok(check)
    }

    /// Run the full pipeline
    pub async fn run(&self) -> Result<UpdateOutcome, StageError> {
        let mut run = RunState::new(self.observer.as_ref());
        run.enter(Stage::CheckingVersion);
        info!(
            "Checking latest release of {}/{}",
            self.target.owner(),
            self.target.repo()
        );
        let release = self
            .source
            .latest_release(self.target.owner(), self.target.repo())
            .await
            .map_err(|e| run.fail(e))?;

        self.run_from(release, run).await
    }

    /// Run the pipeline against a release fetched earlier, usually by [`check`](Self::check)
    ///
    /// The latest-release lookup is skipped, so what gets installed is the
    /// release the caller already looked at.
    pub async fn run_release(&self, release: Release) -> Result<UpdateOutcome, StageError> {
        let mut run = RunState::new(self.observer.as_ref());
        run.enter(Stage::CheckingVersion);
        self.run_from(release, run).await
    }

    /// Everything after the release is known; entered in `CheckingVersion`
    async fn run_from(
        &self,
        release: Release,
        mut run: RunState<'_>,
    ) -> Result<UpdateOutcome, StageError> {
        let owner = self.target.owner();
        let repo = self.target.repo();
        let binary_name = self.target.binary_name();
        let current = self.target.current_version();

        info!("Current version: {}, latest release: {}", current, release.tag_name);
        if version::is_up_to_date(current, Some(&release.tag_name)) {
            run.finish(UpdateState::UpToDate);
            info!("{} is up to date", binary_name);
            return Ok(UpdateOutcome::UpToDate {
                version: release.tag_name,
            });
        }
        if version::is_downgrade(current, &release.tag_name) {
            warn!(
                current = %current,
                latest = %release.tag_name,
                "latest release is older than the installed version"
            );
        }

        run.enter(Stage::Resolving);
        let platform = match self.platform {
            Some(platform) => platform,
            None => Platform::current().map_err(|e| run.fail(e))?,
        };
        let assets = assets::fetch_assets(&self.source, owner, repo, &release)
            .await
            .map_err(|e| run.fail(e))?;
        let selected = assets::select_asset(&assets, binary_name, &platform)
            .map_err(|e| run.fail(e))?
            .clone();
        info!("Selected asset {} for {}", selected.name, platform);

        run.enter(Stage::Downloading);
        let scratch = self.create_scratch().map_err(|e| run.fail(e))?;
        let ctx = PipelineContext::new(
            self.target.clone(),
            platform,
            release,
            assets,
            selected,
            scratch.path().to_path_buf(),
        );

        let result = self.download_and_apply(&ctx, &mut run).await;
        remove_scratch(scratch);
        result?;

        run.finish(UpdateState::Done);
        info!("Updated {} from {} to {}", binary_name, current, ctx.release().tag_name);
        Ok(UpdateOutcome::Updated {
            from: current.to_string(),
            to: ctx.release().tag_name.clone(),
            asset: ctx.asset().name.clone(),
        })
    }

    /// Downloading through Applying; entered with the run already in `Downloading`
    async fn download_and_apply(
        &self,
        ctx: &PipelineContext,
        run: &mut RunState<'_>,
    ) -> Result<(), StageError> {
        let archive = ctx.archive_path();
        info!("Downloading {}", ctx.asset().name);
        self.download(ctx, &archive).await.map_err(|e| run.fail(e))?;

        run.enter(Stage::Verifying);
        info!("Verifying checksum");
        checksum::verify(&archive, &ctx.asset().checksum).map_err(|e| run.fail(e))?;

        run.enter(Stage::Extracting);
        info!("Extracting {}", ctx.target().binary_name());
        let binary = extract::extract_binary(&archive, ctx.scratch_dir(), ctx.target().binary_name())
            .map_err(|e| run.fail(e))?;

        run.enter(Stage::Applying);
        info!("Applying update");
        self.swapper.apply(&binary).map_err(|e| run.fail(e))
    }

    async fn download(&self, ctx: &PipelineContext, archive: &Path) -> crate::Result<()> {
        let file = File::create(archive)
            .map_err(|e| UpdateError::io(format!("failed to create {}", archive.display()), e))?;
        let mut writer = BufWriter::new(file);

        let bytes = self
            .source
            .download_asset(
                ctx.target().owner(),
                ctx.target().repo(),
                ctx.asset().id,
                &mut writer,
            )
            .await?;
        writer
            .flush()
            .map_err(|e| UpdateError::io(format!("failed to write {}", archive.display()), e))?;

        debug!(path = %archive.display(), bytes, "archive saved");
        Ok(())
    }

    fn create_scratch(&self) -> crate::Result<TempDir> {
        let prefix = format!("{}-update", self.target.binary_name());
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let scratch = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(|e| UpdateError::io("failed to create scratch directory", e))?;

        debug!(path = %scratch.path().display(), "scratch directory created");
        Ok(scratch)
    }
}

fn remove_scratch(scratch: TempDir) {
    let path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!(path = %path.display(), error = %e, "failed to remove scratch directory");
    }
}

/// Current state of one run, reported to the observer on every change
struct RunState<'a> {
    state: UpdateState,
    observer: &'a dyn StateObserver,
}

impl<'a> RunState<'a> {
    fn new(observer: &'a dyn StateObserver) -> Self {
        Self {
            state: UpdateState::Idle,
            observer,
        }
    }

    fn transition(&mut self, to: UpdateState) {
        let from = std::mem::replace(&mut self.state, to);
        self.observer.on_transition(from, to);
    }

    fn enter(&mut self, stage: Stage) {
        self.transition(stage.into());
    }

    fn finish(&mut self, terminal: UpdateState) {
        self.transition(terminal);
    }

    /// Mark the current stage failed and tag the error with it
    fn fail(&mut self, source: UpdateError) -> StageError {
        let stage = self.state.stage().unwrap_or(Stage::CheckingVersion);
        self.transition(UpdateState::Failed { stage });
        StageError::new(stage, source)
    }
}
