//! Update command

use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use selfup_core::RuntimeConfig;
use selfup_update::{
    FileSwap, GitHubReleases, UpdateCheck, UpdateOutcome, UpdatePipeline, UpdateTarget,
};
use std::sync::Arc;

use crate::cli::UpdateArgs;
use crate::lock::UpdateLock;
use crate::output;

/// Version this binary reports to the updater
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn run(args: UpdateArgs, quiet: bool) -> Result<()> {
    let config = super::load_runtime_config()?;
    let pipeline = build_pipeline(&config, quiet)?;

    let spinner = output::spinner("Checking for updates...");
    let check = pipeline.check().await;
    spinner.finish_and_clear();
    let check = check?;

    if args.check {
        report_check(&check);
        return Ok(());
    }

    if !check.update_available {
        output::success(&format!("Already on the latest version ({})", check.latest));
        return Ok(());
    }

    output::header("Update plan");
    output::kv("Current version", &check.current);
    output::kv("Latest release", &check.latest);
    output::kv("Binary", &pipeline.replacer().target().display().to_string());
    if check.is_downgrade {
        output::warning("The latest release is older than this binary; this is a downgrade");
    }
    println!();

    if !args.yes {
        let proceed = Confirm::new()
            .with_prompt("Proceed with update?")
            .default(false)
            .interact()?;

        if !proceed {
            output::info("Update cancelled");
            return Ok(());
        }
    }

    let _lock = UpdateLock::acquire(pipeline.replacer().target())?;

    // Install the release shown in the plan rather than looking it up again
    match pipeline.run_release(check.release).await {
        Ok(UpdateOutcome::UpToDate { version }) => {
            output::success(&format!("Already on the latest version ({})", version));
            Ok(())
        }
        Ok(UpdateOutcome::Updated { from, to, asset }) => {
            output::success(&format!("Updated from {} to {}", from, to));
            output::kv("Installed from", &asset);
            Ok(())
        }
        Err(e) if e.is_indeterminate() => {
            output::error("Update failed and the previous binary could not be restored");
            output::error(&format!(
                "Binary state is indeterminate: reinstall {} manually",
                pipeline.replacer().target().display()
            ));
            Err(anyhow!(e))
        }
        Err(e) => {
            output::error(&format!("Update failed during {}", e.stage));
            Err(anyhow!(e))
        }
    }
}

fn build_pipeline(
    config: &RuntimeConfig,
    quiet: bool,
) -> Result<UpdatePipeline<GitHubReleases, FileSwap>> {
    let target = UpdateTarget::new(
        &config.github.repo_owner,
        &config.github.repo_name,
        &config.update.binary_name,
        VERSION,
    )?;

    let source =
        GitHubReleases::from_config(config)?.with_progress(config.update.show_progress && !quiet);

    let mut replacer = FileSwap::current_exe()?;
    if config.update.verify_after_swap {
        replacer = replacer.with_validation(config.update.verify_args.iter().cloned());
    }

    let mut pipeline = UpdatePipeline::new(target, source, replacer);
    if !quiet {
        pipeline = pipeline.with_observer(Arc::new(output::StepObserver));
    }
    Ok(pipeline)
}

fn report_check(check: &UpdateCheck) {
    output::kv("Current version", &check.current);
    output::kv("Latest release", &check.latest);

    if !check.update_available {
        output::success("Already on the latest version");
    } else if check.is_downgrade {
        output::warning(&format!(
            "Latest release {} is older than this binary",
            check.latest
        ));
        output::info("Run 'selfup update' to install it anyway");
    } else {
        output::success(&format!("Update available: {}", check.latest));
        output::info("Run 'selfup update' to install the update");
    }
}
