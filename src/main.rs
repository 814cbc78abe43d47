use std::io::Stdout;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commitlint_pr::action::{ActionContext, ActionInputs, Reporter, WorkflowReporter};
use commitlint_pr::github::OctocrabClient;
use commitlint_pr::lint::{CommitlintEngine, RuleSource};
use commitlint_pr::orchestrator;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout is reserved for workflow commands.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,commitlint_pr=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (ctx, client, engine) = match setup() {
        Ok(parts) => parts,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Setup failed");
            WorkflowReporter::stdout().fail(&format!("{err:#}"));
            return ExitCode::FAILURE;
        }
    };

    match orchestrator::run(&ctx, &client, Arc::new(engine)).await {
        Ok(outcome) => {
            tracing::info!(?outcome, "Run finished");
            ExitCode::from(outcome.exit_code())
        }
        Err(err) => {
            tracing::error!(error = %err, "Run failed");
            ctx.reporter.fail(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

type Parts = (ActionContext<WorkflowReporter<Stdout>>, OctocrabClient, CommitlintEngine);

fn setup() -> anyhow::Result<Parts> {
    let inputs = ActionInputs::from_env().context("reading action inputs")?;

    let client =
        OctocrabClient::from_token(inputs.token.clone()).context("building GitHub client")?;

    let source = match &inputs.config_file {
        Some(path) => RuleSource::File(path.clone()),
        None => RuleSource::Discover(
            std::env::current_dir().context("resolving working directory")?,
        ),
    };

    let ctx = ActionContext::from_env(inputs, WorkflowReporter::stdout())
        .context("reading workflow context")?;

    Ok((ctx, client, CommitlintEngine::new(source)))
}
