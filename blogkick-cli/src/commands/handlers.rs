//! Command handlers.
//!
//! Each handler implements the `CommandHandler` trait and contains the
//! logic for a single command. Handlers depend only on trait interfaces,
//! making them testable in isolation.

use std::fs;

use tracing::info;

use blogkick::actions::{ActionContext, ActionId};
use blogkick::document::HtmlDocument;
use blogkick::environment::Location;
use blogkick::http::AsyncHttpClient;
use blogkick::predict::predict_url;
use blogkick::publish::PublishOutcome;
use blogkick::sidekick::{ActionOutcome, Sidekick};

use super::args::{ActionsArgs, ConfigPathArgs, PageArgs, PredictArgs, RunArgs};
use super::gateway::ConsoleGateway;
use super::traits::{CommandContext, CommandHandler};
use crate::error::CliError;

/// Page snapshot shared by `actions` and `run`.
struct Page {
    location: Location,
    editor: bool,
    document: Option<HtmlDocument>,
}

impl Page {
    fn load(args: &PageArgs) -> Result<Self, CliError> {
        let location = Location::parse(&args.url)?;
        let document = match &args.document {
            Some(path) => {
                let source = fs::read_to_string(path).map_err(|error| CliError::DocumentRead {
                    path: path.clone(),
                    error,
                })?;
                Some(HtmlDocument::parse(&source))
            }
            None => None,
        };

        Ok(Self {
            location,
            editor: args.editor,
            document,
        })
    }

    fn gateway<'a, C: AsyncHttpClient>(&self, ctx: &CommandContext<'a, C>) -> ConsoleGateway<'a> {
        ConsoleGateway::new(
            ctx.config.project.clone(),
            self.location.clone(),
            self.editor,
            ctx.output,
        )
    }
}

// ============================================================================
// Actions Handler
// ============================================================================

/// Handler for the `actions` command.
pub struct ActionsHandler;

impl CommandHandler for ActionsHandler {
    type Args = ActionsArgs;

    async fn execute<C: AsyncHttpClient>(
        args: Self::Args,
        ctx: &CommandContext<'_, C>,
    ) -> Result<(), CliError> {
        let page = Page::load(&args.page)?;
        let gateway = page.gateway(ctx);
        let mut sidekick = Sidekick::new(&gateway, ctx.http, &ctx.config.services);
        if let Some(document) = &page.document {
            sidekick = sidekick.with_document(document);
        }

        let context: ActionContext = sidekick.context();
        ctx.output.header(&format!("Actions for {}", page.location.href));
        ctx.output
            .println(&format!("Environment: {}", context.environment));
        ctx.output.newline();

        let available = sidekick.available_actions();
        if available.is_empty() {
            ctx.output.println("No actions are available on this page.");
            return Ok(());
        }

        for action in available {
            let note = if action.overrides {
                " (replaces built-in)"
            } else {
                ""
            };
            ctx.output
                .indented(&format!("{:<14} {}{}", action.id.as_str(), action.text, note));
        }

        Ok(())
    }
}

// ============================================================================
// Run Handler
// ============================================================================

/// Handler for the `run` command.
pub struct RunHandler;

impl CommandHandler for RunHandler {
    type Args = RunArgs;

    async fn execute<C: AsyncHttpClient>(
        args: Self::Args,
        ctx: &CommandContext<'_, C>,
    ) -> Result<(), CliError> {
        let id: ActionId = args.action.parse()?;
        let page = Page::load(&args.page)?;
        let gateway = page.gateway(ctx);
        let mut sidekick = Sidekick::new(&gateway, ctx.http, &ctx.config.services);
        if let Some(document) = &page.document {
            sidekick = sidekick.with_document(document);
        }

        let outcome = sidekick.execute(id).await?;
        info!(action = %id, outcome = ?outcome, "Action finished");

        match outcome {
            ActionOutcome::Failed(reason) => Err(CliError::ActionFailed(format!(
                "Action '{}' failed: {}",
                id, reason
            ))),
            ActionOutcome::Publish(PublishOutcome::NotConfigured) => Err(
                CliError::ActionFailed("Publish is not configured".to_string()),
            ),
            ActionOutcome::Publish(PublishOutcome::PurgeFailed { stage, result }) => {
                Err(CliError::ActionFailed(format!(
                    "Publish stopped at {}: purge of {} returned status {}",
                    stage, result.path, result.status
                )))
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Predict Handler
// ============================================================================

/// Handler for the `predict` command.
pub struct PredictHandler;

impl CommandHandler for PredictHandler {
    type Args = PredictArgs;

    async fn execute<C: AsyncHttpClient>(
        args: Self::Args,
        ctx: &CommandContext<'_, C>,
    ) -> Result<(), CliError> {
        let project = ctx.config.project.normalized();
        let host = if args.relative {
            None
        } else {
            project.host.as_deref()
        };

        ctx.output
            .println(&predict_url(host, &args.path, args.date.as_deref()));
        Ok(())
    }
}

// ============================================================================
// Config Handlers
// ============================================================================

/// Handler for the `config path` command.
pub struct ConfigPathHandler;

impl CommandHandler for ConfigPathHandler {
    type Args = ConfigPathArgs;

    async fn execute<C: AsyncHttpClient>(
        args: Self::Args,
        ctx: &CommandContext<'_, C>,
    ) -> Result<(), CliError> {
        ctx.output.println(&args.path.display().to_string());
        Ok(())
    }
}

/// Handler for the `config show` command.
pub struct ConfigShowHandler;

impl CommandHandler for ConfigShowHandler {
    type Args = ();

    async fn execute<C: AsyncHttpClient>(
        _args: Self::Args,
        ctx: &CommandContext<'_, C>,
    ) -> Result<(), CliError> {
        for line in ctx.config.to_ini_string().lines() {
            ctx.output.println(line);
        }
        Ok(())
    }
}
