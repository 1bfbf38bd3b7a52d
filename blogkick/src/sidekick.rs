//! Action driver: snapshots the page, filters the registry and runs actions.
//!
//! Failures are converted into notifications or modals at this boundary. The
//! only error returned to the caller is a request for an action the current
//! page does not offer.

use thiserror::Error;
use tracing::{info, warn};

use crate::actions::{ActionContext, ActionDescriptor, ActionId, ActionRegistry};
use crate::config::ServiceSettings;
use crate::gateway::{Dismissal, HostGateway};
use crate::http::AsyncHttpClient;
use crate::metadata::{card_data, extract_article, CardData, DocumentView};
use crate::predict::predict_url;
use crate::preview::{run_preview, PreviewTarget};
use crate::publish::{PublishCoordinator, PublishOutcome};

/// Window the tagger opens in.
pub const TAGGER_WINDOW: &str = "hlx-sidekick-tagger";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Action '{0}' is not available on this page")]
    Unavailable(ActionId),
}

/// What an executed action did.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    TaggerOpened(String),
    Preview(PreviewTarget),
    Copied(String),
    CardShown(CardData),
    /// The action could not complete; the reason was shown as a notice.
    Failed(String),
    Publish(PublishOutcome),
}

/// Runs sidekick actions for one page.
pub struct Sidekick<'a, C: AsyncHttpClient> {
    gateway: &'a dyn HostGateway,
    http: &'a C,
    services: &'a ServiceSettings,
    document: Option<&'a dyn DocumentView>,
    registry: ActionRegistry,
}

impl<'a, C: AsyncHttpClient> Sidekick<'a, C> {
    pub fn new(gateway: &'a dyn HostGateway, http: &'a C, services: &'a ServiceSettings) -> Self {
        Self {
            gateway,
            http,
            services,
            document: None,
            registry: ActionRegistry::standard(),
        }
    }

    /// Attach the rendered document of the current page.
    pub fn with_document(mut self, document: &'a dyn DocumentView) -> Self {
        self.document = Some(document);
        self
    }

    /// Fresh snapshot of the page the gateway reports.
    pub fn context(&self) -> ActionContext {
        ActionContext::new(
            self.gateway.config(),
            self.gateway.location(),
            self.gateway.is_editor(),
            self.document.is_some_and(|doc| doc.is_post()),
        )
    }

    /// Actions offered on the current page.
    pub fn available_actions(&self) -> Vec<&ActionDescriptor> {
        self.registry.available(&self.context())
    }

    /// Run an action, provided the current page offers it.
    pub async fn execute(&self, id: ActionId) -> Result<ActionOutcome, ActionError> {
        let ctx = self.context();
        let offered = self
            .registry
            .get(id)
            .is_some_and(|action| action.is_available(&ctx));
        if !offered {
            warn!(action = %id, environment = %ctx.environment, "Action not available");
            return Err(ActionError::Unavailable(id));
        }

        info!(action = %id, environment = %ctx.environment, path = %ctx.location.pathname, "Running action");
        let outcome = match id {
            ActionId::Tagger => self.open_tagger(&ctx),
            ActionId::Preview => {
                ActionOutcome::Preview(run_preview(self.gateway, &self.services.content_proxy_url))
            }
            ActionId::PredictedUrl => self.copy_predicted_url(&ctx),
            ActionId::CardPreview => self.show_card(&ctx),
            ActionId::ArticleData => self.copy_article_data(&ctx),
            ActionId::Publish => ActionOutcome::Publish(
                PublishCoordinator::new(self.gateway, self.http, &self.services.purge_url)
                    .run()
                    .await,
            ),
        };
        Ok(outcome)
    }

    fn open_tagger(&self, ctx: &ActionContext) -> ActionOutcome {
        let url = format!(
            "https://{}/tools/tagger/",
            ctx.config.host.as_deref().unwrap_or_default()
        );
        self.gateway.open_window(&url, TAGGER_WINDOW);
        ActionOutcome::TaggerOpened(url)
    }

    fn raw_date(&self) -> Option<String> {
        self.document.and_then(|doc| doc.raw_date())
    }

    fn copy_predicted_url(&self, ctx: &ActionContext) -> ActionOutcome {
        let url = predict_url(
            ctx.config.host.as_deref(),
            &ctx.location.pathname,
            self.raw_date().as_deref(),
        );
        match self.gateway.copy_to_clipboard(&url) {
            Ok(()) => {
                self.gateway.notify(
                    &["Predicted URL copied to clipboard:".to_string(), url.clone()],
                    Dismissal::Auto,
                );
                ActionOutcome::Copied(url)
            }
            Err(e) => self.action_failed("Unable to copy predicted URL:", e.to_string()),
        }
    }

    fn show_card(&self, ctx: &ActionContext) -> ActionOutcome {
        let Some(document) = self.document else {
            return self.action_failed("Unable to preview card:", "no document".to_string());
        };
        let shown = card_data(document, &ctx.location.pathname)
            .map_err(|e| e.to_string())
            .and_then(|card| {
                serde_json::to_string_pretty(&card)
                    .map(|json| (card, json))
                    .map_err(|e| e.to_string())
            });

        match shown {
            Ok((card, json)) => {
                self.gateway.show_modal(&[json], true, Dismissal::Sticky);
                ActionOutcome::CardShown(card)
            }
            Err(reason) => self.action_failed("Unable to preview card:", reason),
        }
    }

    fn copy_article_data(&self, ctx: &ActionContext) -> ActionOutcome {
        let Some(document) = self.document else {
            return self.action_failed("Unable to copy article data:", "no document".to_string());
        };
        let copied = extract_article(document, &ctx.location.pathname)
            .map_err(|e| e.to_string())
            .and_then(|article| {
                let row = article.to_row();
                self.gateway
                    .copy_to_clipboard(&row)
                    .map(|()| row)
                    .map_err(|e| e.to_string())
            });

        match copied {
            Ok(row) => {
                self.gateway
                    .notify(&["Article data copied to clipboard".to_string()], Dismissal::Auto);
                ActionOutcome::Copied(row)
            }
            Err(reason) => self.action_failed("Unable to copy article data:", reason),
        }
    }

    fn action_failed(&self, headline: &str, reason: String) -> ActionOutcome {
        warn!(reason = %reason, "{}", headline);
        self.gateway
            .notify(&[headline.to_string(), reason.clone()], Dismissal::Sticky);
        ActionOutcome::Failed(reason)
    }
}
