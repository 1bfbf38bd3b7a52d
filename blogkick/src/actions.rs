//! Registry of sidekick actions and the conditions that gate them.
//!
//! An action whose condition does not hold is not offered to the operator.

use std::fmt;
use std::str::FromStr;

use crate::config::ProjectConfig;
use crate::environment::{Environment, Location};

/// Path segment marking drafts, which cannot be published.
pub const DRAFTS_SEGMENT: &str = "/drafts/";

/// Identifier of a registered action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Tagger,
    Preview,
    PredictedUrl,
    CardPreview,
    ArticleData,
    Publish,
}

impl ActionId {
    pub const ALL: [ActionId; 6] = [
        ActionId::Tagger,
        ActionId::Preview,
        ActionId::PredictedUrl,
        ActionId::CardPreview,
        ActionId::ArticleData,
        ActionId::Publish,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionId::Tagger => "tagger",
            ActionId::Preview => "preview",
            ActionId::PredictedUrl => "predicted-url",
            ActionId::CardPreview => "card-preview",
            ActionId::ArticleData => "article-data",
            ActionId::Publish => "publish",
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown action identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for ActionId {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// Everything an action condition may look at.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Normalized project configuration
    pub config: ProjectConfig,
    pub location: Location,
    pub environment: Environment,
    /// True when the current document is a blog post
    pub is_post: bool,
}

impl ActionContext {
    pub fn new(config: &ProjectConfig, location: &Location, is_editor: bool, is_post: bool) -> Self {
        let config = config.normalized();
        let environment = Environment::classify(&config, location, is_editor);
        Self {
            config,
            location: location.clone(),
            environment,
            is_post,
        }
    }
}

/// A registered action.
#[derive(Clone, Copy)]
pub struct ActionDescriptor {
    pub id: ActionId,
    /// Button label
    pub text: &'static str,
    /// Replaces the host's built-in action of the same id
    pub overrides: bool,
    pub condition: fn(&ActionContext) -> bool,
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("overrides", &self.overrides)
            .finish_non_exhaustive()
    }
}

impl ActionDescriptor {
    pub fn is_available(&self, ctx: &ActionContext) -> bool {
        (self.condition)(ctx)
    }
}

fn helix_post(ctx: &ActionContext) -> bool {
    ctx.environment.is_helix() && ctx.is_post
}

/// Ordered list of the actions the extension contributes.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    actions: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    pub fn new(actions: Vec<ActionDescriptor>) -> Self {
        Self { actions }
    }

    /// The blog action set.
    pub fn standard() -> Self {
        Self::new(vec![
            ActionDescriptor {
                id: ActionId::Tagger,
                text: "Tagger",
                overrides: false,
                condition: |ctx| ctx.environment.is_editor(),
            },
            ActionDescriptor {
                id: ActionId::Preview,
                text: "Preview",
                overrides: true,
                condition: |ctx| ctx.environment.is_editor() || ctx.environment.is_helix(),
            },
            ActionDescriptor {
                id: ActionId::PredictedUrl,
                text: "Copy Predicted URL",
                overrides: false,
                condition: |ctx| {
                    helix_post(ctx)
                        && ctx
                            .config
                            .host
                            .as_deref()
                            .is_some_and(|host| host != ctx.location.host)
                },
            },
            ActionDescriptor {
                id: ActionId::CardPreview,
                text: "Card Preview",
                overrides: false,
                condition: helix_post,
            },
            ActionDescriptor {
                id: ActionId::ArticleData,
                text: "Copy Article Data",
                overrides: false,
                condition: helix_post,
            },
            ActionDescriptor {
                id: ActionId::Publish,
                text: "Publish",
                overrides: true,
                condition: |ctx| {
                    ctx.environment.is_helix() && !ctx.location.pathname.contains(DRAFTS_SEGMENT)
                },
            },
        ])
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionDescriptor> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Actions whose condition holds, in registration order.
    pub fn available(&self, ctx: &ActionContext) -> Vec<&ActionDescriptor> {
        self.actions.iter().filter(|a| a.is_available(ctx)).collect()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
