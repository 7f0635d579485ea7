//! Resource controllers and their lifecycle
//!
//! Every resource can be created, read and deleted. Only resources that
//! implement [`UpdatableResource`] can change in place; any other change is
//! a [`Change::Replace`], carried out by [`replace`] as delete-then-create.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::provider::Provider;

pub mod filter;
pub mod label;

pub use filter::FilterResource;
pub use label::LabelResource;

/// What applying a new config to an existing resource requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    NoOp,
    Update,
    Replace,
}

#[async_trait]
pub trait Resource: Send + Sync {
    type Config: Send + Sync;
    type State: Send;

    /// Resource type name as registered with the host
    const TYPE_NAME: &'static str;

    /// Per-instance mailbox override, `None` when absent or empty
    fn user_id(config: &Self::Config) -> Option<&str>;

    /// Identity of a stored state
    fn state_id(state: &Self::State) -> &str;

    /// Checks that need no API call
    fn validate(config: &Self::Config) -> Result<()>;

    /// Change required to go from `prior` to `proposed`
    fn plan(prior: &Self::Config, proposed: &Self::Config) -> Change;

    /// Create the remote entity and return its freshly read state
    async fn create(&self, provider: &Provider, config: &Self::Config) -> Result<Self::State>;

    /// Current remote state, or `None` when the entity no longer exists
    async fn read(
        &self,
        provider: &Provider,
        user_id: Option<&str>,
        id: &str,
    ) -> Result<Option<Self::State>>;

    async fn delete(&self, provider: &Provider, user_id: Option<&str>, id: &str) -> Result<()>;
}

/// A resource whose declared fields can change without replacement
#[async_trait]
pub trait UpdatableResource: Resource {
    async fn update(&self, provider: &Provider, id: &str, config: &Self::Config) -> Result<()>;
}

/// Delete the existing entity, then create one from `proposed`
pub async fn replace<R: Resource>(
    resource: &R,
    provider: &Provider,
    id: &str,
    prior: &R::Config,
    proposed: &R::Config,
) -> Result<R::State> {
    R::validate(proposed)?;

    info!("Replacing {} '{}'", R::TYPE_NAME, id);
    resource.delete(provider, R::user_id(prior), id).await?;
    resource.create(provider, proposed).await
}

/// Apply a config change to an existing entity, returning its identity afterwards
pub async fn apply<R: UpdatableResource>(
    resource: &R,
    provider: &Provider,
    id: &str,
    prior: &R::Config,
    proposed: &R::Config,
) -> Result<String> {
    match R::plan(prior, proposed) {
        Change::NoOp => Ok(id.to_string()),
        Change::Update => {
            resource.update(provider, id, proposed).await?;
            Ok(id.to_string())
        }
        Change::Replace => {
            let state = replace(resource, provider, id, prior, proposed).await?;
            Ok(R::state_id(&state).to_string())
        }
    }
}
