use atelier_database::Database;
use atelier_domain::config::ApiConfig;
use atelier_domain::registry::{FeatureSlice, InitializedSlice};
use atelier_event_bus::{Event, EventBus};
use axum::extract::FromRef;
use fxhash::FxHashMap;
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, warn};

#[atelier_derive::atelier_error(http)]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Everything a handler can reach through [`ApiState`].
#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
    pub events: EventBus,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Shared application state handed to every handler. Cloning is a reference count bump.
#[derive(Debug, Clone)]
pub struct ApiState(Arc<ApiStateInner>);

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.0.slices.get(&TypeId::of::<T>())?.state.as_any().downcast_ref::<T>()
    }

    /// Returns the slice registered for `T`; a missing slice is a wiring bug and maps to 500.
    ///
    /// # Errors
    /// Returns [`ApiStateError::MissingSlice`] if `T` was never registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    /// Registered slice names, sorted.
    #[must_use]
    pub fn slice_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.0.slices.values().map(|slice| slice.name).collect();
        names.sort_unstable();
        names
    }

    /// Publishes a domain event. Publishing is fire-and-forget for handlers: failures are
    /// logged and an event nobody listens to is dropped.
    pub fn publish<T: Event>(&self, event: T) {
        match self.0.events.publish(event) {
            Ok(0) => debug!(event = std::any::type_name::<T>(), "Event has no listeners"),
            Ok(_) => {},
            Err(error) => {
                warn!(event = std::any::type_name::<T>(), %error, "Failed to publish event");
            },
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.config.clone()
    }
}

impl FromRef<ApiState> for Database {
    fn from_ref(state: &ApiState) -> Self {
        state.database.clone()
    }
}

impl FromRef<ApiState> for EventBus {
    fn from_ref(state: &ApiState) -> Self {
        state.events.clone()
    }
}

/// Collects the shared handles and slices; [`ApiStateBuilder::build`] validates them.
#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
    events: Option<EventBus>,
    slices: Vec<InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn db(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Shares an existing bus, so listeners subscribed before the state exists see handler events.
    #[must_use]
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: impl Into<InitializedSlice>) -> Self {
        self.slices.push(slice.into());
        self
    }

    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        self.slices.extend(slices);
        self
    }

    /// # Errors
    /// Fails when the configuration or the database handle is missing, or when the
    /// same slice type is registered twice.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "ApiConfig not provided".into(),
            context: None,
        })?;
        let database = self.database.ok_or_else(|| ApiStateError::Validation {
            message: "Database not provided".into(),
            context: None,
        })?;

        let mut slices = FxHashMap::default();
        for slice in self.slices {
            let name = slice.name;
            if slices.insert(slice.id, slice).is_some() {
                return Err(ApiStateError::Validation {
                    message: format!("Slice '{name}' registered twice").into(),
                    context: None,
                });
            }
        }

        Ok(ApiState(Arc::new(ApiStateInner {
            config,
            database,
            events: self.events.unwrap_or_default(),
            slices,
        })))
    }
}
