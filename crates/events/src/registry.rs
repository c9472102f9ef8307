//! Message-type catalog and idempotent boot-time registration.
//!
//! Producers declare their message types as [`MessageTypeDef`] descriptor
//! values in a statically built catalog — there is no runtime type
//! introspection. At boot (schema convergence), [`MessageTypeRegistry`]
//! walks each producer's catalog and materializes one durable
//! `SystemMsgSubscription` row per type via the store's atomic
//! get-or-create, invoking the definition's post-registration hook exactly
//! once, on first creation.

use std::collections::HashMap;
use std::sync::Arc;

use courier_core::error::CoreError;
use courier_core::models::SystemMsgSubscription;
use courier_core::store::SubscriptionStore;

// ---------------------------------------------------------------------------
// MessageTypeDef
// ---------------------------------------------------------------------------

/// One-time setup logic a definition runs when its subscription row is
/// first created. Never invoked for rows that already exist.
pub type PostRegisterHook = Arc<dyn Fn(&SystemMsgSubscription) + Send + Sync>;

/// A catalog-time declared message type. Discovered, never mutated.
///
/// Built with [`MessageTypeDef::new`] and the builder methods; entries
/// missing any of label, category, or category label are skipped at
/// registration time.
#[derive(Clone)]
pub struct MessageTypeDef {
    name: &'static str,
    message_type_label: Option<&'static str>,
    category: Option<&'static str>,
    category_label: Option<&'static str>,
    post_register: Option<PostRegisterHook>,
}

impl MessageTypeDef {
    /// Declare a message type under `name`.
    ///
    /// Names starting with `_` are conventionally internal and are never
    /// registered.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            message_type_label: None,
            category: None,
            category_label: None,
            post_register: None,
        }
    }

    /// Human-readable label for the message type.
    pub fn label(mut self, label: &'static str) -> Self {
        self.message_type_label = Some(label);
        self
    }

    /// Category key and its human-readable label.
    pub fn category(mut self, category: &'static str, category_label: &'static str) -> Self {
        self.category = Some(category);
        self.category_label = Some(category_label);
        self
    }

    /// Attach the one-time post-registration hook.
    pub fn on_register(
        mut self,
        hook: impl Fn(&SystemMsgSubscription) + Send + Sync + 'static,
    ) -> Self {
        self.post_register = Some(Arc::new(hook));
        self
    }

    /// The declared name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The canonical `message_type` identifier derived from the name.
    pub fn message_type(&self) -> &'static str {
        self.name
    }

    fn is_internal(&self) -> bool {
        self.name.starts_with('_')
    }

    /// All three metadata fields, or `None` if any is missing.
    fn registration_fields(&self) -> Option<(&'static str, &'static str, &'static str)> {
        Some((
            self.message_type_label?,
            self.category?,
            self.category_label?,
        ))
    }
}

impl std::fmt::Debug for MessageTypeDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageTypeDef")
            .field("name", &self.name)
            .field("message_type_label", &self.message_type_label)
            .field("category", &self.category)
            .field("category_label", &self.category_label)
            .field("post_register", &self.post_register.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Catalog source
// ---------------------------------------------------------------------------

/// Error type for catalog resolution.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The producer declares no message types. A normal condition, never
    /// surfaced past the registry.
    #[error("No catalog declared for producer '{0}'")]
    NotFound(String),

    /// The catalog exists but could not be loaded. Fatal: aborts the boot
    /// sequence for that producer.
    #[error("Failed to load catalog for producer '{producer}': {reason}")]
    Load { producer: String, reason: String },
}

/// Resolves the catalog declared by a producer.
pub trait CatalogSource: Send + Sync {
    fn load(&self, producer: &str) -> Result<Vec<MessageTypeDef>, CatalogError>;
}

/// Catalog source over a statically built producer → definitions map.
#[derive(Debug, Default)]
pub struct StaticCatalogs {
    catalogs: HashMap<&'static str, Vec<MessageTypeDef>>,
}

impl StaticCatalogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a producer's catalog, replacing any previous declaration.
    pub fn declare(mut self, producer: &'static str, defs: Vec<MessageTypeDef>) -> Self {
        self.catalogs.insert(producer, defs);
        self
    }
}

impl CatalogSource for StaticCatalogs {
    fn load(&self, producer: &str) -> Result<Vec<MessageTypeDef>, CatalogError> {
        self.catalogs
            .get(producer)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(producer.to_string()))
    }
}

// ---------------------------------------------------------------------------
// MessageTypeRegistry
// ---------------------------------------------------------------------------

/// Error type for a registration run.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Boot-time registration of catalog-declared message types.
pub struct MessageTypeRegistry;

impl MessageTypeRegistry {
    /// Register every message type the producer declares.
    ///
    /// A missing catalog means the producer declares zero types and is not
    /// an error. Any other load failure propagates. Repeat and concurrent
    /// runs are no-ops for already-registered types; the post-registration
    /// hook fires exactly once per type, on the run that created the row.
    ///
    /// Returns the number of newly created subscriptions.
    pub async fn register_all(
        store: &dyn SubscriptionStore,
        source: &dyn CatalogSource,
        producer: &str,
    ) -> Result<usize, RegistryError> {
        let defs = match source.load(producer) {
            Ok(defs) => defs,
            Err(CatalogError::NotFound(_)) => {
                tracing::debug!(producer, "No message type catalog declared");
                return Ok(0);
            }
            Err(err) => return Err(err.into()),
        };

        let mut created_count = 0;
        for def in &defs {
            if def.is_internal() {
                continue;
            }
            let Some((_label, category, category_label)) = def.registration_fields() else {
                tracing::debug!(
                    producer,
                    name = def.name(),
                    "Skipping message type with incomplete metadata"
                );
                continue;
            };

            let (subscription, created) = store
                .get_or_create_system_subscription(def.message_type(), category, category_label)
                .await?;

            if created {
                if let Some(hook) = &def.post_register {
                    hook(&subscription);
                }
                tracing::info!(
                    producer,
                    message_type = def.message_type(),
                    "Created system message subscription"
                );
                created_count += 1;
            }
        }

        Ok(created_count)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
