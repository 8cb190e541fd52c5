//! Schema-driven resource engine between `fortios-api` and the CLI.
//!
//! Every FortiOS configuration object is described once, as a static
//! [`ResourceDef`] in the [`catalog`]. One generic engine interprets those
//! tables:
//!
//! - **[`Provider`]**: Facade owning the [`FortiClient`](fortios_api::FortiClient)
//!   and provider defaults (vdom, import behaviour). Resolves type names,
//!   validates configuration and runs the lifecycle operations.
//!
//! - **[`ResourceHandler`]**: Create / Read / Update / Delete / Import for
//!   one type: resolves the vdom, expands state into a request body, calls
//!   the client and flattens the answer back into [`ResourceData`].
//!
//! - **[`mapping`]**: `expand_object` / `flatten_object`, including nested
//!   tables, `dynamic_sort_subtable` and IP/mask normalisation.
//!
//! - **[`DataSourceDef`]**: Read-only single-object and `<name>list` data
//!   sources derived from each resource definition.

pub mod catalog;
pub mod config;
pub mod data;
pub mod data_source;
pub mod error;
pub mod helpers;
pub mod mapping;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ProviderConfig, TlsVerification};
pub use data::ResourceData;
pub use data_source::{DataSourceDef, DataSourceKind};
pub use error::CoreError;
pub use mapping::{FlattenMode, expand_object, flatten_object};
pub use provider::Provider;
pub use resource::ResourceHandler;
pub use schema::{AttrKind, Attribute, MKey, MKeyKind, Requiredness, ResourceDef, Validator};
pub use validate::Diagnostic;

pub use fortios_api::{SystemStatus, TokenPlacement};
