//! Read-only lookups against the DECS cloud controller.
//!
//! A lookup takes a partially specified criteria object, lists the matching
//! catalogue once, resolves exactly one record and writes its identity and
//! effective attributes back into a [`ResourceState`].
//!
//! ```ignore
//! let config = controller::load_from_env()?;
//! let catalog = CatalogClient::new(HttpTransport::new(&config)?);
//! let registry = LookupRegistry::with_defaults(Resolver::default());
//!
//! let mut state = ResourceState::new();
//! registry
//!     .read("decs_image", &json!({"name": "ubuntu-22.04"}), &catalog, &mut state)
//!     .await?;
//! ```

pub mod catalog;
pub mod controller;
pub mod lookups;
pub mod projector;
pub mod resolver;

pub use catalog::{CatalogClient, CatalogScope, HttpTransport};
pub use lookups::{DataSource, LookupRegistry};
pub use projector::ResourceState;
pub use resolver::{LookupError, MatchPolicy, Resolver};
