mod client;
mod http;
mod image;
mod resgroup;
mod scope;

pub use client::{CatalogClient, CatalogTransport};
pub use http::HttpTransport;
pub use image::ImageRecord;
pub use resgroup::ResGroupRecord;
pub use scope::CatalogScope;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// A remote catalogue entry that the resolver can match by name.
///
/// `LIST_API` is the controller-relative listing endpoint that returns a JSON
/// array of this record type.
pub trait Candidate: DeserializeOwned + Send {
    /// Human readable kind, used in error messages ("Cannot find <KIND> name ...").
    const KIND: &'static str;
    const LIST_API: &'static str;

    fn name(&self) -> &str;
}

/// Controllers send `null` for fields they leave unset; read it as the zero value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
