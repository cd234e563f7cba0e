use serde::{Deserialize, Serialize};

use super::{Candidate, null_as_default};

/// OS image entry as returned by `images/list`.
///
/// Only `id` and `name` are mandatory on the wire; everything else defaults so
/// that older controllers that omit fields still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    id: i64,
    name: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    image_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    size: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    status: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "accountId")]
    tenant_id: i64,
    #[serde(default, deserialize_with = "null_as_default", rename = "sepid")]
    sep_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pool: String,
    #[serde(default, deserialize_with = "null_as_default")]
    username: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "bootType")]
    boot_type: String,
}

#[allow(unused)]
impl ImageRecord {
    pub fn new(id: i64, name: impl Into<String>, pool: impl Into<String>, sep_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            image_type: String::new(),
            description: String::new(),
            size: 0,
            status: String::new(),
            tenant_id: 0,
            sep_id,
            pool: pool.into(),
            username: String::new(),
            boot_type: String::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Pool on the storage endpoint that holds the image.
    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// Storage endpoint (SEP) ID
    pub fn sep_id(&self) -> i64 {
        self.sep_id
    }

    /// eg. linux, windows
    pub fn image_type(&self) -> &str {
        &self.image_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Size in GB
    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Owning tenant; 0 for shared images.
    pub fn tenant_id(&self) -> i64 {
        self.tenant_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn boot_type(&self) -> &str {
        &self.boot_type
    }
}

impl Candidate for ImageRecord {
    const KIND: &'static str = "OS Image";
    const LIST_API: &'static str = "/restmachine/cloudapi/images/list";

    fn name(&self) -> &str {
        &self.name
    }
}
