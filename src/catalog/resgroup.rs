use serde::{Deserialize, Serialize};

use super::{Candidate, null_as_default};

/// Resource group ("cloudspace") entry as returned by `cloudspaces/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResGroupRecord {
    id: i64,
    name: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "accountId")]
    tenant_id: i64,
    #[serde(default, deserialize_with = "null_as_default", rename = "accountName")]
    tenant_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    location: String,
}

#[allow(unused)]
impl ResGroupRecord {
    pub fn new(id: i64, name: impl Into<String>, tenant_id: i64, tenant_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tenant_id,
            tenant_name: tenant_name.into(),
            status: String::new(),
            location: String::new(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn tenant_id(&self) -> i64 {
        self.tenant_id
    }

    pub fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl Candidate for ResGroupRecord {
    const KIND: &'static str = "resource group";
    const LIST_API: &'static str = "/restmachine/cloudapi/cloudspaces/list";

    fn name(&self) -> &str {
        &self.name
    }
}
