use serde::{Deserialize, Serialize};

use sexyboom_core::{ClientId, DomainError, DomainResult, Entity, ValueObject, is_valid_national_id};

/// National identity document number (DNI): exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    pub fn parse(value: &str) -> DomainResult<Self> {
        if !is_valid_national_id(value) {
            return Err(DomainError::validation(format!(
                "national_id must be exactly 8 digits (got {value:?})"
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for NationalId {}

impl core::fmt::Display for NationalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Untrusted client fields as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientDraft {
    pub name: String,
    pub national_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
}

/// Partial update: only the present fields are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// A customer the business sells to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: String,
    national_id: NationalId,
    address: String,
    phone: String,
}

impl Client {
    pub fn new(id: ClientId, draft: ClientDraft) -> DomainResult<Self> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let national_id = NationalId::parse(&draft.national_id)?;

        Ok(Self {
            id,
            name: name.to_string(),
            national_id,
            address: draft.address,
            phone: draft.phone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Merge `patch` into a copy of this client, re-validating name and DNI.
    pub fn apply_patch(&self, patch: ClientPatch) -> DomainResult<Self> {
        let draft = ClientDraft {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            national_id: patch
                .national_id
                .unwrap_or_else(|| self.national_id.as_str().to_string()),
            address: patch.address.unwrap_or_else(|| self.address.clone()),
            phone: patch.phone.unwrap_or_else(|| self.phone.clone()),
        };
        Self::new(self.id, draft)
    }
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
