use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned to a student by the repository.
///
/// Signed so that a negative path id is a well-formed lookup that simply finds nothing.
pub type StudentId = i64;

/// A stored student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Repository-assigned identifier, immutable once issued.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Contact address; not checked for format or uniqueness.
    pub email: String,
}

/// Caller-supplied student fields, as decoded from a create or update request.
///
/// Missing or `null` fields fall back to empty values so that validation, not the JSON
/// decoder, reports them. An `id` in the request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudentPayload {
    /// Requested name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Requested age; may be zero or negative until validated.
    #[serde(deserialize_with = "null_as_default")]
    pub age: i64,
    /// Requested email.
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Student fields that passed validation and are ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Non-empty name.
    pub name: String,
    /// Positive age.
    pub age: u32,
    /// Non-empty email.
    pub email: String,
}

impl NewStudent {
    pub(crate) fn with_id(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
        }
    }
}
