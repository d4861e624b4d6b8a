//! Wire DTOs for the `/check` endpoint.
//!
//! # Design
//! Field names match the wire exactly; the only rename is `is_valid` to
//! `isValid`. Variable values are `serde_json::Value`, so anything JSON can
//! express round-trips unchanged apart from JSON's own numeric limits.
//!
//! Encoding rules:
//! - an empty request encodes as `{"validations":[]}`;
//! - `variables` is always written, as `{}` when empty;
//! - on decode, a missing or `null` field takes its zero value: empty
//!   array or map, `""`, `false`. So `{"error":"boom"}` is an empty
//!   `CheckResponse`;
//! - a field of the wrong type, or a top-level value that is not an object,
//!   is still an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, Result};

/// Free-form variables attached to one validation.
pub type Variables = Map<String, Value>;

/// A batch of validations sent in one `check` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckRequest {
    pub validations: Vec<CheckRequestValidation>,
}

/// One named validation and its inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckRequestValidation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: Variables,
}

/// The server's verdicts for a batch, matched to the request by `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckResponse {
    pub results: Vec<CheckResponseResult>,
}

/// The verdict for one validation. `message` is empty when valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponseResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "isValid", default, deserialize_with = "null_as_default")]
    pub is_valid: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

// The top-level bodies are read through these so that every key can be
// defaulted while a JSON array is still rejected: serde's derived visitor
// would otherwise build the struct from an empty sequence.

#[derive(Deserialize)]
struct RequestBody {
    #[serde(default, deserialize_with = "null_as_default")]
    validations: Vec<CheckRequestValidation>,
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<CheckResponseResult>,
}

impl<'de> Deserialize<'de> for CheckRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let body: RequestBody = from_object(deserializer)?;
        Ok(Self {
            validations: body.validations,
        })
    }
}

impl<'de> Deserialize<'de> for CheckResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let body: ResponseBody = from_object(deserializer)?;
        Ok(Self {
            results: body.results,
        })
    }
}

fn from_object<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let object = Map::<String, Value>::deserialize(deserializer)?;
    serde_json::from_value(Value::Object(object)).map_err(serde::de::Error::custom)
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl CheckRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation(mut self, validation: CheckRequestValidation) -> Self {
        self.validations.push(validation);
        self
    }

    pub fn push(&mut self, validation: CheckRequestValidation) {
        self.validations.push(validation);
    }

    pub fn len(&self) -> usize {
        self.validations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validations.is_empty()
    }
}

impl FromIterator<CheckRequestValidation> for CheckRequest {
    fn from_iter<I: IntoIterator<Item = CheckRequestValidation>>(iter: I) -> Self {
        Self {
            validations: iter.into_iter().collect(),
        }
    }
}

impl CheckRequestValidation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            variables: Variables::new(),
        }
    }

    /// Set `key` to an already-JSON value. Replaces any previous value.
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set `key` to any serializable value.
    ///
    /// Fails with `ApiError::Encoding` when the value has no JSON form, such
    /// as a map keyed by something other than strings.
    pub fn try_variable<T>(mut self, key: impl Into<String>, value: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(value).map_err(ApiError::Encoding)?;
        self.variables.insert(key.into(), value);
        Ok(self)
    }
}

impl CheckResponse {
    /// The result for validation `id`. Servers need not preserve order, so
    /// lookups go by id rather than position.
    pub fn result(&self, id: &str) -> Option<&CheckResponseResult> {
        self.results.iter().find(|result| result.id == id)
    }

    pub fn all_valid(&self) -> bool {
        self.results.iter().all(|result| result.is_valid)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResponseResult> {
        self.results.iter().filter(|result| !result.is_valid)
    }
}
