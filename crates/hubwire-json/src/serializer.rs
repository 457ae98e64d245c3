//! The serializer facade.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cache::MemberCache;
use crate::de::ValueDeserializer;
use crate::error::{Error, Result};
use crate::ser::ValueSerializer;
use crate::strategy::{GitHubStrategy, Strategy};

/// Strategy and cache handed down through a single (de)serialization.
pub(crate) struct Context<'a, S: ?Sized> {
    pub(crate) strategy: &'a S,
    pub(crate) cache: &'a MemberCache,
}

impl<S: ?Sized> Clone for Context<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for Context<'_, S> {}

/// Converts values to and from wire JSON using a [`Strategy`].
///
/// Calls are independent and may run concurrently. The only shared state is
/// the [`MemberCache`], which can be injected with [`JsonSerializer::with_cache`]
/// and shared between serializers.
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer<S = GitHubStrategy> {
    strategy: S,
    cache: Arc<MemberCache>,
}

impl JsonSerializer {
    /// A serializer with the GitHub conventions and a fresh cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Strategy> JsonSerializer<S> {
    /// A serializer with a custom strategy and a fresh cache.
    #[must_use]
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy,
            cache: Arc::default(),
        }
    }

    /// Replace the member cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<MemberCache>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<MemberCache> {
        &self.cache
    }

    fn context(&self) -> Context<'_, S> {
        Context {
            strategy: &self.strategy,
            cache: &self.cache,
        }
    }

    /// Encode `value` as a JSON tree.
    ///
    /// # Errors
    /// Returns error if the value's `Serialize` impl fails or a map has
    /// non-scalar keys.
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        value.serialize(ValueSerializer::new(self.context()))
    }

    /// Encode `value` as JSON text.
    ///
    /// # Errors
    /// See [`JsonSerializer::to_value`].
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let value = self.to_value(value)?;
        Ok(serde_json::to_string(&value)?)
    }

    /// Decode a JSON tree into `T`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownVariant`] for enum strings that name no variant,
    /// otherwise whatever `T`'s `Deserialize` impl reports.
    pub fn from_value<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        T::deserialize(ValueDeserializer::new(value, self.context()))
    }

    /// Decode JSON text into `T`.
    ///
    /// # Errors
    /// Returns [`Error::Json`] for malformed text, otherwise see
    /// [`JsonSerializer::from_value`].
    pub fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<T> {
        let value: Value = serde_json::from_str(json)?;
        self.from_value(value)
    }

    /// Encode `input` as a JSON object with wire member names.
    ///
    /// Members holding `None` are kept as explicit nulls. Returns `Ok(None)`
    /// when the input does not encode as an object.
    ///
    /// # Errors
    /// Returns [`Error::MissingInput`] when `input` is `None`.
    pub fn try_serialize_object<T: Serialize + ?Sized>(
        &self,
        input: Option<&T>,
    ) -> Result<Option<Map<String, Value>>> {
        let input = input.ok_or(Error::MissingInput)?;

        match self.to_value(input)? {
            Value::Object(object) => Ok(Some(object)),
            _ => Ok(None),
        }
    }
}
