//! `serde::Deserializer` over a [`Value`] that applies a [`Strategy`].

use std::sync::Arc;

use serde::de::value::{StrDeserializer, StringDeserializer};
use serde::de::{self, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use serde::forward_to_deserialize_any;
use serde_json::{Map, Number, Value};

use crate::cache::{Members, TypeKey};
use crate::error::{Error, Result};
use crate::serializer::Context;
use crate::strategy::Strategy;

/// Deserializes an owned [`Value`].
///
/// Struct keys are matched by wire name, enum strings go through
/// [`Strategy::enum_variant`], and variant payloads (`{"Variant": ...}`) are
/// decoded with the same strategy. Everything else is decoded the way
/// serde_json decodes a `Value`.
pub(crate) struct ValueDeserializer<'a, S: ?Sized> {
    value: Value,
    cx: Context<'a, S>,
    /// Set while decoding the contents of an `Option`.
    nullable: bool,
}

impl<'a, S: Strategy + ?Sized> ValueDeserializer<'a, S> {
    pub(crate) const fn new(value: Value, cx: Context<'a, S>) -> Self {
        Self {
            value,
            cx,
            nullable: false,
        }
    }
}

impl<'de, S: Strategy + ?Sized> de::Deserializer<'de> for ValueDeserializer<'_, S> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => visit_number(&n, visitor),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(items) => visit_array(items, self.cx, visitor),
            Value::Object(map) => visitor.visit_map(MapDeserializer::new(map, self.cx, None)),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.value {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(Self {
                value,
                cx: self.cx,
                nullable: true,
            }),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.value {
            Value::String(s) => {
                let variant = self
                    .cx
                    .strategy
                    .enum_variant(&s, variants, self.nullable)
                    .ok_or_else(|| Error::UnknownVariant {
                        value: s,
                        type_name: name.to_owned(),
                    })?;
                let access: StrDeserializer<'_, Error> = variant.into_deserializer();
                visitor.visit_enum(access)
            }
            Value::Object(map) => {
                let mut entries = map.into_iter();
                let (Some((variant, payload)), None) = (entries.next(), entries.next()) else {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Map,
                        &"map with a single key",
                    ));
                };
                // Struct variants are cached under the variant name.
                let key = variants
                    .iter()
                    .copied()
                    .find(|known| *known == variant)
                    .unwrap_or(name);
                visitor.visit_enum(EnumDeserializer {
                    variant,
                    payload,
                    cx: self.cx,
                    key,
                })
            }
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"string or map",
            )),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.value {
            Value::Object(map) => visit_struct(map, self.cx, name, fields, visitor),
            value => Self {
                value,
                cx: self.cx,
                nullable: self.nullable,
            }
            .deserialize_any(visitor),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map identifier
    }
}

fn visit_number<'de, V: Visitor<'de>>(n: &Number, visitor: V) -> Result<V::Value> {
    if let Some(u) = n.as_u64() {
        visitor.visit_u64(u)
    } else if let Some(i) = n.as_i64() {
        visitor.visit_i64(i)
    } else if let Some(f) = n.as_f64() {
        visitor.visit_f64(f)
    } else {
        Err(de::Error::custom(format!("unsupported number {n}")))
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(b) => de::Unexpected::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                de::Unexpected::Unsigned(u)
            } else if let Some(i) = n.as_i64() {
                de::Unexpected::Signed(i)
            } else {
                de::Unexpected::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => de::Unexpected::Str(s),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

fn visit_struct<'de, S: Strategy + ?Sized, V: Visitor<'de>>(
    map: Map<String, Value>,
    cx: Context<'_, S>,
    name: &'static str,
    fields: &'static [&'static str],
    visitor: V,
) -> Result<V::Value> {
    let members = cx
        .cache
        .get_or_insert_with(TypeKey::of::<S>(name), || Members::build(fields, cx.strategy));
    visitor.visit_map(MapDeserializer::new(map, cx, Some(Fields { members, fields })))
}

fn visit_array<'de, S: Strategy + ?Sized, V: Visitor<'de>>(
    items: Vec<Value>,
    cx: Context<'_, S>,
    visitor: V,
) -> Result<V::Value> {
    let len = items.len();
    let mut seq = SeqDeserializer {
        iter: items.into_iter(),
        cx,
    };
    let value = visitor.visit_seq(&mut seq)?;

    if seq.iter.len() == 0 {
        Ok(value)
    } else {
        Err(de::Error::invalid_length(len, &"fewer elements in array"))
    }
}

struct SeqDeserializer<'a, S: ?Sized> {
    iter: std::vec::IntoIter<Value>,
    cx: Context<'a, S>,
}

impl<'de, S: Strategy + ?Sized> SeqAccess<'de> for SeqDeserializer<'_, S> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(ValueDeserializer::new(value, self.cx))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// The members of the struct being decoded.
struct Fields {
    members: Arc<Members>,
    fields: &'static [&'static str],
}

impl Fields {
    fn host_name<S: Strategy + ?Sized>(&self, wire: &str, strategy: &S) -> Option<&'static str> {
        // The cached entry may have been recorded by a serialization that
        // skipped some fields, or by another type with the same name. Only
        // trust it for members this type declares.
        self.members
            .host_name(wire)
            .filter(|host| self.fields.contains(host))
            .or_else(|| {
                self.fields
                    .iter()
                    .copied()
                    .find(|field| strategy.member_name(field) == wire)
            })
    }
}

struct MapDeserializer<'a, S: ?Sized> {
    iter: serde_json::map::IntoIter,
    value: Option<Value>,
    cx: Context<'a, S>,
    fields: Option<Fields>,
}

impl<'a, S: Strategy + ?Sized> MapDeserializer<'a, S> {
    fn new(map: Map<String, Value>, cx: Context<'a, S>, fields: Option<Fields>) -> Self {
        Self {
            iter: map.into_iter(),
            value: None,
            cx,
            fields,
        }
    }
}

impl<'de, S: Strategy + ?Sized> MapAccess<'de> for MapDeserializer<'_, S> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let Some((key, value)) = self.iter.next() else {
            return Ok(None);
        };
        self.value = Some(value);

        let key = match self
            .fields
            .as_ref()
            .and_then(|fields| fields.host_name(&key, self.cx.strategy))
        {
            Some(host) => host.to_owned(),
            None => key,
        };
        let key: StringDeserializer<Error> = key.into_deserializer();
        seed.deserialize(key).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let value = self
            .value
            .take()
            .ok_or_else(|| <Error as de::Error>::custom("value is missing"))?;
        seed.deserialize(ValueDeserializer::new(value, self.cx))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// A single-key object holding a variant and its payload.
struct EnumDeserializer<'a, S: ?Sized> {
    variant: String,
    payload: Value,
    cx: Context<'a, S>,
    key: &'static str,
}

impl<'de, 'a, S: Strategy + ?Sized> de::EnumAccess<'de> for EnumDeserializer<'a, S> {
    type Error = Error;
    type Variant = VariantDeserializer<'a, S>;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self::Variant)> {
        let variant: StringDeserializer<Error> = self.variant.into_deserializer();
        let value = seed.deserialize(variant)?;
        Ok((
            value,
            VariantDeserializer {
                payload: self.payload,
                cx: self.cx,
                key: self.key,
            },
        ))
    }
}

struct VariantDeserializer<'a, S: ?Sized> {
    payload: Value,
    cx: Context<'a, S>,
    key: &'static str,
}

impl<'de, S: Strategy + ?Sized> de::VariantAccess<'de> for VariantDeserializer<'_, S> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.payload {
            Value::Null => Ok(()),
            other => Err(de::Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(ValueDeserializer::new(self.payload, self.cx))
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        match self.payload {
            Value::Array(items) => visit_array(items, self.cx, visitor),
            other => Err(de::Error::invalid_type(unexpected(&other), &"tuple variant")),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.payload {
            Value::Object(map) => visit_struct(map, self.cx, self.key, fields, visitor),
            other => Err(de::Error::invalid_type(unexpected(&other), &"struct variant")),
        }
    }
}
