//! `serde::Serializer` that builds a [`Value`] through a [`Strategy`].

use std::sync::Arc;

use serde::ser::{self, Serialize};
use serde_json::{Map, Number, Value};

use crate::cache::{Members, TypeKey};
use crate::error::{Error, Result};
use crate::serializer::Context;
use crate::strategy::Strategy;

/// Serializes into a [`Value`], renaming struct members and unit variants.
///
/// `None` and unit values are written as `null`; nothing is omitted unless the
/// type itself skips the field.
pub(crate) struct ValueSerializer<'a, S: ?Sized> {
    cx: Context<'a, S>,
}

impl<'a, S: Strategy + ?Sized> ValueSerializer<'a, S> {
    pub(crate) const fn new(cx: Context<'a, S>) -> Self {
        Self { cx }
    }
}

impl<'a, S: Strategy + ?Sized> ser::Serializer for ValueSerializer<'a, S> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec<'a, S>;
    type SerializeTuple = SerializeVec<'a, S>;
    type SerializeTupleStruct = SerializeVec<'a, S>;
    type SerializeTupleVariant = SerializeTupleVariant<'a, S>;
    type SerializeMap = SerializeMap<'a, S>;
    type SerializeStruct = SerializeStruct<'a, S>;
    type SerializeStructVariant = SerializeStructVariant<'a, S>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        // Same as serde_json: NaN and infinities become null.
        Ok(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(
            v.iter().map(|&b| Value::Number(b.into())).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(self.cx.strategy.enum_name(variant)))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value> {
        let mut object = Map::new();
        object.insert(variant.to_owned(), value.serialize(self)?);
        Ok(Value::Object(object))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            cx: self.cx,
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            items: SerializeVec {
                cx: self.cx,
                items: Vec::with_capacity(len),
            },
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        // Derived types start a map of unknown length for `#[serde(flatten)]`,
        // whose members would reach the wire under their host names.
        if len.is_none() {
            return Err(<Error as ser::Error>::custom(
                "maps of unknown length are not supported; \
                 #[serde(flatten)] members cannot be renamed",
            ));
        }

        Ok(SerializeMap {
            cx: self.cx,
            map: Map::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(SerializeStruct::new(self.cx, name))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            fields: SerializeStruct::new(self.cx, variant),
        })
    }
}

pub(crate) struct SerializeVec<'a, S: ?Sized> {
    cx: Context<'a, S>,
    items: Vec<Value>,
}

impl<S: Strategy + ?Sized> ser::SerializeSeq for SerializeVec<'_, S> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(value.serialize(ValueSerializer::new(self.cx))?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.items))
    }
}

impl<S: Strategy + ?Sized> ser::SerializeTuple for SerializeVec<'_, S> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl<S: Strategy + ?Sized> ser::SerializeTupleStruct for SerializeVec<'_, S> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

pub(crate) struct SerializeTupleVariant<'a, S: ?Sized> {
    variant: &'static str,
    items: SerializeVec<'a, S>,
}

impl<S: Strategy + ?Sized> ser::SerializeTupleVariant for SerializeTupleVariant<'_, S> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        ser::SerializeSeq::serialize_element(&mut self.items, value)
    }

    fn end(self) -> Result<Value> {
        let mut object = Map::new();
        object.insert(
            self.variant.to_owned(),
            ser::SerializeSeq::end(self.items)?,
        );
        Ok(Value::Object(object))
    }
}

/// Map keys are data rather than members and are never renamed.
pub(crate) struct SerializeMap<'a, S: ?Sized> {
    cx: Context<'a, S>,
    map: Map<String, Value>,
    next_key: Option<String>,
}

impl<S: Strategy + ?Sized> ser::SerializeMap for SerializeMap<'_, S> {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        let key = match key.serialize(ValueSerializer::new(self.cx))? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(<Error as ser::Error>::custom(format!(
                    "map key must be a string, got {other}"
                )));
            }
        };
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| <Error as ser::Error>::custom("map value without a key"))?;
        self.map
            .insert(key, value.serialize(ValueSerializer::new(self.cx))?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

/// Builds an object with wire member names.
///
/// Names come from the cached entry for the type when there is one. The first
/// serialization of a type records the members it wrote.
pub(crate) struct SerializeStruct<'a, S: ?Sized> {
    cx: Context<'a, S>,
    key: TypeKey,
    members: Option<Arc<Members>>,
    seen: Vec<&'static str>,
    map: Map<String, Value>,
}

impl<'a, S: Strategy + ?Sized> SerializeStruct<'a, S> {
    fn new(cx: Context<'a, S>, name: &'static str) -> Self {
        let key = TypeKey::of::<S>(name);
        Self {
            cx,
            key,
            members: cx.cache.get(&key),
            seen: Vec::new(),
            map: Map::new(),
        }
    }

    fn wire_name(&self, member: &'static str) -> String {
        self.members
            .as_deref()
            .and_then(|members| members.wire_name(member))
            .map_or_else(|| self.cx.strategy.member_name(member), str::to_owned)
    }

    fn finish(self) -> Map<String, Value> {
        let Self {
            cx,
            key,
            members,
            seen,
            map,
        } = self;

        if members.is_none() {
            cx.cache
                .get_or_insert_with(key, || Members::build(&seen, cx.strategy));
        }
        map
    }
}

impl<S: Strategy + ?Sized> ser::SerializeStruct for SerializeStruct<'_, S> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        let wire = self.wire_name(key);
        let value = value.serialize(ValueSerializer::new(self.cx))?;
        self.map.insert(wire, value);
        self.seen.push(key);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.finish()))
    }
}

pub(crate) struct SerializeStructVariant<'a, S: ?Sized> {
    variant: &'static str,
    fields: SerializeStruct<'a, S>,
}

impl<S: Strategy + ?Sized> ser::SerializeStructVariant for SerializeStructVariant<'_, S> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        ser::SerializeStruct::serialize_field(&mut self.fields, key, value)
    }

    fn end(self) -> Result<Value> {
        let mut object = Map::new();
        object.insert(
            self.variant.to_owned(),
            Value::Object(self.fields.finish()),
        );
        Ok(Value::Object(object))
    }
}
