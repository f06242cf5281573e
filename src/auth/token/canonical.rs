//! Canonical JSON encoding of token contexts.
//!
//! The subject claim is the context routed through [`serde_json::Value`], so object keys come
//! out sorted and equal contexts always yield equal subjects. `serde_json` quietly writes
//! non-finite floats as `null`; a context carrying one is rejected up front instead.

// crates.io
use serde::ser::{self, Error as _, Serializer};
// self
use crate::_prelude::*;

type CheckResult = std::result::Result<(), serde_json::Error>;

/// Encodes `context` as compact JSON with sorted object keys.
pub(crate) fn canonical_json<T>(context: &T) -> Result<String>
where
	T: ?Sized + Serialize,
{
	context
		.serialize(&mut FiniteFloats)
		.and_then(|()| serde_json::to_value(context))
		.and_then(|value| serde_json::to_string(&value))
		.map_err(Error::Serialization)
}

/// Serializer that walks a value and fails on the first NaN or infinity.
struct FiniteFloats;
impl FiniteFloats {
	fn check(value: f64) -> CheckResult {
		if value.is_finite() {
			Ok(())
		} else {
			Err(serde_json::Error::custom(format_args!(
				"non-finite number `{value}` has no JSON representation"
			)))
		}
	}
}

macro_rules! accept_scalars {
	($($method:ident($ty:ty)),* $(,)?) => {
		$(
			fn $method(self, _: $ty) -> CheckResult {
				Ok(())
			}
		)*
	};
}

impl Serializer for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();
	type SerializeMap = Self;
	type SerializeSeq = Self;
	type SerializeStruct = Self;
	type SerializeStructVariant = Self;
	type SerializeTuple = Self;
	type SerializeTupleStruct = Self;
	type SerializeTupleVariant = Self;

	accept_scalars! {
		serialize_bool(bool),
		serialize_i8(i8),
		serialize_i16(i16),
		serialize_i32(i32),
		serialize_i64(i64),
		serialize_i128(i128),
		serialize_u8(u8),
		serialize_u16(u16),
		serialize_u32(u32),
		serialize_u64(u64),
		serialize_u128(u128),
		serialize_char(char),
		serialize_str(&str),
		serialize_bytes(&[u8]),
		serialize_unit_struct(&'static str),
	}

	fn serialize_f32(self, v: f32) -> CheckResult {
		FiniteFloats::check(f64::from(v))
	}

	fn serialize_f64(self, v: f64) -> CheckResult {
		FiniteFloats::check(v)
	}

	fn serialize_none(self) -> CheckResult {
		Ok(())
	}

	fn serialize_some<T>(self, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_unit(self) -> CheckResult {
		Ok(())
	}

	fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> CheckResult {
		Ok(())
	}

	fn serialize_newtype_struct<T>(self, _: &'static str, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_newtype_variant<T>(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		value: &T,
	) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_seq(self, _: Option<usize>) -> std::result::Result<Self, Self::Error> {
		Ok(self)
	}

	fn serialize_tuple(self, _: usize) -> std::result::Result<Self, Self::Error> {
		Ok(self)
	}

	fn serialize_tuple_struct(
		self,
		_: &'static str,
		_: usize,
	) -> std::result::Result<Self, Self::Error> {
		Ok(self)
	}

	fn serialize_tuple_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> std::result::Result<Self, Self::Error> {
		Ok(self)
	}

	fn serialize_map(self, _: Option<usize>) -> std::result::Result<Self, Self::Error> {
		Ok(self)
	}

	fn serialize_struct(self, _: &'static str, _: usize) -> std::result::Result<Self, Self::Error> {
		Ok(self)
	}

	fn serialize_struct_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> std::result::Result<Self, Self::Error> {
		Ok(self)
	}
}

impl ser::SerializeSeq for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();

	fn serialize_element<T>(&mut self, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(&mut **self)
	}

	fn end(self) -> CheckResult {
		Ok(())
	}
}
impl ser::SerializeTuple for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();

	fn serialize_element<T>(&mut self, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(&mut **self)
	}

	fn end(self) -> CheckResult {
		Ok(())
	}
}
impl ser::SerializeTupleStruct for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();

	fn serialize_field<T>(&mut self, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(&mut **self)
	}

	fn end(self) -> CheckResult {
		Ok(())
	}
}
impl ser::SerializeTupleVariant for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();

	fn serialize_field<T>(&mut self, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(&mut **self)
	}

	fn end(self) -> CheckResult {
		Ok(())
	}
}
impl ser::SerializeMap for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();

	fn serialize_key<T>(&mut self, key: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		key.serialize(&mut **self)
	}

	fn serialize_value<T>(&mut self, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(&mut **self)
	}

	fn end(self) -> CheckResult {
		Ok(())
	}
}
impl ser::SerializeStruct for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();

	fn serialize_field<T>(&mut self, _: &'static str, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(&mut **self)
	}

	fn end(self) -> CheckResult {
		Ok(())
	}
}
impl ser::SerializeStructVariant for &mut FiniteFloats {
	type Error = serde_json::Error;
	type Ok = ();

	fn serialize_field<T>(&mut self, _: &'static str, value: &T) -> CheckResult
	where
		T: ?Sized + Serialize,
	{
		value.serialize(&mut **self)
	}

	fn end(self) -> CheckResult {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::{BTreeMap, HashMap};
	// self
	use super::*;

	#[derive(Serialize)]
	struct Scored {
		user_id: &'static str,
		scores: Vec<Option<f32>>,
	}

	#[test]
	fn keys_are_sorted_and_output_is_compact() {
		let context = HashMap::from([("zeta", 1.5), ("alpha", -2.0)]);

		assert_eq!(
			canonical_json(&context).expect("Finite floats should encode."),
			"{\"alpha\":-2.0,\"zeta\":1.5}"
		);
	}

	#[test]
	fn non_finite_floats_fail_with_serialization_error() {
		for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
			let err = canonical_json(&BTreeMap::from([("score", value)]))
				.expect_err("Non-finite floats must not be encoded as null.");

			assert!(matches!(err, Error::Serialization(_)), "Unexpected error: {err:?}.");
		}
	}

	#[test]
	fn nested_non_finite_floats_are_found() {
		let context = Scored { user_id: "u1", scores: vec![Some(0.5), None, Some(f32::NAN)] };

		assert!(matches!(canonical_json(&context), Err(Error::Serialization(_))));

		let context = Scored { user_id: "u1", scores: vec![Some(0.5), None] };

		assert_eq!(
			canonical_json(&context).expect("Finite nested floats should encode."),
			"{\"scores\":[0.5,null],\"user_id\":\"u1\"}"
		);
	}

	#[test]
	fn explicit_nulls_are_preserved() {
		let context = BTreeMap::from([("nickname", None::<String>)]);

		assert_eq!(
			canonical_json(&context).expect("Null values should encode."),
			"{\"nickname\":null}"
		);
	}
}
