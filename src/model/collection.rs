//! Polymorphic collections.
//!
//! Seller Center's JSON is converted from XML, so a repeated element comes
//! out in one of several shapes depending on how many items there are:
//!
//! | items | JSON                         |
//! |-------|------------------------------|
//! | none  | key absent, `null` or `""`   |
//! | one   | a single object (or string)  |
//! | many  | an array                     |
//!
//! [`List<T>`] absorbs all of them. Wrapper objects of the form
//! `{"Order": ...}` are generated with the crate-internal `tagged_list!` macro.
//!
//! # Example
//!
//! ```rust
//! use serde::Deserialize;
//! use seller_center::model::List;
//!
//! #[derive(Deserialize)]
//! struct Item {
//!     #[serde(rename = "Id")]
//!     id: u32,
//! }
//!
//! let one: List<Item> = serde_json::from_str(r#"{"Id": 7}"#).unwrap();
//! let many: List<Item> = serde_json::from_str(r#"[{"Id": 7}, {"Id": 8}]"#).unwrap();
//! let none: List<Item> = serde_json::from_str(r#""""#).unwrap();
//!
//! assert_eq!(one.len(), 1);
//! assert_eq!(many[1].id, 8);
//! assert!(none.is_empty());
//! ```

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, IgnoredAny, IntoDeserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

/// A collection that decodes from any of the shapes Seller Center uses for
/// repeated elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List<T>(Vec<T>);

impl<T> List<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the items as a vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for List<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for List<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ListVisitor(PhantomData))
    }
}

struct ListVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ListVisitor<T> {
    type Value = List<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object, an array, a string or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(List::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(List::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        List::deserialize(deserializer)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value.is_empty() {
            return Ok(List::new());
        }
        let deserializer: de::value::StrDeserializer<'_, E> = value.into_deserializer();
        Ok(List(vec![T::deserialize(deserializer)?]))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let item = T::deserialize(MapAccessDeserializer::new(map))?;
        Ok(List(vec![item]))
    }
}

/// Decodes a wrapper object `{ "<tag>": <List<T>> }`.
///
/// `null`, `""` and `[]` decode as an empty list, as does an object without
/// `tag`. Other keys are ignored.
///
/// # Errors
///
/// Fails if the value has another shape or the tagged items do not decode.
pub fn deserialize_tagged<'de, D, T>(deserializer: D, tag: &'static str) -> Result<List<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_any(TaggedVisitor {
        tag,
        marker: PhantomData,
    })
}

struct TaggedVisitor<T> {
    tag: &'static str,
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for TaggedVisitor<T> {
    type Value = List<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "an object with a \"{}\" key, or an empty value", self.tag)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(List::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(List::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value.is_empty() {
            Ok(List::new())
        } else {
            Err(E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        match seq.next_element::<IgnoredAny>()? {
            None => Ok(List::new()),
            Some(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &self)),
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut items = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == self.tag {
                if items.is_some() {
                    return Err(de::Error::duplicate_field(self.tag));
                }
                items = Some(map.next_value::<List<T>>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(items.unwrap_or_default())
    }
}

/// Declares a newtype around [`List`] that decodes from `{ "<Tag>": ... }`.
///
/// The generated type derefs to a slice, iterates, and serializes back to a
/// one-entry object.
macro_rules! tagged_list {
    ($(#[$meta:meta])* $name:ident, $tag:literal, $item:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name(pub $crate::model::List<$item>);

        impl $name {
            /// The wrapper key holding the items.
            pub const TAG: &'static str = $tag;

            /// Returns the items as a vector.
            #[must_use]
            pub fn into_vec(self) -> Vec<$item> {
                self.0.into_vec()
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = [$item];

            fn deref(&self) -> &[$item] {
                &self.0
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items.into())
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = ::std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = ::std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                $crate::model::collection::deserialize_tagged(deserializer, $tag).map(Self)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use ::serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry($tag, &self.0)?;
                map.end()
            }
        }
    };
}

pub(crate) use tagged_list;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
    pub struct Item {
        #[serde(rename = "Id")]
        id: u32,
    }

    tagged_list!(
        /// Test wrapper.
        Items,
        "Item",
        Item
    );

    #[derive(Debug, Deserialize, Default)]
    #[serde(default)]
    struct Holder {
        #[serde(rename = "Names")]
        names: List<String>,
        #[serde(rename = "Items")]
        items: Items,
    }

    #[test]
    fn test_list_from_single_object() {
        let list: List<Item> = serde_json::from_value(json!({"Id": 1})).unwrap();
        assert_eq!(list.into_vec(), vec![Item { id: 1 }]);
    }

    #[test]
    fn test_list_from_array_keeps_order() {
        let list: List<Item> =
            serde_json::from_value(json!([{"Id": 3}, {"Id": 1}, {"Id": 2}])).unwrap();
        let ids: Vec<u32> = list.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_list_from_empty_values() {
        for value in [json!(""), json!(null), json!([])] {
            let list: List<Item> = serde_json::from_value(value).unwrap();
            assert!(list.is_empty());
        }
    }

    #[test]
    fn test_list_of_strings_from_single_string() {
        let list: List<String> = serde_json::from_value(json!("onOrderCreated")).unwrap();
        assert_eq!(list.into_vec(), vec!["onOrderCreated".to_string()]);
    }

    #[test]
    fn test_list_rejects_wrong_item_shape() {
        let result: Result<List<Item>, _> = serde_json::from_value(json!({"Id": "x"}));
        assert!(result.is_err());
        let result: Result<List<Item>, _> = serde_json::from_value(json!(42));
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_key_is_empty() {
        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.names.is_empty());
        assert!(holder.items.is_empty());
    }

    #[test]
    fn test_tagged_list_shapes() {
        let one: Items = serde_json::from_value(json!({"Item": {"Id": 1}})).unwrap();
        assert_eq!(one.len(), 1);

        let many: Items = serde_json::from_value(json!({"Item": [{"Id": 1}, {"Id": 2}]})).unwrap();
        assert_eq!(many.len(), 2);

        for empty in [json!(""), json!(null), json!({}), json!([]), json!({"Item": ""})] {
            let items: Items = serde_json::from_value(empty).unwrap();
            assert!(items.is_empty());
        }
    }

    #[test]
    fn test_tagged_list_ignores_other_keys() {
        let items: Items =
            serde_json::from_value(json!({"TotalCount": "2", "Item": {"Id": 9}})).unwrap();
        assert_eq!(items[0].id, 9);
    }

    #[test]
    fn test_tagged_list_rejects_non_empty_string() {
        let result: Result<Items, _> = serde_json::from_value(json!("oops"));
        assert!(result.is_err());
    }

    #[test]
    fn test_tagged_list_serializes_as_wrapper() {
        let items = Items::from(vec![Item { id: 1 }]);
        assert_eq!(
            serde_json::to_value(&items).unwrap(),
            json!({"Item": [{"Id": 1}]})
        );
        assert_eq!(Items::TAG, "Item");
    }

    #[test]
    fn test_list_iteration() {
        let list: List<u32> = vec![1, 2, 3].into();
        let doubled: Vec<u32> = (&list).into_iter().map(|n| n * 2).collect();
        assert_eq!(doubled, vec![2, 4, 6]);
        let collected: List<u32> = list.into_iter().collect();
        assert_eq!(collected.len(), 3);
    }
}
