//! Structural decoding of JSON payloads into typed records.
//!
//! Every record the API can return implements [`Decode`]. Plain records are
//! decoded with serde; union results ("a track, a playlist or a user") are
//! enums declared with [`one_of!`](crate::one_of) that try each candidate in
//! declaration order and keep the first that matches.

use crate::{Result, SoundCloudError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A type that can be built from a decoded JSON value.
pub trait Decode: Sized {
    /// Name used in decode errors.
    fn type_name() -> &'static str;

    /// Attempt to build `Self` from `value`.
    fn decode(value: &Value) -> Result<Self>;

    /// Build `Self` from the response status alone, skipping the body.
    ///
    /// Only responses that carry no meaningful body (such as a delete)
    /// return `Some` here.
    fn from_status(_status: u16) -> Option<Self> {
        None
    }
}

/// One candidate of an ordered union decode.
pub struct Candidate<T> {
    name: &'static str,
    build: fn(&Value) -> Result<T>,
}

impl<T> Candidate<T> {
    pub const fn new(name: &'static str, build: fn(&Value) -> Result<T>) -> Self {
        Self { name, build }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Try `candidates` in order and return the first successful construction.
///
/// Order matters: when payload shapes overlap, list the more specific type
/// first.
pub fn first_match<T>(type_name: &str, value: &Value, candidates: &[Candidate<T>]) -> Result<T> {
    let mut reason = String::from("no candidate types declared");
    for candidate in candidates {
        match (candidate.build)(value) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => {
                log::trace!("{type_name}: candidate {} rejected: {e}", candidate.name);
                reason = e.to_string();
            }
        }
    }
    Err(SoundCloudError::decode(
        type_name,
        candidates.iter().map(|c| c.name.to_string()).collect(),
        reason,
    ))
}

/// Deserialize a record from a borrowed value.
pub fn from_json<T: DeserializeOwned>(value: &Value) -> std::result::Result<T, serde_json::Error> {
    T::deserialize(value)
}

impl Decode for Value {
    fn type_name() -> &'static str {
        "Value"
    }

    fn decode(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

/// Implement [`Decode`] for serde records.
#[macro_export]
macro_rules! impl_decode {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::decode::Decode for $ty {
                fn type_name() -> &'static str {
                    stringify!($ty)
                }

                fn decode(value: &$crate::__private::serde_json::Value) -> $crate::Result<Self> {
                    $crate::decode::from_json(value).map_err(|e| {
                        $crate::SoundCloudError::Decode {
                            type_name: stringify!($ty).to_string(),
                            attempted: vec![stringify!($ty).to_string()],
                            reason: e.to_string(),
                        }
                    })
                }
            }
        )+
    };
}

/// Declare an enum whose variants are decoded in declaration order.
///
/// The enum also gets a serde `Deserialize` impl backed by the same ordered
/// decode, so it can be nested inside other records. Do not derive
/// `Deserialize` on it yourself.
///
/// ```rust
/// use asynccloud::{one_of, Decode, Track, User};
///
/// one_of! {
///     #[derive(Debug)]
///     pub enum Owner {
///         User(User),
///         Track(Track),
///     }
/// }
///
/// let value = serde_json::json!({"nothing": "useful"});
/// assert!(Owner::decode(&value).is_err());
/// ```
#[macro_export]
macro_rules! one_of {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($inner:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant($inner), )+
        }

        impl $crate::decode::Decode for $name {
            fn type_name() -> &'static str {
                stringify!($name)
            }

            fn decode(value: &$crate::__private::serde_json::Value) -> $crate::Result<Self> {
                $crate::decode::first_match(
                    stringify!($name),
                    value,
                    &[
                        $(
                            $crate::decode::Candidate::new(stringify!($variant), |v| {
                                <$inner as $crate::decode::Decode>::decode(v).map($name::$variant)
                            }),
                        )+
                    ],
                )
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                <$name as $crate::decode::Decode>::decode(&value)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}
