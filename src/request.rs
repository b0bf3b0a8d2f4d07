//! Reusable request shapes.
//!
//! Every endpoint is a constant built from one of these shapes, a path
//! template and the record type it decodes into. Calling the constant with a
//! client and [`Params`] executes it: placeholders are filled from the
//! params, the rest go into the query string, and `client_id` is always
//! appended.

use crate::decode::Decode;
use crate::iterator::CollectionIterator;
use crate::{headers, Params, Result, SoundCloudClient, SoundCloudError};
use http_client::Request;
use http_types::Method;
use serde_json::Value;
use std::marker::PhantomData;

/// A request returning at most one record.
///
/// HTTP 400, 404 and 500 yield `Ok(None)`.
#[derive(Debug)]
pub struct SingleRequest<T> {
    path: &'static str,
    method: Method,
    _record: PhantomData<fn() -> T>,
}

impl<T> SingleRequest<T> {
    pub const fn new(path: &'static str) -> Self {
        Self::with_method(path, Method::Get)
    }

    pub const fn with_method(path: &'static str, method: Method) -> Self {
        Self {
            path,
            method,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }
}

impl<T: Decode> SingleRequest<T> {
    /// Execute the request, sending `body` as JSON when given.
    pub async fn call(
        &self,
        client: &SoundCloudClient,
        params: Params,
        body: Option<&Value>,
    ) -> Result<Option<T>> {
        let url = client.api_url(self.path, params)?;
        let mut request = Request::new(self.method, url);
        if let Some(body) = body {
            headers::set_json_body(&mut request, body);
        }

        let Some(reply) = client.execute(request).await? else {
            return Ok(None);
        };
        if let Some(record) = T::from_status(reply.status) {
            return Ok(Some(record));
        }

        let value = parse_body::<T>(&reply.body)?;
        T::decode(&value).map(Some)
    }
}

/// A paginated request, consumed lazily through a [`CollectionIterator`].
#[derive(Debug)]
pub struct CollectionRequest<T> {
    path: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> CollectionRequest<T> {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl<T: Decode> CollectionRequest<T> {
    /// Start iterating. Nothing is fetched until the iterator is polled.
    pub fn call(&self, client: &SoundCloudClient, params: Params) -> CollectionIterator<T> {
        CollectionIterator::new(client.clone(), self.path, params)
    }
}

/// A request returning a whole array in one response.
///
/// HTTP 400, 404 and 500 yield an empty list.
#[derive(Debug)]
pub struct ListRequest<T> {
    path: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> ListRequest<T> {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl<T: Decode> ListRequest<T> {
    pub async fn call(&self, client: &SoundCloudClient, params: Params) -> Result<Vec<T>> {
        let url = client.api_url(self.path, params)?;
        let Some(reply) = client.execute(Request::new(Method::Get, url)).await? else {
            return Ok(Vec::new());
        };

        match parse_body::<T>(&reply.body)? {
            Value::Array(items) => items.iter().map(T::decode).collect(),
            other => Err(SoundCloudError::decode(
                T::type_name(),
                vec![T::type_name().to_string()],
                format!("expected a JSON array, got {}", json_kind(&other)),
            )),
        }
    }
}

/// Parse a response body as JSON, reporting failures against `T`.
pub(crate) fn parse_body<T: Decode>(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| {
        SoundCloudError::decode(
            T::type_name(),
            vec![T::type_name().to_string()],
            format!("response is not valid JSON: {e}"),
        )
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
