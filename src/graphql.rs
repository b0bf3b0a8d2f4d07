//! GraphQL request shape and the queries the client issues.

use crate::decode::Decode;
use crate::request::parse_body;
use crate::types::{UserInteractionsResult, UserInteractionsVariables};
use crate::{headers, Result, SoundCloudClient, SoundCloudError};
use http_client::Request;
use http_types::Method;
use serde::Serialize;
use serde_json::{json, Value};
use std::marker::PhantomData;

/// A named GraphQL operation with a fixed query document.
///
/// Variables are supplied per call; the `data` field of the answer is
/// decoded into `T`. HTTP 400, 404 and 500 yield `Ok(None)`.
#[derive(Debug)]
pub struct GraphQlRequest<V, T> {
    operation_name: &'static str,
    query: &'static str,
    _types: PhantomData<fn(V) -> T>,
}

impl<V, T> GraphQlRequest<V, T> {
    pub const fn new(operation_name: &'static str, query: &'static str) -> Self {
        Self {
            operation_name,
            query,
            _types: PhantomData,
        }
    }

    pub fn operation_name(&self) -> &'static str {
        self.operation_name
    }

    pub fn query(&self) -> &'static str {
        self.query
    }
}

impl<V: Serialize, T: Decode> GraphQlRequest<V, T> {
    pub async fn call(&self, client: &SoundCloudClient, variables: &V) -> Result<Option<T>> {
        let variables = serde_json::to_value(variables).map_err(|e| {
            SoundCloudError::Configuration(format!(
                "cannot serialize variables of {}: {e}",
                self.operation_name
            ))
        })?;
        let body = json!({
            "operationName": self.operation_name,
            "query": self.query,
            "variables": variables,
        });

        let mut request = Request::new(Method::Post, client.graphql_endpoint()?);
        headers::add_graphql_headers(&mut request);
        headers::set_json_body(&mut request, &body);

        log::debug!("GraphQL {}", self.operation_name);
        let Some(reply) = client.execute(request).await? else {
            return Ok(None);
        };

        let mut answer = parse_body::<T>(&reply.body)?;
        match answer.get_mut("data").map(Value::take) {
            Some(data) if !data.is_null() => T::decode(&data).map(Some),
            _ => Err(SoundCloudError::decode(
                T::type_name(),
                vec![T::type_name().to_string()],
                format!("{} answer has no `data` field", self.operation_name),
            )),
        }
    }
}

/// Reaction state of a batch of comments, as seen by the user and by the
/// track's creator.
pub const USER_INTERACTIONS: GraphQlRequest<UserInteractionsVariables, UserInteractionsResult> =
    GraphQlRequest::new("UserInteractions", USER_INTERACTIONS_QUERY);

const USER_INTERACTIONS_QUERY: &str = r#"query UserInteractions(
   $parentUrn: String!
   $interactionTypeUrn: String!
   $targetUrns: [String!]!
   $createdByProfileUrn: String
) {
   user: userInteractions(
       parentUrn: $parentUrn
       interactionTypeUrn: $interactionTypeUrn
       targetUrns: $targetUrns
   ) {
       interactionCounts {
           count
           interactionTypeValueUrn
       }
       interactionTypeUrn
       targetUrn
       userInteraction
   }

   creator: userInteractions(
       parentUrn: $parentUrn
       interactionTypeUrn: $interactionTypeUrn
       targetUrns: $targetUrns
       createdByProfileUrn: $createdByProfileUrn
   ) {
       interactionCounts {
           count
           interactionTypeValueUrn
       }
       interactionTypeUrn
       targetUrn
       userInteraction
   }
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_declares_both_aliases() {
        assert_eq!(USER_INTERACTIONS.operation_name(), "UserInteractions");
        assert!(USER_INTERACTIONS.query().contains("user: userInteractions("));
        assert!(USER_INTERACTIONS.query().contains("creator: userInteractions("));
        assert!(USER_INTERACTIONS
            .query()
            .contains("createdByProfileUrn: $createdByProfileUrn"));
    }
}
