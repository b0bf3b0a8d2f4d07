mod common;

use asynccloud::{
    AsyncPaginatedIterator, Params, LIKE_INTERACTION_VALUE, REACTION_INTERACTION_TYPE,
};
use common::{comment_json, page, scripted_client, track_json};
use http_types::Method;
use serde_json::{json, Value};

fn interaction(target: &str, likes: u64, liked: bool) -> Value {
    json!({
        "interactionCounts": [
            {"count": likes, "interactionTypeValueUrn": LIKE_INTERACTION_VALUE}
        ],
        "interactionTypeUrn": REACTION_INTERACTION_TYPE,
        "targetUrn": target,
        "userInteraction": if liked { json!(LIKE_INTERACTION_VALUE) } else { Value::Null }
    })
}

/// GraphQL answer where comment `n` has `n` likes and the creator liked the even ones.
fn interactions_for(ids: std::ops::RangeInclusive<u64>) -> Value {
    let urns: Vec<String> = ids.map(|id| format!("soundcloud:comments:{id}")).collect();
    let user: Vec<Value> = urns
        .iter()
        .enumerate()
        .map(|(i, urn)| interaction(urn, urn_id(urn), i == 0))
        .collect();
    let creator: Vec<Value> = urns
        .iter()
        .map(|urn| interaction(urn, urn_id(urn), urn_id(urn) % 2 == 0))
        .collect();
    json!({"data": {"user": user, "creator": creator}})
}

fn urn_id(urn: &str) -> u64 {
    urn.rsplit(':').next().and_then(|id| id.parse().ok()).unwrap_or(0)
}

#[test_log::test(tokio::test)]
async fn test_fifteen_comments_in_two_batches() {
    let (client, transport) = scripted_client();
    client.set_auth_token("tok");
    transport
        .get_json("/tracks/5", &track_json(5, "Commented"))
        .get_json(
            "/tracks/5/comments",
            &page((1..=15).map(comment_json).collect(), None),
        )
        .respond_json(Method::Post, "/graphql", 200, &interactions_for(1..=10))
        .respond_json(Method::Post, "/graphql", 200, &interactions_for(11..=15));

    let results = client
        .get_track_comments_with_interactions(5, 1, Params::new())
        .collect_all()
        .await
        .unwrap();

    let ids: Vec<u64> = results.iter().map(|r| r.comment.id).collect();
    assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    for result in &results {
        assert_eq!(result.likes, result.comment.id);
        assert_eq!(result.liked_by_creator, result.comment.id % 2 == 0);
    }
    assert!(results[0].liked_by_user);
    assert!(results[10].liked_by_user);
    assert!(!results[1].liked_by_user);

    let graphql = transport.requests_to("/graphql");
    assert_eq!(graphql.len(), 2);
    for request in &graphql {
        assert_eq!(request.header("Apollographql-Client-Name"), Some("v2"));
        assert_eq!(request.header("Authorization"), Some("OAuth tok"));
        let body = request.json_body().unwrap();
        assert_eq!(body["operationName"], "UserInteractions");
        assert_eq!(body["variables"]["parentUrn"], "soundcloud:tracks:5");
        assert_eq!(body["variables"]["createdByProfileUrn"], "soundcloud:users:77");
        assert_eq!(
            body["variables"]["interactionTypeUrn"],
            REACTION_INTERACTION_TYPE
        );
    }
    let first_batch = graphql[0].json_body().unwrap();
    assert_eq!(first_batch["variables"]["targetUrns"].as_array().unwrap().len(), 10);
    let second_batch = graphql[1].json_body().unwrap();
    assert_eq!(
        second_batch["variables"]["targetUrns"],
        json!([
            "soundcloud:comments:11",
            "soundcloud:comments:12",
            "soundcloud:comments:13",
            "soundcloud:comments:14",
            "soundcloud:comments:15"
        ])
    );

    let comments_request = &transport.requests_to("/tracks/5/comments")[0];
    assert_eq!(comments_request.query("threaded").as_deref(), Some("1"));
}

#[test_log::test(tokio::test)]
async fn test_rows_matched_by_target_urn() {
    let (client, transport) = scripted_client();
    let reversed = json!({"data": {
        "user": [interaction("soundcloud:comments:2", 7, false), interaction("soundcloud:comments:1", 3, true)],
        "creator": []
    }});
    transport
        .get_json("/tracks/5", &track_json(5, "Commented"))
        .get_json("/tracks/5/comments", &page(vec![comment_json(1), comment_json(2)], None))
        .respond_json(Method::Post, "/graphql", 200, &reversed);

    let results = client
        .get_track_comments_with_interactions(5, 0, Params::new())
        .collect_all()
        .await
        .unwrap();

    assert_eq!(results[0].likes, 3);
    assert!(results[0].liked_by_user);
    assert_eq!(results[1].likes, 7);
    assert!(!results[1].liked_by_creator);
}

#[test_log::test(tokio::test)]
async fn test_missing_track_ends_iteration() {
    let (client, transport) = scripted_client();
    transport.respond(Method::Get, "/tracks/5", 404, "");

    let mut iterator = client.get_track_comments_with_interactions(5, 0, Params::new());
    assert!(iterator.next().await.unwrap().is_none());
    assert_eq!(transport.request_count(), 1);
}

#[test_log::test(tokio::test)]
async fn test_empty_interaction_answer_ends_iteration() {
    let (client, transport) = scripted_client();
    transport
        .get_json("/tracks/5", &track_json(5, "Commented"))
        .get_json("/tracks/5/comments", &page(vec![comment_json(1)], None))
        .respond(Method::Post, "/graphql", 500, "");

    let results = client
        .get_track_comments_with_interactions(5, 0, Params::new())
        .collect_all()
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_graphql_without_data_is_decode_error() {
    let (client, transport) = scripted_client();
    transport
        .get_json("/tracks/5", &track_json(5, "Commented"))
        .get_json("/tracks/5/comments", &page(vec![comment_json(1)], None))
        .respond_json(Method::Post, "/graphql", 200, &json!({"errors": [{"message": "nope"}]}));

    let err = client
        .get_track_comments_with_interactions(5, 0, Params::new())
        .next()
        .await
        .unwrap_err();
    assert!(matches!(err, asynccloud::SoundCloudError::Decode { .. }));
}

#[test_log::test(tokio::test)]
async fn test_comment_page_failure_keeps_fetched_comments() {
    let (client, transport) = scripted_client();
    let next = "https://api-v2.soundcloud.com/tracks/5/comments?offset=5";
    transport
        .get_json("/tracks/5", &track_json(5, "Commented"))
        .get_json(
            "/tracks/5/comments",
            &page((1..=5).map(comment_json).collect(), Some(next)),
        )
        .respond(Method::Get, "/tracks/5/comments", 429, "")
        .get_json(
            "/tracks/5/comments",
            &page((6..=10).map(comment_json).collect(), None),
        )
        .respond_json(Method::Post, "/graphql", 200, &interactions_for(1..=10));

    let mut iterator = client.get_track_comments_with_interactions(5, 0, Params::new());
    let err = iterator.next().await.unwrap_err();
    assert!(matches!(
        err,
        asynccloud::SoundCloudError::Http { status: 429, .. }
    ));
    assert!(transport.requests_to("/graphql").is_empty());

    let ids: Vec<u64> = iterator
        .collect_all()
        .await
        .unwrap()
        .iter()
        .map(|r| r.comment.id)
        .collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    let graphql = transport.requests_to("/graphql");
    assert_eq!(graphql.len(), 1);
    assert_eq!(
        graphql[0].json_body().unwrap()["variables"]["targetUrns"]
            .as_array()
            .unwrap()
            .len(),
        10
    );
}

#[test_log::test(tokio::test)]
async fn test_interaction_failure_keeps_batch() {
    let (client, transport) = scripted_client();
    transport
        .get_json("/tracks/5", &track_json(5, "Commented"))
        .get_json("/tracks/5/comments", &page(vec![comment_json(1), comment_json(2)], None))
        .respond(Method::Post, "/graphql", 503, "")
        .respond_json(Method::Post, "/graphql", 200, &interactions_for(1..=2));

    let mut iterator = client.get_track_comments_with_interactions(5, 0, Params::new());
    assert!(iterator.next().await.is_err());

    let results = iterator.collect_all().await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1].likes, 2);
    assert_eq!(transport.requests_to("/tracks/5/comments").len(), 1);
}
