mod common;

use asynccloud::{AsyncPaginatedIterator, Params, SoundCloudError, Track};
use common::{page, scripted_client, track_json, tracks, API, CLIENT_ID};
use futures::StreamExt;
use http_types::Method;
use serde_json::json;

#[test_log::test(tokio::test)]
async fn test_single_page_without_next_href() {
    let (client, transport) = scripted_client();
    transport.get_json("/users/9/tracks", &page(tracks(1..=3), None));

    let titles: Vec<String> = client
        .get_user_tracks(9, Params::new())
        .collect_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.title)
        .collect();

    assert_eq!(titles, vec!["Track 1", "Track 2", "Track 3"]);
    assert_eq!(transport.request_count(), 1);
}

#[test_log::test(tokio::test)]
async fn test_three_page_chain_in_order() {
    let (client, transport) = scripted_client();
    let next_2 = format!("{API}/users/9/tracks?offset=2&limit=2");
    let next_3 = format!("{API}/users/9/tracks?offset=4&limit=2");
    transport
        .get_json("/users/9/tracks", &page(tracks(1..=2), Some(&next_2)))
        .get_json("/users/9/tracks", &page(tracks(3..=4), Some(&next_3)))
        .get_json("/users/9/tracks", &page(tracks(5..=5), None));

    let mut iterator = client.get_user_tracks(9, Params::new().limit(2));
    let ids: Vec<u64> = iterator
        .collect_all()
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(iterator.current_page(), 3);
    assert_eq!(iterator.total_pages(), Some(3));
    assert_eq!(transport.request_count(), 3);
    assert!(iterator.next().await.unwrap().is_none());
    assert_eq!(transport.request_count(), 3);
}

#[test_log::test(tokio::test)]
async fn test_first_item_does_not_fetch_second_page() {
    let (client, transport) = scripted_client();
    let next = format!("{API}/search/tracks?q=moon&offset=2");
    transport
        .get_json("/search/tracks", &page(tracks(1..=2), Some(&next)))
        .get_json("/search/tracks", &page(tracks(3..=4), None));

    let mut iterator = client.search_tracks("moon", Params::new());
    assert_eq!(transport.request_count(), 0);

    let first = iterator.next().await.unwrap().unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(transport.request_count(), 1);

    let taken = client.search_tracks("moon", Params::new()).take(1).await;
    assert_eq!(taken.unwrap().len(), 1);
    assert_eq!(transport.request_count(), 2);
}

#[test_log::test(tokio::test)]
async fn test_cursor_params_with_client_id() {
    let (client, transport) = scripted_client();
    let next = format!("{API}/search?q=moon&offset=20&limit=20&linked_partitioning=1");
    transport
        .get_json("/search", &page(vec![track_json(1, "a")], Some(&next)))
        .get_json("/search", &page(vec![track_json(2, "b")], None));

    let items = client
        .search("moon", Params::new().limit(20))
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items.len(), 2);

    let requests = transport.requests();
    assert_eq!(
        requests[0].query_pairs(),
        vec![
            ("limit".to_string(), "20".to_string()),
            ("q".to_string(), "moon".to_string()),
            ("client_id".to_string(), CLIENT_ID.to_string()),
        ]
    );
    assert_eq!(
        requests[1].query_pairs(),
        vec![
            ("q".to_string(), "moon".to_string()),
            ("offset".to_string(), "20".to_string()),
            ("limit".to_string(), "20".to_string()),
            ("linked_partitioning".to_string(), "1".to_string()),
            ("client_id".to_string(), CLIENT_ID.to_string()),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn test_empty_status_ends_collection() {
    let (client, transport) = scripted_client();
    let next = format!("{API}/tracks/5/related?offset=1");
    transport
        .get_json("/tracks/5/related", &page(tracks(1..=1), Some(&next)))
        .respond(Method::Get, "/tracks/5/related", 500, "oops");

    let related = client
        .get_track_related(5, Params::new())
        .collect_all()
        .await
        .unwrap();
    assert_eq!(related.len(), 1);

    for status in [400, 404, 500] {
        transport.respond(Method::Get, "/users/1/followers", status, "");
        let followers = client
            .get_user_followers(1, Params::new())
            .collect_all()
            .await
            .unwrap();
        assert!(followers.is_empty(), "status {status}");
    }
}

#[test_log::test(tokio::test)]
async fn test_other_statuses_propagate() {
    let (client, transport) = scripted_client();
    transport
        .respond(Method::Get, "/me/play-history/tracks", 401, "")
        .respond(Method::Get, "/stream", 429, "");

    let err = client
        .get_my_history(Params::new())
        .next()
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());

    let err = client.get_my_stream(Params::new()).next().await.unwrap_err();
    assert!(matches!(err, SoundCloudError::Http { status: 429, .. }));
}

#[test_log::test(tokio::test)]
async fn test_missing_collection_is_decode_error() {
    let (client, transport) = scripted_client();
    transport.get_json("/users/1/tracks", &json!({"items": []}));

    let err = client
        .get_user_tracks(1, Params::new())
        .next()
        .await
        .unwrap_err();
    assert!(matches!(err, SoundCloudError::Decode { .. }));
}

#[test_log::test(tokio::test)]
async fn test_bad_item_fails_when_reached() {
    let (client, transport) = scripted_client();
    transport.get_json(
        "/users/1/tracks",
        &page(vec![track_json(1, "fine"), json!({"id": 2})], None),
    );

    let mut iterator = client.get_user_tracks(1, Params::new());
    assert_eq!(iterator.next().await.unwrap().unwrap().id, 1);
    match iterator.next().await.unwrap_err() {
        SoundCloudError::Decode { type_name, .. } => assert_eq!(type_name, "Track"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_into_stream() {
    let (client, transport) = scripted_client();
    let next = format!("{API}/users/3/toptracks?offset=2");
    transport
        .get_json("/users/3/toptracks", &page(tracks(1..=2), Some(&next)))
        .get_json("/users/3/toptracks", &page(tracks(3..=3), None));

    let items: Vec<asynccloud::Result<Track>> = client
        .get_user_popular_tracks(3, Params::new())
        .into_stream()
        .collect()
        .await;

    let ids: Vec<u64> = items.into_iter().map(|t| t.unwrap().id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test_log::test(tokio::test)]
async fn test_path_values_are_encoded() {
    let (client, transport) = scripted_client();
    transport.get_json("/recent-tracks/hip%20hop", &page(tracks(1..=1), None));

    let items = client
        .get_tag_tracks_recent("hip hop", Params::new())
        .collect_all()
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_failed_page_is_retried_not_exhausted() {
    let (client, transport) = scripted_client();
    let next = format!("{API}/users/9/tracks?offset=2");
    transport
        .get_json("/users/9/tracks", &page(tracks(1..=2), Some(&next)))
        .respond(Method::Get, "/users/9/tracks", 429, "")
        .get_json("/users/9/tracks", &page(tracks(3..=3), None));

    let mut iterator = client.get_user_tracks(9, Params::new());
    assert_eq!(iterator.next().await.unwrap().unwrap().id, 1);
    assert_eq!(iterator.next().await.unwrap().unwrap().id, 2);

    let err = iterator.next().await.unwrap_err();
    assert!(matches!(err, SoundCloudError::Http { status: 429, .. }));
    assert_eq!(iterator.total_pages(), None);

    assert_eq!(iterator.next().await.unwrap().unwrap().id, 3);
    assert!(iterator.next().await.unwrap().is_none());

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].query("offset").as_deref(), Some("2"));
    assert_eq!(requests[2].query("offset").as_deref(), Some("2"));
}

#[test_log::test(tokio::test)]
async fn test_failed_first_page_is_retried() {
    let (client, transport) = scripted_client();
    transport
        .fail(Method::Get, "/users/9/tracks", "connection reset")
        .get_json("/users/9/tracks", &page(tracks(1..=1), None));

    let mut iterator = client.get_user_tracks(9, Params::new().limit(1));
    assert!(matches!(
        iterator.next().await.unwrap_err(),
        SoundCloudError::Transport(_)
    ));
    assert_eq!(iterator.collect_all().await.unwrap().len(), 1);
    assert_eq!(transport.requests()[1].query("limit").as_deref(), Some("1"));
}
