use http_client::Request;
use serde_json::Value;

/// Client name the SoundCloud web app announces to the GraphQL gateway
const GRAPHQL_CLIENT_NAME: &str = "v2";

/// Add the headers every API request carries
pub fn add_api_headers(request: &mut Request, user_agent: &str, authorization: Option<&str>) {
    let _ = request.insert_header("User-Agent", user_agent);
    let _ = request.insert_header("Accept", "application/json, text/javascript, */*; q=0.01");
    let _ = request.insert_header("Origin", "https://soundcloud.com");
    let _ = request.insert_header("Referer", "https://soundcloud.com/");

    if let Some(authorization) = authorization {
        let _ = request.insert_header("Authorization", authorization);
    }
}

/// Add headers for GraphQL queries
pub fn add_graphql_headers(request: &mut Request) {
    let _ = request.insert_header("Apollographql-Client-Name", GRAPHQL_CLIENT_NAME);
}

/// Add headers for fetching web pages and assets (client id bootstrap)
pub fn add_page_headers(request: &mut Request, user_agent: &str) {
    let _ = request.insert_header("User-Agent", user_agent);
    let _ = request.insert_header(
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    );
    let _ = request.insert_header("Accept-Language", "en-US,en;q=0.5");
}

/// Attach a JSON body
pub fn set_json_body(request: &mut Request, body: &Value) {
    let _ = request.insert_header("Content-Type", "application/json");
    request.set_body(body.to_string());
}
