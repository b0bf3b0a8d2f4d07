//! Client id bootstrap.
//!
//! The SoundCloud web app embeds its client id in one of the asset bundles
//! referenced from the landing page. Fetch the page, find the bundle, fetch
//! it and pull the id out.

use crate::{headers, Result, SoundCloudClient, SoundCloudError};
use http_client::Request;
use http_types::{Method, Url};
use regex::Regex;
use scraper::{Html, Selector};

const ASSET_SCRIPT_PATTERN: &str = r"^https://a-v2\.sndcdn\.com/assets/0-[^.]+\.js$";
const CLIENT_ID_PATTERN: &str = r#"client_id:"([^"]+)""#;

/// Scrape a fresh client id from the web app.
pub async fn generate_client_id(client: &SoundCloudClient) -> Result<String> {
    let page = fetch(client, client.web_url()).await?;
    let script_url = find_asset_script(&page)?;
    log::debug!("Looking for client id in {script_url}");

    let script = fetch(client, &script_url).await?;
    extract_client_id(&script).ok_or_else(|| {
        SoundCloudError::ClientIdGeneration(format!(
            "could not find client_id in script '{script_url}'"
        ))
    })
}

/// First asset bundle referenced by a `<script src>` tag of the landing page.
pub fn find_asset_script(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script[src]")
        .map_err(|e| SoundCloudError::ClientIdGeneration(format!("bad selector: {e}")))?;
    let pattern = Regex::new(ASSET_SCRIPT_PATTERN)
        .map_err(|e| SoundCloudError::ClientIdGeneration(e.to_string()))?;

    document
        .select(&selector)
        .filter_map(|script| script.value().attr("src"))
        .find(|src| pattern.is_match(src))
        .map(str::to_string)
        .ok_or_else(|| SoundCloudError::ClientIdGeneration("no asset scripts found".to_string()))
}

/// The client id embedded in an asset bundle.
pub fn extract_client_id(script: &str) -> Option<String> {
    Regex::new(CLIENT_ID_PATTERN)
        .ok()?
        .captures(script)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

async fn fetch(client: &SoundCloudClient, url: &str) -> Result<String> {
    let url = Url::parse(url)
        .map_err(|e| SoundCloudError::ClientIdGeneration(format!("invalid URL '{url}': {e}")))?;
    let mut request = Request::new(Method::Get, url.clone());
    headers::add_page_headers(&mut request, client.user_agent());

    let mut response = client.send(request).await.map_err(|e| match e {
        SoundCloudError::Configuration(_) => e,
        other => SoundCloudError::ClientIdGeneration(format!("failed to fetch {url}: {other}")),
    })?;

    if !response.status().is_success() {
        return Err(SoundCloudError::ClientIdGeneration(format!(
            "{url} answered HTTP {}",
            response.status()
        )));
    }

    response
        .body_string()
        .await
        .map_err(|e| SoundCloudError::ClientIdGeneration(format!("failed to read {url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_asset_script() {
        let html = r#"<html><head>
            <script crossorigin src="https://a-v2.sndcdn.com/assets/49-4786a1.js"></script>
            <script crossorigin src="https://a-v2.sndcdn.com/assets/0-7f1c2b.js"></script>
            <script crossorigin src="https://a-v2.sndcdn.com/assets/0-99aa00.js"></script>
        </head></html>"#;
        assert_eq!(
            find_asset_script(html).unwrap(),
            "https://a-v2.sndcdn.com/assets/0-7f1c2b.js"
        );
    }

    #[test]
    fn test_missing_asset_script() {
        let err = find_asset_script("<html><body>maintenance</body></html>").unwrap_err();
        assert!(matches!(err, SoundCloudError::ClientIdGeneration(_)));
    }

    #[test]
    fn test_extract_client_id() {
        let script = r#"webpackJsonp([0],{x:function(){var e={client_id:"aBcD1234",env:"production"}}})"#;
        assert_eq!(extract_client_id(script).as_deref(), Some("aBcD1234"));
        assert_eq!(extract_client_id("var nothing = 1;"), None);
    }
}
