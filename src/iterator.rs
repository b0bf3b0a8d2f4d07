use crate::comment::BasicComment;
use crate::decode::Decode;
use crate::graphql::USER_INTERACTIONS;
use crate::request::{json_kind, parse_body};
use crate::types::{
    CommentWithInteractions, UserInteraction, UserInteractionsResult, UserInteractionsVariables,
    LIKE_INTERACTION_VALUE, REACTION_INTERACTION_TYPE,
};
use crate::{Params, Result, SoundCloudClient, SoundCloudError};

use async_trait::async_trait;
use futures::Stream;
use http_client::Request;
use http_types::Method;
use serde_json::Value;
use std::marker::PhantomData;

/// Number of comments enriched per GraphQL query.
pub const COMMENT_BATCH_SIZE: usize = 10;

/// Async iterator trait for paginated SoundCloud data.
///
/// Pages are fetched on demand: a page is requested only once every item of
/// the previous page has been handed out, so stopping early never costs an
/// extra request.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// This method automatically handles pagination, fetching new pages as needed.
    /// Returns `None` when there are no more items available.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - Network or decoding error occurred
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    ///
    /// **Warning**: This method will fetch ALL remaining pages, which could be
    /// many thousands of items for popular tracks or users. Use
    /// [`take`](Self::take) for bounded collection.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    ///
    /// # Arguments
    ///
    /// * `n` - Maximum number of items to collect
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of pages fetched so far.
    fn current_page(&self) -> u32;

    /// Get the total number of pages, if known.
    ///
    /// SoundCloud cursors do not announce a total, so this is `None` unless
    /// the iterator has finished.
    fn total_pages(&self) -> Option<u32> {
        None
    }
}

/// Adapt a paginated iterator into a [`Stream`].
///
/// The stream ends after the first error.
pub fn into_stream<T, I>(iterator: I) -> impl Stream<Item = Result<T>>
where
    I: AsyncPaginatedIterator<T>,
{
    futures::stream::unfold(Some(iterator), |state| async move {
        let mut iterator = state?;
        match AsyncPaginatedIterator::<T>::next(&mut iterator).await {
            Ok(Some(item)) => Some((Ok(item), Some(iterator))),
            Ok(None) => None,
            Err(e) => Some((Err(e), None)),
        }
    })
}

// ================================================================================================
// COLLECTIONS
// ================================================================================================

enum Cursor {
    Start { path: &'static str, params: Params },
    Next(String),
    Done,
}

/// Iterator over a `{collection, next_href}` endpoint.
///
/// Follows `next_href` until a page has none or the API answers with an
/// empty status (400, 404, 500). Cursors are followed once and discarded;
/// the iterator cannot be restarted.
pub struct CollectionIterator<T> {
    client: SoundCloudClient,
    cursor: Cursor,
    path: &'static str,
    buffer: Vec<Value>,
    pages_fetched: u32,
    _record: PhantomData<fn() -> T>,
}

impl<T: Decode> CollectionIterator<T> {
    pub(crate) fn new(client: SoundCloudClient, path: &'static str, params: Params) -> Self {
        Self {
            client,
            cursor: Cursor::Start { path, params },
            path,
            buffer: Vec::new(),
            pages_fetched: 0,
            _record: PhantomData,
        }
    }

    /// Convert into a [`Stream`] of records.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        into_stream(self)
    }

    async fn fetch_page(&mut self, request: Request) -> Result<()> {
        let Some(reply) = self.client.execute(request).await? else {
            log::debug!("Collection {} ended on an empty status", self.path);
            self.cursor = Cursor::Done;
            return Ok(());
        };

        let mut page = parse_body::<T>(&reply.body)?;
        let collection = match page.get_mut("collection").map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(SoundCloudError::decode(
                    T::type_name(),
                    vec![T::type_name().to_string()],
                    format!("`collection` is {}, expected an array", json_kind(&other)),
                ))
            }
            None => {
                return Err(SoundCloudError::decode(
                    T::type_name(),
                    vec![T::type_name().to_string()],
                    "response has no `collection` field",
                ))
            }
        };

        self.pages_fetched += 1;
        log::debug!(
            "Fetched page {} of {}: {} items",
            self.pages_fetched,
            self.path,
            collection.len()
        );

        self.cursor = match page
            .get("next_href")
            .and_then(Value::as_str)
            .filter(|href| !href.is_empty())
        {
            Some(next_href) => Cursor::Next(next_href.to_string()),
            None => Cursor::Done,
        };

        self.buffer = collection;
        self.buffer.reverse();
        Ok(())
    }
}

#[async_trait(?Send)]
impl<T: Decode> AsyncPaginatedIterator<T> for CollectionIterator<T> {
    async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if let Some(value) = self.buffer.pop() {
                return T::decode(&value).map(Some);
            }

            // The cursor only advances once a page was read, so a failed
            // fetch is retried by the next call.
            let url = match &self.cursor {
                Cursor::Start { path, params } => self.client.api_url(path, params.clone())?,
                Cursor::Next(next_href) => self.client.cursor_url(next_href)?,
                Cursor::Done => return Ok(None),
            };
            self.fetch_page(Request::new(Method::Get, url)).await?;
        }
    }

    fn current_page(&self) -> u32 {
        self.pages_fetched
    }

    fn total_pages(&self) -> Option<u32> {
        match self.cursor {
            Cursor::Done => Some(self.pages_fetched),
            _ => None,
        }
    }
}

// ================================================================================================
// COMMENTS WITH INTERACTIONS
// ================================================================================================

/// Iterator over a track's comments enriched with reaction counts.
///
/// Comments are pulled in batches of [`COMMENT_BATCH_SIZE`]; each batch costs
/// one `UserInteractions` GraphQL query. Comment order is preserved.
pub struct CommentsWithInteractions {
    client: SoundCloudClient,
    track_id: u64,
    threaded: u8,
    params: Option<Params>,
    comments: Option<CollectionIterator<BasicComment>>,
    parent: Option<(String, String)>,
    /// Comments pulled for the batch being assembled, kept across failures.
    pending: Vec<BasicComment>,
    comments_exhausted: bool,
    buffer: Vec<CommentWithInteractions>,
    batches: u32,
    finished: bool,
}

impl CommentsWithInteractions {
    pub(crate) fn new(client: SoundCloudClient, track_id: u64, threaded: u8, params: Params) -> Self {
        Self {
            client,
            track_id,
            threaded,
            params: Some(params),
            comments: None,
            parent: None,
            pending: Vec::new(),
            comments_exhausted: false,
            buffer: Vec::new(),
            batches: 0,
            finished: false,
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<CommentWithInteractions>> {
        into_stream(self)
    }

    async fn fetch_batch(&mut self) -> Result<()> {
        if self.comments.is_none() {
            let Some(track) = self.client.get_track(self.track_id).await? else {
                log::debug!("Track {} not found", self.track_id);
                self.finished = true;
                return Ok(());
            };
            self.parent = Some((track.urn, track.user.urn));
            let params = self.params.take().unwrap_or_default();
            self.comments = Some(
                self.client
                    .get_track_comments(self.track_id, self.threaded, params),
            );
        }

        let (Some(comments), Some((track_urn, creator_urn))) =
            (self.comments.as_mut(), self.parent.as_ref())
        else {
            self.finished = true;
            return Ok(());
        };

        while !self.comments_exhausted && self.pending.len() < COMMENT_BATCH_SIZE {
            match comments.next().await? {
                Some(comment) => self.pending.push(comment),
                None => self.comments_exhausted = true,
            }
        }
        if self.pending.is_empty() {
            self.finished = true;
            return Ok(());
        }

        let variables = UserInteractionsVariables {
            created_by_profile_urn: creator_urn.clone(),
            interaction_type_urn: REACTION_INTERACTION_TYPE.to_string(),
            parent_urn: track_urn.clone(),
            target_urns: self.pending.iter().map(|c| c.urn().to_string()).collect(),
        };

        let Some(interactions) = USER_INTERACTIONS.call(&self.client, &variables).await? else {
            log::debug!("Interaction query for track {} came back empty", self.track_id);
            self.finished = true;
            return Ok(());
        };
        let chunk = std::mem::take(&mut self.pending);

        self.batches += 1;
        log::debug!(
            "Enriched batch {} of track {} ({} comments)",
            self.batches,
            self.track_id,
            chunk.len()
        );
        if interactions.user.len() < chunk.len() || interactions.creator.len() < chunk.len() {
            log::warn!(
                "Interaction query returned {}/{} rows for {} comments",
                interactions.user.len(),
                interactions.creator.len(),
                chunk.len()
            );
        }

        self.buffer = enrich(chunk, &interactions);
        self.buffer.reverse();
        Ok(())
    }
}

#[async_trait(?Send)]
impl AsyncPaginatedIterator<CommentWithInteractions> for CommentsWithInteractions {
    async fn next(&mut self) -> Result<Option<CommentWithInteractions>> {
        loop {
            if let Some(item) = self.buffer.pop() {
                return Ok(Some(item));
            }
            if self.finished {
                return Ok(None);
            }
            self.fetch_batch().await?;
        }
    }

    fn current_page(&self) -> u32 {
        self.batches
    }
}

/// Pair each comment with its interaction rows.
///
/// Rows are matched by `targetUrn`, falling back to the row at the same
/// position.
pub(crate) fn enrich(
    chunk: Vec<BasicComment>,
    interactions: &UserInteractionsResult,
) -> Vec<CommentWithInteractions> {
    chunk
        .into_iter()
        .enumerate()
        .map(|(index, comment)| {
            let user = find_row(&interactions.user, comment.urn(), index);
            let creator = find_row(&interactions.creator, comment.urn(), index);
            CommentWithInteractions {
                likes: user.map_or(0, |row| row.count_of(LIKE_INTERACTION_VALUE)),
                liked_by_creator: creator.is_some_and(|row| row.is(LIKE_INTERACTION_VALUE)),
                liked_by_user: user.is_some_and(|row| row.is(LIKE_INTERACTION_VALUE)),
                comment,
            }
        })
        .collect()
}

fn find_row<'a>(
    rows: &'a [UserInteraction],
    urn: &str,
    index: usize,
) -> Option<&'a UserInteraction> {
    rows.iter()
        .find(|row| row.target_urn == urn)
        .or_else(|| rows.get(index))
}
