//! GraphQL subscriptions for real-time updates
//!
//! Subscriptions allow clients to receive push updates over WebSocket.

use async_graphql::{Context, Subscription};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::events::ReviewEvents;

use super::types::Review;

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Subscribe to review submissions
    ///
    /// Each event carries the full recomputed review list of the place that
    /// was just reviewed. Subscribers that fall behind the channel buffer
    /// skip to the freshest event rather than erroring.
    async fn avaliation_added<'ctx>(
        &self,
        ctx: &Context<'ctx>,
    ) -> impl Stream<Item = Vec<Review>> + 'ctx {
        let events = ctx.data_unchecked::<ReviewEvents>();
        let receiver = events.subscribe();

        BroadcastStream::new(receiver).filter_map(|result| {
            result
                .ok()
                .map(|event| event.reviews.into_iter().map(Review::from).collect())
        })
    }
}
