use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};
use tracing::info;

use crate::routes::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/events
///
/// Server-sent stream of typed change notifications for one user.
pub async fn handle_events(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("Change feed opened for user {}", params.user_id);

    let stream = state.events.subscribe(params.user_id).map(|change| {
        let event = Event::default()
            .event("change")
            .json_data(&change)
            .unwrap_or_else(|_| Event::default().event("change"));
        Ok(event)
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
