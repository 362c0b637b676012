//! Bookings screen controller

use super::{Flow, ListState, ScreenContext};
use fm_admin_client::{ApiClient, ClientResult};
use fm_admin_core::{Booking, RecordId, unseen_count};
use futures_util::future::join_all;
use tracing::{debug, info};

/// Lists booking inquiries, marks new ones seen and deletes on request
#[derive(Debug)]
pub struct BookingsScreen {
    ctx: ScreenContext,
    list: ListState<Booking>,
}

impl BookingsScreen {
    /// Empty screen
    #[must_use]
    pub fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            list: ListState::default(),
        }
    }

    /// Current view state
    #[must_use]
    pub const fn list(&self) -> &ListState<Booking> {
        &self.list
    }

    /// Inquiries flagged new in the last fetch
    #[must_use]
    pub fn new_count(&self) -> usize {
        unseen_count(&self.list.items)
    }

    /// Inquiry awaiting delete confirmation, if it is still listed
    #[must_use]
    pub fn pending_item(&self) -> Option<&Booking> {
        let id = self.list.pending_delete.as_deref()?;
        self.list.find(|booking| booking.id == id)
    }

    /// Fetch on screen entry
    pub async fn mount(&mut self) -> Flow {
        self.refresh().await
    }

    /// Fetch the collection, then mark every new inquiry seen
    ///
    /// Marking is best effort: failures are logged and otherwise ignored.
    /// The local copy keeps its `is_new` flags until the next fetch.
    pub async fn refresh(&mut self) -> Flow {
        self.begin_load();
        let result = self.ctx.client.list_bookings().await;
        let fetched = result.is_ok();
        let flow = self.finish_load(result);
        if fetched {
            Self::mark_seen(&self.ctx.client, &self.new_ids()).await;
        }
        flow
    }

    /// Enter the loading state and drop any stale confirmation
    pub fn begin_load(&mut self) {
        self.list.loading = true;
        self.list.pending_delete = None;
    }

    /// Apply a fetch made with [`BookingsScreen::begin_load`] in effect
    pub fn finish_load(&mut self, result: ClientResult<Vec<Booking>>) -> Flow {
        self.list.loading = false;

        match result {
            Ok(bookings) => {
                debug!("Loaded {} booking inquiries", bookings.len());
                self.list.items = bookings;
                Flow::Render
            }
            Err(e) => self
                .ctx
                .fail(&e, "Error", Some("Failed to load bookings"), false),
        }
    }

    /// Identifiers of the inquiries still flagged new
    #[must_use]
    pub fn new_ids(&self) -> Vec<RecordId> {
        self.list
            .items
            .iter()
            .filter(|booking| booking.is_new)
            .map(|booking| booking.id.clone())
            .collect()
    }

    /// Mark `ids` seen in parallel
    ///
    /// Best effort: failures are logged at debug and otherwise ignored.
    pub async fn mark_seen(client: &ApiClient, ids: &[RecordId]) {
        let marks = ids
            .iter()
            .map(|id| async move { (id, client.mark_booking_seen(id).await) });

        for (id, result) in join_all(marks).await {
            if let Err(e) = result {
                debug!("Could not mark inquiry {} seen: {}", id, e);
            }
        }
    }

    /// Ask for confirmation before deleting `id`
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.list.pending_delete = Some(id.into());
    }

    /// Dismiss the confirmation
    pub fn cancel_delete(&mut self) {
        self.list.pending_delete = None;
    }

    /// Delete the inquiry awaiting confirmation; removal is local only
    ///
    /// Nothing happens unless the confirmation was shown for a listed inquiry.
    pub async fn confirm_delete(&mut self) -> Flow {
        if self.pending_item().is_none() {
            self.list.pending_delete = None;
            return Flow::Render;
        }
        let Some(id) = self.list.pending_delete.take() else {
            return Flow::Render;
        };

        match self.ctx.client.delete_booking(&id).await {
            Ok(()) => {
                self.list.remove_where(|booking| booking.id == id);
                info!("Deleted booking inquiry {}", id);
                self.ctx
                    .notifications
                    .success("Booking deleted successfully", None);
                Flow::Render
            }
            Err(e) => self.ctx.fail(&e, "Delete failed", None, true),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::notify::Notifications;
    use crate::screens::UnauthorizedPolicy;
    use fm_admin_client::{ApiClient, MemoryTokenStore, Session};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn screen(server: &MockServer) -> BookingsScreen {
        let session = Session::restore(MemoryTokenStore::with_token("t"));
        let client = ApiClient::new(server.uri(), session);
        BookingsScreen::new(ScreenContext::new(
            client,
            Notifications::new(),
            UnauthorizedPolicy::SignOut,
        ))
    }

    fn inquiries() -> serde_json::Value {
        json!([
            {"_id": "b1", "name": "Asha", "phone": "555-0101", "guests": 40, "isNew": true},
            {"_id": "b2", "name": "Ben", "isNew": true},
            {"_id": "b3", "name": "Chen", "isNew": false}
        ])
    }

    #[tokio::test]
    async fn test_mount_counts_and_marks_new_inquiries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(inquiries()))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path_regex(r"^/contact/b[12]/seen$"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let mut bookings = screen(&server);
        assert_eq!(bookings.mount().await, Flow::Render);

        assert_eq!(bookings.list().items.len(), 3);
        assert_eq!(bookings.new_count(), 2);
    }

    #[tokio::test]
    async fn test_refetch_after_server_clears_flags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(inquiries()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "b1", "name": "Asha", "isNew": false},
                {"_id": "b2", "name": "Ben", "isNew": false},
                {"_id": "b3", "name": "Chen", "isNew": false}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut bookings = screen(&server);
        bookings.mount().await;
        assert_eq!(bookings.new_count(), 2);

        bookings.refresh().await;
        assert_eq!(bookings.new_count(), 0);
    }

    #[tokio::test]
    async fn test_mark_seen_failures_are_silent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(inquiries()))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut bookings = screen(&server);
        assert_eq!(bookings.mount().await, Flow::Render);

        assert_eq!(bookings.list().items.len(), 3);
        assert!(bookings.ctx.notifications.pending().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut bookings = screen(&server);
        bookings.mount().await;

        assert!(bookings.list().items.is_empty());
        let shown = bookings.ctx.notifications.drain();
        assert_eq!(shown[0].title, "Error");
        assert_eq!(shown[0].description.as_deref(), Some("Failed to load bookings"));
    }

    #[tokio::test]
    async fn test_refresh_drops_stale_confirmation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(inquiries()))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut bookings = screen(&server);
        bookings.mount().await;
        bookings.request_delete("b3");
        bookings.refresh().await;
        assert!(bookings.pending_item().is_none());

        // Stale confirmation after the reload sends nothing
        bookings.confirm_delete().await;
        bookings.request_delete("nobody");
        bookings.confirm_delete().await;

        assert_eq!(bookings.list().items.len(), 3);
    }

    #[tokio::test]
    async fn test_confirmed_delete_names_inquirer_and_removes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(200).set_body_json(inquiries()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/contact/b3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut bookings = screen(&server);
        bookings.mount().await;
        bookings.request_delete("b3");
        assert_eq!(bookings.pending_item().unwrap().name, "Chen");

        bookings.confirm_delete().await;
        bookings.confirm_delete().await;

        assert_eq!(bookings.list().items.len(), 2);
        assert_eq!(
            bookings.ctx.notifications.drain()[0].title,
            "Booking deleted successfully"
        );
    }
}
