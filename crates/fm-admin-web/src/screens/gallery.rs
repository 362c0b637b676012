//! Gallery screen controller

use super::{Flow, ListState, ScreenContext};
use fm_admin_client::{ClientResult, ImageUpload};
use fm_admin_core::GalleryItem;
use tracing::{debug, info};

/// Lists, uploads and deletes gallery images
#[derive(Debug)]
pub struct GalleryScreen {
    ctx: ScreenContext,
    list: ListState<GalleryItem>,
}

impl GalleryScreen {
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
    pub const fn list(&self) -> &ListState<GalleryItem> {
        &self.list
    }

    /// Record awaiting delete confirmation, if it is still listed
    #[must_use]
    pub fn pending_item(&self) -> Option<&GalleryItem> {
        let id = self.list.pending_delete.as_deref()?;
        self.list.find(|item| item.id == id)
    }

    /// Fetch the collection; on failure the previous list is kept
    pub async fn mount(&mut self) -> Flow {
        self.begin_load();
        let result = self.ctx.client.list_gallery().await;
        self.finish_load(result)
    }

    /// Enter the loading state and drop any stale confirmation
    pub fn begin_load(&mut self) {
        self.list.loading = true;
        self.list.pending_delete = None;
    }

    /// Apply a fetch made with [`GalleryScreen::begin_load`] in effect
    pub fn finish_load(&mut self, result: ClientResult<Vec<GalleryItem>>) -> Flow {
        self.list.loading = false;

        match result {
            Ok(items) => {
                debug!("Loaded {} gallery images", items.len());
                self.list.items = items;
                Flow::Render
            }
            Err(e) => self
                .ctx
                .fail(&e, "Error", Some("Failed to load images."), false),
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

    /// Delete the record awaiting confirmation
    ///
    /// On success the record is removed locally without re-fetching. Nothing
    /// happens unless the confirmation was shown for a listed record.
    pub async fn confirm_delete(&mut self) -> Flow {
        if self.pending_item().is_none() {
            self.list.pending_delete = None;
            return Flow::Render;
        }
        let Some(id) = self.list.pending_delete.take() else {
            return Flow::Render;
        };

        match self.ctx.client.delete_gallery_image(&id).await {
            Ok(()) => {
                self.list.remove_where(|item| item.id == id);
                info!("Deleted gallery image {}", id);
                self.ctx.notifications.success("Image deleted", None);
                Flow::Render
            }
            Err(e) => self.ctx.fail(&e, "Delete failed", None, true),
        }
    }

    /// Upload one image, then re-fetch the collection
    ///
    /// An empty selection is ignored.
    pub async fn upload(&mut self, upload: ImageUpload) -> Flow {
        if upload.is_empty() {
            debug!("No file selected, ignoring upload");
            return Flow::Render;
        }

        let file_name = upload.file_name.clone();
        match self.ctx.client.upload_gallery_image(upload).await {
            Ok(()) => {
                info!("Uploaded gallery image {}", file_name);
                self.ctx
                    .notifications
                    .success("Image uploaded successfully!", None);
                self.mount().await
            }
            Err(e) => self.ctx.fail(&e, "Upload failed", None, true),
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::guard::Route;
    use crate::notify::Notifications;
    use crate::screens::UnauthorizedPolicy;
    use fm_admin_client::{ApiClient, MemoryTokenStore, Session};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn screen(server: &MockServer, policy: UnauthorizedPolicy) -> GalleryScreen {
        let session = Session::restore(MemoryTokenStore::with_token("t"));
        let client = ApiClient::new(server.uri(), session);
        GalleryScreen::new(ScreenContext::new(client, Notifications::new(), policy))
    }

    async fn mount_listing(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/gallery"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    async fn gallery_fetches(server: &MockServer) -> usize {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|request| request.method.as_str() == "GET")
            .count()
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_locally_without_refetch() {
        let server = MockServer::start().await;
        mount_listing(
            &server,
            json!([{"_id": "1", "url": "https://cdn/a.jpg", "caption": "A", "createdAt": "2024-01-01"}]),
        )
        .await;
        Mock::given(method("DELETE"))
            .and(path("/gallery/1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        assert_eq!(gallery.mount().await, Flow::Render);
        assert_eq!(gallery.list().items.len(), 1);

        gallery.request_delete("1");
        assert_eq!(gallery.pending_item().unwrap().title(), "A");
        assert_eq!(gallery.confirm_delete().await, Flow::Render);

        assert!(gallery.list().items.is_empty());
        assert!(gallery.list().pending_delete.is_none());
        assert_eq!(gallery_fetches(&server).await, 1);
        assert_eq!(gallery.ctx.notifications.drain()[0].title, "Image deleted");
    }

    #[tokio::test]
    async fn test_repeated_confirmation_is_harmless() {
        let server = MockServer::start().await;
        mount_listing(
            &server,
            json!([
                {"_id": "1", "url": "u1", "createdAt": "2024-01-01"},
                {"_id": "2", "url": "u2", "createdAt": "2024-01-02"}
            ]),
        )
        .await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        gallery.mount().await;

        gallery.request_delete("1");
        gallery.confirm_delete().await;
        // Nothing pending: no request, no change
        gallery.confirm_delete().await;
        // Already removed on the server side too
        gallery.request_delete("1");
        gallery.confirm_delete().await;

        let ids: Vec<_> = gallery.list().items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_state() {
        let server = MockServer::start().await;
        mount_listing(&server, json!([{"_id": "1", "url": "u", "createdAt": "2024-01-01"}])).await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Storage down"})))
            .mount(&server)
            .await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        gallery.mount().await;
        gallery.request_delete("1");
        gallery.confirm_delete().await;

        assert_eq!(gallery.list().items.len(), 1);
        let shown = gallery.ctx.notifications.drain();
        assert_eq!(shown[0].title, "Delete failed");
        assert_eq!(shown[0].description.as_deref(), Some("Storage down"));
    }

    #[tokio::test]
    async fn test_reload_drops_stale_confirmation() {
        let server = MockServer::start().await;
        mount_listing(&server, json!([{"_id": "1", "url": "u", "createdAt": "2024-01-01"}])).await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        gallery.mount().await;
        gallery.request_delete("1");
        assert!(gallery.pending_item().is_some());

        gallery.mount().await;

        assert!(gallery.list().pending_delete.is_none());
        assert!(gallery.pending_item().is_none());
    }

    #[tokio::test]
    async fn test_confirm_without_listed_record_sends_nothing() {
        let server = MockServer::start().await;
        mount_listing(&server, json!([{"_id": "1", "url": "u", "createdAt": "2024-01-01"}])).await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        // Not loaded yet, so no modal could have been shown
        gallery.request_delete("1");
        assert_eq!(gallery.confirm_delete().await, Flow::Render);

        gallery.mount().await;
        gallery.request_delete("ghost");
        assert_eq!(gallery.confirm_delete().await, Flow::Render);

        assert_eq!(gallery.list().items.len(), 1);
        assert!(gallery.list().pending_delete.is_none());
        assert!(gallery.ctx.notifications.drain().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_delete_clears_pending() {
        let server = MockServer::start().await;
        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);

        gallery.request_delete("9");
        gallery.cancel_delete();

        assert!(gallery.list().pending_delete.is_none());
        assert!(gallery.pending_item().is_none());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_list_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gallery"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        assert_eq!(gallery.mount().await, Flow::Render);

        assert!(gallery.list().items.is_empty());
        assert!(!gallery.list().loading);
        let shown = gallery.ctx.notifications.drain();
        assert_eq!(shown[0].title, "Error");
        assert_eq!(shown[0].description.as_deref(), Some("Failed to load images."));
    }

    #[tokio::test]
    async fn test_upload_success_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/gallery"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "n"})))
            .expect(1)
            .mount(&server)
            .await;
        mount_listing(&server, json!([{"_id": "n", "url": "u", "createdAt": "2024-03-01"}])).await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        let upload = ImageUpload {
            file_name: "cake.jpg".to_string(),
            content_type: Some("image/jpeg".to_string()),
            bytes: vec![0xFF, 0xD8],
        };

        assert_eq!(gallery.upload(upload).await, Flow::Render);
        assert_eq!(gallery.list().items.len(), 1);
        assert_eq!(gallery_fetches(&server).await, 1);
        assert_eq!(
            gallery.ctx.notifications.drain()[0].title,
            "Image uploaded successfully!"
        );
    }

    #[tokio::test]
    async fn test_upload_failure_shows_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Only images allowed"})))
            .mount(&server)
            .await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        let upload = ImageUpload {
            file_name: "notes.txt".to_string(),
            content_type: None,
            bytes: b"hello".to_vec(),
        };
        gallery.upload(upload).await;

        let shown = gallery.ctx.notifications.drain();
        assert_eq!(shown[0].title, "Upload failed");
        assert_eq!(shown[0].description.as_deref(), Some("Only images allowed"));
        assert_eq!(gallery_fetches(&server).await, 0);
    }

    #[tokio::test]
    async fn test_empty_upload_is_ignored() {
        let server = MockServer::start().await;
        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        let upload = ImageUpload {
            file_name: String::new(),
            content_type: None,
            bytes: Vec::new(),
        };

        assert_eq!(gallery.upload(upload).await, Flow::Render);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_load_signs_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
            .mount(&server)
            .await;

        let mut gallery = screen(&server, UnauthorizedPolicy::SignOut);
        assert_eq!(gallery.mount().await, Flow::Redirect(Route::Login));
        assert!(!gallery.ctx.client.session().is_authenticated());
    }
}
