//! Dashboard aggregation over every resource collection

use super::{Flow, ScreenContext};
use chrono::{DateTime, Utc};
use fm_admin_client::{ApiClient, ClientResult};
use fm_admin_core::{Booking, GalleryItem, MenuItem, Testimonial, unseen_count};
use tracing::debug;

/// Length of the activity feed
pub const ACTIVITY_LIMIT: usize = 5;

/// Gallery, menu, inquiries and testimonials, as fetched together
pub type Collections = (Vec<GalleryItem>, Vec<MenuItem>, Vec<Booking>, Vec<Testimonial>);

/// One line of the "Latest Updates" feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    /// Kind of event
    pub title: &'static str,
    /// Who caused it
    pub actor: &'static str,
    /// What it concerns
    pub subject: String,
    /// Image shown next to the entry
    pub image_url: String,
    /// When it happened
    pub at: DateTime<Utc>,
}

/// Fill gauge of one collection against a soft capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetProgress {
    /// Gauge label
    pub label: &'static str,
    /// Current size
    pub value: usize,
    /// Soft capacity
    pub capacity: usize,
}

impl AssetProgress {
    /// Fill level in whole percent, capped at 100
    #[must_use]
    pub fn percent(&self) -> u8 {
        if self.capacity == 0 {
            return 100;
        }
        let percent = (self.value.saturating_mul(100) / self.capacity).min(100);
        u8::try_from(percent).unwrap_or(100)
    }
}

/// Everything the dashboard shows, derived from one round of fetches
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Gallery size
    pub gallery: usize,
    /// Menu size
    pub menu: usize,
    /// Inquiry count
    pub contact: usize,
    /// Testimonial count
    pub testimonials: usize,
    /// Inquiries still flagged new
    pub unseen_bookings: usize,
    /// Newest gallery uploads first
    pub activity: Vec<ActivityEntry>,
}

impl DashboardSummary {
    /// Derive the summary from freshly fetched collections
    #[must_use]
    pub fn from_collections(
        gallery: &[GalleryItem],
        menu: &[MenuItem],
        contact: &[Booking],
        testimonials: &[Testimonial],
    ) -> Self {
        let mut newest: Vec<&GalleryItem> = gallery.iter().collect();
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let activity = newest
            .into_iter()
            .take(ACTIVITY_LIMIT)
            .map(|item| ActivityEntry {
                title: "New Gallery Upload",
                actor: "Admin",
                subject: item.title().to_string(),
                image_url: item.url.clone(),
                at: item.created_at,
            })
            .collect();

        Self {
            gallery: gallery.len(),
            menu: menu.len(),
            contact: contact.len(),
            testimonials: testimonials.len(),
            unseen_bookings: unseen_count(contact),
            activity,
        }
    }

    /// Capacity gauges
    #[must_use]
    pub const fn progress(&self) -> [AssetProgress; 3] {
        [
            AssetProgress {
                label: "Gallery Space",
                value: self.gallery,
                capacity: 100,
            },
            AssetProgress {
                label: "Menu Capacity",
                value: self.menu,
                capacity: 50,
            },
            AssetProgress {
                label: "Inquiry Volume",
                value: self.contact,
                capacity: 30,
            },
        ]
    }
}

/// Loads the four collections together and summarizes them
#[derive(Debug)]
pub struct DashboardScreen {
    ctx: ScreenContext,
    summary: Option<DashboardSummary>,
    loading: bool,
}

impl DashboardScreen {
    /// Screen with nothing loaded
    #[must_use]
    pub const fn new(ctx: ScreenContext) -> Self {
        Self {
            ctx,
            summary: None,
            loading: false,
        }
    }

    /// Last successful summary
    #[must_use]
    pub const fn summary(&self) -> Option<&DashboardSummary> {
        self.summary.as_ref()
    }

    /// A fetch is in progress
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch all four collections concurrently
    ///
    /// Any single failure fails the whole round and the previous summary is
    /// kept.
    pub async fn mount(&mut self) -> Flow {
        self.begin_load();
        let result = Self::fetch(&self.ctx.client).await;
        self.finish_load(result)
    }

    /// Issue the four fetches at once; the first failure wins
    ///
    /// # Errors
    ///
    /// Returns the error of whichever request failed.
    pub async fn fetch(client: &ApiClient) -> ClientResult<Collections> {
        tokio::try_join!(
            client.list_gallery(),
            client.list_menu(),
            client.list_bookings(),
            client.list_testimonials(),
        )
    }

    /// Enter the loading state
    pub const fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Summarize a finished [`DashboardScreen::fetch`]
    pub fn finish_load(&mut self, result: ClientResult<Collections>) -> Flow {
        self.loading = false;

        match result {
            Ok((gallery, menu, contact, testimonials)) => {
                let summary =
                    DashboardSummary::from_collections(&gallery, &menu, &contact, &testimonials);
                debug!(
                    "Dashboard loaded: {} gallery, {} menu, {} inquiries, {} testimonials",
                    summary.gallery, summary.menu, summary.contact, summary.testimonials
                );
                self.summary = Some(summary);
                Flow::Render
            }
            Err(e) => self.ctx.fail(
                &e,
                "Connection Error",
                Some("Failed to sync with the server."),
                false,
            ),
        }
    }
}
