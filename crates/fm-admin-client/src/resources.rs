//! Typed operations over the remote resource collections

use crate::api_client::{ApiClient, member_path};
use crate::error::ClientResult;
use fm_admin_core::types::{LoginRequest, LoginResponse};
use fm_admin_core::{Booking, GalleryItem, MenuItem, Testimonial};
use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use validator::Validate;

/// Authentication endpoint
pub const LOGIN_PATH: &str = "/auth/login";
/// Gallery collection
pub const GALLERY_PATH: &str = "/gallery";
/// Booking inquiries collection
pub const CONTACT_PATH: &str = "/contact";
/// Menu collection
pub const MENU_PATH: &str = "/menu";
/// Testimonials collection
pub const TESTIMONIALS_PATH: &str = "/testimonials";

/// Multipart field the server reads the image from
const IMAGE_FIELD: &str = "image";

/// A single file picked for upload
#[derive(Clone)]
pub struct ImageUpload {
    /// Original file name
    pub file_name: String,
    /// MIME type reported by the browser
    pub content_type: Option<String>,
    /// File contents
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Nothing was selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_form(self) -> ClientResult<Form> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(content_type) = self.content_type {
            part = part.mime_str(&content_type).map_err(|e| {
                fm_admin_core::Error::Validation {
                    field: "content_type".to_string(),
                    message: e.to_string(),
                }
            })?;
        }
        Ok(Form::new().part(IMAGE_FIELD, part))
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ApiClient {
    /// Exchange credentials for a token
    ///
    /// Empty fields are rejected before any request is made.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty fields, otherwise any transport,
    /// status or decode error.
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        request.validate().map_err(fm_admin_core::Error::from)?;
        self.post(LOGIN_PATH, request).await
    }

    /// Fetch the gallery collection
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record does not decode.
    pub async fn list_gallery(&self) -> ClientResult<Vec<GalleryItem>> {
        self.get(GALLERY_PATH).await
    }

    /// Upload one image
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the file.
    pub async fn upload_gallery_image(&self, upload: ImageUpload) -> ClientResult<()> {
        let form = upload.into_form()?;
        let _: IgnoredAny = self.post_multipart(GALLERY_PATH, form).await?;
        Ok(())
    }

    /// Delete one image
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete_gallery_image(&self, id: &str) -> ClientResult<()> {
        self.delete(&member_path(GALLERY_PATH, id)).await
    }

    /// Fetch every booking inquiry
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record does not decode.
    pub async fn list_bookings(&self) -> ClientResult<Vec<Booking>> {
        self.get(CONTACT_PATH).await
    }

    /// Delete one booking inquiry
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete_booking(&self, id: &str) -> ClientResult<()> {
        self.delete(&member_path(CONTACT_PATH, id)).await
    }

    /// Clear the "new" flag of one booking inquiry
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn mark_booking_seen(&self, id: &str) -> ClientResult<()> {
        let _: IgnoredAny = self
            .patch(&format!("{}/seen", member_path(CONTACT_PATH, id)))
            .await?;
        Ok(())
    }

    /// Fetch the menu collection
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record does not decode.
    pub async fn list_menu(&self) -> ClientResult<Vec<MenuItem>> {
        self.get(MENU_PATH).await
    }

    /// Fetch the testimonials collection
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a record does not decode.
    pub async fn list_testimonials(&self) -> ClientResult<Vec<Testimonial>> {
        self.get(TESTIMONIALS_PATH).await
    }
}
