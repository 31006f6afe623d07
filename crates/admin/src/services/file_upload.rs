//! Product image upload, listing and download.

use bluepenguin_core::{ImageId, Sku};
use reqwest::multipart::{Form, Part};
use tracing::{info, instrument};
use url::Url;

use super::{fields, logged};
use crate::api::{ApiClient, ApiError, RequestOptions};

/// Candidate properties for an image id when the listing returns objects.
const IMAGE_ID: &[&str] = &["imageId", "id"];

/// An image to attach to a product.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub sku: Sku,
    pub file_name: String,
    /// MIME type; the backend sniffs the content when absent.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub is_primary: bool,
}

impl ImageUpload {
    fn into_form(self) -> Result<Form, ApiError> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(content_type) = &self.content_type {
            part = part.mime_str(content_type)?;
        }
        Ok(Form::new()
            .part("File", part)
            .text("SkuId", self.sku.into_inner()))
    }
}

/// Image endpoints.
#[derive(Debug, Clone)]
pub struct FileUploadService {
    api: ApiClient,
}

impl FileUploadService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Image ids attached to `sku`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, sku), fields(sku = %sku))]
    pub async fn get_images(&self, sku: &Sku) -> Result<Vec<ImageId>, ApiError> {
        let options = RequestOptions::new().param("skuId", sku);
        let result = self
            .api
            .get("/api/FileUpload/getAllImagesForSkuId", options)
            .await;
        let payload = logged(result, "fetch images for SKU")?.into_json();

        Ok(fields::list_items(payload)
            .iter()
            .filter_map(|item| fields::marker_code(item, IMAGE_ID))
            .map(ImageId::from)
            .collect())
    }

    /// Absolute URL serving one image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the base URL cannot be joined.
    pub fn image_url(&self, sku: &Sku, image_id: &ImageId) -> Result<Url, ApiError> {
        let options = Self::image_params(sku, image_id);
        self.api.url("/api/FileUpload/downloadByimageId", &options.params)
    }

    /// Download one image's bytes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, sku, image_id), fields(sku = %sku, image_id = %image_id))]
    pub async fn download(&self, sku: &Sku, image_id: &ImageId) -> Result<Vec<u8>, ApiError> {
        let result = self
            .api
            .download(
                "/api/FileUpload/downloadByimageId",
                Self::image_params(sku, image_id),
            )
            .await;
        logged(result, "download image")
    }

    /// Upload an image for a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(
        skip(self, upload),
        fields(sku = %upload.sku, file_name = %upload.file_name, size = upload.bytes.len())
    )]
    pub async fn upload(&self, upload: ImageUpload) -> Result<(), ApiError> {
        let options = RequestOptions::new().param("isPrimaryImage", upload.is_primary);
        let form = logged(upload.into_form(), "build image upload")?;
        let result = self
            .api
            .upload("/api/FileUpload/addproductimage", options, form)
            .await;
        logged(result, "upload image")?;

        info!("Image uploaded");
        Ok(())
    }

    /// Delete one image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, sku, image_id), fields(sku = %sku, image_id = %image_id))]
    pub async fn delete(&self, sku: &Sku, image_id: &ImageId) -> Result<(), ApiError> {
        let result = self
            .api
            .delete(
                "/api/FileUpload/deleteproductimage",
                Self::image_params(sku, image_id),
            )
            .await;
        logged(result, "delete image")?;

        info!("Image deleted");
        Ok(())
    }

    fn image_params(sku: &Sku, image_id: &ImageId) -> RequestOptions {
        RequestOptions::new()
            .param("skuId", sku)
            .param("imageId", image_id)
    }
}
