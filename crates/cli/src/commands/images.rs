//! Product image commands.

use std::path::Path;

use bluepenguin_admin::services::ImageUpload;
use bluepenguin_admin::{ConsoleState, Route};
use bluepenguin_core::{ImageId, Sku};

use super::{CliError, emit, require};

/// MIME type for an image file, from its extension.
fn content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn guard(state: &ConsoleState, sku: &str) -> Result<Sku, CliError> {
    let sku = Sku::new(sku);
    require(state, &Route::ProductDetails(sku.clone()))?;
    Ok(sku)
}

/// List image ids for a product.
pub async fn list(state: &ConsoleState, sku: &str) -> Result<(), CliError> {
    let sku = guard(state, sku)?;
    let images = state.services().files.get_images(&sku).await?;
    if images.is_empty() {
        emit(format_args!("No images for {sku}"));
    }
    for image in images {
        emit(image);
    }
    Ok(())
}

/// Print the URL serving an image.
pub fn url(state: &ConsoleState, sku: &str, image_id: &str) -> Result<(), CliError> {
    let sku = guard(state, sku)?;
    let url = state
        .services()
        .files
        .image_url(&sku, &ImageId::new(image_id))?;
    emit(url);
    Ok(())
}

/// Upload an image file.
pub async fn upload(
    state: &ConsoleState,
    sku: &str,
    file: &Path,
    is_primary: bool,
) -> Result<(), CliError> {
    let sku = guard(state, sku)?;
    let bytes = tokio::fs::read(file).await.map_err(|source| CliError::Io {
        path: file.to_path_buf(),
        source,
    })?;
    let file_name = file
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

    let upload = ImageUpload {
        sku: sku.clone(),
        file_name,
        content_type: content_type(file).map(String::from),
        bytes,
        is_primary,
    };
    state.services().files.upload(upload).await?;

    emit(format_args!("Uploaded {} for {sku}", file.display()));
    Ok(())
}

/// Download an image to a file.
pub async fn download(
    state: &ConsoleState,
    sku: &str,
    image_id: &str,
    output: &Path,
) -> Result<(), CliError> {
    let sku = guard(state, sku)?;
    let bytes = state
        .services()
        .files
        .download(&sku, &ImageId::new(image_id))
        .await?;

    tokio::fs::write(output, &bytes)
        .await
        .map_err(|source| CliError::Io {
            path: output.to_path_buf(),
            source,
        })?;

    emit(format_args!("Wrote {} bytes to {}", bytes.len(), output.display()));
    Ok(())
}

/// Delete an image.
pub async fn delete(state: &ConsoleState, sku: &str, image_id: &str) -> Result<(), CliError> {
    let sku = guard(state, sku)?;
    state
        .services()
        .files
        .delete(&sku, &ImageId::new(image_id))
        .await?;
    emit(format_args!("Deleted image {image_id} from {sku}"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(content_type(Path::new("ring.JPG")), Some("image/jpeg"));
        assert_eq!(content_type(Path::new("a/b/ring.webp")), Some("image/webp"));
        assert_eq!(content_type(Path::new("notes.txt")), None);
        assert_eq!(content_type(Path::new("noext")), None);
    }
}
