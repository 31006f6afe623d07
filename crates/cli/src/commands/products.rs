//! Product and artisan favourite commands.

use bluepenguin_admin::services::ProductSearch;
use bluepenguin_admin::{ConsoleState, Route};
use bluepenguin_core::{Product, Sku};

use super::{CliError, emit, require};

fn print_products(products: &[Product]) {
    emit(format_args!(
        "{:<18} {:<32} {:>12} {:<10} {:<10} {:<8}",
        "SKU", "NAME", "PRICE", "CATEGORY", "MATERIAL", "STATUS"
    ));
    for product in products {
        emit(format_args!(
            "{:<18} {:<32} {:>12} {:<10} {:<10} {:<8}",
            product.sku.as_str(),
            product.name,
            product.price.display(),
            product.category.as_ref().map_or("-", |c| c.as_str()),
            product.material.as_ref().map_or("-", |m| m.as_str()),
            product.status.to_string()
        ));
    }
}

/// Build a search filter from command-line values.
pub fn filter(
    collections: Vec<String>,
    categories: Vec<String>,
    materials: Vec<String>,
    features: Vec<String>,
) -> ProductSearch {
    ProductSearch {
        selected_collections: collections.into_iter().map(Into::into).collect(),
        selected_categories: categories.into_iter().map(Into::into).collect(),
        selected_materials: materials.into_iter().map(Into::into).collect(),
        selected_features: features.into_iter().map(Into::into).collect(),
    }
}

/// List all products.
pub async fn list(state: &ConsoleState) -> Result<(), CliError> {
    require(state, &Route::Dashboard)?;
    print_products(&state.services().products.get_all().await?);
    Ok(())
}

/// Search products.
pub async fn search(
    state: &ConsoleState,
    filter: &ProductSearch,
    page: u32,
    page_size: u32,
) -> Result<(), CliError> {
    require(state, &Route::Dashboard)?;

    let result = state
        .services()
        .products
        .search(filter, page, page_size)
        .await?;
    print_products(&result.items);
    emit(format_args!(
        "Page {page}: {} of {} products",
        result.items.len(),
        result.total_count
    ));
    Ok(())
}

/// List artisan favourites.
pub async fn list_favs(state: &ConsoleState) -> Result<(), CliError> {
    require(state, &Route::Dashboard)?;
    for fav in state.services().artisan_favs.get_all().await? {
        emit(fav.sku);
    }
    Ok(())
}

/// Mark a product as an artisan favourite.
pub async fn add_fav(state: &ConsoleState, sku: &str) -> Result<(), CliError> {
    let sku = Sku::new(sku);
    require(state, &Route::ProductDetails(sku.clone()))?;
    state.services().artisan_favs.create(&sku).await?;
    emit(format_args!("{sku} added to artisan favourites"));
    Ok(())
}

/// Unmark a product.
pub async fn remove_fav(state: &ConsoleState, sku: &str) -> Result<(), CliError> {
    let sku = Sku::new(sku);
    require(state, &Route::ProductDetails(sku.clone()))?;
    state.services().artisan_favs.delete(&sku).await?;
    emit(format_args!("{sku} removed from artisan favourites"));
    Ok(())
}
