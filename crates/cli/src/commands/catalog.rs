//! Category, collection, material and feature commands.

use bluepenguin_admin::{ConsoleState, Route};
use bluepenguin_core::{CatalogEntry, CategoryId, CollectionId, FeatureId};

use super::{CliError, emit, require, yes_no};

fn print_entries<I: std::fmt::Display>(entries: &[CatalogEntry<I>]) {
    emit(format_args!(
        "{:<16} {:<32} {:>8} {:>6}",
        "ID", "NAME", "PRODUCTS", "ACTIVE"
    ));
    for entry in entries {
        emit(format_args!(
            "{:<16} {:<32} {:>8} {:>6}",
            entry.id.to_string(),
            entry.name,
            entry.product_count,
            yes_no(entry.is_active)
        ));
    }
}

/// List categories with their featured flag.
pub async fn list_categories(state: &ConsoleState) -> Result<(), CliError> {
    require(state, &Route::Categories)?;

    let store = state.categories();
    store.fetch().await?;

    emit(format_args!(
        "{:<16} {:<32} {:>8} {:>6} {:>8}",
        "ID", "NAME", "PRODUCTS", "ACTIVE", "FEATURED"
    ));
    for category in store.categories().await {
        emit(format_args!(
            "{:<16} {:<32} {:>8} {:>6} {:>8}",
            category.id.as_str(),
            category.name,
            category.product_count,
            yes_no(category.is_active),
            yes_no(category.is_featured)
        ));
    }
    Ok(())
}

/// Toggle whether a category is featured.
pub async fn toggle_featured(state: &ConsoleState, id: &str) -> Result<(), CliError> {
    require(state, &Route::Categories)?;

    let store = state.categories();
    let id = CategoryId::new(id);
    store.fetch().await?;
    store.toggle_featured(&id).await?;

    let featured = store.is_featured(&id).await;
    let count = store.featured_codes().await.len();
    emit(format_args!(
        "{id} is {} featured ({count} of {})",
        if featured { "now" } else { "no longer" },
        bluepenguin_admin::stores::MAX_FEATURED_CATEGORIES
    ));
    Ok(())
}

/// List featured category codes as stored by the backend.
pub async fn list_featured(state: &ConsoleState) -> Result<(), CliError> {
    require(state, &Route::Categories)?;

    for featured in state.services().featured_categories.get_all().await? {
        emit(featured.code);
    }
    Ok(())
}

/// List collections with product counts.
pub async fn list_collections(state: &ConsoleState) -> Result<(), CliError> {
    require(state, &Route::Collections)?;
    print_entries(&state.services().collections.get_all().await?);
    Ok(())
}

/// Show one collection.
pub async fn show_collection(state: &ConsoleState, id: &str) -> Result<(), CliError> {
    require(state, &Route::Collections)?;

    let collection = state
        .services()
        .collections
        .get_by_id(&CollectionId::new(id))
        .await?
        .ok_or_else(|| CliError::NotFound(format!("collection {id}")))?;

    print_entries(std::slice::from_ref(&collection));
    Ok(())
}

/// Create a collection.
pub async fn create_collection(state: &ConsoleState, id: &str, name: &str) -> Result<(), CliError> {
    require(state, &Route::AddCollection)?;
    state
        .services()
        .collections
        .create(&CollectionId::new(id), name)
        .await?;
    emit(format_args!("Created collection {id}"));
    Ok(())
}

/// Rename a collection.
pub async fn update_collection(state: &ConsoleState, id: &str, name: &str) -> Result<(), CliError> {
    require(state, &Route::Collections)?;
    state
        .services()
        .collections
        .update(&CollectionId::new(id), name)
        .await?;
    emit(format_args!("Updated collection {id}"));
    Ok(())
}

/// List materials.
pub async fn list_materials(state: &ConsoleState) -> Result<(), CliError> {
    require(state, &Route::Materials)?;
    print_entries(&state.services().materials.get_all().await?);
    Ok(())
}

/// List features.
pub async fn list_features(state: &ConsoleState) -> Result<(), CliError> {
    require(state, &Route::Features)?;
    print_entries(&state.services().features.get_all().await?);
    Ok(())
}

/// Create a feature.
pub async fn create_feature(state: &ConsoleState, id: &str, name: &str) -> Result<(), CliError> {
    require(state, &Route::AddFeature)?;
    state
        .services()
        .features
        .create(&FeatureId::new(id), name)
        .await?;
    emit(format_args!("Created feature {id}"));
    Ok(())
}
