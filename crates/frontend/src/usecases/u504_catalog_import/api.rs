use crate::shared::api_utils::{post_json, with_timeout, REQUEST_TIMEOUT_MS};
use contracts::usecases::u504_catalog_import::{
    StartCatalogImportRequest, StartCatalogImportResponse,
};

/// API клиент для UseCase u504
pub async fn start_import(
    request: StartCatalogImportRequest,
) -> Result<StartCatalogImportResponse, String> {
    with_timeout(
        post_json("/api/usecases/u504_catalog_import/start", &request),
        REQUEST_TIMEOUT_MS,
    )
    .await
}
