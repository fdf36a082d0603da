use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diamond API",
        version = "0.1.0",
        description = "Placeholder baseball-analytics model: static predictions, metrics, and health."
    ),
    paths(
        crate::routes::health,
        crate::routes::health_detailed,
        crate::routes::model_info,
        crate::routes::model_metrics,
        crate::routes::predict,
        crate::routes::train,
    ),
    components(schemas(
        crate::dto::HealthResponse,
        crate::dto::DetailedHealthResponse,
        crate::dto::CacheStatusResponse,
        crate::dto::ModelInfoResponse,
        crate::dto::ModelMetricsResponse,
        crate::dto::PredictRequest,
        crate::dto::TrainingResponse,
        crate::dto::ErrorResponse,
        crate::system::SystemSnapshot,
    )),
    tags(
        (name = "models", description = "Model metadata, predictions, and training"),
        (name = "system", description = "Health and host status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer JWT security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "HS256 token signed with JWT_SECRET. Mint one with `diamond token`.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
