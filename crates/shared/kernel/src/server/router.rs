use super::health;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// System-level routes (health probe) shared by every deployment, kept
/// separate from feature routers so slices can be mounted independently.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
