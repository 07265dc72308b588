// File: services/habitly_backend/src/main.rs
use axum::{routing::get, Router};
use habitly_config::load_config;
#[cfg(feature = "habits")]
use habitly_habits::routes as habits_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

mod service_factory;

#[cfg(feature = "notifier")]
use {
    habitly_common::is_notifier_enabled, habitly_common::services::ServiceFactory,
    habitly_notifier::NotifierJob, service_factory::HabitlyServiceFactory, tracing::error,
};

#[tokio::main]
async fn main() {
    habitly_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to Habitly API!" }))
        .with_state(config.clone());

    #[cfg(feature = "habits")]
    let habits_router = habits_routes(config.clone());

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // mutability is only needed with features on
        let mut router = api_router;
        #[cfg(feature = "habits")]
        {
            router = router.merge(habits_router);
        }
        router
    });

    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use habitly_habits::doc::HabitsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Habitly API",
                version = "0.1.0",
                description = "Habitly Service API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Habitly", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(HabitsApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Start the minutely reminder job alongside the HTTP server
    #[cfg(feature = "notifier")]
    {
        if is_notifier_enabled(&config) {
            let factory = HabitlyServiceFactory::new(config.clone());
            match (
                factory.habit_store(),
                factory.token_store(),
                factory.push_sender(),
            ) {
                (Some(habits), Some(tokens), Some(push)) => {
                    let job = Arc::new(NotifierJob::new(
                        habits,
                        tokens,
                        push,
                        config.notifier.as_ref(),
                    ));
                    habitly_notifier::spawn_minutely(job);
                }
                _ => {
                    error!("Notifier enabled but its services could not be built");
                }
            }
        } else {
            info!("Notifier disabled by configuration");
        }
    }

    // Serve static files in dev mode
    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from ../../dist");
        let static_router = Router::new().nest_service("/static", ServeDir::new("../../dist"));
        app = app.merge(static_router);
        app = app.fallback_service(ServeDir::new("../dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
