// --- File: crates/services/docsautomator_backend/src/main.rs ---
use axum::Router;
use docsautomator_common::{is_docsautomator_enabled, logging, Context, NodeError};
use docsautomator_config::load_config;
#[cfg(feature = "docsautomator")]
use docsautomator_node::routes as docsautomator_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), NodeError> {
    logging::init();

    let config = logging::log_result(
        load_config(),
        "Configuration loaded",
        "Failed to load config",
    )
    .context("Failed to load config")?;
    let config = Arc::new(config);

    let api_router = {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = docsautomator_common::routes();
        if is_docsautomator_enabled(&config) {
            #[cfg(feature = "docsautomator")]
            {
                router = router.merge(docsautomator_routes::routes(config.clone()));
                info!("DocsAutomator routes mounted under /api/docsautomator");
            }
            #[cfg(not(feature = "docsautomator"))]
            warn!("use_docsautomator is set but the docsautomator feature is not compiled in");
        } else {
            warn!("DocsAutomator node is disabled by configuration");
        }
        router
    };

    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        #[cfg(feature = "docsautomator")]
        use docsautomator_node::doc::DocsAutomatorApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "DocsAutomator Node API",
                version = "0.1.0",
                description = "Loader callbacks and document execution for the DocsAutomator node",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut openapi_doc = ApiDoc::openapi();
        #[cfg(feature = "docsautomator")]
        openapi_doc.merge(DocsAutomatorApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
