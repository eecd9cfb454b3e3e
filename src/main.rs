mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::{routes as auth_routes, AuthService, TokenService};
use crate::features::case_data::{routes as case_data_routes, CaseService, SnapshotService};
use crate::features::devices::{routes as devices_routes, DeviceService};
use crate::features::exports::{routes as exports_routes, ExportJobService, ExportProcessor};
use crate::features::facilities::{routes as facilities_routes, CategoryService, FacilityService};
use crate::features::geojson::{routes as geojson_routes, GeoJsonService};
use crate::features::proximity::{routes as proximity_routes, ProximityService};
use crate::features::regions::{routes as regions_routes, RegionService};
use crate::features::roles::{routes as roles_routes, RoleService};
use crate::features::tracking::{routes as tracking_routes, LocationService};
use crate::features::user_reports::{routes as user_reports_routes, UserReportService};
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // .env must be loaded before the subscriber reads RUST_LOG
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Auth and group roles
    let role_service = Arc::new(RoleService::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(
        pool.clone(),
        TokenService::new(&config.auth),
        Arc::clone(&role_service),
    ));
    if let Some(admin) = &config.auth.bootstrap_admin {
        auth_service
            .ensure_bootstrap_admin(admin)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bootstrap admin account: {}", e))?;
    }
    tracing::info!("Auth services initialized");

    // Domain services
    let region_service = Arc::new(RegionService::new(pool.clone()));
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let facility_service = Arc::new(FacilityService::new(pool.clone()));
    let user_report_service = Arc::new(UserReportService::new(pool.clone()));
    let proximity_service = Arc::new(ProximityService::new(pool.clone()));
    let geojson_service = Arc::new(GeoJsonService::new(
        Arc::clone(&facility_service),
        Arc::clone(&user_report_service),
    ));
    let snapshot_service = Arc::new(SnapshotService::new(
        pool.clone(),
        config.app.hotline.clone(),
    ));
    let case_service = Arc::new(CaseService::new(pool.clone()));
    let location_service = Arc::new(LocationService::new(pool.clone()));
    let device_service = Arc::new(DeviceService::new(pool.clone()));
    let export_service = Arc::new(ExportJobService::new(pool.clone()));
    tracing::info!("Domain services initialized");

    let export_processor = ExportProcessor::new(
        Arc::clone(&export_service),
        Arc::clone(&facility_service),
        Arc::clone(&user_report_service),
        config.exports.clone(),
    );
    tokio::spawn(async move {
        export_processor.run().await;
    });
    tracing::info!("Export processor worker spawned");

    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Every API route sees the caller, if any; handler guards decide access
    let api_routes = Router::new()
        .merge(auth_routes::routes(Arc::clone(&auth_service)))
        .merge(roles_routes::routes(role_service))
        .merge(regions_routes::routes(region_service))
        .merge(facilities_routes::routes(
            category_service,
            facility_service,
            Arc::clone(&export_service),
        ))
        .merge(proximity_routes::routes(proximity_service))
        .merge(geojson_routes::routes(geojson_service))
        .merge(case_data_routes::routes(snapshot_service, case_service))
        .merge(user_reports_routes::routes(
            user_report_service,
            Arc::clone(&export_service),
        ))
        .merge(tracking_routes::routes(location_service))
        .merge(exports_routes::routes(export_service))
        .merge(devices_routes::routes(device_service))
        .layer(axum::middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // UUID v7 unless the client sent its own X-Request-Id
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_server;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_check() {
        let app = Router::new().route("/health", axum::routing::get(health_check));
        test_server(app)
            .get("/health")
            .await
            .assert_status(StatusCode::OK);
    }
}
