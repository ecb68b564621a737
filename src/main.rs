use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unlinked_api::db::{schema, seed, DocumentStore};
use unlinked_api::services::{PostService, ReactionService};
use unlinked_api::{handlers, middleware, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Container healthchecks and provisioning run as CLI subcommands:
    // `healthcheck`, `schema-setup`, `seed-data`.
    if let Some(cmd) = std::env::args().nth(1) {
        return match cmd.as_str() {
            "healthcheck" => healthcheck().await,
            "schema-setup" => schema_setup().await,
            "seed-data" => seed_data().await,
            other => {
                eprintln!("unknown subcommand: {other}");
                Err(io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand"))
            }
        };
    }

    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {e}");
            eprintln!("ERROR: Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting unlinked-api v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store = match DocumentStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Document store connection failed: {e}");
            eprintln!("ERROR: Failed to connect to the document store: {e}");
            std::process::exit(1);
        }
    };

    let post_service = web::Data::new(PostService::new(&store, config.limits.clone()));
    let reaction_service = web::Data::new(ReactionService::new(&store));
    let store_data = web::Data::new(store.clone());

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let trusted_hosts = config.app.trusted_hosts.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(store_data.clone())
            .app_data(post_service.clone())
            .app_data(reaction_service.clone())
            .wrap(cors)
            .wrap(middleware::TrustedHost::new(trusted_hosts.clone()))
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::post().to(handlers::create_post))
                    .route("", web::get().to(handlers::list_posts))
                    .route("/{id}", web::get().to(handlers::get_post)),
            )
            .service(
                web::scope("/reactions")
                    .route("", web::post().to(handlers::create_reaction))
                    .route("/{post_id}", web::get().to(handlers::get_reaction_counts)),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            result.map_err(|e| io::Error::new(io::ErrorKind::Other, e))??;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            let _ = (&mut server_task).await;
        }
    }

    store.disconnect().await;
    tracing::info!("unlinked-api shutting down");

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

/// Probe the local `/health` endpoint; used by container healthchecks.
async fn healthcheck() -> io::Result<()> {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);
    let url = format!("http://127.0.0.1:{port}/health");

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {e}");
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
        }
    }
}

/// Provision collections and indexes, then exit.
///
/// Safe to re-run: existing identical indexes are no-ops and per-index
/// conflicts are reported without aborting the rest.
async fn schema_setup() -> io::Result<()> {
    init_tracing();
    let store = connect_from_env().await?;

    let report = schema::ensure_indexes(&store).await;
    if !report.is_clean() {
        tracing::warn!(failed = report.failed.len(), "some indexes were not created");
    }

    store.disconnect().await;
    Ok(())
}

/// Load development fixture data, then exit.
async fn seed_data() -> io::Result<()> {
    init_tracing();
    let store = connect_from_env().await?;

    let result = seed::run(&store).await;
    store.disconnect().await;

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("Seeding failed: {e}");
            Err(io::Error::new(io::ErrorKind::Other, "seeding failed"))
        }
    }
}

async fn connect_from_env() -> io::Result<DocumentStore> {
    let config = Config::from_env().map_err(|e| {
        eprintln!("ERROR: Failed to load configuration: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    DocumentStore::connect(&config).await.map_err(|e| {
        eprintln!("ERROR: Failed to connect to the document store: {e}");
        io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string())
    })
}
