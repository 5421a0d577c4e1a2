use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::Compress;
use actix_web::{web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod db;
pub mod pdf;
pub mod permit;
pub mod store;
pub mod views;

pub use crate::db::AppState;

pub async fn run() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::permit::handlers::submit_form,
            crate::permit::handlers::get_permit_pdf,
        ),
        components(
            schemas(
                permit::models::PermitTransit,
                permit::models::SubmitPermitForm,
            )
        ),
        tags(
            (name = "Permit Transit", description = "Permit transit intake and pass rendering endpoints.")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file
    let app_state = match AppState::new().await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to initialise application state. Check DATABASE_URL and PERMIT_TEMPLATE_PATH in .env, and ensure the database is running and the template exposes the mapped fields. Error: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("permit_transit_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!("Starting server at http://0.0.0.0:8080");

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::permissive();

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(
                web::resource("/submit_form")
                    .route(web::post().to(permit::handlers::submit_form)),
            )
            .service(
                web::resource("/pdf/{id}").route(web::get().to(permit::handlers::get_permit_pdf)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .service(Files::new("/", "./public").index_file("index.html"))
    })
    .backlog(8192)
    .max_connections(25000)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(("0.0.0.0", 8080))?
    .run()
    .await
}
