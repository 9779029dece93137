//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use roster::Trace;
#[cfg(debug_assertions)]
use roster::doc::ApiDoc;
use roster::inbound::http::configure_roster;
use roster::inbound::http::health::{HealthState, live, ready};
use roster::inbound::http::state::HttpState;
use roster::middleware::RateLimit;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    rate_limit: RateLimit,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        rate_limit,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // The empty scope matches every remaining path, so it must come last.
    app.service(
        web::scope("")
            .wrap(rate_limit)
            .configure(configure_roster),
    )
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is bound.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address, rate
///   limit, and optional database pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    // One limiter for every worker so the window is process-wide.
    let rate_limit = RateLimit::new(config.rate_limit, Arc::new(DefaultClock));
    let ServerConfig {
        bind_addr,
        rate_limit: _,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            rate_limit: rate_limit.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Routing checks for the assembled application.

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use roster::domain::TRACE_ID_HEADER;
    use roster::middleware::RateLimitConfig;

    fn deps(requests: u32) -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("socket address"),
            RateLimitConfig {
                requests,
                window_secs: 60,
            },
        );
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: build_http_state(&config),
            rate_limit: RateLimit::new(config.rate_limit, Arc::new(DefaultClock)),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn roster_routes_are_throttled_but_probes_are_not() {
        let app = actix_test::init_service(build_app(deps(1))).await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/lecturers")
                .set_json(json!({"name": "Jane", "surname": "Smith", "lecturerId": "L1"}))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.headers().contains_key(TRACE_ID_HEADER));

        let throttled = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/lecturers/L1").to_request(),
        )
        .await;
        assert_eq!(throttled.status(), StatusCode::TOO_MANY_REQUESTS);

        for uri in ["/health/ready", "/health/live", "/health/ready"] {
            let probe =
                actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                    .await;
            assert_eq!(probe.status(), StatusCode::OK, "{uri} should bypass the limiter");
        }
    }
}
