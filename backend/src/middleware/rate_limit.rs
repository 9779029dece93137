//! Fixed-window request throttling for the roster endpoints.
//!
//! One window is shared by every client of the process. Once the window's
//! quota is spent, further requests are rejected with `429 Too Many Requests`
//! until the window rolls over.

use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderName, HeaderValue};
use actix_web::{Error as ActixError, ResponseError};
use chrono::{DateTime, TimeDelta, Utc};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use mockable::Clock;
use tracing::warn;

use crate::domain::Error;

/// Header advertising the configured request quota on rejections.
pub const RATE_LIMIT_HEADER: &str = "x-ratelimit-limit";

/// Quota applied to each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests admitted per window.
    pub requests: u32,
    /// Window length in whole seconds.
    pub window_secs: u32,
}

impl RateLimitConfig {
    fn window(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.window_secs))
    }

    fn rejection_message(&self) -> String {
        format!(
            "Too many requests. You have exceeded the rate limit of {requests} requests per \
             {window} seconds. Please wait up to {window} seconds before trying again.",
            requests = self.requests,
            window = self.window_secs,
        )
    }
}

#[derive(Debug, Default)]
struct WindowState {
    started: Option<DateTime<Utc>>,
    admitted: u32,
}

/// Shared counter behind every [`RateLimit`] clone.
struct FixedWindow {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<WindowState>,
}

impl FixedWindow {
    fn try_acquire(&self) -> bool {
        let now = self.clock.utc();
        // A poisoned lock only means another request panicked mid-update;
        // the counter is still usable.
        let mut state = self.state.lock().unwrap_or_else(|err| err.into_inner());

        let expired = state
            .started
            .is_none_or(|started| now - started >= self.config.window());
        if expired {
            state.started = Some(now);
            state.admitted = 0;
        }

        if state.admitted >= self.config.requests {
            return false;
        }
        state.admitted += 1;
        true
    }
}

/// Middleware throttling requests to a fixed quota per window.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use mockable::DefaultClock;
/// use roster::middleware::rate_limit::{RateLimit, RateLimitConfig};
///
/// let limit = RateLimit::new(
///     RateLimitConfig { requests: 20, window_secs: 10 },
///     Arc::new(DefaultClock),
/// );
/// let app = App::new().wrap(limit);
/// ```
#[derive(Clone)]
pub struct RateLimit {
    window: Arc<FixedWindow>,
}

impl RateLimit {
    /// Build a limiter reading time from `clock`.
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            window: Arc::new(FixedWindow {
                config,
                clock,
                state: Mutex::new(WindowState::default()),
            }),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service,
            window: Arc::clone(&self.window),
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: S,
    window: Arc<FixedWindow>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.window.try_acquire() {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let config = self.window.config;
        // Build the error inside the future so it captures the request trace id.
        Box::pin(async move {
            warn!(
                path = %req.path(),
                limit = config.requests,
                window_secs = config.window_secs,
                "rate limit exceeded"
            );
            let mut response = Error::too_many_requests(config.rejection_message()).error_response();
            let headers = response.headers_mut();
            headers.insert(header::RETRY_AFTER, HeaderValue::from(config.window_secs));
            headers.insert(
                HeaderName::from_static(RATE_LIMIT_HEADER),
                HeaderValue::from(config.requests),
            );
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for window accounting and rejection responses.

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};
    use serde_json::Value;

    use super::*;
    use crate::domain::TRACE_ID_HEADER;
    use crate::middleware::Trace;

    struct SteppedClock(Mutex<DateTime<Utc>>);

    impl SteppedClock {
        fn advance_seconds(&self, seconds: i64) {
            let mut now = self.0.lock().expect("clock mutex");
            *now += TimeDelta::seconds(seconds);
        }
    }

    impl Clock for SteppedClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock mutex")
        }
    }

    #[fixture]
    fn clock() -> Arc<SteppedClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Arc::new(SteppedClock(Mutex::new(start)))
    }

    const CONFIG: RateLimitConfig = RateLimitConfig {
        requests: 2,
        window_secs: 10,
    };

    #[rstest]
    fn quota_resets_when_the_window_rolls_over(clock: Arc<SteppedClock>) {
        let limit = RateLimit::new(CONFIG, clock.clone());

        assert!(limit.window.try_acquire());
        assert!(limit.window.try_acquire());
        assert!(!limit.window.try_acquire());

        clock.advance_seconds(9);
        assert!(!limit.window.try_acquire());

        clock.advance_seconds(1);
        assert!(limit.window.try_acquire());
    }

    #[rstest]
    fn clones_share_one_window(clock: Arc<SteppedClock>) {
        let first = RateLimit::new(CONFIG, clock);
        let second = first.clone();

        assert!(first.window.try_acquire());
        assert!(second.window.try_acquire());
        assert!(!first.window.try_acquire());
    }

    #[rstest]
    fn zero_quota_rejects_everything(clock: Arc<SteppedClock>) {
        let limit = RateLimit::new(
            RateLimitConfig {
                requests: 0,
                window_secs: 10,
            },
            clock,
        );
        assert!(!limit.window.try_acquire());
    }

    #[rstest]
    #[actix_web::test]
    async fn rejects_over_quota_with_headers_and_payload(clock: Arc<SteppedClock>) {
        let app = actix_test::init_service(
            App::new()
                .wrap(RateLimit::new(CONFIG, clock))
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for _ in 0..2 {
            let res =
                actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                    .await;
            assert_eq!(res.status(), StatusCode::OK);
        }

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
        let header_value = |name: &str| {
            res.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        assert_eq!(header_value("retry-after").as_deref(), Some("10"));
        assert_eq!(header_value(RATE_LIMIT_HEADER).as_deref(), Some("2"));
        let trace_id = header_value(TRACE_ID_HEADER).expect("trace id header");

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "too_many_requests");
        assert_eq!(
            body["message"],
            "Too many requests. You have exceeded the rate limit of 2 requests per 10 seconds. \
             Please wait up to 10 seconds before trying again."
        );
        assert_eq!(body["traceId"], trace_id.as_str());
    }
}
