use std::{rc::Rc, sync::Arc};

use actix_service::{Service, Transform};
use actix_utils::future::{Either, Ready, ready};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{Error, Result};
use futures_util::future::LocalBoxFuture;

use crate::capture::capture_body;
use crate::config::Config;
use crate::error::ConfigError;
use crate::record::assemble;
use crate::wrapper::{RecordSink, default_sink};

/// Middleware that logs a structured summary of each inbound request.
///
/// The request is inspected, optionally has its body captured, and is then
/// handed to the next service unchanged apart from the replayed body. The
/// response is not touched.
///
/// # Examples
/// ```rust
/// use actix_web::App;
/// use actix_web_middleware_request_logger::{Config, RequestLogger};
///
/// let logger = RequestLogger::new(
///     Config::default()
///         .include_request_body(true)
///         .skip_path("/health"),
/// );
///
/// let app = App::new().wrap(logger);
/// ```
#[derive(Clone)]
pub struct RequestLogger(Arc<Inner>);

#[derive(Clone)]
struct Inner {
    config: Config,
    sink: Arc<dyn RecordSink>,
}

impl RequestLogger {
    /// Create `RequestLogger` middleware with the specified `config`.
    pub fn new(config: Config) -> RequestLogger {
        RequestLogger(Arc::new(Inner {
            config: config.provision(),
            sink: default_sink(),
        }))
    }

    /// Create `RequestLogger` middleware from directive text.
    /// See [`Config::from_directives`].
    pub fn from_directives(input: &str) -> Result<RequestLogger, ConfigError> {
        Config::from_directives(input).map(RequestLogger::new)
    }

    /// Send records to `sink` instead of the `log` facade.
    pub fn sink<T: RecordSink + 'static>(mut self, sink: T) -> Self {
        Arc::make_mut(&mut self.0).sink = Arc::new(sink);
        self
    }

    /// Provisioned settings the middleware runs with.
    pub fn config(&self) -> &Config {
        &self.0.config
    }
}

impl Default for RequestLogger {
    /// Create `RequestLogger` middleware with [`Config::default`].
    fn default() -> Self {
        RequestLogger::new(Config::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddlewareService {
            service: Rc::new(service),
            inner: Arc::clone(&self.0),
        }))
    }
}

/// Request logger middleware service.
pub struct RequestLoggerMiddlewareService<S> {
    inner: Arc<Inner>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Either<S::Future, LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>>>;

    actix_service::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let config = &self.inner.config;

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        if config.should_skip(req.method().as_str(), req.path(), &content_type) {
            return Either::left(self.service.call(req));
        }

        if !config.include_request_body {
            let record = assemble(config, &req, None);
            self.inner.sink.emit(&record);
            return Either::left(self.service.call(req));
        }

        let inner = Arc::clone(&self.inner);
        let service = Rc::clone(&self.service);

        let fut: LocalBoxFuture<'static, _> = Box::pin(async move {
            let body = capture_body(&mut req, inner.config.body_limit()).await;
            let record = assemble(&inner.config, &req, Some(body));
            inner.sink.emit(&record);
            service.call(req).await
        });
        Either::right(fut)
    }
}
