use std::{io::Result, net::SocketAddr, sync::Arc};

use actix_web::{
    App, Error, HttpRequest, HttpServer,
    error::JsonPayloadError,
    middleware::Logger,
    web::{Data, JsonConfig, ServiceConfig},
};
use ream_api_types_common::error::ApiError;
use tracing::{debug, info};

/// Largest JSON request body accepted, in bytes.
pub const JSON_PAYLOAD_LIMIT: usize = 4 * 1024 * 1024;

/// A type alias for a function that configures the actix-web ServiceConfig.
type Configurator = dyn Fn(&mut ServiceConfig) + Send + Sync;

/// Turn a JSON body that fails to decode into a 400 with the standard error body.
pub fn json_error_handler(err: JsonPayloadError, request: &HttpRequest) -> Error {
    debug!(path = request.path(), "Rejecting malformed request body: {err}");
    ApiError::BadRequest(format!("Could not decode request body: {err}")).into()
}

/// JSON extractor config shared by every route.
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(JSON_PAYLOAD_LIMIT)
        .error_handler(json_error_handler)
}

/// A builder for configuring and starting an RPC server.
pub struct RpcServerBuilder {
    http_socket_address: SocketAddr,
    configurators: Vec<Arc<Configurator>>,
}

impl RpcServerBuilder {
    /// Create a new RpcServerBuilder with the given configuration.
    pub fn new(http_socket_address: SocketAddr) -> Self {
        Self {
            http_socket_address,
            configurators: Vec::new(),
        }
    }

    /// Configure actix-web App by providing a closure that takes a mutable ref ServiceConfig.
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ServiceConfig) + Send + Sync + 'static,
    {
        self.configurators.push(Arc::new(f));
        self
    }

    /// Add app data to the ServiceConfig.
    pub fn with_data<T>(mut self, value: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        let data = Data::new(value);
        self.configurators
            .push(Arc::new(move |config: &mut ServiceConfig| {
                config.app_data(data.clone());
            }));
        self
    }

    /// Start the RPC server by applying all configurations.
    pub async fn start(self) -> Result<()> {
        let configurators = self.configurators.clone();
        let configure_all = move |config: &mut ServiceConfig| {
            config.app_data(json_config());
            for configurator in &configurators {
                configurator(config);
            }
        };

        info!("starting HTTP server on {:?}", self.http_socket_address);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .configure(configure_all.clone())
        })
        .bind(self.http_socket_address)?
        .run();

        server.await
    }
}
