use actix_web::web::{ServiceConfig, scope};

use crate::routes::validator::register_validator_routes;

pub mod validator;

/// Mount every Beacon API route under `/eth/v1`.
pub fn register_routers(config: &mut ServiceConfig) {
    config.service(scope("/eth/v1").configure(register_validator_routes));
}
