use actix_web::web::ServiceConfig;

use crate::handlers::duties::get_attester_duties;

pub fn register_validator_routes(config: &mut ServiceConfig) {
    config.service(get_attester_duties);
}
