use std::sync::Arc;

use actix_web::{
    HttpResponse, Responder, post,
    web::{Data, Json, Path},
};
use ream_api_types_beacon::request::ValidatorIndices;
use ream_api_types_common::error::ApiError;
use ream_consensus_beacon::beacon_state::BeaconState;
use ream_duties::{
    resolver::{AttesterDutiesResolver, DutyRequest},
    traits::SlotClock,
};

#[post("/validator/duties/attester/{epoch}")]
pub async fn get_attester_duties(
    resolver: Data<AttesterDutiesResolver<BeaconState>>,
    slot_clock: Data<Arc<dyn SlotClock>>,
    epoch: Path<String>,
    validator_indices: Json<ValidatorIndices>,
) -> Result<impl Responder, ApiError> {
    let epoch = epoch
        .into_inner()
        .parse::<u64>()
        .map_err(|err| ApiError::BadRequest(format!("Could not decode epoch: {err}")))?;
    let current_slot = slot_clock
        .current_slot()
        .map_err(|err| ApiError::InternalError(format!("Could not get current slot: {err}")))?;

    let request = DutyRequest::new(epoch, validator_indices.into_inner().into_inner());
    let response = resolver.resolve(&request, current_slot).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use actix_web::{
        App,
        dev::ServiceResponse,
        http::StatusCode,
        test::{TestRequest, call_service, init_service, read_body_json},
    };
    use alloy_primitives::B256;
    use ream_api_types_common::error::ErrorMessage;
    use ream_chain_beacon::{
        clock::ManualSlotClock, node_status::NodeStatus, state_store::InMemoryStateStore,
    };
    use ream_consensus_beacon::genesis::interop_genesis_state;
    use ream_rpc_common::server::json_config;
    use serde_json::{Value, json};

    use super::*;
    use crate::routes::register_routers;

    const GENESIS_ROOT: B256 = B256::repeat_byte(0xab);

    struct Node {
        status: Arc<NodeStatus>,
        clock: Arc<ManualSlotClock>,
        resolver: Data<AttesterDutiesResolver<BeaconState>>,
    }

    fn node() -> Node {
        let store = Arc::new(InMemoryStateStore::new());
        store.insert(interop_genesis_state(
            64,
            0,
            B256::repeat_byte(0x01),
            GENESIS_ROOT,
        ));
        let status = Arc::new(NodeStatus::default());
        let resolver = AttesterDutiesResolver::new(status.clone(), status.clone(), store);
        Node {
            status,
            clock: Arc::new(ManualSlotClock::new(0)),
            resolver: Data::new(resolver),
        }
    }

    async fn post_duties(node: &Node, epoch: &str, body: &str) -> ServiceResponse {
        let slot_clock: Arc<dyn SlotClock> = node.clock.clone();
        let app = init_service(
            App::new()
                .app_data(json_config())
                .app_data(node.resolver.clone())
                .app_data(Data::new(slot_clock))
                .configure(register_routers),
        )
        .await;

        let request = TestRequest::post()
            .uri(&format!("/eth/v1/validator/duties/attester/{epoch}"))
            .insert_header(("content-type", "application/json"))
            .set_payload(body.to_string())
            .to_request();
        call_service(&app, request).await
    }

    async fn expect_error(response: ServiceResponse, status: StatusCode) -> String {
        assert_eq!(response.status(), status);
        let body: ErrorMessage = read_body_json(response).await;
        assert_eq!(body.code, status.as_u16());
        body.message
    }

    #[actix_web::test]
    async fn test_duties_response_shape() {
        let node = node();
        let response = post_duties(&node, "0", r#"["0", "1"]"#).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = read_body_json(response).await;
        assert_eq!(body["dependent_root"], json!(GENESIS_ROOT));
        assert_eq!(body["execution_optimistic"], json!(false));

        let data = body["data"].as_array().expect("data is an array");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["validator_index"], json!("0"));
        assert_eq!(data[1]["validator_index"], json!("1"));
        for duty in data {
            assert!(duty["pubkey"].as_str().is_some_and(|key| key.len() == 98));
            assert_eq!(duty["committees_at_slot"], json!("1"));
            for field in [
                "committee_index",
                "committee_length",
                "validator_committee_index",
                "slot",
            ] {
                assert!(duty[field].is_string(), "{field} is quoted");
            }
        }
    }

    #[actix_web::test]
    async fn test_optimistic_head_is_flagged() {
        let node = node();
        node.status.set_optimistic(true);
        let response = post_duties(&node, "1", "[0]").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = read_body_json(response).await;
        assert_eq!(body["execution_optimistic"], json!(true));
    }

    #[actix_web::test]
    async fn test_epoch_beyond_next_is_bad_request() {
        let node = node();
        let message = expect_error(
            post_duties(&node, "2", r#"["0"]"#).await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        assert!(message.contains("Request epoch 2 cannot be greater than the next epoch 1"));
    }

    #[actix_web::test]
    async fn test_undecodable_epoch_is_bad_request() {
        let node = node();
        let message = expect_error(
            post_duties(&node, "first", r#"["0"]"#).await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        assert!(message.contains("Could not decode epoch"));
    }

    #[actix_web::test]
    async fn test_malformed_indices_are_bad_request() {
        let node = node();
        expect_error(
            post_duties(&node, "0", r#"["zero"]"#).await,
            StatusCode::BAD_REQUEST,
        )
        .await;
        expect_error(
            post_duties(&node, "0", r#"{"index": 0}"#).await,
            StatusCode::BAD_REQUEST,
        )
        .await;
    }

    #[actix_web::test]
    async fn test_unknown_validator_is_not_found() {
        let node = node();
        let message = expect_error(
            post_duties(&node, "0", r#"["1", "64"]"#).await,
            StatusCode::NOT_FOUND,
        )
        .await;
        assert!(message.contains("Invalid validator index 64"));
    }

    #[actix_web::test]
    async fn test_missing_state_is_not_found() {
        let node = node();
        node.clock.set_slot(32);
        expect_error(
            post_duties(&node, "1", r#"["0"]"#).await,
            StatusCode::NOT_FOUND,
        )
        .await;
    }

    #[actix_web::test]
    async fn test_syncing_node_is_unavailable() {
        let node = node();
        node.status.set_syncing(true);
        expect_error(
            post_duties(&node, "0", r#"["0"]"#).await,
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .await;
    }
}
