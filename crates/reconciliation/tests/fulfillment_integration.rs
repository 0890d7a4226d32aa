//! Integration tests for fulfillment reporting.

use common::{AppId, ChannelId, GatewayTransactionId, PlatformApiUrl, Secret, ShippingCompanyCode};
use gateway::{
    GatewayCall, GatewayError, InMemoryGatewayClient, InMemoryGatewayClientFactory,
};
use reconciliation::{
    FulfillmentTrackingNumberUpdatedEvent, FulfillmentTrackingResponse, FulfillmentTrackingUseCase,
    MalformedReason, WebhookRejection,
};
use serde_json::{Value, json};
use store::{
    ChannelConfig, ChannelConfigRepo, InMemoryChannelConfigRepo, InMemoryTransactionRecordRepo,
    RecordScope, TransactionRecordRepo,
};

type TestUseCase = FulfillmentTrackingUseCase<
    InMemoryChannelConfigRepo,
    InMemoryGatewayClientFactory,
    InMemoryTransactionRecordRepo,
>;

const APP_ID: &str = "app-1";
const CHANNEL_ID: &str = "channel-1";
const PSP_REFERENCE: &str = "NP-1";

struct TestHarness {
    use_case: TestUseCase,
    configs: InMemoryChannelConfigRepo,
    records: InMemoryTransactionRecordRepo,
    gateway: InMemoryGatewayClient,
}

impl TestHarness {
    async fn new() -> Self {
        let configs = InMemoryChannelConfigRepo::new();
        let records = InMemoryTransactionRecordRepo::new();
        let gateway = InMemoryGatewayClient::new();

        configs
            .save_channel_config(&scope(), &ChannelId::new(CHANNEL_ID), channel_config())
            .await
            .unwrap();

        let use_case = FulfillmentTrackingUseCase::new(
            configs.clone(),
            InMemoryGatewayClientFactory::new(gateway.clone()),
            records.clone(),
        );

        Self {
            use_case,
            configs,
            records,
            gateway,
        }
    }

    async fn execute(
        &self,
        event: Value,
    ) -> Result<FulfillmentTrackingResponse, WebhookRejection> {
        let event: FulfillmentTrackingNumberUpdatedEvent = serde_json::from_value(event).unwrap();
        self.use_case.execute(&scope(), &event).await
    }
}

fn scope() -> RecordScope {
    RecordScope::new(
        PlatformApiUrl::new("https://shop.example.com/graphql/"),
        AppId::new(APP_ID),
    )
}

fn channel_config() -> ChannelConfig {
    ChannelConfig {
        name: "Main channel".to_string(),
        merchant_code: "merchant".to_string(),
        terminal_id: "terminal".to_string(),
        secret_code: Secret::new("secret".to_string()),
        use_sandbox: true,
        shipping_company_code: ShippingCompanyCode::new("50000"),
        sku_as_name: true,
    }
}

fn event_with(tracking_number: Value, metadata_code: Value, transactions: Value) -> Value {
    json!({
        "fulfillment": {
            "trackingNumber": tracking_number,
            "shippingCompanyCode": metadata_code
        },
        "order": {
            "id": "order-1",
            "channel": { "id": CHANNEL_ID },
            "transactions": transactions
        }
    })
}

fn owned_transaction() -> Value {
    json!({
        "pspReference": PSP_REFERENCE,
        "createdBy": { "__typename": "App", "id": APP_ID }
    })
}

fn valid_event() -> Value {
    event_with(json!("TRACK-1"), Value::Null, json!([owned_transaction()]))
}

fn reported_company_code(calls: &[GatewayCall]) -> ShippingCompanyCode {
    match calls {
        [GatewayCall::ReportFulfillment { payload, options }] => {
            assert!(options.reject_multiple_results);
            payload.transactions[0].pd_company_code.clone()
        }
        other => panic!("expected one fulfillment report, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reports_fulfillment_and_records_tracking_number() {
    let h = TestHarness::new().await;

    let response = h.execute(valid_event()).await.unwrap();

    assert_eq!(response, FulfillmentTrackingResponse::Success);

    let calls = h.gateway.calls().await;
    match calls.as_slice() {
        [GatewayCall::ReportFulfillment { payload, .. }] => {
            let transaction = &payload.transactions[0];
            assert_eq!(transaction.np_transaction_id, GatewayTransactionId::new(PSP_REFERENCE));
            assert_eq!(transaction.slip_no, "TRACK-1");
            assert_eq!(transaction.pd_company_code, ShippingCompanyCode::new("50000"));
        }
        other => panic!("expected one fulfillment report, got {other:?}"),
    }

    let record = h
        .records
        .get_transaction(&scope(), &GatewayTransactionId::new(PSP_REFERENCE))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.tracking_number.as_deref(), Some("TRACK-1"));
    assert_eq!(record.fulfillment_shipping_company_code, None);
}

#[tokio::test]
async fn test_metadata_shipping_company_code_overrides_channel_default() {
    let h = TestHarness::new().await;

    h.execute(event_with(
        json!("TRACK-1"),
        json!("59020"),
        json!([owned_transaction()]),
    ))
    .await
    .unwrap();

    assert_eq!(
        reported_company_code(&h.gateway.calls().await),
        ShippingCompanyCode::new("59020")
    );

    let record = h
        .records
        .get_transaction(&scope(), &GatewayTransactionId::new(PSP_REFERENCE))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        record.fulfillment_shipping_company_code,
        Some(ShippingCompanyCode::new("59020"))
    );
}

#[tokio::test]
async fn test_record_uses_transaction_id_issued_by_gateway() {
    let h = TestHarness::new().await;
    h.gateway
        .set_issued_transaction_id(Some(GatewayTransactionId::new("NP-ISSUED")))
        .await;

    h.execute(valid_event()).await.unwrap();

    let issued = h
        .records
        .get_transaction(&scope(), &GatewayTransactionId::new("NP-ISSUED"))
        .await
        .unwrap();
    assert!(issued.is_some());
}

#[tokio::test]
async fn test_gateway_rejection_is_failure_response() {
    let h = TestHarness::new().await;
    let error = GatewayError::FulfillmentReport("unknown carrier".to_string());
    h.gateway.set_report_failure(Some(error.clone())).await;

    let response = h.execute(valid_event()).await.unwrap();

    assert_eq!(response, FulfillmentTrackingResponse::Failure(error));
    assert_eq!(h.records.record_count().await, 0);
}

#[tokio::test]
async fn test_ambiguous_gateway_answer_is_failure_response() {
    let h = TestHarness::new().await;
    h.gateway.set_result_count(2).await;

    let response = h.execute(valid_event()).await.unwrap();

    assert_eq!(
        response,
        FulfillmentTrackingResponse::Failure(GatewayError::MultipleResults(2))
    );
}

#[tokio::test]
async fn test_missing_channel_config_is_not_configured() {
    let h = TestHarness::new().await;
    let mut event = valid_event();
    event["order"]["channel"]["id"] = json!("unknown-channel");

    let result = h.execute(event).await;

    assert_eq!(result, Err(WebhookRejection::AppIsNotConfigured));
    assert_eq!(h.gateway.call_count().await, 0);
}

#[tokio::test]
async fn test_config_lookup_failure_is_not_configured() {
    let h = TestHarness::new().await;
    h.configs.set_fail_on_read(true).await;

    let result = h.execute(valid_event()).await;

    assert_eq!(result, Err(WebhookRejection::AppIsNotConfigured));
}

#[tokio::test]
async fn test_missing_fulfillment_is_malformed() {
    let h = TestHarness::new().await;
    let mut event = valid_event();
    event["fulfillment"] = Value::Null;

    let result = h.execute(event).await;

    assert_eq!(
        result,
        Err(WebhookRejection::MalformedRequest(
            MalformedReason::MissingTrackingNumber
        ))
    );
    assert_eq!(h.gateway.call_count().await, 0);
}

#[tokio::test]
async fn test_empty_tracking_number_is_malformed_without_gateway_call() {
    let h = TestHarness::new().await;

    let result = h
        .execute(event_with(json!(""), Value::Null, json!([owned_transaction()])))
        .await;

    assert_eq!(
        result,
        Err(WebhookRejection::MalformedRequest(
            MalformedReason::MissingTrackingNumber
        ))
    );
    assert_eq!(h.gateway.call_count().await, 0);
    assert_eq!(h.records.record_count().await, 0);
}

#[tokio::test]
async fn test_order_without_transactions_is_malformed() {
    let h = TestHarness::new().await;

    let result = h
        .execute(event_with(json!("TRACK-1"), Value::Null, json!([])))
        .await;

    assert_eq!(
        result,
        Err(WebhookRejection::MalformedRequest(
            MalformedReason::MissingTransactions
        ))
    );
}

#[tokio::test]
async fn test_multiple_transactions_are_malformed() {
    let h = TestHarness::new().await;

    let result = h
        .execute(event_with(
            json!("TRACK-1"),
            Value::Null,
            json!([owned_transaction(), owned_transaction()]),
        ))
        .await;

    assert_eq!(
        result,
        Err(WebhookRejection::MalformedRequest(
            MalformedReason::MultipleTransactions(2)
        ))
    );
}

#[tokio::test]
async fn test_transaction_created_by_user_is_malformed() {
    let h = TestHarness::new().await;

    let result = h
        .execute(event_with(
            json!("TRACK-1"),
            Value::Null,
            json!([{ "pspReference": PSP_REFERENCE, "createdBy": { "__typename": "User" } }]),
        ))
        .await;

    assert_eq!(
        result,
        Err(WebhookRejection::MalformedRequest(
            MalformedReason::NotCreatedByApp
        ))
    );
}

#[tokio::test]
async fn test_transaction_created_by_other_installation_is_malformed() {
    let h = TestHarness::new().await;

    let result = h
        .execute(event_with(
            json!("TRACK-1"),
            Value::Null,
            json!([{
                "pspReference": PSP_REFERENCE,
                "createdBy": { "__typename": "App", "id": "different-app-id" }
            }]),
        ))
        .await;

    assert_eq!(
        result,
        Err(WebhookRejection::MalformedRequest(
            MalformedReason::CreatedByOtherInstallation
        ))
    );
    assert_eq!(h.gateway.call_count().await, 0);
}

#[tokio::test]
async fn test_record_store_failure_is_broken_app() {
    let h = TestHarness::new().await;
    h.records.set_fail_on_update(true).await;

    let result = h.execute(valid_event()).await;

    assert!(matches!(result, Err(WebhookRejection::BrokenApp(_))));
    assert_eq!(h.gateway.call_count().await, 1);
}

#[tokio::test]
async fn test_client_built_from_channel_credentials() {
    let configs = InMemoryChannelConfigRepo::new();
    configs
        .save_channel_config(&scope(), &ChannelId::new(CHANNEL_ID), channel_config())
        .await
        .unwrap();
    let factory = InMemoryGatewayClientFactory::new(InMemoryGatewayClient::new());
    let use_case = FulfillmentTrackingUseCase::new(
        configs,
        factory.clone(),
        InMemoryTransactionRecordRepo::new(),
    );

    let event: FulfillmentTrackingNumberUpdatedEvent =
        serde_json::from_value(valid_event()).unwrap();
    use_case.execute(&scope(), &event).await.unwrap();

    let created_with = factory.created_with();
    assert_eq!(created_with.len(), 1);
    assert_eq!(created_with[0].terminal_id, "terminal");
    assert_eq!(created_with[0].merchant_code, "merchant");
}
