mod common;

use common::{FakeAws, reconciler};
use serde_json::json;
use stackhook::{CfnResponse, Event, ResourceError, Status};
use tokio_test::assert_err;

#[test]
fn test_registry_contents() {
    let aws = FakeAws::new();
    let reconciler = reconciler(&aws);
    assert_eq!(
        reconciler.registry().resource_types(),
        vec!["Custom::ECS-Cluster", "Custom::LambdaMetricFilters"]
    );
}

#[tokio::test]
async fn test_unregistered_resource_type_makes_no_call() {
    let aws = FakeAws::new();
    let reconciler = reconciler(&aws);

    for request_type in ["Create", "Update", "Delete"] {
        let event = Event::new("Custom::SQS-QueuePolicy", request_type)
            .with_properties(json!({"ClusterName": "prod"}))
            .with_physical_resource_id("arn:aws:ecs:us-east-1:123456789012:cluster/prod");

        let failure = assert_err!(reconciler.handle(&event).await);
        assert!(matches!(failure.error, ResourceError::UnknownResourceType(_)));
    }
    assert!(aws.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_request_type_for_every_handler() {
    let aws = FakeAws::new();
    let reconciler = reconciler(&aws);

    for resource_type in ["Custom::ECS-Cluster", "Custom::LambdaMetricFilters"] {
        let event = Event::new(resource_type, "Rollback");
        let failure = assert_err!(reconciler.handle(&event).await);
        assert!(matches!(
            failure.error,
            ResourceError::UnknownRequestType(ref t) if t == "Rollback"
        ));
    }
    assert!(aws.calls().is_empty());
}

#[tokio::test]
async fn test_cloudformation_roundtrip() {
    let aws = FakeAws::new();
    let reconciler = reconciler(&aws);

    let event: Event = serde_json::from_value(json!({
        "RequestType": "Create",
        "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:custom-resources",
        "ResponseURL": "https://cloudformation-custom-resource-response.example/abc",
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/panther/guid",
        "RequestId": "req-1",
        "LogicalResourceId": "WebCluster",
        "ResourceType": "Custom::ECS-Cluster",
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:custom-resources",
            "ClusterName": "prod"
        }
    }))
    .unwrap();

    let outcome = reconciler.handle(&event).await;
    let response = CfnResponse::from_outcome(&event, &outcome);

    assert_eq!(response.status, Status::Success);
    assert_eq!(response.request_id, "req-1");
    assert_eq!(response.logical_resource_id, "WebCluster");
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "Status": "SUCCESS",
            "PhysicalResourceId": "arn:aws:ecs:us-east-1:123456789012:cluster/prod",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/panther/guid",
            "RequestId": "req-1",
            "LogicalResourceId": "WebCluster"
        })
    );
}
