//! Unit tests for the subscriber search service

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use vc_shared::config::ClientConfig;

use crate::domain::entities::UserRecord;
use crate::errors::{SearchError, TransportError, ERROR_CODE_UNKNOWN};
use crate::services::search::{SearchCallback, SubscriberSearchService, JSON_CONTENT_TYPE};

use super::mocks::{CallbackOutcome, ChannelCallback, MockReply, MockTransport};

const ENDPOINT: &str = "http://backend.test/p2pVideoCall/caller/searchSubscriber";

fn service_with(transport: MockTransport) -> (SubscriberSearchService<MockTransport>, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let service = SubscriberSearchService::with_endpoint(Arc::clone(&transport), ENDPOINT);
    (service, transport)
}

fn alice() -> UserRecord {
    UserRecord::new(json!({"id": "u1", "name": "Alice"}))
}

async fn wait_until_idle(service: &SubscriberSearchService<MockTransport>) {
    for _ in 0..100 {
        if !service.has_pending() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("search never completed");
}

#[tokio::test]
async fn test_search_success_returns_record() {
    let (service, transport) = service_with(
        MockTransport::new()
            .with_reply(MockReply::json(200, json!({"code": 200, "data": {"id": "u1", "name": "Alice"}}))),
    );

    let result = service.search("+15551234").await;
    assert_eq!(result, Ok(alice()));

    assert_eq!(transport.request_count(), 1);
    let request = transport.request(0);
    assert_eq!(request.url, ENDPOINT);
    assert_eq!(request.content_type, JSON_CONTENT_TYPE);
    assert_eq!(request.body, json!({"mobile": "+15551234"}));
    assert!(!service.has_pending());
}

#[tokio::test]
async fn test_endpoint_from_config() {
    let config = ClientConfig::new("https://calls.example.com/");
    let transport = Arc::new(MockTransport::new());
    let service = SubscriberSearchService::new(Arc::clone(&transport), &config);

    assert_eq!(
        service.endpoint(),
        "https://calls.example.com/p2pVideoCall/caller/searchSubscriber"
    );
    service.search("13812345678").await.unwrap();
    assert_eq!(transport.request(0).url, service.endpoint());
}

#[tokio::test]
async fn test_phone_number_is_not_validated() {
    let (service, transport) = service_with(MockTransport::new().with_reply(MockReply::json(
        200,
        json!({"code": 400, "msg": "bad mobile"}),
    )));

    let result = service.search("").await;
    assert_eq!(
        result,
        Err(SearchError::Server {
            code: 400,
            message: Some("bad mobile".to_string())
        })
    );
    assert_eq!(transport.request(0).body, json!({"mobile": ""}));
}

#[tokio::test]
async fn test_server_codes_are_reported_verbatim() {
    for code in [401, 404, 500, 201] {
        let (service, _) = service_with(
            MockTransport::new().with_reply(MockReply::json(200, json!({ "code": code }))),
        );

        let error = service.search("+15551234").await.unwrap_err();
        assert!(error.is_server_error());
        assert_eq!(error.code(), code);
    }
}

#[tokio::test]
async fn test_transport_failure_reports_unknown_code() {
    let (service, _) = service_with(MockTransport::new().with_reply(MockReply::failure(
        TransportError::Connect("connection refused".to_string()),
    )));

    let error = service.search("+15551234").await.unwrap_err();
    assert_eq!(
        error,
        SearchError::Transport(TransportError::Connect("connection refused".to_string()))
    );
    assert_eq!(error.code(), ERROR_CODE_UNKNOWN);
}

#[tokio::test]
async fn test_http_error_without_envelope_uses_status() {
    let (service, _) = service_with(MockTransport::new().with_reply(MockReply::raw(502, "Bad Gateway")));

    let error = service.search("+15551234").await.unwrap_err();
    assert_eq!(
        error,
        SearchError::Server {
            code: 502,
            message: None
        }
    );
}

#[tokio::test]
async fn test_http_error_with_envelope_uses_envelope_code() {
    let (service, _) = service_with(
        MockTransport::new().with_reply(MockReply::json(401, json!({"code": 401, "msg": "token expired"}))),
    );

    let error = service.search("+15551234").await.unwrap_err();
    assert_eq!(error.code(), 401);
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let (service, _) = service_with(MockTransport::new().with_reply(MockReply::raw(200, "<html>")));

    let error = service.search("+15551234").await.unwrap_err();
    assert!(matches!(error, SearchError::Decode(_)));
    assert_eq!(error.code(), ERROR_CODE_UNKNOWN);
}

#[tokio::test]
async fn test_ok_without_data_forwards_null_record() {
    let (service, _) = service_with(
        MockTransport::new()
            .with_reply(MockReply::json(200, json!({"code": 200, "data": null})))
            .with_reply(MockReply::json(200, json!({"code": 200}))),
    );

    assert_eq!(service.search("+15551234").await, Ok(UserRecord::new(Value::Null)));
    assert_eq!(service.search("+15551234").await, Ok(UserRecord::new(Value::Null)));
}

#[tokio::test(start_paused = true)]
async fn test_callback_success_with_null_data() {
    let (service, _) = service_with(
        MockTransport::new().with_reply(MockReply::json(200, json!({"code": 200, "data": null}))),
    );
    let (callback, mut outcomes) = ChannelCallback::new();

    service.search_by_phone_number("+15551234", Some(callback.clone() as Arc<dyn SearchCallback>));

    assert_eq!(
        outcomes.recv().await,
        Some(CallbackOutcome::Success(UserRecord::new(Value::Null)))
    );
    assert!(timeout(Duration::from_secs(1), outcomes.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_new_search_supersedes_previous() {
    let (service, transport) = service_with(
        MockTransport::new()
            .with_reply(
                MockReply::json(200, json!({"code": 200, "data": {"id": "stale"}}))
                    .after(Duration::from_secs(10)),
            )
            .with_reply(MockReply::json(200, json!({"code": 200, "data": {"id": "u1", "name": "Alice"}}))),
    );

    let first = service.search("+15550000");
    // Let the first request reach the transport
    tokio::task::yield_now().await;
    assert_eq!(transport.request_count(), 1);

    let second = service.search("+15551234");
    assert_eq!(first.sequence() + 1, second.sequence());
    assert!(service.has_pending());

    assert_eq!(first.await, Err(SearchError::Superseded));
    assert_eq!(second.await, Ok(alice()));

    assert_eq!(transport.request_count(), 2);
    assert_eq!(transport.dropped_calls(), vec![0]);
    assert_eq!(transport.completed.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(!service.has_pending());
}

#[tokio::test]
async fn test_superseded_request_never_delivers() {
    let gate = Arc::new(Semaphore::new(0));
    let (service, transport) = service_with(
        MockTransport::gated(Arc::clone(&gate))
            .with_reply(MockReply::json(200, json!({"code": 200, "data": {"id": "u1", "name": "Alice"}}))),
    );

    let first = service.search("+15550000");
    let second = service.search("+15551234");
    gate.add_permits(2);

    assert_eq!(second.await, Ok(alice()));
    assert_eq!(first.await, Err(SearchError::Superseded));

    // The first task was aborted before it ever reached the transport
    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.request(0).body, json!({"mobile": "+15551234"}));
    assert!(transport.dropped_calls().is_empty());
    assert_eq!(transport.completed.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancel_pending_search() {
    let gate = Arc::new(Semaphore::new(0));
    let (service, _) = service_with(MockTransport::gated(Arc::clone(&gate)));

    let pending = service.search("+15551234");
    assert!(service.has_pending());

    assert!(service.cancel());
    assert!(!service.has_pending());
    assert!(!service.cancel());

    gate.add_permits(1);
    assert_eq!(pending.await, Err(SearchError::Cancelled));
}

#[tokio::test]
async fn test_search_after_cancel_works() {
    let gate = Arc::new(Semaphore::new(0));
    let (service, _) = service_with(
        MockTransport::gated(Arc::clone(&gate))
            .with_reply(MockReply::json(200, json!({"code": 200, "data": {"id": "u1", "name": "Alice"}}))),
    );

    let cancelled = service.search("+15550000");
    service.cancel();
    let fresh = service.search("+15551234");
    gate.add_permits(2);

    assert_eq!(fresh.await, Ok(alice()));
    assert!(cancelled.await.unwrap_err().is_abandoned());
}

#[tokio::test(start_paused = true)]
async fn test_callback_success_invoked_once() {
    let (service, _) = service_with(
        MockTransport::new()
            .with_reply(MockReply::json(200, json!({"code": 200, "data": {"id": "u1", "name": "Alice"}}))),
    );
    let (callback, mut outcomes) = ChannelCallback::new();

    service.search_by_phone_number("+15551234", Some(callback.clone() as Arc<dyn SearchCallback>));

    assert_eq!(outcomes.recv().await, Some(CallbackOutcome::Success(alice())));
    assert!(timeout(Duration::from_secs(1), outcomes.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_callback_fail_with_server_code() {
    for code in [401, 404] {
        let (service, _) = service_with(
            MockTransport::new().with_reply(MockReply::json(200, json!({ "code": code }))),
        );
        let (callback, mut outcomes) = ChannelCallback::new();

        service.search_by_phone_number("+15551234", Some(callback.clone() as Arc<dyn SearchCallback>));

        assert_eq!(outcomes.recv().await, Some(CallbackOutcome::Fail(code)));
        assert!(timeout(Duration::from_secs(1), outcomes.recv()).await.is_err());
    }
}

#[tokio::test(start_paused = true)]
async fn test_callback_fail_on_transport_error() {
    let (service, _) = service_with(MockTransport::new().with_reply(MockReply::failure(
        TransportError::Timeout("deadline elapsed".to_string()),
    )));
    let (callback, mut outcomes) = ChannelCallback::new();

    service.search_by_phone_number("+15551234", Some(callback.clone() as Arc<dyn SearchCallback>));

    assert_eq!(outcomes.recv().await, Some(CallbackOutcome::Fail(ERROR_CODE_UNKNOWN)));
    assert!(timeout(Duration::from_secs(1), outcomes.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_superseded_callback_is_not_invoked() {
    let gate = Arc::new(Semaphore::new(0));
    let (service, _) = service_with(
        MockTransport::gated(Arc::clone(&gate))
            .with_reply(MockReply::json(200, json!({"code": 200, "data": {"id": "u1", "name": "Alice"}}))),
    );
    let (stale_callback, mut stale_outcomes) = ChannelCallback::new();
    let (callback, mut outcomes) = ChannelCallback::new();

    let first = service.search_by_phone_number("+15550000", Some(stale_callback.clone() as Arc<dyn SearchCallback>));
    let second = service.search_by_phone_number("+15551234", Some(callback.clone() as Arc<dyn SearchCallback>));
    assert!(second > first);
    gate.add_permits(2);

    assert_eq!(outcomes.recv().await, Some(CallbackOutcome::Success(alice())));
    assert!(timeout(Duration::from_secs(1), stale_outcomes.recv()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_missing_callback_is_ignored() {
    let (service, transport) = service_with(
        MockTransport::new()
            .with_reply(MockReply::json(200, json!({"code": 200, "data": {"id": "u1"}})))
            .with_reply(MockReply::json(200, json!({"code": 404})))
            .with_reply(MockReply::failure(TransportError::Request("reset".to_string()))),
    );

    for _ in 0..3 {
        service.search_by_phone_number("+15551234", None);
        wait_until_idle(&service).await;
    }
    assert_eq!(transport.request_count(), 3);

    // The client keeps working afterwards
    let result = service.search("+15551234").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_sequence_numbers_increase() {
    let (service, _) = service_with(MockTransport::new());

    let first = service.search_by_phone_number("1", None);
    let second = service.search_by_phone_number("2", None);
    let third = service.search("3");

    assert_eq!(second, first + 1);
    assert_eq!(third.sequence(), second + 1);
    assert!(third.await.is_ok());
}
