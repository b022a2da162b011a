//! Integration tests for the client convenience layer

mod common;

use common::{CallCounter, RecordingTransport, TEST_BODY, TestError, https_only};
use httpi::{
    DEFAULT_RESPONSE_BODY, HttpClient, HttpRequest, HttpResponse, TransportError, new_client,
    set_request_validator, set_response_producer,
};

const URL: &str = "http://example.com";

#[tokio::test]
async fn test_default_client() {
    let client = new_client(Vec::new());

    let response = client.get(URL).await.unwrap();

    assert_eq!(response.status, 200);
    assert!(response.text().unwrap().contains(DEFAULT_RESPONSE_BODY));
}

#[tokio::test]
async fn test_client_set_response_producer() {
    let client = new_client(Vec::new());

    // custom body
    let reset = set_response_producer(&client, |_| Ok(HttpResponse::with_status(200, TEST_BODY)));
    let response = client.get(URL).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.text().unwrap(), TEST_BODY);
    reset.restore();

    // custom status code
    let reset = set_response_producer(&client, |_| Ok(HttpResponse::with_status(201, TEST_BODY)));
    let response = client.get(URL).await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.text().unwrap(), TEST_BODY);
    reset.restore();

    // custom error
    let reset = set_response_producer(&client, |_| Err(TransportError::custom(TestError)));
    let err = client.get(URL).await.unwrap_err();
    assert!(err.downcast_ref::<TestError>().is_some());
    reset.restore();

    let response = client.get(URL).await.unwrap();
    assert_eq!(response.text().unwrap(), DEFAULT_RESPONSE_BODY);
}

#[tokio::test]
async fn test_client_set_request_validator() {
    let client = new_client(Vec::new());

    // valid request
    let reset = set_request_validator(&client, |_| Ok(()));
    let response = client.get(URL).await.unwrap();
    assert_eq!(response.status, 200);
    reset.restore();

    // invalid request
    let reset = set_request_validator(&client, |_| Err(TransportError::custom(TestError)));
    let err = client.get(URL).await.unwrap_err();
    assert!(err.downcast_ref::<TestError>().is_some());
    reset.restore();

    // validate request
    let reset = set_request_validator(&client, https_only);
    assert!(
        client
            .get("https://hypertexttransferprotocolsecure.com")
            .await
            .is_ok()
    );
    assert!(
        client
            .get("http://hypertexttransferprotocol.com")
            .await
            .is_err()
    );
    reset.restore();

    // back to default
    let response = client.get(URL).await.unwrap();
    assert_eq!(response.status, 200);
    assert!(response.text().unwrap().contains(DEFAULT_RESPONSE_BODY));
}

#[tokio::test]
async fn test_client_options() {
    let client = new_client([
        httpi::with_response_producer(|_| Ok(HttpResponse::with_status(201, TEST_BODY))),
        httpi::with_request_validator(https_only),
    ]);

    let response = client.get("https://example.com").await.unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.text().unwrap(), TEST_BODY);

    let err = client.get("http://example.com").await.unwrap_err();
    assert!(err.downcast_ref::<TestError>().is_some());
}

#[tokio::test]
async fn test_post_carries_body() {
    let client = new_client([httpi::with_response_producer(|req| {
        Ok(HttpResponse::with_status(
            200,
            req.body.clone().unwrap_or_default(),
        ))
    })]);

    let response = client.post("https://example.com/echo", "ping").await.unwrap();
    assert_eq!(response.text().unwrap(), "ping");
}

#[tokio::test]
async fn test_invalid_url_rejected_before_transport() {
    let validated = CallCounter::default();
    let counter = validated.clone();
    let client = new_client(Vec::new());
    let _ = set_request_validator(&client, move |_| {
        counter.hit();
        Ok(())
    });

    let err = client
        .send(HttpRequest::new("GET", "not a url"))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::InvalidUrl { ref url, .. } if url == "not a url"));
    assert_eq!(validated.count(), 0);
}

#[tokio::test]
async fn test_client_over_custom_transport() {
    let transport = RecordingTransport::new(202, "accepted");
    let client = HttpClient::new(transport.clone());

    let response = client.get("https://example.com").await.unwrap();

    assert_eq!(response.status, 202);
    assert_eq!(transport.seen().len(), 1);
    assert!(client.interceptor().is_none());
}

#[test]
#[should_panic(expected = "not an Interceptor")]
fn test_set_response_producer_panics_without_interceptor() {
    let client = HttpClient::new(RecordingTransport::new(200, ""));
    let _ = set_response_producer(&client, |_| Ok(HttpResponse::with_status(200, "")));
}

#[test]
#[should_panic(expected = "not an Interceptor")]
fn test_set_request_validator_panics_without_interceptor() {
    let client = HttpClient::new(RecordingTransport::new(200, ""));
    let _ = set_request_validator(&client, |_| Ok(()));
}

#[tokio::test]
async fn test_cloned_clients_share_interceptor() {
    let client = new_client(Vec::new());
    let other = client.clone();

    let reset = set_response_producer(&client, |_| Ok(HttpResponse::with_status(503, "")));
    assert_eq!(other.get(URL).await.unwrap().status, 503);
    reset.restore();
    assert_eq!(other.get(URL).await.unwrap().status, 200);
}
