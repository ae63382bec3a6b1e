//! End-to-end tests against a mock Oxford service.
//!
//! Each test drives the public `Client` over the real reqwest transport and
//! checks the wire shape of the request and the decoded result.

use oxford::config::Config;
use oxford::{
    Client, Credential, DetectOptions, HttpTransport, ImageSource, OxfordError, ThumbnailOptions,
    VisualFeatures,
};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_bytes, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "test-subscription-key";

fn client_for(server: &MockServer) -> Client {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.retry.max_retries = 2;
    config.retry.default_delay_secs = 0;

    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    Client::with_transport(Credential::new(KEY).unwrap(), Arc::new(transport), &config)
}

fn detection_response() -> serde_json::Value {
    json!([{
        "faceId": "c5c24a82-6845-4031-9d5d-978df9175426",
        "faceRectangle": {"left": 68, "top": 97, "width": 64, "height": 97},
        "attributes": {"age": 38.0, "gender": "male"}
    }])
}

#[tokio::test]
async fn test_detect_by_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/face/v0/detections"))
        .and(header("ocp-apim-subscription-key", KEY))
        .and(query_param("analyzesAge", "true"))
        .and(body_json(json!({"url": "https://example.com/face.jpg"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(detection_response()))
        .expect(1)
        .mount(&server)
        .await;

    let faces = client_for(&server)
        .face()
        .detect(
            ImageSource::url("https://example.com/face.jpg"),
            &DetectOptions::all(),
        )
        .await
        .unwrap();

    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_rectangle.width, 64);
}

#[tokio::test]
async fn test_detect_by_path_uploads_file_bytes() {
    let server = MockServer::start().await;
    let image = b"\xFF\xD8\xFFfake-jpeg\xFF\xD9".to_vec();

    Mock::given(method("POST"))
        .and(path("/face/v0/detections"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_bytes(image.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(detection_response()))
        .expect(1)
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&image).unwrap();

    let faces = client_for(&server)
        .face()
        .detect(ImageSource::path(file.path()), &DetectOptions::default())
        .await
        .unwrap();
    assert_eq!(faces.len(), 1);
}

#[tokio::test]
async fn test_throttled_call_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/vision/v1/analyses"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("Rate limit is exceeded"),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vision/v1/analyses"))
        .and(query_param("visualFeatures", "Color,Faces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"faces": []})))
        .expect(1)
        .mount(&server)
        .await;

    let features = VisualFeatures::from_flags([("Faces", true), ("Color", true)]);
    let result = client_for(&server)
        .vision()
        .analyze(ImageSource::stream(vec![1, 2, 3]), &features)
        .await
        .unwrap();
    assert_eq!(result, Some(json!({"faces": []})));
}

#[tokio::test]
async fn test_persistent_throttling_exhausts_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "0")
                .set_body_string("Rate limit is exceeded"),
        )
        // ceiling of 2: the first call plus three retries
        .expect(4)
        .mount(&server)
        .await;

    let err = client_for(&server).person_group().list().await.unwrap_err();
    match err {
        OxfordError::RetryExhausted { retries, body } => {
            assert_eq!(retries, 2);
            assert!(body.contains("Rate limit"));
        }
        other => panic!("expected RetryExhausted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/face/v0/persongroups/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let group = client_for(&server)
        .person_group()
        .get("missing")
        .await
        .unwrap();
    assert!(group.is_none());
}

#[tokio::test]
async fn test_server_error_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/face/v0/verifications"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": "BadArgument", "message": "Invalid face id."})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .face()
        .verify("bad", "worse")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("BadArgument"));
}

#[tokio::test]
async fn test_thumbnail_returns_bytes() {
    let server = MockServer::start().await;
    let jpeg = vec![0xFF, 0xD8, 0x00, 0x11, 0xFF, 0xD9];
    Mock::given(method("POST"))
        .and(path("/vision/v1/thumbnails"))
        .and(query_param("width", "64"))
        .and(query_param("height", "64"))
        .and(query_param("smartCropping", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(jpeg.clone(), "image/jpeg"))
        .mount(&server)
        .await;

    let options = ThumbnailOptions {
        width: 64,
        height: 64,
        smart_cropping: true,
    };
    let bytes = client_for(&server)
        .vision()
        .thumbnail(ImageSource::url("https://example.com/a.jpg"), &options)
        .await
        .unwrap();
    assert_eq!(bytes, Some(jpeg));
}

#[tokio::test]
async fn test_person_enrollment_flow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/face/v0/persongroups/friends/persons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/face/v0/persongroups/friends/persons"))
        .and(body_json(json!({"faceIds": ["f1"], "name": "billg"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"personId": "p-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/face/v0/persongroups/friends/persons/p-1/faces/f2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let person = client
        .person()
        .create_or_update("friends", &["f1".to_string()], "billg", None)
        .await
        .unwrap();
    assert_eq!(person.person_id, "p-1");
    assert_eq!(person.face_ids, vec!["f1".to_string()]);

    client
        .person()
        .add_face("friends", &person.person_id, "f2", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_key_is_rejected_before_any_request() {
    assert!(matches!(
        Client::new(""),
        Err(OxfordError::InvalidCredential)
    ));
}
