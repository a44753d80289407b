//! HTTP transport against a local WS-Management stand-in

use serde::Deserialize;
use std::sync::Arc;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wsmclient::{AuthScheme, ClientConfig, Service, WsmanClient};
use wsmsoap::{SelectorSet, WsmanError, build_soap_fault};

const URI: &str = "http://intel.com/wbem/wscim/1/amt-schema/1/AMT_GeneralSettings";
const CHALLENGE: &str = r#"Digest realm="Digest:0E5E0000000000000000000000000000", nonce="ZmFrZS1ub25jZQ==", stale="false", qop="auth""#;

const GET_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?><a:Envelope xmlns:a="http://www.w3.org/2003/05/soap-envelope" xmlns:b="http://schemas.xmlsoap.org/ws/2004/08/addressing" xmlns:c="http://schemas.dmtf.org/wbem/wsman/1/wsman.xsd" xmlns:g="http://intel.com/wbem/wscim/1/amt-schema/1/AMT_GeneralSettings"><a:Header><b:To>http://schemas.xmlsoap.org/ws/2004/08/addressing/role/anonymous</b:To><b:RelatesTo>0</b:RelatesTo><b:Action a:mustUnderstand="true">http://schemas.xmlsoap.org/ws/2004/09/transfer/GetResponse</b:Action><b:MessageID>uuid:00000000-8086-8086-8086-000000000001</b:MessageID><c:ResourceURI>http://intel.com/wbem/wscim/1/amt-schema/1/AMT_GeneralSettings</c:ResourceURI></a:Header><a:Body><g:AMT_GeneralSettings><g:HostName>amt-host</g:HostName><g:DomainName>example.com</g:DomainName></g:AMT_GeneralSettings></a:Body></a:Envelope>"#;

const DELETE_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?><a:Envelope xmlns:a="http://www.w3.org/2003/05/soap-envelope" xmlns:b="http://schemas.xmlsoap.org/ws/2004/08/addressing"><a:Header><b:Action a:mustUnderstand="true">http://schemas.xmlsoap.org/ws/2004/09/transfer/DeleteResponse</b:Action></a:Header><a:Body></a:Body></a:Envelope>"#;

#[derive(Debug, Deserialize)]
struct GeneralSettings {
    #[serde(rename = "HostName")]
    host_name: String,
    #[serde(rename = "DomainName", default)]
    domain_name: String,
}

fn config_for(server: &MockServer, auth: AuthScheme) -> ClientConfig {
    let mut config = ClientConfig::new("127.0.0.1", "user", "pass");
    config.port = Some(server.address().port());
    config.auth = auth;
    config.timeout_secs = 5;
    config
}

fn service(config: &ClientConfig) -> Service<GeneralSettings> {
    let client = Arc::new(WsmanClient::new(config).unwrap());
    Service::new(client, URI)
}

fn message_id(request: &str) -> u64 {
    let start = request.find("<a:MessageID>").unwrap() + "<a:MessageID>".len();
    let end = request.find("</a:MessageID>").unwrap();
    request[start..end].parse().unwrap()
}

fn authorization_headers(requests: &[wiremock::Request]) -> Vec<Option<String>> {
    requests
        .iter()
        .map(|r| {
            r.headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .collect()
}

#[tokio::test]
async fn test_digest_handshake_then_session_reuse() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wsman"))
        .and(header_exists("authorization"))
        .and(header("content-type", "application/soap+xml; charset=utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GET_RESPONSE))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/wsman"))
        .respond_with(ResponseTemplate::new(401).insert_header("WWW-Authenticate", CHALLENGE))
        .mount(&server)
        .await;

    let settings = service(&config_for(&server, AuthScheme::Digest));

    let first = settings.get(None).await.unwrap();
    let value = first.body.as_get().unwrap();
    assert_eq!(value.host_name, "amt-host");
    assert_eq!(value.domain_name, "example.com");
    assert_eq!(first.header.relates_to, "0");
    assert_eq!(first.xml_output(), GET_RESPONSE);

    settings.get(None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    // challenge round trip on the first call only
    assert_eq!(requests.len(), 3);

    let headers = authorization_headers(&requests);
    assert_eq!(headers[0], None);
    let second = headers[1].as_deref().unwrap();
    assert!(second.starts_with("Digest username=\"user\""));
    assert!(second.contains("realm=\"Digest:0E5E0000000000000000000000000000\""));
    assert!(second.contains("uri=\"/wsman\""));
    assert!(second.contains("nc=00000001"));
    let third = headers[2].as_deref().unwrap();
    assert!(third.contains("nc=00000002"));
}

#[tokio::test]
async fn test_rejected_digest_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).insert_header("WWW-Authenticate", CHALLENGE))
        .expect(2)
        .mount(&server)
        .await;

    let settings = service(&config_for(&server, AuthScheme::Digest));
    let err = settings.get(None).await.unwrap_err();

    assert!(matches!(err.source, WsmanError::Authentication(_)));
    assert!(err.exchange.xml_input.contains("/transfer/Get</a:Action>"));
    assert!(err.exchange.xml_output.is_empty());
}

#[tokio::test]
async fn test_401_without_challenge() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let settings = service(&config_for(&server, AuthScheme::Digest));
    let err = settings.get(None).await.unwrap_err();
    assert!(matches!(err.source, WsmanError::Authentication(_)));
}

#[tokio::test]
async fn test_basic_credentials_are_preemptive() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DELETE_RESPONSE))
        .expect(1)
        .mount(&server)
        .await;

    let settings = service(&config_for(&server, AuthScheme::Basic));
    let response = settings
        .delete(Some(SelectorSet::single("InstanceID", "x")))
        .await
        .unwrap();
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_rejected_basic_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let settings = service(&config_for(&server, AuthScheme::Basic));
    let err = settings.get(None).await.unwrap_err();
    assert!(matches!(err.source, WsmanError::Authentication(_)));
}

#[tokio::test]
async fn test_fault_in_http_400_is_a_remote_fault() {
    let server = MockServer::start().await;
    let fault = build_soap_fault(
        "a:Sender",
        Some("b:DestinationUnreachable"),
        "No route can be determined to reach the destination role defined by the WS-Addressing To.",
    )
    .unwrap();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(fault.clone()))
        .mount(&server)
        .await;

    let settings = service(&config_for(&server, AuthScheme::Basic));
    let err = settings.get(None).await.unwrap_err();

    let remote = err.source.fault().unwrap();
    assert_eq!(remote.code, "a:Sender");
    assert_eq!(remote.subcode.as_deref(), Some("b:DestinationUnreachable"));
    assert_eq!(err.exchange.xml_output, fault);
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    let mut config = ClientConfig::new("127.0.0.1", "user", "pass");
    config.port = Some(1);
    config.timeout_secs = 5;

    let settings = service(&config);
    let err = settings.get(None).await.unwrap_err();

    assert!(matches!(err.source, WsmanError::Transport(_)));
    assert!(!err.exchange.xml_input.is_empty());
    assert!(err.exchange.xml_output.is_empty());
}

#[tokio::test]
async fn test_sequential_calls_differ_by_one_message_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DELETE_RESPONSE))
        .expect(2)
        .mount(&server)
        .await;

    let mut config = config_for(&server, AuthScheme::Basic);
    config.message_id_base = 41;
    let settings = service(&config);

    let first = settings.delete(None).await.unwrap();
    let second = settings.delete(None).await.unwrap();

    assert_eq!(message_id(first.xml_input()), 41);
    assert_eq!(message_id(second.xml_input()), message_id(first.xml_input()) + 1);

    let requests = server.received_requests().await.unwrap();
    let bodies: Vec<String> = requests
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).to_string())
        .collect();
    assert_eq!(bodies[0], first.xml_input());
    assert_eq!(bodies[1], second.xml_input());
}
