use std::time::Duration;

use campaign_client::{ApiClient, ApiError, BackendApi, CampaignPayload, ClientSettings};
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let settings = ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    };
    ApiClient::new(settings).expect("client")
}

fn sample_payload() -> CampaignPayload {
    CampaignPayload {
        course: "AI/ML".to_string(),
        city: "Mumbai".to_string(),
        campaign_type: "email".to_string(),
        trend_integration: true,
        localization: "basic".to_string(),
    }
}

#[tokio::test]
async fn health_accepts_the_healthy_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"healthy","version":"1.0.0"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    client_for(&server).health().await.expect("healthy");
}

#[tokio::test]
async fn health_rejects_any_other_status_even_on_http_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"status":"unhealthy"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).health().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Service {
            message: Some("backend reported status \"unhealthy\"".to_string())
        }
    );
}

#[tokio::test]
async fn health_treats_malformed_bodies_as_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>", "text/html"))
        .mount(&server)
        .await;

    let err = client_for(&server).health().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn market_intelligence_decodes_the_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/market-intelligence"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "status": "success",
                "data": {
                    "city_performance": {
                        "Bangalore": {
                            "positions_available": 6195,
                            "companies_hiring": 44,
                            "avg_positions_per_company": 140.8
                        }
                    },
                    "total_companies": 472,
                    "total_positions": 6195
                },
                "timestamp": "2026-08-25T10:00:00"
            }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let data = client_for(&server)
        .market_intelligence()
        .await
        .expect("snapshot");
    assert_eq!(data.total_companies, 472);
    let bangalore = data.city_performance.get("Bangalore").expect("city");
    assert_eq!(bangalore.positions_available, 6195);
    assert_eq!(bangalore.companies_hiring, 44);
}

#[tokio::test]
async fn envelope_failure_status_is_an_error_regardless_of_http_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/market-intelligence"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"error","message":"Error retrieving market data"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).market_intelligence().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Service {
            message: Some("Error retrieving market data".to_string())
        }
    );
}

#[tokio::test]
async fn non_2xx_maps_to_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/market-intelligence"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).market_intelligence().await.unwrap_err();
    assert_eq!(err, ApiError::Http(500));
}

#[tokio::test]
async fn generate_campaign_posts_wire_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-campaign"))
        .and(body_json(serde_json::json!({
            "course": "AI/ML",
            "city": "Mumbai",
            "campaign_type": "email",
            "trend_integration": true,
            "localization": "basic"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "status": "success",
                "data": {
                    "content": {"email_subject": "X"},
                    "predictions": {
                        "ctr": "16.8%",
                        "conversion_rate": "6.5%",
                        "roas": "4.2x",
                        "cost_per_conversion": "₹240"
                    },
                    "image_url": "/static/images/default_campaign.png"
                }
            }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let data = client_for(&server)
        .generate_campaign(&sample_payload())
        .await
        .expect("campaign");
    assert_eq!(data.content.email_subject.as_deref(), Some("X"));
    assert_eq!(data.content.email_body, None);
    assert_eq!(data.predictions.unwrap().roas, "4.2x");
    assert_eq!(
        data.image_url.as_deref(),
        Some("/static/images/default_campaign.png")
    );
}

#[tokio::test]
async fn generate_campaign_surfaces_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-campaign"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"error","message":"Course catalog unavailable"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_campaign(&sample_payload())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Service {
            message: Some("Course catalog unavailable".to_string())
        }
    );
}

#[tokio::test]
async fn generate_campaign_without_message_has_no_server_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-campaign"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"status":"error"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_campaign(&sample_payload())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::Service { message: None });
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(r#"{"status":"healthy"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    };
    let client = ApiClient::new(settings).expect("client");
    let err = client.health().await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn missing_data_field_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/market-intelligence"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"status":"success"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).market_intelligence().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
