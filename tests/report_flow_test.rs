//! End-to-end report flow: configuration, KiwiVM client, rendering
//!
//! Run with: cargo test --test report_flow_test

use chrono::Utc;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bwh_traffic_bot::bwh::{collect_traffic, render_traffic_report, BwhClient, ReportStyle};
use bwh_traffic_bot::core::config::BwhSettings;

#[tokio::test]
async fn test_report_from_environment_settings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/getServiceInfo"))
        .and(query_param("veid", "111"))
        .and(query_param("api_key", "key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": 0,
            "hostname": "tokyo",
            "plan": "bwh2g",
            "plan_monthly_data": 2199023255552u64,
            "data_counter": 549755813888u64,
            "data_next_reset": 1735689600
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/getServiceInfo"))
        .and(query_param("veid", "222"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api_url = format!("{}/v1", server.uri());
    let settings = BwhSettings::from_lookup(|key| match key {
        "BWH_API_KEY" => Some("key".to_string()),
        "BWH_VEID" => Some("111, 222".to_string()),
        "BWH_API_URL" => Some(api_url.clone()),
        "BWH_MAX_RETRIES" => Some("0".to_string()),
        _ => None,
    })
    .unwrap();

    let client = BwhClient::from_settings(&settings).unwrap();
    let entries = collect_traffic(&client, &settings.veids).await;
    let report = render_traffic_report(&entries, ReportStyle::Plain, &Utc);

    assert_eq!(
        report,
        "搬瓦工 VPS 流量总报告\n\
         \n------\n\
         主机: tokyo\n\
         套餐: bwh2g\n\
         已用流量: 512.0 GB / 2048.0 GB\n\
         使用率: 25.0%\n\
         流量重置日期: 2025-01-01\n\
         \n------\n\
         VPS (VEID: 222)\n\
         查询失败: 请求搬瓦工 API 时发生网络错误"
    );
}
