// ============================================================================
// Tests d'intégration : client API contre un serveur simulé (wiremock)
// ============================================================================

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stockter::api::{ApiClient, ApiError, ApiRequest};
use stockter::config::ApiConfig;
use stockter::dispatcher::{execute, Command, Outcome};
use stockter::models::{
    QuarterlySelection, RankingMetric, RankingSelection, SeriesMetric, SortDirection,
};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ApiConfig {
        base_url: format!("{}/", server.uri()),
        ..ApiConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_search_sends_query_and_returns_stocks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .and(query_param("query", "삼성"))
        .respond_with(ok(json!({
            "stocks": [
                {"종목명": "삼성전자", "종목코드": "005930"},
                {"종목명": "삼성SDI", "종목코드": "006400"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client.fetch_records(&ApiRequest::search("삼성")).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name().as_deref(), Some("삼성전자"));
}

#[tokio::test]
async fn test_annual_ranking_sends_year() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-roe"))
        .and(query_param("year", "2022"))
        .respond_with(ok(json!({"stocks": [{"종목명": "HMM", "ROE": 45.1}]})))
        .expect(1)
        .mount(&server)
        .await;

    let selection = RankingSelection {
        metric: RankingMetric::Roe,
        year: Some("2022".to_string()),
        direction: SortDirection::Top,
    };
    let outcome = execute(&client_for(&server), Command::Ranking(selection.clone())).await;

    match outcome {
        Outcome::Ranking { selection: s, result } => {
            assert_eq!(s, selection);
            assert_eq!(result.unwrap().len(), 1);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_bottom_per_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bottom-per"))
        .and(query_param("year", "2024"))
        .respond_with(ok(json!({"stocks": [{"종목명": "기아", "PER": 3.9}]})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::ranking(&RankingSelection {
        metric: RankingMetric::Per,
        year: Some("2024".to_string()),
        direction: SortDirection::Bottom,
    });
    let records = client_for(&server).fetch_records(&request).await.unwrap();
    assert_eq!(records[0].name().as_deref(), Some("기아"));
}

#[tokio::test]
async fn test_quarterly_ranking_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quarterly-financial"))
        .and(query_param("quarter", "2024-Q1"))
        .and(query_param("metric", "영업이익"))
        .respond_with(ok(json!({"stocks": [{"종목명": "LG", "영업이익 (2024-Q1)": 1200}]})))
        .expect(1)
        .mount(&server)
        .await;

    let request = ApiRequest::quarterly_ranking(&QuarterlySelection {
        metric: RankingMetric::OperatingIncome,
        quarter: "2024-Q1".to_string(),
    });
    let records = client_for(&server).fetch_records(&request).await.unwrap();
    assert!(records[0].contains("영업이익 (2024-Q1)"));
}

#[tokio::test]
async fn test_empty_list_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ok(json!({"stocks": []})))
        .mount(&server)
        .await;

    let result = client_for(&server).fetch_records(&ApiRequest::search("없음")).await;
    assert!(matches!(result, Err(ApiError::Empty)));
}

#[tokio::test]
async fn test_error_field_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/financial-annual-sales"))
        .and(query_param("stock_name", "삼성전자"))
        .respond_with(ok(json!({"error": "종목을 찾을 수 없습니다"})))
        .mount(&server)
        .await;

    let request = ApiRequest::annual_series(SeriesMetric::Sales, "삼성전자");
    let result = client_for(&server).fetch_records(&request).await;
    match result {
        Err(ApiError::Server(message)) => assert_eq!(message, "종목을 찾을 수 없습니다"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_status_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-marketcap"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let request = ApiRequest::ranking(&RankingSelection {
        metric: RankingMetric::MarketCap,
        year: None,
        direction: SortDirection::Top,
    });
    let result = client_for(&server).fetch_records(&request).await;
    match result {
        Err(e @ ApiError::Status(_)) => assert!(!e.is_no_data()),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_quarterly_series_uses_its_list_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/financial-quarterly-debt-ratio"))
        .and(query_param("stock_name", "카카오"))
        .respond_with(ok(json!({
            "quarterly_debt_ratio": [
                {"분기": "2024.Q1", "부채비율": 85.2},
                {"분기": "2024.Q2", "부채비율": 81.0}
            ]
        })))
        .mount(&server)
        .await;

    let outcome = execute(
        &client_for(&server),
        Command::QuarterlySeries {
            stock_name: "카카오".to_string(),
            metric: SeriesMetric::DebtRatio,
        },
    )
    .await;

    match outcome {
        Outcome::QuarterlySeries { stock_name, metric, result } => {
            assert_eq!(stock_name, "카카오");
            assert_eq!(metric, SeriesMetric::DebtRatio);
            assert_eq!(result.unwrap().len(), 2);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_latest_news_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latest-news"))
        .and(query_param("stock_name", "삼성전자"))
        .respond_with(ok(json!({
            "latest_news": [{
                "title": "삼성전자 실적 발표",
                "summary": "영업이익 증가",
                "date": "2024-10-31",
                "link": "https://news.example.com/1"
            }]
        })))
        .mount(&server)
        .await;

    let news = client_for(&server)
        .fetch_news(&ApiRequest::latest_news("삼성전자"))
        .await
        .unwrap();

    assert_eq!(news.len(), 1);
    assert_eq!(news[0].title, "삼성전자 실적 발표");
    assert_eq!(news[0].date, "2024-10-31");
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = ApiConfig {
        // Port réservé : la connexion est refusée
        base_url: "http://127.0.0.1:1".to_string(),
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config).unwrap();

    let result = client.fetch_records(&ApiRequest::search("삼성")).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}
