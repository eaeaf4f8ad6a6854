use std::io::Cursor;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain::create_memory_pool;
use domain::importer::{import_reader, BankCache, ImportOptions};
use serde_json::Value;
use server::{build_app, AppState};
use tower::ServiceExt; // for oneshot

const SAMPLE: &str = "\
Bank Name,IFSC Code,Branch,City
Test Bank,TEST0001,Main,Pune
Test Bank,TEST0002,Annex,Pune
Other Bank,OTH0001,HQ,Mumbai
";

async fn app_with(csv: &str) -> Router {
    let pool = create_memory_pool().await.unwrap();
    let mut cache = BankCache::new();
    import_reader(
        &pool,
        Cursor::new(csv.to_string()),
        ImportOptions::default(),
        &mut cache,
    )
    .await
    .unwrap();

    build_app(AppState::new(pool))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn bank_id(app: &Router, name: &str) -> i64 {
    let (_, body) = get(app, &format!("/banks?q={}", name.replace(' ', "%20"))).await;
    body["banks"][0]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_and_index() {
    let app = app_with(SAMPLE).await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Bank API running");
    assert_eq!(body["endpoints"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn end_to_end_sample() {
    let app = app_with(SAMPLE).await;

    let (status, body) = get(&app, "/banks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["limit"], 100);
    assert_eq!(body["banks"][0]["name"], "Other Bank");
    assert_eq!(body["banks"][1]["name"], "Test Bank");

    let test_bank = bank_id(&app, "Test Bank").await;
    let (status, body) = get(&app, &format!("/banks/{}/branches?q=Main", test_bank)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["branches"][0]["ifsc"], "TEST0001");
    assert!(body["branches"][0].get("bank").is_none());

    let (status, body) = get(&app, "/branches?bank_name=test&city=pune").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["limit"], 50);
    assert!(body["branches"]
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["bank"] == "Test Bank" && b["city"] == "Pune"));

    let (status, body) = get(&app, "/branches/TEST0002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ifsc"], "TEST0002");
    assert_eq!(body["branch"], "Annex");
    assert_eq!(body["bank"]["name"], "Test Bank");
    assert_eq!(body["bank"]["id"], test_bank);
}

#[tokio::test]
async fn branch_not_found() {
    let app = app_with(SAMPLE).await;

    let (status, body) = get(&app, "/branches/NOPE0000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("NOPE0000"));
}

#[tokio::test]
async fn non_integer_params_are_client_errors() {
    let app = app_with(SAMPLE).await;

    for uri in [
        "/banks?limit=abc",
        "/banks?offset=1.5",
        "/banks/abc/branches",
        "/banks/1/branches?limit=ten",
        "/branches?offset=x",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn limit_is_clamped_and_total_is_stable() {
    let mut csv = String::from("bank,ifsc,branch\n");
    for i in 0..1005 {
        csv.push_str(&format!("Bulk Bank,BULK{:05},Branch {:05}\n", i, i));
    }
    let app = app_with(&csv).await;

    let (_, body) = get(&app, "/branches?limit=5000").await;
    assert_eq!(body["limit"], 1000);
    assert_eq!(body["branches"].as_array().unwrap().len(), 1000);
    assert_eq!(body["total"], 1005);

    let (_, body) = get(&app, "/branches?limit=10&offset=1000").await;
    assert_eq!(body["branches"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 1005);
    assert_eq!(body["branches"][0]["ifsc"], "BULK01000");

    let (_, body) = get(&app, "/branches?offset=5000").await;
    assert_eq!(body["branches"].as_array().unwrap().len(), 0);
    assert_eq!(body["total"], 1005);
}

#[tokio::test]
async fn search_filters() {
    let csv = "\
Bank Name,IFSC,Branch Name,Address,City
Test Bank,TEST0001,Test Branch,Station Road,Pune
Test Bank,TEST0002,Camp,TEST BRANCH LANE,Pune
Other Bank,OTH0001,Test Branch,Fort,Mumbai
";
    let app = app_with(csv).await;

    // q matches branch name OR address, case-insensitively
    let (_, body) = get(&app, "/branches?q=test%20branch").await;
    assert_eq!(body["total"], 3);

    let (_, body) = get(&app, "/branches?q=branch&city=MUMBAI").await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["branches"][0]["ifsc"], "OTH0001");

    // ifsc is exact
    let (_, body) = get(&app, "/branches?ifsc=TEST0001").await;
    assert_eq!(body["total"], 1);
    let (_, body) = get(&app, "/branches?ifsc=TEST").await;
    assert_eq!(body["total"], 0);

    let (_, body) = get(&app, "/branches?ifsc=TEST0001&bank_name=other").await;
    assert_eq!(body["total"], 0);
}

#[cfg(feature = "openapi")]
#[tokio::test]
async fn openapi_document_lists_paths() {
    let app = app_with(SAMPLE).await;

    let (status, body) = get(&app, "/api/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    for path in ["/banks", "/banks/{bank_id}/branches", "/branches", "/branches/{ifsc}", "/health"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
}

#[tokio::test]
async fn padded_filter_values_match_trimmed() {
    let app = app_with(SAMPLE).await;

    let (status, body) = get(&app, "/branches?q=%20Main%20&city=%20Pune").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["branches"][0]["ifsc"], "TEST0001");
}
