use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Catalog, Frequency, Variant};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn get(uri: &str) -> axum::response::Response {
    app()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap()
}

fn ids(variants: &[Variant]) -> Vec<&str> {
    variants.iter().map(|v| v.variant_id.as_str()).collect()
}

// --- collections ---

#[tokio::test]
async fn list_all_variants() {
    let resp = get("/api-service/variants").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let variants: Vec<Variant> = body_json(resp).await;
    assert_eq!(ids(&variants), ["1001", "1002", "1003", "2001", "3001"]);
}

#[tokio::test]
async fn routes_live_under_prefix() {
    let resp = get("/variants").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn variants_by_gene_keeps_order() {
    let resp = get("/api-service/variants/gene/CYP2D6").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let variants: Vec<Variant> = body_json(resp).await;
    assert_eq!(ids(&variants), ["1001", "1002", "1003"]);
}

#[tokio::test]
async fn known_gene_without_variants_is_empty_list() {
    let resp = get("/api-service/variants/gene/NUDT15").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let variants: Vec<Variant> = body_json(resp).await;
    assert!(variants.is_empty());
}

#[tokio::test]
async fn unknown_gene_returns_error_message() {
    let resp = get("/api-service/variants/gene/BRCA1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["errorMessage"], "Gene BRCA1 not found");
}

#[tokio::test]
async fn variants_by_allele_name_and_pharmvar_id() {
    let resp = get("/api-service/variants/allele/CYP2D6*10").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let variants: Vec<Variant> = body_json(resp).await;
    assert_eq!(ids(&variants), ["1001", "1003"]);

    let resp = get("/api-service/variants/allele/PV00003").await;
    let variants: Vec<Variant> = body_json(resp).await;
    assert_eq!(ids(&variants), ["2001"]);
}

#[tokio::test]
async fn variants_by_rsid_and_spdi() {
    let resp = get("/api-service/variants/rsid/rs1799853").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let variants: Vec<Variant> = body_json(resp).await;
    assert_eq!(ids(&variants), ["2001"]);

    let resp = get("/api-service/variants/spdi/NC_000022.11:42126610:C:G").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let variants: Vec<Variant> = body_json(resp).await;
    assert_eq!(ids(&variants), ["1003"]);
}

#[tokio::test]
async fn unknown_spdi_returns_404() {
    let resp = get("/api-service/variants/spdi/NC_000001.11:1:A:G").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["errorMessage"].as_str().unwrap().contains("NC_000001.11:1:A:G"));
}

// --- sub-resources ---

#[tokio::test]
async fn impact_is_plain_text() {
    let resp = get("/api-service/variants/rsid/rs1065852/impact").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
    assert_eq!(body_bytes(resp).await, "P34S");
}

#[tokio::test]
async fn impact_by_spdi() {
    let resp = get("/api-service/variants/spdi/NC_000010.11:94942289:C:T/impact").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "R144C");
}

#[tokio::test]
async fn impact_without_value_is_empty_body() {
    let resp = get("/api-service/variants/rsid/rs12248560/impact").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn frequency_by_rsid() {
    let resp = get("/api-service/variants/rsid/rs1799853/variant-frequency").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let freqs: Vec<Frequency> = body_json(resp).await;
    assert_eq!(freqs.len(), 2);
    assert_eq!(freqs[1].population, "African");
}

#[tokio::test]
async fn frequency_unknown_variant_returns_404() {
    let resp = get("/api-service/variants/spdi/nope/variant-frequency").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- custom catalog ---

#[tokio::test]
async fn empty_catalog_lists_nothing() {
    let resp = app_with(Catalog::default())
        .oneshot(
            Request::builder()
                .uri("/api-service/variants")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "[]");
}
