use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::debug;

/// Path prefix the real service mounts its routes under.
pub const API_PREFIX: &str = "/api-service";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frequency {
    pub population: String,
    pub frequency: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub hgvs: String,
    pub impact: Option<String>,
    pub position: String,
    pub reference_collections: Vec<String>,
    pub reference_location: String,
    pub reference_sequence: String,
    pub rs_id: Option<String>,
    pub url: String,
    pub variant_frequency: Vec<Frequency>,
    pub variant_id: String,
}

/// A served variant plus the keys it can be looked up by.
#[derive(Clone, Debug)]
pub struct Entry {
    pub gene: String,
    /// Allele names and PharmVar IDs carrying the variant.
    pub alleles: Vec<String>,
    pub spdi: String,
    pub variant: Variant,
}

/// Read-only data set behind the router.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Genes the service knows, including ones without variants.
    pub genes: Vec<String>,
    pub entries: Vec<Entry>,
}

impl Catalog {
    fn by_gene(&self, symbol: &str) -> Option<Vec<Variant>> {
        if !self.genes.iter().any(|g| g.eq_ignore_ascii_case(symbol)) {
            return None;
        }
        Some(self.collect(|e| e.gene.eq_ignore_ascii_case(symbol)))
    }

    fn collect(&self, pred: impl Fn(&Entry) -> bool) -> Vec<Variant> {
        self.entries
            .iter()
            .filter(|e| pred(e))
            .map(|e| e.variant.clone())
            .collect()
    }
}

pub type Db = Arc<Catalog>;

/// JSON error body in the shape the service uses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "errorMessage": self.message }))).into_response()
    }
}

pub fn app() -> Router {
    app_with(fixtures())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    let variants = Router::new()
        .route("/variants", get(list_variants))
        .route("/variants/gene/{symbol}", get(variants_by_gene))
        .route("/variants/allele/{identifier}", get(variants_by_allele))
        .route("/variants/rsid/{rs_id}", get(variants_by_rsid))
        .route("/variants/rsid/{rs_id}/impact", get(impact_by_rsid))
        .route("/variants/rsid/{rs_id}/variant-frequency", get(frequency_by_rsid))
        .route("/variants/spdi/{spdi}", get(variants_by_spdi))
        .route("/variants/spdi/{spdi}/impact", get(impact_by_spdi))
        .route("/variants/spdi/{spdi}/variant-frequency", get(frequency_by_spdi))
        .with_state(db);
    Router::new().nest(API_PREFIX, variants)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_variants(State(db): State<Db>) -> Json<Vec<Variant>> {
    Json(db.collect(|_| true))
}

async fn variants_by_gene(
    State(db): State<Db>,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<Variant>>, ApiError> {
    debug!(%symbol, "variants by gene");
    db.by_gene(&symbol)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Gene {symbol} not found")))
}

async fn variants_by_allele(
    State(db): State<Db>,
    Path(identifier): Path<String>,
) -> Result<Json<Vec<Variant>>, ApiError> {
    non_empty(
        db.collect(|e| e.alleles.iter().any(|a| a == &identifier)),
        format!("Allele {identifier} not found"),
    )
}

async fn variants_by_rsid(
    State(db): State<Db>,
    Path(rs_id): Path<String>,
) -> Result<Json<Vec<Variant>>, ApiError> {
    non_empty(rsid_matches(&db, &rs_id), format!("Variant {rs_id} not found"))
}

async fn variants_by_spdi(
    State(db): State<Db>,
    Path(spdi): Path<String>,
) -> Result<Json<Vec<Variant>>, ApiError> {
    non_empty(spdi_matches(&db, &spdi), format!("Variant {spdi} not found"))
}

async fn impact_by_rsid(State(db): State<Db>, Path(rs_id): Path<String>) -> Result<String, ApiError> {
    impact(rsid_matches(&db, &rs_id), &rs_id)
}

async fn impact_by_spdi(State(db): State<Db>, Path(spdi): Path<String>) -> Result<String, ApiError> {
    impact(spdi_matches(&db, &spdi), &spdi)
}

async fn frequency_by_rsid(
    State(db): State<Db>,
    Path(rs_id): Path<String>,
) -> Result<Json<Vec<Frequency>>, ApiError> {
    frequency(rsid_matches(&db, &rs_id), &rs_id)
}

async fn frequency_by_spdi(
    State(db): State<Db>,
    Path(spdi): Path<String>,
) -> Result<Json<Vec<Frequency>>, ApiError> {
    frequency(spdi_matches(&db, &spdi), &spdi)
}

fn rsid_matches(db: &Catalog, rs_id: &str) -> Vec<Variant> {
    db.collect(|e| e.variant.rs_id.as_deref() == Some(rs_id))
}

fn spdi_matches(db: &Catalog, spdi: &str) -> Vec<Variant> {
    db.collect(|e| e.spdi == spdi)
}

fn non_empty(variants: Vec<Variant>, missing: String) -> Result<Json<Vec<Variant>>, ApiError> {
    if variants.is_empty() {
        Err(ApiError::not_found(missing))
    } else {
        Ok(Json(variants))
    }
}

/// Impact of the first match. A variant without an impact yields an empty
/// body.
fn impact(variants: Vec<Variant>, key: &str) -> Result<String, ApiError> {
    variants
        .into_iter()
        .next()
        .map(|v| v.impact.unwrap_or_default())
        .ok_or_else(|| ApiError::not_found(format!("Variant {key} not found")))
}

fn frequency(variants: Vec<Variant>, key: &str) -> Result<Json<Vec<Frequency>>, ApiError> {
    if variants.is_empty() {
        return Err(ApiError::not_found(format!("Variant {key} not found")));
    }
    Ok(Json(
        variants.into_iter().flat_map(|v| v.variant_frequency).collect(),
    ))
}

#[allow(clippy::too_many_arguments)]
fn entry(
    gene: &str,
    alleles: &[&str],
    spdi: &str,
    variant_id: &str,
    hgvs: &str,
    impact: Option<&str>,
    rs_id: &str,
    frequencies: &[(&str, f64)],
) -> Entry {
    let (sequence, rest) = hgvs.split_once(":g.").unwrap_or((hgvs, ""));
    let position: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    Entry {
        gene: gene.to_string(),
        alleles: alleles.iter().map(|a| a.to_string()).collect(),
        spdi: spdi.to_string(),
        variant: Variant {
            hgvs: hgvs.to_string(),
            impact: impact.map(str::to_string),
            position,
            reference_collections: vec!["GRCh38".to_string()],
            reference_location: "Genomic".to_string(),
            reference_sequence: sequence.to_string(),
            rs_id: Some(rs_id.to_string()),
            url: format!("https://www.pharmvar.org/variant/{variant_id}"),
            variant_frequency: frequencies
                .iter()
                .map(|(population, frequency)| Frequency {
                    population: population.to_string(),
                    frequency: *frequency,
                })
                .collect(),
            variant_id: variant_id.to_string(),
        },
    }
}

/// The default data set: a handful of well-known CYP variants and one gene
/// without any.
pub fn fixtures() -> Catalog {
    Catalog {
        genes: ["CYP2C9", "CYP2C19", "CYP2D6", "NUDT15"]
            .iter()
            .map(|g| g.to_string())
            .collect(),
        entries: vec![
            entry(
                "CYP2D6",
                &["CYP2D6*4", "CYP2D6*10", "PV00001"],
                "NC_000022.11:42130691:G:A",
                "1001",
                "NC_000022.11:g.42130692G>A",
                Some("P34S"),
                "rs1065852",
                &[("European", 0.2), ("East Asian", 0.57)],
            ),
            entry(
                "CYP2D6",
                &["CYP2D6*4", "PV00001"],
                "NC_000022.11:42128944:C:T",
                "1002",
                "NC_000022.11:g.42128945C>T",
                Some("splice defect"),
                "rs3892097",
                &[("European", 0.19)],
            ),
            entry(
                "CYP2D6",
                &["CYP2D6*2", "CYP2D6*4", "CYP2D6*10", "PV00001", "PV00002"],
                "NC_000022.11:42126610:C:G",
                "1003",
                "NC_000022.11:g.42126611C>G",
                Some("S486T"),
                "rs1135840",
                &[("European", 0.43)],
            ),
            entry(
                "CYP2C9",
                &["CYP2C9*2", "PV00003"],
                "NC_000010.11:94942289:C:T",
                "2001",
                "NC_000010.11:g.94942290C>T",
                Some("R144C"),
                "rs1799853",
                &[("European", 0.13), ("African", 0.02)],
            ),
            entry(
                "CYP2C19",
                &["CYP2C19*17", "PV00004"],
                "NC_000010.11:94761899:C:T",
                "3001",
                "NC_000010.11:g.94761900C>T",
                None,
                "rs12248560",
                &[],
            ),
        ],
    }
}
