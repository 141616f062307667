//! Typed queries against the PharmVar variant resources.
//!
//! # Design
//! Every operation is one GET: fill the matching `VariantEndpoint`, send it
//! through the `RestAdapter`, and decode the envelope into domain values.
//! Argument checks run before the adapter is touched, so an invalid call
//! never reaches the network.

use serde_json::Value;

use crate::adapter::RestAdapter;
use crate::config::ClientConfig;
use crate::endpoints::VariantEndpoint;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, ResponseFormat, Transport, UreqTransport};
use crate::types::VariantCollection;

/// Identifies a single variant by exactly one of its rsID or SPDI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantLocator<'a> {
    RsId(&'a str),
    Spdi(&'a str),
}

impl<'a> VariantLocator<'a> {
    /// Accepts exactly one of `rs_id` and `spdi`.
    pub fn from_parts(rs_id: Option<&'a str>, spdi: Option<&'a str>) -> Result<Self> {
        match (rs_id, spdi) {
            (Some(rs_id), None) => Ok(VariantLocator::RsId(rs_id)),
            (None, Some(spdi)) => Ok(VariantLocator::Spdi(spdi)),
            (Some(_), Some(_)) => Err(Error::InvalidArgument(
                "only one of rs_id or spdi can be provided, not both".to_string(),
            )),
            (None, None) => Err(Error::InvalidArgument(
                "either rs_id or spdi must be provided".to_string(),
            )),
        }
    }

    fn impact_path(self) -> Result<String> {
        match self {
            VariantLocator::RsId(rs_id) => VariantEndpoint::RsIdImpact.fill(&[("rsId", rs_id)]),
            VariantLocator::Spdi(spdi) => VariantEndpoint::SpdiImpact.fill(&[("spdi", spdi)]),
        }
    }

    fn frequency_path(self) -> Result<String> {
        match self {
            VariantLocator::RsId(rs_id) => VariantEndpoint::RsIdFrequency.fill(&[("rsId", rs_id)]),
            VariantLocator::Spdi(spdi) => VariantEndpoint::SpdiFrequency.fill(&[("spdi", spdi)]),
        }
    }
}

/// Client for the PharmVar API service.
///
/// ```no_run
/// use pharmvar_core::{ClientConfig, PharmVarClient};
///
/// let client = PharmVarClient::new(ClientConfig::default());
/// let variants = client.variants_by_gene("CYP2D6")?;
/// for variant in &variants {
///     println!("{variant}");
/// }
/// # Ok::<(), pharmvar_core::Error>(())
/// ```
#[derive(Debug)]
pub struct PharmVarClient<T = UreqTransport> {
    adapter: RestAdapter<T>,
}

impl PharmVarClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            adapter: RestAdapter::from_config(config),
        }
    }

    /// Client configured from `PHARMVAR_*` environment variables.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl Default for PharmVarClient<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> PharmVarClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            adapter: RestAdapter::new(config, transport),
        }
    }

    pub fn adapter(&self) -> &RestAdapter<T> {
        &self.adapter
    }

    /// Every variant in the PharmVar database.
    pub fn all_variants(&self) -> Result<VariantCollection> {
        self.collection(VariantEndpoint::All.fill(&[])?)
    }

    pub fn variants_by_gene(&self, symbol: &str) -> Result<VariantCollection> {
        self.collection(VariantEndpoint::Gene.fill(&[("symbol", symbol)])?)
    }

    /// `identifier` is either a PharmVar ID or an allele name.
    pub fn variants_by_allele(&self, identifier: &str) -> Result<VariantCollection> {
        self.collection(VariantEndpoint::Allele.fill(&[("identifier", identifier)])?)
    }

    pub fn variants_by_rsid(&self, rs_id: &str) -> Result<VariantCollection> {
        self.collection(VariantEndpoint::RsId.fill(&[("rsId", rs_id)])?)
    }

    /// `spdi` is `sequence:position:deletion:insertion`.
    pub fn variants_by_spdi(&self, spdi: &str) -> Result<VariantCollection> {
        self.collection(VariantEndpoint::Spdi.fill(&[("spdi", spdi)])?)
    }

    /// Plain-text impact of the variant named by exactly one of `rs_id` and
    /// `spdi`.
    pub fn variant_impact(&self, rs_id: Option<&str>, spdi: Option<&str>) -> Result<String> {
        self.impact_of(VariantLocator::from_parts(rs_id, spdi)?)
    }

    pub fn impact_of(&self, locator: VariantLocator<'_>) -> Result<String> {
        let endpoint = locator.impact_path()?;
        self.adapter
            .execute(HttpMethod::Get, &endpoint, &[], None, ResponseFormat::Text)
            .map(|result| result.into_text())
    }

    /// Population frequency records of the variant named by exactly one of
    /// `rs_id` and `spdi`.
    pub fn variant_frequency(&self, rs_id: Option<&str>, spdi: Option<&str>) -> Result<Vec<Value>> {
        self.frequency_of(VariantLocator::from_parts(rs_id, spdi)?)
    }

    pub fn frequency_of(&self, locator: VariantLocator<'_>) -> Result<Vec<Value>> {
        let endpoint = locator.frequency_path()?;
        self.adapter.get(&endpoint, &[])?.into_records(&endpoint)
    }

    fn collection(&self, endpoint: String) -> Result<VariantCollection> {
        let records = self.adapter.get(&endpoint, &[])?.into_records(&endpoint)?;
        VariantCollection::from_records(records).map_err(|source| Error::BadResponseBody {
            endpoint,
            source: source.into(),
        })
    }
}
