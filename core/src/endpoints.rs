//! Path templates for the PharmVar variant resources.
//!
//! # Design
//! Each `VariantEndpoint` maps to one template with at most one named
//! placeholder. `fill` is the only way to turn a template into a request
//! path; a placeholder without a supplied value is an error rather than an
//! empty path segment. Values are substituted verbatim.

use std::fmt;

use crate::error::{Error, Result};

/// A variant resource exposed by the PharmVar API service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantEndpoint {
    All,
    Allele,
    Gene,
    RsId,
    RsIdImpact,
    RsIdFrequency,
    Spdi,
    SpdiImpact,
    SpdiFrequency,
}

impl VariantEndpoint {
    pub const ALL: [VariantEndpoint; 9] = [
        VariantEndpoint::All,
        VariantEndpoint::Allele,
        VariantEndpoint::Gene,
        VariantEndpoint::RsId,
        VariantEndpoint::RsIdImpact,
        VariantEndpoint::RsIdFrequency,
        VariantEndpoint::Spdi,
        VariantEndpoint::SpdiImpact,
        VariantEndpoint::SpdiFrequency,
    ];

    pub fn template(self) -> &'static str {
        match self {
            VariantEndpoint::All => "variants",
            VariantEndpoint::Allele => "variants/allele/{identifier}",
            VariantEndpoint::Gene => "variants/gene/{symbol}",
            VariantEndpoint::RsId => "variants/rsid/{rsId}",
            VariantEndpoint::RsIdImpact => "variants/rsid/{rsId}/impact",
            VariantEndpoint::RsIdFrequency => "variants/rsid/{rsId}/variant-frequency",
            VariantEndpoint::Spdi => "variants/spdi/{spdi}",
            VariantEndpoint::SpdiImpact => "variants/spdi/{spdi}/impact",
            VariantEndpoint::SpdiFrequency => "variants/spdi/{spdi}/variant-frequency",
        }
    }

    /// Name of the placeholder the template expects, if any.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            VariantEndpoint::All => None,
            VariantEndpoint::Allele => Some("identifier"),
            VariantEndpoint::Gene => Some("symbol"),
            VariantEndpoint::RsId | VariantEndpoint::RsIdImpact | VariantEndpoint::RsIdFrequency => {
                Some("rsId")
            }
            VariantEndpoint::Spdi | VariantEndpoint::SpdiImpact | VariantEndpoint::SpdiFrequency => {
                Some("spdi")
            }
        }
    }

    /// Substitute every `{name}` in the template with the value paired with
    /// `name` in `values`.
    ///
    /// Returns `Error::InvalidArgument` naming the first placeholder that has
    /// no value. Extra pairs are ignored.
    pub fn fill(self, values: &[(&str, &str)]) -> Result<String> {
        let template = self.template();
        let mut path = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let close = match rest[open..].find('}') {
                Some(offset) => open + offset,
                None => break,
            };
            let name = &rest[open + 1..close];
            let value = values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "missing value for placeholder `{name}` in endpoint `{template}`"
                    ))
                })?;
            path.push_str(&rest[..open]);
            path.push_str(value);
            rest = &rest[close + 1..];
        }
        path.push_str(rest);
        Ok(path)
    }
}

impl fmt::Display for VariantEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}
