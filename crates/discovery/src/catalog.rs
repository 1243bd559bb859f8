use std::collections::HashMap;

use buyerscope_lexicon::is_valid_hs_code;
use chrono::NaiveDate;

use crate::error::DiscoveryError;
use crate::model::Company;

/// Validated, read-only set of companies.
///
/// Ids are unique and non-empty, names are non-empty and every commodity is a
/// well-formed HS code. Country and cert codes are upper-cased, domains
/// lower-cased without a `www.` prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    companies: Vec<Company>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(companies: Vec<Company>) -> Result<Self, DiscoveryError> {
        let mut index = HashMap::with_capacity(companies.len());
        let mut out = Vec::with_capacity(companies.len());

        for (pos, mut company) in companies.into_iter().enumerate() {
            company.id = company.id.trim().to_string();
            if company.id.is_empty() {
                return Err(DiscoveryError::InvalidCatalog(format!(
                    "company at position {pos} has an empty id"
                )));
            }
            if company.name.trim().is_empty() {
                return Err(DiscoveryError::InvalidCatalog(format!(
                    "company '{}' has an empty name",
                    company.id
                )));
            }
            for code in &mut company.commodities {
                *code = code.trim().to_string();
                if !is_valid_hs_code(code) {
                    return Err(DiscoveryError::InvalidCatalog(format!(
                        "company '{}': invalid HS code '{code}'",
                        company.id
                    )));
                }
            }
            if index.insert(company.id.clone(), pos).is_some() {
                return Err(DiscoveryError::InvalidCatalog(format!(
                    "duplicate company id '{}'",
                    company.id
                )));
            }
            canonicalize(&mut company);
            out.push(company);
        }

        log::debug!("catalog: {} companies", out.len());
        Ok(Self {
            companies: out,
            index,
        })
    }

    /// Decode a JSON array of companies and validate it.
    pub fn from_json(input: &str) -> Result<Self, DiscoveryError> {
        let companies: Vec<Company> = serde_json::from_str(input)
            .map_err(|e| DiscoveryError::InvalidCatalog(format!("JSON: {e}")))?;
        Self::new(companies)
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn get(&self, id: &str) -> Option<&Company> {
        self.index.get(id).map(|&i| &self.companies[i])
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Most recent shipment across the catalog.
    pub fn newest_shipment(&self) -> Option<NaiveDate> {
        self.companies.iter().filter_map(|c| c.last_shipment_on).max()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Company> {
        let i = *self.index.get(id)?;
        Some(&mut self.companies[i])
    }
}

fn canonicalize(company: &mut Company) {
    let upper = |s: &String| s.trim().to_ascii_uppercase();
    company.hq_country = company
        .hq_country
        .as_ref()
        .map(upper)
        .filter(|s| !s.is_empty());
    company.origin_countries = company.origin_countries.iter().map(upper).collect();
    company.destination_countries = company.destination_countries.iter().map(upper).collect();
    company.certs = company.certs.iter().map(upper).collect();
    company.domain = company
        .domain
        .as_deref()
        .map(canonical_domain)
        .filter(|d| !d.is_empty());
}

/// `WWW.Example.com ` → `example.com`.
pub(crate) fn canonical_domain(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    lower.strip_prefix("www.").unwrap_or(&lower).to_string()
}
