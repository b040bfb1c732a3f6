use crate::utils::error::{KrogerError, Result};
use crate::utils::validation::validate_range;
use std::fmt;
use std::str::FromStr;

pub const MAX_SEARCH_TERMS: usize = 8;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_RADIUS_MILES: u32 = 10;
pub const MAX_RADIUS_MILES: u32 = 100;
pub const DEFAULT_CHAIN: &str = "Kroger";

pub type QueryParams = Vec<(&'static str, String)>;

/// Fulfillment filter codes accepted by the Products API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FulfillmentType {
    InStore,
    Curbside,
    Delivery,
    ShipToHome,
}

impl FulfillmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStore => "ais",
            Self::Curbside => "csp",
            Self::Delivery => "dth",
            Self::ShipToHome => "sth",
        }
    }
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentType {
    type Err = KrogerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ais" => Ok(Self::InStore),
            "csp" => Ok(Self::Curbside),
            "dth" => Ok(Self::Delivery),
            "sth" => Ok(Self::ShipToHome),
            other => Err(KrogerError::validation(format!(
                "unknown fulfillment type {:?}, expected one of ais, csp, dth, sth",
                other
            ))),
        }
    }
}

/// Filters for `GET /products`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub terms: Vec<String>,
    pub brand: Option<String>,
    pub fulfillment: Option<FulfillmentType>,
    pub location_id: Option<String>,
    pub product_id: Option<String>,
    pub top_n: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            brand: None,
            fulfillment: None,
            location_id: None,
            product_id: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.terms.push(term.into());
        self
    }

    pub fn terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms.extend(terms.into_iter().map(Into::into));
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn fulfillment(mut self, fulfillment: FulfillmentType) -> Self {
        self.fulfillment = Some(fulfillment);
        self
    }

    /// Adds store-specific price, aisle and inventory data to the results.
    pub fn location_id(mut self, location_id: impl Into<String>) -> Self {
        self.location_id = Some(location_id.into());
        self
    }

    pub fn product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        if self.terms.len() > MAX_SEARCH_TERMS {
            return Err(KrogerError::validation(format!(
                "Number of search terms must be less than or equal to {}, got {}",
                MAX_SEARCH_TERMS,
                self.terms.len()
            )));
        }
        validate_top_n(self.top_n)?;

        let mut params = QueryParams::new();
        let terms: Vec<&str> = self
            .terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if !terms.is_empty() {
            params.push(("filter.term", terms.join(" ")));
        }
        push_opt(&mut params, "filter.brand", self.brand.as_deref());
        push_opt(
            &mut params,
            "filter.fulfillment",
            self.fulfillment.map(|f| f.as_str()),
        );
        push_opt(&mut params, "filter.locationId", self.location_id.as_deref());
        push_opt(&mut params, "filter.productId", self.product_id.as_deref());
        Ok(params)
    }
}

/// Filters for `GET /locations`. Exactly one of zip code or coordinates is required.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    pub zip_code: Option<String>,
    pub lat_long: Option<(f64, f64)>,
    pub radius_miles: u32,
    pub chain: Option<String>,
    pub department: Option<String>,
    pub location_ids: Vec<String>,
    pub top_n: usize,
}

impl Default for LocationQuery {
    fn default() -> Self {
        Self {
            zip_code: None,
            lat_long: None,
            radius_miles: DEFAULT_RADIUS_MILES,
            chain: Some(DEFAULT_CHAIN.to_string()),
            department: None,
            location_ids: Vec::new(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl LocationQuery {
    pub fn near_zip(zip_code: impl Into<String>) -> Self {
        Self {
            zip_code: Some(zip_code.into()),
            ..Self::default()
        }
    }

    pub fn near_lat_long(latitude: f64, longitude: f64) -> Self {
        Self {
            lat_long: Some((latitude, longitude)),
            ..Self::default()
        }
    }

    pub fn radius_miles(mut self, radius_miles: u32) -> Self {
        self.radius_miles = radius_miles;
        self
    }

    pub fn chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    /// Searches every chain instead of only Kroger-branded stores.
    pub fn any_chain(mut self) -> Self {
        self.chain = None;
        self
    }

    pub fn department(mut self, department_id: impl Into<String>) -> Self {
        self.department = Some(department_id.into());
        self
    }

    pub fn location_ids<I, S>(mut self, location_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_ids
            .extend(location_ids.into_iter().map(Into::into));
        self
    }

    pub fn top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        let mut params = QueryParams::new();

        match (&self.zip_code, self.lat_long) {
            (Some(zip_code), None) => {
                if zip_code.trim().is_empty() {
                    return Err(KrogerError::validation("zip_code cannot be empty"));
                }
                params.push(("filter.zipCode.near", zip_code.trim().to_string()));
            }
            (None, Some((latitude, longitude))) => {
                validate_coordinates(latitude, longitude)?;
                params.push(("filter.latLong.near", format!("{},{}", latitude, longitude)));
            }
            _ => {
                return Err(KrogerError::validation(
                    "Provide either zip_code or lat_long, not both or neither",
                ))
            }
        }

        validate_range("radius_miles", self.radius_miles, 1, MAX_RADIUS_MILES)
            .map_err(|e| KrogerError::validation(e.to_string()))?;
        validate_top_n(self.top_n)?;

        params.push(("filter.radiusInMiles", self.radius_miles.to_string()));
        push_opt(&mut params, "filter.chain", self.chain.as_deref());
        push_opt(&mut params, "filter.department", self.department.as_deref());
        if !self.location_ids.is_empty() {
            params.push(("filter.locationId", self.location_ids.join(",")));
        }
        Ok(params)
    }
}

fn push_opt(params: &mut QueryParams, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

fn validate_top_n(top_n: usize) -> Result<()> {
    if top_n == 0 {
        return Err(KrogerError::validation("top_n must be at least 1"));
    }
    Ok(())
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(KrogerError::validation(format!(
            "coordinates out of range: {},{}",
            latitude, longitude
        )));
    }
    Ok(())
}
