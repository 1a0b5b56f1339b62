use melon_catalog::PricingEngine;
use melon_core::CoreResult;
use serde::Serialize;

use crate::models::{OrderLine, OrderType};

/// International orders under this many melons pick up the flat fee
const SMALL_ORDER_THRESHOLD: i32 = 10;
const SMALL_ORDER_FEE: f64 = 3.00;

/// Behaviour shared by every order variant
pub trait OrderTrait {
    fn line(&self) -> &OrderLine;

    fn line_mut(&mut self) -> &mut OrderLine;

    fn order_type(&self) -> OrderType;

    /// Tax-inclusive total, or `None` when the variant yields no result
    fn total(&self, engine: &PricingEngine) -> Option<f64>;

    fn species(&self) -> &str {
        self.line().species()
    }

    fn quantity(&self) -> i32 {
        self.line().quantity()
    }

    fn is_shipped(&self) -> bool {
        self.line().is_shipped()
    }

    fn mark_shipped(&mut self) {
        self.line_mut().mark_shipped();
    }

    fn tax(&self) -> f64 {
        self.order_type().tax_rate()
    }

    fn base_price(&self, engine: &PricingEngine) -> f64 {
        engine.base_price()
    }

    /// `(1 + tax) * quantity * base_price`, drawing a fresh base price
    fn taxed_total(&self, engine: &PricingEngine) -> f64 {
        let base_price = self.base_price(engine);
        (1.0 + self.tax()) * f64::from(self.quantity()) * base_price
    }
}

/// A melon order within the USA
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomesticOrder {
    #[serde(flatten)]
    line: OrderLine,
}

impl DomesticOrder {
    pub fn new(species: impl Into<String>, quantity: i32) -> CoreResult<Self> {
        Ok(Self {
            line: OrderLine::new(species, quantity)?,
        })
    }
}

impl OrderTrait for DomesticOrder {
    fn line(&self) -> &OrderLine {
        &self.line
    }

    fn line_mut(&mut self) -> &mut OrderLine {
        &mut self.line
    }

    fn order_type(&self) -> OrderType {
        OrderType::Domestic
    }

    fn total(&self, engine: &PricingEngine) -> Option<f64> {
        Some(self.taxed_total(engine))
    }
}

/// A non-US melon order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternationalOrder {
    #[serde(flatten)]
    line: OrderLine,
    country_code: String,
}

impl InternationalOrder {
    pub fn new(
        species: impl Into<String>,
        quantity: i32,
        country_code: impl Into<String>,
    ) -> CoreResult<Self> {
        Ok(Self {
            line: OrderLine::new(species, quantity)?,
            country_code: country_code.into(),
        })
    }

    /// Stored verbatim, never validated
    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl OrderTrait for InternationalOrder {
    fn line(&self) -> &OrderLine {
        &self.line
    }

    fn line_mut(&mut self) -> &mut OrderLine {
        &mut self.line
    }

    fn order_type(&self) -> OrderType {
        OrderType::International
    }

    /// Always `None`. The small-order fee is applied to a freshly priced
    /// total, and that total is then dropped instead of returned.
    fn total(&self, engine: &PricingEngine) -> Option<f64> {
        let total = self.taxed_total(engine);
        let dropped = if self.quantity() < SMALL_ORDER_THRESHOLD {
            total + SMALL_ORDER_FEE
        } else {
            total
        };

        tracing::debug!(
            country_code = %self.country_code,
            quantity = self.quantity(),
            dropped,
            "international order total computed but not returned"
        );
        None
    }
}

/// A melon order placed by a government buyer; tax exempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GovernmentOrder {
    #[serde(flatten)]
    line: OrderLine,
    passed_inspection: bool,
}

impl GovernmentOrder {
    pub fn new(species: impl Into<String>, quantity: i32) -> CoreResult<Self> {
        Ok(Self {
            line: OrderLine::new(species, quantity)?,
            passed_inspection: false,
        })
    }

    pub fn passed_inspection(&self) -> bool {
        self.passed_inspection
    }

    /// Record the latest inspection result; may flip either way
    pub fn mark_inspection(&mut self, passed: bool) {
        self.passed_inspection = passed;
    }
}

impl OrderTrait for GovernmentOrder {
    fn line(&self) -> &OrderLine {
        &self.line
    }

    fn line_mut(&mut self) -> &mut OrderLine {
        &mut self.line
    }

    fn order_type(&self) -> OrderType {
        OrderType::Government
    }

    fn total(&self, engine: &PricingEngine) -> Option<f64> {
        Some(self.taxed_total(engine))
    }
}

/// Any melon order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "order_type", rename_all = "lowercase")]
pub enum MelonOrder {
    Domestic(DomesticOrder),
    International(InternationalOrder),
    Government(GovernmentOrder),
}

impl MelonOrder {
    pub fn domestic(species: impl Into<String>, quantity: i32) -> CoreResult<Self> {
        DomesticOrder::new(species, quantity).map(Self::Domestic)
    }

    pub fn international(
        species: impl Into<String>,
        quantity: i32,
        country_code: impl Into<String>,
    ) -> CoreResult<Self> {
        InternationalOrder::new(species, quantity, country_code).map(Self::International)
    }

    pub fn government(species: impl Into<String>, quantity: i32) -> CoreResult<Self> {
        GovernmentOrder::new(species, quantity).map(Self::Government)
    }

    pub fn as_international(&self) -> Option<&InternationalOrder> {
        match self {
            MelonOrder::International(order) => Some(order),
            _ => None,
        }
    }

    pub fn as_government(&self) -> Option<&GovernmentOrder> {
        match self {
            MelonOrder::Government(order) => Some(order),
            _ => None,
        }
    }

    pub fn as_government_mut(&mut self) -> Option<&mut GovernmentOrder> {
        match self {
            MelonOrder::Government(order) => Some(order),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn OrderTrait {
        match self {
            MelonOrder::Domestic(order) => order,
            MelonOrder::International(order) => order,
            MelonOrder::Government(order) => order,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn OrderTrait {
        match self {
            MelonOrder::Domestic(order) => order,
            MelonOrder::International(order) => order,
            MelonOrder::Government(order) => order,
        }
    }
}

impl OrderTrait for MelonOrder {
    fn line(&self) -> &OrderLine {
        self.inner().line()
    }

    fn line_mut(&mut self) -> &mut OrderLine {
        self.inner_mut().line_mut()
    }

    fn order_type(&self) -> OrderType {
        self.inner().order_type()
    }

    fn total(&self, engine: &PricingEngine) -> Option<f64> {
        self.inner().total(engine)
    }
}

impl From<DomesticOrder> for MelonOrder {
    fn from(order: DomesticOrder) -> Self {
        MelonOrder::Domestic(order)
    }
}

impl From<InternationalOrder> for MelonOrder {
    fn from(order: InternationalOrder) -> Self {
        MelonOrder::International(order)
    }
}

impl From<GovernmentOrder> for MelonOrder {
    fn from(order: GovernmentOrder) -> Self {
        MelonOrder::Government(order)
    }
}
