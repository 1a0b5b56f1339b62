use melon_core::{CoreResult, TooManyMelonsError};
use serde::{Deserialize, Serialize};

/// Largest quantity a single order may carry
pub const MAX_MELONS: i32 = 100;

/// Order variant tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Domestic,
    International,
    Government,
}

impl OrderType {
    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Domestic => "domestic",
            OrderType::International => "international",
            OrderType::Government => "government",
        }
    }

    /// Fraction added on top of the pre-tax amount
    pub fn tax_rate(&self) -> f64 {
        match self {
            OrderType::Domestic => 0.08,
            OrderType::International => 0.17,
            OrderType::Government => 0.0,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields shared by every order variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    species: String,
    quantity: i32,
    shipped: bool,
}

impl OrderLine {
    /// Only the upper bound is checked; zero and negative quantities pass.
    pub fn new(species: impl Into<String>, quantity: i32) -> CoreResult<Self> {
        let species = species.into();
        if quantity > MAX_MELONS {
            tracing::warn!(%species, quantity, max = MAX_MELONS, "rejected melon order");
            return Err(TooManyMelonsError { quantity, max: MAX_MELONS }.into());
        }

        Ok(Self {
            species,
            quantity,
            shipped: false,
        })
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn is_shipped(&self) -> bool {
        self.shipped
    }

    /// There is no way back to unshipped
    pub fn mark_shipped(&mut self) {
        self.shipped = true;
    }
}
