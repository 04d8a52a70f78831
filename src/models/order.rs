use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One customer order as returned by the order store.
///
/// Monetary fields are always EUR; other currencies are derived at display
/// time and never written back. Most fields are optional because records in
/// the store can be partially populated (mid-edit or legacy entries).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub country: Option<Country>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,

    /// ISO currency code for display; EUR when absent
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default, alias = "totalAmount")]
    pub total_amount: Option<f64>,

    #[serde(default, alias = "additionalCost")]
    pub additional_cost: AdditionalCost,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, alias = "materialDetails")]
    pub material_details: Vec<LineItem>,
}

impl Order {
    /// Display currency, defaulting to the canonical EUR
    pub fn display_currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("EUR")
    }

    /// One-line shipping address (country, city, street; blanks skipped)
    pub fn address(&self) -> String {
        let mut parts = Vec::new();
        if let Some(country) = &self.country {
            if !country.label.is_empty() {
                parts.push(country.label.clone());
            }
        }
        if let Some(city) = &self.city {
            if !city.is_empty() {
                parts.push(city.clone());
            }
        }
        if let Some(street) = &self.street {
            if !street.is_empty() {
                parts.push(street.clone());
            }
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Country {
    #[serde(default)]
    pub label: String,
}

/// Shipping and VAT riders on an order (EUR / percent)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdditionalCost {
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    #[serde(default)]
    pub vat_rate: Option<f64>,
}

/// One manufactured piece within an order
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineItem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    /// Preview image path, relative to the asset base URL
    #[serde(default)]
    pub svg_url: Option<String>,

    #[serde(rename = "data", default)]
    pub geometry: PartGeometry,

    #[serde(rename = "price", default)]
    pub rate: PriceRate,
}

/// Raw geometry of a part. Lengths in mm, areas in mm².
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PartGeometry {
    #[serde(default)]
    pub material_name: Option<String>,

    /// [width, height] in mm
    #[serde(default)]
    pub dimensions: Option<Vec<f64>>,

    #[serde(default)]
    pub surface_area: Option<f64>,

    #[serde(default)]
    pub cutting_line: Option<f64>,

    #[serde(default)]
    pub closed_loops: Option<u32>,

    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Per-unit cost coefficients applied to a line item's geometry, EUR.
///
/// `price_per_unit` and `total_price` are computed upstream and passed
/// through for display only.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PriceRate {
    #[serde(default)]
    pub thickness: Option<f64>,
    #[serde(default)]
    pub cost_per_m2: Option<f64>,
    #[serde(default)]
    pub cost_factor: Option<f64>,
    #[serde(default)]
    pub loop_cost_per_loop: Option<f64>,
    #[serde(default)]
    pub setup_price: Option<f64>,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Manufactured,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Manufactured => "Manufactured",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "manufactured" => Ok(Self::Manufactured),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!(
                "Invalid status '{}'. Must be one of: pending, in-progress, manufactured, delivered, cancelled",
                other
            )),
        }
    }
}

/// Paginated order listing envelope: `GET /orders?page&limit`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_currency_defaults_to_eur() {
        let order: Order = serde_json::from_str(r#"{"_id": "o1"}"#).unwrap();
        assert_eq!(order.display_currency(), "EUR");
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert_eq!(
            "in-progress".parse::<OrderStatus>(),
            Ok(OrderStatus::InProgress)
        );
        assert_eq!(
            "Manufactured".parse::<OrderStatus>(),
            Ok(OrderStatus::Manufactured)
        );
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_deserialize_partial_order() {
        // Legacy records may lack almost everything beyond the id
        let json = r#"{
            "_id": "64af0c",
            "totalAmount": 250.0,
            "materialDetails": [
                {"data": {"surface_area": 1500000.0}, "price": {"cost_per_m2": 5.0}}
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.total_amount, Some(250.0));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.material_details.len(), 1);
        let item = &order.material_details[0];
        assert_eq!(item.geometry.surface_area, Some(1_500_000.0));
        assert_eq!(item.geometry.quantity, None);
        assert_eq!(item.rate.cost_per_m2, Some(5.0));
        assert_eq!(item.rate.total_price, None);
    }

    #[test]
    fn test_address_skips_blank_parts() {
        let json = r#"{
            "_id": "o2",
            "country": {"label": "Poland"},
            "street": "Mostowa 4"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.address(), "Poland Mostowa 4");
    }

    #[test]
    fn test_orders_page_envelope() {
        let json = r#"{"orders": [{"_id": "a"}, {"_id": "b"}], "total": 37}"#;
        let page: OrdersPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.orders.len(), 2);
        assert_eq!(page.total, 37);
    }
}
