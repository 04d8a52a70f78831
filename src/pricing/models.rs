/// Cost breakdown for one line item, in EUR
///
/// The four component costs are derived from geometry and the rate record.
/// `unit_price` and `total_price` come precomputed from the rate source and
/// are passed through untouched; they are not re-derived or reconciled
/// against the components. Values are unrounded; rounding happens at
/// formatting time only.
#[derive(Debug, Clone, Default)]
pub struct CostBreakdown {
    pub surface_cost: f64,
    pub cutting_cost: f64,
    pub loop_cost: f64,
    /// None when the quantity is zero or missing (division undefined)
    pub setup_cost_per_unit: Option<f64>,
    /// Upstream passthrough
    pub unit_price: Option<f64>,
    /// Upstream passthrough
    pub total_price: Option<f64>,
}
