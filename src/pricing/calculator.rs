use crate::error::AppError;
use crate::models::{LineItem, PartGeometry, PriceRate};
use crate::pricing::models::CostBreakdown;

const MM2_PER_M2: f64 = 1_000_000.0;
const MM_PER_M: f64 = 1000.0;

/// Surface cost: stored area is mm², rate is EUR per m²
///
/// Missing fields compute as zero so partially populated records still
/// render a breakdown.
pub fn surface_cost(geometry: &PartGeometry, rate: &PriceRate) -> f64 {
    let area_m2 = geometry.surface_area.unwrap_or_default() / MM2_PER_M2;
    area_m2 * rate.cost_per_m2.unwrap_or_default()
}

/// Cutting cost: stored length is mm, factor is EUR per meter
pub fn cutting_cost(geometry: &PartGeometry, rate: &PriceRate) -> f64 {
    let length_m = geometry.cutting_line.unwrap_or_default() / MM_PER_M;
    length_m * rate.cost_factor.unwrap_or_default()
}

/// Loop cost: flat rate per closed loop
pub fn loop_cost(geometry: &PartGeometry, rate: &PriceRate) -> f64 {
    geometry.closed_loops.unwrap_or_default() as f64 * rate.loop_cost_per_loop.unwrap_or_default()
}

/// Setup price amortized over the quantity
///
/// Quantity below 1 makes the division undefined; a missing quantity counts
/// as zero. Signalled as an error so no `inf`/`NaN` reaches a display.
pub fn setup_cost_per_unit(rate: &PriceRate, geometry: &PartGeometry) -> Result<f64, AppError> {
    let quantity = geometry.quantity.unwrap_or(0);
    if quantity == 0 {
        return Err(AppError::InvalidQuantity(quantity));
    }
    Ok(rate.setup_price.unwrap_or_default() / quantity as f64)
}

/// Full breakdown for one line item
///
/// An invalid quantity degrades `setup_cost_per_unit` to `None` instead of
/// failing the whole breakdown; presentation renders a placeholder there.
pub fn line_breakdown(item: &LineItem) -> CostBreakdown {
    CostBreakdown {
        surface_cost: surface_cost(&item.geometry, &item.rate),
        cutting_cost: cutting_cost(&item.geometry, &item.rate),
        loop_cost: loop_cost(&item.geometry, &item.rate),
        setup_cost_per_unit: setup_cost_per_unit(&item.rate, &item.geometry).ok(),
        unit_price: item.rate.price_per_unit,
        total_price: item.rate.total_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PartGeometry {
        PartGeometry {
            material_name: Some("Steel DC01".to_string()),
            dimensions: Some(vec![1500.0, 1000.0]),
            surface_area: Some(1_500_000.0),
            cutting_line: Some(2500.0),
            closed_loops: Some(4),
            quantity: Some(3),
        }
    }

    fn rate() -> PriceRate {
        PriceRate {
            thickness: Some(2.0),
            cost_per_m2: Some(5.0),
            cost_factor: Some(1.2),
            loop_cost_per_loop: Some(0.5),
            setup_price: Some(30.0),
            price_per_unit: Some(12.77),
            total_price: Some(38.31),
        }
    }

    #[test]
    fn test_surface_cost_converts_mm2_to_m2() {
        // 1,500,000 mm² = 1.5 m² at 5.0 EUR/m²
        assert!((surface_cost(&geometry(), &rate()) - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_cutting_cost_converts_mm_to_m() {
        // 2500 mm = 2.5 m at 1.2 EUR/m
        assert!((cutting_cost(&geometry(), &rate()) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_loop_cost() {
        assert!((loop_cost(&geometry(), &rate()) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_setup_cost_per_unit_times_quantity_recovers_setup_price() {
        for quantity in 1..50u32 {
            let mut g = geometry();
            g.quantity = Some(quantity);
            let per_unit = setup_cost_per_unit(&rate(), &g).unwrap();
            assert!((per_unit * quantity as f64 - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_quantity_is_an_error() {
        let mut g = geometry();
        g.quantity = Some(0);
        match setup_cost_per_unit(&rate(), &g) {
            Err(AppError::InvalidQuantity(0)) => {}
            other => panic!("expected InvalidQuantity, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_quantity_is_an_error() {
        let mut g = geometry();
        g.quantity = None;
        assert!(setup_cost_per_unit(&rate(), &g).is_err());
    }

    #[test]
    fn test_missing_fields_degrade_to_zero() {
        let empty_geometry = PartGeometry::default();
        let empty_rate = PriceRate::default();
        assert_eq!(surface_cost(&empty_geometry, &empty_rate), 0.0);
        assert_eq!(cutting_cost(&empty_geometry, &empty_rate), 0.0);
        assert_eq!(loop_cost(&empty_geometry, &empty_rate), 0.0);
    }

    #[test]
    fn test_line_breakdown_passes_totals_through() {
        let item = LineItem {
            geometry: geometry(),
            rate: rate(),
            ..Default::default()
        };
        let breakdown = line_breakdown(&item);
        assert!((breakdown.surface_cost - 7.5).abs() < 1e-9);
        assert!((breakdown.cutting_cost - 3.0).abs() < 1e-9);
        assert!((breakdown.loop_cost - 2.0).abs() < 1e-9);
        assert_eq!(breakdown.setup_cost_per_unit, Some(10.0));
        // unit and total prices are upstream values, not the component sum
        assert_eq!(breakdown.unit_price, Some(12.77));
        assert_eq!(breakdown.total_price, Some(38.31));
    }

    #[test]
    fn test_line_breakdown_degrades_invalid_quantity() {
        let mut item = LineItem {
            geometry: geometry(),
            rate: rate(),
            ..Default::default()
        };
        item.geometry.quantity = Some(0);
        let breakdown = line_breakdown(&item);
        assert_eq!(breakdown.setup_cost_per_unit, None);
        assert!(breakdown.surface_cost > 0.0);
    }
}
