use serde::{Deserialize, Serialize};

/// Editable material price record
///
/// These are the per-unit coefficients the backend applies when quoting a
/// part; staff maintain them from the materials table. Wire format uses
/// camelCase keys.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Absent until the record is persisted
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub material: String,

    /// Sheet thickness in mm
    #[serde(default)]
    pub thickness: Option<f64>,

    #[serde(default)]
    pub setup_price: f64,

    /// Cutting cost per meter of cutting line
    #[serde(default)]
    pub cost_factor: f64,

    #[serde(default)]
    pub loop_cost: f64,

    #[serde(default)]
    pub cost_per_m2: f64,

    #[serde(default)]
    pub stock: bool,
}

/// Paginated material listing envelope: `GET /materials?page&size`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaterialsPage {
    #[serde(default)]
    pub items: Vec<Material>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "_id": "m1",
            "material": "Steel DC01",
            "thickness": 2.0,
            "setupPrice": 30.0,
            "costFactor": 1.2,
            "loopCost": 0.5,
            "costPerM2": 5.0,
            "stock": true
        }"#;
        let m: Material = serde_json::from_str(json).unwrap();
        assert_eq!(m.id.as_deref(), Some("m1"));
        assert_eq!(m.material, "Steel DC01");
        assert_eq!(m.setup_price, 30.0);
        assert_eq!(m.cost_factor, 1.2);
        assert!(m.stock);
    }

    #[test]
    fn test_serialize_new_record_omits_id() {
        let m = Material {
            material: "Alu 5754".to_string(),
            thickness: Some(3.0),
            setup_price: 25.0,
            cost_factor: 0.9,
            loop_cost: 0.4,
            cost_per_m2: 7.5,
            stock: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("_id").is_none());
        assert_eq!(json["setupPrice"], 25.0);
        assert_eq!(json["costPerM2"], 7.5);
    }

    #[test]
    fn test_materials_page_envelope() {
        let json = r#"{"items": [{"material": "Steel"}], "total": 12}"#;
        let page: MaterialsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 12);
    }
}
