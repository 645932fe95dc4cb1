//! Test artifacts
//!
//! A small, hand-fitted artifact set: every feature is scaled by 1/2 and the
//! four centres sit on the origin and 50 units out along V6, total_recharge
//! and total_revenu_op respectively.

use super::encoder::{BrandEncoder, LabelEncoder};
use super::loader::{ArtifactStore, CategoricalEncoders};
use super::model::KMeansModel;
use super::scaler::StandardScaler;
use crate::domain::schema::{feature_names, FEATURE_COUNT};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

pub(crate) const V1_CLASSES: [&str; 2] = ["POSTPAID", "PREPAID"];
pub(crate) const V4_CLASSES: [&str; 2] = ["F", "M"];
pub(crate) const V7_CLASSES: [&str; 3] = ["3G", "4G", "5G"];
pub(crate) const V8_CLASSES: [&str; 2] = ["NORD", "SUD"];
pub(crate) const BRAND_CLASSES: [&str; 4] = ["Apple", "Autre", "Huawei", "Samsung"];

fn centers() -> Vec<Vec<f64>> {
    let mut centers = vec![vec![0.0; FEATURE_COUNT]; 4];
    centers[1][0] = 50.0;
    centers[2][6] = 50.0;
    centers[3][4] = 50.0;
    centers
}

fn encoder(classes: &[&str]) -> LabelEncoder {
    LabelEncoder::new(classes.iter().map(|c| c.to_string()).collect()).unwrap()
}

/// In-memory artifact store
pub(crate) fn test_store() -> Arc<ArtifactStore> {
    let model = KMeansModel::new(centers()).unwrap();
    let scaler = StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![2.0; FEATURE_COUNT]).unwrap();
    let encoders = CategoricalEncoders::new(
        encoder(&V1_CLASSES),
        encoder(&V4_CLASSES),
        encoder(&V7_CLASSES),
        encoder(&V8_CLASSES),
    );
    let brands = BrandEncoder::new(encoder(&BRAND_CLASSES), "Autre").unwrap();

    Arc::new(ArtifactStore::from_parts(model, scaler, encoders, brands).unwrap())
}

/// Write the same artifact set as JSON files under `dir`
pub(crate) fn write_artifacts(dir: &Path) {
    let write = |name: &str, value: serde_json::Value| {
        std::fs::write(dir.join(name), serde_json::to_vec(&value).unwrap()).unwrap();
    };

    write("model.json", json!({ "cluster_centers": centers() }));
    write(
        "scaler.json",
        json!({
            "mean": vec![0.0; FEATURE_COUNT],
            "scale": vec![2.0; FEATURE_COUNT],
            "feature_names": feature_names(),
        }),
    );
    write("le_v1.json", json!({ "classes": V1_CLASSES }));
    write("le_v4.json", json!({ "classes": V4_CLASSES }));
    write("le_v7.json", json!({ "classes": V7_CLASSES }));
    write("le_v8.json", json!({ "classes": V8_CLASSES }));
    write("le_phone_brand.json", json!({ "classes": BRAND_CLASSES }));
}
