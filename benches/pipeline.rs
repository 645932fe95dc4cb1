//! Benchmark for the per-request prediction pipeline
//!
//! Covers coercion, feature derivation, scaling and assignment.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use usage_cluster_service::{
    extract_brand, ArtifactStore, BrandEncoder, CategoricalEncoders, ClusterService,
    FeatureDeriver, KMeansModel, LabelEncoder, ServiceMetrics, StandardScaler, Submission,
    FEATURE_COUNT,
};

fn encoder(classes: &[&str]) -> LabelEncoder {
    LabelEncoder::new(classes.iter().map(|c| c.to_string()).collect()).unwrap()
}

fn store() -> Arc<ArtifactStore> {
    let centers = (0..4)
        .map(|k| (0..FEATURE_COUNT).map(|i| (k * i) as f64).collect())
        .collect();
    let model = KMeansModel::new(centers).unwrap();
    let scaler = StandardScaler::new(vec![1.0; FEATURE_COUNT], vec![3.0; FEATURE_COUNT]).unwrap();
    let encoders = CategoricalEncoders::new(
        encoder(&["POSTPAID", "PREPAID"]),
        encoder(&["F", "M"]),
        encoder(&["3G", "4G", "5G"]),
        encoder(&["NORD", "SUD"]),
    );
    let brands = BrandEncoder::new(encoder(&["Apple", "Autre", "Huawei", "Samsung"]), "Autre")
        .unwrap();

    Arc::new(ArtifactStore::from_parts(model, scaler, encoders, brands).unwrap())
}

fn form() -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = (1..=28)
        .map(|i| (format!("V{}", i), format!("{}", i % 5)))
        .collect();
    form[0].1 = "PREPAID".into();
    form[3].1 = "M".into();
    form[6].1 = "4G".into();
    form[7].1 = "SUD".into();
    form[8].1 = "Samsung Galaxy S10".into();
    form
}

fn bench_extract_brand(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1));

    group.bench_function("extract_brand", |b| {
        b.iter(|| extract_brand(black_box("Samsung Galaxy S10")));
    });

    group.finish();
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1));

    let store = store();
    let submission = Submission::from_pairs(form());

    group.bench_function("derive_features", |b| {
        let deriver = FeatureDeriver::new(&store);
        b.iter(|| deriver.derive(black_box(&submission)).unwrap());
    });

    group.finish();
}

fn bench_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(1));

    let service = ClusterService::new(store(), ServiceMetrics::new().unwrap());
    let form = form();

    group.bench_function("assign_end_to_end", |b| {
        b.iter(|| service.assign(black_box(form.clone())).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_extract_brand, bench_derive, bench_assign);
criterion_main!(benches);
