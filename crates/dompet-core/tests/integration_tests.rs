//! Integration tests for dompet-core
//!
//! These tests exercise the full train → load → classify workflow and the
//! request-shaped paths of the forecast and insight services.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use dompet_core::{
    classify::Classifier,
    config::{Config, ModelSettings},
    models::coerce_all,
    training::{train, TrainingOptions},
    Budget, BudgetInput, InsightEngine, InsightKind, ModelStore, SpendingForecaster,
    SpendingInput, SpendingPoint, TextClassifier, Transaction, TransactionInput,
};

/// Labeled transactions across four categories and both types
fn training_csv() -> String {
    let rows = [
        ("Kopi Kenangan Mantan", "Food & Dining", "expense"),
        ("Starbucks Grand Indonesia", "Food & Dining", "expense"),
        ("GoFood nasi padang", "Food & Dining", "expense"),
        ("GrabFood martabak manis", "Food & Dining", "expense"),
        ("Kopi Janji Jiwa", "Food & Dining", "expense"),
        ("Gojek ke kantor", "Transport", "expense"),
        ("Grab bike pulang", "Transport", "expense"),
        ("Isi bensin Pertamina", "Transport", "expense"),
        ("Tiket KRL Commuter", "Transport", "expense"),
        ("Token listrik PLN", "Bills", "expense"),
        ("Tagihan internet Indihome", "Bills", "expense"),
        ("Pulsa Telkomsel", "Bills", "expense"),
        ("Gaji bulanan PT Maju", "Salary", "income"),
        ("Bonus tahunan kantor", "Salary", "income"),
        ("Gaji freelance desain", "Salary", "income"),
    ];

    let mut csv = String::from("description,category,type\n");
    for (description, category, kind) in rows {
        csv.push_str(&format!("{},{},{}\n", description, category, kind));
    }
    // A duplicate and an unlabeled row, both cleaned away
    csv.push_str("Gojek ke kantor,Transport,expense\n");
    csv.push_str("Sesuatu,,expense\n");
    csv
}

fn train_into(dir: &std::path::Path) -> ModelSettings {
    let dataset = dir.join("transactions.csv");
    std::fs::write(&dataset, training_csv()).unwrap();

    let models = ModelSettings {
        dir: dir.join("models"),
        ..Default::default()
    };
    let report = train(&TrainingOptions {
        dataset,
        models: models.clone(),
        stopwords: None,
    })
    .expect("training failed");

    assert_eq!(report.cleaning.loaded, 17);
    assert_eq!(report.cleaning.dropped_missing, 1);
    assert_eq!(report.cleaning.dropped_duplicates, 1);
    assert_eq!(report.cleaning.remaining, 15);
    assert_eq!(
        report.category_classes,
        vec!["Bills", "Food & Dining", "Salary", "Transport"]
    );
    assert_eq!(report.type_classes, vec!["expense", "income"]);

    models
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_train_then_classify() {
    let dir = tempfile::tempdir().unwrap();
    let models = train_into(dir.path());

    let store = ModelStore::load(&models).expect("models should load");

    let coffee = store.classify("kopi kenangan").unwrap();
    assert_eq!(coffee.predicted_category, "Food & Dining");
    assert_eq!(coffee.predicted_type, "expense");
    assert!(coffee.confidence_category > 0.0 && coffee.confidence_category <= 1.0);
    assert!(coffee.explanation.starts_with("Prediksi: 'Food & Dining' (expense)"));

    let salary = store.classify("gaji bulanan").unwrap();
    assert_eq!(salary.predicted_category, "Salary");
    assert_eq!(salary.predicted_type, "income");
}

#[test]
fn test_unknown_words_still_classify() {
    let dir = tempfile::tempdir().unwrap();
    let store = ModelStore::load(&train_into(dir.path())).unwrap();

    let result = store.classify("zzz qqq").unwrap();
    assert!(!result.predicted_category.is_empty());
    assert!(result.confidence_category > 0.0);
}

#[test]
fn test_classification_is_stable_across_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let models = train_into(dir.path());

    let first = TextClassifier::load(&models.category_path()).unwrap();
    let second = TextClassifier::load(&models.category_path()).unwrap();
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(
        first.predict_proba("isi bensin").unwrap(),
        second.predict_proba("isi bensin").unwrap()
    );

    let kind = TextClassifier::load(&models.type_path()).unwrap();
    let store = ModelStore::new(Arc::new(first), Arc::new(kind));
    assert_eq!(store.classify("isi bensin").unwrap().predicted_category, "Transport");
}

#[test]
fn test_missing_models_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ModelSettings {
        dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let err = ModelStore::load(&settings).err().unwrap();
    assert_eq!(err.kind(), "ModelNotFound");
}

#[test]
fn test_tampered_model_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let models = train_into(dir.path());

    let path = models.type_path();
    let mut artifact: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    artifact["classifier"]["feature_log_prob"] = serde_json::json!([[0.0], [0.0]]);
    std::fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

    let err = ModelStore::load(&models).err().unwrap();
    assert_eq!(err.kind(), "InvalidData");
}

// =============================================================================
// Forecast
// =============================================================================

#[test]
fn test_forecast_from_loose_json() {
    let start = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
    let mut inputs = vec![];
    for i in 0..35 {
        let date = (start + Duration::days(i)).format("%Y-%m-%d").to_string();
        // Alternate numeric and string amounts, and add a second entry on weekends
        let amount = if i % 2 == 0 {
            serde_json::json!(50_000 + (i % 7) * 10_000)
        } else {
            serde_json::json!(format!("{}", 45_000 + (i % 7) * 10_000))
        };
        inputs.push(serde_json::json!({ "date": date, "amount": amount }));
        if i % 7 >= 5 {
            inputs.push(serde_json::json!({ "date": date, "amount": "15000.50" }));
        }
    }

    let parsed: Vec<SpendingInput> =
        serde_json::from_value(serde_json::Value::Array(inputs)).unwrap();
    let points: Vec<SpendingPoint> = coerce_all(parsed).unwrap();

    let forecast = SpendingForecaster::new(30).forecast(&points).unwrap();
    assert_eq!(forecast.forecast_data.len(), 30);
    assert_eq!(
        forecast.forecast_data[0].date,
        start + Duration::days(35)
    );
    assert!(forecast.forecast_data.iter().all(|d| d.amount >= 0.0));

    let json = serde_json::to_value(&forecast).unwrap();
    assert!(json["next_month_total"].as_str().unwrap().starts_with("Rp "));
    assert_eq!(json["forecast_data"][0]["date"], "2025-03-08");
}

#[test]
fn test_forecast_rejects_bad_amount() {
    let parsed: Vec<SpendingInput> =
        serde_json::from_str(r#"[{"date": "2025-01-01", "amount": "abc"}]"#).unwrap();
    let err = coerce_all::<_, SpendingPoint>(parsed).unwrap_err();
    assert_eq!(err.kind(), "InvalidNumber");
}

// =============================================================================
// Insights
// =============================================================================

#[test]
fn test_recommend_end_to_end() {
    let mut raw = vec![];
    for i in 0..7 {
        raw.push(serde_json::json!({
            "description": format!("Kopi Kenangan #{}", i),
            "category": "Food & Dining",
            "type": "expense",
            "amount": "28000"
        }));
    }
    raw.push(serde_json::json!({
        "description": "Gaji",
        "category": "Salary",
        "type": "income",
        "amount": 9_000_000
    }));

    let transactions: Vec<TransactionInput> =
        serde_json::from_value(serde_json::Value::Array(raw)).unwrap();
    let transactions: Vec<Transaction> = coerce_all(transactions).unwrap();

    let budgets: Vec<BudgetInput> = serde_json::from_str(
        r#"[{"category": "Food & Dining", "spent": "1250000", "budget": 1000000},
            {"category": "Transport", "spent": 100000, "budget": 0}]"#,
    )
    .unwrap();
    let budgets: Vec<Budget> = coerce_all(budgets).unwrap();

    let engine = InsightEngine::new(Config::default().insights);
    let insights = engine.recommend(&transactions, &budgets).unwrap();

    let kinds: Vec<InsightKind> = insights.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![InsightKind::BudgetWarning, InsightKind::CategoryInsight]);
    assert_eq!(
        insights[0].message,
        "Anda MELEBIHI anggaran 'Food & Dining' sebesar Rp 250,000!"
    );
    assert!(insights[1].message.contains("7 transaksi 'Kopi'"));
}

#[test]
fn test_recommend_without_transactions() {
    let insights = InsightEngine::default().recommend(&[], &[]).unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::Info);
    assert_eq!(insights[0].message, "Belum ada transaksi bulan ini.");
}
