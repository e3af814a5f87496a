use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_forecast::data::{MonthlySales, SalesHistory};
use sales_forecast::forecaster::{
    ForecastResult, Forecaster, INSIGHT_GENERATED, INSIGHT_INSUFFICIENT_DATA, MONTH_LABELS,
};
use sales_forecast::ForecastError;

fn history_from_totals(totals: &[f64]) -> SalesHistory {
    let entries = totals
        .iter()
        .enumerate()
        .map(|(i, &total)| MonthlySales::new(i as u32 + 1, total))
        .collect();
    SalesHistory::new(entries).unwrap()
}

fn has_at_most_decimals(value: f64, decimals: i32) -> bool {
    let scaled = value * 10f64.powi(decimals);
    (scaled - scaled.round()).abs() < 1e-6
}

#[rstest]
#[case(&[])]
#[case(&[1500.0])]
fn test_short_history_yields_placeholder(#[case] totals: &[f64]) {
    let result = Forecaster::new()
        .forecast(&history_from_totals(totals))
        .unwrap();

    assert_eq!(result.prediction, 0.0);
    assert_eq!(result.percent_change, 0.0);
    assert_eq!(result.next_period_label, "Próximo");
    assert_eq!(result.insight, INSIGHT_INSUFFICIENT_DATA);
}

#[test]
fn test_linear_series() {
    let result = Forecaster::new()
        .forecast(&history_from_totals(&[10.0, 20.0, 30.0, 40.0]))
        .unwrap();

    assert_eq!(result.prediction, 50.0);
    assert_eq!(result.percent_change, 25.0);
    assert_eq!(result.next_period_label, "May");
    assert_eq!(result.insight, INSIGHT_GENERATED);
}

#[test]
fn test_constant_series() {
    let result = Forecaster::new()
        .forecast(&history_from_totals(&[50.0, 50.0, 50.0]))
        .unwrap();

    assert_eq!(result.prediction, 50.0);
    assert_eq!(result.percent_change, 0.0);
}

#[test]
fn test_zero_last_value_guards_percent_change() {
    let result = Forecaster::new()
        .forecast(&history_from_totals(&[10.0, 5.0, 0.0]))
        .unwrap();

    assert_eq!(result.percent_change, 0.0);
    assert_eq!(result.prediction, -5.0);
    assert!(result.prediction.is_finite());
}

#[test]
fn test_overflowing_totals_are_rejected_not_nan() {
    let result = Forecaster::new().forecast(&history_from_totals(&[1e308, 1e308]));
    assert!(matches!(result, Err(ForecastError::MathError(_))));

    let result = Forecaster::new()
        .forecast(&history_from_totals(&[1e-300, 1e-300, 5e250]))
        .unwrap();
    assert!(result.prediction.is_finite());
    assert!(result.percent_change.is_finite());
}

#[test]
fn test_rounding_of_published_values() {
    // slope = 33.45, intercept = 1318.933..., prediction = 1452.733...
    let result = Forecaster::new()
        .forecast(&history_from_totals(&[1345.75, 1399.1, 1412.65]))
        .unwrap();

    assert!(has_at_most_decimals(result.prediction, 2));
    assert!(has_at_most_decimals(result.percent_change, 1));
    assert_eq!(result.prediction, 1452.73);
    assert_eq!(result.percent_change, 2.8);

    let rendered = result.to_string();
    assert!(rendered.contains("1452.73"));
    assert!(rendered.contains("+2.8%"));
}

#[test]
fn test_december_wraps_to_january() {
    let history = SalesHistory::new(vec![
        MonthlySales::new(10, 300.0),
        MonthlySales::new(11, 320.0),
        MonthlySales::new(12, 410.0),
    ])
    .unwrap();

    let result = Forecaster::new().forecast(&history).unwrap();
    assert_eq!(result.next_period_label, MONTH_LABELS[0]);
    assert_eq!(result.next_period_label, "Ene");
}

#[test]
fn test_forecast_is_idempotent() {
    let history = history_from_totals(&[812.4, 1033.9, 977.15, 1204.0, 1190.55, 1311.3]);
    let forecaster = Forecaster::new();

    let first = forecaster.forecast(&history).unwrap();
    let second = forecaster.forecast(&history).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.prediction.to_bits(), second.prediction.to_bits());
    assert_eq!(first.percent_change.to_bits(), second.percent_change.to_bits());
}

#[test]
fn test_result_json_fields() {
    let result = Forecaster::new()
        .forecast(&history_from_totals(&[10.0, 20.0, 30.0, 40.0]))
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "prediction": 50.0,
            "percentChange": 25.0,
            "nextPeriodLabel": "May",
            "insight": "Proyección generada"
        })
    );

    let back: ForecastResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}
