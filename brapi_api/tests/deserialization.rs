use brapi_api::types::QuoteResponse;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_quote_full() {
    let json = load_fixture("quote_petr4_1mo.json");
    let resp: QuoteResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.results.len(), 1);

    let result = &resp.results[0];
    assert_eq!(result.symbol, "PETR4");
    assert_eq!(result.currency.as_deref(), Some("BRL"));
    assert_eq!(result.short_name.as_deref(), Some("PETROBRAS   PN"));

    let first = &resp.history()[0];
    assert_eq!(first.date, 1717419600);
    assert_eq!(first.close, Some(37.12));
    assert_eq!(first.adjusted_close, Some(37.12));
    assert_eq!(resp.history().last().unwrap().close, Some(38.71));
}

#[test]
fn deserialize_quote_with_null_close() {
    let json = load_fixture("quote_vale3_sparse.json");
    let resp: QuoteResponse = serde_json::from_str(&json).unwrap();
    let history = resp.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[1].close, None);
    assert_eq!(history[1].open, None);
}

#[test]
fn deserialize_empty_results() {
    let json = load_fixture("quote_empty_results.json");
    let resp: QuoteResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.results.is_empty());
    assert!(resp.history().is_empty());
}

#[test]
fn deserialize_missing_results_key() {
    let json = load_fixture("quote_not_found.json");
    let resp: QuoteResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.results.is_empty());
}

#[test]
fn deserialize_result_without_history() {
    let json = r#"{"results":[{"symbol":"ITUB4"}]}"#;
    let resp: QuoteResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.results[0].symbol, "ITUB4");
    assert!(resp.history().is_empty());
}

#[test]
fn deserialize_result_without_symbol() {
    let json = r#"{"results":[{"historicalDataPrice":[{"date":1717419600,"close":37.12},{"date":1717506000,"close":37.4}]}]}"#;
    let resp: QuoteResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.results[0].symbol, "");
    assert_eq!(resp.history().len(), 2);
    assert_eq!(resp.history()[1].close, Some(37.4));
}

#[test]
fn deserialize_null_history() {
    let json = r#"{"results":[{"symbol":"ITUB4","historicalDataPrice":null}]}"#;
    let resp: QuoteResponse = serde_json::from_str(json).unwrap();
    assert!(resp.history().is_empty());
}

#[test]
fn deserialize_drops_candle_with_string_close() {
    let json = r#"{"results":[{"symbol":"ITUB4","historicalDataPrice":[
        {"date":1717419600,"close":32.1},
        {"date":1717506000,"close":"n/a"},
        {"date":1717592400,"close":32.4}
    ]}]}"#;
    let resp: QuoteResponse = serde_json::from_str(json).unwrap();
    let dates: Vec<i64> = resp.history().iter().map(|c| c.date).collect();
    assert_eq!(dates, vec![1717419600, 1717592400]);
}

#[test]
fn deserialize_drops_candle_without_date() {
    let json = r#"{"results":[{"symbol":"ITUB4","historicalDataPrice":[{"close":32.1},{"date":1717506000,"close":32.2},"junk"]}]}"#;
    let resp: QuoteResponse = serde_json::from_str(json).unwrap();
    assert_eq!(resp.history().len(), 1);
    assert_eq!(resp.history()[0].close, Some(32.2));
}

#[test]
fn deserialize_malformed_json_returns_error() {
    assert!(serde_json::from_str::<QuoteResponse>(r#"{"results":[{"symbol":"#).is_err());
    assert!(serde_json::from_str::<QuoteResponse>(r#"{"results":"PETR4"}"#).is_err());
}
