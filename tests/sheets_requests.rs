use benchmark_to_sheet::{
    config::Spreadsheet,
    error::SinkError,
    layout::{conditional_formatting_rules, layout_title},
    sink::{
        A1Range, BatchOp, Column, GoogleSheets, RangeWrite,
        sheets::{add_sheet_request, batch_request, parse_add_sheet_reply, value_range_body},
        types::quote_sheet_name,
    },
};
use serde_json::json;

#[test]
fn sheet_names_are_quoted_when_needed() {
    assert_eq!(quote_sheet_name("Sheet1"), "Sheet1");
    assert_eq!(quote_sheet_name("2026-10-19 08:00:00"), "'2026-10-19 08:00:00'");
    assert_eq!(quote_sheet_name("Bob's"), "'Bob''s'");

    let range = A1Range::new("Sheet1", Column::B, 2, Column::D, 2);
    assert_eq!(range.to_string(), "Sheet1!B2:D2");
}

#[test]
fn title_ops_map_to_merge_and_repeat_cell() {
    let op = layout_title("Sheet1", 77, "Master", 3);
    let reqs: Vec<_> = op.batch.iter().map(batch_request).collect();

    assert_eq!(
        reqs[0],
        json!({
            "mergeCells": {
                "mergeType": "MERGE_ALL",
                "range": {
                    "sheetId": 77,
                    "startRowIndex": 2,
                    "endRowIndex": 3,
                    "startColumnIndex": 0,
                    "endColumnIndex": 4,
                }
            }
        })
    );
    assert_eq!(reqs[1]["repeatCell"]["fields"], "userEnteredFormat(textFormat)");
    assert_eq!(
        reqs[1]["repeatCell"]["cell"]["userEnteredFormat"]["textFormat"],
        json!({ "bold": true, "fontSize": 14 })
    );
}

#[test]
fn rules_map_to_text_contains_conditions() {
    let rules = conditional_formatting_rules(5);
    let req = batch_request(&BatchOp::AddConditionalFormatRule {
        rule: rules[2].clone(),
    });
    let rule = &req["addConditionalFormatRule"]["rule"];
    assert_eq!(req["addConditionalFormatRule"]["index"], 0);
    assert_eq!(rule["booleanRule"]["condition"]["type"], "TEXT_CONTAINS");
    assert_eq!(
        rule["booleanRule"]["condition"]["values"][0]["userEnteredValue"],
        "FAIL"
    );
    assert_eq!(rule["ranges"][0]["endRowIndex"], 997);
    assert_eq!(rule["ranges"][0]["sheetId"], 5);
    assert!(rule["booleanRule"]["format"]["backgroundColor"]["red"].is_number());
}

#[test]
fn value_range_body_is_row_major() {
    let write = RangeWrite {
        range: A1Range::new("S", Column::A, 3, Column::B, 4),
        values: vec![
            vec!["INFO".into(), "1.1".into()],
            vec!["PASS".into(), "1.1.1 x".into()],
        ],
    };
    assert_eq!(
        value_range_body(&write),
        json!({
            "range": "S!A3:B4",
            "majorDimension": "ROWS",
            "values": [["INFO", "1.1"], ["PASS", "1.1.1 x"]],
        })
    );
}

#[test]
fn add_sheet_round_trip() {
    assert_eq!(
        add_sheet_request("2026-10-19 08:00:00"),
        json!({ "addSheet": { "properties": { "title": "2026-10-19 08:00:00" } } })
    );

    let reply = json!({
        "spreadsheetId": "abc",
        "replies": [{ "addSheet": { "properties": { "sheetId": 1234, "title": "2026-10-19 08:00:00 (1)" } } }]
    });
    let handle = parse_add_sheet_reply(&reply).unwrap();
    assert_eq!(handle.sheet_id, 1234);
    assert_eq!(handle.title, "2026-10-19 08:00:00 (1)");

    let bad = parse_add_sheet_reply(&json!({ "replies": [] })).unwrap_err();
    assert!(matches!(bad, SinkError::Response(_)));
}

#[test]
fn urls_escape_sheet_ranges() {
    let cfg = Spreadsheet {
        id: "sheet-id".into(),
        ..Default::default()
    };
    let sheets = GoogleSheets::with_token(&cfg, "token".into()).unwrap();

    assert_eq!(
        sheets.batch_update_url().unwrap().as_str(),
        "https://sheets.googleapis.com/v4/spreadsheets/sheet-id:batchUpdate"
    );

    let url = sheets
        .values_update_url("'2026-10-19 08:00:00'!A1:A1")
        .unwrap();
    assert!(url.path().starts_with("/v4/spreadsheets/sheet-id/values/"));
    assert!(!url.path().contains(' '));
    assert_eq!(url.query(), Some("valueInputOption=RAW"));
}

#[test]
fn empty_token_is_rejected() {
    let cfg = Spreadsheet::default();
    let err = GoogleSheets::with_token(&cfg, "  ".into()).err().unwrap();
    assert!(matches!(err, SinkError::Credentials(_)));
}

#[test]
fn unusable_base_urls_are_rejected() {
    let cfg = Spreadsheet {
        api_base_url: "not a url".into(),
        ..Default::default()
    };
    let err = GoogleSheets::with_token(&cfg, "token".into()).err().unwrap();
    assert!(matches!(err, SinkError::Response(ref m) if m.contains("api_base_url")), "{err:?}");

    let cfg = Spreadsheet {
        id: "sheet-id".into(),
        api_base_url: "mailto:someone@example.com".into(),
        ..Default::default()
    };
    let sheets = GoogleSheets::with_token(&cfg, "token".into()).unwrap();
    let err = sheets.batch_update_url().unwrap_err();
    assert!(matches!(err, SinkError::Response(ref m) if m.contains("cannot hold a path")));
}
