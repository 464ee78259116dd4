use std::collections::BTreeMap;

use sleep_stress::{aggregate, export, format_series, ingest, Error, GroupBy, BIN_SIZE};

const EPS: f64 = 1e-9;

const SURVEY: &str = "\
Student_ID,Sleep_Hours_per_Night,Stress_Level (1-10),Grade,Gender,Department
1,7.2,6,A,F,CS
2,7.4,8,A,F,CS
3,3.1,9,B,M,EE
4,5.0,N/A,B,M,EE
5,6.9,4,A,M,EE
6,6.6,5,C,F,CS
7,8.8,2,B,F,Math
8,,7,C,M,Math
9,4.4,8,C,M,CS
10,6.7,6,A,F,Math
";

#[test]
fn worked_example_by_grade() {
    let text = "Sleep_Hours_per_Night,Stress_Level (1-10),Grade,Gender,Department\n\
                7.2,6,A,F,CS\n\
                7.4,8,A,F,CS\n\
                3.1,9,B,M,EE\n";
    let ds = ingest(text).unwrap();
    let map = aggregate(&ds.records, GroupBy::Grade);

    assert_eq!(map.len(), 2);
    let a = &map["A"].points;
    assert_eq!(a.len(), 1);
    assert!((a[0].x - 7.3).abs() < EPS);
    assert!((a[0].y - 7.0).abs() < EPS);
    let b = &map["B"].points;
    assert_eq!(b.len(), 1);
    assert!((b[0].x - 3.1).abs() < EPS);
    assert!((b[0].y - 9.0).abs() < EPS);

    let out = format_series(&map).unwrap();
    assert_eq!(out.matches("Dataset: ").count(), 2);
    assert!(out.contains("7.30        ,7.00        "));
    assert!(out.contains("3.10        ,9.00        "));
    assert!(out.find("Dataset: A").unwrap() < out.find("Dataset: B").unwrap());
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let ds = ingest(SURVEY).unwrap();
    assert_eq!(ds.len(), 8);
    assert_eq!(ds.skipped.len(), 2);
    let lines: Vec<u64> = ds.skipped.iter().map(|w| w.line).collect();
    assert_eq!(lines, vec![5, 9]);
    // Rows after the bad ones are still there, in file order.
    assert_eq!(ds.records.last().unwrap().department(), "Math");
    assert_eq!(ds.records[3].sleep_hours(), 6.9);
}

#[test]
fn missing_department_column_ingests_nothing() {
    let text = "Sleep_Hours_per_Night,Stress_Level (1-10),Grade,Gender\n7.0,5,A,F\n";
    match ingest(text) {
        Err(Error::Schema { missing }) => assert_eq!(missing, vec!["Department".to_string()]),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn points_are_non_decreasing_in_x() {
    let ds = ingest(SURVEY).unwrap();
    for by in GroupBy::ALL {
        for series in aggregate(&ds.records, by).values() {
            assert!(!series.points.is_empty());
            assert!(series.points.windows(2).all(|w| w[0].x <= w[1].x));
        }
    }
}

#[test]
fn bin_means_match_raw_records() {
    let ds = ingest(SURVEY).unwrap();
    for by in GroupBy::ALL {
        // Recompute (group, bin) → (sum sleep, sum stress, n) straight from the records.
        let mut expected: BTreeMap<(String, i64), (f64, f64, usize)> = BTreeMap::new();
        for r in &ds.records {
            let bin = (r.sleep_hours() / BIN_SIZE).floor() as i64;
            let e = expected
                .entry((by.key_of(r).to_string(), bin))
                .or_insert((0.0, 0.0, 0));
            e.0 += r.sleep_hours();
            e.1 += r.stress_level();
            e.2 += 1;
        }

        let map = aggregate(&ds.records, by);
        let mut seen = 0;
        for (key, series) in &map {
            for p in &series.points {
                let bin = (p.x / BIN_SIZE).floor() as i64;
                let (sleep, stress, n) = expected[&(key.clone(), bin)];
                assert_eq!(p.count, n);
                assert!((p.x - sleep / n as f64).abs() < EPS);
                assert!((p.y - stress / n as f64).abs() < EPS);
                seen += 1;
            }
        }
        assert_eq!(seen, expected.len());
    }
}

#[test]
fn no_records_lost_across_groupings() {
    let ds = ingest(SURVEY).unwrap();
    for by in GroupBy::ALL {
        let total: usize = aggregate(&ds.records, by)
            .values()
            .flat_map(|s| &s.points)
            .map(|p| p.count)
            .sum();
        assert_eq!(total, ds.len());
    }
}

#[test]
fn repeated_runs_are_identical() {
    let ds = ingest(SURVEY).unwrap();
    for by in GroupBy::ALL {
        let first = aggregate(&ds.records, by);
        let second = aggregate(&ds.records, by);
        assert_eq!(first, second);
        assert_eq!(format_series(&first).unwrap(), format_series(&second).unwrap());
    }
}

#[test]
fn empty_dataset_aggregates_but_does_not_export() {
    let ds = ingest("Sleep_Hours_per_Night,Stress_Level (1-10),Grade,Gender,Department\n").unwrap();
    let map = aggregate(&ds.records, GroupBy::Gender);
    assert!(map.is_empty());
    assert!(matches!(format_series(&map), Err(Error::EmptyInput(_))));
    assert!(matches!(
        export::to_json(&map, GroupBy::Gender),
        Err(Error::EmptyInput(_))
    ));
}

#[test]
fn json_export_lists_groups_in_key_order() {
    let ds = ingest(SURVEY).unwrap();
    let map = aggregate(&ds.records, GroupBy::Department);
    let json = export::to_json(&map, GroupBy::Department).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let keys: Vec<&str> = value["series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["CS", "EE", "Math"]);
    assert_eq!(value["series"][0]["color"], "#e74c3c");
}
