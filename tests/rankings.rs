use hoops_trend::rankings::{
    RankingSizes, build_report, decline_summary, least_improved, most_improved, oldest_decliners,
    youngest_decliners,
};
use hoops_trend::season::SeasonIndex;
use hoops_trend::trend::{DeclineRow, ImprovementRow};

fn improvement(name: &str, value: Option<f64>) -> ImprovementRow {
    ImprovementRow {
        name: name.to_string(),
        improvement_rating: value,
    }
}

fn decline(name: &str, age: u32) -> DeclineRow {
    DeclineRow {
        name: name.to_string(),
        decline_age: age,
        season: SeasonIndex::new(4).unwrap(),
    }
}

fn names<T>(rows: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
    rows.iter().map(|r| name(r).to_string()).collect()
}

#[test]
fn improvement_lists_skip_undefined_and_keep_tie_order() {
    let rows = vec![
        improvement("A", Some(1.5)),
        improvement("B", None),
        improvement("C", Some(3.0)),
        improvement("D", Some(-2.0)),
        improvement("E", Some(1.5)),
    ];
    let top = most_improved(&rows, 3);
    assert_eq!(names(&top, |r| r.name.as_str()), vec!["C", "A", "E"]);
    let bottom = least_improved(&rows, 2);
    assert_eq!(names(&bottom, |r| r.name.as_str()), vec!["D", "A"]);
    assert_eq!(most_improved(&rows, 10).len(), 4);
}

#[test]
fn decline_lists_order_by_age() {
    let rows = vec![decline("Old", 34), decline("Young", 26), decline("Mid", 30), decline("Mid2", 30)];
    assert_eq!(names(&youngest_decliners(&rows, 2), |r| r.name.as_str()), vec!["Young", "Mid"]);
    assert_eq!(names(&oldest_decliners(&rows, 2), |r| r.name.as_str()), vec!["Old", "Mid"]);
}

#[test]
fn decline_summary_counts_ages() {
    let rows = vec![decline("A", 30), decline("B", 30), decline("C", 33)];
    let summary = decline_summary(&rows);
    assert_eq!(summary.players, 3);
    assert_eq!(summary.average_age, Some(31.0));
    assert_eq!(summary.age_counts.get(&30), Some(&2));
    assert_eq!(summary.age_counts.get(&33), Some(&1));

    let empty = decline_summary(&[]);
    assert_eq!(empty.average_age, None);
    assert!(empty.age_counts.is_empty());
}

#[test]
fn report_uses_configured_sizes() {
    let improvement_rows: Vec<ImprovementRow> = (0..25_i32)
        .map(|i| improvement(&format!("P{i}"), Some(f64::from(i))))
        .collect();
    let decline_rows: Vec<DeclineRow> = (0..12_u32).map(|i| decline(&format!("D{i}"), 25 + i)).collect();
    let report = build_report(&improvement_rows, &decline_rows, RankingSizes::default());
    assert_eq!(report.most_improved.len(), 10);
    assert_eq!(report.least_improved.len(), 10);
    assert_eq!(report.youngest_decliners.len(), 5);
    assert_eq!(report.oldest_decliners.len(), 5);
    assert_eq!(report.most_improved[0].name, "P24");
    assert_eq!(report.oldest_decliners[0].decline_age, 36);
}
