//! Integration tests for resolving, loading and normalizing snapshots on disk

use sdg_dashboard::core::dashboard::{ensure_renderable, load_or_sample, try_load, SnapshotSource};
use sdg_dashboard::core::loader::LoadError;
use sdg_dashboard::core::metrics;
use sdg_dashboard::core::models::{DataType, Selection};
use sdg_dashboard::core::resolver::{
    SourceResolver, COURSE_COUNTS_FILE, COURSE_OVERALL_FILE, COURSE_PERCENTAGES_FILE,
    COURSE_TOPIC_FILE,
};
use sdg_dashboard::core::sample::sample_snapshot;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, body).expect("write fixture");
}

fn write_course_year(root: &Path, year: &str) {
    let dir = root.join(year);
    write(
        &dir.join(COURSE_COUNTS_FILE),
        r#"[
            {"科系名稱": "中文系", "NONE": 30, "SDG4": 35, "SDG8": 9, "SDG3": 0},
            {"科系名稱": "資訊工程", "NONE": 12, "SDG4": 20, "SDG9": 18, "SDG13": 2}
        ]"#,
    );
    write(
        &dir.join(COURSE_PERCENTAGES_FILE),
        r#"[
            {"科系名稱": "中文系", "NONE": 40.54, "SDG4": 47.3, "SDG8": 12.16},
            {"科系名稱": "資訊工程", "NONE": 24.0, "SDG4": 40.0, "SDG9": 36.0}
        ]"#,
    );
    write(
        &dir.join(COURSE_OVERALL_FILE),
        r#"[
            {"SDG": "NONE", "次數": 42},
            {"SDG": "SDG4", "次數": 55},
            {"SDG": "SDG9", "次數": 18},
            {"SDG": "SDG8", "次數": 9},
            {"SDG": "SDG13", "次數": 2}
        ]"#,
    );
    write(
        &dir.join(COURSE_TOPIC_FILE),
        r#"[{"提及課程數量": "資訊工程", "count": 2}]"#,
    );
}

fn resolver(root: &Path) -> SourceResolver {
    SourceResolver::new(vec![root.to_path_buf()], "-1")
}

#[test]
fn course_folder_scenario() {
    let dir = TempDir::new().expect("temp dir");
    write_course_year(dir.path(), "112");

    let snapshot = try_load(&resolver(dir.path()), &Selection::new(DataType::Course, "112"))
        .expect("course data loads");

    assert_eq!(snapshot.counts.len(), 2);
    assert_eq!(snapshot.percentages.len(), 2);
    assert_eq!(snapshot.overall.len(), 5);
    assert_eq!(snapshot.topic.len(), 1);
    assert_eq!(snapshot.counts.columns, vec!["NONE", "SDG4", "SDG8", "SDG3", "SDG9", "SDG13"]);

    let chinese = snapshot.counts.unit("中文系").expect("unit present");
    assert_eq!(metrics::unit_total(chinese), 74);
    assert_eq!(metrics::unit_sdg_total(chinese), 44);
    assert_eq!(metrics::unit_diversity(chinese), 2);
}

#[test]
fn course_folder_missing_one_file_is_not_found() {
    let dir = TempDir::new().expect("temp dir");
    write_course_year(dir.path(), "112");
    fs::remove_file(dir.path().join("112").join(COURSE_TOPIC_FILE)).expect("remove");

    let err = try_load(&resolver(dir.path()), &Selection::new(DataType::Course, "112"))
        .expect_err("incomplete folder");
    assert!(err.is_not_found());
    assert!(err.path().ends_with(COURSE_TOPIC_FILE));
}

#[test]
fn industry_summary_scenario() {
    let dir = TempDir::new().expect("temp dir");
    write(
        &dir.path().join("department_sdg_summary_產學112.json"),
        r#"{"企業管理": {"SDG8": 183, "SDG9": 31, "NONE": 195}}"#,
    );

    let snapshot = try_load(&resolver(dir.path()), &Selection::new(DataType::Industry, "112"))
        .expect("summary data loads");

    assert_eq!(snapshot.overall.get("SDG8"), Some(183));
    assert_eq!(snapshot.overall.get("SDG9"), Some(31));
    assert!(snapshot.topic.is_empty());
    assert!(snapshot.percentages.is_empty());
}

#[test]
fn summary_overall_total_equals_sum_of_unit_counts() {
    let dir = TempDir::new().expect("temp dir");
    write(
        &dir.path().join("department_sdg_summary_論文113-1.json"),
        r#"{
            "環境工程": {"SDG13": 4, "SDG6": 7, "NONE": 3},
            "企業管理": {"SDG8": 10, "SDG13": 0},
            "歷史系": {"NONE": 5, "SDG14": 2}
        }"#,
    );

    let snapshot = try_load(&resolver(dir.path()), &Selection::new(DataType::Thesis, "113"))
        .expect("thesis data loads");

    let unit_sum: u64 = snapshot.counts.rows.iter().map(metrics::unit_total).sum();
    assert_eq!(snapshot.overall.total(), unit_sum);
    assert_eq!(unit_sum, 29);
    assert_eq!(snapshot.topic.len(), 1);
    assert_eq!(snapshot.topic.entries[0].unit_name, "環境工程");
    assert_eq!(snapshot.topic.entries[0].count, 4);
}

#[test]
fn thesis_suffix_selects_the_file() {
    let dir = TempDir::new().expect("temp dir");
    write(
        &dir.path().join("department_sdg_summary_論文112-2.json"),
        r#"{"A": {"SDG1": 1}}"#,
    );

    let selection = Selection::new(DataType::Thesis, "112");
    assert!(try_load(&resolver(dir.path()), &selection).is_err());

    let second_period = SourceResolver::new(vec![dir.path().to_path_buf()], "-2");
    assert!(try_load(&second_period, &selection).is_ok());
}

#[test]
fn empty_thesis_suffix_reads_files_without_sub_period() {
    let dir = TempDir::new().expect("temp dir");
    write(
        &dir.path().join("department_sdg_summary_論文112.json"),
        r#"{"環境工程": {"SDG13": 4, "NONE": 1}}"#,
    );

    let no_suffix = SourceResolver::new(vec![dir.path().to_path_buf()], "");
    let loaded = load_or_sample(&no_suffix, &Selection::new(DataType::Thesis, "112"));

    assert_eq!(
        loaded.source,
        SnapshotSource::Files(dir.path().join("department_sdg_summary_論文112.json"))
    );
    assert_eq!(loaded.snapshot.overall.total(), 5);
}

#[test]
fn loading_the_same_folder_twice_gives_the_same_alignment() {
    let dir = TempDir::new().expect("temp dir");
    write_course_year(dir.path(), "112");
    let selection = Selection::new(DataType::Course, "112");

    let first = try_load(&resolver(dir.path()), &selection).expect("first load");
    let second = try_load(&resolver(dir.path()), &selection).expect("second load");

    assert_eq!(first, second);
    assert_eq!(
        metrics::alignment_rate(&first.overall).to_bits(),
        metrics::alignment_rate(&second.overall).to_bits()
    );
}

#[test]
fn zero_count_topic_rows_are_not_engaged_units() {
    let dir = TempDir::new().expect("temp dir");
    write_course_year(dir.path(), "112");
    write(
        &dir.path().join("112").join(COURSE_TOPIC_FILE),
        r#"[
            {"提及課程數量": "資訊工程", "count": 2},
            {"提及課程數量": "中文系", "count": 0}
        ]"#,
    );

    let snapshot = try_load(&resolver(dir.path()), &Selection::new(DataType::Course, "112"))
        .expect("course data loads");
    let topic = metrics::topic_summary(&snapshot.topic, snapshot.counts.len());

    assert_eq!(snapshot.topic.len(), 1);
    assert_eq!(topic.engaged_units, 1);
    assert!((topic.engagement_rate - 50.0).abs() < 1e-9);
}

#[test]
fn overflowing_summary_counts_fall_back_to_sample() {
    let dir = TempDir::new().expect("temp dir");
    write(
        &dir.path().join("department_sdg_summary_產學112.json"),
        r#"{"A": {"SDG8": 18446744073709551615}, "B": {"SDG8": 1}}"#,
    );

    let loaded = load_or_sample(&resolver(dir.path()), &Selection::new(DataType::Industry, "112"));
    let SnapshotSource::Sample { cause } = &loaded.source else {
        panic!("expected sample data");
    };
    assert!(matches!(cause, LoadError::Invalid { .. }));
    assert_eq!(loaded.snapshot, sample_snapshot());
}

#[test]
fn repeated_unit_names_fall_back_to_sample() {
    let dir = TempDir::new().expect("temp dir");
    write_course_year(dir.path(), "112");
    write(
        &dir.path().join("112").join(COURSE_COUNTS_FILE),
        r#"[
            {"科系名稱": "中文系", "SDG4": 35},
            {"科系名稱": "中文系", "SDG8": 9}
        ]"#,
    );

    let selection = Selection::new(DataType::Course, "112");
    let err = try_load(&resolver(dir.path()), &selection).expect_err("duplicate unit");
    assert!(matches!(err, LoadError::Invalid { .. }));
    assert!(load_or_sample(&resolver(dir.path()), &selection).source.is_sample());
}

#[test]
fn missing_root_falls_back_to_sample_scenario() {
    let dir = TempDir::new().expect("temp dir");
    let gone = dir.path().join("no-such-root");
    let loaded = load_or_sample(&resolver(&gone), &Selection::new(DataType::Course, "112"));

    let SnapshotSource::Sample { cause } = &loaded.source else {
        panic!("expected sample data");
    };
    assert!(matches!(cause, LoadError::NotFound { .. }));
    assert_eq!(loaded.snapshot, sample_snapshot());
    assert_eq!(metrics::summarize(&loaded.snapshot).total_units, 2);
    assert!(ensure_renderable(&loaded).is_ok());
}

#[test]
fn invalid_content_also_falls_back() {
    let dir = TempDir::new().expect("temp dir");
    write_course_year(dir.path(), "112");
    write(
        &dir.path().join("112").join(COURSE_COUNTS_FILE),
        r#"[{"科系名稱": "中文系", "SDG4": "thirty-five"}]"#,
    );

    let selection = Selection::new(DataType::Course, "112");
    let err = try_load(&resolver(dir.path()), &selection).expect_err("bad cell");
    assert!(!err.is_not_found());

    let loaded = load_or_sample(&resolver(dir.path()), &selection);
    assert!(loaded.source.is_sample());
    assert_eq!(loaded.snapshot, sample_snapshot());
}

#[test]
fn first_existing_root_is_used() {
    let preferred = TempDir::new().expect("temp dir");
    let fallback = TempDir::new().expect("temp dir");
    write_course_year(fallback.path(), "112");

    let missing = preferred.path().join("absent");
    let resolver = SourceResolver::new(
        vec![missing, fallback.path().to_path_buf()],
        "-1",
    );
    let loaded = load_or_sample(&resolver, &Selection::new(DataType::Course, "112"));

    assert_eq!(
        loaded.source,
        SnapshotSource::Files(fallback.path().join("112"))
    );
}

#[test]
fn bom_prefixed_files_are_accepted() {
    let dir = TempDir::new().expect("temp dir");
    write(
        &dir.path().join("department_sdg_summary_產學112.json"),
        "\u{feff}{\"企業管理\": {\"SDG13\": 2}}",
    );

    let snapshot = try_load(&resolver(dir.path()), &Selection::new(DataType::Industry, "112"))
        .expect("BOM tolerated");
    assert_eq!(snapshot.topic.total(), 2);
}
