//! Text views: summary, unit, compare, climate, rank and correlation

use super::load_snapshot;
use crate::args::SelectionArgs;
use sdg_dashboard::config::Config;
use sdg_dashboard::core::dashboard::{ensure_renderable, LoadedSnapshot};
use sdg_dashboard::core::metrics::{self, RankMetric};
use sdg_dashboard::core::models::sdg::{self, CLIMATE_ACTION};
use sdg_dashboard::core::models::Snapshot;

/// Unwrap the renderable snapshot or exit with the blocking error
fn renderable(loaded: &LoadedSnapshot) -> &Snapshot {
    ensure_renderable(loaded).unwrap_or_else(|e| {
        eprintln!("✗ {e}");
        std::process::exit(1);
    })
}

fn heading(title: &str, loaded: &LoadedSnapshot) {
    println!(
        "\n=== {title}: {} {} ===\n",
        loaded.selection.data_type.label(),
        loaded.selection.year
    );
}

/// Headline figures and the most mentioned SDGs
pub fn summary(args: &SelectionArgs, top: usize, config: &Config) {
    let loaded = load_snapshot(args, config);
    let snapshot = renderable(&loaded);
    let figures = metrics::summarize(snapshot);

    heading("Summary", &loaded);
    println!("Units:            {}", figures.total_units);
    println!("Total mentions:   {}", figures.total_mentions);
    println!("SDG mentions:     {}", figures.sdg_mentions);
    println!("Unmapped (NONE):  {}", figures.none_mentions);
    println!("Alignment rate:   {:.2}%", figures.alignment_rate);

    let leaders = metrics::top_sdgs(&snapshot.overall, top);
    if leaders.is_empty() {
        return;
    }
    println!("\nTop {} SDGs:", leaders.len());
    for (rank, entry) in leaders.iter().enumerate() {
        println!(
            "  {:>2}. {:<6} {:<20} {:>8}  {:>6.2}%",
            rank + 1,
            entry.sdg,
            sdg::describe(&entry.sdg),
            entry.count,
            entry.share_of_aligned
        );
    }
}

/// Per-unit statistics and its three leading SDGs
pub fn unit(name: &str, args: &SelectionArgs, config: &Config) {
    let loaded = load_snapshot(args, config);
    let snapshot = renderable(&loaded);

    let Some(profile) = metrics::unit_profile(&snapshot.counts, name) else {
        eprintln!("Unknown unit: '{name}'");
        eprintln!("Available units: {}", snapshot.counts.unit_names().join(", "));
        std::process::exit(1);
    };

    heading(name, &loaded);
    println!("Total items:      {}", profile.figures.total);
    println!("SDG items:        {}", profile.figures.sdg_total);
    println!("Unmapped (NONE):  {}", profile.none_count);
    println!("Alignment rate:   {:.2}%", profile.figures.alignment_rate);
    println!("SDG diversity:    {}", profile.figures.diversity);

    if profile.sdgs.is_empty() {
        println!("\nNo SDG mappings for this unit.");
        return;
    }
    println!("\nLeading SDGs:");
    for entry in profile.top(3) {
        println!(
            "  {:<6} {:<20} {:>6}  {:>6.2}%",
            entry.sdg,
            sdg::describe(&entry.sdg),
            entry.count,
            entry.share_of_total
        );
    }
}

/// Selected SDG counts per unit
pub fn compare(sdgs: &[String], args: &SelectionArgs, config: &Config) {
    let unknown: Vec<&str> = sdgs
        .iter()
        .map(String::as_str)
        .filter(|code| !sdg::is_sdg_code(code))
        .collect();
    if !unknown.is_empty() {
        eprintln!("Unknown SDG code(s): {}", unknown.join(", "));
        eprintln!("Known codes: {}", sdg::SDG_CODES.join(", "));
        std::process::exit(1);
    }

    let loaded = load_snapshot(args, config);
    let snapshot = renderable(&loaded);
    let selected: Vec<&str> = sdgs.iter().map(String::as_str).collect();
    let rows = metrics::compare_sdgs(&snapshot.counts, &selected);

    heading("SDG comparison", &loaded);
    if rows.is_empty() {
        println!("No unit has items on {}.", selected.join(", "));
        return;
    }
    let mut current = "";
    for row in &rows {
        if row.sdg != current {
            println!("{} {}", row.sdg, sdg::describe(&row.sdg));
            current = row.sdg.as_str();
        }
        println!("  {:<24} {:>6}", row.unit_name, row.count);
    }
}

/// Climate-action totals, engagement and leading units
pub fn climate(args: &SelectionArgs, config: &Config) {
    let loaded = load_snapshot(args, config);
    let snapshot = renderable(&loaded);
    let topic = metrics::topic_summary(&snapshot.topic, snapshot.counts.len());

    heading(
        &format!("{CLIMATE_ACTION} {}", sdg::describe(CLIMATE_ACTION)),
        &loaded,
    );
    println!("Total items:      {}", topic.total_items);
    println!(
        "Engaged units:    {} / {}",
        topic.engaged_units, topic.total_units
    );
    println!("Engagement rate:  {:.2}%", topic.engagement_rate);

    if topic.leaders.is_empty() {
        return;
    }
    println!("\nLeading units:");
    for (rank, (unit_name, count)) in topic.leaders.iter().enumerate() {
        println!("  {:>2}. {unit_name:<24} {count:>6}", rank + 1);
    }
}

/// Units ordered by one metric
pub fn rank(by: RankMetric, top: usize, args: &SelectionArgs, config: &Config) {
    let loaded = load_snapshot(args, config);
    let snapshot = renderable(&loaded);
    let rows = metrics::top_units(&snapshot.counts, by, top);

    heading(&format!("Top {} units by {by}", rows.len()), &loaded);
    println!(
        "  {:>2}  {:<24} {:>8} {:>8} {:>10} {:>9}",
        "#", "Unit", "Total", "SDG", "Alignment", "Diversity"
    );
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {:>8} {:>8} {:>9.2}% {:>9}",
            rank + 1,
            row.unit_name,
            row.total,
            row.sdg_total,
            row.alignment_rate,
            row.diversity
        );
    }
}

/// Pairwise correlation between SDG columns
pub fn correlation(args: &SelectionArgs, config: &Config) {
    let loaded = load_snapshot(args, config);
    let snapshot = renderable(&loaded);

    heading("SDG correlation", &loaded);
    if snapshot.counts.len() < 2 {
        println!("At least two units are needed to correlate SDGs.");
        return;
    }

    let matrix = metrics::correlation_matrix(&snapshot.counts);
    print!("{:>7}", "");
    for column in &matrix.columns {
        print!("{column:>7}");
    }
    println!();
    for (column, values) in matrix.columns.iter().zip(&matrix.values) {
        print!("{column:>7}");
        for value in values {
            if value.is_nan() {
                print!("{:>7}", "-");
            } else {
                print!("{value:>7.2}");
            }
        }
        println!();
    }
}
