use super::*;
use futures::executor::block_on;
use serde_json::json;

fn aligned(text: &str) -> AlignedChart {
    let engine = Engine::new();
    let ds = load(text);
    block_on(engine.align(&ds)).unwrap()
}

fn names(chart: &AlignedChart) -> Vec<&str> {
    chart
        .trajectories
        .iter()
        .map(|t| t.display_name.as_str())
        .collect()
}

#[test]
fn align_emits_one_trajectory_per_reference_occurrence() {
    let chart = aligned(BASIC_CSV);
    assert_eq!(
        names(&chart),
        [
            "Anthony Joshua (1)",
            "Anthony Joshua (2)",
            "Daniel Dubois",
            "Tyson Fury"
        ]
    );
    assert!(
        chart
            .trajectories
            .iter()
            .all(|t| t.original_boxer_name != "Oleksandr Usyk"
                && t.original_boxer_name != "Deontay Wilder")
    );
}

#[test]
fn align_marks_exactly_one_reference_point_at_shared_x() {
    let chart = aligned(BASIC_CSV);
    assert_eq!(chart.reference_x, 30.0);
    for t in &chart.trajectories {
        let refs: Vec<_> = t.points.iter().filter(|p| p.is_reference_fight).collect();
        assert_eq!(refs.len(), 1, "{}", t.display_name);
        assert_eq!(refs[0].x, chart.reference_x);
        let fight = refs[0].source_fight.as_ref().unwrap();
        assert_eq!(fight.opponent, "Oleksandr Usyk");
    }

    // Each repeat trajectory is anchored on its own occurrence.
    let aj1 = &chart.trajectories[0];
    let aj2 = &chart.trajectories[1];
    assert_eq!(aj1.reference_point_index(), Some(3));
    assert_eq!(aj2.reference_point_index(), Some(4));
}

#[test]
fn align_steps_follow_results() {
    let chart = aligned(BASIC_CSV);
    for t in &chart.trajectories {
        for pair in t.points.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(b.x > a.x);
            let delta = b.source_fight.as_ref().unwrap().result.delta() as f64;
            assert_eq!(b.y - a.y, delta, "{}", t.display_name);
        }
    }
}

#[test]
fn align_equal_spacing_positions() {
    let chart = aligned(BASIC_CSV);
    let xy = |i: usize| -> Vec<(f64, f64)> {
        chart.trajectories[i]
            .points
            .iter()
            .map(|p| (p.x, p.y))
            .collect()
    };

    assert_eq!(
        xy(0),
        [
            (24.0, -5.0),
            (26.0, -4.0),
            (28.0, -3.0),
            (30.0, -4.0),
            (32.0, -5.0),
            (34.0, -4.0)
        ]
    );
    assert_eq!(
        xy(1),
        [
            (22.0, -2.0),
            (24.0, -1.0),
            (26.0, 0.0),
            (28.0, -1.0),
            (30.0, -2.0),
            (32.0, -1.0)
        ]
    );
    assert_eq!(xy(2), [(28.0, 1.0), (30.0, 0.0), (32.0, 1.0)]);
    assert_eq!(
        xy(3),
        [(22.0, 1.0), (24.0, 2.0), (26.0, 2.0), (28.0, 3.0), (30.0, 2.0)]
    );

    let targets: Vec<_> = chart.trajectories.iter().map(|t| t.target_y).collect();
    assert_eq!(targets, [-3.0, -1.0, 1.0, 3.0]);
    let records: Vec<_> = chart
        .trajectories
        .iter()
        .map(|t| t.record_at_reference)
        .collect();
    assert_eq!(records, [3, 2, 1, 3]);
}

#[test]
fn align_repeat_occurrences_share_color() {
    let chart = aligned(BASIC_CSV);
    let t = &chart.trajectories;
    assert_eq!(t[0].color_key, t[1].color_key);
    assert_eq!(t[0].color, t[1].color);
    assert_eq!(t[0].color, "#1f77b4");
    // Color domain follows dataset order, not sort order.
    assert_eq!(t[3].original_boxer_name, "Tyson Fury");
    assert_eq!(t[3].color, "#ff7f0e");
    assert_eq!(t[2].color, "#2ca02c");
}

#[test]
fn align_first_fight_reference_has_no_preceding_point() {
    let chart = aligned(FIRST_FIGHT_CSV);
    assert_eq!(chart.trajectories.len(), 1);
    let t = &chart.trajectories[0];
    assert_eq!(t.display_name, "Rookie");
    assert_eq!(t.points.len(), 3);
    assert_eq!(t.reference_point_index(), Some(0));
    assert_eq!(t.points[0].x, 30.0);
    assert_eq!(t.record_at_reference, 0);
    assert_eq!(t.approach_segment(), Some((0, 1)));
}

#[test]
fn align_date_mode_maps_onto_band() {
    let mut cfg = ChartConfig::empty_object();
    cfg.set_value("align.mode", json!("date"));
    let engine = Engine::new().with_config(cfg);
    let chart = engine.align_sync(&load(BASIC_CSV)).unwrap();
    assert_eq!(chart.mode, AlignMode::Date);

    let targets: Vec<_> = chart.trajectories.iter().map(|t| t.target_y).collect();
    assert_eq!(targets[0], -20.0);
    assert_eq!(targets[3], 20.0);
    assert!(targets.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn align_descending_order_reverses_slots() {
    let mut cfg = ChartConfig::empty_object();
    cfg.set_value("align.order", json!("descending"));
    let engine = Engine::new().with_config(cfg);
    let chart = engine.align_sync(&load(BASIC_CSV)).unwrap();
    assert_eq!(
        names(&chart),
        [
            "Tyson Fury",
            "Daniel Dubois",
            "Anthony Joshua (2)",
            "Anthony Joshua (1)"
        ]
    );
}

#[test]
fn align_missing_reference_is_an_error() {
    let ds = load(include_str!("../../../../fixtures/bouts/no_reference.csv"));
    let err = Engine::new().align_sync(&ds).unwrap_err();
    assert!(matches!(err, Error::MissingReference { ref name } if name == "Oleksandr Usyk"));
}

#[test]
fn align_other_reference_fighter() {
    let mut cfg = ChartConfig::empty_object();
    cfg.set_value("reference.name", json!("Tyson Fury"));
    let engine = Engine::new().with_config(cfg);
    let chart = engine.align_sync(&load(BASIC_CSV)).unwrap();
    assert_eq!(names(&chart), ["Deontay Wilder", "Oleksandr Usyk"]);
}

#[test]
fn align_is_deterministic() {
    let a = aligned(BASIC_CSV);
    let b = aligned(BASIC_CSV);
    let bits = |c: &AlignedChart| -> Vec<(u64, u64)> {
        c.trajectories
            .iter()
            .flat_map(|t| t.points.iter().map(|p| (p.x.to_bits(), p.y.to_bits())))
            .collect()
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn aligned_chart_serializes_camel_case() {
    let chart = aligned(FIRST_FIGHT_CSV);
    let v = serde_json::to_value(&chart).unwrap();
    assert_eq!(v["mode"], json!("equalSpacing"));
    assert_eq!(v["trajectories"][0]["displayName"], json!("Rookie"));
    assert_eq!(v["trajectories"][0]["points"][0]["isReferenceFight"], json!(true));
    assert_eq!(
        v["trajectories"][0]["points"][0]["sourceFight"]["result"],
        json!("Loss")
    );
}

fn ref_engine(order: &str) -> Engine {
    let mut cfg = ChartConfig::empty_object();
    cfg.set_value("reference.name", json!("Ref"));
    cfg.set_value("align.order", json!(order));
    Engine::new().with_config(cfg)
}

#[test]
fn align_same_day_occurrences_keep_dataset_order() {
    let csv = "\
Opponent 1,Opponent 2,Result,Method,Date
Ref,Z,W,KO,2020-01-01
Z,Ref,L,KO,2020-01-01
B,Ref,L,UD,2020-01-01
A,Ref,L,SD,2020-01-01
";
    let ds = load(csv);
    for order in ["ascending", "descending"] {
        let chart = ref_engine(order).align_sync(&ds).unwrap();
        assert_eq!(names(&chart), ["Z", "B", "A"], "{order}");
    }
}

#[test]
fn align_rejects_duplicate_boxer_records() {
    let fight = |opponent: &str, result: FightResult| Fight {
        opponent: opponent.to_string(),
        result,
        date: None,
        method: None,
        sequence_number: 1,
    };
    let mut first = BoxerRecord::new("A");
    first.fights.push(fight("x", FightResult::Win));
    first.fights.push(fight("Ref", FightResult::Loss));
    let mut second = BoxerRecord::new("A");
    second.fights.push(fight("Ref", FightResult::Loss));

    let ds = Dataset::from_records(vec![BoxerRecord::new("Ref"), first, second]);
    let err = ref_engine("ascending").align_sync(&ds).unwrap_err();
    assert!(matches!(err, Error::DuplicateBoxer { ref name } if name == "A"));
}
