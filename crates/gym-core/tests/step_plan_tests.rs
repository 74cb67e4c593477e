use gym_core::progress::remaining_exercise_steps;
use gym_core::{compute_progress, generate_steps, RepTarget, RestKind, StepKind};
use gym_domain::Routine;

fn routine(raw: &str) -> Routine {
    Routine::from_json(raw).expect("routine json")
}

fn shape(routine: &Routine) -> Vec<String> {
    generate_steps(routine).steps()
                           .iter()
                           .map(|s| match &s.kind {
                               StepKind::Exercise(_) => "ex".to_string(),
                               StepKind::Rest { rest_kind, rest_time } => format!("{}({rest_time})", rest_kind.as_str()),
                           })
                           .collect()
}

const MIXED: &str = r#"{ "id": "r", "name": "Full body", "series": [
    { "id": "s1", "type": "standard", "restAfterSerie": 120, "exercises": [
        { "id": "e1", "exerciseId": "squat", "trackingType": "reps", "restAfterSet": 90,
          "sets": [{ "id": "a", "reps": 5, "weight": 100 }, { "id": "b", "reps": 5, "weight": 100 }] },
        { "id": "e2", "exerciseId": "plank", "trackingType": "time", "restAfterSet": 30,
          "sets": [{ "id": "c", "time": 45 }, { "id": "d", "type": "failure" }] }
    ] },
    { "id": "s2", "type": "superset", "restAfterSerie": 60, "exercises": [
        { "id": "e3", "exerciseId": "curl", "trackingType": "reps", "restAfterSet": 20,
          "sets": [{ "id": "e", "reps": 12 }] },
        { "id": "e4", "exerciseId": "dip", "trackingType": "reps", "restAfterSet": 20,
          "sets": [{ "id": "f", "reps": 12 }] }
    ] }
] }"#;

#[test]
fn generation_is_deterministic_with_dense_indices() {
    let r = routine(MIXED);
    let a = generate_steps(&r);
    let b = generate_steps(&r);
    assert_eq!(a, b);
    assert_eq!(a.plan_hash(), b.plan_hash());
    for (i, step) in a.steps().iter().enumerate() {
        assert_eq!(step.step_index, i);
    }
}

#[test]
fn rests_are_placed_only_at_their_boundaries() {
    let r = routine(MIXED);
    assert_eq!(shape(&r),
               vec!["ex",
                    "set_rest(90)",
                    "ex",
                    "exercise_rest(90)",
                    "ex",
                    "set_rest(30)",
                    "ex",
                    "serie_rest(120)",
                    "ex",
                    "ex",
                    "serie_rest(60)"]);
}

#[test]
fn failure_sets_target_infinite_reps() {
    let plan = generate_steps(&routine(MIXED));
    let failure = plan.get(6).and_then(|s| s.exercise()).expect("failure set");
    assert_eq!(failure.target_reps, Some(RepTarget::ToFailure));
    let first = plan.get(0).and_then(|s| s.exercise()).unwrap();
    assert_eq!(first.target_reps, Some(RepTarget::Count(5)));
    assert_eq!(first.target_weight, 100.0);
}

#[test]
fn zero_rest_routine_has_only_exercise_steps() {
    let r = routine(r#"{ "id": "r", "name": "No rest", "series": [
        { "id": "s1", "exercises": [
            { "id": "e1", "exerciseId": "a", "sets": [{ "id": "1" }, { "id": "2" }, { "id": "3" }] },
            { "id": "e2", "exerciseId": "b", "sets": [{ "id": "4" }] }
        ] },
        { "id": "s2", "exercises": [
            { "id": "e3", "exerciseId": "c", "sets": [{ "id": "5" }, { "id": "6" }] }
        ] }
    ] }"#);
    let plan = generate_steps(&r);
    assert_eq!(plan.len(), r.total_sets());
    assert!(plan.steps().iter().all(|s| !s.is_rest()));
}

#[test]
fn empty_routine_and_empty_series_produce_nothing() {
    let r = routine(r#"{ "id": "r", "name": "Empty", "series": [
        { "id": "s1", "restAfterSerie": 60, "exercises": [] },
        { "id": "s2", "restAfterSerie": 60, "exercises": [{ "id": "e", "exerciseId": "x", "sets": [] }] }
    ] }"#);
    assert!(generate_steps(&r).is_empty());
}

#[test]
fn trailing_exercise_without_sets_keeps_serie_rest() {
    let r = routine(r#"{ "id": "r", "name": "Trailing", "series": [
        { "id": "s1", "restAfterSerie": 45, "exercises": [
            { "id": "e1", "exerciseId": "a", "restAfterSet": 10, "sets": [{ "id": "1" }] },
            { "id": "e2", "exerciseId": "b", "restAfterSet": 10, "sets": [] }
        ] }
    ] }"#);
    assert_eq!(shape(&r), vec!["ex", "serie_rest(45)"]);
}

#[test]
fn reps_routine_two_sets() {
    let r = routine(r#"{ "id": "r", "name": "Bench", "series": [
        { "id": "s1", "type": "standard", "restAfterSerie": 90, "exercises": [
            { "id": "e1", "exerciseId": "bench", "trackingType": "reps", "restAfterSet": 30,
              "sets": [{ "id": "a", "reps": 8 }, { "id": "b", "reps": 8 }] }
        ] }
    ] }"#);
    assert_eq!(shape(&r), vec!["ex", "set_rest(30)", "ex", "serie_rest(90)"]);
}

#[test]
fn superset_chains_exercises_before_serie_rest() {
    let r = routine(r#"{ "id": "r", "name": "Arms", "series": [
        { "id": "s1", "type": "superset", "restAfterSerie": 60, "exercises": [
            { "id": "e1", "exerciseId": "curl", "restAfterSet": 0, "sets": [{ "id": "a" }] },
            { "id": "e2", "exerciseId": "dip", "restAfterSet": 0, "sets": [{ "id": "b" }] }
        ] }
    ] }"#);
    let plan = generate_steps(&r);
    assert_eq!(shape(&r), vec!["ex", "ex", "serie_rest(60)"]);
    assert!(plan.get(0).and_then(|s| s.exercise()).unwrap().is_superset);
    assert_eq!(plan.get(2).and_then(|s| s.rest_kind()), Some(RestKind::SerieRest));
}

#[test]
fn progress_of_last_step_reaches_series_total() {
    let plan = generate_steps(&routine(MIXED));
    let last = compute_progress(plan.steps(), plan.len() - 1).expect("in range");
    assert_eq!(last.series.current, last.series.total);
    assert_eq!(last.series.total, 2);
    assert!(compute_progress(plan.steps(), plan.len()).is_none());
}

#[test]
fn progress_of_second_of_three_sets() {
    let r = routine(r#"{ "id": "r", "name": "Row", "series": [
        { "id": "s1", "exercises": [
            { "id": "e1", "exerciseId": "row", "restAfterSet": 30,
              "sets": [{ "id": "a" }, { "id": "b" }, { "id": "c" }] }
        ] }
    ] }"#);
    let plan = generate_steps(&r);
    // ex, rest, ex, rest, ex
    let second = compute_progress(plan.steps(), 2).unwrap();
    let set = second.set.expect("exercise step");
    assert_eq!((set.current, set.total), (2, 3));
    assert_eq!(second.set_label().as_deref(), Some("Set 2 of 3"));
    assert_eq!(remaining_exercise_steps(plan.steps(), 2), 1);
}
