//! End-to-end tests for the adaptive testing loop
//!
//! Drives whole sessions through the public API and checks the stopping
//! behavior, estimate trajectories, and report output.

use bigfive_cat::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Ten moderately discriminating openness items spread over [-2, 2],
/// padded with a full pool for each remaining dimension
fn bank_with_openness(openness: Vec<Item>) -> ItemBank {
    let mut items = openness;
    for &d in &Dimension::ALL[1..] {
        let base = d.index() as u32 * 100;
        for i in 0..10u32 {
            let b = -2.0 + 4.0 * i as f64 / 9.0;
            items.push(Item::new(base + i, d, b, 2.5));
        }
    }
    ItemBank::new(items).unwrap()
}

fn spread_items(dimension: Dimension, n: u32, discrimination: f64, lo: f64, hi: f64) -> Vec<Item> {
    let base = dimension.index() as u32 * 100;
    (0..n)
        .map(|i| {
            let b = lo + (hi - lo) * i as f64 / (n - 1) as f64;
            Item::new(base + i, dimension, b, discrimination)
        })
        .collect()
}

/// Answer everything with the same raw value until the first dimension
/// finishes, returning its final state
fn drive_first_dimension(bank: &ItemBank, raw: u8) -> TestSession {
    let mut session = TestSession::new(CatConfig::default());
    while let Some(item) = session.current_question(bank).copied() {
        if item.dimension != Dimension::Openness {
            break;
        }
        session.submit_response(bank, item.id, raw).unwrap();
    }
    session
}

#[test]
fn consistent_endorsement_drives_theta_to_upper_bound() {
    // Unit-discrimination items cannot reach the precision target, so the
    // dimension runs to its item cap while theta climbs to the bound
    let bank = bank_with_openness(spread_items(Dimension::Openness, 10, 1.0, -2.0, 2.0));
    let session = drive_first_dimension(&bank, 5);

    let state = session.dimension_state(Dimension::Openness);
    assert!(state.finished);
    assert_eq!(state.count(), 10);
    assert_eq!(state.theta, 3.0);
    assert!(state.se.is_finite());
}

#[test]
fn alternating_answers_stop_early_on_precision() {
    // Highly discriminating items near the scale center pin theta down
    // fast; the precision rule fires before the item cap
    let bank = bank_with_openness(spread_items(Dimension::Openness, 10, 3.0, -0.45, 0.45));
    let mut session = TestSession::new(CatConfig::default());
    let mut raws = [1u8, 5].iter().cycle();

    loop {
        let item = *session.current_question(&bank).unwrap();
        if item.dimension != Dimension::Openness {
            break;
        }
        session.submit_response(&bank, item.id, *raws.next().unwrap()).unwrap();
        if session.dimension_state(Dimension::Openness).finished {
            break;
        }
    }

    let state = session.dimension_state(Dimension::Openness);
    assert!(state.finished);
    assert!(state.count() >= 5);
    assert!(state.count() < 10, "stopped at {}", state.count());
    assert!(state.se <= 0.3);
    assert!(state.theta.abs() < 1.0, "theta = {}", state.theta);
}

#[test]
fn out_of_range_answer_is_rejected_and_test_resumes() {
    let bank = bank_with_openness(spread_items(Dimension::Openness, 10, 2.0, -2.0, 2.0));
    let mut session = TestSession::new(CatConfig::default());
    let item = *session.current_question(&bank).unwrap();

    let err = session.submit_response(&bank, item.id, 6).unwrap_err();
    assert_eq!(err, ResponseError::InvalidResponse(6));
    assert_eq!(session.total_answered(), 0);
    assert_eq!(session.current_question(&bank).unwrap().id, item.id);

    // the same item still accepts a valid answer afterwards
    let outcome = session.submit_response(&bank, item.id, 4).unwrap();
    assert_eq!(outcome.total_answered, 1);
}

#[test]
fn undersized_pool_forces_completion_at_exhaustion() {
    // Seven openness items with a precision target no unit-discrimination
    // pool can meet: the dimension closes when the pool runs dry
    let bank = bank_with_openness(spread_items(Dimension::Openness, 7, 1.0, -2.0, 2.0));
    let session = drive_first_dimension(&bank, 5);

    let state = session.dimension_state(Dimension::Openness);
    assert!(state.finished);
    assert_eq!(state.count(), 7);
    assert!(state.se > 0.3);
}

#[test]
fn current_question_stable_across_reads_and_snapshots() {
    let bank = bank_with_openness(spread_items(Dimension::Openness, 10, 2.0, -2.0, 2.0));
    let mut session = TestSession::new(CatConfig::default());
    for _ in 0..3 {
        let item = *session.current_question(&bank).unwrap();
        session.submit_response(&bank, item.id, 2).unwrap();
    }

    let direct = session.current_question(&bank).map(|i| i.id);
    assert_eq!(direct, session.current_question(&bank).map(|i| i.id));

    let restored = TestSession::from_json(&session.to_json().unwrap()).unwrap();
    assert_eq!(direct, restored.current_question(&bank).map(|i| i.id));
}

#[test]
fn standard_error_trends_downward_within_a_dimension() {
    let bank = bank_with_openness(spread_items(Dimension::Openness, 10, 2.0, -2.0, 2.0));
    let mut session = TestSession::new(CatConfig::default());
    let mut trajectory = Vec::new();

    loop {
        let item = *session.current_question(&bank).unwrap();
        if item.dimension != Dimension::Openness {
            break;
        }
        let outcome = session.submit_response(&bank, item.id, 4).unwrap();
        trajectory.push(outcome.se);
        if session.dimension_state(Dimension::Openness).finished {
            break;
        }
    }

    assert!(trajectory.len() >= 5);
    // each answer adds positive information at the new estimate, so the
    // tail of the trajectory never rises
    for pair in trajectory.windows(2).skip(1) {
        assert!(pair[1] <= pair[0] + 1e-9, "se rose: {:?}", pair);
    }
}

#[test]
fn progress_percentage_counts_total_against_maximum() {
    let bank = bank_with_openness(spread_items(Dimension::Openness, 10, 2.5, -2.0, 2.0));
    let mut session = TestSession::new(CatConfig::default());
    let mut answered = 0usize;

    while let Some(item) = session.current_question(&bank).copied() {
        let outcome = session.submit_response(&bank, item.id, 3).unwrap();
        answered += 1;
        let expected = answered as f64 / 50.0 * 100.0;
        assert!((outcome.progress_percentage - expected).abs() < 1e-9);
    }
    assert!(session.progress_percentage() <= 100.0);
}

#[test]
fn simulated_respondent_full_run_produces_coherent_report() {
    let mut items = Vec::new();
    for &d in &Dimension::ALL {
        let base = d.index() as u32 * 100;
        for i in 0..12u32 {
            let b = -2.5 + 5.0 * i as f64 / 11.0;
            items.push(Item::new(base + i, d, b, 2.0));
        }
    }
    let bank = ItemBank::new(items).unwrap();

    let respondent = SimulatedRespondent::new([2.0, -2.0, 0.3, 1.0, -0.5]);
    let mut rng = StdRng::seed_from_u64(2024);
    let session = respondent.run(&bank, CatConfig::default(), &mut rng).unwrap();

    assert!(session.is_completed());
    assert!((25..=50).contains(&session.total_answered()));

    let report = build_report(&session).unwrap();
    assert_eq!(report.scores.len(), 5);
    assert_eq!(report.total_answered, session.total_answered());
    for score in &report.scores {
        assert!((1.0..=5.0).contains(&score.score));
        assert!((5..=10).contains(&score.items_administered));
    }

    // strong true abilities land on the matching side of the scale
    let openness = &report.scores[Dimension::Openness.index()];
    assert!(openness.theta > 0.0);
    let conscientiousness = &report.scores[Dimension::Conscientiousness.index()];
    assert!(conscientiousness.theta < 0.0);
}

#[test]
fn completed_session_rejects_further_answers_and_keeps_report() {
    let bank = bank_with_openness(spread_items(Dimension::Openness, 10, 2.5, -2.0, 2.0));
    let mut session = TestSession::new(CatConfig::default());
    while let Some(item) = session.current_question(&bank).copied() {
        session.submit_response(&bank, item.id, if item.id.0 % 3 == 0 { 5 } else { 2 }).unwrap();
    }

    let report = build_report(&session).unwrap();
    let err = session.submit_response(&bank, ItemId(0), 3).unwrap_err();
    assert_eq!(err, ResponseError::AlreadyCompleted);
    assert_eq!(build_report(&session).unwrap(), report);
}
