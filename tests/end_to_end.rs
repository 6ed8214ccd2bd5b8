use chrono::{TimeZone, Utc};
use personascore::models::RankedBucket;
use personascore::*;

fn summary(top: &[RankedBucket]) -> Vec<(Bucket, u32)> {
    top.iter().map(|r| (r.bucket, r.value)).collect()
}

#[test]
fn sample_quiz_swiped_to_completion() {
    let quiz = Quiz::sample();
    let mut session = QuizSession::new(&quiz);
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

    let swipes = [
        Gesture::new(150.0, 0.0, 0.0), // 1b
        Gesture::new(5.0, 5.0, 0.0), // ignored
        Gesture::new(-200.0, 30.0, 0.0), // 2a
        Gesture::new(120.0, -10.0, 0.0), // 3b
        Gesture::new(90.0, 0.0, 0.0), // 4b
    ];

    let mut completed = None;
    for gesture in &swipes {
        if let SessionStep::Completed(raw) = session.apply_gesture(gesture, at) {
            completed = Some(raw);
        }
    }

    let raw = completed.expect("session should complete");
    assert_eq!(raw, PersonalityBuckets::new(21, 0, 13, 4));
    assert_eq!(raw.total(), 38);

    let percentages = normalize(&raw, RoundingMode::Independent);
    assert_eq!(percentages, PersonalityBuckets::new(55, 0, 34, 11));

    let top = top_buckets(&percentages, 2);
    assert_eq!(
        summary(&top),
        vec![(Bucket::Feeling, 55), (Bucket::Intuition, 34)]
    );

    let insights = generate_insights(&top);
    assert_eq!(insights.len(), 3);
}

#[test]
fn profile_from_discrete_choices_matches_swipes() {
    let quiz = Quiz::sample();
    let mut session = QuizSession::new(&quiz);
    let at = Utc::now();
    for id in ["1b", "2a", "3b", "4b"] {
        session.choose(id, at).unwrap();
    }

    let profile = build_profile(&quiz, session.answers(), &ScoringSettings::default());
    assert_eq!(profile.raw, PersonalityBuckets::new(21, 0, 13, 4));
    assert_eq!(profile.percentages, PersonalityBuckets::new(55, 0, 34, 11));
    assert_eq!(profile.top[0].bucket, Bucket::Feeling);
    assert_eq!(profile.top[1].bucket, Bucket::Intuition);
    assert_eq!(profile.answers_scored, 4);
    assert_eq!(profile.skipped_references, 0);
}

#[test]
fn dangling_reference_contributes_nothing() {
    let quiz = Quiz::sample();
    let answers = vec![
        QuizSessionAnswer {
            question_id: "1".to_string(),
            answer_id: "1b".to_string(),
            answered_at: Utc::now(),
        },
        QuizSessionAnswer {
            question_id: "2".to_string(),
            answer_id: "missing".to_string(),
            answered_at: Utc::now(),
        },
    ];

    assert_eq!(aggregate(&quiz, &answers), PersonalityBuckets::new(8, 0, 0, 0));
}
