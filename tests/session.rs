// tests/session.rs
// Multi-turn sessions: roster folding and concept tracking

mod common;

use common::{ScriptedClient, roster};
use serde_json::json;

use classroom::simulation::{InitOutcome, Origin, SAMPLE_TOPIC, Session, SimulationPolicy};

fn opened(client: std::sync::Arc<ScriptedClient>) -> Session {
    let outcome = InitOutcome {
        topic: "Photosynthesis".into(),
        students: roster([10, 20, 30]),
        origin: Origin::Backend,
    };
    Session::from_outcome(client, SimulationPolicy::default(), outcome)
}

fn turn(concept: Option<&str>, scores: [u8; 3]) -> serde_json::Value {
    json!({
        "taught_concept": concept,
        "students": [
            {"id": "1", "understanding": scores[0], "response": "I understand that light matters but why?", "shouldSpeak": true},
            {"id": "2", "understanding": scores[1], "response": "", "shouldSpeak": false},
            {"id": "3", "understanding": scores[2], "response": "", "shouldSpeak": false}
        ]
    })
}

#[tokio::test]
async fn turns_fold_into_roster() {
    let client = ScriptedClient::replying(vec![
        turn(Some("Light Reactions"), [40, 25, 30]),
        turn(Some("Calvin Cycle"), [60, 50, 35]),
    ]);
    let mut session = opened(client.clone());

    session.teach("Chlorophyll absorbs light.").await;
    assert_eq!(session.students()[0].understanding, 40);

    session.teach("Carbon is fixed in the stroma.").await;
    let scores: Vec<_> = session.students().iter().map(|s| s.understanding).collect();
    assert_eq!(scores, [60, 50, 35]);
    assert_eq!(session.turns(), 2);
    assert_eq!(session.taught_concepts().to_vec(), ["Light Reactions", "Calvin Cycle"]);

    // the second request sees the scores from the first turn
    let payload = client.payload(1);
    assert_eq!(payload["students"][0]["understanding"], 40);
}

#[tokio::test]
async fn repeated_concepts_recorded_once() {
    let client = ScriptedClient::replying(vec![
        turn(Some("Light Reactions"), [40, 25, 30]),
        turn(Some("light reactions"), [45, 25, 30]),
        turn(None, [45, 25, 30]),
    ]);
    let mut session = opened(client);

    for _ in 0..3 {
        session.teach("again").await;
    }
    assert_eq!(session.taught_concepts().to_vec(), ["Light Reactions"]);
    assert_eq!(session.turns(), 3);
}

#[tokio::test]
async fn failed_turn_still_advances_session() {
    let mut session = opened(ScriptedClient::failing());
    let outcome = session.teach("something").await;

    assert_eq!(outcome.origin, Origin::Fallback);
    assert_eq!(session.turns(), 1);
    assert!((session.average_understanding() - 30.0).abs() < f64::EPSILON);
    assert!(session.taught_concepts().is_empty());
}

#[tokio::test]
async fn start_with_short_notes_opens_sample_classroom() {
    let client = ScriptedClient::new();
    let session = Session::start(client.clone(), SimulationPolicy::default(), "hi", "").await;

    assert_eq!(session.topic(), SAMPLE_TOPIC);
    assert_eq!(session.origin(), Origin::Sample);
    assert_eq!(session.students().len(), 3);
    assert_eq!(client.calls(), 0);
}
