use tablesight_ai::advisor::Advisor;
use tablesight_ai::config::AdvisorConfig;
use tablesight_ai::logging::init_test_logging;
use tablesight_ai::snapshot::{SeatedOpponent, TableSnapshot};
use tablesight_engine::cards::parse_cards;
use tracing::Level;

// Only test in this binary: the capture subscriber is process-global.
#[test]
fn advisor_events_reach_the_global_subscriber() {
    let logs = init_test_logging();
    let mut advisor = Advisor::new(AdvisorConfig {
        iterations: 200,
        seed: Some(3),
        ..AdvisorConfig::default()
    })
    .expect("valid config");

    let snapshot = TableSnapshot {
        hero_cards: parse_cards("Jc Jd").unwrap(),
        board: parse_cards("9s 4h 2d").unwrap(),
        pot: 120,
        call_amount: 40,
        hero_stack: 1000,
        opponents: vec![SeatedOpponent {
            id: "seat1".into(),
            stack: 800,
            ..SeatedOpponent::default()
        }],
        big_blind: 20,
        hero_turn: true,
        ..TableSnapshot::default()
    };
    advisor.advise(&snapshot).expect("advice");
    advisor.advise(&snapshot).expect("advice");

    assert_eq!(logs.matching("equity simulation finished").len(), 1);
    assert_eq!(logs.matching("equity cache miss").len(), 1);
    assert_eq!(logs.matching("equity cache hit").len(), 1);

    let recs = logs.matching("recommendation");
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].level, Level::DEBUG);
    assert_eq!(recs[0].field("street"), Some("Flop"));
    assert_eq!(recs[0].field("mode"), Some("balanced"));

    let invalid = TableSnapshot {
        board: parse_cards("Jc 4h 2d").unwrap(),
        ..snapshot
    };
    assert!(advisor.advise(&invalid).is_none());
    assert_eq!(logs.matching("inconsistent snapshot").len(), 1);
}
