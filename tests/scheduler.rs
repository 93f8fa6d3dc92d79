mod common;

use std::collections::HashSet;

use common::*;
use league_bot_lib::{ErrorKind, LeagueError, logic::fixture::FixtureState};
use time::Duration;

const FOUR: [(&str, &str); 4] = [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")];

fn pair(home: &str, away: &str) -> (String, String) {
    (home.to_string(), away.to_string())
}

#[tokio::test]
async fn first_round_follows_the_circle_method() {
    let (league, _) = league().await;
    seed(&league, EU_1, &FOUR).await;

    let summary = league.scheduler.generate_next_round(&caller(&[EU_1_OVERSEER]), EU_1).await.unwrap();
    assert_eq!(summary.game_week, 1);
    assert_eq!(summary.pairings, vec![pair("a", "d"), pair("b", "c")]);
    assert_eq!(summary.fixtures_created, 2);

    let fixtures = league.scheduler.fixtures_for_week(EU_1, 1).await.unwrap();
    assert_eq!(fixtures.len(), 2);
    for fixture in fixtures.iter() {
        assert_eq!(fixture.state, FixtureState::Pending);
        assert_eq!(fixture.deadline - fixture.created_at, Duration::days(5));
    }
}

#[tokio::test]
async fn full_cycle_meets_everyone_once() {
    let (league, _) = league().await;
    seed(&league, EU_1, &FOUR).await;
    let eu = caller(&[EU_1_OVERSEER]);

    let mut seen = HashSet::new();
    for week in 1..=3 {
        let summary = league.scheduler.generate_next_round(&eu, EU_1).await.unwrap();
        assert_eq!(summary.game_week, week);

        let mut teams_this_week = HashSet::new();
        for (home, away) in summary.pairings {
            assert!(teams_this_week.insert(home.clone()));
            assert!(teams_this_week.insert(away.clone()));

            let key = if home < away { (home, away) } else { (away, home) };
            assert!(seen.insert(key), "pair repeated in week {week}");
        }
    }
    assert_eq!(seen.len(), 6);

    let err = league.scheduler.generate_next_round(&eu, EU_1).await.unwrap_err();
    assert!(matches!(err, LeagueError::EmptyRound { game_week: 4, .. }));
    assert_eq!(count(&league.db, "SELECT COUNT(*) FROM fixtures").await, 6);
}

#[tokio::test]
async fn odd_roster_leaves_one_team_out_each_week() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")]).await;
    let eu = caller(&[EU_1_OVERSEER]);

    let mut resting = HashSet::new();
    for _ in 1..=5 {
        let summary = league.scheduler.generate_next_round(&eu, EU_1).await.unwrap();
        assert_eq!(summary.pairings.len(), 2);

        let playing: HashSet<String> = summary.pairings.iter()
            .flat_map(|(home, away)| [home.clone(), away.clone()])
            .collect();
        let rest: Vec<&str> = ["a", "b", "c", "d", "e"].into_iter().filter(|t| !playing.contains(*t)).collect();
        assert_eq!(rest.len(), 1);
        resting.insert(rest[0]);
    }

    // Every team has its bye once.
    assert_eq!(resting.len(), 5);
    assert_eq!(count(&league.db, "SELECT COUNT(*) FROM fixtures").await, 10);

    let err = league.scheduler.generate_next_round(&eu, EU_1).await.unwrap_err();
    assert!(matches!(err, LeagueError::EmptyRound { game_week: 6, .. }));
}

#[tokio::test]
async fn cycle_length_follows_the_current_roster() {
    let (league, _) = league().await;
    seed(&league, EU_1, &FOUR).await;
    let eu = caller(&[EU_1_OVERSEER]);

    for _ in 1..=3 {
        league.scheduler.generate_next_round(&eu, EU_1).await.unwrap();
    }
    let err = league.scheduler.generate_next_round(&eu, EU_1).await.unwrap_err();
    assert!(matches!(err, LeagueError::EmptyRound { game_week: 4, .. }));

    // A fifth team stretches the cycle to five rounds.
    seed(&league, EU_1, &[("e", "E")]).await;
    let summary = league.scheduler.generate_next_round(&eu, EU_1).await.unwrap();
    assert_eq!(summary.game_week, 4);
    assert_eq!(summary.pairings.len(), 2);
}

#[tokio::test]
async fn weeks_are_per_division() {
    let (league, _) = league().await;
    seed(&league, EU_1, &FOUR).await;
    seed(&league, NA_1, &[("x", "X"), ("y", "Y")]).await;

    league.scheduler.generate_next_round(&admin(), EU_1).await.unwrap();
    league.scheduler.generate_next_round(&admin(), EU_1).await.unwrap();
    let summary = league.scheduler.generate_next_round(&admin(), NA_1).await.unwrap();

    assert_eq!(summary.game_week, 1);
    assert_eq!(summary.pairings, vec![pair("x", "y")]);
}

#[tokio::test]
async fn needs_two_teams() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("a", "A")]).await;

    let err = league.scheduler.generate_next_round(&admin(), EU_1).await.unwrap_err();
    assert!(matches!(err, LeagueError::InsufficientTeams { count: 1, .. }));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn needs_the_division_role() {
    let (league, _) = league().await;
    seed(&league, EU_1, &FOUR).await;

    let err = league.scheduler.generate_next_round(&caller(&[EU_2_OVERSEER]), EU_1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(count(&league.db, "SELECT COUNT(*) FROM fixtures").await, 0);
}

#[tokio::test]
async fn pending_fixtures_drop_completed_ones() {
    let (league, _) = league().await;
    seed(&league, EU_1, &FOUR).await;
    let eu = caller(&[EU_1_OVERSEER]);

    league.scheduler.generate_next_round(&eu, EU_1).await.unwrap();
    league.ledger.submit_result(&eu, EU_1, 1, "b", "c", 0, 0).await.unwrap();

    let pending = league.scheduler.pending_fixtures(EU_1).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!((pending[0].home_team_id.as_str(), pending[0].away_team_id.as_str()), ("a", "d"));
}
