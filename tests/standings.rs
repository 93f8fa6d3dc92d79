mod common;

use common::*;
use league_bot_lib::LeagueError;

#[tokio::test]
async fn table_lists_unplayed_teams_with_zeroes() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("b", "Club︱2"), ("a", "Club︱1")]).await;

    let table = league.standings.table(EU_1).await.unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.iter().all(|row| row.points == 0 && row.games_played == 0));

    // Level on everything, the lower name number goes first.
    assert_eq!(table[0].team_id, "a");
    assert_eq!(table[0].position, 1);
    assert_eq!(table[1].position, 2);
}

#[tokio::test]
async fn table_ranks_by_points_goal_difference_and_goals() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("a", "A︱1"), ("b", "B︱2"), ("c", "C︱3"), ("d", "D︱4")]).await;
    let eu = caller(&[EU_1_OVERSEER]);

    // Week 1: a v d, b v c. Week 2: a v c, d v b.
    league.scheduler.generate_next_round(&eu, EU_1).await.unwrap();
    league.ledger.submit_result(&eu, EU_1, 1, "a", "d", 1, 0).await.unwrap();
    league.ledger.submit_result(&eu, EU_1, 1, "b", "c", 3, 1).await.unwrap();
    league.scheduler.generate_next_round(&eu, EU_1).await.unwrap();
    league.ledger.submit_result(&eu, EU_1, 2, "a", "c", 2, 2).await.unwrap();
    league.ledger.submit_result(&eu, EU_1, 2, "d", "b", 4, 2).await.unwrap();

    // a: 4 pts, +1. b: 3 pts, 0, 5 scored. d: 3 pts, +1. c: 1 pt.
    let table = league.standings.table(EU_1).await.unwrap();
    let order: Vec<&str> = table.iter().map(|row| row.team_id.as_str()).collect();
    assert_eq!(order, vec!["a", "d", "b", "c"]);

    let top = &table[0];
    assert_eq!((top.wins, top.draws, top.losses, top.points), (1, 1, 0, 4));
    assert_eq!(top.goal_difference(), 1);

    let package = table[1].package();
    assert_eq!(package["position"], 2);
    assert_eq!(package["goal_difference"], 1);
}

#[tokio::test]
async fn empty_division_has_an_empty_table() {
    let (league, _) = league().await;
    assert!(league.standings.table(NA_1).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_division_has_no_table() {
    let (league, _) = league().await;

    let err = league.standings.table("eu_div_9").await.unwrap_err();
    assert!(matches!(err, LeagueError::UnknownDivision(_)));
}

#[tokio::test]
async fn top_scorers_of_a_division() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("a", "A"), ("b", "B")]).await;
    seed(&league, NA_1, &[("x", "X")]).await;

    sqlx::query(
        "INSERT INTO players (player_id, player_name, team_id) VALUES
        ('p1', 'Striker', 'a'), ('p2', 'Winger', 'b'), ('p3', 'Keeper', 'a'), ('p4', 'Abroad', 'x')"
    ).execute(&league.db).await.unwrap();
    sqlx::query(
        "INSERT INTO player_stats (player_id, games_played, goals, assists, clean_sheets) VALUES
        ('p1', 5, 7, 1, 0), ('p2', 5, 9, 3, 0), ('p3', 5, 0, 0, 4), ('p4', 5, 20, 0, 0)"
    ).execute(&league.db).await.unwrap();

    let scorers = league.standings.top_scorers(EU_1, 2).await.unwrap();
    let names: Vec<&str> = scorers.iter().map(|s| s.player_name.as_str()).collect();
    assert_eq!(names, vec!["Winger", "Striker"]);
    assert_eq!(scorers[0].team_name, "B");

    let keeper = league.standings.player_stats("p3").await.unwrap().unwrap();
    assert_eq!(keeper.clean_sheets, 4);
    assert!(league.standings.player_stats("nobody").await.unwrap().is_none());
}
