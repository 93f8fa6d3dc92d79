mod common;

use common::*;
use league_bot_lib::{
    ErrorKind, LeagueError,
    logic::{audit::AuditEvent, channel::ChannelKind},
};

#[tokio::test]
async fn manager_signs_and_releases() {
    let (league, audit) = league().await;
    seed(&league, EU_1, &[("a", "A"), ("b", "B")]).await;
    let manager = caller(&[MANAGER, "a"]);

    let player = league.roster.sign_player(&manager, "p1", "Striker").await.unwrap();
    assert_eq!(player.team_id.as_deref(), Some("a"));
    assert_eq!(league.roster.players_of("a").await.unwrap(), vec![player]);

    let released = league.roster.release_player(&manager, "p1").await.unwrap();
    assert!(released.team_id.is_none());
    assert!(league.roster.players_of("a").await.unwrap().is_empty());

    let events = audit.events();
    assert!(events.iter().any(|e| matches!(e, AuditEvent::PlayerSigned { .. })));
    assert!(events.iter().any(|e| matches!(e, AuditEvent::PlayerReleased { .. })));
}

#[tokio::test]
async fn signing_moves_a_player_between_teams() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("a", "A"), ("b", "B")]).await;

    league.roster.sign_player(&caller(&[MANAGER, "a"]), "p1", "Striker").await.unwrap();
    league.roster.sign_player(&caller(&[MANAGER, "b"]), "p1", "Striker").await.unwrap();

    assert_eq!(league.roster.player("p1").await.unwrap().team_id.as_deref(), Some("b"));
}

#[tokio::test]
async fn caller_must_manage_exactly_one_team() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("a", "A"), ("b", "B")]).await;

    let err = league.roster.sign_player(&caller(&["a"]), "p1", "Striker").await.unwrap_err();
    assert!(matches!(err, LeagueError::NotManager));
    assert_eq!(err.kind(), ErrorKind::Unauthorized);

    let err = league.roster.sign_player(&caller(&[MANAGER, "unregistered"]), "p1", "Striker").await.unwrap_err();
    assert!(matches!(err, LeagueError::NoTeamRole));

    let err = league.roster.sign_player(&caller(&[MANAGER, "a", "b"]), "p1", "Striker").await.unwrap_err();
    assert!(matches!(err, LeagueError::MultipleTeamRoles(2)));
}

#[tokio::test]
async fn only_own_players_can_be_released() {
    let (league, _) = league().await;
    seed(&league, EU_1, &[("a", "A"), ("b", "B")]).await;

    league.roster.sign_player(&caller(&[MANAGER, "a"]), "p1", "Striker").await.unwrap();

    let err = league.roster.release_player(&caller(&[MANAGER, "b"]), "p1").await.unwrap_err();
    assert!(matches!(err, LeagueError::PlayerNotOnTeam { ref team_id, .. } if team_id == "b"));
    assert_eq!(league.roster.player("p1").await.unwrap().team_id.as_deref(), Some("a"));
}

#[tokio::test]
async fn channels_are_set_per_kind() {
    let (league, _) = league().await;

    assert!(league.channels.channel(ChannelKind::Signings).await.unwrap().is_none());

    league.channels.set_channel(ChannelKind::Signings, "111").await.unwrap();
    league.channels.set_channel(ChannelKind::Signings, "222").await.unwrap();
    league.channels.set_channel(ChannelKind::Logs, "333").await.unwrap();

    assert_eq!(league.channels.channel(ChannelKind::Signings).await.unwrap().as_deref(), Some("222"));
    assert_eq!(league.channels.channel(ChannelKind::Logs).await.unwrap().as_deref(), Some("333"));
    assert!(league.channels.channel(ChannelKind::Releases).await.unwrap().is_none());
}
