// Functions and methods for ranking teams within a division table.
use std::cmp::Ordering;

use crate::logic::standings::StandingsRow;

// Separator between a team's name and its number, as in "Lions︱7".
pub const NAME_NUMBER_SEPARATOR: char = '︱';

// What ranking criteria the table uses.
#[derive(Debug)]
#[derive(Eq, Hash, PartialEq)]
#[derive(Clone, Copy)]
pub enum RankCriteria {
    Points,
    GoalDifference,
    GoalsFor,
    NameNumber,     // Lower is better.

    // Last resort so that the order is never ambiguous.
    TeamId,
}

// The order in which criteria are applied.
pub const TABLE_CRITERIA: [RankCriteria; 5] = [
    RankCriteria::Points,
    RankCriteria::GoalDifference,
    RankCriteria::GoalsFor,
    RankCriteria::NameNumber,
    RankCriteria::TeamId,
];

type CmpFunc = fn (&StandingsRow, &StandingsRow) -> Ordering;

// Compare functions here.

fn compare_points(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points.cmp(&a.points)
}

fn compare_goal_difference(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.goal_difference().cmp(&a.goal_difference())
}

fn compare_goals_for(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.goals_for.cmp(&a.goals_for)
}

fn compare_name_number(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    name_number(&a.team_name).cmp(&name_number(&b.team_name))
}

fn compare_team_id(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    a.team_id.cmp(&b.team_id)
}

pub fn get_sort_function(criteria: RankCriteria) -> CmpFunc {
    match criteria {
        RankCriteria::Points => compare_points,
        RankCriteria::GoalDifference => compare_goal_difference,
        RankCriteria::GoalsFor => compare_goals_for,
        RankCriteria::NameNumber => compare_name_number,
        RankCriteria::TeamId => compare_team_id,
    }
}

// Compare two rows by the criteria in order until one of them tells them apart.
pub fn compare(a: &StandingsRow, b: &StandingsRow, criteria: &[RankCriteria]) -> Ordering {
    criteria.iter()
        .map(|c| get_sort_function(*c)(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

// Sort the rows into table order and number them from 1.
pub fn rank(rows: &mut [StandingsRow]) {
    rows.sort_by(|a, b| compare(a, b, &TABLE_CRITERIA));
    for (i, row) in rows.iter_mut().enumerate() {
        row.position = i + 1;
    }
}

// The number carried in a team name.
// With a separator it is the leading digits after it, otherwise the digits
// ending the name. A name without such digits counts as 0.
pub fn name_number(name: &str) -> u64 {
    let digits: &str = match name.split_once(NAME_NUMBER_SEPARATOR) {
        Some((_, rest)) => {
            let rest = rest.trim_start();
            let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            &rest[..end]
        },
        None => {
            let trimmed = name.trim_end();
            let stem = trimmed.trim_end_matches(|c: char| c.is_ascii_digit());
            &trimmed[stem.len()..]
        },
    };

    digits.bytes().fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d - b'0')))
}
