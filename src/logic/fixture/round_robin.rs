// Circle-method round-robin pairing.
//
// The first team stays in place while the others rotate one step per round,
// the last one moving to the second slot. In a round, slot i meets slot n-1-i.
// An odd roster gets an empty slot; whoever meets it has a bye.

// Pairings of one round (1-based) for the roster in the given order.
// Rounds outside 1..=n-1 have no pairings.
pub fn round_pairings<T: Clone>(teams: &[T], round: usize) -> Vec<(T, T)> {
    let mut slots: Vec<Option<&T>> = teams.iter().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }

    let n = slots.len();
    if n < 2 || round == 0 || round > n - 1 {
        return Vec::new();
    }

    for _ in 1..round {
        slots[1..].rotate_right(1);
    }

    let mut pairings = Vec::with_capacity(n / 2);
    for i in 0..n / 2 {
        if let (Some(home), Some(away)) = (slots[i], slots[n - 1 - i]) {
            pairings.push((home.clone(), away.clone()));
        }
    }

    return pairings;
}

// How many rounds a full cycle takes for a roster of this size.
pub fn rounds_in_cycle(teams: usize) -> usize {
    match teams {
        0 | 1 => 0,
        n => n + n % 2 - 1,
    }
}
