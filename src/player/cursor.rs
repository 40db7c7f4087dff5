//! Cursor advance policy for next/previous under the current modes.

use rand::Rng;

use super::types::{Direction, PlaybackModes};

/// Compute the cursor position that follows `index` in `direction`.
///
/// Returns `None` when the playlist is empty.
pub fn advance<R: Rng + ?Sized>(
    index: usize,
    len: usize,
    direction: Direction,
    modes: &PlaybackModes,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if modes.random {
        // May land on the current track again.
        return Some(rng.gen_range(0..len));
    }

    // A stale cursor (e.g. after the list shrank) is treated as the last track.
    let index = index.min(len - 1);

    let next = match (direction, modes.looping) {
        (Direction::Forward, true) => (index + 1) % len,
        (Direction::Backward, true) => (index + len - 1) % len,
        (Direction::Forward, false) => (index + 1).min(len - 1),
        (Direction::Backward, false) => index.saturating_sub(1),
    };
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn modes(looping: bool, random: bool) -> PlaybackModes {
        PlaybackModes {
            looping,
            random,
            ..PlaybackModes::default()
        }
    }

    #[test]
    fn empty_playlist_has_no_next_position() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(advance(0, 0, Direction::Forward, &modes(true, false), &mut rng), None);
        assert_eq!(advance(0, 0, Direction::Backward, &modes(false, true), &mut rng), None);
    }

    #[test]
    fn looping_wraps_both_ways() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = modes(true, false);
        assert_eq!(advance(2, 3, Direction::Forward, &m, &mut rng), Some(0));
        assert_eq!(advance(0, 3, Direction::Backward, &m, &mut rng), Some(2));
        assert_eq!(advance(1, 3, Direction::Forward, &m, &mut rng), Some(2));
    }

    #[test]
    fn linear_mode_clamps_at_both_ends() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = modes(false, false);
        assert_eq!(advance(2, 3, Direction::Forward, &m, &mut rng), Some(2));
        assert_eq!(advance(0, 3, Direction::Backward, &m, &mut rng), Some(0));
        assert_eq!(advance(1, 3, Direction::Backward, &m, &mut rng), Some(0));
    }

    #[test]
    fn looping_forward_then_backward_round_trips() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = modes(true, false);
        for len in 1..8 {
            for start in 0..len {
                let fwd = advance(start, len, Direction::Forward, &m, &mut rng).unwrap();
                let back = advance(fwd, len, Direction::Backward, &m, &mut rng).unwrap();
                assert_eq!(back, start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn random_mode_stays_in_range_and_ignores_direction() {
        let mut rng = StdRng::seed_from_u64(42);
        let m = modes(false, true);
        for _ in 0..500 {
            let f = advance(3, 5, Direction::Forward, &m, &mut rng).unwrap();
            let b = advance(3, 5, Direction::Backward, &m, &mut rng).unwrap();
            assert!(f < 5 && b < 5);
        }
    }

    #[test]
    fn random_mode_with_single_track_returns_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = modes(true, true);
        for _ in 0..20 {
            assert_eq!(advance(0, 1, Direction::Forward, &m, &mut rng), Some(0));
        }
    }

    #[test]
    fn out_of_range_cursor_is_clamped_before_moving() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            advance(9, 3, Direction::Backward, &modes(false, false), &mut rng),
            Some(1)
        );
    }
}
