use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tidepath_core::{CollisionMap, Direction, PosKey, Position};

/// Breadth-first walk from `from`, stopping after `budget` tiles have been
/// reached.
///
/// Returns every reached vertex with its step count. Moves follow the
/// collision map's 8-directional rules; transports are not followed.
pub fn reachable_within<M: CollisionMap>(
    map: &M,
    from: Position,
    budget: usize,
) -> FxHashMap<PosKey, i32> {
    let mut reached: FxHashMap<PosKey, i32> = FxHashMap::default();
    if budget == 0 || !from.is_valid() || !map.has_level(from.level) {
        return reached;
    }

    let mut queue: VecDeque<Position> = VecDeque::new();
    reached.insert(from.key(), 0);
    queue.push_back(from);

    'walk: while let Some(cur) = queue.pop_front() {
        let dist = reached.get(&cur.key()).copied().unwrap_or(0);
        let flags = map.flags(cur.x, cur.y, cur.level);
        if flags.is_full() {
            continue;
        }
        for dir in Direction::ALL {
            if flags.contains(dir) {
                continue;
            }
            let next = cur.offset(dir.delta());
            if !next.is_valid() {
                continue;
            }
            let nk = next.key();
            if reached.contains_key(&nk) {
                continue;
            }
            if reached.len() >= budget {
                break 'walk;
            }
            reached.insert(nk, dist + 1);
            queue.push_back(next);
        }
    }

    reached
}
