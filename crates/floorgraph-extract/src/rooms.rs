use log::debug;

use floorgraph_core::Rect;

/// A free-space rectangle together with the doors on its boundary.
#[derive(Clone, Debug)]
pub struct Room {
    pub bounds: Rect,
    pub doors: Vec<Rect>,
}

/// Attach every door to the rooms whose boundary it touches.
///
/// Adjacency is flush and exact: one of the door's bounding edges must be
/// pixel-equal to one of the room's four bounding edges, and the door's span
/// along that edge must overlap the room edge's extent. There is no
/// tolerance band; source images are drawn pixel-perfect under the same
/// exact-color convention as the rest of the pipeline. A door may end up
/// attached to zero rooms (exterior), one room (dead end) or two rooms
/// (connector).
pub fn attach_doors(rooms: &[Rect], doors: &[Rect]) -> Vec<Room> {
    let attached: Vec<Room> = rooms
        .iter()
        .map(|&bounds| Room {
            bounds,
            doors: doors
                .iter()
                .copied()
                .filter(|door| is_flush(&bounds, door))
                .collect(),
        })
        .collect();

    let connected: usize = attached.iter().map(|r| r.doors.len()).sum();
    debug!(
        "attached doors to rooms: {} room(s), {} door link(s)",
        attached.len(),
        connected
    );
    attached
}

fn is_flush(room: &Rect, door: &Rect) -> bool {
    let v_overlap = door.max.y > room.min.y && door.min.y < room.max.y;
    let h_overlap = door.max.x > room.min.x && door.min.x < room.max.x;

    (door.max.x == room.min.x && v_overlap) // door flush left of the room
        || (door.min.x == room.max.x && v_overlap) // flush right
        || (door.max.y == room.min.y && h_overlap) // flush above
        || (door.min.y == room.max.y && h_overlap) // flush below
}
