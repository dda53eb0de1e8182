use crate::model::{Floor, Passenger, PassengerId};

/// Riders other than `dropped` that are headed to the same floor. Each one is a stop the
/// player could have batched earlier.
pub fn co_rider_penalty(riding: &[Passenger], dropped: PassengerId, destination: Floor) -> i64 {
    riding
        .iter()
        .filter(|p| p.id != dropped && p.destination == destination)
        .count() as i64
}

pub fn drop_award(base: i64, penalty: i64) -> i64 {
    (base - penalty).max(0)
}
