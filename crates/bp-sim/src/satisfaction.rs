//! Barge-operator satisfaction scores on a 1 (unhappy) to 7 (happy) scale.

/// Score the accuracy of the announced leave time.
///
/// `deviation` is `expected_leave - actual_leave`: positive when the barge
/// left earlier than announced.  Leaving late hurts more than leaving early.
pub fn information_satisfaction(deviation: i64) -> u8 {
    match deviation {
        d if d > 179 => 4,
        d if d > 37 => 5,
        d if d > 7 => 6,
        d if d > -3 => 7,
        d if d > -7 => 6,
        d if d > -15 => 5,
        d if d > -34 => 4,
        d if d > -79 => 3,
        d if d > -180 => 2,
        _ => 1,
    }
}

/// Score the waiting time relative to the time spent being handled.
pub fn waiting_satisfaction(waiting: u64, handling: u64) -> u8 {
    let fraction = waiting_fraction(waiting, handling);
    match fraction {
        f if f < 0.61 => 7,
        f if f < 0.76 => 6,
        f if f < 0.95 => 5,
        f if f < 1.2 => 4,
        f if f < 1.54 => 3,
        f if f < 2.0 => 2,
        _ => 1,
    }
}

/// `waiting / handling`, or 0 when nothing was handled.
pub fn waiting_fraction(waiting: u64, handling: u64) -> f64 {
    if handling == 0 { 0.0 } else { waiting as f64 / handling as f64 }
}
