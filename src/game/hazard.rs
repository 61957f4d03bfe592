use super::food::FoodCell;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Schedules hazardous food to turn safe after a fixed delay.
///
/// Each armed timer runs on its own detached thread and is never joined.  A
/// timer only touches the food item it was armed for: if that item has been
/// eaten or replaced by the time the delay is up, the timer does nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct HazardTimer {
    delay: Duration,
}

impl HazardTimer {
    pub(crate) fn new(delay: Duration) -> HazardTimer {
        HazardTimer { delay }
    }

    /// Start a timer that will downgrade the food in `food` to safe after
    /// the delay, provided it's still the item with the given generation
    pub(crate) fn arm(self, food: &FoodCell, generation: u64) {
        let food = food.clone();
        let delay = self.delay;
        let r = thread::Builder::new()
            .name(String::from("hazard-timer"))
            .spawn(move || {
                thread::sleep(delay);
                if food.expire(generation) {
                    debug!(generation, "Hazardous food has turned safe");
                } else {
                    trace!(generation, "Hazard timer fired for food that is gone");
                }
            });
        match r {
            Ok(_detached) => trace!(generation, ?delay, "Armed hazard timer"),
            // The food stays hazardous until it's eaten or replaced.
            Err(e) => warn!(generation, error = %e, "Failed to spawn hazard timer"),
        }
    }
}
