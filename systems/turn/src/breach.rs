use lane_defence_core::{BoardCoord, Event, Player};
use tracing::debug;

/// Running history of the cells where opposing units scored against us.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreachLog {
    locations: Vec<BoardCoord>,
}

impl BreachLog {
    /// Appends the location of every breach made by the opponent.
    pub fn record(&mut self, events: &[Event]) {
        for event in events {
            let Event::Breach { location, attacker } = *event;
            if attacker != Player::Opponent {
                continue;
            }

            debug!(at = %location, "opponent breach recorded");
            self.locations.push(location);
        }
    }

    /// Breach locations in arrival order.
    #[must_use]
    pub fn locations(&self) -> &[BoardCoord] {
        &self.locations
    }
}
