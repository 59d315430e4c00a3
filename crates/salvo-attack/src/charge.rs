//! Charge-gated weapons (capacitor style).
//!
//! A shot spends one charge. Every shot restarts the recharge timer, and when
//! the timer runs out all charges are restored at once.

use serde::{Deserialize, Serialize};

/// Runtime charge bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChargeState {
    pub charges: u32,
    pub max_charges: u32,
    /// Ticks until the charges refill.
    pub recharge_timer: u32,
    /// Recharge time restarted by each shot.
    pub reload_time: u32,
    /// Forwarded to the charge-attack activity.
    pub initial_charge_delay: u32,
    /// Forwarded to the charge-attack activity.
    pub charge_delay: u32,
    pub charge_sound: Option<String>,
    /// Set while a charge-up sequence is running.
    pub charging: bool,
}

impl ChargeState {
    pub fn new(max_charges: u32, reload_time: u32) -> Self {
        Self {
            charges: max_charges,
            max_charges,
            recharge_timer: 0,
            reload_time,
            initial_charge_delay: 0,
            charge_delay: 0,
            charge_sound: None,
            charging: false,
        }
    }

    /// Advance the recharge timer.
    ///
    /// While drained, returns the minimum fire delay every armament of the
    /// actor must observe.
    pub fn tick(&mut self) -> Option<u32> {
        self.recharge_timer = self.recharge_timer.saturating_sub(1);
        if self.recharge_timer == 0 {
            self.charges = self.max_charges;
        }
        if self.charges == 0 {
            Some(self.recharge_timer)
        } else {
            None
        }
    }

    /// Spend a charge after a successful shot.
    pub fn on_attack(&mut self) {
        self.charges = self.charges.saturating_sub(1);
        self.recharge_timer = self.reload_time;
        if self.charges == 0 {
            self.charging = false;
        }
    }

    pub fn has_charge(&self) -> bool {
        self.charges > 0
    }
}
