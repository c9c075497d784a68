//! Post-split regrowth state machine.
//!
//! A freshly split slime relaxes toward its steady ring: progress accrues
//! at a fixed rate per tick, spring targets breathe with a small
//! sinusoidal pulse, and each split-born point tracks its own regrowth.
//! Settling is terminal; there is no transition back to healing.

use crate::simulation::params::Parameters;
use crate::simulation::states::{SimEvent, Slime};

/// One healing tick, invoked as the final sub-phase of a physics step.
pub fn update_healing(slime: &mut Slime, params: &Parameters, events: &mut Vec<SimEvent>) {
    if !slime.healing {
        return;
    }

    slime.healing_progress += params.healing_rate;
    slime.pulse_time += 0.05;

    if slime.healing_progress >= 1.0 {
        // Settled: clamp progress exactly, clear every healing flag,
        // and hand the completion to the cosmetic collaborators.
        slime.healing = false;
        slime.healing_progress = 1.0;
        for p in &mut slime.points {
            p.healing = false;
        }
        events.push(SimEvent::Healed {
            pos: slime.center(),
            color: slime.color,
        });
    } else {
        let n = slime.outer_count();
        for p in &mut slime.points[..n] {
            if p.healing {
                p.heal_progress = (p.heal_progress + params.healing_rate).min(1.0);
            }
        }

        // A subtle pulse on every spring target length. Structural
        // softening only, not a force.
        let pulse = slime.pulse_time.sin() * 0.03;
        for spring in &mut slime.springs {
            spring.length = spring.base_length * slime.scale * (1.0 + pulse);
        }
    }
}
