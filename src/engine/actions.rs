//! Action validation and resolution
//!
//! Each handler either applies its action completely (returning the events
//! it produced) or rejects it with a reason and leaves every piece of
//! match state untouched.

use crate::arena::{BonusKind, Position};
use crate::catalog::HeroClass;
use crate::combat::constants::{
    DAMAGE_BONUS_AMOUNT, DIE_SIDES, DODGE_SUCCESS_THRESHOLD, HEALTH_BONUS_AMOUNT,
    KNIGHT_SPECIAL_DAMAGE_FACTOR, KNIGHT_SPECIAL_HEAL, NINJA_SPECIAL_DAMAGE_FACTOR,
    RANGE_BONUS_AMOUNT, WIZARD_SPECIAL_DAMAGE_FACTOR,
};
use crate::combat::events::CombatEvent;
use crate::combat::rules::{self, AttackKind};

use super::combatant::PlayerSlot;
use super::error::RulesError;
use super::{Applied, EventBuf, MatchState, PendingAction, TurnPhase};

impl MatchState {
    // ------------------------------------------------------------------
    // Rule queries
    // ------------------------------------------------------------------

    /// Whether `slot`'s combatant may move to `pos`: in bounds, not an
    /// obstacle, not another combatant's cell, and within move range.
    /// Bonuses never block movement.
    pub fn is_valid_move(&self, pos: Position, slot: PlayerSlot) -> bool {
        let mover = &self.combatants[slot.index()];
        self.board.in_bounds(pos)
            && !self.board.obstacle_at(pos)
            && !self.combatants.iter().any(|c| c.slot != slot && c.pos == pos)
            && mover.pos.manhattan(pos) <= mover.move_range
    }

    /// Whether the enemy sits within `slot`'s attack range (Manhattan).
    /// Obstacles do not block attacks.
    pub fn is_enemy_in_range(&self, slot: PlayerSlot) -> bool {
        let attacker = &self.combatants[slot.index()];
        let enemy = &self.combatants[slot.other().index()];
        attacker.pos.manhattan(enemy.pos) <= attacker.attack_range
    }

    // ------------------------------------------------------------------
    // Intent handlers (acting player == self.turn.current)
    // ------------------------------------------------------------------

    pub(super) fn handle_move(&mut self, pos: Position) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        if !self.is_valid_move(pos, slot) {
            return Err(RulesError::IllegalAction(format!("cannot move to {}", pos)));
        }

        let mut events = EventBuf::new();
        if let Some(kind) = self.board.take_bonus(pos) {
            self.apply_bonus(slot, kind, pos, &mut events);
        }
        let from = self.combatants[slot.index()].pos;
        self.combatants[slot.index()].pos = pos;
        events.push(CombatEvent::Moved { slot, from, to: pos });

        self.end_turn();
        Ok(Applied::with(events))
    }

    pub(super) fn handle_attack(&mut self, kind: AttackKind) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        let Some(die) = self.turn.die else {
            return Err(RulesError::IllegalAction(
                "the action die has not been rolled yet".to_string(),
            ));
        };
        if rules::offerable_attack(die) != Some(kind) {
            return Err(RulesError::IllegalAction(format!(
                "the action die ({}) does not allow a {}",
                die,
                kind.name()
            )));
        }
        if !self.is_enemy_in_range(slot) {
            return Err(RulesError::IllegalAction(
                "the enemy is not within attack range".to_string(),
            ));
        }

        self.pending = Some(PendingAction::Attack(kind));
        let mut events = EventBuf::new();
        events.push(CombatEvent::AttackCommitted { slot, kind });
        Ok(Applied::with(events))
    }

    pub(super) fn handle_special(&mut self) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        let combatant = &self.combatants[slot.index()];
        if combatant.special_cooldown > 0 {
            return Err(RulesError::IllegalAction(format!(
                "{} is on cooldown ({} turns remaining)",
                combatant.class.special_name(),
                combatant.special_cooldown
            )));
        }

        self.pending = Some(PendingAction::Special);
        let mut events = EventBuf::new();
        events.push(CombatEvent::SpecialCommitted { slot });
        Ok(Applied::with(events))
    }

    /// A cell click. Resolves the pending attack/special when the click
    /// names the enemy's current cell; any other click falls through to a
    /// default movement attempt with the pending action left standing.
    pub(super) fn handle_confirm(&mut self, pos: Position) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        let enemy_pos = self.combatants[slot.other().index()].pos;

        match self.pending {
            Some(pending) if pos == enemy_pos => match pending {
                PendingAction::Attack(kind) => self.resolve_attack(kind),
                PendingAction::Special => self.resolve_special(),
            },
            _ => self.handle_move(pos),
        }
    }

    pub(super) fn handle_defend(&mut self) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        self.combatants[slot.index()].is_defending = true;

        let mut events = EventBuf::new();
        events.push(CombatEvent::DefendRaised { slot });
        self.end_turn();
        Ok(Applied::with(events))
    }

    pub(super) fn handle_dodge(&mut self) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        let combatant = &self.combatants[slot.index()];
        if !combatant.can_dodge() {
            return Err(RulesError::IllegalAction(format!(
                "the {} cannot dodge attacks",
                combatant.class.name()
            )));
        }

        self.combatants[slot.index()].is_dodging = true;
        let mut events = EventBuf::new();
        events.push(CombatEvent::DodgeRaised { slot });
        self.end_turn();
        Ok(Applied::with(events))
    }

    // ------------------------------------------------------------------
    // Resolutions
    // ------------------------------------------------------------------

    /// Resolve a confirmed attack. Mitigation order follows the rules:
    /// critical doubling, then the defense halving, then the evasion roll
    /// (which negates outright on success). The attacker's turn ends
    /// whether or not the attack lands.
    fn resolve_attack(&mut self, kind: AttackKind) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        let target = slot.other();
        let critical = self.turn.die == Some(DIE_SIDES);
        let mut events = EventBuf::new();

        let attack = self.combatants[slot.index()].attack_damage;
        let mut damage = rules::attack_damage(attack, kind, critical);

        // Defense is single-use: halve and clear
        {
            let defender = &mut self.combatants[target.index()];
            if defender.is_defending {
                damage = rules::mitigate_defense(damage);
                defender.is_defending = false;
            }
        }

        // Evasion: a fresh d6, cleared whether or not it succeeds
        let dodging = {
            let defender = &self.combatants[target.index()];
            defender.can_dodge() && defender.is_dodging
        };
        if dodging {
            let roll = self.rng.roll_d6();
            self.combatants[target.index()].is_dodging = false;
            let success = roll >= DODGE_SUCCESS_THRESHOLD;
            events.push(CombatEvent::DodgeResolved {
                slot: target,
                roll,
                success,
            });
            if success {
                self.end_turn();
                return Ok(Applied::with(events));
            }
        }

        self.apply_damage(slot, target, kind.name(), damage, critical, &mut events);
        if !self.check_match_end(&mut events) {
            self.end_turn();
        }
        Ok(Applied::with(events))
    }

    /// Resolve a confirmed special ability. Range-gated archetypes fail
    /// recoverably when the enemy is out of reach: no cooldown is charged
    /// and the commitment stays standing for a retry.
    fn resolve_special(&mut self) -> Result<Applied, RulesError> {
        let slot = self.turn.current;
        let target = slot.other();
        let class = self.combatants[slot.index()].class;
        let special = class.special_name();
        let mut events = EventBuf::new();

        match class {
            HeroClass::Knight => {
                let combatant = &mut self.combatants[slot.index()];
                combatant.attack_damage =
                    rules::special_damage(combatant.base_damage, KNIGHT_SPECIAL_DAMAGE_FACTOR);
                events.push(CombatEvent::SpecialUsed {
                    slot,
                    name: special.to_string(),
                });
                self.apply_heal(slot, special, KNIGHT_SPECIAL_HEAL, &mut events);
            }
            HeroClass::Ninja => {
                if !self.is_enemy_in_range(slot) {
                    return Err(RulesError::IllegalAction(format!(
                        "the enemy is not in range for {}",
                        special
                    )));
                }
                events.push(CombatEvent::SpecialUsed {
                    slot,
                    name: special.to_string(),
                });
                // Two hits of the same computed value, applied sequentially
                let damage = rules::special_damage(
                    self.combatants[slot.index()].attack_damage,
                    NINJA_SPECIAL_DAMAGE_FACTOR,
                );
                self.apply_damage(slot, target, special, damage, false, &mut events);
                self.apply_damage(slot, target, special, damage, false, &mut events);
            }
            HeroClass::Wizard => {
                if !self.is_enemy_in_range(slot) {
                    return Err(RulesError::IllegalAction(format!(
                        "the enemy is not in range for {}",
                        special
                    )));
                }
                events.push(CombatEvent::SpecialUsed {
                    slot,
                    name: special.to_string(),
                });
                let damage = rules::special_damage(
                    self.combatants[slot.index()].attack_damage,
                    WIZARD_SPECIAL_DAMAGE_FACTOR,
                );
                self.apply_damage(slot, target, special, damage, false, &mut events);
            }
        }

        self.combatants[slot.index()].special_cooldown = self.catalog.stats(class).special_cooldown;

        if !self.check_match_end(&mut events) {
            self.end_turn();
        }
        Ok(Applied::with(events))
    }

    // ------------------------------------------------------------------
    // Shared effect application
    // ------------------------------------------------------------------

    fn apply_bonus(
        &mut self,
        slot: PlayerSlot,
        kind: BonusKind,
        pos: Position,
        events: &mut EventBuf,
    ) {
        events.push(CombatEvent::BonusPicked { slot, kind, pos });
        match kind {
            BonusKind::Health => {
                self.apply_heal(slot, "Health Bonus", HEALTH_BONUS_AMOUNT, events);
            }
            BonusKind::Damage => {
                let combatant = &mut self.combatants[slot.index()];
                combatant.base_damage += DAMAGE_BONUS_AMOUNT;
                combatant.attack_damage += DAMAGE_BONUS_AMOUNT;
            }
            BonusKind::Range => {
                // Archetype-gated: only the Wizard's reach grows, but the
                // pickup is consumed either way
                let combatant = &mut self.combatants[slot.index()];
                if combatant.class == HeroClass::Wizard {
                    combatant.attack_range += RANGE_BONUS_AMOUNT;
                }
            }
        }
    }

    fn apply_heal(&mut self, slot: PlayerSlot, ability: &str, amount: i32, events: &mut EventBuf) {
        let combatant = &mut self.combatants[slot.index()];
        let actual = (combatant.health + amount).min(combatant.max_health) - combatant.health;
        combatant.health += actual;
        combatant.healing_received += actual;
        events.push(CombatEvent::Healing {
            target: slot,
            ability: ability.to_string(),
            amount: actual,
        });
    }

    fn apply_damage(
        &mut self,
        source: PlayerSlot,
        target: PlayerSlot,
        ability: &str,
        amount: i32,
        critical: bool,
        events: &mut EventBuf,
    ) {
        debug_assert!(amount >= 0, "apply_damage: damage cannot be negative");

        let victim = &mut self.combatants[target.index()];
        let actual = amount.min(victim.health);
        victim.health -= actual;
        victim.damage_taken += actual;
        let died = actual > 0 && victim.health == 0;

        self.combatants[source.index()].damage_dealt += actual;

        events.push(CombatEvent::Damage {
            source,
            target,
            ability: ability.to_string(),
            amount,
            final_amount: actual,
            critical,
        });
        if died {
            events.push(CombatEvent::Death { slot: target });
        }
    }

    /// Declare the winner the instant exactly one combatant stands.
    /// Returns true when the match just ended.
    pub(super) fn check_match_end(&mut self, events: &mut EventBuf) -> bool {
        let mut alive = self.combatants.iter().filter(|c| c.is_alive());
        let (first, second) = (alive.next(), alive.next());

        match (first, second) {
            (Some(winner), None) => {
                let winner = winner.slot;
                self.winner = Some(winner);
                self.phase = TurnPhase::MatchOver;
                self.pending = None;
                events.push(CombatEvent::MatchEnded { winner });
                true
            }
            _ => false,
        }
    }
}
