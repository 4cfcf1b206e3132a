// Lineup optimization under salary and positional constraints.
//
// Exhaustive combinatorial search over the player pool: every C(n, slots)
// combination is enumerated via recursive choice-with-skip over strictly
// increasing pool indices, pruning partial combinations that already bust
// the budget or overfill a positional slot. This is exponential in pool
// size, which is acceptable because pools are tens of players; callers must
// cap pool size as a hard precondition rather than rely on any internal
// bound.

use crate::analytics::round_to;
use crate::data::{Player, Position};
use std::collections::HashSet;

/// Default lineup size.
pub const DEFAULT_SLOTS: usize = 5;

/// Weight of the defensive-impact term in the adjusted score.
const DEFENSE_WEIGHT: f64 = 0.8;

// ---------------------------------------------------------------------------
// Scoring formulas
// ---------------------------------------------------------------------------

/// Fantasy projection for one player:
/// `points + 1.2*rebounds + 1.5*assists + 3*steals + 3*blocks - turnovers`.
pub fn fantasy_projection(p: &Player) -> f64 {
    p.points + 1.2 * p.rebounds + 1.5 * p.assists + 3.0 * p.steals + 3.0 * p.blocks - p.turnovers
}

/// Defensive impact for one player:
/// `1.7*steals + 1.9*blocks + 0.4*rebounds`.
pub fn defense_impact(p: &Player) -> f64 {
    1.7 * p.steals + 1.9 * p.blocks + 0.4 * p.rebounds
}

// ---------------------------------------------------------------------------
// Constraint and result types
// ---------------------------------------------------------------------------

/// Positional and eligibility requirements for the constrained search.
///
/// The guard/forward/center counts must sum to the slot count. A constraint
/// set the filtered pool cannot satisfy yields an infeasible result, not an
/// error.
#[derive(Debug, Clone)]
pub struct LineupConstraints {
    pub guards: usize,
    pub forwards: usize,
    pub centers: usize,
    /// Players below this minutes threshold are ineligible.
    pub min_minutes: f64,
    /// Explicitly excluded player ids (injuries, rest days).
    pub excluded_ids: HashSet<u32>,
}

impl LineupConstraints {
    fn required(&self, position: Position) -> usize {
        match position {
            Position::Guard => self.guards,
            Position::Forward => self.forwards,
            Position::Center => self.centers,
        }
    }

    fn slot_count(&self) -> usize {
        self.guards + self.forwards + self.centers
    }

    fn eligible(&self, p: &Player) -> bool {
        p.minutes >= self.min_minutes && !self.excluded_ids.contains(&p.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    Optimal,
    Infeasible,
}

/// The best feasible lineup found, or an infeasible marker with zeroed
/// totals. Produced once per optimizer invocation; immutable thereafter.
#[derive(Debug, Clone)]
pub struct LineupResult {
    /// Chosen players in pool-enumeration order; duplicates are impossible.
    pub lineup: Vec<Player>,
    pub total_salary: u32,
    pub projected_fantasy: f64,
    pub projected_defense: f64,
    pub feasibility: Feasibility,
}

impl LineupResult {
    fn infeasible() -> Self {
        LineupResult {
            lineup: Vec::new(),
            total_salary: 0,
            projected_fantasy: 0.0,
            projected_defense: 0.0,
            feasibility: Feasibility::Infeasible,
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

struct Search<'a> {
    pool: &'a [&'a Player],
    budget: u32,
    slots: usize,
    constraints: Option<&'a LineupConstraints>,
    chosen: Vec<usize>,
    position_counts: [usize; 3],
    running_salary: u32,
    best_indices: Vec<usize>,
    best_score: Option<f64>,
}

fn position_slot(position: Position) -> usize {
    match position {
        Position::Guard => 0,
        Position::Forward => 1,
        Position::Center => 2,
    }
}

impl<'a> Search<'a> {
    fn run(&mut self, start: usize) {
        if self.chosen.len() == self.slots {
            self.consider_complete();
            return;
        }
        for i in start..self.pool.len() {
            let candidate = self.pool[i];

            // Prune on budget before descending.
            let salary = self.running_salary + candidate.salary;
            if salary > self.budget {
                continue;
            }
            // Prune as soon as a positional count would exceed its quota.
            let slot = position_slot(candidate.position);
            if let Some(constraints) = self.constraints {
                if self.position_counts[slot] + 1 > constraints.required(candidate.position) {
                    continue;
                }
            }

            self.chosen.push(i);
            self.position_counts[slot] += 1;
            self.running_salary = salary;

            self.run(i + 1);

            self.chosen.pop();
            self.position_counts[slot] -= 1;
            self.running_salary -= candidate.salary;
        }
    }

    fn consider_complete(&mut self) {
        let score: f64 = self
            .chosen
            .iter()
            .map(|&i| {
                let p = self.pool[i];
                fantasy_projection(p) + DEFENSE_WEIGHT * defense_impact(p)
            })
            .sum();
        // Strict improvement only: the first-found combination wins ties,
        // making the tie-break policy "first feasible maximum in
        // enumeration order".
        if self.best_score.map_or(true, |best| score > best) {
            self.best_score = Some(score);
            self.best_indices = self.chosen.clone();
        }
    }
}

/// Find the feasible lineup of exactly `slots` distinct players maximizing
/// `sum(fantasy_projection) + 0.8 * sum(defense_impact)` subject to the
/// salary budget and, when supplied, positional counts and eligibility.
///
/// Tie-break: strict score improvement only, so the first combination found
/// at the maximum (in strictly-increasing-index enumeration order) is kept.
pub fn optimize_lineup(
    pool: &[Player],
    budget: u32,
    constraints: Option<&LineupConstraints>,
    slots: usize,
) -> LineupResult {
    // A constraint set whose quotas cannot fill the slot count is
    // unsatisfiable by definition.
    if let Some(c) = constraints {
        if c.slot_count() != slots {
            return LineupResult::infeasible();
        }
    }

    let filtered: Vec<&Player> = match constraints {
        Some(c) => pool.iter().filter(|p| c.eligible(p)).collect(),
        None => pool.iter().collect(),
    };
    if filtered.len() < slots || slots == 0 {
        return LineupResult::infeasible();
    }

    let mut search = Search {
        pool: &filtered,
        budget,
        slots,
        constraints,
        chosen: Vec::with_capacity(slots),
        position_counts: [0; 3],
        running_salary: 0,
        best_indices: Vec::new(),
        best_score: None,
    };
    search.run(0);

    if search.best_score.is_none() {
        return LineupResult::infeasible();
    }

    let lineup: Vec<Player> = search
        .best_indices
        .iter()
        .map(|&i| filtered[i].clone())
        .collect();
    let total_salary: u32 = lineup.iter().map(|p| p.salary).sum();
    let projected_fantasy = round_to(lineup.iter().map(fantasy_projection).sum(), 1);
    let projected_defense = round_to(lineup.iter().map(defense_impact).sum(), 1);

    LineupResult {
        lineup,
        total_salary,
        projected_fantasy,
        projected_defense,
        feasibility: Feasibility::Optimal,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn make_player(id: u32, name: &str, position: Position, salary: u32, points: f64) -> Player {
        Player {
            id,
            name: name.into(),
            position,
            salary,
            minutes: 30.0,
            points,
            assists: 4.0,
            rebounds: 5.0,
            steals: 1.0,
            blocks: 0.5,
            turnovers: 2.0,
            fg_pct: 0.46,
            three_pct: 0.35,
            usage_pct: 22.0,
        }
    }

    /// A ten-player pool with two of each archetype at varied salaries.
    fn ten_player_pool() -> Vec<Player> {
        vec![
            make_player(1, "G1", Position::Guard, 100, 25.0),
            make_player(2, "G2", Position::Guard, 90, 22.0),
            make_player(3, "G3", Position::Guard, 60, 15.0),
            make_player(4, "F1", Position::Forward, 110, 26.0),
            make_player(5, "F2", Position::Forward, 85, 20.0),
            make_player(6, "F3", Position::Forward, 55, 13.0),
            make_player(7, "C1", Position::Center, 105, 21.0),
            make_player(8, "C2", Position::Center, 70, 16.0),
            make_player(9, "G4", Position::Guard, 40, 9.0),
            make_player(10, "F4", Position::Forward, 45, 10.0),
        ]
    }

    fn standard_constraints() -> LineupConstraints {
        LineupConstraints {
            guards: 2,
            forwards: 2,
            centers: 1,
            min_minutes: 10.0,
            excluded_ids: HashSet::new(),
        }
    }

    fn adjusted_score(result: &LineupResult) -> f64 {
        result
            .lineup
            .iter()
            .map(|p| fantasy_projection(p) + 0.8 * defense_impact(p))
            .sum()
    }

    #[test]
    fn fantasy_projection_formula() {
        let p = make_player(1, "P", Position::Guard, 100, 20.0);
        // 20 + 1.2*5 + 1.5*4 + 3*1 + 3*0.5 - 2 = 34.5
        assert!(approx_eq(fantasy_projection(&p), 34.5, 1e-10));
    }

    #[test]
    fn defense_impact_formula() {
        let p = make_player(1, "P", Position::Guard, 100, 20.0);
        // 1.7*1 + 1.9*0.5 + 0.4*5 = 4.65
        assert!(approx_eq(defense_impact(&p), 4.65, 1e-10));
    }

    #[test]
    fn unconstrained_search_respects_budget_and_size() {
        let pool = ten_player_pool();
        let result = optimize_lineup(&pool, 400, None, DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Optimal);
        assert_eq!(result.lineup.len(), 5);
        assert!(result.total_salary <= 400);
    }

    #[test]
    fn unconstrained_search_picks_best_affordable() {
        // Big budget: should simply take the five highest-scoring players.
        let pool = ten_player_pool();
        let result = optimize_lineup(&pool, 10_000, None, DEFAULT_SLOTS);
        let names: Vec<&str> = result.lineup.iter().map(|p| p.name.as_str()).collect();
        // Scores track points here (other stats identical), so the top five
        // by points are F1, G1, G2, C1, F2.
        assert!(names.contains(&"F1"));
        assert!(names.contains(&"G1"));
        assert!(names.contains(&"G2"));
        assert!(names.contains(&"C1"));
        assert!(names.contains(&"F2"));
    }

    #[test]
    fn constrained_search_matches_positional_counts() {
        let pool = ten_player_pool();
        let result = optimize_lineup(&pool, 450, Some(&standard_constraints()), DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Optimal);
        let guards = result
            .lineup
            .iter()
            .filter(|p| p.position == Position::Guard)
            .count();
        let forwards = result
            .lineup
            .iter()
            .filter(|p| p.position == Position::Forward)
            .count();
        let centers = result
            .lineup
            .iter()
            .filter(|p| p.position == Position::Center)
            .count();
        assert_eq!((guards, forwards, centers), (2, 2, 1));
        assert!(result.total_salary <= 450);
    }

    #[test]
    fn excluded_players_never_appear() {
        let pool = ten_player_pool();
        let mut constraints = standard_constraints();
        constraints.excluded_ids.insert(1); // G1 out
        let result = optimize_lineup(&pool, 10_000, Some(&constraints), DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Optimal);
        assert!(result.lineup.iter().all(|p| p.id != 1));
    }

    #[test]
    fn exclusion_never_increases_best_score() {
        let pool = ten_player_pool();
        let baseline = optimize_lineup(&pool, 450, Some(&standard_constraints()), DEFAULT_SLOTS);
        let mut constraints = standard_constraints();
        constraints.excluded_ids.insert(4); // exclude the top forward
        let reduced = optimize_lineup(&pool, 450, Some(&constraints), DEFAULT_SLOTS);
        assert!(adjusted_score(&reduced) <= adjusted_score(&baseline) + 1e-9);
    }

    #[test]
    fn budget_increase_never_decreases_score() {
        let pool = ten_player_pool();
        let mut previous = f64::NEG_INFINITY;
        for budget in [250, 300, 350, 400, 500, 1000] {
            let result = optimize_lineup(&pool, budget, None, DEFAULT_SLOTS);
            if result.feasibility == Feasibility::Infeasible {
                continue;
            }
            let score = adjusted_score(&result);
            assert!(
                score >= previous - 1e-9,
                "budget {} decreased score: {} < {}",
                budget,
                score,
                previous
            );
            previous = score;
        }
    }

    #[test]
    fn minutes_threshold_filters_pool() {
        let mut pool = ten_player_pool();
        // Make the best forward a low-minutes player.
        pool[3].minutes = 5.0;
        let result = optimize_lineup(&pool, 10_000, Some(&standard_constraints()), DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Optimal);
        assert!(result.lineup.iter().all(|p| p.id != 4));
    }

    #[test]
    fn tight_budget_is_infeasible() {
        let pool = ten_player_pool();
        // Five cheapest players cost 40+45+55+60+70 = 270.
        let result = optimize_lineup(&pool, 260, None, DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Infeasible);
        assert!(result.lineup.is_empty());
        assert_eq!(result.total_salary, 0);
        assert_eq!(result.projected_fantasy, 0.0);
        assert_eq!(result.projected_defense, 0.0);
    }

    #[test]
    fn unmeetable_positional_quota_is_infeasible() {
        let pool = ten_player_pool();
        let constraints = LineupConstraints {
            guards: 0,
            forwards: 0,
            centers: 5, // only two centers in the pool
            min_minutes: 0.0,
            excluded_ids: HashSet::new(),
        };
        let result = optimize_lineup(&pool, 10_000, Some(&constraints), DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Infeasible);
    }

    #[test]
    fn quota_sum_mismatch_is_infeasible() {
        let pool = ten_player_pool();
        let constraints = LineupConstraints {
            guards: 2,
            forwards: 2,
            centers: 2, // sums to 6, not 5
            min_minutes: 0.0,
            excluded_ids: HashSet::new(),
        };
        let result = optimize_lineup(&pool, 10_000, Some(&constraints), DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Infeasible);
    }

    #[test]
    fn pool_smaller_than_slots_is_infeasible() {
        let pool = ten_player_pool();
        let result = optimize_lineup(&pool[..3], 10_000, None, DEFAULT_SLOTS);
        assert_eq!(result.feasibility, Feasibility::Infeasible);
    }

    #[test]
    fn tie_break_keeps_first_found_combination() {
        // Two identical pairs of players: combinations tie exactly, and the
        // earlier-enumerated pair (lower pool indices) must win.
        let mut pool = vec![
            make_player(1, "A", Position::Guard, 100, 20.0),
            make_player(2, "B", Position::Guard, 100, 20.0),
        ];
        pool.push(make_player(3, "C", Position::Guard, 100, 20.0));
        let result = optimize_lineup(&pool, 1_000, None, 2);
        assert_eq!(result.feasibility, Feasibility::Optimal);
        let ids: Vec<u32> = result.lineup.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn totals_are_rounded_to_one_decimal() {
        let pool = ten_player_pool();
        let result = optimize_lineup(&pool, 10_000, None, DEFAULT_SLOTS);
        let rescaled_f = result.projected_fantasy * 10.0;
        let rescaled_d = result.projected_defense * 10.0;
        assert!(approx_eq(rescaled_f, rescaled_f.round(), 1e-9));
        assert!(approx_eq(rescaled_d, rescaled_d.round(), 1e-9));
    }
}
