//! Prize rule engine.
//!
//! Enforces the structural invariants over a raffle's prize list: exactly
//! one top prize (place 1), type-dependent percentage/amount constraints,
//! and draw-date ordering relative to the sale window and the top draw.
//!
//! Every entry point that touches prizes (creation wizard, inline edit,
//! bulk replace) calls through here; the rules are never re-derived at a
//! call site. All functions are pure and collect *all* violated rules
//! rather than stopping at the first, so a form can show every problem at
//! once.

use serde::Serialize;

use crate::datetime;
use crate::prize::{
    NormalizedPrize, Prize, PrizeDraft, PrizeType, DEFAULT_FIFTY_FIFTY_DESCRIPTION,
    FIFTY_FIFTY_FRACTION, TOP_PLACE,
};
use crate::raffle::SaleWindow;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// A single violated prize rule.
///
/// All variants are user-correctable input problems, never system
/// failures. Messages are rendered verbatim in the admin UI.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[serde(tag = "code")]
pub enum PrizeRuleViolation {
    #[error("A raffle must have exactly one top prize (place 1); found {count}")]
    NotExactlyOneTopPrize { count: usize },

    #[error("The top prize must be a 50/50 or Prize Raffle prize")]
    InvalidTopPrizeType,

    #[error("The top prize must be drawn after ticket sales close")]
    TopDrawNotAfterSalesClose,

    #[error("A 50/50 top prize always pays 50% of the jackpot")]
    InvalidFiftyFiftyTerms,

    #[error("A Prize Raffle top prize needs a fixed value greater than zero")]
    InvalidTopRaffleAmount,

    #[error("Prize {place} must be a Prize Raffle or Early Bird prize")]
    InvalidNonTopType { place: u32 },

    #[error("Prize {place} needs a fixed value greater than zero")]
    InvalidNonTopAmount { place: u32 },

    #[error("Prize {place} must be drawn between sale open and the top prize draw")]
    DrawDateOutOfRange { place: u32 },

    #[error("Add the top prize before adding other prizes")]
    MissingTopPrize,

    #[error("Prize {place} is missing its draw date")]
    MissingRequiredDate { place: u32 },

    #[error("The top prize cannot be deleted")]
    CannotDeleteTopPrize,
}

/// Result alias for rule evaluation: success or every violated rule.
pub type RuleResult<T> = Result<T, Vec<PrizeRuleViolation>>;

// ---------------------------------------------------------------------------
// Single-prize create/edit
// ---------------------------------------------------------------------------

/// Validate one prize being created or edited against its raffle and
/// siblings, normalizing derived fields on success.
///
/// `existing` is the raffle's current prize list; `target` identifies the
/// prize being edited so it is excluded from its own sibling set (pass
/// `None` for a create).
///
/// Top-prize branch: a 50/50 prize has `is_percentage` and `amount` forced
/// to `true`/`0.5` regardless of input and a blank description defaulted;
/// a Prize Raffle prize needs a positive fixed amount; Early Bird is never
/// a valid top type; the draw must land strictly after sales close.
///
/// Non-top branch: `is_percentage` is forced to `false`, the amount must
/// be positive, the type must be Prize Raffle or Early Bird, and the draw
/// must land in `[sale_open, top_draw)`. If no top prize exists yet the
/// draft is rejected with `MissingTopPrize`.
pub fn normalize_and_validate_prize_update(
    draft: &PrizeDraft,
    window: &SaleWindow,
    existing: &[Prize],
    target: Option<DbId>,
) -> RuleResult<NormalizedPrize> {
    let siblings: Vec<&Prize> = existing.iter().filter(|p| target != Some(p.id)).collect();
    let mut violations = Vec::new();

    // A draw date we cannot parse is as unusable as no date at all.
    let draw_date = datetime::parse_optional(&draft.draw_date)
        .unwrap_or_default();
    if draw_date.is_none() {
        violations.push(PrizeRuleViolation::MissingRequiredDate { place: draft.place });
    }

    let mut is_percentage = false;
    let mut amount = draft.amount;
    let mut description = draft.description.trim().to_string();

    if draft.place == TOP_PLACE {
        let top_count = 1 + siblings.iter().filter(|p| p.is_top()).count();
        if top_count > 1 {
            violations.push(PrizeRuleViolation::NotExactlyOneTopPrize { count: top_count });
        }

        match draft.prize_type {
            PrizeType::FiftyFifty => {
                is_percentage = true;
                amount = FIFTY_FIFTY_FRACTION;
                if description.is_empty() {
                    description = DEFAULT_FIFTY_FIFTY_DESCRIPTION.to_string();
                }
            }
            PrizeType::PrizeRaffle => {
                if draft.amount <= 0.0 {
                    violations.push(PrizeRuleViolation::InvalidTopRaffleAmount);
                }
            }
            PrizeType::EarlyBird => {
                violations.push(PrizeRuleViolation::InvalidTopPrizeType);
            }
        }

        if let Some(draw) = draw_date {
            if draw <= window.sale_close {
                violations.push(PrizeRuleViolation::TopDrawNotAfterSalesClose);
            }
        }
    } else {
        if draft.prize_type == PrizeType::FiftyFifty {
            violations.push(PrizeRuleViolation::InvalidNonTopType { place: draft.place });
        }
        if draft.amount <= 0.0 {
            violations.push(PrizeRuleViolation::InvalidNonTopAmount { place: draft.place });
        }

        match siblings.iter().find(|p| p.is_top()) {
            None => violations.push(PrizeRuleViolation::MissingTopPrize),
            Some(top) => match top.draw_date {
                None => violations.push(PrizeRuleViolation::MissingRequiredDate {
                    place: TOP_PLACE,
                }),
                Some(top_draw) => {
                    if let Some(draw) = draw_date {
                        if draw < window.sale_open || draw >= top_draw {
                            violations.push(PrizeRuleViolation::DrawDateOutOfRange {
                                place: draft.place,
                            });
                        }
                    }
                }
            },
        }
    }

    match (violations.is_empty(), draw_date) {
        (true, Some(draw_date)) => Ok(NormalizedPrize {
            place: draft.place,
            prize_type: draft.prize_type,
            is_percentage,
            amount,
            description,
            draw_date,
            automated_draw: draft.automated_draw,
        }),
        _ => Err(violations),
    }
}

// ---------------------------------------------------------------------------
// Whole-set validation
// ---------------------------------------------------------------------------

/// Validate a complete prize set, as persisted or about to be persisted.
///
/// Checks every invariant over the full list and collects all violations:
/// exactly one top prize, top type/terms/draw rules, and per-prize
/// type/amount/date-range rules for the rest. The date-range checks are
/// skipped when there is no single top prize to anchor them.
pub fn validate_all_prizes(prizes: &[Prize], window: &SaleWindow) -> RuleResult<()> {
    let mut violations = Vec::new();

    let tops: Vec<&Prize> = prizes.iter().filter(|p| p.is_top()).collect();
    if tops.len() != 1 {
        violations.push(PrizeRuleViolation::NotExactlyOneTopPrize { count: tops.len() });
    }
    let top = if tops.len() == 1 { Some(tops[0]) } else { None };

    if let Some(top) = top {
        match top.prize_type {
            PrizeType::FiftyFifty => {
                if !top.is_percentage
                    || (top.amount - FIFTY_FIFTY_FRACTION).abs() > f64::EPSILON
                {
                    violations.push(PrizeRuleViolation::InvalidFiftyFiftyTerms);
                }
            }
            PrizeType::PrizeRaffle => {
                if top.is_percentage || top.amount <= 0.0 {
                    violations.push(PrizeRuleViolation::InvalidTopRaffleAmount);
                }
            }
            PrizeType::EarlyBird => {
                violations.push(PrizeRuleViolation::InvalidTopPrizeType);
            }
        }

        match top.draw_date {
            None => violations.push(PrizeRuleViolation::MissingRequiredDate {
                place: TOP_PLACE,
            }),
            Some(draw) if draw <= window.sale_close => {
                violations.push(PrizeRuleViolation::TopDrawNotAfterSalesClose);
            }
            Some(_) => {}
        }
    }

    let top_draw = top.and_then(|t| t.draw_date);

    for prize in prizes.iter().filter(|p| !p.is_top()) {
        if prize.prize_type == PrizeType::FiftyFifty {
            violations.push(PrizeRuleViolation::InvalidNonTopType { place: prize.place });
        }
        if prize.is_percentage || prize.amount <= 0.0 {
            violations.push(PrizeRuleViolation::InvalidNonTopAmount { place: prize.place });
        }
        match prize.draw_date {
            None => violations.push(PrizeRuleViolation::MissingRequiredDate {
                place: prize.place,
            }),
            Some(draw) => {
                if let Some(top_draw) = top_draw {
                    if draw < window.sale_open || draw >= top_draw {
                        violations.push(PrizeRuleViolation::DrawDateOutOfRange {
                            place: prize.place,
                        });
                    }
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Normalize and validate a full replacement prize list (wizard submit).
///
/// Each draft is validated against the proposed list exactly as a
/// single-prize edit would be, so the forcing/defaulting behavior matches
/// the inline-edit path. Violations from all drafts are collected together,
/// with duplicates reported once.
pub fn normalize_and_validate_prize_list(
    drafts: &[PrizeDraft],
    window: &SaleWindow,
) -> RuleResult<Vec<NormalizedPrize>> {
    // Candidate view of the proposed list so each draft sees its siblings.
    // Synthetic ids are list indices; they never leave this function.
    let candidates: Vec<Prize> = drafts
        .iter()
        .enumerate()
        .map(|(i, d)| Prize {
            id: i as DbId,
            place: d.place,
            prize_type: d.prize_type,
            is_percentage: d
                .is_percentage
                .unwrap_or(d.prize_type == PrizeType::FiftyFifty),
            amount: d.amount,
            description: d.description.clone(),
            draw_date: datetime::parse_optional(&d.draw_date).ok().flatten(),
            winning_ticket_id: None,
        })
        .collect();

    let mut violations = Vec::new();

    let top_count = drafts.iter().filter(|d| d.place == TOP_PLACE).count();
    if top_count != 1 {
        violations.push(PrizeRuleViolation::NotExactlyOneTopPrize { count: top_count });
    }

    let mut normalized = Vec::with_capacity(drafts.len());
    for (i, draft) in drafts.iter().enumerate() {
        match normalize_and_validate_prize_update(draft, window, &candidates, Some(i as DbId)) {
            Ok(prize) => normalized.push(prize),
            Err(mut prize_violations) => {
                // Exactly-one-top is a list-level rule, reported once above.
                prize_violations
                    .retain(|v| !matches!(v, PrizeRuleViolation::NotExactlyOneTopPrize { .. }));
                violations.extend(prize_violations);
            }
        }
    }

    let mut unique = Vec::with_capacity(violations.len());
    for violation in violations {
        if !unique.contains(&violation) {
            unique.push(violation);
        }
    }

    if unique.is_empty() {
        Ok(normalized)
    } else {
        Err(unique)
    }
}

// ---------------------------------------------------------------------------
// Delete guard and place assignment
// ---------------------------------------------------------------------------

/// `false` iff the prize is the top prize, which anchors every other
/// prize's draw ordering and can never be deleted.
pub fn can_delete_prize(prize: &Prize) -> bool {
    !prize.is_top()
}

/// Next free place number when appending a prize: `max(place) + 1`, or `1`
/// for an empty list. Never renumbers or fills gaps left by deletes;
/// `place` is an ordering key, not a dense index.
pub fn compute_next_place(prizes: &[Prize]) -> u32 {
    prizes.iter().map(|p| p.place).max().map_or(1, |max| max + 1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
