//! Prize domain types and the upstream write payload.

use serde::{Deserialize, Serialize};

use crate::datetime;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The place number of the top prize. Exactly one prize per raffle holds it.
pub const TOP_PLACE: u32 = 1;

/// Fraction of the jackpot a 50/50 prize always pays out.
pub const FIFTY_FIFTY_FRACTION: f64 = 0.5;

/// Default label for an unlabeled top 50/50 prize.
pub const DEFAULT_FIFTY_FIFTY_DESCRIPTION: &str = "50% of Total Jackpot";

// ---------------------------------------------------------------------------
// Prize type
// ---------------------------------------------------------------------------

/// Prize type, with the backend's integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeType {
    /// Cash prize paying a fixed fraction of the jackpot. Top prize only.
    FiftyFifty,
    /// Fixed-value prize, valid at any place.
    PrizeRaffle,
    /// Fixed-value prize drawn before the main draw. Never the top prize.
    EarlyBird,
}

impl PrizeType {
    /// Backend integer code (`Int_Prize_Type`).
    pub fn code(self) -> i32 {
        match self {
            PrizeType::FiftyFifty => 1,
            PrizeType::PrizeRaffle => 2,
            PrizeType::EarlyBird => 3,
        }
    }

    /// Decode a backend integer code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(PrizeType::FiftyFifty),
            2 => Some(PrizeType::PrizeRaffle),
            3 => Some(PrizeType::EarlyBird),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Input, persisted, and normalized shapes
// ---------------------------------------------------------------------------

/// Raw prize fields as posted by the admin UI, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeDraft {
    /// Place number; `0` means "unassigned, append to the list".
    #[serde(default)]
    pub place: u32,
    pub prize_type: PrizeType,
    /// Callers may omit this; the rule engine derives it from the type.
    #[serde(default)]
    pub is_percentage: Option<bool>,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    /// Draw date as entered: backend or UI format, possibly unset.
    #[serde(default)]
    pub draw_date: String,
    #[serde(default)]
    pub automated_draw: bool,
}

/// A prize as it exists upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prize {
    pub id: DbId,
    pub place: u32,
    pub prize_type: PrizeType,
    pub is_percentage: bool,
    pub amount: f64,
    pub description: String,
    /// `None` when the backend still holds the unset sentinel.
    pub draw_date: Option<Timestamp>,
    /// Set by the draw process after sales close; absent at creation.
    #[serde(default)]
    pub winning_ticket_id: Option<DbId>,
}

impl Prize {
    /// `true` iff this is the raffle's top prize.
    pub fn is_top(&self) -> bool {
        self.place == TOP_PLACE
    }
}

/// A validated prize with derived fields filled in, ready for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPrize {
    pub place: u32,
    pub prize_type: PrizeType,
    pub is_percentage: bool,
    pub amount: f64,
    pub description: String,
    pub draw_date: Timestamp,
    pub automated_draw: bool,
}

impl NormalizedPrize {
    /// Convert to the upstream write shape.
    pub fn to_write_payload(&self) -> PrizeWritePayload {
        PrizeWritePayload {
            place: self.place,
            prize_type: self.prize_type.code(),
            automated_draw: self.automated_draw as i32,
            description: self.description.clone(),
            value_percent: self.is_percentage as i32,
            value: self.amount,
            draw: datetime::to_backend_string(self.draw_date),
        }
    }

    /// View this normalized prize as a `Prize` with the given id, for
    /// whole-set re-validation of the resulting prize list.
    pub fn as_prize(&self, id: DbId) -> Prize {
        Prize {
            id,
            place: self.place,
            prize_type: self.prize_type,
            is_percentage: self.is_percentage,
            amount: self.amount,
            description: self.description.clone(),
            draw_date: Some(self.draw_date),
            winning_ticket_id: None,
        }
    }
}

impl From<&NormalizedPrize> for PrizeDraft {
    fn from(p: &NormalizedPrize) -> Self {
        PrizeDraft {
            place: p.place,
            prize_type: p.prize_type,
            is_percentage: Some(p.is_percentage),
            amount: p.amount,
            description: p.description.clone(),
            draw_date: datetime::to_backend_string(p.draw_date),
            automated_draw: p.automated_draw,
        }
    }
}

// ---------------------------------------------------------------------------
// Upstream wire shape
// ---------------------------------------------------------------------------

/// Prize create/update payload in the backend's column naming.
///
/// The percentage flag travels as an integer (`0`/`1`) because that is what
/// the backend's `Int_PrizeValuePercent` column expects; everywhere else in
/// this crate it is a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeWritePayload {
    #[serde(rename = "Int_Place")]
    pub place: u32,
    #[serde(rename = "Int_Prize_Type")]
    pub prize_type: i32,
    #[serde(rename = "Int_AutomatedDraw")]
    pub automated_draw: i32,
    #[serde(rename = "VC_Description")]
    pub description: String,
    #[serde(rename = "Int_PrizeValuePercent")]
    pub value_percent: i32,
    #[serde(rename = "Dec_Value")]
    pub value: f64,
    #[serde(rename = "Dt_Draw")]
    pub draw: String,
}
