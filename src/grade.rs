//! Sufficiency grading: decides whether a transformed record set carries
//! enough signal for downstream scoring. Grading is a pure function of the
//! table plus an immutable signal policy; it never mutates the table.

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::normalize::is_missing_marker;

pub const COUNTRY_COLUMN: &str = "country";

/// A signal group column counts as present only when its missing fraction is
/// strictly below this cutoff.
pub const DEFAULT_MISSING_CUTOFF: f64 = 0.95;

pub const MIN_BASIC_SIGNALS: usize = 1;
pub const MIN_FINANCIAL_SIGNALS: usize = 1;
pub const MIN_ACCESS_SIGNALS: usize = 2;

/// Ordinal sufficiency grade. Ordering follows the levels: `Sufficient`
/// (level 1) sorts before `Partial` (2) before `Insufficient` (3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Sufficient,
    Partial,
    Insufficient,
}

impl Grade {
    pub fn level(self) -> u8 {
        match self {
            Grade::Sufficient => 1,
            Grade::Partial => 2,
            Grade::Insufficient => 3,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Grade::Sufficient => "Sufficient signals for reliable scoring.",
            Grade::Partial => "Partial signals; scoring allowed with warnings.",
            Grade::Insufficient => "Insufficient signals; cannot score reliably.",
        }
    }
}

/// The signal-group column names and the missing cutoff. Immutable policy
/// data handed to the grader so decision thresholds stay testable against
/// boundary values without touching control flow.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPolicy {
    pub basics: Vec<String>,
    pub financial_activity: Vec<String>,
    pub access_resilience: Vec<String>,
    pub missing_cutoff: f64,
}

impl Default for SignalPolicy {
    fn default() -> Self {
        Self {
            basics: to_strings(&["owner_age", "business_age_years", "business_age_months"]),
            financial_activity: to_strings(&[
                "business_turnover",
                "business_expenses",
                "personal_income",
            ]),
            access_resilience: to_strings(&[
                "has_mobile_money",
                "has_internet_banking",
                "has_debit_card",
                "has_credit_card",
                "has_loan_account",
                "funeral_insurance",
                "medical_insurance",
                "motor_vehicle_insurance",
                "uses_informal_lender",
                "uses_friends_family_savings",
                "current_problem_cash_flow",
                "problem_sourcing_money",
            ]),
            missing_cutoff: DEFAULT_MISSING_CUTOFF,
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Grades the table. A table without a country column short-circuits to
/// `Insufficient` with a single note; otherwise the three signal-group counts
/// feed a first-match decision table. The country note and the count summary
/// always precede the grade note.
pub fn grade_compatibility(frame: &Frame, policy: &SignalPolicy) -> (Grade, Vec<String>) {
    let mut notes = Vec::new();

    let Some(country) = resolve_country_column(frame) else {
        return (
            Grade::Insufficient,
            vec![format!(
                "Missing required column: {COUNTRY_COLUMN}. Cannot score."
            )],
        );
    };
    notes.push(format!("Detected country column: '{country}'"));

    let basics = count_present_signals(frame, &policy.basics, policy.missing_cutoff);
    let financial = count_present_signals(frame, &policy.financial_activity, policy.missing_cutoff);
    let access = count_present_signals(frame, &policy.access_resilience, policy.missing_cutoff);
    notes.push(format!(
        "Signal summary: basics={basics}, financial_activity={financial}, access_resilience={access}"
    ));

    let grade = if basics >= MIN_BASIC_SIGNALS
        && financial >= MIN_FINANCIAL_SIGNALS
        && access >= MIN_ACCESS_SIGNALS
    {
        Grade::Sufficient
    } else if basics >= MIN_BASIC_SIGNALS
        && (financial >= MIN_FINANCIAL_SIGNALS || access >= MIN_ACCESS_SIGNALS)
    {
        Grade::Partial
    } else {
        Grade::Insufficient
    };
    notes.push(format!("Grade {}: {}", grade.level(), grade.describe()));

    (grade, notes)
}

/// Case-insensitive, whitespace-trimmed lookup of the country column,
/// returning its actual name in the table.
pub fn resolve_country_column(frame: &Frame) -> Option<&str> {
    frame
        .columns()
        .iter()
        .map(String::as_str)
        .find(|name| name.trim().eq_ignore_ascii_case(COUNTRY_COLUMN))
}

fn count_present_signals(frame: &Frame, columns: &[String], cutoff: f64) -> usize {
    columns
        .iter()
        .filter(|column| {
            frame
                .column_index(column)
                .is_some_and(|index| missing_fraction(frame, index) < cutoff)
        })
        .count()
}

/// Fraction of rows whose cell is absent or carries the missing sentinel.
/// A zero-row table counts as entirely missing.
fn missing_fraction(frame: &Frame, column: usize) -> f64 {
    if frame.row_count() == 0 {
        return 1.0;
    }
    let missing = frame
        .column_values(column)
        .filter(|cell| is_missing_marker(*cell))
        .count();
    missing as f64 / frame.row_count() as f64
}
