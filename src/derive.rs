//! Safe derivation between the paired business-age fields. Only arithmetic
//! between years and months is ever performed; monetary fields are never
//! inferred.

use crate::data::Value;
use crate::frame::Frame;
use crate::normalize::is_missing_marker;

pub const YEARS_COLUMN: &str = "business_age_years";
pub const MONTHS_COLUMN: &str = "business_age_months";

/// Fills gaps between `business_age_years` and `business_age_months` when
/// both columns exist: missing months become `round(years * 12)`, missing
/// years become `floor(months / 12)`. Source values are read before either
/// direction writes, so the two fills act on the original data and may fire
/// independently on disjoint row subsets. Rows where the counterpart is
/// absent or non-numeric are left untouched.
pub fn derive_features(frame: &Frame) -> (Frame, Vec<String>) {
    let mut derived = frame.clone();
    let mut notes = Vec::new();

    let (Some(years_index), Some(months_index)) = (
        derived.column_index(YEARS_COLUMN),
        derived.column_index(MONTHS_COLUMN),
    ) else {
        return (derived, notes);
    };

    let mut months_derived = false;
    let mut years_derived = false;

    for row in 0..derived.row_count() {
        let years = numeric_cell(&derived, row, years_index);
        let months = numeric_cell(&derived, row, months_index);

        if is_missing_marker(derived.cell(row, months_index)) {
            if let Some(years) = years {
                let months = (years * 12.0).round() as i64;
                derived.set_cell(row, months_index, Some(Value::Integer(months)));
                months_derived = true;
            }
        }
        if is_missing_marker(derived.cell(row, years_index)) {
            if let Some(months) = months {
                let years = (months / 12.0).floor() as i64;
                derived.set_cell(row, years_index, Some(Value::Integer(years)));
                years_derived = true;
            }
        }
    }

    if months_derived {
        notes.push(format!(
            "Derived {MONTHS_COLUMN} from {YEARS_COLUMN} where missing."
        ));
    }
    if years_derived {
        notes.push(format!(
            "Derived {YEARS_COLUMN} from {MONTHS_COLUMN} where missing."
        ));
    }

    (derived, notes)
}

fn numeric_cell(frame: &Frame, row: usize, column: usize) -> Option<f64> {
    frame.cell(row, column).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_frame(cells: Vec<(Option<Value>, Option<Value>)>) -> Frame {
        let mut frame = Frame::new([YEARS_COLUMN, MONTHS_COLUMN]).unwrap();
        for (years, months) in cells {
            frame.push_row(vec![years, months]).unwrap();
        }
        frame
    }

    fn sentinel() -> Option<Value> {
        Some(Value::String("missing".to_string()))
    }

    #[test]
    fn fills_missing_months_from_years() {
        let frame = age_frame(vec![(Some(Value::Integer(5)), None)]);
        let (derived, notes) = derive_features(&frame);
        assert_eq!(derived.cell(0, 1), Some(&Value::Integer(60)));
        assert_eq!(
            notes,
            vec!["Derived business_age_months from business_age_years where missing.".to_string()]
        );
    }

    #[test]
    fn fills_missing_years_from_months_with_floor() {
        let frame = age_frame(vec![(None, Some(Value::Integer(14)))]);
        let (derived, notes) = derive_features(&frame);
        assert_eq!(derived.cell(0, 0), Some(&Value::Integer(1)));
        assert_eq!(
            notes,
            vec!["Derived business_age_years from business_age_months where missing.".to_string()]
        );
    }

    #[test]
    fn fractional_years_round_to_nearest_month() {
        let frame = age_frame(vec![(Some(Value::Float(2.5)), sentinel())]);
        let (derived, _) = derive_features(&frame);
        assert_eq!(derived.cell(0, 1), Some(&Value::Integer(30)));
    }

    #[test]
    fn sentinel_counts_as_missing_and_numeric_strings_parse() {
        let frame = age_frame(vec![(
            sentinel(),
            Some(Value::String(" 26 ".to_string())),
        )]);
        let (derived, _) = derive_features(&frame);
        assert_eq!(derived.cell(0, 0), Some(&Value::Integer(2)));
        // source column is untouched
        assert_eq!(
            derived.cell(0, 1),
            Some(&Value::String(" 26 ".to_string()))
        );
    }

    #[test]
    fn rows_missing_both_stay_missing() {
        let frame = age_frame(vec![(None, sentinel())]);
        let (derived, notes) = derive_features(&frame);
        assert_eq!(derived.cell(0, 0), None);
        assert_eq!(derived.cell(0, 1), sentinel().as_ref());
        assert!(notes.is_empty());
    }

    #[test]
    fn non_numeric_counterparts_derive_nothing() {
        let frame = age_frame(vec![(Some(Value::String("old".to_string())), None)]);
        let (derived, notes) = derive_features(&frame);
        assert_eq!(derived.cell(0, 1), None);
        assert!(notes.is_empty());
    }

    #[test]
    fn both_directions_fire_on_disjoint_rows() {
        let frame = age_frame(vec![
            (Some(Value::Integer(3)), None),
            (None, Some(Value::Integer(25))),
        ]);
        let (derived, notes) = derive_features(&frame);
        assert_eq!(derived.cell(0, 1), Some(&Value::Integer(36)));
        assert_eq!(derived.cell(1, 0), Some(&Value::Integer(2)));
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn absent_columns_are_a_silent_no_op() {
        let mut frame = Frame::new([YEARS_COLUMN, "country"]).unwrap();
        frame
            .push_row(vec![None, Some(Value::String("lesotho".to_string()))])
            .unwrap();
        let (derived, notes) = derive_features(&frame);
        assert_eq!(derived, frame);
        assert!(notes.is_empty());
    }

    #[test]
    fn present_values_are_never_overwritten() {
        let frame = age_frame(vec![(Some(Value::Integer(2)), Some(Value::Integer(30)))]);
        let (derived, notes) = derive_features(&frame);
        assert_eq!(derived.cell(0, 0), Some(&Value::Integer(2)));
        assert_eq!(derived.cell(0, 1), Some(&Value::Integer(30)));
        assert!(notes.is_empty());
    }
}
