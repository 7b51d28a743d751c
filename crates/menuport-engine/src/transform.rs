//! Field mapping and type coercion from source rows to menu documents.

use menuport_types::{columns, MenuItem, RowError};

use crate::source::SourceRecord;

fn required<'a>(record: &'a SourceRecord, column: &'static str) -> Result<&'a str, RowError> {
    record.get(column).ok_or(RowError::MissingField { column })
}

fn float_field(record: &SourceRecord, column: &'static str) -> Result<f64, RowError> {
    let raw = required(record, column)?;
    raw.trim().parse().map_err(|_| RowError::InvalidNumber {
        column,
        value: raw.to_string(),
    })
}

fn int_field(record: &SourceRecord, column: &'static str) -> Result<i64, RowError> {
    let raw = required(record, column)?;
    raw.trim().parse().map_err(|_| RowError::InvalidNumber {
        column,
        value: raw.to_string(),
    })
}

/// Map one source row to a write-ready document.
///
/// String columns pass through as-is; the macro-nutrient and calorie
/// columns coerce to `f64`, the display order to `i64`. The first
/// failing field decides the row's error.
pub fn map_record(record: &SourceRecord) -> Result<MenuItem, RowError> {
    Ok(MenuItem {
        category: required(record, columns::CATEGORY)?.to_owned(),
        dish_name: required(record, columns::DISH_NAME)?.to_owned(),
        protein: float_field(record, columns::PROTEIN)?,
        fat: float_field(record, columns::FAT)?,
        carbohydrates: float_field(record, columns::CARBOHYDRATES)?,
        total_calories: float_field(record, columns::TOTAL_CALORIES)?,
        image_url: required(record, columns::IMAGE_URL)?.to_owned(),
        status: required(record, columns::STATUS)?.to_owned(),
        display_order: int_field(record, columns::DISPLAY_ORDER)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuport_types::RowErrorKind;

    fn base_value(column: &str) -> &'static str {
        match column {
            c if c == columns::CATEGORY => "Soup",
            c if c == columns::DISH_NAME => "Miso",
            c if c == columns::PROTEIN => "2",
            c if c == columns::FAT => "1",
            c if c == columns::CARBOHYDRATES => "3",
            c if c == columns::TOTAL_CALORIES => "40",
            c if c == columns::IMAGE_URL => "/a.png",
            c if c == columns::STATUS => "available",
            _ => "1",
        }
    }

    /// Complete row with one column overridden (`Some(value)`) or
    /// removed entirely (`None`).
    fn row_with(column: &str, value: Option<&str>) -> SourceRecord {
        columns::REQUIRED
            .iter()
            .copied()
            .filter(|c| value.is_some() || *c != column)
            .map(|c| {
                let cell = if c == column {
                    value.unwrap_or_default()
                } else {
                    base_value(c)
                };
                (c.to_string(), cell.to_string())
            })
            .collect()
    }

    fn complete_row() -> SourceRecord {
        row_with(columns::CATEGORY, Some("Soup"))
    }

    #[test]
    fn maps_a_complete_row() {
        let item = map_record(&complete_row()).unwrap();
        assert_eq!(item.category, "Soup");
        assert_eq!(item.dish_name, "Miso");
        assert_eq!(item.protein, 2.0);
        assert_eq!(item.fat, 1.0);
        assert_eq!(item.carbohydrates, 3.0);
        assert_eq!(item.total_calories, 40.0);
        assert_eq!(item.image_url, "/a.png");
        assert_eq!(item.status, "available");
        assert_eq!(item.display_order, 1);
    }

    #[test]
    fn absent_column_is_missing_field() {
        let err = map_record(&row_with(columns::FAT, None)).unwrap_err();
        assert_eq!(
            err,
            RowError::MissingField {
                column: columns::FAT
            }
        );
    }

    #[test]
    fn unparseable_float_is_invalid_number() {
        let err = map_record(&row_with(columns::PROTEIN, Some("lots"))).unwrap_err();
        assert_eq!(
            err,
            RowError::InvalidNumber {
                column: columns::PROTEIN,
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn fractional_display_order_is_invalid_number() {
        let err = map_record(&row_with(columns::DISPLAY_ORDER, Some("1.5"))).unwrap_err();
        assert_eq!(err.kind(), RowErrorKind::InvalidNumber);
    }

    #[test]
    fn empty_numeric_cell_is_invalid_number() {
        let err = map_record(&row_with(columns::TOTAL_CALORIES, Some(""))).unwrap_err();
        assert_eq!(err.kind(), RowErrorKind::InvalidNumber);
    }

    #[test]
    fn numeric_fields_tolerate_surrounding_whitespace() {
        let item = map_record(&row_with(columns::PROTEIN, Some(" 2.5 "))).unwrap();
        assert_eq!(item.protein, 2.5);
    }

    #[test]
    fn string_fields_pass_through_unchanged() {
        let item = map_record(&row_with(columns::STATUS, Some(" 売り切れ "))).unwrap();
        assert_eq!(item.status, " 売り切れ ");
    }
}
