use chrono::{Datelike, NaiveDate};

pub(crate) fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first day of a month always exists")
}

pub(crate) fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_next_month(date)
        .pred_opt()
        .expect("day before a month start always exists")
}

pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    last_of_month(date).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rolls_over_december() {
        assert_eq!(first_of_next_month(date(2023, 12, 15)), date(2024, 1, 1));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(date(2023, 3, 20)), 31);
        assert_eq!(days_in_month(date(2023, 4, 1)), 30);
        assert_eq!(days_in_month(date(2023, 2, 28)), 28);
        assert_eq!(days_in_month(date(2024, 2, 1)), 29);
    }

    #[test]
    fn last_of_month_keeps_month() {
        assert_eq!(last_of_month(date(2023, 2, 3)), date(2023, 2, 28));
        assert_eq!(last_of_month(date(2024, 2, 3)), date(2024, 2, 29));
        assert_eq!(last_of_month(date(2023, 12, 31)), date(2023, 12, 31));
    }
}
