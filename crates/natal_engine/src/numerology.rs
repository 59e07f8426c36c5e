//! Pythagorean digit-sum numerology.

use chrono::{Datelike, NaiveDate};

/// Master numbers survive reduction.
pub const MASTER_NUMBERS: [u32; 3] = [11, 22, 33];

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Repeated digit sum down to 1..=9, stopping early at 11, 22 or 33.
pub fn reduce(n: u32) -> u32 {
    let mut n = n;
    while n > 9 && !MASTER_NUMBERS.contains(&n) {
        n = digit_sum(n);
    }
    n
}

/// Life-path number: year, month and day reduced separately, then summed
/// and reduced.
pub fn life_path(birth_date: NaiveDate) -> u32 {
    let year = reduce(birth_date.year().unsigned_abs());
    let month = reduce(birth_date.month());
    let day = reduce(birth_date.day());
    reduce(year + month + day)
}

/// Personal-year number for `year`: birth month + birth day + `year`.
pub fn personal_year(birth_date: NaiveDate, year: i32) -> u32 {
    reduce(reduce(birth_date.month()) + reduce(birth_date.day()) + reduce(year.unsigned_abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reduce_single_digits_unchanged() {
        for n in 0..=9 {
            assert_eq!(reduce(n), n);
        }
    }

    #[test]
    fn reduce_keeps_master_numbers() {
        assert_eq!(reduce(11), 11);
        assert_eq!(reduce(29), 11);
        assert_eq!(reduce(22), 22);
        assert_eq!(reduce(33), 33);
        assert_eq!(reduce(38), 11);
        assert_eq!(reduce(1990), 1);
        assert_eq!(reduce(2024), 8);
    }

    #[test]
    fn life_path_examples() {
        // 1990 -> 1, 1 -> 1, 5 -> 5: 7
        assert_eq!(life_path(date(1990, 1, 5)), 7);
        // 1987 -> 7, 11, 29 -> 11: 29 -> 11
        assert_eq!(life_path(date(1987, 11, 29)), 11);
    }

    #[test]
    fn personal_year_examples() {
        // 1 + 5 + 8
        assert_eq!(personal_year(date(1990, 1, 5), 2024), 5);
        // 11 + 11 + 9 = 31 -> 4
        assert_eq!(personal_year(date(1987, 11, 29), 2025), 4);
    }
}
