//! Daily nutrient targets derived from biometrics (Harris-Benedict, metric).

use time::{Date, OffsetDateTime};

/// Grams of fiber recommended per day, independent of biometrics.
pub const FIBER_NEED_G: f64 = 30.0;

const FAT_SHARE: f64 = 0.2;
const FAT_KCAL_PER_G: f64 = 9.0;
const PROTEIN_SHARE: f64 = 0.15;
const PROTEIN_KCAL_PER_G: f64 = 4.0;
/// Activity factor for regular exercise (light work is 1.375, heavy 1.725).
const MEDIUM_ACTIVITY_FACTOR: f64 = 1.55;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Exact, case-sensitive match on the stored values.
    pub fn parse(gender: &str) -> Option<Self> {
        match gender {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Biometrics<'a> {
    pub gender: &'a str,
    pub birthdate: Date,
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientTargets {
    pub age: u32,
    pub bmr: f64,
    pub caloryneed: f64,
    pub fatneed: f64,
    pub proteinneed: f64,
    pub fiberneed: f64,
    pub carbohidrateneed: f64,
}

/// Whole years between `birthdate` (UTC midnight) and `now`.
///
/// The elapsed time is added to the Unix epoch and the year of the result is
/// compared against 1970. This ignores where the leap days fall, so the value
/// can lag the calendar age by one around birthdays (born 2021-01-01, age 2 on
/// 2024-01-01). A birthdate in the future yields 1. Returns `None` when the
/// anchored instant falls outside the supported date range.
pub fn age_in_years(birthdate: Date, now: OffsetDateTime) -> Option<u32> {
    let born = birthdate.midnight().assume_utc();
    let elapsed = now - born;
    let anchored = OffsetDateTime::UNIX_EPOCH.checked_add(elapsed)?;
    Some((anchored.year() - 1970).unsigned_abs())
}

/// Basal metabolic rate in kcal/day. Unrecognized genders yield 0.
pub fn basal_metabolic_rate(gender: &str, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let age = f64::from(age);
    match Sex::parse(gender) {
        Some(Sex::Male) => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Some(Sex::Female) => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
        None => 0.0,
    }
}

pub fn compute_targets(input: &Biometrics<'_>, now: OffsetDateTime) -> Option<NutrientTargets> {
    let age = age_in_years(input.birthdate, now)?;
    Some(targets_for_age(input, age))
}

fn targets_for_age(input: &Biometrics<'_>, age: u32) -> NutrientTargets {
    let bmr = basal_metabolic_rate(input.gender, input.weight_kg, input.height_cm, age);
    let caloryneed = bmr * MEDIUM_ACTIVITY_FACTOR;
    NutrientTargets {
        age,
        bmr,
        caloryneed,
        fatneed: FAT_SHARE * caloryneed / FAT_KCAL_PER_G,
        proteinneed: PROTEIN_SHARE * caloryneed / PROTEIN_KCAL_PER_G,
        fiberneed: FIBER_NEED_G,
        // Stored as 0; the 65%-of-calories target was never persisted.
        carbohidrateneed: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn input(gender: &str) -> Biometrics<'_> {
        Biometrics {
            gender,
            birthdate: date!(1990 - 01 - 01),
            height_cm: 175.0,
            weight_kg: 70.0,
        }
    }

    #[test]
    fn male_targets_at_thirty() {
        let t = targets_for_age(&input("male"), 30);
        let bmr = 88.362 + 13.397 * 70.0 + 4.799 * 175.0 - 5.677 * 30.0;
        assert!(close(t.bmr, bmr));
        assert!((t.bmr - 1695.667).abs() < 1e-6);
        assert!(close(t.caloryneed, bmr * 1.55));
        assert!(close(t.fatneed, 0.2 * bmr * 1.55 / 9.0));
        assert!(close(t.proteinneed, 0.15 * bmr * 1.55 / 4.0));
        assert_eq!(t.fiberneed, 30.0);
        assert_eq!(t.carbohidrateneed, 0.0);
    }

    #[test]
    fn female_uses_female_formula() {
        let t = targets_for_age(&input("female"), 30);
        let bmr = 447.593 + 9.247 * 70.0 + 3.098 * 175.0 - 4.330 * 30.0;
        assert!(close(t.bmr, bmr));
        assert!(close(t.caloryneed, bmr * 1.55));
    }

    #[test]
    fn unknown_gender_zeroes_energy_targets() {
        for gender in ["other", "Male", ""] {
            let t = targets_for_age(&input(gender), 30);
            assert_eq!(t.bmr, 0.0);
            assert_eq!(t.caloryneed, 0.0);
            assert_eq!(t.fatneed, 0.0);
            assert_eq!(t.proteinneed, 0.0);
            assert_eq!(t.fiberneed, 30.0);
        }
    }

    #[test]
    fn age_counts_whole_years() {
        let now = datetime!(2026-06-01 12:00 UTC);
        assert_eq!(age_in_years(date!(1996 - 01 - 01), now), Some(30));
        assert_eq!(
            age_in_years(date!(2000 - 03 - 01), datetime!(2030-03-01 0:00 UTC)),
            Some(30)
        );
        assert_eq!(
            age_in_years(date!(2000 - 03 - 01), datetime!(2030-02-28 0:00 UTC)),
            Some(29)
        );
    }

    #[test]
    fn age_uses_epoch_anchored_year_arithmetic() {
        // 1095 days land on 1972-12-31 because 1972 is a leap year.
        let now = datetime!(2024-01-01 0:00 UTC);
        assert_eq!(age_in_years(date!(2021 - 01 - 01), now), Some(2));
    }

    #[test]
    fn future_birthdate_counts_as_one_year() {
        let now = datetime!(2026-01-01 0:00 UTC);
        assert_eq!(age_in_years(date!(2026 - 06 - 01), now), Some(1));
    }

    #[test]
    fn compute_targets_derives_age_from_now() {
        let now = datetime!(2020-06-01 0:00 UTC);
        let t = compute_targets(&input("male"), now).unwrap();
        assert_eq!(t.age, 30);
        assert_eq!(t, targets_for_age(&input("male"), 30));
    }
}
