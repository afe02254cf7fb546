//! End-to-end scenarios across math, calendar, schedule and cashflow layers.

use proptest::prelude::*;
use rust_decimal_macros::dec;

use tenor_cashflows::prelude::*;
use tenor_core::prelude::*;
use tenor_math::{FixedPoint, SCALE};

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn fp(s: &str) -> FixedPoint {
    s.parse().unwrap()
}

// =============================================================================
// FIXED-POINT ARITHMETIC
// =============================================================================

#[test]
fn multiply_integers() {
    let product = FixedPoint::from_int(2).checked_mul(FixedPoint::from_int(3)).unwrap();
    assert_eq!(product.raw(), 6 * SCALE);
}

#[test]
fn divide_one_by_three() {
    let third = FixedPoint::ONE.checked_div(FixedPoint::from_int(3)).unwrap();
    assert_eq!(third.raw(), 333_333_333_333_333_333);
}

// =============================================================================
// SCHEDULES
// =============================================================================

#[test]
fn quarterly_schedule_has_four_contiguous_periods() {
    let params = ScheduleParams::new(date("2024-01-01"), date("2025-01-01"), Period::months(3));
    let schedule = ScheduleGenerator::default().generate(&params).unwrap();

    assert_eq!(schedule.len(), 4);
    let periods = schedule.periods();
    assert_eq!(periods[0].adjusted_start, date("2024-01-01"));
    assert_eq!(periods[3].adjusted_end, date("2025-01-01"));
    for pair in periods.windows(2) {
        assert_eq!(pair[0].adjusted_end, pair[1].adjusted_start);
    }
}

// =============================================================================
// INTEREST
// =============================================================================

#[test]
fn fixed_interest_over_non_leap_year() {
    let params = ScheduleParams::new(date("2025-01-01"), date("2026-01-01"), Period::years(1));
    let schedule = ScheduleGenerator::default().generate(&params).unwrap();
    let basis = AccrualBasis::new(DayCountConvention::Act365Fixed);

    let interest = period_interest(
        FixedPoint::from_int(1_000_000),
        fp("0.05"),
        &schedule.periods()[0],
        &basis,
    )
    .unwrap();
    assert_eq!(interest.raw(), 50_000 * SCALE);
}

// =============================================================================
// BUSINESS DAYS
// =============================================================================

#[test]
fn saturday_moves_forward_and_back() {
    let saturday = date("2025-05-31");
    assert!(saturday.is_weekend());

    let following = WeekendCalendar
        .adjust(saturday, BusinessDayConvention::Following)
        .unwrap();
    assert_eq!(following, date("2025-06-02"));
    assert_eq!(following.weekday(), Weekday::Mon);

    let preceding = WeekendCalendar
        .adjust(saturday, BusinessDayConvention::Preceding)
        .unwrap();
    assert_eq!(preceding, date("2025-05-30"));
    assert_eq!(preceding.weekday(), Weekday::Fri);
}

// =============================================================================
// COMPOUNDING
// =============================================================================

#[test]
fn flat_compounding_is_exact_mean() {
    let weight = FixedPoint::from_ratio(1, 3).unwrap();
    let observations: Vec<_> = ["0.03", "0.04", "0.05"]
        .iter()
        .enumerate()
        .map(|(i, r)| {
            RateObservation::new(date("2025-01-01").add_days(i as i64).unwrap(), fp(r), weight)
        })
        .collect();

    let rate = compound(CompoundingMethod::Flat, &observations, date("2025-01-04")).unwrap();
    assert_eq!(rate.raw(), 40_000_000_000_000_000);
}

// =============================================================================
// FULL FLOATING PERIOD
// =============================================================================

#[test]
fn overnight_period_from_observations_to_payment() {
    let params = ScheduleParams::new(date("2025-01-06"), date("2025-04-06"), Period::months(3))
        .with_adjustments(BusinessDayAdjustments::new(
            BusinessDayConvention::ModifiedFollowing,
            "USNY".parse().unwrap(),
        ));
    let schedule = ScheduleGenerator::default().generate(&params).unwrap();
    let period = schedule.periods()[0];

    let observations = ObservationScheduleGenerator::default()
        .generate(period.adjusted_start, period.adjusted_end, &ObservationConfig::overnight())
        .unwrap();
    assert_eq!(observations.len() as u64, period.calendar_days);

    // Flat 4% every day, plus 10bp spread
    let rates: Vec<_> = observations
        .iter()
        .map(|o| RateObservation::new(o.effective_date, fp("0.04"), o.weight))
        .collect();
    let terms = FloatingRateTerms::new(CompoundingMethod::Flat).with_spread(FixedPoint::from_bps(10));
    let rate = floating_rate(&rates, &terms, period.adjusted_end).unwrap();
    assert_eq!(rate.to_decimal().unwrap(), dec!(0.041));

    let basis = AccrualBasis::new(DayCountConvention::Act360);
    let leg = LegTerms::new(FixedPoint::from_int(10_000_000), basis, Direction::Receive, Currency::USD);
    let flows = build_floating_cashflows(&schedule, &leg, &[rate]).unwrap();

    // 91 days: 10m * 0.041 * 91/360 = 103638.888..., paid to the cent
    assert_eq!(flows[0].amount.to_decimal().unwrap(), dec!(103638.89));
    assert_eq!(flows[0].payment_date, date("2025-04-07"));
}

#[test]
fn swap_legs_net_on_shared_payment_date() {
    let params = ScheduleParams::new(date("2025-01-15"), date("2026-01-15"), Period::months(6));
    let schedule = ScheduleGenerator::default().generate(&params).unwrap();

    let fixed = LegTerms::new(
        FixedPoint::from_int(1_000_000),
        AccrualBasis::new(DayCountConvention::Thirty360),
        Direction::Pay,
        Currency::USD,
    );
    let floating = LegTerms::new(
        FixedPoint::from_int(1_000_000),
        AccrualBasis::new(DayCountConvention::Thirty360),
        Direction::Receive,
        Currency::USD,
    );

    let pay = build_cashflows(&schedule, &fixed, fp("0.04")).unwrap();
    let receive = build_floating_cashflows(&schedule, &floating, &[fp("0.05"), fp("0.03")]).unwrap();

    let first = net(&pay[0], &receive[0]).unwrap();
    assert_eq!(first.amount.to_decimal().unwrap(), dec!(5000));
    assert_eq!(first.direction, Direction::Receive);

    let second = net(&pay[1], &receive[1]).unwrap();
    assert_eq!(second.amount.to_decimal().unwrap(), dec!(-5000));
    assert_eq!(second.direction, Direction::Pay);

    let dfs = [fp("0.98"), fp("0.96")];
    assert_eq!(npv(&pay, &dfs).unwrap().to_decimal().unwrap(), dec!(38800));
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn frequency() -> impl Strategy<Value = Period> {
    prop_oneof![
        Just(Period::weeks(1)),
        Just(Period::months(1)),
        Just(Period::months(3)),
        Just(Period::months(6)),
        Just(Period::years(1)),
    ]
}

fn convention() -> impl Strategy<Value = BusinessDayConvention> {
    prop::sample::select(BusinessDayConvention::all().to_vec())
}

proptest! {
    #[test]
    fn schedules_are_contiguous_and_cover_the_range(
        start_day in 10_000u64..30_000,
        length in 1i64..3_650,
        freq in frequency(),
        conv in convention(),
    ) {
        let effective = Date::from_epoch_day(start_day).unwrap();
        let termination = effective.add_days(length).unwrap();
        let params = ScheduleParams::new(effective, termination, freq)
            .with_adjustments(BusinessDayAdjustments::new(conv, BusinessCenters::new()));

        let schedule = ScheduleGenerator::default().generate(&params).unwrap();
        let periods = schedule.periods();

        prop_assert!(!periods.is_empty());
        prop_assert_eq!(periods[0].unadjusted_start, effective);
        prop_assert_eq!(periods[periods.len() - 1].unadjusted_end, termination);
        for p in periods {
            prop_assert!(p.adjusted_start <= p.adjusted_end);
            prop_assert!(p.unadjusted_start < p.unadjusted_end);
        }
        for pair in periods.windows(2) {
            prop_assert_eq!(pair[0].adjusted_end, pair[1].adjusted_start);
            prop_assert_eq!(pair[0].unadjusted_end, pair[1].unadjusted_start);
        }
    }

    #[test]
    fn daily_weights_sum_to_one(
        start_day in 10_000u64..30_000,
        length in 1i64..400,
    ) {
        let start = Date::from_epoch_day(start_day).unwrap();
        let end = start.add_days(length).unwrap();
        let observations = ObservationScheduleGenerator::default()
            .generate(start, end, &ObservationConfig::overnight())
            .unwrap();

        let total = observations
            .iter()
            .try_fold(FixedPoint::ZERO, |acc, o| acc.checked_add(o.weight))
            .unwrap();
        let distance = if total > FixedPoint::ONE {
            total.checked_sub(FixedPoint::ONE).unwrap()
        } else {
            FixedPoint::ONE.checked_sub(total).unwrap()
        };
        // Each 1/N weight rounds by at most half a unit in the last place
        prop_assert!(distance.raw() <= observations.len() as u128);
    }
}
