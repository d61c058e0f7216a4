mod common;

use showdown::api;
use showdown::card::ChartOverrides;
use showdown::config::{DecayStep, Edition, SetConfig};
use showdown::points::{
    apply_all, Correction, Decay, MultiPosition, PointsBreakdown, PointsLedger, PointsMetric,
    Stamina,
};
use showdown::stats::{Icon, Position};

const EPS: f64 = 1e-6;

fn ledger(entries: &[(PointsMetric, f64)]) -> PointsLedger {
    PointsLedger::new(
        entries
            .iter()
            .map(|&(metric, points)| PointsBreakdown::flat(metric, points))
            .collect(),
    )
}

fn points_of(ledger: &PointsLedger, metric: PointsMetric) -> f64 {
    ledger.get(metric).map(|b| b.points).unwrap_or(0.0)
}

#[test]
fn test_two_positions_average_with_divisor() {
    let set = SetConfig::for_edition(Edition::Expanded);
    let multi = MultiPosition {
        config: &set.points,
    };
    let out = multi.apply(ledger(&[
        (PointsMetric::Defense(Position::SecondBase), 12.0),
        (PointsMetric::Defense(Position::CenterField), 8.0),
    ]));
    let second = points_of(&out, PointsMetric::Defense(Position::SecondBase));
    let center = points_of(&out, PointsMetric::Defense(Position::CenterField));
    assert!((second - 20.0 / 3.0).abs() < EPS);
    assert!((center - 20.0 / 3.0).abs() < EPS);
    assert!((out.total() - 13.333_333).abs() < 1e-4);
}

#[test]
fn test_highest_only_drops_other_positions() {
    let set = SetConfig::for_edition(Edition::Set2000);
    let multi = MultiPosition {
        config: &set.points,
    };
    let out = multi.apply(ledger(&[
        (PointsMetric::Defense(Position::SecondBase), 12.0),
        (PointsMetric::Defense(Position::CenterField), 8.0),
        (PointsMetric::OnBase, 50.0),
    ]));
    assert_eq!(points_of(&out, PointsMetric::Defense(Position::SecondBase)), 12.0);
    assert_eq!(points_of(&out, PointsMetric::Defense(Position::CenterField)), 0.0);
    assert_eq!(
        out.get(PointsMetric::Defense(Position::CenterField))
            .unwrap()
            .adjustment,
        -8.0
    );
    assert_eq!(points_of(&out, PointsMetric::OnBase), 50.0);
}

#[test]
fn test_single_position_untouched() {
    let set = SetConfig::for_edition(Edition::Expanded);
    let multi = MultiPosition {
        config: &set.points,
    };
    let out = multi.apply(ledger(&[(PointsMetric::Defense(Position::Shortstop), 40.0)]));
    assert_eq!(points_of(&out, PointsMetric::Defense(Position::Shortstop)), 40.0);
}

#[test]
fn test_decay_never_drops_below_threshold() {
    let decay = Decay::new(&[
        DecayStep {
            threshold: 700.0,
            rate: 0.45,
        },
        DecayStep {
            threshold: 560.0,
            rate: 0.30,
        },
    ]);
    let out = decay.apply(ledger(&[
        (PointsMetric::OnBase, 400.0),
        (PointsMetric::Slugging, 300.0),
    ]));
    // 140 over the first step, 30% of it removed; the second step is then never reached
    assert!((out.total() - 658.0).abs() < EPS);
    assert_eq!(out.decay.len(), 1);
    assert_eq!(out.decay[0].threshold, 560.0);
    assert!(out.total() >= 560.0);
}

#[test]
fn test_decay_without_eligible_points_is_noop() {
    let decay = Decay::new(&[DecayStep {
        threshold: 100.0,
        rate: 0.5,
    }]);
    let out = decay.apply(ledger(&[(PointsMetric::Speed, 300.0)]));
    assert_eq!(out.total(), 300.0);
    assert!(out.decay.is_empty());
}

#[test]
fn test_stamina_scales_everything_but_out_distribution() {
    let stamina = Stamina { multiplier: 0.84 };
    let out = stamina.apply(ledger(&[
        (PointsMetric::Command, 50.0),
        (PointsMetric::OnBase, 100.0),
        (PointsMetric::OutDistribution, 20.0),
    ]));
    assert!((points_of(&out, PointsMetric::Command) - 42.0).abs() < EPS);
    assert!((points_of(&out, PointsMetric::OnBase) - 84.0).abs() < EPS);
    assert_eq!(
        out.get(PointsMetric::OutDistribution).unwrap().adjustment,
        0.0
    );
    assert_eq!(out.stamina_multiplier, Some(0.84));
}

#[test]
fn test_corrections_compose_in_order() {
    let set = SetConfig::for_edition(Edition::Expanded);
    let multi = MultiPosition {
        config: &set.points,
    };
    let decay = Decay::new(&[DecayStep {
        threshold: 100.0,
        rate: 1.0,
    }]);
    let passes = vec![&multi as &dyn Correction, &decay as &dyn Correction];
    let out = apply_all(
        ledger(&[
            (PointsMetric::OnBase, 150.0),
            (PointsMetric::Defense(Position::Catcher), 30.0),
            (PointsMetric::Defense(Position::FirstBase), 0.0),
        ]),
        &passes,
    );
    // Both positions averaged to 10, then the 70 excess comes out of OBP
    assert!((points_of(&out, PointsMetric::OnBase) - 80.0).abs() < EPS);
    assert!((out.total() - 100.0).abs() < EPS);
}

#[test]
fn test_utility_player_defense_is_averaged() {
    let set = common::expanded_set();
    let card = api::build_card(&common::utility(), &set, None, ChartOverrides::default()).unwrap();
    assert_eq!(card.defense.len(), 2);

    let second = card
        .points
        .get(PointsMetric::Defense(Position::SecondBase))
        .unwrap();
    let center = card
        .points
        .get(PointsMetric::Defense(Position::CenterField))
        .unwrap();
    assert!((second.points - center.points).abs() < EPS);
    let expected = (second.base_points + center.base_points) / 1.5;
    assert!((second.points + center.points - expected).abs() < EPS);
}

#[test]
fn test_short_starter_is_penalized() {
    let set = common::expanded_set();
    let card =
        api::build_card(&common::short_starter(), &set, None, ChartOverrides::default()).unwrap();
    assert_eq!(card.innings_pitched, Some(4));

    let multiplier = card.points.stamina_multiplier.unwrap();
    assert!((multiplier - 0.84).abs() < EPS);

    let out_dist = card.points.get(PointsMetric::OutDistribution).unwrap();
    assert_eq!(out_dist.adjustment, 0.0);
    let command = card.points.get(PointsMetric::Command).unwrap();
    assert!((command.points - command.base_points * 0.84).abs() < EPS);
}

#[test]
fn test_one_inning_reliever_has_no_stamina_change() {
    let set = common::expanded_set();
    let card = api::build_card(&common::reliever(), &set, None, ChartOverrides::default()).unwrap();
    assert_eq!(card.innings_pitched, Some(1));
    assert_eq!(card.points.stamina_multiplier, None);
}

#[test]
fn test_icons_follow_edition() {
    let stats = common::shortstop();

    let expanded = api::build_card(&stats, &common::expanded_set(), None, ChartOverrides::default())
        .unwrap();
    assert_eq!(expanded.icons, vec![Icon::SilverSlugger]);
    let bonus = expanded
        .points
        .get(PointsMetric::Icon(Icon::SilverSlugger))
        .unwrap();
    assert_eq!(bonus.points, 10.0);

    let early = SetConfig::for_edition(Edition::Set2001);
    let card = api::build_card(&stats, &early, None, ChartOverrides::default()).unwrap();
    assert!(card.icons.is_empty());
    assert!(card.points.get(PointsMetric::Icon(Icon::SilverSlugger)).is_none());
}

#[test]
fn test_totals_round_to_tens_with_floor() {
    let set = common::expanded_set();
    for stats in [common::shortstop(), common::ace(), common::reliever()] {
        let card = api::build_card(&stats, &set, None, ChartOverrides::default()).unwrap();
        assert_eq!(card.points.total % 10, 0);
        assert!(card.points.total >= set.points.min_points);
        let breakdown_sum: f64 = card.points.breakdowns.iter().map(|b| b.points).sum();
        assert!((breakdown_sum - card.points.raw_total).abs() < EPS);
    }
}
