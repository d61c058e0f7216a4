mod common;

use rstest::rstest;
use showdown::config::{DefenseConfig, Edition, SetConfig};
use showdown::ratings::defense::{defense_rating, defense_ratings, normalized_value};
use showdown::stats::{Position, PositionStats, StatLine};

fn expanded() -> DefenseConfig {
    SetConfig::for_edition(Edition::Expanded).defense
}

fn max_for(config: &DefenseConfig, position: Position) -> i8 {
    config.max_ratings[&position]
}

#[rstest]
#[case::average(Position::Shortstop, 150.0, 0.0, 3)]
#[case::at_ceiling(Position::Shortstop, 150.0, 10.0, 5)]
#[case::dampened_elite(Position::Shortstop, 150.0, 20.0, 6)]
#[case::below_replacement(Position::Shortstop, 150.0, -30.0, -1)]
#[case::clamped_to_floor(Position::Shortstop, 150.0, -60.0, -2)]
#[case::small_sample(Position::Shortstop, 50.0, 4.0, 4)]
#[case::catcher_scale(Position::Catcher, 120.0, 6.0, 7)]
#[case::first_base_plus(Position::FirstBase, 150.0, 6.0, 1)]
#[case::first_base_neutral(Position::FirstBase, 150.0, 0.0, 0)]
#[case::first_base_minus(Position::FirstBase, 150.0, -9.0, -1)]
fn test_drs_ratings(
    #[case] position: Position,
    #[case] games: f64,
    #[case] drs: f64,
    #[case] expected: i8,
) {
    let config = expanded();
    let stats = PositionStats::builder()
        .position(position)
        .games(games)
        .drs(drs)
        .build();
    let rating = defense_rating(&stats, 2010, max_for(&config, position), &config).unwrap();
    assert_eq!(rating, expected);
}

#[test]
fn test_oaa_preferred_in_statcast_years() {
    let config = expanded();
    let stats = PositionStats::builder()
        .position(Position::Shortstop)
        .games(150.0)
        .oaa(8.0)
        .drs(-20.0)
        .build();
    // OAA 8 dampens to 7.5 -> 0.875 of 6
    assert_eq!(defense_rating(&stats, 2019, 6, &config).unwrap(), 5);
    // Before OAA exists the poor DRS is used
    assert!(defense_rating(&stats, 2010, 6, &config).unwrap() < 3);
}

#[test]
fn test_center_field_oaa_scale() {
    let config = expanded();
    let stats = PositionStats::builder()
        .position(Position::CenterField)
        .games(150.0)
        .oaa(5.0)
        .build();
    assert_eq!(defense_rating(&stats, 2021, 3, &config).unwrap(), 2);
}

#[test]
fn test_dwar_fallback_for_old_seasons() {
    let config = expanded();
    let stats = PositionStats::builder()
        .position(Position::Shortstop)
        .games(150.0)
        .tzr(5.0)
        .dwar(1.0)
        .build();
    // TZR is published from 1953, so a 1950 season drops to dWAR
    assert_eq!(defense_rating(&stats, 1950, 6, &config).unwrap(), 3);
}

#[test]
fn test_missing_metric_rates_zero() {
    let config = expanded();
    let stats = common::position(Position::ThirdBase, 140.0);
    assert_eq!(defense_rating(&stats, 2015, 4, &config).unwrap(), 0);
}

#[test]
fn test_older_editions_use_shallower_floor() {
    let config = SetConfig::for_edition(Edition::Set2003).defense;
    let stats = PositionStats::builder()
        .position(Position::Shortstop)
        .games(150.0)
        .drs(-60.0)
        .build();
    assert_eq!(defense_rating(&stats, 2010, 6, &config).unwrap(), -1);
}

#[test]
fn test_shrinkage_ramps_to_full_sample() {
    let config = expanded();
    let partial = normalized_value(5.0, 50.0, &config);
    let full = normalized_value(10.0, 100.0, &config);
    assert!((partial - 7.5).abs() < 1e-9);
    assert!((full - 15.0).abs() < 1e-9);
    assert_eq!(normalized_value(5.0, 0.0, &config), 0.0);
}

#[test]
fn test_ratings_skip_unrated_positions() {
    let config = expanded();
    let stats = StatLine::builder()
        .year(2012)
        .positions(vec![
            common::position(Position::DesignatedHitter, 100.0),
            PositionStats::builder()
                .position(Position::LeftField)
                .games(40.0)
                .drs(3.0)
                .build(),
        ])
        .build();
    let ratings = defense_ratings(&stats, &config).unwrap();
    assert_eq!(ratings.len(), 1);
    assert!(ratings.contains_key(&Position::LeftField));
}

#[test]
fn test_secondary_positions_need_minimum_games() {
    let config = expanded();
    let stats = StatLine::builder()
        .year(2012)
        .positions(vec![
            PositionStats::builder()
                .position(Position::Shortstop)
                .games(140.0)
                .drs(5.0)
                .build(),
            PositionStats::builder()
                .position(Position::FirstBase)
                .games(3.0)
                .drs(1.0)
                .build(),
            PositionStats::builder()
                .position(Position::ThirdBase)
                .games(12.0)
                .drs(1.0)
                .build(),
        ])
        .build();
    let ratings = defense_ratings(&stats, &config).unwrap();
    assert!(ratings.contains_key(&Position::Shortstop));
    assert!(ratings.contains_key(&Position::ThirdBase));
    assert!(!ratings.contains_key(&Position::FirstBase));
}

#[test]
fn test_primary_position_rated_below_minimum() {
    let config = expanded();
    let stats = StatLine::builder()
        .year(2012)
        .positions(vec![
            PositionStats::builder()
                .position(Position::CenterField)
                .games(6.0)
                .drs(1.0)
                .build(),
            common::position(Position::LeftField, 2.0),
        ])
        .build();
    let ratings = defense_ratings(&stats, &config).unwrap();
    assert_eq!(ratings.len(), 1);
    assert!(ratings.contains_key(&Position::CenterField));
}
