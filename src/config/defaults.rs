// Built-in tables for each edition. Sets loaded from JSON replace these wholesale.
use super::*;

fn hitter_commands(edition: Edition) -> Vec<u8> {
    match edition {
        Edition::Set2000 | Edition::Set2001 => (7..=12).collect(),
        Edition::Expanded => (7..=16).collect(),
        _ => (7..=14).collect(),
    }
}

pub(super) fn chart_config(edition: Edition) -> ChartConfig {
    ChartConfig {
        hitter: ChartTypeConfig {
            command_candidates: hitter_commands(edition),
            min_outs: 1,
            max_outs: 8,
            // League-average pitcher the hitter is simulated against
            opponent: OpponentChart {
                command: 3.5,
                pu: 2.5,
                so: 5.0,
                gb: 5.5,
                fb: 4.0,
                bb: 1.0,
                single: 1.6,
                single_plus: 0.0,
                double: 0.3,
                triple: 0.0,
                home_run: 0.1,
            },
            accuracy: AccuracyWeights {
                obp: 3.0,
                avg: 1.0,
                slg: 2.0,
                hr: 1.0,
            },
        },
        pitcher: ChartTypeConfig {
            command_candidates: (0..=6).collect(),
            min_outs: 12,
            max_outs: 19,
            // League-average hitter the pitcher is simulated against
            opponent: OpponentChart {
                command: 10.0,
                pu: 0.0,
                so: 1.5,
                gb: 2.0,
                fb: 1.5,
                bb: 4.0,
                single: 6.0,
                single_plus: 1.0,
                double: 2.0,
                triple: 0.4,
                home_run: 1.6,
            },
            accuracy: AccuracyWeights {
                obp: 3.0,
                avg: 1.0,
                slg: 2.0,
                hr: 1.0,
            },
        },
    }
}

fn scale(min: f64, max: f64, ceiling: f64) -> MetricScale {
    MetricScale {
        range: ValueRange::new(min, max),
        ceiling,
        outlier_multiplier: 0.5,
    }
}

pub(super) fn defense_config(edition: Edition) -> DefenseConfig {
    let modern = matches!(edition, Edition::Classic | Edition::Expanded);

    let mut max_ratings = BTreeMap::new();
    max_ratings.insert(Position::Catcher, if edition == Edition::Expanded { 11 } else { 10 });
    max_ratings.insert(Position::FirstBase, 1);
    max_ratings.insert(Position::SecondBase, if modern { 6 } else { 5 });
    max_ratings.insert(Position::ThirdBase, 4);
    max_ratings.insert(Position::Shortstop, 6);
    max_ratings.insert(Position::LeftField, 2);
    max_ratings.insert(Position::CenterField, 3);
    max_ratings.insert(Position::RightField, 2);
    max_ratings.insert(Position::Outfield, 2);

    let mut metrics = BTreeMap::new();

    // Catcher framing and arm numbers swing wider than fielders'
    let mut drs_positions = BTreeMap::new();
    drs_positions.insert(Position::Catcher, scale(-12.0, 18.0, 12.0));
    metrics.insert(
        DefenseMetric::Drs,
        MetricTable {
            scale: scale(-15.0, 15.0, 10.0),
            position_scales: drs_positions,
            first_base: FirstBaseCutoffs {
                plus: 5.0,
                minus: -8.0,
            },
        },
    );

    let mut oaa_positions = BTreeMap::new();
    oaa_positions.insert(Position::CenterField, scale(-8.0, 12.0, 9.0));
    metrics.insert(
        DefenseMetric::Oaa,
        MetricTable {
            scale: scale(-10.0, 10.0, 7.0),
            position_scales: oaa_positions,
            first_base: FirstBaseCutoffs {
                plus: 3.0,
                minus: -5.0,
            },
        },
    );

    metrics.insert(
        DefenseMetric::Tzr,
        MetricTable {
            scale: scale(-15.0, 15.0, 10.0),
            position_scales: BTreeMap::new(),
            first_base: FirstBaseCutoffs {
                plus: 5.0,
                minus: -8.0,
            },
        },
    );

    metrics.insert(
        DefenseMetric::Dwar,
        MetricTable {
            scale: scale(-1.0, 2.5, 2.0),
            position_scales: BTreeMap::new(),
            // 1B dWAR carries a steep positional penalty, so both cutoffs sit below zero
            first_base: FirstBaseCutoffs {
                plus: -0.5,
                minus: -1.8,
            },
        },
    );

    DefenseConfig {
        normalize_games: 150.0,
        full_sample_games: 100.0,
        min_position_games: 10.0,
        rating_floor: if modern { -2 } else { -1 },
        max_ratings,
        metrics,
    }
}

pub(super) fn speed_config(edition: Edition) -> SpeedConfig {
    let discrete = if edition.has_discrete_speed() {
        Some(DiscreteSpeeds { c: 10, b: 15, a: 20 })
    } else {
        None
    };
    let (max_speed, outlier_max_speed) = match edition {
        Edition::Expanded | Edition::Classic => (26.0, 28.0),
        _ => (24.0, 25.0),
    };

    SpeedConfig {
        min_speed: 8.0,
        max_speed,
        outlier_max_speed,
        low_games_threshold: 60.0,
        low_games_max_speed: 20.0,
        sb_range: ValueRange::new(0.0, 26.0),
        sb_outlier_range: ValueRange::new(26.0, 60.0),
        sprint_range: ValueRange::new(23.0, 30.0),
        sb_multiplier: 1.0,
        sprint_multiplier: if edition == Edition::Expanded { 1.05 } else { 1.0 },
        sb_weight: 0.5,
        outlier_sb_weight: 0.8,
        outlier_gap: 4.0,
        a_breakpoint: 18.0,
        b_breakpoint: 13.0,
        discrete,
    }
}

pub(super) fn stamina_config() -> StaminaConfig {
    StaminaConfig {
        starter_share: 0.4,
        sp_min_ip: 3,
        sp_max_ip: 9,
        rp_min_ip: 1,
        rp_max_ip: 3,
    }
}

fn wr(min: f64, max: f64, weight: f64) -> WeightedRange {
    WeightedRange {
        range: ValueRange::new(min, max),
        weight,
    }
}

fn wr_desc(min: f64, max: f64, weight: f64) -> WeightedRange {
    WeightedRange {
        range: ValueRange::descending(min, max),
        weight,
    }
}

pub(super) fn points_config(edition: Edition) -> PointsConfig {
    let position_player = SubtypePoints {
        command: wr(7.0, 16.0, 20.0),
        on_base: wr(0.250, 0.450, 150.0),
        batting_avg: wr(0.200, 0.330, 70.0),
        slugging: wr(0.300, 0.650, 150.0),
        home_runs: wr(0.0, 45.0, 70.0),
        speed: Some(wr(8.0, 26.0, 50.0)),
        innings_pitched: None,
        out_distribution: None,
        decay: vec![
            DecayStep {
                threshold: 560.0,
                rate: 0.30,
            },
            DecayStep {
                threshold: 700.0,
                rate: 0.45,
            },
        ],
    };

    let starting_pitcher = SubtypePoints {
        command: wr(0.0, 6.0, 30.0),
        on_base: wr_desc(0.250, 0.380, 150.0),
        batting_avg: wr_desc(0.200, 0.290, 50.0),
        slugging: wr_desc(0.300, 0.520, 120.0),
        home_runs: wr_desc(10.0, 40.0, 40.0),
        speed: None,
        innings_pitched: Some(wr(4.0, 8.0, 80.0)),
        out_distribution: Some(wr(0.2, 0.6, 30.0)),
        decay: vec![
            DecayStep {
                threshold: 480.0,
                rate: 0.25,
            },
            DecayStep {
                threshold: 620.0,
                rate: 0.40,
            },
        ],
    };

    let relief_pitcher = SubtypePoints {
        command: wr(0.0, 6.0, 20.0),
        on_base: wr_desc(0.250, 0.380, 100.0),
        batting_avg: wr_desc(0.200, 0.290, 30.0),
        slugging: wr_desc(0.300, 0.520, 80.0),
        home_runs: wr_desc(10.0, 40.0, 20.0),
        speed: None,
        innings_pitched: Some(wr(1.0, 3.0, 20.0)),
        out_distribution: Some(wr(0.2, 0.6, 20.0)),
        decay: vec![DecayStep {
            threshold: 250.0,
            rate: 0.30,
        }],
    };

    let mut defense = BTreeMap::new();
    defense.insert(Position::Catcher, wr(0.0, 10.0, 30.0));
    defense.insert(Position::FirstBase, wr(0.0, 1.0, 10.0));
    defense.insert(Position::SecondBase, wr(0.0, 5.0, 40.0));
    defense.insert(Position::ThirdBase, wr(0.0, 4.0, 30.0));
    defense.insert(Position::Shortstop, wr(0.0, 6.0, 50.0));
    defense.insert(Position::LeftField, wr(0.0, 2.0, 20.0));
    defense.insert(Position::CenterField, wr(0.0, 3.0, 40.0));
    defense.insert(Position::RightField, wr(0.0, 2.0, 20.0));
    defense.insert(Position::Outfield, wr(0.0, 2.0, 20.0));

    let mut icons = BTreeMap::new();
    if edition.has_icons() {
        icons.insert(Icon::Mvp, 15.0);
        icons.insert(Icon::SilverSlugger, 10.0);
        icons.insert(Icon::GoldGlove, 10.0);
        icons.insert(Icon::HomeRunLeader, 10.0);
        icons.insert(Icon::StolenBaseLeader, 10.0);
        icons.insert(Icon::StrikeoutLeader, 10.0);
        icons.insert(Icon::TwentyWins, 10.0);
        icons.insert(Icon::CyYoung, 15.0);
        icons.insert(Icon::Rookie, 0.0);
        icons.insert(Icon::RookieOfTheYear, 5.0);
    }

    let multi_position = match edition {
        Edition::Set2000 | Edition::Set2001 | Edition::Set2002 => MultiPositionMode::HighestOnly,
        _ => MultiPositionMode::Average,
    };

    PointsConfig {
        position_player,
        starting_pitcher,
        relief_pitcher,
        defense,
        multi_position,
        position_divisors: vec![1.0, 1.5, 2.0, 3.0],
        stamina: StaminaCurve {
            sp_norm_ip: 6.0,
            sp_per_ip: 0.08,
            sp_floor: 0.6,
            rp_norm_ip: 1.0,
            rp_per_ip: 0.15,
            rp_cap: 1.4,
        },
        icons,
        min_points: if edition == Edition::Expanded { 20 } else { 10 },
    }
}
