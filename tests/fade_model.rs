mod common;

use common::{engine_from_points, line_points};
use cubolife_lib::model::cell::LIFETIME;
use cubolife_lib::model::config::Rules;

#[test]
fn test_fade_out_strictly_decreases_then_settles() {
    // lone alive cell starves and starts fading out at LIFETIME
    let mut engine = engine_from_points(line_points(1, 1.0), 1.0, Rules::default(), &[0]);
    engine.step();
    let mut previous = engine.lattice().cell(0).unwrap().time;
    assert_eq!(previous, LIFETIME);

    let mut steps = 0;
    while previous > 0.0 {
        engine.advance_fade();
        let current = engine.lattice().cell(0).unwrap().time;
        assert!(current < previous, "{current} should be below {previous}");
        assert!(current >= 0.0);
        previous = current;
        steps += 1;
        assert!(steps <= 1000, "fade never settled");
    }
    // 10.0 / 0.05, give or take one step of rounding
    assert!((199..=201).contains(&steps), "settled after {steps} steps");

    for _ in 0..10 {
        engine.advance_fade();
        assert_eq!(engine.lattice().cell(0).unwrap().time, 0.0);
    }
}

#[test]
fn test_fade_in_uses_fade_in_rate() {
    let rules = Rules {
        birth: 1,
        underpopulated: 0,
        fade_in: 1000.0,
        fade_out: 1.0,
        ..Rules::default()
    };
    let mut engine = engine_from_points(line_points(2, 1.0), 1.0, rules, &[0]);
    engine.step();
    assert_eq!(engine.lattice().cell(1).unwrap().time, LIFETIME);

    engine.advance_fade();
    assert_eq!(engine.lattice().cell(1).unwrap().time, LIFETIME - 1.0);
}

#[test]
fn test_zero_rate_freezes_transition() {
    let rules = Rules {
        fade_out: 0.0,
        ..Rules::default()
    };
    let mut engine = engine_from_points(line_points(1, 1.0), 1.0, rules, &[0]);
    engine.step();
    for _ in 0..20 {
        assert_eq!(engine.advance_fade(), 1);
    }
    assert_eq!(engine.lattice().cell(0).unwrap().time, LIFETIME);
}

#[test]
fn test_ratio_stays_in_unit_interval() {
    let rules = Rules {
        fade_out: 3_333.0,
        ..Rules::default()
    };
    let mut engine = engine_from_points(line_points(1, 1.0), 1.0, rules, &[0]);
    engine.step();
    for _ in 0..5 {
        engine.advance_fade();
        let ratio = engine.lattice().view(0).unwrap().fade_ratio();
        assert!((0.0..=1.0).contains(&ratio));
    }
    assert_eq!(engine.lattice().cell(0).unwrap().time, 0.0);
}

#[test]
fn test_rebirth_during_fade_keeps_counter() {
    // cell 0 dies, then is reborn before its fade finishes
    let rules = Rules {
        birth: 0,
        underpopulated: 1,
        ..Rules::default()
    };
    let mut engine = engine_from_points(line_points(1, 1.0), 1.0, rules, &[0]);
    engine.step();
    assert!(!engine.lattice().cell(0).unwrap().alive);
    for _ in 0..10 {
        engine.advance_fade();
    }
    let mid_fade = engine.lattice().cell(0).unwrap().time;
    assert!(mid_fade > 0.0 && mid_fade < LIFETIME);

    engine.step();
    let cell = engine.lattice().cell(0).unwrap();
    assert!(cell.alive);
    assert_eq!(cell.time, mid_fade);
}

#[test]
fn test_live_out_of_range_rate_keeps_intensity_in_range() {
    let mut engine = engine_from_points(line_points(1, 1.0), 1.0, Rules::default(), &[0]);
    engine.step();

    engine.rules_mut().fade_out = -50.0;
    for _ in 0..100 {
        engine.advance_fade();
        let time = engine.lattice().cell(0).unwrap().time;
        assert!((0.0..=LIFETIME).contains(&time), "intensity {time} out of range");
    }

    engine.rules_mut().fade_out = f64::NAN;
    engine.advance_fade();
    assert_eq!(engine.lattice().cell(0).unwrap().time, LIFETIME);

    engine.rules_mut().fade_out = 50_000.0;
    engine.advance_fade();
    assert_eq!(engine.lattice().cell(0).unwrap().time, 0.0);
}
