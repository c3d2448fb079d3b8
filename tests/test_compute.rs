use bug_crossing::compute::*;
use bug_crossing::config::GameConfig;
use bug_crossing::entities::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_player() -> Player {
    Player {
        x: 202.0,
        y: 400.0,
        start_x: 202.0,
        start_y: 400.0,
        lives: 3,
        is_winner: false,
        avatar: Avatar::Boy,
    }
}

fn make_enemy(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        start_x: x,
        start_y: y,
        speed: 200,
        sprite: Sprite::EnemyBug,
    }
}

fn make_state(enemies: Vec<Enemy>) -> GameState {
    GameState {
        player: make_player(),
        enemies,
        is_game_over: false,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_places_player_and_lanes() {
    let config = GameConfig::default();
    let s = init_state(&config, &mut seeded_rng());
    assert_eq!((s.player.x, s.player.y), (202.0, 400.0));
    assert_eq!(s.player.lives, 3);
    assert!(!s.player.is_winner);
    assert!(!s.is_game_over);

    let lanes: Vec<(f32, f32)> = s.enemies.iter().map(|e| (e.x, e.y)).collect();
    assert_eq!(lanes, vec![(0.0, 62.0), (202.0, 145.0), (101.0, 230.0)]);
}

#[test]
fn init_state_speeds_within_range() {
    let config = GameConfig::default();
    let s = init_state(&config, &mut seeded_rng());
    for e in &s.enemies {
        assert!((180..=220).contains(&e.speed), "speed {}", e.speed);
    }
}

// ── update_enemy ──────────────────────────────────────────────────────────────

#[test]
fn enemy_advances_by_dt_times_speed() {
    let config = GameConfig::default();
    let e = make_enemy(100.0, 62.0);
    let e2 = update_enemy(&e, 0.5, &config, &mut seeded_rng());
    assert_eq!(e2.x, 200.0); // 100 + 0.5 * 200
    assert_eq!(e2.y, 62.0);
}

#[test]
fn enemy_rerolls_speed_every_update() {
    let config = GameConfig {
        min_speed: 7,
        max_speed: 7,
        ..GameConfig::default()
    };
    let e = make_enemy(100.0, 62.0);
    let e2 = update_enemy(&e, 0.1, &config, &mut seeded_rng());
    assert_eq!(e2.speed, 7);

    let wrapped = update_enemy(&make_enemy(500.0, 62.0), 0.1, &config, &mut seeded_rng());
    assert_eq!(wrapped.speed, 7);
}

#[test]
fn enemy_at_wrap_threshold_still_advances() {
    let config = GameConfig::default();
    let e = make_enemy(475.0, 62.0); // 505 - 30
    let e2 = update_enemy(&e, 0.1, &config, &mut seeded_rng());
    assert_eq!(e2.x, 495.0);
}

#[test]
fn enemy_past_threshold_wraps_to_zero() {
    let config = GameConfig::default();
    let e = make_enemy(475.5, 62.0);
    let e2 = update_enemy(&e, 0.1, &config, &mut seeded_rng());
    assert_eq!(e2.x, 0.0);
}

#[test]
fn enemy_huge_dt_stays_on_canvas() {
    let config = GameConfig::default();
    let e = make_enemy(400.0, 62.0);
    let e2 = update_enemy(&e, 60.0, &config, &mut seeded_rng());
    assert_eq!(e2.x, 505.0);
    // Next update wraps it.
    let e3 = update_enemy(&e2, 0.0, &config, &mut seeded_rng());
    assert_eq!(e3.x, 0.0);
}

#[test]
fn update_does_not_mutate_original() {
    let config = GameConfig::default();
    let e = make_enemy(100.0, 62.0);
    let _ = update_enemy(&e, 1.0, &config, &mut seeded_rng());
    assert_eq!(e.x, 100.0);
}

proptest! {
    #[test]
    fn enemy_x_stays_within_canvas(x in 0.0f32..=505.0, dt in 0.0f32..100.0, seed in any::<u64>()) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let e = update_enemy(&make_enemy(x, 62.0), dt, &config, &mut rng);
        prop_assert!(e.x >= 0.0 && e.x <= config.canvas_width);
        if x > 475.0 {
            prop_assert_eq!(e.x, 0.0);
        } else {
            prop_assert!(e.x >= x);
        }
    }

    #[test]
    fn player_never_leaves_the_columns(moves in proptest::collection::vec(0u8..4, 0..60)) {
        let mut p = make_player();
        for m in moves {
            let dir = match m {
                0 => Direction::Left,
                1 => Direction::Up,
                2 => Direction::Right,
                _ => Direction::Down,
            };
            p = handle_input(&p, dir, 505.0, 606.0);
            prop_assert!(p.x >= 30.0 && p.x <= 375.0);
            prop_assert!(p.y >= 60.0 && p.y <= 406.0);
        }
    }
}

#[test]
fn update_player_is_a_no_op() {
    let p = make_player();
    assert_eq!(update_player(&p), p);
}

// ── handle_input ──────────────────────────────────────────────────────────────

#[test]
fn left_moves_one_column() {
    let p = handle_input(&make_player(), Direction::Left, 505.0, 606.0);
    assert_eq!(p.x, 102.0);
}

#[test]
fn repeated_left_never_goes_below_bound() {
    let mut p = make_player();
    for _ in 0..5 {
        p = handle_input(&p, Direction::Left, 505.0, 606.0);
        assert!(p.x >= 30.0);
    }
    assert_eq!(p.x, 102.0); // 2.0 would be out of bounds, so the move is ignored
}

#[test]
fn right_moves_until_right_bound() {
    let mut p = make_player();
    p = handle_input(&p, Direction::Right, 505.0, 606.0);
    assert_eq!(p.x, 302.0);
    p = handle_input(&p, Direction::Right, 505.0, 606.0);
    assert_eq!(p.x, 302.0); // 402 > 505 - 130
}

#[test]
fn up_moves_one_step() {
    let p = handle_input(&make_player(), Direction::Up, 505.0, 606.0);
    assert_eq!(p.y, 370.0);
    assert!(!p.is_winner);
}

#[test]
fn up_from_top_row_wins_without_moving() {
    let mut p = make_player();
    p.y = 60.0;
    let p2 = handle_input(&p, Direction::Up, 505.0, 606.0);
    assert!(p2.is_winner);
    assert_eq!((p2.x, p2.y), (202.0, 60.0));
}

#[test]
fn up_landing_exactly_on_threshold_moves() {
    let mut p = make_player();
    p.y = 90.0;
    let p2 = handle_input(&p, Direction::Up, 505.0, 606.0);
    assert_eq!(p2.y, 60.0);
    assert!(!p2.is_winner);
}

#[test]
fn down_blocked_at_bottom_bound() {
    // start y=400; 430 > 606 - 200
    let p = handle_input(&make_player(), Direction::Down, 505.0, 606.0);
    assert_eq!(p.y, 400.0);

    let mut higher = make_player();
    higher.y = 370.0;
    let p2 = handle_input(&higher, Direction::Down, 505.0, 606.0);
    assert_eq!(p2.y, 400.0);
}

// ── reset ─────────────────────────────────────────────────────────────────────

#[test]
fn partial_reset_keeps_lives_and_win_flag() {
    let mut p = make_player();
    p.x = 102.0;
    p.y = 100.0;
    p.lives = 1;
    p.is_winner = true;
    let p2 = reset_player(&p, false, 3);
    assert_eq!((p2.x, p2.y), (202.0, 400.0));
    assert_eq!(p2.lives, 1);
    assert!(p2.is_winner);
}

#[test]
fn full_reset_restores_lives_and_win_flag() {
    let mut p = make_player();
    p.x = 102.0;
    p.lives = 1;
    p.is_winner = true;
    p.avatar = Avatar::HornGirl;
    let p2 = reset_player(&p, true, 3);
    assert_eq!((p2.x, p2.y), (202.0, 400.0));
    assert_eq!(p2.lives, 3);
    assert!(!p2.is_winner);
    assert_eq!(p2.avatar, Avatar::HornGirl);
}

#[test]
fn reset_state_clears_game_over() {
    let mut s = make_state(vec![]);
    s.is_game_over = true;
    let s2 = reset_state(&s, false, &GameConfig::default());
    assert!(!s2.is_game_over);
}

#[test]
fn reset_enemies_returns_to_lanes() {
    let mut e = make_enemy(0.0, 62.0);
    e.x = 321.0;
    let reset = reset_enemies(&[e]);
    assert_eq!(reset[0].x, 0.0);
    assert_eq!(reset[0].speed, 200);
}

// ── collisions ────────────────────────────────────────────────────────────────

#[test]
fn overlap_inside_box() {
    let mut p = make_player();
    p.x = 100.0;
    p.y = 100.0;
    assert!(overlaps(&p, &make_enemy(120.0, 120.0)));
    assert!(!overlaps(&p, &make_enemy(300.0, 300.0)));
}

#[test]
fn overlap_edges_are_inclusive() {
    let mut p = make_player();
    p.x = 100.0;
    p.y = 100.0;
    assert!(overlaps(&p, &make_enemy(150.0, 140.0)));
    assert!(!overlaps(&p, &make_enemy(150.5, 100.0)));
    assert!(!overlaps(&p, &make_enemy(100.0, 140.5)));
}

#[test]
fn hit_costs_a_life_and_resets_position() {
    let mut s = make_state(vec![make_enemy(110.0, 160.0)]);
    s.player.x = 102.0;
    s.player.y = 160.0;
    let (s2, events) = check_collisions(&s);
    assert_eq!(s2.player.lives, 2);
    assert_eq!((s2.player.x, s2.player.y), (202.0, 400.0));
    assert_eq!(events, vec![GameEvent::Hit { lives_left: 2 }]);
    assert!(!s2.is_game_over);
}

#[test]
fn no_hit_leaves_state_alone() {
    let s = make_state(vec![make_enemy(0.0, 62.0)]);
    let (s2, events) = check_collisions(&s);
    assert_eq!(s2, s);
    assert!(events.is_empty());
}

#[test]
fn three_hits_end_the_game() {
    // Enemy parked on the start tile hits again after every reset.
    let mut s = make_state(vec![make_enemy(202.0, 400.0)]);
    let mut all_events = Vec::new();
    for _ in 0..3 {
        let (next, events) = check_collisions(&s);
        s = next;
        all_events.extend(events);
    }
    assert_eq!(s.player.lives, 0);
    assert!(s.is_game_over);
    assert_eq!(
        all_events,
        vec![
            GameEvent::Hit { lives_left: 2 },
            GameEvent::Hit { lives_left: 1 },
            GameEvent::GameOver,
        ]
    );
}

#[test]
fn simultaneous_overlaps_each_cost_a_life() {
    let s = make_state(vec![make_enemy(202.0, 400.0), make_enemy(210.0, 390.0)]);
    let (s2, events) = check_collisions(&s);
    assert_eq!(s2.player.lives, 1);
    assert_eq!(events.len(), 2);
}

#[test]
fn lives_never_go_negative() {
    let mut s = make_state(vec![
        make_enemy(202.0, 400.0),
        make_enemy(202.0, 400.0),
        make_enemy(202.0, 400.0),
    ]);
    s.player.lives = 1;
    let (s2, events) = check_collisions(&s);
    assert_eq!(s2.player.lives, 0);
    assert_eq!(events, vec![GameEvent::GameOver]);
}

// ── win check ─────────────────────────────────────────────────────────────────

#[test]
fn winner_ends_the_game() {
    let mut s = make_state(vec![]);
    s.player.is_winner = true;
    let (s2, event) = check_win(&s);
    assert!(s2.is_game_over);
    assert_eq!(event, Some(GameEvent::Won));
}

#[test]
fn no_winner_no_event() {
    let s = make_state(vec![]);
    let (s2, event) = check_win(&s);
    assert!(!s2.is_game_over);
    assert_eq!(event, None);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_moves_every_enemy() {
    let config = GameConfig::default();
    let s = make_state(vec![make_enemy(0.0, 62.0), make_enemy(101.0, 230.0)]);
    let (s2, events) = tick(&s, 0.1, &config, &mut seeded_rng());
    assert_eq!(s2.enemies[0].x, 20.0);
    assert_eq!(s2.enemies[1].x, 121.0);
    assert!(events.is_empty());
}

#[test]
fn tick_detects_collision_after_moving() {
    let config = GameConfig::default();
    // Enemy 60px left of the player; after 0.1s at 200px/s it is 40px away.
    let s = make_state(vec![make_enemy(142.0, 400.0)]);
    let (s2, events) = tick(&s, 0.1, &config, &mut seeded_rng());
    assert_eq!(events, vec![GameEvent::Hit { lives_left: 2 }]);
    assert_eq!(s2.player.lives, 2);
}

#[test]
fn winning_tick_skips_collisions() {
    let config = GameConfig::default();
    let mut s = make_state(vec![make_enemy(202.0, 62.0)]);
    s.player.y = 70.0;
    s.player.is_winner = true;
    let (s2, events) = tick(&s, 0.0, &config, &mut seeded_rng());
    assert_eq!(events, vec![GameEvent::Won]);
    assert_eq!(s2.player.lives, 3);
    assert!(s2.is_game_over);
}
