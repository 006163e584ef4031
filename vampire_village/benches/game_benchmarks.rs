use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use vampire_village::{
    GameEngine, GameSettings, GameState, GameView, IdSource, Intent, NightChoice, Player, PlayerId,
    RngSource, Role, SequentialIds,
    game::{assignment, night, voting},
};

fn roster(count: usize) -> Vec<Player> {
    let mut ids = SequentialIds::default();
    (0..count)
        .map(|i| Player::new(ids.next_id(), format!("player{i}")))
        .collect()
}

/// Helper to create an engine sitting in the first real night
fn setup_night(count: usize) -> GameEngine {
    let mut engine = GameEngine::with_sources(
        GameSettings::default(),
        Box::new(RngSource::seeded(7)),
        Box::new(SequentialIds::default()),
    );
    for i in 0..count {
        engine
            .apply(Intent::AddPlayer {
                name: format!("player{i}"),
            })
            .unwrap();
    }
    let state = engine.apply(Intent::StartGame).unwrap();
    for player in &state.players {
        engine
            .apply(Intent::RevealRole { id: player.id })
            .unwrap();
    }
    engine
}

/// Every night actor submits; vampires all go for the same villager
fn submitted_night(count: usize) -> GameState {
    let engine = setup_night(count);
    let mut state = (*engine.state()).clone();
    let victim = state
        .players
        .iter()
        .find(|p| p.is(Role::Villager))
        .map(|p| p.id)
        .unwrap();
    let actors: Vec<PlayerId> = state.night_actors().map(|p| p.id).collect();
    for actor in actors {
        let is_vampire = state.player(actor).unwrap().is(Role::Vampire);
        let choice = if is_vampire {
            NightChoice::Target(victim)
        } else {
            NightChoice::Target(actor)
        };
        state = night::submit(&state, actor, choice).unwrap();
    }
    state
}

/// Benchmark dealing roles across roster sizes
fn bench_role_assignment(c: &mut Criterion) {
    let settings = GameSettings::default();
    let mut group = c.benchmark_group("role_assignment");
    for count in [7, 11, 15] {
        let players = roster(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &players, |b, players| {
            let mut rng = RngSource::seeded(1);
            b.iter(|| assignment::assign(players, &settings, &mut rng).unwrap());
        });
    }
    group.finish();
}

/// Benchmark resolving a full night
fn bench_night_resolution(c: &mut Criterion) {
    let settings = GameSettings::default();
    let mut group = c.benchmark_group("night_resolution");
    for count in [7, 15] {
        let state = submitted_night(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &state, |b, state| {
            let mut rng = RngSource::seeded(2);
            b.iter(|| night::resolve(state, &settings, &mut rng));
        });
    }
    group.finish();
}

/// Benchmark vote tally
fn bench_vote_leaders(c: &mut Criterion) {
    let state = setup_night(15).state();
    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    let votes: BTreeMap<PlayerId, PlayerId> = ids
        .iter()
        .enumerate()
        .map(|(i, voter)| (*voter, ids[i % 4]))
        .collect();

    c.bench_function("vote_leaders_15", |b| {
        b.iter(|| voting::leaders(&votes));
    });
}

/// Benchmark per-player view projection
fn bench_view_generation(c: &mut Criterion) {
    let state = setup_night(15).state();
    let observer = state.players[0].id;

    c.bench_function("view_generation_15", |b| {
        b.iter(|| GameView::for_player(&state, observer).unwrap());
    });
}

criterion_group!(rules, bench_role_assignment, bench_night_resolution, bench_vote_leaders);

criterion_group!(projections, bench_view_generation);

criterion_main!(rules, projections);
