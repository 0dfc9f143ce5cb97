use criterion::{black_box, criterion_group, criterion_main, Criterion};
use astro_methods::ephemeris::{AscendantData, EphemerisSnapshot, Planet, PlanetPosition};
use astro_methods::jaimini::{calculate_arudha_padas, calculate_chara_dasha, calculate_chara_karakas, detect_all};
use chrono::{TimeZone, Utc};

fn snapshot() -> EphemerisSnapshot {
    let planets = Planet::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| PlanetPosition::from_longitude(*p, i as f64 * 53.0 + 7.7, i == 4));
    EphemerisSnapshot::new(planets, AscendantData::whole_sign(95.0))
}

fn bench_karakas(c: &mut Criterion) {
    let snapshot = snapshot();

    c.bench_function("chara_karakas", |b| {
        b.iter(|| calculate_chara_karakas(black_box(&snapshot)).unwrap())
    });
}

fn bench_arudha(c: &mut Criterion) {
    let snapshot = snapshot();

    c.bench_function("arudha_padas", |b| {
        b.iter(|| calculate_arudha_padas(black_box(&snapshot)).unwrap())
    });
}

fn bench_chara_dasha(c: &mut Criterion) {
    let snapshot = snapshot();
    let birth = Utc.with_ymd_and_hms(1985, 3, 2, 11, 30, 0).unwrap();

    c.bench_function("chara_dasha", |b| {
        b.iter(|| calculate_chara_dasha(black_box(&snapshot), black_box(birth)).unwrap())
    });
}

fn bench_yogas(c: &mut Criterion) {
    let snapshot = snapshot();
    let karakas = calculate_chara_karakas(&snapshot).unwrap();

    c.bench_function("detect_all_yogas", |b| {
        b.iter(|| detect_all(black_box(&snapshot), black_box(&karakas)).unwrap())
    });
}

criterion_group!(benches, bench_karakas, bench_arudha, bench_chara_dasha, bench_yogas);
criterion_main!(benches);
