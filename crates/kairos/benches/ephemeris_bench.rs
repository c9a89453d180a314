use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kairos::ephemeris::{
    compute_houses, AyanamsaSystem, Body, ClosedFormEphemeris, GeoLocation, HouseSystem,
    PrecisionTier, Zodiac, J2000_JD,
};

fn bench_calc_positions(c: &mut Criterion) {
    let basic = ClosedFormEphemeris::new(PrecisionTier::Basic, Zodiac::Tropical);
    let enhanced = ClosedFormEphemeris::new(
        PrecisionTier::Enhanced,
        Zodiac::Sidereal(AyanamsaSystem::Lahiri),
    );
    let jd = J2000_JD + 3_456.78;

    c.bench_function("calc_positions_basic", |b| {
        b.iter(|| basic.calc_positions(black_box(jd), black_box(&Body::ALL)))
    });
    c.bench_function("calc_positions_enhanced_sidereal", |b| {
        b.iter(|| enhanced.calc_positions(black_box(jd), black_box(&Body::ALL)))
    });
}

fn bench_compute_houses(c: &mut Criterion) {
    let location = GeoLocation {
        lat: 40.7128,
        lon: -74.0060,
    };

    c.bench_function("compute_houses_placidus", |b| {
        b.iter(|| {
            compute_houses(
                black_box(J2000_JD),
                black_box(location.lat),
                black_box(location.lon),
                HouseSystem::PlacidusApprox,
                black_box(Some(23.85)),
            )
        })
    });
}

criterion_group!(benches, bench_calc_positions, bench_compute_houses);
criterion_main!(benches);
