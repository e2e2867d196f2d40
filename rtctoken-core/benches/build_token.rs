//! Benchmarks for the token build path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rtctoken_core::*;

const CHANNEL_LENGTHS: &[usize] = &[8, 64, 1024];

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let cert = AppCertificate::new("bench-certificate").unwrap();

    for &len in CHANNEL_LENGTHS {
        let channel = "c".repeat(len);
        let request = BuildRequest::new(
            "a1b2c3d4e5f6",
            &cert,
            channel,
            1000u64,
            PrivilegeSet::grant_all(1_700_003_600),
        )
        .with_salt(1_700_000_000);

        group.bench_with_input(BenchmarkId::new("grant_all", len), &len, |b, &_len| {
            b.iter(|| black_box(build(&request).unwrap()));
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let cert = AppCertificate::new("bench-certificate").unwrap();
    let request = BuildRequest::new(
        "a1b2c3d4e5f6",
        &cert,
        "room1",
        1000u64,
        PrivilegeSet::grant_all(1_700_003_600),
    )
    .with_salt(1_700_000_000);
    let claims = request.claims().encode().unwrap();
    let signature = sign(&cert, request.salt(), &claims).unwrap();
    let token = pack(&signature, &claims).unwrap();

    group.bench_function("encode", |b| {
        b.iter(|| black_box(request.claims().encode().unwrap()));
    });
    group.bench_function("sign", |b| {
        b.iter(|| black_box(sign(&cert, request.salt(), &claims).unwrap()));
    });
    group.bench_function("pack", |b| {
        b.iter(|| black_box(pack(&signature, &claims).unwrap()));
    });
    group.bench_function("inspect", |b| {
        b.iter(|| black_box(inspect(&token).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_stages);
criterion_main!(benches);
