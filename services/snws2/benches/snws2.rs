use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use http::Method;
use snsign_snws2::AuthorizationBuilder;
use std::hint::black_box;

criterion_group!(benches, bench);
criterion_main!(benches);

fn builder() -> AuthorizationBuilder {
    let mut builder = AuthorizationBuilder::new("test-token-id");
    builder
        .method(Method::GET)
        .url("https://data.solarnetwork.net/solarquery/api/v1/sec/datum/list?nodeId=1&sourceId=/meter/1&startDate=2017-04-25")
        .expect("url must be valid");
    builder
}

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("snws2");

    group.bench_function("build", |b| {
        let builder = builder();
        b.iter(|| black_box(builder.build("test-token-secret")))
    });

    group.bench_function("build_with_saved_key", |b| {
        let mut builder = builder();
        builder.save_signing_key("test-token-secret");
        b.iter(|| black_box(builder.build_with_saved_key().expect("signing key must be saved")))
    });

    group.finish();
}
