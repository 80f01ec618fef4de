use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use vector_core::build_path;

fn gear_path(teeth: usize) -> String {
    let mut d = String::from("M12 2");
    for i in 0..teeth {
        let a = i as f32 / teeth as f32 * std::f32::consts::TAU;
        d.push_str(&format!(
            " L{:.3},{:.3} c0.5,-0.5 1,-0.5 1.5,0 a2,2 0 0,1 -1,1",
            12.0 + 10.0 * a.cos(),
            12.0 + 10.0 * a.sin()
        ));
    }
    d.push_str(" Z");
    d
}

fn bench_parse_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_data");

    for &teeth in &[8usize, 64, 512] {
        let data = gear_path(teeth);
        group.bench_with_input(BenchmarkId::new("parse", teeth), &data, |b, d| {
            b.iter(|| vector_data::parse(d))
        });

        let commands = match vector_data::parse(&data) {
            Ok(commands) => commands,
            Err(err) => panic!("benchmark path failed to parse: {err}"),
        };
        group.bench_with_input(BenchmarkId::new("build", teeth), &commands, |b, cmds| {
            b.iter(|| build_path(cmds))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_and_build);
criterion_main!(benches);
