use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plres::{parse::parse_input, resolution, session};

pub fn saturation(c: &mut Criterion) {
    let small = "Q\n2\nP\n-P OR Q";
    let medium = "-A OR E
6
-A OR B
-B OR C
-C OR D
-D OR E
B OR -E
C OR -A OR F";
    let unsat = "S
4
P OR Q
-P OR Q
P OR -Q
-P OR -Q";

    let mut g = c.benchmark_group("Saturation");
    for (name, input) in [("small", small), ("medium", medium), ("unsat", unsat)] {
        g.bench_with_input(BenchmarkId::new("Saturation", name), &input, |b, &f| {
            session(|| {
                let (alpha, kb) = parse_input(f).unwrap();
                b.iter(|| {
                    let res = resolution(&kb, &alpha);
                    black_box(res)
                })
            })
        });
    }
    g.finish();
}

criterion_group!(benches, saturation);
criterion_main!(benches);
