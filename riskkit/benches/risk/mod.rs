use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use riskkit::{
    returns::{ReturnSeries, ReturnTable},
    statistic::summary::RiskSummaryGenerator,
};
use std::hint::black_box;

criterion_main!(benches);
criterion_group!(benches, bench_drawdown, bench_summary);

fn bench_drawdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("Drawdown");

    for observations in [120, 1_200, 12_000] {
        let series = series(observations);

        group.bench_with_input(
            BenchmarkId::new("table", observations),
            &series,
            |b, series| b.iter(|| black_box(series).drawdown()),
        );

        group.bench_with_input(
            BenchmarkId::new("max_drawdown", observations),
            &series.drawdown(),
            |b, table| b.iter(|| black_box(table).max_drawdown()),
        );
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let generator = RiskSummaryGenerator::default();
    let table = ReturnTable::from_iter([("SmallCap", series(1_200)), ("LargeCap", series(1_200))]);

    c.bench_function("RiskSummaryTable/2x1200", |b| {
        b.iter(|| generator.generate_table(black_box(&table)))
    });
}

// 确定性的月度收益：正弦波动叠加小幅漂移
fn series(observations: usize) -> ReturnSeries<usize> {
    ReturnSeries::from_values(
        (0..observations)
            .map(|i| 0.005 + 0.04 * (i as f64 * 0.7).sin())
            .collect(),
    )
}
