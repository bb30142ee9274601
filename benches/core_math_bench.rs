use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Write as _;
use std::hint::black_box;
use widget_chart::api::{ChartEngine, ChartEngineConfig};
use widget_chart::core::{Axis, DataTable, LinearScale, SourceRef, Viewport, match_field_name};
use widget_chart::render::NullRenderer;

fn generated_csv(rows: usize) -> String {
    let mut csv = String::from("t,alpha,beta,gamma\n");
    for i in 0..rows {
        let t = i as f64;
        let _ = writeln!(csv, "{t},{},{},{}", t * 0.5, 100.0 - t * 0.01, (t * 0.1).sin());
    }
    csv
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(0.0, 10_000.0).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale
                .domain_to_pixel(black_box(4_321.123), 0.0, 1_920.0)
                .expect("to pixel");
            let _ = scale.pixel_to_domain(px, 0.0, 1_920.0).expect("from pixel");
        })
    });
}

fn bench_field_name_matching(c: &mut Criterion) {
    let names: Vec<String> = (0..64).map(|i| format!("Series_{i}")).collect();

    c.bench_function("field_name_match_case_folded_64", |b| {
        b.iter(|| {
            let _ = match_field_name(black_box("series_63"), names.iter().map(String::as_str));
        })
    });
}

fn bench_table_parse_10k(c: &mut Criterion) {
    let source = SourceRef::inline("bench", generated_csv(10_000));

    c.bench_function("data_table_parse_10k", |b| {
        b.iter(|| {
            let _ = DataTable::read(black_box(&source)).expect("parse");
        })
    });
}

fn bench_rebind_and_render_10k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(Viewport::new(1920, 1080))
        .with_source(SourceRef::inline("bench", generated_csv(10_000)))
        .with_fields(Some("t"), "alpha");
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let fields = ["beta", "gamma", "alpha"];
    let mut next = 0;

    c.bench_function("rebind_and_render_10k", |b| {
        b.iter(|| {
            engine.click_label(Axis::Y).expect("editor opens");
            let _ = engine
                .confirm_label_edit_with(fields[next % fields.len()])
                .expect("rebind");
            engine.render().expect("render");
            next += 1;
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_field_name_matching,
    bench_table_parse_10k,
    bench_rebind_and_render_10k
);
criterion_main!(benches);
