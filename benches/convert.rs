use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use vcdwave::{Converter, TraceReader};

const CYCLES: u64 = 4096;

fn generate_trace() -> String {
    let mut text = String::from(
        "$scope module bench $end\n\
         $var wire 1 ! clk $end\n\
         $var wire 1 \" toggle $end\n\
         $var reg 32 # count $end\n\
         $upscope $end\n\
         $enddefinitions $end\n",
    );
    for cycle in 0..CYCLES {
        let t = cycle * 10;
        text.push_str(&format!(
            "#{t}\n1!\n{}\"\nb{:032b} #\n#{}\n0!\n",
            cycle % 2,
            cycle / 3,
            t + 5
        ));
    }
    text.push_str(&format!("#{}\n", CYCLES * 10));
    text
}

fn bench_convert(c: &mut Criterion) {
    let trace = generate_trace();
    let mut group = c.benchmark_group("convert");
    for chunk in [8usize, 20, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let reader = TraceReader::new(Cursor::new(trace.as_bytes()));
                let converter = Converter::builder(reader, Vec::<String>::new())
                    .unwrap()
                    .chunk_size(chunk)
                    .format("bench/count", 'u')
                    .unwrap()
                    .build()
                    .unwrap();
                let mut out = Vec::new();
                converter.run(&mut out).unwrap();
                std::hint::black_box(out)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
